//! LLM-driven cooking assistant workflow.
//!
//! Routes each query through a fixed five-stage state machine, with the
//! model deciding which registered tools to call along the way. Uses a
//! pluggable provider abstraction backed by OpenAI-compatible APIs.
//!
//! # Architecture
//!
//! ```text
//! User query → Orchestrator (never fails)
//!   └── Workflow
//!       ├── classify ──(not relevant)──────────────────────────┐
//!       ├── search            → search_recipes | search_cooking_question
//!       ├── identify_tools    → extract_required_cookware
//!       ├── validate_cookware → validate_cookware (if cookware found)
//!       └── respond ◄──────────────────────────────────────────┘
//! ```

pub mod client;
pub mod config;
pub mod executor;
pub mod message;
pub mod orchestrator;
pub mod prompt;
pub mod provider;
pub mod providers;
pub mod response;
pub mod stage;
pub mod state;
pub mod tool;
pub mod workflow;

// Re-export key types
pub use config::AgentConfig;
pub use executor::ToolExecutor;
pub use message::{ChatMessage, ChatRequest, ChatResponse, Role, TokenUsage};
pub use orchestrator::{MAX_QUERY_BYTES, Orchestrator, validate_query};
pub use prompt::PromptSet;
pub use provider::LlmProvider;
pub use response::QueryResponse;
pub use stage::{Stage, route};
pub use state::WorkflowState;
pub use tool::{ToolCall, ToolDefinition, ToolInvocation, ToolKind, ToolSet};
pub use workflow::Workflow;

//! # recipe-rs
//!
//! A cooking assistant that answers recipe and cooking-technique questions
//! by routing each query through a small LLM-driven state machine.
//!
//! ## Overview
//!
//! Every query passes through up to five stages: classify the query,
//! optionally search the web, optionally extract the cookware a recipe
//! needs, validate that cookware against what is on hand, and respond.
//! Off-topic queries skip straight to a polite refusal.
//!
//! ## Modules
//!
//! - [`core`]: cookware validation and relevance parsing
//! - [`agent`]: provider abstraction, tools, the stage machine, and the
//!   query service
//! - [`search`]: live web search with a deterministic offline fallback
//! - [`server`]: HTTP API
//! - [`cli`]: command-line interface
//! - [`error`]: error types
//!
//! ## Example
//!
//! ```no_run
//! use recipe_rs::agent::{AgentConfig, Orchestrator};
//!
//! # async fn run() -> Result<(), recipe_rs::error::AgentError> {
//! let config = AgentConfig::from_env()?;
//! let orchestrator = Orchestrator::from_config(config)?;
//! let reply = orchestrator.process("How do I make chicken soup?").await;
//! assert!(reply.relevant);
//! # Ok(())
//! # }
//! ```

pub mod agent;
pub mod cli;
pub mod core;
pub mod error;
pub mod search;
pub mod server;

pub use agent::{AgentConfig, Orchestrator, QueryResponse};
pub use crate::core::{CookwareValidation, Relevance, validate_cookware};
pub use error::{AgentError, CommandError, Error, Result};

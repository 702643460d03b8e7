//! Provider-agnostic conversation types.
//!
//! A query's conversation is an append-only list of [`ChatMessage`]s whose
//! order is the context handed to the model on every call. These types
//! keep the workflow independent of any particular LLM SDK.

use serde::{Deserialize, Serialize};

use super::tool::{ToolCall, ToolDefinition};

/// Author of a conversation message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// System instructions.
    System,
    /// The person asking the question.
    Human,
    /// The model, or a synthetic instruction written in its voice.
    Ai,
    /// Output of a dispatched tool, bound to the AI turn that requested it.
    Tool,
}

/// A single conversation message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    /// Role of the message author.
    pub role: Role,
    /// Free-text content.
    pub content: String,
    /// Tool the model asked to invoke (only for [`Role::Ai`]).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tool_call: Option<ToolCall>,
    /// ID of the tool call this message answers (only for [`Role::Tool`]).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tool_call_id: Option<String>,
}

/// A chat completion request (provider-agnostic).
#[derive(Debug, Clone)]
pub struct ChatRequest {
    /// Model identifier (e.g., "gpt-4o").
    pub model: String,
    /// Ordered conversation messages.
    pub messages: Vec<ChatMessage>,
    /// Sampling temperature (0.0–2.0).
    pub temperature: Option<f32>,
    /// Maximum tokens to generate.
    pub max_tokens: Option<u32>,
    /// Tools the model may choose to call.
    pub tools: Vec<ToolDefinition>,
}

/// Token usage statistics from a completion.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TokenUsage {
    /// Tokens consumed by the prompt.
    pub prompt_tokens: u32,
    /// Tokens generated in the completion.
    pub completion_tokens: u32,
    /// Total tokens used.
    pub total_tokens: u32,
}

/// A chat completion response (provider-agnostic).
#[derive(Debug, Clone, Default)]
pub struct ChatResponse {
    /// Generated text content.
    pub content: String,
    /// Token usage statistics.
    pub usage: TokenUsage,
    /// Tool calls requested by the model.
    pub tool_calls: Vec<ToolCall>,
    /// Finish reason from the model (e.g., `"stop"`, `"tool_calls"`).
    pub finish_reason: Option<String>,
}

impl ChatResponse {
    /// Converts the response into the AI message appended to the
    /// conversation. Only the first requested tool call is kept; stages
    /// dispatch at most one tool per turn.
    #[must_use]
    pub fn into_message(self) -> ChatMessage {
        ChatMessage {
            role: Role::Ai,
            content: self.content,
            tool_call: self.tool_calls.into_iter().next(),
            tool_call_id: None,
        }
    }
}

/// Creates a system message.
#[must_use]
pub fn system_message(content: &str) -> ChatMessage {
    ChatMessage {
        role: Role::System,
        content: content.to_string(),
        tool_call: None,
        tool_call_id: None,
    }
}

/// Creates a human message.
#[must_use]
pub fn human_message(content: &str) -> ChatMessage {
    ChatMessage {
        role: Role::Human,
        content: content.to_string(),
        tool_call: None,
        tool_call_id: None,
    }
}

/// Creates a plain AI message.
#[must_use]
pub fn ai_message(content: &str) -> ChatMessage {
    ChatMessage {
        role: Role::Ai,
        content: content.to_string(),
        tool_call: None,
        tool_call_id: None,
    }
}

/// Creates the synthetic message carrying a tool's output.
///
/// Content is `"Tool result: "` followed by the pretty-printed JSON value.
#[must_use]
pub fn tool_result_message(tool_call_id: &str, result: &serde_json::Value) -> ChatMessage {
    let rendered = serde_json::to_string_pretty(result).unwrap_or_else(|_| result.to_string());
    ChatMessage {
        role: Role::Tool,
        content: format!("Tool result: {rendered}"),
        tool_call: None,
        tool_call_id: Some(tool_call_id.to_string()),
    }
}

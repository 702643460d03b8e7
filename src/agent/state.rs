//! Per-query workflow state.
//!
//! Every stage takes a [`WorkflowState`] by value and returns the complete
//! state, so fields a stage does not touch (notably `relevant`) are carried
//! forward by construction.

use serde_json::{Map, Value};

use super::message::ChatMessage;
use super::stage::Stage;

/// `debug_info` key written by the classify stage.
pub const RELEVANCE_CHECK_KEY: &str = "relevance_check";
/// `debug_info` key written by the search stage.
pub const SEARCH_KEY: &str = "search";
/// `debug_info` key written by the identify-tools stage.
pub const TOOLS_KEY: &str = "tools";
/// `debug_info` key written by the validate-cookware stage.
pub const COOKWARE_VALIDATION_KEY: &str = "cookware_validation";
/// `debug_info` key holding the visited stage names.
pub const STAGES_KEY: &str = "stages";
/// `debug_info` key holding the failure message of an aborted query.
pub const ERROR_KEY: &str = "error";

/// State threaded through the routing state machine for one query.
#[derive(Debug, Clone, Default)]
pub struct WorkflowState {
    query: String,
    /// Conversation so far, in model-context order.
    pub messages: Vec<ChatMessage>,
    /// Diagnostics keyed by the stage payload that produced them.
    pub debug_info: Map<String, Value>,
    /// Whether the query was classified as cooking-related.
    pub relevant: bool,
    /// Stages executed so far, in order.
    pub visited: Vec<Stage>,
}

impl WorkflowState {
    /// Creates the initial state for a query.
    #[must_use]
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            ..Self::default()
        }
    }

    /// Query text as submitted.
    #[must_use]
    pub fn query(&self) -> &str {
        &self.query
    }

    /// Appends a message to the conversation.
    pub fn push(&mut self, message: ChatMessage) {
        self.messages.push(message);
    }

    /// Records a diagnostic payload under `key`.
    pub fn record(&mut self, key: &str, value: Value) {
        self.debug_info.insert(key.to_string(), value);
    }

    /// Cookware recorded by the identify-tools stage, or empty if none.
    #[must_use]
    pub fn required_cookware(&self) -> Vec<String> {
        self.debug_info
            .get(TOOLS_KEY)
            .and_then(|tools| tools.get("required_cookware"))
            .and_then(Value::as_array)
            .map(|items| {
                items
                    .iter()
                    .filter_map(Value::as_str)
                    .map(ToString::to_string)
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Relevance recorded by the classify stage, if present.
    #[must_use]
    pub fn recorded_relevance(&self) -> Option<bool> {
        self.debug_info
            .get(RELEVANCE_CHECK_KEY)
            .and_then(|check| check.get("relevant"))
            .and_then(Value::as_bool)
    }

    /// Content of the last message, the final answer once the machine halts.
    #[must_use]
    pub fn last_content(&self) -> Option<&str> {
        self.messages.last().map(|m| m.content.as_str())
    }
}

//! Payload returned by the query service.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::state::{ERROR_KEY, STAGES_KEY, WorkflowState};

/// Reply used when the machine halts without producing any message.
pub const NO_RESPONSE: &str = "No response generated";

/// Reply used when a query fails. The cause goes to `debug_info.error`.
pub const ERROR_RESPONSE: &str =
    "Sorry, something went wrong while answering your question. Please try again.";

/// Final answer for one query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryResponse {
    /// Answer text, refusal, or error message.
    pub response: String,
    /// Whether the query was judged cooking-related.
    pub relevant: bool,
    /// Stage diagnostics; `None` when hidden from the caller.
    pub debug_info: Option<Map<String, Value>>,
}

impl QueryResponse {
    /// Extracts the payload from a terminal workflow state.
    ///
    /// `relevant` prefers the value recorded in
    /// `debug_info.relevance_check` over the state flag.
    #[must_use]
    pub fn from_state(state: WorkflowState) -> Self {
        let response = state.last_content().unwrap_or(NO_RESPONSE).to_string();
        let relevant = state.recorded_relevance().unwrap_or(state.relevant);

        let mut debug_info = state.debug_info;
        let stages: Vec<Value> = state
            .visited
            .iter()
            .map(|stage| Value::from(stage.name()))
            .collect();
        debug_info.insert(STAGES_KEY.to_string(), Value::Array(stages));

        Self {
            response,
            relevant,
            debug_info: Some(debug_info),
        }
    }

    /// Builds the best-effort payload for a failed query.
    ///
    /// The error text is kept out of `response`, so callers that hide
    /// `debug_info` never see it.
    #[must_use]
    pub fn from_error(error: &impl std::fmt::Display) -> Self {
        let mut debug_info = Map::new();
        debug_info.insert(ERROR_KEY.to_string(), Value::from(error.to_string()));
        Self {
            response: ERROR_RESPONSE.to_string(),
            relevant: false,
            debug_info: Some(debug_info),
        }
    }

    /// Drops `debug_info` unless `debug` is set.
    #[must_use]
    pub fn with_debug(mut self, debug: bool) -> Self {
        if !debug {
            self.debug_info = None;
        }
        self
    }
}

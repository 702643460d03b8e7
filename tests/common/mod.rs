//! Shared fixtures for integration tests.

#![allow(dead_code)]

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use recipe_rs::agent::message::Role;
use recipe_rs::agent::prompt::{CLASSIFY_INSTRUCTION, COOKWARE_SYSTEM_PROMPT, RESPOND_INSTRUCTION};
use recipe_rs::agent::{
    AgentConfig, ChatRequest, ChatResponse, LlmProvider, Orchestrator, ToolCall,
};
use recipe_rs::error::AgentError;
use recipe_rs::search::CookingSearch;

/// Words that make the mock classifier answer `RELEVANT`.
const COOKING_WORDS: &[&str] = &["soup", "cook", "recipe", "bake", "pasta", "sear"];

/// Stateless mock model that answers by inspecting the request.
///
/// It classifies by keyword, always searches for recipes, optionally asks
/// for cookware extraction, and builds its final answer from the first
/// search result in the transcript.
pub struct RuleProvider {
    extract_cookware: bool,
    search_tool: &'static str,
    call_count: AtomicUsize,
}

impl RuleProvider {
    pub fn new() -> Self {
        Self {
            extract_cookware: true,
            search_tool: "search_recipes",
            call_count: AtomicUsize::new(0),
        }
    }

    /// Never asks for cookware extraction.
    pub fn without_extraction(mut self) -> Self {
        self.extract_cookware = false;
        self
    }

    /// Requests `name` when offered the search tools.
    pub fn with_search_tool(mut self, name: &'static str) -> Self {
        self.search_tool = name;
        self
    }

    pub fn calls(&self) -> usize {
        self.call_count.load(Ordering::SeqCst)
    }
}

fn text(content: impl Into<String>) -> ChatResponse {
    ChatResponse {
        content: content.into(),
        ..ChatResponse::default()
    }
}

fn tool(name: &str, arguments: serde_json::Value) -> ChatResponse {
    ChatResponse {
        tool_calls: vec![ToolCall {
            id: format!("call_{name}"),
            name: name.to_string(),
            arguments: arguments.to_string(),
        }],
        finish_reason: Some("tool_calls".to_string()),
        ..ChatResponse::default()
    }
}

fn first_search_title(request: &ChatRequest) -> Option<String> {
    request.messages.iter().find_map(|m| {
        let body = m.content.strip_prefix("Tool result: ")?;
        let value: serde_json::Value = serde_json::from_str(body).ok()?;
        value["results"][0]["title"].as_str().map(ToString::to_string)
    })
}

#[async_trait]
impl LlmProvider for RuleProvider {
    fn name(&self) -> &'static str {
        "rules"
    }

    async fn chat(&self, request: &ChatRequest) -> Result<ChatResponse, AgentError> {
        self.call_count.fetch_add(1, Ordering::SeqCst);

        let offers = |name: &str| request.tools.iter().any(|t| t.name == name);
        let query = request
            .messages
            .iter()
            .find(|m| m.role == Role::Human)
            .map(|m| m.content.to_lowercase())
            .unwrap_or_default();
        let last = request.messages.last().map(|m| m.content.as_str());

        if request.messages.first().map(|m| m.content.as_str()) == Some(COOKWARE_SYSTEM_PROMPT) {
            return Ok(text("Little pot\nsoup ladle\nwooden spoon"));
        }
        if last == Some(CLASSIFY_INSTRUCTION) {
            let relevant = COOKING_WORDS.iter().any(|w| query.contains(w));
            return Ok(text(if relevant { "RELEVANT" } else { "NOT" }));
        }
        if offers("search_recipes") {
            return Ok(tool(self.search_tool, serde_json::json!({ "query": query })));
        }
        if offers("extract_required_cookware") {
            if !self.extract_cookware {
                return Ok(text("No recipe to analyse."));
            }
            return Ok(tool(
                "extract_required_cookware",
                serde_json::json!({
                    "recipe": "Simmer the chicken in a pot and ladle into bowls."
                }),
            ));
        }
        if offers("validate_cookware") {
            return Ok(tool(
                "validate_cookware",
                serde_json::json!({ "required_tools": ["Oven"] }),
            ));
        }
        if last == Some(RESPOND_INSTRUCTION) {
            return Ok(text(first_search_title(request).map_or_else(
                || "Here is how to cook it.".to_string(),
                |title| format!("Try the {title}: simmer gently and season to taste."),
            )));
        }
        Ok(text("Let me think about that."))
    }
}

/// Mock model whose every call fails.
pub struct DownProvider;

#[async_trait]
impl LlmProvider for DownProvider {
    fn name(&self) -> &'static str {
        "down"
    }

    async fn chat(&self, _request: &ChatRequest) -> Result<ChatResponse, AgentError> {
        Err(AgentError::ApiRequest {
            message: "503 Service Unavailable".to_string(),
            status: Some(503),
        })
    }
}

pub fn config(debug: bool) -> AgentConfig {
    AgentConfig::builder()
        .api_key("test-key")
        .debug(debug)
        .build()
        .unwrap_or_else(|_| unreachable!())
}

/// Orchestrator over the given provider with offline search.
pub fn orchestrator(provider: Arc<dyn LlmProvider>, debug: bool) -> Orchestrator {
    Orchestrator::with_search(provider, config(debug), CookingSearch::offline())
}

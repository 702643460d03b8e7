//! Tool executor that dispatches registry invocations to their implementations.
//!
//! Deterministic tools call straight into [`crate::core`], search tools go
//! through [`CookingSearch`], and the LLM-backed tools issue their own
//! completions through the configured [`LlmProvider`].

use serde::Serialize;
use tracing::{debug, info};

use super::config::AgentConfig;
use super::message::{ChatRequest, human_message, system_message};
use super::prompt::{
    EXPLAINER_SYSTEM_PROMPT, NOT_COOKING_EXPLANATION, PromptSet, build_cookware_request,
    build_explanation_request, build_relevance_request,
};
use super::provider::LlmProvider;
use super::tool::ToolInvocation;
use crate::core::{CookwareExtraction, Relevance, RelevanceCheck, validate_cookware};
use crate::error::AgentError;
use crate::search::CookingSearch;

/// Executes tool invocations against the provider, search, and cookware list.
///
/// Borrows everything it needs from the workflow, so one executor is cheap
/// to create per dispatch.
pub struct ToolExecutor<'a> {
    provider: &'a dyn LlmProvider,
    config: &'a AgentConfig,
    prompts: &'a PromptSet,
    search: &'a CookingSearch,
}

impl<'a> ToolExecutor<'a> {
    /// Creates a new executor.
    #[must_use]
    pub fn new(
        provider: &'a dyn LlmProvider,
        config: &'a AgentConfig,
        prompts: &'a PromptSet,
        search: &'a CookingSearch,
    ) -> Self {
        Self {
            provider,
            config,
            prompts,
            search,
        }
    }

    /// Dispatches a checked invocation and returns its JSON result.
    ///
    /// # Errors
    ///
    /// Returns [`AgentError::ApiRequest`] if an LLM-backed tool's completion
    /// fails. Search tools never fail; they fall back to canned results.
    pub async fn dispatch(
        &self,
        invocation: &ToolInvocation,
    ) -> Result<serde_json::Value, AgentError> {
        let tool = invocation.kind();
        info!(%tool, input = %invocation.arguments_json(), "dispatching tool");

        match invocation {
            ToolInvocation::ValidateQueryRelevance(args) => {
                to_json(&self.validate_query_relevance(&args.query).await?)
            }
            ToolInvocation::ValidateCookware(args) => to_json(&validate_cookware(
                &args.required_tools,
                &self.config.available_cookware,
            )),
            ToolInvocation::SearchRecipes(args) => {
                to_json(&self.search.search_recipes(&args.query).await)
            }
            ToolInvocation::SearchCookingQuestion(args) => {
                to_json(&self.search.search_cooking_question(&args.query).await)
            }
            ToolInvocation::ExtractRequiredCookware(args) => {
                to_json(&self.extract_required_cookware(&args.recipe).await?)
            }
        }
    }

    /// Asks the model for a `true`/`false` verdict, then for a one-sentence
    /// explanation when the query is relevant.
    async fn validate_query_relevance(&self, query: &str) -> Result<RelevanceCheck, AgentError> {
        let verdict = self
            .complete(&self.prompts.classifier, &build_relevance_request(query))
            .await?;
        let relevance = Relevance::from_verdict(&verdict);
        debug!(%relevance, verdict = %verdict.trim(), "relevance verdict");

        let explanation = if relevance.is_relevant() {
            self.complete(EXPLAINER_SYSTEM_PROMPT, &build_explanation_request(query))
                .await?
                .trim()
                .to_string()
        } else {
            NOT_COOKING_EXPLANATION.to_string()
        };

        Ok(RelevanceCheck::new(relevance, explanation))
    }

    async fn extract_required_cookware(
        &self,
        recipe: &str,
    ) -> Result<CookwareExtraction, AgentError> {
        let reply = self
            .complete(&self.prompts.cookware, &build_cookware_request(recipe))
            .await?;
        let extraction = CookwareExtraction::from_reply(&reply, &self.config.available_cookware);
        debug!(
            raw = extraction.raw_identified_items.len(),
            required = ?extraction.required_cookware,
            "extracted cookware"
        );
        Ok(extraction)
    }

    /// Single-turn completion with no tools offered.
    async fn complete(&self, system: &str, human: &str) -> Result<String, AgentError> {
        let request = ChatRequest {
            model: self.config.model.clone(),
            messages: vec![system_message(system), human_message(human)],
            temperature: Some(self.config.temperature),
            max_tokens: Some(self.config.max_tokens),
            tools: Vec::new(),
        };
        Ok(self.provider.chat(&request).await?.content)
    }
}

fn to_json<T: Serialize>(value: &T) -> Result<serde_json::Value, AgentError> {
    serde_json::to_value(value).map_err(|e| AgentError::Orchestration {
        message: format!("failed to serialize tool result: {e}"),
    })
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use async_trait::async_trait;
    use serde_json::json;

    use super::*;
    use crate::agent::message::{ChatResponse, Role};
    use crate::agent::tool::ToolCall;

    /// Mock provider that replays canned replies in order and records the
    /// last user turn of each request.
    struct MockProvider {
        replies: Vec<&'static str>,
        call_count: AtomicUsize,
        prompts: Mutex<Vec<String>>,
    }

    impl MockProvider {
        fn new(replies: Vec<&'static str>) -> Self {
            Self {
                replies,
                call_count: AtomicUsize::new(0),
                prompts: Mutex::new(Vec::new()),
            }
        }

        fn calls(&self) -> usize {
            self.call_count.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl LlmProvider for MockProvider {
        fn name(&self) -> &'static str {
            "mock"
        }

        async fn chat(&self, request: &ChatRequest) -> Result<ChatResponse, AgentError> {
            let n = self.call_count.fetch_add(1, Ordering::SeqCst);
            if let Some(last) = request.messages.iter().rev().find(|m| m.role == Role::Human)
                && let Ok(mut prompts) = self.prompts.lock()
            {
                prompts.push(last.content.clone());
            }
            let content = self.replies.get(n).copied().ok_or_else(|| AgentError::ApiRequest {
                message: "no more replies".to_string(),
                status: None,
            })?;
            Ok(ChatResponse {
                content: content.to_string(),
                ..ChatResponse::default()
            })
        }
    }

    fn config() -> AgentConfig {
        AgentConfig::builder()
            .api_key("test")
            .build()
            .unwrap_or_else(|_| unreachable!())
    }

    fn invocation(name: &str, arguments: serde_json::Value) -> ToolInvocation {
        ToolInvocation::parse(&ToolCall {
            id: "call_1".to_string(),
            name: name.to_string(),
            arguments: arguments.to_string(),
        })
        .unwrap_or_else(|e| unreachable!("{e}"))
    }

    #[tokio::test]
    async fn test_validate_cookware_reports_missing() {
        let provider = MockProvider::new(Vec::new());
        let (config, prompts, search) = (config(), PromptSet::defaults(), CookingSearch::offline());
        let executor = ToolExecutor::new(&provider, &config, &prompts, &search);

        let result = executor
            .dispatch(&invocation(
                "validate_cookware",
                json!({"required_tools": ["Spatula", "Blender"]}),
            ))
            .await
            .unwrap_or_else(|e| unreachable!("{e}"));

        assert_eq!(result["can_cook"], false);
        assert_eq!(result["missing_tools"], json!(["Blender"]));
        assert!(result["explanation"].as_str().unwrap_or_default().contains("missing"));
        assert_eq!(provider.calls(), 0);
    }

    #[tokio::test]
    async fn test_relevance_tool_fetches_explanation_when_relevant() {
        let provider = MockProvider::new(vec!["true", "Soup is a dish you cook. "]);
        let (config, prompts, search) = (config(), PromptSet::defaults(), CookingSearch::offline());
        let executor = ToolExecutor::new(&provider, &config, &prompts, &search);

        let result = executor
            .dispatch(&invocation(
                "validate_query_relevance",
                json!({"query": "How do I make soup?"}),
            ))
            .await
            .unwrap_or_else(|e| unreachable!("{e}"));

        assert_eq!(
            result,
            json!({"relevant": true, "explanation": "Soup is a dish you cook."})
        );
        assert_eq!(provider.calls(), 2);
        let prompts = provider.prompts.lock().map(|p| p.clone()).unwrap_or_default();
        assert_eq!(prompts[0], "Is this query cooking-related? Query: How do I make soup?");
    }

    #[tokio::test]
    async fn test_relevance_tool_skips_explanation_when_not_relevant() {
        let provider = MockProvider::new(vec!["false"]);
        let (config, prompts, search) = (config(), PromptSet::defaults(), CookingSearch::offline());
        let executor = ToolExecutor::new(&provider, &config, &prompts, &search);

        let result = executor
            .dispatch(&invocation("validate_query_relevance", json!({"query": "Fix my car"})))
            .await
            .unwrap_or_else(|e| unreachable!("{e}"));

        assert_eq!(result["relevant"], false);
        assert_eq!(result["explanation"], NOT_COOKING_EXPLANATION);
        assert_eq!(provider.calls(), 1);
    }

    #[tokio::test]
    async fn test_extract_normalizes_against_available() {
        let provider = MockProvider::new(vec!["large frying pan\n\nwooden spoon\nDutch oven\n"]);
        let (config, prompts, search) = (config(), PromptSet::defaults(), CookingSearch::offline());
        let executor = ToolExecutor::new(&provider, &config, &prompts, &search);

        let result = executor
            .dispatch(&invocation(
                "extract_required_cookware",
                json!({"recipe": "Fry the onions, stir, then braise."}),
            ))
            .await
            .unwrap_or_else(|e| unreachable!("{e}"));

        assert_eq!(
            result["required_cookware"],
            json!(["Frying Pan", "Spoon", "Dutch oven"])
        );
        assert_eq!(result["raw_identified_items"].as_array().map_or(0, Vec::len), 3);
        assert_eq!(result["explanation"], "Based on the recipe, these 3 tools are needed.");
    }

    #[tokio::test]
    async fn test_search_recipes_offline_uses_canned_results() {
        let provider = MockProvider::new(Vec::new());
        let (config, prompts, search) = (config(), PromptSet::defaults(), CookingSearch::offline());
        let executor = ToolExecutor::new(&provider, &config, &prompts, &search);

        let result = executor
            .dispatch(&invocation("search_recipes", json!({"query": "chicken soup"})))
            .await
            .unwrap_or_else(|e| unreachable!("{e}"));

        assert_eq!(result["results"].as_array().map_or(0, Vec::len), 3);
    }

    #[tokio::test]
    async fn test_llm_failure_propagates() {
        let provider = MockProvider::new(Vec::new());
        let (config, prompts, search) = (config(), PromptSet::defaults(), CookingSearch::offline());
        let executor = ToolExecutor::new(&provider, &config, &prompts, &search);

        let err = executor
            .dispatch(&invocation("extract_required_cookware", json!({"recipe": "Boil eggs."})))
            .await;

        assert!(matches!(err, Err(AgentError::ApiRequest { .. })));
    }
}

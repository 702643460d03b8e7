//! The routing state machine.
//!
//! [`Workflow::run`] starts at [`Stage::Classify`] and keeps asking
//! [`route`] for the next stage until it returns `None`. Each stage takes
//! the full [`WorkflowState`] and hands back the full state; the first
//! error aborts the run and propagates to the caller.
//!
//! ```text
//! classify ─┬─ relevant ─► search ─► identify_tools ─┬─ cookware ─► validate_cookware ─┐
//!           │                                        └─ none ─────────────────────────┤
//!           └─ not relevant ──────────────────────────────────────────────────────────┴─► respond
//! ```

use std::sync::Arc;

use serde_json::json;
use tracing::{debug, info};

use super::config::AgentConfig;
use super::executor::ToolExecutor;
use super::message::{
    ChatMessage, ChatRequest, ChatResponse, ai_message, human_message, system_message,
    tool_result_message,
};
use super::prompt::{
    CLASSIFY_INSTRUCTION, IDENTIFY_TOOLS_INSTRUCTION, PromptSet, RESPOND_INSTRUCTION,
    SEARCH_INSTRUCTION, build_refusal_instruction,
};
use super::provider::LlmProvider;
use super::stage::{Stage, route};
use super::state::{
    COOKWARE_VALIDATION_KEY, RELEVANCE_CHECK_KEY, SEARCH_KEY, TOOLS_KEY, WorkflowState,
};
use super::tool::{CookwareArgs, ToolCall, ToolInvocation, ToolKind, ToolSet};
use crate::core::{Relevance, RelevanceCheck};
use crate::error::AgentError;
use crate::search::CookingSearch;

/// A dispatched tool call and its JSON result.
struct Dispatched {
    kind: ToolKind,
    result: serde_json::Value,
}

/// Drives one query through the five stages.
pub struct Workflow {
    provider: Arc<dyn LlmProvider>,
    config: Arc<AgentConfig>,
    prompts: PromptSet,
    search: CookingSearch,
}

impl Workflow {
    /// Creates a workflow, loading prompt overrides from
    /// [`AgentConfig::prompt_dir`].
    #[must_use]
    pub fn new(
        provider: Arc<dyn LlmProvider>,
        config: Arc<AgentConfig>,
        search: CookingSearch,
    ) -> Self {
        let prompts = PromptSet::load(config.prompt_dir.as_deref());
        Self {
            provider,
            config,
            prompts,
            search,
        }
    }

    /// Configuration shared by every query.
    #[must_use]
    pub fn config(&self) -> &AgentConfig {
        &self.config
    }

    /// Runs the state machine to completion.
    ///
    /// # Errors
    ///
    /// Returns the first error raised by any stage: a failed LLM call, an
    /// unknown tool, or malformed tool arguments.
    pub async fn run(&self, state: WorkflowState) -> Result<WorkflowState, AgentError> {
        let mut state = state;
        let mut stage = Stage::INITIAL;

        loop {
            state = self.run_stage(stage, state).await?;
            match route(stage, &state) {
                Some(next) => stage = next,
                None => return Ok(state),
            }
        }
    }

    /// Runs a single stage.
    ///
    /// # Errors
    ///
    /// See [`Workflow::run`].
    pub async fn run_stage(
        &self,
        stage: Stage,
        state: WorkflowState,
    ) -> Result<WorkflowState, AgentError> {
        info!(%stage, relevant = state.relevant, "entering stage");

        let mut state = match stage {
            Stage::Classify => self.classify(state).await?,
            Stage::Search => self.search(state).await?,
            Stage::IdentifyTools => self.identify_tools(state).await?,
            Stage::ValidateCookware => self.validate_cookware(state).await?,
            Stage::Respond => self.respond(state).await?,
        };
        state.visited.push(stage);
        Ok(state)
    }

    async fn classify(&self, mut state: WorkflowState) -> Result<WorkflowState, AgentError> {
        let prompt = vec![
            system_message(&self.system_prompt()),
            human_message(state.query()),
            ai_message(CLASSIFY_INSTRUCTION),
        ];
        let response = self.chat(prompt.clone(), &ToolSet::none()).await?;

        let relevance = Relevance::from_classification(&response.content);
        info!(response = %response.content.trim(), %relevance, "classification");

        let check = RelevanceCheck::new(relevance, response.content.clone());
        state.messages.extend(prompt);
        state.push(response.into_message());
        state.relevant = relevance.is_relevant();
        state.record(RELEVANCE_CHECK_KEY, to_value(&check));
        Ok(state)
    }

    async fn search(&self, mut state: WorkflowState) -> Result<WorkflowState, AgentError> {
        self.deliberate(&mut state, SEARCH_INSTRUCTION).await?;

        let response = self.chat(state.messages.clone(), &ToolSet::search()).await?;
        if let Some(dispatched) = self.apply_response(&mut state, response).await? {
            state.record(
                SEARCH_KEY,
                json!({ "tool": dispatched.kind.name(), "result": dispatched.result }),
            );
        }
        Ok(state)
    }

    async fn identify_tools(&self, mut state: WorkflowState) -> Result<WorkflowState, AgentError> {
        self.deliberate(&mut state, IDENTIFY_TOOLS_INSTRUCTION).await?;

        let response = self
            .chat(state.messages.clone(), &ToolSet::cookware_extraction())
            .await?;
        if let Some(dispatched) = self.apply_response(&mut state, response).await? {
            let required = dispatched
                .result
                .get("required_cookware")
                .cloned()
                .unwrap_or_else(|| json!([]));
            debug!(%required, "required cookware");
            state.record(TOOLS_KEY, json!({ "required_cookware": required }));
        }
        Ok(state)
    }

    /// Offers `validate_cookware`. The recorded cookware list is always what
    /// gets validated; the model only decides whether to run the check.
    async fn validate_cookware(
        &self,
        mut state: WorkflowState,
    ) -> Result<WorkflowState, AgentError> {
        let required_tools = state.required_cookware();
        if required_tools.is_empty() {
            return Ok(state);
        }

        let response = self
            .chat(state.messages.clone(), &ToolSet::cookware_validation())
            .await?;
        let message = response.into_message();
        let Some(call) = message.tool_call.clone() else {
            debug!("model skipped cookware validation");
            return Ok(state);
        };

        let invocation = match ToolKind::from_name(&call.name) {
            Some(ToolKind::ValidateCookware) => {
                ToolInvocation::ValidateCookware(CookwareArgs { required_tools })
            }
            _ => ToolInvocation::parse(&call)?,
        };
        let result = self.executor().dispatch(&invocation).await?;

        state.push(message);
        state.push(tool_result_message(&call.id, &result));
        state.record(COOKWARE_VALIDATION_KEY, result);
        Ok(state)
    }

    async fn respond(&self, mut state: WorkflowState) -> Result<WorkflowState, AgentError> {
        if state.relevant {
            let mut prompt = state.messages.clone();
            prompt.push(ai_message(RESPOND_INSTRUCTION));
            let response = self.chat(prompt, &ToolSet::none()).await?;
            state.push(response.into_message());
        } else if self.config.llm_refusal {
            let prompt = vec![
                system_message(&self.system_prompt()),
                human_message(state.query()),
                ai_message(&build_refusal_instruction(&self.prompts.refusal)),
            ];
            let response = self.chat(prompt, &ToolSet::none()).await?;
            state.push(response.into_message());
        } else {
            state.push(ai_message(&self.prompts.refusal));
        }
        Ok(state)
    }

    /// Sends the history plus a transient instruction and appends only the
    /// model's reply.
    async fn deliberate(
        &self,
        state: &mut WorkflowState,
        instruction: &str,
    ) -> Result<(), AgentError> {
        let mut prompt = state.messages.clone();
        prompt.push(ai_message(instruction));
        let response = self.chat(prompt, &ToolSet::none()).await?;
        debug!(reply = %response.content.trim(), "deliberation");
        state.push(response.into_message());
        Ok(())
    }

    /// Appends a tool-offering turn's reply, dispatching its tool call if
    /// there is one.
    async fn apply_response(
        &self,
        state: &mut WorkflowState,
        response: ChatResponse,
    ) -> Result<Option<Dispatched>, AgentError> {
        let message = response.into_message();
        let Some(call) = message.tool_call.clone() else {
            state.push(message);
            return Ok(None);
        };

        let dispatched = self.dispatch(&call).await?;
        state.push(message);
        state.push(tool_result_message(&call.id, &dispatched.result));
        Ok(Some(dispatched))
    }

    async fn dispatch(&self, call: &ToolCall) -> Result<Dispatched, AgentError> {
        let invocation = ToolInvocation::parse(call)?;
        let result = self.executor().dispatch(&invocation).await?;
        Ok(Dispatched {
            kind: invocation.kind(),
            result,
        })
    }

    fn executor(&self) -> ToolExecutor<'_> {
        ToolExecutor::new(
            self.provider.as_ref(),
            &self.config,
            &self.prompts,
            &self.search,
        )
    }

    fn system_prompt(&self) -> String {
        self.prompts.render_system(&self.config.available_cookware)
    }

    async fn chat(
        &self,
        messages: Vec<ChatMessage>,
        tools: &ToolSet,
    ) -> Result<ChatResponse, AgentError> {
        let request = ChatRequest {
            model: self.config.model.clone(),
            messages,
            temperature: Some(self.config.temperature),
            max_tokens: Some(self.config.max_tokens),
            tools: tools.definitions().to_vec(),
        };
        self.provider.chat(&request).await
    }
}

impl std::fmt::Debug for Workflow {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Workflow")
            .field("provider", &self.provider.name())
            .field("model", &self.config.model)
            .field("search", &self.search)
            .finish_non_exhaustive()
    }
}

fn to_value<T: serde::Serialize>(value: &T) -> serde_json::Value {
    serde_json::to_value(value).unwrap_or(serde_json::Value::Null)
}

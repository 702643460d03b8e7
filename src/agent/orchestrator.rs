//! Query service: runs one query through the workflow and never fails.
//!
//! [`Orchestrator::process`] is the single error boundary. Anything a stage
//! raises is logged and turned into a best-effort [`QueryResponse`].

use std::sync::Arc;
use std::time::Instant;

use tracing::{error, info};

use super::client::create_provider;
use super::config::AgentConfig;
use super::provider::LlmProvider;
use super::response::QueryResponse;
use super::state::WorkflowState;
use super::workflow::Workflow;
use crate::error::AgentError;
use crate::search::CookingSearch;

/// Largest accepted query, in bytes.
pub const MAX_QUERY_BYTES: usize = 10_000;

/// Checks a query before any model call is made.
///
/// # Errors
///
/// Returns [`AgentError::Orchestration`] for blank queries or queries
/// longer than [`MAX_QUERY_BYTES`].
pub fn validate_query(query: &str) -> Result<(), AgentError> {
    if query.trim().is_empty() {
        return Err(AgentError::Orchestration {
            message: "query must not be empty".to_string(),
        });
    }
    if query.len() > MAX_QUERY_BYTES {
        return Err(AgentError::Orchestration {
            message: format!(
                "query is {} bytes, limit is {MAX_QUERY_BYTES}",
                query.len()
            ),
        });
    }
    Ok(())
}

/// Answers cooking queries.
///
/// Holds only read-only configuration, so a single instance can serve many
/// queries concurrently behind an `Arc`.
#[derive(Debug)]
pub struct Orchestrator {
    workflow: Workflow,
}

impl Orchestrator {
    /// Creates an orchestrator with the given provider and configuration.
    ///
    /// Search goes live when [`AgentConfig::serp_api_key`] is set and falls
    /// back to canned results otherwise.
    #[must_use]
    pub fn new(provider: Arc<dyn LlmProvider>, config: AgentConfig) -> Self {
        let search = CookingSearch::from_api_key(config.serp_api_key.as_deref(), config.timeout);
        Self::with_search(provider, config, search)
    }

    /// Creates an orchestrator with an explicit search backend.
    #[must_use]
    pub fn with_search(
        provider: Arc<dyn LlmProvider>,
        config: AgentConfig,
        search: CookingSearch,
    ) -> Self {
        info!(
            provider = provider.name(),
            model = %config.model,
            live_search = search.is_live(),
            cookware = config.available_cookware.len(),
            "query service ready"
        );
        Self {
            workflow: Workflow::new(provider, Arc::new(config), search),
        }
    }

    /// Creates an orchestrator using the provider named in the configuration.
    ///
    /// # Errors
    ///
    /// Returns [`AgentError::UnsupportedProvider`] for unknown provider names.
    pub fn from_config(config: AgentConfig) -> Result<Self, AgentError> {
        Ok(Self::new(create_provider(&config)?, config))
    }

    /// Configuration in use.
    #[must_use]
    pub fn config(&self) -> &AgentConfig {
        self.workflow.config()
    }

    /// Runs a query, surfacing failures to the caller.
    ///
    /// # Errors
    ///
    /// Returns [`AgentError::Orchestration`] for invalid queries, or the
    /// first error raised by the workflow.
    pub async fn query(&self, query: &str) -> Result<QueryResponse, AgentError> {
        validate_query(query)?;

        let start = Instant::now();
        let state = self.workflow.run(WorkflowState::new(query)).await?;
        let response = QueryResponse::from_state(state);

        info!(
            relevant = response.relevant,
            elapsed_ms = start.elapsed().as_millis(),
            "query complete"
        );
        Ok(response)
    }

    /// Runs a query and always returns a payload.
    ///
    /// On failure the payload carries
    /// [`ERROR_RESPONSE`](super::response::ERROR_RESPONSE),
    /// `relevant = false`, and the error text under `debug_info.error`.
    pub async fn process(&self, query: &str) -> QueryResponse {
        info!(query_len = query.len(), "processing query");
        match self.query(query).await {
            Ok(response) => response,
            Err(e) => {
                error!(error = %e, "query processing failed");
                QueryResponse::from_error(&e)
            }
        }
    }
}

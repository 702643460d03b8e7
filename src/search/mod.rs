//! Web search for recipes and cooking questions.
//!
//! [`CookingSearch`] wraps an optional live [`SearchProvider`]. When no
//! provider is configured, the provider fails, or it returns nothing, the
//! deterministic canned results in [`fallback`] are used instead, so
//! search never fails a query.

pub mod fallback;
pub mod serp;

use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::error::AgentError;

pub use serp::SerpApiSearch;

/// Maximum number of hits kept from a live search.
pub const MAX_RESULTS: usize = 3;

/// A single ranked search hit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchHit {
    /// Page title.
    pub title: String,
    /// Result snippet.
    pub snippet: String,
    /// Page URL.
    pub link: String,
}

/// Result payload of the search tools: `{results: [...]}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResults {
    /// Ranked hits, at most [`MAX_RESULTS`] from a live search.
    pub results: Vec<SearchHit>,
}

/// A live web search backend.
#[async_trait]
pub trait SearchProvider: Send + Sync {
    /// Provider name for logging.
    fn name(&self) -> &'static str;

    /// Runs a search and returns ranked hits.
    ///
    /// # Errors
    ///
    /// Returns [`AgentError::Search`] on transport or API failures.
    async fn search(&self, query: &str) -> Result<Vec<SearchHit>, AgentError>;
}

/// Search facade used by the search tools.
#[derive(Clone, Default)]
pub struct CookingSearch {
    provider: Option<Arc<dyn SearchProvider>>,
}

impl CookingSearch {
    /// Creates a facade over a live provider.
    #[must_use]
    pub fn new(provider: Arc<dyn SearchProvider>) -> Self {
        Self {
            provider: Some(provider),
        }
    }

    /// Creates a facade that always serves canned results.
    #[must_use]
    pub fn offline() -> Self {
        Self::default()
    }

    /// Builds the facade from an optional SerpAPI key.
    #[must_use]
    pub fn from_api_key(api_key: Option<&str>, timeout: std::time::Duration) -> Self {
        api_key.map_or_else(Self::offline, |key| {
            Self::new(Arc::new(SerpApiSearch::new(key, timeout)))
        })
    }

    /// Returns `true` when a live provider is configured.
    #[must_use]
    pub fn is_live(&self) -> bool {
        self.provider.is_some()
    }

    /// Searches for recipes.
    ///
    /// The live query is lower-cased and trimmed, with `" recipe"` appended
    /// unless it already mentions a recipe.
    pub async fn search_recipes(&self, query: &str) -> SearchResults {
        let mut search_query = query.trim().to_lowercase();
        if !search_query.contains("recipe") {
            search_query.push_str(" recipe");
        }
        self.search_or_fallback(&search_query, || fallback::recipe_results(query))
            .await
    }

    /// Searches for answers to a general cooking question.
    pub async fn search_cooking_question(&self, query: &str) -> SearchResults {
        self.search_or_fallback(query, || fallback::cooking_results(query))
            .await
    }

    async fn search_or_fallback<F>(&self, query: &str, fallback: F) -> SearchResults
    where
        F: FnOnce() -> SearchResults,
    {
        let Some(provider) = &self.provider else {
            warn!("no search API key configured, falling back to canned results");
            return fallback();
        };

        match provider.search(query).await {
            Ok(mut hits) if !hits.is_empty() => {
                hits.truncate(MAX_RESULTS);
                info!(
                    provider = provider.name(),
                    query,
                    count = hits.len(),
                    "returning live search results"
                );
                SearchResults { results: hits }
            }
            Ok(_) => {
                warn!(
                    provider = provider.name(),
                    query,
                    "no live results, falling back to canned results"
                );
                fallback()
            }
            Err(e) => {
                warn!(
                    provider = provider.name(),
                    query,
                    error = %e,
                    "search failed, falling back to canned results"
                );
                fallback()
            }
        }
    }
}

impl std::fmt::Debug for CookingSearch {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CookingSearch")
            .field("provider", &self.provider.as_ref().map(|p| p.name()))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    struct ScriptedSearch {
        reply: Result<Vec<SearchHit>, String>,
        seen: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl SearchProvider for ScriptedSearch {
        fn name(&self) -> &'static str {
            "scripted"
        }

        async fn search(&self, query: &str) -> Result<Vec<SearchHit>, AgentError> {
            if let Ok(mut seen) = self.seen.lock() {
                seen.push(query.to_string());
            }
            self.reply.clone().map_err(|message| AgentError::Search { message })
        }
    }

    fn hit(n: usize) -> SearchHit {
        SearchHit {
            title: format!("Result {n}"),
            snippet: format!("Snippet {n}"),
            link: format!("https://example.org/{n}"),
        }
    }

    #[tokio::test]
    async fn test_offline_is_deterministic() {
        let search = CookingSearch::offline();
        let first = search.search_recipes("Chicken Soup").await;
        let second = search.search_recipes("Chicken Soup").await;
        assert_eq!(first, second);
        assert_eq!(first.results.len(), 3);
    }

    #[tokio::test]
    async fn test_live_results_are_capped() {
        let provider = Arc::new(ScriptedSearch {
            reply: Ok((0..5).map(hit).collect()),
            seen: Mutex::new(Vec::new()),
        });
        let search = CookingSearch::new(provider.clone());
        let results = search.search_recipes("  Pad Thai ").await;
        assert_eq!(results.results.len(), MAX_RESULTS);
        let seen = provider.seen.lock().map(|s| s.clone()).unwrap_or_default();
        assert_eq!(seen, vec!["pad thai recipe".to_string()]);
    }

    #[tokio::test]
    async fn test_recipe_suffix_not_duplicated() {
        let provider = Arc::new(ScriptedSearch {
            reply: Ok(vec![hit(1)]),
            seen: Mutex::new(Vec::new()),
        });
        let search = CookingSearch::new(provider.clone());
        search.search_recipes("Best lasagna recipe").await;
        let seen = provider.seen.lock().map(|s| s.clone()).unwrap_or_default();
        assert_eq!(seen, vec!["best lasagna recipe".to_string()]);
    }

    #[tokio::test]
    async fn test_provider_error_falls_back() {
        let provider = Arc::new(ScriptedSearch {
            reply: Err("rate limited".to_string()),
            seen: Mutex::new(Vec::new()),
        });
        let search = CookingSearch::new(provider);
        let results = search.search_cooking_question("searing steak").await;
        assert_eq!(results, fallback::cooking_results("searing steak"));
    }

    #[tokio::test]
    async fn test_empty_live_results_fall_back() {
        let provider = Arc::new(ScriptedSearch {
            reply: Ok(Vec::new()),
            seen: Mutex::new(Vec::new()),
        });
        let search = CookingSearch::new(provider);
        let results = search.search_recipes("ramen").await;
        assert_eq!(results, fallback::recipe_results("ramen"));
    }

    #[test]
    fn test_from_api_key() {
        let timeout = std::time::Duration::from_secs(5);
        assert!(!CookingSearch::from_api_key(None, timeout).is_live());
        assert!(CookingSearch::from_api_key(Some("k"), timeout).is_live());
    }
}

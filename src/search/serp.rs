//! SerpAPI-backed live search.
//!
//! Calls `GET https://serpapi.com/search.json` with the Google engine and
//! reads the `organic_results` array.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, warn};

use super::{MAX_RESULTS, SearchHit, SearchProvider};
use crate::error::AgentError;

/// Default SerpAPI endpoint.
const SERP_API_URL: &str = "https://serpapi.com/search.json";

/// SerpAPI Google search client.
#[derive(Clone)]
pub struct SerpApiSearch {
    client: Client,
    api_key: String,
    base_url: String,
    timeout: Duration,
}

#[derive(Debug, Deserialize)]
struct SerpResponse {
    #[serde(default)]
    organic_results: Option<Vec<OrganicResult>>,
    #[serde(default)]
    search_metadata: Option<serde_json::Value>,
    #[serde(default)]
    error: Option<String>,
}

#[derive(Debug, Deserialize)]
struct OrganicResult {
    #[serde(default)]
    title: String,
    #[serde(default)]
    snippet: String,
    #[serde(default)]
    link: String,
}

impl SerpApiSearch {
    /// Creates a client against the public SerpAPI endpoint.
    #[must_use]
    pub fn new(api_key: impl Into<String>, timeout: Duration) -> Self {
        Self::with_base_url(api_key, SERP_API_URL, timeout)
    }

    /// Creates a client against a custom endpoint (proxies, tests).
    #[must_use]
    pub fn with_base_url(
        api_key: impl Into<String>,
        base_url: impl Into<String>,
        timeout: Duration,
    ) -> Self {
        Self {
            client: Client::new(),
            api_key: api_key.into(),
            base_url: base_url.into(),
            timeout,
        }
    }

    fn parse_response(body: SerpResponse) -> Result<Vec<SearchHit>, AgentError> {
        if let Some(message) = body.error {
            return Err(AgentError::Search { message });
        }

        if let Some(meta) = &body.search_metadata {
            debug!(
                status = ?meta.get("status"),
                id = ?meta.get("id"),
                total_time_taken = ?meta.get("total_time_taken"),
                "serpapi metadata"
            );
        }

        let Some(organic) = body.organic_results else {
            warn!("no organic_results in serpapi response");
            return Ok(Vec::new());
        };

        Ok(organic
            .into_iter()
            .take(MAX_RESULTS)
            .map(|r| SearchHit {
                title: r.title,
                snippet: r.snippet,
                link: r.link,
            })
            .collect())
    }
}

impl std::fmt::Debug for SerpApiSearch {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SerpApiSearch")
            .field("base_url", &self.base_url)
            .field("api_key", &"<redacted>")
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl SearchProvider for SerpApiSearch {
    fn name(&self) -> &'static str {
        "serpapi"
    }

    async fn search(&self, query: &str) -> Result<Vec<SearchHit>, AgentError> {
        let num = MAX_RESULTS.to_string();
        let params = [
            ("api_key", self.api_key.as_str()),
            ("engine", "google"),
            ("q", query),
            ("google_domain", "google.com"),
            ("gl", "us"),
            ("hl", "en"),
            ("num", num.as_str()),
        ];

        let search_err = |e: reqwest::Error| AgentError::Search {
            message: e.to_string(),
        };

        let response = self
            .client
            .get(&self.base_url)
            .query(&params)
            .timeout(self.timeout)
            .send()
            .await
            .map_err(search_err)?;

        let status = response.status();
        if !status.is_success() {
            return Err(AgentError::Search {
                message: format!("serpapi returned HTTP {status}"),
            });
        }

        let body: SerpResponse = response.json().await.map_err(search_err)?;
        Self::parse_response(body)
    }
}

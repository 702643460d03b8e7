//! Agent configuration with builder pattern and environment variable support.
//!
//! Configuration is resolved in order: explicit values → environment variables → defaults.
//! It is read once at startup and shared read-only between queries.

use std::path::PathBuf;
use std::time::Duration;

use crate::core::DEFAULT_COOKWARE;
use crate::error::AgentError;

/// Default chat model.
const DEFAULT_MODEL: &str = "gpt-4o";
/// Default sampling temperature.
const DEFAULT_TEMPERATURE: f32 = 0.2;
/// Default max tokens per completion.
const DEFAULT_MAX_TOKENS: u32 = 2048;
/// Default timeout for each external call, in seconds.
const DEFAULT_TIMEOUT_SECS: u64 = 120;

/// Configuration for the cooking assistant.
#[derive(Debug, Clone)]
pub struct AgentConfig {
    /// LLM provider name (e.g., "openai").
    pub provider: String,
    /// API key for the provider.
    pub api_key: String,
    /// Optional base URL override (for proxies or compatible APIs).
    pub base_url: Option<String>,
    /// Chat model used by every stage and LLM-backed tool.
    pub model: String,
    /// Sampling temperature.
    pub temperature: f32,
    /// Maximum tokens per completion.
    pub max_tokens: u32,
    /// SerpAPI key. When absent, search falls back to canned results.
    pub serp_api_key: Option<String>,
    /// Cookware the user has on hand.
    pub available_cookware: Vec<String>,
    /// Expose `debug_info` in HTTP responses.
    pub debug: bool,
    /// Timeout applied to each LLM and search call.
    pub timeout: Duration,
    /// Directory containing prompt override files.
    ///
    /// Missing files fall back to the compiled-in prompts.
    pub prompt_dir: Option<PathBuf>,
    /// Ask the model to phrase the refusal for off-topic queries instead of
    /// emitting the fixed refusal text.
    pub llm_refusal: bool,
}

impl AgentConfig {
    /// Creates a new builder for `AgentConfig`.
    #[must_use]
    pub fn builder() -> AgentConfigBuilder {
        AgentConfigBuilder::default()
    }

    /// Creates configuration from environment variables with defaults.
    ///
    /// Loads a `.env` file from the working directory first, if one exists.
    ///
    /// # Errors
    ///
    /// Returns [`AgentError::ApiKeyMissing`] if no API key is found.
    pub fn from_env() -> Result<Self, AgentError> {
        dotenv::dotenv().ok();
        Self::builder().from_env().build()
    }

    /// Resolves only the available cookware list from the environment.
    ///
    /// Needs no API key, so cookware can be inspected offline.
    #[must_use]
    pub fn cookware_from_env() -> Vec<String> {
        dotenv::dotenv().ok();
        std::env::var("RECIPE_COOKWARE")
            .ok()
            .map(|v| parse_cookware_list(&v))
            .filter(|list| !list.is_empty())
            .unwrap_or_else(default_cookware)
    }
}

fn default_cookware() -> Vec<String> {
    DEFAULT_COOKWARE.iter().map(ToString::to_string).collect()
}

/// Builder for [`AgentConfig`].
#[derive(Debug, Clone, Default)]
pub struct AgentConfigBuilder {
    provider: Option<String>,
    api_key: Option<String>,
    base_url: Option<String>,
    model: Option<String>,
    temperature: Option<f32>,
    max_tokens: Option<u32>,
    serp_api_key: Option<String>,
    available_cookware: Option<Vec<String>>,
    debug: Option<bool>,
    timeout: Option<Duration>,
    prompt_dir: Option<PathBuf>,
    llm_refusal: Option<bool>,
}

/// Parses a boolean flag the way `DEBUG=true|1|t` is conventionally set.
fn parse_flag(value: &str) -> bool {
    matches!(value.trim().to_lowercase().as_str(), "true" | "1" | "t")
}

/// Splits a comma-separated cookware list, dropping blank entries.
fn parse_cookware_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(ToString::to_string)
        .collect()
}

impl AgentConfigBuilder {
    /// Populates unset fields from environment variables.
    #[must_use]
    pub fn from_env(mut self) -> Self {
        if self.provider.is_none() {
            self.provider = std::env::var("RECIPE_PROVIDER").ok();
        }
        if self.api_key.is_none() {
            self.api_key = std::env::var("OPENAI_API_KEY")
                .or_else(|_| std::env::var("RECIPE_API_KEY"))
                .ok()
                .filter(|k| !k.is_empty());
        }
        if self.base_url.is_none() {
            self.base_url = std::env::var("OPENAI_BASE_URL")
                .or_else(|_| std::env::var("RECIPE_BASE_URL"))
                .ok();
        }
        if self.model.is_none() {
            self.model = std::env::var("MODEL_NAME")
                .or_else(|_| std::env::var("RECIPE_MODEL"))
                .ok();
        }
        if self.temperature.is_none() {
            self.temperature = std::env::var("RECIPE_TEMPERATURE")
                .ok()
                .and_then(|v| v.parse().ok());
        }
        if self.max_tokens.is_none() {
            self.max_tokens = std::env::var("RECIPE_MAX_TOKENS")
                .ok()
                .and_then(|v| v.parse().ok());
        }
        if self.serp_api_key.is_none() {
            self.serp_api_key = std::env::var("SERP_API_KEY")
                .ok()
                .filter(|k| !k.is_empty());
        }
        if self.available_cookware.is_none() {
            self.available_cookware = std::env::var("RECIPE_COOKWARE")
                .ok()
                .map(|v| parse_cookware_list(&v))
                .filter(|list| !list.is_empty());
        }
        if self.debug.is_none() {
            self.debug = std::env::var("DEBUG").ok().map(|v| parse_flag(&v));
        }
        if self.timeout.is_none() {
            self.timeout = std::env::var("RECIPE_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .map(Duration::from_secs);
        }
        if self.prompt_dir.is_none() {
            self.prompt_dir = std::env::var("RECIPE_PROMPT_DIR").ok().map(PathBuf::from);
        }
        if self.llm_refusal.is_none() {
            self.llm_refusal = std::env::var("RECIPE_LLM_REFUSAL")
                .ok()
                .map(|v| parse_flag(&v));
        }
        self
    }

    /// Sets the LLM provider name.
    #[must_use]
    pub fn provider(mut self, provider: impl Into<String>) -> Self {
        self.provider = Some(provider.into());
        self
    }

    /// Sets the API key.
    #[must_use]
    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    /// Sets the base URL override.
    #[must_use]
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Sets the chat model.
    #[must_use]
    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    /// Sets the sampling temperature.
    #[must_use]
    pub const fn temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }

    /// Sets the max tokens per completion.
    #[must_use]
    pub const fn max_tokens(mut self, n: u32) -> Self {
        self.max_tokens = Some(n);
        self
    }

    /// Sets the SerpAPI key.
    #[must_use]
    pub fn serp_api_key(mut self, key: impl Into<String>) -> Self {
        self.serp_api_key = Some(key.into());
        self
    }

    /// Sets the available cookware list.
    #[must_use]
    pub fn available_cookware<I, S>(mut self, items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.available_cookware = Some(items.into_iter().map(Into::into).collect());
        self
    }

    /// Enables or disables debug output.
    #[must_use]
    pub const fn debug(mut self, debug: bool) -> Self {
        self.debug = Some(debug);
        self
    }

    /// Sets the per-call timeout.
    #[must_use]
    pub const fn timeout(mut self, duration: Duration) -> Self {
        self.timeout = Some(duration);
        self
    }

    /// Sets the prompt override directory.
    #[must_use]
    pub fn prompt_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.prompt_dir = Some(dir.into());
        self
    }

    /// Enables model-phrased refusals.
    #[must_use]
    pub const fn llm_refusal(mut self, enabled: bool) -> Self {
        self.llm_refusal = Some(enabled);
        self
    }

    /// Builds the [`AgentConfig`].
    ///
    /// # Errors
    ///
    /// Returns [`AgentError::ApiKeyMissing`] if no API key was set, or
    /// [`AgentError::Config`] if the temperature is out of range.
    pub fn build(self) -> Result<AgentConfig, AgentError> {
        let api_key = self.api_key.ok_or(AgentError::ApiKeyMissing)?;

        let temperature = self.temperature.unwrap_or(DEFAULT_TEMPERATURE);
        if !(0.0..=2.0).contains(&temperature) {
            return Err(AgentError::Config {
                message: format!("temperature must be within 0.0..=2.0, got {temperature}"),
            });
        }

        Ok(AgentConfig {
            provider: self.provider.unwrap_or_else(|| "openai".to_string()),
            api_key,
            base_url: self.base_url,
            model: self.model.unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            temperature,
            max_tokens: self.max_tokens.unwrap_or(DEFAULT_MAX_TOKENS),
            serp_api_key: self.serp_api_key,
            available_cookware: self.available_cookware.unwrap_or_else(default_cookware),
            debug: self.debug.unwrap_or(false),
            timeout: self
                .timeout
                .unwrap_or(Duration::from_secs(DEFAULT_TIMEOUT_SECS)),
            prompt_dir: self.prompt_dir,
            llm_refusal: self.llm_refusal.unwrap_or(false),
        })
    }
}

//! Error types for recipe-rs.
//!
//! Errors are grouped by layer: [`AgentError`] for the LLM workflow and its
//! tools, [`CommandError`] for the CLI, and [`Error`] as the crate-wide
//! umbrella returned by top-level entry points.

use thiserror::Error;

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level error type.
#[derive(Debug, Error)]
pub enum Error {
    /// Workflow, provider, or tool failure.
    #[error(transparent)]
    Agent(#[from] AgentError),

    /// CLI command failure.
    #[error(transparent)]
    Command(#[from] CommandError),

    /// I/O failure (prompt files, sockets).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors raised by the agent layer.
#[derive(Debug, Error)]
pub enum AgentError {
    /// No API key was configured for the LLM provider.
    #[error("API key missing: set OPENAI_API_KEY or RECIPE_API_KEY")]
    ApiKeyMissing,

    /// The configured provider name is not recognised.
    #[error("unsupported LLM provider: {name}")]
    UnsupportedProvider {
        /// Provider name from configuration.
        name: String,
    },

    /// An LLM call failed (network, auth, rate limit, timeout).
    #[error("LLM request failed: {message}")]
    ApiRequest {
        /// Error text reported by the client.
        message: String,
        /// HTTP status, when known.
        status: Option<u16>,
    },

    /// The web search provider failed. Recovered by the canned fallback.
    #[error("search provider failed: {message}")]
    Search {
        /// Error text reported by the provider.
        message: String,
    },

    /// The LLM asked for a tool that is not in the registry.
    #[error("tool '{name}' not found. Available tools: {}", known.join(", "))]
    UnknownTool {
        /// Requested tool name.
        name: String,
        /// Every name the registry knows about.
        known: Vec<String>,
    },

    /// Tool arguments did not match the tool's declared shape.
    #[error("malformed arguments for tool '{name}': {message}")]
    MalformedToolArguments {
        /// Tool name.
        name: String,
        /// Parse or validation failure.
        message: String,
    },

    /// Workflow-level failure (invalid query, impossible transition).
    #[error("orchestration error: {message}")]
    Orchestration {
        /// Description of the failure.
        message: String,
    },

    /// Invalid configuration value.
    #[error("invalid configuration: {message}")]
    Config {
        /// Description of the invalid value.
        message: String,
    },
}

/// Errors raised while executing CLI commands.
#[derive(Debug, Error)]
pub enum CommandError {
    /// Command could not complete.
    #[error("command failed: {0}")]
    ExecutionFailed(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_tool_lists_known_names() {
        let err = AgentError::UnknownTool {
            name: "bake_cake".to_string(),
            known: vec!["search_recipes".to_string(), "validate_cookware".to_string()],
        };
        let msg = err.to_string();
        assert!(msg.contains("bake_cake"));
        assert!(msg.contains("search_recipes, validate_cookware"));
    }

    #[test]
    fn test_error_from_agent_error() {
        let err: Error = AgentError::ApiKeyMissing.into();
        assert!(matches!(err, Error::Agent(AgentError::ApiKeyMissing)));
        assert!(err.to_string().contains("OPENAI_API_KEY"));
    }

    #[test]
    fn test_command_error_display() {
        let err: Error =
            CommandError::ExecutionFailed("HTTP server error: port in use".to_string()).into();
        assert_eq!(err.to_string(), "command failed: HTTP server error: port in use");
    }
}

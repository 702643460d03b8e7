//! Output formatting for CLI results.

use serde::Serialize;

/// How command results are rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Human-readable text.
    #[default]
    Text,
    /// Pretty-printed JSON.
    Json,
}

impl OutputFormat {
    /// Parses a format name, falling back to text for anything unknown.
    #[must_use]
    pub fn parse(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "json" => Self::Json,
            _ => Self::Text,
        }
    }

    /// Renders a value as pretty JSON.
    #[must_use]
    pub fn to_json<T: Serialize>(self, value: &T) -> String {
        serde_json::to_string_pretty(value).unwrap_or_else(|e| format!("{{\"error\": \"{e}\"}}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case("json", OutputFormat::Json ; "json")]
    #[test_case("JSON", OutputFormat::Json ; "uppercase")]
    #[test_case("text", OutputFormat::Text ; "text")]
    #[test_case("yaml", OutputFormat::Text ; "unknown")]
    fn test_parse(input: &str, expected: OutputFormat) {
        assert_eq!(OutputFormat::parse(input), expected);
    }

    #[test]
    fn test_to_json() {
        let out = OutputFormat::Json.to_json(&serde_json::json!({"can_cook": true}));
        assert!(out.contains("\"can_cook\": true"));
    }
}

//! Relevance verdict for incoming queries.
//!
//! The classifier prompt asks the model for `RELEVANT` or `NOT`, while the
//! `validate_query_relevance` tool asks for `true` or `false`. Both replies
//! are free text, so they are matched by containment rather than equality.

use serde::{Deserialize, Serialize};

/// Whether a query falls inside the cooking domain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Relevance {
    /// Cooking, recipe, or food-preparation query.
    Relevant,
    /// Anything else.
    NotRelevant,
}

impl Relevance {
    /// Interprets a classifier reply: relevant iff the upper-cased text
    /// contains `RELEVANT`.
    #[must_use]
    pub fn from_classification(reply: &str) -> Self {
        reply.to_uppercase().contains("RELEVANT").into()
    }

    /// Interprets a `true`/`false` verdict: relevant iff the lower-cased
    /// text contains `true`.
    #[must_use]
    pub fn from_verdict(reply: &str) -> Self {
        reply.to_lowercase().contains("true").into()
    }

    /// Returns `true` for [`Relevance::Relevant`].
    #[must_use]
    pub const fn is_relevant(self) -> bool {
        matches!(self, Self::Relevant)
    }

    /// Returns the string representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Relevant => "relevant",
            Self::NotRelevant => "not_relevant",
        }
    }
}

impl From<bool> for Relevance {
    fn from(relevant: bool) -> Self {
        if relevant {
            Self::Relevant
        } else {
            Self::NotRelevant
        }
    }
}

impl std::fmt::Display for Relevance {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Relevance verdict plus the text that justified it.
///
/// Recorded under `debug_info.relevance_check` by the classify stage and
/// returned by the `validate_query_relevance` tool.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelevanceCheck {
    /// Whether the query is about cooking.
    pub relevant: bool,
    /// Raw classifier reply or a one-sentence explanation.
    pub explanation: String,
}

impl RelevanceCheck {
    /// Creates a check from a verdict and its explanation.
    #[must_use]
    pub fn new(relevance: Relevance, explanation: impl Into<String>) -> Self {
        Self {
            relevant: relevance.is_relevant(),
            explanation: explanation.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case("RELEVANT", true ; "exact")]
    #[test_case("relevant", true ; "lowercase")]
    #[test_case("Relevant.", true ; "punctuated")]
    #[test_case("NOT RELEVANT", true ; "containment wins over negation")]
    #[test_case("NOT", false ; "not")]
    #[test_case("", false ; "empty")]
    fn test_from_classification(reply: &str, expected: bool) {
        assert_eq!(Relevance::from_classification(reply).is_relevant(), expected);
    }

    #[test_case("true", true ; "lowercase true")]
    #[test_case("True.", true ; "capitalised")]
    #[test_case("false", false ; "false")]
    #[test_case("I cannot tell", false ; "no verdict")]
    fn test_from_verdict(reply: &str, expected: bool) {
        assert_eq!(Relevance::from_verdict(reply).is_relevant(), expected);
    }

    #[test]
    fn test_from_bool() {
        assert_eq!(Relevance::from(true), Relevance::Relevant);
        assert_eq!(Relevance::from(false), Relevance::NotRelevant);
    }

    #[test]
    fn test_relevance_check_serializes_flat() {
        let check = RelevanceCheck::new(Relevance::NotRelevant, "NOT");
        let value = serde_json::to_value(&check).unwrap_or_default();
        assert_eq!(value, serde_json::json!({"relevant": false, "explanation": "NOT"}));
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", Relevance::Relevant), "relevant");
        assert_eq!(format!("{}", Relevance::NotRelevant), "not_relevant");
    }
}

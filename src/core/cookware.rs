//! Cookware validation and normalization.
//!
//! The available cookware list comes from configuration and is read-only
//! for the lifetime of the process. Validation is an exact, case-sensitive
//! set difference against that list. Normalization maps the model's free
//! text ("a large non-stick frying pan") onto configured names.

use serde::{Deserialize, Serialize};

/// Cookware available when nothing else is configured.
pub const DEFAULT_COOKWARE: &[&str] = &[
    "Spatula",
    "Frying Pan",
    "Little Pot",
    "Stovetop",
    "Whisk",
    "Knife",
    "Ladle",
    "Spoon",
];

/// Result of the `validate_cookware` tool.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CookwareValidation {
    /// `true` iff nothing is missing.
    pub can_cook: bool,
    /// Required items absent from the available list, in request order.
    pub missing_tools: Vec<String>,
    /// Human-readable summary.
    pub explanation: String,
}

/// Result of the `extract_required_cookware` tool.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CookwareExtraction {
    /// Normalized cookware names.
    pub required_cookware: Vec<String>,
    /// Lines exactly as the model produced them.
    pub raw_identified_items: Vec<String>,
    /// Human-readable summary.
    pub explanation: String,
}

/// Checks every required item against the available list.
///
/// Matching is exact and case-sensitive. `missing_tools` keeps the order
/// (and any duplicates) of `required`.
#[must_use]
pub fn validate_cookware(required: &[String], available: &[String]) -> CookwareValidation {
    let missing_tools: Vec<String> = required
        .iter()
        .filter(|tool| !available.contains(tool))
        .cloned()
        .collect();
    let can_cook = missing_tools.is_empty();

    let explanation = if can_cook {
        "User has all required tools.".to_string()
    } else {
        format!(
            "User is missing required tools: {}.",
            missing_tools.join(", ")
        )
    };

    CookwareValidation {
        can_cook,
        missing_tools,
        explanation,
    }
}

/// Maps one raw item onto a configured name.
///
/// An exact case-insensitive match wins. Otherwise the first configured
/// name that overlaps the item (substring containment in either direction,
/// ignoring case) is used. Items with no overlap are returned unchanged.
#[must_use]
pub fn normalize_cookware_item(item: &str, available: &[String]) -> String {
    let lowered = item.to_lowercase();
    available
        .iter()
        .find(|name| name.to_lowercase() == lowered)
        .or_else(|| {
            available.iter().find(|name| {
                let name = name.to_lowercase();
                lowered.contains(&name) || name.contains(&lowered)
            })
        })
        .map_or_else(|| item.to_string(), Clone::clone)
}

/// Normalizes every item; see [`normalize_cookware_item`].
#[must_use]
pub fn normalize_cookware(items: &[String], available: &[String]) -> Vec<String> {
    items
        .iter()
        .map(|item| normalize_cookware_item(item, available))
        .collect()
}

/// Splits a model reply into one trimmed item per non-blank line.
#[must_use]
pub fn parse_cookware_lines(text: &str) -> Vec<String> {
    text.trim()
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(ToString::to_string)
        .collect()
}

impl CookwareExtraction {
    /// Builds an extraction from a raw model reply.
    #[must_use]
    pub fn from_reply(reply: &str, available: &[String]) -> Self {
        let raw_identified_items = parse_cookware_lines(reply);
        let required_cookware = normalize_cookware(&raw_identified_items, available);
        let explanation = format!(
            "Based on the recipe, these {} tools are needed.",
            required_cookware.len()
        );
        Self {
            required_cookware,
            raw_identified_items,
            explanation,
        }
    }
}

//! System prompts, stage instructions, and message builders.
//!
//! Prompts that shape the assistant's voice live in a [`PromptSet`] and can
//! be overridden from a directory of markdown files. Stage instructions are
//! part of the workflow contract and are compiled in.

use std::path::{Path, PathBuf};

/// Placeholder replaced with the available cookware list in the system prompt.
pub const COOKWARE_PLACEHOLDER: &str = "{cookware}";

/// System prompt for every stage. `{cookware}` is replaced with the
/// configured cookware as a JSON array.
pub const SYSTEM_PROMPT: &str = r"You are a helpful cooking assistant that specializes in recipes, cooking techniques, and food preparation.

Available Cookware:
{cookware}

Follow these guidelines:
1. ONLY answer queries related to cooking, recipes, or food. Politely refuse any off-topic questions.
2. For recipe requests, consider if research is needed.
3. For recipes, always check if the user has the required cookware.
4. When providing recipes, include ingredients, steps, and cooking times.
5. When answering cooking questions, be detailed and educational.

IMPORTANT: You will have access to various tools. Call these tools ONLY when necessary:
- validate_query_relevance: To check if a query is cooking-related
- search_recipes: When you need to find specific recipes
- search_cooking_question: For general cooking information
- extract_required_cookware: To determine what cookware is needed for a recipe
- validate_cookware: To check if the user has the necessary cookware

Always make tool decisions based on the specific query and what information you need.";

/// Fixed reply for queries outside the cooking domain.
pub const REFUSAL_MESSAGE: &str = "I am a cooking assistant that specializes in recipes, cooking techniques, and food preparation. I cannot help with questions about cars, technology, or other non-cooking topics. Please feel free to ask me anything about cooking, recipes, or food preparation!";

/// System prompt for the `validate_query_relevance` tool.
pub const CLASSIFIER_SYSTEM_PROMPT: &str = r#"You are a query classifier for a cooking and recipe application.
Your task is to determine if a user's query is related to cooking, recipes, food preparation, or ingredients.

ONLY respond with "true" if the query is cooking-related, or "false" if it is not.

Examples of cooking-related queries:
- How do I make pasta?
- What's a good recipe for chicken soup?
- Can I substitute butter with oil?
- How long should I cook salmon?
- What tools do I need to make pizza?

Examples of non-cooking-related queries:
- What's the weather today?
- How do I fix my car?
- Who won the Super Bowl?
- What's the capital of France?
- Can you help me with my homework?"#;

/// System prompt for the relevance explanation follow-up.
pub const EXPLAINER_SYSTEM_PROMPT: &str = "You are a helpful cooking assistant. Briefly explain why a query is cooking-related.
Keep your explanation to one sentence.";

/// System prompt for the `extract_required_cookware` tool.
pub const COOKWARE_SYSTEM_PROMPT: &str = "You are a helpful cooking assistant that specializes in analyzing recipes.
Given a recipe text, identify all the cookware/tools needed to prepare it.
Return ONLY cookware items (pots, pans, utensils, etc.), not ingredients or appliances.
Be specific but concise in your identification.";

/// Classify stage: asks for a one-word verdict.
pub const CLASSIFY_INSTRUCTION: &str = "Is this query related to cooking, recipes, or food preparation? Respond in only one word, with RELEVANT or NOT";

/// Search stage deliberation turn.
pub const SEARCH_INSTRUCTION: &str =
    "I need to determine if I should search for information or can proceed with what I know.";

/// Identify-tools stage deliberation turn.
pub const IDENTIFY_TOOLS_INSTRUCTION: &str =
    "I need to determine if I should extract required cookware for a recipe.";

/// Respond stage instruction for relevant queries.
pub const RESPOND_INSTRUCTION: &str = "I'll now provide a detailed response to this cooking query based on all the information gathered.";

/// Explanation used when the relevance tool rejects a query.
pub const NOT_COOKING_EXPLANATION: &str =
    "This query is not related to cooking, recipes, or food preparation.";

/// Override filename for the system prompt.
const SYSTEM_FILENAME: &str = "system.md";
/// Override filename for the refusal text.
const REFUSAL_FILENAME: &str = "refusal.md";
/// Override filename for the relevance classifier prompt.
const CLASSIFIER_FILENAME: &str = "classifier.md";
/// Override filename for the cookware extractor prompt.
const COOKWARE_FILENAME: &str = "cookware.md";

/// Prompts used by the workflow and the LLM-backed tools.
///
/// Use [`PromptSet::load`] to resolve overrides from a directory, or
/// [`PromptSet::defaults`] for the compiled-in text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptSet {
    /// System prompt template (may contain `{cookware}`).
    pub system: String,
    /// Fixed refusal for off-topic queries.
    pub refusal: String,
    /// System prompt for `validate_query_relevance`.
    pub classifier: String,
    /// System prompt for `extract_required_cookware`.
    pub cookware: String,
}

impl Default for PromptSet {
    fn default() -> Self {
        Self::defaults()
    }
}

impl PromptSet {
    /// Loads prompts from the given directory, falling back to compiled-in defaults.
    ///
    /// Each file is loaded independently; a missing file uses its default.
    /// Trailing whitespace is trimmed from loaded files.
    #[must_use]
    pub fn load(prompt_dir: Option<&Path>) -> Self {
        let load_file = |filename: &str, default: &str| -> String {
            prompt_dir
                .map(|dir| dir.join(filename))
                .and_then(|path| std::fs::read_to_string(&path).ok())
                .map(|content| content.trim_end().to_string())
                .filter(|content| !content.is_empty())
                .unwrap_or_else(|| default.to_string())
        };

        Self {
            system: load_file(SYSTEM_FILENAME, SYSTEM_PROMPT),
            refusal: load_file(REFUSAL_FILENAME, REFUSAL_MESSAGE),
            classifier: load_file(CLASSIFIER_FILENAME, CLASSIFIER_SYSTEM_PROMPT),
            cookware: load_file(COOKWARE_FILENAME, COOKWARE_SYSTEM_PROMPT),
        }
    }

    /// Returns compiled-in defaults without checking the filesystem.
    #[must_use]
    pub fn defaults() -> Self {
        Self {
            system: SYSTEM_PROMPT.to_string(),
            refusal: REFUSAL_MESSAGE.to_string(),
            classifier: CLASSIFIER_SYSTEM_PROMPT.to_string(),
            cookware: COOKWARE_SYSTEM_PROMPT.to_string(),
        }
    }

    /// Writes the compiled-in default prompts to the given directory.
    ///
    /// Creates the directory if it does not exist. Existing files are
    /// **not** overwritten.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if directory creation or file writing fails.
    pub fn write_defaults(dir: &Path) -> std::io::Result<Vec<PathBuf>> {
        std::fs::create_dir_all(dir)?;

        let templates = [
            (SYSTEM_FILENAME, SYSTEM_PROMPT),
            (REFUSAL_FILENAME, REFUSAL_MESSAGE),
            (CLASSIFIER_FILENAME, CLASSIFIER_SYSTEM_PROMPT),
            (COOKWARE_FILENAME, COOKWARE_SYSTEM_PROMPT),
        ];

        let mut written = Vec::new();
        for (filename, content) in &templates {
            let path = dir.join(filename);
            if !path.exists() {
                std::fs::write(&path, content)?;
                written.push(path);
            }
        }

        Ok(written)
    }

    /// Renders the system prompt with the available cookware filled in.
    #[must_use]
    pub fn render_system(&self, available_cookware: &[String]) -> String {
        let listing = serde_json::to_string_pretty(available_cookware)
            .unwrap_or_else(|_| available_cookware.join(", "));
        self.system.replace(COOKWARE_PLACEHOLDER, &listing)
    }
}

/// Builds the instruction that makes the model reproduce the refusal text.
#[must_use]
pub fn build_refusal_instruction(refusal: &str) -> String {
    format!("This query is NOT about cooking. I must respond with:\n\n\"{refusal}\"")
}

/// Builds the user turn for `validate_query_relevance`.
#[must_use]
pub fn build_relevance_request(query: &str) -> String {
    format!("Is this query cooking-related? Query: {query}")
}

/// Builds the user turn for the relevance explanation.
#[must_use]
pub fn build_explanation_request(query: &str) -> String {
    format!("Briefly explain why this query is cooking-related: {query}")
}

/// Builds the user turn for `extract_required_cookware`.
#[must_use]
pub fn build_cookware_request(recipe: &str) -> String {
    format!(
        "Based on this recipe, what cookware is required to prepare it?\n\n\
         RECIPE:\n{recipe}\n\n\
         List only the cookware items, one per line. Do not include ingredients or explanations."
    )
}

//! Tool definitions and the closed tool registry.
//!
//! The model names a tool by string; [`ToolInvocation::parse`] checks that
//! name against the fixed set in [`ToolKind`] and decodes the JSON
//! arguments into the tool's typed argument struct. Anything else fails
//! with [`AgentError::UnknownTool`] or [`AgentError::MalformedToolArguments`].

use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::error::AgentError;

/// A tool definition that can be sent to an LLM for function-calling.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolDefinition {
    /// Tool name (must match a [`ToolKind`] name).
    pub name: String,
    /// Human-readable description of what the tool does.
    pub description: String,
    /// JSON Schema object describing the tool's parameters.
    pub parameters: serde_json::Value,
}

/// A tool call requested by the LLM.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolCall {
    /// Unique identifier for this call (assigned by the provider).
    pub id: String,
    /// Name of the tool to invoke.
    pub name: String,
    /// JSON-encoded arguments for the tool.
    pub arguments: String,
}

/// Every tool the registry knows about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ToolKind {
    /// LLM-backed check that a query is about cooking.
    ValidateQueryRelevance,
    /// Deterministic check of required cookware against the available list.
    ValidateCookware,
    /// Web search for recipes.
    SearchRecipes,
    /// Web search for general cooking technique answers.
    SearchCookingQuestion,
    /// LLM-backed extraction of the cookware a recipe needs.
    ExtractRequiredCookware,
}

impl ToolKind {
    /// All registered tools, in declaration order.
    pub const ALL: [Self; 5] = [
        Self::ValidateQueryRelevance,
        Self::ValidateCookware,
        Self::SearchRecipes,
        Self::SearchCookingQuestion,
        Self::ExtractRequiredCookware,
    ];

    /// Name the model uses to call this tool.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::ValidateQueryRelevance => "validate_query_relevance",
            Self::ValidateCookware => "validate_cookware",
            Self::SearchRecipes => "search_recipes",
            Self::SearchCookingQuestion => "search_cooking_question",
            Self::ExtractRequiredCookware => "extract_required_cookware",
        }
    }

    /// Looks a tool up by name.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.name() == name)
    }

    /// Names of every registered tool.
    #[must_use]
    pub fn known_names() -> Vec<String> {
        Self::ALL.iter().map(|k| k.name().to_string()).collect()
    }

    /// Schema sent to the model for this tool.
    #[must_use]
    pub fn definition(self) -> ToolDefinition {
        let (description, parameters) = match self {
            Self::ValidateQueryRelevance => (
                "Determines if the query is related to cooking, recipes, or food preparation.",
                string_param("query", "The user's query."),
            ),
            Self::ValidateCookware => (
                "Validates whether the user has the necessary cookware to make a recipe.",
                json!({
                    "type": "object",
                    "properties": {
                        "required_tools": {
                            "type": "array",
                            "items": { "type": "string" },
                            "description": "Cookware the recipe requires."
                        }
                    },
                    "required": ["required_tools"],
                    "additionalProperties": false
                }),
            ),
            Self::SearchRecipes => (
                "Searches for recipes on the web based on the user's query.",
                string_param("query", "The search query string."),
            ),
            Self::SearchCookingQuestion => (
                "Searches for answers to cooking-related questions.",
                string_param("query", "The cooking question to search for."),
            ),
            Self::ExtractRequiredCookware => (
                "Extracts the required cookware needed to prepare a given recipe.",
                string_param("recipe", "The recipe text."),
            ),
        };

        ToolDefinition {
            name: self.name().to_string(),
            description: description.to_string(),
            parameters,
        }
    }
}

impl std::fmt::Display for ToolKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Schema for a tool taking a single required string parameter.
fn string_param(name: &str, description: &str) -> serde_json::Value {
    json!({
        "type": "object",
        "properties": {
            name: { "type": "string", "description": description }
        },
        "required": [name],
        "additionalProperties": false
    })
}

/// Arguments for tools that take a query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryArgs {
    /// Query text.
    pub query: String,
}

/// Arguments for `extract_required_cookware`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecipeArgs {
    /// Recipe text.
    pub recipe: String,
}

/// Arguments for `validate_cookware`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CookwareArgs {
    /// Cookware the recipe requires.
    pub required_tools: Vec<String>,
}

/// A tool call checked against the registry, with typed arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ToolInvocation {
    /// `validate_query_relevance`
    ValidateQueryRelevance(QueryArgs),
    /// `validate_cookware`
    ValidateCookware(CookwareArgs),
    /// `search_recipes`
    SearchRecipes(QueryArgs),
    /// `search_cooking_question`
    SearchCookingQuestion(QueryArgs),
    /// `extract_required_cookware`
    ExtractRequiredCookware(RecipeArgs),
}

impl ToolInvocation {
    /// Resolves a model tool call against the registry.
    ///
    /// # Errors
    ///
    /// Returns [`AgentError::UnknownTool`] for unregistered names and
    /// [`AgentError::MalformedToolArguments`] when the arguments do not
    /// decode into the tool's argument struct.
    pub fn parse(call: &ToolCall) -> Result<Self, AgentError> {
        let kind = ToolKind::from_name(&call.name).ok_or_else(|| AgentError::UnknownTool {
            name: call.name.clone(),
            known: ToolKind::known_names(),
        })?;

        let malformed = |message: String| AgentError::MalformedToolArguments {
            name: call.name.clone(),
            message,
        };

        let args: serde_json::Value =
            serde_json::from_str(&call.arguments).map_err(|e| malformed(e.to_string()))?;

        let invocation = match kind {
            ToolKind::ValidateQueryRelevance => {
                Self::ValidateQueryRelevance(decode(args).map_err(malformed)?)
            }
            ToolKind::ValidateCookware => Self::ValidateCookware(decode(args).map_err(malformed)?),
            ToolKind::SearchRecipes => Self::SearchRecipes(decode(args).map_err(malformed)?),
            ToolKind::SearchCookingQuestion => {
                Self::SearchCookingQuestion(decode(args).map_err(malformed)?)
            }
            ToolKind::ExtractRequiredCookware => {
                Self::ExtractRequiredCookware(decode(args).map_err(malformed)?)
            }
        };

        Ok(invocation)
    }

    /// Which registered tool this invocation targets.
    #[must_use]
    pub const fn kind(&self) -> ToolKind {
        match self {
            Self::ValidateQueryRelevance(_) => ToolKind::ValidateQueryRelevance,
            Self::ValidateCookware(_) => ToolKind::ValidateCookware,
            Self::SearchRecipes(_) => ToolKind::SearchRecipes,
            Self::SearchCookingQuestion(_) => ToolKind::SearchCookingQuestion,
            Self::ExtractRequiredCookware(_) => ToolKind::ExtractRequiredCookware,
        }
    }

    /// The arguments as JSON, for logging.
    #[must_use]
    pub fn arguments_json(&self) -> serde_json::Value {
        let value = match self {
            Self::ValidateQueryRelevance(a)
            | Self::SearchRecipes(a)
            | Self::SearchCookingQuestion(a) => serde_json::to_value(a),
            Self::ValidateCookware(a) => serde_json::to_value(a),
            Self::ExtractRequiredCookware(a) => serde_json::to_value(a),
        };
        value.unwrap_or(serde_json::Value::Null)
    }
}

fn decode<T: serde::de::DeserializeOwned>(args: serde_json::Value) -> Result<T, String> {
    serde_json::from_value(args).map_err(|e| e.to_string())
}

/// A set of tool definitions offered to the model at one stage.
#[derive(Debug, Clone, Default)]
pub struct ToolSet {
    definitions: Vec<ToolDefinition>,
}

impl ToolSet {
    fn of(kinds: &[ToolKind]) -> Self {
        Self {
            definitions: kinds.iter().map(|k| k.definition()).collect(),
        }
    }

    /// Returns the tool definitions in this set.
    #[must_use]
    pub fn definitions(&self) -> &[ToolDefinition] {
        &self.definitions
    }

    /// Returns `true` if this set contains no tools.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }

    /// Returns the number of tools in this set.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.definitions.len()
    }

    /// Tools offered by the search stage.
    #[must_use]
    pub fn search() -> Self {
        Self::of(&[ToolKind::SearchRecipes, ToolKind::SearchCookingQuestion])
    }

    /// Tools offered by the identify-tools stage.
    #[must_use]
    pub fn cookware_extraction() -> Self {
        Self::of(&[ToolKind::ExtractRequiredCookware])
    }

    /// Tools offered by the validate-cookware stage.
    #[must_use]
    pub fn cookware_validation() -> Self {
        Self::of(&[ToolKind::ValidateCookware])
    }

    /// Empty tool set (no tools available).
    #[must_use]
    pub fn none() -> Self {
        Self::default()
    }
}

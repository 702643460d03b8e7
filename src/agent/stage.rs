//! Workflow stages and the transition function between them.

use serde::{Deserialize, Serialize};

use super::state::WorkflowState;

/// One node of the routing state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    /// Decide whether the query is about cooking.
    Classify,
    /// Optionally search for recipes or cooking answers.
    Search,
    /// Optionally extract the cookware a recipe needs.
    IdentifyTools,
    /// Check required cookware against what is available.
    ValidateCookware,
    /// Produce the final answer or the refusal.
    Respond,
}

impl Stage {
    /// Entry stage for every query.
    pub const INITIAL: Self = Self::Classify;

    /// Stage name used in logs and `debug_info.stages`.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Classify => "classify",
            Self::Search => "search",
            Self::IdentifyTools => "identify_tools",
            Self::ValidateCookware => "validate_cookware",
            Self::Respond => "respond",
        }
    }

    /// Returns `true` for the terminal stage.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Respond)
    }
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Picks the stage that follows `current`, or `None` once [`Stage::Respond`]
/// has run.
///
/// Irrelevant queries go straight to `Respond`. `ValidateCookware` is only
/// entered when the identify-tools stage recorded a non-empty cookware list.
#[must_use]
pub fn route(current: Stage, state: &WorkflowState) -> Option<Stage> {
    if current.is_terminal() {
        return None;
    }
    if !state.relevant {
        return Some(Stage::Respond);
    }

    let next = match current {
        Stage::Classify => Stage::Search,
        Stage::Search => Stage::IdentifyTools,
        Stage::IdentifyTools if state.required_cookware().is_empty() => Stage::Respond,
        Stage::IdentifyTools => Stage::ValidateCookware,
        Stage::ValidateCookware | Stage::Respond => Stage::Respond,
    };
    Some(next)
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use test_case::test_case;

    use super::*;
    use crate::agent::state::TOOLS_KEY;

    fn state(relevant: bool, cookware: &[&str]) -> WorkflowState {
        let mut state = WorkflowState::new("q");
        state.relevant = relevant;
        state.record(TOOLS_KEY, json!({ "required_cookware": cookware }));
        state
    }

    #[test_case(Stage::Classify, true, &[], Some(Stage::Search) ; "classify relevant")]
    #[test_case(Stage::Classify, false, &[], Some(Stage::Respond) ; "classify irrelevant")]
    #[test_case(Stage::Search, true, &[], Some(Stage::IdentifyTools) ; "search")]
    #[test_case(Stage::IdentifyTools, true, &["Whisk"], Some(Stage::ValidateCookware) ; "cookware")]
    #[test_case(Stage::IdentifyTools, true, &[], Some(Stage::Respond) ; "no cookware")]
    #[test_case(Stage::ValidateCookware, true, &["Whisk"], Some(Stage::Respond) ; "validate")]
    #[test_case(Stage::Respond, true, &["Whisk"], None ; "respond relevant")]
    #[test_case(Stage::Respond, false, &[], None ; "respond irrelevant")]
    fn test_route(current: Stage, relevant: bool, cookware: &[&str], expected: Option<Stage>) {
        assert_eq!(route(current, &state(relevant, cookware)), expected);
    }

    #[test]
    fn test_route_without_tools_payload() {
        let mut state = WorkflowState::new("q");
        state.relevant = true;
        assert_eq!(route(Stage::IdentifyTools, &state), Some(Stage::Respond));
    }

    #[test]
    fn test_every_path_terminates_at_respond() {
        for relevant in [true, false] {
            for cookware in [&[][..], &["Spatula"][..]] {
                let snapshot = state(relevant, cookware);
                let mut current = Stage::INITIAL;
                let mut steps = 0;
                while let Some(next) = route(current, &snapshot) {
                    current = next;
                    steps += 1;
                    assert!(steps <= 5);
                }
                assert_eq!(current, Stage::Respond);
            }
        }
    }

    #[test]
    fn test_stage_serializes_as_name() {
        for stage in [
            Stage::Classify,
            Stage::Search,
            Stage::IdentifyTools,
            Stage::ValidateCookware,
            Stage::Respond,
        ] {
            let json = serde_json::to_value(stage).unwrap_or_default();
            assert_eq!(json, stage.name());
        }
    }
}

// SPDX-License-Identifier: MIT

//! Shared state threaded through a phase's steps

use crate::adk::error::{ButlerError, WorkflowError};
use crate::adk::model::Content;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use std::str::FromStr;

/// Which pipeline an invocation belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    Preparation,
    Review,
}

impl Phase {
    pub fn as_str(self) -> &'static str {
        match self {
            Phase::Preparation => "preparation",
            Phase::Review => "review",
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Phase {
    type Err = ButlerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "preparation" => Ok(Phase::Preparation),
            "review" => Ok(Phase::Review),
            other => Err(WorkflowError::InvalidPhase(other.to_string()).into()),
        }
    }
}

/// One workflow invocation's record.
///
/// Created by the caller, mutated in place by each step, read once the last
/// step returns.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HikeState {
    #[serde(default)]
    pub messages: Vec<Content>,
    pub user_profile: Option<Value>,
    pub user_id: Option<String>,
    /// Step name to that step's result
    #[serde(default)]
    pub intermediate_results: Map<String, Value>,
    pub current_task: Option<Phase>,
    pub input_data: Option<Map<String, Value>>,
    pub output_data: Option<Map<String, Value>>,
}

impl HikeState {
    pub fn new(phase: Phase, user_id: impl Into<String>, input: Map<String, Value>) -> Self {
        Self {
            user_id: Some(user_id.into()),
            current_task: Some(phase),
            input_data: Some(input),
            ..Self::default()
        }
    }

    pub fn preparation(user_id: impl Into<String>, input: Map<String, Value>) -> Self {
        Self::new(Phase::Preparation, user_id, input)
    }

    pub fn review(user_id: impl Into<String>, input: Map<String, Value>) -> Self {
        Self::new(Phase::Review, user_id, input)
    }

    /// Record a step's result under its name
    pub fn set_intermediate(&mut self, step: &str, value: Value) {
        self.intermediate_results.insert(step.to_string(), value);
    }

    pub fn intermediate(&self, step: &str) -> Option<&Value> {
        self.intermediate_results.get(step)
    }

    /// Output payload, created empty on first access
    pub fn output_mut(&mut self) -> &mut Map<String, Value> {
        self.output_data.get_or_insert_with(Map::new)
    }

    pub fn output(&self, key: &str) -> Option<&Value> {
        self.output_data.as_ref().and_then(|o| o.get(key))
    }

    pub fn input(&self, key: &str) -> Option<&Value> {
        self.input_data.as_ref().and_then(|i| i.get(key))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn location_input() -> Map<String, Value> {
        let mut input = Map::new();
        input.insert("location".into(), json!("Fragrant Hills, Beijing"));
        input
    }

    #[test]
    fn test_state_holds_constructed_values() {
        let state = HikeState::preparation("test_user", location_input());

        assert_eq!(state.user_id.as_deref(), Some("test_user"));
        assert_eq!(state.current_task, Some(Phase::Preparation));
        assert_eq!(state.input("location"), Some(&json!("Fragrant Hills, Beijing")));
        assert!(state.messages.is_empty());
        assert!(state.user_profile.is_none());
        assert!(state.intermediate_results.is_empty());
        assert!(state.output_data.is_none());
    }

    #[test]
    fn test_output_mut_creates_payload() {
        let mut state = HikeState::review("u", Map::new());
        state.output_mut().insert("post".into(), json!("draft"));
        assert_eq!(state.output("post"), Some(&json!("draft")));
    }

    #[test]
    fn test_phase_parse_and_display() {
        assert_eq!("review".parse::<Phase>().unwrap(), Phase::Review);
        assert_eq!(Phase::Preparation.to_string(), "preparation");
        assert!("planning".parse::<Phase>().is_err());
    }

    #[test]
    fn test_state_serializes_phase_lowercase() {
        let state = HikeState::review("u", Map::new());
        let json = serde_json::to_value(&state).unwrap();
        assert_eq!(json["current_task"], "review");
        assert_eq!(json["intermediate_results"], json!({}));
    }
}

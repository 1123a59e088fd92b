//! Public API types re-used by external crates (e.g., the HTTP API layer).

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::AgentError;

/// Final chat answer: model text, model-authored image URLs, and the optional
/// fact-check verdict merged in by the orchestrator.
///
/// `fact_check` is absent for conversational queries and serialized only when
/// present.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct StructuredAnswer {
    #[serde(default)]
    pub answer: String,
    #[serde(default)]
    pub image_urls: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fact_check: Option<FactCheckReport>,
}

/// Verdict of the fact-check pass over a generated answer.
///
/// Deserialization fills absent fields with the documented defaults, so a
/// partial model response still yields a complete report.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FactCheckReport {
    #[serde(default = "default_accurate")]
    pub is_accurate: bool,
    /// Confidence in `[0.0, 1.0]`.
    #[serde(default = "default_confidence")]
    pub confidence_score: f32,
    #[serde(default)]
    pub issues_found: Vec<String>,
    #[serde(default)]
    pub verified_facts: Vec<String>,
    #[serde(default = "default_recommendations")]
    pub recommendations: String,
}

fn default_accurate() -> bool {
    true
}

fn default_confidence() -> f32 {
    0.5
}

fn default_recommendations() -> String {
    "No recommendations available.".to_string()
}

impl FactCheckReport {
    /// Fixed placeholder attached when the fact-check call fails. The chat
    /// request must still succeed, so the failure is visible only here.
    pub fn unavailable() -> Self {
        Self {
            is_accurate: true,
            confidence_score: 0.5,
            issues_found: vec!["Fact checking unavailable".to_string()],
            verified_facts: Vec::new(),
            recommendations: "Fact checking could not be completed.".to_string(),
        }
    }
}

/// Result of a follow-up action, keyed by the action kind.
///
/// Serializes untagged: `{"questions": [...]}` for suggestions,
/// `{"answer": "..."}` for the explain actions.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ActionOutcome {
    Suggestions { questions: Vec<String> },
    Answer { answer: String },
}

/// Recognized follow-up actions.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FollowUpAction {
    /// Explain the topic in the simplest possible terms.
    Eli5,
    /// Provide a more technical, in-depth explanation.
    DeepDive,
    /// Suggest three follow-up questions about the topic.
    SuggestQuestions,
}

impl FollowUpAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            FollowUpAction::Eli5 => "eli5",
            FollowUpAction::DeepDive => "deep_dive",
            FollowUpAction::SuggestQuestions => "suggest_questions",
        }
    }
}

impl FromStr for FollowUpAction {
    type Err = AgentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "eli5" => Ok(FollowUpAction::Eli5),
            "deep_dive" => Ok(FollowUpAction::DeepDive),
            "suggest_questions" => Ok(FollowUpAction::SuggestQuestions),
            other => Err(AgentError::UnknownAction(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn fact_check_defaults_fill_absent_fields() {
        let report: FactCheckReport = serde_json::from_value(json!({
            "is_accurate": false
        }))
        .unwrap();
        assert!(!report.is_accurate);
        assert_eq!(report.confidence_score, 0.5);
        assert!(report.issues_found.is_empty());
        assert!(report.verified_facts.is_empty());
        assert_eq!(report.recommendations, "No recommendations available.");
    }

    #[test]
    fn answer_serializes_without_absent_fact_check() {
        let answer = StructuredAnswer {
            answer: "Mars is red.".into(),
            image_urls: vec![],
            fact_check: None,
        };
        let v = serde_json::to_value(&answer).unwrap();
        assert!(v.get("fact_check").is_none());
    }

    #[test]
    fn action_outcomes_serialize_untagged() {
        let s = ActionOutcome::Suggestions {
            questions: vec!["Why?".into()],
        };
        assert_eq!(serde_json::to_value(&s).unwrap(), json!({"questions": ["Why?"]}));

        let a = ActionOutcome::Answer {
            answer: "Because.".into(),
        };
        assert_eq!(serde_json::to_value(&a).unwrap(), json!({"answer": "Because."}));
    }

    #[test]
    fn action_names_parse_and_reject() {
        assert_eq!(
            "suggest_questions".parse::<FollowUpAction>().unwrap(),
            FollowUpAction::SuggestQuestions
        );
        assert_eq!("eli5".parse::<FollowUpAction>().unwrap(), FollowUpAction::Eli5);
        assert!(matches!(
            "explode".parse::<FollowUpAction>(),
            Err(AgentError::UnknownAction(name)) if name == "explode"
        ));
    }
}

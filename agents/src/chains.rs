//! Pure chain constructors: one per query kind.
//!
//! An [`AgentChain`] binds a generation profile (which fixes the sampling
//! temperature), the system/user prompts, an optional inline image, and an
//! optional response schema. Constructors never perform I/O; running a chain
//! is the caller's job via [`crate::backend::ChainBackend`].

use llm_service::ProfileKind;
use serde_json::Value;

use crate::api_types::FollowUpAction;
use crate::prompt;

/// A ready-to-run model invocation.
#[derive(Debug)]
pub struct AgentChain {
    /// Generation role; selects the model profile and its fixed temperature.
    pub profile: ProfileKind,
    /// Optional system instruction.
    pub system: Option<&'static str>,
    /// Rendered user prompt.
    pub prompt: String,
    /// Optional inline image payload (base64 JPEG).
    pub image_base64: Option<String>,
    /// Response schema; `Some` forces structured JSON output.
    pub schema: Option<Value>,
}

/// Chain for text-only Q&A with paper and encyclopedia context.
pub fn text_answer_chain(query: &str, papers: &str, wiki: &str) -> AgentChain {
    AgentChain {
        profile: ProfileKind::Answer,
        system: Some(prompt::ANSWER_SYSTEM),
        prompt: prompt::build_answer_prompt(query, papers, wiki),
        image_base64: None,
        schema: Some(prompt::answer_schema()),
    }
}

/// Chain for image-augmented Q&A; same context block plus the inline image.
pub fn multimodal_answer_chain(
    query: &str,
    papers: &str,
    wiki: &str,
    image_base64: &str,
) -> AgentChain {
    AgentChain {
        profile: ProfileKind::Answer,
        system: Some(prompt::MULTIMODAL_SYSTEM),
        prompt: prompt::build_answer_prompt(query, papers, wiki),
        image_base64: Some(image_base64.to_string()),
        schema: Some(prompt::answer_schema()),
    }
}

/// Chain for a follow-up action. The suggestion action is structured; the
/// explain actions return plain text.
pub fn action_chain(action: FollowUpAction, topic: &str) -> AgentChain {
    match action {
        FollowUpAction::SuggestQuestions => AgentChain {
            profile: ProfileKind::Creative,
            system: None,
            prompt: prompt::build_suggestions_prompt(topic),
            image_base64: None,
            schema: Some(prompt::suggestions_schema()),
        },
        FollowUpAction::Eli5 => AgentChain {
            profile: ProfileKind::Explain,
            system: None,
            prompt: prompt::build_eli5_prompt(topic),
            image_base64: None,
            schema: None,
        },
        FollowUpAction::DeepDive => AgentChain {
            profile: ProfileKind::Explain,
            system: None,
            prompt: prompt::build_deep_dive_prompt(topic),
            image_base64: None,
            schema: None,
        },
    }
}

/// Chain for the fact-check pass over a generated answer.
pub fn fact_check_chain(
    original_query: &str,
    answer_to_check: &str,
    papers: &str,
    wiki: &str,
) -> AgentChain {
    AgentChain {
        profile: ProfileKind::Checker,
        system: Some(prompt::FACT_CHECK_SYSTEM),
        prompt: prompt::build_fact_check_prompt(original_query, answer_to_check, papers, wiki),
        image_base64: None,
        schema: Some(prompt::fact_check_schema()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn answer_chains_are_structured_and_differ_only_by_image() {
        let text = text_answer_chain("q", "p", "w");
        let multi = multimodal_answer_chain("q", "p", "w", "aGVsbG8=");

        assert_eq!(text.profile, ProfileKind::Answer);
        assert_eq!(multi.profile, ProfileKind::Answer);
        assert!(text.schema.is_some());
        assert!(multi.schema.is_some());
        assert!(text.image_base64.is_none());
        assert_eq!(multi.image_base64.as_deref(), Some("aGVsbG8="));
        assert_eq!(text.prompt, multi.prompt);
    }

    #[test]
    fn suggestion_action_is_creative_and_structured() {
        let chain = action_chain(FollowUpAction::SuggestQuestions, "black holes");
        assert_eq!(chain.profile, ProfileKind::Creative);
        assert!(chain.schema.is_some());
        assert!(chain.prompt.contains("black holes"));
    }

    #[test]
    fn explain_actions_are_plain_text() {
        for action in [FollowUpAction::Eli5, FollowUpAction::DeepDive] {
            let chain = action_chain(action, "dark matter");
            assert_eq!(chain.profile, ProfileKind::Explain);
            assert!(chain.schema.is_none());
            assert!(chain.prompt.contains("dark matter"));
        }
    }

    #[test]
    fn fact_check_chain_uses_checker_profile() {
        let chain = fact_check_chain("q", "a", "p", "w");
        assert_eq!(chain.profile, ProfileKind::Checker);
        assert!(chain.schema.is_some());
        assert!(chain.system.is_some());
    }
}

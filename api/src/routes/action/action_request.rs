use serde::Deserialize;

/// Request body for `POST /action`.
#[derive(Debug, Deserialize)]
pub struct ActionRequest {
    /// Action name: `eli5`, `deep_dive`, or `suggest_questions`.
    pub action: String,
    /// Topic to act on, usually the original user query.
    pub topic: String,
}

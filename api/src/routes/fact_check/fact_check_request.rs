use serde::Deserialize;

/// Request body for `POST /fact-check`.
#[derive(Debug, Deserialize)]
pub struct FactCheckRequest {
    /// The query the answer was produced for.
    pub original_query: String,
    /// The answer to validate.
    pub answer_to_check: String,
}

/// Configuration for a single Gemini model invocation.
///
/// One instance describes one role (answering, fact-checking, embeddings, ...)
/// and is immutable after construction. The API key is carried explicitly so
/// that no component reads process-wide environment state at call time.
///
/// # Fields
///
/// - `model`: model identifier (e.g. `"gemini-2.5-flash"`).
/// - `endpoint`: API base URL (e.g. `"https://generativelanguage.googleapis.com"`).
/// - `api_key`: key sent as `x-goog-api-key` on every request.
/// - `max_output_tokens`: optional generation cap.
/// - `temperature`: sampling temperature, fixed per role.
/// - `top_p`: nucleus sampling cutoff.
/// - `timeout_secs`: request timeout in seconds.
#[derive(Debug, Clone, PartialEq)]
pub struct LlmModelConfig {
    /// Model identifier string (e.g. `"gemini-2.5-flash"`).
    pub model: String,

    /// API base URL, scheme included.
    pub endpoint: String,

    /// API key for authentication.
    pub api_key: String,

    /// Maximum number of tokens to generate.
    pub max_output_tokens: Option<u32>,

    /// Sampling temperature (controls creativity).
    pub temperature: Option<f32>,

    /// Nucleus sampling parameter.
    pub top_p: Option<f32>,

    /// Optional request timeout (in seconds).
    pub timeout_secs: Option<u64>,
}

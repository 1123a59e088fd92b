//! Gemini service for text generation, structured JSON output, and embeddings.
//!
//! Minimal, non-streaming client around the Gemini REST API. Endpoints are
//! derived from `LlmModelConfig::endpoint`:
//! - POST {endpoint}/v1beta/models/{model}:generateContent — completion
//! - POST {endpoint}/v1beta/models/{model}:embedContent    — embeddings
//!
//! Constructor validation:
//! - `cfg.api_key` must be non-empty
//! - `cfg.endpoint` must start with http:// or https://
//! - `cfg.model` must be non-empty
//!
//! Errors are normalized via unified error types in `error_handler`.

use std::time::{Duration, Instant};

use reqwest::header;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, error, info};

use crate::{
    config::llm_model_config::LlmModelConfig,
    error_handler::{ConfigError, HttpError, LlmServiceError, ProviderError, make_snippet},
};

/// Thin client for the Gemini API.
///
/// Constructed from a complete [`LlmModelConfig`]. Internally keeps a
/// preconfigured `reqwest::Client` (with timeout and default headers).
///
/// High-level operations:
/// - [`GeminiService::generate`]            — plain-text completion
/// - [`GeminiService::generate_structured`] — schema-constrained JSON completion,
///   optionally with an inline image part
/// - [`GeminiService::embed`]               — single embeddings vector retrieval
#[derive(Debug)]
pub struct GeminiService {
    client: reqwest::Client,
    cfg: LlmModelConfig,
    url_generate: String,
    url_embed: String,
}

impl GeminiService {
    /// Creates a new [`GeminiService`] from the given config.
    ///
    /// Validates the API key, endpoint scheme, and model name. Builds an HTTP
    /// client with default headers and a configurable timeout.
    ///
    /// # Errors
    /// - [`LlmServiceError::Provider`] with `MissingApiKey` if `cfg.api_key` is empty
    /// - [`LlmServiceError::Provider`] with `InvalidEndpoint` if `cfg.endpoint` is invalid
    /// - [`LlmServiceError::Config`] with `EmptyModel` if `cfg.model` is empty
    /// - [`LlmServiceError::HttpTransport`] if the HTTP client cannot be built
    pub fn new(cfg: LlmModelConfig) -> Result<Self, LlmServiceError> {
        // 1) API key must be present.
        let api_key = cfg.api_key.trim();
        if api_key.is_empty() {
            return Err(ProviderError::MissingApiKey.into());
        }

        // 2) Endpoint must use http/https.
        let endpoint = cfg.endpoint.trim();
        if endpoint.is_empty()
            || !(endpoint.starts_with("http://") || endpoint.starts_with("https://"))
        {
            return Err(ProviderError::InvalidEndpoint(cfg.endpoint.clone()).into());
        }

        // 3) Model name must be present.
        if cfg.model.trim().is_empty() {
            return Err(ConfigError::EmptyModel.into());
        }

        // 4) HTTP client: timeout + default headers.
        let timeout = cfg
            .timeout_secs
            .map(Duration::from_secs)
            .unwrap_or_else(|| Duration::from_secs(60));

        let mut headers = header::HeaderMap::new();
        headers.insert(
            "x-goog-api-key",
            header::HeaderValue::from_str(api_key).map_err(|e| {
                ProviderError::Decode(format!("invalid API key header: {e}"))
            })?,
        );
        headers.insert(
            header::CONTENT_TYPE,
            header::HeaderValue::from_static("application/json"),
        );

        let client = reqwest::Client::builder()
            .timeout(timeout)
            .default_headers(headers)
            .build()?;

        let base = endpoint.trim_end_matches('/').to_string();
        let url_generate = format!("{}/v1beta/models/{}:generateContent", base, cfg.model);
        let url_embed = format!("{}/v1beta/models/{}:embedContent", base, cfg.model);

        info!(
            model = %cfg.model,
            endpoint = %cfg.endpoint,
            timeout_secs = cfg.timeout_secs.unwrap_or(60),
            "GeminiService initialized"
        );

        Ok(Self {
            client,
            cfg,
            url_generate,
            url_embed,
        })
    }

    /// Performs a plain-text completion request.
    ///
    /// # Errors
    /// - [`LlmServiceError::Provider`] with `HttpStatus` for non-2xx responses
    /// - [`LlmServiceError::HttpTransport`] for client/network failures
    /// - [`LlmServiceError::Provider`] with `Decode`/`EmptyCandidates`/`Blocked`
    ///   when the response carries no usable text
    pub async fn generate(
        &self,
        prompt: &str,
        system: Option<&str>,
    ) -> Result<String, LlmServiceError> {
        let body = GenerateContentRequest::from_cfg(&self.cfg, prompt, system, None, None);
        self.request_content(&body, prompt.len()).await
    }

    /// Performs a schema-constrained completion request and parses the model
    /// output as JSON.
    ///
    /// `schema` is attached as the response schema, and the response MIME type
    /// is forced to `application/json`. When `image_base64` is provided, it is
    /// embedded as an inline JPEG part alongside the prompt text.
    ///
    /// # Errors
    /// Same as [`GeminiService::generate`], plus `Decode` when the returned
    /// text is not valid JSON.
    pub async fn generate_structured(
        &self,
        prompt: &str,
        system: Option<&str>,
        image_base64: Option<&str>,
        schema: &Value,
    ) -> Result<Value, LlmServiceError> {
        let body =
            GenerateContentRequest::from_cfg(&self.cfg, prompt, system, image_base64, Some(schema));
        let text = self.request_content(&body, prompt.len()).await?;

        serde_json::from_str(&text).map_err(|e| {
            ProviderError::Decode(format!(
                "structured response is not valid JSON: {e}; body: {}",
                make_snippet(&text)
            ))
            .into()
        })
    }

    /// Retrieves a single embeddings vector via `:embedContent`.
    ///
    /// # Errors
    /// - [`LlmServiceError::Provider`] with `HttpStatus` for non-2xx responses
    /// - [`LlmServiceError::HttpTransport`] for client/network failures
    /// - [`LlmServiceError::Provider`] with `Decode` if the JSON cannot be parsed
    pub async fn embed(&self, input: &str) -> Result<Vec<f32>, LlmServiceError> {
        let started = Instant::now();
        let body = EmbedContentRequest {
            content: ContentOwned {
                parts: vec![TextPart { text: input }],
            },
        };

        debug!(
            model = %self.cfg.model,
            input_len = input.len(),
            "POST {}", self.url_embed
        );

        let resp = self.client.post(&self.url_embed).json(&body).send().await?;

        if !resp.status().is_success() {
            return Err(self
                .http_status_error(resp, &self.url_embed, started, ":embedContent")
                .await);
        }

        let out: EmbedContentResponse = match resp.json().await {
            Ok(v) => v,
            Err(e) => {
                error!(
                    error = %e,
                    model = %self.cfg.model,
                    latency_ms = started.elapsed().as_millis(),
                    "failed to decode :embedContent response"
                );
                return Err(ProviderError::Decode(format!(
                    "serde error: {e}; expected `embedding.values`"
                ))
                .into());
            }
        };

        info!(
            model = %self.cfg.model,
            latency_ms = started.elapsed().as_millis(),
            "embedding completed"
        );

        Ok(out.embedding.values)
    }

    /* --------------------- Internals --------------------- */

    async fn request_content(
        &self,
        body: &GenerateContentRequest<'_>,
        prompt_len: usize,
    ) -> Result<String, LlmServiceError> {
        let started = Instant::now();

        debug!(
            model = %self.cfg.model,
            prompt_len,
            structured = body.generation_config.response_schema.is_some(),
            "POST {}", self.url_generate
        );

        let resp = self
            .client
            .post(&self.url_generate)
            .json(body)
            .send()
            .await?;

        if !resp.status().is_success() {
            return Err(self
                .http_status_error(resp, &self.url_generate, started, ":generateContent")
                .await);
        }

        let out: GenerateContentResponse = match resp.json().await {
            Ok(v) => v,
            Err(e) => {
                error!(
                    error = %e,
                    model = %self.cfg.model,
                    latency_ms = started.elapsed().as_millis(),
                    "failed to decode :generateContent response"
                );
                return Err(ProviderError::Decode(format!(
                    "serde error: {e}; expected `candidates[0].content.parts[].text`"
                ))
                .into());
            }
        };

        let content = extract_text(out)?;

        info!(
            model = %self.cfg.model,
            latency_ms = started.elapsed().as_millis(),
            "content generation completed"
        );

        Ok(content)
    }

    async fn http_status_error(
        &self,
        resp: reqwest::Response,
        url: &str,
        started: Instant,
        op: &str,
    ) -> LlmServiceError {
        let status = resp.status();
        let text = resp.text().await.unwrap_or_default();
        let snippet = make_snippet(&text);

        error!(
            %status,
            %url,
            %snippet,
            model = %self.cfg.model,
            latency_ms = started.elapsed().as_millis(),
            "Gemini {op} returned non-success status"
        );

        ProviderError::HttpStatus(HttpError {
            status,
            url: url.to_string(),
            snippet,
        })
        .into()
    }
}

/// Pulls the concatenated text parts out of a decoded response.
///
/// A blocked prompt surfaces as [`ProviderError::Blocked`]; a response with
/// no text parts at all surfaces as [`ProviderError::EmptyCandidates`].
fn extract_text(resp: GenerateContentResponse) -> Result<String, LlmServiceError> {
    if let Some(feedback) = resp.prompt_feedback {
        if let Some(reason) = feedback.block_reason {
            return Err(ProviderError::Blocked(reason).into());
        }
    }

    let text: String = resp
        .candidates
        .into_iter()
        .filter_map(|c| c.content)
        .flat_map(|c| c.parts)
        .filter_map(|p| p.text)
        .collect();

    if text.is_empty() {
        return Err(ProviderError::EmptyCandidates.into());
    }
    Ok(text)
}

/* ===========================================================================
HTTP payloads
======================================================================== */

/// Request body for `:generateContent` (non-streaming).
#[derive(Debug, Serialize)]
struct GenerateContentRequest<'a> {
    contents: Vec<Content<'a>>,
    #[serde(rename = "systemInstruction", skip_serializing_if = "Option::is_none")]
    system_instruction: Option<Content<'a>>,
    #[serde(rename = "generationConfig")]
    generation_config: GenerationConfig<'a>,
}

impl<'a> GenerateContentRequest<'a> {
    /// Builds a request from config, prompt, an optional system instruction,
    /// an optional inline image, and an optional response schema.
    fn from_cfg(
        cfg: &'a LlmModelConfig,
        prompt: &'a str,
        system: Option<&'a str>,
        image_base64: Option<&'a str>,
        schema: Option<&'a Value>,
    ) -> Self {
        let mut parts = vec![Part::Text { text: prompt }];
        if let Some(data) = image_base64 {
            parts.push(Part::InlineData {
                inline_data: Blob {
                    mime_type: "image/jpeg",
                    data,
                },
            });
        }

        Self {
            contents: vec![Content {
                role: Some("user"),
                parts,
            }],
            system_instruction: system.map(|text| Content {
                role: None,
                parts: vec![Part::Text { text }],
            }),
            generation_config: GenerationConfig {
                temperature: cfg.temperature,
                top_p: cfg.top_p,
                max_output_tokens: cfg.max_output_tokens,
                response_mime_type: schema.map(|_| "application/json"),
                response_schema: schema,
            },
        }
    }
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<&'a str>,
    parts: Vec<Part<'a>>,
}

/// A single content part: either text or an inline binary blob.
#[derive(Debug, Serialize)]
#[serde(untagged)]
enum Part<'a> {
    Text {
        text: &'a str,
    },
    InlineData {
        #[serde(rename = "inlineData")]
        inline_data: Blob<'a>,
    },
}

#[derive(Debug, Serialize)]
struct Blob<'a> {
    #[serde(rename = "mimeType")]
    mime_type: &'a str,
    data: &'a str,
}

#[derive(Debug, Serialize)]
struct GenerationConfig<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(rename = "topP", skip_serializing_if = "Option::is_none")]
    top_p: Option<f32>,
    #[serde(rename = "maxOutputTokens", skip_serializing_if = "Option::is_none")]
    max_output_tokens: Option<u32>,
    #[serde(rename = "responseMimeType", skip_serializing_if = "Option::is_none")]
    response_mime_type: Option<&'a str>,
    #[serde(rename = "responseSchema", skip_serializing_if = "Option::is_none")]
    response_schema: Option<&'a Value>,
}

/// Response body for `:generateContent`.
#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    #[serde(rename = "promptFeedback", default)]
    prompt_feedback: Option<PromptFeedback>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<ContentOut>,
}

#[derive(Debug, Deserialize)]
struct ContentOut {
    #[serde(default)]
    parts: Vec<PartOut>,
}

#[derive(Debug, Deserialize)]
struct PartOut {
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct PromptFeedback {
    #[serde(rename = "blockReason")]
    block_reason: Option<String>,
}

/// Request body for `:embedContent`.
#[derive(Debug, Serialize)]
struct EmbedContentRequest<'a> {
    content: ContentOwned<'a>,
}

#[derive(Debug, Serialize)]
struct ContentOwned<'a> {
    parts: Vec<TextPart<'a>>,
}

#[derive(Debug, Serialize)]
struct TextPart<'a> {
    text: &'a str,
}

/// Response body for `:embedContent`.
#[derive(Debug, Deserialize)]
struct EmbedContentResponse {
    embedding: EmbeddingValues,
}

#[derive(Debug, Deserialize)]
struct EmbeddingValues {
    values: Vec<f32>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn cfg() -> LlmModelConfig {
        LlmModelConfig {
            model: "gemini-2.5-flash".into(),
            endpoint: "https://generativelanguage.googleapis.com".into(),
            api_key: "test-key".into(),
            max_output_tokens: Some(1024),
            temperature: Some(0.4),
            top_p: None,
            timeout_secs: Some(30),
        }
    }

    #[test]
    fn constructor_rejects_missing_key() {
        let mut c = cfg();
        c.api_key = "  ".into();
        assert!(matches!(
            GeminiService::new(c),
            Err(LlmServiceError::Provider(ProviderError::MissingApiKey))
        ));
    }

    #[test]
    fn constructor_rejects_bad_endpoint() {
        let mut c = cfg();
        c.endpoint = "generativelanguage.googleapis.com".into();
        assert!(matches!(
            GeminiService::new(c),
            Err(LlmServiceError::Provider(ProviderError::InvalidEndpoint(_)))
        ));
    }

    #[test]
    fn urls_are_derived_from_endpoint_and_model() {
        let svc = GeminiService::new(cfg()).unwrap();
        assert_eq!(
            svc.url_generate,
            "https://generativelanguage.googleapis.com/v1beta/models/gemini-2.5-flash:generateContent"
        );
        assert_eq!(
            svc.url_embed,
            "https://generativelanguage.googleapis.com/v1beta/models/gemini-2.5-flash:embedContent"
        );
    }

    #[test]
    fn request_body_carries_schema_and_image() {
        let schema = json!({"type": "OBJECT"});
        let c = cfg();
        let body = GenerateContentRequest::from_cfg(
            &c,
            "What is a pulsar?",
            Some("Be precise."),
            Some("aGVsbG8="),
            Some(&schema),
        );
        let v = serde_json::to_value(&body).unwrap();

        assert_eq!(v["generationConfig"]["responseMimeType"], "application/json");
        assert_eq!(v["generationConfig"]["responseSchema"]["type"], "OBJECT");
        assert_eq!(v["generationConfig"]["temperature"], json!(0.4));
        assert_eq!(v["contents"][0]["parts"][0]["text"], "What is a pulsar?");
        assert_eq!(
            v["contents"][0]["parts"][1]["inlineData"]["mimeType"],
            "image/jpeg"
        );
        assert_eq!(v["systemInstruction"]["parts"][0]["text"], "Be precise.");
    }

    #[test]
    fn plain_request_omits_structured_fields() {
        let c = cfg();
        let body = GenerateContentRequest::from_cfg(&c, "hello", None, None, None);
        let v = serde_json::to_value(&body).unwrap();

        assert!(v["generationConfig"].get("responseMimeType").is_none());
        assert!(v.get("systemInstruction").is_none());
    }

    #[test]
    fn extract_text_joins_parts() {
        let resp: GenerateContentResponse = serde_json::from_value(json!({
            "candidates": [{
                "content": {"parts": [{"text": "Mars "}, {"text": "is red."}]}
            }]
        }))
        .unwrap();
        assert_eq!(extract_text(resp).unwrap(), "Mars is red.");
    }

    #[test]
    fn extract_text_reports_blocked_prompt() {
        let resp: GenerateContentResponse = serde_json::from_value(json!({
            "candidates": [],
            "promptFeedback": {"blockReason": "SAFETY"}
        }))
        .unwrap();
        assert!(matches!(
            extract_text(resp),
            Err(LlmServiceError::Provider(ProviderError::Blocked(r))) if r == "SAFETY"
        ));
    }

    #[test]
    fn extract_text_reports_empty_candidates() {
        let resp: GenerateContentResponse = serde_json::from_value(json!({})).unwrap();
        assert!(matches!(
            extract_text(resp),
            Err(LlmServiceError::Provider(ProviderError::EmptyCandidates))
        ));
    }
}

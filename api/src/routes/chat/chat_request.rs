use serde::Deserialize;

/// Request body for `POST /chat`.
#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    /// Free-text user query.
    pub query: String,
    /// Optional base64-encoded JPEG to reason about alongside the query.
    #[serde(default)]
    pub image_base64: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn image_field_is_optional() {
        let req: ChatRequest = serde_json::from_str(r#"{"query": "What is a quasar?"}"#).unwrap();
        assert_eq!(req.query, "What is a quasar?");
        assert!(req.image_base64.is_none());

        let req: ChatRequest =
            serde_json::from_str(r#"{"query": "What is this?", "image_base64": "aGVsbG8="}"#)
                .unwrap();
        assert_eq!(req.image_base64.as_deref(), Some("aGVsbG8="));
    }
}

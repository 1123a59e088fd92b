//! Wikipedia search returning the intro extract of the top matching page.

use std::collections::HashMap;

use serde::Deserialize;
use tracing::{debug, warn};

use crate::error::ToolError;

const WIKIPEDIA_API_URL: &str = "https://en.wikipedia.org/w/api.php";

const NO_PAGE: &str = "No relevant Wikipedia page found.";
const MISSING_PAGE: &str = "The requested page does not exist on Wikipedia.";

/// Client for the MediaWiki action API.
pub struct WikipediaSearch {
    http: reqwest::Client,
    base: String,
}

impl WikipediaSearch {
    pub fn new() -> Self {
        Self {
            http: reqwest::Client::new(),
            base: WIKIPEDIA_API_URL.to_string(),
        }
    }

    /// Override the API base, mainly for tests.
    pub fn with_base(base: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base: base.into(),
        }
    }

    /// Searches Wikipedia and returns the plain-text intro of the top result.
    /// Never fails: misses and transport errors degrade into prompt-visible
    /// sentences.
    pub async fn search(&self, query: &str) -> String {
        match self.try_search(query).await {
            Ok(Some(extract)) => extract,
            Ok(None) => NO_PAGE.to_string(),
            Err(e) => {
                warn!(error = %e, %query, "Wikipedia search failed");
                format!("An error occurred during Wikipedia search: {e}")
            }
        }
    }

    /// Strict search: title lookup, then intro extract for the top title.
    async fn try_search(&self, query: &str) -> Result<Option<String>, ToolError> {
        debug!(%query, "GET {} (list=search)", self.base);
        let found: SearchResponse = self
            .http
            .get(&self.base)
            .query(&[
                ("action", "query"),
                ("list", "search"),
                ("srsearch", query),
                ("srlimit", "1"),
                ("format", "json"),
            ])
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        let Some(title) = top_title(&found) else {
            return Ok(None);
        };

        debug!(%title, "GET {} (prop=extracts)", self.base);
        let pages: ExtractResponse = self
            .http
            .get(&self.base)
            .query(&[
                ("action", "query"),
                ("prop", "extracts"),
                ("exintro", "1"),
                ("explaintext", "1"),
                ("redirects", "1"),
                ("titles", title),
                ("format", "json"),
            ])
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        Ok(Some(
            first_extract(&pages).unwrap_or_else(|| MISSING_PAGE.to_string()),
        ))
    }
}

impl Default for WikipediaSearch {
    fn default() -> Self {
        Self::new()
    }
}

fn top_title(resp: &SearchResponse) -> Option<&str> {
    resp.query
        .search
        .first()
        .map(|hit| hit.title.as_str())
        .filter(|t| !t.is_empty())
}

fn first_extract(resp: &ExtractResponse) -> Option<String> {
    resp.query
        .pages
        .values()
        .find_map(|p| p.extract.as_deref())
        .map(|e| e.trim().to_string())
        .filter(|e| !e.is_empty())
}

/* ------------------------- wire payloads ------------------------- */

#[derive(Debug, Deserialize)]
struct SearchResponse {
    query: SearchQuery,
}

#[derive(Debug, Deserialize)]
struct SearchQuery {
    #[serde(default)]
    search: Vec<SearchHit>,
}

#[derive(Debug, Deserialize)]
struct SearchHit {
    title: String,
}

#[derive(Debug, Deserialize)]
struct ExtractResponse {
    query: ExtractQuery,
}

#[derive(Debug, Deserialize)]
struct ExtractQuery {
    #[serde(default)]
    pages: HashMap<String, Page>,
}

#[derive(Debug, Deserialize)]
struct Page {
    #[serde(default)]
    extract: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn top_title_from_search_payload() {
        let resp: SearchResponse = serde_json::from_str(
            r#"{"query": {"search": [{"title": "Globular cluster", "pageid": 13068}]}}"#,
        )
        .unwrap();
        assert_eq!(top_title(&resp), Some("Globular cluster"));
    }

    #[test]
    fn empty_search_yields_no_title() {
        let resp: SearchResponse = serde_json::from_str(r#"{"query": {"search": []}}"#).unwrap();
        assert_eq!(top_title(&resp), None);
    }

    #[test]
    fn extract_is_pulled_from_pages_map() {
        let resp: ExtractResponse = serde_json::from_str(
            r#"{"query": {"pages": {"13068": {"title": "Globular cluster",
                "extract": "  A globular cluster is a spheroidal conglomeration of stars.  "}}}}"#,
        )
        .unwrap();
        assert_eq!(
            first_extract(&resp).unwrap(),
            "A globular cluster is a spheroidal conglomeration of stars."
        );
    }

    #[test]
    fn missing_extract_yields_none() {
        let resp: ExtractResponse =
            serde_json::from_str(r#"{"query": {"pages": {"-1": {"missing": ""}}}}"#).unwrap();
        assert_eq!(first_extract(&resp), None);
    }

    #[tokio::test]
    async fn transport_failure_degrades_into_error_sentence() {
        let tool = WikipediaSearch::with_base("http://127.0.0.1:9");
        let out = tool.search("nebula").await;
        assert!(out.starts_with("An error occurred during Wikipedia search:"));
    }
}

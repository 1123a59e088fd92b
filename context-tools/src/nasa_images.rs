//! NASA Image and Video Library search returning direct image URLs.

use std::time::Duration;

use serde::Deserialize;
use tracing::{debug, warn};

use crate::error::ToolError;

const NASA_API_URL: &str = "https://images-api.nasa.gov/search";

/// Fixed request timeout; a slow image search must degrade, not hang the
/// request it feeds.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

const NO_IMAGES: &str = "No images found for this query.";

/// Client for the NASA image library search API.
pub struct NasaImageSearch {
    http: reqwest::Client,
    base: String,
}

impl NasaImageSearch {
    /// # Errors
    /// Returns [`ToolError::Http`] if the HTTP client cannot be built.
    pub fn new() -> Result<Self, ToolError> {
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;
        Ok(Self {
            http,
            base: NASA_API_URL.to_string(),
        })
    }

    /// Override the API base, mainly for tests.
    pub fn with_base(base: impl Into<String>) -> Result<Self, ToolError> {
        let mut tool = Self::new()?;
        tool.base = base.into();
        Ok(tool)
    }

    /// Searches for up to `count` image URLs. Never fails and never returns an
    /// empty list: a miss or failure becomes a one-element list carrying a
    /// prompt-visible message.
    pub async fn search(&self, query: &str, count: usize) -> Vec<String> {
        match self.try_search(query, count).await {
            Ok(urls) if !urls.is_empty() => urls,
            Ok(_) => vec![NO_IMAGES.to_string()],
            Err(e) => {
                warn!(error = %e, %query, "NASA image search failed");
                vec![format!("An error occurred while searching for images: {e}")]
            }
        }
    }

    /// Strict search returning the raw URL list (possibly empty).
    async fn try_search(&self, query: &str, count: usize) -> Result<Vec<String>, ToolError> {
        debug!(%query, count, "GET {}", self.base);
        let resp: SearchResponse = self
            .http
            .get(&self.base)
            .query(&[("q", query), ("media_type", "image")])
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        Ok(extract_image_urls(&resp, count))
    }
}

/// Takes the first link of each of the first `count` items.
fn extract_image_urls(resp: &SearchResponse, count: usize) -> Vec<String> {
    resp.collection
        .items
        .iter()
        .take(count)
        .filter_map(|item| item.links.first())
        .map(|link| link.href.clone())
        .collect()
}

/* ------------------------- wire payloads ------------------------- */

#[derive(Debug, Deserialize)]
struct SearchResponse {
    collection: Collection,
}

#[derive(Debug, Deserialize)]
struct Collection {
    #[serde(default)]
    items: Vec<Item>,
}

#[derive(Debug, Deserialize)]
struct Item {
    #[serde(default)]
    links: Vec<Link>,
}

#[derive(Debug, Deserialize)]
struct Link {
    href: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAYLOAD: &str = r#"{
        "collection": {
            "items": [
                {"links": [{"href": "https://images-assets.nasa.gov/image/a/a~thumb.jpg"}]},
                {"links": []},
                {"links": [{"href": "https://images-assets.nasa.gov/image/b/b~thumb.jpg"},
                           {"href": "https://images-assets.nasa.gov/image/b/b~orig.jpg"}]},
                {"links": [{"href": "https://images-assets.nasa.gov/image/c/c~thumb.jpg"}]}
            ]
        }
    }"#;

    #[test]
    fn first_link_of_each_item_up_to_count() {
        let resp: SearchResponse = serde_json::from_str(PAYLOAD).unwrap();
        let urls = extract_image_urls(&resp, 3);
        assert_eq!(
            urls,
            vec![
                "https://images-assets.nasa.gov/image/a/a~thumb.jpg",
                "https://images-assets.nasa.gov/image/b/b~thumb.jpg",
            ]
        );
    }

    #[test]
    fn empty_collection_yields_no_urls() {
        let resp: SearchResponse =
            serde_json::from_str(r#"{"collection": {"items": []}}"#).unwrap();
        assert!(extract_image_urls(&resp, 3).is_empty());
    }

    #[tokio::test]
    async fn transport_failure_yields_one_element_error_list() {
        let tool = NasaImageSearch::with_base("http://127.0.0.1:9").unwrap();
        let urls = tool.search("crab nebula", 3).await;
        assert_eq!(urls.len(), 1);
        assert!(urls[0].starts_with("An error occurred while searching for images:"));
    }
}

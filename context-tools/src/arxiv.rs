//! arXiv paper search returning a one-paper summary for prompt context.

use scraper::{Html, Selector};
use tracing::{debug, warn};

use crate::error::ToolError;

const ARXIV_API_URL: &str = "http://export.arxiv.org/api/query";

const NO_PAPERS: &str = "No relevant papers found on arXiv for the query.";
const SEARCH_FAILED: &str =
    "Sorry, I encountered an error while searching for scientific papers.";

/// Client for the arXiv Atom query API.
pub struct ArxivSearch {
    http: reqwest::Client,
    base: String,
}

impl ArxivSearch {
    pub fn new() -> Self {
        Self {
            http: reqwest::Client::new(),
            base: ARXIV_API_URL.to_string(),
        }
    }

    /// Override the API base, mainly for tests.
    pub fn with_base(base: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base: base.into(),
        }
    }

    /// Searches arXiv and returns a formatted summary of the most relevant
    /// paper. Never fails: lookup misses and transport errors degrade into
    /// fixed prompt-visible sentences.
    pub async fn search(&self, query: &str) -> String {
        match self.try_search(query).await {
            Ok(Some(summary)) => summary,
            Ok(None) => NO_PAPERS.to_string(),
            Err(e) => {
                warn!(error = %e, %query, "arXiv search failed");
                SEARCH_FAILED.to_string()
            }
        }
    }

    /// Strict search: fetches the Atom feed and extracts the first entry.
    async fn try_search(&self, query: &str) -> Result<Option<String>, ToolError> {
        debug!(%query, "GET {}", self.base);
        let search_query = format!("all:{query}");
        let resp = self
            .http
            .get(&self.base)
            .query(&[
                ("search_query", search_query.as_str()),
                ("max_results", "1"),
                ("sortBy", "relevance"),
            ])
            .send()
            .await?
            .error_for_status()?;

        let feed = resp.text().await?;
        Ok(summarize_first_entry(&feed))
    }
}

impl Default for ArxivSearch {
    fn default() -> Self {
        Self::new()
    }
}

/// Extracts the first `<entry>` of an arXiv Atom feed into the fixed
/// "ARXIV PAPER FOUND" block, or `None` when the feed has no entries.
fn summarize_first_entry(feed: &str) -> Option<String> {
    let doc = Html::parse_document(feed);

    // Static selectors; parse() only fails on malformed selector syntax.
    let entry_sel = Selector::parse("entry").ok()?;
    let title_sel = Selector::parse("title").ok()?;
    let name_sel = Selector::parse("author > name").ok()?;
    let id_sel = Selector::parse("id").ok()?;
    let summary_sel = Selector::parse("summary").ok()?;

    let entry = doc.select(&entry_sel).next()?;

    let text_of = |sel: &Selector| {
        entry
            .select(sel)
            .next()
            .map(|el| collapse_whitespace(&el.text().collect::<String>()))
    };

    let title = text_of(&title_sel)?;
    let url = text_of(&id_sel).unwrap_or_default();
    let summary = text_of(&summary_sel).unwrap_or_default();
    let authors = entry
        .select(&name_sel)
        .map(|el| collapse_whitespace(&el.text().collect::<String>()))
        .collect::<Vec<_>>()
        .join(", ");

    Some(format!(
        "ARXIV PAPER FOUND:\nTitle: {title}\nAuthors: {authors}\nURL: {url}\nSummary: {summary}"
    ))
}

fn collapse_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    const FEED: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<feed xmlns="http://www.w3.org/2005/Atom">
  <title>ArXiv Query: search_query=all:betelgeuse</title>
  <entry>
    <id>http://arxiv.org/abs/2101.00001v1</id>
    <title>The Great Dimming of
      Betelgeuse</title>
    <summary>We analyse photometric observations of the
      red supergiant Betelgeuse.</summary>
    <author><name>A. Observer</name></author>
    <author><name>B. Theorist</name></author>
  </entry>
</feed>"#;

    #[test]
    fn first_entry_is_summarized() {
        let out = summarize_first_entry(FEED).unwrap();
        assert!(out.starts_with("ARXIV PAPER FOUND:"));
        assert!(out.contains("Title: The Great Dimming of Betelgeuse"));
        assert!(out.contains("Authors: A. Observer, B. Theorist"));
        assert!(out.contains("URL: http://arxiv.org/abs/2101.00001v1"));
        assert!(out.contains("Summary: We analyse photometric observations"));
    }

    #[test]
    fn feed_without_entries_yields_none() {
        let empty = r#"<feed xmlns="http://www.w3.org/2005/Atom"><title>empty</title></feed>"#;
        assert!(summarize_first_entry(empty).is_none());
    }

    #[tokio::test]
    async fn transport_failure_degrades_into_fixed_sentence() {
        // Nothing listens on this port; the request fails immediately.
        let tool = ArxivSearch::with_base("http://127.0.0.1:9");
        let out = tool.search("quasar jets").await;
        assert_eq!(out, SEARCH_FAILED);
    }
}

//! Web content fetching — GET a page and pull out its paragraph text.
//!
//! Grounding content is optional context, not a correctness requirement,
//! so this module never surfaces an error: every failure mode degrades to
//! `NO_CONTENT_FALLBACK`.

use std::time::Duration;

use scraper::{Html, Selector};
use tracing::debug;

use crate::sanitize::clean_text;

/// Stand-in grounding string for every failure mode.
pub const NO_CONTENT_FALLBACK: &str = "No relevant content found.";

pub(crate) const BROWSER_USER_AGENT: &str =
    "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 \
    (KHTML, like Gecko) Chrome/131.0.0.0 Safari/537.36";

/// Maximum raw bytes parsed from a fetched page.
const MAX_DOWNLOAD_BYTES: usize = 256_000;

/// HTTP timeout for page fetches.
pub(crate) const FETCH_TIMEOUT: Duration = Duration::from_secs(15);

/// Fetches arbitrary HTTP+HTML sources and extracts readable paragraph text.
#[derive(Clone)]
pub struct WebScraper {
    client: reqwest::Client,
}

impl WebScraper {
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::builder()
                .timeout(FETCH_TIMEOUT)
                .user_agent(BROWSER_USER_AGENT)
                .build()
                .expect("Failed to build HTTP client"),
        }
    }

    /// GETs `url` and returns the sanitized text of its `<p>` elements.
    /// Never raises: network errors, non-2xx statuses, unparseable bodies
    /// and paragraph-free pages all return `NO_CONTENT_FALLBACK`.
    pub async fn fetch_page_text(&self, url: &str) -> String {
        match self.try_fetch(url).await {
            Some(text) if !text.is_empty() => text,
            _ => {
                debug!("No extractable content from {url}");
                NO_CONTENT_FALLBACK.to_string()
            }
        }
    }

    async fn try_fetch(&self, url: &str) -> Option<String> {
        let response = self.client.get(url).send().await.ok()?;
        if !response.status().is_success() {
            return None;
        }

        let mut body = response.text().await.ok()?;
        if body.len() > MAX_DOWNLOAD_BYTES {
            let mut end = MAX_DOWNLOAD_BYTES;
            while !body.is_char_boundary(end) {
                end -= 1;
            }
            body.truncate(end);
        }

        Some(extract_paragraph_text(&body))
    }
}

impl Default for WebScraper {
    fn default() -> Self {
        Self::new()
    }
}

/// Joins the text of every `<p>` element and sanitizes the result.
fn extract_paragraph_text(html: &str) -> String {
    let doc = Html::parse_document(html);
    let paragraph = Selector::parse("p").unwrap();

    let joined = doc
        .select(&paragraph)
        .map(|p| p.text().collect::<String>())
        .collect::<Vec<_>>()
        .join("\n");

    clean_text(&joined)
}

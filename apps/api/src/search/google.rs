//! Google search agent — scrapes the results page for organic links,
//! fetches the top pages, and synthesizes findings.

use async_trait::async_trait;
use percent_encoding::percent_decode_str;
use scraper::{Html, Selector};
use tracing::warn;

use crate::errors::AppError;
use crate::llm_client::LlmClient;
use crate::scrape::WebScraper;
use crate::search::{
    gather_and_synthesize, search_http_client, SearchAgent, MAX_RESULT_LINKS,
};

const GOOGLE_SEARCH_ENDPOINT: &str = "https://www.google.com/search";

pub struct GoogleSearchAgent {
    llm: LlmClient,
    scraper: WebScraper,
    client: reqwest::Client,
}

impl GoogleSearchAgent {
    pub fn new(llm: LlmClient, scraper: WebScraper) -> Self {
        Self {
            llm,
            scraper,
            client: search_http_client(),
        }
    }

    /// Fetches the results page for a query. Best-effort, like the
    /// DuckDuckGo agent: failures degrade to an empty link list.
    async fn result_links(&self, query: &str) -> Vec<String> {
        let response = self
            .client
            .get(GOOGLE_SEARCH_ENDPOINT)
            .query(&[("q", query), ("num", "10")])
            .header("Accept", "text/html")
            .send()
            .await;

        let body = match response {
            Ok(r) if r.status().is_success() => match r.text().await {
                Ok(b) => b,
                Err(e) => {
                    warn!("Google response body unreadable: {e}");
                    return Vec::new();
                }
            },
            Ok(r) => {
                warn!("Google search returned {}", r.status());
                return Vec::new();
            }
            Err(e) => {
                warn!("Google search failed: {e}");
                return Vec::new();
            }
        };

        parse_result_links(&body, MAX_RESULT_LINKS)
    }
}

#[async_trait]
impl SearchAgent for GoogleSearchAgent {
    async fn search(&self, topic: &str) -> Result<String, AppError> {
        let links = self.result_links(topic).await;
        if links.is_empty() {
            warn!("Google produced no result links for '{topic}'");
        }
        gather_and_synthesize(&self.llm, &self.scraper, topic, &links).await
    }
}

/// Google links organic results through `/url?q=<encoded>&...` anchors;
/// collect and decode those, skipping Google-internal targets.
fn parse_result_links(body: &str, max: usize) -> Vec<String> {
    let doc = Html::parse_document(body);
    let anchor = Selector::parse("a[href]").unwrap();

    let mut urls = Vec::new();
    for el in doc.select(&anchor) {
        let href = el.value().attr("href").unwrap_or_default();
        let Some(rest) = href.strip_prefix("/url?q=") else {
            continue;
        };
        let end = rest.find('&').unwrap_or(rest.len());
        let url = percent_decode_str(&rest[..end])
            .decode_utf8_lossy()
            .into_owned();

        if url.starts_with("http") && !url.contains("google.com") && !urls.contains(&url) {
            urls.push(url);
        }
        if urls.len() >= max {
            break;
        }
    }
    urls
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_result_links_decodes_url_param() {
        let body = r#"<html><body>
            <a href="/url?q=https://example.com/page&sa=U&ved=abc">Result</a>
            <a href="/url?q=https%3A%2F%2Fexample.org%2Fother&sa=U">Other</a>
        </body></html>"#;
        assert_eq!(
            parse_result_links(body, 5),
            vec!["https://example.com/page", "https://example.org/other"]
        );
    }

    #[test]
    fn test_parse_result_links_skips_internal_links() {
        let body = r#"
            <a href="/search?q=more">more</a>
            <a href="/url?q=https://maps.google.com/place&sa=U">maps</a>
            <a href="/url?q=https://example.com/real&sa=U">real</a>
            <a href="https://example.com/absolute">absolute anchors are not results</a>
        "#;
        assert_eq!(parse_result_links(body, 5), vec!["https://example.com/real"]);
    }

    #[test]
    fn test_parse_result_links_dedupes_and_caps() {
        let body = r#"
            <a href="/url?q=https://example.com/a&sa=U">a</a>
            <a href="/url?q=https://example.com/a&sa=U">a again</a>
            <a href="/url?q=https://example.com/b&sa=U">b</a>
            <a href="/url?q=https://example.com/c&sa=U">c</a>
        "#;
        assert_eq!(
            parse_result_links(body, 2),
            vec!["https://example.com/a", "https://example.com/b"]
        );
    }

    #[test]
    fn test_parse_result_links_empty_page() {
        assert!(parse_result_links("<html></html>", 3).is_empty());
    }
}

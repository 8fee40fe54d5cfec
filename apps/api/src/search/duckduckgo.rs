//! DuckDuckGo search agent — resolves result links from the HTML
//! endpoint, fetches the top pages, and synthesizes findings.

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

const DDG_HTML_ENDPOINT: &str = "https://html.duckduckgo.com/html/";

pub struct DuckDuckGoAgent {
    llm: LlmClient,
    scraper: WebScraper,
    client: reqwest::Client,
}

impl DuckDuckGoAgent {
    pub fn new(llm: LlmClient, scraper: WebScraper) -> Self {
        Self {
            llm,
            scraper,
            client: search_http_client(),
        }
    }

    /// Queries the DDG HTML endpoint for result URLs. Best-effort: any
    /// failure yields an empty list and the agent synthesizes without
    /// fetched pages.
    async fn result_links(&self, query: &str) -> Vec<String> {
        let response = self
            .client
            .post(DDG_HTML_ENDPOINT)
            .form(&[("q", query)])
            .header("Accept", "text/html")
            .send()
            .await;

        let body = match response {
            Ok(r) if r.status().is_success() => match r.text().await {
                Ok(b) => b,
                Err(e) => {
                    warn!("DuckDuckGo response body unreadable: {e}");
                    return Vec::new();
                }
            },
            Ok(r) => {
                warn!("DuckDuckGo search returned {}", r.status());
                return Vec::new();
            }
            Err(e) => {
                warn!("DuckDuckGo search failed: {e}");
                return Vec::new();
            }
        };

        parse_result_links(&body, MAX_RESULT_LINKS)
    }
}

#[async_trait]
impl SearchAgent for DuckDuckGoAgent {
    async fn search(&self, topic: &str) -> Result<String, AppError> {
        let links = self.result_links(topic).await;
        if links.is_empty() {
            warn!("DuckDuckGo produced no result links for '{topic}'");
        }
        gather_and_synthesize(&self.llm, &self.scraper, topic, &links).await
    }
}

/// Pulls result URLs out of the DDG results page.
fn parse_result_links(body: &str, max: usize) -> Vec<String> {
    let doc = Html::parse_document(body);
    let result = Selector::parse(".result").unwrap();
    let link = Selector::parse("a.result__a").unwrap();

    let mut urls = Vec::new();
    for entry in doc.select(&result) {
        if let Some(href) = entry
            .select(&link)
            .next()
            .and_then(|el| el.value().attr("href"))
        {
            let url = unwrap_redirect(href);
            if url.starts_with("http") && !urls.contains(&url) {
                urls.push(url);
            }
        }
        if urls.len() >= max {
            break;
        }
    }
    urls
}

/// DDG wraps result targets in redirect links (`uddg=<encoded>`); unwrap
/// and percent-decode the real URL.
fn unwrap_redirect(href: &str) -> String {
    if let Some(pos) = href.find("uddg=") {
        let start = pos + 5;
        let end = href[start..]
            .find('&')
            .map(|i| start + i)
            .unwrap_or(href.len());
        let encoded = &href[start..end];
        if !encoded.is_empty() {
            return percent_decode_str(encoded).decode_utf8_lossy().into_owned();
        }
    }
    href.to_string()
}

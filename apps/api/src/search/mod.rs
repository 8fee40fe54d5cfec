// Search agents — each pairs a web search backend with the search
// completion model. All LLM calls go through llm_client.

pub mod duckduckgo;
pub mod google;

use std::sync::Arc;

use async_trait::async_trait;

use crate::errors::AppError;
use crate::llm_client::{LlmClient, SEARCH_MODEL};
use crate::models::SearchBackend;
use crate::scrape::{WebScraper, BROWSER_USER_AGENT, FETCH_TIMEOUT, NO_CONTENT_FALLBACK};

/// A search-capable completion agent: takes a topic query and returns
/// synthesized textual findings.
///
/// Carried in `AppState` as `Arc<dyn SearchAgent>` so handlers and tests
/// can swap implementations without touching the pipeline.
#[async_trait]
pub trait SearchAgent: Send + Sync {
    async fn search(&self, topic: &str) -> Result<String, AppError>;
}

/// The injected search backends, one per recognized `search_tool` value.
#[derive(Clone)]
pub struct SearchAgents {
    pub duckduckgo: Arc<dyn SearchAgent>,
    pub googlesearch: Arc<dyn SearchAgent>,
}

impl SearchAgents {
    /// Dispatches to the agent for a validated backend. Unknown tool
    /// strings never reach this point — they are rejected at validation.
    pub fn select(&self, backend: SearchBackend) -> &dyn SearchAgent {
        match backend {
            SearchBackend::DuckDuckGo => self.duckduckgo.as_ref(),
            SearchBackend::GoogleSearch => self.googlesearch.as_ref(),
        }
    }
}

/// How many result links an agent follows per query.
pub(crate) const MAX_RESULT_LINKS: usize = 3;

/// Per-page character budget fed into the synthesis prompt.
const MAX_PAGE_CHARS: usize = 4_000;

/// System prompt for the synthesis call.
const SYNTHESIS_SYSTEM: &str = "You are a web research assistant. \
    Summarize current, factual information about a topic in plain prose. \
    Be concrete: facts, figures, recent developments, notable perspectives.";

/// Synthesis prompt template. Replace `{topic}` and `{results}` before sending.
const SYNTHESIS_PROMPT_TEMPLATE: &str = r#"Summarize the most relevant and current information about the topic below, drawing on the fetched search results. If no usable search results are listed, rely on your own knowledge of the topic. Keep the summary under 500 words.

Topic: {topic}

Search results:
{results}"#;

/// Shared tail of both agents: fetch the result pages, then ask the
/// search model to synthesize findings for the topic.
///
/// Page fetching is best-effort — unreachable pages are skipped and an
/// empty page set still produces a synthesis call. A failing model call
/// propagates.
pub(crate) async fn gather_and_synthesize(
    llm: &LlmClient,
    scraper: &WebScraper,
    topic: &str,
    urls: &[String],
) -> Result<String, AppError> {
    let mut sections = Vec::new();
    for url in urls {
        let text = scraper.fetch_page_text(url).await;
        if text != NO_CONTENT_FALLBACK {
            sections.push(format!(
                "Source: {url}\n{}",
                truncate_chars(&text, MAX_PAGE_CHARS)
            ));
        }
    }

    let prompt = synthesis_prompt(topic, &sections);
    let response = llm
        .chat(SEARCH_MODEL, SYNTHESIS_SYSTEM, &prompt)
        .await
        .map_err(|e| AppError::Llm(format!("Search synthesis failed: {e}")))?;

    Ok(response.text().unwrap_or_default().trim().to_string())
}

/// Builds the synthesis prompt from the fetched page sections. Pure.
fn synthesis_prompt(topic: &str, sections: &[String]) -> String {
    let results = if sections.is_empty() {
        "No result pages could be retrieved.".to_string()
    } else {
        sections.join("\n\n---\n\n")
    };

    SYNTHESIS_PROMPT_TEMPLATE
        .replace("{topic}", topic)
        .replace("{results}", &results)
}

/// HTTP client for search-results pages, sharing the scraper's browser
/// identity and timeout.
pub(crate) fn search_http_client() -> reqwest::Client {
    reqwest::Client::builder()
        .timeout(FETCH_TIMEOUT)
        .user_agent(BROWSER_USER_AGENT)
        .build()
        .expect("Failed to build HTTP client")
}

/// Truncates to a char budget without splitting a code point.
fn truncate_chars(s: &str, max: usize) -> &str {
    if s.len() <= max {
        return s;
    }
    let mut end = max;
    while !s.is_char_boundary(end) {
        end -= 1;
    }
    &s[..end]
}

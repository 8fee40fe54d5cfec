//! Script generation — the request pipeline.
//!
//! Flow: search agent (selected by `search_tool`) → grounding cleanup →
//!       prompt composition → generation model → placeholder substitution.
//!
//! The pipeline is strictly sequential and fails as a whole: there are no
//! retries and no partial results.

use tracing::info;

use crate::errors::AppError;
use crate::generation::prompts::{compose_prompt, GENERATION_SYSTEM};
use crate::llm_client::{LlmClient, GENERATION_MODEL};
use crate::models::ScriptJob;
use crate::sanitize::clean_text;
use crate::scrape::NO_CONTENT_FALLBACK;
use crate::search::SearchAgents;

/// Substituted when the generation model returns no content.
pub const EMPTY_SCRIPT_PLACEHOLDER: &str = "No script generated. Please try again.";

/// Runs the full generation pipeline for a validated job.
///
/// Steps:
/// 1. Search via the agent selected by `search_tool`.
/// 2. Sanitize the agent output, or fall back when it produced nothing.
/// 3. Compose the format-specific prompt.
/// 4. Single generation call; empty model output becomes the placeholder.
pub async fn generate_script(
    agents: &SearchAgents,
    llm: &LlmClient,
    job: &ScriptJob,
) -> Result<String, AppError> {
    info!(
        "Generating {:?} script for '{}' ({:?} tone, via {:?})",
        job.format, job.topic, job.tone, job.search_tool
    );

    let agent = agents.select(job.search_tool);
    let web_content = agent.search(&job.topic).await?;
    let grounding = grounding_or_fallback(&web_content);

    let prompt = compose_prompt(job.format, &job.topic, job.duration, &grounding);

    let response = llm
        .chat(GENERATION_MODEL, GENERATION_SYSTEM, &prompt)
        .await
        .map_err(|e| AppError::Llm(format!("Script generation failed: {e}")))?;

    Ok(script_or_placeholder(response.text()))
}

/// Sanitizes agent output into grounding content. Grounding is never
/// empty: content that cleans down to nothing becomes the fallback string.
fn grounding_or_fallback(web_content: &str) -> String {
    let cleaned = clean_text(web_content);
    if cleaned.is_empty() {
        NO_CONTENT_FALLBACK.to_string()
    } else {
        cleaned
    }
}

/// Trims model output, substituting the fixed placeholder for empty
/// content so callers never see an empty script.
fn script_or_placeholder(text: Option<&str>) -> String {
    match text.map(str::trim) {
        Some(t) if !t.is_empty() => t.to_string(),
        _ => EMPTY_SCRIPT_PLACEHOLDER.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    use async_trait::async_trait;

    use super::*;
    use crate::models::SearchBackend;
    use crate::search::SearchAgent;

    struct StubAgent {
        calls: Arc<AtomicUsize>,
        reply: &'static str,
    }

    #[async_trait]
    impl SearchAgent for StubAgent {
        async fn search(&self, _topic: &str) -> Result<String, AppError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(self.reply.to_string())
        }
    }

    fn stub_agents() -> (SearchAgents, Arc<AtomicUsize>, Arc<AtomicUsize>) {
        let ddg_calls = Arc::new(AtomicUsize::new(0));
        let google_calls = Arc::new(AtomicUsize::new(0));
        let agents = SearchAgents {
            duckduckgo: Arc::new(StubAgent {
                calls: ddg_calls.clone(),
                reply: "ddg findings",
            }),
            googlesearch: Arc::new(StubAgent {
                calls: google_calls.clone(),
                reply: "google findings",
            }),
        };
        (agents, ddg_calls, google_calls)
    }

    #[tokio::test]
    async fn test_select_dispatches_to_duckduckgo() {
        let (agents, ddg_calls, google_calls) = stub_agents();
        let reply = agents
            .select(SearchBackend::DuckDuckGo)
            .search("AI")
            .await
            .unwrap();
        assert_eq!(reply, "ddg findings");
        assert_eq!(ddg_calls.load(Ordering::SeqCst), 1);
        assert_eq!(google_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_select_dispatches_to_google() {
        let (agents, ddg_calls, google_calls) = stub_agents();
        let reply = agents
            .select(SearchBackend::GoogleSearch)
            .search("AI")
            .await
            .unwrap();
        assert_eq!(reply, "google findings");
        assert_eq!(ddg_calls.load(Ordering::SeqCst), 0);
        assert_eq!(google_calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_grounding_falls_back_when_empty() {
        assert_eq!(grounding_or_fallback(""), NO_CONTENT_FALLBACK);
        assert_eq!(grounding_or_fallback("   \n\t "), NO_CONTENT_FALLBACK);
        // Nothing survives sanitization.
        assert_eq!(grounding_or_fallback("日本語"), NO_CONTENT_FALLBACK);
    }

    #[test]
    fn test_grounding_is_sanitized() {
        assert_eq!(
            grounding_or_fallback("  recent\u{a0}AI   news  "),
            "recent AI news"
        );
    }

    #[test]
    fn test_script_placeholder_for_empty_output() {
        assert_eq!(script_or_placeholder(None), EMPTY_SCRIPT_PLACEHOLDER);
        assert_eq!(script_or_placeholder(Some("")), EMPTY_SCRIPT_PLACEHOLDER);
        assert_eq!(script_or_placeholder(Some("  \n ")), EMPTY_SCRIPT_PLACEHOLDER);
    }

    #[test]
    fn test_script_output_is_trimmed() {
        assert_eq!(script_or_placeholder(Some("\n  A script.  ")), "A script.");
    }
}

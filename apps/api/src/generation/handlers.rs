//! Axum route handlers for the Script Generation API.

use axum::{extract::State, Json};
use serde::Serialize;

use crate::errors::AppError;
use crate::generation::generator::generate_script;
use crate::models::ScriptRequest;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct ScriptResponse {
    pub script: String,
}

/// POST /api/v1/scripts/generate
///
/// Validates the payload, runs the search → compose → generate pipeline,
/// and returns the finished script. The call fails as a whole — no
/// partial results.
pub async fn handle_generate_script(
    State(state): State<AppState>,
    Json(request): Json<ScriptRequest>,
) -> Result<Json<ScriptResponse>, AppError> {
    let job = request.validate()?;
    let script = generate_script(&state.search_agents, &state.generation_llm, &job).await?;

    Ok(Json(ScriptResponse { script }))
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    use async_trait::async_trait;

    use super::*;
    use crate::llm_client::LlmClient;
    use crate::search::{SearchAgent, SearchAgents};

    /// Search agent double that counts invocations.
    struct CountingAgent {
        calls: Arc<AtomicUsize>,
    }

    #[async_trait]
    impl SearchAgent for CountingAgent {
        async fn search(&self, _topic: &str) -> Result<String, AppError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok("stub findings".to_string())
        }
    }

    fn test_state() -> (AppState, Arc<AtomicUsize>) {
        let calls = Arc::new(AtomicUsize::new(0));
        let state = AppState {
            generation_llm: LlmClient::huggingface("test-key".to_string()),
            search_agents: SearchAgents {
                duckduckgo: Arc::new(CountingAgent {
                    calls: calls.clone(),
                }),
                googlesearch: Arc::new(CountingAgent {
                    calls: calls.clone(),
                }),
            },
        };
        (state, calls)
    }

    fn request(topic: &str, format: &str, search_tool: &str) -> ScriptRequest {
        ScriptRequest {
            topic: topic.to_string(),
            tone: "formal".to_string(),
            format: format.to_string(),
            search_tool: search_tool.to_string(),
            duration: 5,
            temperature: None,
        }
    }

    #[tokio::test]
    async fn test_invalid_search_tool_rejected_before_any_outbound_call() {
        let (state, calls) = test_state();
        let result =
            handle_generate_script(State(state), Json(request("AI", "linkedin", "bing"))).await;

        match result {
            Err(AppError::Validation(msg)) => assert_eq!(msg, "Invalid search tool."),
            other => panic!("expected Validation error, got {other:?}"),
        }
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_invalid_format_rejected_before_any_outbound_call() {
        let (state, calls) = test_state();
        let result =
            handle_generate_script(State(state), Json(request("AI", "tiktok", "duckduckgo")))
                .await;

        match result {
            Err(AppError::Validation(msg)) => assert_eq!(msg, "Invalid format specified."),
            other => panic!("expected Validation error, got {other:?}"),
        }
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_empty_topic_rejected() {
        let (state, calls) = test_state();
        let result =
            handle_generate_script(State(state), Json(request("  ", "linkedin", "duckduckgo")))
                .await;

        assert!(matches!(result, Err(AppError::Validation(_))));
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    #[ignore] // network + API keys — run with `cargo test -- --ignored`
    async fn test_generate_youtube_desc_end_to_end() {
        use crate::config::Config;
        use crate::scrape::WebScraper;
        use crate::search::duckduckgo::DuckDuckGoAgent;
        use crate::search::google::GoogleSearchAgent;

        let config = Config::from_env().expect("GROQ_API_KEY and HF_API_KEY must be set");
        let scraper = WebScraper::new();
        let search_llm = LlmClient::groq(config.groq_api_key.clone());

        let state = AppState {
            generation_llm: LlmClient::huggingface(config.hf_api_key.clone()),
            search_agents: SearchAgents {
                duckduckgo: Arc::new(DuckDuckGoAgent::new(search_llm.clone(), scraper.clone())),
                googlesearch: Arc::new(GoogleSearchAgent::new(search_llm, scraper)),
            },
        };

        let response = handle_generate_script(
            State(state),
            Json(request("AI in Healthcare", "youtube_desc", "duckduckgo")),
        )
        .await
        .expect("pipeline should succeed");

        assert!(!response.0.script.is_empty());
        assert!(!response.0.script.contains("<p>"));
    }
}

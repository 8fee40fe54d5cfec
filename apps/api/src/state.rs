use crate::llm_client::LlmClient;
use crate::search::SearchAgents;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Client for the hosted generation model. Search agents carry their own.
    pub generation_llm: LlmClient,
    /// Pluggable search backends, selected per request by `search_tool`.
    pub search_agents: SearchAgents,
}

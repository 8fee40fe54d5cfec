mod config;
mod errors;
mod generation;
mod llm_client;
mod models;
mod routes;
mod sanitize;
mod scrape;
mod search;
mod state;

use anyhow::Result;
use axum::http::HeaderValue;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::llm_client::LlmClient;
use crate::routes::build_router;
use crate::scrape::WebScraper;
use crate::search::duckduckgo::DuckDuckGoAgent;
use crate::search::google::GoogleSearchAgent;
use crate::search::SearchAgents;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Scriptsmith API v{}", env!("CARGO_PKG_VERSION"));

    // Search agents synthesize through Groq; final generation goes through
    // the Hugging Face router.
    let search_llm = LlmClient::groq(config.groq_api_key.clone());
    let generation_llm = LlmClient::huggingface(config.hf_api_key.clone());
    info!(
        "LLM clients initialized (search model: {}, generation model: {})",
        llm_client::SEARCH_MODEL,
        llm_client::GENERATION_MODEL
    );

    let scraper = WebScraper::new();

    let search_agents = SearchAgents {
        duckduckgo: Arc::new(DuckDuckGoAgent::new(search_llm.clone(), scraper.clone())),
        googlesearch: Arc::new(GoogleSearchAgent::new(search_llm, scraper)),
    };

    // Build app state
    let state = AppState {
        generation_llm,
        search_agents,
    };

    // Cross-origin access for the form client: one configured origin,
    // all methods and headers.
    let cors = CorsLayer::new()
        .allow_origin(config.client_origin.parse::<HeaderValue>()?)
        .allow_methods(Any)
        .allow_headers(Any);
    info!("CORS origin: {}", config.client_origin);

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(cors);

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

mod assessment;
mod config;
mod errors;
mod fallback;
mod llm_client;
mod models;
mod routes;
mod session;
mod state;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::assessment::{AssessmentService, AssessmentSettings};
use crate::config::Config;
use crate::llm_client::{GeminiClient, GenerationSettings, ModelGateway};
use crate::routes::build_router;
use crate::session::store::{spawn_sweeper, SessionStore};
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing or malformed env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Compass API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize LLM client and the retrying gateway in front of it
    let gemini = GeminiClient::new(
        config.gemini_api_key.clone(),
        config.gemini_base_url.clone(),
        GenerationSettings {
            model: config.gemini_model.clone(),
            temperature: config.temperature,
            top_k: config.top_k,
            top_p: config.top_p,
        },
    )?;
    info!("LLM client initialized (model: {})", gemini.model());
    let gateway = ModelGateway::new(Arc::new(gemini), config.llm_max_retries);

    let service = AssessmentService::new(gateway, AssessmentSettings::from_config(&config));

    // In-memory sessions; idle ones are dropped in the background
    let sessions = SessionStore::new();
    spawn_sweeper(sessions.clone(), config.session_idle_timeout());
    info!(
        "Session sweeper started (idle timeout: {}s)",
        config.session_idle_timeout_secs
    );

    let state = AppState { service, sessions };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: restrict origins once the quiz UI has a fixed host

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

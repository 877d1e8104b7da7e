mod config;
mod errors;
mod intelligence;
mod llm_client;
mod routes;
mod state;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::intelligence::policy::PolicyRegistry;
use crate::llm_client::LlmClient;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!(
                "{}={}",
                env!("CARGO_PKG_NAME").replace('-', "_"),
                &config.rust_log
            ))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Insight API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize LLM client
    let gateway = Arc::new(LlmClient::new(
        config.anthropic_api_key.clone(),
        config.gateway_timeout(),
    ));
    info!(
        "LLM client initialized (timeout: {}s)",
        config.gateway_timeout_secs
    );

    let policies = Arc::new(PolicyRegistry::builtin());
    for policy in policies.iter() {
        info!(
            domain = %policy.domain,
            model = policy.generation.tier.model(),
            composites = policy.composites.len(),
            "policy loaded"
        );
    }

    // Build app state
    let state = AppState {
        gateway,
        policies,
        config: config.clone(),
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::intelligence::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Insight API
        .route("/api/v1/insights", get(handlers::handle_list_domains))
        .route(
            "/api/v1/insights/:domain",
            post(handlers::handle_generate_insight),
        )
        .with_state(state)
}

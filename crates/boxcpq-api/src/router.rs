use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::state::AppState;

/// Create the API router with all routes
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        // Health
        .route("/health", get(handlers::health_check))

        // Pricing
        .route("/api/v1/quotes/calculate", post(handlers::calculate_quote))
        .route("/api/v1/geometry", post(handlers::calculate_geometry))

        // Coefficients
        .route("/api/v1/constants", get(handlers::list_constants))
        .route("/api/v1/constants/invalidate", post(handlers::invalidate_constants))

        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

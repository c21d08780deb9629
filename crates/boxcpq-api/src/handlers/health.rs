use std::sync::Arc;

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};

use crate::dto::HealthResponse;
use crate::state::AppState;

pub async fn health_check(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let store = state.engine.store();
    let cached = store.is_cached();

    match store.health_check().await {
        Ok(()) => (StatusCode::OK, Json(HealthResponse::ok(cached))),
        Err(e) => {
            tracing::warn!(error = %e, source = %store.source_description(), "Coefficient source unreachable");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(HealthResponse::degraded(cached, e.to_string())),
            )
        }
    }
}

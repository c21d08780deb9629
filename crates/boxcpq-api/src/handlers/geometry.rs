use std::sync::Arc;

use axum::{extract::State, Json};

use crate::dto::{GeometryRequest, GeometryResponse};
use crate::error::ApiError;
use crate::state::AppState;

pub async fn calculate_geometry(
    State(state): State<Arc<AppState>>,
    Json(request): Json<GeometryRequest>,
) -> Result<Json<GeometryResponse>, ApiError> {
    let geometry = state
        .engine
        .geometry(&request.dimensions(), request.lid_style)
        .await?;

    let sheets_needed = request.quantity.and_then(|q| geometry.sheets_needed(q));
    Ok(Json(GeometryResponse {
        geometry,
        sheets_needed,
    }))
}

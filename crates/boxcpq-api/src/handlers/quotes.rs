use std::sync::Arc;

use axum::{extract::State, Json};

use crate::dto::{QuoteRequest, QuoteResponse};
use crate::error::ApiError;
use crate::state::AppState;

pub async fn calculate_quote(
    State(state): State<Arc<AppState>>,
    Json(request): Json<QuoteRequest>,
) -> Result<Json<QuoteResponse>, ApiError> {
    let spec = request.to_spec();
    tracing::info!(
        lid_style = %spec.lid_style,
        material = %spec.material,
        quantity = spec.quantity,
        "Calculating quote"
    );

    let breakdown = state
        .engine
        .calculate_box_cost(&spec, &request.options)
        .await?;

    Ok(Json(QuoteResponse::from(breakdown)))
}

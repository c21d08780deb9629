use std::sync::Arc;

use axum::{extract::State, Json};

use crate::dto::{ConstantsResponse, InvalidateResponse};
use crate::error::ApiError;
use crate::state::AppState;

pub async fn list_constants(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ConstantsResponse>, ApiError> {
    let store = state.engine.store();
    let snapshot = store.snapshot().await.map_err(|e| {
        tracing::error!(error = %e, "Failed to fetch coefficient tables");
        ApiError::from(e)
    })?;

    // Listing still works when the throughput constant is missing
    let allocation = snapshot.fixed_cost_allocation().ok();

    Ok(Json(ConstantsResponse {
        source: store.source_description(),
        constants: snapshot
            .coefficients
            .iter()
            .map(|(name, value)| (name.to_string(), value))
            .collect(),
        fixed_costs: snapshot.fixed_costs.clone(),
        total_fixed_cost: allocation.map(|a| a.total_fixed_cost),
        units_per_month: allocation.map(|a| a.units_per_month),
        fixed_cost_per_unit: allocation.and_then(|a| a.per_unit().ok()),
    }))
}

pub async fn invalidate_constants(State(state): State<Arc<AppState>>) -> Json<InvalidateResponse> {
    let store = state.engine.store();
    let invalidated = store.is_cached();
    store.invalidate();

    Json(InvalidateResponse {
        invalidated,
        message: if invalidated {
            "Coefficient cache cleared; the next request refetches".to_string()
        } else {
            "Coefficient cache was already empty".to_string()
        },
    })
}

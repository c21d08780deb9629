use boxcpq_geometry::GeometryResult;
use boxcpq_pricing::{CostBreakdown, CostLine};
use serde::Serialize;
use std::collections::BTreeMap;

/// Quote response: the flat breakdown plus its non-zero lines
#[derive(Debug, Serialize)]
pub struct QuoteResponse {
    #[serde(flatten)]
    pub breakdown: CostBreakdown,
    pub lines: Vec<CostLine>,
}

impl From<CostBreakdown> for QuoteResponse {
    fn from(breakdown: CostBreakdown) -> Self {
        Self {
            lines: breakdown.charged_lines(),
            breakdown,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct GeometryResponse {
    #[serde(flatten)]
    pub geometry: GeometryResult,
    #[serde(rename = "chapas_necessarias", skip_serializing_if = "Option::is_none")]
    pub sheets_needed: Option<u32>,
}

/// Coefficient tables currently cached
#[derive(Debug, Serialize)]
pub struct ConstantsResponse {
    pub source: String,
    pub constants: BTreeMap<String, f64>,
    pub fixed_costs: BTreeMap<String, f64>,
    pub total_fixed_cost: Option<f64>,
    pub units_per_month: Option<f64>,
    pub fixed_cost_per_unit: Option<f64>,
}

#[derive(Debug, Serialize)]
pub struct InvalidateResponse {
    pub invalidated: bool,
    pub message: String,
}

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub service: &'static str,
    /// Whether coefficients have been fetched since start or the last invalidation
    pub coefficients_cached: bool,
    pub source_reachable: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_error: Option<String>,
}

impl HealthResponse {
    pub fn ok(coefficients_cached: bool) -> Self {
        Self {
            status: "ok",
            service: "boxcpq-api",
            coefficients_cached,
            source_reachable: true,
            source_error: None,
        }
    }

    pub fn degraded(coefficients_cached: bool, error: String) -> Self {
        Self {
            status: "degraded",
            service: "boxcpq-api",
            coefficients_cached,
            source_reachable: false,
            source_error: Some(error),
        }
    }
}

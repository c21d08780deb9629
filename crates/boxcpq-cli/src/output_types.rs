use boxcpq_core::config::ConfigSource;
use boxcpq_core::models::{ComplexityPolicy, Dimensions};
use boxcpq_geometry::{GeometryResult, SheetLayout};
use boxcpq_pricing::{CostBreakdown, CostLine};
use serde::Serialize;
use std::collections::BTreeMap;

/// Output for quote command
#[derive(Debug, Serialize)]
pub struct QuoteOutput {
    pub dimensions: Dimensions,
    pub complexity: ComplexityPolicy,
    /// Non-zero lines only, in breakdown order
    pub lines: Vec<CostLine>,
    pub breakdown: CostBreakdown,
}

/// Output for geometry command
#[derive(Debug, Serialize)]
pub struct GeometryOutput {
    pub dimensions: Dimensions,
    pub sheet: SheetLayout,
    pub geometry: GeometryResult,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quantity: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sheets_needed: Option<u32>,
}

/// Output for constants command
#[derive(Debug, Serialize)]
pub struct ConstantsOutput {
    pub source: String,
    pub constants: BTreeMap<String, f64>,
    pub fixed_costs: BTreeMap<String, f64>,
    pub allocation: Option<AllocationInfo>,
}

#[derive(Debug, Serialize)]
pub struct AllocationInfo {
    pub total_fixed_cost: f64,
    pub units_per_month: f64,
    pub fixed_cost_per_unit: f64,
}

/// Output for a single coefficient lookup
#[derive(Debug, Serialize)]
pub struct CoefficientOutput {
    pub name: String,
    pub value: f64,
}

/// Output for config command
#[derive(Debug, Serialize)]
pub struct ConfigOutput {
    pub values: BTreeMap<String, ConfigEntry>,
}

#[derive(Debug, Serialize)]
pub struct ConfigEntry {
    pub value: String,
    pub source: ConfigSource,
}

use boxcpq_core::models::{BoxSpec, ComplexityPolicy, Dimensions, FinishingOptions, LidStyle};
use boxcpq_core::{CpqError, Result};
use boxcpq_geometry::{flatten_box, GeometryResult, SheetLayout};
use boxcpq_store::ConstantStore;
use std::sync::Arc;

use crate::decomposition::{decompose, validate_request};
use crate::models::CostBreakdown;

/// Quote engine over a shared constant store
#[derive(Clone)]
pub struct CostEngine {
    store: Arc<ConstantStore>,
    policy: ComplexityPolicy,
}

impl CostEngine {
    /// Create an engine that ignores cradle/niche complexity
    pub fn new(store: Arc<ConstantStore>) -> Self {
        Self {
            store,
            policy: ComplexityPolicy::default(),
        }
    }

    pub fn with_policy(mut self, policy: ComplexityPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn policy(&self) -> ComplexityPolicy {
        self.policy
    }

    pub fn store(&self) -> &Arc<ConstantStore> {
        &self.store
    }

    /// Calculate the itemized cost and price of a box.
    ///
    /// Every failure, whether from validation, geometry or the coefficient
    /// source, comes back as `CpqError::Calculation` carrying the cause.
    pub async fn calculate_box_cost(
        &self,
        spec: &BoxSpec,
        options: &FinishingOptions,
    ) -> Result<CostBreakdown> {
        let result = self.calculate(spec, options).await;

        match &result {
            Ok(breakdown) => tracing::info!(
                lid_style = %spec.lid_style,
                material = %spec.material,
                quantity = spec.quantity,
                unit_cost = breakdown.unit_cost,
                unit_price = breakdown.unit_price,
                total_price = breakdown.total_price,
                "Quote calculated"
            ),
            Err(e) => tracing::warn!(error = %e, "Quote calculation failed"),
        }

        result.map_err(CpqError::calculation)
    }

    /// Flatten a box with the sheet layout from the constant store
    pub async fn geometry(
        &self,
        dimensions: &Dimensions,
        lid_style: LidStyle,
    ) -> Result<GeometryResult> {
        dimensions.validate()?;
        let snapshot = self.store.snapshot().await?;
        let layout = SheetLayout::from_coefficients(&snapshot.coefficients)?;
        flatten_box(dimensions, lid_style, &layout)
    }

    async fn calculate(&self, spec: &BoxSpec, options: &FinishingOptions) -> Result<CostBreakdown> {
        validate_request(spec, options)?;

        let snapshot = self.store.snapshot().await?;
        let allocation = snapshot.fixed_cost_allocation()?;

        decompose(
            spec,
            options,
            &snapshot.coefficients,
            &allocation,
            self.policy,
        )
    }
}

use async_trait::async_trait;
use boxcpq_core::Result;
use std::collections::BTreeMap;

/// Port for the external tables that hold cost coefficients
#[async_trait]
pub trait CoefficientSource: Send + Sync {
    /// Fetch the named constants table (`name` -> `value`)
    ///
    /// An empty table is an error, never an empty mapping.
    async fn fetch_constants(&self) -> Result<BTreeMap<String, f64>>;

    /// Fetch the fixed-cost line items (`name` -> `amount`), names normalized
    async fn fetch_fixed_costs(&self) -> Result<BTreeMap<String, f64>>;

    /// Check that the source is reachable without fetching the tables
    async fn health_check(&self) -> Result<()> {
        Ok(())
    }

    /// Short description for logs and the CLI
    fn describe(&self) -> String;
}

//! Process-lifetime cache over a coefficient source

use boxcpq_core::models::{keys, CostCoefficients, FixedCostAllocation};
use boxcpq_core::Result;
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, PoisonError, RwLock};

use crate::ports::CoefficientSource;

/// Both coefficient tables as fetched together
#[derive(Debug, Clone, PartialEq)]
pub struct CoefficientSnapshot {
    pub coefficients: CostCoefficients,
    pub fixed_costs: BTreeMap<String, f64>,
}

impl CoefficientSnapshot {
    /// Fixed-cost allocation; requires the units-per-month constant
    pub fn fixed_cost_allocation(&self) -> Result<FixedCostAllocation> {
        let units_per_month = self.coefficients.get(keys::UNITS_PER_MONTH)?;
        FixedCostAllocation::from_line_items(&self.fixed_costs, units_per_month)
    }
}

/// Cached access to cost coefficients.
///
/// Empty until first use, then retained until `invalidate`. The fetch runs
/// outside the lock; concurrent first calls may both fetch, and whichever
/// snapshot lands first is kept. A fetch that started before an
/// `invalidate` is returned to its caller but never cached. Readers only
/// ever see a complete snapshot.
pub struct ConstantStore {
    source: Arc<dyn CoefficientSource>,
    cache: RwLock<Option<Arc<CoefficientSnapshot>>>,
    generation: AtomicU64,
}

impl ConstantStore {
    pub fn new(source: Arc<dyn CoefficientSource>) -> Self {
        Self {
            source,
            cache: RwLock::new(None),
            generation: AtomicU64::new(0),
        }
    }

    /// The cached snapshot, fetching both tables on a miss
    pub async fn snapshot(&self) -> Result<Arc<CoefficientSnapshot>> {
        if let Some(snapshot) = self.cached() {
            tracing::trace!("Coefficient cache hit");
            return Ok(snapshot);
        }

        let generation = self.generation.load(Ordering::Acquire);
        tracing::debug!(source = %self.source.describe(), "Coefficient cache miss, fetching");
        let constants = self.source.fetch_constants().await?;
        let fixed_costs = self.source.fetch_fixed_costs().await?;

        let fetched = Arc::new(CoefficientSnapshot {
            coefficients: CostCoefficients::new(constants),
            fixed_costs,
        });

        let mut cache = self.cache.write().unwrap_or_else(PoisonError::into_inner);
        // invalidate bumps the generation under this lock
        if self.generation.load(Ordering::Acquire) != generation {
            tracing::debug!("Coefficient cache invalidated during fetch, not storing");
            return Ok(fetched);
        }
        if let Some(existing) = cache.as_ref() {
            return Ok(Arc::clone(existing));
        }

        *cache = Some(Arc::clone(&fetched));
        tracing::info!(
            constants = fetched.coefficients.len(),
            fixed_costs = fetched.fixed_costs.len(),
            "Coefficient cache populated"
        );

        Ok(fetched)
    }

    /// Look up one coefficient; missing names are a configuration error
    pub async fn get_coefficient(&self, name: &str) -> Result<f64> {
        self.snapshot().await?.coefficients.get(name)
    }

    /// All cached coefficients
    pub async fn coefficients(&self) -> Result<CostCoefficients> {
        Ok(self.snapshot().await?.coefficients.clone())
    }

    /// Total monthly fixed cost and monthly throughput
    pub async fn fixed_cost_allocation(&self) -> Result<FixedCostAllocation> {
        self.snapshot().await?.fixed_cost_allocation()
    }

    /// Drop the cached tables; the next access refetches
    pub fn invalidate(&self) {
        let mut cache = self.cache.write().unwrap_or_else(PoisonError::into_inner);
        self.generation.fetch_add(1, Ordering::AcqRel);
        if cache.take().is_some() {
            tracing::info!("Coefficient cache invalidated");
        }
    }

    /// True once a snapshot is cached
    pub fn is_cached(&self) -> bool {
        self.cached().is_some()
    }

    /// Check the underlying source is reachable; does not touch the cache
    pub async fn health_check(&self) -> Result<()> {
        self.source.health_check().await
    }

    /// Description of the underlying source
    pub fn source_description(&self) -> String {
        self.source.describe()
    }

    fn cached(&self) -> Option<Arc<CoefficientSnapshot>> {
        self.cache
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::MemoryCoefficientSource;
    use boxcpq_core::CpqError;

    fn source() -> MemoryCoefficientSource {
        MemoryCoefficientSource::with_tables(
            [("custo_papelao_m2", 12.5), ("caixas_por_mes", 1000.0)],
            [("Aluguel", 3000.0), ("Energia", 500.0)],
        )
    }

    #[tokio::test]
    async fn test_fetches_once_until_invalidated() {
        let source = source();
        let store = ConstantStore::new(Arc::new(source.clone()));

        assert!(!store.is_cached());
        assert_eq!(store.get_coefficient("custo_papelao_m2").await.unwrap(), 12.5);
        assert_eq!(store.get_coefficient("custo_papelao_m2").await.unwrap(), 12.5);
        assert!(store.is_cached());
        // constants + fixed costs
        assert_eq!(source.fetch_count(), 2);

        store.invalidate();
        assert!(!store.is_cached());
        store.get_coefficient("custo_papelao_m2").await.unwrap();
        assert_eq!(source.fetch_count(), 4);
    }

    #[tokio::test]
    async fn test_fixed_cost_allocation() {
        let store = ConstantStore::new(Arc::new(source()));
        let allocation = store.fixed_cost_allocation().await.unwrap();

        assert_eq!(allocation.total_fixed_cost, 3500.0);
        assert_eq!(allocation.units_per_month, 1000.0);
        assert_eq!(allocation.per_unit().unwrap(), 3.5);
    }

    #[tokio::test]
    async fn test_missing_units_per_month() {
        let source = source();
        source.remove_constant("caixas_por_mes");
        let store = ConstantStore::new(Arc::new(source));

        match store.fixed_cost_allocation().await {
            Err(CpqError::ConfigMissing { key }) => assert_eq!(key, "caixas_por_mes"),
            other => panic!("Expected ConfigMissing, got {:?}", other),
        }
    }
}

//! In-memory coefficient source for development and testing.
//!
//! Tables can be filled programmatically or loaded from a TOML file with
//! `[constants]` and `[fixed_costs]` sections. For production, use the
//! PostgreSQL backend.

use async_trait::async_trait;
use boxcpq_core::models::normalize_line_item_name;
use boxcpq_core::{CpqError, Result};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, PoisonError, RwLock};

use crate::ports::CoefficientSource;

/// In-memory implementation of CoefficientSource
#[derive(Debug, Clone, Default)]
pub struct MemoryCoefficientSource {
    constants: Arc<RwLock<BTreeMap<String, f64>>>,
    fixed_costs: Arc<RwLock<BTreeMap<String, f64>>>,
    fetches: Arc<AtomicUsize>,
}

/// Layout of a coefficients TOML file
#[derive(Debug, Default, Deserialize)]
struct CoefficientsFile {
    #[serde(default)]
    constants: BTreeMap<String, f64>,
    #[serde(default)]
    fixed_costs: BTreeMap<String, f64>,
}

impl MemoryCoefficientSource {
    /// Create an empty source
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a source holding the given tables
    pub fn with_tables<C, F, K, L>(constants: C, fixed_costs: F) -> Self
    where
        C: IntoIterator<Item = (K, f64)>,
        F: IntoIterator<Item = (L, f64)>,
        K: Into<String>,
        L: Into<String>,
    {
        let source = Self::new();
        for (name, value) in constants {
            source.set_constant(name, value);
        }
        for (name, amount) in fixed_costs {
            source.set_fixed_cost(name, amount);
        }
        source
    }

    /// Parse tables from TOML text
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let file: CoefficientsFile = toml::from_str(content).map_err(|e| CpqError::ConfigInvalid {
            key: "coefficients_file".to_string(),
            reason: format!("Failed to parse TOML: {}", e),
        })?;

        Ok(Self::with_tables(file.constants, file.fixed_costs))
    }

    /// Load tables from a TOML file
    pub fn load_toml<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(CpqError::ConfigFileNotFound {
                path: path.to_path_buf(),
            });
        }

        let content = std::fs::read_to_string(path)?;
        let source = Self::from_toml_str(&content)?;

        tracing::info!(
            path = %path.display(),
            constants = source.read_constants().len(),
            fixed_costs = source.read_fixed_costs().len(),
            "Loaded coefficient tables"
        );

        Ok(source)
    }

    /// Insert or replace a constant
    pub fn set_constant(&self, name: impl Into<String>, value: f64) {
        self.constants
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(name.into(), value);
    }

    /// Remove a constant, returning its previous value
    pub fn remove_constant(&self, name: &str) -> Option<f64> {
        self.constants
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(name)
    }

    /// Insert or replace a fixed-cost line item; the name is normalized
    pub fn set_fixed_cost(&self, name: impl Into<String>, amount: f64) {
        let name = normalize_line_item_name(&name.into());
        self.fixed_costs
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(name, amount);
    }

    /// Drop every fixed-cost line item
    pub fn clear_fixed_costs(&self) {
        self.fixed_costs
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }

    /// Number of table reads served so far (constants and fixed costs each count once)
    pub fn fetch_count(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }

    fn read_constants(&self) -> BTreeMap<String, f64> {
        self.constants
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn read_fixed_costs(&self) -> BTreeMap<String, f64> {
        self.fixed_costs
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

#[async_trait]
impl CoefficientSource for MemoryCoefficientSource {
    async fn fetch_constants(&self) -> Result<BTreeMap<String, f64>> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        let constants = self.read_constants();
        if constants.is_empty() {
            return Err(CpqError::SourceUnavailable {
                reason: "no data found in the constants table".to_string(),
            });
        }
        Ok(constants)
    }

    async fn fetch_fixed_costs(&self) -> Result<BTreeMap<String, f64>> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        let fixed_costs = self.read_fixed_costs();
        if fixed_costs.is_empty() {
            return Err(CpqError::SourceUnavailable {
                reason: "no data found in the fixed costs table".to_string(),
            });
        }
        Ok(fixed_costs)
    }

    fn describe(&self) -> String {
        "memory".to_string()
    }
}

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::error::{CpqError, Result};

/// Stable coefficient names as stored in the constants table
pub mod keys {
    // Materials
    pub const CARDBOARD_COST_PER_M2: &str = "custo_papelao_m2";
    pub const ACRYLIC_COST_PER_M2: &str = "custo_acrilico_m2";

    // Coatings
    pub const PAPER_COATING_COST_PER_M2: &str = "custo_papel_m2";
    pub const UV_VINYL_COST_PER_M2: &str = "custo_vinil_uv_m2";

    // Adhesives
    pub const PVA_GLUE_CONSUMPTION_ML_PER_M2: &str = "consumo_cola_pva_ml_m2";
    pub const PVA_GLUE_COST_PER_ML: &str = "custo_cola_pva_ml";
    pub const SEAM_GLUE_CONSUMPTION_ML_PER_M: &str = "consumo_cola_adesiva_ml_m";
    pub const SEAM_GLUE_COST_PER_ML: &str = "custo_cola_adesiva_ml";
    pub const HOT_GLUE_FLAT_COST: &str = "custo_cola_quente_fixo";
    pub const FOAM_GLUE_FLAT_COST: &str = "custo_cola_isopor_fixo";

    // Printing
    pub const SCREEN_PRINT_COST_PER_COLOR: &str = "custo_serigrafia_cor";
    pub const DIGITAL_PRINT_COST_A4: &str = "custo_impressao_a4";
    pub const DIGITAL_PRINT_COST_A3: &str = "custo_impressao_a3";

    // Fasteners and hardware
    pub const TAPE_COST_PER_M: &str = "custo_fita_m";
    pub const RIVET_COST_PER_UNIT: &str = "custo_rebite_unidade";
    pub const MAGNET_PLATE_COST_PER_PAIR: &str = "custo_ima_chapa_par";

    // Packaging
    pub const SHIPPING_CARTON_COST: &str = "custo_caixa_despache_unidade";

    // Complexity multipliers
    pub const CRADLE_MULTIPLIER: &str = "multiplicador_berco";
    pub const CRADLE_AND_NICHE_MULTIPLIER: &str = "multiplicador_ambos";

    // Sheet layout
    pub const CARDBOARD_THICKNESS_MM: &str = "espessura_papelao_mm";
    pub const SHEET_WIDTH_MM: &str = "largura_placa_papelao_mm";
    pub const SHEET_HEIGHT_MM: &str = "altura_placa_papelao_mm";
    pub const SHEET_MARGIN_MM: &str = "margem_mm";

    // Throughput
    pub const UNITS_PER_MONTH: &str = "caixas_por_mes";

    /// Fixed-cost line item that, when present, replaces the sum of all items
    pub const FIXED_COST_TOTAL: &str = "total";
}

/// Named numeric cost coefficients
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CostCoefficients {
    values: BTreeMap<String, f64>,
}

impl CostCoefficients {
    pub fn new(values: BTreeMap<String, f64>) -> Self {
        Self { values }
    }

    /// Look up a coefficient. Absence is always an error, never a default.
    pub fn get(&self, name: &str) -> Result<f64> {
        self.values
            .get(name)
            .copied()
            .ok_or_else(|| CpqError::ConfigMissing {
                key: name.to_string(),
            })
    }

    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    pub fn insert(&mut self, name: impl Into<String>, value: f64) {
        self.values.insert(name.into(), value);
    }

    pub fn remove(&mut self, name: &str) -> Option<f64> {
        self.values.remove(name)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Coefficients in name order
    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.values.iter().map(|(k, v)| (k.as_str(), *v))
    }
}

impl<K: Into<String>> FromIterator<(K, f64)> for CostCoefficients {
    fn from_iter<I: IntoIterator<Item = (K, f64)>>(iter: I) -> Self {
        Self {
            values: iter.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }
}

/// Monthly overhead and the throughput it is spread over
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FixedCostAllocation {
    pub total_fixed_cost: f64,
    pub units_per_month: f64,
}

impl FixedCostAllocation {
    /// Build from fixed-cost line items.
    ///
    /// An explicit `total` item wins over the sum. A units-per-month entry
    /// found among the line items is a quantity, not a cost, and is skipped.
    /// Every amount must be finite.
    pub fn from_line_items(line_items: &BTreeMap<String, f64>, units_per_month: f64) -> Result<Self> {
        if let Some((name, amount)) = line_items.iter().find(|(_, amount)| !amount.is_finite()) {
            return Err(CpqError::ConfigInvalid {
                key: name.clone(),
                reason: format!("fixed cost must be a finite amount, got {}", amount),
            });
        }

        let total_fixed_cost = match line_items.get(keys::FIXED_COST_TOTAL) {
            Some(total) => *total,
            None => line_items
                .iter()
                .filter(|(name, _)| name.as_str() != keys::UNITS_PER_MONTH)
                .map(|(_, amount)| amount)
                .sum(),
        };

        Ok(Self {
            total_fixed_cost,
            units_per_month,
        })
    }

    /// Overhead charged to each unit
    pub fn per_unit(&self) -> Result<f64> {
        if !self.units_per_month.is_finite() || self.units_per_month <= 0.0 {
            return Err(CpqError::ConfigInvalid {
                key: keys::UNITS_PER_MONTH.to_string(),
                reason: format!("must be greater than zero, got {}", self.units_per_month),
            });
        }
        if !self.total_fixed_cost.is_finite() || self.total_fixed_cost < 0.0 {
            return Err(CpqError::ConfigInvalid {
                key: keys::FIXED_COST_TOTAL.to_string(),
                reason: format!(
                    "fixed costs must be finite and not negative, got {}",
                    self.total_fixed_cost
                ),
            });
        }
        Ok(self.total_fixed_cost / self.units_per_month)
    }
}

/// Finance-sheet labels whose key differs from the generic rule
const LINE_ITEM_ALIASES: &[(&str, &str)] = &[
    ("Caixas por mês", keys::UNITS_PER_MONTH),
    ("Caixas por mes", keys::UNITS_PER_MONTH),
    ("Total", keys::FIXED_COST_TOTAL),
    ("TOTAL", keys::FIXED_COST_TOTAL),
    ("Energia (média)", "energia"),
    ("Água (média)", "agua"),
    ("Folha (média)", "funcionarios"),
    ("Jurídico", "manutencao"),
    ("Marketing", "materiais_escritorio"),
];

/// Normalize a fixed-cost line-item name to its stable key.
///
/// Known finance-sheet labels map to fixed keys (`"Folha (média)"` is
/// `"funcionarios"`). Anything else is lowercased with spaces as
/// underscores and parentheses dropped, so `"INSS (média)"` becomes
/// `"inss_média"`.
pub fn normalize_line_item_name(name: &str) -> String {
    let trimmed = name.trim();
    if let Some((_, key)) = LINE_ITEM_ALIASES.iter().find(|(label, _)| *label == trimmed) {
        return key.to_string();
    }

    trimmed
        .to_lowercase()
        .replace(' ', "_")
        .replace(['(', ')'], "")
}

#![allow(dead_code)]

use boxcpq_core::models::{
    BoxSpec, CostCoefficients, Dimensions, FixedCostAllocation, LidStyle, Material,
};
use boxcpq_pricing::CostEngine;
use boxcpq_store::{ConstantStore, MemoryCoefficientSource};
use std::sync::Arc;

pub const CONSTANTS: [(&str, f64); 24] = [
    ("custo_papelao_m2", 10.0),
    ("custo_acrilico_m2", 120.0),
    ("custo_papel_m2", 4.0),
    ("custo_vinil_uv_m2", 9.0),
    ("consumo_cola_pva_ml_m2", 150.0),
    ("custo_cola_pva_ml", 0.02),
    ("consumo_cola_adesiva_ml_m", 5.0),
    ("custo_cola_adesiva_ml", 0.05),
    ("custo_cola_quente_fixo", 0.8),
    ("custo_cola_isopor_fixo", 1.2),
    ("custo_serigrafia_cor", 1.5),
    ("custo_impressao_a4", 2.0),
    ("custo_impressao_a3", 3.5),
    ("custo_fita_m", 0.6),
    ("custo_rebite_unidade", 0.25),
    ("custo_ima_chapa_par", 3.0),
    ("custo_caixa_despache_unidade", 9.0),
    ("multiplicador_berco", 1.2),
    ("multiplicador_ambos", 1.35),
    ("espessura_papelao_mm", 2.0),
    ("largura_placa_papelao_mm", 1040.0),
    ("altura_placa_papelao_mm", 860.0),
    ("margem_mm", 10.0),
    ("caixas_por_mes", 1000.0),
];

pub const FIXED_COSTS: [(&str, f64); 3] = [
    ("Aluguel", 3000.0),
    ("Energia", 500.0),
    ("Salários", 6500.0),
];

/// The constants table as a TOML `[constants]` section
pub fn constants_toml() -> String {
    let mut toml = String::from("[constants]\n");
    for (name, value) in CONSTANTS {
        toml.push_str(&format!("{} = {:?}\n", name, value));
    }
    toml
}

pub fn source() -> MemoryCoefficientSource {
    MemoryCoefficientSource::with_tables(CONSTANTS, FIXED_COSTS)
}

pub fn engine_over(source: MemoryCoefficientSource) -> CostEngine {
    CostEngine::new(Arc::new(ConstantStore::new(Arc::new(source))))
}

pub fn engine() -> CostEngine {
    engine_over(source())
}

pub fn coefficients() -> CostCoefficients {
    CONSTANTS.into_iter().collect()
}

pub fn allocation() -> FixedCostAllocation {
    FixedCostAllocation {
        total_fixed_cost: 10_000.0,
        units_per_month: 1000.0,
    }
}

pub fn cardboard_box(width: f64, height: f64, depth: f64, lid_style: LidStyle) -> BoxSpec {
    BoxSpec::new(
        Dimensions::new(width, height, depth),
        lid_style,
        Material::Cardboard,
        1,
    )
}

use boxcpq_core::models::{CoatingType, LidStyle, Material};
use serde::{Deserialize, Serialize};

/// One itemized cost line, per unit
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CostLine {
    /// Stable key, matches the breakdown field name
    pub key: &'static str,
    pub label: &'static str,
    pub amount: f64,
}

/// Itemized cost and price of one quote.
///
/// Serialized as a flat mapping; the keys are the ones read by the quote
/// store and the document renderer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CostBreakdown {
    #[serde(rename = "modelo")]
    pub lid_style: LidStyle,
    pub material: Material,
    #[serde(rename = "quantidade")]
    pub quantity: u32,
    pub markup: f64,
    /// Coating actually applied after the default rule
    #[serde(rename = "revestimento")]
    pub coating: CoatingType,

    #[serde(rename = "preco_total")]
    pub total_price: f64,
    #[serde(rename = "preco_unitario")]
    pub unit_price: f64,
    #[serde(rename = "custo_unitario")]
    pub unit_cost: f64,

    #[serde(rename = "custo_fixo_unitario")]
    pub fixed_cost_per_unit: f64,
    #[serde(rename = "caixas_por_mes")]
    pub units_per_month: f64,

    #[serde(rename = "custo_papelao")]
    pub cardboard_cost: f64,
    #[serde(rename = "custo_acrilico")]
    pub acrylic_cost: f64,
    #[serde(rename = "custo_revestimento")]
    pub coating_cost: f64,
    #[serde(rename = "custo_cola_pva")]
    pub pva_glue_cost: f64,
    #[serde(rename = "custo_cola_adesiva")]
    pub seam_glue_cost: f64,
    #[serde(rename = "custo_serigrafia")]
    pub screen_print_cost: f64,
    #[serde(rename = "custo_impressao")]
    pub digital_print_cost: f64,
    #[serde(rename = "custo_cola_quente")]
    pub hot_glue_cost: f64,
    #[serde(rename = "custo_cola_isopor")]
    pub foam_glue_cost: f64,
    #[serde(rename = "custo_fita")]
    pub tape_cost: f64,
    #[serde(rename = "custo_rebites")]
    pub rivet_cost: f64,
    #[serde(rename = "custo_ima_chapa")]
    pub magnet_cost: f64,
    /// Cradle/niche surcharge; zero unless the complexity policy applies it
    #[serde(rename = "custo_complexidade")]
    pub complexity_surcharge: f64,

    #[serde(rename = "area_papelao_m2")]
    pub cardboard_area_m2: f64,
    #[serde(rename = "area_acrilico_m2")]
    pub acrylic_area_m2: f64,
    #[serde(rename = "area_revestimento_m2")]
    pub coating_area_m2: f64,
    #[serde(rename = "ml_cola_pva")]
    pub pva_glue_ml: f64,
    #[serde(rename = "ml_cola_adesiva")]
    pub seam_glue_ml: f64,
    #[serde(rename = "pares_ima")]
    pub magnet_pairs: u32,

    #[serde(rename = "caixas_por_chapa")]
    pub units_per_sheet: u32,
    #[serde(rename = "chapas_necessarias")]
    pub sheets_needed: Option<u32>,
    #[serde(rename = "caixas_por_embalagem")]
    pub units_per_carton: u32,
    /// Shipping carton share per unit; informational, not part of unit cost
    #[serde(rename = "custo_embalagem_unitario")]
    pub packaging_cost_per_unit: f64,
}

impl CostBreakdown {
    /// Every line that makes up the unit cost, in a fixed order
    pub fn cost_lines(&self) -> [CostLine; 14] {
        [
            line("custo_fixo_unitario", "Fixed cost allocation", self.fixed_cost_per_unit),
            line("custo_papelao", "Cardboard", self.cardboard_cost),
            line("custo_acrilico", "Acrylic", self.acrylic_cost),
            line("custo_revestimento", "Coating", self.coating_cost),
            line("custo_cola_pva", "PVA glue", self.pva_glue_cost),
            line("custo_cola_adesiva", "Seam glue", self.seam_glue_cost),
            line("custo_serigrafia", "Screen printing", self.screen_print_cost),
            line("custo_impressao", "Digital printing", self.digital_print_cost),
            line("custo_cola_quente", "Hot glue", self.hot_glue_cost),
            line("custo_cola_isopor", "Foam glue", self.foam_glue_cost),
            line("custo_fita", "Tape", self.tape_cost),
            line("custo_rebites", "Rivets", self.rivet_cost),
            line("custo_ima_chapa", "Magnets and plates", self.magnet_cost),
            line("custo_complexidade", "Cradle/niche complexity", self.complexity_surcharge),
        ]
    }

    /// Lines with a non-zero amount, for display
    pub fn charged_lines(&self) -> Vec<CostLine> {
        self.cost_lines()
            .into_iter()
            .filter(|line| line.amount != 0.0)
            .collect()
    }

    /// Sum of the itemized lines
    pub fn lines_total(&self) -> f64 {
        self.cost_lines().iter().map(|line| line.amount).sum()
    }
}

fn line(key: &'static str, label: &'static str, amount: f64) -> CostLine {
    CostLine { key, label, amount }
}

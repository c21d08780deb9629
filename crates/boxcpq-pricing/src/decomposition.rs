//! Cost decomposition over geometry, coefficients and finishing options

use boxcpq_core::models::{
    keys, BoxSpec, CoatingType, ComplexityPolicy, CostCoefficients, FinishingOptions,
    FixedCostAllocation, LidStyle, Material, PaperSize,
};
use boxcpq_core::{CpqError, Result};
use boxcpq_geometry::constants::SINGLE_MAGNET_PAIR_MAX_WIDTH_MM;
use boxcpq_geometry::{flatten_box, GeometryResult, SheetLayout};

use crate::models::CostBreakdown;

/// Validate a request before anything is fetched or computed
pub fn validate_request(spec: &BoxSpec, options: &FinishingOptions) -> Result<()> {
    spec.validate()?;
    options.validate()
}

/// Decompose the cost of a box into itemized per-unit lines and price it.
///
/// Pure and deterministic: the same inputs always give the same breakdown.
/// Coefficients are only read for lines that apply, and each one read must
/// be present, finite and non-negative.
pub fn decompose(
    spec: &BoxSpec,
    options: &FinishingOptions,
    coefficients: &CostCoefficients,
    allocation: &FixedCostAllocation,
    policy: ComplexityPolicy,
) -> Result<CostBreakdown> {
    validate_request(spec, options)?;

    let coating = options.effective_coating(spec.material);
    let fixed_cost_per_unit = allocation.per_unit()?;

    let layout = SheetLayout::from_coefficients(coefficients)?;
    let geometry = flatten_box(&spec.dimensions, spec.lid_style, &layout)?;
    let area_m2 = geometry.total_area_m2();

    let mut breakdown = empty_breakdown(spec, options, coating, &geometry);
    breakdown.fixed_cost_per_unit = fixed_cost_per_unit;
    breakdown.units_per_month = allocation.units_per_month;

    // Structure
    match spec.material {
        Material::Cardboard => {
            breakdown.cardboard_area_m2 = area_m2;
            breakdown.cardboard_cost = area_m2 * rate(coefficients, keys::CARDBOARD_COST_PER_M2)?;
        }
        Material::Acrylic => {
            breakdown.acrylic_area_m2 = area_m2;
            breakdown.acrylic_cost = area_m2 * rate(coefficients, keys::ACRYLIC_COST_PER_M2)?;
        }
    }

    // Adhesives
    if spec.material.uses_pva_glue() {
        // PVA goes on both faces of the contact area
        breakdown.pva_glue_ml = geometry.contact_area_m2()
            * 2.0
            * rate(coefficients, keys::PVA_GLUE_CONSUMPTION_ML_PER_M2)?;
        breakdown.pva_glue_cost =
            breakdown.pva_glue_ml * rate(coefficients, keys::PVA_GLUE_COST_PER_ML)?;

        breakdown.seam_glue_ml =
            geometry.perimeter_m() * rate(coefficients, keys::SEAM_GLUE_CONSUMPTION_ML_PER_M)?;
        breakdown.seam_glue_cost =
            breakdown.seam_glue_ml * rate(coefficients, keys::SEAM_GLUE_COST_PER_ML)?;
    }

    // Coating
    let coating_rate = match coating {
        CoatingType::None => None,
        CoatingType::Paper => Some(rate(coefficients, keys::PAPER_COATING_COST_PER_M2)?),
        CoatingType::UvVinyl => Some(rate(coefficients, keys::UV_VINYL_COST_PER_M2)?),
    };
    if let Some(per_m2) = coating_rate {
        breakdown.coating_area_m2 = area_m2;
        breakdown.coating_cost = area_m2 * per_m2;
    }

    // Printing
    if let Some(print) = options.screen_print {
        breakdown.screen_print_cost = f64::from(print.colors)
            * f64::from(print.passes)
            * rate(coefficients, keys::SCREEN_PRINT_COST_PER_COLOR)?;
    }
    breakdown.digital_print_cost = match options.digital_print {
        Some(PaperSize::A4) => rate(coefficients, keys::DIGITAL_PRINT_COST_A4)?,
        Some(PaperSize::A3) => rate(coefficients, keys::DIGITAL_PRINT_COST_A3)?,
        None => 0.0,
    };

    // Consumables and fasteners
    if options.hot_glue {
        breakdown.hot_glue_cost = rate(coefficients, keys::HOT_GLUE_FLAT_COST)?;
    }
    if options.foam_glue {
        breakdown.foam_glue_cost = rate(coefficients, keys::FOAM_GLUE_FLAT_COST)?;
    }
    if options.tape_meters > 0.0 {
        breakdown.tape_cost = options.tape_meters * rate(coefficients, keys::TAPE_COST_PER_M)?;
    }
    if options.rivet_count > 0 {
        breakdown.rivet_cost =
            f64::from(options.rivet_count) * rate(coefficients, keys::RIVET_COST_PER_UNIT)?;
    }

    // Magnet hardware
    breakdown.magnet_pairs = magnet_pairs(spec);
    if breakdown.magnet_pairs > 0 {
        breakdown.magnet_cost = f64::from(breakdown.magnet_pairs)
            * rate(coefficients, keys::MAGNET_PLATE_COST_PER_PAIR)?;
    }

    breakdown.complexity_surcharge =
        complexity_surcharge(&breakdown, options, coefficients, policy)?;

    // Informational only
    if geometry.units_per_carton > 0 {
        breakdown.packaging_cost_per_unit = rate(coefficients, keys::SHIPPING_CARTON_COST)?
            / f64::from(geometry.units_per_carton);
    }

    breakdown.unit_cost = breakdown.lines_total();
    breakdown.unit_price = breakdown.unit_cost * (1.0 + options.markup);
    breakdown.total_price = breakdown.unit_price * f64::from(spec.quantity);

    Ok(breakdown)
}

/// Magnet pairs for a box: one up to 100 mm wide, two above; none unless magnetic
pub fn magnet_pairs(spec: &BoxSpec) -> u32 {
    match spec.lid_style {
        LidStyle::MagneticLid if spec.dimensions.width_mm <= SINGLE_MAGNET_PAIR_MAX_WIDTH_MM => 1,
        LidStyle::MagneticLid => 2,
        LidStyle::LooseLid | LidStyle::BookLid | LidStyle::SleeveLid | LidStyle::RoundLid => 0,
    }
}

/// Extra cost for cradle/niche work, as variable cost times (multiplier - 1)
fn complexity_surcharge(
    breakdown: &CostBreakdown,
    options: &FinishingOptions,
    coefficients: &CostCoefficients,
    policy: ComplexityPolicy,
) -> Result<f64> {
    if policy == ComplexityPolicy::Ignore || !options.cradle {
        return Ok(0.0);
    }

    let key = if options.niche {
        keys::CRADLE_AND_NICHE_MULTIPLIER
    } else {
        keys::CRADLE_MULTIPLIER
    };
    let multiplier = rate(coefficients, key)?;
    if multiplier < 1.0 {
        return Err(CpqError::ConfigInvalid {
            key: key.to_string(),
            reason: format!("multiplier must be at least 1, got {}", multiplier),
        });
    }

    let variable_cost: f64 = breakdown
        .cost_lines()
        .iter()
        .filter(|line| {
            line.key != "custo_fixo_unitario" && line.key != "custo_complexidade"
        })
        .map(|line| line.amount)
        .sum();

    Ok(variable_cost * (multiplier - 1.0))
}

/// A coefficient used as a price or rate: present, finite, non-negative
fn rate(coefficients: &CostCoefficients, key: &str) -> Result<f64> {
    let value = coefficients.get(key)?;
    if !value.is_finite() || value < 0.0 {
        return Err(CpqError::ConfigInvalid {
            key: key.to_string(),
            reason: format!("must be zero or positive, got {}", value),
        });
    }
    Ok(value)
}

fn empty_breakdown(
    spec: &BoxSpec,
    options: &FinishingOptions,
    coating: CoatingType,
    geometry: &GeometryResult,
) -> CostBreakdown {
    CostBreakdown {
        lid_style: spec.lid_style,
        material: spec.material,
        quantity: spec.quantity,
        markup: options.markup,
        coating,
        total_price: 0.0,
        unit_price: 0.0,
        unit_cost: 0.0,
        fixed_cost_per_unit: 0.0,
        units_per_month: 0.0,
        cardboard_cost: 0.0,
        acrylic_cost: 0.0,
        coating_cost: 0.0,
        pva_glue_cost: 0.0,
        seam_glue_cost: 0.0,
        screen_print_cost: 0.0,
        digital_print_cost: 0.0,
        hot_glue_cost: 0.0,
        foam_glue_cost: 0.0,
        tape_cost: 0.0,
        rivet_cost: 0.0,
        magnet_cost: 0.0,
        complexity_surcharge: 0.0,
        cardboard_area_m2: 0.0,
        acrylic_area_m2: 0.0,
        coating_area_m2: 0.0,
        pva_glue_ml: 0.0,
        seam_glue_ml: 0.0,
        magnet_pairs: 0,
        units_per_sheet: geometry.units_per_sheet,
        sheets_needed: geometry.sheets_needed(spec.quantity),
        units_per_carton: geometry.units_per_carton,
        packaging_cost_per_unit: 0.0,
    }
}

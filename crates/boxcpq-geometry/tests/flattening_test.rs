use boxcpq_core::models::{Dimensions, LidStyle};
use boxcpq_geometry::{flatten_box, SheetLayout};
use proptest::prelude::*;

fn standard_layout() -> SheetLayout {
    SheetLayout::new(1040.0, 860.0, 10.0, 2.0)
}

#[test]
fn test_loose_lid_base_area_is_exact() {
    let dims = Dimensions::new(200.0, 150.0, 100.0);
    let result = flatten_box(&dims, LidStyle::LooseLid, &standard_layout()).unwrap();

    assert_eq!(result.base_area_mm2, Some(140_000.0));
}

#[test]
fn test_round_lid_areas() {
    let dims = Dimensions::new(200.0, 200.0, 100.0);
    let result = flatten_box(&dims, LidStyle::RoundLid, &standard_layout()).unwrap();

    let base = result.base_area_mm2.unwrap();
    let lid = result.lid_area_mm2.unwrap();
    assert!((base - 31_415.93).abs() < 0.01, "base area was {}", base);
    // lid diameter 206
    assert!((lid - std::f64::consts::PI * 103.0 * 103.0).abs() < 1e-9);
    assert!((result.total_area_mm2 - (base + lid)).abs() < 1e-9);
}

#[test]
fn test_serialized_keys() {
    let dims = Dimensions::new(200.0, 150.0, 100.0);
    let result = flatten_box(&dims, LidStyle::BookLid, &standard_layout()).unwrap();
    let json = serde_json::to_value(&result).unwrap();

    assert_eq!(json["area_total_mm2"], 160_000.0);
    assert_eq!(json["caixas_por_chapa"], 4);
    assert_eq!(json["colunas_por_chapa"], 2);
    assert_eq!(json["linhas_por_chapa"], 2);
    assert!(json["area_base_mm2"].is_null());
    assert_eq!(json["panels"][0]["kind"], "body");
    assert_eq!(json["panels"][0]["shape"], "rectangle");
}

#[test]
fn test_box_larger_than_carton_packs_zero() {
    let dims = Dimensions::new(600.0, 400.0, 400.0);
    for style in LidStyle::ALL {
        let result = flatten_box(&dims, style, &standard_layout()).unwrap();
        assert_eq!(result.units_per_carton, 0, "{} should not fit", style);
    }
}

#[test]
fn test_box_larger_than_sheet_packs_zero() {
    let dims = Dimensions::new(900.0, 800.0, 200.0);
    for style in LidStyle::ALL {
        let result = flatten_box(&dims, style, &standard_layout()).unwrap();
        assert_eq!(result.units_per_sheet, 0, "{} should not fit", style);
        assert_eq!(result.sheets_needed(10), None);
    }
}

fn lid_style() -> impl Strategy<Value = LidStyle> {
    prop::sample::select(LidStyle::ALL.to_vec())
}

proptest! {
    #[test]
    fn prop_total_is_sum_of_panels(
        w in 1.0f64..800.0,
        h in 1.0f64..800.0,
        d in 1.0f64..400.0,
        style in lid_style(),
    ) {
        let result = flatten_box(&Dimensions::new(w, h, d), style, &standard_layout()).unwrap();

        let panel_sum: f64 = result.panels.iter().map(|p| p.area_mm2()).sum();
        prop_assert!((result.total_area_mm2 - panel_sum).abs() < 1e-6 * panel_sum.max(1.0));

        let parts = result.base_area_mm2.unwrap_or(0.0)
            + result.lid_area_mm2.unwrap_or(0.0)
            + result.auxiliary_area_mm2.unwrap_or(0.0);
        if style != LidStyle::BookLid {
            prop_assert!((result.total_area_mm2 - parts).abs() < 1e-6 * parts.max(1.0));
        }

        prop_assert!(result.total_area_mm2 > 0.0);
        prop_assert!(result.perimeter_mm > 0.0);
        prop_assert!(result.contact_area_mm2 > 0.0);
    }

    #[test]
    fn prop_non_positive_dimension_rejected(
        bad in -500.0f64..=0.0,
        axis in 0usize..3,
        style in lid_style(),
    ) {
        let mut values = [100.0, 100.0, 100.0];
        values[axis] = bad;
        let dims = Dimensions::new(values[0], values[1], values[2]);

        let err = flatten_box(&dims, style, &standard_layout()).unwrap_err();
        prop_assert!(matches!(err, boxcpq_core::CpqError::InvalidDimension { .. }), "unexpected error: {:?}", err);
    }

    #[test]
    fn prop_flattening_is_deterministic(
        w in 1.0f64..800.0,
        h in 1.0f64..800.0,
        d in 1.0f64..400.0,
        style in lid_style(),
    ) {
        let dims = Dimensions::new(w, h, d);
        let first = flatten_box(&dims, style, &standard_layout()).unwrap();
        let second = flatten_box(&dims, style, &standard_layout()).unwrap();
        prop_assert_eq!(first, second);
    }
}

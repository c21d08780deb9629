//! Sheet and shipping-carton packing

use crate::constants::SHIPPING_CARTON_MM;
use crate::models::{SheetGrid, SheetLayout};

/// Boxes that fit on one sheet when counted by area.
///
/// Used by styles cut as several separate panels.
pub fn units_per_sheet_by_area(layout: &SheetLayout, box_area_mm2: f64) -> u32 {
    if box_area_mm2 <= 0.0 {
        return 0;
    }
    whole_count(layout.usable_area_mm2() / box_area_mm2)
}

/// Column/row grid for a single rectangular panel, margin included per panel
pub fn sheet_grid(layout: &SheetLayout, panel_width_mm: f64, panel_height_mm: f64) -> SheetGrid {
    SheetGrid {
        columns: whole_count(layout.sheet_width_mm / (panel_width_mm + layout.margin_mm)),
        rows: whole_count(layout.sheet_height_mm / (panel_height_mm + layout.margin_mm)),
    }
}

/// Boxes that fit in the shipping carton, best of the six axis permutations.
///
/// Zero when the box does not fit in any orientation.
pub fn units_per_carton(box_dims_mm: [f64; 3]) -> u32 {
    units_per_container(box_dims_mm, SHIPPING_CARTON_MM)
}

/// Boxes that tile `container_mm`, best of the six axis permutations
pub fn units_per_container(box_dims_mm: [f64; 3], container_mm: [f64; 3]) -> u32 {
    permutations(box_dims_mm)
        .into_iter()
        .map(|[a, b, c]| {
            let along = |len: f64, limit: f64| whole_count(limit / len);
            along(a, container_mm[0])
                .saturating_mul(along(b, container_mm[1]))
                .saturating_mul(along(c, container_mm[2]))
        })
        .max()
        .unwrap_or(0)
}

fn permutations([a, b, c]: [f64; 3]) -> [[f64; 3]; 6] {
    [[a, b, c], [a, c, b], [b, a, c], [b, c, a], [c, a, b], [c, b, a]]
}

/// Floor of a ratio as a count; anything non-finite or negative is zero
fn whole_count(ratio: f64) -> u32 {
    if !ratio.is_finite() || ratio <= 0.0 {
        return 0;
    }
    ratio.floor().min(u32::MAX as f64) as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    fn layout() -> SheetLayout {
        SheetLayout::new(1040.0, 860.0, 10.0, 2.0)
    }

    #[test]
    fn test_units_per_sheet_by_area() {
        // usable area 1030 x 850 = 875_500
        assert_eq!(units_per_sheet_by_area(&layout(), 100_000.0), 8);
        assert_eq!(units_per_sheet_by_area(&layout(), 1_000_000.0), 0);
        assert_eq!(units_per_sheet_by_area(&layout(), 0.0), 0);
    }

    #[test]
    fn test_units_per_sheet_for_multi_panel_styles() {
        // sleeve lid 100 x 80 x 50: 36_000 + 21_216 + 1_500
        assert_eq!(units_per_sheet_by_area(&layout(), 58_716.0), 14);
        // magnetic lid 100 x 80 x 50: 36_000 + 21_216 + 2_000
        assert_eq!(units_per_sheet_by_area(&layout(), 59_216.0), 14);
        // sleeve lid 200 x 150 x 100: 140_000 + 52_736 + 3_000
        assert_eq!(units_per_sheet_by_area(&layout(), 195_736.0), 4);
        // exactly five fit
        assert_eq!(units_per_sheet_by_area(&layout(), 175_100.0), 5);
    }

    #[test]
    fn test_sheet_grid() {
        let grid = sheet_grid(&layout(), 400.0, 400.0);
        assert_eq!(grid.columns, 2); // 1040 / 410
        assert_eq!(grid.rows, 2); // 860 / 410
        assert_eq!(grid.units(), 4);
    }

    #[test]
    fn test_carton_picks_best_orientation() {
        // 100 x 350 x 500 only fits with the 500 side along the carton length
        assert_eq!(units_per_carton([100.0, 350.0, 500.0]), 3);
        assert_eq!(units_per_carton([100.0, 100.0, 100.0]), 5 * 3 * 3);
    }

    #[test]
    fn test_carton_too_small_for_box() {
        assert_eq!(units_per_carton([600.0, 100.0, 100.0]), 0);
        assert_eq!(units_per_carton([400.0, 400.0, 400.0]), 0);
    }
}

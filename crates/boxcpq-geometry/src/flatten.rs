use crate::constants::{
    LID_CLEARANCE_THICKNESS_FACTOR, LID_WALL_DEPTH_MM, MAGNET_STRIP_HEIGHT_MM,
    ROUND_LID_DIAMETER_ALLOWANCE_MM, SLEEVE_FLAP_DEPTH_MM,
};
use crate::models::{GeometryResult, Panel, PanelKind, SheetLayout};
use crate::packing;
use crate::validation::{validate_dimensions, validate_layout};
use boxcpq_core::models::{Dimensions, LidStyle};
use boxcpq_core::Result;
use std::f64::consts::PI;

/// Flatten a box into its die-cut panels and derive areas, perimeter,
/// adhesive contact area and packing counts.
pub fn flatten_box(
    dimensions: &Dimensions,
    lid_style: LidStyle,
    layout: &SheetLayout,
) -> Result<GeometryResult> {
    validate_dimensions(dimensions)?;
    validate_layout(layout)?;

    let result = match lid_style {
        LidStyle::BookLid => book_lid(dimensions, layout),
        LidStyle::RoundLid => round_lid(dimensions, layout),
        LidStyle::LooseLid => base_and_lid(dimensions, lid_style, layout, None),
        LidStyle::SleeveLid => {
            let flap = Panel::rectangle(
                PanelKind::SleeveFlap,
                dimensions.width_mm,
                SLEEVE_FLAP_DEPTH_MM,
            );
            base_and_lid(dimensions, lid_style, layout, Some(flap))
        }
        LidStyle::MagneticLid => {
            let strip = Panel::rectangle(
                PanelKind::MagnetStrip,
                dimensions.width_mm,
                MAGNET_STRIP_HEIGHT_MM,
            );
            base_and_lid(dimensions, lid_style, layout, Some(strip))
        }
    };

    tracing::debug!(
        lid_style = %lid_style,
        total_area_mm2 = result.total_area_mm2,
        units_per_sheet = result.units_per_sheet,
        units_per_carton = result.units_per_carton,
        "Flattened box"
    );

    Ok(result)
}

/// Base unfolded with its walls: (w + 2d) x (h + 2d)
fn base_panel(dimensions: &Dimensions) -> Panel {
    let Dimensions {
        width_mm: w,
        height_mm: h,
        depth_mm: d,
    } = *dimensions;
    Panel::rectangle(PanelKind::Base, w + 2.0 * d, h + 2.0 * d)
}

/// Telescoping lid: face enlarged by the clearance, plus fixed-depth walls
fn lid_panel(dimensions: &Dimensions, thickness_mm: f64) -> Panel {
    let clearance = LID_CLEARANCE_THICKNESS_FACTOR * thickness_mm;
    let walls = 2.0 * LID_WALL_DEPTH_MM;
    Panel::rectangle(
        PanelKind::Lid,
        dimensions.width_mm + clearance + walls,
        dimensions.height_mm + clearance + walls,
    )
}

/// Lateral wall area of a rectangular base
fn rectangular_wall_area(dimensions: &Dimensions) -> f64 {
    2.0 * dimensions.width_mm * dimensions.depth_mm
        + 2.0 * dimensions.height_mm * dimensions.depth_mm
}

fn base_and_lid(
    dimensions: &Dimensions,
    lid_style: LidStyle,
    layout: &SheetLayout,
    auxiliary: Option<Panel>,
) -> GeometryResult {
    let base = base_panel(dimensions);
    let lid = lid_panel(dimensions, layout.thickness_mm);

    let mut panels = vec![base, lid];
    panels.extend(auxiliary);

    let total_area_mm2: f64 = panels.iter().map(Panel::area_mm2).sum();

    GeometryResult {
        lid_style,
        base_area_mm2: Some(base.area_mm2()),
        lid_area_mm2: Some(lid.area_mm2()),
        auxiliary_area_mm2: auxiliary.map(|panel| panel.area_mm2()),
        total_area_mm2,
        perimeter_mm: panels.iter().map(Panel::perimeter_mm).sum(),
        contact_area_mm2: rectangular_wall_area(dimensions),
        units_per_sheet: packing::units_per_sheet_by_area(layout, total_area_mm2),
        units_per_carton: packing::units_per_carton(dimensions.as_array()),
        sheet_grid: None,
        panels,
    }
}

/// One continuous panel: (w + 2d) x (2h + d), packed as a column/row grid
fn book_lid(dimensions: &Dimensions, layout: &SheetLayout) -> GeometryResult {
    let width = dimensions.width_mm + 2.0 * dimensions.depth_mm;
    let height = 2.0 * dimensions.height_mm + dimensions.depth_mm;
    let body = Panel::rectangle(PanelKind::Body, width, height);
    let grid = packing::sheet_grid(layout, width, height);

    GeometryResult {
        lid_style: LidStyle::BookLid,
        base_area_mm2: None,
        lid_area_mm2: None,
        auxiliary_area_mm2: None,
        total_area_mm2: body.area_mm2(),
        perimeter_mm: body.perimeter_mm(),
        contact_area_mm2: rectangular_wall_area(dimensions),
        units_per_sheet: grid.units(),
        units_per_carton: packing::units_per_carton(dimensions.as_array()),
        sheet_grid: Some(grid),
        panels: vec![body],
    }
}

/// Circular base of diameter max(w, h) and a slightly larger round lid
fn round_lid(dimensions: &Dimensions, layout: &SheetLayout) -> GeometryResult {
    let diameter = dimensions.width_mm.max(dimensions.height_mm);
    let base = Panel::circle(PanelKind::Base, diameter);
    let lid = Panel::circle(PanelKind::Lid, diameter + ROUND_LID_DIAMETER_ALLOWANCE_MM);
    let total_area_mm2 = base.area_mm2() + lid.area_mm2();

    GeometryResult {
        lid_style: LidStyle::RoundLid,
        base_area_mm2: Some(base.area_mm2()),
        lid_area_mm2: Some(lid.area_mm2()),
        auxiliary_area_mm2: None,
        total_area_mm2,
        perimeter_mm: base.perimeter_mm() + lid.perimeter_mm(),
        contact_area_mm2: PI * diameter * dimensions.depth_mm,
        units_per_sheet: packing::units_per_sheet_by_area(layout, total_area_mm2),
        units_per_carton: packing::units_per_carton(dimensions.as_array()),
        sheet_grid: None,
        panels: vec![base, lid],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use boxcpq_core::CpqError;

    fn layout() -> SheetLayout {
        SheetLayout::new(1040.0, 860.0, 10.0, 2.0)
    }

    #[test]
    fn test_loose_lid_panels() {
        let dims = Dimensions::new(200.0, 150.0, 100.0);
        let result = flatten_box(&dims, LidStyle::LooseLid, &layout()).unwrap();

        assert_eq!(result.base_area_mm2, Some(140_000.0));
        // lid: (200 + 6 + 50) x (150 + 6 + 50)
        assert_eq!(result.lid_area_mm2, Some(256.0 * 206.0));
        assert_eq!(result.auxiliary_area_mm2, None);
        assert_eq!(result.total_area_mm2, 140_000.0 + 256.0 * 206.0);
        assert_eq!(result.contact_area_mm2, 2.0 * 200.0 * 100.0 + 2.0 * 150.0 * 100.0);
        assert_eq!(result.perimeter_mm, 2.0 * (400.0 + 350.0) + 2.0 * (256.0 + 206.0));
        assert_eq!(result.panels.len(), 2);
    }

    #[test]
    fn test_sleeve_and_magnetic_extras() {
        let dims = Dimensions::new(200.0, 150.0, 100.0);

        let sleeve = flatten_box(&dims, LidStyle::SleeveLid, &layout()).unwrap();
        assert_eq!(sleeve.auxiliary_area_mm2, Some(200.0 * 15.0));

        let magnetic = flatten_box(&dims, LidStyle::MagneticLid, &layout()).unwrap();
        assert_eq!(magnetic.auxiliary_area_mm2, Some(200.0 * 20.0));

        let loose = flatten_box(&dims, LidStyle::LooseLid, &layout()).unwrap();
        assert_eq!(magnetic.total_area_mm2, loose.total_area_mm2 + 4000.0);
        assert_eq!(magnetic.perimeter_mm, loose.perimeter_mm + 2.0 * (200.0 + 20.0));
    }

    #[test]
    fn test_sleeve_lid_perimeter_and_contact_area() {
        let dims = Dimensions::new(100.0, 80.0, 50.0);
        let result = flatten_box(&dims, LidStyle::SleeveLid, &layout()).unwrap();

        // base 200 x 180, lid 156 x 136, flap 100 x 15
        assert_eq!(result.base_area_mm2, Some(36_000.0));
        assert_eq!(result.lid_area_mm2, Some(21_216.0));
        assert_eq!(result.auxiliary_area_mm2, Some(1_500.0));
        assert_eq!(result.total_area_mm2, 58_716.0);
        assert_eq!(result.perimeter_mm, 760.0 + 584.0 + 230.0);
        assert_eq!(result.contact_area_mm2, 10_000.0 + 8_000.0);
        // 875_500 / 58_716 = 14.9
        assert_eq!(result.units_per_sheet, 14);
        assert_eq!(result.panels.len(), 3);
    }

    #[test]
    fn test_magnetic_lid_units_per_sheet() {
        let dims = Dimensions::new(100.0, 80.0, 50.0);
        let result = flatten_box(&dims, LidStyle::MagneticLid, &layout()).unwrap();

        // strip 100 x 20
        assert_eq!(result.auxiliary_area_mm2, Some(2_000.0));
        assert_eq!(result.total_area_mm2, 59_216.0);
        assert_eq!(result.perimeter_mm, 760.0 + 584.0 + 240.0);
        assert_eq!(result.contact_area_mm2, 18_000.0);
        // 875_500 / 59_216 = 14.8
        assert_eq!(result.units_per_sheet, 14);

        // 200 x 150 x 100: 140_000 + 52_736 + 4_000
        let large_dims = Dimensions::new(200.0, 150.0, 100.0);
        let large = flatten_box(&large_dims, LidStyle::MagneticLid, &layout()).unwrap();
        assert_eq!(large.total_area_mm2, 196_736.0);
        assert_eq!(large.units_per_sheet, 4);
    }

    #[test]
    fn test_book_lid_single_panel() {
        let dims = Dimensions::new(200.0, 150.0, 100.0);
        let result = flatten_box(&dims, LidStyle::BookLid, &layout()).unwrap();

        // (200 + 200) x (300 + 100)
        assert_eq!(result.total_area_mm2, 400.0 * 400.0);
        assert_eq!(result.base_area_mm2, None);
        assert_eq!(result.lid_area_mm2, None);

        let grid = result.sheet_grid.unwrap();
        assert_eq!((grid.columns, grid.rows), (2, 2));
        assert_eq!(result.units_per_sheet, 4);
    }

    #[test]
    fn test_round_lid_uses_larger_side_as_diameter() {
        let dims = Dimensions::new(120.0, 200.0, 80.0);
        let result = flatten_box(&dims, LidStyle::RoundLid, &layout()).unwrap();

        let expected_base = PI * 100.0 * 100.0;
        assert!((result.base_area_mm2.unwrap() - expected_base).abs() < 1e-9);
        assert!((result.contact_area_mm2 - PI * 200.0 * 80.0).abs() < 1e-9);
        assert!((result.perimeter_mm - PI * (200.0 + 206.0)).abs() < 1e-9);
    }

    #[test]
    fn test_invalid_dimension_rejected() {
        let dims = Dimensions::new(200.0, 0.0, 100.0);
        match flatten_box(&dims, LidStyle::LooseLid, &layout()) {
            Err(CpqError::InvalidDimension { field, .. }) => assert_eq!(field, "height"),
            other => panic!("Expected InvalidDimension, got {:?}", other),
        }
    }
}

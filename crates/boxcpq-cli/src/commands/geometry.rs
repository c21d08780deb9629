//! Geometry command implementation

use crate::cli::GeometryArgs;
use crate::output::{mm2, OutputWriter};
use crate::output_types::GeometryOutput;
use crate::storage;
use anyhow::{Context, Result};
use boxcpq_core::config::LayeredConfig;
use boxcpq_core::models::Dimensions;
use boxcpq_geometry::{PanelShape, SheetLayout};
use tabled::Tabled;

#[derive(Tabled)]
struct PanelRow {
    #[tabled(rename = "Panel")]
    kind: String,
    #[tabled(rename = "Outline")]
    outline: String,
    #[tabled(rename = "Area")]
    area: String,
}

pub async fn execute(args: GeometryArgs, config: &LayeredConfig, output: &OutputWriter) -> Result<()> {
    let dims = &args.dimensions;
    let dimensions = Dimensions::from_unit(dims.width, dims.height, dims.depth, dims.unit);

    let engine = storage::open_engine(config).await?;
    let geometry = engine
        .geometry(&dimensions, dims.lid)
        .await
        .context("Failed to flatten box")?;
    // Served from the cache populated by the call above
    let sheet = SheetLayout::from_coefficients(&engine.store().coefficients().await?)?;
    let sheets_needed = args.quantity.and_then(|q| geometry.sheets_needed(q));

    if output.is_json() {
        return output.result(GeometryOutput {
            dimensions,
            sheet,
            geometry,
            quantity: args.quantity,
            sheets_needed,
        });
    }

    output.section(format!("{} panels", geometry.lid_style));
    let rows: Vec<PanelRow> = geometry
        .panels
        .iter()
        .map(|panel| PanelRow {
            kind: format!("{:?}", panel.kind),
            outline: match panel.shape {
                PanelShape::Rectangle {
                    width_mm,
                    height_mm,
                } => format!("{:.1} x {:.1} mm", width_mm, height_mm),
                PanelShape::Circle { diameter_mm } => format!("⌀ {:.1} mm", diameter_mm),
            },
            area: mm2(panel.area_mm2()),
        })
        .collect();
    output.table(rows);

    output.section("Totals");
    output.kv("Die-cut area", mm2(geometry.total_area_mm2));
    output.kv("Perimeter", format!("{:.2} mm", geometry.perimeter_mm));
    output.kv("Glued area", mm2(geometry.contact_area_mm2));

    output.section("Packing");
    output.kv(
        "Sheet",
        format!(
            "{} x {} mm, margin {} mm",
            sheet.sheet_width_mm, sheet.sheet_height_mm, sheet.margin_mm
        ),
    );
    if let Some(grid) = geometry.sheet_grid {
        output.kv("Grid", format!("{} columns x {} rows", grid.columns, grid.rows));
    }
    output.kv("Boxes per sheet", geometry.units_per_sheet);
    output.kv("Boxes per carton", geometry.units_per_carton);
    if let Some(quantity) = args.quantity {
        match sheets_needed {
            Some(sheets) => output.kv(format!("Sheets for {}", quantity), sheets),
            None => output.kv(format!("Sheets for {}", quantity), "box does not fit the sheet"),
        }
    }

    Ok(())
}

//! Quote command implementation

use crate::cli::QuoteArgs;
use crate::output::{money, OutputWriter};
use crate::output_types::QuoteOutput;
use crate::storage;
use anyhow::{Context, Result};
use boxcpq_core::config::LayeredConfig;
use boxcpq_core::models::{BoxSpec, Dimensions, FinishingOptions, ScreenPrint};
use tabled::Tabled;

#[derive(Tabled)]
struct CostRow {
    #[tabled(rename = "Item")]
    label: &'static str,
    #[tabled(rename = "Key")]
    key: &'static str,
    #[tabled(rename = "Per unit")]
    amount: String,
}

pub async fn execute(args: QuoteArgs, config: &LayeredConfig, output: &OutputWriter) -> Result<()> {
    let (spec, options) = build_request(&args);
    let engine = storage::open_engine(config).await?;

    let breakdown = engine
        .calculate_box_cost(&spec, &options)
        .await
        .context("Failed to calculate quote")?;

    if output.is_json() {
        return output.result(QuoteOutput {
            dimensions: spec.dimensions,
            complexity: engine.policy(),
            lines: breakdown.charged_lines(),
            breakdown,
        });
    }

    output.section("Box");
    output.kv("Lid style", spec.lid_style);
    output.kv("Material", spec.material);
    output.kv(
        "Dimensions",
        format!(
            "{} x {} x {} mm",
            spec.dimensions.width_mm, spec.dimensions.height_mm, spec.dimensions.depth_mm
        ),
    );
    output.kv("Coating", breakdown.coating);
    output.kv("Quantity", spec.quantity);

    output.section("Cost per unit");
    let rows: Vec<CostRow> = breakdown
        .charged_lines()
        .into_iter()
        .map(|line| CostRow {
            label: line.label,
            key: line.key,
            amount: money(line.amount),
        })
        .collect();
    output.table(rows);

    output.section("Price");
    output.kv("Unit cost", money(breakdown.unit_cost));
    output.kv("Markup", format!("{:.1}%", breakdown.markup * 100.0));
    output.kv("Unit price", money(breakdown.unit_price));
    output.kv("Total price", money(breakdown.total_price));

    output.section("Production");
    output.kv("Cardboard area", format!("{:.4} m²", breakdown.cardboard_area_m2));
    output.kv("Boxes per sheet", breakdown.units_per_sheet);
    match breakdown.sheets_needed {
        Some(sheets) => output.kv("Sheets needed", sheets),
        None => output.kv("Sheets needed", "box does not fit the sheet"),
    }
    output.kv("Boxes per carton", breakdown.units_per_carton);
    output.kv("Packaging per unit", money(breakdown.packaging_cost_per_unit));

    Ok(())
}

fn build_request(args: &QuoteArgs) -> (BoxSpec, FinishingOptions) {
    let dims = &args.dimensions;
    let spec = BoxSpec::new(
        Dimensions::from_unit(dims.width, dims.height, dims.depth, dims.unit),
        dims.lid,
        args.material,
        args.quantity,
    );

    let options = FinishingOptions {
        cradle: args.cradle,
        niche: args.niche,
        screen_print: args
            .screen_colors
            .map(|colors| ScreenPrint::new(colors, args.screen_passes)),
        digital_print: args.digital_print,
        coating: args.coating,
        hot_glue: args.hot_glue,
        foam_glue: args.foam_glue,
        tape_meters: args.tape,
        rivet_count: args.rivets,
        markup: args.markup,
    };

    (spec, options)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::{Cli, Commands};
    use boxcpq_core::models::{LidStyle, PaperSize};
    use clap::Parser;

    fn quote_args(argv: &[&str]) -> QuoteArgs {
        let cli = Cli::try_parse_from(argv).unwrap();
        match cli.command {
            Commands::Quote(args) => args,
            other => panic!("Expected quote, got {:?}", other),
        }
    }

    #[test]
    fn test_request_converts_centimeters() {
        let args = quote_args(&["boxcpq", "quote", "20", "15", "10", "--lid", "book"]);
        let (spec, options) = build_request(&args);

        assert_eq!(spec.dimensions, Dimensions::new(200.0, 150.0, 100.0));
        assert_eq!(spec.lid_style, LidStyle::BookLid);
        assert_eq!(options, FinishingOptions::default());
    }

    #[test]
    fn test_request_carries_finishing_flags() {
        let args = quote_args(&[
            "boxcpq",
            "quote",
            "200",
            "150",
            "100",
            "--unit",
            "mm",
            "--cradle",
            "--niche",
            "--screen-colors",
            "3",
            "--screen-passes",
            "2",
            "--digital-print",
            "a3",
            "--tape",
            "1.5",
            "--rivets",
            "4",
        ]);
        let (spec, options) = build_request(&args);

        assert_eq!(spec.dimensions.width_mm, 200.0);
        assert!(options.cradle && options.niche);
        assert_eq!(options.screen_print, Some(ScreenPrint::new(3, 2)));
        assert_eq!(options.digital_print, Some(PaperSize::A3));
        assert_eq!(options.tape_meters, 1.5);
        assert_eq!(options.rivet_count, 4);
    }
}

use boxcpq_core::models::{CoatingType, ComplexityPolicy, LengthUnit, LidStyle, Material, PaperSize};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// boxcpq - Configure, price and quote custom boxes
#[derive(Parser, Debug)]
#[command(name = "boxcpq")]
#[command(about = "Configure, price and quote custom boxes", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Output results in JSON format
    #[arg(long, global = true)]
    pub json: bool,

    /// Storage backend for the coefficient tables (memory or postgres)
    #[arg(long, global = true)]
    pub storage: Option<StorageBackend>,

    /// TOML file with [constants] and [fixed_costs] tables, for the memory backend
    #[arg(long, global = true, value_name = "FILE")]
    pub coefficients: Option<PathBuf>,

    /// Whether cradle and niche multipliers are charged
    #[arg(long, global = true)]
    pub complexity: Option<ComplexityArg>,

    /// Configuration file (defaults to ./boxcpq.toml when present)
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Storage backend selection
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum StorageBackend {
    /// Tables loaded from a TOML file
    Memory,
    /// Tables read from PostgreSQL (DATABASE_URL)
    Postgres,
}

impl From<StorageBackend> for boxcpq_core::config::StorageBackend {
    fn from(backend: StorageBackend) -> Self {
        match backend {
            StorageBackend::Memory => Self::Memory,
            StorageBackend::Postgres => Self::Postgres,
        }
    }
}

/// Complexity policy selection
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum ComplexityArg {
    /// Cradle and niche add no cost
    Ignore,
    /// Cradle and niche scale the variable cost
    Apply,
}

impl From<ComplexityArg> for ComplexityPolicy {
    fn from(arg: ComplexityArg) -> Self {
        match arg {
            ComplexityArg::Ignore => Self::Ignore,
            ComplexityArg::Apply => Self::Apply,
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Calculate the itemized cost and price of a box
    Quote(QuoteArgs),

    /// Flatten a box and report areas, perimeter and packing
    Geometry(GeometryArgs),

    /// List cost coefficients and the fixed-cost allocation
    Constants(ConstantsArgs),

    /// Show the effective configuration and where each value came from
    Config,
}

/// Box outline shared by quote and geometry
#[derive(Args, Debug)]
pub struct BoxArgs {
    /// Width
    #[arg(allow_negative_numbers = true)]
    pub width: f64,

    /// Height
    #[arg(allow_negative_numbers = true)]
    pub height: f64,

    /// Depth
    #[arg(allow_negative_numbers = true)]
    pub depth: f64,

    /// Unit of the dimensions (cm or mm)
    #[arg(long, default_value = "cm")]
    pub unit: LengthUnit,

    /// Lid style (loose, book, sleeve, magnetic, round)
    #[arg(long, default_value = "loose")]
    pub lid: LidStyle,
}

#[derive(Args, Debug)]
pub struct QuoteArgs {
    #[command(flatten)]
    pub dimensions: BoxArgs,

    /// Structural material (cardboard or acrylic)
    #[arg(long, default_value = "cardboard")]
    pub material: Material,

    /// Number of boxes
    #[arg(short, long, default_value_t = 1)]
    pub quantity: u32,

    /// Add a cradle insert
    #[arg(long)]
    pub cradle: bool,

    /// Cut a niche into the cradle
    #[arg(long)]
    pub niche: bool,

    /// Screen printing with this many colors
    #[arg(long, value_name = "COLORS")]
    pub screen_colors: Option<u32>,

    /// Screen printing passes
    #[arg(long, value_name = "PASSES", default_value_t = 1)]
    pub screen_passes: u32,

    /// Digital printing paper size (A4 or A3)
    #[arg(long, value_name = "SIZE")]
    pub digital_print: Option<PaperSize>,

    /// Coating (paper or uv-vinyl); cardboard without one gets paper
    #[arg(long)]
    pub coating: Option<CoatingType>,

    /// Hot glue assembly
    #[arg(long)]
    pub hot_glue: bool,

    /// Foam glue assembly
    #[arg(long)]
    pub foam_glue: bool,

    /// Tape in meters
    #[arg(long, value_name = "METERS", default_value_t = 0.0)]
    pub tape: f64,

    /// Number of rivets
    #[arg(long, default_value_t = 0)]
    pub rivets: u32,

    /// Fractional markup over unit cost (0.5 = +50%)
    #[arg(long, default_value_t = 0.0)]
    pub markup: f64,
}

#[derive(Args, Debug)]
pub struct GeometryArgs {
    #[command(flatten)]
    pub dimensions: BoxArgs,

    /// Also report how many sheets this many boxes need
    #[arg(short, long)]
    pub quantity: Option<u32>,
}

#[derive(Args, Debug)]
pub struct ConstantsArgs {
    /// Show a single coefficient
    pub name: Option<String>,

    /// Drop the cached tables and fetch them again
    #[arg(long)]
    pub refresh: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quote_args_parse() {
        let cli = Cli::try_parse_from([
            "boxcpq", "quote", "20", "15", "10", "--lid", "magnetic", "-q", "50", "--markup", "0.4",
            "--screen-colors", "2",
        ])
        .unwrap();

        match cli.command {
            Commands::Quote(args) => {
                assert_eq!(args.dimensions.width, 20.0);
                assert_eq!(args.dimensions.unit, LengthUnit::Centimeters);
                assert_eq!(args.dimensions.lid, LidStyle::MagneticLid);
                assert_eq!(args.material, Material::Cardboard);
                assert_eq!(args.quantity, 50);
                assert_eq!(args.screen_colors, Some(2));
                assert_eq!(args.screen_passes, 1);
                assert_eq!(args.markup, 0.4);
            }
            other => panic!("Expected quote, got {:?}", other),
        }
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "boxcpq",
            "geometry",
            "200",
            "200",
            "100",
            "--unit",
            "mm",
            "--lid",
            "round",
            "--json",
            "--storage",
            "postgres",
            "--complexity",
            "apply",
        ])
        .unwrap();

        assert!(cli.json);
        assert!(matches!(cli.storage, Some(StorageBackend::Postgres)));
        assert!(matches!(cli.complexity, Some(ComplexityArg::Apply)));
        match cli.command {
            Commands::Geometry(args) => {
                assert_eq!(args.dimensions.unit, LengthUnit::Millimeters);
                assert_eq!(args.dimensions.lid, LidStyle::RoundLid);
                assert_eq!(args.quantity, None);
            }
            other => panic!("Expected geometry, got {:?}", other),
        }
    }

    #[test]
    fn test_unknown_lid_is_rejected() {
        let result = Cli::try_parse_from(["boxcpq", "quote", "20", "15", "10", "--lid", "pyramid"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_negative_dimension_reaches_validation() {
        let cli = Cli::try_parse_from(["boxcpq", "geometry", "-5", "15", "10"]).unwrap();
        match cli.command {
            Commands::Geometry(args) => assert_eq!(args.dimensions.width, -5.0),
            other => panic!("Expected geometry, got {:?}", other),
        }
    }
}

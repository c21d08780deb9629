pub mod box_spec;
pub mod coefficients;
pub mod finishing;
pub mod policy;

pub use box_spec::{BoxSpec, Dimensions, LengthUnit, LidStyle, Material};
pub use coefficients::{keys, normalize_line_item_name, CostCoefficients, FixedCostAllocation};
pub use finishing::{CoatingType, FinishingOptions, PaperSize, ScreenPrint};
pub use policy::ComplexityPolicy;

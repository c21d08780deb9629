//! boxcpq Pricing - Cost decomposition and the quote engine
//!
//! `decomposition` holds the pure arithmetic over geometry, coefficients and
//! finishing options. `CostEngine` wires it to the cached constant store and
//! reports every failure as a single calculation error.

pub mod decomposition;
pub mod engine;
pub mod models;

pub use decomposition::decompose;
pub use engine::CostEngine;
pub use models::{CostBreakdown, CostLine};

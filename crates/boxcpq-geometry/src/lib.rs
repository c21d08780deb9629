//! boxcpq geometry - flattening, adhesive contact and packing
//!
//! Everything in this crate is a pure function of the box dimensions, the
//! lid style and the sheet layout. All lengths are millimeters and all
//! areas square millimeters; conversion to meters happens at the cost
//! boundary.

pub mod constants;
pub mod flatten;
pub mod models;
pub mod packing;
pub mod validation;

pub use flatten::flatten_box;
pub use models::{GeometryResult, Panel, PanelKind, PanelShape, SheetGrid, SheetLayout};

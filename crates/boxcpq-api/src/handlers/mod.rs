mod constants;
mod geometry;
mod health;
mod quotes;

pub use constants::{invalidate_constants, list_constants};
pub use geometry::calculate_geometry;
pub use health::health_check;
pub use quotes::calculate_quote;

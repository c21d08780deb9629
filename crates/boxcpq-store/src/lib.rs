//! boxcpq Store - Coefficient source ports, adapters and the cached constant store
//!
//! The `CoefficientSource` port is implemented by an in-memory adapter
//! (optionally seeded from TOML) and a PostgreSQL adapter. `ConstantStore`
//! wraps any source with a process-lifetime cache.

pub mod cache;
pub mod memory;
pub mod ports;
pub mod postgres;

pub use cache::{CoefficientSnapshot, ConstantStore};
pub use memory::MemoryCoefficientSource;
pub use ports::CoefficientSource;

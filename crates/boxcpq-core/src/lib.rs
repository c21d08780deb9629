//! boxcpq Core - Domain models, errors, and configuration
//!
//! This crate contains the box specification, finishing options, cost
//! coefficient types, and layered configuration shared by every other crate.

pub mod config;
pub mod error;
pub mod models;

pub use error::{CpqError, Result};

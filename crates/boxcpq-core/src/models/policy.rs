use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{CpqError, Result};

/// Whether cradle/niche complexity multipliers feed into unit cost.
///
/// The quoting flow in production has never charged for them, so `Ignore`
/// is the default until product confirms the intended pricing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ComplexityPolicy {
    /// Cradle and niche add no cost
    #[default]
    Ignore,
    /// Variable cost is scaled by `multiplicador_berco` or `multiplicador_ambos`
    Apply,
}

impl fmt::Display for ComplexityPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ComplexityPolicy::Ignore => f.write_str("ignore"),
            ComplexityPolicy::Apply => f.write_str("apply"),
        }
    }
}

impl FromStr for ComplexityPolicy {
    type Err = CpqError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "ignore" | "off" | "false" => Ok(ComplexityPolicy::Ignore),
            "apply" | "on" | "true" => Ok(ComplexityPolicy::Apply),
            _ => Err(CpqError::ConfigInvalid {
                key: "complexity".to_string(),
                reason: format!("Invalid complexity policy: {}. Use ignore or apply", s),
            }),
        }
    }
}

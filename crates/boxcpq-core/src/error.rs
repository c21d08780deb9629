//! Error types for boxcpq

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CpqError {
    // Input validation errors
    #[error("Invalid dimension {field} = {value}: must be greater than zero")]
    InvalidDimension { field: &'static str, value: f64 },

    #[error("Invalid quantity {value}: must be greater than zero")]
    InvalidQuantity { value: u32 },

    #[error("Invalid option {field}: {reason}")]
    InvalidOption { field: &'static str, reason: String },

    #[error("Invalid option combination: {reason}")]
    InvalidOptionCombination { reason: String },

    #[error("Unsupported {kind} '{value}'")]
    UnsupportedVariant { kind: &'static str, value: String },

    // Configuration errors
    #[error("Missing required configuration: {key}")]
    ConfigMissing { key: String },

    #[error("Invalid configuration value for {key}: {reason}")]
    ConfigInvalid { key: String, reason: String },

    #[error("Coefficient source unavailable: {reason}")]
    SourceUnavailable { reason: String },

    #[error("Configuration file not found at {path}")]
    ConfigFileNotFound { path: PathBuf },

    // Calculation boundary
    #[error("Calculation failed: {source}")]
    Calculation {
        #[source]
        source: Box<CpqError>,
    },

    // IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // Serialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl CpqError {
    /// Wrap an error as a calculation failure.
    ///
    /// Already-wrapped errors are returned unchanged so the cause chain
    /// never nests two calculation layers.
    pub fn calculation(cause: CpqError) -> Self {
        match cause {
            CpqError::Calculation { .. } => cause,
            other => CpqError::Calculation {
                source: Box::new(other),
            },
        }
    }

    /// The innermost error, looking through a calculation wrapper
    pub fn root_cause(&self) -> &CpqError {
        match self {
            CpqError::Calculation { source } => source.root_cause(),
            other => other,
        }
    }

    /// True for errors caused by missing or malformed coefficients
    pub fn is_configuration(&self) -> bool {
        matches!(
            self.root_cause(),
            CpqError::ConfigMissing { .. }
                | CpqError::ConfigInvalid { .. }
                | CpqError::SourceUnavailable { .. }
                | CpqError::ConfigFileNotFound { .. }
        )
    }

    /// True for errors caused by the caller's input
    pub fn is_validation(&self) -> bool {
        matches!(
            self.root_cause(),
            CpqError::InvalidDimension { .. }
                | CpqError::InvalidQuantity { .. }
                | CpqError::InvalidOption { .. }
                | CpqError::InvalidOptionCombination { .. }
                | CpqError::UnsupportedVariant { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, CpqError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_calculation_wraps_once() {
        let inner = CpqError::ConfigMissing {
            key: "custo_papelao_m2".to_string(),
        };
        let wrapped = CpqError::calculation(CpqError::calculation(inner));

        match &wrapped {
            CpqError::Calculation { source } => {
                assert!(matches!(**source, CpqError::ConfigMissing { .. }));
            }
            other => panic!("Expected Calculation, got {:?}", other),
        }
        assert!(wrapped.is_configuration());
        assert!(!wrapped.is_validation());
    }

    #[test]
    fn test_validation_classification() {
        let err = CpqError::calculation(CpqError::InvalidOptionCombination {
            reason: "niche requires cradle".to_string(),
        });
        assert!(err.is_validation());
        assert!(matches!(err.root_cause(), CpqError::InvalidOptionCombination { .. }));
    }

    #[test]
    fn test_display_includes_cause() {
        let err = CpqError::calculation(CpqError::InvalidDimension {
            field: "width",
            value: 0.0,
        });
        assert_eq!(
            err.to_string(),
            "Calculation failed: Invalid dimension width = 0: must be greater than zero"
        );
    }
}

use crate::models::SheetLayout;
use boxcpq_core::models::{keys, Dimensions};
use boxcpq_core::{CpqError, Result};

/// Validate box dimensions before flattening
pub fn validate_dimensions(dimensions: &Dimensions) -> Result<()> {
    dimensions.validate()
}

/// Validate a sheet layout read from the coefficient source
pub fn validate_layout(layout: &SheetLayout) -> Result<()> {
    check_positive(keys::SHEET_WIDTH_MM, layout.sheet_width_mm)?;
    check_positive(keys::SHEET_HEIGHT_MM, layout.sheet_height_mm)?;
    check_non_negative(keys::SHEET_MARGIN_MM, layout.margin_mm)?;
    check_non_negative(keys::CARDBOARD_THICKNESS_MM, layout.thickness_mm)?;

    if layout.margin_mm >= layout.sheet_width_mm.min(layout.sheet_height_mm) {
        return Err(CpqError::ConfigInvalid {
            key: keys::SHEET_MARGIN_MM.to_string(),
            reason: format!(
                "margin {} leaves no usable area on a {}x{} sheet",
                layout.margin_mm, layout.sheet_width_mm, layout.sheet_height_mm
            ),
        });
    }

    Ok(())
}

fn check_positive(key: &str, value: f64) -> Result<()> {
    if !value.is_finite() || value <= 0.0 {
        return Err(CpqError::ConfigInvalid {
            key: key.to_string(),
            reason: format!("must be greater than zero, got {}", value),
        });
    }
    Ok(())
}

fn check_non_negative(key: &str, value: f64) -> Result<()> {
    if !value.is_finite() || value < 0.0 {
        return Err(CpqError::ConfigInvalid {
            key: key.to_string(),
            reason: format!("must be zero or positive, got {}", value),
        });
    }
    Ok(())
}

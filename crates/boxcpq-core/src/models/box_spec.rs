use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{CpqError, Result};

use super::finishing::CoatingType;

/// Lid style, which decides how the box is flattened for die-cutting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LidStyle {
    /// Separate base and telescoping lid
    #[serde(alias = "Tampa Solta")]
    LooseLid,
    /// Hinged lid cut from one continuous panel
    #[serde(alias = "Tampa Livro")]
    BookLid,
    /// Base and lid with a sleeve flap
    #[serde(alias = "Tampa Luva")]
    SleeveLid,
    /// Base and lid closed by magnet pairs
    #[serde(alias = "Tampa Imã")]
    MagneticLid,
    /// Cylindrical base with a round lid
    #[serde(alias = "Tampa Redonda")]
    RoundLid,
}

impl LidStyle {
    pub const ALL: [LidStyle; 5] = [
        LidStyle::LooseLid,
        LidStyle::BookLid,
        LidStyle::SleeveLid,
        LidStyle::MagneticLid,
        LidStyle::RoundLid,
    ];

    /// Human-readable label
    pub fn label(self) -> &'static str {
        match self {
            LidStyle::LooseLid => "Loose lid",
            LidStyle::BookLid => "Book lid",
            LidStyle::SleeveLid => "Sleeve lid",
            LidStyle::MagneticLid => "Magnetic lid",
            LidStyle::RoundLid => "Round lid",
        }
    }
}

impl fmt::Display for LidStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for LidStyle {
    type Err = CpqError;

    fn from_str(s: &str) -> Result<Self> {
        let normalized = s.trim().to_lowercase().replace(['-', '_', ' '], "");
        match normalized.as_str() {
            "loose" | "looselid" | "tampasolta" => Ok(LidStyle::LooseLid),
            "book" | "booklid" | "tampalivro" => Ok(LidStyle::BookLid),
            "sleeve" | "sleevelid" | "tampaluva" => Ok(LidStyle::SleeveLid),
            "magnetic" | "magneticlid" | "tampaimã" | "tampaima" => Ok(LidStyle::MagneticLid),
            "round" | "roundlid" | "tamparedonda" => Ok(LidStyle::RoundLid),
            _ => Err(CpqError::UnsupportedVariant {
                kind: "lid style",
                value: s.to_string(),
            }),
        }
    }
}

/// Structural material of the box
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Material {
    #[serde(alias = "Papelão")]
    Cardboard,
    #[serde(alias = "Acrílico")]
    Acrylic,
}

impl Material {
    /// Coatings that can be applied over this material
    pub fn available_coatings(self) -> &'static [CoatingType] {
        match self {
            Material::Cardboard => &[CoatingType::UvVinyl, CoatingType::Paper],
            Material::Acrylic => &[CoatingType::None],
        }
    }

    /// Cardboard is assembled with PVA and seam glue; acrylic is not
    pub fn uses_pva_glue(self) -> bool {
        matches!(self, Material::Cardboard)
    }
}

impl fmt::Display for Material {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Material::Cardboard => f.write_str("Cardboard"),
            Material::Acrylic => f.write_str("Acrylic"),
        }
    }
}

impl FromStr for Material {
    type Err = CpqError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "cardboard" | "papelão" | "papelao" => Ok(Material::Cardboard),
            "acrylic" | "acrílico" | "acrilico" => Ok(Material::Acrylic),
            _ => Err(CpqError::UnsupportedVariant {
                kind: "material",
                value: s.to_string(),
            }),
        }
    }
}

/// Linear unit used by callers. The core always works in millimeters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LengthUnit {
    #[serde(alias = "mm")]
    Millimeters,
    #[default]
    #[serde(alias = "cm")]
    Centimeters,
}

impl LengthUnit {
    /// Millimeters per unit
    pub fn to_mm_factor(self) -> f64 {
        match self {
            LengthUnit::Millimeters => 1.0,
            LengthUnit::Centimeters => 10.0,
        }
    }
}

impl FromStr for LengthUnit {
    type Err = CpqError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "mm" | "millimeters" => Ok(LengthUnit::Millimeters),
            "cm" | "centimeters" => Ok(LengthUnit::Centimeters),
            _ => Err(CpqError::UnsupportedVariant {
                kind: "length unit",
                value: s.to_string(),
            }),
        }
    }
}

/// Outer box dimensions in millimeters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Dimensions {
    pub width_mm: f64,
    pub height_mm: f64,
    pub depth_mm: f64,
}

impl Dimensions {
    pub fn new(width_mm: f64, height_mm: f64, depth_mm: f64) -> Self {
        Self {
            width_mm,
            height_mm,
            depth_mm,
        }
    }

    /// Build from values expressed in `unit`
    pub fn from_unit(width: f64, height: f64, depth: f64, unit: LengthUnit) -> Self {
        let factor = unit.to_mm_factor();
        Self::new(width * factor, height * factor, depth * factor)
    }

    /// Every dimension must be finite and strictly positive
    pub fn validate(&self) -> Result<()> {
        for (field, value) in [
            ("width", self.width_mm),
            ("height", self.height_mm),
            ("depth", self.depth_mm),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(CpqError::InvalidDimension { field, value });
            }
        }
        Ok(())
    }

    pub fn as_array(&self) -> [f64; 3] {
        [self.width_mm, self.height_mm, self.depth_mm]
    }
}

/// A box to be quoted
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoxSpec {
    pub dimensions: Dimensions,
    pub lid_style: LidStyle,
    pub material: Material,
    pub quantity: u32,
}

impl BoxSpec {
    /// Create a spec from millimeter dimensions
    pub fn new(
        dimensions: Dimensions,
        lid_style: LidStyle,
        material: Material,
        quantity: u32,
    ) -> Self {
        Self {
            dimensions,
            lid_style,
            material,
            quantity,
        }
    }

    /// Create a spec from centimeter dimensions, as entered on the quote form
    pub fn from_centimeters(
        width_cm: f64,
        height_cm: f64,
        depth_cm: f64,
        lid_style: LidStyle,
        material: Material,
        quantity: u32,
    ) -> Self {
        Self::new(
            Dimensions::from_unit(width_cm, height_cm, depth_cm, LengthUnit::Centimeters),
            lid_style,
            material,
            quantity,
        )
    }

    pub fn validate(&self) -> Result<()> {
        self.dimensions.validate()?;
        if self.quantity == 0 {
            return Err(CpqError::InvalidQuantity {
                value: self.quantity,
            });
        }
        Ok(())
    }
}

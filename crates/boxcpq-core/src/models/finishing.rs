use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{CpqError, Result};

use super::box_spec::Material;

/// Surface coating applied over the structure
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CoatingType {
    #[serde(alias = "Nenhum")]
    None,
    #[serde(alias = "Papel")]
    Paper,
    #[serde(alias = "Vinil UV")]
    UvVinyl,
}

impl fmt::Display for CoatingType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CoatingType::None => f.write_str("None"),
            CoatingType::Paper => f.write_str("Paper"),
            CoatingType::UvVinyl => f.write_str("UV vinyl"),
        }
    }
}

impl FromStr for CoatingType {
    type Err = CpqError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().replace(['-', '_', ' '], "").as_str() {
            "none" | "nenhum" => Ok(CoatingType::None),
            "paper" | "papel" => Ok(CoatingType::Paper),
            "uvvinyl" | "vinyl" | "vinyluv" | "viniluv" => Ok(CoatingType::UvVinyl),
            _ => Err(CpqError::UnsupportedVariant {
                kind: "coating",
                value: s.to_string(),
            }),
        }
    }
}

/// Paper size for digital printing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PaperSize {
    A4,
    A3,
}

impl fmt::Display for PaperSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PaperSize::A4 => f.write_str("A4"),
            PaperSize::A3 => f.write_str("A3"),
        }
    }
}

impl FromStr for PaperSize {
    type Err = CpqError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_uppercase().as_str() {
            "A4" => Ok(PaperSize::A4),
            "A3" => Ok(PaperSize::A3),
            _ => Err(CpqError::UnsupportedVariant {
                kind: "paper size",
                value: s.to_string(),
            }),
        }
    }
}

/// Screen-printing job
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScreenPrint {
    /// Number of ink colors (at least 1)
    pub colors: u32,
    /// Number of print passes (at least 1)
    pub passes: u32,
}

impl ScreenPrint {
    pub fn new(colors: u32, passes: u32) -> Self {
        Self { colors, passes }
    }
}

/// Optional add-ons applied on top of the bare box
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FinishingOptions {
    /// Insert that holds the product in place
    pub cradle: bool,
    /// Cut-out inside the cradle; only valid together with a cradle
    pub niche: bool,
    pub screen_print: Option<ScreenPrint>,
    pub digital_print: Option<PaperSize>,
    /// Requested coating; `None` means "not specified"
    pub coating: Option<CoatingType>,
    pub hot_glue: bool,
    pub foam_glue: bool,
    pub tape_meters: f64,
    pub rivet_count: u32,
    /// Fractional markup over unit cost (0.5 = +50%)
    pub markup: f64,
}

impl Default for FinishingOptions {
    fn default() -> Self {
        Self {
            cradle: false,
            niche: false,
            screen_print: None,
            digital_print: None,
            coating: None,
            hot_glue: false,
            foam_glue: false,
            tape_meters: 0.0,
            rivet_count: 0,
            markup: 0.0,
        }
    }
}

impl FinishingOptions {
    pub fn with_markup(mut self, markup: f64) -> Self {
        self.markup = markup;
        self
    }

    pub fn with_cradle(mut self) -> Self {
        self.cradle = true;
        self
    }

    /// Niche cut into the cradle; only valid together with `with_cradle`
    pub fn with_niche(mut self) -> Self {
        self.niche = true;
        self
    }

    pub fn with_coating(mut self, coating: CoatingType) -> Self {
        self.coating = Some(coating);
        self
    }

    pub fn with_screen_print(mut self, colors: u32, passes: u32) -> Self {
        self.screen_print = Some(ScreenPrint::new(colors, passes));
        self
    }

    pub fn with_digital_print(mut self, paper: PaperSize) -> Self {
        self.digital_print = Some(paper);
        self
    }

    /// Check option ranges and combinations
    pub fn validate(&self) -> Result<()> {
        if self.niche && !self.cradle {
            return Err(CpqError::InvalidOptionCombination {
                reason: "a niche can only be selected together with a cradle".to_string(),
            });
        }

        if let Some(print) = self.screen_print {
            if print.colors == 0 {
                return Err(CpqError::InvalidOption {
                    field: "screen_print.colors",
                    reason: "at least one color is required".to_string(),
                });
            }
            if print.passes == 0 {
                return Err(CpqError::InvalidOption {
                    field: "screen_print.passes",
                    reason: "at least one print pass is required".to_string(),
                });
            }
        }

        if !self.tape_meters.is_finite() || self.tape_meters < 0.0 {
            return Err(CpqError::InvalidOption {
                field: "tape_meters",
                reason: format!("must be zero or positive, got {}", self.tape_meters),
            });
        }

        if !self.markup.is_finite() || self.markup < 0.0 {
            return Err(CpqError::InvalidOption {
                field: "markup",
                reason: format!("must be zero or positive, got {}", self.markup),
            });
        }

        Ok(())
    }

    /// The coating actually applied for `material`.
    ///
    /// This is the only place the default-coating rule lives: cardboard is
    /// always covered, so an unspecified or `None` coating becomes `Paper`;
    /// acrylic takes no coating whatever was requested.
    pub fn effective_coating(&self, material: Material) -> CoatingType {
        match material {
            Material::Cardboard => match self.coating {
                None | Some(CoatingType::None) => CoatingType::Paper,
                Some(coating) => coating,
            },
            Material::Acrylic => CoatingType::None,
        }
    }
}

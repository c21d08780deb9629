//! Geometry models for boxcpq-geometry.
//!
//! Panels are kept as outlines so that area and perimeter are derived from
//! the same shape. Rectangular panels go through `geo::Rect`.

use boxcpq_core::models::{keys, CostCoefficients, LidStyle};
use boxcpq_core::Result;
use geo::{coord, Area, Rect};
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

/// Raw sheet layout used for die-cutting
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SheetLayout {
    pub sheet_width_mm: f64,
    pub sheet_height_mm: f64,
    pub margin_mm: f64,
    pub thickness_mm: f64,
}

impl SheetLayout {
    pub fn new(sheet_width_mm: f64, sheet_height_mm: f64, margin_mm: f64, thickness_mm: f64) -> Self {
        Self {
            sheet_width_mm,
            sheet_height_mm,
            margin_mm,
            thickness_mm,
        }
    }

    /// Read the layout coefficients. Every one of them must be present.
    pub fn from_coefficients(coefficients: &CostCoefficients) -> Result<Self> {
        let layout = Self::new(
            coefficients.get(keys::SHEET_WIDTH_MM)?,
            coefficients.get(keys::SHEET_HEIGHT_MM)?,
            coefficients.get(keys::SHEET_MARGIN_MM)?,
            coefficients.get(keys::CARDBOARD_THICKNESS_MM)?,
        );
        crate::validation::validate_layout(&layout)?;
        Ok(layout)
    }

    /// Sheet area left once the margin is taken off each axis
    pub fn usable_area_mm2(&self) -> f64 {
        (self.sheet_width_mm - self.margin_mm) * (self.sheet_height_mm - self.margin_mm)
    }
}

/// Role of a panel in the die-cut pattern
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PanelKind {
    Base,
    Lid,
    /// Single continuous panel of a book lid
    Body,
    SleeveFlap,
    MagnetStrip,
}

/// Outline of a flattened panel
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "shape", rename_all = "snake_case")]
pub enum PanelShape {
    Rectangle { width_mm: f64, height_mm: f64 },
    Circle { diameter_mm: f64 },
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Panel {
    pub kind: PanelKind,
    #[serde(flatten)]
    pub shape: PanelShape,
}

impl Panel {
    pub fn rectangle(kind: PanelKind, width_mm: f64, height_mm: f64) -> Self {
        Self {
            kind,
            shape: PanelShape::Rectangle {
                width_mm,
                height_mm,
            },
        }
    }

    pub fn circle(kind: PanelKind, diameter_mm: f64) -> Self {
        Self {
            kind,
            shape: PanelShape::Circle { diameter_mm },
        }
    }

    pub fn area_mm2(&self) -> f64 {
        match self.shape {
            PanelShape::Rectangle {
                width_mm,
                height_mm,
            } => to_rect(width_mm, height_mm).unsigned_area(),
            PanelShape::Circle { diameter_mm } => {
                let radius = diameter_mm / 2.0;
                PI * radius * radius
            }
        }
    }

    pub fn perimeter_mm(&self) -> f64 {
        match self.shape {
            PanelShape::Rectangle {
                width_mm,
                height_mm,
            } => {
                let rect = to_rect(width_mm, height_mm);
                2.0 * (rect.width() + rect.height())
            }
            PanelShape::Circle { diameter_mm } => PI * diameter_mm,
        }
    }
}

fn to_rect(width: f64, height: f64) -> Rect<f64> {
    Rect::new(coord! { x: 0.0, y: 0.0 }, coord! { x: width, y: height })
}

/// Column/row arrangement of single-panel styles on a sheet
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SheetGrid {
    #[serde(rename = "colunas_por_chapa")]
    pub columns: u32,
    #[serde(rename = "linhas_por_chapa")]
    pub rows: u32,
}

impl SheetGrid {
    pub fn units(&self) -> u32 {
        self.columns.saturating_mul(self.rows)
    }
}

/// Flattening, adhesive and packing figures for one box
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeometryResult {
    pub lid_style: LidStyle,

    /// Absent for single-panel styles
    #[serde(rename = "area_base_mm2")]
    pub base_area_mm2: Option<f64>,

    #[serde(rename = "area_tampa_mm2")]
    pub lid_area_mm2: Option<f64>,

    /// Sleeve flap or magnet strip
    #[serde(rename = "area_extra_mm2")]
    pub auxiliary_area_mm2: Option<f64>,

    /// Total die-cut area
    #[serde(rename = "area_total_mm2")]
    pub total_area_mm2: f64,

    #[serde(rename = "perimetro_total_mm")]
    pub perimeter_mm: f64,

    /// Single-sided area that receives PVA glue
    #[serde(rename = "area_colagem_mm2")]
    pub contact_area_mm2: f64,

    #[serde(rename = "caixas_por_chapa")]
    pub units_per_sheet: u32,

    #[serde(rename = "caixas_por_embalagem")]
    pub units_per_carton: u32,

    #[serde(flatten)]
    pub sheet_grid: Option<SheetGrid>,

    pub panels: Vec<Panel>,
}

impl GeometryResult {
    pub fn total_area_m2(&self) -> f64 {
        self.total_area_mm2 / 1_000_000.0
    }

    pub fn contact_area_m2(&self) -> f64 {
        self.contact_area_mm2 / 1_000_000.0
    }

    pub fn perimeter_m(&self) -> f64 {
        self.perimeter_mm / 1000.0
    }

    /// Raw sheets needed for `quantity` boxes, `None` when a box does not fit on a sheet
    pub fn sheets_needed(&self, quantity: u32) -> Option<u32> {
        if self.units_per_sheet == 0 {
            return None;
        }
        Some(quantity.div_ceil(self.units_per_sheet))
    }
}

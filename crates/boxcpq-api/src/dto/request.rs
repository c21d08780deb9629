use boxcpq_core::models::{BoxSpec, Dimensions, FinishingOptions, LidStyle, Material};
use serde::Deserialize;

/// Quote request body; dimensions in centimeters as entered on the quote form
#[derive(Debug, Deserialize)]
pub struct QuoteRequest {
    #[serde(alias = "largura")]
    pub width_cm: f64,
    #[serde(alias = "altura")]
    pub height_cm: f64,
    #[serde(alias = "profundidade")]
    pub depth_cm: f64,
    #[serde(alias = "modelo")]
    pub lid_style: LidStyle,
    pub material: Material,
    #[serde(alias = "quantidade", default = "default_quantity")]
    pub quantity: u32,
    #[serde(default)]
    pub options: FinishingOptions,
}

fn default_quantity() -> u32 {
    1
}

impl QuoteRequest {
    pub fn to_spec(&self) -> BoxSpec {
        BoxSpec::from_centimeters(
            self.width_cm,
            self.height_cm,
            self.depth_cm,
            self.lid_style,
            self.material,
            self.quantity,
        )
    }
}

/// Geometry request body; dimensions in centimeters
#[derive(Debug, Deserialize)]
pub struct GeometryRequest {
    #[serde(alias = "largura")]
    pub width_cm: f64,
    #[serde(alias = "altura")]
    pub height_cm: f64,
    #[serde(alias = "profundidade")]
    pub depth_cm: f64,
    #[serde(alias = "modelo")]
    pub lid_style: LidStyle,
    /// When present, the response also carries the sheets needed
    #[serde(alias = "quantidade")]
    pub quantity: Option<u32>,
}

impl GeometryRequest {
    pub fn dimensions(&self) -> Dimensions {
        Dimensions::from_unit(
            self.width_cm,
            self.height_cm,
            self.depth_cm,
            boxcpq_core::models::LengthUnit::Centimeters,
        )
    }
}

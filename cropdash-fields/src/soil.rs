use serde::{Deserialize, Serialize};

/// Per-field soil health record as supplied by the feature source.
///
/// All numeric fields are optional on the wire; fallback resolution
/// happens during aggregation, not here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SoilHealthRecord {
    /// Overall soil health, 0-100.
    pub health_percentage: Option<f64>,
    /// Crop age in days.
    pub crop_age: Option<f64>,
    /// Standard yield estimate in quintals.
    pub standard_yield: Option<f64>,
    /// Model-predicted yield in quintals.
    pub ai_yield: Option<f64>,
    /// Ordered nutrient readings; slot positions are aligned across
    /// features, not keyed by symbol.
    #[serde(default)]
    pub nutrients: Vec<Nutrient>,
    /// Readings per soil layer.
    pub layers: Option<SoilLayers>,
}

/// One nutrient slot with this-year and last-year amounts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Nutrient {
    pub symbol: String,
    pub label: String,
    #[serde(rename = "thisYearAmount")]
    pub this_year: f64,
    #[serde(rename = "lastYearAmount")]
    pub last_year: f64,
}

/// Temperature/moisture readings keyed by soil layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SoilLayers {
    pub surface: Option<LayerReading>,
    pub subsoil: Option<LayerReading>,
    pub parent_material: Option<LayerReading>,
}

/// A single layer reading: temperature in degrees Celsius and
/// volumetric moisture fraction.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LayerReading {
    pub temperature: f64,
    pub moisture: f64,
}

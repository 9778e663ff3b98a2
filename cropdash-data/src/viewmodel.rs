//! Aggregate view-model structs published to display consumers.
//!
//! All structs derive `Serialize` so the view-model can be handed to a
//! chart layer or printed as JSON by the CLI. Values are already
//! display-rounded (two decimals for NDVI/EVI/SAVI, one for VHI);
//! consumers render them as-is.

use chrono::{DateTime, Utc};
use cropdash_fields::series::SeriesPoint;
use serde::Serialize;

/// Healthy-farm tally for the dashboard tile ("18 of 26").
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub struct FarmCount {
    /// Features whose crop health is "very good" or "good".
    pub healthy: usize,
    /// Size of the aggregated subset.
    pub total: usize,
}

/// The four dashboard tiles.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct DashboardTiles {
    /// Area-weighted mean NDVI, rounded to two decimals.
    pub avg_ndvi: f64,
    /// Percent change from first to last point of the merged NDVI
    /// series; 0 when the series is too short to tell.
    pub ndvi_change_percent: f64,
    /// Sum of (clamped) areas over the subset, in hectares.
    pub total_area_hectares: f64,
    pub healthy_farms: FarmCount,
    /// Features with "poor" health or NDVI below the low-index
    /// threshold, counted once each.
    pub low_index_farms: usize,
}

/// Sidebar metric values.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct SidebarMetrics {
    /// Area shown on the "Field Area" card; equals the subset total.
    pub field_area_hectares: f64,
    /// Area-weighted mean EVI, two decimals.
    pub evi: f64,
    /// Area-weighted mean VHI, one decimal.
    pub vhi: f64,
    /// Area-weighted mean SAVI, two decimals.
    pub savi: f64,
}

/// Soil-health status band.
///
/// Three-tier banding: 75 and above is Excellent, 60 and above is
/// Good, anything below Needs Attention.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub enum SoilHealthStatus {
    Excellent,
    Good,
    NeedsAttention,
}

impl SoilHealthStatus {
    pub fn from_percentage(pct: i32) -> Self {
        if pct >= 75 {
            SoilHealthStatus::Excellent
        } else if pct >= 60 {
            SoilHealthStatus::Good
        } else {
            SoilHealthStatus::NeedsAttention
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            SoilHealthStatus::Excellent => "Excellent",
            SoilHealthStatus::Good => "Good",
            SoilHealthStatus::NeedsAttention => "Needs Attention",
        }
    }
}

/// One merged nutrient slot; symbol and label come from the reference
/// feature, amounts are averaged across features defining the slot.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct NutrientSummary {
    pub symbol: String,
    pub label: String,
    pub this_year: f64,
    pub last_year: f64,
}

/// Averaged reading for one soil layer: temperature rounded to whole
/// degrees, moisture to two decimals.
#[derive(Debug, Clone, Copy, Serialize, PartialEq)]
pub struct LayerSummary {
    pub temperature_c: i32,
    pub moisture: f64,
}

/// Always-present layer breakdown; layers nobody reported show 0/0.
#[derive(Debug, Clone, Copy, Serialize, PartialEq)]
pub struct SoilLayersSummary {
    pub surface: LayerSummary,
    pub subsoil: LayerSummary,
    pub parent_material: LayerSummary,
}

/// Merged soil-health breakdown.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct SoilSummary {
    /// Mean health percentage over features with soil data, rounded.
    pub health_percentage: i32,
    pub health_status: SoilHealthStatus,
    /// Mean crop age in days, rounded.
    pub crop_age_days: i32,
    /// Mean standard yield in quintals.
    pub standard_yield: f64,
    /// Mean model-predicted yield; absent when no feature supplies one.
    pub ai_yield: Option<f64>,
    pub nutrients: Vec<NutrientSummary>,
    pub layers: SoilLayersSummary,
}

/// The crop covering the largest summed area in the aggregated scope.
/// A label, never a filter.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct MajorCrop {
    pub name: String,
    pub area_hectares: f64,
}

/// The complete aggregate view-model.
///
/// Immutable per computation and replaced wholesale on every
/// recomputation. `generated_at` is metadata only and is excluded
/// from equality so identical inputs compare equal across runs.
#[derive(Debug, Clone, Serialize)]
pub struct AggregateViewModel {
    pub generated_at: DateTime<Utc>,
    /// Heading for the active selection, e.g. "Wheat Fields (3)".
    pub selection_label: String,
    /// Subheading, e.g. "21.15 ha • 3 fields".
    pub selection_subtitle: String,
    pub field_count: usize,
    pub major_crop: MajorCrop,
    pub dashboard: DashboardTiles,
    pub sidebar: SidebarMetrics,
    /// Merged NDVI series; empty when no feature in the subset
    /// carries one (the defined "no data" chart state).
    pub ndvi_series: Vec<SeriesPoint>,
    /// Merged water-index series; same conventions as `ndvi_series`.
    pub water_series: Vec<SeriesPoint>,
    pub soil: SoilSummary,
}

impl PartialEq for AggregateViewModel {
    fn eq(&self, other: &Self) -> bool {
        // generated_at is deliberately not compared
        self.selection_label == other.selection_label
            && self.selection_subtitle == other.selection_subtitle
            && self.field_count == other.field_count
            && self.major_crop == other.major_crop
            && self.dashboard == other.dashboard
            && self.sidebar == other.sidebar
            && self.ndvi_series == other.ndvi_series
            && self.water_series == other.water_series
            && self.soil == other.soil
    }
}

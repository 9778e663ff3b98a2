use serde::{Deserialize, Serialize};

/// Canonical number of daily points in a field time series.
pub const SERIES_LEN: usize = 15;

/// One daily point in a vegetation or water index time series.
///
/// Each point carries the value for the current season alongside the
/// same calendar position from the prior season, so charts can overlay
/// both years on one x-axis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesPoint {
    /// Display label for the x-axis position (e.g. "Day 7").
    pub label: String,
    /// Index value for the current season.
    #[serde(rename = "currentYearValue")]
    pub current_year: f64,
    /// Index value at the same position in the prior season.
    #[serde(rename = "priorYearValue")]
    pub prior_year: f64,
}

impl SeriesPoint {
    pub fn new(label: impl Into<String>, current_year: f64, prior_year: f64) -> Self {
        Self {
            label: label.into(),
            current_year,
            prior_year,
        }
    }
}

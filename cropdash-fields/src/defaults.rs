//! Fixed fallback values for missing per-field data.
//!
//! Every consumer resolves a missing value through this module so the
//! same fallback applies everywhere, instead of each read site
//! re-deriving its own default.

/// Fallback NDVI when a feature carries no value.
pub const DEFAULT_NDVI: f64 = 0.68;

/// Fallback EVI when a feature carries no value.
pub const DEFAULT_EVI: f64 = 0.65;

/// Fallback VHI when a feature carries no value.
pub const DEFAULT_VHI: f64 = 48.1;

/// Fallback SAVI when a feature carries no value.
pub const DEFAULT_SAVI: f64 = 0.71;

/// Fallback soil health percentage when no feature supplies soil data.
pub const DEFAULT_SOIL_HEALTH_PCT: f64 = 60.0;

/// Fallback crop age in days.
pub const DEFAULT_CROP_AGE_DAYS: f64 = 15.0;

/// Fallback standard yield in quintals.
pub const DEFAULT_STANDARD_YIELD: f64 = 460.0;

/// Crop label for features without a crop type.
pub const UNKNOWN_CROP: &str = "Unknown";

/// NDVI below this counts a feature toward the low-index farm count.
pub const LOW_NDVI_THRESHOLD: f64 = 0.35;

/// Resolve an optional index value to its fixed default.
///
/// Non-finite values (NaN, infinities) are treated as missing so they
/// can never leak into published aggregates.
pub fn resolve_index(value: Option<f64>, default: f64) -> f64 {
    match value {
        Some(v) if v.is_finite() => v,
        _ => default,
    }
}

/// Clamp a raw area to a usable non-negative number of hectares.
///
/// Negative and non-finite areas become 0; aggregation then gives such
/// features nominal weight 1 rather than dropping them.
pub fn clamp_area(raw: f64) -> f64 {
    if raw.is_finite() && raw > 0.0 {
        raw
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolve_index_prefers_present_value() {
        assert_eq!(resolve_index(Some(0.42), DEFAULT_NDVI), 0.42);
    }

    #[test]
    fn resolve_index_falls_back_on_missing() {
        assert_eq!(resolve_index(None, DEFAULT_NDVI), DEFAULT_NDVI);
    }

    #[test]
    fn resolve_index_rejects_non_finite() {
        assert_eq!(resolve_index(Some(f64::NAN), DEFAULT_EVI), DEFAULT_EVI);
        assert_eq!(
            resolve_index(Some(f64::INFINITY), DEFAULT_VHI),
            DEFAULT_VHI
        );
    }

    #[test]
    fn clamp_area_handles_bad_input() {
        assert_eq!(clamp_area(12.5), 12.5);
        assert_eq!(clamp_area(-3.0), 0.0);
        assert_eq!(clamp_area(f64::NAN), 0.0);
        assert_eq!(clamp_area(f64::NEG_INFINITY), 0.0);
    }
}

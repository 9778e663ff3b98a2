use crate::defaults;
use crate::series::SeriesPoint;
use crate::snapshot::FieldSnapshot;
use crate::soil::SoilHealthRecord;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// A single boundary vertex in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

impl LatLng {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }
}

/// Crop health class reported for a field.
///
/// Parsed case-insensitively; an unrecognized or absent value is kept
/// as `None` on the feature and displayed as "Decent", but never
/// counts toward the healthy-farm tally.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum CropHealth {
    VeryGood,
    Good,
    Decent,
    Poor,
}

impl CropHealth {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_lowercase().as_str() {
            "very good" => Some(CropHealth::VeryGood),
            "good" => Some(CropHealth::Good),
            "decent" => Some(CropHealth::Decent),
            "poor" => Some(CropHealth::Poor),
            _ => None,
        }
    }

    /// Healthy means "very good" or "good".
    pub fn is_healthy(self) -> bool {
        matches!(self, CropHealth::VeryGood | CropHealth::Good)
    }

    pub fn label(self) -> &'static str {
        match self {
            CropHealth::VeryGood => "Very Good",
            CropHealth::Good => "Good",
            CropHealth::Decent => "Decent",
            CropHealth::Poor => "Poor",
        }
    }
}

/// Why a raw GeoJSON feature was rejected at load.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum FeatureError {
    NotAnObject,
    MissingBoundary,
    DegenerateBoundary,
}

impl fmt::Display for FeatureError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FeatureError::NotAnObject => write!(f, "feature is not a JSON object"),
            FeatureError::MissingBoundary => write!(f, "feature has no polygon boundary"),
            FeatureError::DegenerateBoundary => {
                write!(f, "feature boundary has fewer than 3 vertices")
            }
        }
    }
}

impl std::error::Error for FeatureError {}

/// One field record: boundary plus agronomic properties.
///
/// Index values stay optional here; resolution to the fixed defaults
/// goes through the accessor methods so every consumer sees the same
/// fallback.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldFeature {
    pub id: String,
    pub name: Option<String>,
    pub boundary: Vec<LatLng>,
    pub area_hectares: f64,
    pub crop_type: Option<String>,
    pub crop_health: Option<CropHealth>,
    pub avg_ndvi: Option<f64>,
    pub evi: Option<f64>,
    pub vhi: Option<f64>,
    pub savi: Option<f64>,
    pub ndvi_series: Option<Vec<SeriesPoint>>,
    pub water_series: Option<Vec<SeriesPoint>>,
    pub soil: Option<SoilHealthRecord>,
}

impl FieldFeature {
    /// Parse one raw GeoJSON feature.
    ///
    /// `index` is the feature's position in the source collection and
    /// seeds the synthetic `sample-{index}` id when the properties bag
    /// carries none. Properties are read tolerantly: a missing or
    /// malformed optional stays `None`, only a missing boundary
    /// rejects the whole feature.
    pub fn from_geojson_value(raw: &Value, index: usize) -> Result<Self, FeatureError> {
        let obj = raw.as_object().ok_or(FeatureError::NotAnObject)?;
        let boundary = parse_boundary(obj.get("geometry"))?;

        let props = obj.get("properties").cloned().unwrap_or(Value::Null);
        let id = opt_string(&props, "_id").unwrap_or_else(|| format!("sample-{index}"));

        Ok(FieldFeature {
            id,
            name: opt_string(&props, "name"),
            boundary,
            area_hectares: defaults::clamp_area(
                opt_f64(&props, "area_ha").unwrap_or(0.0),
            ),
            crop_type: opt_string(&props, "cropType"),
            crop_health: opt_string(&props, "cropHealth")
                .and_then(|raw| CropHealth::parse(&raw)),
            avg_ndvi: opt_f64(&props, "avgNDVI"),
            evi: opt_f64(&props, "evi"),
            vhi: opt_f64(&props, "vhi"),
            savi: opt_f64(&props, "savi"),
            ndvi_series: opt_series(&props, "ndviSeries"),
            water_series: opt_series(&props, "waterSeries"),
            soil: props
                .get("soilHealth")
                .and_then(|v| serde_json::from_value(v.clone()).ok()),
        })
    }

    /// Build the synthetic single feature a selected snapshot
    /// aggregates as: snapshot area, health "Decent", everything else
    /// resolving to the fixed defaults.
    pub fn from_snapshot(snapshot: &FieldSnapshot) -> Self {
        FieldFeature {
            id: snapshot.id.clone(),
            name: Some(snapshot.name.clone()),
            boundary: snapshot.vertices.clone(),
            area_hectares: defaults::clamp_area(snapshot.area_hectares),
            crop_type: None,
            crop_health: Some(CropHealth::Decent),
            avg_ndvi: None,
            evi: None,
            vhi: None,
            savi: None,
            ndvi_series: None,
            water_series: None,
            soil: None,
        }
    }

    /// Crop label with the "Unknown" fallback applied.
    pub fn crop_label(&self) -> &str {
        self.crop_type.as_deref().unwrap_or(defaults::UNKNOWN_CROP)
    }

    /// Display name, falling back to the feature id.
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.id)
    }

    /// Health label with the "Decent" display fallback.
    pub fn health_label(&self) -> &'static str {
        self.crop_health.map_or("Decent", CropHealth::label)
    }

    pub fn ndvi(&self) -> f64 {
        defaults::resolve_index(self.avg_ndvi, defaults::DEFAULT_NDVI)
    }

    pub fn evi(&self) -> f64 {
        defaults::resolve_index(self.evi, defaults::DEFAULT_EVI)
    }

    pub fn vhi(&self) -> f64 {
        defaults::resolve_index(self.vhi, defaults::DEFAULT_VHI)
    }

    pub fn savi(&self) -> f64 {
        defaults::resolve_index(self.savi, defaults::DEFAULT_SAVI)
    }
}

/// Extract the outer ring of a GeoJSON Polygon geometry as lat/lng
/// vertices. GeoJSON stores positions as [lng, lat].
fn parse_boundary(geometry: Option<&Value>) -> Result<Vec<LatLng>, FeatureError> {
    let geometry = geometry
        .and_then(Value::as_object)
        .ok_or(FeatureError::MissingBoundary)?;
    if geometry.get("type").and_then(Value::as_str) != Some("Polygon") {
        return Err(FeatureError::MissingBoundary);
    }
    let outer_ring = geometry
        .get("coordinates")
        .and_then(Value::as_array)
        .and_then(|rings| rings.first())
        .and_then(Value::as_array)
        .ok_or(FeatureError::MissingBoundary)?;

    let mut vertices = Vec::with_capacity(outer_ring.len());
    for position in outer_ring {
        let pair = position.as_array().ok_or(FeatureError::MissingBoundary)?;
        let lng = pair.first().and_then(Value::as_f64);
        let lat = pair.get(1).and_then(Value::as_f64);
        match (lat, lng) {
            (Some(lat), Some(lng)) => vertices.push(LatLng::new(lat, lng)),
            _ => return Err(FeatureError::MissingBoundary),
        }
    }
    if vertices.len() < 3 {
        return Err(FeatureError::DegenerateBoundary);
    }
    Ok(vertices)
}

fn opt_string(props: &Value, key: &str) -> Option<String> {
    props
        .get(key)
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

/// Read a numeric property that may arrive as a JSON number or a
/// numeric string (the feature source is not consistent about this).
fn opt_f64(props: &Value, key: &str) -> Option<f64> {
    match props.get(key) {
        Some(Value::Number(n)) => n.as_f64().filter(|v| v.is_finite()),
        Some(Value::String(s)) => s.trim().parse::<f64>().ok().filter(|v| v.is_finite()),
        _ => None,
    }
}

fn opt_series(props: &Value, key: &str) -> Option<Vec<SeriesPoint>> {
    props
        .get(key)
        .and_then(|v| serde_json::from_value::<Vec<SeriesPoint>>(v.clone()).ok())
        .filter(|series| !series.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn raw_feature() -> Value {
        json!({
            "type": "Feature",
            "geometry": {
                "type": "Polygon",
                "coordinates": [[[75.81, 30.92], [75.82, 30.92], [75.82, 30.93], [75.81, 30.92]]]
            },
            "properties": {
                "_id": "field-1",
                "name": "North Block",
                "area_ha": 12.4,
                "cropType": "Wheat",
                "cropHealth": "Very Good",
                "avgNDVI": 0.66
            }
        })
    }

    #[test]
    fn parses_full_feature() {
        let feature = FieldFeature::from_geojson_value(&raw_feature(), 0).unwrap();
        assert_eq!(feature.id, "field-1");
        assert_eq!(feature.display_name(), "North Block");
        assert_eq!(feature.area_hectares, 12.4);
        assert_eq!(feature.crop_label(), "Wheat");
        assert_eq!(feature.crop_health, Some(CropHealth::VeryGood));
        assert_eq!(feature.ndvi(), 0.66);
        // boundary stored lat-first from [lng, lat] positions
        assert_eq!(feature.boundary[0], LatLng::new(30.92, 75.81));
    }

    #[test]
    fn missing_id_gets_synthetic_one() {
        let mut raw = raw_feature();
        raw["properties"].as_object_mut().unwrap().remove("_id");
        let feature = FieldFeature::from_geojson_value(&raw, 7).unwrap();
        assert_eq!(feature.id, "sample-7");
    }

    #[test]
    fn string_area_is_parsed_and_negative_area_clamped() {
        let mut raw = raw_feature();
        raw["properties"]["area_ha"] = json!("3.40");
        let feature = FieldFeature::from_geojson_value(&raw, 0).unwrap();
        assert_eq!(feature.area_hectares, 3.40);

        raw["properties"]["area_ha"] = json!(-5.0);
        let feature = FieldFeature::from_geojson_value(&raw, 0).unwrap();
        assert_eq!(feature.area_hectares, 0.0);
    }

    #[test]
    fn missing_properties_resolve_to_defaults() {
        let raw = json!({
            "geometry": {
                "type": "Polygon",
                "coordinates": [[[75.0, 30.0], [75.1, 30.0], [75.1, 30.1]]]
            }
        });
        let feature = FieldFeature::from_geojson_value(&raw, 2).unwrap();
        assert_eq!(feature.id, "sample-2");
        assert_eq!(feature.crop_label(), "Unknown");
        assert_eq!(feature.health_label(), "Decent");
        assert!(feature.crop_health.is_none());
        assert_eq!(feature.ndvi(), crate::defaults::DEFAULT_NDVI);
        assert_eq!(feature.vhi(), crate::defaults::DEFAULT_VHI);
    }

    #[test]
    fn missing_geometry_is_rejected() {
        let raw = json!({"properties": {"_id": "x"}});
        assert_eq!(
            FieldFeature::from_geojson_value(&raw, 0).unwrap_err(),
            FeatureError::MissingBoundary
        );
    }

    #[test]
    fn two_vertex_ring_is_rejected() {
        let raw = json!({
            "geometry": {"type": "Polygon", "coordinates": [[[75.0, 30.0], [75.1, 30.0]]]}
        });
        assert_eq!(
            FieldFeature::from_geojson_value(&raw, 0).unwrap_err(),
            FeatureError::DegenerateBoundary
        );
    }

    #[test]
    fn crop_health_parses_case_insensitively() {
        assert_eq!(CropHealth::parse("VERY GOOD"), Some(CropHealth::VeryGood));
        assert_eq!(CropHealth::parse(" poor "), Some(CropHealth::Poor));
        assert_eq!(CropHealth::parse("thriving"), None);
        assert!(CropHealth::Good.is_healthy());
        assert!(!CropHealth::Decent.is_healthy());
    }

    #[test]
    fn snapshot_becomes_minimal_feature() {
        use chrono::TimeZone;
        let snapshot = FieldSnapshot {
            id: "snap-9".to_string(),
            name: "Drawn Plot".to_string(),
            area_hectares: 6.5,
            vertices: vec![
                LatLng::new(30.9, 75.8),
                LatLng::new(30.91, 75.8),
                LatLng::new(30.91, 75.81),
            ],
            saved_at: chrono::Utc.with_ymd_and_hms(2026, 1, 5, 12, 0, 0).unwrap(),
        };
        let feature = FieldFeature::from_snapshot(&snapshot);
        assert_eq!(feature.id, "snap-9");
        assert_eq!(feature.area_hectares, 6.5);
        assert_eq!(feature.crop_health, Some(CropHealth::Decent));
        assert_eq!(feature.ndvi(), crate::defaults::DEFAULT_NDVI);
        assert!(feature.soil.is_none());
    }
}

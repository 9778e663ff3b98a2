use crate::feature::FieldFeature;
use anyhow::Context;
use serde_json::Value;

/// Embedded sample field catalog used by the CLI default and tests.
pub static SAMPLE_FIELDS_JSON: &str = include_str!("../../fixtures/sample_fields.json");

/// The immutable, ordered feature store.
///
/// Loaded once from a GeoJSON FeatureCollection; source order is
/// preserved and is the "first-encountered" order used by the
/// majority-crop tie-break. Reloading means building a new catalog
/// and swapping it wholesale — there are no per-feature mutations.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FieldCatalog {
    features: Vec<FieldFeature>,
}

impl FieldCatalog {
    /// Parse a GeoJSON FeatureCollection string into a catalog.
    ///
    /// Structurally invalid input (not JSON, no `features` array) is a
    /// hard error. Individually malformed features are skipped with a
    /// warning so one bad record never sinks the rest of the load.
    pub fn from_geojson(text: &str) -> anyhow::Result<Self> {
        let root: Value =
            serde_json::from_str(text).context("feature source is not valid JSON")?;
        let raw_features = root
            .get("features")
            .and_then(Value::as_array)
            .context("feature source is not a FeatureCollection (missing features array)")?;

        let mut features = Vec::with_capacity(raw_features.len());
        let mut skipped = 0usize;
        for (index, raw) in raw_features.iter().enumerate() {
            match FieldFeature::from_geojson_value(raw, index) {
                Ok(feature) => features.push(feature),
                Err(err) => {
                    skipped += 1;
                    log::warn!("[CropDash] catalog: skipping feature {index}: {err}");
                }
            }
        }
        log::info!(
            "[CropDash] catalog: loaded {} features, skipped {}",
            features.len(),
            skipped
        );
        Ok(FieldCatalog { features })
    }

    /// Build a catalog from already-parsed features, preserving order.
    pub fn from_features(features: Vec<FieldFeature>) -> Self {
        FieldCatalog { features }
    }

    /// The embedded sample catalog.
    pub fn sample() -> Self {
        match FieldCatalog::from_geojson(SAMPLE_FIELDS_JSON) {
            Ok(catalog) => catalog,
            Err(err) => panic!("failed to parse embedded sample fields: {err}"),
        }
    }

    pub fn features(&self) -> &[FieldFeature] {
        &self.features
    }

    pub fn len(&self) -> usize {
        self.features.len()
    }

    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }

    /// Look up a feature by id.
    pub fn get(&self, id: &str) -> Option<&FieldFeature> {
        self.features.iter().find(|f| f.id == id)
    }

    /// Distinct crop labels in first-encountered order, compared
    /// case-insensitively, first spelling wins. Feeds the crop filter
    /// dropdown; features without a crop type are not listed.
    pub fn crop_types(&self) -> Vec<String> {
        let mut seen: Vec<String> = Vec::new();
        let mut labels: Vec<String> = Vec::new();
        for feature in &self.features {
            if let Some(crop) = feature.crop_type.as_deref() {
                let key = crop.to_lowercase();
                if !seen.contains(&key) {
                    seen.push(key);
                    labels.push(crop.to_string());
                }
            }
        }
        labels
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sample_catalog_loads() {
        let catalog = FieldCatalog::sample();
        assert_eq!(catalog.len(), 6);
        // last fixture feature has no _id and picks up the synthetic one
        assert!(catalog.get("sample-5").is_some());
        assert_eq!(catalog.get("sample-5").unwrap().display_name(), "Fallow Margin");
    }

    #[test]
    fn crop_types_keep_first_encounter_order() {
        let catalog = FieldCatalog::sample();
        assert_eq!(catalog.crop_types(), vec!["Wheat", "Maize", "Tobacco"]);
    }

    #[test]
    fn malformed_feature_is_skipped_not_fatal() {
        let text = r#"{
            "type": "FeatureCollection",
            "features": [
                {"properties": {"_id": "broken", "cropType": "Rice"}},
                {
                    "geometry": {"type": "Polygon",
                        "coordinates": [[[75.0, 30.0], [75.1, 30.0], [75.1, 30.1]]]},
                    "properties": {"_id": "ok", "area_ha": 2.0}
                }
            ]
        }"#;
        let catalog = FieldCatalog::from_geojson(text).unwrap();
        assert_eq!(catalog.len(), 1);
        assert!(catalog.get("broken").is_none());
        assert!(catalog.get("ok").is_some());
    }

    #[test]
    fn structurally_invalid_source_is_a_hard_error() {
        assert!(FieldCatalog::from_geojson("not json").is_err());
        assert!(FieldCatalog::from_geojson(r#"{"type": "Feature"}"#).is_err());
    }

    #[test]
    fn duplicate_crop_spellings_collapse_case_insensitively() {
        let text = r#"{
            "type": "FeatureCollection",
            "features": [
                {
                    "geometry": {"type": "Polygon",
                        "coordinates": [[[75.0, 30.0], [75.1, 30.0], [75.1, 30.1]]]},
                    "properties": {"cropType": "wheat"}
                },
                {
                    "geometry": {"type": "Polygon",
                        "coordinates": [[[75.2, 30.0], [75.3, 30.0], [75.3, 30.1]]]},
                    "properties": {"cropType": "Wheat"}
                }
            ]
        }"#;
        let catalog = FieldCatalog::from_geojson(text).unwrap();
        assert_eq!(catalog.crop_types(), vec!["wheat"]);
    }
}

//! Merging of per-field soil records into one soil-health summary.

use crate::viewmodel::{
    LayerSummary, NutrientSummary, SoilHealthStatus, SoilLayersSummary, SoilSummary,
};
use cropdash_fields::defaults;
use cropdash_fields::feature::FieldFeature;
use cropdash_fields::soil::{LayerReading, SoilHealthRecord, SoilLayers};
use cropdash_utils::round::round2;

/// Merge soil records across a subset of features.
///
/// Features without soil data are excluded from every mean (never
/// treated as zero). When no feature supplies a value the fixed
/// defaults apply, and the layers record is synthesized with 0°/0.0
/// readings so consumers always see the full shape.
pub fn merge_soil(features: &[FieldFeature]) -> SoilSummary {
    let records: Vec<&SoilHealthRecord> =
        features.iter().filter_map(|f| f.soil.as_ref()).collect();

    let health_percentage = mean(records.iter().filter_map(|r| r.health_percentage))
        .unwrap_or(defaults::DEFAULT_SOIL_HEALTH_PCT)
        .round() as i32;
    let crop_age_days = mean(records.iter().filter_map(|r| r.crop_age))
        .unwrap_or(defaults::DEFAULT_CROP_AGE_DAYS)
        .round() as i32;
    let standard_yield = round2(
        mean(records.iter().filter_map(|r| r.standard_yield))
            .unwrap_or(defaults::DEFAULT_STANDARD_YIELD),
    );
    let ai_yield = mean(records.iter().filter_map(|r| r.ai_yield)).map(round2);

    SoilSummary {
        health_percentage,
        health_status: SoilHealthStatus::from_percentage(health_percentage),
        crop_age_days,
        standard_yield,
        ai_yield,
        nutrients: merge_nutrients(&records),
        layers: merge_layers(&records),
    }
}

/// Nutrient slots are positional: the first record with soil data
/// supplies the symbols/labels, and each slot's amounts are averaged
/// over the records that define that slot index.
fn merge_nutrients(records: &[&SoilHealthRecord]) -> Vec<NutrientSummary> {
    let Some(reference) = records.first() else {
        return Vec::new();
    };
    reference
        .nutrients
        .iter()
        .enumerate()
        .map(|(slot, nutrient)| {
            let this_year =
                mean(records.iter().filter_map(|r| r.nutrients.get(slot)).map(|n| n.this_year))
                    .unwrap_or(0.0);
            let last_year =
                mean(records.iter().filter_map(|r| r.nutrients.get(slot)).map(|n| n.last_year))
                    .unwrap_or(0.0);
            NutrientSummary {
                symbol: nutrient.symbol.clone(),
                label: nutrient.label.clone(),
                this_year: round2(this_year),
                last_year: round2(last_year),
            }
        })
        .collect()
}

fn merge_layers(records: &[&SoilHealthRecord]) -> SoilLayersSummary {
    SoilLayersSummary {
        surface: merge_layer(records, |l| l.surface),
        subsoil: merge_layer(records, |l| l.subsoil),
        parent_material: merge_layer(records, |l| l.parent_material),
    }
}

fn merge_layer<F>(records: &[&SoilHealthRecord], pick: F) -> LayerSummary
where
    F: Fn(&SoilLayers) -> Option<LayerReading>,
{
    let readings: Vec<LayerReading> = records
        .iter()
        .filter_map(|r| r.layers.as_ref().and_then(&pick))
        .collect();
    LayerSummary {
        temperature_c: mean(readings.iter().map(|r| r.temperature))
            .unwrap_or(0.0)
            .round() as i32,
        moisture: round2(mean(readings.iter().map(|r| r.moisture)).unwrap_or(0.0)),
    }
}

fn mean(values: impl Iterator<Item = f64>) -> Option<f64> {
    let mut sum = 0.0;
    let mut count = 0usize;
    for value in values {
        if value.is_finite() {
            sum += value;
            count += 1;
        }
    }
    if count > 0 {
        Some(sum / count as f64)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cropdash_fields::feature::LatLng;
    use cropdash_fields::soil::Nutrient;

    fn bare_feature(id: &str) -> FieldFeature {
        FieldFeature {
            id: id.to_string(),
            name: None,
            boundary: vec![
                LatLng::new(30.9, 75.8),
                LatLng::new(30.91, 75.8),
                LatLng::new(30.91, 75.81),
            ],
            area_hectares: 1.0,
            crop_type: None,
            crop_health: None,
            avg_ndvi: None,
            evi: None,
            vhi: None,
            savi: None,
            ndvi_series: None,
            water_series: None,
            soil: None,
        }
    }

    fn soil_record(pct: f64, age: f64) -> SoilHealthRecord {
        SoilHealthRecord {
            health_percentage: Some(pct),
            crop_age: Some(age),
            standard_yield: Some(450.0),
            ai_yield: None,
            nutrients: vec![
                Nutrient {
                    symbol: "N".to_string(),
                    label: "Nitrogen".to_string(),
                    this_year: 24.0,
                    last_year: 20.0,
                },
                Nutrient {
                    symbol: "P".to_string(),
                    label: "Phosphorous".to_string(),
                    this_year: 9.0,
                    last_year: 8.0,
                },
            ],
            layers: Some(SoilLayers {
                surface: Some(LayerReading {
                    temperature: 26.0,
                    moisture: 0.22,
                }),
                subsoil: Some(LayerReading {
                    temperature: 24.0,
                    moisture: 0.26,
                }),
                parent_material: None,
            }),
        }
    }

    #[test]
    fn no_soil_data_yields_full_default_shape() {
        let features = vec![bare_feature("f1"), bare_feature("f2")];
        let soil = merge_soil(&features);
        assert_eq!(soil.health_percentage, 60);
        assert_eq!(soil.health_status, SoilHealthStatus::Good);
        assert_eq!(soil.crop_age_days, 15);
        assert_eq!(soil.standard_yield, 460.0);
        assert!(soil.ai_yield.is_none());
        assert!(soil.nutrients.is_empty());
        // layers synthesized, not omitted
        assert_eq!(soil.layers.surface.temperature_c, 0);
        assert_eq!(soil.layers.parent_material.moisture, 0.0);
    }

    #[test]
    fn means_exclude_features_without_soil() {
        let mut with_soil = bare_feature("f1");
        with_soil.soil = Some(soil_record(80.0, 30.0));
        let features = vec![with_soil, bare_feature("f2")];
        let soil = merge_soil(&features);
        // 80, not (80 + 0) / 2
        assert_eq!(soil.health_percentage, 80);
        assert_eq!(soil.health_status, SoilHealthStatus::Excellent);
        assert_eq!(soil.crop_age_days, 30);
    }

    #[test]
    fn averages_across_soil_records() {
        let mut a = bare_feature("f1");
        a.soil = Some(soil_record(70.0, 30.0));
        let mut b = bare_feature("f2");
        b.soil = Some(soil_record(50.0, 20.0));
        let soil = merge_soil(&[a, b]);
        assert_eq!(soil.health_percentage, 60);
        assert_eq!(soil.crop_age_days, 25);
        assert_eq!(soil.nutrients.len(), 2);
        assert_eq!(soil.nutrients[0].symbol, "N");
        assert_eq!(soil.nutrients[0].this_year, 24.0);
        assert_eq!(soil.layers.surface.temperature_c, 26);
        assert_eq!(soil.layers.surface.moisture, 0.22);
    }

    #[test]
    fn nutrient_slots_align_positionally_with_reference() {
        let mut a = bare_feature("f1");
        a.soil = Some(soil_record(70.0, 30.0));
        let mut b = bare_feature("f2");
        let mut short = soil_record(50.0, 20.0);
        short.nutrients.truncate(1);
        short.nutrients[0].this_year = 30.0;
        b.soil = Some(short);

        let soil = merge_soil(&[a, b]);
        // slot 0 averaged over both, slot 1 only from the reference
        assert_eq!(soil.nutrients[0].this_year, 27.0);
        assert_eq!(soil.nutrients[1].this_year, 9.0);
    }

    #[test]
    fn layers_average_only_over_providers() {
        let mut a = bare_feature("f1");
        a.soil = Some(soil_record(70.0, 30.0));
        let mut b = bare_feature("f2");
        let mut no_layers = soil_record(50.0, 20.0);
        no_layers.layers = None;
        b.soil = Some(no_layers);

        let soil = merge_soil(&[a, b]);
        assert_eq!(soil.layers.subsoil.temperature_c, 24);
        // layer present on no record stays at the synthesized default
        assert_eq!(soil.layers.parent_material.temperature_c, 0);
    }
}

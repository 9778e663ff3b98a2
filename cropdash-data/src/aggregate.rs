//! The aggregator: (catalog, selection state) -> aggregate view-model.
//!
//! Pure and deterministic: identical inputs produce identical output.
//! The only clock read is the `generated_at` stamp, which is metadata
//! and excluded from view-model equality.

use crate::selection::{Selection, SelectionState};
use crate::series::{change_percent, merge_series};
use crate::soil::merge_soil;
use crate::viewmodel::{
    AggregateViewModel, DashboardTiles, FarmCount, MajorCrop, SidebarMetrics,
};
use chrono::Utc;
use cropdash_fields::catalog::FieldCatalog;
use cropdash_fields::defaults;
use cropdash_fields::feature::{CropHealth, FieldFeature};
use cropdash_utils::format::{capitalize_crop_name, count_label, format_hectares};
use cropdash_utils::round::{round1, round2};

/// Build the aggregate view-model for the current selection.
///
/// Returns `None` when the selection resolves to zero features — an
/// unknown field id, a crop filter with no matches, or an empty
/// catalog. That is the defined "no data" state, not an error.
pub fn build_view_model(
    catalog: &FieldCatalog,
    state: &SelectionState,
) -> Option<AggregateViewModel> {
    let selection = state.current();
    let features = resolve_features(catalog, &selection);
    if features.is_empty() {
        log::info!("[CropDash] aggregate: selection resolved to zero features");
        return None;
    }

    let n = features.len();
    let total_area: f64 = features
        .iter()
        .map(|f| defaults::clamp_area(f.area_hectares))
        .sum();
    let indices = weighted_indices(&features);

    let healthy = features
        .iter()
        .filter(|f| f.crop_health.is_some_and(|h| h.is_healthy()))
        .count();
    let low_index = features
        .iter()
        .filter(|f| {
            f.crop_health == Some(CropHealth::Poor) || f.ndvi() < defaults::LOW_NDVI_THRESHOLD
        })
        .count();

    let ndvi_series = merge_series(&features, |f| f.ndvi_series.as_deref());
    let water_series = merge_series(&features, |f| f.water_series.as_deref());
    let ndvi_change = round1(change_percent(&ndvi_series));

    let view_model = AggregateViewModel {
        generated_at: Utc::now(),
        selection_label: selection_label(&selection, &features),
        selection_subtitle: format!(
            "{} ha • {}",
            format_hectares(total_area),
            count_label(n, "field")
        ),
        field_count: n,
        major_crop: major_crop_for(&selection, &features, total_area),
        dashboard: DashboardTiles {
            avg_ndvi: round2(indices.ndvi),
            ndvi_change_percent: ndvi_change,
            total_area_hectares: total_area,
            healthy_farms: FarmCount {
                healthy,
                total: n,
            },
            low_index_farms: low_index,
        },
        sidebar: SidebarMetrics {
            field_area_hectares: total_area,
            evi: round2(indices.evi),
            vhi: round1(indices.vhi),
            savi: round2(indices.savi),
        },
        ndvi_series,
        water_series,
        soil: merge_soil(&features),
    };
    log::info!(
        "[CropDash] aggregate: {} features -> \"{}\"",
        n,
        view_model.selection_label
    );
    Some(view_model)
}

/// Resolve the feature subset for a selection, in catalog order.
///
/// Resolution precedence: single field, then snapshot, then crop
/// filter, then all fields. A snapshot aggregates as one synthetic
/// feature carrying only its area.
fn resolve_features(catalog: &FieldCatalog, selection: &Selection) -> Vec<FieldFeature> {
    match selection {
        Selection::SingleField(id) => match catalog.get(id) {
            Some(feature) => vec![feature.clone()],
            None => {
                log::warn!("[CropDash] aggregate: no feature with id {id:?}");
                Vec::new()
            }
        },
        Selection::Snapshot(snapshot) => vec![FieldFeature::from_snapshot(snapshot)],
        Selection::CropFilter(crop) => catalog
            .features()
            .iter()
            .filter(|f| {
                f.crop_type
                    .as_deref()
                    .is_some_and(|c| c.eq_ignore_ascii_case(crop))
            })
            .cloned()
            .collect(),
        Selection::AllFields => catalog.features().to_vec(),
    }
}

struct WeightedIndices {
    ndvi: f64,
    evi: f64,
    vhi: f64,
    savi: f64,
}

/// Area-weighted means of the four index values.
///
/// Weight is the clamped area, with zero-area features weighted 1 so
/// no feature silently contributes nothing. A zero weight sum (never
/// reachable for a non-empty subset, kept as a guard) falls back to
/// the fixed defaults rather than dividing by zero.
fn weighted_indices(features: &[FieldFeature]) -> WeightedIndices {
    let mut weight_sum = 0.0;
    let mut ndvi = 0.0;
    let mut evi = 0.0;
    let mut vhi = 0.0;
    let mut savi = 0.0;
    for feature in features {
        let area = defaults::clamp_area(feature.area_hectares);
        let weight = if area > 0.0 { area } else { 1.0 };
        weight_sum += weight;
        ndvi += feature.ndvi() * weight;
        evi += feature.evi() * weight;
        vhi += feature.vhi() * weight;
        savi += feature.savi() * weight;
    }
    if weight_sum > 0.0 {
        WeightedIndices {
            ndvi: ndvi / weight_sum,
            evi: evi / weight_sum,
            vhi: vhi / weight_sum,
            savi: savi / weight_sum,
        }
    } else {
        WeightedIndices {
            ndvi: defaults::DEFAULT_NDVI,
            evi: defaults::DEFAULT_EVI,
            vhi: defaults::DEFAULT_VHI,
            savi: defaults::DEFAULT_SAVI,
        }
    }
}

fn selection_label(selection: &Selection, features: &[FieldFeature]) -> String {
    match selection {
        Selection::SingleField(_) => features[0].display_name().to_string(),
        Selection::Snapshot(snapshot) => snapshot.name.clone(),
        Selection::CropFilter(crop) => format!(
            "{} Fields ({})",
            capitalize_crop_name(crop),
            features.len()
        ),
        Selection::AllFields => format!("All Fields ({})", features.len()),
    }
}

/// The majority crop of the aggregated scope. For the unfiltered view
/// this is a label over all features, never a silent filter; filtered
/// and single-feature selections report their own crop, snapshots
/// their saved name.
fn major_crop_for(
    selection: &Selection,
    features: &[FieldFeature],
    total_area: f64,
) -> MajorCrop {
    match selection {
        Selection::Snapshot(snapshot) => MajorCrop {
            name: snapshot.name.clone(),
            area_hectares: total_area,
        },
        Selection::SingleField(_) => MajorCrop {
            name: features[0].crop_label().to_string(),
            area_hectares: total_area,
        },
        Selection::CropFilter(crop) => MajorCrop {
            name: capitalize_crop_name(crop),
            area_hectares: total_area,
        },
        Selection::AllFields => dominant_crop(features),
    }
}

/// Largest summed area per crop type; ties break to the crop
/// encountered first in catalog order.
fn dominant_crop(features: &[FieldFeature]) -> MajorCrop {
    let mut totals: Vec<(String, f64)> = Vec::new();
    for feature in features {
        let label = feature.crop_label();
        let area = defaults::clamp_area(feature.area_hectares);
        match totals
            .iter_mut()
            .find(|(name, _)| name.eq_ignore_ascii_case(label))
        {
            Some((_, total)) => *total += area,
            None => totals.push((label.to_string(), area)),
        }
    }
    let mut best = 0;
    for i in 1..totals.len() {
        // strictly greater keeps the earliest crop on ties
        if totals[i].1 > totals[best].1 {
            best = i;
        }
    }
    let (name, area_hectares) = totals.swap_remove(best);
    MajorCrop {
        name,
        area_hectares,
    }
}

//! Merging of per-field time series into one chart series.

use cropdash_fields::feature::FieldFeature;
use cropdash_fields::series::SeriesPoint;

/// Merge one kind of series across a subset of features.
///
/// Position labels come from the first feature that carries a series.
/// At each position the current/prior values are averaged over the
/// features that actually provide a point there — features without a
/// series contribute nothing (no zero-fill). A position nobody covers
/// emits 0.
///
/// A single-feature subset passes its series through verbatim, so one
/// field's chart is never distorted by the averaging path.
pub fn merge_series<'a, F>(features: &'a [FieldFeature], pick: F) -> Vec<SeriesPoint>
where
    F: Fn(&'a FieldFeature) -> Option<&'a [SeriesPoint]>,
{
    if features.len() == 1 {
        return pick(&features[0]).map(<[SeriesPoint]>::to_vec).unwrap_or_default();
    }

    let with_series: Vec<&[SeriesPoint]> = features.iter().filter_map(&pick).collect();
    let Some(base) = with_series.first() else {
        return Vec::new();
    };

    let mut merged = Vec::with_capacity(base.len());
    for (position, template) in base.iter().enumerate() {
        let mut current_sum = 0.0;
        let mut current_count = 0usize;
        let mut prior_sum = 0.0;
        let mut prior_count = 0usize;
        for series in &with_series {
            if let Some(point) = series.get(position) {
                if point.current_year.is_finite() {
                    current_sum += point.current_year;
                    current_count += 1;
                }
                if point.prior_year.is_finite() {
                    prior_sum += point.prior_year;
                    prior_count += 1;
                }
            }
        }
        merged.push(SeriesPoint::new(
            template.label.clone(),
            if current_count > 0 {
                current_sum / current_count as f64
            } else {
                0.0
            },
            if prior_count > 0 {
                prior_sum / prior_count as f64
            } else {
                0.0
            },
        ));
    }
    merged
}

/// Percent change from the first to the last current-year value of a
/// merged series. 0 when there are fewer than 2 points or the first
/// value is 0 (no meaningful baseline).
pub fn change_percent(series: &[SeriesPoint]) -> f64 {
    if series.len() < 2 {
        return 0.0;
    }
    let first = series[0].current_year;
    let last = series[series.len() - 1].current_year;
    if first == 0.0 || !first.is_finite() || !last.is_finite() {
        return 0.0;
    }
    (last - first) / first * 100.0
}

//! Merged time-series CSV export.

use crate::summary::load_catalog;
use crate::SeriesKind;
use cropdash_session::FieldSession;
use log::info;

/// Write the merged NDVI or water-index series for the selection to a
/// CSV file with `label,current_year,prior_year` columns.
pub fn run_export_series(
    fields: Option<&str>,
    index: SeriesKind,
    crop: Option<&str>,
    output: &str,
) -> anyhow::Result<()> {
    let session = FieldSession::new(load_catalog(fields)?);
    if let Some(crop) = crop {
        session.set_crop_filter(Some(crop));
    }
    let Some(view_model) = session.view_model() else {
        anyhow::bail!("selection resolved to no data, nothing to export");
    };
    let series = match index {
        SeriesKind::Ndvi => &view_model.ndvi_series,
        SeriesKind::Water => &view_model.water_series,
    };

    let mut writer = csv::Writer::from_path(output)?;
    writer.write_record(["label", "current_year", "prior_year"])?;
    for point in series {
        writer.write_record([
            point.label.as_str(),
            &point.current_year.to_string(),
            &point.prior_year.to_string(),
        ])?;
    }
    writer.flush()?;

    info!(
        "Exported {} series points for \"{}\" to {}",
        series.len(),
        view_model.selection_label,
        output
    );
    Ok(())
}

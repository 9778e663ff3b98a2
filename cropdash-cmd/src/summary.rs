//! Aggregate summary and crop listing commands.

use anyhow::Context;
use cropdash_fields::catalog::FieldCatalog;
use cropdash_session::FieldSession;
use log::info;

/// Load a catalog from a GeoJSON file, or the embedded sample when no
/// path is given.
pub(crate) fn load_catalog(fields: Option<&str>) -> anyhow::Result<FieldCatalog> {
    match fields {
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("read feature source {path}"))?;
            FieldCatalog::from_geojson(&text)
        }
        None => Ok(FieldCatalog::sample()),
    }
}

/// Aggregate the catalog under an optional crop or single-field
/// selection and print the view-model as pretty JSON. An empty
/// selection prints `null` (the defined "no data" state), not an
/// error.
pub fn run_summary(
    fields: Option<&str>,
    crop: Option<&str>,
    field: Option<&str>,
) -> anyhow::Result<()> {
    let session = FieldSession::new(load_catalog(fields)?);
    if let Some(id) = field {
        session.select_field(Some(id));
    } else if let Some(crop) = crop {
        session.set_crop_filter(Some(crop));
    }

    let view_model = session.view_model();
    if view_model.is_none() {
        info!("Selection resolved to no data");
    }
    println!("{}", serde_json::to_string_pretty(&view_model)?);
    Ok(())
}

/// List crop groups with field counts and total areas, flagging the
/// majority crop by area.
pub fn run_crops(fields: Option<&str>) -> anyhow::Result<()> {
    let catalog = load_catalog(fields)?;
    let session = FieldSession::new(catalog.clone());
    let major = session
        .view_model()
        .map(|vm| vm.major_crop.name)
        .unwrap_or_default();

    for crop in catalog.crop_types() {
        let group: Vec<_> = catalog
            .features()
            .iter()
            .filter(|f| f.crop_label().eq_ignore_ascii_case(&crop))
            .collect();
        let total_area: f64 = group.iter().map(|f| f.area_hectares).sum();
        let marker = if crop.eq_ignore_ascii_case(&major) {
            "  (major)"
        } else {
            ""
        };
        println!(
            "{crop}: {} field(s), {total_area:.2} ha{marker}",
            group.len()
        );
    }
    Ok(())
}

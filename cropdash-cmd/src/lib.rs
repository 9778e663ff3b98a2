//! Command implementations for the CropDash CLI.
//!
//! Provides subcommands for aggregating a field catalog, listing crop
//! groups, exporting merged time series, and managing saved snapshots.

use clap::Subcommand;

pub mod export;
pub mod snapshots;
pub mod summary;

#[derive(Subcommand)]
pub enum Command {
    /// Aggregate a field catalog and print the view-model as JSON
    Summary {
        /// Path to a GeoJSON FeatureCollection (defaults to the embedded sample catalog)
        #[arg(short = 'f', long)]
        fields: Option<String>,

        /// Narrow the aggregate to one crop group
        #[arg(long, conflicts_with = "field")]
        crop: Option<String>,

        /// Aggregate a single field by id
        #[arg(long)]
        field: Option<String>,
    },

    /// List crop groups with field counts and total areas
    Crops {
        /// Path to a GeoJSON FeatureCollection (defaults to the embedded sample catalog)
        #[arg(short = 'f', long)]
        fields: Option<String>,
    },

    /// Export a merged index time series to CSV
    ExportSeries {
        /// Path to a GeoJSON FeatureCollection (defaults to the embedded sample catalog)
        #[arg(short = 'f', long)]
        fields: Option<String>,

        /// Which index series to export
        #[arg(long, value_enum, default_value = "ndvi")]
        index: SeriesKind,

        /// Narrow to one crop group before merging
        #[arg(long)]
        crop: Option<String>,

        /// Output CSV path
        #[arg(short = 'o', long)]
        output: String,
    },

    /// Manage saved field snapshots in a SQLite file
    Snapshots {
        /// Path to the snapshot database file
        #[arg(short = 'd', long)]
        db: String,

        #[command(subcommand)]
        action: SnapshotAction,
    },
}

/// Which merged series to export.
#[derive(clap::ValueEnum, Clone, Copy, Debug)]
pub enum SeriesKind {
    Ndvi,
    Water,
}

#[derive(Subcommand)]
pub enum SnapshotAction {
    /// List saved snapshots, most recent first
    List,

    /// Save (or replace) a snapshot
    Save {
        /// Snapshot id
        #[arg(long)]
        id: String,

        /// Display name
        #[arg(long)]
        name: String,

        /// Area in hectares
        #[arg(long)]
        area: f64,

        /// Boundary vertices as a JSON array of {"lat", "lng"} objects
        #[arg(long)]
        vertices: String,
    },

    /// Delete a snapshot by id
    Delete {
        /// Snapshot id
        #[arg(long)]
        id: String,
    },
}

pub fn run(command: Command) -> anyhow::Result<()> {
    match command {
        Command::Summary {
            fields,
            crop,
            field,
        } => summary::run_summary(fields.as_deref(), crop.as_deref(), field.as_deref()),
        Command::Crops { fields } => summary::run_crops(fields.as_deref()),
        Command::ExportSeries {
            fields,
            index,
            crop,
            output,
        } => export::run_export_series(fields.as_deref(), index, crop.as_deref(), &output),
        Command::Snapshots { db, action } => snapshots::run_snapshots(&db, action),
    }
}

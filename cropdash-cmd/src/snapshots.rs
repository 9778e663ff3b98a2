//! Saved-snapshot management commands.

use crate::SnapshotAction;
use anyhow::Context;
use chrono::Utc;
use cropdash_db::SnapshotDb;
use cropdash_fields::feature::LatLng;
use cropdash_fields::snapshot::FieldSnapshot;

pub fn run_snapshots(db_path: &str, action: SnapshotAction) -> anyhow::Result<()> {
    let db = SnapshotDb::open(db_path)?;
    match action {
        SnapshotAction::List => {
            let snapshots = db.list_snapshots()?;
            if snapshots.is_empty() {
                println!("no saved snapshots");
            }
            for snapshot in snapshots {
                println!(
                    "{}  {}  {:.2} ha  saved {}",
                    snapshot.id,
                    snapshot.name,
                    snapshot.area_hectares,
                    snapshot.saved_at.format("%Y-%m-%d %H:%M")
                );
            }
            Ok(())
        }
        SnapshotAction::Save {
            id,
            name,
            area,
            vertices,
        } => {
            let vertices: Vec<LatLng> = serde_json::from_str(&vertices)
                .context("vertices must be a JSON array of {\"lat\", \"lng\"} objects")?;
            db.save_snapshot(&FieldSnapshot {
                id,
                name,
                area_hectares: area,
                vertices,
                saved_at: Utc::now(),
            })
        }
        SnapshotAction::Delete { id } => {
            if db.delete_snapshot(&id)? {
                println!("deleted {id}");
            } else {
                println!("no snapshot with id {id}");
            }
            Ok(())
        }
    }
}

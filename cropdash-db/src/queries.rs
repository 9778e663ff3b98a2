//! Typed save/list/get/delete methods for the snapshot store.

use crate::SnapshotDb;
use anyhow::Context;
use chrono::{DateTime, Utc};
use cropdash_fields::feature::LatLng;
use cropdash_fields::snapshot::FieldSnapshot;
use rusqlite::{params, OptionalExtension};

impl SnapshotDb {
    /// Insert or replace a snapshot by id.
    pub fn save_snapshot(&self, snapshot: &FieldSnapshot) -> anyhow::Result<()> {
        let vertices =
            serde_json::to_string(&snapshot.vertices).context("serialize vertices")?;
        let conn = self.connection().borrow();
        conn.execute(
            "INSERT OR REPLACE INTO snapshots (id, name, area_hectares, vertices, saved_at)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                snapshot.id,
                snapshot.name,
                snapshot.area_hectares,
                vertices,
                snapshot.saved_at.to_rfc3339(),
            ],
        )?;
        log::info!("[CropDash] db: saved snapshot {}", snapshot.id);
        Ok(())
    }

    /// All saved snapshots, most recently saved first.
    pub fn list_snapshots(&self) -> anyhow::Result<Vec<FieldSnapshot>> {
        let conn = self.connection().borrow();
        let mut stmt = conn.prepare(
            "SELECT id, name, area_hectares, vertices, saved_at FROM snapshots
             ORDER BY saved_at DESC, id",
        )?;
        let rows = stmt
            .query_map([], row_to_parts)?
            .collect::<Result<Vec<_>, _>>()?;
        let snapshots = rows
            .into_iter()
            .map(parts_to_snapshot)
            .collect::<anyhow::Result<Vec<_>>>()?;
        log::info!("[CropDash] db: listed {} snapshots", snapshots.len());
        Ok(snapshots)
    }

    /// Look up one snapshot by id.
    pub fn get_snapshot(&self, id: &str) -> anyhow::Result<Option<FieldSnapshot>> {
        let conn = self.connection().borrow();
        let parts = conn
            .query_row(
                "SELECT id, name, area_hectares, vertices, saved_at FROM snapshots
                 WHERE id = ?1",
                params![id],
                row_to_parts,
            )
            .optional()?;
        parts.map(parts_to_snapshot).transpose()
    }

    /// Delete a snapshot by id; returns whether a row was removed.
    pub fn delete_snapshot(&self, id: &str) -> anyhow::Result<bool> {
        let conn = self.connection().borrow();
        let removed = conn.execute("DELETE FROM snapshots WHERE id = ?1", params![id])?;
        log::info!("[CropDash] db: delete snapshot {id} removed {removed} row(s)");
        Ok(removed > 0)
    }
}

type SnapshotParts = (String, String, f64, String, String);

fn row_to_parts(row: &rusqlite::Row<'_>) -> rusqlite::Result<SnapshotParts> {
    Ok((
        row.get(0)?,
        row.get(1)?,
        row.get(2)?,
        row.get(3)?,
        row.get(4)?,
    ))
}

fn parts_to_snapshot(parts: SnapshotParts) -> anyhow::Result<FieldSnapshot> {
    let (id, name, area_hectares, vertices_json, saved_at) = parts;
    let vertices: Vec<LatLng> =
        serde_json::from_str(&vertices_json).context("parse vertices column")?;
    let saved_at = DateTime::parse_from_rfc3339(&saved_at)
        .context("parse saved_at column")?
        .with_timezone(&Utc);
    Ok(FieldSnapshot {
        id,
        name,
        area_hectares,
        vertices,
        saved_at,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn snapshot(id: &str, name: &str, hour: u32) -> FieldSnapshot {
        FieldSnapshot {
            id: id.to_string(),
            name: name.to_string(),
            area_hectares: 4.25,
            vertices: vec![
                LatLng::new(30.91, 75.81),
                LatLng::new(30.92, 75.81),
                LatLng::new(30.92, 75.82),
            ],
            saved_at: Utc.with_ymd_and_hms(2026, 3, 14, hour, 0, 0).unwrap(),
        }
    }

    #[test]
    fn save_and_get_round_trip() {
        let db = SnapshotDb::open_in_memory().unwrap();
        let original = snapshot("snap-1", "Drawn Plot", 9);
        db.save_snapshot(&original).unwrap();

        let loaded = db.get_snapshot("snap-1").unwrap().unwrap();
        assert_eq!(loaded, original);
    }

    #[test]
    fn get_missing_snapshot_is_none() {
        let db = SnapshotDb::open_in_memory().unwrap();
        assert!(db.get_snapshot("nope").unwrap().is_none());
    }

    #[test]
    fn list_orders_most_recent_first() {
        let db = SnapshotDb::open_in_memory().unwrap();
        db.save_snapshot(&snapshot("snap-old", "Old Plot", 8)).unwrap();
        db.save_snapshot(&snapshot("snap-new", "New Plot", 17)).unwrap();

        let listed = db.list_snapshots().unwrap();
        assert_eq!(listed.len(), 2);
        assert_eq!(listed[0].id, "snap-new");
        assert_eq!(listed[1].id, "snap-old");
    }

    #[test]
    fn save_replaces_on_same_id() {
        let db = SnapshotDb::open_in_memory().unwrap();
        db.save_snapshot(&snapshot("snap-1", "First Name", 9)).unwrap();
        let mut updated = snapshot("snap-1", "Renamed Plot", 10);
        updated.area_hectares = 9.0;
        db.save_snapshot(&updated).unwrap();

        let listed = db.list_snapshots().unwrap();
        assert_eq!(listed.len(), 1, "Should have 1 row after upsert");
        assert_eq!(listed[0].name, "Renamed Plot");
        assert_eq!(listed[0].area_hectares, 9.0);
    }

    #[test]
    fn delete_reports_whether_row_existed() {
        let db = SnapshotDb::open_in_memory().unwrap();
        db.save_snapshot(&snapshot("snap-1", "Plot", 9)).unwrap();
        assert!(db.delete_snapshot("snap-1").unwrap());
        assert!(!db.delete_snapshot("snap-1").unwrap());
        assert!(db.list_snapshots().unwrap().is_empty());
    }
}

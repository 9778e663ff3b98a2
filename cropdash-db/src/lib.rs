//! SQLite store for saved field snapshots.
//!
//! Manually drawn boundaries are saved outside the main field catalog;
//! this crate is the externally-persisted list the core reads and
//! writes. It can live purely in memory (tests, WASM-style hosts) or
//! in a database file (the CLI).
//!
//! # Architecture
//!
//! - `Rc<RefCell<Connection>>` wrapper for interior mutability in a
//!   single-threaded host; the handle is cheaply cloneable
//! - Typed query methods returning [`FieldSnapshot`] values
//! - Vertices serialized as one JSON text column
//!
//! # Usage
//!
//! ```rust
//! use cropdash_db::SnapshotDb;
//! use cropdash_fields::feature::LatLng;
//! use cropdash_fields::snapshot::FieldSnapshot;
//!
//! let db = SnapshotDb::open_in_memory().unwrap();
//! db.save_snapshot(&FieldSnapshot {
//!     id: "snap-1".to_string(),
//!     name: "Drawn Plot".to_string(),
//!     area_hectares: 4.25,
//!     vertices: vec![
//!         LatLng::new(30.91, 75.81),
//!         LatLng::new(30.92, 75.81),
//!         LatLng::new(30.92, 75.82),
//!     ],
//!     saved_at: chrono::Utc::now(),
//! }).unwrap();
//! assert_eq!(db.list_snapshots().unwrap().len(), 1);
//! ```

pub mod schema;
mod queries;

use rusqlite::Connection;
use std::cell::RefCell;
use std::path::Path;
use std::rc::Rc;

/// Snapshot store handle. Cloning shares the same connection.
#[derive(Clone)]
pub struct SnapshotDb {
    conn: Rc<RefCell<Connection>>,
}

impl SnapshotDb {
    /// Open an in-memory store with the schema applied.
    pub fn open_in_memory() -> anyhow::Result<Self> {
        let conn = Connection::open_in_memory()?;
        conn.execute_batch(schema::create_schema())?;
        Ok(SnapshotDb {
            conn: Rc::new(RefCell::new(conn)),
        })
    }

    /// Open (or create) a file-backed store with the schema applied.
    pub fn open(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let conn = Connection::open(path)?;
        conn.execute_batch(schema::create_schema())?;
        Ok(SnapshotDb {
            conn: Rc::new(RefCell::new(conn)),
        })
    }

    pub(crate) fn connection(&self) -> &Rc<RefCell<Connection>> {
        &self.conn
    }
}

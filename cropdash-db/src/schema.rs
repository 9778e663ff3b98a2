//! SQL schema for the snapshot store.
//!
//! One table holds the saved-field snapshots; the schema is applied as
//! a single batch when the store is opened.

/// Returns the full SQL schema as a single batch string.
///
/// The `snapshots` table keeps one row per saved field boundary.
/// Vertices are stored as a JSON array in a single text column:
/// snapshots are read and written whole, never queried by vertex, so
/// a child table would buy nothing. `saved_at` is RFC 3339 text, which
/// sorts chronologically as a plain string.
pub fn create_schema() -> &'static str {
    r#"
    CREATE TABLE IF NOT EXISTS snapshots (
        id TEXT PRIMARY KEY,
        name TEXT NOT NULL,
        area_hectares REAL NOT NULL,
        vertices TEXT NOT NULL,
        saved_at TEXT NOT NULL
    );
    CREATE INDEX IF NOT EXISTS idx_snapshots_saved_at ON snapshots(saved_at);
    "#
}

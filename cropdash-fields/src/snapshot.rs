use crate::feature::LatLng;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A manually drawn field boundary saved outside the main catalog.
///
/// Snapshots carry no index data; when selected they aggregate as a
/// minimal single feature using the fixed index defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldSnapshot {
    pub id: String,
    pub name: String,
    pub area_hectares: f64,
    pub vertices: Vec<LatLng>,
    pub saved_at: DateTime<Utc>,
}

//! Selection state and the field-data aggregation engine.
//!
//! This crate turns a field catalog plus the current selection
//! (all fields, one crop group, a single field, or a saved snapshot)
//! into the aggregate view-model driving every display surface:
//! dashboard tiles, sidebar metrics, the two 15-day time series, and
//! the soil-health breakdown.

pub mod aggregate;
pub mod selection;
pub mod series;
pub mod soil;
pub mod viewmodel;

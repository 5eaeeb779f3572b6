//! Core observation types and daily aggregation for turfgrass weather products.
//!
//! This crate owns the shapes shared by every derived product: hourly
//! observations parsed from raw provider rows, 8am-anchored daily records
//! with cached statistics, chronological date/value series, grid time
//! series, and the calendar alignment used to match independently-fetched
//! sources.

pub mod align;
pub mod daily;
pub mod error;
pub mod grid;
pub mod hourly;
pub mod season;
pub mod series;

pub use error::{Result, TurfcastError};

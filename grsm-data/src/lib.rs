//! Data Loader for the Great Smoky Mountains ecology panels.
//!
//! This crate turns the raw site datasets into typed records:
//! - `biodiversity`: per-year species counts (JSON) into layer and year records
//! - `water`: water-quality sample rows (CSV) keyed by site and year
//! - `visits`: recreation visit counts (CSV) with header auto-detection
//! - `visibility`: hourly PM2.5 readings (CSV) with the `-999` sentinel
//! - `parks`: species inventory for the national park comparison (CSV)
//! - `stats`: yearly means and least-squares trend lines
//! - `status`: per-dataset load status, settled independently
//!
//! Malformed rows are dropped (and counted in the log), never fatal.

pub mod biodiversity;
pub mod error;
pub mod parks;
pub mod paths;
pub mod records;
pub mod stats;
pub mod status;
pub mod visibility;
pub mod visits;
pub mod water;

pub use error::LoadError;
pub use paths::{DatasetKind, DatasetPaths};
pub use status::PanelStatus;
pub use records::{
    LayerRecord, ParkRecord, VisibilityReading, VisitRecord, WaterSample, YearMean, YearRecord,
};

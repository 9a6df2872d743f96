//! Typed records handed from the loaders to the chart components.
//!
//! All structs derive `Serialize` so the CLI can dump them as JSON.

use chrono::{NaiveDate, NaiveDateTime};
use serde::Serialize;
use std::collections::BTreeMap;

/// Total organisms spotted in one calendar year (Timeline input).
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct YearRecord {
    /// January 1st of the year; `None` when the source year did not parse.
    pub year: Option<NaiveDate>,
    pub total_spotted: f64,
}

impl YearRecord {
    pub fn new(year: NaiveDate, total_spotted: f64) -> Self {
        Self {
            year: Some(year),
            total_spotted,
        }
    }
}

/// Per-category counts for one calendar year (StackedAreaChart input).
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct LayerRecord {
    /// January 1st of the year; `None` when the source year did not parse.
    pub year: Option<NaiveDate>,
    /// Category name to count. Values may be NaN when built from raw input.
    pub counts: BTreeMap<String, f64>,
}

impl LayerRecord {
    pub fn new(year: NaiveDate, counts: BTreeMap<String, f64>) -> Self {
        Self {
            year: Some(year),
            counts,
        }
    }

    /// Sum of the finite counts in this record.
    pub fn total(&self) -> f64 {
        self.counts.values().filter(|v| v.is_finite()).sum()
    }
}

/// One water-quality measurement.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct WaterSample {
    pub location_id: String,
    pub characteristic: String,
    /// Year taken from the activity id date block.
    pub year: i32,
    /// Full sampling date, when the date block is a real calendar date.
    pub date: Option<NaiveDate>,
    pub value: f64,
}

/// Annual recreation visits.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct VisitRecord {
    /// January 1st of the visit year.
    pub date: NaiveDate,
    pub visits: f64,
}

/// One PM2.5 reading; `pm` is NaN for the `-999` sentinel.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct VisibilityReading {
    pub date: NaiveDateTime,
    pub pm: f64,
}

/// Species inventory for one national park.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ParkRecord {
    pub park: String,
    pub species_total: f64,
    pub description: String,
}

/// Mean of all values observed in one year.
#[derive(Debug, Clone, Copy, Serialize, PartialEq)]
pub struct YearMean {
    pub year: i32,
    pub mean: f64,
}

//! Query result structs.

use serde::Serialize;

/// Mean value of one site in one year (a heatmap cell).
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct SiteYearMean {
    pub site: String,
    pub year: i32,
    pub value: f64,
    /// Number of samples averaged into `value`.
    pub samples: u32,
}

/// Visits in one calendar year.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct YearVisits {
    pub year: i32,
    pub visits: f64,
}

/// Sample count per characteristic.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct CharacteristicCount {
    pub characteristic: String,
    pub samples: u32,
}

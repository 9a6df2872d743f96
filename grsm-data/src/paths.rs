//! Dataset locations relative to a base directory or URL.

use crate::biodiversity::TaxaGroup;
use serde::Serialize;

/// Every dataset the site loads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum DatasetKind {
    Visibility,
    Visits,
    WaterResults,
    Parks,
    Biodiversity(TaxaGroup),
}

impl DatasetKind {
    /// File name as it appears in the `data/` folder.
    pub fn file_name(&self) -> String {
        match self {
            DatasetKind::Visibility => "visibility.csv".to_string(),
            DatasetKind::Visits => "visits.csv".to_string(),
            DatasetKind::WaterResults => "waterResults.csv".to_string(),
            DatasetKind::Parks => "parksData.csv".to_string(),
            DatasetKind::Biodiversity(group) => group.file_name(),
        }
    }

    /// Short label used in error messages.
    pub fn label(&self) -> String {
        self.file_name()
    }
}

/// Resolves dataset file names against a base location.
///
/// The base may be a directory (`./data`) or a URL prefix
/// (`https://example.org/data`); a trailing slash is optional.
#[derive(Debug, Clone, PartialEq)]
pub struct DatasetPaths {
    base: String,
}

impl Default for DatasetPaths {
    fn default() -> Self {
        Self::new("./data")
    }
}

impl DatasetPaths {
    pub fn new(base: impl Into<String>) -> Self {
        let mut base = base.into();
        while base.ends_with('/') {
            base.pop();
        }
        Self { base }
    }

    pub fn base(&self) -> &str {
        &self.base
    }

    /// Full location of `kind`.
    pub fn resolve(&self, kind: DatasetKind) -> String {
        if self.base.is_empty() {
            kind.file_name()
        } else {
            format!("{}/{}", self.base, kind.file_name())
        }
    }
}

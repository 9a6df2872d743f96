//! Dataset load failures.

use crate::paths::DatasetKind;
use std::fmt;

/// Why a dataset could not be turned into records.
///
/// Panels render the `Display` text inline instead of their chart.
#[derive(Debug, Clone, PartialEq)]
pub enum LoadError {
    /// The resource could not be retrieved (network, file system).
    Fetch { dataset: DatasetKind, message: String },
    /// The resource was retrieved but could not be parsed.
    Parse { dataset: DatasetKind, message: String },
}

impl LoadError {
    pub fn fetch(dataset: DatasetKind, err: impl fmt::Display) -> Self {
        LoadError::Fetch {
            dataset,
            message: err.to_string(),
        }
    }

    pub fn parse(dataset: DatasetKind, err: impl fmt::Display) -> Self {
        LoadError::Parse {
            dataset,
            message: err.to_string(),
        }
    }

    pub fn dataset(&self) -> DatasetKind {
        match self {
            LoadError::Fetch { dataset, .. } | LoadError::Parse { dataset, .. } => *dataset,
        }
    }
}

impl fmt::Display for LoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoadError::Fetch { dataset, message } => {
                write!(f, "Error loading {}: {}", dataset.label(), message)
            }
            LoadError::Parse { dataset, message } => {
                write!(f, "Error reading {}: {}", dataset.label(), message)
            }
        }
    }
}

impl std::error::Error for LoadError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_names_the_dataset() {
        let err = LoadError::fetch(DatasetKind::Visits, "404 Not Found");
        assert_eq!(err.to_string(), "Error loading visits.csv: 404 Not Found");
        assert_eq!(err.dataset(), DatasetKind::Visits);

        let err = LoadError::parse(DatasetKind::WaterResults, "bad header");
        assert!(err.to_string().starts_with("Error reading waterResults.csv"));
    }
}

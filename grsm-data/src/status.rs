//! Per-dataset load status.
//!
//! Every dataset settles on its own: one file failing to fetch or parse marks
//! only the panels that read it.

use crate::error::LoadError;
use crate::paths::DatasetKind;
use std::fmt;

/// Load state of one panel.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum PanelStatus {
    #[default]
    Loading,
    Ready,
    Failed(String),
}

impl PanelStatus {
    pub fn is_ready(&self) -> bool {
        matches!(self, PanelStatus::Ready)
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, PanelStatus::Failed(_))
    }

    /// Status for a finished load; a failure is logged and its message kept
    /// for the panel to show.
    pub fn settle<T>(outcome: &Result<T, LoadError>) -> Self {
        match outcome {
            Ok(_) => PanelStatus::Ready,
            Err(e) => {
                log::error!("[GRSM] {}", e);
                PanelStatus::Failed(e.to_string())
            }
        }
    }
}

/// Parse a fetched body. Fetch errors pass through untouched; parse errors
/// are tagged with `kind`.
pub fn prepare<T, E: fmt::Display>(
    kind: DatasetKind,
    body: Result<String, LoadError>,
    parse: impl FnOnce(&str) -> Result<T, E>,
) -> Result<T, LoadError> {
    let body = body?;
    parse(&body).map_err(|e| LoadError::parse(kind, e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::water::tests::WATER_CSV;
    use crate::{parks, visibility, visits, water};

    #[test]
    fn one_failed_dataset_leaves_the_others_ready() {
        let water = prepare(
            DatasetKind::WaterResults,
            Ok(WATER_CSV.to_string()),
            water::parse_water_results,
        );
        let visits = prepare(
            DatasetKind::Visits,
            Err(LoadError::fetch(DatasetKind::Visits, "HTTP 404")),
            visits::parse_visits,
        );
        let parks = prepare(
            DatasetKind::Parks,
            Ok("name,count\nAcadia,1\n".to_string()),
            parks::parse_parks,
        );
        let visibility = prepare(
            DatasetKind::Visibility,
            Ok("DATE_TIME,GRSM-LR_PM2_5B_UG_M3_LC\n1/5/2004 13:00,12.5\n".to_string()),
            visibility::parse_visibility,
        );

        assert!(PanelStatus::settle(&water).is_ready());
        assert!(PanelStatus::settle(&visibility).is_ready());
        assert_eq!(
            PanelStatus::settle(&visits),
            PanelStatus::Failed("Error loading visits.csv: HTTP 404".to_string())
        );
        match PanelStatus::settle(&parks) {
            PanelStatus::Failed(message) => {
                assert!(message.starts_with("Error reading parksData.csv"))
            }
            other => panic!("expected a failure, got {:?}", other),
        }
        assert_eq!(visibility.unwrap().len(), 1);
    }

    #[test]
    fn starts_loading() {
        let status = PanelStatus::default();
        assert!(!status.is_ready());
        assert!(!status.is_failed());
    }
}

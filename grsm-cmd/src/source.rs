//! Reading dataset files from disk or over HTTP.

use grsm_data::biodiversity::{self, PreparedBiodiversity, TaxaGroup};
use grsm_data::status::prepare;
use grsm_data::{
    parks, visibility, visits, water, DatasetKind, DatasetPaths, LoadError, ParkRecord,
    VisibilityReading, VisitRecord, WaterSample,
};
use log::info;
use std::time::Duration;

fn is_remote(location: &str) -> bool {
    location.starts_with("http://") || location.starts_with("https://")
}

/// Raw text of one dataset.
pub async fn read_dataset(paths: &DatasetPaths, kind: DatasetKind) -> Result<String, LoadError> {
    let location = paths.resolve(kind);
    info!("[GRSM] reading {}", location);
    if is_remote(&location) {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(60))
            .build()
            .map_err(|e| LoadError::fetch(kind, e))?;
        let response = client
            .get(&location)
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(|e| LoadError::fetch(kind, e))?;
        response.text().await.map_err(|e| LoadError::fetch(kind, e))
    } else {
        tokio::fs::read_to_string(&location)
            .await
            .map_err(|e| LoadError::fetch(kind, e))
    }
}

pub async fn biodiversity(paths: &DatasetPaths, group: TaxaGroup) -> Result<PreparedBiodiversity, LoadError> {
    let kind = DatasetKind::Biodiversity(group);
    prepare(kind, read_dataset(paths, kind).await, biodiversity::parse_biodiversity)
}

pub async fn water_samples(paths: &DatasetPaths) -> Result<Vec<WaterSample>, LoadError> {
    let kind = DatasetKind::WaterResults;
    prepare(kind, read_dataset(paths, kind).await, water::parse_water_results)
}

pub async fn visit_records(paths: &DatasetPaths) -> Result<Vec<VisitRecord>, LoadError> {
    let kind = DatasetKind::Visits;
    prepare(kind, read_dataset(paths, kind).await, visits::parse_visits)
}

pub async fn visibility_readings(paths: &DatasetPaths) -> Result<Vec<VisibilityReading>, LoadError> {
    let kind = DatasetKind::Visibility;
    prepare(kind, read_dataset(paths, kind).await, visibility::parse_visibility)
}

pub async fn park_records(paths: &DatasetPaths) -> Result<Vec<ParkRecord>, LoadError> {
    let kind = DatasetKind::Parks;
    prepare(kind, read_dataset(paths, kind).await, parks::parse_parks)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn remote_detection() {
        assert!(is_remote("https://example.org/data/visits.csv"));
        assert!(is_remote("http://localhost:8080/visits.csv"));
        assert!(!is_remote("data/visits.csv"));
        assert!(!is_remote("./https/visits.csv"));
    }

    #[tokio::test]
    async fn reads_local_files_and_reports_missing_ones() {
        let dir = std::env::temp_dir().join(format!("grsm-source-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(
            dir.join("parksData.csv"),
            "park,speciesTotal,description\nSmoky,19000,Big\nAcadia,5000,Coastal\n",
        )
        .unwrap();
        let paths = DatasetPaths::new(dir.to_string_lossy().to_string());

        let parks = park_records(&paths).await.unwrap();
        assert_eq!(parks.len(), 2);
        assert_eq!(parks[0].park, "Smoky");

        let err = visit_records(&paths).await.unwrap_err();
        assert_eq!(err.dataset(), DatasetKind::Visits);
        assert!(err.to_string().starts_with("Error loading visits.csv"));

        std::fs::remove_dir_all(&dir).unwrap();
    }
}

//! Loading parsed records into the in-memory database.
//!
//! CSV parsing lives in `grsm-data`; these methods insert the resulting
//! records inside one transaction per call.

use crate::Database;
use grsm_data::records::{VisitRecord, WaterSample};
use grsm_data::water;
use rusqlite::params;

impl Database {
    /// Parse and load a water results CSV (see `grsm_data::water`).
    ///
    /// Returns the number of samples inserted.
    pub fn load_water_results(&self, csv_data: &str) -> anyhow::Result<usize> {
        let samples = water::parse_water_results(csv_data)?;
        self.load_water_samples(&samples)
    }

    /// Insert already parsed samples. Non-finite values are skipped.
    pub fn load_water_samples(&self, samples: &[WaterSample]) -> anyhow::Result<usize> {
        let mut conn = self.conn.borrow_mut();
        let tx = conn.transaction()?;
        let mut count = 0usize;
        {
            let mut stmt = tx.prepare(
                "INSERT INTO water_samples (location_id, characteristic, year, date, value)
                 VALUES (?1, ?2, ?3, ?4, ?5)",
            )?;
            for s in samples {
                if !s.value.is_finite() {
                    continue;
                }
                let date = s.date.map(|d| d.format("%Y-%m-%d").to_string());
                stmt.execute(params![s.location_id, s.characteristic, s.year, date, s.value])?;
                count += 1;
            }
        }
        tx.commit()?;
        log::info!("[GRSM] loader: loaded {} water samples", count);
        Ok(count)
    }

    /// Insert visit counts, replacing any earlier value for the same year.
    pub fn load_visits(&self, records: &[VisitRecord]) -> anyhow::Result<usize> {
        use chrono::Datelike;

        let mut conn = self.conn.borrow_mut();
        let tx = conn.transaction()?;
        let mut count = 0usize;
        {
            let mut stmt =
                tx.prepare("INSERT OR REPLACE INTO visits (year, visits) VALUES (?1, ?2)")?;
            for r in records {
                if !r.visits.is_finite() {
                    continue;
                }
                stmt.execute(params![r.date.year(), r.visits])?;
                count += 1;
            }
        }
        tx.commit()?;
        log::info!("[GRSM] loader: loaded {} visit years", count);
        Ok(count)
    }
}

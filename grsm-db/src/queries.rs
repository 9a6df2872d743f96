//! Typed aggregate queries.
//!
//! All queries return structs from [`crate::models`] or
//! `grsm_data::records` so results can go straight into a panel model.

use crate::models::{CharacteristicCount, SiteYearMean, YearVisits};
use crate::Database;
use grsm_data::records::YearMean;
use rusqlite::params;

impl Database {
    /// Total number of stored samples.
    pub fn query_sample_count(&self) -> anyhow::Result<u32> {
        let conn = self.conn.borrow();
        let count = conn.query_row("SELECT COUNT(*) FROM water_samples", [], |row| {
            row.get::<_, u32>(0)
        })?;
        Ok(count)
    }

    /// Characteristics present, most sampled first.
    pub fn query_characteristics(&self) -> anyhow::Result<Vec<CharacteristicCount>> {
        let conn = self.conn.borrow();
        let mut stmt = conn.prepare(
            "SELECT characteristic, COUNT(*) AS n
             FROM water_samples
             GROUP BY characteristic
             ORDER BY n DESC, characteristic",
        )?;
        let rows = stmt
            .query_map([], |row| {
                Ok(CharacteristicCount {
                    characteristic: row.get(0)?,
                    samples: row.get(1)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(rows)
    }

    /// Mean value per (site, year) for one characteristic.
    ///
    /// Only the `top_n` sites with the most site-year cells are returned
    /// (ties broken by site id). Rows are ordered by site, then year.
    pub fn query_site_year_means(
        &self,
        characteristic: &str,
        top_n: usize,
    ) -> anyhow::Result<Vec<SiteYearMean>> {
        let conn = self.conn.borrow();
        let mut stmt = conn.prepare(
            "WITH cells AS (
                 SELECT location_id, year, AVG(value) AS mean, COUNT(*) AS n
                 FROM water_samples
                 WHERE characteristic = ?1
                 GROUP BY location_id, year
             ),
             top_sites AS (
                 SELECT location_id
                 FROM cells
                 GROUP BY location_id
                 ORDER BY COUNT(*) DESC, location_id
                 LIMIT ?2
             )
             SELECT c.location_id, c.year, c.mean, c.n
             FROM cells c
             INNER JOIN top_sites t ON c.location_id = t.location_id
             ORDER BY c.location_id, c.year",
        )?;
        let limit = i64::try_from(top_n).unwrap_or(i64::MAX);
        let rows = stmt
            .query_map(params![characteristic, limit], |row| {
                Ok(SiteYearMean {
                    site: row.get(0)?,
                    year: row.get(1)?,
                    value: row.get(2)?,
                    samples: row.get(3)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;
        log::info!(
            "[GRSM] query: query_site_year_means returned {} cells",
            rows.len()
        );
        Ok(rows)
    }

    /// Park-wide mean per year for one characteristic, ascending by year.
    ///
    /// `range` restricts the result to an inclusive `(start, end)` year span.
    pub fn query_yearly_means(
        &self,
        characteristic: &str,
        range: Option<(i32, i32)>,
    ) -> anyhow::Result<Vec<YearMean>> {
        let (start, end) = range.unwrap_or((i32::MIN, i32::MAX));
        let conn = self.conn.borrow();
        let mut stmt = conn.prepare(
            "SELECT year, AVG(value)
             FROM water_samples
             WHERE characteristic = ?1 AND year >= ?2 AND year <= ?3
             GROUP BY year
             ORDER BY year",
        )?;
        let rows = stmt
            .query_map(params![characteristic, start, end], |row| {
                Ok(YearMean {
                    year: row.get(0)?,
                    mean: row.get(1)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(rows)
    }

    /// `(first, last)` sample year for one characteristic.
    pub fn query_year_span(&self, characteristic: &str) -> anyhow::Result<Option<(i32, i32)>> {
        let conn = self.conn.borrow();
        let span = conn.query_row(
            "SELECT MIN(year), MAX(year) FROM water_samples WHERE characteristic = ?1",
            params![characteristic],
            |row| Ok((row.get::<_, Option<i32>>(0)?, row.get::<_, Option<i32>>(1)?)),
        )?;
        Ok(match span {
            (Some(min), Some(max)) => Some((min, max)),
            _ => None,
        })
    }

    /// Visits per year, ascending.
    pub fn query_visits(&self) -> anyhow::Result<Vec<YearVisits>> {
        let conn = self.conn.borrow();
        let mut stmt = conn.prepare("SELECT year, visits FROM visits ORDER BY year")?;
        let rows = stmt
            .query_map([], |row| {
                Ok(YearVisits {
                    year: row.get(0)?,
                    visits: row.get(1)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(rows)
    }
}

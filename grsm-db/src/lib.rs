//! In-memory SQLite database layer for the park's water-quality and
//! visitation data.
//!
//! Water samples are loaded once and aggregated with SQL `GROUP BY`
//! queries instead of hand-written rollups:
//!
//! - per (site, year) means for the heatmap, limited to the best covered sites
//! - park-wide yearly means, optionally restricted to a year range
//! - visit counts per year
//!
//! # Usage
//!
//! ```rust
//! use grsm_db::Database;
//!
//! let db = Database::new().unwrap();
//! db.load_water_results("Activity_ID,Location_ID,Characteristic_Name,Result_Text\n\
//!     GRSM_F_0101_20000515_S,GRSM_F_0101,pH,6.5\n").unwrap();
//! let means = db.query_yearly_means("pH", None).unwrap();
//! assert_eq!(means.len(), 1);
//! ```

mod loader;
pub mod models;
mod queries;
pub mod schema;

use rusqlite::Connection;
use std::cell::RefCell;
use std::rc::Rc;

/// In-memory SQLite database holding water samples and visit counts.
///
/// Cheaply cloneable (via `Rc`) so panels on the single UI thread can share it.
#[derive(Clone)]
pub struct Database {
    conn: Rc<RefCell<Connection>>,
}

impl Database {
    /// Create a new in-memory database with the schema applied.
    pub fn new() -> anyhow::Result<Self> {
        let conn = Connection::open_in_memory()?;
        conn.execute_batch(schema::create_schema())?;
        Ok(Self {
            conn: Rc::new(RefCell::new(conn)),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn database_creates_successfully() {
        assert!(Database::new().is_ok());
    }

    #[test]
    fn database_is_cloneable() {
        let db = Database::new().unwrap();
        let db2 = db.clone();
        db.load_water_results(
            "Activity_ID,Location_ID,Characteristic_Name,Result_Text\nGRSM_F_0101_20000515_S,GRSM_F_0101,pH,6.5\n",
        )
        .unwrap();
        assert_eq!(db2.query_sample_count().unwrap(), 1);
    }

    #[test]
    fn database_starts_empty() {
        let db = Database::new().unwrap();
        assert_eq!(db.query_sample_count().unwrap(), 0);
        assert!(db.query_visits().unwrap().is_empty());
    }
}

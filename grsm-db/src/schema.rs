//! SQL schema for the in-memory database.

/// Returns the full SQL schema as a single batch string.
///
/// - `water_samples` - one row per water-quality measurement
/// - `visits` - recreation visits per calendar year
pub fn create_schema() -> &'static str {
    r#"
    CREATE TABLE IF NOT EXISTS water_samples (
        location_id TEXT NOT NULL,
        characteristic TEXT NOT NULL,
        year INTEGER NOT NULL,
        date TEXT,
        value REAL NOT NULL
    );
    CREATE INDEX IF NOT EXISTS idx_samples_char_year ON water_samples(characteristic, year);
    CREATE INDEX IF NOT EXISTS idx_samples_location ON water_samples(location_id);

    CREATE TABLE IF NOT EXISTS visits (
        year INTEGER PRIMARY KEY,
        visits REAL NOT NULL
    );
    "#
}

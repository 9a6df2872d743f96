//! Recreation visit counts.
//!
//! Visit exports differ in their header names ("Year", "Recreation Visits",
//! "Total", ...), so the date and value columns are detected by
//! case-insensitive substring matching on the header row.

use crate::records::VisitRecord;
use grsm_utils::dates;
use grsm_utils::numbers::parse_number;

/// Header fragments marking the date column.
const DATE_PATTERNS: [&str; 2] = ["year", "date"];
/// Header fragments marking the value column, after "visit".
const VALUE_PATTERNS: [&str; 5] = ["recreation", "visitors", "count", "total", "value"];

/// Column positions chosen for a visits CSV.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VisitColumns {
    pub date: Option<usize>,
    pub value: Option<usize>,
}

fn matches_any(header: &str, patterns: &[&str]) -> bool {
    let lower = header.to_lowercase();
    patterns.iter().any(|p| lower.contains(p))
}

/// Pick the date and value columns from a header row.
///
/// Date: the first header containing "year" or "date", else a column named
/// exactly `Year`. Value: the first header containing "visit", else the
/// first containing any of recreation/visitors/count/total/value, else the
/// first column that is not the date column.
pub fn detect_columns(headers: &[&str]) -> VisitColumns {
    let date = headers
        .iter()
        .position(|h| matches_any(h, &DATE_PATTERNS))
        .or_else(|| headers.iter().position(|h| *h == "Year"));

    let value = headers
        .iter()
        .position(|h| matches_any(h, &["visit"]))
        .or_else(|| headers.iter().position(|h| matches_any(h, &VALUE_PATTERNS)))
        .or_else(|| (0..headers.len()).find(|i| Some(*i) != date));

    VisitColumns { date, value }
}

/// Parse a visits CSV, keeping rows with a parseable year and finite count.
pub fn parse_visits(csv_data: &str) -> anyhow::Result<Vec<VisitRecord>> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(csv_data.as_bytes());

    let headers: Vec<String> = rdr
        .headers()?
        .iter()
        .map(|h| h.trim().trim_start_matches('\u{feff}').to_string())
        .collect();
    let header_refs: Vec<&str> = headers.iter().map(String::as_str).collect();
    let columns = detect_columns(&header_refs);
    log::debug!("[GRSM] visits: detected columns {:?} in {:?}", columns, headers);

    let (Some(date_col), Some(value_col)) = (columns.date, columns.value) else {
        log::warn!("[GRSM] visits: no usable year/value columns in {:?}", headers);
        return Ok(Vec::new());
    };

    let mut records = Vec::new();
    let mut skipped = 0u32;
    for result in rdr.records() {
        let r = result?;
        let date = r.get(date_col).and_then(dates::parse_year_date);
        let visits = r.get(value_col).and_then(|v| parse_number(v).ok());
        match (date, visits) {
            (Some(date), Some(visits)) => records.push(VisitRecord { date, visits }),
            _ => skipped += 1,
        }
    }
    records.sort_by_key(|r| r.date);
    log::info!(
        "[GRSM] visits: loaded {} years, skipped {}",
        records.len(),
        skipped
    );
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn detects_named_columns() {
        let cols = detect_columns(&["Year", "Recreation Visits", "Notes"]);
        assert_eq!(cols, VisitColumns { date: Some(0), value: Some(1) });

        let cols = detect_columns(&["Total", "Date"]);
        assert_eq!(cols, VisitColumns { date: Some(1), value: Some(0) });

        // "visit" wins over the generic fallbacks even when it comes later.
        let cols = detect_columns(&["year", "count", "Visitors"]);
        assert_eq!(cols, VisitColumns { date: Some(0), value: Some(2) });
    }

    #[test]
    fn falls_back_to_first_non_date_column() {
        let cols = detect_columns(&["YEAR", "amount"]);
        assert_eq!(cols, VisitColumns { date: Some(0), value: Some(1) });

        let cols = detect_columns(&["when", "amount"]);
        assert_eq!(cols, VisitColumns { date: None, value: Some(0) });
    }

    #[test]
    fn parses_with_thousands_separators() {
        let csv = "Year,Recreation Visits\n2001,\"9,197,697\"\n2000,\"10,175,812\"\nTotal,n/a\n";
        let records = parse_visits(csv).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].date, NaiveDate::from_ymd_opt(2000, 1, 1).unwrap());
        assert_eq!(records[0].visits, 10_175_812.0);
        assert_eq!(records[1].visits, 9_197_697.0);
    }

    #[test]
    fn missing_date_column_yields_nothing() {
        let records = parse_visits("when,amount\n2001,5\n").unwrap();
        assert!(records.is_empty());
    }
}

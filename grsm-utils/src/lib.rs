//! Shared utility functions for GRSM crates.

/// Date and year helpers
pub mod dates {
    use crate::error::ParseError;
    use chrono::{Datelike, NaiveDate};

    /// Earliest year accepted from source datasets.
    pub const MIN_YEAR: i32 = 1800;
    /// Latest year accepted from source datasets.
    pub const MAX_YEAR: i32 = 2025;

    /// Format a NaiveDate as "YYYY-MM-DD"
    pub fn format_date(date: &NaiveDate) -> String {
        date.format("%Y-%m-%d").to_string()
    }

    /// Format the calendar year of a date as "YYYY"
    pub fn format_year(date: &NaiveDate) -> String {
        format!("{:04}", date.year())
    }

    /// Parse a date string in "YYYY-MM-DD" format
    pub fn parse_date(s: &str) -> anyhow::Result<NaiveDate> {
        Ok(NaiveDate::parse_from_str(s, "%Y-%m-%d")?)
    }

    /// Parse a date string in "YYYYMMDD" format (compact sample-id format)
    pub fn parse_date_compact(s: &str) -> anyhow::Result<NaiveDate> {
        Ok(NaiveDate::parse_from_str(s, "%Y%m%d")?)
    }

    /// Parse a four-digit year ("2004", " 2004 ") into an integer.
    ///
    /// Values such as "2004.0" that JSON exporters sometimes emit are
    /// accepted as long as the fractional part is zero.
    pub fn parse_year(s: &str) -> Result<i32, ParseError> {
        let trimmed = s.trim();
        let digits = trimmed
            .strip_suffix(".0")
            .unwrap_or(trimmed);
        if digits.len() != 4 || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(ParseError::InvalidYear(s.to_string()));
        }
        digits
            .parse::<i32>()
            .map_err(|_| ParseError::InvalidYear(s.to_string()))
    }

    /// January 1st of `year`, if the year lies in the accepted window.
    pub fn year_start(year: i32) -> Option<NaiveDate> {
        if !(MIN_YEAR..=MAX_YEAR).contains(&year) {
            return None;
        }
        NaiveDate::from_ymd_opt(year, 1, 1)
    }

    /// Parse a year string straight to January 1st of that year.
    pub fn parse_year_date(s: &str) -> Option<NaiveDate> {
        parse_year(s).ok().and_then(year_start)
    }

    /// Find the first run of eight consecutive digits in a sample id.
    ///
    /// Water-quality activity ids look like `GRSM_F_0123_20040615_S`; the
    /// embedded `YYYYMMDD` block is the sampling date.
    pub fn date_digits(activity_id: &str) -> Option<&str> {
        let bytes = activity_id.as_bytes();
        let mut run_start = None;
        for (i, b) in bytes.iter().enumerate() {
            if b.is_ascii_digit() {
                let start = *run_start.get_or_insert(i);
                if i + 1 - start == 8 {
                    return activity_id.get(start..=i);
                }
            } else {
                run_start = None;
            }
        }
        None
    }

    /// Year encoded in the leading four digits of the activity id date block.
    pub fn year_from_activity_id(activity_id: &str) -> Option<i32> {
        date_digits(activity_id).and_then(|d| d[..4].parse().ok())
    }

    /// Full sampling date encoded in the activity id, when it is a real date.
    pub fn date_from_activity_id(activity_id: &str) -> Option<NaiveDate> {
        date_digits(activity_id).and_then(|d| parse_date_compact(d).ok())
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[test]
        fn test_parse_year() {
            assert_eq!(parse_year("2004").unwrap(), 2004);
            assert_eq!(parse_year(" 1999 ").unwrap(), 1999);
            assert_eq!(parse_year("2004.0").unwrap(), 2004);
            assert!(parse_year("04").is_err());
            assert!(parse_year("20x4").is_err());
            assert!(parse_year("").is_err());
        }

        #[test]
        fn test_year_start_window() {
            assert_eq!(year_start(2000), NaiveDate::from_ymd_opt(2000, 1, 1));
            assert_eq!(year_start(1700), None);
            assert_eq!(year_start(2025), NaiveDate::from_ymd_opt(2025, 1, 1));
            assert_eq!(year_start(2026), None);
            assert_eq!(
                parse_year_date("2010"),
                NaiveDate::from_ymd_opt(2010, 1, 1)
            );
        }

        #[test]
        fn test_activity_id_dates() {
            let id = "GRSM_F_0123_20040615_S";
            assert_eq!(date_digits(id), Some("20040615"));
            assert_eq!(year_from_activity_id(id), Some(2004));
            assert_eq!(
                date_from_activity_id(id),
                NaiveDate::from_ymd_opt(2004, 6, 15)
            );

            // First eight digits of a longer run, like a regex \d{8} match.
            assert_eq!(year_from_activity_id("X1993071512"), Some(1993));
            assert_eq!(year_from_activity_id("GRSM_F_0123"), None);
            // Digits that do not form a calendar date still yield a year.
            assert_eq!(year_from_activity_id("ID19981399"), Some(1998));
            assert_eq!(date_from_activity_id("ID19981399"), None);
        }

        #[test]
        fn test_format_and_parse() {
            let date = NaiveDate::from_ymd_opt(2023, 6, 15).unwrap();
            assert_eq!(format_date(&date), "2023-06-15");
            assert_eq!(format_year(&date), "2023");
            assert_eq!(parse_date("2023-06-15").unwrap(), date);
            assert_eq!(parse_date_compact("20230615").unwrap(), date);
        }
    }
}

/// Error types
pub mod error {
    use std::fmt;

    #[derive(Debug, Clone, PartialEq)]
    pub enum ParseError {
        InvalidYear(String),
        InvalidDate(String),
        InvalidNumber(String),
    }

    impl fmt::Display for ParseError {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            match self {
                ParseError::InvalidYear(s) => write!(f, "Invalid year: {:?}", s),
                ParseError::InvalidDate(s) => write!(f, "Invalid date: {:?}", s),
                ParseError::InvalidNumber(s) => write!(f, "Invalid number: {:?}", s),
            }
        }
    }

    impl std::error::Error for ParseError {}
}

/// Numeric helpers shared by the loaders
pub mod numbers {
    use crate::error::ParseError;

    /// Parse a numeric cell, tolerating surrounding whitespace and
    /// thousands separators ("1,234,567").
    pub fn parse_number(s: &str) -> Result<f64, ParseError> {
        let cleaned: String = s.trim().chars().filter(|c| *c != ',').collect();
        match cleaned.parse::<f64>() {
            Ok(v) if v.is_finite() => Ok(v),
            _ => Err(ParseError::InvalidNumber(s.to_string())),
        }
    }

    /// Replace non-finite values with `fallback`.
    pub fn finite_or(value: f64, fallback: f64) -> f64 {
        if value.is_finite() {
            value
        } else {
            fallback
        }
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[test]
        fn test_parse_number() {
            assert_eq!(parse_number("12").unwrap(), 12.0);
            assert_eq!(parse_number(" 1,234,567 ").unwrap(), 1_234_567.0);
            assert_eq!(parse_number("-3.5").unwrap(), -3.5);
            assert!(parse_number("n/a").is_err());
            assert!(parse_number("NaN").is_err());
            assert!(parse_number("").is_err());
        }

        #[test]
        fn test_finite_or() {
            assert_eq!(finite_or(2.0, 0.0), 2.0);
            assert_eq!(finite_or(f64::NAN, 0.0), 0.0);
            assert_eq!(finite_or(f64::INFINITY, 1.0), 1.0);
        }
    }
}

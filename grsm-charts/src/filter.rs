//! Filter state shared by the brushed panels.

use chrono::NaiveDate;
use serde::Serialize;

/// Which categories the stacked chart shows.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub enum CategoryFilter {
    /// Every category, stacked.
    #[default]
    None,
    /// One category drawn on its own from zero.
    Solo(String),
}

impl CategoryFilter {
    /// Click rule: with no filter the clicked category is isolated; with any
    /// filter active the click clears it.
    pub fn toggled(&self, category: &str) -> CategoryFilter {
        match self {
            CategoryFilter::None => CategoryFilter::Solo(category.to_string()),
            CategoryFilter::Solo(_) => CategoryFilter::None,
        }
    }

    pub fn solo(&self) -> Option<&str> {
        match self {
            CategoryFilter::None => None,
            CategoryFilter::Solo(c) => Some(c),
        }
    }
}

/// Inclusive date interval with `start <= end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DateRange {
    start: NaiveDate,
    end: NaiveDate,
}

impl DateRange {
    /// Endpoints are swapped when given in reverse.
    pub fn new(a: NaiveDate, b: NaiveDate) -> Self {
        if a <= b {
            Self { start: a, end: b }
        } else {
            Self { start: b, end: a }
        }
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn end(&self) -> NaiveDate {
        self.end
    }

    pub fn contains(&self, date: &NaiveDate) -> bool {
        self.start <= *date && *date <= self.end
    }
}

/// Anything that accepts a date range from a brush.
pub trait RangeSink {
    fn set_filter_range(&mut self, range: Option<DateRange>);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toggle_twice_restores() {
        let none = CategoryFilter::None;
        let solo = none.toggled("Elk");
        assert_eq!(solo, CategoryFilter::Solo("Elk".into()));
        assert_eq!(solo.toggled("Elk"), CategoryFilter::None);
        // Clicking another category while one is isolated clears as well.
        assert_eq!(solo.toggled("Bear"), CategoryFilter::None);
    }

    #[test]
    fn range_orders_endpoints() {
        let a = NaiveDate::from_ymd_opt(2005, 1, 1).unwrap();
        let b = NaiveDate::from_ymd_opt(2001, 1, 1).unwrap();
        let r = DateRange::new(a, b);
        assert_eq!((r.start(), r.end()), (b, a));
        assert!(r.contains(&a) && r.contains(&b));
        assert!(!r.contains(&NaiveDate::from_ymd_opt(2006, 1, 1).unwrap()));
    }
}

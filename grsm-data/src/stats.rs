//! Summary statistics used by the trend panels.

use crate::records::YearMean;
use serde::Serialize;
use std::collections::BTreeMap;

/// Arithmetic mean of the finite values, `None` if there are none.
pub fn mean(values: impl IntoIterator<Item = f64>) -> Option<f64> {
    let (sum, count) = values
        .into_iter()
        .filter(|v| v.is_finite())
        .fold((0.0, 0usize), |(s, c), v| (s + v, c + 1));
    (count > 0).then(|| sum / count as f64)
}

/// Roll up `(year, value)` pairs into one mean per year, ascending by year.
pub fn yearly_means(points: impl IntoIterator<Item = (i32, f64)>) -> Vec<YearMean> {
    let mut by_year: BTreeMap<i32, Vec<f64>> = BTreeMap::new();
    for (year, value) in points {
        by_year.entry(year).or_default().push(value);
    }
    by_year
        .into_iter()
        .filter_map(|(year, values)| mean(values).map(|mean| YearMean { year, mean }))
        .collect()
}

/// Ordinary least-squares line `y = slope * x + intercept`.
#[derive(Debug, Clone, Copy, Serialize, PartialEq)]
pub struct Trend {
    pub slope: f64,
    pub intercept: f64,
}

impl Trend {
    pub fn at(&self, x: f64) -> f64 {
        self.intercept + self.slope * x
    }
}

/// Fit a least-squares line. Needs at least two points with distinct x.
pub fn least_squares(xs: &[f64], ys: &[f64]) -> Option<Trend> {
    if xs.len() != ys.len() || xs.len() < 2 {
        return None;
    }
    let x_mean = mean(xs.iter().copied())?;
    let y_mean = mean(ys.iter().copied())?;
    let numerator: f64 = xs
        .iter()
        .zip(ys)
        .map(|(x, y)| (x - x_mean) * (y - y_mean))
        .sum();
    let denominator: f64 = xs.iter().map(|x| (x - x_mean).powi(2)).sum();
    if denominator == 0.0 || !numerator.is_finite() {
        return None;
    }
    let slope = numerator / denominator;
    Some(Trend {
        slope,
        intercept: y_mean - slope * x_mean,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mean_skips_non_finite() {
        assert_eq!(mean([1.0, 2.0, f64::NAN, 3.0]), Some(2.0));
        assert_eq!(mean(Vec::<f64>::new()), None);
        assert_eq!(mean([f64::NAN]), None);
    }

    #[test]
    fn yearly_means_are_sorted() {
        let means = yearly_means([(2002, 15.0), (2000, 8.0), (2000, 12.0), (2001, 20.0)]);
        assert_eq!(
            means,
            vec![
                YearMean { year: 2000, mean: 10.0 },
                YearMean { year: 2001, mean: 20.0 },
                YearMean { year: 2002, mean: 15.0 },
            ]
        );
    }

    #[test]
    fn least_squares_fits_a_line() {
        let trend = least_squares(&[2000.0, 2001.0, 2002.0], &[1.0, 3.0, 5.0]).unwrap();
        assert!((trend.slope - 2.0).abs() < 1e-9);
        assert!((trend.at(2001.0) - 3.0).abs() < 1e-6);
    }

    #[test]
    fn least_squares_degenerate_inputs() {
        assert_eq!(least_squares(&[2000.0], &[1.0]), None);
        assert_eq!(least_squares(&[2000.0, 2000.0], &[1.0, 2.0]), None);
        assert_eq!(least_squares(&[1.0, 2.0], &[1.0]), None);
    }
}

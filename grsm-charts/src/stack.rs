//! Stack layout: cumulative baselines per category.

use chrono::NaiveDate;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct StackPoint {
    pub year: NaiveDate,
    pub baseline: f64,
    pub top: f64,
}

/// One category's band across the years.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StackedSeries {
    pub key: String,
    /// Position in the stack; 0 sits on the axis.
    pub index: usize,
    pub points: Vec<StackPoint>,
}

/// A row of the stack input: one year, one value per key.
#[derive(Debug, Clone, PartialEq)]
pub struct StackRow {
    pub year: NaiveDate,
    pub values: Vec<f64>,
}

fn value(v: f64) -> f64 {
    if v.is_finite() {
        v
    } else {
        0.0
    }
}

/// Key indices ordered by descending total; ties keep key order.
pub fn order_by_descending_total(key_count: usize, rows: &[StackRow]) -> Vec<usize> {
    let totals: Vec<f64> = (0..key_count)
        .map(|k| {
            rows.iter()
                .map(|r| value(r.values.get(k).copied().unwrap_or(0.0)))
                .sum()
        })
        .collect();
    let mut order: Vec<usize> = (0..key_count).collect();
    order.sort_by(|a, b| totals[*b].total_cmp(&totals[*a]));
    order
}

/// Stack `rows` with `order[0]` at the bottom. Missing or non-finite values
/// count as 0. Series come back in stack order.
pub fn stack(keys: &[String], rows: &[StackRow], order: &[usize]) -> Vec<StackedSeries> {
    let mut series: Vec<StackedSeries> = order
        .iter()
        .enumerate()
        .filter_map(|(index, k)| {
            keys.get(*k).map(|key| StackedSeries {
                key: key.clone(),
                index,
                points: Vec::with_capacity(rows.len()),
            })
        })
        .collect();
    for row in rows {
        let mut running = 0.0;
        for (s, k) in series.iter_mut().zip(order) {
            let v = value(row.values.get(*k).copied().unwrap_or(0.0));
            s.points.push(StackPoint {
                year: row.year,
                baseline: running,
                top: running + v,
            });
            running += v;
        }
    }
    series
}

/// Largest top in any series, 0 when empty.
pub fn max_top(series: &[StackedSeries]) -> f64 {
    series
        .iter()
        .flat_map(|s| s.points.iter().map(|p| p.top))
        .filter(|v| v.is_finite())
        .fold(0.0, f64::max)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn year(y: i32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, 1, 1).unwrap()
    }

    fn keys() -> Vec<String> {
        vec!["Bear".into(), "Elk".into(), "Trout".into()]
    }

    fn rows() -> Vec<StackRow> {
        vec![
            StackRow { year: year(2000), values: vec![1.0, 5.0, 2.0] },
            StackRow { year: year(2001), values: vec![3.0, f64::NAN, 2.5] },
            StackRow { year: year(2002), values: vec![2.0, 4.0] },
        ]
    }

    #[test]
    fn orders_by_total_descending() {
        // Bear 6, Elk 9, Trout 4.5
        assert_eq!(order_by_descending_total(3, &rows()), vec![1, 0, 2]);
        // Ties keep key order.
        let tied = vec![StackRow { year: year(2000), values: vec![1.0, 1.0] }];
        assert_eq!(order_by_descending_total(2, &tied), vec![0, 1]);
    }

    #[test]
    fn top_of_last_layer_is_row_sum() {
        let rows = rows();
        let order = order_by_descending_total(3, &rows);
        let series = stack(&keys(), &rows, &order);
        let last = series.last().unwrap();
        for (row, point) in rows.iter().zip(&last.points) {
            let sum: f64 = row.values.iter().filter(|v| v.is_finite()).sum();
            assert!((point.top - sum).abs() < 1e-9);
        }
        assert_eq!(series[0].key, "Elk");
        assert_eq!(series[0].points[0].baseline, 0.0);
        assert_eq!(series[1].points[0].baseline, 5.0);
        assert_eq!(max_top(&series), 8.0);
    }
}

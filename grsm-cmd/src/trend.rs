//! `anc-trend`: the ANC trend panel's series, filtered the way the heatmap
//! brush filters it.

use crate::source;
use grsm_charts::anc_trend::AncTrend;
use grsm_charts::dispatch::year_range;
use grsm_charts::{Dispatcher, YearRangePayload, YEAR_RANGE_SELECTED};
use grsm_data::stats::Trend;
use grsm_data::{DatasetPaths, WaterSample, YearMean};
use log::{info, warn};
use std::cell::RefCell;
use std::io::Write;
use std::rc::Rc;

/// Yearly means shown after publishing `range` on a fresh dispatcher.
///
/// A range with no samples leaves the unfiltered series in place, as it
/// does on the page.
pub fn displayed_series(
    samples: &[WaterSample],
    range: Option<(i32, i32)>,
) -> (Vec<YearMean>, Option<Trend>) {
    let dispatcher: Dispatcher<YearRangePayload> = Dispatcher::new();
    let trend = Rc::new(RefCell::new(AncTrend::from_samples(samples)));
    AncTrend::attach(&trend, &dispatcher);

    let payload = range.and_then(|(start, end)| year_range(start, end));
    let delivery = dispatcher.publish(YEAR_RANGE_SELECTED, &payload);
    if delivery.failed > 0 {
        warn!("[GRSM] anc-trend: {} subscriber(s) failed", delivery.failed);
    }

    let trend = trend.borrow();
    (trend.displayed().to_vec(), trend.regression())
}

/// `year,mean` CSV with a header row.
pub fn write_series<W: Write>(writer: W, series: &[YearMean]) -> anyhow::Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    wtr.write_record(["year", "mean"])?;
    for m in series {
        wtr.write_record([m.year.to_string(), format!("{:.3}", m.mean)])?;
    }
    wtr.flush()?;
    Ok(())
}

pub async fn run_anc_trend(data_dir: &str, range: Option<(i32, i32)>) -> anyhow::Result<()> {
    let paths = DatasetPaths::new(data_dir);
    let samples = source::water_samples(&paths).await?;
    let (series, regression) = displayed_series(&samples, range);

    match regression {
        Some(t) => info!(
            "[GRSM] anc-trend: {} years, slope {:.3} per year",
            series.len(),
            t.slope
        ),
        None => info!("[GRSM] anc-trend: {} years, no trend", series.len()),
    }
    write_series(std::io::stdout().lock(), &series)
}

#[cfg(test)]
mod tests {
    use super::*;
    use grsm_data::water::ANC;

    fn samples() -> Vec<WaterSample> {
        [(2000, 10.0), (2000, 30.0), (2001, 40.0), (2002, 50.0), (2003, 70.0)]
            .iter()
            .map(|&(year, value)| WaterSample {
                location_id: "GRSM_F_0001".to_string(),
                characteristic: ANC.to_string(),
                year,
                date: None,
                value,
            })
            .collect()
    }

    #[test]
    fn unfiltered_series() {
        let (series, trend) = displayed_series(&samples(), None);
        let years: Vec<i32> = series.iter().map(|m| m.year).collect();
        assert_eq!(years, vec![2000, 2001, 2002, 2003]);
        assert_eq!(series[0].mean, 20.0);
        assert!(trend.is_some());
    }

    #[test]
    fn reversed_range_is_normalised() {
        let (series, _) = displayed_series(&samples(), Some((2002, 2001)));
        let years: Vec<i32> = series.iter().map(|m| m.year).collect();
        assert_eq!(years, vec![2001, 2002]);
    }

    #[test]
    fn empty_range_keeps_full_series() {
        let (series, _) = displayed_series(&samples(), Some((1950, 1960)));
        assert_eq!(series.len(), 4);
    }

    #[test]
    fn csv_output() {
        let mut out = Vec::new();
        let series = vec![YearMean { year: 2001, mean: 12.5 }];
        write_series(&mut out, &series).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "year,mean\n2001,12.500\n");
    }
}

//! Park-wide yearly mean trend with a least-squares regression line.
//!
//! Subscribes to `yearRangeSelected`: a year pair limits the series to
//! those years (inclusive), `None` restores everything.

use crate::axis::{self, Tick};
use crate::dispatch::{Dispatcher, YearRangePayload, YEAR_RANGE_SELECTED};
use crate::join::{self, JoinPatch};
use crate::scale::LinearScale;
use crate::shape::{line_path, Curve};
use crate::viewport::{Layout, Margin, ViewportProvider, DEFAULT_SIZE};
use grsm_data::stats::{least_squares, yearly_means, Trend};
use grsm_data::water::{with_characteristic, ANC};
use grsm_data::{WaterSample, YearMean};
use serde::Serialize;
use std::cell::RefCell;
use std::rc::Rc;

pub const MARGIN: Margin = Margin::new(60.0, 100.0, 70.0, 120.0);
pub const CONTAINER_ID: &str = "ancTrendVis";
pub const HANDLER_ID: &str = "ancTrend";
pub const TITLE: &str = "Park-Wide ANC Trend (1993–2023)";
pub const Y_LABEL: &str = "Mean ANC (µeq/L)";
pub const LINE_COLOR: &str = "#2ca25f";
pub const TREND_COLOR: &str = "#4477aa";
pub const TREND_DASH: &str = "4 3";
const POINT_RADIUS: f64 = 3.0;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrendPoint {
    pub year: i32,
    pub mean: f64,
    pub cx: f64,
    pub cy: f64,
    pub r: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AncFrame {
    pub layout: Layout,
    pub x_domain: (f64, f64),
    pub y_domain: (f64, f64),
    pub x_ticks: Vec<Tick>,
    pub y_ticks: Vec<Tick>,
    pub line: Option<String>,
    pub points: Vec<TrendPoint>,
    pub trend: Option<String>,
    pub join: JoinPatch,
}

#[derive(Debug, Clone)]
pub struct AncTrend {
    layout: Layout,
    /// `(year, value)` observations.
    observations: Vec<(i32, f64)>,
    range: YearRangePayload,
    displayed: Vec<YearMean>,
    rendered_years: Vec<String>,
}

impl AncTrend {
    pub fn new(observations: Vec<(i32, f64)>) -> Self {
        let mut trend = Self {
            layout: Layout::new(DEFAULT_SIZE, MARGIN),
            observations: Vec::new(),
            range: None,
            displayed: Vec::new(),
            rendered_years: Vec::new(),
        };
        trend.set_data(observations);
        trend
    }

    /// ANC samples only; other characteristics are ignored.
    pub fn from_samples(samples: &[WaterSample]) -> Self {
        Self::new(
            with_characteristic(samples, ANC)
                .map(|s| (s.year, s.value))
                .collect(),
        )
    }

    pub fn set_data(&mut self, observations: Vec<(i32, f64)>) {
        self.observations = observations
            .into_iter()
            .filter(|(_, v)| v.is_finite())
            .collect();
        self.displayed = Vec::new();
        self.update();
    }

    pub fn range(&self) -> YearRangePayload {
        self.range
    }

    /// Yearly means currently shown, ascending by year.
    pub fn displayed(&self) -> &[YearMean] {
        &self.displayed
    }

    /// Handler for `yearRangeSelected`.
    pub fn apply_year_range(&mut self, payload: YearRangePayload) {
        self.range = payload;
        self.update();
    }

    /// Recompute yearly means for the current range. A range with no data
    /// leaves the previous series on screen.
    fn update(&mut self) {
        let range = self.range;
        let means = yearly_means(
            self.observations
                .iter()
                .copied()
                .filter(|(year, _)| range.map_or(true, |(s, e)| s <= *year && *year <= e)),
        );
        if means.is_empty() {
            log::debug!("[GRSM] anc trend: nothing in {:?}, keeping last series", range);
            return;
        }
        self.displayed = means;
    }

    /// Register on `dispatcher` under [`HANDLER_ID`].
    pub fn attach(this: &Rc<RefCell<AncTrend>>, dispatcher: &Dispatcher<YearRangePayload>) {
        let target = Rc::clone(this);
        dispatcher.subscribe(YEAR_RANGE_SELECTED, HANDLER_ID, move |payload| {
            let mut trend = target
                .try_borrow_mut()
                .map_err(|_| anyhow::anyhow!("anc trend is already borrowed"))?;
            trend.apply_year_range(*payload);
            Ok(())
        });
    }

    pub fn regression(&self) -> Option<Trend> {
        let xs: Vec<f64> = self.displayed.iter().map(|m| m.year as f64).collect();
        let ys: Vec<f64> = self.displayed.iter().map(|m| m.mean).collect();
        least_squares(&xs, &ys)
    }

    pub fn render(&mut self, viewport: &dyn ViewportProvider, container_id: &str) -> AncFrame {
        self.layout = Layout::measure(viewport, container_id, MARGIN);
        self.frame()
    }

    pub fn resize(&mut self, layout: Layout) {
        self.layout = layout;
    }

    pub fn frame(&mut self) -> AncFrame {
        let Layout { width, height, .. } = self.layout;
        let first = self.displayed.first().map_or(0.0, |m| m.year as f64);
        let last = self.displayed.last().map_or(0.0, |m| m.year as f64);
        let max = self.displayed.iter().map(|m| m.mean).fold(0.0, f64::max);
        let x = LinearScale::new((first, last), (0.0, width));
        let y = LinearScale::new((0.0, max * 1.05), (height, 0.0));

        let coords: Vec<(f64, f64)> = self
            .displayed
            .iter()
            .map(|m| (x.apply(m.year as f64), y.apply(m.mean)))
            .collect();
        let points: Vec<TrendPoint> = self
            .displayed
            .iter()
            .zip(&coords)
            .map(|(m, (cx, cy))| TrendPoint {
                year: m.year,
                mean: m.mean,
                cx: *cx,
                cy: *cy,
                r: POINT_RADIUS,
            })
            .collect();
        let trend = self.regression().and_then(|t| {
            line_path(
                &[(x.apply(first), y.apply(t.at(first))), (x.apply(last), y.apply(t.at(last)))],
                Curve::MonotoneX,
            )
        });

        let keys: Vec<String> = points.iter().map(|p| p.year.to_string()).collect();
        let join = join::reconcile(
            self.rendered_years.iter().map(String::as_str),
            keys.iter().map(String::as_str),
        );
        self.rendered_years = keys;

        AncFrame {
            layout: self.layout,
            x_domain: x.domain,
            y_domain: y.domain,
            x_ticks: axis::linear_ticks(&x, 10, |v| format!("{:.0}", v)),
            y_ticks: axis::linear_ticks(&y, 6, |v| format!("{}", v)),
            line: line_path(&coords, Curve::MonotoneX),
            points,
            trend,
            join,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::heatmap::tests::cell;
    use crate::heatmap::WaterHeatmap;
    use crate::viewport::{FixedViewport, Size};

    fn series() -> Vec<(i32, f64)> {
        vec![(2000, 10.0), (2001, 20.0), (2002, 15.0)]
    }

    fn means(pairs: &[(i32, f64)]) -> Vec<YearMean> {
        pairs.iter().map(|(year, mean)| YearMean { year: *year, mean: *mean }).collect()
    }

    #[test]
    fn year_range_event_filters_series() {
        let dispatcher = Dispatcher::new();
        let trend = Rc::new(RefCell::new(AncTrend::new(series())));
        AncTrend::attach(&trend, &dispatcher);

        dispatcher.publish(YEAR_RANGE_SELECTED, &Some((2000, 2001)));
        assert_eq!(trend.borrow().displayed(), means(&[(2000, 10.0), (2001, 20.0)]));

        dispatcher.publish(YEAR_RANGE_SELECTED, &None);
        assert_eq!(trend.borrow().displayed(), means(&series()));
    }

    #[test]
    fn empty_range_keeps_previous_series() {
        let mut trend = AncTrend::new(series());
        trend.apply_year_range(Some((2001, 2002)));
        trend.apply_year_range(Some((1990, 1995)));
        assert_eq!(trend.range(), Some((1990, 1995)));
        assert_eq!(trend.displayed(), means(&[(2001, 20.0), (2002, 15.0)]));
    }

    #[test]
    fn yearly_means_from_samples() {
        let samples = grsm_data::water::parse_water_results(
            "Activity_ID,Location_ID,Characteristic_Name,Result_Text\n\
             GRSM_F_01_20000101,GRSM_F_01,Acid Neutralizing Capacity (ANC),10\n\
             GRSM_F_02_20000601,GRSM_F_02,Acid Neutralizing Capacity (ANC),30\n\
             GRSM_F_02_20010601,GRSM_F_02,pH,6.5\n",
        )
        .unwrap();
        let trend = AncTrend::from_samples(&samples);
        assert_eq!(trend.displayed(), means(&[(2000, 20.0)]));
        assert!(trend.regression().is_none());
    }

    #[test]
    fn frame_has_line_points_and_trend() {
        let mut trend = AncTrend::new(series());
        let frame = trend.render(&FixedViewport(Size::new(520.0, 330.0)), CONTAINER_ID);
        assert_eq!(frame.x_domain, (2000.0, 2002.0));
        assert!((frame.y_domain.1 - 21.0).abs() < 1e-9);
        assert_eq!(frame.points.len(), 3);
        assert_eq!(frame.points[0].cx, 0.0);
        assert_eq!(frame.points[2].cx, 300.0);
        assert!(frame.line.as_deref().unwrap().starts_with("M0,"));
        assert!(frame.trend.is_some());
        assert_eq!(frame.join.entered, vec!["2000", "2001", "2002"]);

        trend.apply_year_range(Some((2001, 2002)));
        let frame = trend.frame();
        assert_eq!(frame.join.exited, vec!["2000"]);
        assert_eq!(frame.join.updated, vec!["2001", "2002"]);
    }

    #[test]
    fn heatmap_brush_drives_trend() {
        let dispatcher = Dispatcher::new();
        let trend = Rc::new(RefCell::new(AncTrend::new(series())));
        AncTrend::attach(&trend, &dispatcher);
        let mut heatmap = WaterHeatmap::new(
            vec![cell("S", 2000, 10.0), cell("S", 2001, 20.0), cell("S", 2002, 15.0)],
            dispatcher,
        );
        heatmap.resize(Layout::new(Size::new(300.0, 100.0), Margin::new(0.0, 0.0, 0.0, 0.0)));

        heatmap.pointer_down(0.0);
        heatmap.pointer_up(150.0);
        assert_eq!(trend.borrow().range(), Some((2000, 2001)));
        assert_eq!(trend.borrow().displayed().len(), 2);
    }
}

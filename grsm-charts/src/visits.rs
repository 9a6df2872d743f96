//! Annual recreation visits: a line with one marker per year.

use crate::axis::{self, format_si_digits, format_thousands, Tick};
use crate::scale::LinearScale;
use crate::shape::{line_path, Curve};
use crate::viewport::{Layout, Margin, Size, ViewportProvider, DEFAULT_SIZE};
use chrono::Datelike;
use grsm_data::VisitRecord;
use serde::Serialize;

pub const MARGIN: Margin = Margin::new(40.0, 70.0, 80.0, 85.0);
pub const CONTAINER_ID: &str = "visitsVis";
pub const TITLE: &str = "Annual Recreation Visits to Great Smoky Mountains National Park";
pub const X_LABEL: &str = "Year";
pub const Y_LABEL: &str = "Number of Visitors";
pub const COLOR: &str = "#2E8B57";
/// Plot height cap; the chart is otherwise half as tall as it is wide.
pub const MAX_HEIGHT: f64 = 400.0;
const POINT_RADIUS: f64 = 2.5;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VisitPoint {
    pub year: i32,
    pub visits: f64,
    pub cx: f64,
    pub cy: f64,
    pub r: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VisitsFrame {
    pub layout: Layout,
    pub x_domain: (f64, f64),
    pub y_domain: (f64, f64),
    pub x_ticks: Vec<Tick>,
    pub y_ticks: Vec<Tick>,
    pub line: Option<String>,
    pub points: Vec<VisitPoint>,
}

#[derive(Debug, Clone)]
pub struct VisitsChart {
    layout: Layout,
    /// `(year, visits)`, ascending by year.
    data: Vec<(i32, f64)>,
}

impl VisitsChart {
    pub fn new(records: &[VisitRecord]) -> Self {
        let mut chart = Self {
            layout: Self::layout_for(DEFAULT_SIZE),
            data: Vec::new(),
        };
        chart.set_data(records);
        chart
    }

    pub fn set_data(&mut self, records: &[VisitRecord]) {
        let mut data: Vec<(i32, f64)> = records
            .iter()
            .filter(|r| r.visits.is_finite())
            .map(|r| (r.date.year(), r.visits))
            .collect();
        data.sort_by_key(|(year, _)| *year);
        self.data = data;
    }

    pub fn data(&self) -> &[(i32, f64)] {
        &self.data
    }

    /// Width follows the container; height is `min(400, width / 2)`.
    pub fn layout_for(outer: Size) -> Layout {
        let height = MAX_HEIGHT.min(outer.width * 0.5);
        Layout::new(Size::new(outer.width, height), MARGIN)
    }

    pub fn render(&mut self, viewport: &dyn ViewportProvider, container_id: &str) -> VisitsFrame {
        let outer = Layout::measure(viewport, container_id, MARGIN).outer;
        self.layout = Self::layout_for(outer);
        self.frame()
    }

    pub fn resize(&mut self, layout: Layout) {
        self.layout = layout;
    }

    pub fn x_scale(&self) -> LinearScale {
        let first = self.data.first().map_or(0.0, |(y, _)| *y as f64);
        let last = self.data.last().map_or(0.0, |(y, _)| *y as f64);
        LinearScale::new((first, last), (0.0, self.layout.width))
    }

    pub fn y_scale(&self) -> LinearScale {
        let max = self.data.iter().map(|(_, v)| *v).fold(0.0, f64::max);
        let max = if max > 0.0 { max } else { 1.0 };
        LinearScale::new((0.0, max), (self.layout.height, 0.0))
    }

    /// Tooltip lines for `year`, `None` if the year has no count.
    pub fn tooltip(&self, year: i32) -> Option<Vec<String>> {
        let (_, visits) = self.data.iter().find(|(y, _)| *y == year)?;
        Some(vec![
            format!("Year: {}", year),
            format!("Number of Visits: {}", format_thousands(*visits)),
        ])
    }

    pub fn frame(&self) -> VisitsFrame {
        let x = self.x_scale();
        let y = self.y_scale();
        let points: Vec<VisitPoint> = self
            .data
            .iter()
            .map(|(year, visits)| VisitPoint {
                year: *year,
                visits: *visits,
                cx: x.apply(*year as f64),
                cy: y.apply(*visits),
                r: POINT_RADIUS,
            })
            .collect();
        let coords: Vec<(f64, f64)> = points.iter().map(|p| (p.cx, p.cy)).collect();

        VisitsFrame {
            layout: self.layout,
            x_domain: x.domain,
            y_domain: y.domain,
            x_ticks: axis::linear_ticks(&x, 10, |v| format!("{:.0}", v)),
            y_ticks: axis::linear_ticks(&y, 10, |v| format_si_digits(v, 2)),
            line: line_path(&coords, Curve::Linear),
            points,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::viewport::FixedViewport;
    use chrono::NaiveDate;

    fn visit(year: i32, visits: f64) -> VisitRecord {
        VisitRecord {
            date: NaiveDate::from_ymd_opt(year, 1, 1).unwrap(),
            visits,
        }
    }

    #[test]
    fn height_follows_width() {
        let layout = VisitsChart::layout_for(Size::new(600.0, 900.0));
        assert_eq!(layout.outer.height, 300.0);
        assert_eq!(layout.height, 300.0 - 40.0 - 80.0);

        let layout = VisitsChart::layout_for(Size::new(1200.0, 900.0));
        assert_eq!(layout.outer.height, MAX_HEIGHT);
    }

    #[test]
    fn frame_sorts_and_scales() {
        let mut chart = VisitsChart::new(&[
            visit(2002, 12_000_000.0),
            visit(2000, 10_000_000.0),
            visit(2001, f64::NAN),
        ]);
        let frame = chart.render(&FixedViewport(Size::new(755.0, 900.0)), CONTAINER_ID);
        assert_eq!(frame.x_domain, (2000.0, 2002.0));
        assert_eq!(frame.y_domain, (0.0, 12_000_000.0));
        assert_eq!(frame.points.len(), 2);
        assert_eq!(frame.points[0].cx, 0.0);
        assert_eq!(frame.points[1].cx, 600.0);
        assert_eq!(frame.points[1].cy, 0.0);
        assert!(frame.line.as_deref().unwrap().starts_with("M0,"));
        assert!(frame.y_ticks.iter().any(|t| t.label == "10M"));
    }

    #[test]
    fn empty_data_keeps_unit_domain() {
        let chart = VisitsChart::new(&[]);
        let frame = chart.frame();
        assert_eq!(frame.y_domain, (0.0, 1.0));
        assert!(frame.points.is_empty());
        assert!(frame.line.is_none());
    }

    #[test]
    fn tooltip_lines() {
        let chart = VisitsChart::new(&[visit(2001, 9_197_697.0)]);
        assert_eq!(
            chart.tooltip(2001).unwrap(),
            vec!["Year: 2001", "Number of Visits: 9,197,697"]
        );
        assert!(chart.tooltip(1999).is_none());
    }
}

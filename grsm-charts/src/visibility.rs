//! Fine particulate (PM2.5) readings with a recreation visits overlay.
//!
//! One component object owns every scale and the overlay data; callers go
//! through `initialize`, the setters and `update` to get a fresh frame.
//! The overlay's fill fades with PM2.5 along the x axis, so cleaner air
//! reads as a denser green.

use crate::axis::{self, Tick};
use crate::scale::{LinearScale, TimeScale};
use crate::shape::{area_path_defined, line_path_defined, AreaPoint, Curve};
use crate::viewport::{Layout, Margin, DEFAULT_SIZE};
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use grsm_data::{VisibilityReading, VisitRecord};
use serde::Serialize;

pub const MARGIN: Margin = Margin::new(150.0, 450.0, 50.0, 20.0);
pub const CONTAINER_ID: &str = "comparisonVis";
pub const TITLE: &str = "Improvements on Air Quality Affecting Visitation Based on Particulate Matter";
pub const X_LABEL: &str = "Year";
pub const Y_LABEL: &str = "Visitors";
pub const LINE_COLOR: &str = "steelblue";
pub const VISITS_COLOR: &str = "darkgreen";
pub const GRADIENT_ID: &str = "visitsOpacityGradient";

pub const PM_OPACITY_MIN: f64 = 0.12;
pub const PM_OPACITY_MAX: f64 = 0.95;
/// PM2.5 at which the overlay reaches full opacity.
pub const PM_LINEAR_MAX: f64 = 35.0;
const MAX_STOPS: usize = 80;

/// Readings before this date are not shown.
pub fn min_date() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2000, 1, 1)
        .unwrap_or_default()
        .and_time(NaiveTime::MIN)
}

/// Overlay opacity for a PM2.5 value, linear over `[0, PM_LINEAR_MAX]`.
pub fn opacity_from_pm(pm: f64) -> f64 {
    let t = (pm / PM_LINEAR_MAX).clamp(0.0, 1.0);
    PM_OPACITY_MIN + t * (PM_OPACITY_MAX - PM_OPACITY_MIN)
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GradientStop {
    /// Fraction of the plot width, `[0, 1]`.
    pub offset: f64,
    pub opacity: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VisitsOverlay {
    pub y_domain: (f64, f64),
    pub y_ticks: Vec<Tick>,
    pub area: Option<String>,
    pub outline: Option<String>,
    /// Empty when the PM series gives nothing to fade by; fill with
    /// [`VISITS_COLOR`] then.
    pub gradient: Vec<GradientStop>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Focus {
    pub x: f64,
    pub date: NaiveDateTime,
    pub pm: Option<f64>,
    pub lines: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VisibilityFrame {
    pub layout: Layout,
    pub x_domain: Option<(NaiveDateTime, NaiveDateTime)>,
    pub y_domain: (f64, f64),
    pub x_ticks: Vec<Tick>,
    pub y_ticks: Vec<Tick>,
    pub line: Option<String>,
    pub line_visible: bool,
    pub visits: Option<VisitsOverlay>,
    pub focus: Option<Focus>,
}

#[derive(Debug, Clone)]
pub struct VisibilityGraph {
    layout: Layout,
    base: Vec<VisibilityReading>,
    visits: Vec<VisitRecord>,
    current: Vec<VisibilityReading>,
    show_line: bool,
    focus: Option<Focus>,
}

impl Default for VisibilityGraph {
    fn default() -> Self {
        Self {
            layout: Layout::new(DEFAULT_SIZE, MARGIN),
            base: Vec::new(),
            visits: Vec::new(),
            current: Vec::new(),
            show_line: false,
            focus: None,
        }
    }
}

impl VisibilityGraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn initialize(&mut self, layout: Layout) {
        self.layout = layout;
        self.current = self.wrangle();
    }

    pub fn set_data(&mut self, readings: Vec<VisibilityReading>) {
        self.base = readings;
        self.current = self.wrangle();
    }

    /// The overlay also caps the PM series at the last visits date.
    pub fn set_visits_overlay(&mut self, visits: Vec<VisitRecord>) {
        self.visits = visits;
        self.current = self.wrangle();
    }

    pub fn set_visibility_line_visible(&mut self, visible: bool) {
        self.show_line = visible;
    }

    pub fn resize(&mut self, layout: Layout) {
        self.layout = layout;
        self.focus = None;
    }

    /// Finite readings from 2000 on, not past the last visits date.
    pub fn wrangle(&self) -> Vec<VisibilityReading> {
        let visits_max = self
            .visits
            .iter()
            .map(|v| v.date.and_time(NaiveTime::MIN))
            .max();
        let floor = min_date();
        self.base
            .iter()
            .filter(|r| r.pm.is_finite() && r.date >= floor)
            .filter(|r| visits_max.map_or(true, |max| r.date <= max))
            .cloned()
            .collect()
    }

    pub fn displayed(&self) -> &[VisibilityReading] {
        &self.current
    }

    fn x_scale(&self) -> Option<TimeScale> {
        let first = self.current.iter().map(|r| r.date).min()?;
        let last = self.current.iter().map(|r| r.date).max()?;
        Some(TimeScale::new((first, last), (0.0, self.layout.width)))
    }

    fn y_scale(&self) -> LinearScale {
        let max = self.current.iter().map(|r| r.pm).fold(0.0, f64::max);
        LinearScale::new((0.0, max), (self.layout.height, 0.0))
    }

    /// Recompute and return the frame.
    pub fn update(&mut self) -> VisibilityFrame {
        self.current = self.wrangle();
        self.frame()
    }

    pub fn frame(&self) -> VisibilityFrame {
        let y = self.y_scale();
        let Some(x) = self.x_scale() else {
            return VisibilityFrame {
                layout: self.layout,
                x_domain: None,
                y_domain: y.domain,
                x_ticks: Vec::new(),
                y_ticks: Vec::new(),
                line: None,
                line_visible: self.show_line,
                visits: None,
                focus: None,
            };
        };
        let points: Vec<Option<(f64, f64)>> = self
            .current
            .iter()
            .map(|r| r.pm.is_finite().then(|| (x.apply(&r.date), y.apply(r.pm))))
            .collect();
        let tick_count = ((self.layout.width / 80.0) as usize).max(2);
        VisibilityFrame {
            layout: self.layout,
            x_domain: Some(x.domain()),
            y_domain: y.domain,
            x_ticks: axis::year_ticks(&x, tick_count),
            y_ticks: axis::linear_ticks(&y, 10, |v| format!("{}", v)),
            line: line_path_defined(&points, Curve::Linear),
            line_visible: self.show_line,
            visits: self.visits_overlay(&x),
            focus: self.focus.clone(),
        }
    }

    fn visits_overlay(&self, x: &TimeScale) -> Option<VisitsOverlay> {
        let (x_min, x_max) = x.domain();
        let floor = min_date().max(x_min);
        let data: Vec<(NaiveDateTime, f64)> = self
            .visits
            .iter()
            .filter(|v| v.visits.is_finite())
            .map(|v| (v.date.and_time(NaiveTime::MIN), v.visits))
            .filter(|(date, _)| *date >= floor && *date <= x_max)
            .collect();
        if data.is_empty() {
            return None;
        }
        let max = data.iter().map(|(_, v)| *v).fold(0.0, f64::max);
        let yv = LinearScale::new((0.0, max), (self.layout.height, 0.0)).nice(10);
        let base = yv.apply(0.0);
        let area: Vec<Option<AreaPoint>> = data
            .iter()
            .map(|(date, v)| Some(AreaPoint::guarded(x.apply(date), base, yv.apply(*v), base)))
            .collect();
        let outline: Vec<Option<(f64, f64)>> = data
            .iter()
            .map(|(date, v)| Some((x.apply(date), yv.apply(*v))))
            .collect();
        Some(VisitsOverlay {
            y_domain: yv.domain,
            y_ticks: axis::linear_ticks(&yv, 10, axis::format_si),
            area: area_path_defined(&area, Curve::Linear),
            outline: line_path_defined(&outline, Curve::Linear),
            gradient: self.gradient(x),
        })
    }

    /// Opacity stops sampled along the PM series, at most about 80.
    pub fn gradient(&self, x: &TimeScale) -> Vec<GradientStop> {
        let width = self.layout.width.max(1.0);
        let offset = |r: &VisibilityReading| (x.apply(&r.date) / width).clamp(0.0, 1.0);
        let step = self.current.len().div_ceil(MAX_STOPS).max(1);
        let mut stops: Vec<GradientStop> = self
            .current
            .iter()
            .step_by(step)
            .filter(|r| r.pm.is_finite())
            .map(|r| GradientStop {
                offset: offset(r),
                opacity: opacity_from_pm(r.pm),
            })
            .collect();
        if let (Some(last), Some(tail)) = (self.current.last(), stops.last().copied()) {
            let last_offset = offset(last);
            if last.pm.is_finite() && tail.offset < last_offset {
                stops.push(GradientStop {
                    offset: last_offset,
                    opacity: opacity_from_pm(last.pm),
                });
            }
        }
        stops
    }

    /// Pointer at plot x: find the reading at or after it (index clamped
    /// to at least 1) and describe it.
    pub fn hover(&mut self, px: f64) -> Option<Focus> {
        let x = self.x_scale()?;
        let at = x.invert(px)?;
        let i = self.current.partition_point(|r| r.date < at);
        let i = i.min(self.current.len().saturating_sub(1)).max(1);
        let reading = self.current.get(i);
        let date = reading.map_or(at, |r| r.date);
        let pm = reading.map(|r| r.pm).filter(|v| v.is_finite());
        let pm_text = pm.map_or_else(|| "n/a".to_string(), |v| format!("{:.1}", v));
        let focus = Focus {
            x: x.apply(&at),
            date,
            pm,
            lines: vec![
                date.format("%b, %Y").to_string(),
                format!("Particulate Matter: {} PM2.5(µg/m³)", pm_text),
            ],
        };
        self.focus = Some(focus.clone());
        Some(focus)
    }

    pub fn leave(&mut self) {
        self.focus = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::viewport::Size;

    fn at(y: i32, m: u32, d: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap()
    }

    fn reading(date: NaiveDateTime, pm: f64) -> VisibilityReading {
        VisibilityReading { date, pm }
    }

    fn visits(years: &[(i32, f64)]) -> Vec<VisitRecord> {
        years
            .iter()
            .map(|(y, v)| VisitRecord {
                date: NaiveDate::from_ymd_opt(*y, 1, 1).unwrap(),
                visits: *v,
            })
            .collect()
    }

    fn graph() -> VisibilityGraph {
        let mut graph = VisibilityGraph::new();
        // 500x200 plot.
        graph.initialize(Layout::new(Size::new(970.0, 400.0), MARGIN));
        graph.set_data(vec![
            reading(at(1999, 6, 1), 40.0),
            reading(at(2000, 6, 1), 30.0),
            reading(at(2001, 6, 1), f64::NAN),
            reading(at(2002, 6, 1), 20.0),
            reading(at(2003, 6, 1), 10.0),
            reading(at(2004, 6, 1), 5.0),
        ]);
        graph
    }

    #[test]
    fn wrangle_drops_old_and_missing_readings() {
        let graph = graph();
        let dates: Vec<NaiveDateTime> = graph.displayed().iter().map(|r| r.date).collect();
        assert_eq!(dates, vec![at(2000, 6, 1), at(2002, 6, 1), at(2003, 6, 1), at(2004, 6, 1)]);
    }

    #[test]
    fn visits_overlay_caps_readings() {
        let mut graph = graph();
        graph.set_visits_overlay(visits(&[
            (2000, 9_000_000.0),
            (2001, 10_000_000.0),
            (2002, 11_500_000.0),
            (2003, 12_000_000.0),
        ]));
        assert_eq!(graph.displayed().last().unwrap().date, at(2002, 6, 1));

        // 2000 falls before the first reading and 2003 after the last.
        let overlay = graph.update().visits.unwrap();
        assert_eq!(overlay.y_domain, (0.0, 12_000_000.0));
        assert_eq!(overlay.area.unwrap().matches('L').count(), 3);
        assert!(overlay.outline.is_some());
    }

    #[test]
    fn gradient_opacity_tracks_pm() {
        let graph = graph();
        let frame = graph.frame();
        assert!(frame.visits.is_none());
        let x = graph.x_scale().unwrap();
        let stops = graph.gradient(&x);
        assert_eq!(stops.len(), 4);
        assert_eq!(stops[0].offset, 0.0);
        assert_eq!(stops[3].offset, 1.0);
        assert!((stops[0].opacity - opacity_from_pm(30.0)).abs() < 1e-12);
        assert_eq!(opacity_from_pm(100.0), PM_OPACITY_MAX);
        assert_eq!(opacity_from_pm(-3.0), PM_OPACITY_MIN);
    }

    #[test]
    fn gradient_is_sampled_for_long_series() {
        let mut graph = VisibilityGraph::new();
        let start = at(2001, 1, 1);
        graph.set_data(
            (0..1000)
                .map(|h| reading(start + chrono::Duration::hours(h), (h % 40) as f64))
                .collect(),
        );
        let x = graph.x_scale().unwrap();
        let stops = graph.gradient(&x);
        assert!(stops.len() <= 81, "{}", stops.len());
        assert_eq!(stops.last().unwrap().offset, 1.0);
        assert!(stops
            .iter()
            .all(|s| (PM_OPACITY_MIN..=PM_OPACITY_MAX).contains(&s.opacity)));
    }

    #[test]
    fn hover_clamps_to_second_reading() {
        let mut graph = graph();
        let focus = graph.hover(0.0).unwrap();
        assert_eq!(focus.date, at(2002, 6, 1));
        assert_eq!(focus.lines[0], "Jun, 2002");
        assert_eq!(focus.lines[1], "Particulate Matter: 20.0 PM2.5(µg/m³)");
        assert!(graph.frame().focus.is_some());
        graph.leave();
        assert!(graph.frame().focus.is_none());
    }

    #[test]
    fn line_visibility_and_empty_data() {
        let mut graph = VisibilityGraph::new();
        let frame = graph.update();
        assert!(frame.line.is_none());
        assert!(graph.hover(10.0).is_none());
        graph.set_visibility_line_visible(true);
        assert!(graph.frame().line_visible);
    }
}

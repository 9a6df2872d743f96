//! Brushable overview of yearly totals.
//!
//! The timeline draws one area of total organisms per year and owns a
//! horizontal brush. Every brush change is inverted through the time scale
//! and pushed into a peer (`RangeSink`, normally the stacked area chart)
//! while the drag is still in progress.

use crate::axis::{self, Tick};
use crate::brush::{BrushEvent, BrushX, Pointer};
use crate::filter::{DateRange, RangeSink};
use crate::scale::{LinearScale, TimeScale};
use crate::shape::{area_path, AreaPoint, Curve};
use crate::viewport::{Layout, Margin, ViewportProvider, DEFAULT_SIZE};
use crate::TRANSITION_MS;
use chrono::NaiveDate;
use grsm_data::YearRecord;
use serde::Serialize;

pub const MARGIN: Margin = Margin::new(40.0, 90.0, 50.0, 90.0);
pub const CONTAINER_ID: &str = "timeline";
pub const TITLE: &str = "Total Lifeforms Spotted Annually";
pub const Y_LABEL: &str = "Total Lifeforms Spotted";
pub const FILL: &str = "#ccc";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum TimelineState {
    Uninitialized,
    Rendered,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimelineFrame {
    pub layout: Layout,
    pub x_domain: Option<(NaiveDate, NaiveDate)>,
    pub y_domain: (f64, f64),
    pub area: Option<String>,
    pub fill: &'static str,
    pub x_ticks: Vec<Tick>,
    pub y_ticks: Vec<Tick>,
    pub brush_extent: (f64, f64),
    pub selection: Option<(f64, f64)>,
    pub transition_ms: u32,
}

/// Frames a pointer event left stale.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Redraw {
    pub timeline: bool,
    pub peer: bool,
}

#[derive(Debug, Clone)]
pub struct Timeline {
    state: TimelineState,
    layout: Layout,
    data: Vec<(NaiveDate, f64)>,
    brush: BrushX,
}

fn clean(records: &[YearRecord]) -> Vec<(NaiveDate, f64)> {
    let mut data: Vec<(NaiveDate, f64)> = records
        .iter()
        .filter_map(|r| match r.year {
            Some(year) if r.total_spotted.is_finite() => Some((year, r.total_spotted)),
            _ => None,
        })
        .collect();
    data.sort_by_key(|(year, _)| *year);
    if data.len() < records.len() {
        log::debug!(
            "[GRSM] timeline: dropped {} invalid year records",
            records.len() - data.len()
        );
    }
    data
}

impl Timeline {
    pub fn new(records: &[YearRecord]) -> Self {
        let layout = Layout::new(DEFAULT_SIZE, MARGIN);
        Self {
            state: TimelineState::Uninitialized,
            layout,
            data: clean(records),
            brush: BrushX::new((0.0, layout.width)),
        }
    }

    pub fn state(&self) -> TimelineState {
        self.state
    }

    pub fn data(&self) -> &[(NaiveDate, f64)] {
        &self.data
    }

    pub fn selection(&self) -> Option<(f64, f64)> {
        self.brush.selection()
    }

    /// Replace the dataset. Once rendered, the brush is reset, so the peer
    /// gets its range cleared; the caller redraws from [`Self::frame`].
    pub fn set_data(&mut self, records: &[YearRecord], peer: &mut dyn RangeSink) {
        self.data = clean(records);
        if self.state == TimelineState::Rendered {
            let cleared = self.brush.clear();
            self.on_brush(cleared, peer);
        }
    }

    /// First draw: measure the container and size the brush to the plot.
    pub fn render(&mut self, viewport: &dyn ViewportProvider, container_id: &str) -> TimelineFrame {
        self.resize(Layout::measure(viewport, container_id, MARGIN));
        self.state = TimelineState::Rendered;
        self.frame()
    }

    pub fn resize(&mut self, layout: Layout) {
        self.layout = layout;
        self.brush.set_extent((0.0, layout.width));
    }

    fn x_domain(&self) -> Option<(NaiveDate, NaiveDate)> {
        Some((self.data.first()?.0, self.data.last()?.0))
    }

    pub fn x_scale(&self) -> Option<TimeScale> {
        self.x_domain()
            .map(|domain| TimeScale::from_dates(domain, (0.0, self.layout.width)))
    }

    /// `[0, max total]`; an empty dataset gives `[0, 0]`.
    pub fn y_scale(&self) -> LinearScale {
        let max = self.data.iter().map(|(_, v)| *v).fold(0.0, f64::max);
        LinearScale::new((0.0, max), (self.layout.height, 0.0))
    }

    pub fn frame(&self) -> TimelineFrame {
        let height = self.layout.height;
        let y = self.y_scale();
        let x = self.x_scale();
        let (area, x_ticks) = match &x {
            Some(x) => {
                let points: Vec<AreaPoint> = self
                    .data
                    .iter()
                    .map(|(year, total)| {
                        AreaPoint::guarded(x.apply_date(year), height, y.apply(*total), height)
                    })
                    .collect();
                let count = ((self.layout.width / 80.0) as usize).max(2);
                (area_path(&points, Curve::Linear), axis::year_ticks(x, count))
            }
            None => (None, Vec::new()),
        };
        TimelineFrame {
            layout: self.layout,
            x_domain: self.x_domain(),
            y_domain: y.domain,
            area,
            fill: FILL,
            x_ticks,
            y_ticks: axis::linear_ticks(&y, 5, axis::format_si),
            brush_extent: self.brush.extent(),
            selection: self.brush.selection(),
            transition_ms: TRANSITION_MS,
        }
    }

    /// Pressing only arms the brush; the peer hears about movement and
    /// completion.
    pub fn pointer_down(&mut self, x: f64) {
        self.brush.pointer_down(x);
    }

    pub fn pointer_move(&mut self, x: f64, peer: &mut dyn RangeSink) -> Option<DateRange> {
        let event = self.brush.pointer_move(x)?;
        self.on_brush(event, peer)
    }

    pub fn pointer_up(&mut self, x: f64, peer: &mut dyn RangeSink) -> Option<DateRange> {
        let event = self.brush.pointer_up(x)?;
        self.on_brush(event, peer)
    }

    /// Route one pointer event through the brush. Every brush event reaches
    /// the peer, including the empty selection a click leaves on release.
    /// Leaving the plot ends a drag like a release.
    pub fn on_pointer(&mut self, pointer: Pointer, x: f64, peer: &mut dyn RangeSink) -> Redraw {
        let event = match pointer {
            Pointer::Down => {
                self.brush.pointer_down(x);
                return Redraw {
                    timeline: true,
                    peer: false,
                };
            }
            Pointer::Move => self.brush.pointer_move(x),
            Pointer::Up | Pointer::Leave => self.brush.pointer_up(x),
        };
        match event {
            Some(event) => {
                self.on_brush(event, peer);
                Redraw {
                    timeline: true,
                    peer: true,
                }
            }
            None => Redraw::default(),
        }
    }

    /// Turn a brush event into a date range for `peer`: an empty selection
    /// clears it, a pixel interval is inverted through the time scale.
    pub fn on_brush(&self, event: BrushEvent, peer: &mut dyn RangeSink) -> Option<DateRange> {
        let range = match (event.selection, self.x_scale()) {
            (Some((x0, x1)), Some(x)) => match (x.invert_date(x0), x.invert_date(x1)) {
                (Some(start), Some(end)) => Some(DateRange::new(start, end)),
                _ => None,
            },
            _ => None,
        };
        peer.set_filter_range(range);
        range
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stacked_area::tests::{sample, year};
    use crate::stacked_area::StackedAreaChart;
    use crate::viewport::{FixedViewport, Size};

    fn records() -> Vec<YearRecord> {
        vec![
            YearRecord::new(year(2010), 30.0),
            YearRecord::new(year(2000), 10.0),
            YearRecord { year: None, total_spotted: 5.0 },
            YearRecord::new(year(2005), f64::NAN),
        ]
    }

    // 1000x110 plot area.
    fn viewport() -> FixedViewport {
        FixedViewport(Size::new(1180.0, 200.0))
    }

    #[derive(Default)]
    struct Recorder(Vec<Option<DateRange>>);

    impl RangeSink for Recorder {
        fn set_filter_range(&mut self, range: Option<DateRange>) {
            self.0.push(range);
        }
    }

    #[test]
    fn set_data_filters_and_sorts() {
        let timeline = Timeline::new(&records());
        assert_eq!(timeline.data(), &[(year(2000), 10.0), (year(2010), 30.0)]);
        assert_eq!(timeline.state(), TimelineState::Uninitialized);
    }

    #[test]
    fn render_uses_measured_layout() {
        let mut timeline = Timeline::new(&records());
        let frame = timeline.render(&viewport(), CONTAINER_ID);
        assert_eq!(timeline.state(), TimelineState::Rendered);
        assert_eq!(frame.layout.width, 1000.0);
        assert_eq!(frame.brush_extent, (0.0, 1000.0));
        assert_eq!(frame.y_domain, (0.0, 30.0));
        assert_eq!(frame.area.as_deref(), Some("M0,73.333L1000,0L1000,110L0,110Z"));
    }

    #[test]
    fn empty_dataset_does_not_fail() {
        let mut timeline = Timeline::new(&[]);
        let frame = timeline.render(&viewport(), CONTAINER_ID);
        assert_eq!(frame.y_domain, (0.0, 0.0));
        assert!(frame.area.is_none());
        let mut peer = Recorder::default();
        timeline.pointer_down(10.0);
        assert_eq!(timeline.pointer_up(50.0, &mut peer), None);
    }

    #[test]
    fn brush_pushes_ranges_while_dragging() {
        let mut timeline = Timeline::new(&records());
        timeline.render(&viewport(), CONTAINER_ID);
        let mut peer = Recorder::default();

        timeline.pointer_down(0.0);
        assert!(peer.0.is_empty());
        let during = timeline.pointer_move(500.0, &mut peer).unwrap();
        assert_eq!(during.start(), year(2000));
        assert!(year(2004) < during.end() && during.end() <= year(2005));
        let done = timeline.pointer_up(1000.0, &mut peer).unwrap();
        assert_eq!(done.end(), year(2010));

        // One update per move plus the final one.
        assert_eq!(peer.0, vec![Some(during), Some(done)]);
    }

    #[test]
    fn drives_the_stacked_chart() {
        let mut timeline = Timeline::new(&[
            YearRecord::new(year(2000), 8.0),
            YearRecord::new(year(2002), 7.0),
        ]);
        timeline.render(&viewport(), CONTAINER_ID);
        let mut area = StackedAreaChart::new(sample());

        timeline.pointer_down(500.0);
        timeline.pointer_up(1000.0, &mut area);
        let range = area.filter_range().unwrap();
        assert!(area
            .displayed_years()
            .iter()
            .all(|y| range.start() <= *y && *y <= range.end()));
        assert_eq!(area.displayed_years(), vec![year(2001), year(2002)]);

        // A click clears the selection and the peer shows everything again.
        timeline.pointer_down(200.0);
        timeline.pointer_up(200.0, &mut area);
        assert_eq!(area.filter_range(), None);
        assert_eq!(area.displayed_years().len(), 3);
    }

    #[test]
    fn click_to_clear_redraws_the_peer() {
        let mut timeline = Timeline::new(&[
            YearRecord::new(year(2000), 8.0),
            YearRecord::new(year(2002), 7.0),
        ]);
        timeline.render(&viewport(), CONTAINER_ID);
        let mut area = StackedAreaChart::new(sample());

        timeline.on_pointer(Pointer::Down, 500.0, &mut area);
        let done = timeline.on_pointer(Pointer::Up, 1000.0, &mut area);
        assert!(done.peer);
        assert!(area.filter_range().is_some());

        // Pressing clears the brush but the peer keeps its range until release.
        let pressed = timeline.on_pointer(Pointer::Down, 200.0, &mut area);
        assert_eq!(pressed, Redraw { timeline: true, peer: false });
        assert_eq!(timeline.selection(), None);
        assert!(area.filter_range().is_some());

        let released = timeline.on_pointer(Pointer::Up, 200.0, &mut area);
        assert_eq!(released, Redraw { timeline: true, peer: true });
        assert_eq!(area.filter_range(), None);
        assert_eq!(area.displayed_years().len(), 3);

        // Hovering without a drag touches nothing.
        assert_eq!(timeline.on_pointer(Pointer::Move, 300.0, &mut area), Redraw::default());
    }

    #[test]
    fn leaving_mid_drag_finishes_the_selection() {
        let mut timeline = Timeline::new(&records());
        timeline.render(&viewport(), CONTAINER_ID);
        let mut peer = Recorder::default();
        timeline.on_pointer(Pointer::Down, 0.0, &mut peer);
        timeline.on_pointer(Pointer::Move, 400.0, &mut peer);
        assert!(timeline.on_pointer(Pointer::Leave, 500.0, &mut peer).peer);
        assert_eq!(peer.0.len(), 2);
        assert_eq!(timeline.on_pointer(Pointer::Move, 900.0, &mut peer), Redraw::default());
        assert_eq!(timeline.selection(), Some((0.0, 500.0)));
    }

    #[test]
    fn new_data_resets_the_brush() {
        let mut timeline = Timeline::new(&records());
        timeline.render(&viewport(), CONTAINER_ID);
        let mut area = StackedAreaChart::new(sample());
        timeline.pointer_down(100.0);
        timeline.pointer_up(400.0, &mut area);
        assert!(area.filter_range().is_some());

        timeline.set_data(&[YearRecord::new(year(1999), 1.0)], &mut area);
        assert_eq!(timeline.selection(), None);
        assert_eq!(area.filter_range(), None);
        assert_eq!(timeline.frame().x_domain, Some((year(1999), year(1999))));
    }
}

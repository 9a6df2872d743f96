//! Species inventory of the top national parks as horizontal bars.

use crate::axis::{self, Tick};
use crate::scale::{BandScale, LinearScale};
use crate::viewport::{Layout, Margin, ViewportProvider, DEFAULT_SIZE};
use grsm_data::ParkRecord;
use serde::Serialize;

pub const MARGIN: Margin = Margin::new(50.0, 100.0, 100.0, 250.0);
pub const CONTAINER_ID: &str = "parksVis";
pub const TITLE: &str = "Total Species Inventory for the Top Ten U.S. National Parks";
pub const X_LABEL: &str = "Number of Species";
pub const Y_LABEL: &str = "National Park";
pub const BAR_FILL: &str = "#69b3a2";
const BAND_PADDING: f64 = 0.1;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Bar {
    pub park: String,
    pub species_total: f64,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub fill: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParkInfo {
    pub park: String,
    pub lines: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParksFrame {
    pub layout: Layout,
    pub x_domain: (f64, f64),
    pub x_ticks: Vec<Tick>,
    pub y_ticks: Vec<Tick>,
    pub bars: Vec<Bar>,
    pub hover: Option<ParkInfo>,
}

#[derive(Debug, Clone)]
pub struct ParksComparison {
    layout: Layout,
    parks: Vec<ParkRecord>,
    hovered: Option<String>,
}

impl ParksComparison {
    pub fn new(parks: Vec<ParkRecord>) -> Self {
        let mut chart = Self {
            layout: Layout::new(DEFAULT_SIZE, MARGIN),
            parks: Vec::new(),
            hovered: None,
        };
        chart.set_data(parks);
        chart
    }

    /// Keeps finite totals, largest first.
    pub fn set_data(&mut self, mut parks: Vec<ParkRecord>) {
        parks.retain(|p| p.species_total.is_finite());
        parks.sort_by(|a, b| b.species_total.total_cmp(&a.species_total));
        self.parks = parks;
        self.hovered = None;
    }

    pub fn parks(&self) -> &[ParkRecord] {
        &self.parks
    }

    pub fn render(&mut self, viewport: &dyn ViewportProvider, container_id: &str) -> ParksFrame {
        self.layout = Layout::measure(viewport, container_id, MARGIN);
        self.frame()
    }

    pub fn resize(&mut self, layout: Layout) {
        self.layout = layout;
    }

    pub fn x_scale(&self) -> LinearScale {
        let max = self.parks.iter().map(|p| p.species_total).fold(0.0, f64::max);
        LinearScale::new((0.0, max), (0.0, self.layout.width))
    }

    pub fn y_scale(&self) -> BandScale<String> {
        BandScale::new(
            self.parks.iter().map(|p| p.park.clone()).collect(),
            (0.0, self.layout.height),
        )
        .padding(BAND_PADDING)
    }

    /// Hover info for `park`: name, total and description.
    pub fn hover(&mut self, park: Option<&str>) -> Option<ParkInfo> {
        self.hovered = park
            .filter(|name| self.parks.iter().any(|p| p.park == *name))
            .map(str::to_string);
        self.info()
    }

    pub fn leave(&mut self) {
        self.hovered = None;
    }

    fn info(&self) -> Option<ParkInfo> {
        let name = self.hovered.as_deref()?;
        let park = self.parks.iter().find(|p| p.park == name)?;
        Some(ParkInfo {
            park: park.park.clone(),
            lines: vec![
                park.park.clone(),
                format!("Species Total: {}", park.species_total),
                park.description.clone(),
            ],
        })
    }

    pub fn frame(&self) -> ParksFrame {
        let x = self.x_scale();
        let y = self.y_scale();
        let bars = self
            .parks
            .iter()
            .enumerate()
            .map(|(i, p)| Bar {
                park: p.park.clone(),
                species_total: p.species_total,
                x: 0.0,
                y: y.position(i),
                width: x.apply(p.species_total).max(0.0),
                height: y.bandwidth(),
                fill: BAR_FILL.to_string(),
            })
            .collect();

        ParksFrame {
            layout: self.layout,
            x_domain: x.domain,
            x_ticks: axis::linear_ticks(&x, 10, |v| format!("{}", v)),
            y_ticks: axis::band_ticks(&y, |park| park.clone()),
            bars,
            hover: self.info(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::viewport::{FixedViewport, Size};

    fn park(name: &str, total: f64) -> ParkRecord {
        ParkRecord {
            park: name.to_string(),
            species_total: total,
            description: format!("About {}", name),
        }
    }

    fn sample() -> Vec<ParkRecord> {
        vec![
            park("Yellowstone", 2_100.0),
            park("Great Smoky Mountains", 19_000.0),
            park("Acadia", f64::NAN),
        ]
    }

    #[test]
    fn bars_are_sorted_and_scaled() {
        let mut chart = ParksComparison::new(sample());
        let frame = chart.render(&FixedViewport(Size::new(1350.0, 350.0)), CONTAINER_ID);
        assert_eq!(frame.x_domain, (0.0, 19_000.0));
        assert_eq!(frame.bars.len(), 2);
        assert_eq!(frame.bars[0].park, "Great Smoky Mountains");
        assert_eq!(frame.bars[0].width, 1000.0);
        assert!(frame.bars[0].y < frame.bars[1].y);
        assert!(frame.bars[0].height > 0.0);
        assert_eq!(frame.y_ticks.len(), 2);
    }

    #[test]
    fn hover_reports_description() {
        let mut chart = ParksComparison::new(sample());
        let info = chart.hover(Some("Yellowstone")).unwrap();
        assert_eq!(
            info.lines,
            vec!["Yellowstone", "Species Total: 2100", "About Yellowstone"]
        );
        assert!(chart.frame().hover.is_some());

        assert!(chart.hover(Some("Nowhere")).is_none());
        chart.hover(Some("Yellowstone"));
        chart.leave();
        assert!(chart.frame().hover.is_none());
    }

    #[test]
    fn empty_parks_render_nothing() {
        let chart = ParksComparison::new(Vec::new());
        let frame = chart.frame();
        assert!(frame.bars.is_empty());
        assert!(frame.y_ticks.is_empty());
    }
}

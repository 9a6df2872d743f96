//! Site-by-year heatmap of mean water chemistry values.
//!
//! Rows are the sampling sites with the most site-year cells, columns are
//! years. A horizontal brush over the year axis publishes the covered year
//! range on the dispatcher when the drag ends.

use crate::axis::{self, Tick};
use crate::brush::{BrushEvent, BrushPhase, BrushX};
use crate::dispatch::{year_range, Dispatcher, YearRangePayload, YEAR_RANGE_SELECTED};
use crate::palette::SequentialScale;
use crate::scale::{ticks, BandScale, LinearScale};
use crate::viewport::{Layout, Margin, ViewportProvider, DEFAULT_SIZE};
use serde::Serialize;
use std::collections::HashMap;

pub const MARGIN: Margin = Margin::new(120.0, 100.0, 70.0, 120.0);
pub const CONTAINER_ID: &str = "waterHeatmap";
pub const TITLE: &str = "Acid Neutralizing Capacity (ANC) Across Sites and Years";
pub const LEGEND_TITLE: &str = "ANC (µeq/L)";
pub const TOP_SITES: usize = 15;
pub const EMPTY_FILL: &str = "#eee";
pub const LEGEND_WIDTH: f64 = 220.0;
pub const LEGEND_HEIGHT: f64 = 12.0;
const BAND_PADDING: f64 = 0.05;
const SITE_PREFIX: &str = "GRSM_F_";

/// Mean value of one site in one year.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HeatCell {
    pub site: String,
    pub year: i32,
    pub value: f64,
}

impl HeatCell {
    fn has_value(&self) -> bool {
        self.value.is_finite() && self.value != 0.0
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HeatRect {
    pub site: String,
    pub year: i32,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub fill: String,
    pub highlighted: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LegendStop {
    /// Percentage along the gradient.
    pub offset: f64,
    pub color: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Legend {
    pub stops: Vec<LegendStop>,
    pub ticks: Vec<Tick>,
    pub min_label: String,
    pub max_label: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HoverInfo {
    pub site: String,
    pub year: i32,
    pub lines: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HeatmapFrame {
    pub layout: Layout,
    pub rects: Vec<HeatRect>,
    pub x_ticks: Vec<Tick>,
    pub y_ticks: Vec<Tick>,
    pub legend: Option<Legend>,
    pub selection: Option<(f64, f64)>,
    pub hover: Option<HoverInfo>,
}

/// `GRSM_F_0101` → `Site 0101`.
pub fn site_label(site: &str) -> String {
    site.replace(SITE_PREFIX, "Site ")
}

fn site_suffix(site: &str) -> &str {
    let start = site
        .char_indices()
        .rev()
        .nth(3)
        .map(|(i, _)| i)
        .unwrap_or(0);
    &site[start..]
}

/// Sites ordered by number of cells (descending, first-seen on ties),
/// keeping the first `limit`.
pub fn top_sites(cells: &[HeatCell], limit: usize) -> Vec<String> {
    let mut counts: Vec<(String, usize)> = Vec::new();
    let mut index: HashMap<&str, usize> = HashMap::new();
    for cell in cells {
        match index.get(cell.site.as_str()) {
            Some(i) => counts[*i].1 += 1,
            None => {
                index.insert(&cell.site, counts.len());
                counts.push((cell.site.clone(), 1));
            }
        }
    }
    counts.sort_by(|a, b| b.1.cmp(&a.1));
    counts.into_iter().take(limit).map(|(s, _)| s).collect()
}

pub struct WaterHeatmap {
    layout: Layout,
    cells: Vec<HeatCell>,
    sites: Vec<String>,
    years: Vec<i32>,
    brush: BrushX,
    hovered: Option<(String, i32)>,
    dispatcher: Dispatcher<YearRangePayload>,
}

impl WaterHeatmap {
    pub fn new(cells: Vec<HeatCell>, dispatcher: Dispatcher<YearRangePayload>) -> Self {
        let layout = Layout::new(DEFAULT_SIZE, MARGIN);
        let mut heatmap = Self {
            layout,
            cells: Vec::new(),
            sites: Vec::new(),
            years: Vec::new(),
            brush: BrushX::new((0.0, layout.width)),
            hovered: None,
            dispatcher,
        };
        heatmap.set_data(cells);
        heatmap
    }

    pub fn set_data(&mut self, cells: Vec<HeatCell>) {
        self.sites = top_sites(&cells, TOP_SITES);
        self.cells = cells
            .into_iter()
            .filter(|c| self.sites.contains(&c.site))
            .collect();
        let mut years: Vec<i32> = self.cells.iter().map(|c| c.year).collect();
        years.sort_unstable();
        years.dedup();
        self.years = years;
        self.hovered = None;
        log::info!(
            "[GRSM] heatmap: {} cells, {} sites, {} years",
            self.cells.len(),
            self.sites.len(),
            self.years.len()
        );
    }

    pub fn sites(&self) -> &[String] {
        &self.sites
    }

    pub fn years(&self) -> &[i32] {
        &self.years
    }

    pub fn render(&mut self, viewport: &dyn ViewportProvider, container_id: &str) -> HeatmapFrame {
        self.resize(Layout::measure(viewport, container_id, MARGIN));
        self.frame()
    }

    pub fn resize(&mut self, layout: Layout) {
        self.layout = layout;
        self.brush.set_extent((0.0, layout.width));
    }

    pub fn x_scale(&self) -> BandScale<i32> {
        BandScale::new(self.years.clone(), (0.0, self.layout.width)).padding(BAND_PADDING)
    }

    pub fn y_scale(&self) -> BandScale<String> {
        BandScale::new(self.sites.clone(), (0.0, self.layout.height)).padding(BAND_PADDING)
    }

    /// Value extent of the shown cells.
    pub fn extent(&self) -> Option<(f64, f64)> {
        self.cells
            .iter()
            .map(|c| c.value)
            .filter(|v| v.is_finite())
            .fold(None, |acc, v| match acc {
                None => Some((v, v)),
                Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
            })
    }

    fn color(&self) -> SequentialScale {
        SequentialScale::new(self.extent().unwrap_or((0.0, 1.0)))
    }

    fn legend(&self) -> Option<Legend> {
        let (lo, hi) = self.extent()?;
        let color = self.color();
        let stops = ticks(0.0, 1.0, 10)
            .into_iter()
            .map(|t| LegendStop {
                offset: t * 100.0,
                color: color.color(lo + t * (hi - lo)).to_string(),
            })
            .collect();
        let decimals = if (hi - lo).abs() >= 10.0 { 0 } else { 2 };
        let scale = LinearScale::new((lo, hi), (0.0, LEGEND_WIDTH));
        Some(Legend {
            stops,
            ticks: axis::linear_ticks(&scale, 5, |v| axis::format_fixed(v, decimals)),
            min_label: axis::format_fixed(lo, decimals),
            max_label: axis::format_fixed(hi, decimals),
        })
    }

    pub fn frame(&self) -> HeatmapFrame {
        let x = self.x_scale();
        let y = self.y_scale();
        let color = self.color();
        let rects = self
            .cells
            .iter()
            .filter_map(|cell| {
                Some(HeatRect {
                    site: cell.site.clone(),
                    year: cell.year,
                    x: x.position_of(&cell.year)?,
                    y: y.position_of(&cell.site)?,
                    width: x.bandwidth(),
                    height: y.bandwidth(),
                    fill: if cell.has_value() {
                        color.color(cell.value).to_string()
                    } else {
                        EMPTY_FILL.to_string()
                    },
                    highlighted: self
                        .hovered
                        .as_ref()
                        .is_some_and(|(s, yr)| *s == cell.site && *yr == cell.year),
                })
            })
            .collect();
        HeatmapFrame {
            layout: self.layout,
            rects,
            x_ticks: axis::band_ticks(&x, |y| y.to_string()),
            y_ticks: axis::band_ticks(&y, |s| site_label(s)),
            legend: self.legend(),
            selection: self.brush.selection(),
            hover: self.hover_info(),
        }
    }

    fn hover_info(&self) -> Option<HoverInfo> {
        let (site, year) = self.hovered.as_ref()?;
        let cell = self
            .cells
            .iter()
            .find(|c| c.site == *site && c.year == *year)?;
        let value = if cell.has_value() {
            format!("{:.2}", cell.value)
        } else {
            "No data".to_string()
        };
        Some(HoverInfo {
            site: site.clone(),
            year: *year,
            lines: vec![
                format!("Site: {}", site_suffix(site)),
                format!("Year: {}", year),
                format!("ANC: {} µeq/L", value),
            ],
        })
    }

    /// Container-level hover at plot coordinates. Returns the tooltip for the
    /// cell under the pointer; anything else clears the highlight.
    pub fn hover_at(&mut self, px: f64, py: f64) -> Option<HoverInfo> {
        self.hovered = self.cell_at(px, py).map(|c| (c.site.clone(), c.year));
        self.hover_info()
    }

    pub fn leave(&mut self) {
        self.hovered = None;
    }

    fn cell_at(&self, px: f64, py: f64) -> Option<&HeatCell> {
        if px < 0.0 || py < 0.0 || px > self.layout.width || py > self.layout.height {
            return None;
        }
        let col = self.x_scale().index_at(px)?;
        let row = self.y_scale().index_at(py)?;
        let (year, site) = (self.years[col], &self.sites[row]);
        self.cells.iter().find(|c| c.year == year && c.site == *site)
    }

    /// Years covered by a pixel selection, with both band indices clamped.
    pub fn year_range_for_selection(&self, selection: Option<(f64, f64)>) -> YearRangePayload {
        let (x0, x1) = selection?;
        let x = self.x_scale();
        let start = x.index_at_clamped(x0)?;
        let end = x.index_at_clamped(x1)?;
        year_range(self.years[start], self.years[end])
    }

    pub fn pointer_down(&mut self, x: f64) {
        self.brush.pointer_down(x);
    }

    pub fn pointer_move(&mut self, x: f64) -> Option<BrushEvent> {
        self.brush.pointer_move(x)
    }

    /// Finishing a drag publishes the covered years.
    pub fn pointer_up(&mut self, x: f64) -> Option<YearRangePayload> {
        let event = self.brush.pointer_up(x)?;
        Some(self.on_brush(event))
    }

    /// Leaving the plot clears the hover and ends a drag in progress, which
    /// publishes like a release at `x`.
    pub fn pointer_leave(&mut self, x: f64) -> Option<YearRangePayload> {
        self.leave();
        self.pointer_up(x)
    }

    /// Publish on `End`; other phases are ignored.
    pub fn on_brush(&self, event: BrushEvent) -> YearRangePayload {
        if event.phase != BrushPhase::End {
            return None;
        }
        let payload = self.year_range_for_selection(event.selection);
        log::debug!("[GRSM] heatmap: publishing {:?}", payload);
        self.dispatcher.publish(YEAR_RANGE_SELECTED, &payload);
        payload
    }
}

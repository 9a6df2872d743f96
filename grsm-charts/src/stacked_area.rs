//! Stacked area chart of yearly counts per category.
//!
//! Two visual modes: every category stacked (largest totals at the bottom),
//! or one category isolated and drawn from zero. Either mode can be limited
//! to a date range pushed in by the timeline brush.

use crate::axis::{self, Tick};
use crate::filter::{CategoryFilter, DateRange, RangeSink};
use crate::join::{self, JoinPatch};
use crate::palette::rainbow_quantize;
use crate::scale::{LinearScale, TimeScale};
use crate::shape::{area_path, AreaPoint, Curve};
use crate::stack::{self, StackPoint, StackRow, StackedSeries};
use crate::viewport::{Layout, Margin, DEFAULT_SIZE};
use crate::TRANSITION_MS;
use chrono::NaiveDate;
use grsm_data::LayerRecord;
use serde::Serialize;
use std::collections::HashMap;

pub const MARGIN: Margin = Margin::new(60.0, 90.0, 50.0, 90.0);
pub const CONTAINER_ID: &str = "stacked-area";
pub const CLIP_ID: &str = "clip-stacked";
pub const TITLE: &str = "Total Lifeforms Spotted Annually by Species";
pub const X_LABEL: &str = "Years";
pub const Y_LABEL: &str = "Total Lifeforms Spotted by Species";

const HOVER_OPACITY: f64 = 0.8;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum DisplayMode {
    Stacked,
    Solo,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AreaPath {
    pub key: String,
    pub color: String,
    pub d: String,
    pub opacity: f64,
}

/// Everything needed to draw one state of the chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AreaFrame {
    pub layout: Layout,
    pub mode: DisplayMode,
    pub x_domain: Option<(NaiveDate, NaiveDate)>,
    pub y_domain: (f64, f64),
    pub x_ticks: Vec<Tick>,
    pub y_ticks: Vec<Tick>,
    pub paths: Vec<AreaPath>,
    /// Name of the hovered category, empty otherwise.
    pub label: String,
    pub join: JoinPatch,
    pub transition_ms: u32,
}

#[derive(Debug, Clone)]
pub struct StackedAreaChart {
    layout: Layout,
    records: Vec<LayerRecord>,
    /// Category universe, descending by total.
    categories: Vec<String>,
    colors: HashMap<String, String>,
    category_filter: CategoryFilter,
    range: Option<DateRange>,
    hovered: Option<String>,
    display: Vec<StackedSeries>,
    mode: DisplayMode,
    rendered_keys: Vec<String>,
}

/// Union of category keys in first-seen order, then stably sorted by
/// descending total.
fn derive_categories(records: &[LayerRecord]) -> Vec<String> {
    let mut keys: Vec<String> = Vec::new();
    for record in records {
        for key in record.counts.keys() {
            if !keys.contains(key) {
                keys.push(key.clone());
            }
        }
    }
    let rows = rows_for(records, &keys);
    stack::order_by_descending_total(keys.len(), &rows)
        .into_iter()
        .map(|i| keys[i].clone())
        .collect()
}

fn rows_for(records: &[LayerRecord], keys: &[String]) -> Vec<StackRow> {
    records
        .iter()
        .filter_map(|r| {
            r.year.map(|year| StackRow {
                year,
                values: keys
                    .iter()
                    .map(|k| r.counts.get(k).copied().unwrap_or(0.0))
                    .collect(),
            })
        })
        .collect()
}

impl StackedAreaChart {
    /// Records without a usable year are dropped; the rest are sorted.
    pub fn new(records: Vec<LayerRecord>) -> Self {
        let mut chart = Self {
            layout: Layout::new(DEFAULT_SIZE, MARGIN),
            records: Vec::new(),
            categories: Vec::new(),
            colors: HashMap::new(),
            category_filter: CategoryFilter::None,
            range: None,
            hovered: None,
            display: Vec::new(),
            mode: DisplayMode::Stacked,
            rendered_keys: Vec::new(),
        };
        chart.load(records);
        chart.wrangle();
        chart
    }

    fn load(&mut self, records: Vec<LayerRecord>) {
        let before = records.len();
        let mut records: Vec<LayerRecord> = records.into_iter().filter(|r| r.year.is_some()).collect();
        records.sort_by_key(|r| r.year);
        if records.len() < before {
            log::warn!(
                "[GRSM] stacked area: dropped {} records without a year",
                before - records.len()
            );
        }
        self.categories = derive_categories(&records);
        self.colors = self
            .categories
            .iter()
            .cloned()
            .zip(rainbow_quantize(self.categories.len()))
            .collect();
        self.records = records;
        log::info!(
            "[GRSM] stacked area: {} categories over {} years",
            self.categories.len(),
            self.records.len()
        );
    }

    /// Swap in a new dataset. Categories and colours are re-derived; an
    /// isolated category that no longer exists is released.
    pub fn set_data(&mut self, records: Vec<LayerRecord>) {
        self.load(records);
        if let Some(solo) = self.category_filter.solo() {
            if !self.categories.iter().any(|c| c == solo) {
                self.category_filter = CategoryFilter::None;
            }
        }
        self.hovered = None;
        self.wrangle();
    }

    pub fn initialize(&mut self, layout: Layout) {
        self.layout = layout;
        self.wrangle();
    }

    pub fn resize(&mut self, layout: Layout) {
        self.layout = layout;
    }

    pub fn layout(&self) -> Layout {
        self.layout
    }

    pub fn categories(&self) -> &[String] {
        &self.categories
    }

    pub fn color_of(&self, category: &str) -> Option<&str> {
        self.colors.get(category).map(String::as_str)
    }

    pub fn category_filter(&self) -> &CategoryFilter {
        &self.category_filter
    }

    pub fn filter_range(&self) -> Option<DateRange> {
        self.range
    }

    pub fn mode(&self) -> DisplayMode {
        self.mode
    }

    /// Apply (or clear) the date range and re-wrangle.
    pub fn set_filter_range(&mut self, range: Option<DateRange>) {
        self.range = range;
        self.wrangle();
    }

    /// Flip the category filter for `category`. State only; see [`Self::on_click`].
    pub fn toggle_category(&mut self, category: &str) {
        self.category_filter = self.category_filter.toggled(category);
        log::debug!("[GRSM] stacked area: filter now {:?}", self.category_filter);
    }

    /// Click handler: toggle, re-wrangle and render.
    pub fn on_click(&mut self, category: &str) -> AreaFrame {
        self.toggle_category(category);
        self.wrangle();
        self.render()
    }

    /// Pointer entered (`Some`) or left (`None`) a category path.
    pub fn hover(&mut self, category: Option<&str>) {
        self.hovered = category.map(str::to_string);
    }

    /// Series as last wrangled.
    pub fn displayed_series(&self) -> &[StackedSeries] {
        &self.display
    }

    /// Years that take part in the current display.
    pub fn displayed_years(&self) -> Vec<NaiveDate> {
        self.display
            .first()
            .map(|s| s.points.iter().map(|p| p.year).collect())
            .unwrap_or_default()
    }

    /// Filter by date range, stack every category, then isolate the solo
    /// category if one is selected.
    pub fn wrangle(&mut self) {
        let visible: Vec<LayerRecord> = self
            .records
            .iter()
            .filter(|r| match (self.range, r.year) {
                (Some(range), Some(year)) => range.contains(&year),
                (None, Some(_)) => true,
                (_, None) => false,
            })
            .cloned()
            .collect();
        let rows = rows_for(&visible, &self.categories);
        let order: Vec<usize> = (0..self.categories.len()).collect();
        let stacked = stack::stack(&self.categories, &rows, &order);

        let solo = self
            .category_filter
            .solo()
            .map(|c| (c, stacked.iter().find(|s| s.key == c)));
        (self.display, self.mode) = match solo {
            Some((_, Some(series))) => {
                let isolated = StackedSeries {
                    key: series.key.clone(),
                    index: 0,
                    points: series
                        .points
                        .iter()
                        .map(|p| StackPoint {
                            year: p.year,
                            baseline: 0.0,
                            top: p.top - p.baseline,
                        })
                        .collect(),
                };
                (vec![isolated], DisplayMode::Solo)
            }
            Some((name, None)) => {
                log::warn!("[GRSM] stacked area: category {:?} not in data", name);
                (stacked, DisplayMode::Stacked)
            }
            None => (stacked, DisplayMode::Stacked),
        };
    }

    fn x_domain(&self) -> Option<(NaiveDate, NaiveDate)> {
        if let Some(range) = self.range {
            return Some((range.start(), range.end()));
        }
        let first = self.records.first()?.year?;
        let last = self.records.last()?.year?;
        Some((first, last))
    }

    /// Build the frame for the current state and remember its keys for the
    /// next join.
    pub fn render(&mut self) -> AreaFrame {
        let Layout { width, height, .. } = self.layout;
        let x_domain = self.x_domain();
        let y_max = stack::max_top(&self.display).max(1.0);
        let y = LinearScale::new((0.0, y_max), (height, 0.0));
        let curve = match self.mode {
            DisplayMode::Stacked => Curve::Cardinal,
            DisplayMode::Solo => Curve::Linear,
        };

        let (paths, x_ticks) = match x_domain {
            Some(domain) => {
                let x = TimeScale::from_dates(domain, (0.0, width));
                let paths = self
                    .display
                    .iter()
                    .filter_map(|series| {
                        let points: Vec<AreaPoint> = series
                            .points
                            .iter()
                            .map(|p| {
                                AreaPoint::guarded(
                                    x.apply_date(&p.year),
                                    y.apply(p.baseline),
                                    y.apply(p.top),
                                    height,
                                )
                            })
                            .collect();
                        let d = area_path(&points, curve)?;
                        Some(AreaPath {
                            key: series.key.clone(),
                            color: self.color_of(&series.key).unwrap_or("#ccc").to_string(),
                            d,
                            opacity: if self.hovered.as_deref() == Some(series.key.as_str()) {
                                HOVER_OPACITY
                            } else {
                                1.0
                            },
                        })
                    })
                    .collect::<Vec<_>>();
                let tick_count = ((width / 80.0) as usize).max(2);
                (paths, axis::year_ticks(&x, tick_count))
            }
            None => (Vec::new(), Vec::new()),
        };

        let next_keys: Vec<String> = paths.iter().map(|p| p.key.clone()).collect();
        let join = join::reconcile(
            self.rendered_keys.iter().map(String::as_str),
            next_keys.iter().map(String::as_str),
        );
        self.rendered_keys = next_keys;

        AreaFrame {
            layout: self.layout,
            mode: self.mode,
            x_domain,
            y_domain: (0.0, y_max),
            x_ticks,
            y_ticks: axis::linear_ticks(&y, 5, axis::format_si),
            paths,
            label: self.hovered.clone().unwrap_or_default(),
            join,
            transition_ms: TRANSITION_MS,
        }
    }
}

impl RangeSink for StackedAreaChart {
    fn set_filter_range(&mut self, range: Option<DateRange>) {
        StackedAreaChart::set_filter_range(self, range);
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::viewport::Size;
    use std::collections::BTreeMap;

    pub(crate) fn year(y: i32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, 1, 1).unwrap()
    }

    pub(crate) fn layer(y: i32, counts: &[(&str, f64)]) -> LayerRecord {
        let counts: BTreeMap<String, f64> =
            counts.iter().map(|(k, v)| (k.to_string(), *v)).collect();
        LayerRecord::new(year(y), counts)
    }

    pub(crate) fn sample() -> Vec<LayerRecord> {
        vec![
            layer(2002, &[("Bear", 2.0), ("Elk", 4.0), ("Trout", 1.0)]),
            layer(2000, &[("Bear", 1.0), ("Elk", 5.0), ("Trout", 2.0)]),
            layer(2001, &[("Bear", 3.0), ("Elk", f64::NAN), ("Trout", 2.5)]),
            LayerRecord { year: None, counts: BTreeMap::new() },
        ]
    }

    fn chart() -> StackedAreaChart {
        let mut chart = StackedAreaChart::new(sample());
        chart.initialize(Layout::new(Size::new(600.0, 400.0), MARGIN));
        chart
    }

    #[test]
    fn categories_ordered_by_total() {
        let chart = chart();
        // Elk 9, Bear 6, Trout 5.5
        assert_eq!(chart.categories(), ["Elk", "Bear", "Trout"]);
        assert_ne!(chart.color_of("Elk"), chart.color_of("Bear"));
        assert_eq!(chart.displayed_years(), vec![year(2000), year(2001), year(2002)]);
    }

    #[test]
    fn toggle_twice_is_identity() {
        let mut chart = chart();
        let before = chart.category_filter().clone();
        chart.toggle_category("Bear");
        assert_eq!(chart.category_filter(), &CategoryFilter::Solo("Bear".into()));
        chart.toggle_category("Bear");
        assert_eq!(chart.category_filter(), &before);
    }

    #[test]
    fn stacked_top_equals_year_total() {
        let chart = chart();
        let top = chart.displayed_series().last().unwrap();
        let totals = [8.0, 5.5, 7.0];
        for (point, total) in top.points.iter().zip(totals) {
            assert!((point.top - total).abs() < 1e-9);
        }
    }

    #[test]
    fn nan_counts_never_reach_paths() {
        let mut chart = chart();
        let frame = chart.render();
        assert_eq!(frame.paths.len(), 3);
        for path in &frame.paths {
            assert!(!path.d.contains("NaN"), "{}", path.d);
        }
        let frame = chart.on_click("Elk");
        assert_eq!(frame.mode, DisplayMode::Solo);
        assert!(!frame.paths[0].d.contains("NaN"));
    }

    #[test]
    fn range_filter_limits_records() {
        let mut chart = chart();
        chart.set_filter_range(Some(DateRange::new(year(2001), year(2002))));
        let years = chart.displayed_years();
        assert_eq!(years, vec![year(2001), year(2002)]);
        assert_eq!(chart.render().x_domain, Some((year(2001), year(2002))));

        chart.set_filter_range(None);
        assert_eq!(chart.displayed_years().len(), 3);
    }

    #[test]
    fn solo_mode_draws_from_zero() {
        let mut chart = chart();
        let frame = chart.on_click("Trout");
        assert_eq!(frame.paths.len(), 1);
        assert_eq!(frame.paths[0].key, "Trout");
        assert_eq!(frame.y_domain, (0.0, 2.5));
        let solo = &chart.displayed_series()[0];
        assert!(solo.points.iter().all(|p| p.baseline == 0.0));
        assert_eq!(solo.points[0].top, 2.0);

        // Clicking again restores the stack.
        let frame = chart.on_click("Trout");
        assert_eq!(frame.mode, DisplayMode::Stacked);
        assert_eq!(frame.paths.len(), 3);
    }

    #[test]
    fn join_tracks_keys_between_renders() {
        let mut chart = chart();
        let first = chart.render();
        assert_eq!(first.join.entered.len(), 3);
        let solo = chart.on_click("Bear");
        assert_eq!(solo.join.updated, vec!["Bear"]);
        assert_eq!(solo.join.exited, vec!["Elk", "Trout"]);
    }

    #[test]
    fn hover_sets_label_and_opacity() {
        let mut chart = chart();
        chart.hover(Some("Elk"));
        let frame = chart.render();
        assert_eq!(frame.label, "Elk");
        let elk = frame.paths.iter().find(|p| p.key == "Elk").unwrap();
        assert_eq!(elk.opacity, 0.8);
        chart.hover(None);
        assert_eq!(chart.render().label, "");
    }

    #[test]
    fn set_data_rederives_and_releases_missing_solo() {
        let mut chart = chart();
        chart.toggle_category("Trout");
        chart.set_data(vec![layer(2005, &[("Salamander", 3.0)])]);
        assert_eq!(chart.categories(), ["Salamander"]);
        assert_eq!(chart.category_filter(), &CategoryFilter::None);
        assert_eq!(chart.render().paths.len(), 1);
    }

    #[test]
    fn empty_dataset_renders_nothing() {
        let mut chart = StackedAreaChart::new(Vec::new());
        let frame = chart.render();
        assert!(frame.paths.is_empty());
        assert_eq!(frame.y_domain, (0.0, 1.0));
    }
}

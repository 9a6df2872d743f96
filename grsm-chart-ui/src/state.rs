//! Application state managed via Dioxus context.
//!
//! `AppState` bundles all reactive signals into a single struct provided via
//! `use_context_provider`. Child components retrieve it with `use_context::<AppState>()`.
//!
//! The panel models are built once, empty, and live in `AppState::panels`.
//! Loaders fill them with `set_data` as datasets arrive; event handlers
//! mutate them and publish the resulting frames through the frame signals.

use dioxus::prelude::*;
use grsm_charts::anc_trend::{AncFrame, AncTrend};
use grsm_charts::heatmap::{HeatmapFrame, WaterHeatmap};
use grsm_charts::parks::{ParksComparison, ParksFrame};
use grsm_charts::stacked_area::{AreaFrame, StackedAreaChart};
use grsm_charts::timeline::{Timeline, TimelineFrame};
use grsm_charts::visibility::{VisibilityFrame, VisibilityGraph};
use grsm_charts::visits::{VisitsChart, VisitsFrame};
use grsm_charts::{Dispatcher, YearRangePayload};
use grsm_data::biodiversity::TaxaGroup;
pub use grsm_data::PanelStatus;
use std::cell::RefCell;
use std::rc::Rc;

/// Every panel model plus the dispatcher connecting the heatmap to the trend.
pub struct Panels {
    pub dispatcher: Dispatcher<YearRangePayload>,
    pub timeline: Timeline,
    pub stacked: StackedAreaChart,
    pub heatmap: WaterHeatmap,
    pub anc: Rc<RefCell<AncTrend>>,
    pub visibility: VisibilityGraph,
    pub visits: VisitsChart,
    pub parks: ParksComparison,
}

impl Panels {
    /// Empty panels with the trend subscribed to `yearRangeSelected`.
    pub fn new() -> Self {
        let dispatcher = Dispatcher::new();
        let anc = Rc::new(RefCell::new(AncTrend::new(Vec::new())));
        AncTrend::attach(&anc, &dispatcher);
        Self {
            heatmap: WaterHeatmap::new(Vec::new(), dispatcher.clone()),
            dispatcher,
            timeline: Timeline::new(&[]),
            stacked: StackedAreaChart::new(Vec::new()),
            anc,
            visibility: VisibilityGraph::new(),
            visits: VisitsChart::new(&[]),
            parks: ParksComparison::new(Vec::new()),
        }
    }
}

impl Default for Panels {
    fn default() -> Self {
        Self::new()
    }
}

/// Shared application state for the GRSM site.
#[derive(Clone, Copy)]
pub struct AppState {
    /// Panel models, constructed once
    pub panels: Signal<Panels>,
    /// Currently selected taxa group
    pub taxa: Signal<TaxaGroup>,
    /// Biodiversity dataset (timeline and stacked area)
    pub biodiversity_status: Signal<PanelStatus>,
    /// Water results (heatmap and ANC trend)
    pub water_status: Signal<PanelStatus>,
    /// Visits (visits chart and visibility overlay)
    pub visits_status: Signal<PanelStatus>,
    /// PM2.5 readings
    pub visibility_status: Signal<PanelStatus>,
    /// National park inventory
    pub parks_status: Signal<PanelStatus>,
    pub timeline_frame: Signal<Option<TimelineFrame>>,
    pub area_frame: Signal<Option<AreaFrame>>,
    pub heatmap_frame: Signal<Option<HeatmapFrame>>,
    pub anc_frame: Signal<Option<AncFrame>>,
    pub visibility_frame: Signal<Option<VisibilityFrame>>,
    pub visits_frame: Signal<Option<VisitsFrame>>,
    pub parks_frame: Signal<Option<ParksFrame>>,
}

impl AppState {
    /// Create a new AppState with default signal values.
    pub fn new() -> Self {
        Self {
            panels: Signal::new(Panels::new()),
            taxa: Signal::new(TaxaGroup::All),
            biodiversity_status: Signal::new(PanelStatus::Loading),
            water_status: Signal::new(PanelStatus::Loading),
            visits_status: Signal::new(PanelStatus::Loading),
            visibility_status: Signal::new(PanelStatus::Loading),
            parks_status: Signal::new(PanelStatus::Loading),
            timeline_frame: Signal::new(None),
            area_frame: Signal::new(None),
            heatmap_frame: Signal::new(None),
            anc_frame: Signal::new(None),
            visibility_frame: Signal::new(None),
            visits_frame: Signal::new(None),
            parks_frame: Signal::new(None),
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

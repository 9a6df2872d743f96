//! Reusable Dioxus RSX components for the GRSM panels.

mod anc_trend_panel;
mod axes;
mod chart_container;
mod chart_header;
mod error_display;
mod heatmap_panel;
mod loading_spinner;
mod parks_panel;
mod stacked_area_panel;
mod taxa_selector;
mod timeline_panel;
mod tooltip;
mod visibility_panel;
mod visits_panel;

pub use anc_trend_panel::AncTrendPanel;
pub use axes::{AxisLabels, PlotSvg, XAxis, YAxis};
pub use chart_container::ChartContainer;
pub use chart_header::ChartHeader;
pub use error_display::ErrorDisplay;
pub use heatmap_panel::HeatmapPanel;
pub use loading_spinner::LoadingSpinner;
pub use parks_panel::ParksPanel;
pub use stacked_area_panel::StackedAreaPanel;
pub use taxa_selector::TaxaSelector;
pub use timeline_panel::TimelinePanel;
pub use tooltip::Tooltip;
pub use visibility_panel::VisibilityPanel;
pub use visits_panel::VisitsPanel;

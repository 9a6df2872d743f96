//! Panel models and cross-chart coordination for the GRSM site.
//!
//! Nothing in this crate touches a DOM. Each panel turns its data and
//! interaction state into a serialisable *frame* (domains, ticks, SVG path
//! strings, keyed marks) that a view layer draws as-is:
//!
//! - `dispatch`: named-event publish/subscribe hub (`yearRangeSelected`)
//! - `timeline` + `stacked_area`: brush-to-filter coordination
//! - `heatmap` + `anc_trend`: dispatcher-based year range coordination
//! - `visibility`, `visits`, `parks`: standalone panels
//!
//! Layout math goes through `viewport::ViewportProvider`, so every panel is
//! testable without a rendering surface.

pub mod anc_trend;
pub mod axis;
pub mod brush;
pub mod dispatch;
pub mod filter;
pub mod heatmap;
pub mod join;
pub mod palette;
pub mod parks;
pub mod scale;
pub mod shape;
pub mod stack;
pub mod stacked_area;
pub mod svg;
pub mod timeline;
pub mod viewport;
pub mod visibility;
pub mod visits;

pub use dispatch::{Dispatcher, YearRangePayload, YEAR_RANGE_SELECTED};
pub use filter::{CategoryFilter, DateRange};

/// Transition length used by the brushed panels, short enough for drag rates.
pub const TRANSITION_MS: u32 = 200;

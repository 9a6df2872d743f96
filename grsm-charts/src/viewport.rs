//! Container measurement and plot layout.
//!
//! Panels never measure the page themselves. A `ViewportProvider` reports
//! a container's outer size; `Layout` subtracts the margins to get the plot
//! area that scale ranges are built from.

use serde::Serialize;
use std::collections::HashMap;

/// Outer size used when a container cannot be measured.
pub const DEFAULT_SIZE: Size = Size {
    width: 960.0,
    height: 500.0,
};

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Margin {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

impl Margin {
    pub const fn new(top: f64, right: f64, bottom: f64, left: f64) -> Self {
        Self {
            top,
            right,
            bottom,
            left,
        }
    }
}

impl Default for Margin {
    fn default() -> Self {
        Self::new(20.0, 30.0, 70.0, 70.0)
    }
}

/// Outer size, margins and the resulting inner plot area.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Layout {
    pub outer: Size,
    pub margin: Margin,
    /// Inner plot width, never negative.
    pub width: f64,
    /// Inner plot height, never negative.
    pub height: f64,
}

impl Layout {
    pub fn new(outer: Size, margin: Margin) -> Self {
        let clamp = |v: f64| if v.is_finite() { v.max(0.0) } else { 0.0 };
        Self {
            outer,
            margin,
            width: clamp(outer.width - margin.left - margin.right),
            height: clamp(outer.height - margin.top - margin.bottom),
        }
    }

    /// Measure `container_id` through `viewport`, falling back to
    /// [`DEFAULT_SIZE`] when it reports nothing.
    pub fn measure(viewport: &dyn ViewportProvider, container_id: &str, margin: Margin) -> Self {
        let outer = viewport.container_size(container_id).unwrap_or_else(|| {
            log::warn!(
                "[GRSM] no size for #{}, using {}x{}",
                container_id,
                DEFAULT_SIZE.width,
                DEFAULT_SIZE.height
            );
            DEFAULT_SIZE
        });
        Self::new(outer, margin)
    }

    /// `translate(left,top)` for the plot group.
    pub fn transform(&self) -> String {
        format!("translate({},{})", self.margin.left, self.margin.top)
    }
}

/// Reports the on-screen size of a named container.
pub trait ViewportProvider {
    fn container_size(&self, container_id: &str) -> Option<Size>;
}

/// Same size for every container. Used by the CLI renderer and tests.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedViewport(pub Size);

impl ViewportProvider for FixedViewport {
    fn container_size(&self, _container_id: &str) -> Option<Size> {
        Some(self.0)
    }
}

/// Per-container sizes; unknown containers are unmeasurable.
#[derive(Debug, Clone, Default)]
pub struct StaticViewport {
    sizes: HashMap<String, Size>,
}

impl StaticViewport {
    pub fn with(mut self, container_id: &str, size: Size) -> Self {
        self.sizes.insert(container_id.to_string(), size);
        self
    }
}

impl ViewportProvider for StaticViewport {
    fn container_size(&self, container_id: &str) -> Option<Size> {
        self.sizes.get(container_id).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inner_size_subtracts_margins() {
        let layout = Layout::new(Size::new(600.0, 300.0), Margin::new(40.0, 90.0, 50.0, 90.0));
        assert_eq!(layout.width, 420.0);
        assert_eq!(layout.height, 210.0);
        assert_eq!(layout.transform(), "translate(90,40)");
    }

    #[test]
    fn tiny_containers_clamp_to_zero() {
        let layout = Layout::new(Size::new(50.0, 10.0), Margin::new(40.0, 90.0, 50.0, 90.0));
        assert_eq!(layout.width, 0.0);
        assert_eq!(layout.height, 0.0);
    }

    #[test]
    fn unmeasured_container_uses_default() {
        let viewport = StaticViewport::default().with("timeline", Size::new(800.0, 200.0));
        let margin = Margin::new(0.0, 0.0, 0.0, 0.0);
        assert_eq!(Layout::measure(&viewport, "timeline", margin).width, 800.0);
        assert_eq!(Layout::measure(&viewport, "missing", margin).outer, DEFAULT_SIZE);
    }
}

//! Horizontal brush driven by pointer events.
//!
//! The view layer forwards pointer positions (already relative to the plot
//! area); the brush tracks the selected pixel interval and reports an event
//! for every change. A press and release without movement clears the
//! selection.

use serde::Serialize;

/// Pointer callbacks forwarded by the view layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pointer {
    Down,
    Move,
    Up,
    Leave,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum BrushPhase {
    Start,
    /// Selection changed mid-drag.
    Brush,
    End,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BrushEvent {
    pub phase: BrushPhase,
    /// Selected pixel interval `(x0, x1)` with `x0 < x1`, or `None`.
    pub selection: Option<(f64, f64)>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Drag {
    /// Drawing a new selection from `origin`.
    Draw { origin: f64 },
    /// Moving the existing selection; `grab` is the pointer offset into it.
    Move { grab: f64, width: f64 },
}

#[derive(Debug, Clone, PartialEq)]
pub struct BrushX {
    extent: (f64, f64),
    selection: Option<(f64, f64)>,
    drag: Option<Drag>,
}

impl BrushX {
    /// Brush over the pixel interval `extent`.
    pub fn new(extent: (f64, f64)) -> Self {
        Self {
            extent,
            selection: None,
            drag: None,
        }
    }

    pub fn extent(&self) -> (f64, f64) {
        self.extent
    }

    pub fn selection(&self) -> Option<(f64, f64)> {
        self.selection
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    /// Change the brushable interval (after a resize); the selection is
    /// clipped to it.
    pub fn set_extent(&mut self, extent: (f64, f64)) {
        self.extent = extent;
        self.selection = self.selection.and_then(|(a, b)| self.normalized(a, b));
    }

    fn clamp(&self, x: f64) -> f64 {
        let (lo, hi) = self.extent;
        if x.is_finite() {
            x.clamp(lo, hi.max(lo))
        } else {
            lo
        }
    }

    fn normalized(&self, a: f64, b: f64) -> Option<(f64, f64)> {
        let (a, b) = (self.clamp(a), self.clamp(b));
        let (x0, x1) = if a <= b { (a, b) } else { (b, a) };
        (x1 > x0).then_some((x0, x1))
    }

    pub fn pointer_down(&mut self, x: f64) -> BrushEvent {
        let x = self.clamp(x);
        self.drag = Some(match self.selection {
            Some((x0, x1)) if x0 <= x && x <= x1 => Drag::Move {
                grab: x - x0,
                width: x1 - x0,
            },
            _ => {
                self.selection = None;
                Drag::Draw { origin: x }
            }
        });
        BrushEvent {
            phase: BrushPhase::Start,
            selection: self.selection,
        }
    }

    /// `None` when no drag is in progress.
    pub fn pointer_move(&mut self, x: f64) -> Option<BrushEvent> {
        let drag = self.drag?;
        self.update(drag, x);
        Some(BrushEvent {
            phase: BrushPhase::Brush,
            selection: self.selection,
        })
    }

    /// Finish the drag; `None` when no drag is in progress.
    pub fn pointer_up(&mut self, x: f64) -> Option<BrushEvent> {
        let drag = self.drag.take()?;
        self.update(drag, x);
        Some(BrushEvent {
            phase: BrushPhase::End,
            selection: self.selection,
        })
    }

    /// Drop the selection programmatically.
    pub fn clear(&mut self) -> BrushEvent {
        self.drag = None;
        self.selection = None;
        BrushEvent {
            phase: BrushPhase::End,
            selection: None,
        }
    }

    fn update(&mut self, drag: Drag, x: f64) {
        let x = self.clamp(x);
        self.selection = match drag {
            Drag::Draw { origin } => self.normalized(origin, x),
            Drag::Move { grab, width } => {
                let (lo, hi) = self.extent;
                let x0 = (x - grab).clamp(lo, (hi - width).max(lo));
                self.normalized(x0, x0 + width)
            }
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn drag_reports_every_step() {
        let mut brush = BrushX::new((0.0, 100.0));
        assert_eq!(brush.pointer_down(20.0).selection, None);
        let ev = brush.pointer_move(40.0).unwrap();
        assert_eq!(ev.phase, BrushPhase::Brush);
        assert_eq!(ev.selection, Some((20.0, 40.0)));
        let ev = brush.pointer_up(10.0).unwrap();
        assert_eq!(ev.phase, BrushPhase::End);
        assert_eq!(ev.selection, Some((10.0, 20.0)));
        assert!(brush.pointer_move(50.0).is_none());
    }

    #[test]
    fn selection_is_clamped_to_extent() {
        let mut brush = BrushX::new((0.0, 100.0));
        brush.pointer_down(90.0);
        assert_eq!(brush.pointer_up(150.0).unwrap().selection, Some((90.0, 100.0)));

        // Moving keeps the width and stops at the edge.
        brush.pointer_down(95.0);
        brush.pointer_move(0.0);
        assert_eq!(brush.pointer_up(-30.0).unwrap().selection, Some((0.0, 10.0)));
    }

    #[test]
    fn click_without_drag_clears() {
        let mut brush = BrushX::new((0.0, 100.0));
        brush.pointer_down(10.0);
        brush.pointer_up(30.0);
        brush.pointer_down(60.0);
        assert_eq!(brush.pointer_up(60.0).unwrap().selection, None);
    }
}

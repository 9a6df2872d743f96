//! SVG path generation for lines and areas.
//!
//! Every coordinate is checked before it is written: a non-finite value is
//! replaced by the caller's fallback (or 0), so no path string can carry
//! `NaN` or `inf`. Gaps (`None` points) split a line into subpaths.

use serde::Serialize;
use std::fmt::Write;

/// Interpolation between consecutive points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Default)]
pub enum Curve {
    #[default]
    Linear,
    /// Cardinal spline with tension 0.
    Cardinal,
    /// Monotone in x; never overshoots between samples.
    MonotoneX,
}

const CARDINAL_K: f64 = 1.0 / 6.0;

/// Write `value` with at most three decimals and no trailing zeros.
pub fn fmt_num(value: f64) -> String {
    let v = if value.is_finite() { value } else { 0.0 };
    let rounded = (v * 1000.0).round() / 1000.0;
    let mut s = format!("{:.3}", rounded);
    while s.ends_with('0') {
        s.pop();
    }
    if s.ends_with('.') {
        s.pop();
    }
    if s == "-0" {
        s = "0".to_string();
    }
    s
}

/// Incremental `d` attribute writer.
#[derive(Debug, Default, Clone)]
pub struct PathBuilder {
    d: String,
}

impl PathBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    fn command(&mut self, cmd: char, coords: &[f64]) {
        self.d.push(cmd);
        for (i, pair) in coords.chunks(2).enumerate() {
            if i > 0 {
                self.d.push(',');
            }
            let _ = write!(self.d, "{},{}", fmt_num(pair[0]), fmt_num(pair[1]));
        }
    }

    pub fn move_to(&mut self, x: f64, y: f64) {
        self.command('M', &[x, y]);
    }

    pub fn line_to(&mut self, x: f64, y: f64) {
        self.command('L', &[x, y]);
    }

    pub fn bezier_to(&mut self, c1: (f64, f64), c2: (f64, f64), to: (f64, f64)) {
        self.command('C', &[c1.0, c1.1, c2.0, c2.1, to.0, to.1]);
    }

    pub fn close(&mut self) {
        self.d.push('Z');
    }

    pub fn rect(&mut self, x: f64, y: f64, width: f64, height: f64) {
        self.move_to(x, y);
        self.line_to(x + width, y);
        self.line_to(x + width, y + height);
        self.line_to(x, y + height);
        self.close();
    }

    pub fn is_empty(&self) -> bool {
        self.d.is_empty()
    }

    pub fn finish(self) -> String {
        self.d
    }
}

/// How a run of points is started.
#[derive(Clone, Copy, PartialEq)]
enum Start {
    Move,
    Line,
}

fn begin(b: &mut PathBuilder, p: (f64, f64), start: Start) {
    match start {
        Start::Move => b.move_to(p.0, p.1),
        Start::Line => b.line_to(p.0, p.1),
    }
}

fn linear(b: &mut PathBuilder, pts: &[(f64, f64)], start: Start) {
    let Some((first, rest)) = pts.split_first() else {
        return;
    };
    begin(b, *first, start);
    for p in rest {
        b.line_to(p.0, p.1);
    }
}

fn cardinal(b: &mut PathBuilder, pts: &[(f64, f64)], start: Start) {
    let n = pts.len();
    if n < 3 {
        return linear(b, pts, start);
    }
    begin(b, pts[0], start);
    for i in 0..n - 1 {
        // End tangents reflect the neighbour, which pins the control point
        // to the endpoint itself.
        let prev = if i == 0 { pts[1] } else { pts[i - 1] };
        let next = if i + 2 < n { pts[i + 2] } else { pts[i] };
        let (p0, p1) = (pts[i], pts[i + 1]);
        b.bezier_to(
            (p0.0 + CARDINAL_K * (p1.0 - prev.0), p0.1 + CARDINAL_K * (p1.1 - prev.1)),
            (p1.0 + CARDINAL_K * (p0.0 - next.0), p1.1 + CARDINAL_K * (p0.1 - next.1)),
            p1,
        );
    }
}

fn sign(v: f64) -> f64 {
    if v < 0.0 {
        -1.0
    } else {
        1.0
    }
}

/// Tangent at `p1` from its two neighbours (Steffen's method).
fn slope3(p0: (f64, f64), p1: (f64, f64), p2: (f64, f64)) -> f64 {
    let h0 = p1.0 - p0.0;
    let h1 = p2.0 - p1.0;
    let s0 = (p1.1 - p0.1) / h0;
    let s1 = (p2.1 - p1.1) / h1;
    let p = (s0 * h1 + s1 * h0) / (h0 + h1);
    let t = (sign(s0) + sign(s1)) * s0.abs().min(s1.abs()).min(0.5 * p.abs());
    if t.is_finite() {
        t
    } else {
        0.0
    }
}

/// One-sided tangent at an end of the run.
fn slope2(p0: (f64, f64), p1: (f64, f64), t: f64) -> f64 {
    let h = p1.0 - p0.0;
    if h != 0.0 {
        (3.0 * (p1.1 - p0.1) / h - t) / 2.0
    } else {
        t
    }
}

fn monotone_x(b: &mut PathBuilder, pts: &[(f64, f64)], start: Start) {
    let mut unique: Vec<(f64, f64)> = Vec::with_capacity(pts.len());
    for p in pts {
        if unique.last() != Some(p) {
            unique.push(*p);
        }
    }
    let n = unique.len();
    if n < 3 {
        return linear(b, &unique, start);
    }
    let mut tangents = vec![0.0; n];
    for i in 1..n - 1 {
        tangents[i] = slope3(unique[i - 1], unique[i], unique[i + 1]);
    }
    tangents[0] = slope2(unique[0], unique[1], tangents[1]);
    tangents[n - 1] = slope2(unique[n - 2], unique[n - 1], tangents[n - 2]);

    begin(b, unique[0], start);
    for i in 0..n - 1 {
        let (p0, p1) = (unique[i], unique[i + 1]);
        let dx = (p1.0 - p0.0) / 3.0;
        b.bezier_to(
            (p0.0 + dx, p0.1 + dx * tangents[i]),
            (p1.0 - dx, p1.1 - dx * tangents[i + 1]),
            p1,
        );
    }
}

fn run(b: &mut PathBuilder, pts: &[(f64, f64)], curve: Curve, start: Start) {
    match curve {
        Curve::Linear => linear(b, pts, start),
        Curve::Cardinal => cardinal(b, pts, start),
        Curve::MonotoneX => monotone_x(b, pts, start),
    }
}

fn finite(p: (f64, f64)) -> (f64, f64) {
    let f = |v: f64| if v.is_finite() { v } else { 0.0 };
    (f(p.0), f(p.1))
}

/// Split at `None` into runs of sanitised points.
fn runs<T: Copy>(points: &[Option<T>]) -> Vec<Vec<T>> {
    let mut out = Vec::new();
    let mut current = Vec::new();
    for p in points {
        match p {
            Some(p) => current.push(*p),
            None if !current.is_empty() => out.push(std::mem::take(&mut current)),
            None => {}
        }
    }
    if !current.is_empty() {
        out.push(current);
    }
    out
}

/// Path through `points`; `None` when there is nothing to draw.
pub fn line_path(points: &[(f64, f64)], curve: Curve) -> Option<String> {
    let defined: Vec<Option<(f64, f64)>> = points.iter().map(|p| Some(*p)).collect();
    line_path_defined(&defined, curve)
}

/// Like [`line_path`], but `None` points leave a gap.
pub fn line_path_defined(points: &[Option<(f64, f64)>], curve: Curve) -> Option<String> {
    let mut b = PathBuilder::new();
    for segment in runs(points) {
        let segment: Vec<_> = segment.into_iter().map(finite).collect();
        run(&mut b, &segment, curve, Start::Move);
    }
    (!b.is_empty()).then(|| b.finish())
}

/// Area sample: `x` with a baseline `y0` and a top `y1`, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AreaPoint {
    pub x: f64,
    pub y0: f64,
    pub y1: f64,
}

impl AreaPoint {
    /// Non-finite `y1` falls back to the baseline, non-finite `y0` to `floor`.
    pub fn guarded(x: f64, y0: f64, y1: f64, floor: f64) -> Self {
        let x = if x.is_finite() { x } else { 0.0 };
        let y0 = if y0.is_finite() { y0 } else { floor };
        let y1 = if y1.is_finite() { y1 } else { y0 };
        Self { x, y0, y1 }
    }
}

/// Closed area: top edge forward, baseline backward.
pub fn area_path(points: &[AreaPoint], curve: Curve) -> Option<String> {
    let defined: Vec<Option<AreaPoint>> = points.iter().map(|p| Some(*p)).collect();
    area_path_defined(&defined, curve)
}

pub fn area_path_defined(points: &[Option<AreaPoint>], curve: Curve) -> Option<String> {
    let mut b = PathBuilder::new();
    for segment in runs(points) {
        let top: Vec<(f64, f64)> = segment.iter().map(|p| finite((p.x, p.y1))).collect();
        let base: Vec<(f64, f64)> = segment.iter().rev().map(|p| finite((p.x, p.y0))).collect();
        run(&mut b, &top, curve, Start::Move);
        run(&mut b, &base, curve, Start::Line);
        b.close();
    }
    (!b.is_empty()).then(|| b.finish())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numbers_are_compact() {
        assert_eq!(fmt_num(1.0), "1");
        assert_eq!(fmt_num(1.23456), "1.235");
        assert_eq!(fmt_num(-0.0001), "0");
        assert_eq!(fmt_num(f64::NAN), "0");
    }

    #[test]
    fn linear_line() {
        let d = line_path(&[(0.0, 10.0), (5.0, 0.0), (10.0, 5.5)], Curve::Linear).unwrap();
        assert_eq!(d, "M0,10L5,0L10,5.5");
        assert_eq!(line_path(&[], Curve::Linear), None);
    }

    #[test]
    fn gaps_start_new_subpaths() {
        let d = line_path_defined(
            &[Some((0.0, 0.0)), Some((1.0, 1.0)), None, Some((3.0, 3.0))],
            Curve::Linear,
        )
        .unwrap();
        assert_eq!(d, "M0,0L1,1M3,3");
    }

    #[test]
    fn area_closes_over_baseline() {
        let pts = [
            AreaPoint { x: 0.0, y0: 100.0, y1: 50.0 },
            AreaPoint { x: 10.0, y0: 100.0, y1: 40.0 },
        ];
        assert_eq!(area_path(&pts, Curve::Linear).unwrap(), "M0,50L10,40L10,100L0,100Z");
    }

    #[test]
    fn cardinal_endpoints_and_controls() {
        let pts = [(0.0, 0.0), (10.0, 10.0), (20.0, 0.0)];
        let d = line_path(&pts, Curve::Cardinal).unwrap();
        assert!(d.starts_with("M0,0C0,0,"));
        assert!(d.ends_with(",20,0"));
        assert_eq!(d.matches('C').count(), 2);
    }

    #[test]
    fn monotone_stays_flat_on_plateaus() {
        let pts = [(0.0, 5.0), (10.0, 5.0), (20.0, 5.0), (30.0, 8.0)];
        let d = line_path(&pts, Curve::MonotoneX).unwrap();
        assert!(d.starts_with("M0,5C3.333,5,6.667,5,10,5"));
    }

    #[test]
    fn non_finite_input_never_reaches_the_path() {
        let pts = [
            AreaPoint::guarded(0.0, 100.0, f64::NAN, 100.0),
            AreaPoint::guarded(f64::INFINITY, f64::NAN, 20.0, 100.0),
            AreaPoint::guarded(20.0, 100.0, 30.0, 100.0),
        ];
        for curve in [Curve::Linear, Curve::Cardinal, Curve::MonotoneX] {
            let d = area_path(&pts, curve).unwrap();
            assert!(!d.contains("NaN") && !d.contains("inf"), "{}", d);
        }
        let d = line_path(&[(0.0, f64::NAN), (1.0, 2.0)], Curve::Linear).unwrap();
        assert_eq!(d, "M0,0L1,2");
    }
}

//! Colour ramps: the cyclic rainbow for categories and viridis for values.

use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    const fn hex(v: u32) -> Self {
        Self::new((v >> 16) as u8, (v >> 8) as u8, v as u8)
    }

    fn lerp(self, other: Rgb, t: f64) -> Rgb {
        let mix = |a: u8, b: u8| (a as f64 + (b as f64 - a as f64) * t).round() as u8;
        Rgb::new(mix(self.r, other.r), mix(self.g, other.g), mix(self.b, other.b))
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rgb({}, {}, {})", self.r, self.g, self.b)
    }
}

fn channel(v: f64) -> u8 {
    (v * 255.0).round().clamp(0.0, 255.0) as u8
}

/// Cubehelix colour at hue `h` (degrees), saturation `s`, lightness `l`.
fn cubehelix(h: f64, s: f64, l: f64) -> Rgb {
    const A: f64 = -0.14861;
    const B: f64 = 1.78277;
    const C: f64 = -0.29227;
    const D: f64 = -0.90649;
    const E: f64 = 1.97294;
    let h = (h + 120.0).to_radians();
    let a = s * l * (1.0 - l);
    let (sin_h, cos_h) = h.sin_cos();
    Rgb::new(
        channel(l + a * (A * cos_h + B * sin_h)),
        channel(l + a * (C * cos_h + D * sin_h)),
        channel(l + a * (E * cos_h)),
    )
}

/// Cyclic rainbow at `t` (wraps outside `[0, 1]`).
pub fn rainbow(t: f64) -> Rgb {
    let t = if t.is_finite() { t - t.floor() } else { 0.0 };
    let ts = (t - 0.5).abs();
    cubehelix(360.0 * t - 100.0, 1.5 - 1.5 * ts, 0.8 - 0.9 * ts)
}

/// `n` distinct rainbow colours at `i / n`, so the first is not repeated
/// at the end of the cycle.
pub fn rainbow_quantize(n: usize) -> Vec<String> {
    (0..n)
        .map(|i| rainbow(i as f64 / n as f64).to_string())
        .collect()
}

const VIRIDIS: [Rgb; 11] = [
    Rgb::hex(0x440154),
    Rgb::hex(0x482475),
    Rgb::hex(0x414487),
    Rgb::hex(0x355f8d),
    Rgb::hex(0x2a788e),
    Rgb::hex(0x21918c),
    Rgb::hex(0x22a884),
    Rgb::hex(0x44bf70),
    Rgb::hex(0x7ad151),
    Rgb::hex(0xbddf26),
    Rgb::hex(0xfde725),
];

/// Viridis at `t`, clamped into `[0, 1]`.
pub fn viridis(t: f64) -> Rgb {
    let t = if t.is_finite() { t.clamp(0.0, 1.0) } else { 0.0 };
    let scaled = t * (VIRIDIS.len() - 1) as f64;
    let i = (scaled.floor() as usize).min(VIRIDIS.len() - 2);
    VIRIDIS[i].lerp(VIRIDIS[i + 1], scaled - i as f64)
}

/// Sequential colour scale over a numeric domain.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SequentialScale {
    pub domain: (f64, f64),
}

impl SequentialScale {
    pub fn new(domain: (f64, f64)) -> Self {
        Self { domain }
    }

    /// Position of `value` in the domain, `0.5` for a degenerate domain.
    pub fn t(&self, value: f64) -> f64 {
        let (lo, hi) = self.domain;
        let span = hi - lo;
        if span == 0.0 || !span.is_finite() {
            0.5
        } else {
            (value - lo) / span
        }
    }

    pub fn color(&self, value: f64) -> Rgb {
        viridis(self.t(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rainbow_known_points() {
        // t = 0 and t = 1 are the same colour on the cycle.
        assert_eq!(rainbow(0.0), rainbow(1.0));
        assert_eq!(rainbow(0.0).to_string(), "rgb(110, 64, 170)");
    }

    #[test]
    fn quantize_gives_distinct_colours() {
        let colours = rainbow_quantize(6);
        assert_eq!(colours.len(), 6);
        for (i, a) in colours.iter().enumerate() {
            for b in &colours[i + 1..] {
                assert_ne!(a, b);
            }
        }
        assert!(rainbow_quantize(0).is_empty());
    }

    #[test]
    fn viridis_ends() {
        assert_eq!(viridis(0.0), Rgb::hex(0x440154));
        assert_eq!(viridis(1.0), Rgb::hex(0xfde725));
        assert_eq!(viridis(2.0), Rgb::hex(0xfde725));
        assert_eq!(SequentialScale::new((5.0, 5.0)).t(5.0), 0.5);
    }
}

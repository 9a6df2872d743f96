//! Tick positions and labels for panel axes.

use crate::scale::{BandScale, LinearScale, TimeScale};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Tick {
    /// Pixel offset along the axis.
    pub position: f64,
    pub label: String,
}

/// d3-style `.0f` / `.2f` style label for a numeric tick.
pub fn format_fixed(value: f64, decimals: usize) -> String {
    format!("{:.*}", decimals, value)
}

/// Compact count label: 1.2M, 35K, 900.
pub fn format_si(value: f64) -> String {
    let abs = value.abs();
    if abs >= 1_000_000.0 {
        format!("{:.1}M", value / 1_000_000.0)
    } else if abs >= 1_000.0 {
        format!("{:.0}K", value / 1_000.0)
    } else {
        format!("{}", value)
    }
}

/// SI-prefixed label with `digits` significant digits, like d3's `.2s`.
pub fn format_si_digits(value: f64, digits: usize) -> String {
    const PREFIXES: [&str; 4] = ["", "k", "M", "G"];
    let digits = digits.max(1);
    if value == 0.0 || !value.is_finite() {
        return format!("{:.*}", digits - 1, 0.0);
    }
    let exponent = value.abs().log10().floor();
    let i = ((exponent / 3.0).floor().max(0.0) as usize).min(PREFIXES.len() - 1);
    let scaled = value / 1000f64.powi(i as i32);
    let magnitude = scaled.abs().log10().floor() as i64;
    let decimals = (digits as i64 - 1 - magnitude).max(0) as usize;
    format!("{:.*}{}", decimals, scaled, PREFIXES[i])
}

/// Whole number with thousands separators: 9,197,697.
pub fn format_thousands(value: f64) -> String {
    let rounded = value.round();
    let digits = format!("{:.0}", rounded.abs());
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    if rounded < 0.0 {
        out.insert(0, '-');
    }
    out
}

pub fn linear_ticks(scale: &LinearScale, count: usize, label: impl Fn(f64) -> String) -> Vec<Tick> {
    scale
        .ticks(count)
        .into_iter()
        .map(|v| Tick {
            position: scale.apply(v),
            label: label(v),
        })
        .collect()
}

/// Yearly ticks labelled `%Y`.
pub fn year_ticks(scale: &TimeScale, count: usize) -> Vec<Tick> {
    scale
        .year_ticks(count)
        .into_iter()
        .map(|d| Tick {
            position: scale.apply_date(&d),
            label: d.format("%Y").to_string(),
        })
        .collect()
}

/// One tick per band, centred in it.
pub fn band_ticks<T: PartialEq>(scale: &BandScale<T>, label: impl Fn(&T) -> String) -> Vec<Tick> {
    let half = scale.bandwidth() / 2.0;
    scale
        .domain()
        .iter()
        .enumerate()
        .map(|(i, v)| Tick {
            position: scale.position(i) + half,
            label: label(v),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels() {
        assert_eq!(format_si(1_230_000.0), "1.2M");
        assert_eq!(format_si(35_400.0), "35K");
        assert_eq!(format_si(900.0), "900");
        assert_eq!(format_fixed(3.14159, 2), "3.14");
        assert_eq!(format_si_digits(5_000_000.0, 2), "5.0M");
        assert_eq!(format_si_digits(12_000_000.0, 2), "12M");
        assert_eq!(format_si_digits(0.0, 2), "0.0");
        assert_eq!(format_thousands(9_197_697.0), "9,197,697");
        assert_eq!(format_thousands(512.0), "512");
    }

    #[test]
    fn linear_ticks_are_placed() {
        let scale = LinearScale::new((0.0, 10.0), (100.0, 0.0));
        let ticks = linear_ticks(&scale, 2, |v| format_fixed(v, 0));
        assert_eq!(ticks[0], Tick { position: 100.0, label: "0".into() });
        assert_eq!(ticks.last().unwrap().position, 0.0);
    }
}

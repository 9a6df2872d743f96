//! Linear, time and band scales with d3-compatible tick and nice rules.

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime, NaiveTime};
use serde::Serialize;

const E10: f64 = 7.0710678118654755; // sqrt(50)
const E5: f64 = 3.1622776601683795; // sqrt(10)
const E2: f64 = 1.4142135623730951; // sqrt(2)

/// `(i1, i2, inc)`; a negative `inc` means the step is `1 / -inc`.
fn tick_spec(start: f64, stop: f64, count: f64) -> (f64, f64, f64) {
    let step = (stop - start) / count.max(0.0);
    let power = step.log10().floor();
    let error = step / 10f64.powf(power);
    let factor = if error >= E10 {
        10.0
    } else if error >= E5 {
        5.0
    } else if error >= E2 {
        2.0
    } else {
        1.0
    };
    let (mut i1, mut i2, inc);
    if power < 0.0 {
        let p = 10f64.powf(-power) / factor;
        i1 = (start * p).round();
        i2 = (stop * p).round();
        if i1 / p < start {
            i1 += 1.0;
        }
        if i2 / p > stop {
            i2 -= 1.0;
        }
        inc = -p;
    } else {
        let p = 10f64.powf(power) * factor;
        i1 = (start / p).round();
        i2 = (stop / p).round();
        if i1 * p < start {
            i1 += 1.0;
        }
        if i2 * p > stop {
            i2 -= 1.0;
        }
        inc = p;
    }
    if i2 < i1 && (0.5..2.0).contains(&count) {
        return tick_spec(start, stop, count * 2.0);
    }
    (i1, i2, inc)
}

/// Signed tick step for `[start, stop]`, see [`tick_spec`].
pub fn tick_increment(start: f64, stop: f64, count: usize) -> f64 {
    tick_spec(start, stop, count as f64).2
}

/// Roughly `count` round-valued ticks covering `[start, stop]`, ascending.
pub fn ticks(start: f64, stop: f64, count: usize) -> Vec<f64> {
    if count == 0 || !start.is_finite() || !stop.is_finite() {
        return Vec::new();
    }
    if start == stop {
        return vec![start];
    }
    let (lo, hi) = if start < stop { (start, stop) } else { (stop, start) };
    let (i1, i2, inc) = tick_spec(lo, hi, count as f64);
    if !(i2 >= i1) || !inc.is_finite() {
        return Vec::new();
    }
    let n = (i2 - i1) as usize + 1;
    (0..n)
        .map(|i| {
            let k = i1 + i as f64;
            if inc < 0.0 {
                k / -inc
            } else {
                k * inc
            }
        })
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LinearScale {
    pub domain: (f64, f64),
    pub range: (f64, f64),
}

impl LinearScale {
    pub fn new(domain: (f64, f64), range: (f64, f64)) -> Self {
        Self { domain, range }
    }

    /// Domain value to pixel. A zero-width domain maps to the range midpoint.
    pub fn apply(&self, value: f64) -> f64 {
        let (d0, d1) = self.domain;
        let (r0, r1) = self.range;
        let span = d1 - d0;
        if span == 0.0 || !span.is_finite() {
            return (r0 + r1) / 2.0;
        }
        r0 + (value - d0) / span * (r1 - r0)
    }

    /// Pixel to domain value.
    pub fn invert(&self, pixel: f64) -> f64 {
        let (d0, d1) = self.domain;
        let (r0, r1) = self.range;
        let span = r1 - r0;
        if span == 0.0 || !span.is_finite() {
            return (d0 + d1) / 2.0;
        }
        d0 + (pixel - r0) / span * (d1 - d0)
    }

    pub fn ticks(&self, count: usize) -> Vec<f64> {
        ticks(self.domain.0, self.domain.1, count)
    }

    /// Extend the domain outward to round tick values.
    pub fn nice(self, count: usize) -> Self {
        let (mut start, mut stop) = self.domain;
        let reversed = stop < start;
        if reversed {
            std::mem::swap(&mut start, &mut stop);
        }
        if !start.is_finite() || !stop.is_finite() || start == stop || count == 0 {
            return self;
        }
        let mut previous = None;
        for _ in 0..10 {
            let step = tick_increment(start, stop, count);
            if previous == Some(step) {
                break;
            }
            if step > 0.0 {
                start = (start / step).floor() * step;
                stop = (stop / step).ceil() * step;
            } else if step < 0.0 {
                start = (start * step).ceil() / step;
                stop = (stop * step).floor() / step;
            } else {
                break;
            }
            previous = Some(step);
        }
        let domain = if reversed { (stop, start) } else { (start, stop) };
        Self { domain, ..self }
    }
}

/// Milliseconds since the epoch, the unit time scales interpolate in.
pub fn datetime_ms(value: &NaiveDateTime) -> f64 {
    value.and_utc().timestamp_millis() as f64
}

pub fn date_ms(value: &NaiveDate) -> f64 {
    datetime_ms(&value.and_time(NaiveTime::MIN))
}

fn from_ms(ms: f64) -> Option<NaiveDateTime> {
    if !ms.is_finite() {
        return None;
    }
    DateTime::from_timestamp_millis(ms.round() as i64).map(|d| d.naive_utc())
}

/// Linear scale over calendar time.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TimeScale {
    start: NaiveDateTime,
    end: NaiveDateTime,
    linear: LinearScale,
}

impl TimeScale {
    pub fn new(domain: (NaiveDateTime, NaiveDateTime), range: (f64, f64)) -> Self {
        Self {
            start: domain.0,
            end: domain.1,
            linear: LinearScale::new((datetime_ms(&domain.0), datetime_ms(&domain.1)), range),
        }
    }

    pub fn from_dates(domain: (NaiveDate, NaiveDate), range: (f64, f64)) -> Self {
        Self::new(
            (domain.0.and_time(NaiveTime::MIN), domain.1.and_time(NaiveTime::MIN)),
            range,
        )
    }

    pub fn domain(&self) -> (NaiveDateTime, NaiveDateTime) {
        (self.start, self.end)
    }

    pub fn range(&self) -> (f64, f64) {
        self.linear.range
    }

    pub fn apply(&self, value: &NaiveDateTime) -> f64 {
        self.linear.apply(datetime_ms(value))
    }

    pub fn apply_date(&self, value: &NaiveDate) -> f64 {
        self.linear.apply(date_ms(value))
    }

    pub fn invert(&self, pixel: f64) -> Option<NaiveDateTime> {
        from_ms(self.linear.invert(pixel))
    }

    pub fn invert_date(&self, pixel: f64) -> Option<NaiveDate> {
        self.invert(pixel).map(|dt| dt.date())
    }

    /// January 1st ticks inside the domain, about `count` of them, on years
    /// divisible by the chosen step.
    pub fn year_ticks(&self, count: usize) -> Vec<NaiveDate> {
        let (start, end) = if self.start <= self.end {
            (self.start, self.end)
        } else {
            (self.end, self.start)
        };
        let on_year_start = start.ordinal() == 1 && start.time() == NaiveTime::MIN;
        let first = if on_year_start {
            start.year()
        } else {
            start.year() + 1
        };
        let last = end.year();
        if last < first || count == 0 {
            return Vec::new();
        }
        let step = if first == last {
            1
        } else {
            tick_increment(first as f64, last as f64, count).max(1.0) as i32
        };
        (first..=last)
            .filter(|y| y.rem_euclid(step) == 0)
            .filter_map(|y| NaiveDate::from_ymd_opt(y, 1, 1))
            .collect()
    }
}

/// Ordinal scale dividing the range into equal bands.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BandScale<T> {
    domain: Vec<T>,
    range: (f64, f64),
    padding_inner: f64,
    padding_outer: f64,
}

impl<T: PartialEq> BandScale<T> {
    pub fn new(domain: Vec<T>, range: (f64, f64)) -> Self {
        Self {
            domain,
            range,
            padding_inner: 0.0,
            padding_outer: 0.0,
        }
    }

    /// Same inner and outer padding, as a fraction of the step.
    pub fn padding(mut self, padding: f64) -> Self {
        let p = padding.clamp(0.0, 1.0);
        self.padding_inner = p;
        self.padding_outer = p;
        self
    }

    pub fn domain(&self) -> &[T] {
        &self.domain
    }

    pub fn len(&self) -> usize {
        self.domain.len()
    }

    pub fn is_empty(&self) -> bool {
        self.domain.is_empty()
    }

    /// `(offset of the first band, step)`.
    fn layout(&self) -> (f64, f64) {
        let n = self.domain.len() as f64;
        let (r0, r1) = self.range;
        let step = (r1 - r0) / (n - self.padding_inner + self.padding_outer * 2.0).max(1.0);
        let start = r0 + (r1 - r0 - step * (n - self.padding_inner)) * 0.5;
        (start, step)
    }

    pub fn step(&self) -> f64 {
        self.layout().1
    }

    pub fn bandwidth(&self) -> f64 {
        self.step() * (1.0 - self.padding_inner)
    }

    /// Start of band `index`.
    pub fn position(&self, index: usize) -> f64 {
        let (start, step) = self.layout();
        start + step * index as f64
    }

    pub fn position_of(&self, value: &T) -> Option<f64> {
        self.domain
            .iter()
            .position(|v| v == value)
            .map(|i| self.position(i))
    }

    /// `floor(pixel / step)` when it names a band.
    pub fn index_at(&self, pixel: f64) -> Option<usize> {
        let step = self.step();
        if step <= 0.0 || !pixel.is_finite() {
            return None;
        }
        let i = (pixel / step).floor();
        (i >= 0.0 && i < self.domain.len() as f64).then_some(i as usize)
    }

    /// `floor(pixel / step)` clamped into the domain; `None` only when empty.
    pub fn index_at_clamped(&self, pixel: f64) -> Option<usize> {
        let last = self.domain.len().checked_sub(1)?;
        let step = self.step();
        if step <= 0.0 || !pixel.is_finite() {
            return Some(0);
        }
        let i = (pixel / step).floor();
        Some(if i <= 0.0 { 0 } else { (i as usize).min(last) })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn linear_apply_and_invert() {
        let s = LinearScale::new((0.0, 10.0), (100.0, 0.0));
        assert_eq!(s.apply(0.0), 100.0);
        assert_eq!(s.apply(5.0), 50.0);
        assert_eq!(s.invert(25.0), 7.5);
    }

    #[test]
    fn degenerate_domain_maps_to_midpoint() {
        let s = LinearScale::new((0.0, 0.0), (200.0, 0.0));
        assert_eq!(s.apply(0.0), 100.0);
        assert_eq!(s.ticks(5), vec![0.0]);
    }

    #[test]
    fn ticks_follow_round_steps() {
        assert_eq!(ticks(0.0, 10.0, 5), vec![0.0, 2.0, 4.0, 6.0, 8.0, 10.0]);
        assert_eq!(ticks(0.0, 1.0, 4), vec![0.0, 0.2, 0.4, 0.6, 0.8, 1.0]);
        assert!(ticks(0.0, 10.0, 0).is_empty());
    }

    #[test]
    fn nice_rounds_outward() {
        let s = LinearScale::new((0.0, 9.3), (0.0, 1.0)).nice(10);
        assert_eq!(s.domain, (0.0, 10.0));
        let s = LinearScale::new((3.0, 97.0), (0.0, 1.0)).nice(5);
        assert_eq!(s.domain, (0.0, 100.0));
    }

    #[test]
    fn time_scale_inverts_to_dates() {
        let d = |y| NaiveDate::from_ymd_opt(y, 1, 1).unwrap();
        let s = TimeScale::from_dates((d(2000), d(2010)), (0.0, 1000.0));
        assert_eq!(s.apply_date(&d(2000)), 0.0);
        assert_eq!(s.apply_date(&d(2010)), 1000.0);
        assert_eq!(s.invert_date(0.0), Some(d(2000)));
        assert_eq!(s.invert_date(1000.0), Some(d(2010)));
        assert_eq!(s.year_ticks(5), vec![d(2000), d(2002), d(2004), d(2006), d(2008), d(2010)]);
    }

    #[test]
    fn band_lookup_clamps_right_edge() {
        let s = BandScale::new(vec![2000, 2001, 2002, 2003], (0.0, 100.0)).padding(0.05);
        assert!((s.bandwidth() - s.step() * 0.95).abs() < 1e-9);
        assert_eq!(s.index_at(0.0), Some(0));
        assert_eq!(s.index_at(100.0), None);
        assert_eq!(s.index_at_clamped(100.0), Some(3));
        assert_eq!(s.index_at_clamped(-5.0), Some(0));
        assert_eq!(BandScale::<i32>::new(vec![], (0.0, 10.0)).index_at_clamped(3.0), None);
    }
}

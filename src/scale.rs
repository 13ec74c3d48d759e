// Copyright 2025 Chris Custine
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Scale math for mapping data values onto chart pixels.
//!
//! Three scale kinds cover the charts in this crate:
//! - `LinearScale`: continuous numeric domain to a pixel range, with
//!   optional clamping and nice tick generation on the 1/2/5 ladder
//! - `BandScale`: discrete categories to contiguous padded pixel bands
//! - `TimeScale`: calendar dates to pixels with calendar-aligned ticks
//!
//! Non-finite inputs stay non-finite through `scale`/`invert` so that
//! draw code can treat them as missing geometry. Degenerate domains
//! (zero width) map everything to NaN rather than panicking.

use chrono::{Datelike, Months, NaiveDate, Weekday};

/// Tick step selection thresholds: sqrt(50), sqrt(10), sqrt(2).
const TICK_E10: f64 = 7.071_067_811_865_476;
const TICK_E5: f64 = 3.162_277_660_168_379_5;
const TICK_E2: f64 = 1.414_213_562_373_095_1;

/// Mean days per month and per year in the Gregorian calendar, used
/// only to rank candidate tick intervals by their nominal width.
const DAYS_PER_MONTH: f64 = 30.436_875;
const DAYS_PER_YEAR: f64 = 365.242_5;

/// Continuous numeric domain mapped linearly onto a pixel range.
#[derive(Debug, Clone, Copy)]
pub struct LinearScale {
    domain: (f64, f64),
    range: (f64, f64),
    clamp: bool,
}

impl LinearScale {
    #[must_use]
    pub fn new(domain: (f64, f64), range: (f64, f64)) -> Self {
        Self {
            domain,
            range,
            clamp: false,
        }
    }

    /// A scale that clamps outputs to the range bounds, like the
    /// marker radius scale.
    #[must_use]
    pub fn clamped(domain: (f64, f64), range: (f64, f64)) -> Self {
        Self {
            domain,
            range,
            clamp: true,
        }
    }

    #[must_use]
    pub fn domain(&self) -> (f64, f64) {
        self.domain
    }

    #[must_use]
    pub fn range(&self) -> (f64, f64) {
        self.range
    }

    /// Maps a domain value to a pixel. NaN in, NaN out; a zero-width
    /// domain yields NaN for every input.
    #[must_use]
    pub fn scale(&self, value: f64) -> f64 {
        let (d0, d1) = self.domain;
        let (r0, r1) = self.range;
        let span = d1 - d0;
        if span == 0.0 {
            return f64::NAN;
        }
        let mut t = (value - d0) / span;
        if self.clamp && t.is_finite() {
            t = t.clamp(0.0, 1.0);
        }
        r0 + t * (r1 - r0)
    }

    /// Maps a pixel back to a domain value. Inverse of `scale` for
    /// finite, non-degenerate domains.
    #[must_use]
    pub fn invert(&self, pixel: f64) -> f64 {
        let (d0, d1) = self.domain;
        let (r0, r1) = self.range;
        let mut t = (pixel - r0) / (r1 - r0);
        if self.clamp && t.is_finite() {
            t = t.clamp(0.0, 1.0);
        }
        d0 + t * (d1 - d0)
    }

    /// Roughly `count` round values covering the domain, chosen from
    /// the 1/2/5 x 10^k ladder. Values lie inside the domain.
    #[must_use]
    pub fn ticks(&self, count: usize) -> Vec<f64> {
        let (d0, d1) = self.domain;
        if count == 0 || !d0.is_finite() || !d1.is_finite() {
            return Vec::new();
        }
        if (d0 - d1).abs() == 0.0 {
            return vec![d0];
        }
        let reverse = d1 < d0;
        let (start, stop) = if reverse { (d1, d0) } else { (d0, d1) };
        let inc = tick_increment(start, stop, count);
        if !inc.is_finite() || inc == 0.0 {
            return Vec::new();
        }
        // Positive increments multiply, sub-1 increments divide by the
        // reciprocal so that 0.1-style steps stay exact.
        let mut out: Vec<f64> = if inc > 0.0 {
            let i0 = (start / inc).ceil();
            let i1 = (stop / inc).floor();
            let n = ((i1 - i0 + 1.0).max(0.0)) as usize;
            (0..n).map(|i| (i0 + i as f64) * inc).collect()
        } else {
            let inv = -inc;
            let i0 = (start * inv).ceil();
            let i1 = (stop * inv).floor();
            let n = ((i1 - i0 + 1.0).max(0.0)) as usize;
            (0..n).map(|i| (i0 + i as f64) / inv).collect()
        };
        if reverse {
            out.reverse();
        }
        out
    }

    /// Labels for `ticks` output, with just enough decimals for the
    /// tick step.
    #[must_use]
    pub fn tick_labels(&self, ticks: &[f64]) -> Vec<String> {
        let step = if ticks.len() >= 2 {
            (ticks[1] - ticks[0]).abs()
        } else {
            1.0
        };
        ticks.iter().map(|&v| format_tick(v, step)).collect()
    }
}

/// Step size for roughly `count` ticks across [start, stop]. Returns
/// the step directly when it is >= 1, or the negated reciprocal for
/// sub-1 steps so callers can divide instead of multiply.
fn tick_increment(start: f64, stop: f64, count: usize) -> f64 {
    let step = (stop - start) / count.max(1) as f64;
    let power = step.log10().floor();
    let error = step / 10f64.powf(power);
    let factor = if error >= TICK_E10 {
        10.0
    } else if error >= TICK_E5 {
        5.0
    } else if error >= TICK_E2 {
        2.0
    } else {
        1.0
    };
    if power >= 0.0 {
        factor * 10f64.powf(power)
    } else {
        -(10f64.powf(-power)) / factor
    }
}

/// Formats a tick value with the decimal places implied by the step.
#[must_use]
pub fn format_tick(value: f64, step: f64) -> String {
    let decimals = if step > 0.0 && step < 1.0 {
        (-step.log10().floor()) as usize
    } else {
        0
    };
    format!("{value:.decimals$}")
}

/// Discrete categories mapped onto contiguous pixel bands with inner
/// and outer padding expressed as a fraction of the band step.
#[derive(Debug, Clone)]
pub struct BandScale {
    domain: Vec<String>,
    step: f64,
    bandwidth: f64,
    start: f64,
}

impl BandScale {
    #[must_use]
    pub fn new(domain: Vec<String>, range: (f64, f64), padding: f64) -> Self {
        let n = domain.len() as f64;
        let (r0, r1) = range;
        let span = r1 - r0;
        let step = span / (n - padding + 2.0 * padding).max(1.0);
        let bandwidth = step * (1.0 - padding);
        let start = r0 + (span - step * (n - padding)) * 0.5;
        Self {
            domain,
            step,
            bandwidth,
            start,
        }
    }

    #[must_use]
    pub fn domain(&self) -> &[String] {
        &self.domain
    }

    /// Width of one band in pixels.
    #[must_use]
    pub fn bandwidth(&self) -> f64 {
        self.bandwidth
    }

    /// Distance between the left edges of adjacent bands.
    #[must_use]
    pub fn step(&self) -> f64 {
        self.step
    }

    /// Left edge of the band for `key`, or None for an unknown key.
    #[must_use]
    pub fn position(&self, key: &str) -> Option<f64> {
        let index = self.domain.iter().position(|k| k == key)?;
        Some(self.start + self.step * index as f64)
    }

    /// Center of the band for `key`, where its axis tick sits.
    #[must_use]
    pub fn center(&self, key: &str) -> Option<f64> {
        Some(self.position(key)? + self.bandwidth / 2.0)
    }
}

/// Calendar tick spacing for `TimeScale::ticks`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TickInterval {
    Days(u32),
    Weeks,
    Months(u32),
    Years(i32),
}

/// Candidate intervals ordered by nominal width in days. Spans wider
/// than a year per tick fall through to multi-year steps.
const TICK_INTERVALS: [(TickInterval, f64); 6] = [
    (TickInterval::Days(1), 1.0),
    (TickInterval::Days(2), 2.0),
    (TickInterval::Weeks, 7.0),
    (TickInterval::Months(1), DAYS_PER_MONTH),
    (TickInterval::Months(3), 3.0 * DAYS_PER_MONTH),
    (TickInterval::Years(1), DAYS_PER_YEAR),
];

/// Calendar dates mapped linearly onto a pixel range.
#[derive(Debug, Clone, Copy)]
pub struct TimeScale {
    domain: (NaiveDate, NaiveDate),
    inner: LinearScale,
}

impl TimeScale {
    #[must_use]
    pub fn new(domain: (NaiveDate, NaiveDate), range: (f64, f64)) -> Self {
        let inner = LinearScale::new((day_number(domain.0), day_number(domain.1)), range);
        Self { domain, inner }
    }

    #[must_use]
    pub fn domain(&self) -> (NaiveDate, NaiveDate) {
        self.domain
    }

    #[must_use]
    pub fn scale(&self, date: NaiveDate) -> f64 {
        self.inner.scale(day_number(date))
    }

    /// Roughly `count` calendar-aligned ticks inside the domain with
    /// preformatted labels. Day and week ticks use "%b %d" labels,
    /// month and coarser ticks use "%b %Y".
    #[must_use]
    pub fn ticks(&self, count: usize) -> Vec<(NaiveDate, String)> {
        let (start, stop) = self.domain;
        if count == 0 || stop < start {
            return Vec::new();
        }
        let span = day_number(stop) - day_number(start);
        let target = span / count.max(1) as f64;
        let interval = choose_interval(target, count, span);
        let format = match interval {
            TickInterval::Days(_) | TickInterval::Weeks => "%b %d",
            TickInterval::Months(_) | TickInterval::Years(_) => "%b %Y",
        };
        let mut out = Vec::new();
        let mut date = start;
        loop {
            if is_tick_boundary(date, interval) {
                out.push((date, date.format(format).to_string()));
            }
            date = match next_candidate(date, interval) {
                Some(next) => next,
                None => break,
            };
            if date > stop {
                break;
            }
        }
        out
    }
}

/// Picks the interval whose nominal width is log-closest to the
/// target, falling through to multi-year steps for very wide spans.
fn choose_interval(target: f64, count: usize, span: f64) -> TickInterval {
    let upper = TICK_INTERVALS.iter().position(|&(_, width)| width >= target);
    match upper {
        Some(0) => TICK_INTERVALS[0].0,
        Some(i) => {
            let (lower_interval, lower_width) = TICK_INTERVALS[i - 1];
            let (upper_interval, upper_width) = TICK_INTERVALS[i];
            if target / lower_width < upper_width / target {
                lower_interval
            } else {
                upper_interval
            }
        }
        None => {
            let years = span / DAYS_PER_YEAR;
            let step = tick_increment(0.0, years, count).max(1.0);
            TickInterval::Years(step as i32)
        }
    }
}

fn is_tick_boundary(date: NaiveDate, interval: TickInterval) -> bool {
    match interval {
        TickInterval::Days(step) => date.day0() % step == 0,
        TickInterval::Weeks => date.weekday() == Weekday::Sun,
        TickInterval::Months(step) => date.day() == 1 && date.month0() % step == 0,
        TickInterval::Years(step) => {
            date.day() == 1 && date.month() == 1 && date.year() % step == 0
        }
    }
}

/// Next date to test for a tick boundary. Fine intervals walk day by
/// day; month and year intervals jump between month starts.
fn next_candidate(date: NaiveDate, interval: TickInterval) -> Option<NaiveDate> {
    match interval {
        TickInterval::Days(_) | TickInterval::Weeks => date.succ_opt(),
        TickInterval::Months(_) | TickInterval::Years(_) => {
            let month_start = NaiveDate::from_ymd_opt(date.year(), date.month(), 1)?;
            month_start.checked_add_months(Months::new(1))
        }
    }
}

fn day_number(date: NaiveDate) -> f64 {
    date.num_days_from_ce() as f64
}

/// [min, max] over the finite values only, like d3.extent. None when
/// nothing finite remains.
pub fn finite_extent<I>(values: I) -> Option<(f64, f64)>
where
    I: IntoIterator<Item = f64>,
{
    let mut extent: Option<(f64, f64)> = None;
    for v in values {
        if !v.is_finite() {
            continue;
        }
        extent = Some(match extent {
            None => (v, v),
            Some((lo, hi)) => (lo.min(v), hi.max(v)),
        });
    }
    extent
}

/// [earliest, latest] over the present dates. None when every date is
/// missing.
pub fn date_extent<I>(dates: I) -> Option<(NaiveDate, NaiveDate)>
where
    I: IntoIterator<Item = Option<NaiveDate>>,
{
    let mut extent: Option<(NaiveDate, NaiveDate)> = None;
    for date in dates.into_iter().flatten() {
        extent = Some(match extent {
            None => (date, date),
            Some((lo, hi)) => (lo.min(date), hi.max(date)),
        });
    }
    extent
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_linear_scale_maps_endpoints() {
        let scale = LinearScale::new((0.0, 10.0), (350.0, 50.0));
        assert!((scale.scale(0.0) - 350.0).abs() < 1e-9);
        assert!((scale.scale(10.0) - 50.0).abs() < 1e-9);
        assert!((scale.scale(5.0) - 200.0).abs() < 1e-9);
    }

    #[test]
    fn test_linear_scale_invert_roundtrip() {
        let scale = LinearScale::new((980.0, 1040.0), (60.0, 580.0));
        for value in [980.0, 997.5, 1013.25, 1040.0] {
            let back = scale.invert(scale.scale(value));
            assert!((back - value).abs() < 1e-9);
        }
    }

    #[test]
    fn test_linear_scale_propagates_nan() {
        let scale = LinearScale::new((0.0, 10.0), (0.0, 100.0));
        assert!(scale.scale(f64::NAN).is_nan());
    }

    #[test]
    fn test_degenerate_domain_yields_nan() {
        let scale = LinearScale::new((5.0, 5.0), (0.0, 100.0));
        assert!(scale.scale(5.0).is_nan());
        assert!(scale.scale(7.0).is_nan());
        // Clamping must not rescue a zero-width domain.
        let clamped = LinearScale::clamped((2.0, 2.0), (3.0, 20.0));
        assert!(clamped.scale(2.0).is_nan());
        assert!(clamped.scale(9.0).is_nan());
    }

    #[test]
    fn test_clamped_scale_bounds_output() {
        let scale = LinearScale::clamped((0.0, 2.0), (3.0, 20.0));
        assert!((scale.scale(-1.0) - 3.0).abs() < 1e-9);
        assert!((scale.scale(5.0) - 20.0).abs() < 1e-9);
        assert!((scale.scale(1.0) - 11.5).abs() < 1e-9);
    }

    #[test]
    fn test_clamped_scale_is_monotone() {
        let scale = LinearScale::clamped((0.0, 2.0), (3.0, 20.0));
        let mut last = f64::NEG_INFINITY;
        for i in 0..40 {
            let r = scale.scale(-0.5 + f64::from(i) * 0.1);
            assert!(r >= last);
            last = r;
        }
    }

    #[test]
    fn test_ticks_integer_steps() {
        let scale = LinearScale::new((0.0, 100.0), (0.0, 1.0));
        let ticks = scale.ticks(10);
        let expected: Vec<f64> = (0..=10).map(|i| f64::from(i) * 10.0).collect();
        assert_eq!(ticks, expected);
    }

    #[test]
    fn test_ticks_fractional_steps() {
        let scale = LinearScale::new((0.0, 0.55), (0.0, 1.0));
        let ticks = scale.ticks(5);
        assert_eq!(ticks.len(), 6);
        for (i, tick) in ticks.iter().enumerate() {
            assert!((tick - i as f64 / 10.0).abs() < 1e-12);
        }
    }

    #[test]
    fn test_ticks_stay_inside_domain() {
        let scale = LinearScale::new((1.3, 9.7), (0.0, 1.0));
        let ticks = scale.ticks(10);
        assert!(!ticks.is_empty());
        for tick in ticks {
            assert!(tick >= 1.3 && tick <= 9.7);
        }
    }

    #[test]
    fn test_tick_labels_match_step_precision() {
        assert_eq!(format_tick(0.5, 0.1), "0.5");
        assert_eq!(format_tick(40.0, 10.0), "40");
        assert_eq!(format_tick(0.25, 0.05), "0.25");
    }

    #[test]
    fn test_band_scale_geometry() {
        let months: Vec<String> = (1..=12)
            .map(|m| date(2020, m, 1).format("%B").to_string())
            .collect();
        let scale = BandScale::new(months, (60.0, 550.0), 0.1);
        // step = 490 / (12 - 0.1 + 0.2), bandwidth = step * 0.9
        assert!((scale.step() - 40.495_867_768_595_04).abs() < 1e-6);
        assert!((scale.bandwidth() - 36.446_280_991_735_534).abs() < 1e-6);
        assert!((scale.position("January").unwrap() - 64.049_586_776_859_51).abs() < 1e-6);
        let last = scale.position("December").unwrap();
        assert!(last + scale.bandwidth() <= 550.0 + 1e-6);
    }

    #[test]
    fn test_band_scale_unknown_key() {
        let scale = BandScale::new(vec!["January".to_string()], (0.0, 100.0), 0.1);
        assert!(scale.position("Smarch").is_none());
    }

    #[test]
    fn test_band_scale_empty_domain() {
        let scale = BandScale::new(Vec::new(), (0.0, 100.0), 0.1);
        assert!(scale.position("January").is_none());
        assert!(scale.bandwidth().is_finite());
    }

    #[test]
    fn test_time_scale_maps_endpoints() {
        let scale = TimeScale::new((date(2020, 1, 1), date(2020, 12, 31)), (0.0, 730.0));
        assert!((scale.scale(date(2020, 1, 1)) - 0.0).abs() < 1e-9);
        assert!((scale.scale(date(2020, 12, 31)) - 730.0).abs() < 1e-9);
        let mid = scale.scale(date(2020, 7, 1));
        assert!(mid > 300.0 && mid < 430.0);
    }

    #[test]
    fn test_time_ticks_one_year_monthly() {
        let scale = TimeScale::new((date(2020, 1, 1), date(2020, 12, 31)), (0.0, 1.0));
        let ticks = scale.ticks(10);
        assert_eq!(ticks.len(), 12);
        assert_eq!(ticks[0].0, date(2020, 1, 1));
        assert_eq!(ticks[0].1, "Jan 2020");
        assert_eq!(ticks[11].0, date(2020, 12, 1));
        for (tick, _) in &ticks {
            assert_eq!(tick.day(), 1);
        }
    }

    #[test]
    fn test_time_ticks_three_years_quarterly() {
        let scale = TimeScale::new((date(2020, 1, 1), date(2022, 12, 31)), (0.0, 1.0));
        let ticks = scale.ticks(10);
        assert_eq!(ticks.len(), 12);
        for (tick, _) in &ticks {
            assert_eq!(tick.day(), 1);
            assert!(matches!(tick.month(), 1 | 4 | 7 | 10));
        }
    }

    #[test]
    fn test_time_ticks_short_span_daily() {
        let scale = TimeScale::new((date(2020, 3, 1), date(2020, 3, 8)), (0.0, 1.0));
        let ticks = scale.ticks(10);
        assert!(!ticks.is_empty());
        assert_eq!(ticks[0].1, "Mar 01");
    }

    #[test]
    fn test_finite_extent_skips_nan() {
        let extent = finite_extent([1.5, f64::NAN, -2.0, 7.25]);
        assert_eq!(extent, Some((-2.0, 7.25)));
    }

    #[test]
    fn test_finite_extent_empty() {
        assert_eq!(finite_extent([f64::NAN, f64::INFINITY]), None);
        assert_eq!(finite_extent(std::iter::empty()), None);
    }

    #[test]
    fn test_date_extent_skips_missing() {
        let extent = date_extent([
            Some(date(2021, 6, 1)),
            None,
            Some(date(2020, 2, 14)),
            Some(date(2022, 9, 30)),
        ]);
        assert_eq!(extent, Some((date(2020, 2, 14), date(2022, 9, 30))));
    }
}

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

//! Sequential color mapping for continuous data values.
//!
//! Implements the viridis ramp as a table of anchor colors at each
//! decile with linear interpolation between neighboring anchors.

use plotters::style::RGBColor;

/// Viridis anchors at t = 0.0, 0.1, ..., 1.0 (dark purple to yellow).
const VIRIDIS_ANCHORS: [(u8, u8, u8); 11] = [
    (68, 1, 84),
    (72, 36, 117),
    (65, 68, 135),
    (53, 95, 141),
    (42, 120, 142),
    (33, 145, 140),
    (34, 168, 132),
    (68, 191, 112),
    (122, 209, 81),
    (189, 223, 38),
    (253, 231, 37),
];

/// Continuous numeric domain mapped onto the viridis gradient.
#[derive(Debug, Clone, Copy)]
pub struct SequentialScale {
    domain: (f64, f64),
}

impl SequentialScale {
    #[must_use]
    pub fn viridis(domain: (f64, f64)) -> Self {
        Self { domain }
    }

    #[must_use]
    pub fn domain(&self) -> (f64, f64) {
        self.domain
    }

    /// Color for a domain value, or None when the value or domain is
    /// not finite. A zero-width domain pins every value to the middle
    /// of the ramp.
    #[must_use]
    pub fn color(&self, value: f64) -> Option<RGBColor> {
        let (d0, d1) = self.domain;
        if !value.is_finite() || !d0.is_finite() || !d1.is_finite() {
            return None;
        }
        let span = d1 - d0;
        let t = if span == 0.0 {
            0.5
        } else {
            ((value - d0) / span).clamp(0.0, 1.0)
        };
        Some(viridis(t))
    }
}

/// Samples the viridis ramp at `t` in [0, 1]; out-of-range values are
/// clamped and non-finite values take the low end.
#[must_use]
pub fn viridis(t: f64) -> RGBColor {
    let t = if t.is_finite() { t.clamp(0.0, 1.0) } else { 0.0 };
    let scaled = t * (VIRIDIS_ANCHORS.len() - 1) as f64;
    let index = (scaled.floor() as usize).min(VIRIDIS_ANCHORS.len() - 2);
    let frac = scaled - index as f64;
    let (r0, g0, b0) = VIRIDIS_ANCHORS[index];
    let (r1, g1, b1) = VIRIDIS_ANCHORS[index + 1];
    RGBColor(
        lerp_channel(r0, r1, frac),
        lerp_channel(g0, g1, frac),
        lerp_channel(b0, b1, frac),
    )
}

fn lerp_channel(a: u8, b: u8, t: f64) -> u8 {
    (f64::from(a) + (f64::from(b) - f64::from(a)) * t).round() as u8
}

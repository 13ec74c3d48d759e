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

//! Axis rendering: domain line with end caps, tick marks, and tick
//! labels. Ticks with a non-finite position are skipped.

use plotters::element::{PathElement, Text};
use plotters::style::text_anchor::{HPos, VPos};
use plotters::style::{Color, BLACK};

use crate::chart::{draw_error, label_style, px, ChartError, SvgArea, TICK_FONT_SIZE};

/// Outward length of a tick mark and of the domain end caps.
const TICK_LENGTH: f64 = 6.0;
/// Distance from the axis line to the near edge of a tick label.
const TICK_LABEL_GAP: f64 = 9.0;

/// One axis tick: a pixel position along the axis and its label.
#[derive(Debug, Clone)]
pub struct Tick {
    pub position: f64,
    pub label: String,
}

impl Tick {
    #[must_use]
    pub fn new(position: f64, label: impl Into<String>) -> Self {
        Self {
            position,
            label: label.into(),
        }
    }
}

/// Horizontal axis along `baseline`, tick marks pointing down and
/// labels centered below them.
pub fn draw_bottom_axis(
    area: &SvgArea<'_>,
    range: (f64, f64),
    baseline: f64,
    ticks: &[Tick],
) -> Result<(), ChartError> {
    let stroke = BLACK.stroke_width(1);
    let y = px(baseline);
    let cap = px(baseline + TICK_LENGTH);
    area.draw(&PathElement::new(
        vec![
            (px(range.0), cap),
            (px(range.0), y),
            (px(range.1), y),
            (px(range.1), cap),
        ],
        stroke,
    ))
    .map_err(draw_error)?;

    for tick in ticks {
        if !tick.position.is_finite() {
            continue;
        }
        let x = px(tick.position);
        area.draw(&PathElement::new(vec![(x, y), (x, cap)], stroke))
            .map_err(draw_error)?;
        area.draw(&Text::new(
            tick.label.as_str(),
            (x, px(baseline + TICK_LABEL_GAP)),
            label_style(TICK_FONT_SIZE, HPos::Center, VPos::Top),
        ))
        .map_err(draw_error)?;
    }
    Ok(())
}

/// Vertical axis along `baseline`, tick marks pointing left and
/// labels right-aligned beside them.
pub fn draw_left_axis(
    area: &SvgArea<'_>,
    range: (f64, f64),
    baseline: f64,
    ticks: &[Tick],
) -> Result<(), ChartError> {
    let stroke = BLACK.stroke_width(1);
    let x = px(baseline);
    let cap = px(baseline - TICK_LENGTH);
    area.draw(&PathElement::new(
        vec![
            (cap, px(range.0)),
            (x, px(range.0)),
            (x, px(range.1)),
            (cap, px(range.1)),
        ],
        stroke,
    ))
    .map_err(draw_error)?;

    for tick in ticks {
        if !tick.position.is_finite() {
            continue;
        }
        let y = px(tick.position);
        area.draw(&PathElement::new(vec![(cap, y), (x, y)], stroke))
            .map_err(draw_error)?;
        area.draw(&Text::new(
            tick.label.as_str(),
            (px(baseline - TICK_LABEL_GAP), y),
            label_style(TICK_FONT_SIZE, HPos::Right, VPos::Center),
        ))
        .map_err(draw_error)?;
    }
    Ok(())
}

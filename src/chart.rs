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

//! Shared chart chrome for the three SVG renderers.
//!
//! Canvas margins, the chart palette, font sizing, text style
//! builders, and the drawing error type live here so the renderers
//! agree on their look.

use plotters::coord::Shift;
use plotters::drawing::{DrawingArea, DrawingAreaErrorKind};
use plotters::prelude::SVGBackend;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use plotters::style::{FontStyle, FontTransform, IntoFont, RGBColor, TextStyle, BLACK};
use thiserror::Error;

pub const STEELBLUE: RGBColor = RGBColor(70, 130, 180);
pub const ORANGE: RGBColor = RGBColor(255, 165, 0);

pub const FONT_FAMILY: &str = "sans-serif";
pub const TICK_FONT_SIZE: u32 = 10;
pub const AXIS_TITLE_FONT_SIZE: u32 = 16;
pub const LEGEND_FONT_SIZE: u32 = 12;

/// A drawing surface backed by an in-memory SVG document.
pub type SvgArea<'a> = DrawingArea<SVGBackend<'a>, Shift>;

#[derive(Debug, Error)]
pub enum ChartError {
    #[error("failed to draw chart: {0}")]
    Draw(String),
}

/// Flattens a plotters drawing failure into the chart error.
pub(crate) fn draw_error<E>(err: DrawingAreaErrorKind<E>) -> ChartError
where
    E: std::error::Error + Send + Sync,
{
    ChartError::Draw(err.to_string())
}

/// Pixel margins around a chart's plot area.
#[derive(Debug, Clone, Copy)]
pub struct Margin {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

impl Margin {
    #[must_use]
    pub const fn new(top: f64, right: f64, bottom: f64, left: f64) -> Self {
        Self {
            top,
            right,
            bottom,
            left,
        }
    }
}

/// Rounds a screen coordinate to backend pixels. Callers skip
/// non-finite values before rounding.
pub(crate) fn px(value: f64) -> i32 {
    value.round() as i32
}

/// Plain black label anchored at the given corner of its position.
pub(crate) fn label_style(size: u32, h: HPos, v: VPos) -> TextStyle<'static> {
    (FONT_FAMILY, size)
        .into_font()
        .color(&BLACK)
        .pos(Pos::new(h, v))
}

/// Bold variant of `label_style`, used for legend captions.
pub(crate) fn bold_label_style(size: u32, h: HPos, v: VPos) -> TextStyle<'static> {
    (FONT_FAMILY, size)
        .into_font()
        .style(FontStyle::Bold)
        .color(&BLACK)
        .pos(Pos::new(h, v))
}

/// Label rotated a quarter turn counterclockwise, for y-axis titles.
pub(crate) fn rotated_label_style(size: u32) -> TextStyle<'static> {
    (FONT_FAMILY, size)
        .into_font()
        .transform(FontTransform::Rotate270)
        .color(&BLACK)
        .pos(Pos::new(HPos::Center, VPos::Center))
}

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

//! Bar chart of total precipitation per month.
//!
//! Months appear in first-seen dataset order on a padded band scale;
//! bar height comes from the summed precipitation on a linear scale
//! anchored at zero.

use plotters::element::{Rectangle, Text};
use plotters::prelude::{IntoDrawingArea, SVGBackend};
use plotters::style::text_anchor::{HPos, VPos};
use plotters::style::Color;

use crate::axis::{draw_bottom_axis, draw_left_axis, Tick};
use crate::chart::{
    bold_label_style, draw_error, label_style, px, rotated_label_style, ChartError, Margin,
    SvgArea, AXIS_TITLE_FONT_SIZE, LEGEND_FONT_SIZE, STEELBLUE,
};
use crate::dataset::{monthly_precip_totals, DailyWeather, MonthlyPrecip};
use crate::scale::{finite_extent, BandScale, LinearScale};

const WIDTH: u32 = 600;
const HEIGHT: u32 = 400;
const MARGIN: Margin = Margin::new(50.0, 50.0, 50.0, 60.0);
const BAND_PADDING: f64 = 0.1;
const Y_TICK_TARGET: usize = 10;
const LEGEND_SWATCH: f64 = 18.0;

/// One bar's pixel geometry.
#[derive(Debug, Clone)]
pub struct Bar {
    pub month: String,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

/// Computed chart geometry, kept separate from drawing so the numbers
/// can be checked without parsing SVG.
#[derive(Debug, Clone)]
pub struct BarLayout {
    pub months: Vec<MonthlyPrecip>,
    pub x: BandScale,
    pub y: LinearScale,
    pub bars: Vec<Bar>,
}

/// Aggregates the rows and positions one bar per month.
#[must_use]
pub fn layout(rows: &[DailyWeather]) -> BarLayout {
    let months = monthly_precip_totals(rows);
    let domain: Vec<String> = months.iter().map(|m| m.month.clone()).collect();
    let x = BandScale::new(
        domain,
        (MARGIN.left, f64::from(WIDTH) - MARGIN.right),
        BAND_PADDING,
    );
    let baseline = f64::from(HEIGHT) - MARGIN.bottom;
    let y_max = finite_extent(months.iter().map(|m| m.total)).map_or(f64::NAN, |(_, hi)| hi);
    let y = LinearScale::new((0.0, y_max), (baseline, MARGIN.top));

    let bars = months
        .iter()
        .filter_map(|m| {
            let x_pos = x.position(&m.month)?;
            let y_pos = y.scale(m.total);
            if !y_pos.is_finite() {
                return None;
            }
            Some(Bar {
                month: m.month.clone(),
                x: x_pos,
                y: y_pos,
                width: x.bandwidth(),
                height: baseline - y_pos,
            })
        })
        .collect();

    BarLayout { months, x, y, bars }
}

/// Renders the chart as a standalone SVG document.
pub fn render(rows: &[DailyWeather]) -> Result<String, ChartError> {
    let chart = layout(rows);
    let mut document = String::new();
    {
        let root = SVGBackend::with_string(&mut document, (WIDTH, HEIGHT)).into_drawing_area();
        draw(&root, &chart)?;
        root.present().map_err(draw_error)?;
    }
    Ok(document)
}

fn draw(area: &SvgArea<'_>, chart: &BarLayout) -> Result<(), ChartError> {
    for bar in &chart.bars {
        area.draw(&Rectangle::new(
            [
                (px(bar.x), px(bar.y)),
                (px(bar.x + bar.width), px(bar.y + bar.height)),
            ],
            STEELBLUE.filled(),
        ))
        .map_err(draw_error)?;
    }

    let baseline = f64::from(HEIGHT) - MARGIN.bottom;
    let x_ticks: Vec<Tick> = chart
        .months
        .iter()
        .filter_map(|m| Some(Tick::new(chart.x.center(&m.month)?, m.month.clone())))
        .collect();
    draw_bottom_axis(
        area,
        (MARGIN.left, f64::from(WIDTH) - MARGIN.right),
        baseline,
        &x_ticks,
    )?;

    let y_values = chart.y.ticks(Y_TICK_TARGET);
    let y_labels = chart.y.tick_labels(&y_values);
    let y_ticks: Vec<Tick> = y_values
        .iter()
        .zip(y_labels)
        .map(|(&value, label)| Tick::new(chart.y.scale(value), label))
        .collect();
    draw_left_axis(area, chart.y.range(), MARGIN.left, &y_ticks)?;

    area.draw(&Text::new(
        "Month",
        (px(f64::from(WIDTH) / 2.0), px(f64::from(HEIGHT) - 5.0)),
        label_style(AXIS_TITLE_FONT_SIZE, HPos::Center, VPos::Bottom),
    ))
    .map_err(draw_error)?;
    area.draw(&Text::new(
        "Total Precipitation",
        (px(MARGIN.left - 40.0), px(f64::from(HEIGHT) / 2.0)),
        rotated_label_style(AXIS_TITLE_FONT_SIZE),
    ))
    .map_err(draw_error)?;

    // Legend: one swatch in the top right corner with its caption.
    let legend_x = f64::from(WIDTH) - MARGIN.right;
    let legend_y = MARGIN.top;
    area.draw(&Rectangle::new(
        [
            (px(legend_x), px(legend_y - 10.0)),
            (px(legend_x + LEGEND_SWATCH), px(legend_y - 10.0 + LEGEND_SWATCH)),
        ],
        STEELBLUE.filled(),
    ))
    .map_err(draw_error)?;
    area.draw(&Text::new(
        "Monthly Precipitation",
        (px(legend_x - 80.0), px(legend_y - 30.0)),
        bold_label_style(LEGEND_FONT_SIZE, HPos::Left, VPos::Center),
    ))
    .map_err(draw_error)?;

    Ok(())
}

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

//! Scatter plot of pressure against dewpoint.
//!
//! Marker radius encodes precipitation on a clamped scale and marker
//! color encodes the daily temperature spread on the viridis ramp. A
//! row with a non-finite position, radius, or color input draws no
//! marker. Two legends: a vertical color ramp and reference bubbles
//! for the radius scale.

use plotters::element::{Circle, PathElement, Rectangle, Text};
use plotters::prelude::{IntoDrawingArea, SVGBackend};
use plotters::style::text_anchor::{HPos, VPos};
use plotters::style::{Color, RGBColor, BLACK};

use crate::axis::{draw_bottom_axis, draw_left_axis, Tick};
use crate::chart::{
    bold_label_style, draw_error, label_style, px, rotated_label_style, ChartError, Margin,
    SvgArea, AXIS_TITLE_FONT_SIZE, LEGEND_FONT_SIZE, TICK_FONT_SIZE,
};
use crate::color::{viridis, SequentialScale};
use crate::dataset::DailyWeather;
use crate::scale::{finite_extent, LinearScale};

const WIDTH: u32 = 600;
const HEIGHT: u32 = 400;
const MARGIN: Margin = Margin::new(50.0, 20.0, 50.0, 60.0);
const RADIUS_RANGE: (f64, f64) = (3.0, 20.0);
const MARKER_OPACITY: f64 = 0.8;
const TICK_TARGET: usize = 10;

const COLOR_LEGEND_X: f64 = 500.0;
const COLOR_LEGEND_Y: f64 = 20.0;
const COLOR_BAR_WIDTH: f64 = 20.0;
const COLOR_BAR_HEIGHT: f64 = 100.0;
const COLOR_BAR_SLICES: usize = 25;

const SIZE_LEGEND_X: f64 = 70.0;
const SIZE_LEGEND_Y: f64 = 340.0;
const SIZE_LEGEND_ROW_STEP: f64 = 40.0;
const SIZE_REFERENCE_VALUES: [f64; 3] = [1.0, 3.0, 5.0];

/// One marker's pixel geometry and fill.
#[derive(Debug, Clone)]
pub struct Marker {
    pub x: f64,
    pub y: f64,
    pub radius: f64,
    pub color: RGBColor,
}

/// Computed chart geometry.
#[derive(Debug, Clone)]
pub struct ScatterLayout {
    pub x: LinearScale,
    pub y: LinearScale,
    pub radius: LinearScale,
    pub color: SequentialScale,
    pub markers: Vec<Marker>,
}

/// Builds the four scales over the observed finite extents and places
/// one marker per usable row.
#[must_use]
pub fn layout(rows: &[DailyWeather]) -> ScatterLayout {
    let nan = (f64::NAN, f64::NAN);
    let x_domain = finite_extent(rows.iter().map(|r| r.pressure)).unwrap_or(nan);
    let y_domain = finite_extent(rows.iter().map(|r| r.dewpoint)).unwrap_or(nan);
    let radius_domain = finite_extent(rows.iter().map(|r| r.precip)).unwrap_or(nan);
    let color_domain = finite_extent(rows.iter().map(DailyWeather::temp_diff)).unwrap_or(nan);

    let x = LinearScale::new(x_domain, (MARGIN.left, f64::from(WIDTH) - MARGIN.right));
    let y = LinearScale::new(y_domain, (f64::from(HEIGHT) - MARGIN.bottom, MARGIN.top));
    let radius = LinearScale::clamped(radius_domain, RADIUS_RANGE);
    let color = SequentialScale::viridis(color_domain);

    let markers = rows
        .iter()
        .filter_map(|row| {
            let cx = x.scale(row.pressure);
            let cy = y.scale(row.dewpoint);
            let r = radius.scale(row.precip);
            let fill = color.color(row.temp_diff())?;
            if !cx.is_finite() || !cy.is_finite() || !r.is_finite() {
                return None;
            }
            Some(Marker {
                x: cx,
                y: cy,
                radius: r,
                color: fill,
            })
        })
        .collect();

    ScatterLayout {
        x,
        y,
        radius,
        color,
        markers,
    }
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

fn draw(area: &SvgArea<'_>, chart: &ScatterLayout) -> Result<(), ChartError> {
    for marker in &chart.markers {
        area.draw(&Circle::new(
            (px(marker.x), px(marker.y)),
            px(marker.radius),
            marker.color.mix(MARKER_OPACITY).filled(),
        ))
        .map_err(draw_error)?;
    }

    draw_axes(area, chart)?;
    draw_color_legend(area)?;
    draw_size_legend(area, &chart.radius)?;
    Ok(())
}

fn draw_axes(area: &SvgArea<'_>, chart: &ScatterLayout) -> Result<(), ChartError> {
    let baseline = f64::from(HEIGHT) - MARGIN.bottom;

    let x_values = chart.x.ticks(TICK_TARGET);
    let x_labels = chart.x.tick_labels(&x_values);
    let x_ticks: Vec<Tick> = x_values
        .iter()
        .zip(x_labels)
        .map(|(&value, label)| Tick::new(chart.x.scale(value), label))
        .collect();
    draw_bottom_axis(area, chart.x.range(), baseline, &x_ticks)?;

    let y_values = chart.y.ticks(TICK_TARGET);
    let y_labels = chart.y.tick_labels(&y_values);
    let y_ticks: Vec<Tick> = y_values
        .iter()
        .zip(y_labels)
        .map(|(&value, label)| Tick::new(chart.y.scale(value), label))
        .collect();
    draw_left_axis(area, chart.y.range(), MARGIN.left, &y_ticks)?;

    area.draw(&Text::new(
        "Pressure",
        (px(f64::from(WIDTH) / 2.0), px(f64::from(HEIGHT) - 5.0)),
        label_style(AXIS_TITLE_FONT_SIZE, HPos::Center, VPos::Bottom),
    ))
    .map_err(draw_error)?;
    area.draw(&Text::new(
        "Dewpoint",
        (px(MARGIN.left - 40.0), px(f64::from(HEIGHT) / 2.0)),
        rotated_label_style(AXIS_TITLE_FONT_SIZE),
    ))
    .map_err(draw_error)?;
    Ok(())
}

/// Vertical viridis ramp with its caption. The ramp is a stack of
/// thin slices sampling the colormap, low values at the top.
fn draw_color_legend(area: &SvgArea<'_>) -> Result<(), ChartError> {
    area.draw(&Text::new(
        "Difference in Max and Min Temperatures",
        (px(COLOR_LEGEND_X - 160.0), px(COLOR_LEGEND_Y - 10.0)),
        bold_label_style(LEGEND_FONT_SIZE, HPos::Left, VPos::Bottom),
    ))
    .map_err(draw_error)?;

    for slice in 0..COLOR_BAR_SLICES {
        let t0 = slice as f64 / COLOR_BAR_SLICES as f64;
        let t1 = (slice + 1) as f64 / COLOR_BAR_SLICES as f64;
        let fill = viridis((t0 + t1) / 2.0);
        area.draw(&Rectangle::new(
            [
                (px(COLOR_LEGEND_X), px(COLOR_LEGEND_Y + t0 * COLOR_BAR_HEIGHT)),
                (
                    px(COLOR_LEGEND_X + COLOR_BAR_WIDTH),
                    px(COLOR_LEGEND_Y + t1 * COLOR_BAR_HEIGHT),
                ),
            ],
            fill.filled(),
        ))
        .map_err(draw_error)?;
    }

    area.draw(&Text::new(
        "Low",
        (px(COLOR_LEGEND_X + 30.0), px(COLOR_LEGEND_Y + 10.0)),
        label_style(TICK_FONT_SIZE, HPos::Left, VPos::Bottom),
    ))
    .map_err(draw_error)?;
    area.draw(&Text::new(
        "High",
        (px(COLOR_LEGEND_X + 30.0), px(COLOR_LEGEND_Y + 95.0)),
        label_style(TICK_FONT_SIZE, HPos::Left, VPos::Bottom),
    ))
    .map_err(draw_error)?;
    Ok(())
}

/// Reference bubbles for the radius scale with leader lines and value
/// labels. Skipped entirely when the radius scale has no usable
/// domain.
fn draw_size_legend(area: &SvgArea<'_>, radius: &LinearScale) -> Result<(), ChartError> {
    area.draw(&Text::new(
        "Precipitation",
        (px(SIZE_LEGEND_X + 5.0), px(SIZE_LEGEND_Y - 130.0)),
        bold_label_style(TICK_FONT_SIZE, HPos::Left, VPos::Bottom),
    ))
    .map_err(draw_error)?;

    for (row, value) in SIZE_REFERENCE_VALUES.iter().enumerate() {
        let r = radius.scale(*value);
        if !r.is_finite() {
            continue;
        }
        let cx = SIZE_LEGEND_X + 30.0;
        let cy = SIZE_LEGEND_Y - 15.0 - SIZE_LEGEND_ROW_STEP * row as f64;
        area.draw(&Circle::new(
            (px(cx), px(cy)),
            px(r),
            BLACK.stroke_width(1),
        ))
        .map_err(draw_error)?;
        area.draw(&PathElement::new(
            vec![(px(cx + r), px(cy)), (px(SIZE_LEGEND_X + 60.0), px(cy))],
            BLACK.stroke_width(1),
        ))
        .map_err(draw_error)?;
        area.draw(&Text::new(
            format!("{value:.1}"),
            (px(SIZE_LEGEND_X + 65.0), px(cy + 5.0)),
            label_style(LEGEND_FONT_SIZE, HPos::Left, VPos::Bottom),
        ))
        .map_err(draw_error)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn row(precip: f64, pressure: f64, dewpoint: f64, tmax: f64, tmin: f64) -> DailyWeather {
        DailyWeather {
            date: NaiveDate::from_ymd_opt(2021, 6, 1),
            precip,
            pressure,
            dewpoint,
            temp_max: tmax,
            temp_min: tmin,
        }
    }

    fn fixture() -> Vec<DailyWeather> {
        vec![
            row(0.0, 990.0, 30.0, 50.0, 40.0),
            row(1.5, 1010.0, 45.0, 70.0, 45.0),
            row(4.0, 1030.0, 60.0, 90.0, 50.0),
        ]
    }

    // The SVG backend emits text content on its own line.
    fn text_node(label: &str) -> String {
        format!(">\n{label}\n<")
    }

    #[test]
    fn test_domains_match_observed_extents() {
        let chart = layout(&fixture());
        assert_eq!(chart.x.domain(), (990.0, 1030.0));
        assert_eq!(chart.y.domain(), (30.0, 60.0));
        assert_eq!(chart.radius.domain(), (0.0, 4.0));
        assert_eq!(chart.color.domain(), (10.0, 40.0));
    }

    #[test]
    fn test_radius_bounded_and_monotone() {
        let chart = layout(&fixture());
        let mut last = 0.0;
        for precip in [0.0, 0.5, 1.0, 2.0, 4.0, 9.0] {
            let r = chart.radius.scale(precip);
            assert!(r >= RADIUS_RANGE.0 && r <= RADIUS_RANGE.1);
            assert!(r >= last);
            last = r;
        }
    }

    #[test]
    fn test_color_spans_the_ramp() {
        let chart = layout(&fixture());
        // Smallest and largest temperature spreads hit the ramp ends.
        assert_eq!(chart.markers[0].color, viridis(0.0));
        assert_eq!(chart.markers[2].color, viridis(1.0));
    }

    #[test]
    fn test_malformed_rows_draw_no_marker() {
        let mut rows = fixture();
        rows.push(row(1.0, f64::NAN, 40.0, 60.0, 50.0));
        rows.push(row(f64::NAN, 1000.0, 40.0, 60.0, 50.0));
        let chart = layout(&rows);
        assert_eq!(chart.markers.len(), 3);
    }

    #[test]
    fn test_render_svg_markers_and_reference_bubbles() {
        let svg = render(&fixture()).unwrap();
        // Three markers plus three reference bubbles.
        assert_eq!(svg.matches("<circle").count(), 6);
        assert!(svg.contains("opacity=\"0.8\""));
        assert!(svg.contains(&text_node("Pressure")));
        assert!(svg.contains(&text_node("Dewpoint")));
        assert!(svg.contains("Difference in Max and Min Temperatures"));
        assert!(svg.contains(&text_node("Precipitation")));
        assert!(svg.contains(&text_node("Low")));
        assert!(svg.contains(&text_node("High")));
        assert!(svg.contains(&text_node("1.0")));
        assert!(svg.contains(&text_node("5.0")));
    }

    #[test]
    fn test_render_marker_fills_span_viridis() {
        let svg = render(&fixture()).unwrap().to_ascii_lowercase();
        assert!(svg.contains("#440154"));
        assert!(svg.contains("#fde725"));
    }

    #[test]
    fn test_render_empty_dataset_keeps_captions() {
        let svg = render(&[]).unwrap();
        assert_eq!(svg.matches("<circle").count(), 0);
        assert!(svg.contains("Difference in Max and Min Temperatures"));
        assert!(svg.contains(&text_node("Precipitation")));
    }
}

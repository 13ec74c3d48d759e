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

//! Line graph of daily maximum and minimum temperature over time.
//!
//! The canvas spans the viewport width fixed at render time; both
//! series share one temperature scale from the coldest minimum to the
//! hottest maximum. Points with a missing date or a non-finite
//! temperature are skipped.

use plotters::element::{PathElement, Text};
use plotters::prelude::{IntoDrawingArea, SVGBackend};
use plotters::style::text_anchor::{HPos, VPos};
use plotters::style::Color;

use crate::axis::{draw_bottom_axis, draw_left_axis, Tick};
use crate::chart::{
    draw_error, label_style, px, rotated_label_style, ChartError, Margin, SvgArea,
    AXIS_TITLE_FONT_SIZE, ORANGE, STEELBLUE,
};
use crate::dataset::DailyWeather;
use crate::scale::{date_extent, finite_extent, LinearScale, TimeScale};

pub const DEFAULT_VIEWPORT_WIDTH: u32 = 1280;

const HEIGHT: u32 = 350;
const MARGIN: Margin = Margin::new(10.0, 80.0, 50.0, 80.0);
const SERIES_STROKE_WIDTH: u32 = 2;
const TICK_TARGET: usize = 10;
const LEGEND_LINE_LENGTH: f64 = 30.0;

/// Computed chart geometry. The time scale is absent when no row has
/// a parseable date, which leaves both series empty.
#[derive(Debug, Clone)]
pub struct LineLayout {
    pub width: u32,
    pub x: Option<TimeScale>,
    pub y: LinearScale,
    pub max_series: Vec<(f64, f64)>,
    pub min_series: Vec<(f64, f64)>,
}

/// Builds both series in dataset order over the shared scales.
#[must_use]
pub fn layout(rows: &[DailyWeather], viewport_width: u32) -> LineLayout {
    let plot_right = f64::from(viewport_width) - MARGIN.right;
    let y_domain = match (
        finite_extent(rows.iter().map(|r| r.temp_min)),
        finite_extent(rows.iter().map(|r| r.temp_max)),
    ) {
        (Some((coldest, _)), Some((_, hottest))) => (coldest, hottest),
        _ => (f64::NAN, f64::NAN),
    };
    let y = LinearScale::new(y_domain, (f64::from(HEIGHT) - MARGIN.bottom, MARGIN.top));
    let x = date_extent(rows.iter().map(|r| r.date))
        .map(|domain| TimeScale::new(domain, (MARGIN.left, plot_right)));

    let (max_series, min_series) = match &x {
        Some(xs) => (
            series_points(rows, xs, &y, |r| r.temp_max),
            series_points(rows, xs, &y, |r| r.temp_min),
        ),
        None => (Vec::new(), Vec::new()),
    };

    LineLayout {
        width: viewport_width,
        x,
        y,
        max_series,
        min_series,
    }
}

fn series_points<F>(
    rows: &[DailyWeather],
    x: &TimeScale,
    y: &LinearScale,
    value: F,
) -> Vec<(f64, f64)>
where
    F: Fn(&DailyWeather) -> f64,
{
    rows.iter()
        .filter_map(|row| {
            let date = row.date?;
            let sx = x.scale(date);
            let sy = y.scale(value(row));
            (sx.is_finite() && sy.is_finite()).then_some((sx, sy))
        })
        .collect()
}

/// Renders the chart as a standalone SVG document.
pub fn render(rows: &[DailyWeather], viewport_width: u32) -> Result<String, ChartError> {
    let chart = layout(rows, viewport_width);
    let mut document = String::new();
    {
        let root =
            SVGBackend::with_string(&mut document, (chart.width, HEIGHT)).into_drawing_area();
        draw(&root, &chart)?;
        root.present().map_err(draw_error)?;
    }
    Ok(document)
}

fn draw(area: &SvgArea<'_>, chart: &LineLayout) -> Result<(), ChartError> {
    for (points, color) in [
        (&chart.max_series, STEELBLUE),
        (&chart.min_series, ORANGE),
    ] {
        if points.len() < 2 {
            continue;
        }
        let path: Vec<(i32, i32)> = points.iter().map(|&(x, y)| (px(x), px(y))).collect();
        area.draw(&PathElement::new(
            path,
            color.stroke_width(SERIES_STROKE_WIDTH),
        ))
        .map_err(draw_error)?;
    }

    draw_axes(area, chart)?;
    draw_legend(area, chart)?;
    Ok(())
}

fn draw_axes(area: &SvgArea<'_>, chart: &LineLayout) -> Result<(), ChartError> {
    let baseline = f64::from(HEIGHT) - MARGIN.bottom;
    let plot_right = f64::from(chart.width) - MARGIN.right;

    let x_ticks: Vec<Tick> = match &chart.x {
        Some(xs) => xs
            .ticks(TICK_TARGET)
            .into_iter()
            .map(|(date, label)| Tick::new(xs.scale(date), label))
            .collect(),
        None => Vec::new(),
    };
    draw_bottom_axis(area, (MARGIN.left, plot_right), baseline, &x_ticks)?;

    let y_values = chart.y.ticks(TICK_TARGET);
    let y_labels = chart.y.tick_labels(&y_values);
    let y_ticks: Vec<Tick> = y_values
        .iter()
        .zip(y_labels)
        .map(|(&value, label)| Tick::new(chart.y.scale(value), label))
        .collect();
    draw_left_axis(area, chart.y.range(), MARGIN.left, &y_ticks)?;

    area.draw(&Text::new(
        "Date",
        (
            px((MARGIN.left + plot_right) / 2.0),
            px(f64::from(HEIGHT) - 15.0),
        ),
        label_style(AXIS_TITLE_FONT_SIZE, HPos::Center, VPos::Bottom),
    ))
    .map_err(draw_error)?;
    area.draw(&Text::new(
        "Temperature (°F)",
        (px(16.0), px((MARGIN.top + baseline) / 2.0)),
        rotated_label_style(AXIS_TITLE_FONT_SIZE),
    ))
    .map_err(draw_error)?;
    Ok(())
}

fn draw_legend(area: &SvgArea<'_>, chart: &LineLayout) -> Result<(), ChartError> {
    let legend_x = f64::from(chart.width) - MARGIN.right - 80.0;
    for (row, (label, color)) in [("Max Temperature", STEELBLUE), ("Min Temperature", ORANGE)]
        .into_iter()
        .enumerate()
    {
        let y = 25.0 + 20.0 * row as f64;
        area.draw(&PathElement::new(
            vec![
                (px(legend_x), px(y)),
                (px(legend_x + LEGEND_LINE_LENGTH), px(y)),
            ],
            color.stroke_width(SERIES_STROKE_WIDTH),
        ))
        .map_err(draw_error)?;
        area.draw(&Text::new(
            label,
            (px(legend_x + LEGEND_LINE_LENGTH + 5.0), px(y + 4.0)),
            label_style(AXIS_TITLE_FONT_SIZE, HPos::Left, VPos::Center),
        ))
        .map_err(draw_error)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn row(date: &str, tmax: f64, tmin: f64) -> DailyWeather {
        DailyWeather {
            date: NaiveDate::parse_from_str(date, "%Y-%m-%d").ok(),
            precip: 0.0,
            pressure: 1013.0,
            dewpoint: 40.0,
            temp_max: tmax,
            temp_min: tmin,
        }
    }

    fn fixture() -> Vec<DailyWeather> {
        vec![
            row("2021-01-01", 52.0, 33.0),
            row("2021-04-01", 71.0, 48.0),
            row("2021-07-01", 93.0, 72.0),
            row("2021-10-01", 68.0, 47.0),
        ]
    }

    // The SVG backend emits text content on its own line.
    fn text_node(label: &str) -> String {
        format!(">\n{label}\n<")
    }

    #[test]
    fn test_y_domain_spans_min_to_max() {
        let chart = layout(&fixture(), DEFAULT_VIEWPORT_WIDTH);
        assert_eq!(chart.y.domain(), (33.0, 93.0));
    }

    #[test]
    fn test_x_domain_spans_observed_dates() {
        let chart = layout(&fixture(), DEFAULT_VIEWPORT_WIDTH);
        let x = chart.x.expect("fixture has dates");
        let first = NaiveDate::from_ymd_opt(2021, 1, 1).unwrap();
        let last = NaiveDate::from_ymd_opt(2021, 10, 1).unwrap();
        assert_eq!(x.domain(), (first, last));
    }

    #[test]
    fn test_series_follow_dataset_order() {
        let chart = layout(&fixture(), DEFAULT_VIEWPORT_WIDTH);
        assert_eq!(chart.max_series.len(), 4);
        assert_eq!(chart.min_series.len(), 4);
        for pair in chart.max_series.windows(2) {
            assert!(pair[0].0 < pair[1].0);
        }
    }

    #[test]
    fn test_min_series_sits_below_max_series() {
        let chart = layout(&fixture(), DEFAULT_VIEWPORT_WIDTH);
        for (max_point, min_point) in chart.max_series.iter().zip(&chart.min_series) {
            // The y range is inverted, colder means larger pixels.
            assert!(min_point.1 > max_point.1);
        }
    }

    #[test]
    fn test_skips_rows_without_usable_values() {
        let mut rows = fixture();
        rows.push(row("not-a-date", 60.0, 40.0));
        rows.push(row("2021-11-01", f64::NAN, 41.0));
        let chart = layout(&rows, DEFAULT_VIEWPORT_WIDTH);
        assert_eq!(chart.max_series.len(), 4);
        assert_eq!(chart.min_series.len(), 5);
    }

    #[test]
    fn test_no_dates_means_no_series() {
        let rows = vec![row("bogus", 60.0, 40.0)];
        let chart = layout(&rows, DEFAULT_VIEWPORT_WIDTH);
        assert!(chart.x.is_none());
        assert!(chart.max_series.is_empty());
        assert!(chart.min_series.is_empty());
    }

    #[test]
    fn test_render_draws_both_series_and_legend() {
        let svg = render(&fixture(), DEFAULT_VIEWPORT_WIDTH).unwrap();
        // Two series plus two legend lines carry the series stroke.
        assert_eq!(svg.matches("stroke-width=\"2\"").count(), 4);
        let lower = svg.to_ascii_lowercase();
        assert!(lower.contains("#4682b4"));
        assert!(lower.contains("#ffa500"));
        assert!(svg.contains("Max Temperature"));
        assert!(svg.contains("Min Temperature"));
        assert!(svg.contains(&text_node("Date")));
        assert!(svg.contains("Temperature (°F)"));
    }

    #[test]
    fn test_render_empty_dataset_keeps_chrome() {
        let svg = render(&[], DEFAULT_VIEWPORT_WIDTH).unwrap();
        // Only the legend lines carry the series stroke.
        assert_eq!(svg.matches("stroke-width=\"2\"").count(), 2);
        assert!(svg.contains(&text_node("Date")));
    }

    #[test]
    fn test_viewport_width_sets_canvas_width() {
        let svg = render(&fixture(), 900).unwrap();
        assert!(svg.contains("width=\"900\""));
    }
}

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

//! Weather dataset loading, coercion, and aggregation.
//!
//! The input is one CSV file of daily observations with the columns
//! Date, Precip, Pressure, Dewpoint, TempMax, TempMin. Cells are read
//! as text and coerced per field: a malformed number becomes NaN and a
//! malformed date becomes None, so a bad cell degrades one mark on one
//! chart instead of failing the load. Extra columns are ignored and a
//! short row reads as empty cells for its missing columns.

use chrono::NaiveDate;
use log::info;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Accepted date layouts, tried in order. `%y` runs before `%Y` so a
/// two-digit year maps into 1969-2068 instead of the first century;
/// four-digit years fail `%y` on the trailing digits and fall through.
const DATE_FORMATS: [&str; 3] = ["%Y-%m-%d", "%m/%d/%y", "%m/%d/%Y"];

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read weather data from {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse weather data: {0}")]
    Csv(#[from] csv::Error),
}

/// One CSV row as shipped, before any type coercion.
#[derive(Debug, Deserialize)]
struct RawRow {
    #[serde(rename = "Date", default)]
    date: String,
    #[serde(rename = "Precip", default)]
    precip: String,
    #[serde(rename = "Pressure", default)]
    pressure: String,
    #[serde(rename = "Dewpoint", default)]
    dewpoint: String,
    #[serde(rename = "TempMax", default)]
    temp_max: String,
    #[serde(rename = "TempMin", default)]
    temp_min: String,
}

/// One day of observations with numeric fields coerced.
#[derive(Debug, Clone, Copy)]
pub struct DailyWeather {
    pub date: Option<NaiveDate>,
    pub precip: f64,
    pub pressure: f64,
    pub dewpoint: f64,
    pub temp_max: f64,
    pub temp_min: f64,
}

impl DailyWeather {
    fn from_raw(raw: &RawRow) -> Self {
        Self {
            date: parse_date(&raw.date),
            precip: parse_number(&raw.precip),
            pressure: parse_number(&raw.pressure),
            dewpoint: parse_number(&raw.dewpoint),
            temp_max: parse_number(&raw.temp_max),
            temp_min: parse_number(&raw.temp_min),
        }
    }

    /// Spread between the day's high and low temperatures.
    #[must_use]
    pub fn temp_diff(&self) -> f64 {
        self.temp_max - self.temp_min
    }
}

/// Summed precipitation for one calendar month name.
#[derive(Debug, Clone, PartialEq)]
pub struct MonthlyPrecip {
    pub month: String,
    pub total: f64,
}

/// Loads the weather CSV. The file read is the only await point; the
/// parse runs synchronously on the loaded text.
pub async fn load_weather_csv(path: &Path) -> Result<Vec<DailyWeather>, LoadError> {
    let text = tokio::fs::read_to_string(path)
        .await
        .map_err(|source| LoadError::Read {
            path: path.to_path_buf(),
            source,
        })?;

    let mut csv_reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_reader(text.as_bytes());
    let mut rows = Vec::new();
    for result in csv_reader.deserialize() {
        let raw: RawRow = result?;
        rows.push(DailyWeather::from_raw(&raw));
    }

    info!(
        "Loaded {} weather observations from {}",
        rows.len(),
        path.display()
    );
    Ok(rows)
}

/// Sums precipitation per month name, in first-seen row order. Rows
/// without a parseable date join no group; non-finite amounts are
/// skipped by the sum.
#[must_use]
pub fn monthly_precip_totals(rows: &[DailyWeather]) -> Vec<MonthlyPrecip> {
    let mut totals: Vec<MonthlyPrecip> = Vec::new();
    for row in rows {
        let Some(date) = row.date else { continue };
        let month = date.format("%B").to_string();
        let index = match totals.iter().position(|entry| entry.month == month) {
            Some(index) => index,
            None => {
                totals.push(MonthlyPrecip { month, total: 0.0 });
                totals.len() - 1
            }
        };
        if row.precip.is_finite() {
            totals[index].total += row.precip;
        }
    }
    totals
}

fn parse_number(cell: &str) -> f64 {
    cell.trim().parse().unwrap_or(f64::NAN)
}

fn parse_date(cell: &str) -> Option<NaiveDate> {
    let cell = cell.trim();
    DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(cell, format).ok())
}

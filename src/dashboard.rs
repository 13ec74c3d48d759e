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

//! End-to-end orchestration: load the dataset once, render the three
//! charts from the same rows, and write the dashboard artifacts.
//!
//! The dataset read is the only await point. The renderers run
//! synchronously in sequence; they share no mutable state, so their
//! order does not matter. When the load fails nothing is written.

use log::info;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::chart::ChartError;
use crate::dataset::{self, LoadError};
use crate::{bar_chart, line_graph, page, scatter_plot};

pub const BAR_CHART_FILE: &str = "barChart.svg";
pub const SCATTER_PLOT_FILE: &str = "scatterplot.svg";
pub const LINE_GRAPH_FILE: &str = "lineGraph.svg";
pub const PAGE_FILE: &str = "index.html";

#[derive(Debug, Error)]
pub enum DashboardError {
    #[error(transparent)]
    Load(#[from] LoadError),
    #[error(transparent)]
    Chart(#[from] ChartError),
    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Renders the full dashboard from `input` into `out_dir`.
pub async fn run(
    input: &Path,
    out_dir: &Path,
    viewport_width: u32,
) -> Result<(), DashboardError> {
    let rows = dataset::load_weather_csv(input).await?;

    let bar_svg = bar_chart::render(&rows)?;
    let scatter_svg = scatter_plot::render(&rows)?;
    let line_svg = line_graph::render(&rows, viewport_width)?;
    let page_html = page::render_page(&bar_svg, &scatter_svg, &line_svg);

    std::fs::create_dir_all(out_dir).map_err(|source| DashboardError::Write {
        path: out_dir.to_path_buf(),
        source,
    })?;
    write_artifact(out_dir, BAR_CHART_FILE, &bar_svg)?;
    write_artifact(out_dir, SCATTER_PLOT_FILE, &scatter_svg)?;
    write_artifact(out_dir, LINE_GRAPH_FILE, &line_svg)?;
    write_artifact(out_dir, PAGE_FILE, &page_html)?;
    Ok(())
}

fn write_artifact(out_dir: &Path, name: &str, content: &str) -> Result<(), DashboardError> {
    let path = out_dir.join(name);
    std::fs::write(&path, content).map_err(|source| DashboardError::Write {
        path: path.clone(),
        source,
    })?;
    info!("Wrote {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch_dir(name: &str) -> PathBuf {
        let dir =
            std::env::temp_dir().join(format!("weatherboard-{name}-{}", std::process::id()));
        std::fs::remove_dir_all(&dir).ok();
        dir
    }

    #[tokio::test]
    async fn test_run_writes_all_artifacts() {
        let dir = scratch_dir("dashboard-ok");
        std::fs::create_dir_all(&dir).unwrap();
        let input = dir.join("weather.csv");
        std::fs::write(
            &input,
            "Date,Precip,Pressure,Dewpoint,TempMax,TempMin\n\
             2021-01-05,0.42,1017.3,33.9,52.0,36.1\n\
             2021-02-11,1.10,1009.8,41.2,61.0,44.5\n\
             2021-03-20,0.00,1013.6,48.7,74.0,51.3\n",
        )
        .unwrap();
        let out_dir = dir.join("out");

        run(&input, &out_dir, 1024).await.unwrap();

        for name in [BAR_CHART_FILE, SCATTER_PLOT_FILE, LINE_GRAPH_FILE, PAGE_FILE] {
            assert!(out_dir.join(name).exists(), "missing {name}");
        }
        let bar_svg = std::fs::read_to_string(out_dir.join(BAR_CHART_FILE)).unwrap();
        assert!(bar_svg.contains("<svg"));
        let page_html = std::fs::read_to_string(out_dir.join(PAGE_FILE)).unwrap();
        assert!(page_html.contains("id=\"barChart\""));
        assert!(page_html.contains("id=\"scatterplot\""));
        assert!(page_html.contains("id=\"lineGraph\""));
    }

    #[tokio::test]
    async fn test_run_missing_input_writes_nothing() {
        let dir = scratch_dir("dashboard-missing");
        let input = dir.join("does-not-exist.csv");
        let out_dir = dir.join("out");

        let err = run(&input, &out_dir, 1024).await.unwrap_err();
        assert!(matches!(err, DashboardError::Load(LoadError::Read { .. })));
        assert!(!out_dir.exists());
    }
}

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

//! Command line entry point for the weather dashboard renderer.

use clap::Parser;
use log::error;
use std::path::PathBuf;
use std::process::ExitCode;

use weatherboard::dashboard;
use weatherboard::line_graph::DEFAULT_VIEWPORT_WIDTH;

#[derive(Parser, Debug)]
#[command(name = "weatherboard")]
#[command(version, about = "Renders daily weather observations into SVG dashboard charts")]
struct Args {
    /// Path to the weather observations CSV
    #[arg(default_value = "data/atl_weather_20to22.csv")]
    input: PathBuf,

    /// Output directory for the SVG files and the dashboard page
    #[arg(long, default_value = "out")]
    out_dir: PathBuf,

    /// Render-time viewport width in pixels for the line graph
    #[arg(long, default_value_t = DEFAULT_VIEWPORT_WIDTH)]
    viewport_width: u32,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    if let Err(err) = dashboard::run(&args.input, &args.out_dir, args.viewport_width).await {
        error!("Failed to render weather dashboard: {err}");
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}

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

//! Weather dashboard SVG renderer.
//!
//! Loads one CSV of daily weather observations and renders three
//! charts as standalone SVG documents: total precipitation per month
//! as bars, pressure against dewpoint as a bubble scatter, and the
//! max/min temperature series as lines. A small HTML page embeds the
//! three charts in fixed containers.

pub mod axis;
pub mod bar_chart;
pub mod chart;
pub mod color;
pub mod dashboard;
pub mod dataset;
pub mod line_graph;
pub mod page;
pub mod scale;
pub mod scatter_plot;

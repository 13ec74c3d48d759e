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

//! Dashboard page assembly. Each rendered chart lands in a fixed,
//! pre-existing container; nothing else on the page is dynamic.

pub const BAR_CHART_CONTAINER: &str = "barChart";
pub const SCATTER_PLOT_CONTAINER: &str = "scatterplot";
pub const LINE_GRAPH_CONTAINER: &str = "lineGraph";

/// Builds the dashboard page with the three SVG documents inlined
/// into their containers, bar chart first, then scatter, then line.
#[must_use]
pub fn render_page(bar_chart: &str, scatter_plot: &str, line_graph: &str) -> String {
    format!(
        "<!DOCTYPE html>\n\
         <html lang=\"en\">\n\
         <head>\n\
         <meta charset=\"utf-8\">\n\
         <title>Atlanta Weather</title>\n\
         </head>\n\
         <body>\n\
         <h1>Atlanta Weather</h1>\n\
         <div id=\"{BAR_CHART_CONTAINER}\">\n{bar_chart}\n</div>\n\
         <div id=\"{SCATTER_PLOT_CONTAINER}\">\n{scatter_plot}\n</div>\n\
         <div id=\"{LINE_GRAPH_CONTAINER}\">\n{line_graph}\n</div>\n\
         </body>\n\
         </html>\n"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_has_all_three_containers_in_order() {
        let page = render_page("<svg>bar</svg>", "<svg>scatter</svg>", "<svg>line</svg>");
        let bar = page.find("id=\"barChart\"").unwrap();
        let scatter = page.find("id=\"scatterplot\"").unwrap();
        let line = page.find("id=\"lineGraph\"").unwrap();
        assert!(bar < scatter);
        assert!(scatter < line);
    }

    #[test]
    fn test_page_embeds_each_chart_in_its_container() {
        let page = render_page("<svg>bar</svg>", "<svg>scatter</svg>", "<svg>line</svg>");
        let bar_div = page.find("id=\"barChart\"").unwrap();
        let bar_svg = page.find("<svg>bar</svg>").unwrap();
        let scatter_div = page.find("id=\"scatterplot\"").unwrap();
        assert!(bar_div < bar_svg);
        assert!(bar_svg < scatter_div);
    }
}

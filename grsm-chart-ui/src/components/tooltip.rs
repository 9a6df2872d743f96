//! Hover text drawn inside the plot.

use dioxus::prelude::*;

const LINE_HEIGHT: f64 = 15.0;

/// A small box of text lines anchored at `(x, y)` in plot coordinates.
#[component]
pub fn Tooltip(lines: Vec<String>, x: f64, y: f64) -> Element {
    let longest = lines.iter().map(|l| l.chars().count()).max().unwrap_or(0);
    let width = longest as f64 * 6.5 + 16.0;
    let height = lines.len() as f64 * LINE_HEIGHT + 10.0;
    rsx! {
        g {
            class: "tooltip",
            transform: "translate({x},{y})",
            "pointer-events": "none",
            rect {
                width: "{width}",
                height: "{height}",
                fill: "white",
                stroke: "#999",
                rx: "4",
                opacity: "0.95",
            }
            for (i, line) in lines.iter().enumerate() {
                text {
                    key: "{i}",
                    x: "8",
                    y: "{(i + 1) as f64 * LINE_HEIGHT}",
                    "font-size": "12",
                    "{line}"
                }
            }
        }
    }
}

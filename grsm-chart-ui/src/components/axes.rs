//! SVG axes and captions drawn from frame ticks.

use dioxus::prelude::*;
use grsm_charts::axis::Tick;
use grsm_charts::viewport::Layout;

const AXIS_COLOR: &str = "#333";

/// Bottom axis along the plot's lower edge.
#[component]
pub fn XAxis(ticks: Vec<Tick>, layout: Layout) -> Element {
    let y = layout.height;
    rsx! {
        g {
            class: "x-axis",
            line { x1: "0", y1: "{y}", x2: "{layout.width}", y2: "{y}", stroke: AXIS_COLOR }
            for tick in ticks {
                g {
                    key: "{tick.label}",
                    line {
                        x1: "{tick.position}",
                        y1: "{y}",
                        x2: "{tick.position}",
                        y2: "{y + 6.0}",
                        stroke: AXIS_COLOR,
                    }
                    text {
                        x: "{tick.position}",
                        y: "{y + 18.0}",
                        "text-anchor": "middle",
                        "font-size": "10",
                        "{tick.label}"
                    }
                }
            }
        }
    }
}

/// Vertical axis at `x`; ticks point left unless `right` is set.
#[component]
pub fn YAxis(
    ticks: Vec<Tick>,
    layout: Layout,
    #[props(default = 0.0)] x: f64,
    #[props(default = false)] right: bool,
) -> Element {
    let dir = if right { 6.0 } else { -6.0 };
    let anchor = if right { "start" } else { "end" };
    rsx! {
        g {
            class: "y-axis",
            line { x1: "{x}", y1: "0", x2: "{x}", y2: "{layout.height}", stroke: AXIS_COLOR }
            for tick in ticks {
                g {
                    key: "{tick.label}",
                    line {
                        x1: "{x}",
                        y1: "{tick.position}",
                        x2: "{x + dir}",
                        y2: "{tick.position}",
                        stroke: AXIS_COLOR,
                    }
                    text {
                        x: "{x + dir * 1.5}",
                        y: "{tick.position + 3.0}",
                        "text-anchor": "{anchor}",
                        "font-size": "10",
                        "{tick.label}"
                    }
                }
            }
        }
    }
}

/// Title above the plot and captions for both axes. Empty strings are skipped.
#[component]
pub fn AxisLabels(
    layout: Layout,
    #[props(default = String::new())] title: String,
    #[props(default = String::new())] x_label: String,
    #[props(default = String::new())] y_label: String,
) -> Element {
    let Layout { width, height, margin, .. } = layout;
    let y_label_x = -margin.left * 0.7;
    let y_label_y = height / 2.0;
    rsx! {
        if !title.is_empty() {
            text {
                x: "{width / 2.0}",
                y: "{-margin.top / 2.0}",
                "text-anchor": "middle",
                "font-size": "16",
                "font-weight": "bold",
                "{title}"
            }
        }
        if !x_label.is_empty() {
            text {
                x: "{width / 2.0}",
                y: "{height + margin.bottom * 0.75}",
                "text-anchor": "middle",
                "{x_label}"
            }
        }
        if !y_label.is_empty() {
            text {
                x: "{y_label_x}",
                y: "{y_label_y}",
                "text-anchor": "middle",
                transform: "rotate(-90,{y_label_x},{y_label_y})",
                "{y_label}"
            }
        }
    }
}

/// Outer `<svg>` sized to the layout with the translated plot group inside.
#[component]
pub fn PlotSvg(layout: Layout, children: Element) -> Element {
    rsx! {
        svg {
            width: "{layout.outer.width}",
            height: "{layout.outer.height}",
            "font-family": "sans-serif",
            g {
                transform: "{layout.transform()}",
                {children}
            }
        }
    }
}

//! Site by year ANC heatmap; brushing years filters the trend panel.

use super::axes::{AxisLabels, PlotSvg, XAxis, YAxis};
use super::tooltip::Tooltip;
use super::{ChartContainer, ChartHeader};
use crate::js_bridge::{self, WebViewport};
use crate::state::AppState;
use dioxus::prelude::*;
use grsm_charts::brush::Pointer;
use grsm_charts::heatmap::{self, MARGIN};

fn on_pointer(mut state: AppState, pointer: Pointer, client_x: f64, client_y: f64) {
    let (x, y) = js_bridge::plot_point(heatmap::CONTAINER_ID, MARGIN, client_x, client_y);
    let mut panels = state.panels.write();
    match pointer {
        Pointer::Down => panels.heatmap.pointer_down(x),
        Pointer::Move => {
            panels.heatmap.pointer_move(x);
            panels.heatmap.hover_at(x, y);
        }
        Pointer::Up | Pointer::Leave => {
            let published = if pointer == Pointer::Up {
                panels.heatmap.pointer_up(x)
            } else {
                panels.heatmap.pointer_leave(x)
            };
            // Publishing reaches the trend through the dispatcher.
            if published.is_some() {
                let frame = panels.anc.borrow_mut().frame();
                state.anc_frame.set(Some(frame));
            }
        }
    }
    state.heatmap_frame.set(Some(panels.heatmap.frame()));
}

fn cell_stroke(highlighted: bool) -> &'static str {
    if highlighted {
        "#000"
    } else {
        "none"
    }
}

#[component]
pub fn HeatmapPanel() -> Element {
    let mut state = use_context::<AppState>();
    let status = (state.water_status)();

    use_effect(move || {
        if !(state.water_status)().is_ready() {
            return;
        }
        let frame = state
            .panels
            .write()
            .heatmap
            .render(&WebViewport, heatmap::CONTAINER_ID);
        state.heatmap_frame.set(Some(frame));
    });

    let frame = state.heatmap_frame.read().clone();

    rsx! {
        ChartHeader {
            title: heatmap::TITLE.to_string(),
            description: "Drag across years to filter the park-wide trend below.".to_string(),
        }
        ChartContainer {
            id: heatmap::CONTAINER_ID.to_string(),
            status,
            height: 620,
            if let Some(frame) = frame {
                PlotSvg {
                    layout: frame.layout,
                    if let Some(legend) = frame.legend.clone() {
                        defs {
                            linearGradient {
                                id: "heatmapLegendGradient",
                                for stop in legend.stops.iter() {
                                    stop {
                                        key: "{stop.offset}",
                                        offset: "{stop.offset}%",
                                        "stop-color": "{stop.color}",
                                    }
                                }
                            }
                        }
                        g {
                            class: "legend",
                            transform: "translate(0,{-heatmap::LEGEND_HEIGHT * 4.0})",
                            text { y: "-6", "font-size": "11", "{heatmap::LEGEND_TITLE}" }
                            rect {
                                width: "{heatmap::LEGEND_WIDTH}",
                                height: "{heatmap::LEGEND_HEIGHT}",
                                fill: "url(#heatmapLegendGradient)",
                            }
                            for tick in legend.ticks.iter() {
                                text {
                                    key: "{tick.label}",
                                    x: "{tick.position}",
                                    y: "{heatmap::LEGEND_HEIGHT + 12.0}",
                                    "text-anchor": "middle",
                                    "font-size": "10",
                                    "{tick.label}"
                                }
                            }
                        }
                    }
                    for cell in frame.rects.iter() {
                        rect {
                            key: "{cell.site}-{cell.year}",
                            x: "{cell.x}",
                            y: "{cell.y}",
                            width: "{cell.width}",
                            height: "{cell.height}",
                            fill: "{cell.fill}",
                            stroke: cell_stroke(cell.highlighted),
                        }
                    }
                    XAxis { ticks: frame.x_ticks.clone(), layout: frame.layout }
                    YAxis { ticks: frame.y_ticks.clone(), layout: frame.layout }
                    AxisLabels { layout: frame.layout, x_label: "Year".to_string() }
                    rect {
                        class: "overlay",
                        width: "{frame.layout.width}",
                        height: "{frame.layout.height}",
                        fill: "transparent",
                        "cursor": "crosshair",
                        onpointerdown: move |evt: PointerEvent| {
                            let p = evt.client_coordinates();
                            on_pointer(state, Pointer::Down, p.x, p.y);
                        },
                        onpointermove: move |evt: PointerEvent| {
                            let p = evt.client_coordinates();
                            on_pointer(state, Pointer::Move, p.x, p.y);
                        },
                        onpointerup: move |evt: PointerEvent| {
                            let p = evt.client_coordinates();
                            on_pointer(state, Pointer::Up, p.x, p.y);
                        },
                        onpointerleave: move |evt: PointerEvent| {
                            let p = evt.client_coordinates();
                            on_pointer(state, Pointer::Leave, p.x, p.y);
                        },
                    }
                    if let Some((x0, x1)) = frame.selection {
                        rect {
                            class: "selection",
                            x: "{x0}",
                            width: "{x1 - x0}",
                            height: "{frame.layout.height}",
                            fill: "#777",
                            "fill-opacity": "0.3",
                            "pointer-events": "none",
                        }
                    }
                    if let Some(hover) = frame.hover.clone() {
                        if let Some(cell) = frame.rects.iter().find(|r| r.site == hover.site && r.year == hover.year) {
                            Tooltip {
                                lines: hover.lines.clone(),
                                x: cell.x + cell.width + 6.0,
                                y: cell.y,
                            }
                        }
                    }
                }
            }
        }
    }
}

//! Yearly totals with a brush that filters the stacked area chart.

use super::axes::{AxisLabels, PlotSvg, XAxis, YAxis};
use super::{ChartContainer, ChartHeader};
use crate::js_bridge::{self, WebViewport};
use crate::state::{AppState, Panels};
use dioxus::prelude::*;
use grsm_charts::brush::Pointer;
use grsm_charts::timeline::{self, MARGIN};

/// Drive the timeline brush and redraw whichever biodiversity panels it
/// touched.
fn on_pointer(mut state: AppState, pointer: Pointer, client_x: f64, client_y: f64) {
    let (x, _) = js_bridge::plot_point(timeline::CONTAINER_ID, MARGIN, client_x, client_y);
    let mut guard = state.panels.write();
    let Panels { timeline, stacked, .. } = &mut *guard;
    let redraw = timeline.on_pointer(pointer, x, stacked);
    if redraw.timeline {
        state.timeline_frame.set(Some(timeline.frame()));
    }
    if redraw.peer {
        state.area_frame.set(Some(stacked.render()));
    }
}

#[component]
pub fn TimelinePanel() -> Element {
    let mut state = use_context::<AppState>();
    let status = (state.biodiversity_status)();

    // First draw once the dataset is in, and again after every taxa reload.
    use_effect(move || {
        if !(state.biodiversity_status)().is_ready() {
            return;
        }
        let frame = state
            .panels
            .write()
            .timeline
            .render(&WebViewport, timeline::CONTAINER_ID);
        state.timeline_frame.set(Some(frame));
    });

    let frame = state.timeline_frame.read().clone();

    rsx! {
        ChartHeader {
            title: timeline::TITLE.to_string(),
            description: "Drag across the chart to focus the species chart on those years.".to_string(),
        }
        ChartContainer {
            id: timeline::CONTAINER_ID.to_string(),
            status,
            height: 220,
            if let Some(frame) = frame {
                PlotSvg {
                    layout: frame.layout,
                    if let Some(d) = frame.area.clone() {
                        path { d: "{d}", fill: "{frame.fill}" }
                    }
                    XAxis { ticks: frame.x_ticks.clone(), layout: frame.layout }
                    YAxis { ticks: frame.y_ticks.clone(), layout: frame.layout }
                    AxisLabels {
                        layout: frame.layout,
                        y_label: timeline::Y_LABEL.to_string(),
                    }
                    // Brush overlay
                    rect {
                        class: "overlay",
                        x: "0",
                        y: "0",
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
                            y: "0",
                            width: "{x1 - x0}",
                            height: "{frame.layout.height}",
                            fill: "#777",
                            "fill-opacity": "0.3",
                            "pointer-events": "none",
                        }
                    }
                }
            }
        }
    }
}

//! PM2.5 readings against recreation visits, with a hover focus line.

use super::axes::{AxisLabels, PlotSvg, XAxis, YAxis};
use super::tooltip::Tooltip;
use super::{ChartContainer, ChartHeader};
use crate::js_bridge::{self, WebViewport};
use crate::state::{AppState, PanelStatus};
use dioxus::prelude::*;
use grsm_charts::viewport::Layout;
use grsm_charts::visibility::{self, MARGIN};

#[component]
pub fn VisibilityPanel() -> Element {
    let mut state = use_context::<AppState>();
    let mut show_line = use_signal(|| false);
    let status = (state.visibility_status)();

    // Redraw once readings arrive and again when the visits overlay lands.
    use_effect(move || {
        let readings = (state.visibility_status)();
        let _overlay = (state.visits_status)();
        if !readings.is_ready() {
            return;
        }
        let layout = Layout::measure(&WebViewport, visibility::CONTAINER_ID, MARGIN);
        let mut panels = state.panels.write();
        panels.visibility.initialize(layout);
        state.visibility_frame.set(Some(panels.visibility.update()));
    });

    let on_toggle = move |evt: Event<FormData>| {
        let visible = evt.checked();
        show_line.set(visible);
        let mut panels = state.panels.write();
        panels.visibility.set_visibility_line_visible(visible);
        state.visibility_frame.set(Some(panels.visibility.frame()));
    };

    let on_move = move |evt: PointerEvent| {
        let p = evt.client_coordinates();
        let (x, _) = js_bridge::plot_point(visibility::CONTAINER_ID, MARGIN, p.x, p.y);
        let mut panels = state.panels.write();
        panels.visibility.hover(x);
        state.visibility_frame.set(Some(panels.visibility.frame()));
    };

    let on_leave = move |_: PointerEvent| {
        let mut panels = state.panels.write();
        panels.visibility.leave();
        state.visibility_frame.set(Some(panels.visibility.frame()));
    };

    let frame = state.visibility_frame.read().clone();
    let visits_failed = matches!(*state.visits_status.read(), PanelStatus::Failed(_));

    rsx! {
        ChartHeader {
            title: visibility::TITLE.to_string(),
            description: "Shaded area: yearly visitors, faded where particulate matter was high.".to_string(),
        }
        label {
            style: "font-size: 12px;",
            input {
                r#type: "checkbox",
                checked: show_line(),
                onchange: on_toggle,
            }
            " Show PM2.5 readings"
        }
        if visits_failed {
            p { style: "font-size: 12px; color: #C62828;", "Visits overlay unavailable." }
        }
        ChartContainer {
            id: visibility::CONTAINER_ID.to_string(),
            status,
            height: 600,
            if let Some(frame) = frame {
                PlotSvg {
                    layout: frame.layout,
                    if let Some(overlay) = frame.visits.clone() {
                        if !overlay.gradient.is_empty() {
                            defs {
                                linearGradient {
                                    id: visibility::GRADIENT_ID,
                                    x1: "0%",
                                    x2: "100%",
                                    for (i, stop) in overlay.gradient.iter().enumerate() {
                                        stop {
                                            key: "{i}",
                                            offset: "{stop.offset * 100.0}%",
                                            "stop-color": visibility::VISITS_COLOR,
                                            "stop-opacity": "{stop.opacity}",
                                        }
                                    }
                                }
                            }
                        }
                        if let Some(d) = overlay.area.clone() {
                            path {
                                d: "{d}",
                                fill: overlay_fill(overlay.gradient.is_empty()),
                            }
                        }
                        if let Some(d) = overlay.outline.clone() {
                            path { d: "{d}", fill: "none", stroke: visibility::VISITS_COLOR }
                        }
                        YAxis { ticks: overlay.y_ticks.clone(), layout: frame.layout, x: frame.layout.width, right: true }
                    }
                    if frame.line_visible {
                        if let Some(d) = frame.line.clone() {
                            path {
                                d: "{d}",
                                fill: "none",
                                stroke: visibility::LINE_COLOR,
                                "stroke-width": "1.5",
                            }
                        }
                        YAxis { ticks: frame.y_ticks.clone(), layout: frame.layout }
                    }
                    XAxis { ticks: frame.x_ticks.clone(), layout: frame.layout }
                    AxisLabels {
                        layout: frame.layout,
                        x_label: visibility::X_LABEL.to_string(),
                    }
                    text {
                        x: "{frame.layout.width + 50.0}",
                        y: "-10",
                        "text-anchor": "end",
                        "{visibility::Y_LABEL}"
                    }
                    if let Some(focus) = frame.focus.clone() {
                        line {
                            x1: "{focus.x}",
                            y1: "0",
                            x2: "{focus.x}",
                            y2: "{frame.layout.height}",
                            stroke: "#555",
                            "stroke-dasharray": "3 3",
                            "pointer-events": "none",
                        }
                        Tooltip { lines: focus.lines.clone(), x: focus.x + 8.0, y: 8.0 }
                    }
                    rect {
                        class: "overlay",
                        width: "{frame.layout.width}",
                        height: "{frame.layout.height}",
                        fill: "transparent",
                        onpointermove: on_move,
                        onpointerleave: on_leave,
                    }
                }
            }
        }
    }
}

fn overlay_fill(plain: bool) -> String {
    if plain {
        visibility::VISITS_COLOR.to_string()
    } else {
        format!("url(#{})", visibility::GRADIENT_ID)
    }
}

//! Stacked (or isolated) species areas, filtered by the timeline brush.

use super::axes::{AxisLabels, PlotSvg, XAxis, YAxis};
use super::{ChartContainer, ChartHeader};
use crate::js_bridge::WebViewport;
use crate::state::AppState;
use dioxus::prelude::*;
use grsm_charts::stacked_area::{self, MARGIN};
use grsm_charts::viewport::Layout;

#[component]
pub fn StackedAreaPanel() -> Element {
    let mut state = use_context::<AppState>();
    let status = (state.biodiversity_status)();

    use_effect(move || {
        if !(state.biodiversity_status)().is_ready() {
            return;
        }
        let layout = Layout::measure(&WebViewport, stacked_area::CONTAINER_ID, MARGIN);
        let mut panels = state.panels.write();
        panels.stacked.initialize(layout);
        state.area_frame.set(Some(panels.stacked.render()));
    });

    let mut hover = move |category: Option<String>| {
        let mut panels = state.panels.write();
        panels.stacked.hover(category.as_deref());
        state.area_frame.set(Some(panels.stacked.render()));
    };

    let mut click = move |category: String| {
        let frame = state.panels.write().stacked.on_click(&category);
        state.area_frame.set(Some(frame));
    };

    let frame = state.area_frame.read().clone();

    rsx! {
        ChartHeader {
            title: stacked_area::TITLE.to_string(),
            description: "Click a species to isolate it; click again to restore the stack.".to_string(),
        }
        ChartContainer {
            id: stacked_area::CONTAINER_ID.to_string(),
            status,
            height: 480,
            if let Some(frame) = frame {
                PlotSvg {
                    layout: frame.layout,
                    defs {
                        clipPath {
                            id: stacked_area::CLIP_ID,
                            rect { width: "{frame.layout.width}", height: "{frame.layout.height}" }
                        }
                    }
                    g {
                        "clip-path": "url(#{stacked_area::CLIP_ID})",
                        for area in frame.paths.clone() {
                            path {
                                key: "{area.key}",
                                class: "area",
                                d: "{area.d}",
                                fill: "{area.color}",
                                opacity: "{area.opacity}",
                                style: "transition: d {frame.transition_ms}ms, opacity {frame.transition_ms}ms;",
                                onmouseenter: {
                                    let key = area.key.clone();
                                    move |_| hover(Some(key.clone()))
                                },
                                onmouseleave: move |_| hover(None),
                                onclick: {
                                    let key = area.key.clone();
                                    move |_| click(key.clone())
                                },
                            }
                        }
                    }
                    XAxis { ticks: frame.x_ticks.clone(), layout: frame.layout }
                    YAxis { ticks: frame.y_ticks.clone(), layout: frame.layout }
                    text {
                        class: "category-label",
                        x: "10",
                        y: "20",
                        "{frame.label}"
                    }
                    AxisLabels {
                        layout: frame.layout,
                        x_label: stacked_area::X_LABEL.to_string(),
                        y_label: stacked_area::Y_LABEL.to_string(),
                    }
                }
            }
        }
    }
}

//! Species inventory of the top national parks.

use super::axes::{AxisLabels, PlotSvg, XAxis, YAxis};
use super::tooltip::Tooltip;
use super::{ChartContainer, ChartHeader};
use crate::js_bridge::WebViewport;
use crate::state::AppState;
use dioxus::prelude::*;
use grsm_charts::parks;

#[component]
pub fn ParksPanel() -> Element {
    let mut state = use_context::<AppState>();
    let status = (state.parks_status)();

    use_effect(move || {
        if !(state.parks_status)().is_ready() {
            return;
        }
        let frame = state
            .panels
            .write()
            .parks
            .render(&WebViewport, parks::CONTAINER_ID);
        state.parks_frame.set(Some(frame));
    });

    let mut hover = move |park: Option<String>| {
        let mut panels = state.panels.write();
        panels.parks.hover(park.as_deref());
        state.parks_frame.set(Some(panels.parks.frame()));
    };

    let frame = state.parks_frame.read().clone();

    rsx! {
        ChartHeader { title: parks::TITLE.to_string() }
        ChartContainer {
            id: parks::CONTAINER_ID.to_string(),
            status,
            height: 500,
            if let Some(frame) = frame {
                PlotSvg {
                    layout: frame.layout,
                    for bar in frame.bars.iter() {
                        rect {
                            key: "{bar.park}",
                            x: "{bar.x}",
                            y: "{bar.y}",
                            width: "{bar.width}",
                            height: "{bar.height}",
                            fill: "{bar.fill}",
                            onmouseenter: {
                                let park = bar.park.clone();
                                move |_| hover(Some(park.clone()))
                            },
                            onmouseleave: move |_| hover(None),
                        }
                    }
                    XAxis { ticks: frame.x_ticks.clone(), layout: frame.layout }
                    YAxis { ticks: frame.y_ticks.clone(), layout: frame.layout }
                    AxisLabels {
                        layout: frame.layout,
                        x_label: parks::X_LABEL.to_string(),
                        y_label: parks::Y_LABEL.to_string(),
                    }
                    if let Some(info) = frame.hover.clone() {
                        if let Some(bar) = frame.bars.iter().find(|b| b.park == info.park) {
                            Tooltip {
                                lines: info.lines.clone(),
                                x: (bar.width - 260.0).max(0.0),
                                y: bar.y + bar.height,
                            }
                        }
                    }
                }
            }
        }
    }
}

//! Annual recreation visits.

use super::axes::{AxisLabels, PlotSvg, XAxis, YAxis};
use super::tooltip::Tooltip;
use super::{ChartContainer, ChartHeader};
use crate::js_bridge::WebViewport;
use crate::state::AppState;
use dioxus::prelude::*;
use grsm_charts::visits;

#[component]
pub fn VisitsPanel() -> Element {
    let mut state = use_context::<AppState>();
    let mut hovered = use_signal(|| None::<i32>);
    let status = (state.visits_status)();

    use_effect(move || {
        if !(state.visits_status)().is_ready() {
            return;
        }
        let frame = state
            .panels
            .write()
            .visits
            .render(&WebViewport, visits::CONTAINER_ID);
        state.visits_frame.set(Some(frame));
    });

    let frame = state.visits_frame.read().clone();
    let tooltip = hovered().and_then(|year| {
        let lines = state.panels.peek().visits.tooltip(year)?;
        let point = frame.as_ref()?.points.iter().find(|p| p.year == year)?.clone();
        Some((lines, point))
    });

    rsx! {
        ChartHeader { title: visits::TITLE.to_string() }
        ChartContainer {
            id: visits::CONTAINER_ID.to_string(),
            status,
            height: 400,
            if let Some(frame) = frame {
                PlotSvg {
                    layout: frame.layout,
                    if let Some(d) = frame.line.clone() {
                        path {
                            d: "{d}",
                            fill: "none",
                            stroke: visits::COLOR,
                            "stroke-width": "2",
                        }
                    }
                    for point in frame.points.iter() {
                        circle {
                            key: "{point.year}",
                            cx: "{point.cx}",
                            cy: "{point.cy}",
                            r: "{point.r}",
                            fill: visits::COLOR,
                            onmouseenter: {
                                let year = point.year;
                                move |_| hovered.set(Some(year))
                            },
                            onmouseleave: move |_| hovered.set(None),
                        }
                    }
                    XAxis { ticks: frame.x_ticks.clone(), layout: frame.layout }
                    YAxis { ticks: frame.y_ticks.clone(), layout: frame.layout }
                    AxisLabels {
                        layout: frame.layout,
                        x_label: visits::X_LABEL.to_string(),
                        y_label: visits::Y_LABEL.to_string(),
                    }
                    if let Some((lines, point)) = tooltip {
                        Tooltip { lines, x: point.cx + 10.0, y: point.cy - 28.0 }
                    }
                }
            }
        }
    }
}

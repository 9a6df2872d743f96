//! Park-wide ANC yearly means with a dashed regression line.

use super::axes::{AxisLabels, PlotSvg, XAxis, YAxis};
use super::{ChartContainer, ChartHeader};
use crate::js_bridge::WebViewport;
use crate::state::AppState;
use dioxus::prelude::*;
use grsm_charts::anc_trend;

#[component]
pub fn AncTrendPanel() -> Element {
    let mut state = use_context::<AppState>();
    let status = (state.water_status)();

    use_effect(move || {
        if !(state.water_status)().is_ready() {
            return;
        }
        let anc = state.panels.peek().anc.clone();
        let frame = anc.borrow_mut().render(&WebViewport, anc_trend::CONTAINER_ID);
        state.anc_frame.set(Some(frame));
    });

    let frame = state.anc_frame.read().clone();
    let range = state.panels.peek().anc.borrow().range();
    let description = match range {
        Some((start, end)) => format!("Showing {}–{}. Clear the heatmap selection to see every year.", start, end),
        None => "All years. Dashed line: least-squares trend.".to_string(),
    };

    rsx! {
        ChartHeader {
            title: anc_trend::TITLE.to_string(),
            description,
        }
        ChartContainer {
            id: anc_trend::CONTAINER_ID.to_string(),
            status,
            height: 420,
            if let Some(frame) = frame {
                PlotSvg {
                    layout: frame.layout,
                    if let Some(d) = frame.line.clone() {
                        path {
                            d: "{d}",
                            fill: "none",
                            stroke: anc_trend::LINE_COLOR,
                            "stroke-width": "2",
                        }
                    }
                    for point in frame.points.iter() {
                        circle {
                            key: "{point.year}",
                            cx: "{point.cx}",
                            cy: "{point.cy}",
                            r: "{point.r}",
                            fill: anc_trend::LINE_COLOR,
                            title { "{point.year}: {point.mean:.1}" }
                        }
                    }
                    if let Some(d) = frame.trend.clone() {
                        path {
                            d: "{d}",
                            fill: "none",
                            stroke: anc_trend::TREND_COLOR,
                            "stroke-dasharray": anc_trend::TREND_DASH,
                        }
                    }
                    XAxis { ticks: frame.x_ticks.clone(), layout: frame.layout }
                    YAxis { ticks: frame.y_ticks.clone(), layout: frame.layout }
                    AxisLabels {
                        layout: frame.layout,
                        x_label: "Year".to_string(),
                        y_label: anc_trend::Y_LABEL.to_string(),
                    }
                }
            }
        }
    }
}

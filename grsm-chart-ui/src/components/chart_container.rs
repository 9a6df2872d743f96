//! Measured container for one panel, switching on its load status.

use crate::state::PanelStatus;
use dioxus::prelude::*;

/// Props for ChartContainer
#[derive(Props, Clone, PartialEq)]
pub struct ChartContainerProps {
    /// DOM id measured by the viewport provider
    pub id: String,
    pub status: PanelStatus,
    /// Container height in pixels; the chart fills it
    #[props(default = 400)]
    pub height: u32,
    /// The drawn chart, shown once the status is ready
    pub children: Element,
}

/// The div is always present so it can be measured before the first frame.
#[component]
pub fn ChartContainer(props: ChartContainerProps) -> Element {
    let style = format!(
        "height: {}px; position: relative; width: 100%;",
        props.height
    );

    rsx! {
        div {
            id: "{props.id}",
            style: "{style}",
            match &props.status {
                PanelStatus::Loading => rsx! { super::LoadingSpinner { height: props.height } },
                PanelStatus::Failed(message) => rsx! { super::ErrorDisplay { message: message.clone() } },
                PanelStatus::Ready => props.children,
            }
        }
    }
}

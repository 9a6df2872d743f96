//! Placeholder shown while a panel's dataset is in flight.

use dioxus::prelude::*;

#[derive(Props, Clone, PartialEq)]
pub struct LoadingSpinnerProps {
    /// Fill the panel's container so the page does not jump on first draw
    #[props(default = 400)]
    pub height: u32,
}

#[component]
pub fn LoadingSpinner(props: LoadingSpinnerProps) -> Element {
    rsx! {
        div {
            style: "display: flex; justify-content: center; align-items: center; height: {props.height}px; color: #666; font-size: 13px;",
            "Loading data..."
        }
    }
}

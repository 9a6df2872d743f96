//! Dropdown selector for the biodiversity taxa group.

use crate::state::AppState;
use dioxus::prelude::*;
use grsm_data::biodiversity::TaxaGroup;

/// Taxa dropdown. Updates `AppState::taxa`; the app reloads the
/// biodiversity dataset in response.
#[component]
pub fn TaxaSelector() -> Element {
    let mut state = use_context::<AppState>();
    let selected = (state.taxa)();

    let on_change = move |evt: Event<FormData>| match evt.value().parse::<TaxaGroup>() {
        Ok(group) => state.taxa.set(group),
        Err(e) => log::warn!("[GRSM] {}", e),
    };

    rsx! {
        div {
            style: "margin: 8px 0;",
            label {
                r#for: "taxa-select",
                style: "font-weight: bold; margin-right: 8px;",
                "Taxa group: "
            }
            select {
                id: "taxa-select",
                onchange: on_change,
                for group in TaxaGroup::ALL {
                    option {
                        value: "{group.as_str()}",
                        selected: group == selected,
                        "{group.label()}"
                    }
                }
            }
        }
    }
}

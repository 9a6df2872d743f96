//! Great Smoky Mountains dashboard
//!
//! One page, seven panels:
//! - biodiversity timeline brushing a stacked species area chart
//! - PM2.5 readings against the visits trend
//! - ANC heatmap whose year brush filters the park-wide ANC trend
//! - annual visits and a species inventory comparison of ten parks
//!
//! Data flow:
//! 1. On mount every CSV is fetched concurrently from `./data`.
//! 2. Each loader parses its file and fills the panel models held in
//!    `AppState::panels`; water samples go through an in-memory SQLite
//!    database for the site by year means.
//! 3. The taxa selector reloads only the biodiversity JSON and hands it to
//!    the existing timeline and stacked area chart.

mod load;

use grsm_chart_ui::components::{
    AncTrendPanel, HeatmapPanel, ParksPanel, StackedAreaPanel, TaxaSelector, TimelinePanel,
    VisibilityPanel, VisitsPanel,
};
use grsm_chart_ui::state::AppState;
use dioxus::prelude::*;

fn main() {
    dioxus_logger::init(dioxus_logger::tracing::Level::INFO).expect("failed to init logger");
    dioxus::LaunchBuilder::new()
        .with_cfg(dioxus::web::Config::new().rootname("grsm-root"))
        .launch(App);
}

#[component]
fn App() -> Element {
    let state = use_context_provider(AppState::new);

    // Every dataset except biodiversity loads once, independently.
    use_effect(move || {
        log::info!("[GRSM] loading datasets from {}", load::dataset_paths().base());
        spawn(load::load_water(state));
        spawn(load::load_visits(state));
        spawn(load::load_visibility(state));
        spawn(load::load_parks(state));
    });

    // Biodiversity follows the taxa selector.
    use_effect(move || {
        let group = (state.taxa)();
        spawn(load::load_biodiversity(state, group));
    });

    rsx! {
        div {
            style: "max-width: 1400px; margin: 0 auto; padding: 16px; font-family: sans-serif;",
            h1 { "Great Smoky Mountains National Park" }
            section {
                TaxaSelector {}
                TimelinePanel {}
                StackedAreaPanel {}
            }
            section {
                VisibilityPanel {}
            }
            section {
                HeatmapPanel {}
                AncTrendPanel {}
            }
            section {
                VisitsPanel {}
            }
            section {
                ParksPanel {}
            }
        }
    }
}

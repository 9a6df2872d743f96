//! Dataset loaders. Each one fetches a single file, fills the panels that
//! use it and settles that dataset's status; a failure stays local to it.

use grsm_chart_ui::js_bridge;
use grsm_chart_ui::state::{AppState, PanelStatus, Panels};
use grsm_charts::heatmap::{HeatCell, TOP_SITES};
use grsm_data::biodiversity::{self, TaxaGroup};
use grsm_data::status::prepare;
use grsm_data::water::{self, ANC};
use grsm_data::{parks, visibility, visits, DatasetKind, DatasetPaths, LoadError, WaterSample};
use grsm_db::Database;
use dioxus::prelude::*;

/// Data files are served next to the app.
pub fn dataset_paths() -> DatasetPaths {
    DatasetPaths::new("./data")
}

async fn fetch(kind: DatasetKind) -> Result<String, LoadError> {
    js_bridge::fetch_dataset(&dataset_paths(), kind).await
}

/// Heatmap cells: mean ANC per site and year for the best covered sites.
fn heat_cells(samples: &[WaterSample]) -> anyhow::Result<Vec<HeatCell>> {
    let db = Database::new()?;
    db.load_water_samples(samples)?;
    Ok(db
        .query_site_year_means(ANC, TOP_SITES)?
        .into_iter()
        .map(|m| HeatCell {
            site: m.site,
            year: m.year,
            value: m.value,
        })
        .collect())
}

fn water_panels(body: &str) -> anyhow::Result<(Vec<WaterSample>, Vec<HeatCell>)> {
    let samples = water::parse_water_results(body)?;
    let cells = heat_cells(&samples)?;
    Ok((samples, cells))
}

pub async fn load_water(mut state: AppState) {
    let kind = DatasetKind::WaterResults;
    let outcome = prepare(kind, fetch(kind).await, water_panels);
    let status = PanelStatus::settle(&outcome);
    if let Ok((samples, cells)) = outcome {
        let observations = water::with_characteristic(&samples, ANC)
            .map(|s| (s.year, s.value))
            .collect();
        let mut panels = state.panels.write();
        panels.heatmap.set_data(cells);
        panels.anc.borrow_mut().set_data(observations);
        log::info!("[GRSM] water: {} samples", samples.len());
    }
    state.water_status.set(status);
}

pub async fn load_visits(mut state: AppState) {
    let kind = DatasetKind::Visits;
    let outcome = prepare(kind, fetch(kind).await, visits::parse_visits);
    let status = PanelStatus::settle(&outcome);
    if let Ok(records) = outcome {
        let mut panels = state.panels.write();
        panels.visits.set_data(&records);
        panels.visibility.set_visits_overlay(records);
    }
    state.visits_status.set(status);
}

pub async fn load_visibility(mut state: AppState) {
    let kind = DatasetKind::Visibility;
    let outcome = prepare(kind, fetch(kind).await, visibility::parse_visibility);
    let status = PanelStatus::settle(&outcome);
    if let Ok(readings) = outcome {
        state.panels.write().visibility.set_data(readings);
    }
    state.visibility_status.set(status);
}

pub async fn load_parks(mut state: AppState) {
    let kind = DatasetKind::Parks;
    let outcome = prepare(kind, fetch(kind).await, parks::parse_parks);
    let status = PanelStatus::settle(&outcome);
    if let Ok(records) = outcome {
        state.panels.write().parks.set_data(records);
    }
    state.parks_status.set(status);
}

/// Load one taxa group into the existing timeline and stacked area chart.
///
/// The first load flips the status to ready and the panels draw themselves;
/// later loads push fresh frames straight away.
pub async fn load_biodiversity(mut state: AppState, group: TaxaGroup) {
    let kind = DatasetKind::Biodiversity(group);
    let outcome = prepare(kind, fetch(kind).await, biodiversity::parse_biodiversity);
    let status = PanelStatus::settle(&outcome);
    let Ok(prepared) = outcome else {
        return state.biodiversity_status.set(status);
    };
    if *state.taxa.peek() != group {
        log::debug!("[GRSM] dropping stale {} load", group);
        return;
    }

    let already_drawn = state.biodiversity_status.peek().is_ready();
    {
        let mut guard = state.panels.write();
        let Panels { timeline, stacked, .. } = &mut *guard;
        stacked.set_data(prepared.layers);
        timeline.set_data(&prepared.years, stacked);
        if already_drawn {
            state.timeline_frame.set(Some(timeline.frame()));
            state.area_frame.set(Some(stacked.render()));
        }
    }
    if !already_drawn {
        state.biodiversity_status.set(status);
    }
    log::info!("[GRSM] biodiversity: showing {}", group);
}

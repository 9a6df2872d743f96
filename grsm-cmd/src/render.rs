//! `render`: draw one panel with a fixed viewport and write it as SVG.

use crate::source;
use clap::ValueEnum;
use grsm_charts::anc_trend::{self, AncTrend};
use grsm_charts::heatmap::{self, HeatCell, WaterHeatmap, TOP_SITES};
use grsm_charts::parks::{self, ParksComparison};
use grsm_charts::stacked_area::{self, StackedAreaChart};
use grsm_charts::svg;
use grsm_charts::timeline::{self, Timeline};
use grsm_charts::viewport::{FixedViewport, Layout, Size};
use grsm_charts::visibility::{self, VisibilityGraph};
use grsm_charts::visits::{self, VisitsChart};
use grsm_charts::Dispatcher;
use grsm_data::biodiversity::{PreparedBiodiversity, TaxaGroup};
use grsm_data::water::ANC;
use grsm_data::{DatasetPaths, ParkRecord, VisibilityReading, VisitRecord, WaterSample};
use grsm_db::Database;
use log::{info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Panel {
    Timeline,
    Stacked,
    Heatmap,
    Anc,
    Visits,
    Parks,
    Visibility,
}

pub fn timeline_svg(prepared: &PreparedBiodiversity, size: Size) -> String {
    let mut chart = Timeline::new(&prepared.years);
    svg::timeline(&chart.render(&FixedViewport(size), timeline::CONTAINER_ID))
}

pub fn stacked_svg(prepared: &PreparedBiodiversity, size: Size) -> String {
    let mut chart = StackedAreaChart::new(prepared.layers.clone());
    chart.initialize(Layout::new(size, stacked_area::MARGIN));
    svg::stacked_area(&chart.render())
}

/// Site by year means come from the water database, as on the page.
pub fn heat_cells(samples: &[WaterSample]) -> anyhow::Result<Vec<HeatCell>> {
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

pub fn heatmap_svg(samples: &[WaterSample], size: Size) -> anyhow::Result<String> {
    let mut chart = WaterHeatmap::new(heat_cells(samples)?, Dispatcher::new());
    Ok(svg::heatmap(
        &chart.render(&FixedViewport(size), heatmap::CONTAINER_ID),
    ))
}

pub fn anc_svg(samples: &[WaterSample], size: Size) -> String {
    let mut chart = AncTrend::from_samples(samples);
    svg::anc_trend(&chart.render(&FixedViewport(size), anc_trend::CONTAINER_ID))
}

pub fn visits_svg(records: &[VisitRecord], size: Size) -> String {
    let mut chart = VisitsChart::new(records);
    svg::visits(&chart.render(&FixedViewport(size), visits::CONTAINER_ID))
}

pub fn parks_svg(records: Vec<ParkRecord>, size: Size) -> String {
    let mut chart = ParksComparison::new(records);
    svg::parks(&chart.render(&FixedViewport(size), parks::CONTAINER_ID))
}

/// The PM2.5 line is always drawn in exports; the overlay only when visits
/// are available.
pub fn visibility_svg(
    readings: Vec<VisibilityReading>,
    overlay: Option<Vec<VisitRecord>>,
    size: Size,
) -> String {
    let mut graph = VisibilityGraph::new();
    graph.set_data(readings);
    if let Some(records) = overlay {
        graph.set_visits_overlay(records);
    }
    graph.set_visibility_line_visible(true);
    graph.initialize(Layout::new(size, visibility::MARGIN));
    svg::visibility(&graph.update())
}

async fn draw(
    paths: &DatasetPaths,
    panel: Panel,
    taxa: TaxaGroup,
    size: Size,
) -> anyhow::Result<String> {
    Ok(match panel {
        Panel::Timeline => timeline_svg(&source::biodiversity(paths, taxa).await?, size),
        Panel::Stacked => stacked_svg(&source::biodiversity(paths, taxa).await?, size),
        Panel::Heatmap => heatmap_svg(&source::water_samples(paths).await?, size)?,
        Panel::Anc => anc_svg(&source::water_samples(paths).await?, size),
        Panel::Visits => visits_svg(&source::visit_records(paths).await?, size),
        Panel::Parks => parks_svg(source::park_records(paths).await?, size),
        Panel::Visibility => {
            let readings = source::visibility_readings(paths).await?;
            let overlay = match source::visit_records(paths).await {
                Ok(records) => Some(records),
                Err(e) => {
                    warn!("[GRSM] render: drawing without visits overlay: {}", e);
                    None
                }
            };
            visibility_svg(readings, overlay, size)
        }
    })
}

pub async fn run_render(
    data_dir: &str,
    panel: Panel,
    out: &str,
    taxa: TaxaGroup,
    width: f64,
    height: f64,
) -> anyhow::Result<()> {
    if !(width.is_finite() && height.is_finite() && width > 0.0 && height > 0.0) {
        anyhow::bail!("invalid size {}x{}", width, height);
    }
    let paths = DatasetPaths::new(data_dir);
    let document = draw(&paths, panel, taxa, Size::new(width, height)).await?;
    tokio::fs::write(out, &document).await?;
    info!(
        "[GRSM] render: wrote {:?} ({} bytes) to {}",
        panel,
        document.len(),
        out
    );
    Ok(())
}

//! `summary`: species totals, yearly totals and the park-wide ANC trend.

use crate::source;
use chrono::Datelike;
use grsm_data::biodiversity::{PreparedBiodiversity, TaxaGroup};
use grsm_data::stats::least_squares;
use grsm_data::water::ANC;
use grsm_data::{DatasetPaths, WaterSample, YearMean};
use grsm_db::Database;
use log::{info, warn};
use serde::Serialize;
use std::collections::BTreeMap;

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct SpeciesTotal {
    pub species: String,
    pub total: f64,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct YearTotal {
    pub year: i32,
    pub total: f64,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct AncSummary {
    pub samples: usize,
    pub yearly_means: Vec<YearMean>,
    /// Change in mean ANC per year; `None` with fewer than two years.
    pub slope: Option<f64>,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Summary {
    pub taxa: TaxaGroup,
    /// Largest first.
    pub species: Vec<SpeciesTotal>,
    pub years: Vec<YearTotal>,
    pub anc: Option<AncSummary>,
}

/// Totals over every prepared layer, largest first (ties by name).
pub fn species_totals(prepared: &PreparedBiodiversity) -> Vec<SpeciesTotal> {
    let mut totals: BTreeMap<&str, f64> = BTreeMap::new();
    for layer in &prepared.layers {
        for (species, count) in &layer.counts {
            if count.is_finite() {
                *totals.entry(species.as_str()).or_default() += count;
            }
        }
    }
    let mut totals: Vec<SpeciesTotal> = totals
        .into_iter()
        .map(|(species, total)| SpeciesTotal {
            species: species.to_string(),
            total,
        })
        .collect();
    totals.sort_by(|a, b| b.total.total_cmp(&a.total));
    totals
}

pub fn year_totals(prepared: &PreparedBiodiversity) -> Vec<YearTotal> {
    prepared
        .years
        .iter()
        .filter_map(|r| {
            r.year.map(|d| YearTotal {
                year: d.year(),
                total: r.total_spotted,
            })
        })
        .collect()
}

/// ANC yearly means through the water database, with their trend.
pub fn anc_summary(samples: &[WaterSample]) -> anyhow::Result<AncSummary> {
    let db = Database::new()?;
    let samples = db.load_water_samples(samples)?;
    let yearly_means = db.query_yearly_means(ANC, None)?;
    let xs: Vec<f64> = yearly_means.iter().map(|m| m.year as f64).collect();
    let ys: Vec<f64> = yearly_means.iter().map(|m| m.mean).collect();
    Ok(AncSummary {
        samples,
        slope: least_squares(&xs, &ys).map(|t| t.slope),
        yearly_means,
    })
}

pub fn summarize(
    taxa: TaxaGroup,
    prepared: &PreparedBiodiversity,
    samples: Option<&[WaterSample]>,
) -> anyhow::Result<Summary> {
    let anc = match samples {
        Some(samples) => Some(anc_summary(samples)?),
        None => None,
    };
    Ok(Summary {
        taxa,
        species: species_totals(prepared),
        years: year_totals(prepared),
        anc,
    })
}

/// Plain-text report.
pub fn format_summary(summary: &Summary) -> String {
    let mut out = String::new();
    out.push_str(&format!("Taxa: {}\n", summary.taxa.label()));
    out.push_str(&format!("\nSpecies ({}):\n", summary.species.len()));
    for s in &summary.species {
        out.push_str(&format!("  {:<32} {:>10}\n", s.species, s.total));
    }
    out.push_str("\nLifeforms spotted per year:\n");
    for y in &summary.years {
        out.push_str(&format!("  {}  {:>10}\n", y.year, y.total));
    }
    match &summary.anc {
        Some(anc) => {
            out.push_str(&format!("\nANC yearly means ({} samples):\n", anc.samples));
            for m in &anc.yearly_means {
                out.push_str(&format!("  {}  {:>8.2}\n", m.year, m.mean));
            }
            match anc.slope {
                Some(slope) => out.push_str(&format!("  trend: {:+.3} µeq/L per year\n", slope)),
                None => out.push_str("  trend: not enough years\n"),
            }
        }
        None => out.push_str("\nANC: water results unavailable\n"),
    }
    out
}

pub async fn run_summary(data_dir: &str, taxa: TaxaGroup, json: bool) -> anyhow::Result<()> {
    let paths = DatasetPaths::new(data_dir);
    let prepared = source::biodiversity(&paths, taxa).await?;
    // Water results are optional; the report notes when they are missing.
    let samples = match source::water_samples(&paths).await {
        Ok(samples) => Some(samples),
        Err(e) => {
            warn!("[GRSM] {}", e);
            None
        }
    };
    let summary = summarize(taxa, &prepared, samples.as_deref())?;
    info!(
        "[GRSM] summary: {} species over {} years",
        summary.species.len(),
        summary.years.len()
    );
    if json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        print!("{}", format_summary(&summary));
    }
    Ok(())
}

//! Biodiversity occurrence counts.
//!
//! The source JSON has the shape `{ "layers": [{ "Year": "2004", "<species>": n, ... }] }`.
//! Preparation unions the species keys over every layer, fills missing
//! species with 0, drops layers whose year is unusable and derives one
//! yearly total per layer.

use crate::records::{LayerRecord, YearRecord};
use grsm_utils::dates;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::str::FromStr;

/// Field holding the year in every layer object.
pub const YEAR_FIELD: &str = "Year";

/// Taxa groups offered by the selector. `All` is the combined dataset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum TaxaGroup {
    #[default]
    All,
    Amphibians,
    Birds,
    Fish,
    Insects,
    Mammals,
    Plants,
    Reptiles,
    Worms,
}

impl TaxaGroup {
    pub const ALL: [TaxaGroup; 9] = [
        TaxaGroup::All,
        TaxaGroup::Amphibians,
        TaxaGroup::Birds,
        TaxaGroup::Fish,
        TaxaGroup::Insects,
        TaxaGroup::Mammals,
        TaxaGroup::Plants,
        TaxaGroup::Reptiles,
        TaxaGroup::Worms,
    ];

    /// Lowercase selector value.
    pub fn as_str(&self) -> &'static str {
        match self {
            TaxaGroup::All => "all",
            TaxaGroup::Amphibians => "amphibians",
            TaxaGroup::Birds => "birds",
            TaxaGroup::Fish => "fish",
            TaxaGroup::Insects => "insects",
            TaxaGroup::Mammals => "mammals",
            TaxaGroup::Plants => "plants",
            TaxaGroup::Reptiles => "reptiles",
            TaxaGroup::Worms => "worms",
        }
    }

    /// Human readable label for the selector.
    pub fn label(&self) -> &'static str {
        match self {
            TaxaGroup::All => "All Taxa",
            TaxaGroup::Amphibians => "Amphibians",
            TaxaGroup::Birds => "Birds",
            TaxaGroup::Fish => "Fish",
            TaxaGroup::Insects => "Insects",
            TaxaGroup::Mammals => "Mammals",
            TaxaGroup::Plants => "Plants",
            TaxaGroup::Reptiles => "Reptiles",
            TaxaGroup::Worms => "Worms",
        }
    }

    /// Dataset file name: `biodiversityDataFinal.json` for all taxa,
    /// `biodiversity<Group>DataFinal.json` otherwise.
    pub fn file_name(&self) -> String {
        match self {
            TaxaGroup::All => "biodiversityDataFinal.json".to_string(),
            other => {
                let name = other.as_str();
                let mut chars = name.chars();
                let capitalized: String = match chars.next() {
                    Some(first) => first.to_uppercase().chain(chars).collect(),
                    None => String::new(),
                };
                format!("biodiversity{}DataFinal.json", capitalized)
            }
        }
    }
}

impl fmt::Display for TaxaGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TaxaGroup {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        TaxaGroup::ALL
            .iter()
            .copied()
            .find(|g| g.as_str() == wanted)
            .ok_or_else(|| format!("unknown taxa group: {}", s))
    }
}

/// Raw file contents; only `layers` is used.
#[derive(Debug, Deserialize)]
struct BiodiversityFile {
    #[serde(default)]
    layers: Vec<Map<String, Value>>,
}

/// Output of [`prepare`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PreparedBiodiversity {
    /// Sorted union of species names.
    pub species: Vec<String>,
    /// One record per usable year, ascending.
    pub layers: Vec<LayerRecord>,
    /// Yearly totals, ascending, aligned with `layers`.
    pub years: Vec<YearRecord>,
}

/// Parse the biodiversity JSON and prepare layer/year records.
pub fn parse_biodiversity(json: &str) -> anyhow::Result<PreparedBiodiversity> {
    let file: BiodiversityFile = serde_json::from_str(json)?;
    Ok(prepare(&file.layers))
}

fn year_of(value: &Value) -> Option<i32> {
    match value {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().filter(|f| f.fract() == 0.0).map(|f| f as i64))
            .and_then(|y| i32::try_from(y).ok()),
        Value::String(s) => dates::parse_year(s).ok(),
        _ => None,
    }
}

/// Numeric value of a count cell; anything non-numeric counts as 0.
fn count_of(value: Option<&Value>) -> f64 {
    let parsed = match value {
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => s.trim().parse::<f64>().ok(),
        Some(Value::Bool(b)) => Some(if *b { 1.0 } else { 0.0 }),
        _ => None,
    };
    parsed.filter(|v| v.is_finite()).unwrap_or(0.0)
}

/// Union species, fill gaps with 0, drop unusable years, derive totals.
pub fn prepare(raw_layers: &[Map<String, Value>]) -> PreparedBiodiversity {
    let species: Vec<String> = raw_layers
        .iter()
        .flat_map(|layer| layer.keys())
        .filter(|k| k.as_str() != YEAR_FIELD)
        .cloned()
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();

    let mut dropped = 0usize;
    let mut layers: Vec<LayerRecord> = Vec::with_capacity(raw_layers.len());
    for raw in raw_layers {
        let year = raw
            .get(YEAR_FIELD)
            .and_then(year_of)
            .and_then(dates::year_start);
        let Some(year) = year else {
            dropped += 1;
            continue;
        };
        let counts: BTreeMap<String, f64> = species
            .iter()
            .map(|s| (s.clone(), count_of(raw.get(s))))
            .collect();
        layers.push(LayerRecord::new(year, counts));
    }
    layers.sort_by_key(|l| l.year);

    let years = layers
        .iter()
        .map(|l| YearRecord {
            year: l.year,
            total_spotted: l.total(),
        })
        .collect();

    log::info!(
        "[GRSM] biodiversity: prepared {} species over {} years (dropped {})",
        species.len(),
        layers.len(),
        dropped
    );

    PreparedBiodiversity {
        species,
        layers,
        years,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    const SAMPLE: &str = r#"{
        "years": [{"Year": 2001, "Total Animals Spotted": 4}],
        "layers": [
            {"Year": "2002", "Black Bear": 3, "Elk": "2"},
            {"Year": "2001", "Black Bear": 1, "Brook Trout": 5},
            {"Year": "abcd", "Elk": 9},
            {"Year": "1750", "Elk": 9},
            {"Year": 2003, "Elk": "lots"}
        ]
    }"#;

    fn ymd(y: i32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, 1, 1).unwrap()
    }

    #[test]
    fn prepares_sorted_filled_layers() {
        let prepared = parse_biodiversity(SAMPLE).unwrap();
        assert_eq!(prepared.species, vec!["Black Bear", "Brook Trout", "Elk"]);
        assert_eq!(prepared.layers.len(), 3);

        let first = &prepared.layers[0];
        assert_eq!(first.year, Some(ymd(2001)));
        assert_eq!(first.counts["Black Bear"], 1.0);
        assert_eq!(first.counts["Brook Trout"], 5.0);
        assert_eq!(first.counts["Elk"], 0.0);

        // Every record carries the full species set.
        for layer in &prepared.layers {
            assert_eq!(layer.counts.len(), 3);
        }

        // Non-numeric counts become 0.
        assert_eq!(prepared.layers[2].counts["Elk"], 0.0);
    }

    #[test]
    fn derives_yearly_totals() {
        let prepared = parse_biodiversity(SAMPLE).unwrap();
        let totals: Vec<(Option<NaiveDate>, f64)> = prepared
            .years
            .iter()
            .map(|y| (y.year, y.total_spotted))
            .collect();
        assert_eq!(
            totals,
            vec![
                (Some(ymd(2001)), 6.0),
                (Some(ymd(2002)), 5.0),
                (Some(ymd(2003)), 0.0)
            ]
        );
    }

    #[test]
    fn empty_layers_are_fine() {
        let prepared = parse_biodiversity(r#"{"layers": []}"#).unwrap();
        assert!(prepared.layers.is_empty());
        assert!(prepared.years.is_empty());
        assert!(parse_biodiversity("not json").is_err());
    }

    #[test]
    fn drops_layers_outside_the_survey_years() {
        let prepared = parse_biodiversity(
            r#"{"layers": [
                {"Year": 1799, "Elk": 1},
                {"Year": 2025, "Elk": 2},
                {"Year": 2026, "Elk": 3}
            ]}"#,
        )
        .unwrap();
        assert_eq!(prepared.layers.len(), 1);
        assert_eq!(prepared.layers[0].year, Some(ymd(2025)));
        assert_eq!(prepared.years[0].total_spotted, 2.0);
    }

    #[test]
    fn taxa_group_file_names() {
        assert_eq!(TaxaGroup::All.file_name(), "biodiversityDataFinal.json");
        assert_eq!(
            TaxaGroup::Mammals.file_name(),
            "biodiversityMammalsDataFinal.json"
        );
        assert_eq!("Fish".parse::<TaxaGroup>().unwrap(), TaxaGroup::Fish);
        assert!("dragons".parse::<TaxaGroup>().is_err());
    }
}

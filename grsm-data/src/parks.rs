//! Species inventory for the national park comparison.
//!
//! Expected CSV (with headers): `park,speciesTotal,description`

use crate::records::ParkRecord;
use grsm_utils::numbers::parse_number;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct ParkRow {
    park: String,
    #[serde(rename = "speciesTotal")]
    species_total: String,
    #[serde(default)]
    description: String,
}

/// Parse the parks CSV, sorted by species total (largest first).
pub fn parse_parks(csv_data: &str) -> anyhow::Result<Vec<ParkRecord>> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(csv_data.as_bytes());

    let mut parks = Vec::new();
    for result in rdr.deserialize::<ParkRow>() {
        let row = result?;
        match parse_number(&row.species_total) {
            Ok(species_total) => parks.push(ParkRecord {
                park: row.park,
                species_total,
                description: row.description,
            }),
            Err(e) => log::debug!("[GRSM] parks: skipping {}: {}", row.park, e),
        }
    }
    parks.sort_by(|a, b| b.species_total.total_cmp(&a.species_total));
    Ok(parks)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sorts_descending() {
        let csv = "\
park,speciesTotal,description
Yellowstone,\"2,100\",Geysers
Great Smoky Mountains,19000,Salamander capital
Acadia,unknown,Coast
";
        let parks = parse_parks(csv).unwrap();
        assert_eq!(parks.len(), 2);
        assert_eq!(parks[0].park, "Great Smoky Mountains");
        assert_eq!(parks[1].species_total, 2100.0);
    }
}

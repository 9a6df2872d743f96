//! Water-quality sample rows.
//!
//! Expected CSV (with headers, extra columns ignored):
//! `Activity_ID,Location_ID,Characteristic_Name,Result_Text,...`
//!
//! The activity id embeds the sampling date as an eight digit `YYYYMMDD`
//! block; rows without one, or whose result is not numeric, are dropped.

use crate::records::WaterSample;
use grsm_utils::dates;
use grsm_utils::numbers::parse_number;
use serde::Deserialize;

/// Characteristic shown by the heatmap and trend panels.
pub const ANC: &str = "Acid Neutralizing Capacity (ANC)";

#[derive(Debug, Deserialize)]
struct WaterRow {
    #[serde(rename = "Activity_ID", default)]
    activity_id: String,
    #[serde(rename = "Location_ID", default)]
    location_id: String,
    #[serde(rename = "Characteristic_Name", default)]
    characteristic_name: String,
    #[serde(rename = "Result_Text", default)]
    result_text: String,
}

/// Parse the water results CSV into samples, dropping malformed rows.
pub fn parse_water_results(csv_data: &str) -> anyhow::Result<Vec<WaterSample>> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(csv_data.as_bytes());

    let mut samples = Vec::new();
    let mut skipped = 0u32;
    for result in rdr.deserialize::<WaterRow>() {
        let row = match result {
            Ok(row) => row,
            Err(e) => {
                log::debug!("[GRSM] water: skipping unreadable row: {}", e);
                skipped += 1;
                continue;
            }
        };
        let Some(year) = dates::year_from_activity_id(&row.activity_id) else {
            skipped += 1;
            continue;
        };
        let Ok(value) = parse_number(&row.result_text) else {
            skipped += 1;
            continue;
        };
        samples.push(WaterSample {
            location_id: row.location_id,
            characteristic: row.characteristic_name,
            year,
            date: dates::date_from_activity_id(&row.activity_id),
            value,
        });
    }
    log::info!(
        "[GRSM] water: loaded {} samples, skipped {}",
        samples.len(),
        skipped
    );
    Ok(samples)
}

/// Samples of one characteristic, in input order.
pub fn with_characteristic<'a>(
    samples: &'a [WaterSample],
    characteristic: &'a str,
) -> impl Iterator<Item = &'a WaterSample> + 'a {
    samples
        .iter()
        .filter(move |s| s.characteristic == characteristic)
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use chrono::NaiveDate;

    pub(crate) const WATER_CSV: &str = "\
Activity_ID,Location_ID,Characteristic_Name,Result_Text,Unit
GRSM_F_0101_20000515_S,GRSM_F_0101,Acid Neutralizing Capacity (ANC),10,ueq/L
GRSM_F_0101_20010515_S,GRSM_F_0101,Acid Neutralizing Capacity (ANC),20,ueq/L
GRSM_F_0202_20010601_S,GRSM_F_0202,Acid Neutralizing Capacity (ANC),30,ueq/L
GRSM_F_0202_20020601_S,GRSM_F_0202,Acid Neutralizing Capacity (ANC),15,ueq/L
GRSM_F_0202_20020601_S,GRSM_F_0202,pH,6.5,None
GRSM_F_0303_NODATE_S,GRSM_F_0303,Acid Neutralizing Capacity (ANC),12,ueq/L
GRSM_F_0303_20030601_S,GRSM_F_0303,Acid Neutralizing Capacity (ANC),*Non-detect,ueq/L
";

    #[test]
    fn parses_and_drops_malformed_rows() {
        let samples = parse_water_results(WATER_CSV).unwrap();
        assert_eq!(samples.len(), 5);
        assert_eq!(samples[0].year, 2000);
        assert_eq!(samples[0].date, NaiveDate::from_ymd_opt(2000, 5, 15));
        assert_eq!(samples[0].location_id, "GRSM_F_0101");
        assert_eq!(samples[2].value, 30.0);
    }

    #[test]
    fn filters_by_characteristic() {
        let samples = parse_water_results(WATER_CSV).unwrap();
        let anc: Vec<_> = with_characteristic(&samples, ANC).collect();
        assert_eq!(anc.len(), 4);
        assert!(anc.iter().all(|s| s.characteristic == ANC));
    }

    #[test]
    fn header_only_is_empty() {
        let samples =
            parse_water_results("Activity_ID,Location_ID,Characteristic_Name,Result_Text\n")
                .unwrap();
        assert!(samples.is_empty());
    }
}

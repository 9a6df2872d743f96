//! Hourly fine particulate (PM2.5) readings.
//!
//! Expected CSV (with headers): `DATE_TIME,GRSM-LR_PM2_5B_UG_M3_LC,...`
//! where `DATE_TIME` is `M/D/YYYY H:MM`. The monitoring network writes
//! `-999` for missing readings; those become NaN so the line breaks there.

use crate::records::VisibilityReading;
use chrono::NaiveDateTime;

pub const DATE_COLUMN: &str = "DATE_TIME";
pub const PM_COLUMN: &str = "GRSM-LR_PM2_5B_UG_M3_LC";
pub const DATE_FORMAT: &str = "%m/%d/%Y %H:%M";

/// Sentinel for a missing reading.
pub const MISSING: f64 = -999.0;

fn parse_pm(raw: &str) -> f64 {
    match raw.trim().parse::<f64>() {
        Ok(v) if v == MISSING => f64::NAN,
        Ok(v) => v,
        Err(_) => f64::NAN,
    }
}

/// Parse the visibility CSV. Rows with an unreadable timestamp are dropped;
/// unreadable or sentinel values are kept as NaN.
pub fn parse_visibility(csv_data: &str) -> anyhow::Result<Vec<VisibilityReading>> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(csv_data.as_bytes());

    let headers = rdr.headers()?.clone();
    let position = |name: &str| headers.iter().position(|h| h.trim() == name);
    let (Some(date_col), Some(pm_col)) = (position(DATE_COLUMN), position(PM_COLUMN)) else {
        anyhow::bail!(
            "visibility CSV is missing {} or {} columns",
            DATE_COLUMN,
            PM_COLUMN
        );
    };

    let mut readings = Vec::new();
    let mut skipped = 0u32;
    for result in rdr.records() {
        let r = result?;
        let date = r
            .get(date_col)
            .and_then(|d| NaiveDateTime::parse_from_str(d.trim(), DATE_FORMAT).ok());
        let Some(date) = date else {
            skipped += 1;
            continue;
        };
        let pm = r.get(pm_col).map(parse_pm).unwrap_or(f64::NAN);
        readings.push(VisibilityReading { date, pm });
    }
    log::info!(
        "[GRSM] visibility: loaded {} readings, skipped {}",
        readings.len(),
        skipped
    );
    Ok(readings)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    const VIS_CSV: &str = "\
DATE_TIME,GRSM-LR_PM2_5B_UG_M3_LC
1/5/2004 13:00,12.5
1/5/2004 14:00,-999
1/5/2004 15:00,-999.0
bad date,4.0
12/31/2004 23:00,n/a
";

    #[test]
    fn parses_sentinels_as_nan() {
        let readings = parse_visibility(VIS_CSV).unwrap();
        assert_eq!(readings.len(), 4);
        assert_eq!(
            readings[0].date,
            NaiveDate::from_ymd_opt(2004, 1, 5)
                .unwrap()
                .and_hms_opt(13, 0, 0)
                .unwrap()
        );
        assert_eq!(readings[0].pm, 12.5);
        assert!(readings[1].pm.is_nan());
        assert!(readings[2].pm.is_nan());
        assert!(readings[3].pm.is_nan());
    }

    #[test]
    fn missing_columns_is_an_error() {
        assert!(parse_visibility("when,what\n1/1/2000 0:00,1\n").is_err());
    }
}

//! IBTrACS best-track archive, rolled up to the latest observation per storm.

use chrono::{NaiveDate, NaiveDateTime};
use csv::StringRecord;
use std::collections::HashSet;
use tracing::{debug, info};

use crate::error::{FeedError, FeedResult};
use crate::fetch::{HttpClient, fetch_bytes};
use crate::models::HistoricalStorm;

const NAME: &str = "NAME";
const SEASON: &str = "SEASON";
const ISO_TIME: &str = "ISO_TIME";
const WMO_WIND: &str = "WMO_WIND";
const WMO_PRES: &str = "WMO_PRES";
const LAT: &str = "LAT";
const LON: &str = "LON";

/// Positions of the required columns within a CSV header.
struct Columns {
    name: usize,
    season: usize,
    iso_time: usize,
    wind: usize,
    pressure: usize,
    lat: usize,
    lon: usize,
}

impl Columns {
    fn locate(headers: &StringRecord) -> FeedResult<Self> {
        let find = |column: &str| {
            headers
                .iter()
                .position(|h| h == column)
                .ok_or_else(|| FeedError::parse(format!("missing required column {column}")))
        };

        Ok(Self {
            name: find(NAME)?,
            season: find(SEASON)?,
            iso_time: find(ISO_TIME)?,
            wind: find(WMO_WIND)?,
            pressure: find(WMO_PRES)?,
            lat: find(LAT)?,
            lon: find(LON)?,
        })
    }

    /// Builds a record from a row, or `None` if any required cell is blank,
    /// not a number, or not finite.
    ///
    /// A timestamp that is present but unreadable fails the whole archive.
    fn read(&self, row: &StringRecord) -> FeedResult<Option<HistoricalStorm>> {
        let date = match cell(row, self.iso_time) {
            Some(raw) => parse_timestamp(raw)
                .ok_or_else(|| FeedError::parse(format!("invalid {ISO_TIME} value '{raw}'")))?,
            None => return Ok(None),
        };

        Ok(self.complete(row, date))
    }

    fn complete(&self, row: &StringRecord, date: NaiveDateTime) -> Option<HistoricalStorm> {
        Some(HistoricalStorm {
            name: cell(row, self.name)?.to_string(),
            year: cell(row, self.season)?.parse().ok()?,
            date,
            wind_speed_knots: number(row, self.wind)?,
            pressure_hpa: number(row, self.pressure)?,
            latitude: number(row, self.lat)?,
            longitude: number(row, self.lon)?,
        })
    }
}

fn cell(row: &StringRecord, idx: usize) -> Option<&str> {
    row.get(idx).map(str::trim).filter(|v| !v.is_empty())
}

/// `NaN` and infinities count as missing values.
fn number(row: &StringRecord, idx: usize) -> Option<f64> {
    cell(row, idx)?
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
}

/// Parses an archive timestamp such as `2024-10-09 18:00:00`.
pub fn parse_timestamp(value: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(value, "%Y-%m-%d %H:%M:%S")
        .or_else(|_| NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S"))
        .ok()
        .or_else(|| {
            NaiveDate::parse_from_str(value, "%Y-%m-%d")
                .ok()
                .and_then(|d| d.and_hms_opt(0, 0, 0))
        })
}

/// Reads every complete observation from an IBTrACS CSV.
///
/// The row directly after the header carries units rather than data and is
/// skipped. Rows with a blank, non-numeric or non-finite value in any required
/// column are dropped.
///
/// # Errors
///
/// Returns a parse error if a required column is absent from the header, a
/// present timestamp cannot be read, or the CSV itself is malformed.
pub fn parse_ibtracs_csv(bytes: &[u8]) -> FeedResult<Vec<HistoricalStorm>> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::Headers)
        .from_reader(bytes);

    let columns = Columns::locate(rdr.headers()?)?;

    let mut rows = Vec::new();
    let mut dropped = 0usize;

    for result in rdr.records().skip(1) {
        let record = result?;
        match columns.read(&record)? {
            Some(storm) => rows.push(storm),
            None => dropped += 1,
        }
    }

    debug!(kept = rows.len(), dropped, "Archive rows filtered");
    Ok(rows)
}

/// Keeps the most recent observation of each storm name, newest first,
/// truncated to `limit` storms.
///
/// Observations with equal timestamps keep their input order.
pub fn latest_per_storm(mut rows: Vec<HistoricalStorm>, limit: usize) -> Vec<HistoricalStorm> {
    rows.sort_by(|a, b| b.date.cmp(&a.date));

    let mut seen = HashSet::new();
    rows.into_iter()
        .filter(|row| seen.insert(row.name.clone()))
        .take(limit)
        .collect()
}

/// Downloads the archive at `url` and returns the rollup of the latest
/// `limit` storms.
#[tracing::instrument(skip(client))]
pub async fn fetch_historical_storms<C: HttpClient + ?Sized>(
    client: &C,
    url: &str,
    limit: usize,
) -> FeedResult<Vec<HistoricalStorm>> {
    let bytes = fetch_bytes(client, url).await?;

    // The archive runs to tens of megabytes; keep the parse off the reactor.
    let rows = tokio::task::spawn_blocking(move || parse_ibtracs_csv(&bytes))
        .await
        .map_err(|e| FeedError::parse(format!("archive parser task failed: {e}")))??;

    let observations = rows.len();
    let storms = latest_per_storm(rows, limit);
    info!(observations, count = storms.len(), "Historical storms fetched");
    Ok(storms)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fetch::testing::StaticClient;

    const HEADER: &str = "SID,SEASON,NUMBER,BASIN,NAME,ISO_TIME,WMO_WIND,WMO_PRES,LAT,LON\n";
    const UNITS: &str = " ,Year, , , , ,kts,mb,degrees_north,degrees_east\n";

    fn archive(rows: &[&str]) -> String {
        let mut csv = format!("{HEADER}{UNITS}");
        for row in rows {
            csv.push_str(row);
            csv.push('\n');
        }
        csv
    }

    fn storm(name: &str, date: &str, wind: f64) -> HistoricalStorm {
        HistoricalStorm {
            name: name.to_string(),
            year: 2024,
            date: parse_timestamp(date).unwrap(),
            wind_speed_knots: wind,
            pressure_hpa: 990.0,
            latitude: 20.0,
            longitude: -60.0,
        }
    }

    #[test]
    fn test_parse_timestamp_formats() {
        let expected = NaiveDate::from_ymd_opt(2024, 10, 9)
            .unwrap()
            .and_hms_opt(18, 0, 0)
            .unwrap();
        assert_eq!(parse_timestamp("2024-10-09 18:00:00"), Some(expected));
        assert_eq!(parse_timestamp("2024-10-09T18:00:00"), Some(expected));
        assert_eq!(
            parse_timestamp("2024-10-09"),
            NaiveDate::from_ymd_opt(2024, 10, 9).unwrap().and_hms_opt(0, 0, 0)
        );
        assert_eq!(parse_timestamp("yesterday"), None);
    }

    #[test]
    fn test_parse_skips_units_row() {
        let csv = archive(&["2024281N21266,2024,80,NA,MILTON,2024-10-09 18:00:00,125,927,27.1,-83.4"]);
        let rows = parse_ibtracs_csv(csv.as_bytes()).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].name, "MILTON");
        assert_eq!(rows[0].year, 2024);
        assert_eq!(rows[0].wind_speed_knots, 125.0);
        assert_eq!(rows[0].pressure_hpa, 927.0);
        assert_eq!(rows[0].latitude, 27.1);
        assert_eq!(rows[0].longitude, -83.4);
    }

    #[test]
    fn test_parse_drops_incomplete_rows() {
        let csv = archive(&[
            "2024281N21266,2024,80,NA,MILTON,2024-10-09 18:00:00,125,927,27.1,-83.4",
            "2024281N21266,2024,80,NA,MILTON,2024-10-09 21:00:00, , ,27.3,-82.9",
            "2024268N17278,2024,72,NA,HELENE,,120,939,29.9,-83.9",
            "2024268N17278,2024,72,NA,HELENE,2024-09-27 00:00:00,n/a,939,29.9,-83.9",
        ]);
        let rows = parse_ibtracs_csv(csv.as_bytes()).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].date, parse_timestamp("2024-10-09 18:00:00").unwrap());
    }

    #[test]
    fn test_parse_drops_nan_and_infinite_values() {
        let csv = archive(&[
            "2024281N21266,2024,80,NA,MILTON,2024-10-09 18:00:00,NaN,927,27.1,-83.4",
            "2024281N21266,2024,80,NA,MILTON,2024-10-09 21:00:00,120,nan,27.3,-82.9",
            "2024281N21266,2024,80,NA,MILTON,2024-10-10 00:00:00,110,940,27.5,inf",
            "2024268N17278,2024,72,NA,HELENE,2024-09-27 00:00:00,120,939,29.9,-83.9",
        ]);
        let rows = parse_ibtracs_csv(csv.as_bytes()).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].name, "HELENE");
        assert!(rows[0].wind_speed_knots.is_finite());
    }

    #[test]
    fn test_parse_unreadable_timestamp_fails() {
        let csv = archive(&[
            "2024281N21266,2024,80,NA,MILTON,not-a-date,125,927,27.1,-83.4",
            "2024275N10328,2024,75,NA,KIRK,2024-10-04 18:00:00,90,960,31.0,-49.2",
        ]);
        let err = parse_ibtracs_csv(csv.as_bytes()).unwrap_err();
        assert!(matches!(err, FeedError::Parse(ref msg) if msg.contains("not-a-date")));
    }

    #[test]
    fn test_parse_missing_column_fails() {
        let csv = "SID,SEASON,NAME,ISO_TIME,WMO_WIND,LAT,LON\n,,,,,,\n";
        let err = parse_ibtracs_csv(csv.as_bytes()).unwrap_err();
        assert!(matches!(err, FeedError::Parse(ref msg) if msg.contains("WMO_PRES")));
    }

    #[test]
    fn test_parse_ragged_csv_fails() {
        let csv = archive(&["2024281N21266,2024,80,NA,MILTON"]);
        let err = parse_ibtracs_csv(csv.as_bytes()).unwrap_err();
        assert!(matches!(err, FeedError::Parse(_)));
    }

    #[test]
    fn test_parse_header_only() {
        let rows = parse_ibtracs_csv(HEADER.as_bytes()).unwrap();
        assert!(rows.is_empty());
    }

    #[test]
    fn test_latest_per_storm_keeps_most_recent() {
        let rows = vec![
            storm("HELENE", "2024-09-26 12:00:00", 110.0),
            storm("MILTON", "2024-10-08 00:00:00", 150.0),
            storm("HELENE", "2024-09-27 06:00:00", 60.0),
            storm("MILTON", "2024-10-10 06:00:00", 70.0),
            storm("KIRK", "2024-10-01 00:00:00", 125.0),
        ];

        let latest = latest_per_storm(rows, 50);
        let names: Vec<_> = latest.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, ["MILTON", "KIRK", "HELENE"]);
        assert_eq!(latest[0].wind_speed_knots, 70.0);
        assert_eq!(latest[2].date, parse_timestamp("2024-09-27 06:00:00").unwrap());
    }

    #[test]
    fn test_latest_per_storm_truncates() {
        let rows: Vec<_> = (0..80)
            .map(|i| {
                let mut s = storm(&format!("STORM{i:02}"), "2024-01-01 00:00:00", 30.0);
                s.date += chrono::Duration::hours(i);
                s
            })
            .collect();

        let latest = latest_per_storm(rows, 50);
        assert_eq!(latest.len(), 50);
        assert_eq!(latest[0].name, "STORM79");
        assert_eq!(latest[49].name, "STORM30");
        assert!(latest.windows(2).all(|w| w[0].date >= w[1].date));
    }

    #[test]
    fn test_latest_per_storm_tie_keeps_input_order() {
        let rows = vec![
            storm("NOT_NAMED", "2024-08-01 00:00:00", 25.0),
            storm("NOT_NAMED", "2024-08-01 00:00:00", 35.0),
        ];
        let latest = latest_per_storm(rows, 50);
        assert_eq!(latest.len(), 1);
        assert_eq!(latest[0].wind_speed_knots, 25.0);
    }

    #[tokio::test]
    async fn test_fetch_historical_storms() {
        let csv = archive(&[
            "2024281N21266,2024,80,NA,MILTON,2024-10-09 18:00:00,125,927,27.1,-83.4",
            "2024281N21266,2024,80,NA,MILTON,2024-10-10 00:00:00,90,950,27.8,-81.6",
            "2024268N17278,2024,72,NA,HELENE,2024-09-27 00:00:00,120,939,29.9,-83.9",
        ]);
        let client = StaticClient::ok(csv);
        let storms = fetch_historical_storms(&client, "http://feeds.test/ibtracs.csv", 50)
            .await
            .unwrap();

        assert_eq!(storms.len(), 2);
        assert_eq!(storms[0].name, "MILTON");
        assert_eq!(storms[0].wind_speed_knots, 90.0);
        assert_eq!(storms[1].name, "HELENE");
    }
}

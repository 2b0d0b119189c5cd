//! Output formatting and export for storm records.
//!
//! Supports pretty-printing, JSON logging, and CSV export.

use anyhow::{Context, Result};
use serde::Serialize;
use std::fmt::Debug;
use tracing::{debug, info};

use csv::WriterBuilder;
use std::fs::File;

/// Logs records using Rust's debug pretty-print format.
pub fn print_pretty<T: Debug>(records: &[T]) {
    for record in records {
        debug!("{:#?}", record);
    }
}

/// Logs a value as pretty-printed JSON.
pub fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    info!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Logs `records` as JSON or debug output, or `empty_message` at info level
/// when there are none. Returns the number of records logged.
pub fn log_records<T: Debug + Serialize>(
    records: &[T],
    json: bool,
    empty_message: &str,
) -> Result<usize> {
    if records.is_empty() {
        info!("{empty_message}");
    } else if json {
        print_json(records)?;
    } else {
        print_pretty(records);
    }
    Ok(records.len())
}

/// Writes `records` to a CSV file at `path`, replacing any existing file.
///
/// The header row is written even when there are no records.
pub fn write_records<T: Serialize>(path: &str, records: &[T], headers: &[&str]) -> Result<()> {
    debug!(path, rows = records.len(), "Writing CSV export");

    let file = File::create(path).with_context(|| format!("failed to create {path}"))?;

    let mut writer = WriterBuilder::new().has_headers(false).from_writer(file);
    writer.write_record(headers)?;
    for record in records {
        writer.serialize(record)?;
    }
    writer.flush()?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dashboard::TableRow;
    use crate::feeds::historical::parse_timestamp;
    use crate::models::{ActiveStorm, HistoricalStorm};
    use std::env;
    use std::fs;

    fn temp_path(name: &str) -> String {
        format!("{}/{}", env::temp_dir().display(), name)
    }

    fn active() -> ActiveStorm {
        ActiveStorm {
            name: "KIRK".into(),
            wind_speed_knots: 125.0,
            pressure_hpa: 934.0,
            latitude: 21.0,
            longitude: -48.2,
        }
    }

    #[test]
    fn test_print_pretty_does_not_panic() {
        print_pretty(&[active()]);
    }

    #[test]
    fn test_print_json_does_not_panic() {
        print_json(&[active()]).unwrap();
    }

    #[test]
    fn test_log_records_empty_logs_message() {
        let none: [HistoricalStorm; 0] = [];
        assert_eq!(log_records(&none, false, "No historical cyclones retrieved").unwrap(), 0);
        assert_eq!(log_records(&none, true, "No historical cyclones retrieved").unwrap(), 0);
        assert_eq!(log_records(&[active()], true, "unused").unwrap(), 1);
    }

    #[test]
    fn test_write_records_header_and_rows() {
        let path = temp_path("cyclone_monitor_test_active.csv");
        let _ = fs::remove_file(&path);

        write_records(&path, &[active(), active()], ActiveStorm::HEADERS).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        let lines: Vec<_> = content.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(
            lines[0],
            "Name,Wind Speed (knots),Pressure (hPa),Latitude,Longitude"
        );
        assert_eq!(lines[1], "KIRK,125.0,934.0,21.0,-48.2");

        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_write_records_overwrites() {
        let path = temp_path("cyclone_monitor_test_overwrite.csv");
        let _ = fs::remove_file(&path);

        write_records(&path, &[active(), active()], ActiveStorm::HEADERS).unwrap();
        write_records::<ActiveStorm>(&path, &[], ActiveStorm::HEADERS).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        assert_eq!(content.lines().count(), 1);

        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_write_historical_records() {
        let path = temp_path("cyclone_monitor_test_historical.csv");
        let _ = fs::remove_file(&path);

        let storm = HistoricalStorm {
            name: "HELENE".into(),
            year: 2024,
            date: parse_timestamp("2024-09-27 06:00:00").unwrap(),
            wind_speed_knots: 60.0,
            pressure_hpa: 980.0,
            latitude: 33.0,
            longitude: -84.0,
        };
        write_records(&path, &[storm], HistoricalStorm::HEADERS).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        assert!(content.starts_with("Name,Year,Date,"));
        assert!(content.contains("HELENE,2024,2024-09-27 06:00:00,60.0"));

        fs::remove_file(&path).unwrap();
    }
}

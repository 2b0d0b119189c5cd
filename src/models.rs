//! Storm records produced by the two feed pipelines.
//!
//! Field names serialize to the column headings shown on the dashboard, so
//! the same structs back the HTML tables, the JSON API and CSV exports.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Timestamp layout used for archive dates in every output.
pub const DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

mod date_format {
    use super::DATE_FORMAT;
    use chrono::NaiveDateTime;
    use serde::{Deserialize, Deserializer, Serializer, de::Error};

    pub fn serialize<S: Serializer>(date: &NaiveDateTime, s: S) -> Result<S::Ok, S::Error> {
        s.collect_str(&date.format(DATE_FORMAT))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<NaiveDateTime, D::Error> {
        let raw = String::deserialize(d)?;
        NaiveDateTime::parse_from_str(&raw, DATE_FORMAT).map_err(D::Error::custom)
    }
}

/// A currently active storm from the live feed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActiveStorm {
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "Wind Speed (knots)")]
    pub wind_speed_knots: f64,
    #[serde(rename = "Pressure (hPa)")]
    pub pressure_hpa: f64,
    #[serde(rename = "Latitude")]
    pub latitude: f64,
    #[serde(rename = "Longitude")]
    pub longitude: f64,
}

/// The most recent archived observation of one storm.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoricalStorm {
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "Year")]
    pub year: i32,
    #[serde(rename = "Date", with = "date_format")]
    pub date: NaiveDateTime,
    #[serde(rename = "Wind Speed (knots)")]
    pub wind_speed_knots: f64,
    #[serde(rename = "Pressure (hPa)")]
    pub pressure_hpa: f64,
    #[serde(rename = "Latitude")]
    pub latitude: f64,
    #[serde(rename = "Longitude")]
    pub longitude: f64,
}

/// Outcome of one pipeline run.
///
/// Keeps a legitimately empty feed apart from a failed one so the dashboard
/// can say "no active cyclones" without hiding an outage.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum FeedOutcome<T> {
    Data { records: Vec<T> },
    Empty,
    Failed { reason: String },
}

impl<T> FeedOutcome<T> {
    /// Wraps fetched records, mapping an empty list to [`FeedOutcome::Empty`].
    pub fn from_records(records: Vec<T>) -> Self {
        if records.is_empty() {
            FeedOutcome::Empty
        } else {
            FeedOutcome::Data { records }
        }
    }

    pub fn failed(reason: impl ToString) -> Self {
        FeedOutcome::Failed {
            reason: reason.to_string(),
        }
    }

    pub fn records(&self) -> &[T] {
        match self {
            FeedOutcome::Data { records } => records,
            _ => &[],
        }
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, FeedOutcome::Failed { .. })
    }
}

//! Live feed of currently active storms.

use serde::Deserialize;
use tracing::info;

use crate::error::FeedResult;
use crate::fetch::{HttpClient, fetch_bytes};
use crate::models::ActiveStorm;

#[derive(Debug, Deserialize)]
struct LiveFeed {
    #[serde(default)]
    storms: Vec<LiveStormEntry>,
}

#[derive(Debug, Deserialize)]
struct LiveStormEntry {
    name: String,
    wind: f64,
    pressure: f64,
    lat: f64,
    lon: f64,
}

impl From<LiveStormEntry> for ActiveStorm {
    fn from(entry: LiveStormEntry) -> Self {
        ActiveStorm {
            name: entry.name,
            wind_speed_knots: entry.wind,
            pressure_hpa: entry.pressure,
            latitude: entry.lat,
            longitude: entry.lon,
        }
    }
}

/// Decodes a `{"storms": [...]}` document into one record per entry.
///
/// A document without a `storms` key has no active storms.
///
/// # Errors
///
/// Returns a parse error if the body is not JSON or any entry lacks one of
/// `name`, `wind`, `pressure`, `lat` or `lon`.
pub fn parse_active_storms(bytes: &[u8]) -> FeedResult<Vec<ActiveStorm>> {
    let feed: LiveFeed = serde_json::from_slice(bytes)?;
    Ok(feed.storms.into_iter().map(ActiveStorm::from).collect())
}

/// Fetches and decodes the live feed at `url`.
#[tracing::instrument(skip(client))]
pub async fn fetch_active_storms<C: HttpClient + ?Sized>(
    client: &C,
    url: &str,
) -> FeedResult<Vec<ActiveStorm>> {
    let bytes = fetch_bytes(client, url).await?;
    let storms = parse_active_storms(&bytes)?;
    info!(count = storms.len(), "Active storms fetched");
    Ok(storms)
}

//! The two cyclone feed pipelines.
//!
//! [`live`] reads the currently active storms from a JSON feed. [`historical`]
//! reads the IBTrACS best-track CSV and rolls it up to the most recent
//! observation per storm. The pipelines share nothing but the HTTP client.

pub mod historical;
pub mod live;

pub use historical::{fetch_historical_storms, latest_per_storm, parse_ibtracs_csv};
pub use live::{fetch_active_storms, parse_active_storms};

/// NOAA/NHC feed of currently active storms.
pub const DEFAULT_LIVE_FEED_URL: &str = "https://www.nhc.noaa.gov/CurrentStorms.json";

/// IBTrACS v04r00, last three years of best-track observations.
pub const DEFAULT_HISTORICAL_FEED_URL: &str = "https://www.ncei.noaa.gov/data/international-best-track-archive-for-climate-stewardship-ibtracs/v04r00/access/csv/ibtracs.last3years.list.v04r00.csv";

/// Number of storms kept by the historical rollup.
pub const DEFAULT_HISTORICAL_LIMIT: usize = 50;

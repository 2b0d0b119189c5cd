//! Command-line and environment configuration.
//!
//! Every option can also be set through the environment (or a `.env` file,
//! loaded by the binary before parsing).

use anyhow::{Result, bail};
use clap::Args;
use std::time::Duration;

use crate::feeds::{DEFAULT_HISTORICAL_FEED_URL, DEFAULT_LIVE_FEED_URL};
use crate::monitor::MonitorConfig;

/// Feed endpoints, cache lifetimes and client settings.
#[derive(Debug, Clone, Args)]
pub struct FeedArgs {
    /// URL of the live active-storms JSON feed
    #[arg(long, env = "LIVE_FEED_URL", default_value = DEFAULT_LIVE_FEED_URL)]
    pub live_url: String,

    /// URL of the IBTrACS CSV archive
    #[arg(long, env = "HISTORICAL_FEED_URL", default_value = DEFAULT_HISTORICAL_FEED_URL)]
    pub historical_url: String,

    /// Seconds to cache the live feed
    #[arg(long, env = "LIVE_TTL_SECS", default_value_t = 1800)]
    pub live_ttl_secs: u64,

    /// Seconds to cache the historical rollup
    #[arg(long, env = "HISTORICAL_TTL_SECS", default_value_t = 86400)]
    pub historical_ttl_secs: u64,

    /// Number of storms kept by the historical rollup
    #[arg(long, env = "HISTORICAL_LIMIT", default_value_t = 50)]
    pub historical_limit: usize,

    /// Per-request HTTP timeout in seconds
    #[arg(long, env = "HTTP_TIMEOUT_SECS", default_value_t = 60)]
    pub http_timeout_secs: u64,
}

impl FeedArgs {
    pub fn validate(&self) -> Result<()> {
        if self.historical_limit == 0 {
            bail!("historical limit must be at least 1");
        }
        if self.http_timeout_secs == 0 {
            bail!("HTTP timeout must be at least 1 second");
        }
        Ok(())
    }

    pub fn http_timeout(&self) -> Duration {
        Duration::from_secs(self.http_timeout_secs)
    }

    pub fn monitor_config(&self) -> MonitorConfig {
        MonitorConfig {
            live_url: self.live_url.clone(),
            historical_url: self.historical_url.clone(),
            live_ttl: Duration::from_secs(self.live_ttl_secs),
            historical_ttl: Duration::from_secs(self.historical_ttl_secs),
            historical_limit: self.historical_limit,
        }
    }
}

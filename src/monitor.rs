//! Cached access to both feed pipelines.
//!
//! Each pipeline catches its own errors here and degrades to
//! [`FeedOutcome::Failed`], so a broken feed never takes the other one (or
//! the page) down with it.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;
use tracing::{debug, error};

use crate::cache::TtlCache;
use crate::feeds::{
    DEFAULT_HISTORICAL_FEED_URL, DEFAULT_HISTORICAL_LIMIT, DEFAULT_LIVE_FEED_URL,
    fetch_active_storms, fetch_historical_storms,
};
use crate::fetch::HttpClient;
use crate::models::{ActiveStorm, FeedOutcome, HistoricalStorm};

/// Endpoints, cache lifetimes and rollup size for the monitor.
#[derive(Debug, Clone)]
pub struct MonitorConfig {
    pub live_url: String,
    pub historical_url: String,
    pub live_ttl: Duration,
    pub historical_ttl: Duration,
    pub historical_limit: usize,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            live_url: DEFAULT_LIVE_FEED_URL.to_string(),
            historical_url: DEFAULT_HISTORICAL_FEED_URL.to_string(),
            live_ttl: Duration::from_secs(30 * 60),
            historical_ttl: Duration::from_secs(24 * 60 * 60),
            historical_limit: DEFAULT_HISTORICAL_LIMIT,
        }
    }
}

/// Both pipeline outcomes for one page render.
#[derive(Debug, Clone, Serialize)]
pub struct Snapshot {
    pub generated_at: DateTime<Utc>,
    pub live: FeedOutcome<ActiveStorm>,
    pub historical: FeedOutcome<HistoricalStorm>,
}

pub struct CycloneMonitor {
    client: Box<dyn HttpClient>,
    config: MonitorConfig,
    live_cache: Mutex<TtlCache<Vec<ActiveStorm>>>,
    historical_cache: Mutex<TtlCache<Vec<HistoricalStorm>>>,
}

impl CycloneMonitor {
    pub fn new(client: impl HttpClient + 'static, config: MonitorConfig) -> Self {
        Self {
            client: Box::new(client),
            live_cache: Mutex::new(TtlCache::new(config.live_ttl)),
            historical_cache: Mutex::new(TtlCache::new(config.historical_ttl)),
            config,
        }
    }

    pub fn config(&self) -> &MonitorConfig {
        &self.config
    }

    /// Active storms, from cache when fresh.
    ///
    /// Only successful fetches are cached; a failure is retried on the next
    /// call. The cache lock is held across the fetch so concurrent page loads
    /// share one request.
    pub async fn live_storms(&self) -> FeedOutcome<ActiveStorm> {
        let mut cache = self.live_cache.lock().await;
        if let Some(storms) = cache.get() {
            debug!(
                count = storms.len(),
                age_secs = ?cache.age_at(Instant::now()).map(|age| age.as_secs()),
                "Serving active storms from cache"
            );
            return FeedOutcome::from_records(storms);
        }

        match fetch_active_storms(self.client.as_ref(), &self.config.live_url).await {
            Ok(storms) => {
                cache.insert(storms.clone());
                FeedOutcome::from_records(storms)
            }
            Err(e) => {
                error!(error = %e, kind = e.kind(), "Failed to fetch real-time cyclone data");
                FeedOutcome::failed(e)
            }
        }
    }

    /// Latest observation of the most recent storms, from cache when fresh.
    pub async fn historical_storms(&self) -> FeedOutcome<HistoricalStorm> {
        let mut cache = self.historical_cache.lock().await;
        if let Some(storms) = cache.get() {
            debug!(
                count = storms.len(),
                age_secs = ?cache.age_at(Instant::now()).map(|age| age.as_secs()),
                "Serving historical storms from cache"
            );
            return FeedOutcome::from_records(storms);
        }

        let result = fetch_historical_storms(
            self.client.as_ref(),
            &self.config.historical_url,
            self.config.historical_limit,
        )
        .await;

        match result {
            Ok(storms) => {
                cache.insert(storms.clone());
                FeedOutcome::from_records(storms)
            }
            Err(e) => {
                error!(error = %e, kind = e.kind(), "Failed to fetch historical cyclones");
                FeedOutcome::failed(e)
            }
        }
    }

    /// Runs both pipelines concurrently.
    pub async fn snapshot(&self) -> Snapshot {
        let (live, historical) = tokio::join!(self.live_storms(), self.historical_storms());
        Snapshot {
            generated_at: Utc::now(),
            live,
            historical,
        }
    }

    /// Drops both cached results so the next call refetches.
    pub async fn invalidate(&self) {
        self.live_cache.lock().await.clear();
        self.historical_cache.lock().await.clear();
    }
}

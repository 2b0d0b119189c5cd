//! Wall-clock TTL cache for feed results.

use std::time::{Duration, Instant};

/// A single cached value with the time it was fetched.
#[derive(Debug, Clone)]
struct Entry<T> {
    value: T,
    fetched_at: Instant,
}

/// Holds the last successful result of one feed for a fixed time-to-live.
///
/// Unexpired values are served as-is, without revalidation against the
/// source.
#[derive(Debug)]
pub struct TtlCache<T> {
    ttl: Duration,
    entry: Option<Entry<T>>,
}

impl<T: Clone> TtlCache<T> {
    pub fn new(ttl: Duration) -> Self {
        Self { ttl, entry: None }
    }

    /// Returns the cached value if it is younger than the TTL.
    pub fn get(&self) -> Option<T> {
        self.get_at(Instant::now())
    }

    pub fn get_at(&self, now: Instant) -> Option<T> {
        self.entry
            .as_ref()
            .filter(|e| now.saturating_duration_since(e.fetched_at) < self.ttl)
            .map(|e| e.value.clone())
    }

    pub fn insert(&mut self, value: T) {
        self.insert_at(value, Instant::now());
    }

    pub fn insert_at(&mut self, value: T, fetched_at: Instant) {
        self.entry = Some(Entry { value, fetched_at });
    }

    /// Age of the cached value, expired or not.
    pub fn age_at(&self, now: Instant) -> Option<Duration> {
        self.entry
            .as_ref()
            .map(|e| now.saturating_duration_since(e.fetched_at))
    }

    pub fn clear(&mut self) {
        self.entry = None;
    }
}

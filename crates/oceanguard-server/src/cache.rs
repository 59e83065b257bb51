//! Short-lived in-memory caches for the two aggregation endpoints.
//!
//! A zero TTL disables fresh hits but entries are still stored, so the
//! analytics endpoint can always fall back to the last good result.

use std::sync::Arc;
use std::time::{Duration, Instant};

use oceanguard_alerts::AlertFeed;
use oceanguard_social::SocialMediaAnalytics;
use tokio::sync::RwLock;

#[derive(Debug)]
struct Entry<T> {
    stored_at: Instant,
    value: T,
}

/// One cached value with a freshness bound.
#[derive(Debug)]
pub struct CacheSlot<T> {
    ttl: Duration,
    entry: RwLock<Option<Entry<T>>>,
}

impl<T: Clone> CacheSlot<T> {
    #[must_use]
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            entry: RwLock::new(None),
        }
    }

    /// The cached value if it is younger than the TTL.
    pub async fn fresh(&self) -> Option<T> {
        if self.ttl.is_zero() {
            return None;
        }
        let guard = self.entry.read().await;
        guard
            .as_ref()
            .filter(|entry| entry.stored_at.elapsed() < self.ttl)
            .map(|entry| entry.value.clone())
    }

    /// The cached value regardless of age.
    pub async fn any(&self) -> Option<T> {
        self.entry
            .read()
            .await
            .as_ref()
            .map(|entry| entry.value.clone())
    }

    pub async fn store(&self, value: T) {
        *self.entry.write().await = Some(Entry {
            stored_at: Instant::now(),
            value,
        });
    }
}

/// Social analytics keyed by the `hazards_only` flag.
#[derive(Debug, Clone)]
pub struct AnalyticsCache {
    all_posts: Arc<CacheSlot<SocialMediaAnalytics>>,
    hazards_only: Arc<CacheSlot<SocialMediaAnalytics>>,
}

impl AnalyticsCache {
    #[must_use]
    pub fn new(ttl: Duration) -> Self {
        Self {
            all_posts: Arc::new(CacheSlot::new(ttl)),
            hazards_only: Arc::new(CacheSlot::new(ttl)),
        }
    }

    #[must_use]
    pub fn slot(&self, hazards_only: bool) -> &CacheSlot<SocialMediaAnalytics> {
        if hazards_only {
            &self.hazards_only
        } else {
            &self.all_posts
        }
    }
}

/// The most recently refreshed government alert feed.
pub type AlertsCache = Arc<CacheSlot<AlertFeed>>;

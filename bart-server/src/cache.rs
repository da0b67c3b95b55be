//! Caching layer for BART reference data.
//!
//! Station and route lists change rarely, so they are cached wholesale for
//! 24 hours and refreshed on the first request after expiry. Snapshots are
//! replaced whole, never partially updated. Concurrent misses may both
//! fetch and both insert; the last write wins, which is harmless because
//! the contents are identical.
//!
//! Real-time estimates and schedules are per-request data and pass through
//! uncached.

use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache as MokaCache;

use crate::bart::{BartApi, BartError};
use crate::domain::{Line, Route, Station, StationCode, TripOption, TripQuery};

/// Cache TTL for reference data (24 hours).
const REFERENCE_TTL: Duration = Duration::from_secs(24 * 60 * 60);

/// Configuration for the reference data cache.
#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// TTL for the station and route snapshots.
    pub ttl: Duration,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self { ttl: REFERENCE_TTL }
    }
}

/// Holds the two reference snapshots with a shared TTL.
struct ReferenceCache {
    stations: MokaCache<(), Arc<Vec<Station>>>,
    routes: MokaCache<(), Arc<Vec<Route>>>,
}

impl ReferenceCache {
    fn new(config: &CacheConfig) -> Self {
        Self {
            stations: MokaCache::builder().time_to_live(config.ttl).build(),
            routes: MokaCache::builder().time_to_live(config.ttl).build(),
        }
    }
}

/// BART client with reference-data caching.
///
/// Wraps any [`BartApi`] implementation and is itself a [`BartApi`]:
/// `stations`/`routes` consult the cache first, `estimates` and
/// `depart_schedule` delegate straight through.
pub struct CachedBartClient<C> {
    client: C,
    cache: ReferenceCache,
}

impl<C: BartApi> CachedBartClient<C> {
    /// Create a new cached client.
    pub fn new(client: C, config: &CacheConfig) -> Self {
        Self {
            client,
            cache: ReferenceCache::new(config),
        }
    }

    /// Access the underlying client.
    pub fn client(&self) -> &C {
        &self.client
    }

    /// Drop both snapshots, forcing a refetch on the next request.
    pub fn invalidate(&self) {
        self.cache.stations.invalidate_all();
        self.cache.routes.invalidate_all();
    }
}

impl<C: BartApi> BartApi for CachedBartClient<C> {
    /// Get the station snapshot, fetching and storing it on a miss.
    ///
    /// A failed upstream fetch propagates as-is: no retry, no stale-on-error
    /// fallback. Reference data changes rarely and callers can retry.
    async fn stations(&self) -> Result<Arc<Vec<Station>>, BartError> {
        if let Some(cached) = self.cache.stations.get(&()).await {
            return Ok(cached);
        }

        let fresh = self.client.stations().await?;
        self.cache.stations.insert((), fresh.clone()).await;
        Ok(fresh)
    }

    /// Get the route snapshot, fetching and storing it on a miss.
    async fn routes(&self) -> Result<Arc<Vec<Route>>, BartError> {
        if let Some(cached) = self.cache.routes.get(&()).await {
            return Ok(cached);
        }

        let fresh = self.client.routes().await?;
        self.cache.routes.insert((), fresh.clone()).await;
        Ok(fresh)
    }

    async fn estimates(&self, station: StationCode) -> Result<Vec<Line>, BartError> {
        self.client.estimates(station).await
    }

    async fn depart_schedule(&self, trip: TripQuery) -> Result<Vec<TripOption>, BartError> {
        self.client.depart_schedule(trip).await
    }
}

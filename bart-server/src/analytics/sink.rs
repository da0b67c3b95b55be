//! In-process analytics event sink.
//!
//! A bounded append-only store guarded by an async lock, shared by the
//! recorder (writes) and the admin query surface (reads). When the sink
//! fills up further appends fail and the recorder drops the event.

use std::collections::{BTreeMap, HashSet};
use std::sync::Arc;

use serde::Serialize;
use tokio::sync::RwLock;

use super::identity::IdentificationMethod;

/// Default capacity of the in-process sink.
const DEFAULT_CAPACITY: usize = 100_000;

/// Errors from appending to a sink.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SinkError {
    /// The sink is at capacity and dropped the event.
    #[error("analytics sink full ({capacity} events)")]
    Full { capacity: usize },
}

/// One usage event.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsEvent {
    /// Endpoint path, e.g. `/bart`.
    pub endpoint: String,

    /// Unix timestamp in seconds.
    pub timestamp: i64,

    pub user_id: String,

    pub session_id: String,

    pub identification_method: IdentificationMethod,
}

/// Per-period and total aggregates over the stored events.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Summary {
    /// Bucket start times, Unix seconds, ascending.
    pub time_periods: Vec<i64>,
    pub unique_sessions: Vec<u64>,
    pub unique_users: Vec<u64>,
    pub requests: Vec<u64>,
    pub totals: Totals,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Totals {
    pub unique_sessions: u64,
    pub unique_users: u64,
    pub requests: u64,
}

/// Bounded in-memory event store.
#[derive(Clone)]
pub struct MemorySink {
    events: Arc<RwLock<Vec<AnalyticsEvent>>>,
    capacity: usize,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            events: Arc::new(RwLock::new(Vec::new())),
            capacity,
        }
    }

    /// Append one event.
    pub async fn append(&self, event: AnalyticsEvent) -> Result<(), SinkError> {
        let mut events = self.events.write().await;
        if events.len() >= self.capacity {
            return Err(SinkError::Full {
                capacity: self.capacity,
            });
        }
        events.push(event);
        Ok(())
    }

    /// Number of stored events.
    pub async fn len(&self) -> usize {
        self.events.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.events.read().await.is_empty()
    }

    /// Snapshot of all stored events, in append order.
    pub async fn events(&self) -> Vec<AnalyticsEvent> {
        self.events.read().await.clone()
    }

    /// Aggregate events at or after `since_secs` into `interval_secs`
    /// buckets, optionally restricted to one identification method.
    pub async fn summarize(
        &self,
        since_secs: i64,
        interval_secs: i64,
        method: Option<IdentificationMethod>,
    ) -> Summary {
        struct Bucket<'a> {
            sessions: HashSet<&'a str>,
            users: HashSet<&'a str>,
            requests: u64,
        }

        let events = self.events.read().await;

        let mut buckets: BTreeMap<i64, Bucket> = BTreeMap::new();
        let mut total_sessions: HashSet<&str> = HashSet::new();
        let mut total_users: HashSet<&str> = HashSet::new();
        let mut total_requests = 0u64;

        for event in events.iter() {
            if event.timestamp < since_secs {
                continue;
            }
            if let Some(method) = method {
                if event.identification_method != method {
                    continue;
                }
            }

            let start = event.timestamp.div_euclid(interval_secs) * interval_secs;
            let bucket = buckets.entry(start).or_insert_with(|| Bucket {
                sessions: HashSet::new(),
                users: HashSet::new(),
                requests: 0,
            });
            bucket.sessions.insert(&event.session_id);
            bucket.users.insert(&event.user_id);
            bucket.requests += 1;

            total_sessions.insert(&event.session_id);
            total_users.insert(&event.user_id);
            total_requests += 1;
        }

        let mut summary = Summary {
            time_periods: Vec::with_capacity(buckets.len()),
            unique_sessions: Vec::with_capacity(buckets.len()),
            unique_users: Vec::with_capacity(buckets.len()),
            requests: Vec::with_capacity(buckets.len()),
            totals: Totals {
                unique_sessions: total_sessions.len() as u64,
                unique_users: total_users.len() as u64,
                requests: total_requests,
            },
        };

        for (start, bucket) in buckets {
            summary.time_periods.push(start);
            summary.unique_sessions.push(bucket.sessions.len() as u64);
            summary.unique_users.push(bucket.users.len() as u64);
            summary.requests.push(bucket.requests);
        }

        summary
    }
}

impl Default for MemorySink {
    fn default() -> Self {
        Self::new()
    }
}

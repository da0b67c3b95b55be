//! Application state for the web layer.

use std::sync::Arc;

use crate::analytics::AnalyticsRecorder;
use crate::bart::BartApi;
use crate::cache::CachedBartClient;

/// Shared application state.
///
/// Contains the cached upstream client and the analytics recorder. Generic
/// over the upstream client so tests can run the full router against a
/// [`crate::bart::MockBartClient`].
pub struct AppState<C> {
    /// Cached BART API client
    pub bart: Arc<CachedBartClient<C>>,

    /// Usage analytics recorder
    pub analytics: AnalyticsRecorder,
}

impl<C> Clone for AppState<C> {
    fn clone(&self) -> Self {
        Self {
            bart: Arc::clone(&self.bart),
            analytics: self.analytics.clone(),
        }
    }
}

impl<C: BartApi> AppState<C> {
    /// Create a new app state.
    pub fn new(bart: CachedBartClient<C>, analytics: AnalyticsRecorder) -> Self {
        Self {
            bart: Arc::new(bart),
            analytics,
        }
    }
}

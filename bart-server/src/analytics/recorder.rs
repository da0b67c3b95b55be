//! Fire-and-forget event recording.

use chrono::Utc;

use super::identity::{RequestMeta, resolve_identity};
use super::sink::{AnalyticsEvent, MemorySink};

/// Records usage events without ever blocking or failing the response path.
///
/// `record` spawns the emission onto the runtime and returns immediately;
/// append failures are logged and swallowed.
#[derive(Clone)]
pub struct AnalyticsRecorder {
    sink: MemorySink,
}

impl AnalyticsRecorder {
    pub fn new(sink: MemorySink) -> Self {
        Self { sink }
    }

    /// The sink this recorder appends to.
    pub fn sink(&self) -> &MemorySink {
        &self.sink
    }

    /// Record one event for an endpoint, deferred off the response path.
    pub fn record(&self, endpoint: &'static str, meta: RequestMeta) {
        let sink = self.sink.clone();
        tokio::spawn(async move {
            Self::emit(&sink, endpoint, meta).await;
        });
    }

    /// Resolve identity at the current time and append the event.
    async fn emit(sink: &MemorySink, endpoint: &'static str, meta: RequestMeta) {
        let timestamp = Utc::now().timestamp();
        let identity = resolve_identity(&meta, timestamp);

        let event = AnalyticsEvent {
            endpoint: endpoint.to_string(),
            timestamp,
            user_id: identity.user_id,
            session_id: identity.session_id,
            identification_method: identity.method,
        };

        if let Err(e) = sink.append(event).await {
            tracing::warn!(endpoint, error = %e, "dropping analytics event");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analytics::identity::IdentificationMethod;
    use std::time::Duration;

    fn explicit_meta() -> RequestMeta {
        RequestMeta {
            user_id: Some("user123".to_string()),
            session_id: Some("session456".to_string()),
            ip: Some("192.168.1.1".to_string()),
            user_agent: Some("Mozilla/5.0".to_string()),
        }
    }

    #[tokio::test]
    async fn emit_appends_an_event_with_resolved_identity() {
        let sink = MemorySink::new();
        AnalyticsRecorder::emit(&sink, "/bart", explicit_meta()).await;

        let events = sink.events().await;
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].endpoint, "/bart");
        assert_eq!(events[0].user_id, "user123");
        assert_eq!(events[0].session_id, "session456");
        assert_eq!(
            events[0].identification_method,
            IdentificationMethod::Explicit
        );
        assert!(events[0].timestamp > 0);
    }

    #[tokio::test]
    async fn emit_swallows_sink_failures() {
        let sink = MemorySink::with_capacity(0);
        // Must not panic or error
        AnalyticsRecorder::emit(&sink, "/bart", explicit_meta()).await;
        assert!(sink.is_empty().await);
    }

    #[tokio::test]
    async fn record_is_deferred_but_lands() {
        let recorder = AnalyticsRecorder::new(MemorySink::new());
        recorder.record("/directions", RequestMeta::default());

        // The spawned task races this assertion; poll briefly
        for _ in 0..50 {
            if recorder.sink().len().await == 1 {
                break;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }

        let events = recorder.sink().events().await;
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].endpoint, "/directions");
        assert_eq!(
            events[0].identification_method,
            IdentificationMethod::Fallback
        );
    }
}

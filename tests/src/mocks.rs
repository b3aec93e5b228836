//! Mock implementations for testing.

use async_trait::async_trait;
use parking_lot::Mutex;
use std::sync::Arc;

use collector_client::EventSink;
use engagement_core::{
    DiscoveryEvent, PostViewEvent, ProfileViewEvent, Result, TelemetryEvent, WatchDurationEvent,
};

/// Mock sink that captures events in memory.
///
/// Implements the same `EventSink` trait as the real `HttpSink`, so
/// tests exercise every production code path except the actual HTTP
/// transport.
#[derive(Clone, Default)]
pub struct MockSink {
    /// All events submitted through this sink.
    events: Arc<Mutex<Vec<TelemetryEvent>>>,
    /// Simulate failures if set.
    should_fail: Arc<Mutex<bool>>,
}

impl MockSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get all captured events.
    pub fn captured_events(&self) -> Vec<TelemetryEvent> {
        self.events.lock().clone()
    }

    /// Get the count of captured events.
    pub fn event_count(&self) -> usize {
        self.events.lock().len()
    }

    /// Clear captured events.
    pub fn clear(&self) {
        self.events.lock().clear();
    }

    /// Set failure mode for testing error handling.
    pub fn set_should_fail(&self, fail: bool) {
        *self.should_fail.lock() = fail;
    }

    pub fn post_views(&self) -> Vec<PostViewEvent> {
        self.events
            .lock()
            .iter()
            .filter_map(|e| match e {
                TelemetryEvent::PostView(e) => Some(e.clone()),
                _ => None,
            })
            .collect()
    }

    pub fn profile_views(&self) -> Vec<ProfileViewEvent> {
        self.events
            .lock()
            .iter()
            .filter_map(|e| match e {
                TelemetryEvent::ProfileView(e) => Some(e.clone()),
                _ => None,
            })
            .collect()
    }

    pub fn watch_durations(&self) -> Vec<WatchDurationEvent> {
        self.events
            .lock()
            .iter()
            .filter_map(|e| match e {
                TelemetryEvent::WatchDuration(e) => Some(e.clone()),
                _ => None,
            })
            .collect()
    }

    pub fn discoveries(&self) -> Vec<DiscoveryEvent> {
        self.events
            .lock()
            .iter()
            .filter_map(|e| match e {
                TelemetryEvent::Discovery(e) => Some(e.clone()),
                _ => None,
            })
            .collect()
    }
}

#[async_trait]
impl EventSink for MockSink {
    async fn submit(&self, event: TelemetryEvent) -> Result<()> {
        if *self.should_fail.lock() {
            return Err(engagement_core::Error::internal("Mock sink failure"));
        }

        self.events.lock().push(event);
        Ok(())
    }

    fn is_healthy(&self) -> bool {
        !*self.should_fail.lock()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use engagement_core::TrafficSource;

    #[tokio::test]
    async fn mock_sink_captures_events() {
        let mock = MockSink::new();

        mock.submit(TelemetryEvent::PostView(PostViewEvent {
            post_id: "p1".into(),
            source: TrafficSource::Feed,
        }))
        .await
        .unwrap();

        assert_eq!(mock.event_count(), 1);
        assert_eq!(mock.post_views()[0].post_id, "p1");
    }

    #[tokio::test]
    async fn mock_sink_failure_mode() {
        let mock = MockSink::new();
        mock.set_should_fail(true);

        let result = mock
            .submit(TelemetryEvent::ProfileView(ProfileViewEvent {
                profile_user_id: "u1".into(),
                source: TrafficSource::Direct,
            }))
            .await;

        assert!(result.is_err());
        assert!(!mock.is_healthy());
        assert_eq!(mock.event_count(), 0);
    }
}

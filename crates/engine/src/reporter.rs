//! Fire-and-forget submission of telemetry events.

use std::sync::Arc;
use tokio::time::Instant;
use tracing::debug;

use collector_client::EventSink;
use engagement_core::{
    DiscoveryEvent, PostViewEvent, ProfileViewEvent, SessionIdentity, TelemetryEvent,
    TrafficSource, WatchDurationEvent, MIN_WATCH_DURATION_MS,
};
use telemetry::metrics;

/// Performs the outbound submission for every event shape.
///
/// All submissions are fire-and-forget: the calling code path returns
/// immediately, and a failed submission is logged at debug severity and
/// otherwise lost. Telemetry must never surface an error to the caller
/// or block user-facing work.
pub struct InteractionReporter {
    sink: Arc<dyn EventSink>,
    session: Arc<SessionIdentity>,
}

impl InteractionReporter {
    pub fn new(sink: Arc<dyn EventSink>, session: Arc<SessionIdentity>) -> Self {
        Self { sink, session }
    }

    pub fn post_view(&self, post_id: impl Into<String>, source: TrafficSource) {
        self.dispatch(TelemetryEvent::PostView(PostViewEvent {
            post_id: post_id.into(),
            source,
        }));
    }

    pub fn profile_view(&self, profile_user_id: impl Into<String>, source: TrafficSource) {
        self.dispatch(TelemetryEvent::ProfileView(ProfileViewEvent {
            profile_user_id: profile_user_id.into(),
            source,
        }));
    }

    /// Reports accumulated watch time for one session.
    ///
    /// Sub-second observations are dropped before they reach the
    /// network, whatever the `completed` flag says.
    pub fn watch_duration(
        &self,
        post_id: impl Into<String>,
        watch_time_ms: u64,
        completed: bool,
        source: TrafficSource,
    ) {
        if watch_time_ms < MIN_WATCH_DURATION_MS {
            metrics().short_watch_suppressed.inc();
            debug!(watch_time_ms, "Dropped sub-threshold watch duration");
            return;
        }

        self.dispatch(TelemetryEvent::WatchDuration(WatchDurationEvent {
            post_id: post_id.into(),
            watch_time_ms,
            completed,
            source,
        }));
    }

    /// Submits a discovery interaction, stamping the current session id.
    ///
    /// Callers never set the session id themselves.
    pub fn discovery(&self, mut event: DiscoveryEvent) {
        event.session_id = self.session.get();
        self.dispatch(TelemetryEvent::Discovery(event));
    }

    fn dispatch(&self, event: TelemetryEvent) {
        let sink = self.sink.clone();

        // The handle is dropped on purpose: nothing ever awaits a
        // telemetry submission.
        tokio::spawn(async move {
            let start = Instant::now();
            match sink.submit(event).await {
                Ok(()) => {
                    metrics().events_submitted.inc();
                    metrics()
                        .submit_latency_ms
                        .observe(start.elapsed().as_millis() as u64);
                }
                Err(e) => {
                    metrics().submit_failures.inc();
                    debug!(error = %e, "Telemetry submission failed");
                }
            }
        });
    }
}

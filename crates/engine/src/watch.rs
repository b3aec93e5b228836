//! Watch session tracking and classification.

use std::sync::Arc;
use std::time::Duration;
use tokio::time::Instant;

use engagement_core::{
    ContentType, DiscoveryEvent, InteractionType, TrafficSource, SKIP_THRESHOLD_MS,
};
use telemetry::metrics;

use crate::gate::DedupGate;
use crate::reporter::InteractionReporter;

/// Immutable configuration for one watch session.
#[derive(Debug, Clone)]
pub struct WatchParams {
    pub content_id: String,
    pub source: TrafficSource,
    pub content_type: ContentType,
    pub creator_id: Option<String>,
    pub expected_duration_ms: Option<u64>,
}

impl WatchParams {
    pub fn new(content_id: impl Into<String>, source: TrafficSource) -> Self {
        Self {
            content_id: content_id.into(),
            source,
            content_type: ContentType::default(),
            creator_id: None,
            expected_duration_ms: None,
        }
    }

    pub fn with_content_type(mut self, content_type: ContentType) -> Self {
        self.content_type = content_type;
        self
    }

    pub fn with_creator(mut self, creator_id: impl Into<String>) -> Self {
        self.creator_id = Some(creator_id.into());
        self
    }

    pub fn with_expected_duration_ms(mut self, expected_duration_ms: u64) -> Self {
        self.expected_duration_ms = Some(expected_duration_ms);
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum WatchState {
    Idle,
    Tracking,
    Paused,
    Terminated,
}

/// Accumulates watch time for one content item across start/pause
/// cycles and classifies the observation on teardown.
///
/// `complete()` marks natural end-of-content and can only produce VIEW
/// or REWATCH; `stop()` marks the viewer navigating away and is the only
/// path that can produce SKIP. Every operation is a no-op in states
/// where it does not apply; nothing here returns an error. A session is
/// finished after `complete()` or `stop()` and ignores all further
/// operations. Dropping a session without stopping it reports nothing.
pub struct WatchSession {
    params: WatchParams,
    gate: Arc<DedupGate>,
    reporter: Arc<InteractionReporter>,
    discovery_cooldown: Duration,
    state: WatchState,
    accumulated_ms: u64,
    segment_start: Option<Instant>,
    skip_reported: bool,
}

impl WatchSession {
    pub(crate) fn new(
        params: WatchParams,
        gate: Arc<DedupGate>,
        reporter: Arc<InteractionReporter>,
        discovery_cooldown: Duration,
    ) -> Self {
        Self {
            params,
            gate,
            reporter,
            discovery_cooldown,
            state: WatchState::Idle,
            accumulated_ms: 0,
            segment_start: None,
            skip_reported: false,
        }
    }

    pub fn content_id(&self) -> &str {
        &self.params.content_id
    }

    pub fn is_tracking(&self) -> bool {
        self.state == WatchState::Tracking
    }

    /// Opens a new segment. No-op while already tracking or after
    /// teardown.
    pub fn start(&mut self) {
        match self.state {
            WatchState::Tracking | WatchState::Terminated => {}
            WatchState::Idle | WatchState::Paused => {
                self.segment_start = Some(Instant::now());
                self.state = WatchState::Tracking;
            }
        }
    }

    /// Closes the open segment, folding its duration into the
    /// accumulated total. No-op unless tracking.
    pub fn pause(&mut self) {
        if self.state != WatchState::Tracking {
            return;
        }
        if let Some(start) = self.segment_start.take() {
            self.accumulated_ms += start.elapsed().as_millis() as u64;
        }
        self.state = WatchState::Paused;
    }

    /// Accumulated watch time, including the open segment while
    /// tracking. Pure read, callable in any state.
    pub fn watch_time_ms(&self) -> u64 {
        let open_segment_ms = self
            .segment_start
            .map(|start| start.elapsed().as_millis() as u64)
            .unwrap_or(0);
        self.accumulated_ms + open_segment_ms
    }

    /// Full passes through the content beyond the first. Pure read.
    pub fn rewatch_count(&self) -> u32 {
        match self.params.expected_duration_ms {
            Some(expected) if expected > 0 => {
                (self.watch_time_ms() / expected).saturating_sub(1) as u32
            }
            _ => 0,
        }
    }

    /// Fraction of the expected duration watched, capped at 1. Sessions
    /// without a known duration count as fully watched. Pure read.
    pub fn completion_rate(&self) -> f64 {
        match self.params.expected_duration_ms {
            Some(expected) if expected > 0 => {
                (self.watch_time_ms() as f64 / expected as f64).min(1.0)
            }
            _ => 1.0,
        }
    }

    /// Tears down the session at natural end-of-content.
    ///
    /// An item that plays to its end was genuinely viewed, however
    /// short, so this path never classifies SKIP. A session that never
    /// accumulated any time reports nothing at all.
    pub fn complete(&mut self) {
        if self.state == WatchState::Terminated {
            return;
        }
        self.pause();
        self.state = WatchState::Terminated;
        metrics().watch_sessions_completed.inc();

        if self.accumulated_ms == 0 {
            return;
        }

        self.reporter.watch_duration(
            self.params.content_id.clone(),
            self.accumulated_ms,
            true,
            self.params.source,
        );

        let rewatches = self.rewatch_count();
        if rewatches > 0 {
            self.emit_discovery(InteractionType::Rewatch, 1.0, Some(rewatches), None);
        } else {
            self.emit_discovery(
                InteractionType::View,
                self.completion_rate(),
                Some(rewatches),
                None,
            );
        }
    }

    /// Tears down the session when the viewer navigates away early.
    ///
    /// A short watch with no full pass is a SKIP (reported at most once
    /// per session); otherwise the observation is classified as REWATCH
    /// or VIEW. A session that never accumulated any time reports
    /// nothing at all.
    pub fn stop(&mut self) {
        if self.state == WatchState::Terminated {
            return;
        }
        self.pause();
        self.state = WatchState::Terminated;
        metrics().watch_sessions_stopped.inc();

        if self.accumulated_ms == 0 {
            return;
        }

        self.reporter.watch_duration(
            self.params.content_id.clone(),
            self.accumulated_ms,
            false,
            self.params.source,
        );

        let rewatches = self.rewatch_count();
        if self.accumulated_ms < SKIP_THRESHOLD_MS && rewatches == 0 && !self.skip_reported {
            self.skip_reported = true;
            self.emit_skip();
        } else if rewatches > 0 {
            self.emit_discovery(
                InteractionType::Rewatch,
                self.partial_pass_rate(),
                Some(rewatches),
                None,
            );
        } else {
            self.emit_discovery(
                InteractionType::View,
                self.completion_rate(),
                Some(rewatches),
                None,
            );
        }
    }

    /// Completion through the current partial pass, used when a rewatch
    /// session is stopped mid-pass.
    fn partial_pass_rate(&self) -> f64 {
        match self.params.expected_duration_ms {
            Some(expected) if expected > 0 => {
                ((self.accumulated_ms % expected) as f64 / expected as f64).min(1.0)
            }
            _ => 1.0,
        }
    }

    fn emit_skip(&self) {
        let event = DiscoveryEvent {
            content_id: self.params.content_id.clone(),
            content_type: self.params.content_type,
            interaction_type: InteractionType::Skip,
            watch_time_ms: Some(self.accumulated_ms),
            completion_rate: Some(self.completion_rate()),
            rewatch_count: None,
            skipped_at_ms: Some(self.accumulated_ms),
            creator_id: self.params.creator_id.clone(),
            session_id: String::new(),
        };
        self.route(event);
    }

    fn emit_discovery(
        &self,
        interaction: InteractionType,
        completion_rate: f64,
        rewatch_count: Option<u32>,
        skipped_at_ms: Option<u64>,
    ) {
        let event = DiscoveryEvent {
            content_id: self.params.content_id.clone(),
            content_type: self.params.content_type,
            interaction_type: interaction,
            watch_time_ms: Some(self.accumulated_ms),
            completion_rate: Some(completion_rate),
            rewatch_count,
            skipped_at_ms,
            creator_id: self.params.creator_id.clone(),
            session_id: String::new(),
        };
        self.route(event);
    }

    fn route(&self, event: DiscoveryEvent) {
        let key = format!("{}-{}", event.content_id, event.interaction_type.as_str());
        self.gate.attempt(key, self.discovery_cooldown, || {
            self.reporter.discovery(event);
        });
    }
}

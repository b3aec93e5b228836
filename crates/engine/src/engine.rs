//! The telemetry engine facade.

use std::sync::Arc;
use tracing::debug;

use collector_client::EventSink;
use engagement_core::{
    ContentType, DiscoveryEvent, InteractionType, SessionIdentity, TrafficSource,
};
use telemetry::metrics;

use crate::batcher::ImpressionBatcher;
use crate::config::EngineConfig;
use crate::gate::DedupGate;
use crate::reporter::InteractionReporter;
use crate::watch::{WatchParams, WatchSession};

/// One engagement telemetry engine instance.
///
/// Owns the dedup gate's cooldown table, the impression batcher's
/// pending set, and the session identity — there is no ambient
/// process-wide state, so engines are testable in isolation and several
/// can coexist. Recording methods never block and never fail; they must
/// be called from within a tokio runtime since submissions run on
/// spawned tasks.
pub struct TelemetryEngine {
    config: EngineConfig,
    gate: Arc<DedupGate>,
    batcher: Arc<ImpressionBatcher>,
    reporter: Arc<InteractionReporter>,
    session: Arc<SessionIdentity>,
}

impl TelemetryEngine {
    /// Creates an engine with default cooldown windows.
    pub fn new(sink: Arc<dyn EventSink>) -> Self {
        Self::with_config(sink, EngineConfig::default())
    }

    pub fn with_config(sink: Arc<dyn EventSink>, config: EngineConfig) -> Self {
        let session = Arc::new(SessionIdentity::new());
        Self {
            config,
            gate: Arc::new(DedupGate::new()),
            batcher: Arc::new(ImpressionBatcher::new()),
            reporter: Arc::new(InteractionReporter::new(sink, session.clone())),
            session,
        }
    }

    /// Correlation id stamped on every discovery interaction.
    pub fn session_id(&self) -> String {
        self.session.get()
    }

    /// Rotates the session identity (e.g. on logout).
    pub fn reset_session(&self) {
        self.session.reset();
    }

    /// Reports a raw post view, deduplicated per content item.
    pub fn record_post_view(&self, post_id: impl Into<String>, source: TrafficSource) {
        let post_id = post_id.into();
        let key = post_view_key(&post_id);
        self.gate.attempt(key, self.config.post_view_cooldown(), move || {
            self.reporter.post_view(post_id, source);
        });
    }

    /// Reports a profile view, deduplicated per profile. The source
    /// defaults to `Direct` when the caller has none.
    pub fn record_profile_view(
        &self,
        profile_user_id: impl Into<String>,
        source: Option<TrafficSource>,
    ) {
        let profile_user_id = profile_user_id.into();
        let source = source.unwrap_or(TrafficSource::Direct);
        let key = format!("profile-view-{}", profile_user_id);
        self.gate
            .attempt(key, self.config.profile_view_cooldown(), move || {
                self.reporter.profile_view(profile_user_id, source);
            });
    }

    /// Coalesces a burst of visibility events; each distinct id is
    /// reported at most once per flush cycle through the post-view
    /// dedup path.
    pub fn record_impressions(&self, content_ids: Vec<String>, source: TrafficSource) {
        if !self.batcher.enqueue(&content_ids, source) {
            return;
        }

        let gate = self.gate.clone();
        let batcher = self.batcher.clone();
        let reporter = self.reporter.clone();
        let delay = self.config.impression_flush_delay();
        let cooldown = self.config.post_view_cooldown();

        tokio::spawn(async move {
            tokio::time::sleep(delay).await;

            let pending = batcher.drain();
            metrics().impression_batches_flushed.inc();
            debug!(count = pending.len(), "Flushing impression batch");

            for (post_id, source) in pending {
                let key = post_view_key(&post_id);
                gate.attempt(key, cooldown, || reporter.post_view(post_id.clone(), source));
            }
        });
    }

    /// Passes a caller-classified interaction (like, save, share,
    /// comment) through verbatim, deduplicated per (content,
    /// interaction) pair.
    pub fn record_interaction(
        &self,
        content_id: impl Into<String>,
        interaction: InteractionType,
        content_type: Option<ContentType>,
    ) {
        let content_id = content_id.into();
        let key = format!("{}-{}", content_id, interaction.as_str());
        let event = DiscoveryEvent {
            content_id,
            content_type: content_type.unwrap_or_default(),
            interaction_type: interaction,
            watch_time_ms: None,
            completion_rate: None,
            rewatch_count: None,
            skipped_at_ms: None,
            creator_id: None,
            session_id: String::new(),
        };
        self.gate
            .attempt(key, self.config.discovery_cooldown(), || {
                self.reporter.discovery(event);
            });
    }

    /// Hands out a watch tracker wired to this engine's gate and
    /// reporter. The caller owns the session and must `stop()` it on
    /// teardown to avoid losing its accumulated time.
    pub fn watch(&self, params: WatchParams) -> WatchSession {
        WatchSession::new(
            params,
            self.gate.clone(),
            self.reporter.clone(),
            self.config.discovery_cooldown(),
        )
    }
}

fn post_view_key(post_id: &str) -> String {
    format!("post-view-{}", post_id)
}

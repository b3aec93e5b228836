//! Impression batch accumulator.

use parking_lot::Mutex;
use std::collections::HashMap;

use engagement_core::TrafficSource;
use telemetry::metrics;

#[derive(Debug, Default)]
struct PendingState {
    queued: HashMap<String, TrafficSource>,
    cycle_open: bool,
}

/// Coalesces a burst of "content became visible" events into one flush
/// cycle, deduplicated by content id.
///
/// The batcher is passive: `enqueue` reports when a new cycle opens and
/// the engine schedules the delayed flush that calls `drain`.
#[derive(Debug, Default)]
pub struct ImpressionBatcher {
    pending: Mutex<PendingState>,
}

impl ImpressionBatcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues each unseen id with its source.
    ///
    /// Ids already pending keep their originally recorded source.
    /// Returns `true` exactly when this call opened a new flush cycle,
    /// i.e. the caller must schedule a flush.
    pub fn enqueue(&self, content_ids: &[String], source: TrafficSource) -> bool {
        let mut pending = self.pending.lock();

        for id in content_ids {
            pending.queued.entry(id.clone()).or_insert(source);
        }
        metrics().impressions_enqueued.inc_by(content_ids.len() as u64);

        if pending.cycle_open || pending.queued.is_empty() {
            false
        } else {
            pending.cycle_open = true;
            true
        }
    }

    /// Takes everything pending and closes the current cycle.
    pub fn drain(&self) -> Vec<(String, TrafficSource)> {
        let mut pending = self.pending.lock();
        pending.cycle_open = false;
        pending.queued.drain().collect()
    }

    pub fn pending_count(&self) -> usize {
        self.pending.lock().queued.len()
    }
}

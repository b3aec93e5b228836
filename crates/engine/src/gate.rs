//! Keyed debounce gate.

use parking_lot::Mutex;
use std::collections::HashMap;
use std::time::Duration;
use tokio::time::Instant;
use tracing::debug;

use telemetry::metrics;

/// Suppresses repeated invocations of a keyed action within a cooldown
/// window.
///
/// Distinct keys are independent; the gate is duration-agnostic and
/// callers choose the cooldown per call. Expired windows are swept on
/// every attempt, so the table never outlives its cooldowns by more
/// than one call.
#[derive(Debug, Default)]
pub struct DedupGate {
    windows: Mutex<HashMap<String, Instant>>,
}

impl DedupGate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Invokes `action` unless a cooldown is pending for `key`.
    ///
    /// The first call for a key runs the action synchronously and opens
    /// a window of `cooldown`; calls with the same key inside the window
    /// are silently discarded. Returns whether the action ran. The
    /// internal lock is released before the action is invoked.
    pub fn attempt<F>(&self, key: impl Into<String>, cooldown: Duration, action: F) -> bool
    where
        F: FnOnce(),
    {
        let key = key.into();
        let now = Instant::now();

        {
            let mut windows = self.windows.lock();
            windows.retain(|_, expiry| *expiry > now);

            if windows.contains_key(&key) {
                metrics().dedup_suppressed.inc();
                debug!(key = %key, "Suppressed duplicate submission");
                return false;
            }

            windows.insert(key, now + cooldown);
            metrics().active_cooldowns.set(windows.len() as u64);
        }

        action();
        true
    }

    /// Number of cooldown windows still pending as of the last attempt.
    pub fn active_windows(&self) -> usize {
        self.windows.lock().len()
    }
}

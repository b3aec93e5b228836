//! Session identity for event correlation.

use chrono::Utc;
use parking_lot::Mutex;
use uuid::Uuid;

/// Process-scoped session identifier, lazily created on first use.
///
/// The identifier is stable across calls until `reset()` (e.g. on
/// logout) and is never persisted across restarts.
#[derive(Debug, Default)]
pub struct SessionIdentity {
    current: Mutex<Option<String>>,
}

impl SessionIdentity {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the current session identifier, generating one on first
    /// call.
    pub fn get(&self) -> String {
        self.current
            .lock()
            .get_or_insert_with(generate_session_id)
            .clone()
    }

    /// Discards the current identifier; the next `get()` produces a new
    /// one.
    pub fn reset(&self) {
        *self.current.lock() = None;
    }
}

/// Timestamp plus random suffix keeps collisions across processes
/// vanishingly unlikely without any coordination.
fn generate_session_id() -> String {
    format!(
        "{}-{}",
        Utc::now().timestamp_millis(),
        Uuid::new_v4().simple()
    )
}

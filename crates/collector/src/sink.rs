//! The abstract submission seam between the engine and the collector.

use async_trait::async_trait;
use engagement_core::{Result, TelemetryEvent};

/// Outbound event sink.
///
/// The engine holds an `Arc<dyn EventSink>`; production wires in
/// `HttpSink`, tests substitute an in-memory capture.
#[async_trait]
pub trait EventSink: Send + Sync {
    /// Submits one event to the collector.
    async fn submit(&self, event: TelemetryEvent) -> Result<()>;

    /// Quick liveness signal for diagnostics.
    fn is_healthy(&self) -> bool {
        true
    }
}

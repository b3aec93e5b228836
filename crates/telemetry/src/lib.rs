//! Internal observability for the engagement telemetry engine.
//!
//! The engine instruments itself with in-memory counters rather than an
//! external metrics system; callers can snapshot the registry for
//! diagnostics.

pub mod metrics;
pub mod tracing_setup;

pub use metrics::*;
pub use tracing_setup::*;

//! Unified error types for the telemetry engine.
//!
//! The only failure category that occurs in practice is "outbound
//! submission failed"; errors are contained inside the reporter and are
//! never surfaced to calling code paths.

use thiserror::Error;

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Unified error type for the telemetry engine.
#[derive(Debug, Error)]
pub enum Error {
    /// Collector returned a non-success HTTP status.
    #[error("collector returned status {status}")]
    Collector { status: u16 },

    /// Network-level failure reaching the collector.
    #[error("transport error: {0}")]
    Transport(String),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("config error: {0}")]
    Config(String),

    #[error("internal error: {0}")]
    Internal(String),
}

impl Error {
    /// Create a collector status error.
    pub fn collector(status: u16) -> Self {
        Self::Collector { status }
    }

    pub fn transport(msg: impl Into<String>) -> Self {
        Self::Transport(msg.into())
    }

    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }
}

//! Collector transport for the engagement telemetry engine.

pub mod config;
pub mod http;
pub mod sink;

pub use config::*;
pub use http::*;
pub use sink::*;

//! Engagement telemetry engine.
//!
//! Observes how long a user watches a content item, classifies the
//! observation (view, skip, rewatch), and reports it upstream while
//! suppressing duplicate and excessive submissions. All outbound traffic
//! is fire-and-forget; nothing in here blocks a UI code path or surfaces
//! a transport failure to it.

pub mod batcher;
pub mod config;
pub mod engine;
pub mod gate;
pub mod reporter;
pub mod watch;

pub use batcher::*;
pub use config::*;
pub use engine::*;
pub use gate::*;
pub use reporter::*;
pub use watch::*;

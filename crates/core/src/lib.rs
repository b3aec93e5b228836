//! Core types and event shapes for the engagement telemetry engine.

pub mod error;
pub mod events;
pub mod limits;
pub mod session;

pub use error::{Error, Result};
pub use events::*;
pub use limits::*;
pub use session::*;

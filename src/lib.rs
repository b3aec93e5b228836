//! Engagement telemetry engine for the social client.
//!
//! Observes how long a user watches or listens to a content item,
//! classifies the observation (view, skip, rewatch), and reports it to
//! the remote collector while preventing duplicate and excessive
//! network traffic. Submissions are fire-and-forget; the engine never
//! blocks a UI code path and never surfaces a transport failure.
//!
//! This crate is the assembly facade: it re-exports the public API and
//! builds an engine from layered configuration (defaults → optional
//! `config/default.toml` → `TELEMETRY_`-prefixed environment
//! variables).

use std::sync::Arc;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

pub use collector_client::{CollectorConfig, EventSink, HttpSink};
pub use engagement_core::{
    ContentType, DiscoveryEvent, InteractionType, PostViewEvent, ProfileViewEvent,
    SessionIdentity, TelemetryEvent, TrafficSource, WatchDurationEvent,
};
pub use engagement_engine::{
    DedupGate, EngineConfig, ImpressionBatcher, InteractionReporter, TelemetryEngine,
    WatchParams, WatchSession,
};
pub use telemetry::{init_tracing, init_tracing_from_env, metrics, MetricsSnapshot, TracingConfig};

/// Application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub collector: CollectorConfig,
    #[serde(default)]
    pub engine: EngineConfig,
}

/// Load configuration from files and environment.
pub fn load_config() -> Result<Config> {
    let config = config::Config::builder()
        // Start with defaults
        .add_source(config::Config::try_from(&Config::default())?)
        // Load from config file if exists
        .add_source(
            config::File::with_name("config/default")
                .required(false)
                .format(config::FileFormat::Toml),
        )
        // Override with environment variables
        .add_source(
            config::Environment::default()
                .separator("__")
                .prefix("TELEMETRY")
                .try_parsing(true),
        )
        .build()
        .context("Failed to build configuration")?;

    config
        .try_deserialize()
        .context("Failed to deserialize configuration")
}

/// Builds an engine that submits to the configured HTTP collector.
pub fn engine_from_config(config: Config) -> Result<TelemetryEngine> {
    let sink = HttpSink::new(config.collector).context("Failed to create collector sink")?;
    Ok(TelemetryEngine::with_config(Arc::new(sink), config.engine))
}

/// Loads `.env` plus configuration and assembles an engine.
pub fn engine_from_env() -> Result<TelemetryEngine> {
    dotenvy::dotenv().ok();
    let config = load_config()?;
    engine_from_config(config)
}

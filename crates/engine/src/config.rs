//! Engine configuration.

use serde::{Deserialize, Serialize};
use std::time::Duration;

use engagement_core::limits;

/// Cooldown and batching windows for one engine instance.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Cooldown per (content, interaction) pair in milliseconds
    #[serde(default = "default_discovery_cooldown_ms")]
    pub discovery_cooldown_ms: u64,
    /// Cooldown per content item for raw view events in milliseconds
    #[serde(default = "default_post_view_cooldown_ms")]
    pub post_view_cooldown_ms: u64,
    /// Cooldown per profile for profile-view events in milliseconds
    #[serde(default = "default_profile_view_cooldown_ms")]
    pub profile_view_cooldown_ms: u64,
    /// Delay before an impression batch is flushed in milliseconds
    #[serde(default = "default_impression_flush_delay_ms")]
    pub impression_flush_delay_ms: u64,
}

fn default_discovery_cooldown_ms() -> u64 {
    limits::DISCOVERY_COOLDOWN_MS
}

fn default_post_view_cooldown_ms() -> u64 {
    limits::POST_VIEW_COOLDOWN_MS
}

fn default_profile_view_cooldown_ms() -> u64 {
    limits::PROFILE_VIEW_COOLDOWN_MS
}

fn default_impression_flush_delay_ms() -> u64 {
    limits::IMPRESSION_FLUSH_DELAY_MS
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            discovery_cooldown_ms: default_discovery_cooldown_ms(),
            post_view_cooldown_ms: default_post_view_cooldown_ms(),
            profile_view_cooldown_ms: default_profile_view_cooldown_ms(),
            impression_flush_delay_ms: default_impression_flush_delay_ms(),
        }
    }
}

impl EngineConfig {
    pub fn discovery_cooldown(&self) -> Duration {
        Duration::from_millis(self.discovery_cooldown_ms)
    }

    pub fn post_view_cooldown(&self) -> Duration {
        Duration::from_millis(self.post_view_cooldown_ms)
    }

    pub fn profile_view_cooldown(&self) -> Duration {
        Duration::from_millis(self.profile_view_cooldown_ms)
    }

    pub fn impression_flush_delay(&self) -> Duration {
        Duration::from_millis(self.impression_flush_delay_ms)
    }
}

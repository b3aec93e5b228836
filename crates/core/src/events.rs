//! Event type definitions for the telemetry engine.

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::error::Result;

/// UI surface an observation originated from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrafficSource {
    Feed,
    Profile,
    Search,
    Share,
    Direct,
    #[serde(other)]
    Other,
}

impl TrafficSource {
    /// Normalizes a caller-supplied tag. Anything outside the known set
    /// maps to `Other` rather than being rejected.
    pub fn normalize(raw: &str) -> Self {
        match raw.to_ascii_lowercase().as_str() {
            "feed" => Self::Feed,
            "profile" => Self::Profile,
            "search" => Self::Search,
            "share" => Self::Share,
            "direct" => Self::Direct,
            _ => Self::Other,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Feed => "feed",
            Self::Profile => "profile",
            Self::Search => "search",
            Self::Share => "share",
            Self::Direct => "direct",
            Self::Other => "other",
        }
    }
}

/// Content kind carried on discovery interactions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentType {
    #[default]
    Reel,
    Voice,
    Photo,
    Text,
    Story,
}

/// Outcome of a classification decision.
///
/// `View`, `Skip`, and `Rewatch` are produced by the watch tracker;
/// the rest are passed through verbatim from direct callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InteractionType {
    View,
    Like,
    Save,
    Share,
    Comment,
    Skip,
    Rewatch,
}

impl InteractionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::View => "view",
            Self::Like => "like",
            Self::Save => "save",
            Self::Share => "share",
            Self::Comment => "comment",
            Self::Skip => "skip",
            Self::Rewatch => "rewatch",
        }
    }
}

/// Raw post-view event. The content id keys the endpoint; only the
/// source travels in the body.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostViewEvent {
    pub post_id: String,
    pub source: TrafficSource,
}

/// Raw profile-view event.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileViewEvent {
    pub profile_user_id: String,
    #[serde(default = "default_profile_source")]
    pub source: TrafficSource,
}

fn default_profile_source() -> TrafficSource {
    TrafficSource::Direct
}

/// Accumulated watch time for one session of one content item.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WatchDurationEvent {
    pub post_id: String,
    pub watch_time_ms: u64,
    /// Whether playback reached its natural end.
    pub completed: bool,
    pub source: TrafficSource,
}

/// Classified discovery interaction.
///
/// `session_id` is stamped by the reporter on the way out; callers leave
/// it at its default.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiscoveryEvent {
    pub content_id: String,
    pub content_type: ContentType,
    pub interaction_type: InteractionType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub watch_time_ms: Option<u64>,
    /// Fraction (0-1) of expected duration actually watched.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completion_rate: Option<f64>,
    /// Full passes through the content beyond the first.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rewatch_count: Option<u32>,
    /// Watch offset at which the viewer bailed, for SKIP outcomes.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub skipped_at_ms: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub creator_id: Option<String>,
    #[serde(default)]
    pub session_id: String,
}

/// Outbound event variants.
#[derive(Debug, Clone)]
pub enum TelemetryEvent {
    PostView(PostViewEvent),
    ProfileView(ProfileViewEvent),
    WatchDuration(WatchDurationEvent),
    Discovery(DiscoveryEvent),
}

impl TelemetryEvent {
    /// Returns the event kind as a string.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::PostView(_) => "post_view",
            Self::ProfileView(_) => "profile_view",
            Self::WatchDuration(_) => "watch_duration",
            Self::Discovery(_) => "discovery_interaction",
        }
    }

    /// Returns the collector endpoint path for this event.
    pub fn endpoint(&self) -> String {
        match self {
            Self::PostView(e) => format!("/api/posts/{}/view", e.post_id),
            Self::ProfileView(_) => "/api/profiles/view".to_string(),
            Self::WatchDuration(_) => "/api/analytics/watch-duration".to_string(),
            Self::Discovery(_) => "/api/analytics/discovery".to_string(),
        }
    }

    /// Returns the JSON body submitted to the collector.
    pub fn body(&self) -> Result<Value> {
        let body = match self {
            // Post id rides in the endpoint path, not the body.
            Self::PostView(e) => json!({ "source": e.source }),
            Self::ProfileView(e) => serde_json::to_value(e)?,
            Self::WatchDuration(e) => serde_json::to_value(e)?,
            Self::Discovery(e) => serde_json::to_value(e)?,
        };
        Ok(body)
    }
}

//! Collector client configuration.

use serde::{Deserialize, Serialize};

/// Collector endpoint configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CollectorConfig {
    /// Collector base URL
    pub base_url: String,
    /// Bearer token attached to every submission, if set
    #[serde(default)]
    pub api_key: Option<String>,
    /// Request timeout in milliseconds
    #[serde(default = "default_request_timeout_ms")]
    pub request_timeout_ms: u64,
}

fn default_request_timeout_ms() -> u64 {
    5000
}

impl Default for CollectorConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8080".to_string(),
            api_key: None,
            request_timeout_ms: default_request_timeout_ms(),
        }
    }
}

impl CollectorConfig {
    /// Joins the base URL with an endpoint path.
    pub fn url_for(&self, endpoint: &str) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), endpoint)
    }
}

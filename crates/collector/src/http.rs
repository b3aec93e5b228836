//! HTTP collector client.

use async_trait::async_trait;
use std::time::Duration;
use tracing::debug;

use engagement_core::{Error, Result, TelemetryEvent};

use crate::config::CollectorConfig;
use crate::sink::EventSink;

/// Submits events to the remote collector over HTTP.
///
/// One submission is one POST; there are no retries. Callers treat every
/// submission as fire-and-forget, so a lost event is simply lost.
pub struct HttpSink {
    config: CollectorConfig,
    client: reqwest::Client,
}

impl HttpSink {
    /// Creates a new sink.
    pub fn new(config: CollectorConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_millis(config.request_timeout_ms))
            .build()
            .map_err(|e| Error::internal(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { config, client })
    }
}

#[async_trait]
impl EventSink for HttpSink {
    async fn submit(&self, event: TelemetryEvent) -> Result<()> {
        let url = self.config.url_for(&event.endpoint());
        let body = event.body()?;

        debug!(url = %url, kind = event.kind(), "Submitting telemetry event");

        let mut request = self.client.post(&url).json(&body);
        if let Some(key) = &self.config.api_key {
            request = request.bearer_auth(key);
        }

        let response = request
            .send()
            .await
            .map_err(|e| Error::transport(e.to_string()))?;

        if !response.status().is_success() {
            return Err(Error::collector(response.status().as_u16()));
        }

        Ok(())
    }
}

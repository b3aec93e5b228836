//! In-memory metrics for the telemetry engine.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};

/// A counter metric.
#[derive(Debug, Default)]
pub struct Counter(AtomicU64);

impl Counter {
    pub fn new() -> Self {
        Self(AtomicU64::new(0))
    }

    pub fn inc(&self) {
        self.0.fetch_add(1, Ordering::Relaxed);
    }

    pub fn inc_by(&self, n: u64) {
        self.0.fetch_add(n, Ordering::Relaxed);
    }

    pub fn get(&self) -> u64 {
        self.0.load(Ordering::Relaxed)
    }
}

/// A gauge metric (can go up or down).
#[derive(Debug, Default)]
pub struct Gauge(AtomicU64);

impl Gauge {
    pub fn set(&self, val: u64) {
        self.0.store(val, Ordering::Relaxed);
    }

    pub fn get(&self) -> u64 {
        self.0.load(Ordering::Relaxed)
    }
}

/// Histogram for collector round-trip latencies.
#[derive(Debug)]
pub struct Histogram {
    /// Buckets: 5ms, 25ms, 50ms, 100ms, 250ms, 500ms, 1s, 2.5s, 5s
    buckets: [AtomicU64; 9],
    sum: AtomicU64,
    count: AtomicU64,
}

impl Default for Histogram {
    fn default() -> Self {
        Self::new()
    }
}

impl Histogram {
    const BUCKET_BOUNDS: [u64; 9] = [5, 25, 50, 100, 250, 500, 1000, 2500, 5000];

    pub fn new() -> Self {
        Self {
            buckets: Default::default(),
            sum: AtomicU64::new(0),
            count: AtomicU64::new(0),
        }
    }

    /// Records a value in milliseconds.
    pub fn observe(&self, ms: u64) {
        self.sum.fetch_add(ms, Ordering::Relaxed);
        self.count.fetch_add(1, Ordering::Relaxed);

        for (i, &bound) in Self::BUCKET_BOUNDS.iter().enumerate() {
            if ms <= bound {
                self.buckets[i].fetch_add(1, Ordering::Relaxed);
                return;
            }
        }
        // Value exceeds all buckets, add to last
        self.buckets[8].fetch_add(1, Ordering::Relaxed);
    }

    pub fn count(&self) -> u64 {
        self.count.load(Ordering::Relaxed)
    }

    pub fn mean(&self) -> f64 {
        let count = self.count();
        if count == 0 {
            0.0
        } else {
            self.sum.load(Ordering::Relaxed) as f64 / count as f64
        }
    }
}

/// Collected metrics for the telemetry engine.
#[derive(Debug, Default)]
pub struct Metrics {
    // Reporter
    pub events_submitted: Counter,
    pub submit_failures: Counter,
    pub short_watch_suppressed: Counter,

    // Dedup gate
    pub dedup_suppressed: Counter,

    // Impression batcher
    pub impressions_enqueued: Counter,
    pub impression_batches_flushed: Counter,

    // Watch sessions
    pub watch_sessions_completed: Counter,
    pub watch_sessions_stopped: Counter,

    // Latency
    pub submit_latency_ms: Histogram,

    // Gauges
    pub active_cooldowns: Gauge,
}

impl Metrics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Takes a snapshot of current metrics.
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            timestamp: Utc::now(),
            events_submitted: self.events_submitted.get(),
            submit_failures: self.submit_failures.get(),
            short_watch_suppressed: self.short_watch_suppressed.get(),
            dedup_suppressed: self.dedup_suppressed.get(),
            impressions_enqueued: self.impressions_enqueued.get(),
            impression_batches_flushed: self.impression_batches_flushed.get(),
            watch_sessions_completed: self.watch_sessions_completed.get(),
            watch_sessions_stopped: self.watch_sessions_stopped.get(),
            submit_latency_mean_ms: self.submit_latency_ms.mean(),
            active_cooldowns: self.active_cooldowns.get(),
        }
    }
}

/// A snapshot of metrics at a point in time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetricsSnapshot {
    pub timestamp: DateTime<Utc>,
    pub events_submitted: u64,
    pub submit_failures: u64,
    pub short_watch_suppressed: u64,
    pub dedup_suppressed: u64,
    pub impressions_enqueued: u64,
    pub impression_batches_flushed: u64,
    pub watch_sessions_completed: u64,
    pub watch_sessions_stopped: u64,
    pub submit_latency_mean_ms: f64,
    pub active_cooldowns: u64,
}

/// Global metrics registry.
pub static METRICS: std::sync::LazyLock<Metrics> = std::sync::LazyLock::new(Metrics::new);

/// Get the global metrics instance.
pub fn metrics() -> &'static Metrics {
    &METRICS
}

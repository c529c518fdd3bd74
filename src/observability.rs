//! Logging setup, the log sink contract and process counters

use std::sync::atomic::{AtomicU64, Ordering};
use tracing_subscriber::EnvFilter;

/// Install the global tracing subscriber, honouring `RUST_LOG`
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}

/// Destination for preformatted log records
pub trait LogSink: Send + Sync {
    fn error(&self, message: &str);

    fn debug(&self, message: &str);
}

/// Sink forwarding records to `tracing`
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl LogSink for TracingSink {
    fn error(&self, message: &str) {
        tracing::error!(target: "kodion", "{}", message);
    }

    fn debug(&self, message: &str) {
        tracing::debug!(target: "kodion", "{}", message);
    }
}

/// Metrics handle for recording counters
#[derive(Debug, Default)]
pub struct Metrics {
    requests_failed: AtomicU64,
    requests_retried: AtomicU64,
    cycles_completed: AtomicU64,
    cycles_failed: AtomicU64,
}

impl Metrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn request_failed(&self) {
        self.requests_failed.fetch_add(1, Ordering::Relaxed);
        tracing::debug!(counter = "requests_failed", "Metric incremented");
    }

    pub fn request_retried(&self) {
        self.requests_retried.fetch_add(1, Ordering::Relaxed);
        tracing::debug!(counter = "requests_retried", "Metric incremented");
    }

    pub fn cycle_completed(&self) {
        self.cycles_completed.fetch_add(1, Ordering::Relaxed);
        tracing::debug!(counter = "cycles_completed", "Metric incremented");
    }

    pub fn cycle_failed(&self) {
        self.cycles_failed.fetch_add(1, Ordering::Relaxed);
        tracing::debug!(counter = "cycles_failed", "Metric incremented");
    }

    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            requests_failed: self.requests_failed.load(Ordering::Relaxed),
            requests_retried: self.requests_retried.load(Ordering::Relaxed),
            cycles_completed: self.cycles_completed.load(Ordering::Relaxed),
            cycles_failed: self.cycles_failed.load(Ordering::Relaxed),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetricsSnapshot {
    pub requests_failed: u64,
    pub requests_retried: u64,
    pub cycles_completed: u64,
    pub cycles_failed: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metrics_snapshot() {
        let metrics = Metrics::new();
        metrics.request_failed();
        metrics.request_retried();
        metrics.request_retried();
        metrics.cycle_completed();

        assert_eq!(
            metrics.snapshot(),
            MetricsSnapshot {
                requests_failed: 1,
                requests_retried: 2,
                cycles_completed: 1,
                cycles_failed: 0,
            }
        );
    }
}

//! Estimation and batch metrics.

use metrics::{counter, gauge, histogram};
use std::time::Instant;

/// Estimation metrics recorder
pub struct EstimationMetrics;

impl EstimationMetrics {
    // =========================================================================
    // Cost / Carbon
    // =========================================================================

    /// Record one cost estimate. `outcome` is `priced`, `zero`, `unsupported`
    /// or `rejected`.
    pub fn record_estimate(service: &str, outcome: &str) {
        counter!(
            "estimates_total",
            "service" => service.to_string(),
            "outcome" => outcome.to_string()
        )
        .increment(1);
    }

    /// Record one carbon estimate. `outcome` is `estimated` or `unavailable`.
    pub fn record_carbon(service: &str, outcome: &str) {
        counter!(
            "carbon_estimates_total",
            "service" => service.to_string(),
            "outcome" => outcome.to_string()
        )
        .increment(1);
    }

    // =========================================================================
    // Batches
    // =========================================================================

    /// Record a completed batch.
    pub fn record_batch(scope_size: usize, matched: usize, savings: f64) {
        counter!("recommendation_batches_total", "status" => "completed").increment(1);
        histogram!("recommendation_batch_size").record(scope_size as f64);
        gauge!("recommendation_batch_savings_usd").set(savings);

        tracing::trace!(
            scope_size = scope_size,
            matched = matched,
            savings = savings,
            "Batch metrics recorded"
        );
    }

    /// Record a batch rejected before any estimation ran.
    pub fn record_batch_rejected(reason: &str) {
        counter!(
            "recommendation_batches_total",
            "status" => "rejected",
            "reason" => reason.to_string()
        )
        .increment(1);
    }
}

/// Timer guard for automatic duration recording.
///
/// Records the duration when `stop()` is called or when dropped.
pub struct EstimationTimer {
    start: Instant,
    operation: &'static str,
    service: String,
    stopped: bool,
}

impl EstimationTimer {
    /// Start a new timer for an operation (`cost`, `carbon`, `batch`, ...)
    pub fn new(operation: &'static str, service: &str) -> Self {
        Self {
            start: Instant::now(),
            operation,
            service: service.to_string(),
            stopped: false,
        }
    }

    /// Stop the timer and record the duration. Returns duration in milliseconds.
    pub fn stop(&mut self) -> u64 {
        if self.stopped {
            return 0;
        }
        self.stopped = true;

        let duration = self.start.elapsed();

        histogram!(
            "estimate_duration_seconds",
            "operation" => self.operation,
            "service" => self.service.clone()
        )
        .record(duration.as_secs_f64());

        duration.as_millis() as u64
    }
}

impl Drop for EstimationTimer {
    fn drop(&mut self) {
        if !self.stopped {
            self.stop();
        }
    }
}

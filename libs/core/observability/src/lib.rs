//! Observability utilities for the cost and carbon estimation engine.
//!
//! This crate provides:
//! - Prometheus metrics recording and export
//! - Custom metrics for catalog construction, estimates and batches
//!
//! # Example
//!
//! ```rust,ignore
//! use observability::{init_metrics, render_metrics, EstimationMetrics};
//!
//! init_metrics()?;
//! EstimationMetrics::record_estimate("ec2", "priced");
//! println!("{}", render_metrics());
//! ```

pub mod catalog;
pub mod estimation;

pub use catalog::CatalogMetrics;
pub use estimation::{EstimationMetrics, EstimationTimer};

// Re-export metrics macros for convenience
pub use metrics::{counter, gauge, histogram};

use metrics_exporter_prometheus::{BuildError, PrometheusBuilder, PrometheusHandle};
use once_cell::sync::OnceCell;
use tracing::info;

static METRICS_HANDLE: OnceCell<PrometheusHandle> = OnceCell::new();

/// Initialize the Prometheus metrics recorder.
///
/// Installs the global recorder on the first successful call; later calls
/// return the same handle. Fails if some other recorder was installed first.
pub fn init_metrics() -> Result<&'static PrometheusHandle, BuildError> {
    METRICS_HANDLE.get_or_try_init(|| {
        let handle = PrometheusBuilder::new().install_recorder()?;

        info!("Prometheus metrics recorder initialized");

        register_metric_descriptions();

        Ok(handle)
    })
}

/// Get the metrics handle (must call init_metrics first)
pub fn get_metrics_handle() -> Option<&'static PrometheusHandle> {
    METRICS_HANDLE.get()
}

/// Render the current metrics in Prometheus text format.
pub fn render_metrics() -> String {
    match get_metrics_handle() {
        Some(handle) => handle.render(),
        None => "# Metrics not initialized\n".to_string(),
    }
}

/// Register metric descriptions for documentation
fn register_metric_descriptions() {
    use metrics::describe_counter;
    use metrics::describe_gauge;
    use metrics::describe_histogram;

    // Catalog
    describe_counter!(
        "pricing_catalog_builds_total",
        "Catalog construction attempts by region and outcome"
    );
    describe_histogram!(
        "pricing_catalog_build_duration_seconds",
        "Time spent parsing and indexing the embedded price documents"
    );
    describe_gauge!(
        "pricing_catalog_products",
        "Indexed products by service"
    );

    // Estimates
    describe_counter!(
        "estimates_total",
        "Cost estimates by service and outcome"
    );
    describe_histogram!(
        "estimate_duration_seconds",
        "Estimate duration in seconds by operation"
    );
    describe_counter!(
        "carbon_estimates_total",
        "Carbon estimates by service and outcome"
    );

    // Batches
    describe_counter!(
        "recommendation_batches_total",
        "Recommendation batches by outcome"
    );
    describe_histogram!(
        "recommendation_batch_size",
        "Resolved scope size per batch"
    );
    describe_gauge!(
        "recommendation_batch_savings_usd",
        "Summed potential monthly savings of the last batch"
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_metrics_is_idempotent() {
        let first = init_metrics().expect("recorder installs");
        let second = init_metrics().expect("second call returns cached handle");
        assert!(std::ptr::eq(first, second));
        assert!(!render_metrics().starts_with("# Metrics not initialized"));
    }
}

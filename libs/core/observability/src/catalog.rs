//! Metrics for the one-time pricing catalog construction.

use metrics::{counter, gauge, histogram};

/// Catalog metrics recorder
pub struct CatalogMetrics;

impl CatalogMetrics {
    /// Record a completed catalog build.
    pub fn record_build_succeeded(region: &str, services: usize, products: usize, duration_secs: f64) {
        counter!(
            "pricing_catalog_builds_total",
            "region" => region.to_string(),
            "status" => "succeeded"
        )
        .increment(1);

        histogram!("pricing_catalog_build_duration_seconds", "region" => region.to_string())
            .record(duration_secs);

        tracing::debug!(
            region = region,
            services = services,
            products = products,
            duration_secs = duration_secs,
            "Catalog build recorded"
        );
    }

    /// Record a failed catalog build. This happens at most once per process.
    pub fn record_build_failed(region: &str, error: &str) {
        counter!(
            "pricing_catalog_builds_total",
            "region" => region.to_string(),
            "status" => "failed"
        )
        .increment(1);

        tracing::debug!(region = region, error = error, "Catalog build failure recorded");
    }

    /// Set the number of indexed products for one service.
    pub fn set_indexed_products(service: &str, count: usize) {
        gauge!("pricing_catalog_products", "service" => service.to_string()).set(count as f64);
    }
}

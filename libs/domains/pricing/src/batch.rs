//! Batch recommendation processing.
//!
//! A request moves through normalize, validate, filter and estimate, then
//! aggregate. Per-request state lives in [`BatchStats`], which is flushed once
//! and produces the only info-level log line for the batch.

use std::borrow::Cow;

use observability::EstimationMetrics;

use crate::client::PricingLookup;
use crate::error::{PricingError, PricingResult};
use crate::models::{
    BatchRequest, BatchResponse, BatchSummary, Recommendation, ResourceDescriptor, ResourceFilter,
    SUPPORTED_PROVIDER,
};
use crate::normalize::{ResourceClass, classify};
use crate::recommendations::recommend;
use crate::service::check_region;

/// Largest scope accepted in one batch.
pub const MAX_BATCH_SIZE: usize = 100;

/// Explicit targets, else a one-element scope built from a filter that names
/// both a resource type and a sku, else nothing.
pub fn normalize_scope(request: &BatchRequest) -> Cow<'_, [ResourceDescriptor]> {
    if !request.targets.is_empty() {
        return Cow::Borrowed(&request.targets);
    }
    let filter = &request.filter;
    if filter.resource_type.trim().is_empty() || filter.sku.trim().is_empty() {
        return Cow::Owned(Vec::new());
    }
    let mut descriptor = ResourceDescriptor::new(&filter.resource_type, &filter.sku, &filter.region);
    if !filter.provider.trim().is_empty() {
        descriptor.provider = filter.provider.clone();
    }
    Cow::Owned(vec![descriptor])
}

pub fn validate_scope(size: usize) -> PricingResult<()> {
    if size > MAX_BATCH_SIZE {
        EstimationMetrics::record_batch_rejected("too_large");
        return Err(PricingError::BatchTooLarge {
            size,
            max: MAX_BATCH_SIZE,
        });
    }
    Ok(())
}

fn field_matches(wanted: &str, actual: &str) -> bool {
    let wanted = wanted.trim();
    wanted.is_empty() || wanted.eq_ignore_ascii_case(actual.trim())
}

/// Every populated filter field must match. Resources from other providers
/// never match; an empty provider is taken as the supported one.
pub fn matches_filter(descriptor: &ResourceDescriptor, filter: &ResourceFilter) -> bool {
    let provider = match descriptor.provider.trim() {
        "" => SUPPORTED_PROVIDER,
        p => p,
    };
    provider.eq_ignore_ascii_case(SUPPORTED_PROVIDER)
        && field_matches(&filter.provider, provider)
        && field_matches(&filter.region, &descriptor.region)
        && field_matches(&filter.resource_type, &descriptor.resource_type)
}

/// Running totals for one batch.
#[derive(Debug, Default)]
pub struct BatchStats {
    scope_size: usize,
    matched: usize,
    processed: usize,
    skipped: usize,
    recommendations: usize,
    savings: f64,
}

impl BatchStats {
    pub fn new(scope_size: usize) -> Self {
        Self {
            scope_size,
            ..Default::default()
        }
    }

    pub fn matched(&mut self) {
        self.matched += 1;
    }

    pub fn skipped(&mut self) {
        self.skipped += 1;
    }

    /// Count a resource's recommendations. Only computed impacts add to the
    /// savings total.
    pub fn processed(&mut self, recommendations: &[Recommendation]) {
        self.processed += 1;
        self.recommendations += recommendations.len();
        for rec in recommendations {
            if let Some(impact) = &rec.impact {
                self.savings += impact.monthly_savings;
            }
        }
    }

    pub fn flush(self) -> BatchSummary {
        tracing::info!(
            scope_size = self.scope_size,
            matched = self.matched,
            processed = self.processed,
            skipped = self.skipped,
            recommendations = self.recommendations,
            total_monthly_savings = self.savings,
            "Recommendation batch completed"
        );
        EstimationMetrics::record_batch(self.scope_size, self.matched, self.savings);
        BatchSummary {
            scope_size: self.scope_size,
            processed: self.processed,
            matched: self.matched,
            skipped: self.skipped,
            recommendations: self.recommendations,
            total_monthly_savings: self.savings,
        }
    }
}

fn evaluate(descriptor: &ResourceDescriptor, lookup: &dyn PricingLookup) -> PricingResult<Vec<Recommendation>> {
    match classify(&descriptor.resource_type) {
        ResourceClass::Priced(kind) => {
            check_region(descriptor, lookup)?;
            recommend(kind, descriptor, lookup)
        }
        ResourceClass::ZeroCost(_) => Ok(Vec::new()),
        ResourceClass::Unsupported => Err(PricingError::Unsupported(descriptor.resource_type.clone())),
    }
}

/// Run a whole batch. Only an oversized scope or an unusable catalog fail the
/// call; per-resource problems are counted as skipped.
pub fn process(request: &BatchRequest, lookup: &dyn PricingLookup) -> PricingResult<BatchResponse> {
    let scope = normalize_scope(request);
    validate_scope(scope.len())?;
    lookup.ensure_ready()?;

    let mut stats = BatchStats::new(scope.len());
    let mut recommendations = Vec::new();
    for descriptor in scope.iter() {
        if !matches_filter(descriptor, &request.filter) {
            continue;
        }
        stats.matched();
        match evaluate(descriptor, lookup) {
            Ok(found) => {
                stats.processed(&found);
                recommendations.extend(found);
            }
            Err(e) => {
                tracing::debug!(
                    resource = descriptor.correlation_id().unwrap_or_default(),
                    resource_type = %descriptor.resource_type,
                    error = %e,
                    "Skipping resource"
                );
                stats.skipped();
            }
        }
    }

    Ok(BatchResponse {
        recommendations,
        summary: stats.flush(),
    })
}

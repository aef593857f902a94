use std::sync::Arc;

use domain_carbon::{DEFAULT_UTILIZATION, SpecTable, clamp_utilization};
use observability::{EstimationMetrics, EstimationTimer};
use validator::Validate;

use crate::batch;
use crate::client::{PricingClient, PricingLookup};
use crate::error::{PricingError, PricingResult};
use crate::estimators::{self, CarbonContext};
use crate::models::{
    BatchRequest, BatchResponse, CostEstimate, CostWithCarbon, Recommendation, ResourceDescriptor,
    SupportResult,
};
use crate::normalize::{ResourceClass, ServiceKind, classify};
use crate::recommendations;
use crate::usage::Tags;

/// Behaviour switches read by the host at startup.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EstimationConfig {
    /// Utilization used for carbon when a resource has no `utilization` tag
    pub default_utilization: f64,
    pub carbon_enabled: bool,
}

impl Default for EstimationConfig {
    fn default() -> Self {
        Self {
            default_utilization: DEFAULT_UTILIZATION,
            carbon_enabled: true,
        }
    }
}

/// An empty descriptor region means the compiled one.
pub(crate) fn check_region(descriptor: &ResourceDescriptor, lookup: &dyn PricingLookup) -> PricingResult<()> {
    let requested = descriptor.region.trim();
    let compiled = lookup.region();
    if requested.is_empty() || requested.eq_ignore_ascii_case(&compiled) {
        Ok(())
    } else {
        Err(PricingError::RegionMismatch {
            requested: requested.to_string(),
            compiled,
        })
    }
}

/// Entry point for capability checks, estimates and batches.
pub struct EstimationService<L: PricingLookup> {
    lookup: Arc<L>,
    config: EstimationConfig,
}

impl<L: PricingLookup> Clone for EstimationService<L> {
    fn clone(&self) -> Self {
        Self {
            lookup: Arc::clone(&self.lookup),
            config: self.config,
        }
    }
}

impl EstimationService<PricingClient> {
    /// Service over the process-wide embedded catalog.
    pub fn embedded(config: EstimationConfig) -> Self {
        Self::from_shared(PricingClient::embedded(), config)
    }
}

impl<L: PricingLookup> EstimationService<L> {
    pub fn new(lookup: L, config: EstimationConfig) -> Self {
        Self::from_shared(Arc::new(lookup), config)
    }

    pub fn from_shared(lookup: Arc<L>, config: EstimationConfig) -> Self {
        Self { lookup, config }
    }

    pub fn config(&self) -> &EstimationConfig {
        &self.config
    }

    /// Whether `resource_type` in `region` can be estimated. Never fails.
    pub fn supports(&self, resource_type: &str, region: &str) -> SupportResult {
        let compiled = self.lookup.region();
        let region = region.trim();
        let (supported, reason) = match classify(resource_type) {
            ResourceClass::Unsupported => (false, format!("resource type {resource_type:?} is not supported")),
            _ if !region.is_empty() && !region.eq_ignore_ascii_case(&compiled) => {
                (false, format!("region {region} is not served (compiled for {compiled})"))
            }
            ResourceClass::Priced(kind) => (true, format!("priced as {kind} in {compiled}")),
            ResourceClass::ZeroCost(category) => (true, format!("{category} resources have no direct charge")),
        };
        SupportResult { supported, reason }
    }

    fn resolve(&self, descriptor: &ResourceDescriptor) -> PricingResult<Resolved> {
        descriptor.validate()?;
        match classify(&descriptor.resource_type) {
            ResourceClass::Priced(kind) => {
                check_region(descriptor, self.lookup.as_ref())?;
                self.lookup.ensure_ready()?;
                Ok(Resolved::Priced(kind))
            }
            ResourceClass::ZeroCost(category) => Ok(Resolved::Free(category)),
            ResourceClass::Unsupported => Err(PricingError::Unsupported(descriptor.resource_type.clone())),
        }
    }

    /// Monthly cost of one resource.
    pub fn estimate_cost(&self, descriptor: &ResourceDescriptor) -> PricingResult<CostEstimate> {
        let kind = match self.resolve(descriptor) {
            Ok(Resolved::Priced(kind)) => kind,
            Ok(Resolved::Free(category)) => {
                EstimationMetrics::record_estimate("none", "zero");
                return Ok(CostEstimate::free(format!("{category} resources have no direct charge")));
            }
            Err(e) => {
                let outcome = match e {
                    PricingError::Unsupported(_) => "unsupported",
                    _ => "rejected",
                };
                EstimationMetrics::record_estimate("none", outcome);
                return Err(e);
            }
        };

        let _timer = EstimationTimer::new("cost", kind.as_str());
        let result = estimators::estimate_cost(kind, descriptor, self.lookup.as_ref());
        let outcome = match &result {
            Ok(est) if est.priced => "priced",
            Ok(_) => "zero",
            Err(_) => "rejected",
        };
        EstimationMetrics::record_estimate(kind.as_str(), outcome);
        if let Ok(est) = &result {
            tracing::debug!(
                service = kind.as_str(),
                sku = %descriptor.sku,
                monthly_cost = est.monthly_cost,
                priced = est.priced,
                "Cost estimated"
            );
        }
        result
    }

    /// Cost plus, where the resource has a physical footprint, carbon.
    pub fn estimate_cost_with_carbon(&self, descriptor: &ResourceDescriptor) -> PricingResult<CostWithCarbon> {
        let cost = self.estimate_cost(descriptor)?;
        let ResourceClass::Priced(kind) = classify(&descriptor.resource_type) else {
            return Ok(CostWithCarbon { cost, carbon: None });
        };
        if !self.config.carbon_enabled {
            return Ok(CostWithCarbon { cost, carbon: None });
        }

        let _timer = EstimationTimer::new("carbon", kind.as_str());
        let specs = SpecTable::embedded()?;
        let compiled = self.lookup.region();
        let region = match descriptor.region.trim() {
            "" => compiled.as_str(),
            r => r,
        };
        let utilization = Tags::new(&descriptor.tags)
            .utilization()
            .unwrap_or_else(|| clamp_utilization(self.config.default_utilization));
        let ctx = CarbonContext {
            specs,
            region,
            utilization,
        };

        let carbon = estimators::estimate_carbon(kind, descriptor, &ctx);
        EstimationMetrics::record_carbon(
            kind.as_str(),
            if carbon.is_some() { "estimated" } else { "unavailable" },
        );
        Ok(CostWithCarbon { cost, carbon })
    }

    /// Recommendations for a single resource.
    pub fn recommend(&self, descriptor: &ResourceDescriptor) -> PricingResult<Vec<Recommendation>> {
        match self.resolve(descriptor)? {
            Resolved::Priced(kind) => recommendations::recommend(kind, descriptor, self.lookup.as_ref()),
            Resolved::Free(_) => Ok(Vec::new()),
        }
    }

    pub fn estimate_batch(&self, request: &BatchRequest) -> PricingResult<BatchResponse> {
        let _timer = EstimationTimer::new("batch", "all");
        batch::process(request, self.lookup.as_ref())
    }
}

enum Resolved {
    Priced(ServiceKind),
    Free(&'static str),
}

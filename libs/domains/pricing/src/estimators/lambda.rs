use domain_carbon::{CarbonEstimate, ServerlessUsage, estimate_serverless};

use super::CarbonContext;
use crate::catalog::keys::Architecture;
use crate::client::PricingLookup;
use crate::error::PricingResult;
use crate::models::{CostEstimate, ResourceDescriptor};
use crate::usage::{BillingDetail, Tags};

const REQUESTS_TAG: &str = "requests_per_month";
const DURATION_TAGS: &[&str] = &["avg_duration_ms"];
const MEMORY_TAGS: &[&str] = &["memory_size", "memory_mb"];
const DEFAULT_DURATION_MS: f64 = 100.0;
const DEFAULT_MEMORY_MB: f64 = 128.0;

struct Invocation {
    requests: f64,
    duration_ms: f64,
    memory_mb: f64,
    arch: Architecture,
}

impl Invocation {
    fn gb_seconds(&self) -> f64 {
        self.requests * (self.duration_ms / 1000.0) * (self.memory_mb / 1024.0)
    }
}

fn invocation(tags: &Tags<'_>, requests: f64, detail: &mut BillingDetail) -> Invocation {
    Invocation {
        requests,
        duration_ms: tags.quantity_or(DURATION_TAGS, DEFAULT_DURATION_MS, "ms", detail),
        memory_mb: tags.quantity_or(MEMORY_TAGS, DEFAULT_MEMORY_MB, "MB", detail),
        arch: tags.choice_or(&["architecture"], Architecture::X86_64, detail),
    }
}

pub(super) fn estimate(
    descriptor: &ResourceDescriptor,
    lookup: &dyn PricingLookup,
) -> PricingResult<CostEstimate> {
    let tags = Tags::new(&descriptor.tags);
    let mut detail = BillingDetail::new("Lambda function");

    let Some(requests) = tags.required_quantity(REQUESTS_TAG)? else {
        detail.note(format!(
            "{REQUESTS_TAG} tag not provided; invocation volume unknown, cost is 0"
        ));
        return Ok(CostEstimate::unpriced(detail.finish()));
    };
    let call = invocation(&tags, requests, &mut detail);

    let (Some(request_rate), Some(duration_rate)) =
        (lookup.lambda_requests(call.arch), lookup.lambda_duration(call.arch))
    else {
        detail.note(format!("no {} Lambda price in {}", call.arch, lookup.region()));
        return Ok(CostEstimate::unpriced(detail.finish()));
    };

    let gb_seconds = call.gb_seconds();
    let monthly = call.requests * request_rate.usd + gb_seconds * duration_rate.usd;
    detail.note(format!(
        "{} requests at ${}/request; {gb_seconds} GB-s ({}ms, {}MB, {}) at ${}/GB-s",
        call.requests, request_rate.usd, call.duration_ms, call.memory_mb, call.arch, duration_rate.usd
    ));
    Ok(CostEstimate::priced(request_rate.usd, "Requests", monthly, detail.finish()))
}

pub(super) fn carbon(descriptor: &ResourceDescriptor, ctx: &CarbonContext<'_>) -> Option<CarbonEstimate> {
    let tags = Tags::new(&descriptor.tags);
    let requests = tags.required_quantity(REQUESTS_TAG).ok()??;
    let call = invocation(&tags, requests, &mut BillingDetail::default());
    estimate_serverless(
        ctx.specs,
        &ServerlessUsage {
            region: ctx.region,
            invocations: call.requests,
            avg_duration_ms: call.duration_ms,
            memory_mb: call.memory_mb,
            arm: call.arch == Architecture::Arm64,
            utilization: ctx.utilization,
        },
    )
}

use domain_carbon::{CarbonEstimate, ComputeUsage, estimate_compute};

use super::{CarbonContext, HOURS_PER_MONTH, required_sku};
use crate::catalog::keys::{CacheEngine, CacheKey};
use crate::client::PricingLookup;
use crate::error::PricingResult;
use crate::models::{CostEstimate, ResourceDescriptor};
use crate::usage::{BillingDetail, Tags};

const NODES_TAGS: &[&str] = &["num_nodes", "num_cache_nodes"];

/// Whole nodes, at least one. A count below one is raised and noted.
fn node_count(tags: &Tags<'_>, detail: &mut BillingDetail) -> f64 {
    let nodes = tags.quantity_or(NODES_TAGS, 1.0, "", detail).floor();
    if nodes < 1.0 {
        detail.note(format!("{} below 1 node", NODES_TAGS[0]));
        detail.defaulted(NODES_TAGS[0], 1);
        return 1.0;
    }
    nodes
}

pub(super) fn estimate(
    descriptor: &ResourceDescriptor,
    lookup: &dyn PricingLookup,
) -> PricingResult<CostEstimate> {
    let node_type = required_sku(descriptor, "node type")?;
    let tags = Tags::new(&descriptor.tags);
    let mut detail = BillingDetail::new(format!("ElastiCache {node_type}"));

    let engine = tags.choice_or(&["engine"], CacheEngine::Redis, &mut detail);
    let nodes = node_count(&tags, &mut detail);

    let Some(rate) = lookup.elasticache_node_hourly(&CacheKey::new(node_type, engine)) else {
        detail.note(format!("no {engine} price for {node_type} in {}", lookup.region()));
        return Ok(CostEstimate::unpriced(detail.finish()));
    };

    let monthly = rate.usd * HOURS_PER_MONTH * nodes;
    detail.note(format!(
        "{engine}: {nodes} node(s) x ${}/hr x {HOURS_PER_MONTH} hrs",
        rate.usd
    ));
    Ok(CostEstimate::priced(rate.usd, "Hrs", monthly, detail.finish()))
}

pub(super) fn carbon(descriptor: &ResourceDescriptor, ctx: &CarbonContext<'_>) -> Option<CarbonEstimate> {
    let nodes = node_count(&Tags::new(&descriptor.tags), &mut BillingDetail::default());
    let node = estimate_compute(
        ctx.specs,
        &ComputeUsage {
            instance_type: descriptor.sku.trim(),
            region: ctx.region,
            utilization: ctx.utilization,
            hours: HOURS_PER_MONTH,
        },
    )?;
    Some(node.scaled(nodes))
}

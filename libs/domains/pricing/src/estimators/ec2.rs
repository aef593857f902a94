use domain_carbon::{CarbonEstimate, ComputeUsage, estimate_compute};

use super::{CarbonContext, HOURS_PER_MONTH, required_sku};
use crate::catalog::keys::{Architecture, Ec2Key, OperatingSystem, Tenancy};
use crate::client::PricingLookup;
use crate::error::PricingResult;
use crate::models::{CostEstimate, ResourceDescriptor};
use crate::usage::{BillingDetail, Tags};

const OS_TAGS: &[&str] = &["operating_system", "platform"];

pub(super) fn estimate(
    descriptor: &ResourceDescriptor,
    lookup: &dyn PricingLookup,
) -> PricingResult<CostEstimate> {
    let instance_type = required_sku(descriptor, "instance type")?;
    let tags = Tags::new(&descriptor.tags);
    let mut detail = BillingDetail::new(format!("On-demand EC2 {instance_type}"));

    let os = tags.choice_or(OS_TAGS, OperatingSystem::Linux, &mut detail);
    let tenancy = tags.choice_or(&["tenancy"], Tenancy::Shared, &mut detail);
    let arch = tags.choice_or(
        &["architecture"],
        Architecture::infer_from_class(instance_type),
        &mut detail,
    );

    let key = Ec2Key::new(instance_type, os, tenancy, arch);
    let Some(rate) = lookup.ec2_hourly(&key) else {
        detail.note(format!(
            "no on-demand price for {instance_type} ({os}, {tenancy}, {arch}) in {}",
            lookup.region()
        ));
        return Ok(CostEstimate::unpriced(detail.finish()));
    };

    let monthly = rate.usd * HOURS_PER_MONTH;
    detail.note(format!(
        "{os}, {tenancy} tenancy, {arch}: ${}/hr x {HOURS_PER_MONTH} hrs",
        rate.usd
    ));
    if let (Some(vcpu), Some(memory)) = (rate.vcpu, rate.memory_gib) {
        detail.note(format!("{vcpu} vCPU, {memory} GiB"));
    }
    Ok(CostEstimate::priced(rate.usd, "Hrs", monthly, detail.finish()))
}

pub(super) fn carbon(descriptor: &ResourceDescriptor, ctx: &CarbonContext<'_>) -> Option<CarbonEstimate> {
    estimate_compute(
        ctx.specs,
        &ComputeUsage {
            instance_type: descriptor.sku.trim(),
            region: ctx.region,
            utilization: ctx.utilization,
            hours: HOURS_PER_MONTH,
        },
    )
}

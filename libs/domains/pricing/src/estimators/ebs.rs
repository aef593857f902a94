use std::str::FromStr;

use domain_carbon::{CarbonEstimate, StorageService, StorageUsage, estimate_storage};

use super::{CarbonContext, HOURS_PER_MONTH};
use crate::catalog::keys::VolumeType;
use crate::client::PricingLookup;
use crate::error::PricingResult;
use crate::models::{CostEstimate, ResourceDescriptor};
use crate::usage::{BillingDetail, Tags};

pub(crate) const DEFAULT_SIZE_GB: f64 = 8.0;
const SIZE_TAGS: &[&str] = &["size", "volume_size", "size_gb"];

/// Volume type from the sku; empty means gp2, unknown is `Err(raw)`.
fn volume_type<'a>(descriptor: &'a ResourceDescriptor, detail: &mut BillingDetail) -> Result<VolumeType, &'a str> {
    let sku = descriptor.sku.trim();
    if sku.is_empty() {
        detail.defaulted("volume type", VolumeType::Gp2);
        return Ok(VolumeType::Gp2);
    }
    VolumeType::from_str(sku).map_err(|_| sku)
}

pub(super) fn estimate(
    descriptor: &ResourceDescriptor,
    lookup: &dyn PricingLookup,
) -> PricingResult<CostEstimate> {
    let tags = Tags::new(&descriptor.tags);
    let mut detail = BillingDetail::new("EBS volume");

    let volume = match volume_type(descriptor, &mut detail) {
        Ok(v) => v,
        Err(raw) => {
            detail.note(format!("unknown EBS volume type {raw:?}"));
            return Ok(CostEstimate::unpriced(detail.finish()));
        }
    };
    let size = tags.quantity_or(SIZE_TAGS, DEFAULT_SIZE_GB, "GB", &mut detail);

    let Some(storage) = lookup.ebs_storage(volume) else {
        detail.note(format!("no {volume} storage price in {}", lookup.region()));
        return Ok(CostEstimate::unpriced(detail.finish()));
    };

    let mut monthly = size * storage.usd;
    detail.note(format!("{volume} {size}GB at ${}/GB-month", storage.usd));

    if volume.bills_iops() {
        let (baseline_iops, baseline_throughput) = volume.baseline().unwrap_or((0.0, 0.0));
        let default_iops = if baseline_iops > 0.0 { baseline_iops } else { 100.0 };
        let iops = tags.quantity_or(&["iops"], default_iops, "", &mut detail);
        let billable_iops = (iops - baseline_iops).max(0.0);
        if billable_iops > 0.0 {
            match lookup.ebs_iops(volume) {
                Some(rate) => {
                    monthly += billable_iops * rate.usd;
                    detail.note(format!("{billable_iops} provisioned IOPS at ${}/IOPS-month", rate.usd));
                }
                None => detail.note(format!("no provisioned IOPS price for {volume}")),
            }
        }

        if volume == VolumeType::Gp3 {
            let throughput = tags.quantity_or(&["throughput"], baseline_throughput, "MiBps", &mut detail);
            let billable = (throughput - baseline_throughput).max(0.0);
            if billable > 0.0 {
                match lookup.ebs_throughput(volume) {
                    Some(rate) => {
                        monthly += billable * rate.usd;
                        detail.note(format!("{billable}MiBps provisioned throughput at ${}/MiBps-month", rate.usd));
                    }
                    None => detail.note(format!("no provisioned throughput price for {volume}")),
                }
            }
        }
    }

    Ok(CostEstimate::priced(storage.usd, "GB-Mo", monthly, detail.finish()))
}

pub(super) fn carbon(descriptor: &ResourceDescriptor, ctx: &CarbonContext<'_>) -> Option<CarbonEstimate> {
    let mut scratch = BillingDetail::default();
    let volume = volume_type(descriptor, &mut scratch).ok()?;
    let size = Tags::new(&descriptor.tags).quantity_or(SIZE_TAGS, DEFAULT_SIZE_GB, "GB", &mut scratch);
    Some(estimate_storage(&StorageUsage {
        size_gb: size,
        technology: volume.technology(),
        service: StorageService::Ebs,
        region: ctx.region,
        hours: HOURS_PER_MONTH,
    }))
}

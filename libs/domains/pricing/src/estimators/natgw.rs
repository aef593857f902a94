use super::HOURS_PER_MONTH;
use crate::catalog::keys::NatGatewayDimension;
use crate::client::PricingLookup;
use crate::error::PricingResult;
use crate::models::{CostEstimate, ResourceDescriptor};
use crate::usage::{BillingDetail, Tags};

pub(super) fn estimate(
    descriptor: &ResourceDescriptor,
    lookup: &dyn PricingLookup,
) -> PricingResult<CostEstimate> {
    let tags = Tags::new(&descriptor.tags);
    let mut detail = BillingDetail::new("NAT Gateway");

    let Some(hourly) = lookup.nat_gateway_rate(NatGatewayDimension::Hours) else {
        detail.note(format!("no NAT Gateway price in {}", lookup.region()));
        return Ok(CostEstimate::unpriced(detail.finish()));
    };
    let mut monthly = hourly.usd * HOURS_PER_MONTH;
    detail.note(format!("${}/hr x {HOURS_PER_MONTH} hrs", hourly.usd));

    let gb = tags.quantity_or(&["data_processed_gb"], 0.0, "GB", &mut detail);
    if gb > 0.0 {
        match lookup.nat_gateway_rate(NatGatewayDimension::DataProcessedGb) {
            Some(rate) => {
                monthly += gb * rate.usd;
                detail.note(format!("{gb}GB processed at ${}/GB", rate.usd));
            }
            None => detail.note("no data processing price, data not included"),
        }
    }

    Ok(CostEstimate::priced(hourly.usd, "Hrs", monthly, detail.finish()))
}

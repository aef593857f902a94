use std::str::FromStr;

use super::HOURS_PER_MONTH;
use crate::catalog::keys::{ElbDimension, LoadBalancerKind};
use crate::client::PricingLookup;
use crate::error::PricingResult;
use crate::models::{CostEstimate, ResourceDescriptor};
use crate::usage::{BillingDetail, Tags};

const KIND_TAGS: &[&str] = &["lb_type"];

pub(super) fn estimate(
    descriptor: &ResourceDescriptor,
    lookup: &dyn PricingLookup,
) -> PricingResult<CostEstimate> {
    let tags = Tags::new(&descriptor.tags);
    let mut detail = BillingDetail::new("Elastic Load Balancer");

    let from_sku = LoadBalancerKind::from_str(descriptor.sku.trim()).ok();
    let kind = tags.choice_or_else(KIND_TAGS, from_sku, LoadBalancerKind::Application, &mut detail);

    let Some(hourly) = lookup.elb_rate(kind, ElbDimension::Hours) else {
        detail.note(format!("no {kind} load balancer price in {}", lookup.region()));
        return Ok(CostEstimate::unpriced(detail.finish()));
    };
    let mut monthly = hourly.usd * HOURS_PER_MONTH;
    detail.note(format!("{kind}: ${}/hr x {HOURS_PER_MONTH} hrs", hourly.usd));

    match kind {
        LoadBalancerKind::Classic => {
            let gb = tags.quantity_or(&["data_processed_gb"], 0.0, "GB", &mut detail);
            if gb > 0.0 {
                match lookup.elb_rate(kind, ElbDimension::DataProcessedGb) {
                    Some(rate) => {
                        monthly += gb * rate.usd;
                        detail.note(format!("{gb}GB processed at ${}/GB", rate.usd));
                    }
                    None => detail.note("no data processing price, data not included"),
                }
            }
        }
        LoadBalancerKind::Application | LoadBalancerKind::Network => {
            let units = tags.quantity_or(&["capacity_units"], 0.0, "", &mut detail);
            if units > 0.0 {
                match lookup.elb_rate(kind, ElbDimension::CapacityUnitHours) {
                    Some(rate) => {
                        monthly += units * HOURS_PER_MONTH * rate.usd;
                        detail.note(format!(
                            "{units} capacity units x {HOURS_PER_MONTH} hrs at ${}/unit-hour",
                            rate.usd
                        ));
                    }
                    None => detail.note("no capacity unit price, capacity not included"),
                }
            }
        }
    }

    Ok(CostEstimate::priced(hourly.usd, "Hrs", monthly, detail.finish()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Rate;
    use crate::estimators::test_support::lookup;
    use test_utils::assertions::{assert_approx_eq, assert_contains};

    fn rates(kind: LoadBalancerKind, dimension: ElbDimension) -> Option<Rate> {
        let usd = match (kind, dimension) {
            (LoadBalancerKind::Classic, ElbDimension::Hours) => 0.025,
            (LoadBalancerKind::Classic, ElbDimension::DataProcessedGb) => 0.008,
            (_, ElbDimension::Hours) => 0.0225,
            (_, ElbDimension::CapacityUnitHours) => 0.008,
            _ => return None,
        };
        Some(Rate::usd(usd))
    }

    #[test]
    fn test_application_default_with_capacity_units() {
        let mut mock = lookup();
        mock.expect_elb_rate().returning(rates);

        let d = ResourceDescriptor::new("elb", "", "us-east-1").with_tag("capacity_units", "2");
        let est = estimate(&d, &mock).unwrap();
        let expected = 0.0225 * 730.0 + 2.0 * 730.0 * 0.008;
        assert_approx_eq(est.monthly_cost, expected, 1e-9, "monthly");
        assert_contains(&est.billing_detail, "lb_type defaulted to application", "detail");
    }

    #[test]
    fn test_classic_by_sku_bills_data() {
        let mut mock = lookup();
        mock.expect_elb_rate().returning(rates);

        let d = ResourceDescriptor::new("elb", "classic", "us-east-1").with_tag("data_processed_gb", "1000");
        let est = estimate(&d, &mock).unwrap();
        assert_approx_eq(est.monthly_cost, 0.025 * 730.0 + 8.0, 1e-9, "monthly");
    }

    #[test]
    fn test_unrecognized_type_tag_falls_back_to_sku() {
        let mut mock = lookup();
        mock.expect_elb_rate().returning(rates);

        let d = ResourceDescriptor::new("elb", "classic", "us-east-1")
            .with_tag("lb_type", "gateway")
            .with_tag("data_processed_gb", "0");
        let est = estimate(&d, &mock).unwrap();
        assert_approx_eq(est.monthly_cost, 0.025 * 730.0, 1e-9, "monthly");
        assert_contains(&est.billing_detail, "classic", "detail");
        assert_contains(&est.billing_detail, "\"gateway\" not recognized", "detail");
        assert!(!est.billing_detail.contains("defaulted"), "{}", est.billing_detail);
    }

    #[test]
    fn test_zero_capacity_units_listed() {
        let mut mock = lookup();
        mock.expect_elb_rate().returning(rates);

        let d = ResourceDescriptor::new("elb", "", "us-east-1").with_tag("lb_type", "nlb");
        let est = estimate(&d, &mock).unwrap();
        assert_approx_eq(est.monthly_cost, 0.0225 * 730.0, 1e-9, "monthly");
        assert_contains(&est.billing_detail, "capacity_units defaulted to 0", "detail");
    }
}

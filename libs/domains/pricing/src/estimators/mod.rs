//! Per-service cost and carbon estimators.
//!
//! Cost estimators are pure functions over a `PricingLookup`. A missing rate
//! degrades to an unpriced zero estimate that says why; only malformed input
//! is an error. Carbon estimators return `None` when the resource has no
//! known physical footprint.

mod dynamodb;
mod ebs;
mod ec2;
mod eks;
mod elasticache;
mod elb;
mod lambda;
mod natgw;
mod rds;
mod s3;

use domain_carbon::{CarbonEstimate, SpecTable};
pub use domain_carbon::HOURS_PER_MONTH;

use crate::client::PricingLookup;
use crate::error::PricingResult;
use crate::models::{CostEstimate, ResourceDescriptor};
use crate::normalize::ServiceKind;

/// Inputs shared by every carbon estimator.
#[derive(Debug, Clone, Copy)]
pub struct CarbonContext<'a> {
    pub specs: &'a SpecTable,
    pub region: &'a str,
    pub utilization: f64,
}

pub fn estimate_cost(
    kind: ServiceKind,
    descriptor: &ResourceDescriptor,
    lookup: &dyn PricingLookup,
) -> PricingResult<CostEstimate> {
    match kind {
        ServiceKind::Ec2 => ec2::estimate(descriptor, lookup),
        ServiceKind::Ebs => ebs::estimate(descriptor, lookup),
        ServiceKind::S3 => s3::estimate(descriptor, lookup),
        ServiceKind::Lambda => lambda::estimate(descriptor, lookup),
        ServiceKind::Rds => rds::estimate(descriptor, lookup),
        ServiceKind::DynamoDb => dynamodb::estimate(descriptor, lookup),
        ServiceKind::Eks => eks::estimate(descriptor, lookup),
        ServiceKind::Elb => elb::estimate(descriptor, lookup),
        ServiceKind::NatGateway => natgw::estimate(descriptor, lookup),
        ServiceKind::ElastiCache => elasticache::estimate(descriptor, lookup),
    }
}

pub fn estimate_carbon(
    kind: ServiceKind,
    descriptor: &ResourceDescriptor,
    ctx: &CarbonContext<'_>,
) -> Option<CarbonEstimate> {
    match kind {
        ServiceKind::Ec2 => ec2::carbon(descriptor, ctx),
        ServiceKind::Ebs => ebs::carbon(descriptor, ctx),
        ServiceKind::S3 => s3::carbon(descriptor, ctx),
        ServiceKind::Lambda => lambda::carbon(descriptor, ctx),
        ServiceKind::Rds => rds::carbon(descriptor, ctx),
        ServiceKind::DynamoDb => dynamodb::carbon(descriptor, ctx),
        ServiceKind::Eks => eks::carbon(ctx),
        ServiceKind::ElastiCache => elasticache::carbon(descriptor, ctx),
        ServiceKind::Elb | ServiceKind::NatGateway => None,
    }
}

/// Required class/type from the descriptor's sku.
pub(crate) fn required_sku<'a>(
    descriptor: &'a ResourceDescriptor,
    what: &str,
) -> PricingResult<&'a str> {
    let sku = descriptor.sku.trim();
    if sku.is_empty() {
        Err(crate::error::PricingError::InvalidInput(format!(
            "sku ({what}) is required"
        )))
    } else {
        Ok(sku)
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use crate::client::MockPricingLookup;

    /// Mock lookup reporting `us-east-1`; tests add the rate expectations
    /// they exercise.
    pub fn lookup() -> MockPricingLookup {
        let mut mock = MockPricingLookup::new();
        mock.expect_region().return_const("us-east-1".to_string());
        mock
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Rate;
    use domain_carbon::embodied::{SERVER_EMBODIED_KG, SERVER_LIFESPAN_MONTHS};
    use domain_carbon::embodied_kg;
    use test_utils::assertions::assert_approx_eq;

    #[test]
    fn test_cost_and_embodied_carbon_use_the_same_month() {
        let mut mock = test_support::lookup();
        mock.expect_eks_cluster_hourly().returning(|_| Some(Rate::usd(1.0)));
        let est = estimate_cost(ServiceKind::Eks, &ResourceDescriptor::new("eks", "", ""), &mock).unwrap();

        assert_approx_eq(est.monthly_cost, HOURS_PER_MONTH, 1e-9, "one dollar-hour month");
        assert_approx_eq(
            embodied_kg(1.0, HOURS_PER_MONTH),
            SERVER_EMBODIED_KG / SERVER_LIFESPAN_MONTHS,
            1e-9,
            "one server-month",
        );
    }
}

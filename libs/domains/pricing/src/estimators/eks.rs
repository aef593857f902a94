use std::str::FromStr;

use domain_carbon::{CarbonEstimate, grid_intensity};

use super::{CarbonContext, HOURS_PER_MONTH};
use crate::catalog::keys::EksSupportTier;
use crate::client::PricingLookup;
use crate::error::PricingResult;
use crate::models::{CostEstimate, ResourceDescriptor};
use crate::usage::{BillingDetail, Tags};

pub(super) fn estimate(
    descriptor: &ResourceDescriptor,
    lookup: &dyn PricingLookup,
) -> PricingResult<CostEstimate> {
    let tags = Tags::new(&descriptor.tags);
    let mut detail = BillingDetail::new("EKS cluster control plane");

    let from_sku = EksSupportTier::from_str(descriptor.sku.trim()).ok();
    let tier = tags.choice_or_else(&["support_tier"], from_sku, EksSupportTier::Standard, &mut detail);

    let Some(rate) = lookup.eks_cluster_hourly(tier) else {
        detail.note(format!("no {tier} support price in {}", lookup.region()));
        return Ok(CostEstimate::unpriced(detail.finish()));
    };
    detail.note(format!("{tier} support: ${}/hr x {HOURS_PER_MONTH} hrs", rate.usd));
    Ok(CostEstimate::priced(rate.usd, "Hrs", rate.usd * HOURS_PER_MONTH, detail.finish()))
}

/// The control plane runs on shared capacity, so nothing is attributed.
pub(super) fn carbon(ctx: &CarbonContext<'_>) -> Option<CarbonEstimate> {
    Some(CarbonEstimate::zero(grid_intensity(ctx.region)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Rate;
    use crate::estimators::test_support::lookup;
    use domain_carbon::SpecTable;
    use mockall::predicate::eq;
    use test_utils::assertions::{assert_approx_eq, assert_contains};

    #[test]
    fn test_standard_cluster() {
        let mut mock = lookup();
        mock.expect_eks_cluster_hourly()
            .with(eq(EksSupportTier::Standard))
            .returning(|_| Some(Rate::usd(0.10)));

        let est = estimate(&ResourceDescriptor::new("eks", "", "us-east-1"), &mock).unwrap();
        assert_approx_eq(est.monthly_cost, 73.0, 1e-9, "monthly");
        assert_contains(&est.billing_detail, "support_tier defaulted to standard", "detail");
    }

    #[test]
    fn test_extended_support_from_tag_or_sku() {
        let mut mock = lookup();
        mock.expect_eks_cluster_hourly()
            .with(eq(EksSupportTier::Extended))
            .times(2)
            .returning(|_| Some(Rate::usd(0.60)));

        let tagged = ResourceDescriptor::new("eks", "", "us-east-1").with_tag("support_tier", "extended");
        let by_sku = ResourceDescriptor::new("eks", "extended", "us-east-1");
        for d in [tagged, by_sku] {
            let est = estimate(&d, &mock).unwrap();
            assert_approx_eq(est.monthly_cost, 438.0, 1e-9, "monthly");
            assert!(!est.billing_detail.contains("defaulted"));
        }
    }

    #[test]
    fn test_unrecognized_tier_tag_falls_back_to_sku() {
        let mut mock = lookup();
        mock.expect_eks_cluster_hourly()
            .with(eq(EksSupportTier::Extended))
            .returning(|_| Some(Rate::usd(0.60)));

        let d = ResourceDescriptor::new("eks", "extended", "us-east-1").with_tag("support_tier", "premium");
        let est = estimate(&d, &mock).unwrap();
        assert_approx_eq(est.monthly_cost, 438.0, 1e-9, "monthly");
        assert_contains(&est.billing_detail, "\"premium\" not recognized", "detail");
        assert!(!est.billing_detail.contains("defaulted"), "{}", est.billing_detail);
    }

    #[test]
    fn test_control_plane_carbon_is_zero() {
        let ctx = CarbonContext {
            specs: SpecTable::embedded().unwrap(),
            region: "eu-west-1",
            utilization: 0.9,
        };
        let est = carbon(&ctx).unwrap();
        assert_eq!(est.operational_grams, 0.0);
        assert_eq!(est.total_grams, 0.0);
    }
}

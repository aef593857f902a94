use std::str::FromStr;

use domain_carbon::{CarbonEstimate, StorageService, StorageTechnology, StorageUsage, estimate_storage};

use super::{CarbonContext, HOURS_PER_MONTH};
use crate::catalog::keys::S3StorageClass;
use crate::client::PricingLookup;
use crate::error::PricingResult;
use crate::models::{CostEstimate, ResourceDescriptor};
use crate::usage::{BillingDetail, Tags};

const SIZE_TAG: &str = "size_gb";

fn storage_class<'a>(
    descriptor: &'a ResourceDescriptor,
    detail: &mut BillingDetail,
) -> Result<S3StorageClass, &'a str> {
    let sku = descriptor.sku.trim();
    if sku.is_empty() {
        detail.defaulted("storage class", S3StorageClass::Standard);
        return Ok(S3StorageClass::Standard);
    }
    S3StorageClass::from_str(sku).map_err(|_| sku)
}

pub(super) fn estimate(
    descriptor: &ResourceDescriptor,
    lookup: &dyn PricingLookup,
) -> PricingResult<CostEstimate> {
    let tags = Tags::new(&descriptor.tags);
    let mut detail = BillingDetail::new("S3 storage");

    let class = match storage_class(descriptor, &mut detail) {
        Ok(c) => c,
        Err(raw) => {
            detail.note(format!("unknown S3 storage class {raw:?}"));
            return Ok(CostEstimate::unpriced(detail.finish()));
        }
    };

    let Some(size) = tags.required_quantity(SIZE_TAG)? else {
        detail.note(format!("{SIZE_TAG} tag not provided; storage volume unknown, cost is 0"));
        return Ok(CostEstimate::unpriced(detail.finish()));
    };

    let Some(rate) = lookup.s3_storage(class) else {
        detail.note(format!("no {class} price in {}", lookup.region()));
        return Ok(CostEstimate::unpriced(detail.finish()));
    };

    detail.note(format!("{class} {size}GB at ${}/GB-month (first tier)", rate.usd));
    Ok(CostEstimate::priced(rate.usd, "GB-Mo", size * rate.usd, detail.finish()))
}

pub(super) fn carbon(descriptor: &ResourceDescriptor, ctx: &CarbonContext<'_>) -> Option<CarbonEstimate> {
    let class = storage_class(descriptor, &mut BillingDetail::default()).ok()?;
    let size = Tags::new(&descriptor.tags).required_quantity(SIZE_TAG).ok()??;
    let technology = match class {
        S3StorageClass::Glacier | S3StorageClass::DeepArchive => StorageTechnology::Hdd,
        _ => StorageTechnology::Ssd,
    };
    Some(estimate_storage(&StorageUsage {
        size_gb: size,
        technology,
        service: StorageService::S3,
        region: ctx.region,
        hours: HOURS_PER_MONTH,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Rate;
    use crate::error::PricingError;
    use crate::estimators::test_support::lookup;
    use test_utils::assertions::{assert_approx_eq, assert_contains};

    #[test]
    fn test_size_times_first_tier_rate() {
        let mut mock = lookup();
        mock.expect_s3_storage()
            .withf(|c| *c == S3StorageClass::StandardIa)
            .returning(|_| Some(Rate::usd(0.0125)));

        let d = ResourceDescriptor::new("s3", "STANDARD_IA", "us-east-1").with_tag("size_gb", "1000");
        let est = estimate(&d, &mock).unwrap();
        assert_approx_eq(est.monthly_cost, 12.5, 1e-9, "monthly");
    }

    #[test]
    fn test_missing_size_is_zero_with_reason() {
        let mock = lookup();
        let est = estimate(&ResourceDescriptor::new("s3", "", "us-east-1"), &mock).unwrap();
        assert_eq!(est.monthly_cost, 0.0);
        assert_contains(&est.billing_detail, "size_gb tag not provided", "detail");
        assert_contains(&est.billing_detail, "storage class defaulted to STANDARD", "detail");
    }

    #[test]
    fn test_invalid_size_is_rejected() {
        let mock = lookup();
        for bad in ["", "-5", "ten"] {
            let d = ResourceDescriptor::new("s3", "STANDARD", "us-east-1").with_tag("size_gb", bad);
            let err = estimate(&d, &mock).unwrap_err();
            assert!(matches!(err, PricingError::InvalidInput(_)), "{bad:?}");
        }
    }

    #[test]
    fn test_huge_size_does_not_overflow() {
        let mut mock = lookup();
        mock.expect_s3_storage().returning(|_| Some(Rate::usd(0.023)));
        let d = ResourceDescriptor::new("s3", "STANDARD", "us-east-1").with_tag("size_gb", "1e15");
        let est = estimate(&d, &mock).unwrap();
        assert!(est.monthly_cost.is_finite());
        assert!(est.monthly_cost > 1e13);
    }
}

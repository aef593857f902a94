use domain_carbon::{CarbonEstimate, StorageService, StorageTechnology, StorageUsage, estimate_storage};

use super::{CarbonContext, HOURS_PER_MONTH};
use crate::catalog::keys::{BillingMode, DynamoDbDimension};
use crate::client::PricingLookup;
use crate::error::PricingResult;
use crate::models::{CostEstimate, ResourceDescriptor};
use crate::usage::{BillingDetail, Tags};

const STORAGE_TAGS: &[&str] = &["storage_gb"];

/// A metered dimension: tag, catalog dimension and hours it runs for.
struct Meter {
    tag: &'static str,
    dimension: DynamoDbDimension,
    hours: Option<f64>,
}

const ON_DEMAND: &[Meter] = &[
    Meter {
        tag: "read_request_units",
        dimension: DynamoDbDimension::ReadRequestUnits,
        hours: None,
    },
    Meter {
        tag: "write_request_units",
        dimension: DynamoDbDimension::WriteRequestUnits,
        hours: None,
    },
];

const PROVISIONED: &[Meter] = &[
    Meter {
        tag: "read_capacity_units",
        dimension: DynamoDbDimension::ReadCapacityUnitHours,
        hours: Some(HOURS_PER_MONTH),
    },
    Meter {
        tag: "write_capacity_units",
        dimension: DynamoDbDimension::WriteCapacityUnitHours,
        hours: Some(HOURS_PER_MONTH),
    },
];

pub(super) fn estimate(
    descriptor: &ResourceDescriptor,
    lookup: &dyn PricingLookup,
) -> PricingResult<CostEstimate> {
    let tags = Tags::new(&descriptor.tags);
    let mut detail = BillingDetail::new("DynamoDB table");

    let mode = tags.choice_or(&["billing_mode"], BillingMode::OnDemand, &mut detail);
    let storage_gb = tags.quantity_or(STORAGE_TAGS, 0.0, "GB", &mut detail);

    let Some(storage) = lookup.dynamodb_rate(DynamoDbDimension::Storage) else {
        detail.note(format!("no DynamoDB storage price in {}", lookup.region()));
        return Ok(CostEstimate::unpriced(detail.finish()));
    };
    let mut monthly = storage_gb * storage.usd;
    detail.note(format!("{storage_gb}GB at ${}/GB-month", storage.usd));

    let meters = match mode {
        BillingMode::OnDemand => ON_DEMAND,
        BillingMode::Provisioned => PROVISIONED,
    };
    for meter in meters {
        let units = tags.quantity_or(&[meter.tag], 0.0, "", &mut detail);
        if units == 0.0 {
            continue;
        }
        let Some(rate) = lookup.dynamodb_rate(meter.dimension) else {
            detail.note(format!("no {} price, {} not included", meter.dimension, meter.tag));
            continue;
        };
        let billed = units * meter.hours.unwrap_or(1.0);
        monthly += billed * rate.usd;
        match meter.hours {
            Some(hours) => detail.note(format!(
                "{units} {} x {hours} hrs at ${}/unit-hour",
                meter.tag, rate.usd
            )),
            None => detail.note(format!("{units} {} at ${}/unit", meter.tag, rate.usd)),
        }
    }

    Ok(CostEstimate::priced(storage.usd, "GB-Mo", monthly, detail.finish()))
}

pub(super) fn carbon(descriptor: &ResourceDescriptor, ctx: &CarbonContext<'_>) -> Option<CarbonEstimate> {
    let storage_gb =
        Tags::new(&descriptor.tags).quantity_or(STORAGE_TAGS, 0.0, "GB", &mut BillingDetail::default());
    Some(estimate_storage(&StorageUsage {
        size_gb: storage_gb,
        technology: StorageTechnology::Ssd,
        service: StorageService::DynamoDb,
        region: ctx.region,
        hours: HOURS_PER_MONTH,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Rate;
    use crate::estimators::test_support::lookup;
    use test_utils::assertions::{assert_approx_eq, assert_contains};

    fn rates(dimension: DynamoDbDimension) -> Option<Rate> {
        Some(Rate::usd(match dimension {
            DynamoDbDimension::Storage => 0.25,
            DynamoDbDimension::ReadRequestUnits => 0.000000125,
            DynamoDbDimension::WriteRequestUnits => 0.000000625,
            DynamoDbDimension::ReadCapacityUnitHours => 0.00013,
            DynamoDbDimension::WriteCapacityUnitHours => 0.00065,
        }))
    }

    fn table() -> ResourceDescriptor {
        ResourceDescriptor::new("dynamodb", "", "us-east-1")
    }

    #[test]
    fn test_on_demand_storage_and_requests() {
        let mut mock = lookup();
        mock.expect_dynamodb_rate().returning(rates);

        let d = table()
            .with_tag("storage_gb", "10")
            .with_tag("read_request_units", "8000000")
            .with_tag("write_request_units", "1600000");
        let est = estimate(&d, &mock).unwrap();
        // 10 x 0.25 + 8M x 1.25e-7 + 1.6M x 6.25e-7
        assert_approx_eq(est.monthly_cost, 2.5 + 1.0 + 1.0, 1e-9, "monthly");
        assert_contains(&est.billing_detail, "billing_mode defaulted to on-demand", "detail");
    }

    #[test]
    fn test_provisioned_capacity_runs_all_month() {
        let mut mock = lookup();
        mock.expect_dynamodb_rate().returning(rates);

        let d = table()
            .with_tag("billing_mode", "PROVISIONED")
            .with_tag("storage_gb", "0")
            .with_tag("read_capacity_units", "10")
            .with_tag("write_capacity_units", "5");
        let est = estimate(&d, &mock).unwrap();
        let expected = 10.0 * 730.0 * 0.00013 + 5.0 * 730.0 * 0.00065;
        assert_approx_eq(est.monthly_cost, expected, 1e-9, "monthly");
        assert!(!est.billing_detail.contains("request_units"));
    }

    #[test]
    fn test_missing_units_listed_as_zero() {
        let mut mock = lookup();
        mock.expect_dynamodb_rate().returning(rates);

        let est = estimate(&table(), &mock).unwrap();
        assert!(est.priced);
        assert_eq!(est.monthly_cost, 0.0);
        assert_contains(&est.billing_detail, "storage_gb defaulted to 0GB", "detail");
        assert_contains(&est.billing_detail, "read_request_units defaulted to 0", "detail");
        assert_contains(&est.billing_detail, "write_request_units defaulted to 0", "detail");
    }

    #[test]
    fn test_no_storage_rate_is_unpriced() {
        let mut mock = lookup();
        mock.expect_dynamodb_rate().returning(|_| None);
        let est = estimate(&table().with_tag("storage_gb", "5"), &mock).unwrap();
        assert!(!est.priced);
        assert_contains(&est.billing_detail, "no DynamoDB storage price", "detail");
    }
}

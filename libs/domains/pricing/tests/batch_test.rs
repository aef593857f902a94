//! Batch recommendation tests over the embedded us-east-1 catalog.

#![cfg(all(feature = "region-us-east-1", not(feature = "region-eu-west-1")))]

use domain_pricing::batch::MAX_BATCH_SIZE;
use domain_pricing::*;
use test_utils::TestDataBuilder;
use test_utils::assertions::*;

fn service() -> EstimationService<PricingClient> {
    EstimationService::embedded(EstimationConfig::default())
}

fn targets(builder: &TestDataBuilder, count: usize) -> Vec<ResourceDescriptor> {
    (0..count)
        .map(|i| {
            ResourceDescriptor::new("ec2", "t3.micro", "us-east-1").with_id(&builder.resource_id(&i.to_string()))
        })
        .collect()
}

#[test]
fn test_batch_bound() {
    let builder = TestDataBuilder::from_test_name("batch_bound");
    let svc = service();

    let at_limit = BatchRequest {
        targets: targets(&builder, MAX_BATCH_SIZE),
        filter: ResourceFilter::default(),
    };
    let response = svc.estimate_batch(&at_limit).unwrap();
    assert_eq!(response.summary.scope_size, 100);
    assert_eq!(response.summary.matched, 100);

    let over = BatchRequest {
        targets: targets(&builder, MAX_BATCH_SIZE + 1),
        filter: ResourceFilter::default(),
    };
    let err = svc.estimate_batch(&over).unwrap_err();
    assert!(matches!(err, PricingError::BatchTooLarge { size: 101, max: 100 }));
}

#[test]
fn test_batch_is_idempotent() {
    let builder = TestDataBuilder::from_test_name("batch_idempotent");
    let mut by_arn = ResourceDescriptor::new("ebs", "gp2", "us-east-1").with_tag("size", "500");
    by_arn.arn = builder.arn("ec2", "volume");
    let mut by_name = ResourceDescriptor::new("rds", "db.r5.large", "us-east-1");
    by_name.name = builder.name("db", "primary");

    let request = BatchRequest {
        targets: vec![
            ResourceDescriptor::new("ec2", "m4.large", "us-east-1").with_id(&builder.resource_id("web")),
            by_arn,
            by_name,
            ResourceDescriptor::new("ec2", "t3.micro", "eu-west-1").with_id(&builder.resource_id("eu")),
        ],
        filter: ResourceFilter {
            region: "us-east-1".into(),
            ..Default::default()
        },
    };

    let svc = service();
    let first = svc.estimate_batch(&request).unwrap();
    let second = svc.estimate_batch(&request).unwrap();
    assert_eq!(first, second);
    assert_eq!(first.summary.matched, 3);

    let ids: Vec<_> = first.recommendations.iter().map(|r| r.resource_id.clone()).collect();
    assert!(ids.contains(&builder.resource_id("web")));
    assert!(ids.contains(&builder.arn("ec2", "volume")));
    assert!(ids.contains(&builder.name("db", "primary")));
    assert!(!ids.contains(&builder.resource_id("eu")));
}

#[test]
fn test_missing_impact_does_not_corrupt_savings() {
    let svc = service();
    // t3.micro -> t4g.micro is priced; t4g.nano is not in the catalog.
    let request = BatchRequest {
        targets: vec![
            ResourceDescriptor::new("ec2", "t3.micro", "us-east-1").with_id("priced"),
            ResourceDescriptor::new("ec2", "t3.nano", "us-east-1").with_id("unpriced"),
        ],
        filter: ResourceFilter::default(),
    };

    let response = svc.estimate_batch(&request).unwrap();
    let unpriced = response
        .recommendations
        .iter()
        .find(|r| r.resource_id == "unpriced")
        .map(|r| r.impact);
    assert_eq!(unpriced, Some(None));
    assert_approx_eq(
        response.summary.total_monthly_savings,
        (0.0104 - 0.0084) * 730.0,
        1e-9,
        "aggregate savings",
    );
}

#[test]
fn test_filter_drops_other_providers_silently() {
    let mut azure = ResourceDescriptor::new("ec2", "t3.micro", "us-east-1").with_id("vm");
    azure.provider = "azure".into();
    let request = BatchRequest {
        targets: vec![azure],
        filter: ResourceFilter::default(),
    };

    let response = service().estimate_batch(&request).unwrap();
    assert!(response.recommendations.is_empty());
    assert_eq!(response.summary.matched, 0);
    assert_eq!(response.summary.skipped, 0);
}

#[test]
fn test_legacy_filter_scope() {
    let request = BatchRequest {
        targets: Vec::new(),
        filter: ResourceFilter {
            provider: "aws".into(),
            region: "us-east-1".into(),
            resource_type: "ec2".into(),
            sku: "m4.large".into(),
        },
    };
    let response = service().estimate_batch(&request).unwrap();
    assert_eq!(response.summary.scope_size, 1);
    assert!(!response.recommendations.is_empty());
}

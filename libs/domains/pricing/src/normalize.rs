//! Resource type strings to canonical services.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString, IntoStaticStr};

/// Priced services.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
    IntoStaticStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ServiceKind {
    Ec2,
    Ebs,
    S3,
    Lambda,
    Rds,
    DynamoDb,
    Eks,
    Elb,
    #[serde(rename = "natgw")]
    #[strum(serialize = "natgw")]
    NatGateway,
    ElastiCache,
}

impl ServiceKind {
    pub fn as_str(self) -> &'static str {
        self.into()
    }
}

/// Outcome of normalizing a resource type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceClass {
    Priced(ServiceKind),
    /// Recognized, never billed directly
    ZeroCost(&'static str),
    Unsupported,
}

static SHORT_CODES: &[(&str, ServiceKind)] = &[
    ("ec2", ServiceKind::Ec2),
    ("ebs", ServiceKind::Ebs),
    ("s3", ServiceKind::S3),
    ("lambda", ServiceKind::Lambda),
    ("rds", ServiceKind::Rds),
    ("dynamodb", ServiceKind::DynamoDb),
    ("eks", ServiceKind::Eks),
    ("elb", ServiceKind::Elb),
    ("alb", ServiceKind::Elb),
    ("nlb", ServiceKind::Elb),
    ("natgw", ServiceKind::NatGateway),
    ("nat_gateway", ServiceKind::NatGateway),
    ("elasticache", ServiceKind::ElastiCache),
];

static TYPE_PREFIXES: &[(&str, ServiceKind)] = &[
    ("aws:ec2/instance:", ServiceKind::Ec2),
    ("aws:ebs/volume:", ServiceKind::Ebs),
    ("aws:s3/bucket:", ServiceKind::S3),
    ("aws:s3/bucketv2:", ServiceKind::S3),
    ("aws:lambda/function:", ServiceKind::Lambda),
    ("aws:rds/instance:", ServiceKind::Rds),
    ("aws:dynamodb/table:", ServiceKind::DynamoDb),
    ("aws:eks/cluster:", ServiceKind::Eks),
    ("aws:lb/loadbalancer:", ServiceKind::Elb),
    ("aws:alb/loadbalancer:", ServiceKind::Elb),
    ("aws:elb/loadbalancer:", ServiceKind::Elb),
    ("aws:ec2/natgateway:", ServiceKind::NatGateway),
    ("aws:elasticache/cluster:", ServiceKind::ElastiCache),
    ("aws:elasticache/replicationgroup:", ServiceKind::ElastiCache),
];

static ZERO_COST_SHORT_CODES: &[(&str, &str)] = &[
    ("iam", "IAM"),
    ("vpc", "VPC"),
    ("subnet", "Subnet"),
    ("security_group", "Security group"),
    ("route_table", "Route table"),
    ("internet_gateway", "Internet gateway"),
];

// Trailing ':' keeps e.g. `aws:ec2/vpcendpoint:` (billed) out of the VPC entry.
static ZERO_COST_PREFIXES: &[(&str, &str)] = &[
    ("aws:iam/", "IAM"),
    ("aws:ec2/vpc:", "VPC"),
    ("aws:ec2/subnet:", "Subnet"),
    ("aws:ec2/securitygroup:", "Security group"),
    ("aws:ec2/routetable:", "Route table"),
    ("aws:ec2/internetgateway:", "Internet gateway"),
];

/// Classify a resource type: exact short code, then namespaced prefix, then
/// the zero-cost categories. Matching ignores case and surrounding space.
pub fn classify(resource_type: &str) -> ResourceClass {
    let normalized = resource_type.trim().to_ascii_lowercase();
    let normalized = normalized.as_str();

    if let Some((_, kind)) = SHORT_CODES.iter().find(|(code, _)| *code == normalized) {
        return ResourceClass::Priced(*kind);
    }
    if let Some((_, kind)) = TYPE_PREFIXES.iter().find(|(p, _)| normalized.starts_with(p)) {
        return ResourceClass::Priced(*kind);
    }
    if let Some((_, category)) = ZERO_COST_SHORT_CODES
        .iter()
        .find(|(code, _)| *code == normalized)
        .or_else(|| ZERO_COST_PREFIXES.iter().find(|(p, _)| normalized.starts_with(p)))
    {
        return ResourceClass::ZeroCost(*category);
    }
    ResourceClass::Unsupported
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn test_short_codes() {
        assert_eq!(classify("ec2"), ResourceClass::Priced(ServiceKind::Ec2));
        assert_eq!(classify(" RDS "), ResourceClass::Priced(ServiceKind::Rds));
        assert_eq!(classify("nlb"), ResourceClass::Priced(ServiceKind::Elb));
    }

    #[test]
    fn test_namespaced_prefixes_ignore_case() {
        assert_eq!(classify("aws:ec2/instance:Instance"), ResourceClass::Priced(ServiceKind::Ec2));
        assert_eq!(classify("AWS:LB/LoadBalancer:LoadBalancer"), ResourceClass::Priced(ServiceKind::Elb));
        assert_eq!(
            classify("aws:ec2/natGateway:NatGateway"),
            ResourceClass::Priced(ServiceKind::NatGateway)
        );
    }

    #[test]
    fn test_zero_cost_categories() {
        assert_eq!(classify("aws:iam/role:Role"), ResourceClass::ZeroCost("IAM"));
        assert_eq!(classify("aws:ec2/vpc:Vpc"), ResourceClass::ZeroCost("VPC"));
        assert_eq!(classify("aws:ec2/securityGroup:SecurityGroup"), ResourceClass::ZeroCost("Security group"));
        assert_eq!(classify("subnet"), ResourceClass::ZeroCost("Subnet"));
    }

    #[test]
    fn test_unknown_is_unsupported_not_free() {
        assert_eq!(classify("aws:ec2/vpcEndpoint:VpcEndpoint"), ResourceClass::Unsupported);
        assert_eq!(classify("aws:sqs/queue:Queue"), ResourceClass::Unsupported);
        assert_eq!(classify(""), ResourceClass::Unsupported);
        assert_eq!(classify("ec2x"), ResourceClass::Unsupported);
    }

    #[test]
    fn test_every_service_has_a_short_code() {
        for kind in ServiceKind::iter() {
            assert_eq!(classify(kind.as_str()), ResourceClass::Priced(kind), "{kind}");
        }
    }

    #[test]
    fn test_service_names() {
        assert_eq!(ServiceKind::NatGateway.to_string(), "natgw");
        assert_eq!(ServiceKind::DynamoDb.as_str(), "dynamodb");
        assert_eq!(serde_json::to_string(&ServiceKind::ElastiCache).unwrap(), "\"elasticache\"");
        assert_eq!(serde_json::to_string(&ServiceKind::NatGateway).unwrap(), "\"natgw\"");
    }
}

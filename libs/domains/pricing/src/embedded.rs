//! Price documents compiled into the binary for one region.

use crate::catalog::DocumentSet;

#[cfg(not(any(feature = "region-us-east-1", feature = "region-eu-west-1")))]
compile_error!("enable one of the `region-us-east-1` or `region-eu-west-1` features");

#[cfg(feature = "region-eu-west-1")]
mod region {
    pub const NAME: &str = "eu-west-1";
    pub static EC2: &[u8] = include_bytes!("../data/eu-west-1/ec2.json");
    pub static EBS: &[u8] = include_bytes!("../data/eu-west-1/ebs.json");
    pub static S3: &[u8] = include_bytes!("../data/eu-west-1/s3.json");
    pub static LAMBDA: &[u8] = include_bytes!("../data/eu-west-1/lambda.json");
    pub static RDS: &[u8] = include_bytes!("../data/eu-west-1/rds.json");
    pub static DYNAMODB: &[u8] = include_bytes!("../data/eu-west-1/dynamodb.json");
    pub static EKS: &[u8] = include_bytes!("../data/eu-west-1/eks.json");
    pub static ELB: &[u8] = include_bytes!("../data/eu-west-1/elb.json");
    pub static NATGW: &[u8] = include_bytes!("../data/eu-west-1/natgw.json");
    pub static ELASTICACHE: &[u8] = include_bytes!("../data/eu-west-1/elasticache.json");
}

#[cfg(all(feature = "region-us-east-1", not(feature = "region-eu-west-1")))]
mod region {
    pub const NAME: &str = "us-east-1";
    pub static EC2: &[u8] = include_bytes!("../data/us-east-1/ec2.json");
    pub static EBS: &[u8] = include_bytes!("../data/us-east-1/ebs.json");
    pub static S3: &[u8] = include_bytes!("../data/us-east-1/s3.json");
    pub static LAMBDA: &[u8] = include_bytes!("../data/us-east-1/lambda.json");
    pub static RDS: &[u8] = include_bytes!("../data/us-east-1/rds.json");
    pub static DYNAMODB: &[u8] = include_bytes!("../data/us-east-1/dynamodb.json");
    pub static EKS: &[u8] = include_bytes!("../data/us-east-1/eks.json");
    pub static ELB: &[u8] = include_bytes!("../data/us-east-1/elb.json");
    pub static NATGW: &[u8] = include_bytes!("../data/us-east-1/natgw.json");
    pub static ELASTICACHE: &[u8] = include_bytes!("../data/us-east-1/elasticache.json");
}

/// Region whose price documents are compiled in.
pub const COMPILED_REGION: &str = region::NAME;

pub fn documents() -> DocumentSet<'static> {
    DocumentSet {
        region: region::NAME,
        ec2: region::EC2,
        ebs: region::EBS,
        s3: region::S3,
        lambda: region::LAMBDA,
        rds: region::RDS,
        dynamodb: region::DYNAMODB,
        eks: region::EKS,
        elb: region::ELB,
        natgw: region::NATGW,
        elasticache: region::ELASTICACHE,
    }
}

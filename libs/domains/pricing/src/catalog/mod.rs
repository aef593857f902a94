//! Per-service price indices built from embedded price-list documents.
//!
//! Every index is built once and never mutated afterwards. Duplicate keys keep
//! the lowest rate, so the result does not depend on document map order.

mod document;
mod dynamodb;
mod ebs;
mod ec2;
mod eks;
mod elasticache;
mod elb;
pub mod keys;
mod lambda;
mod natgw;
mod rds;
mod s3;

use std::collections::HashMap;
use std::hash::Hash;
use std::time::Instant;

use observability::CatalogMetrics;
use serde::Serialize;

pub use document::{PricedProduct, RawPricingDocument};
pub use dynamodb::DynamoDbIndex;
pub use ebs::EbsIndex;
pub use ec2::Ec2Index;
pub use eks::EksIndex;
pub use elasticache::ElastiCacheIndex;
pub use elb::ElbIndex;
pub use lambda::LambdaIndex;
pub use natgw::NatGatewayIndex;
pub use rds::RdsIndex;
pub use s3::S3Index;

use crate::error::CatalogError;

/// A priced dimension. `vcpu` and `memory_gib` are set for instance rates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Rate {
    pub usd: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vcpu: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub memory_gib: Option<f64>,
}

impl Rate {
    pub fn usd(usd: f64) -> Self {
        Self {
            usd,
            vcpu: None,
            memory_gib: None,
        }
    }
}

/// Insert `rate` unless a cheaper one is already stored under `key`.
pub(crate) fn insert_min<K: Eq + Hash>(map: &mut HashMap<K, Rate>, key: K, rate: Rate) {
    map.entry(key)
        .and_modify(|existing| {
            if rate.usd < existing.usd {
                *existing = rate;
            }
        })
        .or_insert(rate);
}

/// Raw document bytes for one region, one per service.
#[derive(Debug, Clone, Copy)]
pub struct DocumentSet<'a> {
    pub region: &'a str,
    pub ec2: &'a [u8],
    pub ebs: &'a [u8],
    pub s3: &'a [u8],
    pub lambda: &'a [u8],
    pub rds: &'a [u8],
    pub dynamodb: &'a [u8],
    pub eks: &'a [u8],
    pub elb: &'a [u8],
    pub natgw: &'a [u8],
    pub elasticache: &'a [u8],
}

/// All service indices for one region.
#[derive(Debug)]
pub struct Catalog {
    region: String,
    products: usize,
    pub ec2: Ec2Index,
    pub ebs: EbsIndex,
    pub s3: S3Index,
    pub lambda: LambdaIndex,
    pub rds: RdsIndex,
    pub dynamodb: DynamoDbIndex,
    pub eks: EksIndex,
    pub elb: ElbIndex,
    pub natgw: NatGatewayIndex,
    pub elasticache: ElastiCacheIndex,
}

/// Number of service documents in a catalog.
pub const SERVICE_COUNT: usize = 10;

impl Catalog {
    /// Parse and index every document. The first failing document aborts the
    /// build.
    pub fn build(docs: &DocumentSet<'_>) -> Result<Self, CatalogError> {
        let started = Instant::now();
        let result = Self::build_indices(docs);
        let elapsed = started.elapsed();

        match &result {
            Ok(catalog) => {
                tracing::info!(
                    region = %catalog.region,
                    services = SERVICE_COUNT,
                    products = catalog.products,
                    elapsed_ms = elapsed.as_millis() as u64,
                    "Pricing catalog built"
                );
                CatalogMetrics::record_build_succeeded(
                    &catalog.region,
                    SERVICE_COUNT,
                    catalog.products,
                    elapsed.as_secs_f64(),
                );
            }
            Err(e) => {
                tracing::error!(region = %docs.region, error = %e, "Pricing catalog build failed");
                CatalogMetrics::record_build_failed(docs.region, &e.to_string());
            }
        }
        result
    }

    fn build_indices(docs: &DocumentSet<'_>) -> Result<Self, CatalogError> {
        let region = docs.region;
        let mut products = 0;
        let mut parse = |service: &str, bytes: &[u8]| {
            let doc = RawPricingDocument::parse(service, region, bytes)?;
            products += doc.products.len();
            Ok::<_, CatalogError>(doc)
        };

        let ec2 = Ec2Index::build(&parse("ec2", docs.ec2)?);
        let ebs = EbsIndex::build(&parse("ebs", docs.ebs)?);
        let s3 = S3Index::build(&parse("s3", docs.s3)?);
        let lambda = LambdaIndex::build(&parse("lambda", docs.lambda)?);
        let rds = RdsIndex::build(&parse("rds", docs.rds)?);
        let dynamodb = DynamoDbIndex::build(&parse("dynamodb", docs.dynamodb)?);
        let eks = EksIndex::build(&parse("eks", docs.eks)?);
        let elb = ElbIndex::build(&parse("elb", docs.elb)?);
        let natgw = NatGatewayIndex::build(&parse("natgw", docs.natgw)?);
        let elasticache = ElastiCacheIndex::build(&parse("elasticache", docs.elasticache)?);

        let catalog = Self {
            region: region.to_string(),
            products,
            ec2,
            ebs,
            s3,
            lambda,
            rds,
            dynamodb,
            eks,
            elb,
            natgw,
            elasticache,
        };
        catalog.publish_sizes();
        Ok(catalog)
    }

    fn publish_sizes(&self) {
        for (service, count) in [
            ("ec2", self.ec2.len()),
            ("ebs", self.ebs.len()),
            ("s3", self.s3.len()),
            ("lambda", self.lambda.len()),
            ("rds", self.rds.len()),
            ("dynamodb", self.dynamodb.len()),
            ("eks", self.eks.len()),
            ("elb", self.elb.len()),
            ("natgw", self.natgw.len()),
            ("elasticache", self.elasticache.len()),
        ] {
            CatalogMetrics::set_indexed_products(service, count);
        }
    }

    pub fn region(&self) -> &str {
        &self.region
    }

    /// Priced products read across all documents.
    pub fn product_count(&self) -> usize {
        self.products
    }
}

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use once_cell::sync::{Lazy, OnceCell};

use crate::catalog::keys::{
    Architecture, CacheKey, DynamoDbDimension, Ec2Key, EksSupportTier, ElbDimension,
    LoadBalancerKind, NatGatewayDimension, RdsInstanceKey, RdsStorageKey, S3StorageClass,
    VolumeType,
};
use crate::catalog::{Catalog, DocumentSet, Rate};
use crate::embedded;
use crate::error::CatalogError;

/// Typed price lookups, one per service dimension.
///
/// `None` means the catalog has no rate for the key; callers decide the
/// fallback. No method blocks or performs I/O.
#[cfg_attr(test, mockall::automock)]
pub trait PricingLookup: Send + Sync {
    /// Region the catalog was built for
    fn region(&self) -> String;

    /// Build the catalog if needed and report a cached build failure.
    fn ensure_ready(&self) -> Result<(), CatalogError>;

    fn ec2_hourly(&self, key: &Ec2Key) -> Option<Rate>;

    fn ebs_storage(&self, volume: VolumeType) -> Option<Rate>;

    fn ebs_iops(&self, volume: VolumeType) -> Option<Rate>;

    fn ebs_throughput(&self, volume: VolumeType) -> Option<Rate>;

    fn s3_storage(&self, class: S3StorageClass) -> Option<Rate>;

    fn lambda_requests(&self, arch: Architecture) -> Option<Rate>;

    fn lambda_duration(&self, arch: Architecture) -> Option<Rate>;

    fn rds_instance_hourly(&self, key: &RdsInstanceKey) -> Option<Rate>;

    fn rds_storage(&self, key: &RdsStorageKey) -> Option<Rate>;

    fn dynamodb_rate(&self, dimension: DynamoDbDimension) -> Option<Rate>;

    fn eks_cluster_hourly(&self, tier: EksSupportTier) -> Option<Rate>;

    fn elb_rate(&self, kind: LoadBalancerKind, dimension: ElbDimension) -> Option<Rate>;

    fn nat_gateway_rate(&self, dimension: NatGatewayDimension) -> Option<Rate>;

    fn elasticache_node_hourly(&self, key: &CacheKey) -> Option<Rate>;
}

static EMBEDDED_CLIENT: Lazy<Arc<PricingClient>> =
    Lazy::new(|| Arc::new(PricingClient::new(embedded::documents())));

/// Catalog-backed lookups. The catalog is built on first use, at most once,
/// and a failed build is cached rather than retried.
pub struct PricingClient {
    documents: DocumentSet<'static>,
    catalog: OnceCell<Result<Catalog, CatalogError>>,
    build_attempts: AtomicUsize,
}

impl PricingClient {
    pub fn new(documents: DocumentSet<'static>) -> Self {
        Self {
            documents,
            catalog: OnceCell::new(),
            build_attempts: AtomicUsize::new(0),
        }
    }

    /// Process-wide client over the compiled-in region.
    pub fn embedded() -> Arc<PricingClient> {
        Arc::clone(&EMBEDDED_CLIENT)
    }

    pub fn catalog(&self) -> Result<&Catalog, CatalogError> {
        self.catalog
            .get_or_init(|| {
                self.build_attempts.fetch_add(1, Ordering::SeqCst);
                Catalog::build(&self.documents)
            })
            .as_ref()
            .map_err(Clone::clone)
    }

    /// Times the build closure has run; never above one.
    pub fn build_attempts(&self) -> usize {
        self.build_attempts.load(Ordering::SeqCst)
    }

    fn with<T>(&self, f: impl FnOnce(&Catalog) -> Option<T>) -> Option<T> {
        self.catalog().ok().and_then(f)
    }
}

impl PricingLookup for PricingClient {
    fn region(&self) -> String {
        self.documents.region.to_string()
    }

    fn ensure_ready(&self) -> Result<(), CatalogError> {
        self.catalog().map(|_| ())
    }

    fn ec2_hourly(&self, key: &Ec2Key) -> Option<Rate> {
        self.with(|c| c.ec2.hourly(key))
    }

    fn ebs_storage(&self, volume: VolumeType) -> Option<Rate> {
        self.with(|c| c.ebs.storage(volume))
    }

    fn ebs_iops(&self, volume: VolumeType) -> Option<Rate> {
        self.with(|c| c.ebs.iops(volume))
    }

    fn ebs_throughput(&self, volume: VolumeType) -> Option<Rate> {
        self.with(|c| c.ebs.throughput(volume))
    }

    fn s3_storage(&self, class: S3StorageClass) -> Option<Rate> {
        self.with(|c| c.s3.storage(class))
    }

    fn lambda_requests(&self, arch: Architecture) -> Option<Rate> {
        self.with(|c| c.lambda.requests(arch))
    }

    fn lambda_duration(&self, arch: Architecture) -> Option<Rate> {
        self.with(|c| c.lambda.duration(arch))
    }

    fn rds_instance_hourly(&self, key: &RdsInstanceKey) -> Option<Rate> {
        self.with(|c| c.rds.instance_hourly(key))
    }

    fn rds_storage(&self, key: &RdsStorageKey) -> Option<Rate> {
        self.with(|c| c.rds.storage(key))
    }

    fn dynamodb_rate(&self, dimension: DynamoDbDimension) -> Option<Rate> {
        self.with(|c| c.dynamodb.rate(dimension))
    }

    fn eks_cluster_hourly(&self, tier: EksSupportTier) -> Option<Rate> {
        self.with(|c| c.eks.cluster_hourly(tier))
    }

    fn elb_rate(&self, kind: LoadBalancerKind, dimension: ElbDimension) -> Option<Rate> {
        self.with(|c| c.elb.rate(kind, dimension))
    }

    fn nat_gateway_rate(&self, dimension: NatGatewayDimension) -> Option<Rate> {
        self.with(|c| c.natgw.rate(dimension))
    }

    fn elasticache_node_hourly(&self, key: &CacheKey) -> Option<Rate> {
        self.with(|c| c.elasticache.node_hourly(key))
    }
}

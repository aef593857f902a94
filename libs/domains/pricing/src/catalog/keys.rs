//! Canonical lookup keys. Each parses from both catalog attribute values and
//! user tag values, case-insensitively.

use domain_carbon::StorageTechnology;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

/// Lower-cased, trimmed instance or node class.
pub fn canonical_class(class: &str) -> String {
    class.trim().to_ascii_lowercase()
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, Display, EnumString,
)]
#[strum(ascii_case_insensitive)]
pub enum OperatingSystem {
    #[default]
    #[strum(to_string = "Linux", serialize = "linux/unix", serialize = "amazon linux")]
    Linux,
    #[strum(to_string = "Windows")]
    Windows,
    #[strum(to_string = "RHEL", serialize = "red hat enterprise linux", serialize = "redhat")]
    Rhel,
    #[strum(to_string = "SUSE", serialize = "suse linux", serialize = "sles")]
    Suse,
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, Display, EnumString,
)]
#[strum(ascii_case_insensitive)]
pub enum Tenancy {
    #[default]
    #[strum(to_string = "Shared", serialize = "default")]
    Shared,
    #[strum(to_string = "Dedicated")]
    Dedicated,
    #[strum(to_string = "Host")]
    Host,
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, Display, EnumString,
)]
#[strum(ascii_case_insensitive)]
pub enum Architecture {
    #[default]
    #[strum(to_string = "x86_64", serialize = "x86", serialize = "x86-64", serialize = "amd64")]
    X86_64,
    #[strum(to_string = "arm64", serialize = "arm", serialize = "aarch64", serialize = "graviton")]
    Arm64,
}

impl Architecture {
    /// Graviton families carry a `g` after the generation digit
    /// (`t4g`, `m6gd`, `c7gn`). `db.` and `cache.` prefixes are ignored.
    pub fn infer_from_class(class: &str) -> Self {
        let class = canonical_class(class);
        let class = class
            .strip_prefix("db.")
            .or_else(|| class.strip_prefix("cache."))
            .unwrap_or(&class);
        let family = class.split('.').next().unwrap_or_default();
        let suffix = family
            .trim_start_matches(|c: char| c.is_ascii_alphabetic())
            .trim_start_matches(|c: char| c.is_ascii_digit());
        if suffix.contains('g') {
            Self::Arm64
        } else {
            Self::X86_64
        }
    }
}

/// EBS volume type (API name).
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
#[serde(rename_all = "lowercase")]
pub enum VolumeType {
    #[default]
    Gp2,
    Gp3,
    Io1,
    Io2,
    St1,
    Sc1,
    Standard,
}

impl VolumeType {
    pub fn technology(self) -> StorageTechnology {
        match self {
            Self::St1 | Self::Sc1 | Self::Standard => StorageTechnology::Hdd,
            _ => StorageTechnology::Ssd,
        }
    }

    /// Included IOPS and MiBps before provisioned extras are billed.
    pub fn baseline(self) -> Option<(f64, f64)> {
        match self {
            Self::Gp3 => Some((3000.0, 125.0)),
            _ => None,
        }
    }

    pub fn bills_iops(self) -> bool {
        matches!(self, Self::Gp3 | Self::Io1 | Self::Io2)
    }
}

/// S3 storage class (API name).
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, Display, EnumString,
)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE", ascii_case_insensitive)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum S3StorageClass {
    #[default]
    Standard,
    IntelligentTiering,
    StandardIa,
    #[strum(to_string = "ONEZONE_IA", serialize = "ONE_ZONE_IA")]
    OnezoneIa,
    #[strum(to_string = "GLACIER_IR", serialize = "GLACIER_INSTANT_RETRIEVAL")]
    GlacierIr,
    #[strum(to_string = "GLACIER", serialize = "GLACIER_FLEXIBLE_RETRIEVAL")]
    Glacier,
    DeepArchive,
}

impl S3StorageClass {
    /// Map the price list `volumeType` attribute.
    pub fn from_catalog(volume_type: &str) -> Option<Self> {
        match volume_type.trim().to_ascii_lowercase().as_str() {
            "standard" => Some(Self::Standard),
            "intelligent-tiering frequent access" => Some(Self::IntelligentTiering),
            "standard - infrequent access" => Some(Self::StandardIa),
            "one zone - infrequent access" => Some(Self::OnezoneIa),
            "glacier instant retrieval" => Some(Self::GlacierIr),
            "amazon glacier" => Some(Self::Glacier),
            "glacier deep archive" => Some(Self::DeepArchive),
            _ => None,
        }
    }
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, Display, EnumString,
)]
#[strum(ascii_case_insensitive)]
pub enum DatabaseEngine {
    #[default]
    #[strum(to_string = "MySQL")]
    MySql,
    #[strum(to_string = "PostgreSQL", serialize = "postgres")]
    PostgreSql,
    #[strum(to_string = "MariaDB")]
    MariaDb,
    #[strum(to_string = "Aurora MySQL", serialize = "aurora-mysql", serialize = "aurora")]
    AuroraMySql,
    #[strum(to_string = "Aurora PostgreSQL", serialize = "aurora-postgresql")]
    AuroraPostgreSql,
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, Display, EnumString,
)]
#[strum(ascii_case_insensitive)]
pub enum Deployment {
    #[default]
    #[strum(to_string = "Single-AZ")]
    SingleAz,
    #[strum(to_string = "Multi-AZ")]
    MultiAz,
}

impl Deployment {
    pub fn from_multi_az(multi_az: bool) -> Self {
        if multi_az { Self::MultiAz } else { Self::SingleAz }
    }

    /// Instances running for this deployment.
    pub fn replicas(self) -> f64 {
        match self {
            Self::SingleAz => 1.0,
            Self::MultiAz => 2.0,
        }
    }
}

/// RDS storage type (API name).
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, Display, EnumString,
)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
#[serde(rename_all = "lowercase")]
pub enum RdsVolumeType {
    #[default]
    Gp2,
    Gp3,
    #[strum(to_string = "io1", serialize = "io2")]
    Io1,
    #[strum(to_string = "standard", serialize = "magnetic")]
    Magnetic,
}

impl RdsVolumeType {
    pub fn from_catalog(volume_type: &str) -> Option<Self> {
        match volume_type.trim().to_ascii_lowercase().as_str() {
            "general purpose" => Some(Self::Gp2),
            "general purpose-gp3" => Some(Self::Gp3),
            "provisioned iops" => Some(Self::Io1),
            "magnetic" => Some(Self::Magnetic),
            _ => None,
        }
    }

    pub fn technology(self) -> StorageTechnology {
        match self {
            Self::Magnetic => StorageTechnology::Hdd,
            _ => StorageTechnology::Ssd,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum DynamoDbDimension {
    Storage,
    ReadRequestUnits,
    WriteRequestUnits,
    ReadCapacityUnitHours,
    WriteCapacityUnitHours,
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, Display, EnumString,
)]
#[strum(ascii_case_insensitive)]
pub enum BillingMode {
    #[default]
    #[strum(
        to_string = "on-demand",
        serialize = "pay_per_request",
        serialize = "on_demand",
        serialize = "ondemand"
    )]
    OnDemand,
    #[strum(to_string = "provisioned")]
    Provisioned,
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, Display, EnumString,
)]
#[strum(ascii_case_insensitive)]
pub enum EksSupportTier {
    #[default]
    #[strum(to_string = "standard")]
    Standard,
    #[strum(to_string = "extended", serialize = "extended_support", serialize = "extended-support")]
    Extended,
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, Display, EnumString,
)]
#[strum(ascii_case_insensitive)]
pub enum LoadBalancerKind {
    #[default]
    #[strum(to_string = "application", serialize = "alb")]
    Application,
    #[strum(to_string = "network", serialize = "nlb")]
    Network,
    #[strum(to_string = "classic", serialize = "clb", serialize = "elb")]
    Classic,
}

impl LoadBalancerKind {
    pub fn from_catalog_family(family: &str) -> Option<Self> {
        match family.trim().to_ascii_lowercase().as_str() {
            "load balancer-application" => Some(Self::Application),
            "load balancer-network" => Some(Self::Network),
            "load balancer" => Some(Self::Classic),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum ElbDimension {
    Hours,
    CapacityUnitHours,
    DataProcessedGb,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum NatGatewayDimension {
    Hours,
    DataProcessedGb,
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, Display, EnumString,
)]
#[strum(ascii_case_insensitive)]
pub enum CacheEngine {
    #[default]
    #[strum(to_string = "Redis")]
    Redis,
    #[strum(to_string = "Memcached")]
    Memcached,
    #[strum(to_string = "Valkey")]
    Valkey,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Ec2Key {
    pub instance_type: String,
    pub os: OperatingSystem,
    pub tenancy: Tenancy,
    pub arch: Architecture,
}

impl Ec2Key {
    pub fn new(instance_type: &str, os: OperatingSystem, tenancy: Tenancy, arch: Architecture) -> Self {
        Self {
            instance_type: canonical_class(instance_type),
            os,
            tenancy,
            arch,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RdsInstanceKey {
    pub class: String,
    pub engine: DatabaseEngine,
    pub deployment: Deployment,
}

impl RdsInstanceKey {
    pub fn new(class: &str, engine: DatabaseEngine, deployment: Deployment) -> Self {
        Self {
            class: canonical_class(class),
            engine,
            deployment,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RdsStorageKey {
    pub volume_type: RdsVolumeType,
    pub deployment: Deployment,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey {
    pub node_type: String,
    pub engine: CacheEngine,
}

impl CacheKey {
    pub fn new(node_type: &str, engine: CacheEngine) -> Self {
        Self {
            node_type: canonical_class(node_type),
            engine,
        }
    }
}

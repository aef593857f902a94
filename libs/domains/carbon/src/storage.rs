//! Block, object and table storage.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use crate::grid::grid_intensity;
use crate::model::CarbonEstimate;
use crate::operational_grams;

/// Storage medium behind a volume or bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString)]
#[strum(serialize_all = "UPPERCASE", ascii_case_insensitive)]
pub enum StorageTechnology {
    Ssd,
    Hdd,
}

impl StorageTechnology {
    /// Watt-hours drawn per terabyte per hour.
    pub fn watt_hours_per_tb(self) -> f64 {
        match self {
            Self::Ssd => 1.2,
            Self::Hdd => 0.65,
        }
    }
}

/// Service owning the bytes, which sets how many copies are kept.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display)]
pub enum StorageService {
    Ebs,
    Rds,
    S3,
    DynamoDb,
}

impl StorageService {
    pub fn replication_factor(self) -> f64 {
        match self {
            Self::Ebs | Self::Rds => 2.0,
            Self::S3 | Self::DynamoDb => 3.0,
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct StorageUsage<'a> {
    pub size_gb: f64,
    pub technology: StorageTechnology,
    pub service: StorageService,
    pub region: &'a str,
    pub hours: f64,
}

/// Estimate storing `size_gb` for `hours`, counting every replica.
///
/// Storage carries no embodied share; a negative size counts as empty.
pub fn estimate_storage(usage: &StorageUsage<'_>) -> CarbonEstimate {
    let grid = grid_intensity(usage.region);
    let terabytes = usage.size_gb.max(0.0) / 1000.0;
    let watts = terabytes * usage.technology.watt_hours_per_tb() * usage.service.replication_factor();
    let (energy_kwh, grams) = operational_grams(watts, usage.hours, grid.grams_per_kwh);
    CarbonEstimate::new(grams, 0.0, energy_kwh, grid)
}

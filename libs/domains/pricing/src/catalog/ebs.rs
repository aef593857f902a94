use std::collections::HashMap;
use std::str::FromStr;

use super::keys::VolumeType;
use super::{Rate, RawPricingDocument, insert_min};

/// Volume storage, provisioned IOPS and provisioned throughput per volume type.
#[derive(Debug, Default)]
pub struct EbsIndex {
    storage: HashMap<VolumeType, Rate>,
    iops: HashMap<VolumeType, Rate>,
    throughput: HashMap<VolumeType, Rate>,
}

impl EbsIndex {
    pub fn build(doc: &RawPricingDocument) -> Self {
        let mut index = Self::default();
        for product in &doc.products {
            let Some(volume) = product
                .attr("volumeApiName")
                .and_then(|v| VolumeType::from_str(v).ok())
            else {
                continue;
            };
            let target = match product.family.to_ascii_lowercase().as_str() {
                "storage" => &mut index.storage,
                "system operation" => &mut index.iops,
                "provisioned throughput" => &mut index.throughput,
                _ => continue,
            };
            insert_min(target, volume, Rate::usd(product.usd));
        }
        index
    }

    /// Per GB-month.
    pub fn storage(&self, volume: VolumeType) -> Option<Rate> {
        self.storage.get(&volume).copied()
    }

    /// Per provisioned IOPS-month.
    pub fn iops(&self, volume: VolumeType) -> Option<Rate> {
        self.iops.get(&volume).copied()
    }

    /// Per provisioned MiBps-month.
    pub fn throughput(&self, volume: VolumeType) -> Option<Rate> {
        self.throughput.get(&volume).copied()
    }

    pub fn len(&self) -> usize {
        self.storage.len() + self.iops.len() + self.throughput.len()
    }
}

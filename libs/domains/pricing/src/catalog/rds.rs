use std::collections::HashMap;
use std::str::FromStr;

use super::keys::{DatabaseEngine, Deployment, RdsInstanceKey, RdsStorageKey, RdsVolumeType};
use super::{Rate, RawPricingDocument, insert_min};

/// Instance hours by class/engine/deployment, storage by volume type/deployment.
#[derive(Debug, Default)]
pub struct RdsIndex {
    instances: HashMap<RdsInstanceKey, Rate>,
    storage: HashMap<RdsStorageKey, Rate>,
}

impl RdsIndex {
    pub fn build(doc: &RawPricingDocument) -> Self {
        let mut index = Self::default();

        for product in doc.family("Database Instance") {
            let (Some(class), Some(engine), Some(deployment)) = (
                product.attr("instanceType"),
                product
                    .attr("databaseEngine")
                    .and_then(|e| DatabaseEngine::from_str(e).ok()),
                deployment(product.attr("deploymentOption")),
            ) else {
                continue;
            };
            insert_min(
                &mut index.instances,
                RdsInstanceKey::new(class, engine, deployment),
                Rate::usd(product.usd),
            );
        }

        for product in doc.family("Database Storage") {
            let (Some(volume_type), Some(deployment)) = (
                product.attr("volumeType").and_then(RdsVolumeType::from_catalog),
                deployment(product.attr("deploymentOption")),
            ) else {
                continue;
            };
            insert_min(
                &mut index.storage,
                RdsStorageKey { volume_type, deployment },
                Rate::usd(product.usd),
            );
        }

        index
    }

    pub fn instance_hourly(&self, key: &RdsInstanceKey) -> Option<Rate> {
        self.instances.get(key).copied()
    }

    /// Per GB-month.
    pub fn storage(&self, key: &RdsStorageKey) -> Option<Rate> {
        self.storage.get(key).copied()
    }

    pub fn len(&self) -> usize {
        self.instances.len() + self.storage.len()
    }
}

/// Missing deployment means Single-AZ; unknown ones (e.g. Multi-AZ cluster)
/// are not indexed.
fn deployment(option: Option<&str>) -> Option<Deployment> {
    match option {
        None => Some(Deployment::SingleAz),
        Some(value) => Deployment::from_str(value).ok(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_utils::PriceDocumentBuilder;

    #[test]
    fn test_instances_and_storage() {
        let bytes = PriceDocumentBuilder::new("AmazonRDS")
            .product(
                "Database Instance",
                &[("instanceType", "db.t3.medium"), ("databaseEngine", "MySQL"), ("deploymentOption", "Single-AZ")],
                "Hrs",
                0.068,
            )
            .product(
                "Database Instance",
                &[("instanceType", "db.t3.medium"), ("databaseEngine", "MySQL"), ("deploymentOption", "Multi-AZ")],
                "Hrs",
                0.136,
            )
            .product(
                "Database Instance",
                &[("instanceType", "db.t3.medium"), ("databaseEngine", "Oracle"), ("deploymentOption", "Single-AZ")],
                "Hrs",
                0.2,
            )
            .product(
                "Database Storage",
                &[("volumeType", "General Purpose"), ("deploymentOption", "Multi-AZ")],
                "GB-Mo",
                0.23,
            )
            .product(
                "Database Storage",
                &[("volumeType", "General Purpose"), ("deploymentOption", "Multi-AZ (readable standbys)")],
                "GB-Mo",
                0.3,
            )
            .build();
        let idx = RdsIndex::build(&RawPricingDocument::parse("rds", "us-east-1", &bytes).unwrap());

        let single = RdsInstanceKey::new("db.t3.medium", DatabaseEngine::MySql, Deployment::SingleAz);
        let multi = RdsInstanceKey::new("DB.T3.MEDIUM", DatabaseEngine::MySql, Deployment::MultiAz);
        assert_eq!(idx.instance_hourly(&single).unwrap().usd, 0.068);
        assert_eq!(idx.instance_hourly(&multi).unwrap().usd, 0.136);

        let storage = RdsStorageKey {
            volume_type: RdsVolumeType::Gp2,
            deployment: Deployment::MultiAz,
        };
        assert_eq!(idx.storage(&storage).unwrap().usd, 0.23);
        assert_eq!(idx.len(), 3);
    }
}

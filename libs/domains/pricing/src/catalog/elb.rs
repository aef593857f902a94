use std::collections::HashMap;

use super::keys::{ElbDimension, LoadBalancerKind};
use super::{Rate, RawPricingDocument, insert_min};

#[derive(Debug, Default)]
pub struct ElbIndex {
    rates: HashMap<(LoadBalancerKind, ElbDimension), Rate>,
}

impl ElbIndex {
    pub fn build(doc: &RawPricingDocument) -> Self {
        let mut rates = HashMap::new();
        for product in &doc.products {
            let Some(kind) = LoadBalancerKind::from_catalog_family(&product.family) else {
                continue;
            };
            let dimension = if product.usage_type_ends_with("LoadBalancerUsage") {
                ElbDimension::Hours
            } else if product.usage_type_ends_with("LCUUsage") {
                ElbDimension::CapacityUnitHours
            } else if product.usage_type_ends_with("DataProcessing-Bytes") {
                ElbDimension::DataProcessedGb
            } else {
                continue;
            };
            insert_min(&mut rates, (kind, dimension), Rate::usd(product.usd));
        }
        Self { rates }
    }

    pub fn rate(&self, kind: LoadBalancerKind, dimension: ElbDimension) -> Option<Rate> {
        self.rates.get(&(kind, dimension)).copied()
    }

    pub fn len(&self) -> usize {
        self.rates.len()
    }
}

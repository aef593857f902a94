use std::collections::HashMap;

use super::keys::NatGatewayDimension;
use super::{Rate, RawPricingDocument, insert_min};

#[derive(Debug, Default)]
pub struct NatGatewayIndex {
    rates: HashMap<NatGatewayDimension, Rate>,
}

impl NatGatewayIndex {
    pub fn build(doc: &RawPricingDocument) -> Self {
        let mut rates = HashMap::new();
        for product in doc.family("NAT Gateway") {
            let dimension = if product.usage_type_ends_with("NatGateway-Hours") {
                NatGatewayDimension::Hours
            } else if product.usage_type_ends_with("NatGateway-Bytes") {
                NatGatewayDimension::DataProcessedGb
            } else {
                continue;
            };
            insert_min(&mut rates, dimension, Rate::usd(product.usd));
        }
        Self { rates }
    }

    pub fn rate(&self, dimension: NatGatewayDimension) -> Option<Rate> {
        self.rates.get(&dimension).copied()
    }

    pub fn len(&self) -> usize {
        self.rates.len()
    }
}

use std::collections::HashMap;

use super::keys::EksSupportTier;
use super::{Rate, RawPricingDocument, insert_min};

/// Control plane hours per support tier. Fargate and node rows are ignored.
#[derive(Debug, Default)]
pub struct EksIndex {
    cluster_hourly: HashMap<EksSupportTier, Rate>,
}

impl EksIndex {
    pub fn build(doc: &RawPricingDocument) -> Self {
        let mut cluster_hourly = HashMap::new();
        for product in &doc.products {
            let tier = if product.usage_type_ends_with("AmazonEKS-Hours:perCluster") {
                EksSupportTier::Standard
            } else if product.usage_type_ends_with("AmazonEKS-Hours:extendedSupport") {
                EksSupportTier::Extended
            } else {
                continue;
            };
            insert_min(&mut cluster_hourly, tier, Rate::usd(product.usd));
        }
        Self { cluster_hourly }
    }

    pub fn cluster_hourly(&self, tier: EksSupportTier) -> Option<Rate> {
        self.cluster_hourly.get(&tier).copied()
    }

    pub fn len(&self) -> usize {
        self.cluster_hourly.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_utils::PriceDocumentBuilder;

    #[test]
    fn test_support_tiers() {
        let bytes = PriceDocumentBuilder::new("AmazonEKS")
            .product("Compute", &[("usagetype", "AmazonEKS-Hours:perCluster")], "Hrs", 0.10)
            .product("Compute", &[("usagetype", "EU-AmazonEKS-Hours:extendedSupport")], "Hrs", 0.60)
            .product("Compute", &[("usagetype", "Fargate-vCPU-Hours:perCPU")], "hours", 0.04048)
            .build();
        let idx = EksIndex::build(&RawPricingDocument::parse("eks", "us-east-1", &bytes).unwrap());

        assert_eq!(idx.cluster_hourly(EksSupportTier::Standard).unwrap().usd, 0.10);
        assert_eq!(idx.cluster_hourly(EksSupportTier::Extended).unwrap().usd, 0.60);
        assert_eq!(idx.len(), 2);
    }
}

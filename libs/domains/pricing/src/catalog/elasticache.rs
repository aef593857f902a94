use std::collections::HashMap;
use std::str::FromStr;

use super::keys::{CacheEngine, CacheKey};
use super::{Rate, RawPricingDocument, insert_min};

/// Node hours keyed by node type and engine.
#[derive(Debug, Default)]
pub struct ElastiCacheIndex {
    nodes: HashMap<CacheKey, Rate>,
}

impl ElastiCacheIndex {
    pub fn build(doc: &RawPricingDocument) -> Self {
        let mut nodes = HashMap::new();
        for product in doc.family("Cache Instance") {
            let (Some(node_type), Some(engine)) = (
                product.attr("instanceType"),
                product
                    .attr("cacheEngine")
                    .and_then(|e| CacheEngine::from_str(e).ok()),
            ) else {
                continue;
            };
            insert_min(&mut nodes, CacheKey::new(node_type, engine), Rate::usd(product.usd));
        }
        Self { nodes }
    }

    pub fn node_hourly(&self, key: &CacheKey) -> Option<Rate> {
        self.nodes.get(key).copied()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_utils::PriceDocumentBuilder;

    #[test]
    fn test_nodes_by_engine() {
        let bytes = PriceDocumentBuilder::new("AmazonElastiCache")
            .product("Cache Instance", &[("instanceType", "cache.r5.large"), ("cacheEngine", "Redis")], "Hrs", 0.216)
            .product("Cache Instance", &[("instanceType", "cache.r5.large"), ("cacheEngine", "Valkey")], "Hrs", 0.1728)
            .product("Cache Instance", &[("instanceType", "cache.r5.large")], "Hrs", 0.5)
            .build();
        let idx = ElastiCacheIndex::build(&RawPricingDocument::parse("elasticache", "us-east-1", &bytes).unwrap());

        assert_eq!(idx.node_hourly(&CacheKey::new("cache.r5.large", CacheEngine::Redis)).unwrap().usd, 0.216);
        assert_eq!(idx.node_hourly(&CacheKey::new("cache.r5.large", CacheEngine::Valkey)).unwrap().usd, 0.1728);
        assert!(idx.node_hourly(&CacheKey::new("cache.r5.large", CacheEngine::Memcached)).is_none());
        assert_eq!(idx.len(), 2);
    }
}

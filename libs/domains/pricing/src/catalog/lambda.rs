use std::collections::HashMap;

use super::keys::Architecture;
use super::{Rate, RawPricingDocument, insert_min};

/// Request and GB-second rates per architecture.
#[derive(Debug, Default)]
pub struct LambdaIndex {
    requests: HashMap<Architecture, Rate>,
    duration: HashMap<Architecture, Rate>,
}

impl LambdaIndex {
    pub fn build(doc: &RawPricingDocument) -> Self {
        let mut index = Self::default();
        for product in doc.family("Serverless") {
            let Some(group) = product.attr("group") else {
                continue;
            };
            let (dimension, arch) = match group.strip_suffix("-ARM") {
                Some(base) => (base, Architecture::Arm64),
                None => (group, Architecture::X86_64),
            };
            let target = match dimension {
                "AWS-Lambda-Requests" => &mut index.requests,
                "AWS-Lambda-Duration" => &mut index.duration,
                _ => continue,
            };
            insert_min(target, arch, Rate::usd(product.usd));
        }
        index
    }

    /// Per request.
    pub fn requests(&self, arch: Architecture) -> Option<Rate> {
        self.requests.get(&arch).copied()
    }

    /// Per GB-second of compute.
    pub fn duration(&self, arch: Architecture) -> Option<Rate> {
        self.duration.get(&arch).copied()
    }

    pub fn len(&self) -> usize {
        self.requests.len() + self.duration.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_utils::PriceDocumentBuilder;

    #[test]
    fn test_groups_by_architecture() {
        let bytes = PriceDocumentBuilder::new("AWSLambda")
            .product("Serverless", &[("group", "AWS-Lambda-Requests")], "Requests", 0.0000002)
            .product("Serverless", &[("group", "AWS-Lambda-Duration")], "Lambda-GB-Second", 0.0000166667)
            .product("Serverless", &[("group", "AWS-Lambda-Duration-ARM")], "Lambda-GB-Second", 0.0000133334)
            .product(
                "Serverless",
                &[("group", "AWS-Lambda-Provisioned-Concurrency")],
                "Lambda-GB-Second",
                0.0000041667,
            )
            .build();
        let idx = LambdaIndex::build(&RawPricingDocument::parse("lambda", "us-east-1", &bytes).unwrap());

        assert_eq!(idx.requests(Architecture::X86_64).unwrap().usd, 0.0000002);
        assert!(idx.requests(Architecture::Arm64).is_none());
        assert_eq!(idx.duration(Architecture::X86_64).unwrap().usd, 0.0000166667);
        assert_eq!(idx.duration(Architecture::Arm64).unwrap().usd, 0.0000133334);
        assert_eq!(idx.len(), 3);
    }
}

use std::collections::HashMap;

use super::keys::S3StorageClass;
use super::{Rate, RawPricingDocument, insert_min};

/// First-tier GB-month storage rate per storage class.
#[derive(Debug, Default)]
pub struct S3Index {
    storage: HashMap<S3StorageClass, Rate>,
}

impl S3Index {
    pub fn build(doc: &RawPricingDocument) -> Self {
        let mut storage = HashMap::new();
        for product in doc.family("Storage") {
            if let Some(class) = product.attr("volumeType").and_then(S3StorageClass::from_catalog) {
                insert_min(&mut storage, class, Rate::usd(product.usd));
            }
        }
        Self { storage }
    }

    pub fn storage(&self, class: S3StorageClass) -> Option<Rate> {
        self.storage.get(&class).copied()
    }

    pub fn len(&self) -> usize {
        self.storage.len()
    }
}

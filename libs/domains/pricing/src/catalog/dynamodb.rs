use std::collections::HashMap;

use super::keys::DynamoDbDimension;
use super::{PricedProduct, Rate, RawPricingDocument, insert_min};

#[derive(Debug, Default)]
pub struct DynamoDbIndex {
    rates: HashMap<DynamoDbDimension, Rate>,
}

impl DynamoDbIndex {
    pub fn build(doc: &RawPricingDocument) -> Self {
        let mut rates = HashMap::new();
        for product in &doc.products {
            if let Some(dimension) = dimension_for(product) {
                insert_min(&mut rates, dimension, Rate::usd(product.usd));
            }
        }
        Self { rates }
    }

    /// Per GB-month for storage, per unit for requests, per unit-hour for capacity.
    pub fn rate(&self, dimension: DynamoDbDimension) -> Option<Rate> {
        self.rates.get(&dimension).copied()
    }

    pub fn len(&self) -> usize {
        self.rates.len()
    }
}

fn dimension_for(product: &PricedProduct) -> Option<DynamoDbDimension> {
    let family = product.family.to_ascii_lowercase();
    let group = product.attr("group").unwrap_or_default();
    match family.as_str() {
        "database storage" => product
            .attr("volumeType")
            .is_some_and(|v| v.contains("DynamoDB"))
            .then_some(DynamoDbDimension::Storage),
        "amazon dynamodb payperrequest throughput" => match group {
            "DDB-ReadUnits" => Some(DynamoDbDimension::ReadRequestUnits),
            "DDB-WriteUnits" => Some(DynamoDbDimension::WriteRequestUnits),
            _ => None,
        },
        "provisioned iops" if product.usage_type_ends_with("ReadCapacityUnit-Hrs") => {
            Some(DynamoDbDimension::ReadCapacityUnitHours)
        }
        "provisioned iops" if product.usage_type_ends_with("WriteCapacityUnit-Hrs") => {
            Some(DynamoDbDimension::WriteCapacityUnitHours)
        }
        _ => None,
    }
}

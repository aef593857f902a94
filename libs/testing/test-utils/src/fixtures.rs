use serde_json::{Map, Value, json};

/// Builds AWS Price List bulk documents (`products` + `terms.OnDemand`) for
/// catalog tests without hand-writing JSON.
pub struct PriceDocumentBuilder {
    offer_code: String,
    products: Map<String, Value>,
    on_demand: Map<String, Value>,
    next_sku: usize,
}

impl PriceDocumentBuilder {
    pub fn new(offer_code: &str) -> Self {
        Self {
            offer_code: offer_code.to_string(),
            products: Map::new(),
            on_demand: Map::new(),
            next_sku: 0,
        }
    }

    /// Add a product with a single on-demand USD rate.
    pub fn product(self, family: &str, attributes: &[(&str, &str)], unit: &str, usd: f64) -> Self {
        self.tiered_product(family, attributes, unit, &[(0.0, usd)])
    }

    /// Add a product with tiered rates given as `(begin_range, usd)` pairs.
    pub fn tiered_product(
        mut self,
        family: &str,
        attributes: &[(&str, &str)],
        unit: &str,
        tiers: &[(f64, f64)],
    ) -> Self {
        self.next_sku += 1;
        let sku = format!("SKU{:06}", self.next_sku);

        let attrs: Map<String, Value> = attributes
            .iter()
            .map(|(k, v)| (k.to_string(), Value::String(v.to_string())))
            .collect();

        self.products.insert(
            sku.clone(),
            json!({ "sku": sku, "productFamily": family, "attributes": attrs }),
        );

        let mut dimensions = Map::new();
        for (i, (begin, usd)) in tiers.iter().enumerate() {
            let rate_code = format!("{sku}.JRTCKXETXF.RATE{i}");
            dimensions.insert(
                rate_code.clone(),
                json!({
                    "rateCode": rate_code,
                    "unit": unit,
                    "beginRange": format!("{begin}"),
                    "endRange": "Inf",
                    "description": format!("{family} test rate"),
                    "pricePerUnit": { "USD": format!("{usd:.10}") }
                }),
            );
        }

        let mut offers = Map::new();
        offers.insert(
            format!("{sku}.JRTCKXETXF"),
            json!({ "offerTermCode": "JRTCKXETXF", "sku": sku, "priceDimensions": dimensions }),
        );
        self.on_demand.insert(sku.clone(), Value::Object(offers));
        self
    }

    /// Add a product that has no on-demand term at all.
    pub fn product_without_terms(mut self, family: &str, attributes: &[(&str, &str)]) -> Self {
        self.next_sku += 1;
        let sku = format!("SKU{:06}", self.next_sku);
        let attrs: Map<String, Value> = attributes
            .iter()
            .map(|(k, v)| (k.to_string(), Value::String(v.to_string())))
            .collect();
        self.products.insert(
            sku.clone(),
            json!({ "sku": sku, "productFamily": family, "attributes": attrs }),
        );
        self
    }

    pub fn to_value(&self) -> Value {
        json!({
            "formatVersion": "v1.0",
            "offerCode": self.offer_code,
            "version": "test",
            "products": self.products,
            "terms": { "OnDemand": self.on_demand }
        })
    }

    /// Serialized document bytes.
    pub fn build(&self) -> Vec<u8> {
        self.to_value().to_string().into_bytes()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_shape() {
        let doc = PriceDocumentBuilder::new("AmazonEC2")
            .product("Compute Instance", &[("instanceType", "t3.micro")], "Hrs", 0.0104)
            .to_value();

        let products = doc["products"].as_object().unwrap();
        assert_eq!(products.len(), 1);
        let sku = products.keys().next().unwrap();
        let term = &doc["terms"]["OnDemand"][sku];
        let offer = term.as_object().unwrap().values().next().unwrap();
        let dim = offer["priceDimensions"].as_object().unwrap().values().next().unwrap();
        assert_eq!(dim["pricePerUnit"]["USD"], "0.0104000000");
        assert_eq!(dim["unit"], "Hrs");
    }
}

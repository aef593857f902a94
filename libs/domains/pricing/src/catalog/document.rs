//! AWS Price List bulk JSON, reduced to products joined with their first
//! on-demand rate.

use std::collections::HashMap;

use serde::Deserialize;

use crate::error::CatalogError;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawDocument {
    #[serde(default)]
    products: HashMap<String, RawProduct>,
    #[serde(default)]
    terms: RawTerms,
}

#[derive(Debug, Default, Deserialize)]
struct RawTerms {
    #[serde(rename = "OnDemand", default)]
    on_demand: HashMap<String, HashMap<String, RawOffer>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawProduct {
    #[serde(default)]
    product_family: String,
    #[serde(default)]
    attributes: HashMap<String, String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawOffer {
    #[serde(default)]
    price_dimensions: HashMap<String, RawDimension>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawDimension {
    #[serde(default)]
    unit: String,
    #[serde(default)]
    begin_range: Option<String>,
    #[serde(default)]
    price_per_unit: HashMap<String, String>,
}

impl RawDimension {
    fn begin(&self) -> f64 {
        self.begin_range
            .as_deref()
            .and_then(|b| b.parse().ok())
            .unwrap_or(0.0)
    }

    fn usd(&self) -> Option<f64> {
        self.price_per_unit
            .get("USD")
            .and_then(|p| p.trim().parse::<f64>().ok())
            .filter(|p| p.is_finite() && *p >= 0.0)
    }
}

/// One product with its lowest-tier on-demand USD rate.
#[derive(Debug, Clone)]
pub struct PricedProduct {
    pub family: String,
    pub attributes: HashMap<String, String>,
    pub unit: String,
    pub usd: f64,
}

impl PricedProduct {
    pub fn attr(&self, key: &str) -> Option<&str> {
        self.attributes
            .get(key)
            .map(|v| v.trim())
            .filter(|v| !v.is_empty())
    }

    /// Attribute equals `expected`, or is absent.
    pub fn attr_is_or_missing(&self, key: &str, expected: &str) -> bool {
        self.attr(key).is_none_or(|v| v.eq_ignore_ascii_case(expected))
    }

    pub fn usage_type_ends_with(&self, suffix: &str) -> bool {
        self.attr("usagetype")
            .is_some_and(|u| u.to_ascii_lowercase().ends_with(&suffix.to_ascii_lowercase()))
    }
}

/// Products of one service document, ready for indexing.
#[derive(Debug)]
pub struct RawPricingDocument {
    pub products: Vec<PricedProduct>,
    pub unpriced: usize,
}

impl RawPricingDocument {
    /// Parse a bulk document. Products with no usable USD on-demand rate are
    /// counted in `unpriced` and dropped. A document left with no priced
    /// product is `Empty`.
    pub fn parse(service: &str, region: &str, bytes: &[u8]) -> Result<Self, CatalogError> {
        let raw: RawDocument =
            serde_json::from_slice(bytes).map_err(|e| CatalogError::Corrupt {
                service: service.to_string(),
                region: region.to_string(),
                details: e.to_string(),
            })?;

        let empty = || CatalogError::Empty {
            service: service.to_string(),
            region: region.to_string(),
        };
        if raw.products.is_empty() {
            return Err(empty());
        }

        let RawDocument { products, terms } = raw;
        let mut on_demand = terms.on_demand;
        let mut priced = Vec::with_capacity(products.len());
        let mut unpriced = 0;

        for (sku, product) in products {
            let first_tier = on_demand
                .remove(&sku)
                .into_iter()
                .flat_map(|offers| offers.into_values())
                .flat_map(|offer| offer.price_dimensions.into_values())
                .filter_map(|dim| {
                    let usd = dim.usd()?;
                    Some((dim.begin(), usd, dim.unit))
                })
                .min_by(|a, b| a.0.total_cmp(&b.0).then(a.1.total_cmp(&b.1)));

            match first_tier {
                Some((_, usd, unit)) => priced.push(PricedProduct {
                    family: product.product_family,
                    attributes: product.attributes,
                    unit,
                    usd,
                }),
                None => unpriced += 1,
            }
        }

        if unpriced > 0 {
            tracing::debug!(service, region, unpriced, "Skipped products without an on-demand USD rate");
        }
        if priced.is_empty() {
            return Err(empty());
        }

        Ok(Self {
            products: priced,
            unpriced,
        })
    }

    pub fn family<'a>(&'a self, family: &'a str) -> impl Iterator<Item = &'a PricedProduct> + 'a {
        self.products
            .iter()
            .filter(move |p| p.family.eq_ignore_ascii_case(family))
    }
}

use std::collections::HashMap;

use domain_carbon::CarbonEstimate;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};
use validator::Validate;

use crate::normalize::ServiceKind;

/// Provider handled by this engine.
pub const SUPPORTED_PROVIDER: &str = "aws";

/// Currency enumeration
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "UPPERCASE")]
#[strum(serialize_all = "UPPERCASE")]
pub enum Currency {
    #[default]
    Usd,
}

/// A resource as described by the caller. Never mutated by the engine.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct ResourceDescriptor {
    /// Caller's identifier, first choice for correlation
    pub id: String,
    /// Provider-native locator (ARN), second choice for correlation
    pub arn: String,
    /// Human-readable name, last choice for correlation
    pub name: String,
    pub provider: String,
    #[validate(length(min = 1, message = "resource_type is required"))]
    pub resource_type: String,
    /// Instance class, volume type, storage class, etc.
    pub sku: String,
    pub region: String,
    pub tags: HashMap<String, String>,
}

impl ResourceDescriptor {
    pub fn new(resource_type: &str, sku: &str, region: &str) -> Self {
        Self {
            provider: SUPPORTED_PROVIDER.to_string(),
            resource_type: resource_type.to_string(),
            sku: sku.to_string(),
            region: region.to_string(),
            ..Default::default()
        }
    }

    pub fn with_tag(mut self, key: &str, value: &str) -> Self {
        self.tags.insert(key.to_string(), value.to_string());
        self
    }

    pub fn with_id(mut self, id: &str) -> Self {
        self.id = id.to_string();
        self
    }

    /// First non-empty of id, ARN, name.
    pub fn correlation_id(&self) -> Option<&str> {
        [&self.id, &self.arn, &self.name]
            .into_iter()
            .map(|s| s.trim())
            .find(|s| !s.is_empty())
    }
}

/// Monthly cost of one resource with a human-readable account of how it was
/// computed, including every default applied.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CostEstimate {
    pub unit_price: f64,
    pub unit: String,
    pub currency: Currency,
    pub monthly_cost: f64,
    pub billing_detail: String,
    /// False when a required rate was missing and the cost degraded to zero
    pub priced: bool,
}

impl CostEstimate {
    pub fn priced(unit_price: f64, unit: &str, monthly_cost: f64, billing_detail: String) -> Self {
        Self {
            unit_price,
            unit: unit.to_string(),
            currency: Currency::Usd,
            monthly_cost,
            billing_detail,
            priced: true,
        }
    }

    /// Zero estimate explaining why no price applies.
    pub fn unpriced(billing_detail: String) -> Self {
        Self {
            unit_price: 0.0,
            unit: String::new(),
            currency: Currency::Usd,
            monthly_cost: 0.0,
            billing_detail,
            priced: false,
        }
    }

    /// Zero estimate for a resource known to carry no charge.
    pub fn free(billing_detail: String) -> Self {
        Self {
            priced: true,
            ..Self::unpriced(billing_detail)
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CostWithCarbon {
    pub cost: CostEstimate,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub carbon: Option<CarbonEstimate>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SupportResult {
    pub supported: bool,
    pub reason: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum RecommendationKind {
    /// Move to the current instance generation
    Modernize,
    /// Move to an Arm-based Graviton class
    Graviton,
    /// Move storage to a cheaper volume type
    VolumeType,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RecommendationImpact {
    pub current_monthly_cost: f64,
    pub projected_monthly_cost: f64,
    pub monthly_savings: f64,
    pub currency: Currency,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    /// Correlation identifier of the source resource, empty when it has none
    pub resource_id: String,
    pub service: ServiceKind,
    pub kind: RecommendationKind,
    pub description: String,
    pub current: String,
    pub recommended: String,
    /// `None` when either side could not be priced
    pub impact: Option<RecommendationImpact>,
}

/// AND-filter for batch scope. Empty fields do not constrain.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResourceFilter {
    pub provider: String,
    pub region: String,
    pub resource_type: String,
    /// Only used to build a single-resource scope when no targets are given
    pub sku: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BatchRequest {
    pub targets: Vec<ResourceDescriptor>,
    pub filter: ResourceFilter,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BatchSummary {
    pub scope_size: usize,
    pub processed: usize,
    pub matched: usize,
    pub skipped: usize,
    pub recommendations: usize,
    pub total_monthly_savings: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BatchResponse {
    pub recommendations: Vec<Recommendation>,
    pub summary: BatchSummary,
}

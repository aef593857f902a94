//! Pricing Domain
//!
//! Monthly cost, carbon and rightsizing estimates for AWS resources, computed
//! from price-list documents embedded at build time for one region.
//!
//! # Architecture
//!
//! ```text
//! ┌───────────────────┐
//! │ EstimationService │  ← supports / estimate / recommend / batch
//! └─────────┬─────────┘
//!           │
//! ┌─────────▼─────────┐
//! │ Normalizer        │  ← resource type → ServiceKind
//! └─────────┬─────────┘
//!           │
//! ┌─────────▼─────────┐
//! │ Estimators        │  ← per-service cost and carbon
//! └─────────┬─────────┘
//!           │
//! ┌─────────▼─────────┐
//! │ PricingLookup     │  ← typed rate lookups (trait + PricingClient)
//! └─────────┬─────────┘
//!           │
//! ┌─────────▼─────────┐
//! │ Catalog           │  ← indices built once from embedded documents
//! └───────────────────┘
//! ```
//!
//! The compiled region is chosen with the `region-*` cargo features.

pub mod batch;
pub mod catalog;
pub mod client;
pub mod embedded;
pub mod error;
pub mod estimators;
pub mod models;
pub mod normalize;
pub mod recommendations;
pub mod service;
pub mod usage;

// Re-export commonly used types
pub use catalog::{Catalog, DocumentSet, Rate};
pub use client::{PricingClient, PricingLookup};
pub use embedded::COMPILED_REGION;
pub use error::{CatalogError, PricingError, PricingResult};
pub use models::{
    BatchRequest, BatchResponse, BatchSummary, CostEstimate, CostWithCarbon, Currency,
    Recommendation, RecommendationImpact, RecommendationKind, ResourceDescriptor, ResourceFilter,
    SupportResult,
};
pub use normalize::{ResourceClass, ServiceKind, classify};
pub use service::{EstimationConfig, EstimationService};

pub use domain_carbon::{CarbonEstimate, ComponentBreakdown};

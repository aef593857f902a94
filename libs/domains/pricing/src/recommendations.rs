//! Rightsizing rules: current-generation families, Graviton equivalents and
//! cheaper volume types. Every candidate is re-priced with the same
//! estimator as the source resource.

use std::str::FromStr;

use crate::catalog::keys::{Architecture, OperatingSystem, RdsVolumeType, VolumeType, canonical_class};
use crate::client::PricingLookup;
use crate::error::PricingResult;
use crate::estimators::estimate_cost;
use crate::models::{
    CostEstimate, Currency, Recommendation, RecommendationImpact, RecommendationKind,
    ResourceDescriptor,
};
use crate::normalize::ServiceKind;
use crate::usage::Tags;

const EC2_GENERATIONS: &[(&str, &str)] = &[("t2", "t3"), ("m4", "m5"), ("c4", "c5"), ("r4", "r5")];

const EC2_GRAVITON: &[(&str, &str)] = &[
    ("t3", "t4g"),
    ("m5", "m6g"),
    ("m6i", "m6g"),
    ("c5", "c6g"),
    ("r5", "r6g"),
];

const MANAGED_GRAVITON: &[(&str, &str)] = &[("t3", "t4g"), ("m5", "m6g"), ("r5", "r6g")];

/// A proposed change, not yet priced.
struct Candidate {
    kind: RecommendationKind,
    current: String,
    recommended: String,
    target: ResourceDescriptor,
}

impl Candidate {
    fn resize(kind: RecommendationKind, source: &ResourceDescriptor, recommended: String) -> Self {
        let mut target = source.clone();
        target.sku = recommended.clone();
        Self {
            kind,
            current: canonical_class(&source.sku),
            recommended,
            target,
        }
    }

    fn retag(
        kind: RecommendationKind,
        source: &ResourceDescriptor,
        tag: &str,
        current: String,
        recommended: String,
    ) -> Self {
        let mut target = source.clone();
        target.tags.insert(tag.to_string(), recommended.clone());
        Self {
            kind,
            current,
            recommended,
            target,
        }
    }
}

/// Swap the family of `<prefix><family>.<size>` using `map`.
fn swap_family(class: &str, prefix: &str, map: &[(&str, &str)]) -> Option<String> {
    let class = canonical_class(class);
    let (family, size) = class.strip_prefix(prefix)?.split_once('.')?;
    map.iter()
        .find(|(from, _)| *from == family)
        .map(|(_, to)| format!("{prefix}{to}.{size}"))
}

fn ec2_candidates(descriptor: &ResourceDescriptor) -> Vec<Candidate> {
    let mut out = Vec::new();
    if let Some(next) = swap_family(&descriptor.sku, "", EC2_GENERATIONS) {
        out.push(Candidate::resize(RecommendationKind::Modernize, descriptor, next));
    }

    let tags = Tags::new(&descriptor.tags);
    let linux = tags
        .text(&["operating_system", "platform"])
        .is_none_or(|os| OperatingSystem::from_str(os).is_ok_and(|os| os == OperatingSystem::Linux));
    let x86 = tags
        .text(&["architecture"])
        .and_then(|a| Architecture::from_str(a).ok())
        .unwrap_or_else(|| Architecture::infer_from_class(&descriptor.sku))
        == Architecture::X86_64;
    if linux && x86 {
        if let Some(arm) = swap_family(&descriptor.sku, "", EC2_GRAVITON) {
            let mut candidate = Candidate::resize(RecommendationKind::Graviton, descriptor, arm);
            candidate
                .target
                .tags
                .insert("architecture".to_string(), Architecture::Arm64.to_string());
            out.push(candidate);
        }
    }
    out
}

fn ebs_candidates(descriptor: &ResourceDescriptor) -> Vec<Candidate> {
    let sku = descriptor.sku.trim();
    let current = if sku.is_empty() {
        Some(VolumeType::Gp2)
    } else {
        VolumeType::from_str(sku).ok()
    };
    if current != Some(VolumeType::Gp2) {
        return Vec::new();
    }
    let mut target = descriptor.clone();
    target.sku = VolumeType::Gp3.to_string();
    vec![Candidate {
        kind: RecommendationKind::VolumeType,
        current: VolumeType::Gp2.to_string(),
        recommended: VolumeType::Gp3.to_string(),
        target,
    }]
}

fn rds_candidates(descriptor: &ResourceDescriptor) -> Vec<Candidate> {
    let mut out = Vec::new();
    let storage = Tags::new(&descriptor.tags)
        .text(&["storage_type"])
        .map_or(Some(RdsVolumeType::Gp2), |s| RdsVolumeType::from_str(s).ok());
    if storage == Some(RdsVolumeType::Gp2) {
        out.push(Candidate::retag(
            RecommendationKind::VolumeType,
            descriptor,
            "storage_type",
            RdsVolumeType::Gp2.to_string(),
            RdsVolumeType::Gp3.to_string(),
        ));
    }
    if let Some(arm) = swap_family(&descriptor.sku, "db.", MANAGED_GRAVITON) {
        out.push(Candidate::resize(RecommendationKind::Graviton, descriptor, arm));
    }
    out
}

fn elasticache_candidates(descriptor: &ResourceDescriptor) -> Vec<Candidate> {
    swap_family(&descriptor.sku, "cache.", MANAGED_GRAVITON)
        .map(|arm| Candidate::resize(RecommendationKind::Graviton, descriptor, arm))
        .into_iter()
        .collect()
}

fn describe(kind: RecommendationKind, service: ServiceKind, current: &str, recommended: &str) -> String {
    match kind {
        RecommendationKind::Modernize => {
            format!("Move {service} {current} to current generation {recommended}")
        }
        RecommendationKind::Graviton => {
            format!("Move {service} {current} to Graviton {recommended}")
        }
        RecommendationKind::VolumeType => {
            format!("Switch {service} storage from {current} to {recommended}")
        }
    }
}

fn impact(current: &CostEstimate, projected: &CostEstimate) -> Option<RecommendationImpact> {
    if !current.priced || !projected.priced {
        return None;
    }
    Some(RecommendationImpact {
        current_monthly_cost: current.monthly_cost,
        projected_monthly_cost: projected.monthly_cost,
        monthly_savings: current.monthly_cost - projected.monthly_cost,
        currency: Currency::Usd,
    })
}

/// Priced recommendations for one resource.
///
/// Candidates whose projected cost is not lower are dropped; candidates that
/// cannot be priced on either side are kept with no impact.
pub fn recommend(
    kind: ServiceKind,
    descriptor: &ResourceDescriptor,
    lookup: &dyn PricingLookup,
) -> PricingResult<Vec<Recommendation>> {
    let candidates = match kind {
        ServiceKind::Ec2 => ec2_candidates(descriptor),
        ServiceKind::Ebs => ebs_candidates(descriptor),
        ServiceKind::Rds => rds_candidates(descriptor),
        ServiceKind::ElastiCache => elasticache_candidates(descriptor),
        _ => Vec::new(),
    };
    if candidates.is_empty() {
        return Ok(Vec::new());
    }

    let current = estimate_cost(kind, descriptor, lookup)?;
    let resource_id = descriptor.correlation_id().unwrap_or_default().to_string();
    let mut out = Vec::with_capacity(candidates.len());
    for candidate in candidates {
        let projected = estimate_cost(kind, &candidate.target, lookup)?;
        let impact = impact(&current, &projected);
        if impact.is_some_and(|i| i.monthly_savings <= 0.0) {
            continue;
        }
        out.push(Recommendation {
            resource_id: resource_id.clone(),
            service: kind,
            kind: candidate.kind,
            description: describe(candidate.kind, kind, &candidate.current, &candidate.recommended),
            current: candidate.current,
            recommended: candidate.recommended,
            impact,
        });
    }
    Ok(out)
}

use domain_carbon::{
    CarbonEstimate, ComputeUsage, StorageService, StorageUsage, estimate_compute, estimate_storage,
};

use super::{CarbonContext, HOURS_PER_MONTH, required_sku};
use crate::catalog::keys::{DatabaseEngine, Deployment, RdsInstanceKey, RdsStorageKey, RdsVolumeType};
use crate::client::PricingLookup;
use crate::error::PricingResult;
use crate::models::{CostEstimate, ResourceDescriptor};
use crate::usage::{BillingDetail, Tags};

pub(crate) const DEFAULT_STORAGE_GB: f64 = 20.0;
const ENGINE_TAGS: &[&str] = &["engine"];
const MULTI_AZ_TAGS: &[&str] = &["multi_az", "multiaz"];
const STORAGE_TYPE_TAGS: &[&str] = &["storage_type"];
const STORAGE_SIZE_TAGS: &[&str] = &["storage_size", "allocated_storage"];

struct Database {
    engine: DatabaseEngine,
    deployment: Deployment,
    volume: RdsVolumeType,
    storage_gb: f64,
}

fn database(tags: &Tags<'_>, detail: &mut BillingDetail) -> Database {
    let engine = tags.choice_or(ENGINE_TAGS, DatabaseEngine::MySql, detail);
    let multi_az = tags.flag_or(MULTI_AZ_TAGS, false, Deployment::SingleAz, detail);
    let deployment = Deployment::from_multi_az(multi_az);
    let volume = tags.choice_or(STORAGE_TYPE_TAGS, RdsVolumeType::Gp2, detail);
    let storage_gb = tags.quantity_or(STORAGE_SIZE_TAGS, DEFAULT_STORAGE_GB, "GB", detail);
    Database {
        engine,
        deployment,
        volume,
        storage_gb,
    }
}

pub(super) fn estimate(
    descriptor: &ResourceDescriptor,
    lookup: &dyn PricingLookup,
) -> PricingResult<CostEstimate> {
    let class = required_sku(descriptor, "instance class")?;
    let tags = Tags::new(&descriptor.tags);
    let mut detail = BillingDetail::new(format!("RDS {class}"));
    let db = database(&tags, &mut detail);

    let key = RdsInstanceKey::new(class, db.engine, db.deployment);
    let Some(instance) = lookup.rds_instance_hourly(&key) else {
        detail.note(format!(
            "no {} {} price for {class} in {}",
            db.engine,
            db.deployment,
            lookup.region()
        ));
        return Ok(CostEstimate::unpriced(detail.finish()));
    };

    let mut monthly = instance.usd * HOURS_PER_MONTH;
    detail.note(format!(
        "{} {}: ${}/hr x {HOURS_PER_MONTH} hrs",
        db.engine, db.deployment, instance.usd
    ));

    let storage_key = RdsStorageKey {
        volume_type: db.volume,
        deployment: db.deployment,
    };
    match lookup.rds_storage(&storage_key) {
        Some(rate) => {
            monthly += db.storage_gb * rate.usd;
            detail.note(format!("{} {}GB at ${}/GB-month", db.volume, db.storage_gb, rate.usd));
        }
        None => detail.note(format!("no {} storage price, storage not included", db.volume)),
    }

    Ok(CostEstimate::priced(instance.usd, "Hrs", monthly, detail.finish()))
}

/// Instance plus storage footprint, doubled for a Multi-AZ standby.
pub(super) fn carbon(descriptor: &ResourceDescriptor, ctx: &CarbonContext<'_>) -> Option<CarbonEstimate> {
    let tags = Tags::new(&descriptor.tags);
    let db = database(&tags, &mut BillingDetail::default());
    let compute = estimate_compute(
        ctx.specs,
        &ComputeUsage {
            instance_type: descriptor.sku.trim(),
            region: ctx.region,
            utilization: ctx.utilization,
            hours: HOURS_PER_MONTH,
        },
    )?;
    let storage = estimate_storage(&StorageUsage {
        size_gb: db.storage_gb,
        technology: db.volume.technology(),
        service: StorageService::Rds,
        region: ctx.region,
        hours: HOURS_PER_MONTH,
    });
    Some(compute.combine(&storage).scaled(db.deployment.replicas()))
}

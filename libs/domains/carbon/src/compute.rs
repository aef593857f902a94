//! Instance-based compute (EC2, RDS, ElastiCache nodes).

use crate::embodied::embodied_kg;
use crate::grid::grid_intensity;
use crate::model::{CarbonEstimate, ComponentBreakdown};
use crate::specs::SpecTable;
use crate::{clamp_utilization, operational_grams};

#[derive(Debug, Clone, Copy)]
pub struct ComputeUsage<'a> {
    pub instance_type: &'a str,
    pub region: &'a str,
    /// Average utilization in `0..=1`, clamped
    pub utilization: f64,
    pub hours: f64,
}

/// Estimate one instance running for `usage.hours`.
///
/// Returns `None` when the instance type is not in `specs`. The estimate
/// always carries a CPU/GPU breakdown whose parts sum to
/// `operational_grams`.
pub fn estimate_compute(specs: &SpecTable, usage: &ComputeUsage<'_>) -> Option<CarbonEstimate> {
    let spec = specs.instance(usage.instance_type)?;
    let cpu = specs.cpu_power(&spec.microarchitecture)?;
    let utilization = clamp_utilization(usage.utilization);
    let grid = grid_intensity(usage.region);

    let cpu_watts = cpu.at(utilization) * f64::from(spec.vcpus);
    let gpu_watts = match &spec.gpu {
        Some(gpu) => specs.gpu_power(&gpu.model)?.at(utilization) * f64::from(gpu.count),
        None => 0.0,
    };

    let (cpu_kwh, cpu_grams) = operational_grams(cpu_watts, usage.hours, grid.grams_per_kwh);
    let (gpu_kwh, gpu_grams) = operational_grams(gpu_watts, usage.hours, grid.grams_per_kwh);

    let estimate = CarbonEstimate::new(
        cpu_grams + gpu_grams,
        embodied_kg(spec.host_share(), usage.hours),
        cpu_kwh + gpu_kwh,
        grid,
    )
    .with_breakdown(ComponentBreakdown { cpu_grams, gpu_grams });

    Some(estimate)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::AWS_PUE;
    use crate::embodied::HOURS_PER_MONTH;
    use test_utils::assertions::assert_approx_eq;

    fn usage(instance_type: &str, utilization: f64) -> ComputeUsage<'_> {
        ComputeUsage {
            instance_type,
            region: "us-east-1",
            utilization,
            hours: HOURS_PER_MONTH,
        }
    }

    #[test]
    fn test_t3_micro_matches_formula() {
        let specs = SpecTable::embedded().unwrap();
        let e = estimate_compute(specs, &usage("t3.micro", 0.5)).unwrap();

        // skylake 0.65..4.26 W per vCPU, 2 vCPUs
        let watts = (0.65 + 0.5 * (4.26 - 0.65)) * 2.0;
        let kwh = watts * HOURS_PER_MONTH / 1000.0 * AWS_PUE;
        assert_approx_eq(e.energy_kwh, kwh, 1e-9, "energy");
        assert_approx_eq(e.operational_grams, kwh * 379.069, 1e-6, "operational");
        assert_approx_eq(e.embodied_kg, 1000.0 * (2.0 / 96.0) / 48.0, 1e-9, "embodied");
        assert!(!e.grid_defaulted);
    }

    #[test]
    fn test_breakdown_parts_sum_to_operational() {
        let specs = SpecTable::embedded().unwrap();
        for instance in ["g4dn.xlarge", "g5.xlarge", "p3.2xlarge", "p4d.24xlarge", "m5.large"] {
            let e = estimate_compute(specs, &usage(instance, 0.7)).unwrap();
            let b = e.breakdown.unwrap();
            assert_approx_eq(b.cpu_grams + b.gpu_grams, e.operational_grams, 1e-6, instance);
        }
    }

    #[test]
    fn test_gpu_instance_has_gpu_share() {
        let specs = SpecTable::embedded().unwrap();
        let e = estimate_compute(specs, &usage("p4d.24xlarge", 0.5)).unwrap();
        let b = e.breakdown.unwrap();
        assert!(b.gpu_grams > b.cpu_grams, "eight A100s should dominate");
    }

    #[test]
    fn test_cpu_only_instance_has_zero_gpu() {
        let specs = SpecTable::embedded().unwrap();
        let e = estimate_compute(specs, &usage("m5.large", 0.5)).unwrap();
        assert_eq!(e.breakdown.unwrap().gpu_grams, 0.0);
    }

    #[test]
    fn test_higher_utilization_never_lowers_footprint() {
        let specs = SpecTable::embedded().unwrap();
        let low = estimate_compute(specs, &usage("c5.large", 0.1)).unwrap();
        let high = estimate_compute(specs, &usage("c5.large", 0.9)).unwrap();
        assert!(high.operational_grams > low.operational_grams);
        assert_eq!(high.embodied_kg, low.embodied_kg);
    }

    #[test]
    fn test_rds_class_resolves_to_instance() {
        let specs = SpecTable::embedded().unwrap();
        let db = estimate_compute(specs, &usage("db.m5.large", 0.5)).unwrap();
        let ec2 = estimate_compute(specs, &usage("m5.large", 0.5)).unwrap();
        assert_eq!(db, ec2);
    }

    #[test]
    fn test_unknown_instance_is_none() {
        let specs = SpecTable::embedded().unwrap();
        assert!(estimate_compute(specs, &usage("zz9.huge", 0.5)).is_none());
    }

    #[test]
    fn test_unknown_region_uses_default_intensity() {
        let specs = SpecTable::embedded().unwrap();
        let e = estimate_compute(
            specs,
            &ComputeUsage { region: "nowhere-1", ..usage("t3.micro", 0.5) },
        )
        .unwrap();
        assert!(e.grid_defaulted);
        assert_eq!(e.grid_intensity, crate::DEFAULT_GRID_INTENSITY);
    }
}

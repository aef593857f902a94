//! Function-as-a-service workloads (Lambda).

use crate::embodied::embodied_kg;
use crate::grid::grid_intensity;
use crate::model::{CarbonEstimate, ComponentBreakdown};
use crate::specs::SpecTable;
use crate::{clamp_utilization, operational_grams};

/// Memory that buys one full vCPU on Lambda.
pub const MB_PER_VCPU: f64 = 1769.0;

/// vCPUs on the hosts that back Lambda, for embodied apportioning.
const LAMBDA_HOST_VCPUS: f64 = 96.0;

#[derive(Debug, Clone, Copy)]
pub struct ServerlessUsage<'a> {
    pub region: &'a str,
    pub invocations: f64,
    pub avg_duration_ms: f64,
    pub memory_mb: f64,
    pub arm: bool,
    pub utilization: f64,
}

impl ServerlessUsage<'_> {
    /// Fraction of a vCPU allocated for the configured memory.
    pub fn vcpu_share(&self) -> f64 {
        self.memory_mb.max(0.0) / MB_PER_VCPU
    }

    /// Total execution hours across all invocations.
    pub fn execution_hours(&self) -> f64 {
        self.invocations.max(0.0) * self.avg_duration_ms.max(0.0) / 3_600_000.0
    }
}

/// Estimate a function's footprint from its execution time.
///
/// Returns `None` only when the spec table lacks the host microarchitecture.
pub fn estimate_serverless(specs: &SpecTable, usage: &ServerlessUsage<'_>) -> Option<CarbonEstimate> {
    let microarchitecture = if usage.arm { "graviton2" } else { "cascade_lake" };
    let cpu = specs.cpu_power(microarchitecture)?;
    let grid = grid_intensity(usage.region);
    let hours = usage.execution_hours();
    let vcpus = usage.vcpu_share();

    let watts = cpu.at(clamp_utilization(usage.utilization)) * vcpus;
    let (energy_kwh, grams) = operational_grams(watts, hours, grid.grams_per_kwh);

    let estimate = CarbonEstimate::new(grams, embodied_kg(vcpus / LAMBDA_HOST_VCPUS, hours), energy_kwh, grid)
        .with_breakdown(ComponentBreakdown { cpu_grams: grams, gpu_grams: 0.0 });
    Some(estimate)
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_utils::assertions::assert_approx_eq;

    fn usage(invocations: f64, arm: bool) -> ServerlessUsage<'static> {
        ServerlessUsage {
            region: "us-east-1",
            invocations,
            avg_duration_ms: 100.0,
            memory_mb: 1769.0,
            arm,
            utilization: 0.5,
        }
    }

    #[test]
    fn test_execution_hours() {
        let u = usage(36_000.0, false);
        assert_approx_eq(u.execution_hours(), 1.0, 1e-12, "hours");
        assert_approx_eq(u.vcpu_share(), 1.0, 1e-12, "share");
    }

    #[test]
    fn test_zero_invocations_is_zero() {
        let specs = SpecTable::embedded().unwrap();
        let e = estimate_serverless(specs, &usage(0.0, false)).unwrap();
        assert_eq!(e.total_grams, 0.0);
    }

    #[test]
    fn test_arm_is_lower_than_x86() {
        let specs = SpecTable::embedded().unwrap();
        let x86 = estimate_serverless(specs, &usage(1_000_000.0, false)).unwrap();
        let arm = estimate_serverless(specs, &usage(1_000_000.0, true)).unwrap();
        assert!(arm.operational_grams < x86.operational_grams);
    }

    #[test]
    fn test_footprint_scales_with_invocations() {
        let specs = SpecTable::embedded().unwrap();
        let one = estimate_serverless(specs, &usage(1_000_000.0, false)).unwrap();
        let two = estimate_serverless(specs, &usage(2_000_000.0, false)).unwrap();
        assert_approx_eq(two.total_grams, one.total_grams * 2.0, 1e-6, "linear");
    }
}

use serde::{Deserialize, Serialize};

use crate::grid::GridIntensity;

/// Unit label carried on every estimate.
pub const CO2E_UNIT: &str = "gCO2e";

/// Operational grams split by hardware component.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ComponentBreakdown {
    pub cpu_grams: f64,
    pub gpu_grams: f64,
}

/// Carbon footprint for one resource over a period.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CarbonEstimate {
    /// Use-phase emissions in grams CO2e
    pub operational_grams: f64,
    /// Manufacturing emissions amortized over the period, in kilograms CO2e
    pub embodied_kg: f64,
    /// Operational plus embodied, in grams CO2e
    pub total_grams: f64,
    /// Facility energy including PUE
    pub energy_kwh: f64,
    /// Grid intensity used (gCO2e/kWh)
    pub grid_intensity: f64,
    pub grid_defaulted: bool,
    pub unit: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub breakdown: Option<ComponentBreakdown>,
}

impl CarbonEstimate {
    pub fn new(
        operational_grams: f64,
        embodied_kg: f64,
        energy_kwh: f64,
        grid: GridIntensity,
    ) -> Self {
        Self {
            operational_grams,
            embodied_kg,
            total_grams: operational_grams + embodied_kg * 1000.0,
            energy_kwh,
            grid_intensity: grid.grams_per_kwh,
            grid_defaulted: grid.defaulted,
            unit: CO2E_UNIT.to_string(),
            breakdown: None,
        }
    }

    /// A footprint that is known to be nothing, e.g. a managed control plane.
    pub fn zero(grid: GridIntensity) -> Self {
        Self::new(0.0, 0.0, 0.0, grid)
    }

    pub fn with_breakdown(mut self, breakdown: ComponentBreakdown) -> Self {
        self.breakdown = Some(breakdown);
        self
    }

    /// Scale every quantity by `factor`, e.g. replicas or node count.
    pub fn scaled(mut self, factor: f64) -> Self {
        self.operational_grams *= factor;
        self.embodied_kg *= factor;
        self.total_grams *= factor;
        self.energy_kwh *= factor;
        if let Some(b) = self.breakdown.as_mut() {
            b.cpu_grams *= factor;
            b.gpu_grams *= factor;
        }
        self
    }

    /// Add another estimate taken in the same region.
    pub fn combine(mut self, other: &CarbonEstimate) -> Self {
        self.operational_grams += other.operational_grams;
        self.embodied_kg += other.embodied_kg;
        self.total_grams += other.total_grams;
        self.energy_kwh += other.energy_kwh;
        self.breakdown = match (self.breakdown, other.breakdown) {
            (Some(a), Some(b)) => Some(ComponentBreakdown {
                cpu_grams: a.cpu_grams + b.cpu_grams,
                gpu_grams: a.gpu_grams + b.gpu_grams,
            }),
            (a, b) => a.or(b),
        };
        self
    }
}

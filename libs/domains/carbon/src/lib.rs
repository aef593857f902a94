//! Carbon Domain
//!
//! Turns instance and storage characteristics, regional grid intensity and
//! utilization into operational and embodied CO2e estimates.
//!
//! # Architecture
//!
//! ```text
//! ┌────────────────────────────────┐
//! │ compute / storage / serverless │  ← per-workload formulas
//! └───────────────┬────────────────┘
//!                 │
//! ┌───────────────▼────────────────┐
//! │    specs    grid    embodied   │  ← embedded tables and constants
//! └───────────────┬────────────────┘
//!                 │
//! ┌───────────────▼────────────────┐
//! │             model              │  ← CarbonEstimate, ComponentBreakdown
//! └────────────────────────────────┘
//! ```
//!
//! Operational carbon is reported in grams CO2e, embodied carbon in
//! kilograms CO2e. `CarbonEstimate::total_grams` combines both.

pub mod compute;
pub mod embodied;
pub mod error;
pub mod grid;
pub mod model;
pub mod serverless;
pub mod specs;
pub mod storage;

pub use compute::{ComputeUsage, estimate_compute};
pub use embodied::{HOURS_PER_MONTH, embodied_kg};
pub use error::{CarbonError, CarbonResult};
pub use grid::{DEFAULT_GRID_INTENSITY, GridIntensity, grid_intensity};
pub use model::{CarbonEstimate, ComponentBreakdown};
pub use serverless::{ServerlessUsage, estimate_serverless};
pub use specs::{GpuSpec, InstanceSpec, PowerRange, SpecTable};
pub use storage::{StorageService, StorageTechnology, StorageUsage, estimate_storage};

/// Power usage effectiveness applied to all AWS energy figures.
pub const AWS_PUE: f64 = 1.135;

/// Utilization assumed when a caller has no measurement.
pub const DEFAULT_UTILIZATION: f64 = 0.5;

/// Clamp a utilization fraction into `0..=1`; NaN becomes the default.
pub fn clamp_utilization(utilization: f64) -> f64 {
    if utilization.is_nan() {
        DEFAULT_UTILIZATION
    } else {
        utilization.clamp(0.0, 1.0)
    }
}

/// Facility kWh and operational grams for `watts` drawn over `hours`.
pub(crate) fn operational_grams(watts: f64, hours: f64, intensity: f64) -> (f64, f64) {
    let energy_kwh = watts * hours / 1000.0 * AWS_PUE;
    (energy_kwh, energy_kwh * intensity)
}

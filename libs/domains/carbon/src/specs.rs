//! Embedded instance, microarchitecture and GPU power tables.

use std::collections::HashMap;

use once_cell::sync::Lazy;
use serde::Deserialize;

use crate::error::{CarbonError, CarbonResult};

static EMBEDDED_SPECS: &[u8] = include_bytes!("../data/instance_specs.json");

static EMBEDDED: Lazy<CarbonResult<SpecTable>> = Lazy::new(|| {
    let table = SpecTable::from_slice(EMBEDDED_SPECS);
    match &table {
        Ok(t) => tracing::debug!(instances = t.instances.len(), "Loaded instance spec table"),
        Err(e) => tracing::error!(error = %e, "Instance spec table is unusable"),
    }
    table
});

/// Idle and full-load draw in watts for one vCPU or one GPU.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct PowerRange {
    pub min_watts: f64,
    pub max_watts: f64,
}

impl PowerRange {
    /// Linear interpolation between idle and full load.
    pub fn at(&self, utilization: f64) -> f64 {
        self.min_watts + utilization * (self.max_watts - self.min_watts)
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct GpuSpec {
    pub model: String,
    pub count: u32,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct InstanceSpec {
    pub vcpus: u32,
    pub memory_gib: f64,
    /// vCPUs on the physical host, used to apportion embodied carbon.
    pub host_vcpus: u32,
    pub microarchitecture: String,
    #[serde(default)]
    pub gpu: Option<GpuSpec>,
}

impl InstanceSpec {
    /// Fraction of the host this instance occupies, capped at one.
    pub fn host_share(&self) -> f64 {
        (f64::from(self.vcpus) / f64::from(self.host_vcpus)).min(1.0)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct SpecTable {
    microarchitectures: HashMap<String, PowerRange>,
    gpus: HashMap<String, PowerRange>,
    instances: HashMap<String, InstanceSpec>,
}

impl SpecTable {
    /// Table compiled into the binary. Parsed once; a parse failure is
    /// returned on every call.
    pub fn embedded() -> CarbonResult<&'static SpecTable> {
        EMBEDDED.as_ref().map_err(Clone::clone)
    }

    pub fn from_slice(bytes: &[u8]) -> CarbonResult<Self> {
        let table: SpecTable =
            serde_json::from_slice(bytes).map_err(|e| CarbonError::CorruptData(e.to_string()))?;
        table.validate()?;
        Ok(table)
    }

    fn validate(&self) -> CarbonResult<()> {
        for (name, range) in self.microarchitectures.iter().chain(self.gpus.iter()) {
            if range.min_watts < 0.0 || range.max_watts < range.min_watts {
                return Err(CarbonError::InvalidSpec(format!(
                    "{name}: power range {}..{} is not ordered",
                    range.min_watts, range.max_watts
                )));
            }
        }
        for (name, spec) in &self.instances {
            if spec.vcpus == 0 || spec.host_vcpus < spec.vcpus {
                return Err(CarbonError::InvalidSpec(format!(
                    "{name}: {} vCPUs on a {} vCPU host",
                    spec.vcpus, spec.host_vcpus
                )));
            }
            if !self.microarchitectures.contains_key(&spec.microarchitecture) {
                return Err(CarbonError::InvalidSpec(format!(
                    "{name}: unknown microarchitecture {}",
                    spec.microarchitecture
                )));
            }
            if let Some(gpu) = &spec.gpu {
                if !self.gpus.contains_key(&gpu.model) {
                    return Err(CarbonError::InvalidSpec(format!(
                        "{name}: unknown GPU model {}",
                        gpu.model
                    )));
                }
            }
        }
        Ok(())
    }

    /// Look up an instance. RDS (`db.`) and ElastiCache (`cache.`) classes
    /// resolve to the EC2 type they run on.
    pub fn instance(&self, instance_type: &str) -> Option<&InstanceSpec> {
        let key = instance_type.trim().to_ascii_lowercase();
        let key = key
            .strip_prefix("db.")
            .or_else(|| key.strip_prefix("cache."))
            .unwrap_or(&key);
        self.instances.get(key)
    }

    pub fn cpu_power(&self, microarchitecture: &str) -> Option<&PowerRange> {
        self.microarchitectures.get(microarchitecture)
    }

    pub fn gpu_power(&self, model: &str) -> Option<&PowerRange> {
        self.gpus.get(model)
    }

    pub fn len(&self) -> usize {
        self.instances.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instances.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_embedded_table_loads() {
        let table = SpecTable::embedded().expect("embedded specs should parse");
        assert!(!table.is_empty());
        assert!(table.instance("t3.micro").is_some());
    }

    #[test]
    fn test_db_and_cache_prefixes_resolve() {
        let table = SpecTable::embedded().unwrap();
        let ec2 = table.instance("m5.large").unwrap();
        assert_eq!(table.instance("db.m5.large"), Some(ec2));
        assert_eq!(table.instance("cache.m5.large"), Some(ec2));
    }

    #[test]
    fn test_gpu_instance_has_known_model() {
        let table = SpecTable::embedded().unwrap();
        let spec = table.instance("p4d.24xlarge").unwrap();
        let gpu = spec.gpu.as_ref().unwrap();
        assert_eq!(gpu.count, 8);
        assert!(table.gpu_power(&gpu.model).is_some());
    }

    #[test]
    fn test_unknown_instance_is_none() {
        let table = SpecTable::embedded().unwrap();
        assert!(table.instance("z99.mega").is_none());
    }

    #[test]
    fn test_corrupt_json_is_rejected() {
        let err = SpecTable::from_slice(b"{ not json").unwrap_err();
        assert!(matches!(err, CarbonError::CorruptData(_)));
    }

    #[test]
    fn test_unknown_microarchitecture_is_rejected() {
        let doc = br#"{
            "microarchitectures": {},
            "gpus": {},
            "instances": { "x1.small": { "vcpus": 1, "memory_gib": 1, "host_vcpus": 4, "microarchitecture": "nope" } }
        }"#;
        let err = SpecTable::from_slice(doc).unwrap_err();
        assert!(matches!(err, CarbonError::InvalidSpec(_)));
    }

    #[test]
    fn test_power_range_interpolation() {
        let range = PowerRange { min_watts: 1.0, max_watts: 5.0 };
        assert_eq!(range.at(0.0), 1.0);
        assert_eq!(range.at(0.5), 3.0);
        assert_eq!(range.at(1.0), 5.0);
    }
}

use std::collections::HashMap;
use std::str::FromStr;

use super::keys::{Architecture, Ec2Key, OperatingSystem, Tenancy};
use super::{PricedProduct, Rate, RawPricingDocument, insert_min};

/// On-demand instance hours keyed by type, OS, tenancy and architecture.
#[derive(Debug, Default)]
pub struct Ec2Index {
    hourly: HashMap<Ec2Key, Rate>,
}

impl Ec2Index {
    pub fn build(doc: &RawPricingDocument) -> Self {
        let mut hourly = HashMap::new();
        for product in doc.family("Compute Instance") {
            // Bundled licenses and reservation rows share the same instance type.
            if !product.attr_is_or_missing("preInstalledSw", "NA")
                || !product.attr_is_or_missing("capacitystatus", "Used")
            {
                continue;
            }
            if let Some(key) = key_for(product) {
                let rate = Rate {
                    usd: product.usd,
                    vcpu: product.attr("vcpu").and_then(|v| v.parse().ok()),
                    memory_gib: product.attr("memory").and_then(parse_gib),
                };
                insert_min(&mut hourly, key, rate);
            }
        }
        Self { hourly }
    }

    pub fn hourly(&self, key: &Ec2Key) -> Option<Rate> {
        self.hourly.get(key).copied()
    }

    pub fn len(&self) -> usize {
        self.hourly.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hourly.is_empty()
    }
}

fn key_for(product: &PricedProduct) -> Option<Ec2Key> {
    let instance_type = product.attr("instanceType")?;
    let os = OperatingSystem::from_str(product.attr("operatingSystem")?).ok()?;
    let tenancy = Tenancy::from_str(product.attr("tenancy").unwrap_or("Shared")).ok()?;
    let arch = arch_for(product, instance_type);
    Some(Ec2Key::new(instance_type, os, tenancy, arch))
}

fn arch_for(product: &PricedProduct, instance_type: &str) -> Architecture {
    let processor = product.attr("physicalProcessor").unwrap_or_default();
    let declared = product.attr("processorArchitecture").unwrap_or_default();
    if processor.to_ascii_lowercase().contains("graviton")
        || declared.to_ascii_lowercase().contains("arm")
    {
        Architecture::Arm64
    } else if declared.is_empty() && processor.is_empty() {
        Architecture::infer_from_class(instance_type)
    } else {
        Architecture::X86_64
    }
}

/// `"8 GiB"` -> 8.0
fn parse_gib(memory: &str) -> Option<f64> {
    memory
        .split_whitespace()
        .next()
        .and_then(|n| n.replace(',', "").parse().ok())
}

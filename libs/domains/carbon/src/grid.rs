//! Regional grid carbon intensity.

use serde::Serialize;

/// Global average used for regions missing from the table (gCO2e/kWh).
pub const DEFAULT_GRID_INTENSITY: f64 = 475.0;

/// Grid intensity per AWS region in gCO2e/kWh.
static GRID_INTENSITY: &[(&str, f64)] = &[
    ("af-south-1", 900.6),
    ("ap-east-1", 710.0),
    ("ap-northeast-1", 462.0),
    ("ap-northeast-2", 415.0),
    ("ap-northeast-3", 462.0),
    ("ap-south-1", 708.0),
    ("ap-southeast-1", 408.0),
    ("ap-southeast-2", 790.0),
    ("ca-central-1", 120.0),
    ("eu-central-1", 311.0),
    ("eu-north-1", 8.8),
    ("eu-south-1", 233.0),
    ("eu-west-1", 278.6),
    ("eu-west-2", 225.0),
    ("eu-west-3", 51.1),
    ("me-south-1", 732.0),
    ("sa-east-1", 61.7),
    ("us-east-1", 379.069),
    ("us-east-2", 410.608),
    ("us-gov-east-1", 379.069),
    ("us-gov-west-1", 322.167),
    ("us-west-1", 322.167),
    ("us-west-2", 322.167),
];

/// Intensity used for one estimate, flagged when the default applied.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GridIntensity {
    pub grams_per_kwh: f64,
    pub defaulted: bool,
}

/// Look up a region's grid intensity. Never fails: unmapped regions get
/// `DEFAULT_GRID_INTENSITY`.
pub fn grid_intensity(region: &str) -> GridIntensity {
    let key = region.trim().to_ascii_lowercase();
    match GRID_INTENSITY.binary_search_by(|(name, _)| (*name).cmp(key.as_str())) {
        Ok(idx) => GridIntensity {
            grams_per_kwh: GRID_INTENSITY[idx].1,
            defaulted: false,
        },
        Err(_) => GridIntensity {
            grams_per_kwh: DEFAULT_GRID_INTENSITY,
            defaulted: true,
        },
    }
}

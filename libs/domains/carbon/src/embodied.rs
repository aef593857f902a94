//! Amortized manufacturing emissions.

/// Manufacturing footprint of one standard server (kgCO2e).
pub const SERVER_EMBODIED_KG: f64 = 1000.0;

/// Months over which server manufacturing is amortized.
pub const SERVER_LIFESPAN_MONTHS: f64 = 48.0;

/// Hours in a billing month, shared with the cost estimators.
pub const HOURS_PER_MONTH: f64 = 730.0;

/// Embodied kgCO2e for occupying `host_share` of a server for `hours`.
pub fn embodied_kg(host_share: f64, hours: f64) -> f64 {
    let months = hours / HOURS_PER_MONTH;
    SERVER_EMBODIED_KG * host_share.clamp(0.0, 1.0) * months / SERVER_LIFESPAN_MONTHS
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_server_for_lifespan_is_whole_footprint() {
        let hours = HOURS_PER_MONTH * SERVER_LIFESPAN_MONTHS;
        assert!((embodied_kg(1.0, hours) - SERVER_EMBODIED_KG).abs() < 1e-9);
    }

    #[test]
    fn test_share_is_proportional() {
        let month = embodied_kg(1.0, HOURS_PER_MONTH);
        let slice = embodied_kg(2.0 / 96.0, HOURS_PER_MONTH);
        assert!((slice - month * 2.0 / 96.0).abs() < 1e-12);
    }

    #[test]
    fn test_share_above_one_is_capped() {
        assert_eq!(embodied_kg(3.0, HOURS_PER_MONTH), embodied_kg(1.0, HOURS_PER_MONTH));
    }
}

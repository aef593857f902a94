//! Configuration for the cost estimator

use core_config::{ConfigError, FromEnv, env_flag, env_parse};
use domain_pricing::EstimationConfig;

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub estimation: EstimationConfig,
    /// Install the Prometheus recorder
    pub metrics_enabled: bool,
}

impl FromEnv for Config {
    fn from_env() -> Result<Self, ConfigError> {
        let defaults = EstimationConfig::default();
        let default_utilization =
            env_parse("CARBON_DEFAULT_UTILIZATION", defaults.default_utilization)?;
        if !(0.0..=1.0).contains(&default_utilization) {
            return Err(ConfigError::OutOfRange {
                key: "CARBON_DEFAULT_UTILIZATION".to_string(),
                details: format!("{default_utilization} is not within 0..=1"),
            });
        }

        Ok(Config {
            estimation: EstimationConfig {
                default_utilization,
                carbon_enabled: env_flag("CARBON_ENABLED", defaults.carbon_enabled)?,
            },
            metrics_enabled: env_flag("METRICS_ENABLED", true)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const VARS: [&str; 3] = ["CARBON_DEFAULT_UTILIZATION", "CARBON_ENABLED", "METRICS_ENABLED"];

    #[test]
    fn test_defaults() {
        temp_env::with_vars_unset(VARS, || {
            let config = Config::from_env().unwrap();
            assert_eq!(config.estimation, EstimationConfig::default());
            assert!(config.metrics_enabled);
        });
    }

    #[test]
    fn test_overrides() {
        temp_env::with_vars(
            [
                ("CARBON_DEFAULT_UTILIZATION", Some("0.25")),
                ("CARBON_ENABLED", Some("no")),
                ("METRICS_ENABLED", Some("0")),
            ],
            || {
                let config = Config::from_env().unwrap();
                assert_eq!(config.estimation.default_utilization, 0.25);
                assert!(!config.estimation.carbon_enabled);
                assert!(!config.metrics_enabled);
            },
        );
    }

    #[test]
    fn test_utilization_out_of_range() {
        temp_env::with_var("CARBON_DEFAULT_UTILIZATION", Some("1.5"), || {
            assert!(matches!(Config::from_env(), Err(ConfigError::OutOfRange { .. })));
        });
    }

    #[test]
    fn test_unparseable_values_are_errors() {
        temp_env::with_var("CARBON_DEFAULT_UTILIZATION", Some("half"), || {
            assert!(matches!(Config::from_env(), Err(ConfigError::ParseError { .. })));
        });
        temp_env::with_var("CARBON_ENABLED", Some("maybe"), || {
            assert!(matches!(Config::from_env(), Err(ConfigError::ParseError { .. })));
        });
    }
}

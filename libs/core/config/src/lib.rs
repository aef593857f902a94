pub mod tracing;

use std::env;
use std::str::FromStr;
use thiserror::Error;

/// Configuration error type
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Environment variable '{0}' is required but not set")]
    MissingEnvVar(String),

    #[error("Failed to parse environment variable '{key}': {details}")]
    ParseError { key: String, details: String },

    #[error("Environment variable '{key}' is out of range: {details}")]
    OutOfRange { key: String, details: String },
}

/// Application environment
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Environment {
    Development, // Local runs, pretty logs
    Production,  // Deployed next to the orchestrator, JSON logs
}

impl Environment {
    pub fn from_env() -> Self {
        let app_env = env::var("APP_ENV").unwrap_or_else(|_| "development".to_string());

        if app_env.eq_ignore_ascii_case("production") {
            Environment::Production
        } else {
            Environment::Development
        }
    }

    pub fn is_production(&self) -> bool {
        matches!(self, Environment::Production)
    }

    pub fn is_development(&self) -> bool {
        matches!(self, Environment::Development)
    }
}

/// Trait for configuration that can be loaded from environment variables
pub trait FromEnv: Sized {
    fn from_env() -> Result<Self, ConfigError>;
}

/// Helper to load and parse environment variable with a default value
pub fn env_or_default(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Helper to load and parse environment variable or return error
pub fn env_required(key: &str) -> Result<String, ConfigError> {
    env::var(key).map_err(|_| ConfigError::MissingEnvVar(key.to_string()))
}

/// Parse an optional environment variable into `T`, falling back to `default`
/// when unset or blank. A set but unparseable value is an error rather than a
/// silent fallback.
pub fn env_parse<T>(key: &str, default: T) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match env::var(key) {
        Ok(raw) if !raw.trim().is_empty() => {
            raw.trim()
                .parse::<T>()
                .map_err(|e| ConfigError::ParseError {
                    key: key.to_string(),
                    details: e.to_string(),
                })
        }
        _ => Ok(default),
    }
}

/// Boolean flag accepting `true/false`, `1/0`, `yes/no`, `on/off`.
pub fn env_flag(key: &str, default: bool) -> Result<bool, ConfigError> {
    match env::var(key) {
        Ok(raw) if !raw.trim().is_empty() => match raw.trim().to_ascii_lowercase().as_str() {
            "true" | "1" | "yes" | "on" => Ok(true),
            "false" | "0" | "no" | "off" => Ok(false),
            other => Err(ConfigError::ParseError {
                key: key.to_string(),
                details: format!("expected a boolean, got '{other}'"),
            }),
        },
        _ => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_environment_defaults_to_development() {
        temp_env::with_var_unset("APP_ENV", || {
            let env = Environment::from_env();
            assert_eq!(env, Environment::Development);
            assert!(env.is_development());
            assert!(!env.is_production());
        });
    }

    #[test]
    fn test_environment_production_case_insensitive() {
        temp_env::with_var("APP_ENV", Some("PRODUCTION"), || {
            assert_eq!(Environment::from_env(), Environment::Production);
        });

        temp_env::with_var("APP_ENV", Some("Production"), || {
            assert_eq!(Environment::from_env(), Environment::Production);
        });
    }

    #[test]
    fn test_environment_unknown_defaults_to_development() {
        temp_env::with_var("APP_ENV", Some("staging"), || {
            assert_eq!(Environment::from_env(), Environment::Development);
        });
    }

    #[test]
    fn test_env_or_default() {
        temp_env::with_var("ESTIMATOR_TEST_VAR", Some("value"), || {
            assert_eq!(env_or_default("ESTIMATOR_TEST_VAR", "default"), "value");
        });
        temp_env::with_var_unset("ESTIMATOR_TEST_VAR", || {
            assert_eq!(env_or_default("ESTIMATOR_TEST_VAR", "default"), "default");
        });
    }

    #[test]
    fn test_env_required_missing() {
        temp_env::with_var_unset("MISSING_REQUIRED", || {
            let err = env_required("MISSING_REQUIRED").unwrap_err();
            assert!(err.to_string().contains("MISSING_REQUIRED"));
            assert!(err.to_string().contains("required"));
        });
    }

    #[test]
    fn test_env_parse_uses_default_when_unset_or_blank() {
        temp_env::with_var_unset("UTILIZATION_TEST", || {
            assert_eq!(env_parse("UTILIZATION_TEST", 0.5_f64).unwrap(), 0.5);
        });
        temp_env::with_var("UTILIZATION_TEST", Some("  "), || {
            assert_eq!(env_parse("UTILIZATION_TEST", 0.5_f64).unwrap(), 0.5);
        });
    }

    #[test]
    fn test_env_parse_rejects_garbage() {
        temp_env::with_var("UTILIZATION_TEST", Some("half"), || {
            let err = env_parse::<f64>("UTILIZATION_TEST", 0.5).unwrap_err();
            assert!(matches!(err, ConfigError::ParseError { .. }));
        });
    }

    #[test]
    fn test_env_flag_variants() {
        temp_env::with_var("FLAG_TEST", Some("on"), || {
            assert!(env_flag("FLAG_TEST", false).unwrap());
        });
        temp_env::with_var("FLAG_TEST", Some("0"), || {
            assert!(!env_flag("FLAG_TEST", true).unwrap());
        });
        temp_env::with_var("FLAG_TEST", Some("maybe"), || {
            assert!(env_flag("FLAG_TEST", true).is_err());
        });
    }
}

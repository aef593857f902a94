use crate::{Environment, env_or_default};
use tracing::{debug, info};
use tracing_subscriber::{EnvFilter, prelude::*};

/// Output format for log lines.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LogFormat {
    Json,
    Pretty,
}

impl LogFormat {
    /// `LOG_FORMAT=json|pretty` wins; otherwise production logs JSON.
    pub fn resolve(environment: &Environment) -> Self {
        match env_or_default("LOG_FORMAT", "").to_ascii_lowercase().as_str() {
            "json" => LogFormat::Json,
            "pretty" => LogFormat::Pretty,
            _ if environment.is_production() => LogFormat::Json,
            _ => LogFormat::Pretty,
        }
    }
}

/// Install color-eyre with a project-standard configuration.
///
/// Call this early in main() before any fallible operations. Safe to call
/// multiple times.
pub fn install_color_eyre() {
    let _ = color_eyre::config::HookBuilder::default()
        .display_location_section(true)
        .display_env_section(false)
        .install();
}

/// Initialize tracing with environment-aware configuration and error span capture.
///
/// - **Production** (`APP_ENV=production`): JSON lines, no module targets,
///   default filter `info`.
/// - **Development** (default): pretty output, default filter `debug`.
///
/// `RUST_LOG` overrides the default filter and `LOG_FORMAT` overrides the
/// format. Logs go to stderr so stdout stays clean for JSON responses.
///
/// Safe to call more than once; later calls are no-ops (common in tests).
pub fn init_tracing(environment: &Environment) {
    let format = LogFormat::resolve(environment);

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if environment.is_production() {
            EnvFilter::new("info")
        } else {
            EnvFilter::new("debug")
        }
    });

    let result = match format {
        LogFormat::Json => tracing_subscriber::registry()
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(std::io::stderr)
                    .with_target(false)
                    .flatten_event(true),
            )
            .with(tracing_error::ErrorLayer::default())
            .with(filter)
            .try_init(),
        LogFormat::Pretty => tracing_subscriber::registry()
            .with(
                tracing_subscriber::fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_target(true)
                    .with_file(false)
                    .with_line_number(false)
                    .pretty(),
            )
            .with(tracing_error::ErrorLayer::default())
            .with(filter)
            .try_init(),
    };

    match result {
        Ok(_) => {
            info!(environment = ?environment, format = ?format, "Tracing initialized");
        }
        Err(_) => {
            debug!("Tracing already initialized, skipping re-initialization");
        }
    }
}

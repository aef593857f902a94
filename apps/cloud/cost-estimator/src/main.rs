//! Cost Estimator
//!
//! Prices AWS resources against the catalog compiled into this binary and
//! prints the results as JSON. Logs go to stderr.

use std::collections::HashMap;
use std::io::Read;
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use core_config::tracing::{init_tracing, install_color_eyre};
use core_config::{Environment, FromEnv};
use domain_pricing::{BatchRequest, EstimationService, PricingLookup, ResourceDescriptor};
use eyre::{Result, WrapErr};
use serde::Serialize;
use tracing::{info, warn};

mod config;

use config::Config;

#[derive(Parser)]
#[command(name = "cost-estimator")]
#[command(about = "Estimate monthly cost and carbon of AWS resources")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check whether a resource type can be estimated
    Supports {
        resource_type: String,

        /// Region to check. Defaults to the compiled region.
        #[arg(short, long, default_value = "")]
        region: String,
    },

    /// Estimate one resource
    Estimate {
        /// Short code (ec2, rds, ...) or namespaced type (aws:ec2/instance:Instance)
        resource_type: String,

        /// Instance class, volume type or storage class
        #[arg(default_value = "")]
        sku: String,

        #[arg(short, long, default_value = "")]
        region: String,

        /// Usage tag as key=value. Repeatable.
        #[arg(short, long = "tag", value_parser = parse_tag)]
        tags: Vec<(String, String)>,

        /// Include the carbon estimate
        #[arg(short, long)]
        carbon: bool,

        /// Also list rightsizing recommendations
        #[arg(long)]
        recommend: bool,
    },

    /// Run a batch of recommendations from a JSON request
    Batch {
        /// Path to the request, or `-` for stdin
        #[arg(short, long)]
        input: PathBuf,
    },

    /// Build the catalog and print Prometheus metrics
    Metrics,
}

fn parse_tag(raw: &str) -> Result<(String, String), String> {
    match raw.split_once('=') {
        Some((key, value)) if !key.trim().is_empty() => Ok((key.trim().to_string(), value.to_string())),
        _ => Err(format!("expected key=value, got '{raw}'")),
    }
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn read_request(input: &PathBuf) -> Result<BatchRequest> {
    let raw = if input.as_os_str() == "-" {
        let mut buf = String::new();
        std::io::stdin().read_to_string(&mut buf)?;
        buf
    } else {
        std::fs::read_to_string(input).wrap_err_with(|| format!("reading {}", input.display()))?
    };
    serde_json::from_str(&raw).wrap_err("batch request is not valid JSON")
}

fn main() -> Result<()> {
    install_color_eyre();

    let config = Config::from_env()?;
    let environment = Environment::from_env();
    init_tracing(&environment);

    if config.metrics_enabled {
        if let Err(e) = observability::init_metrics() {
            warn!(error = %e, "Metrics recorder not installed");
        }
    }

    let cli = Cli::parse();
    let service = EstimationService::embedded(config.estimation);
    info!(region = domain_pricing::COMPILED_REGION, "Cost estimator ready");

    match cli.command {
        Commands::Supports {
            resource_type,
            region,
        } => print_json(&service.supports(&resource_type, &region))?,

        Commands::Estimate {
            resource_type,
            sku,
            region,
            tags,
            carbon,
            recommend,
        } => {
            let mut descriptor = ResourceDescriptor::new(&resource_type, &sku, &region);
            descriptor.tags = tags.into_iter().collect::<HashMap<_, _>>();

            if carbon {
                print_json(&service.estimate_cost_with_carbon(&descriptor)?)?;
            } else {
                print_json(&service.estimate_cost(&descriptor)?)?;
            }
            if recommend {
                print_json(&service.recommend(&descriptor)?)?;
            }
        }

        Commands::Batch { input } => {
            let request = read_request(&input)?;
            print_json(&service.estimate_batch(&request)?)?;
        }

        Commands::Metrics => {
            domain_pricing::PricingClient::embedded().ensure_ready()?;
            print!("{}", observability::render_metrics());
        }
    }

    Ok(())
}

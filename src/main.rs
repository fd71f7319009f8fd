//! tracegen
//!
//! Generates a synthetic three-span call tree once per second and exports the
//! spans plus one latency sample per iteration to a cloud observability
//! backend over OTLP.
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │                        tracegen                          │
//! ├──────────────────────────────────────────────────────────┤
//! │  ┌──────────┐    ┌────────────┐    ┌─────────────────┐   │
//! │  │  Config  │───▶│   Runner   │───▶│  OTLP exporters │   │
//! │  │ resolver │    │ (span tree)│    │ (traces+metrics)│   │
//! │  └──────────┘    └────────────┘    └─────────────────┘   │
//! └──────────────────────────────────────────────────────────┘
//! ```

use clap::Parser;
use tracing::{info, Level};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod config;
mod error;
mod runner;
mod telemetry;
mod workload;

use crate::config::Config;
use crate::error::Result;
use crate::telemetry::Telemetry;

// =============================================================================
// CLI Arguments
// =============================================================================

/// Synthetic span-tree and latency-metric generator
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Google Cloud project id (skips ambient credential discovery)
    #[arg(long)]
    project_id: Option<String>,

    /// OTLP/gRPC endpoint for span and metric export
    #[arg(
        long,
        env = "OTEL_EXPORTER_OTLP_ENDPOINT",
        default_value = "http://localhost:4317"
    )]
    otlp_endpoint: String,

    /// Seed for the workload RNG (defaults to OS entropy)
    #[arg(long, env = "TRACEGEN_SEED")]
    seed: Option<u64>,

    /// Stop after this many iterations (default: run forever)
    #[arg(long, env = "TRACEGEN_ITERATIONS")]
    iterations: Option<u64>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, env = "LOG_LEVEL", default_value = "info")]
    log_level: String,

    /// Output logs as JSON
    #[arg(long, env = "LOG_JSON")]
    log_json: bool,
}

// =============================================================================
// Main
// =============================================================================

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    init_logging(&args);

    info!("Starting tracegen");
    info!("  OTLP endpoint: {}", args.otlp_endpoint);
    if let Some(seed) = args.seed {
        info!("  RNG seed: {}", seed);
    }
    if let Some(n) = args.iterations {
        info!("  Iteration limit: {}", n);
    }

    // Ambient credentials first, GCP_PROJECT_ID fallback; missing both aborts
    let project_id = match args.project_id {
        Some(id) => id,
        None => config::resolve_project_id().await?,
    };
    info!("  Project id: {}", project_id);

    let config = Config {
        project_id,
        otlp_endpoint: args.otlp_endpoint,
        seed: args.seed,
        iterations: args.iterations,
    };

    let telemetry = Telemetry::init(&config.project_id, &config.otlp_endpoint)?;

    runner::run(&config, &telemetry).await?;

    telemetry.shutdown()?;
    info!("Shutdown complete");
    Ok(())
}

// =============================================================================
// Logging Setup
// =============================================================================

fn init_logging(args: &Args) {
    let level = match args.log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let filter = EnvFilter::from_default_env()
        .add_directive(level.into())
        .add_directive("tonic=warn".parse().unwrap())
        .add_directive("h2=warn".parse().unwrap())
        .add_directive("tower=warn".parse().unwrap());

    if args.log_json {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer())
            .init();
    }
}

//! Weisfeiler-Leman refinement CLI
//!
//! Reads an edge list, refines it to convergence and prints the JSON report.
//!
//! ## Configuration
//!
//! Environment variables:
//! - `WL_K`: refinement dimension, 1 or 2 (default: 1)
//! - `WL_SEEDING`: "uniform" or "degree" (default: uniform)
//! - `WL_MAX_ITERATIONS`: stop after this many iterations (default: run to convergence)
//! - `RUST_LOG`: Log level filter (default: info)
//! - `LOG_FORMAT`: "json" for structured logs, "pretty" for development (default: json)
//!
//! ## Usage
//!
//! ```bash
//! echo "[(1, 2), (2, 3)]" | WL_K=2 cargo run --bin wl-refine
//! cargo run --bin wl-refine -- graph.txt
//! ```

use std::io::Read;
use std::process::ExitCode;
use std::sync::Arc;
use std::time::Instant;

use tracing::{error, info};
use tracing_subscriber::{
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter,
};

use wl_kernel::{parse_edge_list, RefinementConfig, Refiner, Seeding};

/// Initialize the tracing subscriber with JSON or pretty format.
///
/// Logs go to stderr; stdout carries only the report.
fn init_tracing() {
    let log_format = std::env::var("LOG_FORMAT").unwrap_or_else(|_| "json".to_string());

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "wl_refine=info,wl_kernel=info".into());

    if log_format == "pretty" {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_target(true)
                    .with_span_events(FmtSpan::CLOSE),
            )
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .json()
                    .with_writer(std::io::stderr)
                    .with_target(true)
                    .with_current_span(true)
                    .flatten_event(true),
            )
            .init();
    }
}

/// Build the run config from `WL_*` environment variables.
fn config_from_env() -> Result<RefinementConfig, String> {
    let k = match std::env::var("WL_K") {
        Ok(raw) => raw
            .trim()
            .parse::<u8>()
            .map_err(|_| format!("WL_K must be 1 or 2, got {raw:?}"))?,
        Err(_) => 1,
    };
    let mut config = RefinementConfig::new(k).map_err(|e| e.to_string())?;

    if let Ok(raw) = std::env::var("WL_SEEDING") {
        let seeding = Seeding::from_str(raw.trim())
            .ok_or_else(|| format!("WL_SEEDING must be uniform or degree, got {raw:?}"))?;
        config = config.with_seeding(seeding);
    }

    if let Ok(raw) = std::env::var("WL_MAX_ITERATIONS") {
        let max = raw
            .trim()
            .parse::<u32>()
            .map_err(|_| format!("WL_MAX_ITERATIONS must be a non-negative integer, got {raw:?}"))?;
        config = config.with_max_iterations(max);
    }

    Ok(config)
}

fn read_input(path: Option<&str>) -> Result<String, String> {
    match path {
        Some(path) => {
            std::fs::read_to_string(path).map_err(|e| format!("Failed to read {path}: {e}"))
        }
        None => {
            let mut text = String::new();
            std::io::stdin()
                .read_to_string(&mut text)
                .map_err(|e| format!("Failed to read stdin: {e}"))?;
            Ok(text)
        }
    }
}

fn run() -> Result<(), String> {
    let config = config_from_env()?;
    let path = std::env::args().nth(1);
    let text = read_input(path.as_deref())?;

    let parsed = parse_edge_list(&text).map_err(|e| e.to_string())?;
    info!(
        source = path.as_deref().unwrap_or("stdin"),
        blocks = parsed.blocks.len(),
        nodes = parsed.graph.num_nodes(),
        edges = parsed.graph.num_edges(),
        "Loaded graph"
    );

    let started = Instant::now();
    let refiner = Refiner::new(Arc::new(parsed.graph), config);
    let report = refiner.run().map_err(|e| e.to_string())?;

    info!(
        k = report.config.dimension.k(),
        iterations = report.iterations,
        converged = report.converged,
        latency_ms = started.elapsed().as_millis() as u64,
        "Refinement finished"
    );

    let json = serde_json::to_string_pretty(&report).map_err(|e| e.to_string())?;
    println!("{json}");
    Ok(())
}

fn main() -> ExitCode {
    init_tracing();

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(message) => {
            error!(error = %message, "wl-refine failed");
            ExitCode::FAILURE
        }
    }
}

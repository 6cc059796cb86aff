//! Continuous field monitor.
//!
//! Runs the engine for a fixed number of ticks, optionally against synthetic
//! telemetry, logging each report and a summary every ten ticks. A JSON
//! session export can be written at the end.

use std::fs;
use std::path::PathBuf;
use std::thread;
use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use harmonic_field::{EngineConfig, FieldEngine, SyntheticTelemetry, TelemetrySource};

#[derive(Parser, Debug)]
#[command(
    name = "field-monitor",
    about = "Continuous harmonic field stability monitor"
)]
struct Args {
    /// Lattice resolution (cells per axis).
    #[arg(long, default_value = "5")]
    resolution: usize,

    /// Number of ticks to run.
    #[arg(long, default_value = "60")]
    ticks: u64,

    /// Delay between ticks in milliseconds.
    #[arg(long, default_value = "500")]
    interval_ms: u64,

    /// Sample synthetic telemetry each tick instead of modeled metrics.
    #[arg(long)]
    synthetic: bool,

    /// Seed for synthetic telemetry.
    #[arg(long, default_value = "7")]
    seed: u64,

    /// Write a JSON session export to this path when the run ends.
    #[arg(long)]
    export: Option<PathBuf>,

    /// Enable debug-level logging.
    #[arg(long)]
    verbose: bool,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let level = if args.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };
    let subscriber = FmtSubscriber::builder().with_max_level(level).finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let mut engine = FieldEngine::new(EngineConfig::new(args.resolution))?;
    let mut telemetry = args.synthetic.then(|| SyntheticTelemetry::new(args.seed));

    let mut corrections = 0u64;
    for _ in 0..args.ticks {
        let reading = telemetry.as_mut().and_then(|source| source.sample());
        let report = engine.tick(reading.as_ref())?;
        if report.correction_active {
            corrections += 1;
        }

        info!(
            tick = report.tick,
            instability = report.instability,
            strength = report.field_strength,
            correction = report.correction_active,
            "tick"
        );

        if report.tick % 10 == 0 {
            info!(
                tick = report.tick,
                corrections,
                entropy = report.entropy,
                phi_alignment = report.phi_alignment,
                "session summary"
            );
        }

        if args.interval_ms > 0 {
            thread::sleep(Duration::from_millis(args.interval_ms));
        }
    }

    if let Some(frequencies) = engine.active_frequencies() {
        info!(?frequencies, corrections, "final oscillator table");
    }

    if let Some(path) = &args.export {
        let json = engine.export_json()?;
        fs::write(path, json)
            .with_context(|| format!("writing session export to {}", path.display()))?;
        info!(path = %path.display(), "session export written");
    }

    Ok(())
}

//! centinela - one-shot sensor anomaly detection run.
//!
//! Simulates a batch of sensor telemetry, scores it with an isolation
//! forest, and prints the summary record as a single JSON object on
//! stdout for the invoking process to parse.
//!
//! Usage:
//!   centinela                          # 1000 samples, defaults
//!   centinela --samples 5000           # bigger batch
//!   centinela --seed 42                # reproducible run
//!   centinela --contamination 0.1 --trees 200 --subsample 512

use clap::Parser;
use std::process::ExitCode;

use centinela::DetectionEngine;

/// Simulate sensor telemetry and report its failure probability.
#[derive(Parser)]
#[command(name = "centinela")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Number of telemetry samples to simulate
    #[arg(long, default_value_t = 1000)]
    samples: usize,

    /// Assumed anomalous fraction, in (0, 1)
    #[arg(long, default_value_t = 0.05)]
    contamination: f32,

    /// Number of isolation trees
    #[arg(long, default_value_t = 100)]
    trees: usize,

    /// Per-tree subsample size (clamped to the batch size)
    #[arg(long, default_value_t = 256)]
    subsample: usize,

    /// Master random seed for a reproducible run
    #[arg(long)]
    seed: Option<u64>,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let mut engine = DetectionEngine::new()
        .with_contamination(cli.contamination)
        .with_n_trees(cli.trees)
        .with_subsample_size(cli.subsample);
    if let Some(seed) = cli.seed {
        engine = engine.with_random_state(seed);
    }

    let result = match engine.run(cli.samples) {
        Ok(result) => result,
        Err(e) => {
            eprintln!("centinela: {e}");
            return ExitCode::FAILURE;
        }
    };

    match serde_json::to_string(&result) {
        Ok(json) => {
            println!("{json}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("centinela: failed to serialize result: {e}");
            ExitCode::FAILURE
        }
    }
}

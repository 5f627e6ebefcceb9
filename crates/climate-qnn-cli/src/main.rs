//! Demo binary for the hybrid climate predictor.
//!
//! Builds a predictor, runs one seeded random batch through it and prints the
//! shapes, the first projection row and the quantum layer status.
//!
//! ## Usage
//!
//! ```bash
//! # Default demo: 10 rows of 10 features
//! cargo run -p climate-qnn-cli --bin climate-qnn
//!
//! # Custom width and batch, machine-readable output
//! cargo run -p climate-qnn-cli --bin climate-qnn -- --input-size 6 --batch-size 32 --json
//!
//! # Mean absolute error against the mock climate_test dataset
//! cargo run -p climate-qnn-cli --bin climate-qnn -- --validate
//! ```
//!
//! Configuration is layered: `--config` TOML file (or defaults), then
//! `CLIMATE_QNN_*` environment variables, then command-line flags.

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Parser;
use serde::Serialize;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use climate_qnn_core::{HybridPredictor, PredictorConfig};
use climate_qnn_test_utils::{
    load_dataset, mean_absolute_error, random_features, CLIMATE_TEST_DATASET,
    CLIMATE_TEST_FEATURES,
};

/// MAE above which `--validate` fails.
const MAE_THRESHOLD: f32 = 1.5;

/// Hybrid quantum/recurrent climate predictor demo.
#[derive(Parser, Debug)]
#[command(name = "climate-qnn")]
#[command(about = "Run the hybrid quantum/LSTM climate predictor on a random batch")]
struct Args {
    /// Feature width per row [default: 10].
    #[arg(long)]
    input_size: Option<usize>,

    /// Rows in the demo batch.
    #[arg(long, default_value = "10")]
    batch_size: usize,

    /// Seed for weights and the demo batch [default: 42].
    #[arg(long)]
    seed: Option<u64>,

    /// TOML configuration file.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Report mean absolute error against the climate_test dataset.
    #[arg(long)]
    validate: bool,

    /// Print the report as JSON.
    #[arg(long)]
    json: bool,

    /// Verbose output.
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Debug, Serialize)]
struct Report {
    input_shape: [usize; 2],
    output_shape: [usize; 2],
    first_row: Option<[f32; 4]>,
    quantum_layer: &'static str,
    parameters: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    validation: Option<Validation>,
}

#[derive(Debug, Serialize)]
struct Validation {
    dataset: &'static str,
    rows: usize,
    mae: f32,
    threshold: f32,
    passed: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let log_level = if args.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let config = load_config(&args)?;
    let seed = config.seed;
    let model = HybridPredictor::with_config(config).context("Failed to build predictor")?;

    let features = random_features(args.batch_size, model.input_size(), seed);
    let batch = model.batch_from_rows(&features)?;
    let result = model.predict(&batch)?;

    let validation = if args.validate {
        Some(validate(&model, seed)?)
    } else {
        None
    };

    let report = Report {
        input_shape: [args.batch_size, model.input_size()],
        output_shape: [result.shape().0, result.shape().1],
        first_row: result.rows().first().copied(),
        quantum_layer: model.quantum_layer().status(),
        parameters: model.parameter_count(),
        validation,
    };

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_report(&report);
    }

    if let Some(validation) = &report.validation {
        if !validation.passed {
            bail!(
                "Mean absolute error {:.4} exceeds threshold {}",
                validation.mae,
                validation.threshold
            );
        }
    }

    Ok(())
}

fn load_config(args: &Args) -> Result<PredictorConfig> {
    let mut config = match &args.config {
        Some(path) => PredictorConfig::from_file(path)?,
        None => PredictorConfig::default(),
    }
    .with_env_overrides();

    if let Some(input_size) = args.input_size {
        config.input_size = input_size;
    }
    if let Some(seed) = args.seed {
        config.seed = seed;
    }

    config.validate()?;
    Ok(config)
}

fn validate(model: &HybridPredictor, seed: u64) -> Result<Validation> {
    if model.input_size() != CLIMATE_TEST_FEATURES {
        bail!(
            "--validate needs --input-size {} to match the {} dataset, got {}",
            CLIMATE_TEST_FEATURES,
            CLIMATE_TEST_DATASET,
            model.input_size()
        );
    }

    let dataset = load_dataset(CLIMATE_TEST_DATASET, seed)?;
    let batch = model.batch_from_rows(&dataset.features)?;
    let predictions = model.predict(&batch)?;
    let mae = mean_absolute_error(&dataset.labels, predictions.rows())?;

    info!(dataset = CLIMATE_TEST_DATASET, rows = dataset.len(), mae, "Validation complete");

    Ok(Validation {
        dataset: CLIMATE_TEST_DATASET,
        rows: dataset.len(),
        mae,
        threshold: MAE_THRESHOLD,
        passed: mae < MAE_THRESHOLD,
    })
}

fn print_report(report: &Report) {
    println!("Input shape:   {:?}", report.input_shape);
    println!("Output shape:  {:?}", report.output_shape);
    match &report.first_row {
        Some(row) => println!("First output:  {:?}", row),
        None => println!("First output:  (empty batch)"),
    }
    println!("Quantum layer: {}", report.quantum_layer);
    println!("Parameters:    {}", report.parameters);

    if let Some(v) = &report.validation {
        println!();
        println!(
            "Validation on {} ({} rows): MAE {:.4} (threshold {}) {}",
            v.dataset,
            v.rows,
            v.mae,
            v.threshold,
            if v.passed { "PASS" } else { "FAIL" }
        );
    }
}

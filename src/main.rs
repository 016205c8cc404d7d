//! Command-line front end: train a model on a logic gate and query it.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use fnn::train::round_prediction;
use fnn::{train_until_converged, Gate, Network, NetworkConfig, TrainConfig};

#[derive(Parser)]
#[command(name = "fnn")]
#[command(about = "Single-hidden-layer perceptron trained on logic gates", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Model file to load and save
    #[arg(short, long, default_value = "model.json", global = true)]
    model: PathBuf,

    /// Network configuration (JSON); defaults to 2-5-1, lr 0.1, Sigmoid, MSE
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Increase log verbosity (-v debug, -vv trace); RUST_LOG takes precedence
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Train until every sample of the gate is classified correctly
    Train {
        /// Logic gate to learn (and, or, nand, nor, xor)
        #[arg(short, long, default_value = "xor")]
        gate: Gate,

        /// Give up after this many epochs
        #[arg(long, default_value = "1000000")]
        max_epochs: usize,

        /// Log progress every N epochs (0 disables)
        #[arg(long, default_value = "1000")]
        report_every: usize,

        /// Seed for weight initialization of a new model
        #[arg(long)]
        seed: Option<u64>,

        /// Also write the training report as JSON to this file
        #[arg(long)]
        report: Option<PathBuf>,
    },

    /// Run the model on two inputs and print the rounded output
    Test {
        #[arg(allow_negative_numbers = true)]
        a: f64,
        #[arg(allow_negative_numbers = true)]
        b: f64,
    },
}

fn init_logging(verbose: u8) {
    let default_level = match verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt().compact().with_env_filter(filter).init();
}

/// Loads the model, or builds a fresh one when the file is missing, empty or
/// unreadable as a model.
fn open_model(path: &Path, config: &NetworkConfig) -> Result<Network> {
    match Network::load_or_new(path, config) {
        Ok(network) => Ok(network),
        Err(e) if e.is_recoverable_decode() => {
            warn!(path = %path.display(), error = %e, "discarding unreadable model, starting fresh");
            Network::new(config).context("failed to construct network")
        }
        Err(e) => Err(e).with_context(|| format!("failed to open model {}", path.display())),
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let mut config = match &cli.config {
        Some(path) => NetworkConfig::load_json(path)
            .with_context(|| format!("failed to read config {}", path.display()))?,
        None => NetworkConfig::default(),
    };

    match cli.command {
        Commands::Train { gate, max_epochs, report_every, seed, report: report_path } => {
            if seed.is_some() {
                config.seed = seed;
            }
            let mut network = open_model(&cli.model, &config)?;
            let samples = gate.samples();

            info!(%gate, model = %cli.model.display(), "training");
            let report = train_until_converged(
                &mut network,
                &samples,
                &TrainConfig::new(max_epochs, report_every),
            )?;

            if report.converged {
                println!("Neural network trained successfully in {} epochs.", report.epochs);
            } else {
                println!(
                    "Stopped after {} epochs, accuracy {:.2}, loss {:.4}.",
                    report.epochs, report.final_accuracy, report.final_loss
                );
            }

            if let Some(path) = &report_path {
                report
                    .save_json(path)
                    .with_context(|| format!("failed to write report {}", path.display()))?;
            }

            network
                .save(&cli.model)
                .with_context(|| format!("failed to save model {}", cli.model.display()))?;
            println!("Trained model saved to {}.", cli.model.display());
        }
        Commands::Test { a, b } => {
            let network = open_model(&cli.model, &config)?;
            let output = network.feed_forward(&[a, b])?;
            println!("Input: [{a}, {b}] - Actual: {}", round_prediction(output[0]));
        }
    }

    Ok(())
}

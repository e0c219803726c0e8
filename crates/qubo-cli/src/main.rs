//! qubo Command-Line Interface
//!
//! Runs JSON circuit documents through the statevector simulator.
//!
//! ```text
//! qubo run bell.json --shots 2000 --seed 7
//! qubo run bell.json --json --noise depolarizing --noise-p 0.01
//! qubo draw bell.json
//! ```

#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

use clap::{Parser, Subcommand};
use console::style;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod commands;
mod config;

use commands::{draw, run, version};
use config::CliConfig;
use qubo_sim::{Kernel, NoiseChannel};

/// qubo - statevector quantum-circuit simulator
#[derive(Parser)]
#[command(name = "qubo")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// YAML configuration file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Simulate a circuit and print counts or probabilities
    Run {
        /// Circuit document (JSON)
        file: PathBuf,

        /// Number of measurement shots
        #[arg(short, long)]
        shots: Option<usize>,

        /// PRNG seed for reproducible sampling and noise
        #[arg(long)]
        seed: Option<u64>,

        /// Print a JSON object instead of a table
        #[arg(long)]
        json: bool,

        /// Noise channel (bit_flip, phase_flip, depolarizing, amplitude_damping)
        #[arg(long)]
        noise: Option<NoiseChannel>,

        /// Noise channel probability
        #[arg(long)]
        noise_p: Option<f64>,

        /// Single-qubit gate kernel (pairwise, tensor)
        #[arg(long)]
        kernel: Option<Kernel>,
    },

    /// Print an ASCII diagram of a circuit
    Draw {
        /// Circuit document (JSON)
        file: PathBuf,
    },

    /// Show version information
    Version,
}

fn log_filter(verbose: u8, configured: &str) -> String {
    match verbose {
        0 => configured.to_string(),
        1 => "info".to_string(),
        2 => "debug".to_string(),
        _ => "trace".to_string(),
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = match CliConfig::load(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{} {}", style("Error:").red().bold(), e);
            std::process::exit(1);
        }
    };

    // Setup logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(log_filter(cli.verbose, &config.logging.level)))
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    // Execute command
    let result = match cli.command {
        Commands::Run {
            file,
            shots,
            seed,
            json,
            noise,
            noise_p,
            kernel,
        } => {
            let options = run::RunOptions {
                shots,
                seed,
                noise,
                noise_p,
                kernel,
                json,
            };
            run::execute(&file, &options, config)
        }

        Commands::Draw { file } => draw::execute(&file),

        Commands::Version => {
            version::execute();
            Ok(())
        }
    };

    // Handle errors
    if let Err(e) = result {
        eprintln!("{} {:#}", style("Error:").red().bold(), e);
        std::process::exit(1);
    }

    Ok(())
}

//! Run command implementation.

use anyhow::{Context, Result};
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::Path;
use tracing::info;

use qubo_sim::{Kernel, NoiseChannel, RunOutcome, StatevectorSimulator};

use super::common::{load_circuit, print_probabilities, print_results};
use crate::config::CliConfig;

/// Flags given to `qubo run`; each one overrides the configuration.
#[derive(Debug, Clone, Default)]
pub struct RunOptions {
    pub shots: Option<usize>,
    pub seed: Option<u64>,
    pub noise: Option<NoiseChannel>,
    pub noise_p: Option<f64>,
    pub kernel: Option<Kernel>,
    pub json: bool,
}

impl RunOptions {
    /// Layer these flags over `config` and revalidate.
    pub fn apply(&self, mut config: CliConfig) -> Result<CliConfig> {
        if let Some(shots) = self.shots {
            config.simulation.shots = shots;
        }
        if let Some(seed) = self.seed {
            config.simulation.seed = Some(seed);
        }
        if let Some(kernel) = self.kernel {
            config.simulation.kernel = kernel;
        }
        if let Some(channel) = self.noise {
            config.noise.channel = Some(channel.name().to_string());
        }
        if let Some(p) = self.noise_p {
            config.noise.p = p;
        }
        config.validate()?;
        Ok(config)
    }
}

/// Execute the run command.
pub fn execute(input: &Path, options: &RunOptions, config: CliConfig) -> Result<()> {
    let config = options.apply(config)?;
    let shots = config.simulation.shots;

    let circuit = load_circuit(input)?;
    info!(
        qubits = circuit.num_qubits(),
        gates = circuit.len(),
        shots,
        "Loaded circuit"
    );

    let noise = config.noise_hook().context("Invalid noise model")?;

    if !options.json {
        println!(
            "{} Running {} ({} shots)",
            style("→").cyan().bold(),
            style(input.display()).green(),
            shots
        );
        println!(
            "  Loaded: {} qubits, {} gates, depth {}",
            circuit.num_qubits(),
            circuit.len(),
            circuit.depth()
        );
        if let Some(channel) = &config.noise.channel {
            println!(
                "  Noise:  {} (p = {})",
                style(channel).yellow(),
                config.noise.p
            );
        }
    }

    let mut simulator =
        StatevectorSimulator::new(&circuit).with_config(config.simulator_config());
    if let Some(seed) = config.simulation.seed {
        simulator = simulator.with_seed(seed);
    }
    if let Some(noise) = noise {
        simulator = simulator.with_noise_hook(noise);
    }

    let spinner = (!options.json).then(|| {
        let spinner = ProgressBar::new_spinner();
        if let Ok(template) = ProgressStyle::default_spinner().template("{spinner:.cyan} {msg}") {
            spinner.set_style(template);
        }
        spinner.set_message("Simulating...");
        spinner.enable_steady_tick(std::time::Duration::from_millis(100));
        spinner
    });

    let outcome = simulator.run(shots);
    if let Some(spinner) = spinner {
        spinner.finish_and_clear();
    }
    let outcome = outcome.context("Simulation failed")?;

    if options.json {
        println!("{}", serde_json::to_string(&outcome)?);
        return Ok(());
    }

    match &outcome {
        RunOutcome::Counts(counts) => print_results(counts),
        RunOutcome::Statevector(_) => {
            if let Some(probabilities) = outcome.probabilities() {
                print_probabilities(&probabilities);
            }
        }
    }

    Ok(())
}

//! Configuration for the `qubo` command-line tool.
//!
//! Settings are layered, highest precedence first:
//! 1. Command-line flags
//! 2. Environment variables (with `QUBO_` prefix)
//! 3. Configuration file (YAML, `--config`)
//! 4. Default values
//!
//! ```yaml
//! simulation:
//!   shots: 2048
//!   seed: 7
//!   kernel: tensor
//! noise:
//!   channel: depolarizing
//!   p: 0.01
//! logging:
//!   level: info
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::str::FromStr;
use thiserror::Error;

use qubo_sim::{
    ChannelNoise, DEFAULT_MAX_QUBITS, Kernel, MAX_SUPPORTED_QUBITS, NoiseChannel, NoiseError,
    SimulatorConfig,
};

/// Complete CLI configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CliConfig {
    /// Simulation settings
    #[serde(default)]
    pub simulation: SimulationConfig,

    /// Noise model
    #[serde(default)]
    pub noise: NoiseConfig,

    /// Logging settings
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Simulation settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationConfig {
    /// Measurement shots
    #[serde(default = "default_shots")]
    pub shots: usize,

    /// PRNG seed; entropy-seeded when absent
    #[serde(default)]
    pub seed: Option<u64>,

    /// Widest circuit accepted
    #[serde(default = "default_max_qubits")]
    pub max_qubits: usize,

    /// Single-qubit gate kernel: "pairwise" or "tensor"
    #[serde(default)]
    pub kernel: Kernel,
}

/// Noise model applied after every gate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NoiseConfig {
    /// Channel name (bit_flip, phase_flip, depolarizing, amplitude_damping); none when absent
    #[serde(default)]
    pub channel: Option<String>,

    /// Channel probability
    #[serde(default = "default_noise_p")]
    pub p: f64,
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level: "trace", "debug", "info", "warn", "error"
    #[serde(default = "default_log_level")]
    pub level: String,
}

// Default value functions
fn default_shots() -> usize {
    1024
}

fn default_max_qubits() -> usize {
    DEFAULT_MAX_QUBITS
}

fn default_noise_p() -> f64 {
    0.05
}

fn default_log_level() -> String {
    "warn".to_string()
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            shots: default_shots(),
            seed: None,
            max_qubits: default_max_qubits(),
            kernel: Kernel::default(),
        }
    }
}

impl Default for NoiseConfig {
    fn default() -> Self {
        Self {
            channel: None,
            p: default_noise_p(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

impl CliConfig {
    /// Load configuration from a YAML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::IoError(format!("{}: {e}", path.display())))?;

        let config: CliConfig = serde_yaml_ng::from_str(&contents)
            .map_err(|e| ConfigError::ParseError(e.to_string()))?;

        config.validate()?;
        Ok(config)
    }

    /// Load configuration: file (if any), then `QUBO_*` environment overrides.
    pub fn load(config_file: Option<&Path>) -> Result<Self, ConfigError> {
        Self::load_with(config_file, |key| std::env::var(key).ok())
    }

    /// [`load`](Self::load) with an explicit environment lookup.
    pub fn load_with<F>(config_file: Option<&Path>, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let config = match config_file {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };

        let config = config.merge_env_from(lookup)?;
        config.validate()?;
        Ok(config)
    }

    /// Apply overrides from an environment lookup.
    ///
    /// Only keys the lookup returns override the current values. A value that
    /// does not parse is a validation error rather than silently skipped.
    pub fn merge_env_from<F>(mut self, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        // Simulation
        if let Some(v) = lookup("QUBO_SHOTS") {
            self.simulation.shots = parse_env("QUBO_SHOTS", &v)?;
        }
        if let Some(v) = lookup("QUBO_SEED") {
            self.simulation.seed = Some(parse_env("QUBO_SEED", &v)?);
        }
        if let Some(v) = lookup("QUBO_MAX_QUBITS") {
            self.simulation.max_qubits = parse_env("QUBO_MAX_QUBITS", &v)?;
        }
        if let Some(v) = lookup("QUBO_KERNEL") {
            self.simulation.kernel = parse_env("QUBO_KERNEL", &v)?;
        }

        // Noise
        if let Some(v) = lookup("QUBO_NOISE") {
            self.noise.channel = match v.trim() {
                "" | "none" => None,
                name => Some(name.to_string()),
            };
        }
        if let Some(v) = lookup("QUBO_NOISE_P") {
            self.noise.p = parse_env("QUBO_NOISE_P", &v)?;
        }

        // Logging
        if let Some(v) = lookup("QUBO_LOG_LEVEL") {
            self.logging.level = v;
        }

        Ok(self)
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.simulation.shots == 0 {
            return Err(ConfigError::ValidationError(
                "shots must be at least 1".to_string(),
            ));
        }

        if !(1..=MAX_SUPPORTED_QUBITS).contains(&self.simulation.max_qubits) {
            return Err(ConfigError::ValidationError(format!(
                "max_qubits must be in [1, {MAX_SUPPORTED_QUBITS}], got {}",
                self.simulation.max_qubits
            )));
        }

        if !(0.0..=1.0).contains(&self.noise.p) {
            return Err(ConfigError::ValidationError(format!(
                "noise.p must be in [0, 1], got {}",
                self.noise.p
            )));
        }

        if let Some(channel) = &self.noise.channel {
            channel
                .parse::<NoiseChannel>()
                .map_err(|e| ConfigError::ValidationError(e.to_string()))?;
        }

        match self.logging.level.as_str() {
            "trace" | "debug" | "info" | "warn" | "error" => {}
            other => {
                return Err(ConfigError::ValidationError(format!(
                    "Invalid log level: {other}"
                )));
            }
        }

        Ok(())
    }

    /// Simulator settings derived from this configuration.
    pub fn simulator_config(&self) -> SimulatorConfig {
        SimulatorConfig::default()
            .with_max_qubits(self.simulation.max_qubits)
            .with_kernel(self.simulation.kernel)
    }

    /// Noise hook for the configured channel, if any.
    pub fn noise_hook(&self) -> Result<Option<ChannelNoise>, NoiseError> {
        let Some(name) = &self.noise.channel else {
            return Ok(None);
        };
        let channel = NoiseChannel::from_str(name)?;
        ChannelNoise::new()
            .with_channel(channel, self.noise.p)
            .map(Some)
    }
}

fn parse_env<T: FromStr>(key: &str, value: &str) -> Result<T, ConfigError>
where
    T::Err: std::fmt::Display,
{
    value
        .trim()
        .parse()
        .map_err(|e| ConfigError::ValidationError(format!("Invalid {key}='{value}': {e}")))
}

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    IoError(String),

    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("Validation error: {0}")]
    ValidationError(String),
}

//! Simulator configuration.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Default qubit cap. A 24-qubit statevector is 256 MiB.
pub const DEFAULT_MAX_QUBITS: usize = 24;

/// Hard ceiling on any qubit cap. A 32-qubit statevector is 64 GiB.
pub const MAX_SUPPORTED_QUBITS: usize = 32;

fn default_max_qubits() -> usize {
    DEFAULT_MAX_QUBITS
}

/// Routine used to apply single-qubit unitaries.
///
/// Both kernels produce the same amplitudes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Kernel {
    /// Update index pairs that differ only in the target bit, in place.
    #[default]
    Pairwise,
    /// Reshape into a `[2; n]` tensor and contract the target axis.
    Tensor,
}

impl fmt::Display for Kernel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Kernel::Pairwise => write!(f, "pairwise"),
            Kernel::Tensor => write!(f, "tensor"),
        }
    }
}

impl FromStr for Kernel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "pairwise" => Ok(Kernel::Pairwise),
            "tensor" => Ok(Kernel::Tensor),
            other => Err(format!(
                "Unknown kernel: '{other}'. Available: pairwise, tensor"
            )),
        }
    }
}

/// Tunables for a [`StatevectorSimulator`](crate::StatevectorSimulator).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimulatorConfig {
    /// Widest circuit the simulator accepts. Values above
    /// [`MAX_SUPPORTED_QUBITS`] are treated as that ceiling.
    #[serde(default = "default_max_qubits")]
    pub max_qubits: usize,

    /// Single-qubit gate kernel.
    #[serde(default)]
    pub kernel: Kernel,
}

impl SimulatorConfig {
    /// Set the qubit cap.
    #[must_use]
    pub fn with_max_qubits(mut self, max_qubits: usize) -> Self {
        self.max_qubits = max_qubits;
        self
    }

    /// The cap actually enforced: `max_qubits` bounded by
    /// [`MAX_SUPPORTED_QUBITS`].
    pub fn effective_max_qubits(&self) -> usize {
        self.max_qubits.min(MAX_SUPPORTED_QUBITS)
    }

    /// Set the kernel.
    #[must_use]
    pub fn with_kernel(mut self, kernel: Kernel) -> Self {
        self.kernel = kernel;
        self
    }
}

impl Default for SimulatorConfig {
    fn default() -> Self {
        Self {
            max_qubits: DEFAULT_MAX_QUBITS,
            kernel: Kernel::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = SimulatorConfig::default();
        assert_eq!(config.max_qubits, 24);
        assert_eq!(config.kernel, Kernel::Pairwise);
    }

    #[test]
    fn test_effective_max_qubits_is_bounded() {
        let config = SimulatorConfig::default().with_max_qubits(64);
        assert_eq!(config.max_qubits, 64);
        assert_eq!(config.effective_max_qubits(), MAX_SUPPORTED_QUBITS);
        assert_eq!(SimulatorConfig::default().effective_max_qubits(), 24);
    }

    #[test]
    fn test_kernel_parse() {
        assert_eq!("tensor".parse::<Kernel>().unwrap(), Kernel::Tensor);
        assert_eq!("Pairwise".parse::<Kernel>().unwrap(), Kernel::Pairwise);
        assert!("einsum".parse::<Kernel>().is_err());
        assert_eq!(Kernel::Tensor.to_string(), "tensor");
    }

    #[test]
    fn test_deserialize_partial() {
        let config: SimulatorConfig = serde_json::from_str(r#"{"kernel": "tensor"}"#).unwrap();
        assert_eq!(config.kernel, Kernel::Tensor);
        assert_eq!(config.max_qubits, DEFAULT_MAX_QUBITS);
    }
}

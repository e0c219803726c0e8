//! Error types for the simulation crate.

use thiserror::Error;

/// Errors that abort a simulation run.
///
/// A run that fails returns no partial state.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SimError {
    /// The circuit contains a gate the engine cannot execute.
    #[error("Unsupported gate '{name}' at position {index}")]
    UnsupportedGate {
        /// Gate name as written in the circuit.
        name: String,
        /// Position of the gate in the circuit.
        index: usize,
    },

    /// `shots` must be at least 1.
    #[error("shots must be at least 1, got {0}")]
    InvalidShots(usize),

    /// Circuit exceeds the configured qubit cap.
    #[error("Circuit has {num_qubits} qubits but simulator only supports {max_qubits}")]
    CircuitTooLarge {
        /// Qubits in the circuit.
        num_qubits: usize,
        /// Configured cap.
        max_qubits: usize,
    },

    /// Measurement distribution cannot be sampled.
    #[error("Cannot sample measurement outcomes: {0}")]
    Sampling(String),

    /// Tensor reshaping failed.
    #[error("Tensor reshape failed: {0}")]
    Shape(#[from] ndarray::ShapeError),
}

/// Result type for simulation operations.
pub type SimResult<T> = Result<T, SimError>;

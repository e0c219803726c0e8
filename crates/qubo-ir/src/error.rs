//! Error types for the IR crate.

use thiserror::Error;

/// Errors raised while building a circuit.
///
/// Every variant names the constraint that a gate or circuit violated, so the
/// caller can fix its input. None of these are raised at simulation time.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum IrError {
    /// A circuit must have at least one qubit.
    #[error("Circuit must have at least one qubit, got {0}")]
    InvalidQubitCount(usize),

    /// Qubit index outside `[0, num_qubits)`.
    #[error("Qubit {qubit} out of range for {num_qubits}-qubit circuit (gate: {gate_name})")]
    QubitOutOfRange {
        /// The offending qubit index.
        qubit: usize,
        /// Number of qubits in the circuit.
        num_qubits: usize,
        /// Name of the gate being added.
        gate_name: String,
    },

    /// Gate requires a different number of target qubits.
    #[error("Gate '{gate_name}' requires {expected} target qubit(s), got {got}")]
    QubitCountMismatch {
        /// Name of the gate.
        gate_name: String,
        /// Expected number of targets.
        expected: usize,
        /// Number of targets provided.
        got: usize,
    },

    /// Same qubit used twice in one gate.
    #[error("Duplicate qubit {qubit} in gate '{gate_name}'")]
    DuplicateQubit {
        /// The duplicated qubit.
        qubit: usize,
        /// Name of the gate.
        gate_name: String,
    },

    /// Rotation gate added without an angle.
    #[error("Rotation gate '{gate_name}' requires an angle parameter")]
    MissingParameter {
        /// Name of the gate.
        gate_name: String,
    },

    /// Rotation gate added with more than one angle.
    #[error("Gate '{gate_name}' takes {expected} parameter(s), got {got}")]
    ParameterCountMismatch {
        /// Name of the gate.
        gate_name: String,
        /// Expected number of parameters.
        expected: usize,
        /// Number of parameters provided.
        got: usize,
    },

    /// Gate parameter is NaN or infinite.
    #[error("Gate '{gate_name}' has non-finite parameter {value}")]
    NonFiniteParameter {
        /// Name of the gate.
        gate_name: String,
        /// The offending value.
        value: f64,
    },

    /// Circuit document could not be parsed.
    #[error("Invalid circuit document: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for IR operations.
pub type IrResult<T> = Result<T, IrError>;

//! qubo Circuit Model
//!
//! This crate provides the gate and circuit types consumed by the
//! `qubo-sim` statevector engine.
//!
//! # Overview
//!
//! A [`Circuit`] is a fixed number of qubits plus an ordered, append-only list
//! of [`Gate`]s. Gates are validated when they are added: target counts,
//! qubit ranges and rotation parameters are all checked up front, so
//! simulation never has to.
//!
//! Qubit `k` corresponds to bit `k` of a basis-state index (qubit 0 is the
//! least-significant bit).
//!
//! # Example: Building a Bell State
//!
//! ```rust
//! use qubo_ir::Circuit;
//!
//! let mut circuit = Circuit::new(2).unwrap();
//! circuit.h(0).unwrap();
//! circuit.add_gate("CNOT", &[0, 1], &[]).unwrap();
//! circuit.measure(0).unwrap();
//!
//! assert_eq!(circuit.num_qubits(), 2);
//! assert_eq!(circuit.len(), 3);
//! ```
//!
//! # Supported Gates
//!
//! | Gate | Qubits | Params | Description |
//! |------|--------|--------|-------------|
//! | `H` | 1 | 0 | Hadamard gate |
//! | `X`, `Y`, `Z` | 1 | 0 | Pauli gates |
//! | `S`, `T` | 1 | 0 | Phase gates |
//! | `RX`, `RY`, `RZ` | 1 | 1 | Rotation gates (radians) |
//! | `CNOT` (`CX`) | 2 | 0 | Controlled-NOT, `[control, target]` |
//! | `SWAP` | 2 | 0 | SWAP gate |
//! | `M` (`Measure`) | 1 | 0 | Sample the whole register |

pub mod circuit;
pub mod document;
pub mod error;
pub mod gate;

pub use circuit::Circuit;
pub use document::{CircuitSpec, GateSpec};
pub use error::{IrError, IrResult};
pub use gate::{DEFAULT_ROTATION_ANGLE, Gate, GateKind};

//! qubo Statevector Simulation Engine
//!
//! This crate simulates [`qubo_ir::Circuit`]s by evolving the full vector of
//! `2^n` complex amplitudes.
//!
//! # Overview
//!
//! - [`StatevectorSimulator`] runs a circuit from |0…0⟩. The first
//!   measurement samples `shots` outcomes and ends the run; without one the
//!   final amplitudes are returned.
//! - Single-qubit gates use one of two equivalent [`Kernel`]s: in-place index
//!   pairs, or an `ndarray` tensor contraction over the target axis.
//! - An optional [`NoiseHook`] runs after every non-measurement gate with the
//!   simulator's own PRNG, so seeded noisy runs are reproducible.
//!
//! Basis-state labels are fixed-width binary strings with qubit 0 as the
//! rightmost character.
//!
//! # Example
//!
//! ```rust
//! use qubo_ir::Circuit;
//! use qubo_sim::{ChannelNoise, NoiseChannel, StatevectorSimulator};
//!
//! let circuit = Circuit::bell().unwrap();
//! let noise = ChannelNoise::new()
//!     .with_channel(NoiseChannel::PhaseFlip, 0.01)
//!     .unwrap();
//!
//! let outcome = StatevectorSimulator::new(&circuit)
//!     .with_seed(42)
//!     .with_noise_hook(noise)
//!     .run(1024)
//!     .unwrap();
//!
//! assert_eq!(outcome.counts().unwrap().total_shots(), 1024);
//! ```

pub mod config;
pub mod counts;
pub mod error;
pub mod noise;
pub mod simulator;
pub mod statevector;
pub mod unitary;

pub use config::{DEFAULT_MAX_QUBITS, Kernel, MAX_SUPPORTED_QUBITS, SimulatorConfig};
pub use counts::Counts;
pub use error::{SimError, SimResult};
pub use noise::{ChannelNoise, NoiseChannel, NoiseError, NoiseHook};
pub use simulator::{RunOutcome, StatevectorSimulator};
pub use statevector::{Statevector, basis_label};

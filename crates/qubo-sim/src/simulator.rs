//! The statevector simulator.

use num_complex::Complex64;
use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::{Serialize, Serializer};
use std::collections::BTreeMap;
use tracing::{debug, instrument, trace, warn};

use qubo_ir::{Circuit, Gate, GateKind};

use crate::config::SimulatorConfig;
use crate::counts::Counts;
use crate::error::{SimError, SimResult};
use crate::noise::NoiseHook;
use crate::statevector::{Statevector, basis_label};
use crate::unitary::gate_matrix;

/// Result of [`StatevectorSimulator::run`].
#[derive(Debug, Clone, PartialEq)]
pub enum RunOutcome {
    /// The circuit had no measurement; final amplitudes, length `2^n`.
    Statevector(Vec<Complex64>),
    /// The circuit was measured; sampled outcome tallies.
    Counts(Counts),
}

impl RunOutcome {
    /// Counts if this run measured.
    pub fn counts(&self) -> Option<&Counts> {
        match self {
            RunOutcome::Counts(counts) => Some(counts),
            RunOutcome::Statevector(_) => None,
        }
    }

    /// Amplitudes if this run did not measure.
    pub fn statevector(&self) -> Option<&[Complex64]> {
        match self {
            RunOutcome::Statevector(amplitudes) => Some(amplitudes),
            RunOutcome::Counts(_) => None,
        }
    }

    /// Basis-state probabilities `|amp|²` keyed by label, if this run did not
    /// measure.
    pub fn probabilities(&self) -> Option<BTreeMap<String, f64>> {
        let amplitudes = self.statevector()?;
        let num_qubits = amplitudes.len().trailing_zeros() as usize;
        Some(
            amplitudes
                .iter()
                .enumerate()
                .map(|(i, amp)| (basis_label(i, num_qubits), amp.norm_sqr()))
                .collect(),
        )
    }

    /// Check if this run measured.
    pub fn is_counts(&self) -> bool {
        matches!(self, RunOutcome::Counts(_))
    }
}

#[derive(Serialize)]
#[serde(rename_all = "snake_case")]
enum Payload<'a> {
    Counts(&'a Counts),
    Probabilities(BTreeMap<String, f64>),
}

impl Serialize for RunOutcome {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let payload = match self {
            RunOutcome::Counts(counts) => Payload::Counts(counts),
            RunOutcome::Statevector(_) => {
                Payload::Probabilities(self.probabilities().unwrap_or_default())
            }
        };
        payload.serialize(serializer)
    }
}

/// Statevector simulator over a borrowed circuit.
///
/// Each instance owns its PRNG. Construct with [`with_seed`](Self::with_seed)
/// for reproducible sampling and noise.
///
/// ```rust
/// use qubo_ir::Circuit;
/// use qubo_sim::StatevectorSimulator;
///
/// let mut circuit = Circuit::new(1).unwrap();
/// circuit.x(0).unwrap().measure(0).unwrap();
///
/// let outcome = StatevectorSimulator::new(&circuit)
///     .with_seed(7)
///     .run(100)
///     .unwrap();
/// assert_eq!(outcome.counts().unwrap().get("1"), 100);
/// ```
pub struct StatevectorSimulator<'a> {
    circuit: &'a Circuit,
    noise_hook: Option<Box<dyn NoiseHook + 'a>>,
    rng: StdRng,
    config: SimulatorConfig,
}

impl<'a> StatevectorSimulator<'a> {
    /// Create a noiseless simulator seeded from OS entropy.
    pub fn new(circuit: &'a Circuit) -> Self {
        Self {
            circuit,
            noise_hook: None,
            rng: StdRng::from_entropy(),
            config: SimulatorConfig::default(),
        }
    }

    /// Reseed the PRNG.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = StdRng::seed_from_u64(seed);
        self
    }

    /// Install a noise hook, called after every non-measurement gate.
    #[must_use]
    pub fn with_noise_hook(mut self, hook: impl NoiseHook + 'a) -> Self {
        self.noise_hook = Some(Box::new(hook));
        self
    }

    /// Replace the configuration.
    #[must_use]
    pub fn with_config(mut self, config: SimulatorConfig) -> Self {
        self.config = config;
        self
    }

    /// The circuit being simulated.
    pub fn circuit(&self) -> &Circuit {
        self.circuit
    }

    /// Active configuration.
    pub fn config(&self) -> &SimulatorConfig {
        &self.config
    }

    /// Simulate the circuit.
    ///
    /// Gates run in order from |0…0⟩. The first measurement samples `shots`
    /// outcomes from the current state and ends the run; gates after it are
    /// never applied. Without a measurement the final amplitudes are
    /// returned and `shots` only has to be non-zero.
    #[instrument(
        skip(self),
        fields(
            qubits = self.circuit.num_qubits(),
            gates = self.circuit.len(),
            kernel = %self.config.kernel,
        )
    )]
    pub fn run(&mut self, shots: usize) -> SimResult<RunOutcome> {
        if shots == 0 {
            return Err(SimError::InvalidShots(shots));
        }
        let num_qubits = self.circuit.num_qubits();
        let max_qubits = self.config.effective_max_qubits();
        if num_qubits > max_qubits {
            return Err(SimError::CircuitTooLarge {
                num_qubits,
                max_qubits,
            });
        }

        let circuit = self.circuit;
        let mut state = Statevector::new(num_qubits)?;

        for (index, gate) in circuit.gates().iter().enumerate() {
            let Some(kind) = gate.kind() else {
                return Err(SimError::UnsupportedGate {
                    name: gate.name().to_string(),
                    index,
                });
            };

            if kind.is_measurement() {
                debug!(index, shots, "Measuring; remaining gates skipped");
                let counts = state.sample_counts(shots, &mut self.rng)?;
                return Ok(RunOutcome::Counts(counts));
            }

            trace!(index, gate = %gate, "Applying gate");
            self.apply_gate(&mut state, gate, kind)?;
            self.apply_noise(&mut state, gate, index);
        }

        debug!(norm = state.norm_sqr(), "Run finished without measurement");
        Ok(RunOutcome::Statevector(state.into_amplitudes()))
    }

    fn apply_gate(&self, state: &mut Statevector, gate: &Gate, kind: GateKind) -> SimResult<()> {
        let targets = gate.targets();
        match kind {
            GateKind::Cnot => state.apply_cnot(targets[0], targets[1]),
            GateKind::Swap => state.apply_swap(targets[0], targets[1]),
            _ => {
                if let Some(matrix) = gate_matrix(kind, gate.angle()) {
                    state.apply_unitary(&matrix, targets[0], self.config.kernel)?;
                }
            }
        }
        Ok(())
    }

    fn apply_noise(&mut self, state: &mut Statevector, gate: &Gate, index: usize) {
        let Some(hook) = &self.noise_hook else {
            return;
        };
        let num_qubits = state.num_qubits();
        match hook.apply(state.amplitudes(), gate, &mut self.rng) {
            Ok(amplitudes) => match Statevector::from_amplitudes(num_qubits, amplitudes) {
                Some(noisy) => *state = noisy,
                None => warn!(index, gate = %gate, "Noise hook returned a state of the wrong length; ignoring"),
            },
            Err(e) => warn!(index, gate = %gate, error = %e, "Noise hook failed; keeping pre-noise state"),
        }
    }
}

//! Simplified noise channels and the noise-hook strategy.
//!
//! The four channels here act directly on amplitudes. They are cheap
//! stand-ins for decoherence, not Kraus-operator channels: they do not act on
//! a density matrix, and `amplitude_damping` does not preserve the norm.
//!
//! | Channel             | Effect on `target`                                        |
//! |---------------------|-----------------------------------------------------------|
//! | `bit_flip`          | per index, swap with the bit-flipped partner w.p. `p`     |
//! | `phase_flip`        | per index with the bit set, negate w.p. `p`               |
//! | `depolarizing`      | w.p. `p`, one of X / Y / Z built from the two flips       |
//! | `amplitude_damping` | per index with the bit set, move amplitude to bit-clear   |
//!
//! Channels are reached through a [`NoiseHook`], which the simulator calls
//! after every non-measurement gate.

use num_complex::Complex64;
use rand::{Rng, RngCore};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use qubo_ir::Gate;

/// Errors from noise configuration or a failing hook.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum NoiseError {
    /// Probability outside `[0, 1]`.
    #[error("Noise probability must be in [0, 1], got {0}")]
    InvalidProbability(f64),

    /// Channel name not recognised.
    #[error("Unknown noise channel: '{0}'. Available: bit_flip, phase_flip, depolarizing, amplitude_damping")]
    UnknownChannel(String),

    /// A hook could not produce a new state.
    #[error("Noise hook failed: {0}")]
    Hook(String),
}

// =============================================================================
// Channels
// =============================================================================

/// Bit-flip noise on `target`.
///
/// Indices are visited in ascending order; each one independently swaps the
/// working amplitude at `i` with the one at `i ^ (1 << target)` with
/// probability `p`. Both members of a pair are visited, so at `p = 1` every
/// pair is exchanged twice and the state comes back unchanged.
pub fn bit_flip<R: Rng + ?Sized>(
    state: &[Complex64],
    p: f64,
    target: usize,
    rng: &mut R,
) -> Vec<Complex64> {
    let mask = 1 << target;
    let mut out = state.to_vec();
    for i in 0..out.len() {
        if rng.r#gen::<f64>() < p {
            out.swap(i, i ^ mask);
        }
    }
    out
}

/// Phase-flip noise on `target`: negate each amplitude whose target bit is
/// set, independently with probability `p`.
pub fn phase_flip<R: Rng + ?Sized>(
    state: &[Complex64],
    p: f64,
    target: usize,
    rng: &mut R,
) -> Vec<Complex64> {
    let mask = 1 << target;
    let mut out = state.to_vec();
    for (i, amp) in out.iter_mut().enumerate() {
        if i & mask != 0 && rng.r#gen::<f64>() < p {
            *amp = -*amp;
        }
    }
    out
}

/// Depolarizing noise on `target`.
///
/// With probability `p` one of X, Y, Z is picked uniformly. X is
/// `bit_flip(1.0)`, Z is `phase_flip(1.0)` and Y is the bit flip followed by
/// the phase flip, scaled by `i`.
pub fn depolarizing<R: Rng + ?Sized>(
    state: &[Complex64],
    p: f64,
    target: usize,
    rng: &mut R,
) -> Vec<Complex64> {
    if rng.r#gen::<f64>() >= p {
        return state.to_vec();
    }
    match rng.gen_range(0..3) {
        0 => bit_flip(state, 1.0, target, rng),
        1 => {
            let flipped = bit_flip(state, 1.0, target, rng);
            phase_flip(&flipped, 1.0, target, rng)
                .into_iter()
                .map(|amp| amp * Complex64::i())
                .collect()
        }
        _ => phase_flip(state, 1.0, target, rng),
    }
}

/// Amplitude damping on `target`.
///
/// Each amplitude whose target bit is set is, with probability `p`, added
/// into the partner with the bit cleared and then zeroed. Lossy: the result
/// is generally not normalized.
pub fn amplitude_damping<R: Rng + ?Sized>(
    state: &[Complex64],
    p: f64,
    target: usize,
    rng: &mut R,
) -> Vec<Complex64> {
    let mask = 1 << target;
    let mut out = state.to_vec();
    for i in 0..out.len() {
        if i & mask != 0 && rng.r#gen::<f64>() < p {
            let j = i & !mask;
            let val = out[i];
            out[j] += val;
            out[i] = Complex64::new(0.0, 0.0);
        }
    }
    out
}

/// The four built-in channels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NoiseChannel {
    /// See [`bit_flip`].
    BitFlip,
    /// See [`phase_flip`].
    PhaseFlip,
    /// See [`depolarizing`].
    Depolarizing,
    /// See [`amplitude_damping`].
    AmplitudeDamping,
}

impl NoiseChannel {
    /// Snake-case name of this channel.
    pub fn name(&self) -> &'static str {
        match self {
            NoiseChannel::BitFlip => "bit_flip",
            NoiseChannel::PhaseFlip => "phase_flip",
            NoiseChannel::Depolarizing => "depolarizing",
            NoiseChannel::AmplitudeDamping => "amplitude_damping",
        }
    }

    /// Run this channel on `target`.
    pub fn apply<R: Rng + ?Sized>(
        &self,
        state: &[Complex64],
        p: f64,
        target: usize,
        rng: &mut R,
    ) -> Vec<Complex64> {
        match self {
            NoiseChannel::BitFlip => bit_flip(state, p, target, rng),
            NoiseChannel::PhaseFlip => phase_flip(state, p, target, rng),
            NoiseChannel::Depolarizing => depolarizing(state, p, target, rng),
            NoiseChannel::AmplitudeDamping => amplitude_damping(state, p, target, rng),
        }
    }
}

impl fmt::Display for NoiseChannel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for NoiseChannel {
    type Err = NoiseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().replace('-', "_").as_str() {
            "bit_flip" | "bitflip" => Ok(NoiseChannel::BitFlip),
            "phase_flip" | "phaseflip" => Ok(NoiseChannel::PhaseFlip),
            "depolarizing" => Ok(NoiseChannel::Depolarizing),
            "amplitude_damping" => Ok(NoiseChannel::AmplitudeDamping),
            _ => Err(NoiseError::UnknownChannel(s.to_string())),
        }
    }
}

// =============================================================================
// Hooks
// =============================================================================

/// Strategy called by the simulator after each applied gate.
///
/// `state` is the amplitude vector right after `gate`; the returned vector
/// replaces it. Returning an error (or a vector of the wrong length) makes
/// the simulator keep `state` and carry on.
///
/// # Panics
///
/// Only returned errors are recovered. A hook that panics unwinds through
/// [`StatevectorSimulator::run`](crate::StatevectorSimulator::run), and under
/// `panic = "abort"` ends the process. Hooks that can fail should return
/// [`NoiseError::Hook`] instead.
pub trait NoiseHook {
    /// Produce the post-noise state.
    fn apply(
        &self,
        state: &[Complex64],
        gate: &Gate,
        rng: &mut dyn RngCore,
    ) -> Result<Vec<Complex64>, NoiseError>;
}

impl<F> NoiseHook for F
where
    F: Fn(&[Complex64], &Gate, &mut dyn RngCore) -> Result<Vec<Complex64>, NoiseError>,
{
    fn apply(
        &self,
        state: &[Complex64],
        gate: &Gate,
        rng: &mut dyn RngCore,
    ) -> Result<Vec<Complex64>, NoiseError> {
        self(state, gate, rng)
    }
}

/// Hook that runs a fixed list of channels on every target of each gate.
///
/// Channels run in insertion order; within a channel, targets run in the
/// gate's target order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChannelNoise {
    channels: Vec<(NoiseChannel, f64)>,
}

impl ChannelNoise {
    /// Create a hook with no channels.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a channel with probability `p`.
    pub fn with_channel(mut self, channel: NoiseChannel, p: f64) -> Result<Self, NoiseError> {
        if !(0.0..=1.0).contains(&p) {
            return Err(NoiseError::InvalidProbability(p));
        }
        self.channels.push((channel, p));
        Ok(self)
    }

    /// Configured channels and their probabilities.
    pub fn channels(&self) -> &[(NoiseChannel, f64)] {
        &self.channels
    }
}

impl NoiseHook for ChannelNoise {
    fn apply(
        &self,
        state: &[Complex64],
        gate: &Gate,
        rng: &mut dyn RngCore,
    ) -> Result<Vec<Complex64>, NoiseError> {
        let mut out = state.to_vec();
        for (channel, p) in &self.channels {
            for &target in gate.targets() {
                out = channel.apply(&out, *p, target, rng);
            }
        }
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn c(re: f64, im: f64) -> Complex64 {
        Complex64::new(re, im)
    }

    fn approx_eq(a: &[Complex64], b: &[Complex64]) -> bool {
        a.len() == b.len() && a.iter().zip(b).all(|(x, y)| (x - y).norm() < 1e-12)
    }

    fn rng() -> StdRng {
        StdRng::seed_from_u64(42)
    }

    #[test]
    fn test_channels_preserve_length() {
        let state = [c(1.0, 0.0), c(0.0, 0.0)];
        let mut rng = rng();
        assert_eq!(bit_flip(&state, 1.0, 0, &mut rng).len(), 2);
        assert_eq!(phase_flip(&state, 1.0, 0, &mut rng).len(), 2);
        assert_eq!(depolarizing(&state, 1.0, 0, &mut rng).len(), 2);
        assert_eq!(amplitude_damping(&state, 1.0, 0, &mut rng).len(), 2);
    }

    #[test]
    fn test_zero_probability_is_identity() {
        let state = [c(0.6, 0.0), c(0.0, 0.8)];
        let mut rng = rng();
        assert!(approx_eq(&bit_flip(&state, 0.0, 0, &mut rng), &state));
        assert!(approx_eq(&phase_flip(&state, 0.0, 0, &mut rng), &state));
        assert!(approx_eq(&depolarizing(&state, 0.0, 0, &mut rng), &state));
        assert!(approx_eq(&amplitude_damping(&state, 0.0, 0, &mut rng), &state));
    }

    #[test]
    fn test_bit_flip_certain_swaps_each_pair_twice() {
        let state = [c(1.0, 0.0), c(0.0, 0.0), c(0.0, 0.0), c(0.0, 0.0)];
        let out = bit_flip(&state, 1.0, 1, &mut rng());
        assert!(approx_eq(&out, &state));
    }

    #[test]
    fn test_bit_flip_is_a_permutation() {
        let state = [c(0.1, 0.0), c(0.2, 0.0), c(0.3, 0.0), c(0.4, 0.0)];
        let out = bit_flip(&state, 0.5, 0, &mut rng());
        let mut before: Vec<f64> = state.iter().map(|a| a.re).collect();
        let mut after: Vec<f64> = out.iter().map(|a| a.re).collect();
        before.sort_by(f64::total_cmp);
        after.sort_by(f64::total_cmp);
        assert_eq!(before, after);
    }

    #[test]
    fn test_phase_flip_certain_negates_set_bit() {
        let state = [c(0.6, 0.0), c(0.8, 0.0)];
        let out = phase_flip(&state, 1.0, 0, &mut rng());
        assert!(approx_eq(&out, &[c(0.6, 0.0), c(-0.8, 0.0)]));
    }

    #[test]
    fn test_amplitude_damping_certain_moves_weight() {
        let s = 1.0 / 2.0_f64.sqrt();
        let state = [c(s, 0.0), c(s, 0.0)];
        let out = amplitude_damping(&state, 1.0, 0, &mut rng());
        assert!(approx_eq(&out, &[c(2.0 * s, 0.0), c(0.0, 0.0)]));
    }

    #[test]
    fn test_depolarizing_certain_picks_a_pauli() {
        // On |1⟩: X (double swap) leaves [0, 1], Z gives [0, -1], Y gives [0, -i].
        let state = [c(0.0, 0.0), c(1.0, 0.0)];
        let mut rng = rng();
        for _ in 0..20 {
            let out = depolarizing(&state, 1.0, 0, &mut rng);
            let candidates = [
                vec![c(0.0, 0.0), c(1.0, 0.0)],
                vec![c(0.0, 0.0), c(-1.0, 0.0)],
                vec![c(0.0, 0.0), c(0.0, -1.0)],
            ];
            assert!(candidates.iter().any(|cand| approx_eq(&out, cand)));
        }
    }

    #[test]
    fn test_channel_names_roundtrip() {
        for channel in [
            NoiseChannel::BitFlip,
            NoiseChannel::PhaseFlip,
            NoiseChannel::Depolarizing,
            NoiseChannel::AmplitudeDamping,
        ] {
            assert_eq!(channel.name().parse::<NoiseChannel>().unwrap(), channel);
        }
        assert_eq!(
            "Bit-Flip".parse::<NoiseChannel>().unwrap(),
            NoiseChannel::BitFlip
        );
        assert!(matches!(
            "thermal".parse::<NoiseChannel>(),
            Err(NoiseError::UnknownChannel(_))
        ));
    }

    #[test]
    fn test_channel_noise_rejects_bad_probability() {
        assert!(matches!(
            ChannelNoise::new().with_channel(NoiseChannel::BitFlip, 1.5),
            Err(NoiseError::InvalidProbability(_))
        ));
        assert!(
            ChannelNoise::new()
                .with_channel(NoiseChannel::BitFlip, f64::NAN)
                .is_err()
        );
    }

    #[test]
    fn test_channel_noise_applies_to_every_target() {
        // Phase flip at p=1 on both targets of a SWAP: |11⟩ picks up two
        // sign flips, |01⟩ and |10⟩ one each.
        let hook = ChannelNoise::new()
            .with_channel(NoiseChannel::PhaseFlip, 1.0)
            .unwrap();
        let state = [c(0.5, 0.0); 4];
        let out = hook
            .apply(&state, &Gate::swap(0, 1), &mut rng())
            .unwrap();
        assert!(approx_eq(
            &out,
            &[c(0.5, 0.0), c(-0.5, 0.0), c(-0.5, 0.0), c(0.5, 0.0)]
        ));
    }
}

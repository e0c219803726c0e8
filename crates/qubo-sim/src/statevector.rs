//! Statevector storage and gate kernels.

use ndarray::{Array2, ArrayD, ArrayViewD, IxDyn, arr2};
use num_complex::Complex64;
use rand::Rng;
use rand::distributions::{Distribution, WeightedIndex};
use rustc_hash::FxHashMap;

use crate::config::{Kernel, MAX_SUPPORTED_QUBITS};
use crate::counts::Counts;
use crate::error::{SimError, SimResult};
use crate::unitary::Matrix2;

/// Fixed-width binary label of a basis state.
///
/// Rendered most-significant bit first, so qubit 0 is the rightmost
/// character: index 1 of a 3-qubit register is `"001"`.
pub fn basis_label(index: usize, num_qubits: usize) -> String {
    format!("{index:0num_qubits$b}")
}

/// `2^num_qubits`, or `None` past the supported ceiling.
fn dimension(num_qubits: usize) -> Option<usize> {
    if num_qubits > MAX_SUPPORTED_QUBITS {
        return None;
    }
    1usize.checked_shl(u32::try_from(num_qubits).ok()?)
}

/// A pure state of `n` qubits as `2^n` complex amplitudes.
///
/// Bit `k` of an amplitude's index is the value of qubit `k`.
#[derive(Debug, Clone, PartialEq)]
pub struct Statevector {
    /// The state amplitudes (2^n complex numbers).
    amplitudes: Vec<Complex64>,
    /// Number of qubits.
    num_qubits: usize,
}

impl Statevector {
    /// Create a new statevector initialized to |0...0⟩.
    ///
    /// Fails with [`SimError::CircuitTooLarge`] above [`MAX_SUPPORTED_QUBITS`].
    pub fn new(num_qubits: usize) -> SimResult<Self> {
        let size = dimension(num_qubits).ok_or(SimError::CircuitTooLarge {
            num_qubits,
            max_qubits: MAX_SUPPORTED_QUBITS,
        })?;
        let mut amplitudes = vec![Complex64::new(0.0, 0.0); size];
        amplitudes[0] = Complex64::new(1.0, 0.0);
        Ok(Self {
            amplitudes,
            num_qubits,
        })
    }

    /// Wrap existing amplitudes; `None` unless there are exactly `2^num_qubits`.
    pub fn from_amplitudes(num_qubits: usize, amplitudes: Vec<Complex64>) -> Option<Self> {
        (dimension(num_qubits) == Some(amplitudes.len())).then_some(Self {
            amplitudes,
            num_qubits,
        })
    }

    /// Get the number of qubits.
    pub fn num_qubits(&self) -> usize {
        self.num_qubits
    }

    /// Number of amplitudes (`2^n`).
    pub fn len(&self) -> usize {
        self.amplitudes.len()
    }

    /// Always false; a statevector holds at least one amplitude.
    pub fn is_empty(&self) -> bool {
        self.amplitudes.is_empty()
    }

    /// Borrow the amplitudes.
    pub fn amplitudes(&self) -> &[Complex64] {
        &self.amplitudes
    }

    /// Consume the statevector and return its amplitudes.
    pub fn into_amplitudes(self) -> Vec<Complex64> {
        self.amplitudes
    }

    /// Sum of squared magnitudes; 1 for a normalized state.
    pub fn norm_sqr(&self) -> f64 {
        self.amplitudes.iter().map(Complex64::norm_sqr).sum()
    }

    /// Born-rule probability of each basis state.
    pub fn probabilities(&self) -> Vec<f64> {
        self.amplitudes.iter().map(Complex64::norm_sqr).collect()
    }

    // =========================================================================
    // Single-qubit unitaries
    // =========================================================================

    /// Apply a 2×2 unitary to `target` with the chosen kernel.
    pub fn apply_unitary(&mut self, matrix: &Matrix2, target: usize, kernel: Kernel) -> SimResult<()> {
        match kernel {
            Kernel::Pairwise => {
                self.apply_pairwise(matrix, target);
                Ok(())
            }
            Kernel::Tensor => self.apply_tensor(matrix, target),
        }
    }

    /// Apply `matrix` to every index pair that differs only in the target bit.
    pub fn apply_pairwise(&mut self, matrix: &Matrix2, target: usize) {
        let mask = 1 << target;
        for i in 0..self.amplitudes.len() {
            if i & mask == 0 {
                let j = i | mask;
                let a = self.amplitudes[i];
                let b = self.amplitudes[j];
                self.amplitudes[i] = matrix[0][0] * a + matrix[0][1] * b;
                self.amplitudes[j] = matrix[1][0] * a + matrix[1][1] * b;
            }
        }
    }

    /// Apply `matrix` by tensor contraction.
    ///
    /// The amplitudes are viewed as an n-axis tensor of shape `[2; n]`, the
    /// target axis is moved to the front, the tensor is flattened to
    /// `(2, 2^(n-1))` and left-multiplied, then the axis order is restored.
    /// In row-major order axis 0 is the most-significant bit, so qubit `k`
    /// lives on axis `n - 1 - k`.
    pub fn apply_tensor(&mut self, matrix: &Matrix2, target: usize) -> SimResult<()> {
        let n = self.num_qubits;
        let axis = n - 1 - target;
        let shape = vec![2usize; n];

        let mut order = Vec::with_capacity(n);
        order.push(axis);
        order.extend((0..n).filter(|&a| a != axis));

        let mut inverse = vec![0usize; n];
        for (position, &a) in order.iter().enumerate() {
            inverse[a] = position;
        }

        // Borrowed view: a shape error leaves the amplitudes untouched.
        let tensor = ArrayViewD::from_shape(IxDyn(&shape), self.amplitudes.as_slice())?;
        let moved = tensor.permuted_axes(IxDyn(&order));
        let flat = Array2::from_shape_vec((2, 1 << (n - 1)), moved.iter().copied().collect())?;

        let op = arr2(matrix);
        let product = op.dot(&flat);

        let restored = ArrayD::from_shape_vec(IxDyn(&shape), product.iter().copied().collect())?
            .permuted_axes(IxDyn(&inverse));
        self.amplitudes = restored.iter().copied().collect();
        Ok(())
    }

    // =========================================================================
    // Permutation gates
    // =========================================================================

    /// Controlled-NOT computed from a snapshot of the pre-gate state.
    pub fn apply_cnot(&mut self, control: usize, target: usize) {
        let ctrl_mask = 1 << control;
        let tgt_mask = 1 << target;
        let old = self.amplitudes.clone();
        for (i, amp) in self.amplitudes.iter_mut().enumerate() {
            if i & ctrl_mask != 0 {
                *amp = old[i ^ tgt_mask];
            }
        }
    }

    /// SWAP computed from a snapshot of the pre-gate state.
    pub fn apply_swap(&mut self, a: usize, b: usize) {
        let mask_a = 1 << a;
        let mask_b = 1 << b;
        let old = self.amplitudes.clone();
        for (i, amp) in self.amplitudes.iter_mut().enumerate() {
            let bit_a = i & mask_a != 0;
            let bit_b = i & mask_b != 0;
            if bit_a != bit_b {
                *amp = old[i ^ mask_a ^ mask_b];
            }
        }
    }

    // =========================================================================
    // Measurement
    // =========================================================================

    /// Draw `shots` basis states from the Born distribution and tally them.
    pub fn sample_counts<R: Rng + ?Sized>(&self, shots: usize, rng: &mut R) -> SimResult<Counts> {
        let dist = WeightedIndex::new(self.probabilities())
            .map_err(|e| SimError::Sampling(e.to_string()))?;

        let mut tally: FxHashMap<usize, u64> = FxHashMap::default();
        for _ in 0..shots {
            *tally.entry(dist.sample(rng)).or_insert(0) += 1;
        }

        let mut counts = Counts::new();
        for (index, count) in tally {
            counts.insert(basis_label(index, self.num_qubits), count);
        }
        Ok(counts)
    }
}

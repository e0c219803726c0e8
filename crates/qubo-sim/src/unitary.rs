//! 2×2 unitaries for the single-qubit gates.

use num_complex::Complex64;
use std::f64::consts::{FRAC_1_SQRT_2, FRAC_PI_4};

use qubo_ir::GateKind;

/// Row-major 2×2 complex matrix.
pub type Matrix2 = [[Complex64; 2]; 2];

const ZERO: Complex64 = Complex64::new(0.0, 0.0);
const ONE: Complex64 = Complex64::new(1.0, 0.0);
const I: Complex64 = Complex64::new(0.0, 1.0);

/// Matrix for a single-qubit gate kind.
///
/// `angle` is only read by the rotation gates. Returns `None` for CNOT, SWAP
/// and measurement, which are not single-qubit unitaries.
pub fn gate_matrix(kind: GateKind, angle: f64) -> Option<Matrix2> {
    let matrix = match kind {
        GateKind::H => {
            let h = Complex64::new(FRAC_1_SQRT_2, 0.0);
            [[h, h], [h, -h]]
        }
        GateKind::X => [[ZERO, ONE], [ONE, ZERO]],
        GateKind::Y => [[ZERO, -I], [I, ZERO]],
        GateKind::Z => [[ONE, ZERO], [ZERO, -ONE]],
        GateKind::S => [[ONE, ZERO], [ZERO, I]],
        GateKind::T => [[ONE, ZERO], [ZERO, Complex64::from_polar(1.0, FRAC_PI_4)]],
        GateKind::Rx => {
            let c = Complex64::new((angle / 2.0).cos(), 0.0);
            let s = Complex64::new(0.0, -(angle / 2.0).sin());
            [[c, s], [s, c]]
        }
        GateKind::Ry => {
            let c = Complex64::new((angle / 2.0).cos(), 0.0);
            let s = Complex64::new((angle / 2.0).sin(), 0.0);
            [[c, -s], [s, c]]
        }
        GateKind::Rz => [
            [Complex64::from_polar(1.0, -angle / 2.0), ZERO],
            [ZERO, Complex64::from_polar(1.0, angle / 2.0)],
        ],
        GateKind::Cnot | GateKind::Swap | GateKind::Measure => return None,
    };
    Some(matrix)
}

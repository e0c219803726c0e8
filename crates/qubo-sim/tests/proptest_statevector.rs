//! Property-based tests for the statevector kernels.
//!
//! Random unitary-only circuits must stay normalized, and both single-qubit
//! kernels must agree amplitude for amplitude.

use proptest::prelude::*;
use qubo_ir::Circuit;
use qubo_sim::{Kernel, SimulatorConfig, StatevectorSimulator};

/// Unitary gate operations for random circuits.
#[derive(Debug, Clone)]
enum GateOp {
    H(usize),
    X(usize),
    Y(usize),
    Z(usize),
    S(usize),
    T(usize),
    Rx(usize, f64),
    Ry(usize, f64),
    Rz(usize, f64),
    Cnot(usize, usize),
    Swap(usize, usize),
}

impl GateOp {
    fn apply(self, circuit: &mut Circuit) {
        // Two-qubit ops with equal operands are rejected; skipping them is fine.
        let _ = match self {
            GateOp::H(q) => circuit.h(q),
            GateOp::X(q) => circuit.x(q),
            GateOp::Y(q) => circuit.y(q),
            GateOp::Z(q) => circuit.z(q),
            GateOp::S(q) => circuit.s(q),
            GateOp::T(q) => circuit.t(q),
            GateOp::Rx(q, theta) => circuit.rx(theta, q),
            GateOp::Ry(q, theta) => circuit.ry(theta, q),
            GateOp::Rz(q, theta) => circuit.rz(theta, q),
            GateOp::Cnot(c, t) => circuit.cnot(c, t),
            GateOp::Swap(a, b) => circuit.swap(a, b),
        };
    }
}

fn arb_gate_op(num_qubits: usize) -> impl Strategy<Value = GateOp> {
    let q = 0..num_qubits;
    let angle = -std::f64::consts::TAU..std::f64::consts::TAU;
    prop_oneof![
        q.clone().prop_map(GateOp::H),
        q.clone().prop_map(GateOp::X),
        q.clone().prop_map(GateOp::Y),
        q.clone().prop_map(GateOp::Z),
        q.clone().prop_map(GateOp::S),
        q.clone().prop_map(GateOp::T),
        (q.clone(), angle.clone()).prop_map(|(q, a)| GateOp::Rx(q, a)),
        (q.clone(), angle.clone()).prop_map(|(q, a)| GateOp::Ry(q, a)),
        (q.clone(), angle).prop_map(|(q, a)| GateOp::Rz(q, a)),
        (q.clone(), q.clone()).prop_map(|(a, b)| GateOp::Cnot(a, b)),
        (q.clone(), q).prop_map(|(a, b)| GateOp::Swap(a, b)),
    ]
}

/// Random circuit with 1-6 qubits and 1-30 unitary gates.
fn arb_unitary_circuit() -> impl Strategy<Value = Circuit> {
    (1_usize..=6).prop_flat_map(|num_qubits| {
        prop::collection::vec(arb_gate_op(num_qubits), 1..=30).prop_map(move |ops| {
            let mut circuit = Circuit::new(num_qubits).unwrap();
            for op in ops {
                op.apply(&mut circuit);
            }
            circuit
        })
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    #[test]
    fn unitary_circuits_stay_normalized(circuit in arb_unitary_circuit()) {
        let outcome = StatevectorSimulator::new(&circuit).run(1).unwrap();
        let norm: f64 = outcome
            .statevector()
            .unwrap()
            .iter()
            .map(|a| a.norm_sqr())
            .sum();
        prop_assert!((norm - 1.0).abs() < 1e-9, "norm = {}", norm);
    }

    #[test]
    fn pairwise_and_tensor_kernels_agree(circuit in arb_unitary_circuit()) {
        let pairwise = StatevectorSimulator::new(&circuit).run(1).unwrap();
        let tensor = StatevectorSimulator::new(&circuit)
            .with_config(SimulatorConfig::default().with_kernel(Kernel::Tensor))
            .run(1)
            .unwrap();

        let a = pairwise.statevector().unwrap();
        let b = tensor.statevector().unwrap();
        prop_assert_eq!(a.len(), b.len());
        for (x, y) in a.iter().zip(b) {
            prop_assert!((x - y).norm() < 1e-9, "{} vs {}", x, y);
        }
    }

    #[test]
    fn swap_is_an_involution(circuit in arb_unitary_circuit(), a in 0_usize..6, b in 0_usize..6) {
        let n = circuit.num_qubits();
        let (a, b) = (a % n, b % n);
        prop_assume!(a != b);

        let before = StatevectorSimulator::new(&circuit).run(1).unwrap();
        let mut doubled = circuit.clone();
        doubled.swap(a, b).unwrap().swap(a, b).unwrap();
        let after = StatevectorSimulator::new(&doubled).run(1).unwrap();

        for (x, y) in before.statevector().unwrap().iter().zip(after.statevector().unwrap()) {
            prop_assert!((x - y).norm() < 1e-12);
        }
    }
}

//! High-level circuit builder API.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::document::CircuitSpec;
use crate::error::{IrError, IrResult};
use crate::gate::{Gate, GateKind};

/// A quantum circuit: a fixed number of qubits and an append-only gate list.
///
/// Gates are validated when they are added, so a simulator handed a
/// `Circuit` never sees an out-of-range index or a malformed known gate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "CircuitSpec", into = "CircuitSpec")]
pub struct Circuit {
    /// Number of qubits.
    num_qubits: usize,
    /// Gates in application order.
    gates: Vec<Gate>,
}

impl Circuit {
    /// Create an empty circuit over `num_qubits` qubits.
    pub fn new(num_qubits: usize) -> IrResult<Self> {
        if num_qubits == 0 {
            return Err(IrError::InvalidQubitCount(num_qubits));
        }
        Ok(Self {
            num_qubits,
            gates: vec![],
        })
    }

    /// Validate and append a gate given by name.
    pub fn add_gate(
        &mut self,
        name: impl Into<String>,
        targets: &[usize],
        params: &[f64],
    ) -> IrResult<&mut Self> {
        self.push(Gate::new(name, targets, params))
    }

    /// Validate and append an already-built gate.
    pub fn push(&mut self, gate: Gate) -> IrResult<&mut Self> {
        self.validate(&gate)?;
        self.gates.push(gate);
        Ok(self)
    }

    /// Check a gate against this circuit without adding it.
    pub fn validate(&self, gate: &Gate) -> IrResult<()> {
        let targets = gate.targets();
        let kind = gate.kind();

        if let Some(kind) = kind {
            if targets.len() != kind.num_qubits() {
                return Err(IrError::QubitCountMismatch {
                    gate_name: gate.name().to_string(),
                    expected: kind.num_qubits(),
                    got: targets.len(),
                });
            }
        }

        for &qubit in targets {
            if qubit >= self.num_qubits {
                return Err(IrError::QubitOutOfRange {
                    qubit,
                    num_qubits: self.num_qubits,
                    gate_name: gate.name().to_string(),
                });
            }
        }

        for (i, &qubit) in targets.iter().enumerate() {
            if targets[..i].contains(&qubit) {
                return Err(IrError::DuplicateQubit {
                    qubit,
                    gate_name: gate.name().to_string(),
                });
            }
        }

        if let Some(kind) = kind.filter(GateKind::is_rotation) {
            match gate.params().len() {
                0 => {
                    return Err(IrError::MissingParameter {
                        gate_name: gate.name().to_string(),
                    });
                }
                1 => {}
                got => {
                    return Err(IrError::ParameterCountMismatch {
                        gate_name: gate.name().to_string(),
                        expected: kind.num_params(),
                        got,
                    });
                }
            }
        }

        if let Some(&value) = gate.params().iter().find(|p| !p.is_finite()) {
            return Err(IrError::NonFiniteParameter {
                gate_name: gate.name().to_string(),
                value,
            });
        }

        Ok(())
    }

    /// Remove every gate, keeping the qubit count.
    pub fn clear(&mut self) {
        self.gates.clear();
    }

    // =========================================================================
    // Typed builders
    // =========================================================================

    /// Apply Hadamard gate.
    pub fn h(&mut self, qubit: usize) -> IrResult<&mut Self> {
        self.push(Gate::h(qubit))
    }

    /// Apply Pauli-X gate.
    pub fn x(&mut self, qubit: usize) -> IrResult<&mut Self> {
        self.push(Gate::x(qubit))
    }

    /// Apply Pauli-Y gate.
    pub fn y(&mut self, qubit: usize) -> IrResult<&mut Self> {
        self.push(Gate::y(qubit))
    }

    /// Apply Pauli-Z gate.
    pub fn z(&mut self, qubit: usize) -> IrResult<&mut Self> {
        self.push(Gate::z(qubit))
    }

    /// Apply S gate.
    pub fn s(&mut self, qubit: usize) -> IrResult<&mut Self> {
        self.push(Gate::s(qubit))
    }

    /// Apply T gate.
    pub fn t(&mut self, qubit: usize) -> IrResult<&mut Self> {
        self.push(Gate::t(qubit))
    }

    /// Apply Rx rotation gate.
    pub fn rx(&mut self, theta: f64, qubit: usize) -> IrResult<&mut Self> {
        self.push(Gate::rx(qubit, theta))
    }

    /// Apply Ry rotation gate.
    pub fn ry(&mut self, theta: f64, qubit: usize) -> IrResult<&mut Self> {
        self.push(Gate::ry(qubit, theta))
    }

    /// Apply Rz rotation gate.
    pub fn rz(&mut self, theta: f64, qubit: usize) -> IrResult<&mut Self> {
        self.push(Gate::rz(qubit, theta))
    }

    /// Apply CNOT gate.
    pub fn cnot(&mut self, control: usize, target: usize) -> IrResult<&mut Self> {
        self.push(Gate::cnot(control, target))
    }

    /// Apply SWAP gate.
    pub fn swap(&mut self, a: usize, b: usize) -> IrResult<&mut Self> {
        self.push(Gate::swap(a, b))
    }

    /// Measure the register.
    pub fn measure(&mut self, qubit: usize) -> IrResult<&mut Self> {
        self.push(Gate::measure(qubit))
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// Get the number of qubits.
    pub fn num_qubits(&self) -> usize {
        self.num_qubits
    }

    /// Gates in application order.
    pub fn gates(&self) -> &[Gate] {
        &self.gates
    }

    /// Number of gates.
    pub fn len(&self) -> usize {
        self.gates.len()
    }

    /// Check if the circuit has no gates.
    pub fn is_empty(&self) -> bool {
        self.gates.is_empty()
    }

    /// Circuit depth, counted as one layer per gate.
    pub fn depth(&self) -> usize {
        self.gates.len()
    }

    /// Check if any gate is a measurement.
    pub fn has_measurement(&self) -> bool {
        self.gates
            .iter()
            .any(|g| g.kind().is_some_and(|k| k.is_measurement()))
    }

    /// Render an ASCII wire diagram, one line per qubit.
    pub fn draw(&self) -> String {
        let mut lines: Vec<String> = (0..self.num_qubits).map(|i| format!("q[{i}]: ")).collect();
        for gate in &self.gates {
            let cell = format!("--{}--", gate.name());
            let wire = "-".repeat(cell.chars().count());
            for (qubit, line) in lines.iter_mut().enumerate() {
                if gate.acts_on(qubit) {
                    line.push_str(&cell);
                } else {
                    line.push_str(&wire);
                }
            }
        }
        lines.join("\n")
    }

    // =========================================================================
    // Pre-built circuits
    // =========================================================================

    /// Bell pair on two qubits, measured.
    pub fn bell() -> IrResult<Self> {
        let mut circuit = Self::new(2)?;
        circuit.h(0)?.cnot(0, 1)?.measure(0)?;
        Ok(circuit)
    }

    /// GHZ state on `n` qubits, measured.
    pub fn ghz(n: usize) -> IrResult<Self> {
        let mut circuit = Self::new(n)?;
        circuit.h(0)?;
        for i in 0..n.saturating_sub(1) {
            circuit.cnot(i, i + 1)?;
        }
        circuit.measure(0)?;
        Ok(circuit)
    }
}

impl fmt::Display for Circuit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.draw())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    #[test]
    fn test_new_circuit() {
        let circuit = Circuit::new(3).unwrap();
        assert_eq!(circuit.num_qubits(), 3);
        assert!(circuit.is_empty());
    }

    #[test]
    fn test_zero_qubits_rejected() {
        assert!(matches!(Circuit::new(0), Err(IrError::InvalidQubitCount(0))));
    }

    #[test]
    fn test_add_gate_by_name() {
        let mut circuit = Circuit::new(2).unwrap();
        circuit.add_gate("H", &[0], &[]).unwrap();
        circuit.add_gate("X", &[1], &[]).unwrap();
        assert_eq!(circuit.len(), 2);
        assert_eq!(circuit.gates()[0].name(), "H");
    }

    #[test]
    fn test_cnot_with_one_target_rejected() {
        let mut circuit = Circuit::new(2).unwrap();
        let err = circuit.add_gate("CNOT", &[0], &[]).unwrap_err();
        assert!(matches!(
            err,
            IrError::QubitCountMismatch {
                expected: 2,
                got: 1,
                ..
            }
        ));
        assert!(circuit.is_empty());
    }

    #[test]
    fn test_out_of_range_rejected() {
        let mut circuit = Circuit::new(2).unwrap();
        let err = circuit.add_gate("X", &[2], &[]).unwrap_err();
        assert!(matches!(
            err,
            IrError::QubitOutOfRange {
                qubit: 2,
                num_qubits: 2,
                ..
            }
        ));
    }

    #[test]
    fn test_duplicate_targets_rejected() {
        let mut circuit = Circuit::new(2).unwrap();
        let err = circuit.add_gate("SWAP", &[1, 1], &[]).unwrap_err();
        assert!(matches!(err, IrError::DuplicateQubit { qubit: 1, .. }));
    }

    #[test]
    fn test_rotation_parameters() {
        let mut circuit = Circuit::new(1).unwrap();
        assert!(matches!(
            circuit.add_gate("RX", &[0], &[]),
            Err(IrError::MissingParameter { .. })
        ));
        assert!(matches!(
            circuit.add_gate("RZ", &[0], &[0.1, 0.2]),
            Err(IrError::ParameterCountMismatch { got: 2, .. })
        ));
        circuit.add_gate("RY", &[0], &[PI]).unwrap();
        assert_eq!(circuit.len(), 1);
    }

    #[test]
    fn test_non_finite_parameters_rejected() {
        let mut circuit = Circuit::new(1).unwrap();
        for value in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            assert!(matches!(
                circuit.add_gate("RX", &[0], &[value]),
                Err(IrError::NonFiniteParameter { .. })
            ));
        }
        assert!(circuit.rz(f64::NAN, 0).is_err());
        assert!(circuit.is_empty());
    }

    #[test]
    fn test_unknown_gate_is_range_checked_only() {
        let mut circuit = Circuit::new(2).unwrap();
        circuit.add_gate("TOFFOLI", &[0, 1], &[]).unwrap();
        assert!(circuit.add_gate("TOFFOLI", &[0, 5], &[]).is_err());
        assert_eq!(circuit.len(), 1);
    }

    #[test]
    fn test_fluent_api() {
        let mut circuit = Circuit::new(2).unwrap();
        circuit
            .h(0)
            .unwrap()
            .cnot(0, 1)
            .unwrap()
            .rz(PI / 4.0, 1)
            .unwrap()
            .measure(0)
            .unwrap();

        assert_eq!(circuit.depth(), 4);
        assert!(circuit.has_measurement());
    }

    #[test]
    fn test_clear() {
        let mut circuit = Circuit::bell().unwrap();
        assert!(!circuit.is_empty());
        circuit.clear();
        assert!(circuit.is_empty());
        assert_eq!(circuit.num_qubits(), 2);
    }

    #[test]
    fn test_ghz() {
        let circuit = Circuit::ghz(4).unwrap();
        assert_eq!(circuit.num_qubits(), 4);
        // H, three CNOTs, measure
        assert_eq!(circuit.len(), 5);
    }

    #[test]
    fn test_draw() {
        let mut circuit = Circuit::new(2).unwrap();
        circuit.h(0).unwrap().cnot(0, 1).unwrap();

        let expected = "q[0]: --H----CNOT--\nq[1]: -------CNOT--";
        assert_eq!(circuit.draw(), expected);
        assert_eq!(circuit.to_string(), expected);
    }
}

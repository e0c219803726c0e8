//! Quantum gate types.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Angle used by rotation gates whose parameter list is empty.
pub const DEFAULT_ROTATION_ANGLE: f64 = 0.0;

/// Gates the simulator knows how to execute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GateKind {
    // Single-qubit fixed gates
    /// Hadamard gate.
    H,
    /// Pauli-X gate.
    X,
    /// Pauli-Y gate.
    Y,
    /// Pauli-Z gate.
    Z,
    /// S gate (sqrt(Z)).
    S,
    /// T gate (fourth root of Z).
    T,

    // Single-qubit rotation gates
    /// Rotation around X axis.
    Rx,
    /// Rotation around Y axis.
    Ry,
    /// Rotation around Z axis.
    Rz,

    // Two-qubit gates
    /// Controlled-NOT, targets are `[control, target]`.
    Cnot,
    /// SWAP gate.
    Swap,

    /// Measurement of the whole register.
    Measure,
}

impl GateKind {
    /// Resolve a gate name, ignoring ASCII case.
    ///
    /// `MEASURE` is accepted for `M` and `CX` for `CNOT`.
    pub fn from_name(name: &str) -> Option<Self> {
        let kind = match name.to_ascii_uppercase().as_str() {
            "H" => GateKind::H,
            "X" => GateKind::X,
            "Y" => GateKind::Y,
            "Z" => GateKind::Z,
            "S" => GateKind::S,
            "T" => GateKind::T,
            "RX" => GateKind::Rx,
            "RY" => GateKind::Ry,
            "RZ" => GateKind::Rz,
            "CNOT" | "CX" => GateKind::Cnot,
            "SWAP" => GateKind::Swap,
            "M" | "MEASURE" => GateKind::Measure,
            _ => return None,
        };
        Some(kind)
    }

    /// Canonical name of this gate.
    #[inline]
    pub fn name(&self) -> &'static str {
        match self {
            GateKind::H => "H",
            GateKind::X => "X",
            GateKind::Y => "Y",
            GateKind::Z => "Z",
            GateKind::S => "S",
            GateKind::T => "T",
            GateKind::Rx => "RX",
            GateKind::Ry => "RY",
            GateKind::Rz => "RZ",
            GateKind::Cnot => "CNOT",
            GateKind::Swap => "SWAP",
            GateKind::Measure => "M",
        }
    }

    /// Number of target qubits this gate takes.
    #[inline]
    pub fn num_qubits(&self) -> usize {
        match self {
            GateKind::Cnot | GateKind::Swap => 2,
            _ => 1,
        }
    }

    /// Number of real parameters this gate takes.
    #[inline]
    pub fn num_params(&self) -> usize {
        usize::from(self.is_rotation())
    }

    /// Check if this is one of RX, RY, RZ.
    pub fn is_rotation(&self) -> bool {
        matches!(self, GateKind::Rx | GateKind::Ry | GateKind::Rz)
    }

    /// Check if this gate measures the register.
    pub fn is_measurement(&self) -> bool {
        matches!(self, GateKind::Measure)
    }
}

impl fmt::Display for GateKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One operation in a circuit: a name, ordered targets and real parameters.
///
/// The name is kept as written by the caller. Names that do not resolve to a
/// [`GateKind`] can still be stored in a circuit; the simulator rejects them
/// when it reaches them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Gate {
    name: String,
    targets: Vec<usize>,
    #[serde(default)]
    params: Vec<f64>,
}

impl Gate {
    /// Create a gate from its raw parts.
    pub fn new(name: impl Into<String>, targets: &[usize], params: &[f64]) -> Self {
        Self {
            name: name.into(),
            targets: targets.to_vec(),
            params: params.to_vec(),
        }
    }

    /// Hadamard on `target`.
    pub fn h(target: usize) -> Self {
        Self::new("H", &[target], &[])
    }

    /// Pauli-X on `target`.
    pub fn x(target: usize) -> Self {
        Self::new("X", &[target], &[])
    }

    /// Pauli-Y on `target`.
    pub fn y(target: usize) -> Self {
        Self::new("Y", &[target], &[])
    }

    /// Pauli-Z on `target`.
    pub fn z(target: usize) -> Self {
        Self::new("Z", &[target], &[])
    }

    /// S on `target`.
    pub fn s(target: usize) -> Self {
        Self::new("S", &[target], &[])
    }

    /// T on `target`.
    pub fn t(target: usize) -> Self {
        Self::new("T", &[target], &[])
    }

    /// X rotation by `theta` radians.
    pub fn rx(target: usize, theta: f64) -> Self {
        Self::new("RX", &[target], &[theta])
    }

    /// Y rotation by `theta` radians.
    pub fn ry(target: usize, theta: f64) -> Self {
        Self::new("RY", &[target], &[theta])
    }

    /// Z rotation by `theta` radians.
    pub fn rz(target: usize, theta: f64) -> Self {
        Self::new("RZ", &[target], &[theta])
    }

    /// Controlled-NOT.
    pub fn cnot(control: usize, target: usize) -> Self {
        Self::new("CNOT", &[control, target], &[])
    }

    /// Swap qubits `a` and `b`.
    pub fn swap(a: usize, b: usize) -> Self {
        Self::new("SWAP", &[a, b], &[])
    }

    /// Measurement, recorded against `target`.
    pub fn measure(target: usize) -> Self {
        Self::new("M", &[target], &[])
    }

    /// The name as written.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Resolve the name to a known gate kind.
    pub fn kind(&self) -> Option<GateKind> {
        GateKind::from_name(&self.name)
    }

    /// Target qubits, in order.
    pub fn targets(&self) -> &[usize] {
        &self.targets
    }

    /// Real parameters, in order.
    pub fn params(&self) -> &[f64] {
        &self.params
    }

    /// Rotation angle: the first parameter, or [`DEFAULT_ROTATION_ANGLE`].
    pub fn angle(&self) -> f64 {
        self.params
            .first()
            .copied()
            .unwrap_or(DEFAULT_ROTATION_ANGLE)
    }

    /// Check if this gate touches `qubit`.
    pub fn acts_on(&self, qubit: usize) -> bool {
        self.targets.contains(&qubit)
    }
}

impl fmt::Display for Gate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}(", self.name)?;
        for (i, t) in self.targets.iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            write!(f, "q{t}")?;
        }
        f.write_str(")")?;
        if !self.params.is_empty() {
            f.write_str("[")?;
            for (i, p) in self.params.iter().enumerate() {
                if i > 0 {
                    f.write_str(", ")?;
                }
                write!(f, "{p}")?;
            }
            f.write_str("]")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    #[test]
    fn test_gate_kind_properties() {
        assert_eq!(GateKind::H.num_qubits(), 1);
        assert_eq!(GateKind::Cnot.num_qubits(), 2);
        assert_eq!(GateKind::Swap.num_qubits(), 2);

        assert_eq!(GateKind::Rx.num_params(), 1);
        assert_eq!(GateKind::H.num_params(), 0);
        assert!(GateKind::Measure.is_measurement());
        assert!(!GateKind::Rz.is_measurement());
    }

    #[test]
    fn test_from_name_aliases() {
        assert_eq!(GateKind::from_name("h"), Some(GateKind::H));
        assert_eq!(GateKind::from_name("Measure"), Some(GateKind::Measure));
        assert_eq!(GateKind::from_name("M"), Some(GateKind::Measure));
        assert_eq!(GateKind::from_name("cx"), Some(GateKind::Cnot));
        assert_eq!(GateKind::from_name("rz"), Some(GateKind::Rz));
        assert_eq!(GateKind::from_name("TOFFOLI"), None);
    }

    #[test]
    fn test_gate_accessors() {
        let g = Gate::rx(2, PI);
        assert_eq!(g.name(), "RX");
        assert_eq!(g.kind(), Some(GateKind::Rx));
        assert_eq!(g.targets(), &[2]);
        assert_eq!(g.angle(), PI);
        assert!(g.acts_on(2));
        assert!(!g.acts_on(0));
    }

    #[test]
    fn test_rotation_without_params_defaults_to_zero() {
        let g = Gate::new("RY", &[0], &[]);
        assert_eq!(g.angle(), DEFAULT_ROTATION_ANGLE);
        assert_eq!(g.angle(), 0.0);
    }

    #[test]
    fn test_gate_display() {
        assert_eq!(Gate::cnot(0, 1).to_string(), "CNOT(q0,q1)");
        assert_eq!(Gate::rz(1, 0.5).to_string(), "RZ(q1)[0.5]");
    }
}

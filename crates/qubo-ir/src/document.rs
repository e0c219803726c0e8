//! JSON circuit documents.
//!
//! The document shape matches the gate payloads exchanged with HTTP clients:
//!
//! ```json
//! {
//!   "num_qubits": 2,
//!   "gates": [
//!     {"gate_type": "H", "targets": [0]},
//!     {"gate_type": "CNOT", "controls": [0], "targets": [1]},
//!     {"name": "RZ", "targets": [1], "params": [0.5]}
//!   ]
//! }
//! ```
//!
//! `gate_type` and `name` are interchangeable. `controls` only matters for
//! CNOT, where it is prepended to `targets`.

use serde::{Deserialize, Serialize};

use crate::circuit::Circuit;
use crate::error::{IrError, IrResult};
use crate::gate::{Gate, GateKind};

/// Serialized form of a [`Circuit`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CircuitSpec {
    /// Number of qubits.
    pub num_qubits: usize,
    /// Gates in application order.
    #[serde(default)]
    pub gates: Vec<GateSpec>,
}

/// Serialized form of a [`Gate`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GateSpec {
    /// Gate name.
    #[serde(alias = "gate_type")]
    pub name: String,
    /// Target qubits.
    #[serde(default)]
    pub targets: Vec<usize>,
    /// Control qubits, used by CNOT only.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub controls: Vec<usize>,
    /// Real parameters.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub params: Vec<f64>,
}

impl GateSpec {
    /// Qubit operands in gate order.
    pub fn operands(&self) -> Vec<usize> {
        match GateKind::from_name(&self.name) {
            Some(GateKind::Cnot) if !self.controls.is_empty() => self
                .controls
                .iter()
                .chain(&self.targets)
                .copied()
                .collect(),
            _ => self.targets.clone(),
        }
    }

    /// Build the gate this entry describes.
    pub fn to_gate(&self) -> Gate {
        Gate::new(self.name.clone(), &self.operands(), &self.params)
    }
}

impl From<&Gate> for GateSpec {
    fn from(gate: &Gate) -> Self {
        Self {
            name: gate.name().to_string(),
            targets: gate.targets().to_vec(),
            controls: vec![],
            params: gate.params().to_vec(),
        }
    }
}

impl TryFrom<CircuitSpec> for Circuit {
    type Error = IrError;

    fn try_from(spec: CircuitSpec) -> IrResult<Self> {
        let mut circuit = Circuit::new(spec.num_qubits)?;
        for gate in &spec.gates {
            circuit.push(gate.to_gate())?;
        }
        Ok(circuit)
    }
}

impl From<Circuit> for CircuitSpec {
    fn from(circuit: Circuit) -> Self {
        Self {
            num_qubits: circuit.num_qubits(),
            gates: circuit.gates().iter().map(GateSpec::from).collect(),
        }
    }
}

impl Circuit {
    /// Parse and validate a circuit from a JSON document.
    pub fn from_json(source: &str) -> IrResult<Self> {
        let spec: CircuitSpec = serde_json::from_str(source)?;
        Circuit::try_from(spec)
    }

    /// Serialize this circuit to a pretty-printed JSON document.
    pub fn to_json(&self) -> IrResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

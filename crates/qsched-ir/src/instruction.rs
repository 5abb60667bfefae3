//! Instructions combining gates with operands and a cycle cost.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::gate::StandardGate;
use crate::qubit::QubitId;

/// Anything the hazard scheduler can place on a timeline.
///
/// The scheduler only ever looks at the ordered operand list, the latency
/// and a textual label. By convention the last operand is the one the
/// instruction writes; every earlier operand is only read.
pub trait Schedulable {
    /// Ordered operand list; the last entry is the written operand.
    fn operands(&self) -> &[QubitId];

    /// Duration in cycles.
    fn latency(&self) -> u32;

    /// Textual form used in diagnostics and exported schedules.
    fn label(&self) -> String;
}

impl<T: Schedulable + ?Sized> Schedulable for &T {
    fn operands(&self) -> &[QubitId] {
        (**self).operands()
    }

    fn latency(&self) -> u32 {
        (**self).latency()
    }

    fn label(&self) -> String {
        (**self).label()
    }
}

/// A gate applied to concrete qubits.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Instruction {
    /// The gate being applied.
    pub gate: StandardGate,
    /// Qubits this instruction operates on, target last.
    pub qubits: Vec<QubitId>,
    /// Duration in cycles.
    pub latency: u32,
}

impl Instruction {
    /// Create a gate instruction with the gate's default latency.
    pub fn gate(gate: StandardGate, qubits: impl IntoIterator<Item = QubitId>) -> Self {
        let latency = gate.default_latency();
        Self {
            gate,
            qubits: qubits.into_iter().collect(),
            latency,
        }
    }

    /// Create a single-qubit gate instruction.
    pub fn single_qubit_gate(gate: StandardGate, qubit: QubitId) -> Self {
        Self::gate(gate, [qubit])
    }

    /// Create a two-qubit gate instruction.
    pub fn two_qubit_gate(gate: StandardGate, q1: QubitId, q2: QubitId) -> Self {
        Self::gate(gate, [q1, q2])
    }

    /// Override the latency.
    #[must_use]
    pub fn with_latency(mut self, latency: u32) -> Self {
        self.latency = latency;
        self
    }

    /// Get the name of the gate.
    pub fn name(&self) -> &'static str {
        self.gate.name()
    }

    /// QASM-style textual form, e.g. `cnot q0,q1` or `rz q2, 0.5`.
    pub fn qasm(&self) -> String {
        let operands = self
            .qubits
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(",");
        match self.gate.angle() {
            Some(angle) => format!("{} {}, {}", self.name(), operands, angle),
            None => format!("{} {}", self.name(), operands),
        }
    }
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.qasm())
    }
}

impl Schedulable for Instruction {
    fn operands(&self) -> &[QubitId] {
        &self.qubits
    }

    fn latency(&self) -> u32 {
        self.latency
    }

    fn label(&self) -> String {
        self.qasm()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_qasm_label() {
        let cx = Instruction::two_qubit_gate(StandardGate::CX, QubitId(0), QubitId(1));
        assert_eq!(cx.qasm(), "cnot q0,q1");

        let rz = Instruction::single_qubit_gate(StandardGate::Rz(0.5), QubitId(2));
        assert_eq!(rz.qasm(), "rz q2, 0.5");
    }

    #[test]
    fn test_schedulable_view() {
        let inst = Instruction::gate(StandardGate::CCX, [QubitId(0), QubitId(1), QubitId(2)])
            .with_latency(7);

        assert_eq!(inst.operands().last(), Some(&QubitId(2)));
        assert_eq!(Schedulable::latency(&inst), 7);
        assert_eq!(inst.label(), "toffoli q0,q1,q2");
    }

    #[test]
    fn test_default_latency_from_gate() {
        let m = Instruction::single_qubit_gate(StandardGate::Measure, QubitId(0));
        assert_eq!(m.latency, 4);
    }

    #[test]
    fn test_serde_roundtrip_keeps_latency() {
        let inst = Instruction::single_qubit_gate(StandardGate::H, QubitId(1)).with_latency(3);
        let json = serde_json::to_string(&inst).unwrap();
        let back: Instruction = serde_json::from_str(&json).unwrap();
        assert_eq!(back, inst);
    }
}

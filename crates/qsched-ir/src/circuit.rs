//! High-level circuit builder API.

use serde::{Deserialize, Serialize};

use crate::error::{IrError, IrResult};
use crate::gate::StandardGate;
use crate::instruction::Instruction;
use crate::qubit::QubitId;

/// An ordered instruction sequence over a fixed number of qubits.
///
/// This is the input the scheduler consumes: instructions appear in
/// program order and every operand lies in `[0, num_qubits)`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Circuit {
    /// Name of the circuit.
    name: String,
    /// Size of the operand space.
    num_qubits: u32,
    /// Instructions in program order.
    instructions: Vec<Instruction>,
}

impl Circuit {
    /// Create an empty circuit over `num_qubits` qubits.
    pub fn with_size(name: impl Into<String>, num_qubits: u32) -> Self {
        Self {
            name: name.into(),
            num_qubits,
            instructions: vec![],
        }
    }

    // =========================================================================
    // Single-qubit gates
    // =========================================================================

    /// Apply Hadamard gate.
    pub fn h(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.gate(StandardGate::H, [qubit])
    }

    /// Apply Pauli-X gate.
    pub fn x(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.gate(StandardGate::X, [qubit])
    }

    /// Apply T gate.
    pub fn t(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.gate(StandardGate::T, [qubit])
    }

    /// Measure a qubit.
    pub fn measure(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.gate(StandardGate::Measure, [qubit])
    }

    /// Measure every qubit, in index order.
    pub fn measure_all(&mut self) -> IrResult<&mut Self> {
        for q in 0..self.num_qubits {
            self.measure(QubitId(q))?;
        }
        Ok(self)
    }

    // =========================================================================
    // Multi-qubit gates
    // =========================================================================

    /// Apply CNOT gate.
    pub fn cx(&mut self, control: QubitId, target: QubitId) -> IrResult<&mut Self> {
        self.gate(StandardGate::CX, [control, target])
    }

    /// Apply a gate with its default latency.
    pub fn gate(
        &mut self,
        gate: StandardGate,
        qubits: impl IntoIterator<Item = QubitId>,
    ) -> IrResult<&mut Self> {
        self.push(Instruction::gate(gate, qubits))
    }

    /// Append a fully specified instruction.
    pub fn push(&mut self, instruction: Instruction) -> IrResult<&mut Self> {
        let expected = instruction.gate.num_qubits();
        let got = u32::try_from(instruction.qubits.len()).unwrap_or(u32::MAX);
        if expected != got {
            return Err(IrError::QubitCountMismatch {
                gate_name: instruction.name().to_string(),
                expected,
                got,
            });
        }

        if let Some(&qubit) = instruction.qubits.iter().find(|q| q.0 >= self.num_qubits) {
            return Err(IrError::QubitNotFound {
                qubit,
                num_qubits: self.num_qubits,
                gate_name: Some(instruction.name().to_string()),
            });
        }

        self.instructions.push(instruction);
        Ok(self)
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// Get the circuit name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get the number of qubits.
    pub fn num_qubits(&self) -> usize {
        self.num_qubits as usize
    }

    /// Get the instructions in program order.
    pub fn instructions(&self) -> &[Instruction] {
        &self.instructions
    }

    /// Get the number of instructions.
    pub fn len(&self) -> usize {
        self.instructions.len()
    }

    /// Check if the circuit has no instructions.
    pub fn is_empty(&self) -> bool {
        self.instructions.is_empty()
    }

    // =========================================================================
    // Preset circuits
    // =========================================================================

    /// Create an n-qubit GHZ preparation: H on q0 followed by a CNOT chain.
    pub fn ghz(n: u32) -> IrResult<Self> {
        let mut circuit = Self::with_size("ghz", n);
        if n == 0 {
            return Ok(circuit);
        }
        circuit.h(QubitId(0))?;
        for i in 0..n - 1 {
            circuit.cx(QubitId(i), QubitId(i + 1))?;
        }
        circuit.measure_all()?;
        Ok(circuit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_chain() {
        let mut circuit = Circuit::with_size("bell", 2);
        circuit
            .h(QubitId(0))
            .unwrap()
            .cx(QubitId(0), QubitId(1))
            .unwrap();

        assert_eq!(circuit.len(), 2);
        assert_eq!(circuit.instructions()[1].qasm(), "cnot q0,q1");
    }

    #[test]
    fn test_generic_gate_uses_default_latency() {
        let mut circuit = Circuit::with_size("toffoli", 3);
        circuit
            .gate(StandardGate::CCX, [QubitId(0), QubitId(1), QubitId(2)])
            .unwrap()
            .t(QubitId(2))
            .unwrap();

        let toffoli = &circuit.instructions()[0];
        assert_eq!(toffoli.latency, StandardGate::CCX.default_latency());
        assert_eq!(toffoli.qubits.len(), 3);
        assert_eq!(circuit.instructions()[1].latency, 1);
    }

    #[test]
    fn test_qubit_out_of_range() {
        let mut circuit = Circuit::with_size("small", 1);
        let result = circuit.cx(QubitId(0), QubitId(3));

        match result {
            Err(IrError::QubitNotFound {
                qubit,
                num_qubits,
                gate_name,
            }) => {
                assert_eq!(qubit, QubitId(3));
                assert_eq!(num_qubits, 1);
                assert_eq!(gate_name.as_deref(), Some("cnot"));
            }
            _ => panic!("Expected QubitNotFound error"),
        }
    }

    #[test]
    fn test_arity_mismatch() {
        let mut circuit = Circuit::with_size("arity", 2);
        let result = circuit.push(Instruction::gate(StandardGate::CX, [QubitId(0)]));
        assert!(matches!(
            result,
            Err(IrError::QubitCountMismatch {
                expected: 2,
                got: 1,
                ..
            })
        ));
    }

    #[test]
    fn test_ghz() {
        let circuit = Circuit::ghz(3).unwrap();
        // h, 2 cnots, 3 measurements
        assert_eq!(circuit.len(), 6);
        assert_eq!(circuit.num_qubits(), 3);
    }
}

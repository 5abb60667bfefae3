//! Quantum gate types.

use serde::{Deserialize, Serialize};

/// Standard gates with known arity and default cycle cost.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum StandardGate {
    // Single-qubit Pauli gates
    /// Identity gate.
    I,
    /// Pauli-X gate.
    X,
    /// Pauli-Y gate.
    Y,
    /// Pauli-Z gate.
    Z,

    // Single-qubit Clifford gates
    /// Hadamard gate.
    H,
    /// S gate (sqrt(Z)).
    S,
    /// S-dagger gate.
    Sdg,
    /// T gate (fourth root of Z).
    T,
    /// T-dagger gate.
    Tdg,

    // Single-qubit rotation gates
    /// Rotation around X axis.
    Rx(f64),
    /// Rotation around Y axis.
    Ry(f64),
    /// Rotation around Z axis.
    Rz(f64),

    // State preparation and readout
    /// Prepare the qubit in |0⟩.
    PrepZ,
    /// Measure in the Z basis.
    Measure,

    // Two-qubit gates
    /// Controlled-X (CNOT) gate.
    CX,
    /// Controlled-Z gate.
    CZ,
    /// SWAP gate.
    Swap,

    // Three-qubit gates
    /// Toffoli gate (CCX).
    CCX,
}

impl StandardGate {
    /// Get the name of this gate.
    #[inline]
    pub fn name(&self) -> &'static str {
        match self {
            StandardGate::I => "i",
            StandardGate::X => "x",
            StandardGate::Y => "y",
            StandardGate::Z => "z",
            StandardGate::H => "h",
            StandardGate::S => "s",
            StandardGate::Sdg => "sdag",
            StandardGate::T => "t",
            StandardGate::Tdg => "tdag",
            StandardGate::Rx(_) => "rx",
            StandardGate::Ry(_) => "ry",
            StandardGate::Rz(_) => "rz",
            StandardGate::PrepZ => "prepz",
            StandardGate::Measure => "measure",
            StandardGate::CX => "cnot",
            StandardGate::CZ => "cz",
            StandardGate::Swap => "swap",
            StandardGate::CCX => "toffoli",
        }
    }

    /// Get the number of qubits this gate operates on.
    #[inline]
    pub fn num_qubits(&self) -> u32 {
        match self {
            StandardGate::I
            | StandardGate::X
            | StandardGate::Y
            | StandardGate::Z
            | StandardGate::H
            | StandardGate::S
            | StandardGate::Sdg
            | StandardGate::T
            | StandardGate::Tdg
            | StandardGate::Rx(_)
            | StandardGate::Ry(_)
            | StandardGate::Rz(_)
            | StandardGate::PrepZ
            | StandardGate::Measure => 1,

            StandardGate::CX | StandardGate::CZ | StandardGate::Swap => 2,

            StandardGate::CCX => 3,
        }
    }

    /// Default duration of this gate in scheduler cycles.
    ///
    /// Readout and preparation dominate; entangling gates take longer than
    /// single-qubit rotations.
    #[inline]
    pub fn default_latency(&self) -> u32 {
        match self {
            StandardGate::PrepZ | StandardGate::Measure => 4,
            StandardGate::CCX => 3,
            StandardGate::CX | StandardGate::CZ | StandardGate::Swap => 2,
            _ => 1,
        }
    }

    /// Rotation angle, if this gate carries one.
    pub fn angle(&self) -> Option<f64> {
        match self {
            StandardGate::Rx(a) | StandardGate::Ry(a) | StandardGate::Rz(a) => Some(*a),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gate_arity() {
        assert_eq!(StandardGate::H.num_qubits(), 1);
        assert_eq!(StandardGate::CX.num_qubits(), 2);
        assert_eq!(StandardGate::CCX.num_qubits(), 3);
        assert_eq!(StandardGate::Measure.num_qubits(), 1);
    }

    #[test]
    fn test_default_latency() {
        assert_eq!(StandardGate::X.default_latency(), 1);
        assert_eq!(StandardGate::Rz(0.5).default_latency(), 1);
        assert_eq!(StandardGate::CZ.default_latency(), 2);
        assert_eq!(StandardGate::Measure.default_latency(), 4);
    }

    #[test]
    fn test_angle() {
        assert_eq!(StandardGate::Ry(1.5).angle(), Some(1.5));
        assert_eq!(StandardGate::H.angle(), None);
    }
}

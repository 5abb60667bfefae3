//! Qubit operand identifiers.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Index of a qubit within the operand space `[0, num_qubits)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct QubitId(pub u32);

impl QubitId {
    /// The operand as a slot index into per-qubit tables.
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for QubitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "q{}", self.0)
    }
}

impl From<u32> for QubitId {
    fn from(id: u32) -> Self {
        QubitId(id)
    }
}

impl TryFrom<usize> for QubitId {
    type Error = std::num::TryFromIntError;

    fn try_from(id: usize) -> Result<Self, Self::Error> {
        u32::try_from(id).map(QubitId)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_qubit_display() {
        assert_eq!(format!("{}", QubitId(0)), "q0");
        assert_eq!(format!("{}", QubitId(12)), "q12");
    }

    #[test]
    fn test_qubit_index() {
        assert_eq!(QubitId(7).index(), 7);
        assert_eq!(QubitId::try_from(3_usize).unwrap(), QubitId(3));
    }
}

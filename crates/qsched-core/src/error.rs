//! Error types for graph construction and scheduling.

use qsched_ir::QubitId;
use thiserror::Error;

/// Result type for scheduler operations.
pub type SchedResult<T> = Result<T, SchedError>;

/// Errors that can occur while building or scheduling a dependency graph.
///
/// All of these are input-contract or invariant violations; none of them is
/// transient and the scheduler never retries.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SchedError {
    /// An instruction references an operand outside `[0, num_qubits)`.
    #[error(
        "Operand {operand} out of range for {num_qubits} qubits (instruction {position}: '{label}')"
    )]
    OperandOutOfRange {
        /// The offending operand.
        operand: QubitId,
        /// Size of the operand space.
        num_qubits: usize,
        /// Position of the instruction in the input sequence.
        position: usize,
        /// Textual form of the instruction.
        label: String,
    },

    /// An instruction has no operands, so it has no written operand.
    #[error("Instruction {position} ('{label}') has no operands")]
    EmptyOperands {
        /// Position of the instruction in the input sequence.
        position: usize,
        /// Textual form of the instruction.
        label: String,
    },

    /// Topological sort found a cycle in the dependency graph.
    #[error("Dependency graph is not acyclic: ordered {ordered} of {total} nodes")]
    CycleDetected {
        /// Nodes emitted before the sort got stuck.
        ordered: usize,
        /// Total number of nodes in the graph.
        total: usize,
    },

    /// A graph invariant does not hold, or a node order does not match the graph.
    #[error("Invalid dependency graph: {0}")]
    InvalidGraph(String),

    /// Configuration could not be parsed.
    #[error("Invalid configuration: {0}")]
    Config(#[from] serde_json::Error),
}

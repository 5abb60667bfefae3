//! qsched Instruction Model
//!
//! This crate provides the instruction-level data structures consumed by
//! the qsched hazard scheduler: qubit operands, gates with a cycle cost,
//! and ordered instruction sequences.
//!
//! # Core Components
//!
//! - **Operands**: [`QubitId`] indexes the operand space `[0, num_qubits)`
//! - **Gates**: [`StandardGate`] for built-in gates with default latencies
//! - **Instructions**: [`Instruction`] combining a gate with its operands and latency
//! - **Circuit**: [`Circuit`] high-level builder over a fixed qubit count
//! - **Scheduler seam**: [`Schedulable`], the only view of an instruction the
//!   scheduler relies on
//!
//! # Operand convention
//!
//! The last operand of an instruction is the one it writes; all earlier
//! operands are read. A CNOT `cnot q0,q1` therefore reads `q0` and writes
//! `q1`, and a single-operand gate writes its only qubit.
//!
//! # Example
//!
//! ```rust
//! use qsched_ir::{Circuit, QubitId, Schedulable};
//!
//! let mut circuit = Circuit::with_size("bell", 2);
//! circuit.h(QubitId(0)).unwrap();
//! circuit.cx(QubitId(0), QubitId(1)).unwrap();
//!
//! let cx = &circuit.instructions()[1];
//! assert_eq!(cx.label(), "cnot q0,q1");
//! assert_eq!(cx.operands().last(), Some(&QubitId(1)));
//! ```

pub mod circuit;
pub mod error;
pub mod gate;
pub mod instruction;
pub mod qubit;

pub use circuit::Circuit;
pub use error::{IrError, IrResult};
pub use gate::StandardGate;
pub use instruction::{Instruction, Schedulable};
pub use qubit::QubitId;

//! qsched Scheduling Core
//!
//! Hazard analysis and list scheduling for ordered quantum instruction
//! sequences. Instructions go in, a cycle per instruction comes out.
//!
//! # Pipeline
//!
//! 1. [`HazardGraphBuilder`] turns the sequence into a [`DependencyGraph`]
//!    with RAW, WAW and WAR edges plus `Entry`/`Exit` sentinels.
//! 2. [`TopologicalOrderer`] linearizes the graph deterministically.
//! 3. [`AsapScheduler`] and [`AlapScheduler`] assign earliest and latest
//!    start cycles. Both implement [`SchedulingPass`].
//! 4. [`slack`] and [`CriticalPath`] compare the two schedules.
//!
//! [`Scheduler`] bundles these steps.
//!
//! # Example
//!
//! ```rust
//! use qsched_core::Scheduler;
//! use qsched_ir::{Instruction, QubitId, StandardGate};
//!
//! let program = vec![
//!     Instruction::single_qubit_gate(StandardGate::H, QubitId(0)),
//!     Instruction::two_qubit_gate(StandardGate::CX, QubitId(0), QubitId(1)),
//!     Instruction::single_qubit_gate(StandardGate::X, QubitId(2)),
//! ];
//!
//! let analysis = Scheduler::new().analyze(&program, 3).unwrap();
//! let graph = &analysis.graph;
//!
//! assert_eq!(analysis.asap.instruction_cycles(graph), vec![1, 2, 1]);
//! assert_eq!(analysis.alap.instruction_cycles(graph), vec![1, 2, 2]);
//! assert_eq!(analysis.length(), 3);
//! ```

pub mod alap;
pub mod analysis;
pub mod asap;
pub mod builder;
pub mod config;
pub mod error;
pub mod graph;
pub mod pass;
pub mod schedule;
pub mod scheduler;
pub mod topo;

pub use alap::AlapScheduler;
pub use analysis::{CriticalPath, slack};
pub use asap::AsapScheduler;
pub use builder::HazardGraphBuilder;
pub use config::HazardConfig;
pub use error::{SchedError, SchedResult};
pub use graph::{DepEdge, DependencyGraph, EdgeIndex, HazardKind, InstructionNode, Node, NodeIndex};
pub use pass::SchedulingPass;
pub use schedule::{Cycle, CycleAssignment, Direction, Schedule};
pub use scheduler::{ScheduleAnalysis, Scheduler};
pub use topo::{TopologicalOrderer, is_topological};

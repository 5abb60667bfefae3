//! qsched Export
//!
//! Renders dependency graphs and schedules produced by `qsched-core`:
//!
//! - [`render_listing`]: one line per cycle, instructions joined by `" | "`
//! - [`render_dot`]: Graphviz digraph, optionally with a cycle timeline and
//!   the critical path in red
//! - [`render_graph_description`]: sectioned node/edge dump
//! - [`adjacency_matrix`] and [`render_matrix`]: instruction dependency matrix
//!
//! Every `render_*` function has a `write_*` counterpart streaming to any
//! [`std::io::Write`].
//!
//! # Example
//!
//! ```rust
//! use qsched_core::Scheduler;
//! use qsched_export::{DotOptions, render_dot};
//! use qsched_ir::{Instruction, QubitId, StandardGate};
//!
//! let program = vec![
//!     Instruction::single_qubit_gate(StandardGate::H, QubitId(0)),
//!     Instruction::two_qubit_gate(StandardGate::CX, QubitId(0), QubitId(1)),
//! ];
//! let analysis = Scheduler::new().analyze(&program, 2).unwrap();
//!
//! let options = DotOptions::new()
//!     .with_timeline(&analysis.asap)
//!     .with_critical_path(&analysis.critical_path);
//! let dot = render_dot(&analysis.graph, &options).unwrap();
//! assert!(dot.starts_with("digraph {"));
//! assert!(dot.contains("color=red"));
//! ```

pub mod description;
pub mod dot;
pub mod error;
pub mod listing;
pub mod matrix;

pub use description::{render_graph_description, write_graph_description};
pub use dot::{DotOptions, render_dot, write_dot};
pub use error::{ExportError, ExportResult};
pub use listing::{render_listing, write_listing};
pub use matrix::{adjacency_matrix, render_matrix, write_matrix};

/// Append `line` and a newline to `out`.
pub(crate) fn push_line(out: &mut String, line: &str) {
    out.push_str(line);
    out.push('\n');
}

//! Error types for the exporters.

use thiserror::Error;

/// Result type for export operations.
pub type ExportResult<T> = Result<T, ExportError>;

/// Errors that can occur while rendering or writing an export.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ExportError {
    /// Writing the rendered output failed.
    #[error("Failed to write export: {0}")]
    Io(#[from] std::io::Error),

    /// The schedule does not assign a cycle to a node of the graph, i.e. it
    /// was computed for a different graph.
    #[error("Schedule has no cycle for node {node} ('{label}')")]
    ScheduleMismatch {
        /// Index of the node in the dependency graph.
        node: usize,
        /// Label of the node.
        label: String,
    },
}

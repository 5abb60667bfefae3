//! Scheduling pass trait.

use crate::error::{SchedError, SchedResult};
use crate::graph::{DependencyGraph, NodeIndex};
use crate::schedule::{Direction, Schedule};
use crate::topo::is_topological;

/// A list-scheduling pass over a dependency graph.
///
/// Passes read the graph and a topological order of it, and return a fresh
/// [`Schedule`]. They never modify the graph, so two passes may run on the
/// same graph concurrently.
pub trait SchedulingPass: Send + Sync {
    /// Get the name of this pass.
    fn name(&self) -> &str;

    /// Which timeline anchor this pass computes.
    fn direction(&self) -> Direction;

    /// Assign a cycle to every node of `graph`.
    ///
    /// `order` must be a topological order of `graph` starting at `Entry`
    /// and ending at `Exit`, as returned by
    /// [`TopologicalOrderer::order`](crate::TopologicalOrderer::order).
    fn schedule(&self, graph: &DependencyGraph, order: &[NodeIndex]) -> SchedResult<Schedule>;
}

/// Reject orders that do not belong to `graph`.
pub(crate) fn check_order(graph: &DependencyGraph, order: &[NodeIndex]) -> SchedResult<()> {
    if order.first() != Some(&graph.entry()) || order.last() != Some(&graph.exit()) {
        return Err(SchedError::InvalidGraph(
            "node order must start at Entry and end at Exit".into(),
        ));
    }
    if !is_topological(graph, order) {
        return Err(SchedError::InvalidGraph(
            "node order is not a topological order of the graph".into(),
        ));
    }
    Ok(())
}

pub(crate) fn unscheduled(node: NodeIndex, graph: &DependencyGraph) -> SchedError {
    SchedError::InvalidGraph(format!(
        "node {} ('{}') was reached before its neighbours were scheduled",
        node.index(),
        graph.node(node).map_or("?", |n| n.label())
    ))
}

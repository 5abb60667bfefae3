//! Topological ordering of the dependency graph.

use std::cmp::Reverse;
use std::collections::BinaryHeap;

use petgraph::visit::EdgeRef;
use tracing::{error, instrument};

use crate::error::{SchedError, SchedResult};
use crate::graph::{DependencyGraph, NodeIndex};

/// Produces a linear extension of a [`DependencyGraph`].
///
/// Kahn's algorithm with a min-heap on node index: among nodes that are
/// ready at the same time, the one created first (i.e. earliest in the input
/// sequence) is emitted first. The order is therefore deterministic for a
/// fixed graph, starts with `Entry` and ends with `Exit`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TopologicalOrderer;

impl TopologicalOrderer {
    /// Order every node of `graph` so that each edge points forward.
    ///
    /// Returns [`SchedError::CycleDetected`] if the graph is not acyclic.
    #[instrument(skip_all, fields(nodes = graph.node_count()))]
    pub fn order(&self, graph: &DependencyGraph) -> SchedResult<Vec<NodeIndex>> {
        let total = graph.node_count();
        let mut in_degree: Vec<usize> = graph
            .node_indices()
            .map(|n| graph.in_degree(n))
            .collect();

        let mut ready: BinaryHeap<Reverse<NodeIndex>> = graph
            .node_indices()
            .filter(|n| in_degree[n.index()] == 0)
            .map(Reverse)
            .collect();

        let mut order = Vec::with_capacity(total);
        while let Some(Reverse(node)) = ready.pop() {
            order.push(node);
            for edge in graph.outgoing(node) {
                let target = edge.target();
                in_degree[target.index()] -= 1;
                if in_degree[target.index()] == 0 {
                    ready.push(Reverse(target));
                }
            }
        }

        if order.len() != total {
            error!(
                ordered = order.len(),
                total, "Dependency graph contains a cycle"
            );
            return Err(SchedError::CycleDetected {
                ordered: order.len(),
                total,
            });
        }

        Ok(order)
    }
}

/// Check that `order` lists every node of `graph` exactly once and that
/// every edge points forward in it.
pub fn is_topological(graph: &DependencyGraph, order: &[NodeIndex]) -> bool {
    let mut rank = vec![usize::MAX; graph.node_count()];
    if order.len() != graph.node_count() {
        return false;
    }
    for (i, node) in order.iter().enumerate() {
        match rank.get_mut(node.index()) {
            Some(slot) if *slot == usize::MAX => *slot = i,
            _ => return false,
        }
    }
    graph
        .edges()
        .all(|e| rank[e.source().index()] < rank[e.target().index()])
}

//! Slack and critical-path analysis over an ASAP/ALAP schedule pair.

use petgraph::visit::EdgeRef;
use rustc_hash::FxHashSet;
use tracing::debug;

use crate::error::{SchedError, SchedResult};
use crate::graph::{DependencyGraph, EdgeIndex, NodeIndex};
use crate::schedule::{Cycle, CycleAssignment, Direction, Schedule};

/// Per-node scheduling freedom: `alap(node) - asap(node)`.
///
/// Both schedules must come from the same graph. Fails with
/// [`SchedError::InvalidGraph`] if the directions are wrong, if a node is
/// missing from either schedule, or if some node would have negative slack.
pub fn slack(asap: &Schedule, alap: &Schedule) -> SchedResult<CycleAssignment> {
    if asap.direction() != Direction::Asap || alap.direction() != Direction::Alap {
        return Err(SchedError::InvalidGraph(format!(
            "slack needs an ASAP and an ALAP schedule, got {} and {}",
            asap.direction(),
            alap.direction()
        )));
    }
    if asap.cycles().len() != alap.cycles().len() {
        return Err(SchedError::InvalidGraph(
            "ASAP and ALAP schedules cover different graphs".into(),
        ));
    }

    let mut slack = CycleAssignment::with_capacity(asap.cycles().len());
    for &node in asap.order() {
        let (Some(early), Some(late)) = (asap.cycle_of(node), alap.cycle_of(node)) else {
            return Err(SchedError::InvalidGraph(format!(
                "node {} is missing from one of the schedules",
                node.index()
            )));
        };
        let freedom = late.checked_sub(early).ok_or_else(|| {
            SchedError::InvalidGraph(format!(
                "node {} has ALAP cycle {late} before ASAP cycle {early}",
                node.index()
            ))
        })?;
        slack.insert(node, freedom);
    }
    Ok(slack)
}

/// Nodes and edges that cannot move without stretching the schedule.
///
/// A node is critical when its slack is zero. An edge `u → v` is critical
/// when both ends are critical and the edge is tight:
/// `asap(v) == asap(u) + weight`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CriticalPath {
    nodes: Vec<NodeIndex>,
    edges: FxHashSet<EdgeIndex>,
}

impl CriticalPath {
    /// Derive the critical path of `graph` from its two schedules.
    pub fn compute(
        graph: &DependencyGraph,
        asap: &Schedule,
        alap: &Schedule,
    ) -> SchedResult<Self> {
        let slack = slack(asap, alap)?;
        let critical = |node: NodeIndex| slack.get(node) == Some(0);

        let nodes: Vec<NodeIndex> = asap
            .order()
            .iter()
            .copied()
            .filter(|&n| critical(n))
            .collect();

        let mut edges = FxHashSet::default();
        for edge in graph.edges() {
            let (u, v) = (edge.source(), edge.target());
            if !critical(u) || !critical(v) {
                continue;
            }
            if let (Some(start), Some(end)) = (asap.cycle_of(u), asap.cycle_of(v)) {
                if start + Cycle::from(edge.weight().weight) == end {
                    edges.insert(edge.id());
                }
            }
        }

        debug!(
            nodes = nodes.len(),
            edges = edges.len(),
            "Critical path computed"
        );
        Ok(Self { nodes, edges })
    }

    /// Zero-slack nodes in topological order, `Entry` first.
    pub fn nodes(&self) -> &[NodeIndex] {
        &self.nodes
    }

    /// Check if `node` has zero slack.
    pub fn contains_node(&self, node: NodeIndex) -> bool {
        self.nodes.contains(&node)
    }

    /// Check if `edge` lies on the critical path.
    pub fn is_critical_edge(&self, edge: EdgeIndex) -> bool {
        self.edges.contains(&edge)
    }

    /// Number of critical edges.
    pub fn num_edges(&self) -> usize {
        self.edges.len()
    }

    /// Check if no node is critical (only for a default-constructed value).
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

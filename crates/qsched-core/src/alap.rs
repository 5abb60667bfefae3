//! As-late-as-possible scheduling.

use petgraph::visit::EdgeRef;
use tracing::{debug, instrument};

use crate::error::{SchedError, SchedResult};
use crate::graph::{DependencyGraph, NodeIndex};
use crate::pass::{SchedulingPass, check_order, unscheduled};
use crate::schedule::{Cycle, CycleAssignment, Direction, Schedule};

/// Backward pass anchored at `Exit`, the dual of
/// [`AsapScheduler`](crate::AsapScheduler).
///
/// Nodes are visited in reverse topological order. Each node is placed
/// relative to `Exit` at the minimum over its outgoing edges `u → v` of
/// `cycle(v) - weight`; those offsets are non-positive. The horizon is the
/// negated offset of `Entry` (the longest `Entry → Exit` path), and adding
/// it back gives cycles with `Entry` at 0 and `Exit` at the same length the
/// ASAP pass reports.
#[derive(Debug, Clone, Copy, Default)]
pub struct AlapScheduler;

impl SchedulingPass for AlapScheduler {
    fn name(&self) -> &str {
        "alap"
    }

    fn direction(&self) -> Direction {
        Direction::Alap
    }

    #[instrument(skip_all, fields(nodes = graph.node_count()))]
    fn schedule(&self, graph: &DependencyGraph, order: &[NodeIndex]) -> SchedResult<Schedule> {
        check_order(graph, order)?;

        let mut offsets: Vec<Option<i64>> = vec![None; graph.node_count()];
        offsets[graph.exit().index()] = Some(0);

        for &node in order[..order.len() - 1].iter().rev() {
            let mut latest: Option<i64> = None;
            for edge in graph.outgoing(node) {
                let target = offsets[edge.target().index()]
                    .ok_or_else(|| unscheduled(node, graph))?;
                let start = target - i64::from(edge.weight().weight);
                latest = Some(latest.map_or(start, |c| c.min(start)));
            }
            offsets[node.index()] = Some(latest.ok_or_else(|| unscheduled(node, graph))?);
        }

        let entry_offset = offsets[graph.entry().index()]
            .ok_or_else(|| unscheduled(graph.entry(), graph))?;
        let horizon = -entry_offset;

        let mut assignment = CycleAssignment::with_capacity(order.len());
        for &node in order {
            let offset = offsets[node.index()].ok_or_else(|| unscheduled(node, graph))?;
            let cycle = Cycle::try_from(offset + horizon).map_err(|_| {
                SchedError::InvalidGraph(format!(
                    "node {} ('{}') is not reachable from Entry",
                    node.index(),
                    graph[node].label()
                ))
            })?;
            assignment.insert(node, cycle);
        }
        let length = Cycle::try_from(horizon)
            .map_err(|_| SchedError::InvalidGraph("negative schedule horizon".into()))?;

        debug!(length, "ALAP schedule computed");
        Ok(Schedule::new(
            Direction::Alap,
            order.to_vec(),
            assignment,
            length,
        ))
    }
}

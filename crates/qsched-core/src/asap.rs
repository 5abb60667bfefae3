//! As-soon-as-possible scheduling.

use petgraph::visit::EdgeRef;
use tracing::{debug, instrument};

use crate::error::SchedResult;
use crate::graph::{DependencyGraph, NodeIndex};
use crate::pass::{SchedulingPass, check_order, unscheduled};
use crate::schedule::{Cycle, CycleAssignment, Direction, Schedule};

/// Forward critical-path pass.
///
/// `Entry` sits in cycle 0; every other node starts at the maximum over its
/// incoming edges `u → v` of `cycle(u) + weight`. The cycle of `Exit` is the
/// schedule length.
#[derive(Debug, Clone, Copy, Default)]
pub struct AsapScheduler;

impl SchedulingPass for AsapScheduler {
    fn name(&self) -> &str {
        "asap"
    }

    fn direction(&self) -> Direction {
        Direction::Asap
    }

    #[instrument(skip_all, fields(nodes = graph.node_count()))]
    fn schedule(&self, graph: &DependencyGraph, order: &[NodeIndex]) -> SchedResult<Schedule> {
        check_order(graph, order)?;

        let mut cycles: Vec<Option<Cycle>> = vec![None; graph.node_count()];
        cycles[graph.entry().index()] = Some(0);

        for &node in &order[1..] {
            let mut earliest: Option<Cycle> = None;
            for edge in graph.incoming(node) {
                let source = cycles[edge.source().index()]
                    .ok_or_else(|| unscheduled(node, graph))?;
                let ready = source + Cycle::from(edge.weight().weight);
                earliest = Some(earliest.map_or(ready, |c| c.max(ready)));
            }
            cycles[node.index()] = Some(earliest.ok_or_else(|| unscheduled(node, graph))?);
        }

        let mut assignment = CycleAssignment::with_capacity(order.len());
        for &node in order {
            let cycle = cycles[node.index()].ok_or_else(|| unscheduled(node, graph))?;
            assignment.insert(node, cycle);
        }
        let length = assignment
            .get(graph.exit())
            .ok_or_else(|| unscheduled(graph.exit(), graph))?;

        debug!(length, "ASAP schedule computed");
        Ok(Schedule::new(
            Direction::Asap,
            order.to_vec(),
            assignment,
            length,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::HazardGraphBuilder;
    use crate::error::SchedError;
    use crate::topo::TopologicalOrderer;
    use qsched_ir::{Instruction, QubitId, StandardGate};

    fn run(program: &[Instruction], num_qubits: usize) -> (DependencyGraph, Schedule) {
        let graph = HazardGraphBuilder::new(num_qubits).build(program).unwrap();
        let order = TopologicalOrderer.order(&graph).unwrap();
        let schedule = AsapScheduler.schedule(&graph, &order).unwrap();
        (graph, schedule)
    }

    #[test]
    fn test_parallel_gates_share_cycle() {
        let program = vec![
            Instruction::single_qubit_gate(StandardGate::H, QubitId(0)),
            Instruction::single_qubit_gate(StandardGate::H, QubitId(1)),
        ];
        let (graph, schedule) = run(&program, 2);

        assert_eq!(schedule.cycle_of(graph.node_for_position(0).unwrap()), Some(1));
        assert_eq!(schedule.cycle_of(graph.node_for_position(1).unwrap()), Some(1));
        assert_eq!(schedule.length(), 2);
    }

    #[test]
    fn test_takes_max_over_predecessors() {
        // q0 chain is long (latency 4), q1 short (latency 1); cx waits for both.
        let program = vec![
            Instruction::single_qubit_gate(StandardGate::X, QubitId(0)).with_latency(4),
            Instruction::single_qubit_gate(StandardGate::X, QubitId(1)),
            Instruction::two_qubit_gate(StandardGate::CX, QubitId(0), QubitId(1)),
        ];
        let (graph, schedule) = run(&program, 2);

        let cx = graph.node_for_position(2).unwrap();
        assert_eq!(schedule.cycle_of(cx), Some(5));
        // closure edge into Exit weighs one cycle
        assert_eq!(schedule.length(), 6);
    }

    #[test]
    fn test_zero_latency_instruction() {
        let program = vec![
            Instruction::single_qubit_gate(StandardGate::Z, QubitId(0)).with_latency(0),
            Instruction::single_qubit_gate(StandardGate::X, QubitId(0)),
        ];
        let (graph, schedule) = run(&program, 1);

        let z = graph.node_for_position(0).unwrap();
        let x = graph.node_for_position(1).unwrap();
        assert_eq!(schedule.cycle_of(z), schedule.cycle_of(x));
    }

    #[test]
    fn test_rejects_foreign_order() {
        let program = vec![Instruction::single_qubit_gate(StandardGate::H, QubitId(0))];
        let graph = HazardGraphBuilder::new(1).build(&program).unwrap();
        let mut order = TopologicalOrderer.order(&graph).unwrap();
        order.reverse();

        assert!(matches!(
            AsapScheduler.schedule(&graph, &order),
            Err(SchedError::InvalidGraph(_))
        ));
    }
}

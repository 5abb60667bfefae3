//! Hazard analysis: instruction sequence → dependency graph.

use petgraph::Direction;
use petgraph::graph::DiGraph;
use qsched_ir::{QubitId, Schedulable};
use tracing::{debug, instrument, trace};

use crate::config::HazardConfig;
use crate::error::{SchedError, SchedResult};
use crate::graph::{DepEdge, DependencyGraph, HazardKind, InstructionNode, Node, NodeIndex};

/// Builds a [`DependencyGraph`] from an ordered instruction sequence.
///
/// For every operand the builder tracks the node that last wrote it and the
/// nodes that have read it since. Reads draw a RAW edge from the last
/// writer; a write draws a WAW edge from the last writer and a WAR edge from
/// every pending reader, then becomes the new last writer.
///
/// ```
/// use qsched_core::{HazardGraphBuilder, HazardKind};
/// use qsched_ir::{Instruction, QubitId, StandardGate};
///
/// let program = vec![
///     Instruction::single_qubit_gate(StandardGate::X, QubitId(0)),
///     Instruction::two_qubit_gate(StandardGate::CX, QubitId(0), QubitId(1)),
/// ];
/// let graph = HazardGraphBuilder::new(2).build(&program).unwrap();
///
/// let x = graph.node_for_position(0).unwrap();
/// let cx = graph.node_for_position(1).unwrap();
/// assert!(graph.edges_between(x, cx).any(|e| e.kind == HazardKind::Raw));
/// ```
#[derive(Debug, Clone)]
pub struct HazardGraphBuilder {
    num_qubits: usize,
    config: HazardConfig,
}

/// Per-operand state carried while the graph is under construction.
struct HazardState {
    last_writer: Vec<NodeIndex>,
    pending_readers: Vec<Vec<NodeIndex>>,
}

impl HazardState {
    fn new(num_qubits: usize, entry: NodeIndex) -> Self {
        Self {
            last_writer: vec![entry; num_qubits],
            pending_readers: vec![Vec::new(); num_qubits],
        }
    }
}

impl HazardGraphBuilder {
    /// Create a builder for the operand space `[0, num_qubits)`.
    pub fn new(num_qubits: usize) -> Self {
        Self {
            num_qubits,
            config: HazardConfig::default(),
        }
    }

    /// Replace the configuration.
    #[must_use]
    pub fn with_config(mut self, config: HazardConfig) -> Self {
        self.config = config;
        self
    }

    /// Get the configuration.
    pub fn config(&self) -> &HazardConfig {
        &self.config
    }

    /// Build the dependency graph for `instructions`.
    ///
    /// Returns [`SchedError::OperandOutOfRange`] if any operand is
    /// `>= num_qubits` and [`SchedError::EmptyOperands`] if an instruction
    /// has no operands. No partial graph is returned on error. An empty
    /// sequence yields a graph with a single `Entry → Exit` edge.
    #[instrument(skip_all, fields(instructions = instructions.len(), num_qubits = self.num_qubits))]
    pub fn build<I: Schedulable>(&self, instructions: &[I]) -> SchedResult<DependencyGraph> {
        let mut graph: DiGraph<Node, DepEdge, u32> =
            DiGraph::with_capacity(instructions.len() + 2, instructions.len() * 2 + 1);
        let entry = graph.add_node(Node::Entry);
        let mut state = HazardState::new(self.num_qubits, entry);

        for (position, instruction) in instructions.iter().enumerate() {
            self.add_instruction(&mut graph, &mut state, position, instruction)?;
        }

        let exit = graph.add_node(Node::Exit);
        self.close_at_exit(&mut graph, exit);

        let graph = DependencyGraph::from_parts(graph, entry, exit, self.num_qubits);
        debug!(
            nodes = graph.node_count(),
            edges = graph.edge_count(),
            "Built dependency graph"
        );

        if self.config.verify {
            graph.verify()?;
        }

        Ok(graph)
    }

    fn add_instruction<I: Schedulable>(
        &self,
        graph: &mut DiGraph<Node, DepEdge, u32>,
        state: &mut HazardState,
        position: usize,
        instruction: &I,
    ) -> SchedResult<()> {
        let operands = instruction.operands();
        let Some((&written, read)) = operands.split_last() else {
            return Err(SchedError::EmptyOperands {
                position,
                label: instruction.label(),
            });
        };

        if let Some(&operand) = operands.iter().find(|q| q.index() >= self.num_qubits) {
            return Err(SchedError::OperandOutOfRange {
                operand,
                num_qubits: self.num_qubits,
                position,
                label: instruction.label(),
            });
        }

        let node = graph.add_node(Node::Instruction(InstructionNode {
            position,
            latency: instruction.latency(),
            label: instruction.label(),
        }));

        for &qubit in read {
            let producer = state.last_writer[qubit.index()];
            self.add_dependency(graph, producer, node, qubit, HazardKind::Raw);

            let readers = &mut state.pending_readers[qubit.index()];
            if readers.last() != Some(&node) {
                readers.push(node);
            }
        }

        let producer = state.last_writer[written.index()];
        self.add_dependency(graph, producer, node, written, HazardKind::Waw);

        let readers = std::mem::take(&mut state.pending_readers[written.index()]);
        for reader in readers {
            // An instruction that reads and writes the same operand does not
            // wait on itself.
            if reader != node {
                self.add_dependency(graph, reader, node, written, HazardKind::War);
            }
        }
        state.last_writer[written.index()] = node;

        Ok(())
    }

    fn add_dependency(
        &self,
        graph: &mut DiGraph<Node, DepEdge, u32>,
        source: NodeIndex,
        target: NodeIndex,
        cause: QubitId,
        kind: HazardKind,
    ) {
        let weight = self.weight_from(&graph[source]);
        trace!(
            source = source.index(),
            target = target.index(),
            %cause,
            weight,
            %kind,
            "Adding dependency"
        );
        graph.add_edge(
            source,
            target,
            DepEdge {
                weight,
                cause: Some(cause),
                kind,
            },
        );
    }

    /// Weight of an edge leaving `source`: the source's latency, or the
    /// configured entry weight for `Entry`.
    fn weight_from(&self, source: &Node) -> u32 {
        match source {
            Node::Instruction(inst) => inst.latency,
            Node::Entry => self.config.entry_weight,
            Node::Exit => 0,
        }
    }

    /// Connect every node without successors to `Exit`.
    fn close_at_exit(&self, graph: &mut DiGraph<Node, DepEdge, u32>, exit: NodeIndex) {
        let sinks: Vec<NodeIndex> = graph
            .node_indices()
            .filter(|&n| {
                n != exit
                    && graph
                        .neighbors_directed(n, Direction::Outgoing)
                        .next()
                        .is_none()
            })
            .collect();

        for sink in sinks {
            graph.add_edge(
                sink,
                exit,
                DepEdge {
                    weight: self.config.exit_weight,
                    cause: None,
                    kind: HazardKind::Raw,
                },
            );
        }
    }
}

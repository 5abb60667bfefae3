//! Dependency graph over scheduling units.
//!
//! Nodes and edges carry their attributes directly and live in petgraph's
//! index-addressed arena; [`NodeIndex`] is the stable node identity used by
//! the builder, the orderer and both scheduling passes.

use std::fmt;
use std::ops::Index;

use petgraph::Direction;
use petgraph::graph::{DiGraph, EdgeIndex as PetEdgeIndex, EdgeReference, NodeIndex as PetNodeIndex};
use qsched_ir::QubitId;
use serde::{Deserialize, Serialize};

use crate::error::{SchedError, SchedResult};

/// Node index type for the dependency graph.
pub type NodeIndex = PetNodeIndex<u32>;

/// Edge index type for the dependency graph.
pub type EdgeIndex = PetEdgeIndex<u32>;

/// Borrowed view of one edge: endpoints plus its [`DepEdge`] record.
pub type EdgeRefOf<'a> = EdgeReference<'a, DepEdge, u32>;

/// A scheduling unit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Node {
    /// Start sentinel; the only node without predecessors.
    Entry,
    /// End sentinel; the only node without successors.
    Exit,
    /// One instruction of the input sequence.
    Instruction(InstructionNode),
}

/// Scheduling attributes of an instruction node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstructionNode {
    /// Position of the instruction in the input sequence. This is the
    /// handle back to the caller-owned instruction object.
    pub position: usize,
    /// Duration in cycles.
    pub latency: u32,
    /// Textual form of the instruction.
    pub label: String,
}

impl Node {
    /// Check if this is the `Entry` sentinel.
    #[inline]
    pub fn is_entry(&self) -> bool {
        matches!(self, Node::Entry)
    }

    /// Check if this is the `Exit` sentinel.
    #[inline]
    pub fn is_exit(&self) -> bool {
        matches!(self, Node::Exit)
    }

    /// Get the instruction attributes if this is an instruction node.
    #[inline]
    pub fn instruction(&self) -> Option<&InstructionNode> {
        match self {
            Node::Instruction(inst) => Some(inst),
            _ => None,
        }
    }

    /// Text shown for this node; sentinels render as `nop`.
    pub fn label(&self) -> &str {
        match self {
            Node::Instruction(inst) => &inst.label,
            Node::Entry | Node::Exit => "nop",
        }
    }
}

/// Hazard that induced an edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HazardKind {
    /// Read after write.
    Raw,
    /// Write after write.
    Waw,
    /// Write after read.
    War,
}

impl HazardKind {
    /// Upper-case mnemonic (`RAW`, `WAW`, `WAR`).
    pub fn as_str(self) -> &'static str {
        match self {
            HazardKind::Raw => "RAW",
            HazardKind::Waw => "WAW",
            HazardKind::War => "WAR",
        }
    }
}

impl fmt::Display for HazardKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A dependency from a producing node to a consuming node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DepEdge {
    /// Minimum cycle distance between source and target.
    pub weight: u32,
    /// Operand that induced the edge; `None` for closure edges into `Exit`.
    pub cause: Option<QubitId>,
    /// Hazard classification.
    pub kind: HazardKind,
}

/// Directed, weighted, acyclic dependency graph with `Entry` and `Exit`
/// sentinels.
///
/// Built once per instruction sequence by
/// [`HazardGraphBuilder`](crate::HazardGraphBuilder) and read-only afterwards.
/// Scheduling passes borrow it immutably, so one graph may be shared across
/// threads while ASAP and ALAP run side by side.
#[derive(Debug, Clone)]
pub struct DependencyGraph {
    graph: DiGraph<Node, DepEdge, u32>,
    entry: NodeIndex,
    exit: NodeIndex,
    num_qubits: usize,
}

impl DependencyGraph {
    pub(crate) fn from_parts(
        graph: DiGraph<Node, DepEdge, u32>,
        entry: NodeIndex,
        exit: NodeIndex,
        num_qubits: usize,
    ) -> Self {
        Self {
            graph,
            entry,
            exit,
            num_qubits,
        }
    }

    /// The `Entry` sentinel.
    #[inline]
    pub fn entry(&self) -> NodeIndex {
        self.entry
    }

    /// The `Exit` sentinel.
    #[inline]
    pub fn exit(&self) -> NodeIndex {
        self.exit
    }

    /// Size of the operand space the graph was built for.
    #[inline]
    pub fn num_qubits(&self) -> usize {
        self.num_qubits
    }

    /// Total number of nodes, sentinels included.
    #[inline]
    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    /// Total number of edges.
    #[inline]
    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Number of instruction nodes.
    #[inline]
    pub fn num_instructions(&self) -> usize {
        self.graph.node_count().saturating_sub(2)
    }

    /// Get a node by index.
    #[inline]
    pub fn node(&self, node: NodeIndex) -> Option<&Node> {
        self.graph.node_weight(node)
    }

    /// Get an edge record by index.
    #[inline]
    pub fn edge(&self, edge: EdgeIndex) -> Option<&DepEdge> {
        self.graph.edge_weight(edge)
    }

    /// Node indices in creation order: `Entry`, instructions in sequence
    /// order, then `Exit`.
    pub fn node_indices(&self) -> impl Iterator<Item = NodeIndex> + '_ {
        self.graph.node_indices()
    }

    /// Instruction nodes in sequence order.
    pub fn instruction_nodes(&self) -> impl Iterator<Item = (NodeIndex, &InstructionNode)> + '_ {
        self.graph
            .node_indices()
            .filter_map(|idx| self.graph[idx].instruction().map(|inst| (idx, inst)))
    }

    /// Node created for the instruction at `position` in the input sequence.
    pub fn node_for_position(&self, position: usize) -> Option<NodeIndex> {
        let idx = NodeIndex::new(position.checked_add(1)?);
        match self.graph.node_weight(idx) {
            Some(Node::Instruction(inst)) if inst.position == position => Some(idx),
            _ => None,
        }
    }

    /// All edges in creation order.
    pub fn edges(&self) -> impl Iterator<Item = EdgeRefOf<'_>> + '_ {
        self.graph.edge_references()
    }

    /// Edges ending at `node`.
    pub fn incoming(&self, node: NodeIndex) -> impl Iterator<Item = EdgeRefOf<'_>> + '_ {
        self.graph.edges_directed(node, Direction::Incoming)
    }

    /// Edges starting at `node`.
    pub fn outgoing(&self, node: NodeIndex) -> impl Iterator<Item = EdgeRefOf<'_>> + '_ {
        self.graph.edges_directed(node, Direction::Outgoing)
    }

    /// Edge records from `source` to `target` (parallel edges are possible
    /// when one instruction touches the same producer through several
    /// operands).
    pub fn edges_between(
        &self,
        source: NodeIndex,
        target: NodeIndex,
    ) -> impl Iterator<Item = &DepEdge> + '_ {
        self.graph
            .edges_connecting(source, target)
            .map(|e| e.weight())
    }

    /// Check whether any edge `source → target` exists.
    pub fn has_edge(&self, source: NodeIndex, target: NodeIndex) -> bool {
        self.graph.find_edge(source, target).is_some()
    }

    /// Number of incoming edges.
    pub fn in_degree(&self, node: NodeIndex) -> usize {
        self.incoming(node).count()
    }

    /// Number of outgoing edges.
    pub fn out_degree(&self, node: NodeIndex) -> usize {
        self.outgoing(node).count()
    }

    /// Get a reference to the underlying graph.
    pub fn graph(&self) -> &DiGraph<Node, DepEdge, u32> {
        &self.graph
    }

    /// Verify the structural invariants of the graph.
    ///
    /// Checks that:
    /// - The graph is acyclic
    /// - There is exactly one `Entry` and one `Exit`, at the recorded indices
    /// - `Entry` has no incoming edges and `Exit` no outgoing edges
    /// - Every other node has at least one incoming and one outgoing edge
    pub fn verify(&self) -> SchedResult<()> {
        if petgraph::algo::is_cyclic_directed(&self.graph) {
            return Err(SchedError::InvalidGraph("graph contains a cycle".into()));
        }

        if !self.node(self.entry).is_some_and(Node::is_entry) {
            return Err(SchedError::InvalidGraph(format!(
                "node {} is not the Entry sentinel",
                self.entry.index()
            )));
        }
        if !self.node(self.exit).is_some_and(Node::is_exit) {
            return Err(SchedError::InvalidGraph(format!(
                "node {} is not the Exit sentinel",
                self.exit.index()
            )));
        }

        let entries = self.graph.node_weights().filter(|n| n.is_entry()).count();
        let exits = self.graph.node_weights().filter(|n| n.is_exit()).count();
        if entries != 1 || exits != 1 {
            return Err(SchedError::InvalidGraph(format!(
                "expected one Entry and one Exit, found {entries} and {exits}"
            )));
        }

        for node in self.graph.node_indices() {
            let has_pred = self.incoming(node).next().is_some();
            let has_succ = self.outgoing(node).next().is_some();

            if node == self.entry {
                if has_pred {
                    return Err(SchedError::InvalidGraph("Entry has incoming edges".into()));
                }
            } else if !has_pred {
                return Err(SchedError::InvalidGraph(format!(
                    "node {} ('{}') has no predecessor",
                    node.index(),
                    self.graph[node].label()
                )));
            }

            if node == self.exit {
                if has_succ {
                    return Err(SchedError::InvalidGraph("Exit has outgoing edges".into()));
                }
            } else if !has_succ {
                return Err(SchedError::InvalidGraph(format!(
                    "node {} ('{}') has no successor",
                    node.index(),
                    self.graph[node].label()
                )));
            }
        }

        Ok(())
    }
}

impl Index<NodeIndex> for DependencyGraph {
    type Output = Node;

    fn index(&self, node: NodeIndex) -> &Node {
        &self.graph[node]
    }
}

//! Cycle assignments produced by the scheduling passes.

use std::collections::BTreeMap;
use std::fmt;

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::graph::{DependencyGraph, NodeIndex};

/// Cycle number on the schedule timeline. `Entry` sits in cycle 0.
pub type Cycle = u64;

/// Which scheduling pass produced a [`Schedule`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// As soon as possible: forward pass from `Entry`.
    #[default]
    Asap,
    /// As late as possible: backward pass from `Exit`.
    Alap,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Asap => f.write_str("ASAP"),
            Direction::Alap => f.write_str("ALAP"),
        }
    }
}

/// Mapping from node identity to cycle, produced fresh by each pass.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CycleAssignment {
    cycles: FxHashMap<NodeIndex, Cycle>,
}

impl CycleAssignment {
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            cycles: FxHashMap::with_capacity_and_hasher(capacity, Default::default()),
        }
    }

    pub(crate) fn insert(&mut self, node: NodeIndex, cycle: Cycle) {
        self.cycles.insert(node, cycle);
    }

    /// Cycle assigned to `node`.
    #[inline]
    pub fn get(&self, node: NodeIndex) -> Option<Cycle> {
        self.cycles.get(&node).copied()
    }

    /// Number of assigned nodes.
    #[inline]
    pub fn len(&self) -> usize {
        self.cycles.len()
    }

    /// Check if nothing has been assigned.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cycles.is_empty()
    }

    /// Iterate over `(node, cycle)` pairs in arbitrary order.
    pub fn iter(&self) -> impl Iterator<Item = (NodeIndex, Cycle)> + '_ {
        self.cycles.iter().map(|(&n, &c)| (n, c))
    }
}

/// Result of one scheduling pass over a [`DependencyGraph`].
///
/// Holds the node order the pass consumed alongside the cycle assignment;
/// this pair is everything an exporter needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Schedule {
    direction: Direction,
    order: Vec<NodeIndex>,
    cycles: CycleAssignment,
    length: Cycle,
}

impl Schedule {
    pub(crate) fn new(
        direction: Direction,
        order: Vec<NodeIndex>,
        cycles: CycleAssignment,
        length: Cycle,
    ) -> Self {
        Self {
            direction,
            order,
            cycles,
            length,
        }
    }

    /// The pass that produced this schedule.
    #[inline]
    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Topological order used to compute the schedule, `Entry` first.
    #[inline]
    pub fn order(&self) -> &[NodeIndex] {
        &self.order
    }

    /// The node → cycle mapping.
    #[inline]
    pub fn cycles(&self) -> &CycleAssignment {
        &self.cycles
    }

    /// Total schedule length: the cycle of `Exit`.
    #[inline]
    pub fn length(&self) -> Cycle {
        self.length
    }

    /// Cycle assigned to `node`.
    #[inline]
    pub fn cycle_of(&self, node: NodeIndex) -> Option<Cycle> {
        self.cycles.get(node)
    }

    /// Labels of the instruction nodes in each cycle, listed in
    /// topological order within a cycle. Sentinels are left out.
    pub fn by_cycle<'g>(&self, graph: &'g DependencyGraph) -> BTreeMap<Cycle, Vec<&'g str>> {
        let mut cycles: BTreeMap<Cycle, Vec<&'g str>> = BTreeMap::new();
        for &node in &self.order {
            let Some(inst) = graph.node(node).and_then(|n| n.instruction()) else {
                continue;
            };
            if let Some(cycle) = self.cycle_of(node) {
                cycles.entry(cycle).or_default().push(inst.label.as_str());
            }
        }
        cycles
    }

    /// Cycle of each instruction, indexed by its position in the input
    /// sequence.
    pub fn instruction_cycles(&self, graph: &DependencyGraph) -> Vec<Cycle> {
        let mut cycles = vec![0; graph.num_instructions()];
        for (node, inst) in graph.instruction_nodes() {
            if let (Some(slot), Some(cycle)) = (cycles.get_mut(inst.position), self.cycle_of(node))
            {
                *slot = cycle;
            }
        }
        cycles
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_direction_display() {
        assert_eq!(Direction::Asap.to_string(), "ASAP");
        assert_eq!(Direction::Alap.to_string(), "ALAP");
        assert_eq!(Direction::default(), Direction::Asap);
    }

    #[test]
    fn test_cycle_assignment_basics() {
        let mut cycles = CycleAssignment::with_capacity(2);
        assert!(cycles.is_empty());
        cycles.insert(NodeIndex::new(0), 0);
        cycles.insert(NodeIndex::new(1), 3);

        assert_eq!(cycles.len(), 2);
        assert_eq!(cycles.get(NodeIndex::new(1)), Some(3));
        assert_eq!(cycles.get(NodeIndex::new(7)), None);
    }
}

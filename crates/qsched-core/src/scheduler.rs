//! End-to-end driver: build → order → schedule.

use qsched_ir::Schedulable;
use tracing::{debug, info, instrument};

use crate::alap::AlapScheduler;
use crate::analysis::{CriticalPath, slack};
use crate::asap::AsapScheduler;
use crate::builder::HazardGraphBuilder;
use crate::config::HazardConfig;
use crate::error::SchedResult;
use crate::graph::{DependencyGraph, NodeIndex};
use crate::pass::SchedulingPass;
use crate::schedule::{Cycle, CycleAssignment, Direction, Schedule};
use crate::topo::TopologicalOrderer;

/// Runs the whole pipeline for one instruction sequence.
///
/// ```
/// use qsched_core::{Direction, Scheduler};
/// use qsched_ir::{Circuit, QubitId};
///
/// let mut circuit = Circuit::with_size("bell", 2);
/// circuit.h(QubitId(0)).unwrap();
/// circuit.cx(QubitId(0), QubitId(1)).unwrap();
///
/// let scheduler = Scheduler::new();
/// let (graph, schedule) = scheduler
///     .schedule(circuit.instructions(), circuit.num_qubits(), Direction::Asap)
///     .unwrap();
/// assert_eq!(schedule.instruction_cycles(&graph), vec![1, 2]);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Scheduler {
    config: HazardConfig,
}

/// Both schedules of one graph together with their derived analysis.
#[derive(Debug, Clone)]
pub struct ScheduleAnalysis {
    /// The dependency graph both schedules refer to.
    pub graph: DependencyGraph,
    /// Earliest-start schedule.
    pub asap: Schedule,
    /// Latest-start schedule.
    pub alap: Schedule,
    /// Per-node `alap - asap`.
    pub slack: CycleAssignment,
    /// Zero-slack nodes and tight edges.
    pub critical_path: CriticalPath,
}

impl ScheduleAnalysis {
    /// Schedule length; identical for both directions.
    pub fn length(&self) -> Cycle {
        self.asap.length()
    }

    /// Slack of `node`.
    pub fn slack_of(&self, node: NodeIndex) -> Option<Cycle> {
        self.slack.get(node)
    }
}

impl Scheduler {
    /// Create a scheduler with the default configuration.
    pub fn new() -> Self {
        Self::default()
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

    /// Get the pass implementing `direction`.
    pub fn pass_for(direction: Direction) -> Box<dyn SchedulingPass> {
        match direction {
            Direction::Asap => Box::new(AsapScheduler),
            Direction::Alap => Box::new(AlapScheduler),
        }
    }

    /// Build the dependency graph for `instructions`.
    pub fn build<I: Schedulable>(
        &self,
        instructions: &[I],
        num_qubits: usize,
    ) -> SchedResult<DependencyGraph> {
        HazardGraphBuilder::new(num_qubits)
            .with_config(self.config.clone())
            .build(instructions)
    }

    /// Order `graph` and run the pass for `direction` on it.
    #[instrument(skip(self, graph), fields(nodes = graph.node_count()))]
    pub fn run(&self, graph: &DependencyGraph, direction: Direction) -> SchedResult<Schedule> {
        let order = TopologicalOrderer.order(graph)?;
        let pass = Self::pass_for(direction);
        debug!("Running pass: {}", pass.name());
        pass.schedule(graph, &order)
    }

    /// Build and schedule in one step.
    pub fn schedule<I: Schedulable>(
        &self,
        instructions: &[I],
        num_qubits: usize,
        direction: Direction,
    ) -> SchedResult<(DependencyGraph, Schedule)> {
        let graph = self.build(instructions, num_qubits)?;
        let schedule = self.run(&graph, direction)?;
        Ok((graph, schedule))
    }

    /// Build the graph, run both passes over one shared order, and derive
    /// slack and the critical path.
    #[instrument(skip_all, fields(instructions = instructions.len(), num_qubits = num_qubits))]
    pub fn analyze<I: Schedulable>(
        &self,
        instructions: &[I],
        num_qubits: usize,
    ) -> SchedResult<ScheduleAnalysis> {
        let graph = self.build(instructions, num_qubits)?;
        let order = TopologicalOrderer.order(&graph)?;
        let asap = AsapScheduler.schedule(&graph, &order)?;
        let alap = AlapScheduler.schedule(&graph, &order)?;
        let slack = slack(&asap, &alap)?;
        let critical_path = CriticalPath::compute(&graph, &asap, &alap)?;

        info!(
            length = asap.length(),
            critical_nodes = critical_path.nodes().len(),
            "Schedule analysis completed"
        );

        Ok(ScheduleAnalysis {
            graph,
            asap,
            alap,
            slack,
            critical_path,
        })
    }
}

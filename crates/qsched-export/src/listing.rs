//! Per-cycle instruction listing.

use std::io::Write;

use qsched_core::{Cycle, DependencyGraph, Schedule};
use tracing::{debug, instrument};

use crate::error::{ExportError, ExportResult};

/// Separator between instructions that share a cycle.
pub const SEPARATOR: &str = " | ";

/// Line emitted for a cycle without instructions.
pub const EMPTY_CYCLE: &str = "   nop";

/// Render `schedule` as one line per cycle.
///
/// Covers cycles `1` through `length - 1`; cycle 0 belongs to `Entry` and
/// the last cycle to `Exit`. If a non-default configuration places an
/// instruction outside that window, the window grows to include it.
///
/// ```
/// use qsched_core::{Direction, Scheduler};
/// use qsched_export::render_listing;
/// use qsched_ir::{Instruction, QubitId, StandardGate};
///
/// let program = vec![
///     Instruction::single_qubit_gate(StandardGate::H, QubitId(0)),
///     Instruction::single_qubit_gate(StandardGate::H, QubitId(1)),
///     Instruction::two_qubit_gate(StandardGate::CX, QubitId(0), QubitId(1)),
/// ];
/// let (graph, schedule) = Scheduler::new()
///     .schedule(&program, 2, Direction::Asap)
///     .unwrap();
///
/// let listing = render_listing(&graph, &schedule).unwrap();
/// assert_eq!(listing, "h q0 | h q1\ncnot q0,q1\n");
/// ```
pub fn render_listing(graph: &DependencyGraph, schedule: &Schedule) -> ExportResult<String> {
    check_coverage(graph, schedule)?;

    let cycles = schedule.by_cycle(graph);
    let first = cycles.keys().next().copied().map_or(1, |c| c.min(1));
    let last = cycles
        .keys()
        .next_back()
        .copied()
        .map_or(schedule.length().saturating_sub(1), |c| {
            c.max(schedule.length().saturating_sub(1))
        });

    let mut output = String::new();
    let mut cycle: Cycle = first;
    while cycle <= last {
        match cycles.get(&cycle) {
            Some(labels) => output.push_str(&labels.join(SEPARATOR)),
            None => output.push_str(EMPTY_CYCLE),
        }
        output.push('\n');
        cycle += 1;
    }
    Ok(output)
}

/// Write the listing of `schedule` to `out`.
#[instrument(skip_all, fields(direction = %schedule.direction()))]
pub fn write_listing<W: Write>(
    out: &mut W,
    graph: &DependencyGraph,
    schedule: &Schedule,
) -> ExportResult<()> {
    let listing = render_listing(graph, schedule)?;
    out.write_all(listing.as_bytes())?;
    debug!(bytes = listing.len(), "Wrote schedule listing");
    Ok(())
}

/// Fail if some node of `graph` has no cycle in `schedule`.
pub(crate) fn check_coverage(graph: &DependencyGraph, schedule: &Schedule) -> ExportResult<()> {
    for node in graph.node_indices() {
        if schedule.cycle_of(node).is_none() {
            return Err(ExportError::ScheduleMismatch {
                node: node.index(),
                label: graph[node].label().to_string(),
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use qsched_core::{Direction, HazardConfig, Scheduler};
    use qsched_ir::{Instruction, QubitId, StandardGate};

    fn x(q: u32) -> Instruction {
        Instruction::single_qubit_gate(StandardGate::X, QubitId(q))
    }

    #[test]
    fn test_empty_schedule_has_no_lines() {
        let (graph, schedule) = Scheduler::new()
            .schedule::<Instruction>(&[], 1, Direction::Asap)
            .unwrap();
        assert_eq!(render_listing(&graph, &schedule).unwrap(), "");
    }

    #[test]
    fn test_exit_cycle_is_not_listed() {
        let program = vec![
            Instruction::single_qubit_gate(StandardGate::H, QubitId(0)),
            Instruction::single_qubit_gate(StandardGate::H, QubitId(1)),
            Instruction::two_qubit_gate(StandardGate::CX, QubitId(0), QubitId(1)),
        ];
        let (graph, schedule) = Scheduler::new()
            .schedule(&program, 2, Direction::Asap)
            .unwrap();

        // h at 1, cnot at 2, Exit at 3
        assert_eq!(schedule.cycle_of(graph.exit()), Some(3));
        assert_eq!(
            render_listing(&graph, &schedule).unwrap(),
            "h q0 | h q1\ncnot q0,q1\n"
        );
    }

    #[test]
    fn test_gaps_render_as_nop() {
        let program = vec![x(0).with_latency(3), x(0)];
        let (graph, schedule) = Scheduler::new()
            .schedule(&program, 1, Direction::Asap)
            .unwrap();

        // x at 1, x at 4, Exit at 5
        assert_eq!(
            render_listing(&graph, &schedule).unwrap(),
            "x q0\n   nop\n   nop\nx q0\n"
        );
    }

    #[test]
    fn test_zero_exit_weight_keeps_last_cycle() {
        let scheduler = Scheduler::new().with_config(HazardConfig::default().with_exit_weight(0));
        let (graph, schedule) = scheduler.schedule(&[x(0)], 1, Direction::Asap).unwrap();

        assert_eq!(schedule.length(), 1);
        assert_eq!(render_listing(&graph, &schedule).unwrap(), "x q0\n");
    }

    #[test]
    fn test_write_listing() {
        let (graph, schedule) = Scheduler::new()
            .schedule(&[x(0), x(1)], 2, Direction::Alap)
            .unwrap();

        let mut out = Vec::new();
        write_listing(&mut out, &graph, &schedule).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "x q0 | x q1\n");
    }
}

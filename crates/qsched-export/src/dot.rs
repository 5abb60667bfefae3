//! Graphviz DOT rendering of dependency graphs.

use std::io::Write;

use petgraph::visit::EdgeRef;
use qsched_core::{CriticalPath, DependencyGraph, Schedule};
use tracing::{debug, instrument};

use crate::error::ExportResult;
use crate::listing::check_coverage;
use crate::push_line;

const NODE_STYLE: &str = " fontcolor=black, style=filled, fontsize=16";
const EDGE_STYLE: &str = " color=black";
const CRITICAL_EDGE_STYLE: &str = " color=red";

/// What to draw on top of the bare graph.
#[derive(Debug, Clone, Copy, Default)]
pub struct DotOptions<'a> {
    timeline: Option<&'a Schedule>,
    critical_path: Option<&'a CriticalPath>,
}

impl<'a> DotOptions<'a> {
    /// Plain graph: nodes and edges only.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a `Cycle0 -> Cycle1 -> …` timeline and rank every node with its
    /// cycle in `schedule`.
    #[must_use]
    pub fn with_timeline(mut self, schedule: &'a Schedule) -> Self {
        self.timeline = Some(schedule);
        self
    }

    /// Draw the edges of `path` in red.
    #[must_use]
    pub fn with_critical_path(mut self, path: &'a CriticalPath) -> Self {
        self.critical_path = Some(path);
        self
    }
}

/// Render `graph` as a DOT digraph.
///
/// Node ids are graph indices, so `"0"` is `Entry`. Edges are labelled
/// with the operand that caused them; closure edges into `Exit` carry an
/// empty label.
pub fn render_dot(graph: &DependencyGraph, options: &DotOptions<'_>) -> ExportResult<String> {
    let mut dot = String::new();
    dot.push_str("digraph {\ngraph [ rankdir=TD; ];\n");
    dot.push_str("edge [fontsize=16, arrowhead=vee, arrowsize=0.5];\n");

    for node in graph.node_indices() {
        push_line(
            &mut dot,
            &format!(
                "\"{}\" [label=\" {} \"{}];",
                node.index(),
                graph[node].label(),
                NODE_STYLE
            ),
        );
    }

    if let Some(schedule) = options.timeline {
        check_coverage(graph, schedule)?;

        dot.push_str("{\nnode [shape=plaintext, fontsize=16, fontcolor=blue];\n");
        let timeline: Vec<String> = (0..=schedule.length())
            .map(|cycle| format!("Cycle{cycle}"))
            .collect();
        dot.push_str(&timeline.join(" -> "));
        dot.push_str(";\n}\n");

        for &node in schedule.order() {
            if let Some(cycle) = schedule.cycle_of(node) {
                push_line(
                    &mut dot,
                    &format!("{{ rank=same; Cycle{cycle}; {}; }}", node.index()),
                );
            }
        }
    }

    for edge in graph.edges() {
        let critical = options
            .critical_path
            .is_some_and(|path| path.is_critical_edge(edge.id()));
        let style = if critical {
            CRITICAL_EDGE_STYLE
        } else {
            EDGE_STYLE
        };
        push_line(
            &mut dot,
            &format!(
                "\"{}\"->\"{}\"[ label=\"{}\" {} ]",
                edge.source().index(),
                edge.target().index(),
                edge.weight().cause.map(|q| q.to_string()).unwrap_or_default(),
                style
            ),
        );
    }

    dot.push_str("}\n");
    Ok(dot)
}

/// Write the DOT rendering of `graph` to `out`.
#[instrument(skip_all, fields(nodes = graph.node_count()))]
pub fn write_dot<W: Write>(
    out: &mut W,
    graph: &DependencyGraph,
    options: &DotOptions<'_>,
) -> ExportResult<()> {
    let dot = render_dot(graph, options)?;
    out.write_all(dot.as_bytes())?;
    debug!(bytes = dot.len(), "Wrote DOT graph");
    Ok(())
}

//! Plain-text graph description.
//!
//! Sectioned, tab-separated layout:
//!
//! ```text
//! @nodes
//! label	name
//! 0	"nop"
//! 1	"x q0"
//! 2	"nop"
//! @arcs
//! 		label	cause	weight	kind
//! 0	1	0	q0	1	WAW
//! 1	2	1	-	1	RAW
//! @attributes
//! source	0
//! target	2
//! ```

use std::io::Write;

use petgraph::visit::EdgeRef;
use qsched_core::DependencyGraph;
use tracing::{debug, instrument};

use crate::error::ExportResult;
use crate::push_line;

/// Render every node, every edge and the two sentinels of `graph`.
pub fn render_graph_description(graph: &DependencyGraph) -> String {
    let mut text = String::from("@nodes\nlabel\tname\n");
    for node in graph.node_indices() {
        push_line(
            &mut text,
            &format!("{}\t\"{}\"", node.index(), graph[node].label()),
        );
    }

    text.push_str("@arcs\n\t\tlabel\tcause\tweight\tkind\n");
    for edge in graph.edges() {
        let dep = edge.weight();
        let cause = dep.cause.map_or_else(|| "-".to_string(), |q| q.to_string());
        push_line(
            &mut text,
            &format!(
                "{}\t{}\t{}\t{}\t{}\t{}",
                edge.source().index(),
                edge.target().index(),
                edge.id().index(),
                cause,
                dep.weight,
                dep.kind
            ),
        );
    }

    push_line(&mut text, "@attributes");
    push_line(&mut text, &format!("source\t{}", graph.entry().index()));
    push_line(&mut text, &format!("target\t{}", graph.exit().index()));
    text
}

/// Write the description of `graph` to `out`.
#[instrument(skip_all, fields(nodes = graph.node_count(), edges = graph.edge_count()))]
pub fn write_graph_description<W: Write>(out: &mut W, graph: &DependencyGraph) -> ExportResult<()> {
    let text = render_graph_description(graph);
    out.write_all(text.as_bytes())?;
    debug!(bytes = text.len(), "Wrote graph description");
    Ok(())
}

//! Adjacency matrix over instruction nodes.

use std::io::Write;

use petgraph::visit::EdgeRef;
use qsched_core::DependencyGraph;
use tracing::{debug, instrument};

use crate::error::ExportResult;

/// Boolean dependency matrix indexed by sequence position.
///
/// `matrix[i][j]` is `true` iff some edge runs from instruction `j` to
/// instruction `i`, i.e. row `i` lists what instruction `i` depends on.
/// Sentinels are left out.
pub fn adjacency_matrix(graph: &DependencyGraph) -> Vec<Vec<bool>> {
    let n = graph.num_instructions();
    let mut matrix = vec![vec![false; n]; n];

    for edge in graph.edges() {
        let source = graph[edge.source()].instruction();
        let target = graph[edge.target()].instruction();
        if let (Some(source), Some(target)) = (source, target) {
            matrix[target.position][source.position] = true;
        }
    }
    matrix
}

/// Render [`adjacency_matrix`] as tab-separated rows of `0`/`1`.
pub fn render_matrix(graph: &DependencyGraph) -> String {
    let mut text = String::new();
    for row in adjacency_matrix(graph) {
        let cells: Vec<&str> = row.iter().map(|&b| if b { "1" } else { "0" }).collect();
        text.push_str(&cells.join("\t"));
        text.push('\n');
    }
    text
}

/// Write the matrix rendering of `graph` to `out`.
#[instrument(skip_all, fields(instructions = graph.num_instructions()))]
pub fn write_matrix<W: Write>(out: &mut W, graph: &DependencyGraph) -> ExportResult<()> {
    let text = render_matrix(graph);
    out.write_all(text.as_bytes())?;
    debug!(bytes = text.len(), "Wrote dependency matrix");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use qsched_core::HazardGraphBuilder;
    use qsched_ir::{Instruction, QubitId, StandardGate};

    #[test]
    fn test_chain_is_lower_triangular() {
        let program: Vec<_> = (0..3)
            .map(|_| Instruction::single_qubit_gate(StandardGate::X, QubitId(0)))
            .collect();
        let graph = HazardGraphBuilder::new(1).build(&program).unwrap();

        assert_eq!(render_matrix(&graph), "0\t0\t0\n1\t0\t0\n0\t1\t0\n");
    }

    #[test]
    fn test_empty_graph() {
        let graph = HazardGraphBuilder::new(1)
            .build::<Instruction>(&[])
            .unwrap();
        assert!(adjacency_matrix(&graph).is_empty());
        assert_eq!(render_matrix(&graph), "");
    }
}

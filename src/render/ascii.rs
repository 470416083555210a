//! ASCII rendering for terminal display.

use crate::Digraph;
use ascii_dag::DAG;
use petgraph::visit::EdgeRef;

/// Draw the graph as box-drawing text.
///
/// Parallel edges collapse into one line. Returns `None` when the graph has
/// a cycle (self-loops included), since `ascii-dag` only draws DAGs.
pub fn render_ascii(graph: &Digraph) -> Option<String> {
    let inner = graph.inner();

    // ascii-dag ids are offset by one so no node uses id 0
    let nodes: Vec<(usize, &str)> = inner
        .node_indices()
        .map(|idx| (idx.index() + 1, inner[idx].as_str()))
        .collect();

    let mut edges: Vec<(usize, usize, usize)> = inner
        .edge_references()
        .map(|e| (*e.weight(), e.source().index() + 1, e.target().index() + 1))
        .collect();
    edges.sort_unstable();

    let mut pairs: Vec<(usize, usize)> = Vec::with_capacity(edges.len());
    for (_, from, to) in edges {
        if !pairs.contains(&(from, to)) {
            pairs.push((from, to));
        }
    }

    let dag = DAG::from_edges(&nodes, &pairs);
    if dag.has_cycle() {
        return None;
    }
    Some(dag.render())
}

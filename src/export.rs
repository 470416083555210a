//! Serialization types for graph export.
//!
//! This module contains the data structures used to serialize a Digraph
//! for external consumption (JSON and friends).

use crate::graph::{Attrs, Digraph, Statement};
use petgraph::visit::EdgeRef;
use serde::{Deserialize, Serialize};

/// Serializable representation of a Digraph.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphRepr {
    pub name: String,
    pub strict: bool,
    pub nodes: Vec<NodeRepr>,
    pub edges: Vec<EdgeRepr>,
}

/// Serializable representation of a node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeRepr {
    pub id: usize,
    pub name: String,
    /// Attributes from explicit declarations, merged in order
    #[serde(default, skip_serializing_if = "Attrs::is_empty")]
    pub attrs: Attrs,
}

/// Serializable representation of an edge.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EdgeRepr {
    pub source: usize,
    pub target: usize,
    pub tail: String,
    pub head: String,
    #[serde(default, skip_serializing_if = "Attrs::is_empty")]
    pub attrs: Attrs,
}

impl From<&Digraph> for GraphRepr {
    fn from(graph: &Digraph) -> Self {
        let inner = graph.inner();

        let mut nodes: Vec<NodeRepr> = inner
            .node_indices()
            .map(|idx| NodeRepr {
                id: idx.index(),
                name: inner[idx].clone(),
                attrs: Attrs::new(),
            })
            .collect();

        for statement in graph.statements() {
            if let Statement::Node { name, attrs } = statement {
                if let Some(node) = graph.get_node(name).and_then(|idx| nodes.get_mut(idx.index()))
                {
                    node.attrs
                        .extend(attrs.iter().map(|(k, v)| (k.clone(), v.clone())));
                }
            }
        }

        let mut edges: Vec<_> = inner.edge_references().collect();
        edges.sort_by_key(|e| *e.weight());
        let edges: Vec<EdgeRepr> = edges
            .into_iter()
            .map(|e| {
                let attrs = match graph.statements().get(*e.weight()) {
                    Some(Statement::Edge { attrs, .. }) => attrs.clone(),
                    _ => Attrs::new(),
                };
                EdgeRepr {
                    source: e.source().index(),
                    target: e.target().index(),
                    tail: inner[e.source()].clone(),
                    head: inner[e.target()].clone(),
                    attrs,
                }
            })
            .collect();

        Self {
            name: graph.name().to_string(),
            strict: graph.is_strict(),
            nodes,
            edges,
        }
    }
}

impl GraphRepr {
    /// Pretty-printed JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::attrs;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_hello_world_repr() {
        let mut g = Digraph::new("G");
        g.edge("Hello", "World");

        let repr = GraphRepr::from(&g);
        assert_eq!(repr.name, "G");
        assert_eq!(repr.nodes.len(), 2);
        assert_eq!(repr.edges.len(), 1);
        assert_eq!(repr.edges[0].tail, "Hello");
        assert_eq!(repr.edges[0].head, "World");
        assert_eq!((repr.edges[0].source, repr.edges[0].target), (0, 1));
    }

    #[test]
    fn test_node_attrs_merge() {
        let mut g = Digraph::new("G");
        g.node_with("a", attrs([("shape", "box")]))
            .node_with("a", attrs([("color", "red"), ("shape", "circle")]));

        let repr = GraphRepr::from(&g);
        assert_eq!(repr.nodes[0].attrs, attrs([("shape", "circle"), ("color", "red")]));
    }

    #[test]
    fn test_json_skips_empty_attrs() {
        let mut g = Digraph::new("G");
        g.edge("Hello", "World");

        let json = GraphRepr::from(&g).to_json().unwrap();
        assert!(!json.contains("attrs"));

        let back: GraphRepr = serde_json::from_str(&json).unwrap();
        assert_eq!(back, GraphRepr::from(&g));
    }
}

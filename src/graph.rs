//! The in-memory directed-graph description.

use indexmap::{IndexMap, IndexSet};
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::EdgeRef;
use petgraph::Direction;
use serde::{Deserialize, Serialize};

/// Ordered `key=value` attribute list.
pub type Attrs = IndexMap<String, String>;

/// Build an [`Attrs`] list from pairs, keeping their order.
pub fn attrs<I, K, V>(pairs: I) -> Attrs
where
    I: IntoIterator<Item = (K, V)>,
    K: Into<String>,
    V: Into<String>,
{
    pairs
        .into_iter()
        .map(|(k, v)| (k.into(), v.into()))
        .collect()
}

/// A body statement, in declaration order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Statement {
    /// An explicit node declaration
    Node { name: String, attrs: Attrs },

    /// An edge declaration (`tail -> head`)
    Edge {
        tail: String,
        head: String,
        attrs: Attrs,
    },
}

/// A named directed-graph description.
///
/// Nodes are created the first time they are mentioned, either by
/// [`Digraph::node`] or as an endpoint of [`Digraph::edge`]. The body keeps
/// every declaration in order so that [`Digraph::source`] is deterministic.
#[derive(Debug, Clone)]
pub struct Digraph {
    name: String,
    comment: Option<String>,
    strict: bool,
    graph_attrs: Attrs,
    node_attrs: Attrs,
    edge_attrs: Attrs,

    /// Declarations in insertion order
    body: Vec<Statement>,

    /// Node labels as weights; edge weights index into `body`
    graph: DiGraph<String, usize>,

    /// Node index by label, in first-appearance order
    nodes: IndexMap<String, NodeIndex>,
}

impl Digraph {
    /// Create an empty graph description with the given name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            comment: None,
            strict: false,
            graph_attrs: Attrs::new(),
            node_attrs: Attrs::new(),
            edge_attrs: Attrs::new(),
            body: Vec::new(),
            graph: DiGraph::new(),
            nodes: IndexMap::new(),
        }
    }

    /// Set the comment written above the graph header.
    pub fn comment(&mut self, comment: impl Into<String>) -> &mut Self {
        self.comment = Some(comment.into());
        self
    }

    /// Mark the graph `strict` (Graphviz merges parallel edges).
    pub fn strict(&mut self, strict: bool) -> &mut Self {
        self.strict = strict;
        self
    }

    /// Set a default graph attribute.
    pub fn graph_attr(&mut self, key: impl Into<String>, value: impl Into<String>) -> &mut Self {
        self.graph_attrs.insert(key.into(), value.into());
        self
    }

    /// Set a default node attribute.
    pub fn node_attr(&mut self, key: impl Into<String>, value: impl Into<String>) -> &mut Self {
        self.node_attrs.insert(key.into(), value.into());
        self
    }

    /// Set a default edge attribute.
    pub fn edge_attr(&mut self, key: impl Into<String>, value: impl Into<String>) -> &mut Self {
        self.edge_attrs.insert(key.into(), value.into());
        self
    }

    /// Declare a node without attributes.
    pub fn node(&mut self, name: impl Into<String>) -> &mut Self {
        self.node_with(name, Attrs::new())
    }

    /// Declare a node with attributes.
    pub fn node_with(&mut self, name: impl Into<String>, attrs: Attrs) -> &mut Self {
        let name = name.into();
        self.ensure_node(&name);
        self.body.push(Statement::Node { name, attrs });
        self
    }

    /// Add an edge from `tail` to `head`, creating either node if needed.
    pub fn edge(&mut self, tail: impl Into<String>, head: impl Into<String>) -> &mut Self {
        self.edge_with(tail, head, Attrs::new())
    }

    /// Add an edge with attributes.
    pub fn edge_with(
        &mut self,
        tail: impl Into<String>,
        head: impl Into<String>,
        attrs: Attrs,
    ) -> &mut Self {
        let tail = tail.into();
        let head = head.into();

        let from = self.ensure_node(&tail);
        let to = self.ensure_node(&head);
        self.graph.add_edge(from, to, self.body.len());

        self.body.push(Statement::Edge { tail, head, attrs });
        self
    }

    /// Add several attribute-less edges, in order.
    pub fn edges<I, T, H>(&mut self, edges: I) -> &mut Self
    where
        I: IntoIterator<Item = (T, H)>,
        T: Into<String>,
        H: Into<String>,
    {
        for (tail, head) in edges {
            self.edge(tail, head);
        }
        self
    }

    fn ensure_node(&mut self, name: &str) -> NodeIndex {
        if let Some(&idx) = self.nodes.get(name) {
            return idx;
        }
        let idx = self.graph.add_node(name.to_string());
        self.nodes.insert(name.to_string(), idx);
        idx
    }

    /// Get the graph name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get the header comment, if any.
    pub fn get_comment(&self) -> Option<&str> {
        self.comment.as_deref()
    }

    /// Check if the graph is strict.
    pub fn is_strict(&self) -> bool {
        self.strict
    }

    /// Default graph attributes.
    pub fn graph_attrs(&self) -> &Attrs {
        &self.graph_attrs
    }

    /// Default node attributes.
    pub fn node_attrs(&self) -> &Attrs {
        &self.node_attrs
    }

    /// Default edge attributes.
    pub fn edge_attrs(&self) -> &Attrs {
        &self.edge_attrs
    }

    /// All body statements in declaration order.
    pub fn statements(&self) -> &[Statement] {
        &self.body
    }

    /// Get the underlying petgraph for advanced operations.
    ///
    /// Edge weights are indices into [`Digraph::statements`].
    pub fn inner(&self) -> &DiGraph<String, usize> {
        &self.graph
    }

    /// Get the number of distinct nodes.
    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    /// Get the number of declared edges (parallel edges count separately).
    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Node labels in first-appearance order.
    pub fn node_names(&self) -> impl Iterator<Item = &str> {
        self.nodes.keys().map(|s| s.as_str())
    }

    /// Look up a node index by label.
    pub fn get_node(&self, name: &str) -> Option<NodeIndex> {
        self.nodes.get(name).copied()
    }

    /// Check if a node with this label exists.
    pub fn contains_node(&self, name: &str) -> bool {
        self.nodes.contains_key(name)
    }

    /// Check if at least one edge `tail -> head` exists.
    pub fn contains_edge(&self, tail: &str, head: &str) -> bool {
        match (self.get_node(tail), self.get_node(head)) {
            (Some(from), Some(to)) => self.graph.find_edge(from, to).is_some(),
            _ => false,
        }
    }

    /// Direct successors of a node, in the order their edges were declared.
    pub fn successors(&self, name: &str) -> Vec<&str> {
        let Some(idx) = self.get_node(name) else {
            return Vec::new();
        };

        let mut edges: Vec<(usize, NodeIndex)> = self
            .graph
            .edges_directed(idx, Direction::Outgoing)
            .map(|e| (*e.weight(), e.target()))
            .collect();
        edges.sort_by_key(|(order, _)| *order);

        edges
            .into_iter()
            .map(|(_, target)| self.graph[target].as_str())
            .collect::<IndexSet<_>>()
            .into_iter()
            .collect()
    }

    /// Check if nothing has been declared yet.
    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hello_world_counts() {
        let mut g = Digraph::new("G");
        g.edge("Hello", "World");

        assert_eq!(g.name(), "G");
        assert_eq!(g.edge_count(), 1);
        assert_eq!(g.node_count(), 2);
        assert!(g.contains_edge("Hello", "World"));
        assert!(!g.contains_edge("World", "Hello"));
    }

    #[test]
    fn test_nodes_created_implicitly_in_order() {
        let mut g = Digraph::new("G");
        g.edge("b", "a").edge("a", "c");

        let names: Vec<_> = g.node_names().collect();
        assert_eq!(names, vec!["b", "a", "c"]);
    }

    #[test]
    fn test_explicit_node_is_not_duplicated() {
        let mut g = Digraph::new("G");
        g.node("Hello").edge("Hello", "World").node("World");

        assert_eq!(g.node_count(), 2);
        assert_eq!(g.statements().len(), 3);
    }

    #[test]
    fn test_parallel_edges_are_kept() {
        let mut g = Digraph::new("G");
        g.edges([("a", "b"), ("a", "b"), ("a", "c")]);

        assert_eq!(g.edge_count(), 3);
        assert_eq!(g.successors("a"), vec!["b", "c"]);
        assert!(g.successors("missing").is_empty());
    }

    #[test]
    fn test_self_loop() {
        let mut g = Digraph::new("G");
        g.edge("x", "x");

        assert_eq!(g.node_count(), 1);
        assert_eq!(g.successors("x"), vec!["x"]);
    }

    #[test]
    fn test_empty_graph() {
        let g = Digraph::new("empty");
        assert!(g.is_empty());
        assert_eq!(g.node_count(), 0);
        assert!(!g.contains_node("anything"));
    }
}

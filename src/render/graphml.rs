//! GraphML export for graph visualization.
//!
//! GraphML is an XML-based format for graph exchange that is widely supported
//! by graph visualization tools like yEd, Gephi, Cytoscape, etc.

use crate::graph::{Attrs, Digraph, Statement};
use indexmap::IndexMap;
use petgraph::visit::EdgeRef;
use std::collections::BTreeSet;
use std::fmt::Write;

/// Render a Digraph as GraphML XML.
///
/// Every DOT attribute key used on a node or edge becomes a GraphML `<key>`;
/// node labels go in the `name` key.
pub fn render_graphml(graph: &Digraph) -> String {
    let mut output = String::new();
    // Writing to a String cannot fail
    let _ = write_graphml(graph, &mut output);
    output
}

fn write_graphml(graph: &Digraph, output: &mut String) -> std::fmt::Result {
    let inner = graph.inner();
    let node_attrs = declared_node_attrs(graph);

    // XML header and GraphML schema
    writeln!(output, r#"<?xml version="1.0" encoding="UTF-8"?>"#)?;
    writeln!(output, r#"<graphml xmlns="http://graphml.graphdrawing.org/xmlns""#)?;
    writeln!(output, r#"         xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance""#)?;
    writeln!(output, r#"         xsi:schemaLocation="http://graphml.graphdrawing.org/xmlns"#)?;
    writeln!(output, r#"         http://graphml.graphdrawing.org/xmlns/1.0/graphml.xsd">"#)?;

    // Attribute keys
    writeln!(output, r#"  <key id="name" for="node" attr.name="name" attr.type="string"/>"#)?;
    for key in attr_keys(graph, true) {
        writeln!(
            output,
            r#"  <key id="n_{0}" for="node" attr.name="{0}" attr.type="string"/>"#,
            escape_xml(&key)
        )?;
    }
    for key in attr_keys(graph, false) {
        writeln!(
            output,
            r#"  <key id="e_{0}" for="edge" attr.name="{0}" attr.type="string"/>"#,
            escape_xml(&key)
        )?;
    }

    writeln!(
        output,
        r#"  <graph id="{}" edgedefault="directed">"#,
        escape_xml(graph.name())
    )?;

    for idx in inner.node_indices() {
        let name = &inner[idx];
        writeln!(output, r#"    <node id="n{}">"#, idx.index())?;
        writeln!(output, r#"      <data key="name">{}</data>"#, escape_xml(name))?;
        if let Some(attrs) = node_attrs.get(name.as_str()) {
            write_data(output, "n_", attrs)?;
        }
        writeln!(output, r#"    </node>"#)?;
    }

    let mut edges: Vec<_> = inner.edge_references().collect();
    edges.sort_by_key(|e| *e.weight());
    for (edge_id, edge) in edges.into_iter().enumerate() {
        writeln!(
            output,
            r#"    <edge id="e{}" source="n{}" target="n{}">"#,
            edge_id,
            edge.source().index(),
            edge.target().index()
        )?;
        if let Some(Statement::Edge { attrs, .. }) = graph.statements().get(*edge.weight()) {
            write_data(output, "e_", attrs)?;
        }
        writeln!(output, r#"    </edge>"#)?;
    }

    writeln!(output, r#"  </graph>"#)?;
    writeln!(output, r#"</graphml>"#)
}

fn write_data(output: &mut String, prefix: &str, attrs: &Attrs) -> std::fmt::Result {
    for (key, value) in attrs {
        writeln!(
            output,
            r#"      <data key="{}{}">{}</data>"#,
            prefix,
            escape_xml(key),
            escape_xml(value)
        )?;
    }
    Ok(())
}

/// Merge attributes of every explicit declaration of each node; later keys win.
fn declared_node_attrs(graph: &Digraph) -> IndexMap<&str, Attrs> {
    let mut merged: IndexMap<&str, Attrs> = IndexMap::new();
    for statement in graph.statements() {
        if let Statement::Node { name, attrs } = statement {
            merged
                .entry(name.as_str())
                .or_default()
                .extend(attrs.iter().map(|(k, v)| (k.clone(), v.clone())));
        }
    }
    merged
}

fn attr_keys(graph: &Digraph, nodes: bool) -> BTreeSet<String> {
    graph
        .statements()
        .iter()
        .filter_map(|s| match (s, nodes) {
            (Statement::Node { attrs, .. }, true) => Some(attrs),
            (Statement::Edge { attrs, .. }, false) => Some(attrs),
            _ => None,
        })
        .flat_map(|attrs| attrs.keys().cloned())
        .collect()
}

/// Escape special XML characters.
fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}

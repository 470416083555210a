//! DOT serialization of a graph description.
//!
//! The output mirrors what Graphviz users expect from a hand-written file:
//! an optional `//` comment, the `digraph` header, default attribute
//! statements, then one tab-indented line per declaration.

use crate::graph::{Attrs, Digraph, Statement};
use std::fmt::{self, Write};

/// Keywords that must be quoted when used as identifiers.
const KEYWORDS: [&str; 6] = ["node", "edge", "graph", "digraph", "subgraph", "strict"];

impl Digraph {
    /// Serialize the graph description to DOT source text.
    pub fn source(&self) -> String {
        let mut output = String::new();
        // Writing to a String cannot fail
        let _ = self.write_source(&mut output);
        output
    }

    fn write_source(&self, output: &mut impl Write) -> fmt::Result {
        if let Some(comment) = self.get_comment() {
            for line in comment.lines() {
                writeln!(output, "// {}", line)?;
            }
        }

        if self.is_strict() {
            output.write_str("strict ")?;
        }
        if self.name().is_empty() {
            writeln!(output, "digraph {{")?;
        } else {
            writeln!(output, "digraph {} {{", quote_id(self.name()))?;
        }

        for (keyword, list) in [
            ("graph", self.graph_attrs()),
            ("node", self.node_attrs()),
            ("edge", self.edge_attrs()),
        ] {
            if !list.is_empty() {
                writeln!(output, "\t{}{}", keyword, attr_list(list))?;
            }
        }

        for statement in self.statements() {
            match statement {
                Statement::Node { name, attrs } => {
                    writeln!(output, "\t{}{}", quote_id(name), attr_list(attrs))?;
                }
                Statement::Edge { tail, head, attrs } => {
                    writeln!(
                        output,
                        "\t{} -> {}{}",
                        quote_id(tail),
                        quote_id(head),
                        attr_list(attrs)
                    )?;
                }
            }
        }

        writeln!(output, "}}")
    }
}

impl fmt::Display for Digraph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_source(f)
    }
}

/// Format an attribute list as ` [k=v k=v]`, or nothing when empty.
fn attr_list(attrs: &Attrs) -> String {
    if attrs.is_empty() {
        return String::new();
    }
    let pairs: Vec<String> = attrs
        .iter()
        .map(|(k, v)| format!("{}={}", quote_id(k), quote_id(v)))
        .collect();
    format!(" [{}]", pairs.join(" "))
}

/// Quote a DOT identifier when it cannot be written bare.
pub fn quote_id(id: &str) -> String {
    if is_bare_id(id) || is_numeral(id) {
        id.to_string()
    } else {
        format!("\"{}\"", escape_dot_string(id))
    }
}

/// Escape a string for use between DOT double quotes.
pub fn escape_dot_string(s: &str) -> String {
    let mut escaped = String::with_capacity(s.len());
    let mut chars = s.chars();
    while let Some(c) = chars.next() {
        match c {
            // Keep existing escape sequences such as `\n` or `\l` intact
            '\\' => {
                escaped.push('\\');
                match chars.next() {
                    Some(next) => escaped.push(next),
                    None => escaped.push('\\'),
                }
            }
            '"' => escaped.push_str("\\\""),
            '\n' => escaped.push_str("\\n"),
            '\r' => {}
            _ => escaped.push(c),
        }
    }
    escaped
}

fn is_bare_id(id: &str) -> bool {
    let mut chars = id.chars();
    let Some(first) = chars.next() else {
        return false;
    };
    let starts_ok = first.is_ascii_alphabetic() || first == '_' || !first.is_ascii();
    let rest_ok = chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || !c.is_ascii());

    starts_ok && rest_ok && !KEYWORDS.iter().any(|k| k.eq_ignore_ascii_case(id))
}

fn is_numeral(id: &str) -> bool {
    let digits = id.strip_prefix('-').unwrap_or(id);
    match digits.split_once('.') {
        None => !digits.is_empty() && digits.chars().all(|c| c.is_ascii_digit()),
        Some((int, frac)) => {
            int.chars().all(|c| c.is_ascii_digit())
                && frac.chars().all(|c| c.is_ascii_digit())
                && !(int.is_empty() && frac.is_empty())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::attrs;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_hello_world_source() {
        let mut g = Digraph::new("G");
        g.edge("Hello", "World");

        assert_eq!(g.source(), "digraph G {\n\tHello -> World\n}\n");
        assert_eq!(g.to_string(), g.source());
    }

    #[test]
    fn test_quote_id() {
        assert_eq!(quote_id("Hello"), "Hello");
        assert_eq!(quote_id("_x1"), "_x1");
        assert_eq!(quote_id("3.14"), "3.14");
        assert_eq!(quote_id("-.5"), "-.5");
        assert_eq!(quote_id("héllo"), "héllo");
        assert_eq!(quote_id("hello world"), "\"hello world\"");
        assert_eq!(quote_id("1abc"), "\"1abc\"");
        assert_eq!(quote_id("Node"), "\"Node\"");
        assert_eq!(quote_id(""), "\"\"");
        assert_eq!(quote_id("."), "\".\"");
    }

    #[test]
    fn test_escape_dot_string() {
        assert_eq!(escape_dot_string(r#"say "hi""#), r#"say \"hi\""#);
        assert_eq!(escape_dot_string("two\nlines"), "two\\nlines");
        assert_eq!(escape_dot_string(r"left\l"), r"left\l");
    }

    #[test]
    fn test_full_header_and_attributes() {
        let mut g = Digraph::new("my graph");
        g.comment("The Round Table")
            .strict(true)
            .graph_attr("rankdir", "LR")
            .node_attr("shape", "box")
            .node_with("A", attrs([("label", "King Arthur")]))
            .edge_with("A", "B", attrs([("constraint", "false")]))
            .edge("B", "edge");

        let expected = "// The Round Table\n\
                        strict digraph \"my graph\" {\n\
                        \tgraph [rankdir=LR]\n\
                        \tnode [shape=box]\n\
                        \tA [label=\"King Arthur\"]\n\
                        \tA -> B [constraint=false]\n\
                        \tB -> \"edge\"\n\
                        }\n";
        assert_eq!(g.source(), expected);
    }

    #[test]
    fn test_unnamed_graph() {
        let g = Digraph::new("");
        assert_eq!(g.source(), "digraph {\n}\n");
    }
}

//! Display bundles for interactive front ends.
//!
//! A graph is offered to a display as a set of MIME-typed representations,
//! the way notebook kernels do it. The sink picks whichever it can show.

use crate::error::DisplayError;
use crate::format::Format;
use crate::graph::Digraph;
use crate::render::Renderer;
use serde::Serialize;
use std::collections::BTreeMap;
use std::io::{self, Write};
use tracing::warn;

pub const MIME_PLAIN: &str = "text/plain";
pub const MIME_DOT: &str = "text/vnd.graphviz";
pub const MIME_SVG: &str = "image/svg+xml";

/// MIME type to representation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct DisplayData(BTreeMap<String, String>);

impl DisplayData {
    /// Build every representation available for `graph`.
    ///
    /// The SVG entry needs a renderer; if it fails the bundle is still
    /// returned without it.
    pub fn for_graph<R: Renderer + ?Sized>(graph: &Digraph, renderer: Option<&R>) -> Self {
        let mut data = DisplayData::default();
        data.insert(MIME_DOT, graph.source());
        data.insert(MIME_PLAIN, plain_text(graph));

        if let Some(renderer) = renderer {
            match graph.pipe(renderer, Format::Svg, 1.0) {
                Ok(svg) => data.insert(MIME_SVG, String::from_utf8_lossy(&svg).into_owned()),
                Err(e) => warn!(error = %e, "SVG display unavailable"),
            }
        }
        data
    }

    pub fn insert(&mut self, mime: impl Into<String>, content: impl Into<String>) {
        self.0.insert(mime.into(), content.into());
    }

    pub fn get(&self, mime: &str) -> Option<&str> {
        self.0.get(mime).map(|s| s.as_str())
    }

    /// MIME types present, sorted.
    pub fn mime_types(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(|s| s.as_str())
    }
}

/// ASCII drawing when the graph can be drawn, otherwise the DOT source.
#[cfg(feature = "ascii")]
fn plain_text(graph: &Digraph) -> String {
    crate::render::render_ascii(graph).unwrap_or_else(|| graph.source())
}

#[cfg(not(feature = "ascii"))]
fn plain_text(graph: &Digraph) -> String {
    graph.source()
}

/// Somewhere a [`DisplayData`] bundle can be shown.
pub trait DisplaySink {
    fn show(&mut self, data: &DisplayData) -> Result<(), DisplayError>;
}

/// Writes the plain-text representation, for terminals.
#[derive(Debug)]
pub struct TerminalSink<W> {
    out: W,
}

impl<W: Write> TerminalSink<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl TerminalSink<io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> DisplaySink for TerminalSink<W> {
    fn show(&mut self, data: &DisplayData) -> Result<(), DisplayError> {
        if let Some(text) = data.get(MIME_PLAIN) {
            self.out.write_all(text.as_bytes())?;
            if !text.ends_with('\n') {
                self.out.write_all(b"\n")?;
            }
            self.out.flush()?;
        }
        Ok(())
    }
}

/// Writes one JSON display event per line for a front end to pick up.
///
/// Each line looks like `{"display_type":"multiple","content":{...}}`.
#[derive(Debug)]
pub struct EventSink<W> {
    out: W,
}

#[derive(Serialize)]
struct DisplayEvent<'a> {
    display_type: &'static str,
    content: &'a DisplayData,
}

impl<W: Write> EventSink<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> DisplaySink for EventSink<W> {
    fn show(&mut self, data: &DisplayData) -> Result<(), DisplayError> {
        let event = DisplayEvent {
            display_type: "multiple",
            content: data,
        };
        serde_json::to_writer(&mut self.out, &event)?;
        self.out.write_all(b"\n")?;
        self.out.flush()?;
        Ok(())
    }
}

/// Show `graph` on `sink`, rendering SVG through `renderer` when given.
pub fn display<R, S>(graph: &Digraph, renderer: Option<&R>, sink: &mut S) -> Result<(), DisplayError>
where
    R: Renderer + ?Sized,
    S: DisplaySink + ?Sized,
{
    sink.show(&DisplayData::for_graph(graph, renderer))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RenderError;
    use crate::render::PipeRequest;

    struct FakeSvg;

    impl Renderer for FakeSvg {
        fn pipe(&self, _source: &str, request: &PipeRequest) -> Result<Vec<u8>, RenderError> {
            assert_eq!(request.format, Format::Svg);
            Ok(b"<svg/>".to_vec())
        }
    }

    struct Broken;

    impl Renderer for Broken {
        fn pipe(&self, _source: &str, _request: &PipeRequest) -> Result<Vec<u8>, RenderError> {
            Err(RenderError::ExecutableNotFound {
                program: "dot".to_string(),
            })
        }
    }

    fn hello() -> Digraph {
        let mut g = Digraph::new("G");
        g.edge("Hello", "World");
        g
    }

    #[test]
    fn test_bundle_with_svg() {
        let data = DisplayData::for_graph(&hello(), Some(&FakeSvg));

        assert_eq!(data.get(MIME_SVG), Some("<svg/>"));
        assert_eq!(data.get(MIME_DOT), Some(hello().source().as_str()));
        assert!(data.get(MIME_PLAIN).is_some());
    }

    #[test]
    fn test_bundle_without_renderer() {
        let data = DisplayData::for_graph::<Broken>(&hello(), None);
        let mimes: Vec<_> = data.mime_types().collect();
        assert_eq!(mimes, vec![MIME_PLAIN, MIME_DOT]);
    }

    #[test]
    fn test_failed_svg_is_omitted() {
        let data = DisplayData::for_graph(&hello(), Some(&Broken));
        assert!(data.get(MIME_SVG).is_none());
        assert!(data.get(MIME_DOT).is_some());
    }

    #[test]
    fn test_terminal_sink_writes_plain_text() {
        let mut sink = TerminalSink::new(Vec::new());
        display(&hello(), Some(&Broken), &mut sink).unwrap();

        let out = String::from_utf8(sink.into_inner()).unwrap();
        assert!(out.contains("Hello"));
        assert!(out.ends_with('\n'));
    }

    #[test]
    fn test_cyclic_graph_shows_source_as_plain_text() {
        let mut g = Digraph::new("G");
        g.edges([("a", "b"), ("b", "a")]).edge("c", "c");

        let data = DisplayData::for_graph::<Broken>(&g, None);
        assert_eq!(data.get(MIME_PLAIN), Some(g.source().as_str()));

        let mut sink = TerminalSink::new(Vec::new());
        sink.show(&data).unwrap();
        let out = String::from_utf8(sink.into_inner()).unwrap();
        assert_eq!(out, g.source());
        assert!(!out.contains("CYCLE"));
    }

    #[test]
    fn test_event_sink_writes_json_line() {
        let mut sink = EventSink::new(Vec::new());
        display(&hello(), Some(&FakeSvg), &mut sink).unwrap();

        let out = String::from_utf8(sink.into_inner()).unwrap();
        assert_eq!(out.lines().count(), 1);

        let event: serde_json::Value = serde_json::from_str(out.trim_end()).unwrap();
        assert_eq!(event["display_type"], "multiple");
        assert_eq!(event["content"][MIME_SVG], "<svg/>");
        assert_eq!(
            event["content"][MIME_DOT],
            "digraph G {\n\tHello -> World\n}\n"
        );
    }
}

//! # hello-graphviz
//!
//! Build directed-graph descriptions, serialize them to the Graphviz DOT
//! language, and render them through the Graphviz layout programs.
//!
//! ## Features
//!
//! | Feature | Description |
//! |---------|-------------|
//! | `ascii` | Terminal drawing of graphs via [`ascii-dag`](https://crates.io/crates/ascii-dag) |
//!
//! `default = ["ascii"]`.
//!
//! ## Example
//!
//! ```no_run
//! use hello_graphviz::{Digraph, Format, Graphviz, RenderOptions};
//!
//! let mut g = Digraph::new("G");
//! g.edge("Hello", "World");
//!
//! print!("{}", g.source());
//!
//! let options = RenderOptions::new("hello_world").format(Format::Png).scale(2.0);
//! let path = g.render(&Graphviz::new(), &options)?;
//! println!("wrote {}", path.display());
//! # Ok::<(), hello_graphviz::RenderError>(())
//! ```

pub mod display;
mod error;
pub mod export;
mod format;
mod graph;
pub mod render;
mod source;

pub use display::{display, DisplayData, DisplaySink, EventSink, TerminalSink};
pub use error::{DisplayError, RenderError};
pub use export::{EdgeRepr, GraphRepr, NodeRepr};
pub use format::{Engine, Format};
pub use graph::{attrs, Attrs, Digraph, Statement};
pub use render::{render_graphml, Graphviz, PipeRequest, RenderOptions, Renderer};
pub use source::{escape_dot_string, quote_id};

#[cfg(feature = "ascii")]
pub use render::render_ascii;

//! Hello World for Graphviz.
//!
//! Builds the graph `Hello -> World`, shows it in the terminal, prints its
//! DOT source, and renders `hello_world.png` at twice the default size.
//!
//! Usage: cargo run --bin hello_world
//!
//! Set `RUST_LOG=debug` to see the Graphviz commands being run.

use anyhow::{Context, Result};
use hello_graphviz::{display, Digraph, Format, Graphviz, RenderOptions, Renderer, TerminalSink};
use std::io::{self, Write};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn main() -> Result<()> {
    init_tracing();

    let graphviz = Graphviz::new();
    let options = RenderOptions::new("hello_world")
        .format(Format::Png)
        .scale(2.0);

    let rendered = run(&mut io::stdout(), &graphviz, &options)?;
    info!(path = %rendered.display(), "done");
    Ok(())
}

/// Initialize tracing on stderr so stdout carries only the example output.
fn init_tracing() {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();
}

/// Build the graph, display it, print its source, and render it.
fn run<W, R>(out: &mut W, renderer: &R, options: &RenderOptions) -> Result<PathBuf>
where
    W: Write,
    R: Renderer + ?Sized,
{
    let mut g = Digraph::new("G");

    g.edge("Hello", "World");

    display(&g, Some(renderer), &mut TerminalSink::new(&mut *out))
        .context("failed to display graph")?;

    write!(out, "{}", g.source())?;
    out.flush()?;

    g.render(renderer, options)
        .with_context(|| format!("failed to render {}", options.output_path(&g).display()))
}

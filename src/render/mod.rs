//! Graph rendering.
//!
//! This module provides the boundary to the external layout programs and
//! a few renderers that need no external tools:
//! - [`Graphviz`] pipes DOT source through `dot`, `neato`, etc.
//! - ASCII drawing for terminal display
//! - GraphML export for external visualization tools

#[cfg(feature = "ascii")]
mod ascii;
mod graphml;
mod graphviz;

#[cfg(feature = "ascii")]
pub use ascii::render_ascii;
pub use graphml::render_graphml;
pub use graphviz::Graphviz;

use crate::error::RenderError;
use crate::format::{Engine, Format};
use crate::graph::Digraph;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// What a [`Renderer`] is asked to produce.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PipeRequest {
    pub engine: Engine,
    pub format: Format,
    pub scale: f64,
}

impl PipeRequest {
    /// Check that the request is renderable.
    pub fn validate(&self) -> Result<(), RenderError> {
        if self.scale.is_finite() && self.scale > 0.0 {
            Ok(())
        } else {
            Err(RenderError::InvalidScale(self.scale))
        }
    }
}

/// Something that can lay out DOT source and return the encoded output.
pub trait Renderer {
    /// Render `source` and return the output bytes.
    fn pipe(&self, source: &str, request: &PipeRequest) -> Result<Vec<u8>, RenderError>;
}

/// Where and how [`Digraph::render`] writes its files.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderOptions {
    /// Source file name; defaults to `<graph name>.gv`
    pub filename: Option<PathBuf>,
    pub directory: Option<PathBuf>,
    pub format: Format,
    pub engine: Engine,
    /// 1.0 renders at Graphviz's default 72 dpi
    pub scale: f64,
    /// Remove the saved source once the output is written
    pub cleanup: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            filename: None,
            directory: None,
            format: Format::default(),
            engine: Engine::default(),
            scale: 1.0,
            cleanup: false,
        }
    }
}

impl RenderOptions {
    /// Create options writing to `filename`.
    pub fn new(filename: impl Into<PathBuf>) -> Self {
        Self {
            filename: Some(filename.into()),
            ..Self::default()
        }
    }

    pub fn directory(mut self, directory: impl Into<PathBuf>) -> Self {
        self.directory = Some(directory.into());
        self
    }

    pub fn format(mut self, format: Format) -> Self {
        self.format = format;
        self
    }

    pub fn engine(mut self, engine: Engine) -> Self {
        self.engine = engine;
        self
    }

    pub fn scale(mut self, scale: f64) -> Self {
        self.scale = scale;
        self
    }

    pub fn cleanup(mut self, cleanup: bool) -> Self {
        self.cleanup = cleanup;
        self
    }

    /// Path of the saved DOT source for `graph`.
    pub fn source_path(&self, graph: &Digraph) -> PathBuf {
        let filename = match &self.filename {
            Some(name) => name.clone(),
            None if graph.name().is_empty() => PathBuf::from("Digraph.gv"),
            None => PathBuf::from(format!("{}.gv", graph.name())),
        };
        match &self.directory {
            Some(dir) => dir.join(filename),
            None => filename,
        }
    }

    /// Path of the rendered output: the source path plus the format extension.
    pub fn output_path(&self, graph: &Digraph) -> PathBuf {
        let mut path = self.source_path(graph).into_os_string();
        path.push(".");
        path.push(self.format.extension());
        PathBuf::from(path)
    }

    fn pipe_request(&self) -> PipeRequest {
        PipeRequest {
            engine: self.engine,
            format: self.format,
            scale: self.scale,
        }
    }
}

impl Digraph {
    /// Render with the default engine and return the output bytes without touching disk.
    pub fn pipe<R: Renderer + ?Sized>(
        &self,
        renderer: &R,
        format: Format,
        scale: f64,
    ) -> Result<Vec<u8>, RenderError> {
        let options = RenderOptions::default().format(format).scale(scale);
        self.pipe_with(renderer, &options)
    }

    /// Render with the engine, format, and scale from `options`; paths are ignored.
    pub fn pipe_with<R: Renderer + ?Sized>(
        &self,
        renderer: &R,
        options: &RenderOptions,
    ) -> Result<Vec<u8>, RenderError> {
        let request = options.pipe_request();
        request.validate()?;
        renderer.pipe(&self.source(), &request)
    }

    /// Write the DOT source to `path`, creating parent directories.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<PathBuf, RenderError> {
        let path = path.as_ref();
        create_parent(path)?;
        fs::write(path, self.source()).map_err(|e| RenderError::io(path, e))?;
        debug!(path = %path.display(), "saved graph source");
        Ok(path.to_path_buf())
    }

    /// Save the source, render it, and write the output next to it.
    ///
    /// Returns the path of the rendered file.
    pub fn render<R: Renderer + ?Sized>(
        &self,
        renderer: &R,
        options: &RenderOptions,
    ) -> Result<PathBuf, RenderError> {
        let request = options.pipe_request();
        request.validate()?;

        let source_path = self.save(options.source_path(self))?;
        let bytes = renderer.pipe(&self.source(), &request)?;

        let output_path = options.output_path(self);
        fs::write(&output_path, &bytes).map_err(|e| RenderError::io(&output_path, e))?;
        debug!(
            path = %output_path.display(),
            bytes = bytes.len(),
            format = %options.format,
            "rendered graph"
        );

        if options.cleanup {
            fs::remove_file(&source_path).map_err(|e| RenderError::io(&source_path, e))?;
        }

        Ok(output_path)
    }
}

fn create_parent(path: &Path) -> Result<(), RenderError> {
    match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => {
            fs::create_dir_all(dir).map_err(|e| RenderError::io(dir, e))
        }
        _ => Ok(()),
    }
}

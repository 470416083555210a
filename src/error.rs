//! Error types for rendering and displaying graph descriptions.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while turning a graph description into output.
#[derive(Debug, Error)]
pub enum RenderError {
    /// The layout program could not be found
    #[error("Graphviz executable `{program}` not found, is Graphviz installed and on PATH?")]
    ExecutableNotFound { program: String },

    /// The layout program ran but reported failure
    #[error("`{program}` exited with {status}: {stderr}")]
    Failed {
        program: String,
        status: String,
        stderr: String,
    },

    /// The requested scale factor is unusable
    #[error("Scale must be a positive finite number, got {0}")]
    InvalidScale(f64),

    /// An output format name that is not supported
    #[error("Unknown output format: {0}")]
    UnknownFormat(String),

    /// A layout engine name that is not supported
    #[error("Unknown layout engine: {0}")]
    UnknownEngine(String),

    /// Reading or writing a file failed
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Talking to the child process failed
    #[error("Failed to run layout program: {0}")]
    Spawn(#[source] std::io::Error),
}

impl RenderError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        RenderError::Io {
            path: path.into(),
            source,
        }
    }

    /// Check if this error means Graphviz is not installed.
    pub fn is_not_found(&self) -> bool {
        matches!(self, RenderError::ExecutableNotFound { .. })
    }
}

/// Errors that can occur when handing a display bundle to a sink.
#[derive(Debug, Error)]
pub enum DisplayError {
    /// Writing to the sink failed
    #[error("Display output failed: {0}")]
    Io(#[from] std::io::Error),

    /// Encoding the display event failed
    #[error("Display event encoding failed: {0}")]
    Json(#[from] serde_json::Error),
}

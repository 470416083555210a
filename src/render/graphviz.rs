//! Rendering through the Graphviz command-line programs.

use super::{PipeRequest, Renderer};
use crate::error::RenderError;
use crate::format::Engine;
use std::io::{ErrorKind, Write};
use std::path::PathBuf;
use std::process::{Command, Stdio};
use tracing::debug;

/// Graphviz's default output resolution.
const BASE_DPI: f64 = 72.0;

/// A [`Renderer`] that runs the Graphviz executables.
///
/// DOT source is written to the program's stdin and the encoded output is
/// read back from stdout, so no temporary files are involved.
#[derive(Debug, Clone, Default)]
pub struct Graphviz {
    /// Directory holding the executables; `None` searches `PATH`
    bin_dir: Option<PathBuf>,
}

impl Graphviz {
    /// Use the executables found on `PATH`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Use the executables in `dir`.
    pub fn with_bin_dir(dir: impl Into<PathBuf>) -> Self {
        Self {
            bin_dir: Some(dir.into()),
        }
    }

    fn program_path(&self, engine: Engine) -> PathBuf {
        match &self.bin_dir {
            Some(dir) => dir.join(engine.program()),
            None => PathBuf::from(engine.program()),
        }
    }

    /// Version banner reported by `dot -V`.
    pub fn version(&self) -> Result<String, RenderError> {
        let program = self.program_path(Engine::Dot);
        let output = Command::new(&program)
            .arg("-V")
            .output()
            .map_err(|e| spawn_error(Engine::Dot, e))?;

        // Graphviz prints its banner on stderr
        let banner = if output.stderr.is_empty() {
            output.stdout
        } else {
            output.stderr
        };
        Ok(String::from_utf8_lossy(&banner).trim().to_string())
    }

    /// Check if `dot` can be run.
    pub fn is_available(&self) -> bool {
        self.version().is_ok()
    }
}

impl Renderer for Graphviz {
    fn pipe(&self, source: &str, request: &PipeRequest) -> Result<Vec<u8>, RenderError> {
        request.validate()?;

        let program = self.program_path(request.engine);
        let args = command_args(request);
        debug!(program = %program.display(), ?args, "running layout program");

        let mut child = Command::new(&program)
            .args(&args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| spawn_error(request.engine, e))?;

        // The program may exit before reading all input; reap it either way
        let written = match child.stdin.take() {
            Some(mut stdin) => stdin.write_all(source.as_bytes()),
            None => Ok(()),
        };

        let output = child.wait_with_output().map_err(RenderError::Spawn)?;

        if !output.status.success() {
            return Err(RenderError::Failed {
                program: request.engine.program().to_string(),
                status: output.status.to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }
        written.map_err(RenderError::Spawn)?;

        Ok(output.stdout)
    }
}

/// Arguments for one layout run: `-T<format>` and, for scaled raster
/// output, `-Gdpi=<dpi>`. Vector formats are resolution independent.
fn command_args(request: &PipeRequest) -> Vec<String> {
    let mut args = vec![format!("-T{}", request.format.as_str())];
    if request.scale != 1.0 {
        if request.format.is_raster() {
            args.push(format!("-Gdpi={}", BASE_DPI * request.scale));
        } else {
            debug!(
                format = %request.format,
                scale = request.scale,
                "scale ignored for vector format"
            );
        }
    }
    args
}

fn spawn_error(engine: Engine, error: std::io::Error) -> RenderError {
    if error.kind() == ErrorKind::NotFound {
        RenderError::ExecutableNotFound {
            program: engine.program().to_string(),
        }
    } else {
        RenderError::Spawn(error)
    }
}

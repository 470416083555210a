//! Output formats and layout engines understood by Graphviz.

use crate::error::RenderError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Output format selector passed to the layout program as `-T<format>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Format {
    #[default]
    Png,
    Jpeg,
    Gif,
    Bmp,
    Svg,
    Pdf,
    /// Laid-out DOT with positions
    Dot,
    /// Graphviz's line-oriented text layout
    Plain,
}

impl Format {
    /// Name Graphviz expects after `-T`.
    pub fn as_str(&self) -> &'static str {
        match self {
            Format::Png => "png",
            Format::Jpeg => "jpeg",
            Format::Gif => "gif",
            Format::Bmp => "bmp",
            Format::Svg => "svg",
            Format::Pdf => "pdf",
            Format::Dot => "dot",
            Format::Plain => "plain",
        }
    }

    /// File extension for rendered output.
    pub fn extension(&self) -> &'static str {
        match self {
            Format::Jpeg => "jpg",
            Format::Plain => "txt",
            other => other.as_str(),
        }
    }

    /// Check if this is a pixel format, where scale maps to output resolution.
    pub fn is_raster(&self) -> bool {
        matches!(self, Format::Png | Format::Jpeg | Format::Gif | Format::Bmp)
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Format {
    type Err = RenderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "png" => Ok(Format::Png),
            "jpg" | "jpeg" => Ok(Format::Jpeg),
            "gif" => Ok(Format::Gif),
            "bmp" => Ok(Format::Bmp),
            "svg" => Ok(Format::Svg),
            "pdf" => Ok(Format::Pdf),
            "dot" | "gv" => Ok(Format::Dot),
            "plain" => Ok(Format::Plain),
            _ => Err(RenderError::UnknownFormat(s.to_string())),
        }
    }
}

/// Graphviz layout program.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Engine {
    /// Hierarchical layout for directed graphs
    #[default]
    Dot,
    Neato,
    Twopi,
    Circo,
    Fdp,
    Sfdp,
    Osage,
    Patchwork,
}

impl Engine {
    /// Executable name of the layout program.
    pub fn program(&self) -> &'static str {
        match self {
            Engine::Dot => "dot",
            Engine::Neato => "neato",
            Engine::Twopi => "twopi",
            Engine::Circo => "circo",
            Engine::Fdp => "fdp",
            Engine::Sfdp => "sfdp",
            Engine::Osage => "osage",
            Engine::Patchwork => "patchwork",
        }
    }
}

impl fmt::Display for Engine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.program())
    }
}

impl FromStr for Engine {
    type Err = RenderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "dot" => Ok(Engine::Dot),
            "neato" => Ok(Engine::Neato),
            "twopi" => Ok(Engine::Twopi),
            "circo" => Ok(Engine::Circo),
            "fdp" => Ok(Engine::Fdp),
            "sfdp" => Ok(Engine::Sfdp),
            "osage" => Ok(Engine::Osage),
            "patchwork" => Ok(Engine::Patchwork),
            _ => Err(RenderError::UnknownEngine(s.to_string())),
        }
    }
}

//! Crate-level error types.

use std::fmt;

use crate::gpu::render_context::RenderContextError;
use crate::mesh::ObjError;

/// Errors produced by the redheart crate.
#[derive(Debug)]
pub enum HeartError {
    /// GPU context initialization failure.
    Gpu(RenderContextError),
    /// Malformed model file.
    MeshParse(ObjError),
    /// Generic I/O failure.
    Io(std::io::Error),
    /// TOML options parsing/serialization failure.
    OptionsParse(String),
    /// Viewer event-loop failure.
    Viewer(String),
}

impl fmt::Display for HeartError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Gpu(e) => write!(f, "GPU error: {e}"),
            Self::MeshParse(e) => write!(f, "model parse error: {e}"),
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::OptionsParse(msg) => {
                write!(f, "options parse error: {msg}")
            }
            Self::Viewer(msg) => write!(f, "viewer error: {msg}"),
        }
    }
}

impl std::error::Error for HeartError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Gpu(e) => Some(e),
            Self::MeshParse(e) => Some(e),
            Self::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<RenderContextError> for HeartError {
    fn from(e: RenderContextError) -> Self {
        Self::Gpu(e)
    }
}

impl From<ObjError> for HeartError {
    fn from(e: ObjError) -> Self {
        Self::MeshParse(e)
    }
}

impl From<std::io::Error> for HeartError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

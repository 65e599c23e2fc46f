//! Crate-level error types.

use std::fmt;

use crate::gpu::render_context::RenderContextError;

/// Errors produced by the gasket crate.
#[derive(Debug)]
pub enum GasketError {
    /// GPU context initialization failure.
    Gpu(RenderContextError),
    /// The ray-march kernel failed to compose or validate.
    KernelCompile(String),
    /// Waiting on a submitted dispatch failed.
    Dispatch(String),
    /// Generic I/O failure.
    Io(std::io::Error),
    /// TOML options parsing/serialization failure.
    OptionsParse(String),
    /// A persisted control record has the wrong size or layout version.
    ControlBlob(String),
    /// Failed to decode a coloring texture.
    TextureLoad(String),
    /// Viewer event-loop failure.
    Viewer(String),
}

impl fmt::Display for GasketError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Gpu(e) => write!(f, "GPU error: {e}"),
            Self::KernelCompile(msg) => {
                write!(f, "kernel compile error: {msg}")
            }
            Self::Dispatch(msg) => write!(f, "dispatch error: {msg}"),
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::OptionsParse(msg) => {
                write!(f, "options parse error: {msg}")
            }
            Self::ControlBlob(msg) => {
                write!(f, "control record error: {msg}")
            }
            Self::TextureLoad(msg) => write!(f, "texture load error: {msg}"),
            Self::Viewer(msg) => write!(f, "viewer error: {msg}"),
        }
    }
}

impl std::error::Error for GasketError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Gpu(e) => Some(e),
            Self::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<RenderContextError> for GasketError {
    fn from(e: RenderContextError) -> Self {
        Self::Gpu(e)
    }
}

impl From<std::io::Error> for GasketError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<image::ImageError> for GasketError {
    fn from(e: image::ImageError) -> Self {
        Self::TextureLoad(e.to_string())
    }
}

//! Error types for PDF conversion.

use std::path::PathBuf;
use thiserror::Error;

/// Result type for conversion operations.
pub type Result<T> = std::result::Result<T, ConvertError>;

/// Errors that can occur while converting documents.
#[derive(Debug, Error)]
pub enum ConvertError {
    /// The renderer program could not be started
    #[error("Failed to run renderer {program}: {source}")]
    Spawn {
        /// Program that was invoked
        program: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// The renderer exited unsuccessfully
    #[error("Renderer {program} exited with {status}: {stderr}")]
    RendererFailed {
        /// Program that was invoked
        program: PathBuf,
        /// Exit status description
        status: String,
        /// Captured standard error, trimmed
        stderr: String,
    },

    /// Unknown renderer backend name
    #[error("Unknown renderer: {0}")]
    UnknownRenderer(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

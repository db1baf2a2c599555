//! Error handling for the CLI application

use std::fmt;

/// Custom error type for CLI-specific errors
#[derive(Debug)]
pub enum CliError {
    /// Artifact path missing or unreadable
    ArtifactNotFound(String),
    /// Model or tokenizer failed to load
    LoadError(String),
    /// Segmentation error from core
    SegmentationError(String),
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::ArtifactNotFound(path) => write!(f, "Artifact not found: {path}"),
            CliError::LoadError(msg) => write!(f, "Failed to load model: {msg}"),
            CliError::SegmentationError(msg) => write!(f, "Segmentation error: {msg}"),
        }
    }
}

impl std::error::Error for CliError {}

/// Result type alias for CLI operations
pub type CliResult<T> = Result<T, anyhow::Error>;

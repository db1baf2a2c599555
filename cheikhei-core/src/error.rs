//! Error types for segmentation operations

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for segmentation operations
#[derive(Error, Debug)]
pub enum CoreError {
    /// The subword tokenizer artifact failed to load at startup
    #[error("tokenizer unavailable: {0}")]
    TokenizerUnavailable(String),

    /// The boundary model artifact failed to load at startup
    #[error("model unavailable: {0}")]
    ModelUnavailable(String),

    /// Segmentation was requested before the model was published
    #[error("model is not loaded")]
    ModelNotLoaded,

    /// A required artifact path does not exist
    #[error("artifact not found: {0}")]
    ArtifactNotFound(PathBuf),

    /// Invalid configuration
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// Inference produced an unusable result
    #[error("inference error: {0}")]
    Inference(String),

    /// ONNX Runtime error
    #[error("ONNX Runtime error: {0}")]
    Ort(#[from] ort::Error),

    /// SentencePiece error
    #[error("SentencePiece error: {0}")]
    SentencePiece(#[from] sentencepiece::SentencePieceError),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON parsing error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for segmentation operations
pub type Result<T> = std::result::Result<T, CoreError>;

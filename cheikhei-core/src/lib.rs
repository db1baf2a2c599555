//! Model-backed sentence segmentation for Meitei Mayek text
//!
//! This crate wraps a pre-trained neural boundary model and a frozen
//! SentencePiece tokenizer behind a small, stable API. The artifacts are
//! loaded, never trained or modified, by this code.
//!
//! ## Example
//!
//! ```no_run
//! use cheikhei_core::{SentenceSplitter, SplitterConfig};
//!
//! let config = SplitterConfig::builder()
//!     .model_dir("./output/model-best")
//!     .tokenizer_path("meitei_tokenizer.model")
//!     .build()?;
//! let splitter = SentenceSplitter::from_artifacts(&config)?;
//! let sentences = splitter.split("ꯃꯤꯇꯩ ꯃꯌꯦꯛ꯫")?;
//! # Ok::<(), cheikhei_core::CoreError>(())
//! ```

#![warn(missing_docs)]

pub mod config;
pub mod error;
pub mod lifecycle;
pub mod model;
pub mod splitter;
pub mod token;
pub mod tokenizer;

// Re-export key types
pub use config::{ModelConfig, SplitterConfig, SplitterConfigBuilder};
pub use error::{CoreError, Result};
pub use lifecycle::{LoadReport, ModelSlot};
pub use model::{BoundaryModel, OnnxBoundaryModel};
pub use splitter::SentenceSplitter;
pub use token::{SentenceSpan, Token};
pub use tokenizer::{SentencePieceTokenizer, SubwordTokenizer};

/// Split text with a one-off splitter built from the given artifacts.
///
/// Loading the artifacts dominates the cost of this call; long-lived
/// callers should build a [`SentenceSplitter`] once and reuse it.
pub fn split_text(text: &str, config: &SplitterConfig) -> Result<Vec<String>> {
    let splitter = SentenceSplitter::from_artifacts(config)?;
    splitter.split(text)
}

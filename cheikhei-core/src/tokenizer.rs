//! Tokenizer adapter over the frozen SentencePiece artifact

use std::path::Path;

use sentencepiece::SentencePieceProcessor;
use tracing::debug;

use crate::error::{CoreError, Result};
use crate::token::Token;

/// Converts raw text into the subword token sequence the model expects
///
/// Implementations must be deterministic and side-effect free: the same
/// input always yields the same token sequence.
pub trait SubwordTokenizer: Send + Sync {
    /// Tokenize text into ordered tokens with byte spans
    ///
    /// Empty input yields an empty sequence, never an error.
    fn tokenize(&self, text: &str) -> Result<Vec<Token>>;
}

/// Tokenizer adapter backed by a SentencePiece `.model` file
pub struct SentencePieceTokenizer {
    processor: SentencePieceProcessor,
}

impl SentencePieceTokenizer {
    /// Load the tokenizer from a SentencePiece model file
    pub fn from_file(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(CoreError::ArtifactNotFound(path.to_path_buf()));
        }

        let processor = SentencePieceProcessor::open(path)
            .map_err(|e| CoreError::TokenizerUnavailable(e.to_string()))?;
        debug!(path = %path.display(), "loaded SentencePiece tokenizer");

        Ok(Self { processor })
    }
}

impl SubwordTokenizer for SentencePieceTokenizer {
    fn tokenize(&self, text: &str) -> Result<Vec<Token>> {
        if text.is_empty() {
            return Ok(Vec::new());
        }

        let pieces = self.processor.encode(text)?;
        let tokens = pieces
            .into_iter()
            .map(|p| Token {
                piece: p.piece,
                id: p.id,
                start: p.span.0 as usize,
                end: p.span.1 as usize,
            })
            .collect();

        Ok(tokens)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_artifact_is_reported_with_its_path() {
        let err = SentencePieceTokenizer::from_file(Path::new("/no/such/tokenizer.model"))
            .err()
            .expect("load should fail");
        match err {
            CoreError::ArtifactNotFound(path) => {
                assert!(path.ends_with("tokenizer.model"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn corrupt_artifact_surfaces_as_tokenizer_unavailable() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.model");
        std::fs::write(&path, b"not a sentencepiece model").unwrap();

        let err = SentencePieceTokenizer::from_file(&path)
            .err()
            .expect("load should fail");
        assert!(matches!(err, CoreError::TokenizerUnavailable(_)));
    }
}

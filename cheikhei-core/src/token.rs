//! Token and sentence span data types

use serde::{Deserialize, Serialize};

/// A subword token with its byte span in the original text
///
/// Tokens are produced in source order; spans never overlap.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    /// The subword piece as produced by the tokenizer
    pub piece: String,
    /// Vocabulary id of the piece
    pub id: u32,
    /// Start byte offset in the original text
    pub start: usize,
    /// End byte offset (exclusive) in the original text
    pub end: usize,
}

impl Token {
    /// Create a new token
    pub fn new(piece: impl Into<String>, id: u32, start: usize, end: usize) -> Self {
        Self {
            piece: piece.into(),
            id,
            start,
            end,
        }
    }
}

/// One segmented sentence with its source location
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SentenceSpan {
    /// The sentence text, sliced verbatim from the input
    pub text: String,
    /// Start byte offset in the original text
    pub start: usize,
    /// End byte offset (exclusive) in the original text
    pub end: usize,
}

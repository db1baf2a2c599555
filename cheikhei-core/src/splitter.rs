//! Segmentation service orchestrating the tokenizer and boundary model

use tracing::debug;

use crate::config::SplitterConfig;
use crate::error::{CoreError, Result};
use crate::model::{BoundaryModel, OnnxBoundaryModel};
use crate::token::SentenceSpan;
use crate::tokenizer::{SentencePieceTokenizer, SubwordTokenizer};

/// Splits raw text into sentences using the loaded artifacts
///
/// The splitter is read-only after construction and can be shared freely
/// across threads.
pub struct SentenceSplitter {
    tokenizer: Box<dyn SubwordTokenizer>,
    model: Box<dyn BoundaryModel>,
}

impl SentenceSplitter {
    /// Build a splitter from tokenizer and model implementations
    pub fn new(tokenizer: Box<dyn SubwordTokenizer>, model: Box<dyn BoundaryModel>) -> Self {
        Self { tokenizer, model }
    }

    /// Load both artifacts named by the configuration
    pub fn from_artifacts(config: &SplitterConfig) -> Result<Self> {
        let tokenizer = SentencePieceTokenizer::from_file(&config.tokenizer_path)?;
        let model = OnnxBoundaryModel::from_dir(&config.model_dir, config.threshold)?;
        Ok(Self::new(Box::new(tokenizer), Box::new(model)))
    }

    /// Split text into sentences, in source order
    ///
    /// Each sentence is the exact substring of `text` covering its token
    /// run, so original internal spacing and punctuation are preserved.
    /// Empty input yields an empty vector.
    pub fn split(&self, text: &str) -> Result<Vec<String>> {
        Ok(self
            .split_spans(text)?
            .into_iter()
            .map(|s| s.text)
            .collect())
    }

    /// Split text into sentences with their byte spans
    pub fn split_spans(&self, text: &str) -> Result<Vec<SentenceSpan>> {
        if text.is_empty() {
            return Ok(Vec::new());
        }

        let tokens = self.tokenizer.tokenize(text)?;
        if tokens.is_empty() {
            return Ok(Vec::new());
        }

        let flags = self.model.predict_boundaries(&tokens)?;
        if flags.len() != tokens.len() {
            return Err(CoreError::Inference(format!(
                "boundary count {} does not match token count {}",
                flags.len(),
                tokens.len()
            )));
        }

        let mut sentences = Vec::new();
        let mut run_start = tokens[0].start;
        for (i, (token, &is_boundary)) in tokens.iter().zip(flags.iter()).enumerate() {
            let last = i + 1 == tokens.len();
            if !is_boundary && !last {
                continue;
            }

            let end = token.end;
            let sentence = text.get(run_start..end).ok_or_else(|| {
                CoreError::Inference(format!(
                    "token span {run_start}..{end} is not a valid slice of the input"
                ))
            })?;
            if !sentence.is_empty() {
                sentences.push(SentenceSpan {
                    text: sentence.to_string(),
                    start: run_start,
                    end,
                });
            }

            if !last {
                run_start = tokens[i + 1].start;
            }
        }

        debug!(
            sentences = sentences.len(),
            tokens = tokens.len(),
            "segmented text"
        );

        Ok(sentences)
    }
}

//! Splitter and model configuration

use crate::error::{CoreError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Configuration for building a [`crate::SentenceSplitter`]
///
/// Points at the two external artifacts: the trained model directory and
/// the SentencePiece model file.
#[derive(Debug, Clone)]
pub struct SplitterConfig {
    /// Directory holding `model.onnx` and `config.json`
    pub model_dir: PathBuf,
    /// Path to the SentencePiece `.model` file
    pub tokenizer_path: PathBuf,
    /// Optional override for the model's boundary threshold
    pub threshold: Option<f32>,
}

impl SplitterConfig {
    /// Create a builder
    pub fn builder() -> SplitterConfigBuilder {
        SplitterConfigBuilder::default()
    }

    /// Path to the ONNX graph inside the model directory
    pub fn onnx_path(&self) -> PathBuf {
        self.model_dir.join("model.onnx")
    }

    /// Path to the model configuration file inside the model directory
    pub fn model_config_path(&self) -> PathBuf {
        self.model_dir.join("config.json")
    }
}

/// Builder for [`SplitterConfig`]
#[derive(Debug, Default)]
pub struct SplitterConfigBuilder {
    model_dir: Option<PathBuf>,
    tokenizer_path: Option<PathBuf>,
    threshold: Option<f32>,
}

impl SplitterConfigBuilder {
    /// Set the trained model directory
    pub fn model_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.model_dir = Some(dir.into());
        self
    }

    /// Set the SentencePiece model file path
    pub fn tokenizer_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.tokenizer_path = Some(path.into());
        self
    }

    /// Override the boundary probability threshold
    pub fn threshold(mut self, threshold: f32) -> Self {
        self.threshold = Some(threshold);
        self
    }

    /// Build the configuration
    pub fn build(self) -> Result<SplitterConfig> {
        let model_dir = self
            .model_dir
            .ok_or_else(|| CoreError::InvalidConfig("model directory is required".to_string()))?;
        let tokenizer_path = self.tokenizer_path.ok_or_else(|| {
            CoreError::InvalidConfig("tokenizer model path is required".to_string())
        })?;

        if let Some(threshold) = self.threshold {
            if !(0.0..=1.0).contains(&threshold) {
                return Err(CoreError::InvalidConfig(format!(
                    "threshold must be within [0, 1], got {threshold}"
                )));
            }
        }

        Ok(SplitterConfig {
            model_dir,
            tokenizer_path,
            threshold: self.threshold,
        })
    }
}

/// Configuration of the trained boundary model
///
/// Read from `config.json` in the model directory. Fields absent from the
/// file fall back to the values the training pipeline emits by default.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelConfig {
    /// Number of output labels per token
    #[serde(default = "default_num_labels")]
    pub num_labels: usize,

    /// Index of the sentence-boundary label in the logit vector
    #[serde(default = "default_boundary_label")]
    pub boundary_label: usize,

    /// Maximum sequence length the model accepts per forward pass
    #[serde(default = "default_max_seq_len")]
    pub max_seq_len: usize,

    /// Probability threshold above which a token closes a sentence
    #[serde(default = "default_threshold")]
    pub threshold: f32,
}

fn default_num_labels() -> usize {
    2
}

fn default_boundary_label() -> usize {
    1
}

fn default_max_seq_len() -> usize {
    512
}

fn default_threshold() -> f32 {
    0.5
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            num_labels: default_num_labels(),
            boundary_label: default_boundary_label(),
            max_seq_len: default_max_seq_len(),
            threshold: default_threshold(),
        }
    }
}

impl ModelConfig {
    /// Load configuration from a JSON file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if self.boundary_label >= self.num_labels {
            return Err(CoreError::InvalidConfig(format!(
                "boundary_label {} out of range for {} labels",
                self.boundary_label, self.num_labels
            )));
        }
        if self.max_seq_len == 0 {
            return Err(CoreError::InvalidConfig(
                "max_seq_len must be positive".to_string(),
            ));
        }
        Ok(())
    }
}

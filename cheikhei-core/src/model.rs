//! ONNX wrapper around the pre-trained boundary model

use std::path::Path;
use std::sync::Mutex;

use ndarray::Array2;
use ort::session::builder::GraphOptimizationLevel;
use ort::session::Session;
use ort::value::Value;
use tracing::debug;

use crate::config::ModelConfig;
use crate::error::{CoreError, Result};
use crate::token::Token;

/// Assigns a sentence-boundary decision to each input token
///
/// The flags are aligned by position: `flags[i]` is true when `tokens[i]`
/// is the last token of a sentence.
pub trait BoundaryModel: Send + Sync {
    /// Predict one boundary flag per token
    fn predict_boundaries(&self, tokens: &[Token]) -> Result<Vec<bool>>;
}

/// Boundary model backed by an ONNX graph in the trained model directory
///
/// The artifact is not documented as safe for concurrent inference, so the
/// session is serialized behind a mutex; tokenization stays lock-free.
pub struct OnnxBoundaryModel {
    session: Mutex<Session>,
    config: ModelConfig,
    threshold: f32,
}

impl OnnxBoundaryModel {
    /// Load `model.onnx` and `config.json` from the model directory
    pub fn from_dir(model_dir: &Path, threshold_override: Option<f32>) -> Result<Self> {
        if !model_dir.is_dir() {
            return Err(CoreError::ArtifactNotFound(model_dir.to_path_buf()));
        }

        let onnx_path = model_dir.join("model.onnx");
        if !onnx_path.exists() {
            return Err(CoreError::ArtifactNotFound(onnx_path));
        }

        let config_path = model_dir.join("config.json");
        let config = if config_path.exists() {
            ModelConfig::from_file(&config_path)?
        } else {
            ModelConfig::default()
        };

        let session = Session::builder()
            .map_err(|e| CoreError::ModelUnavailable(e.to_string()))
            .and_then(|b| {
                b.with_optimization_level(GraphOptimizationLevel::Level3)
                    .map_err(|e| CoreError::ModelUnavailable(e.to_string()))
            })
            .and_then(|mut b| {
                b.commit_from_file(&onnx_path)
                    .map_err(|e| CoreError::ModelUnavailable(e.to_string()))
            })?;

        let threshold = threshold_override.unwrap_or(config.threshold);
        debug!(path = %onnx_path.display(), threshold, "loaded boundary model");

        Ok(Self {
            session: Mutex::new(session),
            config,
            threshold,
        })
    }

    /// The model configuration read from the artifact
    pub fn config(&self) -> &ModelConfig {
        &self.config
    }

    /// Run one forward pass and return the boundary probability per token
    fn forward(&self, ids: &[i64]) -> Result<Vec<f32>> {
        let seq_len = ids.len();
        let mut input_ids = Array2::<i64>::zeros((1, seq_len));
        let mut attention_mask = Array2::<i64>::zeros((1, seq_len));
        for (i, &id) in ids.iter().enumerate() {
            input_ids[[0, i]] = id;
            attention_mask[[0, i]] = 1;
        }

        let input_ids_value = Value::from_array(input_ids)?;
        let attention_mask_value = Value::from_array(attention_mask)?;

        let mut session = self
            .session
            .lock()
            .map_err(|_| CoreError::Inference("model session lock poisoned".to_string()))?;
        let outputs = session.run(ort::inputs![
            "input_ids" => input_ids_value,
            "attention_mask" => attention_mask_value
        ])?;

        let logits_value = &outputs["logits"];
        let (shape, logits) = logits_value
            .try_extract_tensor::<f32>()
            .map_err(|e| CoreError::Inference(format!("failed to extract logits: {e}")))?;

        let num_labels = self.config.num_labels;
        if shape.len() != 3
            || shape[1] as usize != seq_len
            || shape[2] as usize != num_labels
        {
            return Err(CoreError::Inference(format!(
                "unexpected logits shape {shape:?} for {seq_len} tokens"
            )));
        }

        let boundary = self.config.boundary_label;
        let probs = (0..seq_len)
            .map(|i| sigmoid(logits[i * num_labels + boundary]))
            .collect();

        Ok(probs)
    }
}

impl BoundaryModel for OnnxBoundaryModel {
    fn predict_boundaries(&self, tokens: &[Token]) -> Result<Vec<bool>> {
        if tokens.is_empty() {
            return Ok(Vec::new());
        }

        let ids: Vec<i64> = tokens.iter().map(|t| i64::from(t.id)).collect();

        // Inputs longer than the model's window run in consecutive chunks;
        // flags are per token, so alignment is unaffected by the seams.
        let mut flags = Vec::with_capacity(ids.len());
        for window in ids.chunks(self.config.max_seq_len) {
            let probs = self.forward(window)?;
            flags.extend(probs.into_iter().map(|p| p >= self.threshold));
        }

        Ok(flags)
    }
}

/// Sigmoid activation function
#[inline]
fn sigmoid(x: f32) -> f32 {
    1.0 / (1.0 + (-x).exp())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sigmoid_is_centered_and_saturates() {
        assert!((sigmoid(0.0) - 0.5).abs() < 1e-6);
        assert!(sigmoid(10.0) > 0.99);
        assert!(sigmoid(-10.0) < 0.01);
    }

    #[test]
    fn missing_model_dir_is_reported() {
        let err = OnnxBoundaryModel::from_dir(Path::new("/no/such/model-dir"), None)
            .err()
            .expect("load should fail");
        assert!(matches!(err, CoreError::ArtifactNotFound(_)));
    }

    #[test]
    fn missing_onnx_graph_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let err = OnnxBoundaryModel::from_dir(dir.path(), None)
            .err()
            .expect("load should fail");
        match err {
            CoreError::ArtifactNotFound(path) => assert!(path.ends_with("model.onnx")),
            other => panic!("unexpected error: {other}"),
        }
    }
}

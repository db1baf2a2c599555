//! Process-wide model lifecycle management
//!
//! The model and tokenizer load exactly once per process. The state machine
//! is `Unloaded -> Loading -> Ready` on success or `-> Failed` on error;
//! `Ready` is never left and `Failed` is terminal until restart.

use std::sync::{Arc, RwLock};

use tracing::{error, info, warn};

use crate::config::SplitterConfig;
use crate::error::{CoreError, Result};
use crate::splitter::SentenceSplitter;

enum LoadState {
    Unloaded,
    Loading,
    Ready(Arc<SentenceSplitter>),
    Failed(String),
}

/// Outcome of a load attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadReport {
    /// Artifacts loaded and the splitter was published
    Ready,
    /// Loading failed with the given reason; requests will fail until restart
    Failed(String),
    /// A load was already performed; this attempt was ignored
    AlreadyAttempted,
}

/// Holder for the single shared splitter instance
///
/// All requests read the same immutable splitter once it is published; no
/// request can trigger a reload.
pub struct ModelSlot {
    state: RwLock<LoadState>,
}

impl ModelSlot {
    /// Create an empty slot in the `Unloaded` state
    pub fn new() -> Self {
        Self {
            state: RwLock::new(LoadState::Unloaded),
        }
    }

    /// Load the artifacts and publish the splitter
    ///
    /// Runs at most once per slot. A failed load is logged and recorded;
    /// the process stays up and requests fail with
    /// [`CoreError::ModelNotLoaded`] until a restart with valid artifacts.
    pub fn load(&self, config: &SplitterConfig) -> LoadReport {
        if !self.begin() {
            return LoadReport::AlreadyAttempted;
        }

        info!(
            model_dir = %config.model_dir.display(),
            tokenizer = %config.tokenizer_path.display(),
            "loading segmentation model"
        );

        match SentenceSplitter::from_artifacts(config) {
            Ok(splitter) => self.set_ready(splitter),
            Err(e) => {
                let reason = e.to_string();
                error!(%reason, "failed to load segmentation model");
                let mut state = self.state.write().expect("model slot lock poisoned");
                *state = LoadState::Failed(reason.clone());
                LoadReport::Failed(reason)
            }
        }
    }

    /// Publish an already-built splitter
    ///
    /// Follows the same run-once rule as [`ModelSlot::load`]. Useful when
    /// the splitter is assembled from custom tokenizer or model
    /// implementations rather than the on-disk artifacts.
    pub fn publish(&self, splitter: SentenceSplitter) -> LoadReport {
        if !self.begin() {
            return LoadReport::AlreadyAttempted;
        }
        self.set_ready(splitter)
    }

    fn begin(&self) -> bool {
        let mut state = self.state.write().expect("model slot lock poisoned");
        match *state {
            LoadState::Unloaded => {
                *state = LoadState::Loading;
                true
            }
            _ => {
                warn!("model load requested more than once; ignoring");
                false
            }
        }
    }

    fn set_ready(&self, splitter: SentenceSplitter) -> LoadReport {
        let mut state = self.state.write().expect("model slot lock poisoned");
        *state = LoadState::Ready(Arc::new(splitter));
        info!("segmentation model loaded");
        LoadReport::Ready
    }

    /// Get the published splitter, or fail fast when it is absent
    pub fn get(&self) -> Result<Arc<SentenceSplitter>> {
        let state = self.state.read().expect("model slot lock poisoned");
        match &*state {
            LoadState::Ready(splitter) => Ok(Arc::clone(splitter)),
            _ => Err(CoreError::ModelNotLoaded),
        }
    }

    /// Whether the splitter has been published
    pub fn is_ready(&self) -> bool {
        matches!(
            &*self.state.read().expect("model slot lock poisoned"),
            LoadState::Ready(_)
        )
    }

    /// The recorded failure reason, if loading failed
    pub fn failure(&self) -> Option<String> {
        match &*self.state.read().expect("model slot lock poisoned") {
            LoadState::Failed(reason) => Some(reason.clone()),
            _ => None,
        }
    }
}

impl Default for ModelSlot {
    fn default() -> Self {
        Self::new()
    }
}

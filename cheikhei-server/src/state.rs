//! Shared application state

use std::sync::Arc;

use cheikhei_core::ModelSlot;

/// Shared application state handed to every handler
///
/// The slot is published once at startup and read-only afterwards, so
/// clones are cheap and handlers never take a write lock.
#[derive(Clone)]
pub struct AppState {
    /// Process-wide model slot shared by all requests
    pub slot: Arc<ModelSlot>,
}

impl AppState {
    /// Wrap the model slot for sharing across requests
    pub fn new(slot: Arc<ModelSlot>) -> Self {
        Self { slot }
    }
}

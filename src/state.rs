//! Shared application state.
//!
//! DESIGN
//! ======
//! `AppState` is injected into Axum handlers via the `State` extractor.
//! The record store and the session marker share one key/value backend;
//! the LLM client is optional so the app runs without an API key.

use std::sync::Arc;

use crate::llm::LlmChat;
use crate::services::session::SessionStore;
use crate::services::store::Store;
use crate::services::suggestion::SuggestionGate;
use crate::storage::{KvStore, StorageError};

// =============================================================================
// APP STATE
// =============================================================================

/// Shared application state, injected into Axum handlers via State extractor.
/// Clone is required by Axum; every field is cheap to clone.
#[derive(Clone)]
pub struct AppState {
    pub store: Store,
    pub session: SessionStore,
    /// Backend behind `store` and `session`, closed by [`AppState::shutdown`].
    pub kv: Arc<dyn KvStore>,
    /// Optional LLM client. `None` if LLM env vars are not configured.
    pub llm: Option<Arc<dyn LlmChat>>,
    pub suggestions: SuggestionGate,
}

impl AppState {
    #[must_use]
    pub fn new(kv: Arc<dyn KvStore>, llm: Option<Arc<dyn LlmChat>>) -> Self {
        Self {
            store: Store::new(Arc::clone(&kv)),
            session: SessionStore::new(Arc::clone(&kv)),
            kv,
            llm,
            suggestions: SuggestionGate::new(),
        }
    }

    /// Close the shared backend once the server has stopped serving.
    ///
    /// # Errors
    ///
    /// Returns the backend's close error.
    pub async fn shutdown(&self) -> Result<(), StorageError> {
        self.kv.close().await
    }
}

// =============================================================================
// TEST HELPERS
// =============================================================================

#[cfg(test)]
pub mod test_helpers {
    use super::*;
    use crate::storage::MemoryKv;

    /// Create a test `AppState` over an in-memory store, without an LLM.
    #[must_use]
    pub fn test_app_state() -> AppState {
        AppState::new(Arc::new(MemoryKv::new()), None)
    }

    /// Create a test `AppState` with a mock LLM.
    #[must_use]
    pub fn test_app_state_with_llm(llm: Arc<dyn LlmChat>) -> AppState {
        AppState::new(Arc::new(MemoryKv::new()), Some(llm))
    }
}

#[cfg(test)]
#[path = "state_test.rs"]
mod tests;

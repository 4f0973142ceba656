//! Persisted user preferences: the turbo flag and the selected model.

use charla_types::error::StorageError;

use crate::storage::{keys, KvStore};

/// Reads and writes the small set of persisted toggles.
pub struct Preferences<S> {
    store: S,
}

impl<S: KvStore> Preferences<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Whether turbo mode is enabled. Defaults to off.
    pub async fn turbo_enabled(&self) -> Result<bool, StorageError> {
        Ok(self
            .store
            .get(keys::TURBO_ENABLED)
            .await?
            .and_then(|v| v.as_bool())
            .unwrap_or(false))
    }

    pub async fn set_turbo(&self, enabled: bool) -> Result<(), StorageError> {
        self.store
            .set(keys::TURBO_ENABLED, &serde_json::json!(enabled))
            .await
    }

    /// The persisted model selection, if any.
    pub async fn selected_model(&self) -> Result<Option<String>, StorageError> {
        Ok(self
            .store
            .get(keys::SELECTED_MODEL)
            .await?
            .and_then(|v| v.as_str().map(str::to_string)))
    }

    pub async fn set_selected_model(&self, model: &str) -> Result<(), StorageError> {
        self.store
            .set(keys::SELECTED_MODEL, &serde_json::json!(model))
            .await
    }
}

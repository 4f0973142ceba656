//! Conversation identity lifecycle.
//!
//! One identity exists per profile at a time. `ensure` loads or mints it;
//! `reset` is the only supported way to start a fresh conversation.

use tracing::info;

use charla_types::error::StorageError;
use charla_types::session::ConversationId;

use crate::storage::{keys, KvStore};

/// Generates, loads, and persists the conversation correlation id.
pub struct IdentityService<S> {
    store: S,
}

impl<S: KvStore> IdentityService<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Read the persisted identity; if absent, generate and persist a new
    /// one. Returns the current identity either way.
    pub async fn ensure(&self) -> Result<ConversationId, StorageError> {
        if let Some(value) = self.store.get(keys::SESSION_ID).await? {
            if let Some(id) = value.as_str() {
                return Ok(ConversationId::from_string(id.to_string()));
            }
        }
        let id = ConversationId::generate();
        self.persist(&id).await?;
        Ok(id)
    }

    /// Unconditionally generate and persist a new identity.
    ///
    /// The returned id is the caller's signal to clear the visible
    /// transcript and any pending attachments. The old conversation's
    /// index entry is left untouched; history is append-only.
    pub async fn reset(&self) -> Result<ConversationId, StorageError> {
        let id = ConversationId::generate();
        self.persist(&id).await?;
        info!(conversation = %id.short(), "conversation reset");
        Ok(id)
    }

    async fn persist(&self, id: &ConversationId) -> Result<(), StorageError> {
        self.store
            .set(keys::SESSION_ID, &serde_json::json!(id.as_str()))
            .await
    }
}

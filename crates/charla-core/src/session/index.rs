//! Conversation index: the persisted history list.
//!
//! An append-only, id-deduplicated list of conversation summaries.
//! Insertion order is preserved in storage; display order is
//! reverse-insertion (most recent first).

use charla_types::error::StorageError;
use charla_types::session::{ConversationId, ConversationSummary};

use crate::storage::{keys, KvStore};

/// Persisted ordered list of conversation summaries.
pub struct ConversationIndex<S> {
    store: S,
}

impl<S: KvStore> ConversationIndex<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Append a summary unless one with this id already exists.
    ///
    /// Idempotent: repeated calls within a conversation turn record
    /// nothing new. Returns whether an entry was added.
    pub async fn record_if_absent(
        &self,
        id: &ConversationId,
        title: &str,
    ) -> Result<bool, StorageError> {
        let mut entries = self.load().await?;
        if entries.iter().any(|summary| &summary.id == id) {
            return Ok(false);
        }
        entries.push(ConversationSummary {
            id: id.clone(),
            title: title.to_string(),
        });
        self.save(&entries).await?;
        Ok(true)
    }

    /// Summaries in display order, most recent first. Empty when nothing
    /// has been recorded.
    pub async fn list(&self) -> Result<Vec<ConversationSummary>, StorageError> {
        let mut entries = self.load().await?;
        entries.reverse();
        Ok(entries)
    }

    async fn load(&self) -> Result<Vec<ConversationSummary>, StorageError> {
        let Some(value) = self.store.get(keys::CONVERSATION_INDEX).await? else {
            return Ok(Vec::new());
        };
        // A malformed persisted index is treated as empty rather than
        // blocking every future conversation.
        Ok(serde_json::from_value(value).unwrap_or_default())
    }

    async fn save(&self, entries: &[ConversationSummary]) -> Result<(), StorageError> {
        let value = serde_json::to_value(entries)
            .map_err(|e| StorageError::Serialization(e.to_string()))?;
        self.store.set(keys::CONVERSATION_INDEX, &value).await
    }
}

//! Conversation identity and index types.
//!
//! A conversation is correlated across turns (and program runs) by an
//! opaque identity token, and surfaced in the history list as a summary
//! with a title derived from its first user message.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Maximum title length derived from the first user message.
pub const TITLE_MAX_CHARS: usize = 30;

/// Title shown for a conversation with no user message yet.
pub const TITLE_PLACEHOLDER: &str = "New Conversation";

/// Opaque correlation token grouping a sequence of exchanges.
///
/// Version-4-UUID-shaped. Immutable for the lifetime of a conversation;
/// replaced only on explicit reset. Stored as a plain string so values
/// read back from persistence round-trip untouched.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConversationId(String);

impl ConversationId {
    /// Generate a fresh identity.
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn from_string(value: String) -> Self {
        Self(value)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// First 8 characters, for compact display.
    pub fn short(&self) -> &str {
        &self.0[..8.min(self.0.len())]
    }
}

impl fmt::Display for ConversationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One entry in the conversation index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversationSummary {
    pub id: ConversationId,
    pub title: String,
}

impl ConversationSummary {
    /// Derive an index title from the first user message: the first
    /// [`TITLE_MAX_CHARS`] characters, with `...` appended when truncated.
    /// Falls back to [`TITLE_PLACEHOLDER`] for an empty message.
    pub fn derive_title(first_user_message: &str) -> String {
        let trimmed = first_user_message.trim();
        if trimmed.is_empty() {
            return TITLE_PLACEHOLDER.to_string();
        }
        let mut title: String = trimmed.chars().take(TITLE_MAX_CHARS).collect();
        if trimmed.chars().count() > TITLE_MAX_CHARS {
            title.push_str("...");
        }
        title
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_is_v4_shaped() {
        let id = ConversationId::generate();
        let parsed = Uuid::parse_str(id.as_str()).unwrap();
        assert_eq!(parsed.get_version_num(), 4);
    }

    #[test]
    fn test_generate_never_repeats() {
        let a = ConversationId::generate();
        let b = ConversationId::generate();
        assert_ne!(a, b);
    }

    #[test]
    fn test_short_display() {
        let id = ConversationId::from_string("0123456789abcdef".to_string());
        assert_eq!(id.short(), "01234567");
    }

    #[test]
    fn test_serde_transparent() {
        let id = ConversationId::from_string("abc-123".to_string());
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"abc-123\"");
    }

    #[test]
    fn test_derive_title_short_message() {
        assert_eq!(ConversationSummary::derive_title("hello"), "hello");
    }

    #[test]
    fn test_derive_title_truncates_at_thirty() {
        let msg = "a".repeat(45);
        let title = ConversationSummary::derive_title(&msg);
        assert_eq!(title, format!("{}...", "a".repeat(30)));
    }

    #[test]
    fn test_derive_title_exactly_thirty_not_truncated() {
        let msg = "b".repeat(30);
        assert_eq!(ConversationSummary::derive_title(&msg), msg);
    }

    #[test]
    fn test_derive_title_empty_uses_placeholder() {
        assert_eq!(ConversationSummary::derive_title("   "), TITLE_PLACEHOLDER);
    }

    #[test]
    fn test_derive_title_counts_chars_not_bytes() {
        // 31 multibyte chars truncate at 30 without splitting any of them.
        let msg = "é".repeat(31);
        let title = ConversationSummary::derive_title(&msg);
        assert_eq!(title, format!("{}...", "é".repeat(30)));
    }
}

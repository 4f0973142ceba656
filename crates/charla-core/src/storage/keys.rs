//! Well-known persisted keys.
//!
//! The full set of entries the client ever reads or writes.

/// Conversation identity string.
pub const SESSION_ID: &str = "session_id";

/// Turbo-mode boolean flag. The options bundle itself is never persisted.
pub const TURBO_ENABLED: &str = "turbo_enabled";

/// Selected model identifier.
pub const SELECTED_MODEL: &str = "selected_model";

/// Privacy-notice acceptance boolean.
pub const PRIVACY_ACCEPTED: &str = "privacy_accepted";

/// Conversation index: JSON list of `{id, title}` summaries.
pub const CONVERSATION_INDEX: &str = "conversation_index";

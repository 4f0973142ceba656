//! Attachment types.
//!
//! An attachment is raw bytes already encoded for transport (base64),
//! plus enough metadata to show a preview line before sending.

use serde::{Deserialize, Serialize};

/// A pending binary attachment, transport-encoded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attachment {
    /// Base64 payload exactly as sent in the request's `images` list.
    pub data: String,
    pub mime_type: String,
    /// Decoded size, for preview display.
    pub size_bytes: u64,
}

impl Attachment {
    /// Displayable data URI for previewing the attachment.
    pub fn data_uri(&self) -> String {
        format!("data:{};base64,{}", self.mime_type, self.data)
    }
}

/// Stable key addressing one staged attachment.
///
/// Generated, not positional: removing one attachment never changes the
/// handle of another still pending.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AttachmentHandle(pub u64);

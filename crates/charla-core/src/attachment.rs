//! Attachment staging: the holding area between selection and send.
//!
//! Entries are addressed by generated handles, not positions, so removing
//! one attachment in any order never corrupts the identity of the others.
//! The staging area is owned by exactly one chat loop and is drained
//! atomically at send time.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;

use charla_types::attachment::{Attachment, AttachmentHandle};

/// Ordered collection of pending attachments for the next outgoing message.
#[derive(Debug, Default)]
pub struct AttachmentStaging {
    entries: Vec<(AttachmentHandle, Attachment)>,
    next_handle: u64,
}

impl AttachmentStaging {
    pub fn new() -> Self {
        Self::default()
    }

    /// Encode raw bytes and append them. Returns the handle for later
    /// removal.
    pub fn add(&mut self, bytes: &[u8], mime_type: impl Into<String>) -> AttachmentHandle {
        let handle = AttachmentHandle(self.next_handle);
        self.next_handle += 1;
        self.entries.push((
            handle,
            Attachment {
                data: BASE64.encode(bytes),
                mime_type: mime_type.into(),
                size_bytes: bytes.len() as u64,
            },
        ));
        handle
    }

    /// Remove exactly the referenced entry. Unknown handles are a no-op.
    /// Returns whether anything was removed.
    pub fn remove(&mut self, handle: AttachmentHandle) -> bool {
        let before = self.entries.len();
        self.entries.retain(|(h, _)| *h != handle);
        self.entries.len() != before
    }

    /// Pending entries in insertion order, for preview display.
    pub fn entries(&self) -> impl Iterator<Item = (AttachmentHandle, &Attachment)> {
        self.entries.iter().map(|(h, a)| (*h, a))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Take the full list for the next send and empty the staging area in
    /// one step, so a slow send cannot race with attachments added for
    /// the following message.
    pub fn drain_and_clear(&mut self) -> Vec<Attachment> {
        std::mem::take(&mut self.entries)
            .into_iter()
            .map(|(_, attachment)| attachment)
            .collect()
    }

    /// Discard everything, e.g. on conversation reset.
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

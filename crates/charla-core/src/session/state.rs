//! Session state for one running chat loop.
//!
//! All the mutable per-conversation state lives here, owned by the chat
//! loop controller, instead of floating in module-level globals.

use charla_types::attachment::Attachment;
use charla_types::chat::ChatRequest;
use charla_types::session::ConversationId;

/// State threaded through one interactive session.
#[derive(Debug, Clone)]
pub struct SessionState {
    pub conversation_id: ConversationId,
    pub model: String,
    /// Opaque pass-through mode tag; never validated client-side.
    pub role_mode: String,
    pub turbo: bool,
    /// Whether this conversation has been recorded in the index yet.
    pub indexed: bool,
}

impl SessionState {
    pub fn new(conversation_id: ConversationId, model: String, role_mode: String, turbo: bool) -> Self {
        Self {
            conversation_id,
            model,
            role_mode,
            turbo,
            indexed: false,
        }
    }

    /// Compose the request body for one outgoing turn.
    pub fn compose_request(&self, message: &str, attachments: Vec<Attachment>) -> ChatRequest {
        let images = attachments.into_iter().map(|a| a.data).collect();
        ChatRequest::new(
            message,
            self.model.clone(),
            self.role_mode.clone(),
            self.conversation_id.as_str(),
        )
        .with_images(images)
        .with_turbo(self.turbo)
    }

    /// Adopt a fresh identity after a reset. The caller clears its
    /// transcript and staging; the state only forgets the index flag.
    pub fn adopt(&mut self, conversation_id: ConversationId) {
        self.conversation_id = conversation_id;
        self.indexed = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state(turbo: bool) -> SessionState {
        SessionState::new(
            ConversationId::from_string("conv-1".to_string()),
            "llama3.1:8b".to_string(),
            "general".to_string(),
            turbo,
        )
    }

    #[test]
    fn test_compose_request_carries_session_fields() {
        let req = state(false).compose_request("hello", Vec::new());
        assert_eq!(req.message, "hello");
        assert_eq!(req.model, "llama3.1:8b");
        assert_eq!(req.role_mode, "general");
        assert_eq!(req.session_id, "conv-1");
        assert!(req.images.is_none());
        assert!(req.options.is_none());
    }

    #[test]
    fn test_compose_request_with_turbo_and_images() {
        let attachment = Attachment {
            data: "QUJD".to_string(),
            mime_type: "image/png".to_string(),
            size_bytes: 3,
        };
        let req = state(true).compose_request("look", vec![attachment]);
        assert_eq!(req.images.as_deref(), Some(&["QUJD".to_string()][..]));
        assert!(req.options.is_some());
    }

    #[test]
    fn test_adopt_resets_index_flag() {
        let mut s = state(false);
        s.indexed = true;
        s.adopt(ConversationId::from_string("conv-2".to_string()));
        assert_eq!(s.conversation_id.as_str(), "conv-2");
        assert!(!s.indexed);
    }
}

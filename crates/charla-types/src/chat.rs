//! Chat request/response types for Charla.
//!
//! These types model the wire shapes of the bridge service's `/api/chat`
//! endpoint: the request body, the fixed performance-options bundle, the
//! tail metrics object, and the render events the stream consumer emits.

use serde::{Deserialize, Serialize};

/// Reserved delimiter separating response text from the trailing metrics
/// payload in the chat byte stream.
///
/// Everything before the sentinel is response text; everything after is a
/// JSON-encoded [`StreamMetrics`] object and must never be rendered.
pub const METADATA_SENTINEL: &str = "__METADATA__";

/// Request body for `POST /api/chat`.
///
/// `images` is omitted entirely (not sent as an empty list) when there are
/// no attachments, and `options` is present only when turbo mode is on.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatRequest {
    pub message: String,
    pub model: String,
    /// Operating mode tag. Free-form: passed through unmodified, never
    /// validated client-side.
    pub role_mode: String,
    pub session_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub images: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub options: Option<RequestOptions>,
}

impl ChatRequest {
    /// Build a request for one conversation turn.
    pub fn new(
        message: impl Into<String>,
        model: impl Into<String>,
        role_mode: impl Into<String>,
        session_id: impl Into<String>,
    ) -> Self {
        Self {
            message: message.into(),
            model: model.into(),
            role_mode: role_mode.into(),
            session_id: session_id.into(),
            images: None,
            options: None,
        }
    }

    /// Attach base64-encoded image payloads. An empty list leaves the
    /// `images` field omitted.
    pub fn with_images(mut self, images: Vec<String>) -> Self {
        self.images = if images.is_empty() { None } else { Some(images) };
        self
    }

    /// Attach the fixed turbo options bundle when `turbo` is enabled.
    pub fn with_turbo(mut self, turbo: bool) -> Self {
        self.options = turbo.then_some(RequestOptions::TURBO);
        self
    }
}

/// Performance-tuning bundle attached to a request in turbo mode.
///
/// The values are fixed constants; only the turbo *flag* is persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestOptions {
    pub num_gpu: i32,
    pub num_thread: u32,
    pub num_ctx: u32,
}

impl RequestOptions {
    /// The one options bundle this client ever sends.
    pub const TURBO: RequestOptions = RequestOptions {
        num_gpu: -1,
        num_thread: 16,
        num_ctx: 4096,
    };
}

/// Throughput metrics attached out-of-band at the tail of a response
/// stream, after [`METADATA_SENTINEL`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StreamMetrics {
    pub tps: f64,
    pub tokens: u64,
    pub duration_s: f64,
}

/// Events emitted by the stream consumer, one per protocol increment.
#[derive(Debug, Clone, PartialEq)]
pub enum RenderEvent {
    /// The entire accumulated response text so far. Cumulative by design:
    /// markdown structure can retroactively change as more tokens arrive
    /// (a code fence only closes once enough text is in), so consumers
    /// re-render from scratch on every delta.
    TextDelta(String),

    /// Terminal event. Carries the captured metrics, if the stream ended
    /// with a parsable metrics payload. Emitted at most once per request.
    Completed(Option<StreamMetrics>),
}

/// Errors from a chat send.
///
/// Never retried by the client; retries, if any, are caller policy.
#[derive(Debug, thiserror::Error)]
pub enum ChatError {
    #[error("transport error: {0}")]
    Transport(String),

    #[error("server returned HTTP {status}")]
    Status { status: u16 },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_omits_images_when_empty() {
        let req = ChatRequest::new("hi", "llama3.1:8b", "general", "abc")
            .with_images(Vec::new());
        let json = serde_json::to_string(&req).unwrap();
        assert!(!json.contains("images"));
        assert!(!json.contains("options"));
    }

    #[test]
    fn test_request_includes_images_when_present() {
        let req = ChatRequest::new("hi", "llama3.1:8b", "general", "abc")
            .with_images(vec!["AAAA".to_string()]);
        let json = serde_json::to_string(&req).unwrap();
        assert!(json.contains("\"images\":[\"AAAA\"]"));
    }

    #[test]
    fn test_request_turbo_attaches_fixed_options() {
        let req = ChatRequest::new("hi", "llama3.1:8b", "general", "abc").with_turbo(true);
        let json = serde_json::to_string(&req).unwrap();
        assert!(json.contains("\"num_gpu\":-1"));
        assert!(json.contains("\"num_thread\":16"));
        assert!(json.contains("\"num_ctx\":4096"));
    }

    #[test]
    fn test_request_no_options_without_turbo() {
        let req = ChatRequest::new("hi", "llama3.1:8b", "general", "abc").with_turbo(false);
        assert!(req.options.is_none());
    }

    #[test]
    fn test_role_mode_is_opaque() {
        // Arbitrary strings pass through unmodified.
        let req = ChatRequest::new("hi", "m", "anything-goes_here 123", "abc");
        let json = serde_json::to_string(&req).unwrap();
        assert!(json.contains("\"role_mode\":\"anything-goes_here 123\""));
    }

    #[test]
    fn test_metrics_deserialize() {
        let m: StreamMetrics =
            serde_json::from_str(r#"{"tps":5.0,"tokens":10,"duration_s":2.0}"#).unwrap();
        assert_eq!(m.tps, 5.0);
        assert_eq!(m.tokens, 10);
        assert_eq!(m.duration_s, 2.0);
    }

    #[test]
    fn test_chat_error_display() {
        let err = ChatError::Status { status: 503 };
        assert_eq!(err.to_string(), "server returned HTTP 503");
    }
}

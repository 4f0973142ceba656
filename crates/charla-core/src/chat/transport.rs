//! ChatTransport trait definition.
//!
//! The transport seam between the stream consumer and HTTP. Returns a
//! boxed byte stream (not RPITIT) so implementations stay object-safe
//! and the consumer can be tested against scripted byte sequences.

use std::pin::Pin;

use futures_util::Stream;

use charla_types::chat::{ChatError, ChatRequest};

/// Raw response bytes, delivered exactly as the transport chunks them.
pub type ByteStream = Pin<Box<dyn Stream<Item = Result<Vec<u8>, ChatError>> + Send + 'static>>;

/// Trait for the chat request transport.
///
/// Implementations live in charla-infra (e.g. `HttpChatTransport`). A
/// non-success status or connection failure surfaces as an `Err` item;
/// the transport performs no retries.
pub trait ChatTransport: Send + Sync {
    /// Issue the request and stream back the raw response body.
    fn send(&self, request: ChatRequest) -> ByteStream;
}

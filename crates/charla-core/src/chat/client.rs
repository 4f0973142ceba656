//! Streaming chat client: the protocol consumer.
//!
//! Drives one `/api/chat` exchange over a [`ChatTransport`], feeding raw
//! arrivals through the [`MetadataScanner`] and emitting [`RenderEvent`]s:
//! a cumulative `TextDelta` per increment of visible text, then exactly
//! one `Completed` carrying the captured metrics, if any.
//!
//! The client is not reentrant-safe by contract: the caller serializes
//! sends (one in-flight request per conversation turn) by not reading new
//! input until the terminal event. A transport failure ends the stream
//! with an error item; text already emitted stands as the last-good
//! transcript.

use std::pin::Pin;

use futures_util::{Stream, StreamExt};
use tracing::{debug, warn};

use charla_types::chat::{ChatError, ChatRequest, RenderEvent};

use super::scanner::MetadataScanner;
use super::transport::ChatTransport;

/// Streaming consumer for the hybrid text/metadata chat protocol.
pub struct StreamingChatClient<T: ChatTransport> {
    transport: T,
}

impl<T: ChatTransport> StreamingChatClient<T> {
    pub fn new(transport: T) -> Self {
        Self { transport }
    }

    /// Send one chat request and stream back render events.
    ///
    /// Event order per invocation is strict: every `TextDelta` carries a
    /// prefix-extension of the previous one, and `Completed` is the final
    /// item. Metrics are surfaced at most once.
    pub fn send(
        &self,
        request: ChatRequest,
    ) -> Pin<Box<dyn Stream<Item = Result<RenderEvent, ChatError>> + Send + 'static>> {
        debug!(model = %request.model, session = %request.session_id, "sending chat request");
        let mut bytes = self.transport.send(request);

        Box::pin(async_stream::try_stream! {
            let mut scanner = MetadataScanner::new();
            let mut transcript = String::new();

            while let Some(arrival) = bytes.next().await {
                let chunk = arrival?;
                let text = scanner.push(&chunk);
                if !text.is_empty() {
                    transcript.push_str(&text);
                    yield RenderEvent::TextDelta(transcript.clone());
                }
            }

            let saw_sentinel = scanner.saw_sentinel();
            let (tail, metrics) = scanner.finish();
            if !tail.is_empty() {
                transcript.push_str(&tail);
                yield RenderEvent::TextDelta(transcript.clone());
            }
            if saw_sentinel && metrics.is_none() {
                warn!("discarding malformed metrics payload");
            }

            yield RenderEvent::Completed(metrics);
        })
    }
}

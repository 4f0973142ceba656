//! HttpChatTransport -- concrete [`ChatTransport`] over reqwest.
//!
//! Posts the request body to `/api/chat` and hands the raw response
//! bytes back exactly as the connection chunks them. No retries, no
//! decoding; the protocol lives upstream in charla-core.

use std::time::Duration;

use futures_util::StreamExt;

use charla_core::chat::transport::{ByteStream, ChatTransport};
use charla_types::chat::{ChatError, ChatRequest};

/// Reqwest-backed chat transport.
pub struct HttpChatTransport {
    client: reqwest::Client,
    base_url: String,
}

impl HttpChatTransport {
    /// Create a transport against the given bridge base URL.
    pub fn new(base_url: impl Into<String>) -> Self {
        let client = reqwest::Client::builder()
            // Generations can run for minutes; bound the whole exchange
            // rather than individual reads.
            .timeout(Duration::from_secs(300))
            .build()
            .expect("failed to create reqwest client");

        Self {
            client,
            base_url: base_url.into(),
        }
    }

    fn url(&self) -> String {
        format!("{}/api/chat", self.base_url.trim_end_matches('/'))
    }
}

impl ChatTransport for HttpChatTransport {
    fn send(&self, request: ChatRequest) -> ByteStream {
        let client = self.client.clone();
        let url = self.url();

        Box::pin(async_stream::try_stream! {
            let response = client
                .post(&url)
                .json(&request)
                .send()
                .await
                .map_err(|e| ChatError::Transport(e.to_string()))?;

            let status = response.status();
            if !status.is_success() {
                Err(ChatError::Status {
                    status: status.as_u16(),
                })?;
            }

            let mut body = response.bytes_stream();
            while let Some(chunk) = body.next().await {
                let bytes = chunk.map_err(|e| ChatError::Transport(e.to_string()))?;
                yield bytes.to_vec();
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_joins_without_double_slash() {
        let transport = HttpChatTransport::new("http://localhost:8000/");
        assert_eq!(transport.url(), "http://localhost:8000/api/chat");
    }
}

//! Sentinel scanner separating response text from the tail metrics payload.
//!
//! The chat stream is plain UTF-8 text except that, at most once and at an
//! arbitrary position, it contains [`METADATA_SENTINEL`] followed by a
//! JSON-encoded [`StreamMetrics`] object. The scanner is fed raw byte
//! chunks exactly as the transport delivers them and hands back the text
//! that is safe to render after each arrival.
//!
//! Two boundary hazards are handled here:
//!
//! - The sentinel may straddle two arrivals. A tail of up to
//!   `sentinel.len() - 1` bytes that matches a sentinel prefix is carried
//!   into the next arrival, so the sentinel is detected regardless of how
//!   the transport chunks the stream.
//! - A multi-byte UTF-8 sequence may straddle two arrivals. An incomplete
//!   trailing sequence is likewise carried, never emitted half-decoded.

use charla_types::chat::{StreamMetrics, METADATA_SENTINEL};

/// Incremental scanner for the hybrid text/metadata chat stream.
#[derive(Debug, Default)]
pub struct MetadataScanner {
    /// Undecided tail bytes: a possible sentinel prefix or an incomplete
    /// UTF-8 sequence, carried between arrivals.
    carry: Vec<u8>,
    /// Everything received after the sentinel.
    metrics_buf: Vec<u8>,
    sentinel_found: bool,
}

impl MetadataScanner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the sentinel has been observed so far.
    pub fn saw_sentinel(&self) -> bool {
        self.sentinel_found
    }

    /// Feed one transport arrival. Returns the newly available response
    /// text (possibly empty while bytes are held back in the carry).
    pub fn push(&mut self, chunk: &[u8]) -> String {
        if self.sentinel_found {
            // Post-sentinel chunks belong to the metrics payload.
            self.metrics_buf.extend_from_slice(chunk);
            return String::new();
        }

        let sentinel = METADATA_SENTINEL.as_bytes();
        let mut buf = std::mem::take(&mut self.carry);
        buf.extend_from_slice(chunk);

        if let Some(pos) = find(&buf, sentinel) {
            self.sentinel_found = true;
            self.metrics_buf
                .extend_from_slice(&buf[pos + sentinel.len()..]);
            // Text preceding an ASCII sentinel in a valid stream is a
            // complete UTF-8 prefix.
            return String::from_utf8_lossy(&buf[..pos]).into_owned();
        }

        // Hold back a suffix that could be the start of a split sentinel.
        let hold = partial_sentinel_len(&buf, sentinel);
        let mut emit_end = buf.len() - hold;

        // Also hold back an incomplete trailing UTF-8 sequence.
        if let Err(err) = std::str::from_utf8(&buf[..emit_end]) {
            if err.error_len().is_none() {
                emit_end = err.valid_up_to();
            }
        }

        self.carry = buf.split_off(emit_end);
        String::from_utf8_lossy(&buf).into_owned()
    }

    /// Consume the scanner at end of stream. Returns any text still held
    /// in the carry (a sentinel prefix that never completed is ordinary
    /// text) and the parsed metrics, if a parsable payload followed the
    /// sentinel. A malformed payload yields `None`, never an error.
    pub fn finish(self) -> (String, Option<StreamMetrics>) {
        if self.sentinel_found {
            let metrics = std::str::from_utf8(&self.metrics_buf)
                .ok()
                .and_then(|raw| serde_json::from_str(raw.trim()).ok());
            (String::new(), metrics)
        } else {
            (String::from_utf8_lossy(&self.carry).into_owned(), None)
        }
    }
}

/// First position of `needle` in `haystack`.
fn find(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack.windows(needle.len()).position(|w| w == needle)
}

/// Length of the longest proper prefix of `sentinel` that is a suffix of
/// `buf`. These bytes cannot be emitted yet: the next arrival may turn
/// them into the full sentinel.
fn partial_sentinel_len(buf: &[u8], sentinel: &[u8]) -> usize {
    let max = sentinel.len().saturating_sub(1).min(buf.len());
    (1..=max)
        .rev()
        .find(|&k| buf[buf.len() - k..] == sentinel[..k])
        .unwrap_or(0)
}

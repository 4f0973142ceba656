//! Service availability types: health reports, the model catalog, and
//! the remote deployment config.

use serde::{Deserialize, Serialize};

/// Substring preferred when no model selection has been persisted.
pub const DEFAULT_MODEL_HINT: &str = "llama3.1:8b";

/// Result of a health probe. A failed or timed-out probe maps to
/// [`HealthReport::UNREACHABLE`], never to an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthReport {
    /// The bridge service answered at all.
    pub reachable: bool,
    /// The inference backend behind the bridge is connected.
    pub backend_ready: bool,
}

impl HealthReport {
    pub const UNREACHABLE: HealthReport = HealthReport {
        reachable: false,
        backend_ready: false,
    };
}

/// Remote deployment config, `GET /api/config`.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct ServiceConfig {
    #[serde(default)]
    pub is_cloud: bool,
}

/// The set of selectable models, replaced wholesale on every successful
/// poll and never merged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModelCatalog {
    Available(Vec<String>),
    /// Designated sentinel for a failed fetch. Callers disable the send
    /// affordance instead of crashing.
    Unavailable,
}

impl ModelCatalog {
    pub fn models(&self) -> &[String] {
        match self {
            ModelCatalog::Available(models) => models,
            ModelCatalog::Unavailable => &[],
        }
    }

    /// Whether a send could ever be issued against this catalog.
    pub fn is_usable(&self) -> bool {
        !self.models().is_empty()
    }

    /// Pick the model to select: the persisted choice if it is still in
    /// the catalog, else the first entry matching [`DEFAULT_MODEL_HINT`],
    /// else the first entry.
    pub fn choose(&self, persisted: Option<&str>) -> Option<String> {
        let models = self.models();
        if let Some(saved) = persisted {
            if models.iter().any(|m| m == saved) {
                return Some(saved.to_string());
            }
        }
        models
            .iter()
            .find(|m| m.contains(DEFAULT_MODEL_HINT))
            .or_else(|| models.first())
            .cloned()
    }
}

/// Errors from availability probes. These stop at the monitor boundary:
/// the monitor converts them to unreachable reports or the unavailable
/// catalog sentinel.
#[derive(Debug, thiserror::Error)]
pub enum ProbeError {
    #[error("probe timed out")]
    Timeout,

    #[error("transport error: {0}")]
    Transport(String),

    #[error("service returned HTTP {0}")]
    Status(u16),

    #[error("malformed response: {0}")]
    Decode(String),
}

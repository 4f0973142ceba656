//! One-time privacy consent gate.
//!
//! Shown at most once, and only for cloud deployments. A failed config
//! fetch fails open: usage is never blocked on a config error.

use tracing::debug;

use charla_types::error::StorageError;

use crate::probe::ServiceProbe;
use crate::storage::{keys, KvStore};

/// Environment-conditional, acceptance-persisted consent gate.
pub struct ConsentGate<S, P> {
    store: S,
    probe: P,
}

impl<S: KvStore, P: ServiceProbe> ConsentGate<S, P> {
    pub fn new(store: S, probe: P) -> Self {
        Self { store, probe }
    }

    /// Whether the privacy notice should be shown: acceptance was never
    /// persisted AND the remote config reports a cloud deployment.
    pub async fn evaluate(&self) -> Result<bool, StorageError> {
        let accepted = self
            .store
            .get(keys::PRIVACY_ACCEPTED)
            .await?
            .and_then(|v| v.as_bool())
            .unwrap_or(false);
        if accepted {
            return Ok(false);
        }

        match self.probe.fetch_config().await {
            Ok(config) => Ok(config.is_cloud),
            Err(err) => {
                debug!(error = %err, "config fetch failed, consent gate fails open");
                Ok(false)
            }
        }
    }

    /// Persist acceptance permanently. Idempotent.
    pub async fn accept(&self) -> Result<(), StorageError> {
        self.store
            .set(keys::PRIVACY_ACCEPTED, &serde_json::json!(true))
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::testing::MemoryKvStore;
    use charla_types::catalog::{HealthReport, ProbeError, ServiceConfig};

    struct FakeProbe {
        config: Result<ServiceConfig, ProbeError>,
    }

    impl ServiceProbe for FakeProbe {
        async fn check_health(&self) -> Result<HealthReport, ProbeError> {
            unimplemented!("not used by the gate")
        }

        async fn fetch_models(&self) -> Result<Vec<String>, ProbeError> {
            unimplemented!("not used by the gate")
        }

        async fn fetch_config(&self) -> Result<ServiceConfig, ProbeError> {
            match &self.config {
                Ok(cfg) => Ok(*cfg),
                Err(err) => Err(ProbeError::Transport(err.to_string())),
            }
        }
    }

    fn cloud_probe(is_cloud: bool) -> FakeProbe {
        FakeProbe {
            config: Ok(ServiceConfig { is_cloud }),
        }
    }

    fn failing_probe() -> FakeProbe {
        FakeProbe {
            config: Err(ProbeError::Timeout),
        }
    }

    #[tokio::test]
    async fn test_shows_for_cloud_without_acceptance() {
        let gate = ConsentGate::new(MemoryKvStore::new(), cloud_probe(true));
        assert!(gate.evaluate().await.unwrap());
    }

    #[tokio::test]
    async fn test_hidden_for_local_deployment() {
        let gate = ConsentGate::new(MemoryKvStore::new(), cloud_probe(false));
        assert!(!gate.evaluate().await.unwrap());
    }

    #[tokio::test]
    async fn test_hidden_after_acceptance() {
        let gate = ConsentGate::new(MemoryKvStore::new(), cloud_probe(true));
        gate.accept().await.unwrap();
        assert!(!gate.evaluate().await.unwrap());
    }

    #[tokio::test]
    async fn test_fails_open_on_config_error() {
        // Even with acceptance never persisted.
        let gate = ConsentGate::new(MemoryKvStore::new(), failing_probe());
        assert!(!gate.evaluate().await.unwrap());
    }

    #[tokio::test]
    async fn test_accept_is_idempotent() {
        let gate = ConsentGate::new(MemoryKvStore::new(), cloud_probe(true));
        gate.accept().await.unwrap();
        gate.accept().await.unwrap();
        assert!(!gate.evaluate().await.unwrap());
    }
}

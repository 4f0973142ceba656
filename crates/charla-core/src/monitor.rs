//! Availability monitoring: bounded-timeout health and catalog probes.
//!
//! Errors stop here. A failed or timed-out health probe becomes an
//! unreachable report; a failed catalog fetch becomes the designated
//! unavailable catalog. Nothing past this boundary ever throws, so the
//! caller can disable send affordances without crashing.

use std::time::Duration;

use tokio::sync::watch;
use tracing::{debug, warn};

use charla_types::catalog::{HealthReport, ModelCatalog};

use crate::probe::ServiceProbe;

/// Default bound for one health probe.
pub const HEALTH_TIMEOUT: Duration = Duration::from_secs(5);

/// Default bound for one catalog fetch.
pub const CATALOG_TIMEOUT: Duration = Duration::from_secs(10);

/// Default interval between periodic health probes.
pub const HEALTH_POLL_INTERVAL: Duration = Duration::from_secs(30);

/// Periodic health/catalog prober over a [`ServiceProbe`].
pub struct AvailabilityMonitor<P> {
    probe: P,
    health_timeout: Duration,
    catalog_timeout: Duration,
}

impl<P: ServiceProbe> AvailabilityMonitor<P> {
    pub fn new(probe: P) -> Self {
        Self {
            probe,
            health_timeout: HEALTH_TIMEOUT,
            catalog_timeout: CATALOG_TIMEOUT,
        }
    }

    /// Override the probe bounds (from config or tests).
    pub fn with_timeouts(mut self, health: Duration, catalog: Duration) -> Self {
        self.health_timeout = health;
        self.catalog_timeout = catalog;
        self
    }

    /// One bounded health probe. Timeout and transport failure both map
    /// to [`HealthReport::UNREACHABLE`].
    pub async fn check_health(&self) -> HealthReport {
        match tokio::time::timeout(self.health_timeout, self.probe.check_health()).await {
            Ok(Ok(report)) => report,
            Ok(Err(err)) => {
                debug!(error = %err, "health probe failed");
                HealthReport::UNREACHABLE
            }
            Err(_) => {
                debug!("health probe timed out");
                HealthReport::UNREACHABLE
            }
        }
    }

    /// One bounded catalog fetch. The catalog is replaced wholesale on
    /// success; failure yields [`ModelCatalog::Unavailable`].
    pub async fn refresh_catalog(&self) -> ModelCatalog {
        match tokio::time::timeout(self.catalog_timeout, self.probe.fetch_models()).await {
            Ok(Ok(models)) => {
                if models.is_empty() {
                    warn!("service reports an empty model catalog");
                }
                ModelCatalog::Available(models)
            }
            Ok(Err(err)) => {
                warn!(error = %err, "model catalog fetch failed");
                ModelCatalog::Unavailable
            }
            Err(_) => {
                warn!("model catalog fetch timed out");
                ModelCatalog::Unavailable
            }
        }
    }

    /// Poll health on a fixed interval, publishing each report to the
    /// watch channel. Exits when every receiver is gone.
    pub async fn run_health_loop(&self, interval: Duration, tx: watch::Sender<HealthReport>) {
        let mut ticker = tokio::time::interval(interval);
        loop {
            ticker.tick().await;
            let report = self.check_health().await;
            if tx.send(report).is_err() {
                return;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use charla_types::catalog::{ProbeError, ServiceConfig};

    /// Probe with scripted outcomes; `hang_*` makes a call never resolve.
    struct FakeProbe {
        health: Result<HealthReport, ProbeError>,
        models: Result<Vec<String>, ProbeError>,
        hang_health: bool,
        hang_models: bool,
    }

    impl Default for FakeProbe {
        fn default() -> Self {
            Self {
                health: Ok(HealthReport {
                    reachable: true,
                    backend_ready: true,
                }),
                models: Ok(vec!["llama3.1:8b".to_string()]),
                hang_health: false,
                hang_models: false,
            }
        }
    }

    fn clone_probe_err(err: &ProbeError) -> ProbeError {
        ProbeError::Transport(err.to_string())
    }

    impl ServiceProbe for FakeProbe {
        async fn check_health(&self) -> Result<HealthReport, ProbeError> {
            if self.hang_health {
                std::future::pending::<()>().await;
            }
            self.health.as_ref().copied().map_err(clone_probe_err)
        }

        async fn fetch_models(&self) -> Result<Vec<String>, ProbeError> {
            if self.hang_models {
                std::future::pending::<()>().await;
            }
            self.models.as_ref().cloned().map_err(clone_probe_err)
        }

        async fn fetch_config(&self) -> Result<ServiceConfig, ProbeError> {
            Ok(ServiceConfig::default())
        }
    }

    fn monitor(probe: FakeProbe) -> AvailabilityMonitor<FakeProbe> {
        AvailabilityMonitor::new(probe)
            .with_timeouts(Duration::from_millis(50), Duration::from_millis(50))
    }

    #[tokio::test]
    async fn test_healthy_service_reported() {
        let report = monitor(FakeProbe::default()).check_health().await;
        assert!(report.reachable);
        assert!(report.backend_ready);
    }

    #[tokio::test]
    async fn test_probe_error_maps_to_unreachable() {
        let probe = FakeProbe {
            health: Err(ProbeError::Transport("refused".to_string())),
            ..FakeProbe::default()
        };
        assert_eq!(monitor(probe).check_health().await, HealthReport::UNREACHABLE);
    }

    #[tokio::test]
    async fn test_hung_probe_returns_unreachable_within_bound() {
        let probe = FakeProbe {
            hang_health: true,
            ..FakeProbe::default()
        };
        let started = std::time::Instant::now();
        let report = monitor(probe).check_health().await;
        assert_eq!(report, HealthReport::UNREACHABLE);
        assert!(started.elapsed() < Duration::from_secs(2));
    }

    #[tokio::test]
    async fn test_catalog_replaced_wholesale() {
        let catalog = monitor(FakeProbe::default()).refresh_catalog().await;
        assert_eq!(
            catalog,
            ModelCatalog::Available(vec!["llama3.1:8b".to_string()])
        );
    }

    #[tokio::test]
    async fn test_catalog_failure_yields_unavailable() {
        let probe = FakeProbe {
            models: Err(ProbeError::Status(502)),
            ..FakeProbe::default()
        };
        assert_eq!(monitor(probe).refresh_catalog().await, ModelCatalog::Unavailable);
    }

    #[tokio::test]
    async fn test_hung_catalog_fetch_yields_unavailable() {
        let probe = FakeProbe {
            hang_models: true,
            ..FakeProbe::default()
        };
        assert_eq!(monitor(probe).refresh_catalog().await, ModelCatalog::Unavailable);
    }

    #[tokio::test]
    async fn test_health_loop_publishes_and_stops() {
        let (tx, mut rx) = watch::channel(HealthReport::UNREACHABLE);
        let m = monitor(FakeProbe::default());
        let handle = tokio::spawn(async move {
            m.run_health_loop(Duration::from_millis(10), tx).await;
        });

        rx.changed().await.unwrap();
        assert!(rx.borrow().reachable);

        drop(rx);
        // With no receivers left, the loop winds down.
        tokio::time::timeout(Duration::from_secs(1), handle)
            .await
            .unwrap()
            .unwrap();
    }
}

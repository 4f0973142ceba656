//! HttpServiceProbe -- concrete [`ServiceProbe`] over reqwest.
//!
//! Each probe is a single bounded request. Timeouts surface as
//! [`ProbeError::Timeout`] so the monitor can distinguish them in logs;
//! the monitor maps every probe error to a non-throwing report either
//! way.

use std::time::Duration;

use serde::Deserialize;

use charla_core::probe::ServiceProbe;
use charla_types::catalog::{HealthReport, ProbeError, ServiceConfig};

/// Wire shape of `GET /health`. The `ollama_connected` field name is
/// retained from the external service contract. Older bridge versions
/// send a `status` string instead of `reachable`; any well-formed answer
/// implies reachability.
#[derive(Debug, Deserialize)]
struct HealthWire {
    #[serde(default)]
    reachable: Option<bool>,
    #[serde(default)]
    ollama_connected: bool,
}

/// Wire shape of `GET /api/models`.
#[derive(Debug, Deserialize)]
struct ModelsWire {
    #[serde(default)]
    models: Vec<String>,
}

/// Reqwest-backed service probe.
pub struct HttpServiceProbe {
    client: reqwest::Client,
    base_url: String,
    health_timeout: Duration,
    catalog_timeout: Duration,
}

impl HttpServiceProbe {
    pub fn new(
        base_url: impl Into<String>,
        health_timeout: Duration,
        catalog_timeout: Duration,
    ) -> Self {
        let client = reqwest::Client::builder()
            .build()
            .expect("failed to create reqwest client");

        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            health_timeout,
            catalog_timeout,
        }
    }

    async fn get_json<T: for<'de> Deserialize<'de>>(
        &self,
        path: &str,
        timeout: Duration,
    ) -> Result<T, ProbeError> {
        let url = format!("{}{}", self.base_url, path);
        let response = self
            .client
            .get(&url)
            .timeout(timeout)
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(ProbeError::Status(status.as_u16()));
        }

        response
            .json::<T>()
            .await
            .map_err(|e| ProbeError::Decode(e.to_string()))
    }
}

fn map_reqwest_error(err: reqwest::Error) -> ProbeError {
    if err.is_timeout() {
        ProbeError::Timeout
    } else {
        ProbeError::Transport(err.to_string())
    }
}

impl ServiceProbe for HttpServiceProbe {
    async fn check_health(&self) -> Result<HealthReport, ProbeError> {
        let wire: HealthWire = self.get_json("/health", self.health_timeout).await?;
        Ok(HealthReport {
            reachable: wire.reachable.unwrap_or(true),
            backend_ready: wire.ollama_connected,
        })
    }

    async fn fetch_models(&self) -> Result<Vec<String>, ProbeError> {
        let wire: ModelsWire = self.get_json("/api/models", self.catalog_timeout).await?;
        Ok(wire.models)
    }

    async fn fetch_config(&self) -> Result<ServiceConfig, ProbeError> {
        self.get_json("/api/config", self.catalog_timeout).await
    }
}

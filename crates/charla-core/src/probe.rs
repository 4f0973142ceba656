//! ServiceProbe trait definition.
//!
//! The seam between availability monitoring and HTTP. Uses RPITIT
//! (native async fn in traits, Rust 2024 edition). Implementations live
//! in charla-infra.

use charla_types::catalog::{HealthReport, ProbeError, ServiceConfig};

/// Trait for the bridge service's read-only probe endpoints.
pub trait ServiceProbe: Send + Sync {
    /// `GET /health`.
    fn check_health(
        &self,
    ) -> impl std::future::Future<Output = Result<HealthReport, ProbeError>> + Send;

    /// `GET /api/models`.
    fn fetch_models(
        &self,
    ) -> impl std::future::Future<Output = Result<Vec<String>, ProbeError>> + Send;

    /// `GET /api/config`.
    fn fetch_config(
        &self,
    ) -> impl std::future::Future<Output = Result<ServiceConfig, ProbeError>> + Send;
}

//! Key-value store trait.
//!
//! The client treats local persistent storage as a plain key/value store
//! it reads and writes but does not implement. Values are arbitrary JSON.
//! Uses RPITIT (native async fn in traits, Rust 2024 edition).
//! Implementations live in charla-infra.

use charla_types::error::StorageError;

/// Trait for persistent key-value storage.
pub trait KvStore: Send + Sync {
    /// Get a value by key. Returns None if the key does not exist.
    fn get(
        &self,
        key: &str,
    ) -> impl std::future::Future<Output = Result<Option<serde_json::Value>, StorageError>> + Send;

    /// Set a value for a key (upsert).
    fn set(
        &self,
        key: &str,
        value: &serde_json::Value,
    ) -> impl std::future::Future<Output = Result<(), StorageError>> + Send;

    /// Delete a key. No-op if the key does not exist.
    fn delete(
        &self,
        key: &str,
    ) -> impl std::future::Future<Output = Result<(), StorageError>> + Send;
}

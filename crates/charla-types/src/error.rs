use thiserror::Error;

/// Errors from persistent storage operations (used by the `KvStore`
/// trait defined in charla-core).
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("database connection error")]
    Connection,

    #[error("query error: {0}")]
    Query(String),

    #[error("serialization error: {0}")]
    Serialization(String),
}

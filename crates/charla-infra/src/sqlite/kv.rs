//! SQLite key-value store implementation.
//!
//! Implements `KvStore` from `charla-core` using sqlx with split
//! read/write pools. Values are stored as JSON text and deserialized on
//! read.

use charla_core::storage::KvStore;
use charla_types::error::StorageError;
use chrono::Utc;
use sqlx::Row;

use super::pool::DatabasePool;

/// SQLite-backed implementation of `KvStore`.
#[derive(Clone)]
pub struct SqliteKvStore {
    pool: DatabasePool,
}

impl SqliteKvStore {
    /// Create a new KV store backed by the given database pool.
    pub fn new(pool: DatabasePool) -> Self {
        Self { pool }
    }
}

impl KvStore for SqliteKvStore {
    async fn get(&self, key: &str) -> Result<Option<serde_json::Value>, StorageError> {
        let row = sqlx::query("SELECT value FROM kv_store WHERE key = ?")
            .bind(key)
            .fetch_optional(&self.pool.reader)
            .await
            .map_err(|e| StorageError::Query(e.to_string()))?;

        match row {
            Some(row) => {
                let value_str: String = row
                    .try_get("value")
                    .map_err(|e| StorageError::Query(e.to_string()))?;
                let value: serde_json::Value = serde_json::from_str(&value_str)
                    .map_err(|e| StorageError::Serialization(format!("invalid JSON value: {e}")))?;
                Ok(Some(value))
            }
            None => Ok(None),
        }
    }

    async fn set(&self, key: &str, value: &serde_json::Value) -> Result<(), StorageError> {
        let now = Utc::now().to_rfc3339();
        let value_str = serde_json::to_string(value)
            .map_err(|e| StorageError::Serialization(e.to_string()))?;

        sqlx::query(
            r#"INSERT INTO kv_store (key, value, created_at, updated_at)
               VALUES (?, ?, ?, ?)
               ON CONFLICT (key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at"#,
        )
        .bind(key)
        .bind(&value_str)
        .bind(&now)
        .bind(&now)
        .execute(&self.pool.writer)
        .await
        .map_err(|e| StorageError::Query(e.to_string()))?;

        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<(), StorageError> {
        sqlx::query("DELETE FROM kv_store WHERE key = ?")
            .bind(key)
            .execute(&self.pool.writer)
            .await
            .map_err(|e| StorageError::Query(e.to_string()))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn test_store() -> SqliteKvStore {
        let dir = tempfile::tempdir().unwrap();
        let db_path = dir.path().join("test.db");
        let url = format!("sqlite://{}?mode=rwc", db_path.display());
        std::mem::forget(dir);
        SqliteKvStore::new(DatabasePool::new(&url).await.unwrap())
    }

    #[tokio::test]
    async fn test_set_get_roundtrip() {
        let store = test_store().await;

        let value = serde_json::json!({"id": "abc", "title": "hello"});
        store.set("conversation_index", &value).await.unwrap();

        let got = store.get("conversation_index").await.unwrap();
        assert_eq!(got, Some(value));
    }

    #[tokio::test]
    async fn test_get_nonexistent_returns_none() {
        let store = test_store().await;
        assert!(store.get("missing").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_set_upserts() {
        let store = test_store().await;

        store.set("turbo_enabled", &serde_json::json!(false)).await.unwrap();
        store.set("turbo_enabled", &serde_json::json!(true)).await.unwrap();

        let got = store.get("turbo_enabled").await.unwrap();
        assert_eq!(got, Some(serde_json::json!(true)));
    }

    #[tokio::test]
    async fn test_delete() {
        let store = test_store().await;

        store.set("temp", &serde_json::json!("value")).await.unwrap();
        store.delete("temp").await.unwrap();

        assert!(store.get("temp").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_delete_nonexistent_is_noop() {
        let store = test_store().await;
        store.delete("nope").await.unwrap();
    }

    #[tokio::test]
    async fn test_json_value_types() {
        let store = test_store().await;

        store.set("string", &serde_json::json!("hello")).await.unwrap();
        assert_eq!(
            store.get("string").await.unwrap(),
            Some(serde_json::json!("hello"))
        );

        store.set("bool", &serde_json::json!(true)).await.unwrap();
        assert_eq!(store.get("bool").await.unwrap(), Some(serde_json::json!(true)));

        store
            .set("array", &serde_json::json!([{"id": "a", "title": "t"}]))
            .await
            .unwrap();
        assert_eq!(
            store.get("array").await.unwrap(),
            Some(serde_json::json!([{"id": "a", "title": "t"}]))
        );
    }

    #[tokio::test]
    async fn test_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let db_path = dir.path().join("persist.db");
        let url = format!("sqlite://{}?mode=rwc", db_path.display());

        {
            let store = SqliteKvStore::new(DatabasePool::new(&url).await.unwrap());
            store.set("session_id", &serde_json::json!("abc-123")).await.unwrap();
        }

        let store = SqliteKvStore::new(DatabasePool::new(&url).await.unwrap());
        assert_eq!(
            store.get("session_id").await.unwrap(),
            Some(serde_json::json!("abc-123"))
        );
    }
}

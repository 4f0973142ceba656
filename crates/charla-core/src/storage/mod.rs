//! Persistent key-value storage: trait and well-known keys.

pub mod keys;
pub mod kv_store;

pub use kv_store::KvStore;

#[cfg(test)]
pub(crate) mod testing {
    //! In-memory `KvStore` for unit tests.

    use std::collections::HashMap;
    use std::sync::Mutex;

    use charla_types::error::StorageError;

    use super::KvStore;

    #[derive(Default)]
    pub struct MemoryKvStore {
        entries: Mutex<HashMap<String, serde_json::Value>>,
    }

    impl MemoryKvStore {
        pub fn new() -> Self {
            Self::default()
        }
    }

    impl KvStore for MemoryKvStore {
        async fn get(&self, key: &str) -> Result<Option<serde_json::Value>, StorageError> {
            Ok(self.entries.lock().unwrap().get(key).cloned())
        }

        async fn set(&self, key: &str, value: &serde_json::Value) -> Result<(), StorageError> {
            self.entries
                .lock()
                .unwrap()
                .insert(key.to_string(), value.clone());
            Ok(())
        }

        async fn delete(&self, key: &str) -> Result<(), StorageError> {
            self.entries.lock().unwrap().remove(key);
            Ok(())
        }
    }
}

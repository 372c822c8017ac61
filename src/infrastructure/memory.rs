//! In-memory cache backend.
//!
//! Thread-safe (`Arc<RwLock>`), async-ready, and keyed by the fetcher's
//! namespaced cache keys. Suitable for tests and single-run invocations;
//! contents are lost when the process exits. For persistence across runs,
//! implement `CacheStore` against Redis or similar.

use crate::domain::ports::CacheStore;
use crate::domain::types::TraderRecord;
use anyhow::Result;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

pub struct InMemoryCacheStore {
    entries: Arc<RwLock<HashMap<String, TraderRecord>>>,
}

impl InMemoryCacheStore {
    pub fn new() -> Self {
        Self {
            entries: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }
}

impl Default for InMemoryCacheStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CacheStore for InMemoryCacheStore {
    async fn get(&self, key: &str) -> Result<Option<TraderRecord>> {
        Ok(self.entries.read().await.get(key).cloned())
    }

    async fn put(&self, key: &str, record: &TraderRecord) -> Result<()> {
        self.entries
            .write()
            .await
            .insert(key.to_string(), record.clone());
        Ok(())
    }
}

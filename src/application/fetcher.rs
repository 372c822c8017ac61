use std::sync::Arc;

use tracing::{debug, warn};

use crate::application::throttle::Throttle;
use crate::domain::errors::FetchError;
use crate::domain::ports::{CacheStore, DataSource};
use crate::domain::types::TraderRecord;

/// Cache-aside resolution of trader records.
///
/// A cache hit is trusted wholesale and returned as-is. On a miss the three
/// per-trader fetches go out in sequence, each through its own throttle
/// slot, and the assembled record is written back before being returned.
/// Cache failures in either direction are absorbed: a failing read counts
/// as a miss, a failing write still hands the fresh record to the caller.
pub struct CacheAsideFetcher {
    source: Arc<dyn DataSource>,
    cache: Arc<dyn CacheStore>,
    throttle: Arc<Throttle>,
    namespace: String,
}

impl CacheAsideFetcher {
    pub fn new(
        source: Arc<dyn DataSource>,
        cache: Arc<dyn CacheStore>,
        throttle: Arc<Throttle>,
        namespace: impl Into<String>,
    ) -> Self {
        Self {
            source,
            cache,
            throttle,
            namespace: namespace.into(),
        }
    }

    pub fn cache_key(&self, id: &str) -> String {
        format!("{}:{}", self.namespace, id)
    }

    pub async fn resolve(&self, id: &str) -> Result<TraderRecord, FetchError> {
        let key = self.cache_key(id);

        match self.cache.get(&key).await {
            Ok(Some(record)) => {
                debug!(trader = %id, "cache hit");
                return Ok(record);
            }
            Ok(None) => debug!(trader = %id, "cache miss"),
            Err(e) => {
                warn!(trader = %id, error = %format!("{e:#}"), "cache read failed, treating as miss")
            }
        }

        let record = self.fetch_record(id).await?;

        // All three fetches succeeded; only now does anything reach the
        // cache. A write failure does not cost the caller the record.
        if let Err(e) = self.cache.put(&key, &record).await {
            warn!(trader = %id, error = %format!("{e:#}"), "cache write failed, returning record anyway");
        }

        Ok(record)
    }

    async fn fetch_record(&self, id: &str) -> Result<TraderRecord, FetchError> {
        let failed = |cause: anyhow::Error| FetchError::Failed {
            trader: id.to_string(),
            cause,
        };

        let source = Arc::clone(&self.source);
        let trader = id.to_string();
        let performance = self
            .throttle
            .schedule(async move { source.fetch_performance(&trader).await })
            .await
            .map_err(failed)?;

        let source = Arc::clone(&self.source);
        let trader = id.to_string();
        let statistics = self
            .throttle
            .schedule(async move { source.fetch_statistics(&trader).await })
            .await
            .map_err(failed)?;

        let source = Arc::clone(&self.source);
        let trader = id.to_string();
        let history = self
            .throttle
            .schedule(async move { source.fetch_history(&trader).await })
            .await
            .map_err(failed)?;

        Ok(TraderRecord {
            id: id.to_string(),
            performance,
            statistics,
            history,
            fetched_at: chrono::Utc::now(),
        })
    }
}

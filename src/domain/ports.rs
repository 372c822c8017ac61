use crate::domain::types::{LeaderHistory, PerformancePoint, TraderId, TraderRecord, TraderStatistics};
use anyhow::Result;
use async_trait::async_trait;

// Need async_trait for async functions in traits
#[async_trait]
pub trait DataSource: Send + Sync {
    /// Ids of the traders currently on the leaderboard, in leaderboard order.
    async fn fetch_leaderboard(&self) -> Result<Vec<TraderId>>;
    /// Cumulative-return series for one trader, chronological.
    async fn fetch_performance(&self, id: &str) -> Result<Vec<PerformancePoint>>;
    async fn fetch_statistics(&self, id: &str) -> Result<TraderStatistics>;
    async fn fetch_history(&self, id: &str) -> Result<LeaderHistory>;
}

/// Opaque key -> document store holding one [`TraderRecord`] per key.
/// Implementations decide persistence and staleness; the core imposes no TTL.
#[async_trait]
pub trait CacheStore: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<TraderRecord>>;
    async fn put(&self, key: &str, record: &TraderRecord) -> Result<()>;
}

use crate::domain::ports::DataSource;
use crate::domain::types::{
    LeaderHistory, PerformancePoint, TraderId, TraderStatistics,
};
use anyhow::Result;
use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Deterministic data source for `MODE=mock` runs and integration tests.
/// Serves fixed cumulative-return series per trader and counts every
/// per-trader fetch so tests can assert cache behavior.
pub struct MockDataSource {
    traders: Vec<(TraderId, Vec<f64>)>,
    fetches: AtomicUsize,
}

impl MockDataSource {
    pub fn with_traders(traders: Vec<(TraderId, Vec<f64>)>) -> Self {
        Self {
            traders,
            fetches: AtomicUsize::new(0),
        }
    }

    /// Total number of per-trader fetch calls served so far
    /// (leaderboard fetches are not counted).
    pub fn fetches(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }

    fn series(&self, id: &str) -> Result<&[f64]> {
        self.traders
            .iter()
            .find(|(trader, _)| trader == id)
            .map(|(_, series)| series.as_slice())
            .ok_or_else(|| anyhow::anyhow!("unknown trader: {id}"))
    }
}

impl Default for MockDataSource {
    /// Three synthetic traders: a steady climber, the same trend with
    /// visible noise, and a loss-making drifter.
    fn default() -> Self {
        let steady: Vec<f64> = (1..=30).map(|i| i as f64 * 1.5).collect();
        let noisy: Vec<f64> = (1..=30)
            .map(|i| i as f64 * 1.5 + if i % 2 == 0 { 4.0 } else { -4.0 })
            .collect();
        let drifter: Vec<f64> = (1..=30).map(|i| -(i as f64) * 0.8).collect();

        Self::with_traders(vec![
            ("steady".to_string(), steady),
            ("noisy".to_string(), noisy),
            ("drifter".to_string(), drifter),
        ])
    }
}

#[async_trait]
impl DataSource for MockDataSource {
    async fn fetch_leaderboard(&self) -> Result<Vec<TraderId>> {
        Ok(self.traders.iter().map(|(id, _)| id.clone()).collect())
    }

    async fn fetch_performance(&self, id: &str) -> Result<Vec<PerformancePoint>> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        Ok(self
            .series(id)?
            .iter()
            .enumerate()
            .map(|(i, value)| PerformancePoint {
                name: format!("day-{}", i + 1),
                value: *value,
            })
            .collect())
    }

    async fn fetch_statistics(&self, id: &str) -> Result<TraderStatistics> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        let series = self.series(id)?;
        Ok(TraderStatistics {
            total_trades: series.len() as u64,
            trades_per_day: 1.0,
            win_ratio: 0.5,
            ..TraderStatistics::default()
        })
    }

    async fn fetch_history(&self, id: &str) -> Result<LeaderHistory> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        self.series(id)?;
        Ok(LeaderHistory::default())
    }
}

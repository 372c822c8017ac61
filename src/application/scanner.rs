use std::sync::Arc;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use tracing::{debug, info, warn};

use crate::application::fetcher::CacheAsideFetcher;
use crate::domain::ports::DataSource;
use crate::domain::types::KRatioScore;
use crate::domain::{ranking, scoring};

/// Outcome of one scan: the ranked top traders plus counters for the
/// traders that were looked at and the ones skipped over per-trader errors.
#[derive(Debug, Clone)]
pub struct ScanReport {
    pub ranked: Vec<KRatioScore>,
    pub scanned: usize,
    pub skipped: usize,
    pub started_at: DateTime<Utc>,
}

/// Sequential scan driver: leaderboard -> resolve -> score, one trader at a
/// time, then a single ranking pass. Per-trader failures are logged and
/// skipped; only a failed leaderboard fetch aborts the run.
pub struct Scanner {
    source: Arc<dyn DataSource>,
    fetcher: CacheAsideFetcher,
    min_k_ratio: f64,
    top_count: usize,
}

impl Scanner {
    pub fn new(
        source: Arc<dyn DataSource>,
        fetcher: CacheAsideFetcher,
        min_k_ratio: f64,
        top_count: usize,
    ) -> Self {
        Self {
            source,
            fetcher,
            min_k_ratio,
            top_count,
        }
    }

    pub async fn scan(&self) -> Result<ScanReport> {
        let started_at = Utc::now();

        let ids = self
            .source
            .fetch_leaderboard()
            .await
            .context("failed to fetch leaderboard")?;
        info!(traders = ids.len(), "scanning leaderboard");

        let mut scores = Vec::with_capacity(ids.len());
        let mut skipped = 0;

        for id in &ids {
            let record = match self.fetcher.resolve(id).await {
                Ok(record) => record,
                Err(e) => {
                    warn!(trader = %id, error = %e, "skipping trader: resolve failed");
                    skipped += 1;
                    continue;
                }
            };

            match scoring::score(&record) {
                Ok(score) => {
                    debug!(trader = %id, k_ratio = score.k_ratio, "scored trader");
                    scores.push(score);
                }
                Err(e) => {
                    warn!(trader = %id, error = %e, "skipping trader: scoring failed");
                    skipped += 1;
                }
            }
        }

        let ranked = ranking::rank(&scores, self.min_k_ratio, self.top_count);
        info!(
            scanned = ids.len(),
            skipped,
            ranked = ranked.len(),
            "scan complete"
        );

        Ok(ScanReport {
            ranked,
            scanned: ids.len(),
            skipped,
            started_at,
        })
    }
}

//! End-to-end scan over the mock data source: leaderboard -> throttled
//! cache-aside resolve -> K-ratio scoring -> ranking.

use std::sync::Arc;

use leaderscan::application::fetcher::CacheAsideFetcher;
use leaderscan::application::scanner::Scanner;
use leaderscan::application::throttle::Throttle;
use leaderscan::domain::ports::{CacheStore, DataSource};
use leaderscan::infrastructure::{InMemoryCacheStore, MockDataSource};

fn scanner_with(source: Arc<MockDataSource>, min_k_ratio: f64, top_count: usize) -> Scanner {
    // Rate high enough that throttling cost stays negligible in tests.
    let throttle = Arc::new(Throttle::new(600_000).unwrap());
    let cache: Arc<dyn CacheStore> = Arc::new(InMemoryCacheStore::new());
    let data_source: Arc<dyn DataSource> = source;
    let fetcher = CacheAsideFetcher::new(Arc::clone(&data_source), cache, throttle, "traders");
    Scanner::new(data_source, fetcher, min_k_ratio, top_count)
}

#[tokio::test]
async fn test_scan_ranks_consistent_traders_first() {
    let source = Arc::new(MockDataSource::default());
    let scanner = scanner_with(Arc::clone(&source), 0.0, 10);

    let report = scanner.scan().await.unwrap();

    assert_eq!(report.scanned, 3);
    assert_eq!(report.skipped, 0);

    // "steady" is perfectly linear (infinite K-ratio) and must outrank the
    // equally-sloped but noisy series; the loss-making "drifter" has a
    // negative score and falls below the cutoff.
    let ids: Vec<&str> = report.ranked.iter().map(|s| s.id.as_str()).collect();
    assert_eq!(ids, vec!["steady", "noisy"]);
    assert!(report.ranked[0].k_ratio.is_infinite());
    assert!(report.ranked[1].k_ratio.is_finite());
    assert!(report.ranked[1].k_ratio > 0.0);
}

#[tokio::test]
async fn test_rescan_is_served_from_cache() {
    let source = Arc::new(MockDataSource::default());
    let scanner = scanner_with(Arc::clone(&source), 0.0, 10);

    let first = scanner.scan().await.unwrap();
    assert_eq!(source.fetches(), 9); // 3 traders x 3 endpoints

    let second = scanner.scan().await.unwrap();
    assert_eq!(source.fetches(), 9); // every trader was a cache hit

    let first_ids: Vec<&str> = first.ranked.iter().map(|s| s.id.as_str()).collect();
    let second_ids: Vec<&str> = second.ranked.iter().map(|s| s.id.as_str()).collect();
    assert_eq!(first_ids, second_ids);
}

#[tokio::test]
async fn test_short_series_trader_is_skipped() {
    let source = Arc::new(MockDataSource::with_traders(vec![
        ("climber".to_string(), vec![1.0, 2.1, 2.9, 4.2, 5.0]),
        ("newcomer".to_string(), vec![1.0, 2.0]),
    ]));
    let scanner = scanner_with(Arc::clone(&source), f64::NEG_INFINITY, 10);

    let report = scanner.scan().await.unwrap();

    assert_eq!(report.scanned, 2);
    assert_eq!(report.skipped, 1);
    assert_eq!(report.ranked.len(), 1);
    assert_eq!(report.ranked[0].id, "climber");
}

#[tokio::test]
async fn test_min_k_ratio_cuts_off_ranking() {
    let source = Arc::new(MockDataSource::default());
    // Only a perfect line survives an infinite cutoff.
    let scanner = scanner_with(Arc::clone(&source), f64::INFINITY, 10);

    let report = scanner.scan().await.unwrap();

    assert_eq!(report.ranked.len(), 1);
    assert_eq!(report.ranked[0].id, "steady");
}

#[tokio::test]
async fn test_top_count_truncates() {
    let source = Arc::new(MockDataSource::default());
    let scanner = scanner_with(Arc::clone(&source), f64::NEG_INFINITY, 1);

    let report = scanner.scan().await.unwrap();

    assert_eq!(report.ranked.len(), 1);
    assert_eq!(report.ranked[0].id, "steady");
}

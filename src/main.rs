//! Leaderscan - leaderboard scan-and-rank job
//!
//! Fetches the copy-trading leaderboard, resolves each trader's performance
//! through a rate-limited cache-aside fetch layer, scores the series with a
//! K-ratio and logs the ranked top traders. One scan per invocation; safe to
//! re-run.
//!
//! # Usage
//! ```sh
//! MODE=tycoon REQUESTS_PER_MINUTE=30 cargo run -- --top 5
//! ```
//!
//! # Environment Variables
//! - `MODE` - 'mock' or 'tycoon' (default: mock)
//! - `TYCOON_BASE_URL` / `TYCOON_ACCESS_TOKEN` - upstream API endpoint and bearer token
//! - `REQUESTS_PER_MINUTE` - throttle rate for per-trader fetches (default: 30)
//! - `MIN_K_RATIO` / `TOP_COUNT` - ranking cutoff and result size

use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use tracing::{Level, info};
use tracing_subscriber::prelude::*;

use leaderscan::application::fetcher::CacheAsideFetcher;
use leaderscan::application::scanner::Scanner;
use leaderscan::application::throttle::Throttle;
use leaderscan::config::{Config, Mode};
use leaderscan::domain::ports::{CacheStore, DataSource};
use leaderscan::infrastructure::{InMemoryCacheStore, MockDataSource, TycoonClient};

#[derive(Parser)]
#[command(name = "leaderscan", version, about = "Scan a leaderboard and rank traders by K-ratio")]
struct Cli {
    /// Override MIN_K_RATIO from the environment
    #[arg(long)]
    min_k_ratio: Option<f64>,

    /// Override TOP_COUNT from the environment
    #[arg(long)]
    top: Option<usize>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    let stdout_layer = tracing_subscriber::fmt::layer().with_target(false);

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::from_default_env().add_directive(Level::INFO.into()))
        .with(stdout_layer)
        .init();

    let cli = Cli::parse();

    let mut config = Config::from_env()?;
    if let Some(min_k_ratio) = cli.min_k_ratio {
        config.min_k_ratio = min_k_ratio;
    }
    if let Some(top) = cli.top {
        config.top_count = top;
    }

    info!("leaderscan {} starting", env!("CARGO_PKG_VERSION"));
    info!(
        "Configuration loaded: Mode={:?}, Rate={}/min, MinKRatio={}, Top={}",
        config.mode, config.requests_per_minute, config.min_k_ratio, config.top_count
    );

    let source: Arc<dyn DataSource> = match config.mode {
        Mode::Mock => Arc::new(MockDataSource::default()),
        Mode::Tycoon => Arc::new(TycoonClient::new(
            &config.base_url,
            &config.access_token,
            config.leaderboard_size,
        )?),
    };
    let cache: Arc<dyn CacheStore> = Arc::new(InMemoryCacheStore::new());
    let throttle = Arc::new(Throttle::new(config.requests_per_minute)?);

    let fetcher = CacheAsideFetcher::new(
        Arc::clone(&source),
        cache,
        throttle,
        config.cache_namespace.clone(),
    );
    let scanner = Scanner::new(source, fetcher, config.min_k_ratio, config.top_count);

    let report = scanner.scan().await?;

    for (position, score) in report.ranked.iter().enumerate() {
        info!(
            "#{:<2} {}  k-ratio {:.3}",
            position + 1,
            score.id,
            score.k_ratio
        );
    }
    info!(
        "Scanned {} traders ({} skipped) starting {}",
        report.scanned,
        report.skipped,
        report.started_at.format("%Y-%m-%d %H:%M:%S UTC")
    );

    Ok(())
}

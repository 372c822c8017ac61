use anyhow::{Context, Result};
use std::env;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Mock,
    Tycoon,
}

impl FromStr for Mode {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "mock" => Ok(Mode::Mock),
            "tycoon" => Ok(Mode::Tycoon),
            _ => anyhow::bail!("Invalid MODE: {}. Must be 'mock' or 'tycoon'", s),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub mode: Mode,
    pub base_url: String,
    pub access_token: String,
    /// Upstream budget for throttled calls. Validated by `Throttle::new`.
    pub requests_per_minute: u32,
    /// How many leaderboard entries to request upstream.
    pub leaderboard_size: u32,
    pub min_k_ratio: f64,
    pub top_count: usize,
    pub cache_namespace: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let mode_str = env::var("MODE").unwrap_or_else(|_| "mock".to_string());
        let mode = Mode::from_str(&mode_str)?;

        let base_url = env::var("TYCOON_BASE_URL")
            .unwrap_or_else(|_| "https://www.binance.com/bapi/futures/v1".to_string());
        let access_token = env::var("TYCOON_ACCESS_TOKEN").unwrap_or_default();

        let requests_per_minute = env::var("REQUESTS_PER_MINUTE")
            .unwrap_or_else(|_| "30".to_string())
            .parse::<u32>()
            .context("Invalid REQUESTS_PER_MINUTE")?;

        let leaderboard_size = env::var("LEADERBOARD_SIZE")
            .unwrap_or_else(|_| "10".to_string())
            .parse::<u32>()
            .context("Invalid LEADERBOARD_SIZE")?;

        let min_k_ratio = env::var("MIN_K_RATIO")
            .unwrap_or_else(|_| "0.0".to_string())
            .parse::<f64>()
            .context("Invalid MIN_K_RATIO")?;

        let top_count = env::var("TOP_COUNT")
            .unwrap_or_else(|_| "10".to_string())
            .parse::<usize>()
            .context("Invalid TOP_COUNT")?;

        let cache_namespace = env::var("CACHE_NAMESPACE").unwrap_or_else(|_| "traders".to_string());

        Ok(Self {
            mode,
            base_url,
            access_token,
            requests_per_minute,
            leaderboard_size,
            min_k_ratio,
            top_count,
            cache_namespace,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mode_parsing() {
        assert_eq!(Mode::from_str("mock").unwrap(), Mode::Mock);
        assert_eq!(Mode::from_str("TYCOON").unwrap(), Mode::Tycoon);
        assert!(Mode::from_str("paper").is_err());
    }
}

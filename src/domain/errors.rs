use thiserror::Error;

use crate::domain::types::TraderId;

/// Errors raised when constructing the request throttle.
#[derive(Debug, Error)]
pub enum ThrottleError {
    #[error("invalid throttle rate: {rate} requests/minute (must be > 0)")]
    InvalidRate { rate: u32 },
}

/// Errors raised while resolving a trader record.
///
/// Cache read/write failures are deliberately absent: the cache is a
/// best-effort optimization and its failures are logged and absorbed by the
/// fetcher, never surfaced to callers.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("fetch failed for trader {trader}: {cause}")]
    Failed {
        trader: TraderId,
        #[source]
        cause: anyhow::Error,
    },
}

/// Errors raised while scoring a trader's performance series.
#[derive(Debug, Error)]
pub enum ScoreError {
    #[error("trader {trader} has {n} performance samples, need at least 3")]
    InsufficientData { trader: TraderId, n: usize },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fetch_error_formatting() {
        let err = FetchError::Failed {
            trader: "A1B2".to_string(),
            cause: anyhow::anyhow!("connection reset"),
        };

        let msg = err.to_string();
        assert!(msg.contains("A1B2"));
        assert!(msg.contains("connection reset"));
    }

    #[test]
    fn test_score_error_formatting() {
        let err = ScoreError::InsufficientData {
            trader: "A1B2".to_string(),
            n: 2,
        };

        let msg = err.to_string();
        assert!(msg.contains("2 performance samples"));
        assert!(msg.contains("at least 3"));
    }
}

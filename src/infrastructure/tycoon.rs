use crate::domain::ports::DataSource;
use crate::domain::types::{LeaderHistory, PerformancePoint, TraderId, TraderStatistics};
use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::{debug, info};
use url::Url;

// ===== Response types =====

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LeaderboardResponse {
    leader_board: Leaderboard,
    records: u64,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Leaderboard {
    entries: Vec<LeaderboardEntry>,
}

/// Only the fields the scanner needs; the endpoint returns many more.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LeaderboardEntry {
    encrypted_uid: String,
    nick_name: String,
}

// ===== Data source =====

/// HTTP client for the Tycoon leaderboard API.
///
/// The leaderboard endpoint requires bearer auth; the per-trader endpoints
/// are public. Per-trader calls are rate limited by the caller (the fetcher
/// schedules each one through the throttle), not here.
pub struct TycoonClient {
    client: Client,
    base_url: String,
    access_token: String,
    leaderboard_size: u32,
}

impl TycoonClient {
    pub fn new(base_url: &str, access_token: &str, leaderboard_size: u32) -> Result<Self> {
        let client = Client::builder()
            .pool_max_idle_per_host(5)
            .timeout(Duration::from_secs(30))
            .connect_timeout(Duration::from_secs(10))
            .build()
            .context("failed to build HTTP client")?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            access_token: access_token.to_string(),
            leaderboard_size,
        })
    }

    fn endpoint(&self, operation: &str, params: &[(&str, String)]) -> Result<Url> {
        Url::parse_with_params(
            &format!("{}/LeaderboardApi/{}", self.base_url, operation),
            params,
        )
        .with_context(|| format!("invalid url for {operation}"))
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        operation: &str,
        params: &[(&str, String)],
    ) -> Result<T> {
        let url = self.endpoint(operation, params)?;
        debug!(%url, "fetching");

        let response = self
            .client
            .get(url)
            .send()
            .await
            .with_context(|| format!("{operation} request failed"))?
            .error_for_status()
            .with_context(|| format!("{operation} request rejected"))?;

        response
            .json()
            .await
            .with_context(|| format!("malformed {operation} response"))
    }
}

#[async_trait]
impl DataSource for TycoonClient {
    async fn fetch_leaderboard(&self) -> Result<Vec<TraderId>> {
        let url = self.endpoint(
            "GetLeaderboard",
            &[
                ("statsType", "PNL".to_string()),
                ("periodType", "weekly".to_string()),
                ("topCount", self.leaderboard_size.to_string()),
                ("search", String::new()),
                ("leaderType", "Public".to_string()),
                ("skipLeaderCount", "10".to_string()),
                ("allTimeProfitable", "true".to_string()),
                ("atleastTrackingMonth", "0".to_string()),
                ("pnlHigherThan", "0".to_string()),
                ("noOfTradesLast7days", "0".to_string()),
                ("winRate", "0".to_string()),
                ("sort", "Weekly".to_string()),
                ("direction", "desc".to_string()),
            ],
        )?;

        let response = self
            .client
            .get(url)
            .bearer_auth(&self.access_token)
            .send()
            .await
            .context("leaderboard request failed")?
            .error_for_status()
            .context("leaderboard request rejected")?;

        let body: LeaderboardResponse = response
            .json()
            .await
            .context("malformed leaderboard response")?;

        info!(
            entries = body.leader_board.entries.len(),
            total = body.records,
            "leaderboard fetched"
        );
        for entry in &body.leader_board.entries {
            debug!(trader = %entry.encrypted_uid, name = %entry.nick_name, "leaderboard entry");
        }

        Ok(body
            .leader_board
            .entries
            .into_iter()
            .map(|entry| entry.encrypted_uid)
            .collect())
    }

    async fn fetch_performance(&self, id: &str) -> Result<Vec<PerformancePoint>> {
        self.get_json(
            "GetLeaderPerformance",
            &[
                ("leaderId", id.to_string()),
                ("statisticType", "PNL".to_string()),
            ],
        )
        .await
    }

    async fn fetch_statistics(&self, id: &str) -> Result<TraderStatistics> {
        self.get_json("GetLeaderStatistics", &[("leaderId", id.to_string())])
            .await
    }

    async fn fetch_history(&self, id: &str) -> Result<LeaderHistory> {
        self.get_json(
            "GetLeaderHistory",
            &[
                ("leaderId", id.to_string()),
                ("skipRecords", "0".to_string()),
                ("takeRecords", "10".to_string()),
            ],
        )
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_building() {
        let client = TycoonClient::new("https://example.com/", "token", 10).unwrap();
        let url = client
            .endpoint(
                "GetLeaderPerformance",
                &[
                    ("leaderId", "A1B2".to_string()),
                    ("statisticType", "PNL".to_string()),
                ],
            )
            .unwrap();

        assert_eq!(
            url.as_str(),
            "https://example.com/LeaderboardApi/GetLeaderPerformance?leaderId=A1B2&statisticType=PNL"
        );
    }

    #[test]
    fn test_leaderboard_response_parsing() {
        let body = r#"{
            "leaderBoard": {
                "entries": [
                    { "encryptedUid": "A1B2", "nickName": "alpha", "weeklyPNL": 120.5 },
                    { "encryptedUid": "C3D4", "nickName": "bravo", "weeklyPNL": 80.0 }
                ]
            },
            "records": 2
        }"#;

        let parsed: LeaderboardResponse = serde_json::from_str(body).unwrap();
        assert_eq!(parsed.records, 2);
        assert_eq!(parsed.leader_board.entries[0].encrypted_uid, "A1B2");
        assert_eq!(parsed.leader_board.entries[1].nick_name, "bravo");
    }
}

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Stable identifier of a leaderboard trader, used as cache key and map key.
pub type TraderId = String;

/// One point of a trader's cumulative-return series.
///
/// The series is chronological by construction; downstream stages must not
/// reorder or deduplicate it. `name` is the wire label for the point (a date
/// string on the real API) and is ignored by the scorer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PerformancePoint {
    pub name: String,
    pub value: f64,
}

/// Aggregate trading statistics as reported by the leaderboard API.
/// Pass-through data: assembled into the record and cached, never used
/// for scoring.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TraderStatistics {
    pub total_trades: u64,
    pub profitable_days: u64,
    #[serde(rename = "highestTradeROI")]
    pub highest_trade_roi: f64,
    #[serde(rename = "highestTradePNL")]
    pub highest_trade_pnl: f64,
    pub trades_per_day: f64,
    pub win_ratio: f64,
    pub avg_trading_size: f64,
    pub avg_trade_duration: f64,
    pub biggest_trade_loss: f64,
}

/// A single fill belonging to a merged position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaderTrade {
    pub symbol: String,
    pub amount: f64,
    pub leverage: f64,
    pub entry_price: f64,
    pub mark_price: f64,
    pub pnl: f64,
    pub roe: f64,
    pub days: f64,
    pub open_time: String,
    pub close_time: Option<String>,
    pub leader_trade_status: String,
    pub side: String,
}

/// A position with its constituent fills, as the API merges them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MergedPosition {
    pub id: String,
    pub symbol: String,
    pub amount: f64,
    pub leverage: f64,
    pub entry_price: f64,
    pub mark_price: f64,
    pub pnl: f64,
    pub roe: f64,
    pub days: f64,
    pub open_time: String,
    pub close_time: String,
    pub trade_history_list: Vec<LeaderTrade>,
    pub is_long: bool,
}

/// Recent position history for a trader. Pass-through data like
/// [`TraderStatistics`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaderHistory {
    pub merged_positions_data: Vec<MergedPosition>,
    pub records: u64,
}

/// Everything fetched for one trader in one run. Built either from a cache
/// hit or from three live fetches; immutable afterwards. Only `performance`
/// feeds the scorer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TraderRecord {
    pub id: TraderId,
    pub performance: Vec<PerformancePoint>,
    pub statistics: TraderStatistics,
    pub history: LeaderHistory,
    pub fetched_at: DateTime<Utc>,
}

/// A trader's consistency score for the current run. Derived, never cached:
/// it depends on whichever performance series the run resolved.
#[derive(Debug, Clone, PartialEq)]
pub struct KRatioScore {
    pub id: TraderId,
    pub k_ratio: f64,
}

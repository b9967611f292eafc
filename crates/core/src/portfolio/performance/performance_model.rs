use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Total return figures for one position: price movement plus dividends.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PositionPerformance {
    pub ticker: String,
    pub quantity: Decimal,
    /// quantity x average buy price
    pub cost_basis: Decimal,
    pub market_value: Decimal,
    /// Unrealized gain from price movement alone
    pub price_gain: Decimal,
    /// Dividends credited by this ticker over the analyzed history
    pub dividends: Decimal,
    pub total_return: Decimal,
    /// Total return as a fraction of cost basis; zero when the cost basis
    /// is zero
    pub total_return_pct: Decimal,
    pub opened_at: Option<DateTime<Utc>>,
}

/// Performance report over a position snapshot.
///
/// `positions` is ranked by `total_return_pct` descending; ties break on
/// ticker so repeated runs over the same input rank identically.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PerformanceReport {
    pub positions: Vec<PositionPerformance>,
    pub best_performer: PositionPerformance,
    pub worst_performer: PositionPerformance,
    pub total_price_gain: Decimal,
    pub total_dividends: Decimal,
    pub total_return: Decimal,
}

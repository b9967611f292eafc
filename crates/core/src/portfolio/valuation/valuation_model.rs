use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Valuation figures for a single position.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PositionValuation {
    pub ticker: String,
    pub quantity: Decimal,
    pub average_price: Decimal,
    pub current_price: Decimal,
    pub currency: String,
    /// quantity x current price
    pub market_value: Decimal,
    /// quantity x average buy price
    pub cost_basis: Decimal,
    pub unrealized_gain: Decimal,
    /// Gain as a fraction of cost basis; zero when the cost basis is zero
    pub unrealized_gain_pct: Decimal,
    /// Share of total portfolio value, as a fraction; zero when the
    /// portfolio total is zero
    pub weight: Decimal,
    pub opened_at: Option<DateTime<Utc>>,
}

/// Valuation of a whole position snapshot. Position order follows the
/// input sequence.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioValuation {
    pub positions: Vec<PositionValuation>,
    pub total_value: Decimal,
    pub total_cost_basis: Decimal,
    pub total_gain: Decimal,
}

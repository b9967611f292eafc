use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Account metadata
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AccountInfo {
    pub id: i64,
    pub currency_code: String,
}

/// Account balance breakdown. Fields the API omits default to zero.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CashBalance {
    /// Cash available for trading
    pub free: Decimal,
    /// Capital currently invested in positions
    pub invested: Decimal,
    /// Total account value (cash + positions)
    pub total: Decimal,
    /// Unrealized profit/loss across the account
    pub ppl: Decimal,
    /// Funds blocked by pending operations
    pub blocked: Decimal,
    /// Cash held inside pies
    pub pie_cash: Decimal,
}

/// An open position: a held quantity of one instrument.
///
/// `current_price` may be stale while the market is closed; quantity is
/// non-negative for the long-only account model.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Position {
    pub ticker: String,
    pub quantity: Decimal,
    pub average_price: Decimal,
    pub current_price: Decimal,
    /// Account currency the prices are denominated in
    pub currency: String,
    /// First fill date, when the venue reports one
    pub opened_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderSide {
    Buy,
    Sell,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderType {
    Market,
    Limit,
    Stop,
    StopLimit,
}

/// Order lifecycle state. The venue owns all transitions; this layer only
/// observes them. Filled, Cancelled and Rejected are terminal.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderStatus {
    Pending,
    Filled,
    Cancelled,
    Rejected,
}

/// An order as reported by the venue, open or historical.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: i64,
    pub ticker: String,
    pub side: OrderSide,
    pub order_type: OrderType,
    pub status: OrderStatus,
    /// Filled quantity for executed orders, ordered quantity otherwise
    pub quantity: Option<Decimal>,
    /// Monetary target for value-based orders
    pub value: Option<Decimal>,
    pub fill_price: Option<Decimal>,
    pub created_at: Option<DateTime<Utc>>,
    pub executed_at: Option<DateTime<Utc>>,
}

impl Order {
    /// Timestamp used when ordering the order chronologically: execution
    /// time when filled, placement time otherwise.
    pub fn activity_timestamp(&self) -> Option<DateTime<Utc>> {
        self.executed_at.or(self.created_at)
    }

    pub fn is_terminal(&self) -> bool {
        matches!(
            self.status,
            OrderStatus::Filled | OrderStatus::Cancelled | OrderStatus::Rejected
        )
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TransactionType {
    Deposit,
    Withdrawal,
    Transfer,
    Fee,
}

/// A cash movement on the account. Immutable once fetched.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub reference: Option<String>,
    #[serde(rename = "type")]
    pub transaction_type: TransactionType,
    pub amount: Decimal,
    pub timestamp: Option<DateTime<Utc>>,
}

/// A paid-out dividend. Immutable once fetched.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Dividend {
    pub ticker: String,
    /// Net amount in the account currency
    pub amount: Decimal,
    pub paid_on: DateTime<Utc>,
    #[serde(rename = "type")]
    pub dividend_type: Option<String>,
}

/// One page of the paginated dividend history.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DividendPage {
    pub items: Vec<Dividend>,
    pub next_cursor: Option<i64>,
}

/// Tradeable instrument reference data. Not owned by any account entity.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Instrument {
    pub ticker: String,
    pub name: String,
    #[serde(rename = "type")]
    pub instrument_type: Option<String>,
    pub currency_code: Option<String>,
    pub isin: Option<String>,
}

/// Exchange reference data.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Exchange {
    pub id: i64,
    pub name: String,
}

/// Read-only summary of a pie (a managed basket of instruments).
/// Surfaced as-is by the passthrough tools, never analyzed.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PieSummary {
    pub id: i64,
    pub status: Option<String>,
    pub cash: Option<Decimal>,
    pub invested: Option<Decimal>,
    pub value: Option<Decimal>,
    pub result: Option<Decimal>,
}

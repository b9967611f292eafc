use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::records::{OrderSide, OrderStatus, OrderType, TransactionType};

/// One entry of the merged activity feed.
///
/// Derived per request from orders and transactions; never persisted.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum ActivityEvent {
    #[serde(rename_all = "camelCase")]
    Order {
        id: i64,
        ticker: String,
        side: OrderSide,
        order_type: OrderType,
        status: OrderStatus,
        quantity: Option<Decimal>,
        fill_price: Option<Decimal>,
        value: Option<Decimal>,
        timestamp: DateTime<Utc>,
    },
    #[serde(rename_all = "camelCase")]
    Transaction {
        #[serde(rename = "type")]
        transaction_type: TransactionType,
        amount: Decimal,
        reference: Option<String>,
        timestamp: DateTime<Utc>,
    },
}

impl ActivityEvent {
    pub fn timestamp(&self) -> DateTime<Utc> {
        match self {
            ActivityEvent::Order { timestamp, .. } => *timestamp,
            ActivityEvent::Transaction { timestamp, .. } => *timestamp,
        }
    }

    /// Short human-readable description of the event.
    pub fn description(&self) -> String {
        match self {
            ActivityEvent::Order {
                ticker,
                side,
                status,
                quantity,
                ..
            } => {
                let verb = match side {
                    OrderSide::Buy => "Buy",
                    OrderSide::Sell => "Sell",
                };
                let state = match status {
                    OrderStatus::Filled => "filled",
                    OrderStatus::Cancelled => "cancelled",
                    OrderStatus::Rejected => "rejected",
                    OrderStatus::Pending => "pending",
                };
                match quantity {
                    Some(qty) => format!("{} {} {} ({})", verb, qty, ticker, state),
                    None => format!("{} {} ({})", verb, ticker, state),
                }
            }
            ActivityEvent::Transaction {
                transaction_type,
                amount,
                ..
            } => {
                let label = match transaction_type {
                    TransactionType::Deposit => "Deposit",
                    TransactionType::Withdrawal => "Withdrawal",
                    TransactionType::Transfer => "Transfer",
                    TransactionType::Fee => "Fee",
                };
                format!("{} of {}", label, amount)
            }
        }
    }
}

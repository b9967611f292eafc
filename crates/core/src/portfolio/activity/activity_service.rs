use log::debug;

use crate::errors::{Error, Result};
use crate::portfolio::activity::ActivityEvent;
use crate::records::{Order, OrderStatus, Transaction};

/// Stateless merger of orders and transactions into one activity feed.
#[derive(Debug, Default, Clone)]
pub struct ActivityService;

impl ActivityService {
    pub fn new() -> Self {
        Self
    }

    /// Merges filled/cancelled orders and transactions into a single feed
    /// sorted newest-first.
    ///
    /// Pending and rejected orders are excluded. Ties on the timestamp keep
    /// a stable order: orders come before transactions, each in input
    /// order. A record with no orderable timestamp fails the whole merge.
    pub fn merge(&self, orders: &[Order], transactions: &[Transaction]) -> Result<Vec<ActivityEvent>> {
        let mut events: Vec<ActivityEvent> = Vec::with_capacity(orders.len() + transactions.len());

        for order in orders {
            if !matches!(order.status, OrderStatus::Filled | OrderStatus::Cancelled) {
                continue;
            }
            let timestamp = order.activity_timestamp().ok_or_else(|| {
                Error::InvalidTimestamp(format!("order {} has no orderable timestamp", order.id))
            })?;
            events.push(ActivityEvent::Order {
                id: order.id,
                ticker: order.ticker.clone(),
                side: order.side,
                order_type: order.order_type,
                status: order.status,
                quantity: order.quantity,
                fill_price: order.fill_price,
                value: order.value,
                timestamp,
            });
        }

        for transaction in transactions {
            let timestamp = transaction.timestamp.ok_or_else(|| {
                Error::InvalidTimestamp(format!(
                    "transaction {} has no timestamp",
                    transaction.reference.as_deref().unwrap_or("<unreferenced>")
                ))
            })?;
            events.push(ActivityEvent::Transaction {
                transaction_type: transaction.transaction_type,
                amount: transaction.amount,
                reference: transaction.reference.clone(),
                timestamp,
            });
        }

        // Stable sort: equal timestamps keep insertion order, so orders
        // stay ahead of transactions.
        events.sort_by(|a, b| b.timestamp().cmp(&a.timestamp()));

        debug!(
            "Merged {} orders and {} transactions into {} events",
            orders.len(),
            transactions.len(),
            events.len()
        );
        Ok(events)
    }
}

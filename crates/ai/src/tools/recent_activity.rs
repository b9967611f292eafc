//! Recent activity tool - merged feed of trades and cash movements.

use rig::{completion::ToolDefinition, tool::Tool};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::try_join;

use agentfolio_core::{ActivityEvent, ActivityService};
use agentfolio_broker::HistoryQuery;

use crate::env::AgentEnvironment;
use crate::error::AgentError;
use crate::tools::constants::{DEFAULT_ACTIVITY_LIMIT, MAX_ACTIVITY_LIMIT};

/// Arguments for the fetch_recent_activity tool.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecentActivityArgs {
    /// How many entries to return (default 20, capped at 50).
    pub limit: Option<usize>,
}

/// One activity feed entry with a rendered description.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityEntryDto {
    pub description: String,
    #[serde(flatten)]
    pub event: ActivityEvent,
}

/// Output envelope for the recent activity tool.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecentActivityOutput {
    pub currency: String,
    /// Newest first
    pub activity: Vec<ActivityEntryDto>,
    /// Orders fetched from history (before terminal-state filtering)
    pub order_count: usize,
    pub transaction_count: usize,
}

/// Tool producing a unified timeline of recent trades and account
/// movements.
pub struct FetchRecentActivityTool<E: AgentEnvironment> {
    env: Arc<E>,
}

impl<E: AgentEnvironment> FetchRecentActivityTool<E> {
    pub fn new(env: Arc<E>) -> Self {
        Self { env }
    }
}

impl<E: AgentEnvironment> Clone for FetchRecentActivityTool<E> {
    fn clone(&self) -> Self {
        Self {
            env: self.env.clone(),
        }
    }
}

impl<E: AgentEnvironment + 'static> Tool for FetchRecentActivityTool<E> {
    const NAME: &'static str = "fetch_recent_activity";

    type Error = AgentError;
    type Args = RecentActivityArgs;
    type Output = RecentActivityOutput;

    async fn definition(&self, _prompt: String) -> ToolDefinition {
        ToolDefinition {
            name: Self::NAME.to_string(),
            description: "Get a unified timeline of recent trades and account movements: merges filled/cancelled orders with deposits, withdrawals and fees into one feed sorted newest-first.".to_string(),
            parameters: serde_json::json!({
                "type": "object",
                "properties": {
                    "limit": {
                        "type": "integer",
                        "minimum": 1,
                        "maximum": MAX_ACTIVITY_LIMIT,
                        "description": "How many entries to return. Defaults to 20, capped at 50."
                    }
                },
                "required": []
            }),
        }
    }

    async fn call(&self, args: Self::Args) -> Result<Self::Output, Self::Error> {
        let limit = args
            .limit
            .unwrap_or(DEFAULT_ACTIVITY_LIMIT)
            .clamp(1, MAX_ACTIVITY_LIMIT);

        let client = self.env.broker_client();
        let query = HistoryQuery::with_limit(limit);
        let (account, orders, transactions) = try_join!(
            client.fetch_account(),
            client.fetch_order_history(&query),
            client.fetch_transactions(&query)
        )?;

        let mut events = ActivityService::new().merge(&orders, &transactions)?;
        events.truncate(limit);

        Ok(RecentActivityOutput {
            currency: account.currency_code,
            activity: events
                .into_iter()
                .map(|event| ActivityEntryDto {
                    description: event.description(),
                    event,
                })
                .collect(),
            order_count: orders.len(),
            transaction_count: transactions.len(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::test_env::{MockBrokerClient, MockEnvironment};
    use agentfolio_core::{
        Order, OrderSide, OrderStatus, OrderType, Transaction, TransactionType,
    };
    use rust_decimal_macros::dec;

    fn filled_order(id: i64, executed_at: &str) -> Order {
        Order {
            id,
            ticker: "AAPL".to_string(),
            side: OrderSide::Buy,
            order_type: OrderType::Market,
            status: OrderStatus::Filled,
            quantity: Some(dec!(1)),
            value: None,
            fill_price: Some(dec!(10)),
            created_at: None,
            executed_at: Some(executed_at.parse().unwrap()),
        }
    }

    fn deposit(timestamp: &str) -> Transaction {
        Transaction {
            reference: Some("tx".to_string()),
            transaction_type: TransactionType::Deposit,
            amount: dec!(100),
            timestamp: Some(timestamp.parse().unwrap()),
        }
    }

    #[tokio::test]
    async fn test_feed_is_merged_newest_first() {
        let mut client = MockBrokerClient::new();
        client.order_history = vec![filled_order(1, "2024-05-02T10:00:00Z")];
        client.transactions = vec![deposit("2024-05-01T10:00:00Z")];
        let env = Arc::new(MockEnvironment::with_client(client));
        let tool = FetchRecentActivityTool::new(env);

        let output = tool.call(RecentActivityArgs::default()).await.unwrap();

        assert_eq!(output.order_count, 1);
        assert_eq!(output.transaction_count, 1);
        assert_eq!(output.activity.len(), 2);
        assert!(matches!(
            output.activity[0].event,
            ActivityEvent::Order { id: 1, .. }
        ));
        assert!(matches!(
            output.activity[1].event,
            ActivityEvent::Transaction { .. }
        ));
        assert_eq!(output.activity[1].description, "Deposit of 100");
    }

    #[tokio::test]
    async fn test_limit_caps_feed_length() {
        let mut client = MockBrokerClient::new();
        client.order_history = (0..10)
            .map(|i| filled_order(i, &format!("2024-05-{:02}T10:00:00Z", i + 1)))
            .collect();
        let env = Arc::new(MockEnvironment::with_client(client));
        let tool = FetchRecentActivityTool::new(env);

        let output = tool
            .call(RecentActivityArgs { limit: Some(3) })
            .await
            .unwrap();
        assert_eq!(output.activity.len(), 3);
    }

    #[tokio::test]
    async fn test_limit_is_capped_at_maximum() {
        let env = Arc::new(MockEnvironment::new());
        let tool = FetchRecentActivityTool::new(env);

        // A huge limit must not panic or leak past the cap.
        let output = tool
            .call(RecentActivityArgs { limit: Some(10_000) })
            .await
            .unwrap();
        assert!(output.activity.is_empty());
    }

    #[tokio::test]
    async fn test_invalid_timestamp_fails_the_tool() {
        let mut client = MockBrokerClient::new();
        let mut order = filled_order(1, "2024-05-02T10:00:00Z");
        order.executed_at = None;
        client.order_history = vec![order];
        let env = Arc::new(MockEnvironment::with_client(client));
        let tool = FetchRecentActivityTool::new(env);

        let error = tool.call(RecentActivityArgs::default()).await.unwrap_err();
        assert_eq!(error.code(), "INVALID_TIMESTAMP");
    }
}

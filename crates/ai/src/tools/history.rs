//! History passthrough tools: past orders, dividends, transactions.

use rig::{completion::ToolDefinition, tool::Tool};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use agentfolio_core::{DividendPage, Order, Transaction};
use agentfolio_broker::HistoryQuery;

use crate::env::AgentEnvironment;
use crate::error::AgentError;

/// Arguments for the history listing tools.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryArgs {
    /// Pagination cursor returned by a previous page.
    pub cursor: Option<i64>,
    /// Restrict results to one ticker.
    pub ticker: Option<String>,
    /// Page size (defaults to 20, capped at 50 by the API).
    pub limit: Option<usize>,
}

impl HistoryArgs {
    fn to_query(&self) -> HistoryQuery {
        HistoryQuery {
            cursor: self.cursor,
            ticker: self.ticker.clone(),
            limit: self.limit,
        }
    }
}

fn history_parameters(with_ticker: bool) -> serde_json::Value {
    let mut properties = serde_json::json!({
        "cursor": {
            "type": "integer",
            "description": "Pagination cursor from a previous page."
        },
        "limit": {
            "type": "integer",
            "minimum": 1,
            "maximum": 50,
            "description": "Page size, defaults to 20."
        }
    });
    if with_ticker {
        properties["ticker"] = serde_json::json!({
            "type": "string",
            "description": "Restrict results to one ticker."
        });
    }
    serde_json::json!({
        "type": "object",
        "properties": properties,
        "required": []
    })
}

/// Output wrapper for order history pages.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderHistoryOutput {
    pub orders: Vec<Order>,
    pub count: usize,
}

/// Tool listing past orders with execution details.
pub struct FetchOrderHistoryTool<E: AgentEnvironment> {
    env: Arc<E>,
}

impl<E: AgentEnvironment> FetchOrderHistoryTool<E> {
    pub fn new(env: Arc<E>) -> Self {
        Self { env }
    }
}

impl<E: AgentEnvironment> Clone for FetchOrderHistoryTool<E> {
    fn clone(&self) -> Self {
        Self {
            env: self.env.clone(),
        }
    }
}

impl<E: AgentEnvironment + 'static> Tool for FetchOrderHistoryTool<E> {
    const NAME: &'static str = "fetch_historical_order_data";

    type Error = AgentError;
    type Args = HistoryArgs;
    type Output = OrderHistoryOutput;

    async fn definition(&self, _prompt: String) -> ToolDefinition {
        ToolDefinition {
            name: Self::NAME.to_string(),
            description: "Retrieve past orders (filled, cancelled, rejected) along with their execution details and timestamps.".to_string(),
            parameters: history_parameters(true),
        }
    }

    async fn call(&self, args: Self::Args) -> Result<Self::Output, Self::Error> {
        let orders = self
            .env
            .broker_client()
            .fetch_order_history(&args.to_query())
            .await?;
        Ok(OrderHistoryOutput {
            count: orders.len(),
            orders,
        })
    }
}

/// Tool listing paid-out dividends, one page at a time.
pub struct FetchDividendHistoryTool<E: AgentEnvironment> {
    env: Arc<E>,
}

impl<E: AgentEnvironment> FetchDividendHistoryTool<E> {
    pub fn new(env: Arc<E>) -> Self {
        Self { env }
    }
}

impl<E: AgentEnvironment> Clone for FetchDividendHistoryTool<E> {
    fn clone(&self) -> Self {
        Self {
            env: self.env.clone(),
        }
    }
}

impl<E: AgentEnvironment + 'static> Tool for FetchDividendHistoryTool<E> {
    const NAME: &'static str = "fetch_paid_out_dividends";

    type Error = AgentError;
    type Args = HistoryArgs;
    type Output = DividendPage;

    async fn definition(&self, _prompt: String) -> ToolDefinition {
        ToolDefinition {
            name: Self::NAME.to_string(),
            description: "Retrieve dividend payouts received, including amounts and payment dates. Returns one page plus the cursor for the next one.".to_string(),
            parameters: history_parameters(true),
        }
    }

    async fn call(&self, args: Self::Args) -> Result<Self::Output, Self::Error> {
        Ok(self
            .env
            .broker_client()
            .fetch_dividends(&args.to_query())
            .await?)
    }
}

/// Tool listing currently open (pending) orders.
pub struct FetchOpenOrdersTool<E: AgentEnvironment> {
    env: Arc<E>,
}

impl<E: AgentEnvironment> FetchOpenOrdersTool<E> {
    pub fn new(env: Arc<E>) -> Self {
        Self { env }
    }
}

impl<E: AgentEnvironment> Clone for FetchOpenOrdersTool<E> {
    fn clone(&self) -> Self {
        Self {
            env: self.env.clone(),
        }
    }
}

impl<E: AgentEnvironment + 'static> Tool for FetchOpenOrdersTool<E> {
    const NAME: &'static str = "fetch_all_orders";

    type Error = AgentError;
    type Args = super::account::NoArgs;
    type Output = OrderHistoryOutput;

    async fn definition(&self, _prompt: String) -> ToolDefinition {
        ToolDefinition {
            name: Self::NAME.to_string(),
            description: "Retrieve all currently open orders, such as pending limit or stop orders that have not executed yet.".to_string(),
            parameters: serde_json::json!({
                "type": "object",
                "properties": {},
                "required": []
            }),
        }
    }

    async fn call(&self, _args: Self::Args) -> Result<Self::Output, Self::Error> {
        let orders = self.env.broker_client().fetch_open_orders().await?;
        Ok(OrderHistoryOutput {
            count: orders.len(),
            orders,
        })
    }
}

/// Output wrapper for transaction pages.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionsOutput {
    pub transactions: Vec<Transaction>,
    pub count: usize,
}

/// Tool listing account movements (deposits, withdrawals, fees).
pub struct FetchTransactionsTool<E: AgentEnvironment> {
    env: Arc<E>,
}

impl<E: AgentEnvironment> FetchTransactionsTool<E> {
    pub fn new(env: Arc<E>) -> Self {
        Self { env }
    }
}

impl<E: AgentEnvironment> Clone for FetchTransactionsTool<E> {
    fn clone(&self) -> Self {
        Self {
            env: self.env.clone(),
        }
    }
}

impl<E: AgentEnvironment + 'static> Tool for FetchTransactionsTool<E> {
    const NAME: &'static str = "fetch_transaction_list";

    type Error = AgentError;
    type Args = HistoryArgs;
    type Output = TransactionsOutput;

    async fn definition(&self, _prompt: String) -> ToolDefinition {
        ToolDefinition {
            name: Self::NAME.to_string(),
            description: "Retrieve account movements such as deposits, withdrawals, fees and internal transfers.".to_string(),
            parameters: history_parameters(false),
        }
    }

    async fn call(&self, args: Self::Args) -> Result<Self::Output, Self::Error> {
        let transactions = self
            .env
            .broker_client()
            .fetch_transactions(&args.to_query())
            .await?;
        Ok(TransactionsOutput {
            count: transactions.len(),
            transactions,
        })
    }
}

//! Account passthrough tools: metadata, cash, open positions.

use rig::{completion::ToolDefinition, tool::Tool};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use agentfolio_core::{AccountInfo, CashBalance, Position};

use crate::env::AgentEnvironment;
use crate::error::AgentError;

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NoArgs {}

fn empty_parameters() -> serde_json::Value {
    serde_json::json!({
        "type": "object",
        "properties": {},
        "required": []
    })
}

/// Tool returning account metadata (id and base currency).
pub struct FetchAccountInfoTool<E: AgentEnvironment> {
    env: Arc<E>,
}

impl<E: AgentEnvironment> FetchAccountInfoTool<E> {
    pub fn new(env: Arc<E>) -> Self {
        Self { env }
    }
}

impl<E: AgentEnvironment> Clone for FetchAccountInfoTool<E> {
    fn clone(&self) -> Self {
        Self {
            env: self.env.clone(),
        }
    }
}

impl<E: AgentEnvironment + 'static> Tool for FetchAccountInfoTool<E> {
    const NAME: &'static str = "fetch_account_info";

    type Error = AgentError;
    type Args = NoArgs;
    type Output = AccountInfo;

    async fn definition(&self, _prompt: String) -> ToolDefinition {
        ToolDefinition {
            name: Self::NAME.to_string(),
            description: "Retrieve account metadata such as the currency and unique account identifier.".to_string(),
            parameters: empty_parameters(),
        }
    }

    async fn call(&self, _args: Self::Args) -> Result<Self::Output, Self::Error> {
        Ok(self.env.broker_client().fetch_account().await?)
    }
}

/// Tool returning the detailed cash balance breakdown.
pub struct FetchAccountCashTool<E: AgentEnvironment> {
    env: Arc<E>,
}

impl<E: AgentEnvironment> FetchAccountCashTool<E> {
    pub fn new(env: Arc<E>) -> Self {
        Self { env }
    }
}

impl<E: AgentEnvironment> Clone for FetchAccountCashTool<E> {
    fn clone(&self) -> Self {
        Self {
            env: self.env.clone(),
        }
    }
}

impl<E: AgentEnvironment + 'static> Tool for FetchAccountCashTool<E> {
    const NAME: &'static str = "fetch_account_cash";

    type Error = AgentError;
    type Args = NoArgs;
    type Output = CashBalance;

    async fn definition(&self, _prompt: String) -> ToolDefinition {
        ToolDefinition {
            name: Self::NAME.to_string(),
            description: "Get a detailed breakdown of the account balance, including available cash, invested capital, P/L, and blocked funds.".to_string(),
            parameters: empty_parameters(),
        }
    }

    async fn call(&self, _args: Self::Args) -> Result<Self::Output, Self::Error> {
        Ok(self.env.broker_client().fetch_cash().await?)
    }
}

/// Output wrapper for position listings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OpenPositionsOutput {
    pub positions: Vec<Position>,
    pub count: usize,
}

/// Tool returning every open position with live prices.
pub struct FetchOpenPositionsTool<E: AgentEnvironment> {
    env: Arc<E>,
}

impl<E: AgentEnvironment> FetchOpenPositionsTool<E> {
    pub fn new(env: Arc<E>) -> Self {
        Self { env }
    }
}

impl<E: AgentEnvironment> Clone for FetchOpenPositionsTool<E> {
    fn clone(&self) -> Self {
        Self {
            env: self.env.clone(),
        }
    }
}

impl<E: AgentEnvironment + 'static> Tool for FetchOpenPositionsTool<E> {
    const NAME: &'static str = "fetch_all_open_positions";

    type Error = AgentError;
    type Args = NoArgs;
    type Output = OpenPositionsOutput;

    async fn definition(&self, _prompt: String) -> ToolDefinition {
        ToolDefinition {
            name: Self::NAME.to_string(),
            description: "Retrieve current holdings with live prices, quantities and cost basis for every position.".to_string(),
            parameters: empty_parameters(),
        }
    }

    async fn call(&self, _args: Self::Args) -> Result<Self::Output, Self::Error> {
        let positions = self.env.broker_client().fetch_positions().await?;
        Ok(OpenPositionsOutput {
            count: positions.len(),
            positions,
        })
    }
}

/// Arguments for the position lookup tool.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PositionByTickerArgs {
    pub ticker: String,
}

/// Tool looking up a single position by ticker.
pub struct FetchPositionByTickerTool<E: AgentEnvironment> {
    env: Arc<E>,
}

impl<E: AgentEnvironment> FetchPositionByTickerTool<E> {
    pub fn new(env: Arc<E>) -> Self {
        Self { env }
    }
}

impl<E: AgentEnvironment> Clone for FetchPositionByTickerTool<E> {
    fn clone(&self) -> Self {
        Self {
            env: self.env.clone(),
        }
    }
}

impl<E: AgentEnvironment + 'static> Tool for FetchPositionByTickerTool<E> {
    const NAME: &'static str = "search_position_by_ticker";

    type Error = AgentError;
    type Args = PositionByTickerArgs;
    type Output = Position;

    async fn definition(&self, _prompt: String) -> ToolDefinition {
        ToolDefinition {
            name: Self::NAME.to_string(),
            description: "Look up a single position by its ticker symbol to get real-time details on that specific holding.".to_string(),
            parameters: serde_json::json!({
                "type": "object",
                "properties": {
                    "ticker": {
                        "type": "string",
                        "description": "The instrument ticker in the venue's notation, e.g. AAPL_US_EQ."
                    }
                },
                "required": ["ticker"]
            }),
        }
    }

    async fn call(&self, args: Self::Args) -> Result<Self::Output, Self::Error> {
        if args.ticker.trim().is_empty() {
            return Err(AgentError::invalid_input("ticker must not be empty"));
        }
        Ok(self
            .env
            .broker_client()
            .fetch_position(args.ticker.trim())
            .await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::test_env::{MockBrokerClient, MockEnvironment};
    use rust_decimal_macros::dec;

    fn mock_with_position() -> MockBrokerClient {
        let mut client = MockBrokerClient::new();
        client.positions = vec![Position {
            ticker: "AAPL_US_EQ".to_string(),
            quantity: dec!(10),
            average_price: dec!(100),
            current_price: dec!(150),
            currency: "EUR".to_string(),
            opened_at: None,
        }];
        client
    }

    #[tokio::test]
    async fn test_account_info_tool() {
        let env = Arc::new(MockEnvironment::new());
        let tool = FetchAccountInfoTool::new(env);

        let output = tool.call(NoArgs::default()).await.unwrap();
        assert_eq!(output.currency_code, "EUR");
    }

    #[tokio::test]
    async fn test_open_positions_tool() {
        let env = Arc::new(MockEnvironment::with_client(mock_with_position()));
        let tool = FetchOpenPositionsTool::new(env);

        let output = tool.call(NoArgs::default()).await.unwrap();
        assert_eq!(output.count, 1);
        assert_eq!(output.positions[0].ticker, "AAPL_US_EQ");
    }

    #[tokio::test]
    async fn test_position_lookup_requires_ticker() {
        let env = Arc::new(MockEnvironment::with_client(mock_with_position()));
        let tool = FetchPositionByTickerTool::new(env);

        let error = tool
            .call(PositionByTickerArgs {
                ticker: "  ".to_string(),
            })
            .await
            .unwrap_err();
        assert_eq!(error.code(), "INVALID_INPUT");
    }

    #[tokio::test]
    async fn test_position_lookup_by_ticker() {
        let env = Arc::new(MockEnvironment::with_client(mock_with_position()));
        let tool = FetchPositionByTickerTool::new(env);

        let position = tool
            .call(PositionByTickerArgs {
                ticker: "AAPL_US_EQ".to_string(),
            })
            .await
            .unwrap();
        assert_eq!(position.quantity, dec!(10));
    }
}

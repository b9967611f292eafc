//! Pie passthrough tool (read-only).

use rig::{completion::ToolDefinition, tool::Tool};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use agentfolio_core::PieSummary;

use crate::env::AgentEnvironment;
use crate::error::AgentError;
use crate::tools::account::NoArgs;

/// Output wrapper for the pie listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PiesOutput {
    pub pies: Vec<PieSummary>,
    pub count: usize,
}

/// Tool listing the account's pies with their investment results.
pub struct FetchPiesTool<E: AgentEnvironment> {
    env: Arc<E>,
}

impl<E: AgentEnvironment> FetchPiesTool<E> {
    pub fn new(env: Arc<E>) -> Self {
        Self { env }
    }
}

impl<E: AgentEnvironment> Clone for FetchPiesTool<E> {
    fn clone(&self) -> Self {
        Self {
            env: self.env.clone(),
        }
    }
}

impl<E: AgentEnvironment + 'static> Tool for FetchPiesTool<E> {
    const NAME: &'static str = "fetch_all_pies";

    type Error = AgentError;
    type Args = NoArgs;
    type Output = PiesOutput;

    async fn definition(&self, _prompt: String) -> ToolDefinition {
        ToolDefinition {
            name: Self::NAME.to_string(),
            description: "Retrieve all investment pies with their cash, invested value and overall result.".to_string(),
            parameters: serde_json::json!({
                "type": "object",
                "properties": {},
                "required": []
            }),
        }
    }

    async fn call(&self, _args: Self::Args) -> Result<Self::Output, Self::Error> {
        let pies = self.env.broker_client().fetch_pies().await?;
        Ok(PiesOutput {
            count: pies.len(),
            pies,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::test_env::{MockBrokerClient, MockEnvironment};
    use rust_decimal_macros::dec;

    #[tokio::test]
    async fn test_lists_pies() {
        let mut client = MockBrokerClient::new();
        client.pies = vec![PieSummary {
            id: 7,
            status: Some("AHEAD".to_string()),
            cash: Some(dec!(12.5)),
            invested: Some(dec!(500)),
            value: Some(dec!(540)),
            result: Some(dec!(40)),
        }];
        let env = Arc::new(MockEnvironment::with_client(client));
        let tool = FetchPiesTool::new(env);

        let output = tool.call(NoArgs::default()).await.unwrap();
        assert_eq!(output.count, 1);
        assert_eq!(output.pies[0].id, 7);
    }
}

//! Market-data passthrough tools: instrument and exchange search.

use rig::{completion::ToolDefinition, tool::Tool};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use agentfolio_core::{Exchange, Instrument};

use crate::env::AgentEnvironment;
use crate::error::AgentError;
use crate::tools::constants::SEARCH_RESULT_LIMIT;

/// Arguments shared by the search tools.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchArgs {
    /// Case-insensitive text filter. Omit to list everything.
    pub search_term: Option<String>,
}

/// Output for the instrument search.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InstrumentSearchOutput {
    pub instruments: Vec<Instrument>,
    /// Matches found before truncation
    pub total_matches: usize,
    pub truncated: bool,
}

/// Tool searching the tradeable instrument catalogue.
pub struct SearchInstrumentTool<E: AgentEnvironment> {
    env: Arc<E>,
}

impl<E: AgentEnvironment> SearchInstrumentTool<E> {
    pub fn new(env: Arc<E>) -> Self {
        Self { env }
    }
}

impl<E: AgentEnvironment> Clone for SearchInstrumentTool<E> {
    fn clone(&self) -> Self {
        Self {
            env: self.env.clone(),
        }
    }
}

impl<E: AgentEnvironment + 'static> Tool for SearchInstrumentTool<E> {
    const NAME: &'static str = "search_instrument";

    type Error = AgentError;
    type Args = SearchArgs;
    type Output = InstrumentSearchOutput;

    async fn definition(&self, _prompt: String) -> ToolDefinition {
        ToolDefinition {
            name: Self::NAME.to_string(),
            description: "Look up tradeable instruments, with optional case-insensitive filtering by ticker or name. The catalogue is large; results are truncated to a manageable page.".to_string(),
            parameters: serde_json::json!({
                "type": "object",
                "properties": {
                    "searchTerm": {
                        "type": "string",
                        "description": "Text to match against ticker symbols and instrument names. Omit to list the full catalogue (truncated)."
                    }
                },
                "required": []
            }),
        }
    }

    async fn call(&self, args: Self::Args) -> Result<Self::Output, Self::Error> {
        let instruments = self.env.broker_client().fetch_instruments().await?;

        let matches: Vec<Instrument> = match &args.search_term {
            Some(term) if !term.trim().is_empty() => {
                let needle = term.trim().to_lowercase();
                instruments
                    .into_iter()
                    .filter(|instrument| {
                        instrument.ticker.to_lowercase().contains(&needle)
                            || instrument.name.to_lowercase().contains(&needle)
                    })
                    .collect()
            }
            _ => instruments,
        };

        let total_matches = matches.len();
        let truncated = total_matches > SEARCH_RESULT_LIMIT;
        Ok(InstrumentSearchOutput {
            instruments: matches.into_iter().take(SEARCH_RESULT_LIMIT).collect(),
            total_matches,
            truncated,
        })
    }
}

/// Output for the exchange search.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExchangeSearchOutput {
    pub exchanges: Vec<Exchange>,
    pub count: usize,
}

/// Tool searching exchanges by name or numeric id.
pub struct SearchExchangeTool<E: AgentEnvironment> {
    env: Arc<E>,
}

impl<E: AgentEnvironment> SearchExchangeTool<E> {
    pub fn new(env: Arc<E>) -> Self {
        Self { env }
    }
}

impl<E: AgentEnvironment> Clone for SearchExchangeTool<E> {
    fn clone(&self) -> Self {
        Self {
            env: self.env.clone(),
        }
    }
}

impl<E: AgentEnvironment + 'static> Tool for SearchExchangeTool<E> {
    const NAME: &'static str = "search_exchange";

    type Error = AgentError;
    type Args = SearchArgs;
    type Output = ExchangeSearchOutput;

    async fn definition(&self, _prompt: String) -> ToolDefinition {
        ToolDefinition {
            name: Self::NAME.to_string(),
            description: "Look up exchanges, with optional filtering by name or exact numeric exchange id.".to_string(),
            parameters: serde_json::json!({
                "type": "object",
                "properties": {
                    "searchTerm": {
                        "type": "string",
                        "description": "Case-insensitive text to match against exchange names, or an exact numeric exchange id. Omit to return all exchanges."
                    }
                },
                "required": []
            }),
        }
    }

    async fn call(&self, args: Self::Args) -> Result<Self::Output, Self::Error> {
        let exchanges = self.env.broker_client().fetch_exchanges().await?;

        let matches: Vec<Exchange> = match &args.search_term {
            Some(term) if !term.trim().is_empty() => {
                let trimmed = term.trim();
                let needle = trimmed.to_lowercase();
                exchanges
                    .into_iter()
                    .filter(|exchange| {
                        exchange.name.to_lowercase().contains(&needle)
                            || exchange.id.to_string() == trimmed
                    })
                    .collect()
            }
            _ => exchanges,
        };

        Ok(ExchangeSearchOutput {
            count: matches.len(),
            exchanges: matches,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::test_env::{MockBrokerClient, MockEnvironment};

    fn instrument(ticker: &str, name: &str) -> Instrument {
        Instrument {
            ticker: ticker.to_string(),
            name: name.to_string(),
            instrument_type: Some("STOCK".to_string()),
            currency_code: Some("USD".to_string()),
            isin: None,
        }
    }

    fn mock_with_catalogue() -> MockBrokerClient {
        let mut client = MockBrokerClient::new();
        client.instruments = vec![
            instrument("AAPL_US_EQ", "Apple"),
            instrument("MSFT_US_EQ", "Microsoft"),
            instrument("VODl_EQ", "Vodafone Group"),
        ];
        client.exchanges = vec![
            Exchange {
                id: 1,
                name: "NASDAQ".to_string(),
            },
            Exchange {
                id: 2,
                name: "London Stock Exchange".to_string(),
            },
        ];
        client
    }

    #[tokio::test]
    async fn test_instrument_search_matches_ticker_and_name() {
        let env = Arc::new(MockEnvironment::with_client(mock_with_catalogue()));
        let tool = SearchInstrumentTool::new(env);

        let by_name = tool
            .call(SearchArgs {
                search_term: Some("apple".to_string()),
            })
            .await
            .unwrap();
        assert_eq!(by_name.total_matches, 1);
        assert_eq!(by_name.instruments[0].ticker, "AAPL_US_EQ");

        let by_ticker = tool
            .call(SearchArgs {
                search_term: Some("vod".to_string()),
            })
            .await
            .unwrap();
        assert_eq!(by_ticker.total_matches, 1);
        assert_eq!(by_ticker.instruments[0].name, "Vodafone Group");
    }

    #[tokio::test]
    async fn test_instrument_search_without_term_lists_catalogue() {
        let env = Arc::new(MockEnvironment::with_client(mock_with_catalogue()));
        let tool = SearchInstrumentTool::new(env);

        let output = tool.call(SearchArgs::default()).await.unwrap();
        assert_eq!(output.total_matches, 3);
        assert!(!output.truncated);
    }

    #[tokio::test]
    async fn test_large_result_sets_are_truncated() {
        let mut client = MockBrokerClient::new();
        client.instruments = (0..80)
            .map(|i| instrument(&format!("T{}_US_EQ", i), "Ticker"))
            .collect();
        let env = Arc::new(MockEnvironment::with_client(client));
        let tool = SearchInstrumentTool::new(env);

        let output = tool.call(SearchArgs::default()).await.unwrap();
        assert_eq!(output.total_matches, 80);
        assert_eq!(output.instruments.len(), SEARCH_RESULT_LIMIT);
        assert!(output.truncated);
    }

    #[tokio::test]
    async fn test_exchange_search_by_name_or_id() {
        let env = Arc::new(MockEnvironment::with_client(mock_with_catalogue()));
        let tool = SearchExchangeTool::new(env);

        let by_name = tool
            .call(SearchArgs {
                search_term: Some("london".to_string()),
            })
            .await
            .unwrap();
        assert_eq!(by_name.count, 1);
        assert_eq!(by_name.exchanges[0].id, 2);

        let by_id = tool
            .call(SearchArgs {
                search_term: Some("1".to_string()),
            })
            .await
            .unwrap();
        assert_eq!(by_id.count, 1);
        assert_eq!(by_id.exchanges[0].name, "NASDAQ");
    }
}

//! Environment abstraction for the account tools.
//!
//! The `AgentEnvironment` trait abstracts what the tools need at runtime:
//! the brokerage client and a few analytics bounds. Agent hosts implement
//! it with the live `Trading212Client`; tests swap in the mock client
//! below.

use std::sync::Arc;

use agentfolio_broker::config::DEFAULT_MAX_HISTORY_PAGES;
use agentfolio_broker::BrokerDataClient;

/// Runtime environment for the account tools.
pub trait AgentEnvironment: Send + Sync {
    /// The brokerage API client used for every fetch.
    fn broker_client(&self) -> Arc<dyn BrokerDataClient>;

    /// Upper bound on pages drained from paginated history endpoints.
    fn history_page_limit(&self) -> usize {
        DEFAULT_MAX_HISTORY_PAGES
    }
}

#[cfg(test)]
pub mod test_env {
    use super::*;
    use agentfolio_core::{
        AccountInfo, CashBalance, Dividend, DividendPage, Error, Exchange, Instrument, Order,
        PieSummary, Position, Result, Transaction, UpstreamError,
    };
    use agentfolio_broker::HistoryQuery;
    use async_trait::async_trait;

    /// Scriptable in-memory stand-in for the live client.
    #[derive(Default)]
    pub struct MockBrokerClient {
        pub account: Option<AccountInfo>,
        pub cash: CashBalance,
        pub positions: Vec<Position>,
        pub open_orders: Vec<Order>,
        pub order_history: Vec<Order>,
        pub dividends: Vec<Dividend>,
        pub transactions: Vec<Transaction>,
        pub instruments: Vec<Instrument>,
        pub exchanges: Vec<Exchange>,
        pub pies: Vec<PieSummary>,
        /// When set, every fetch fails with this upstream error.
        pub upstream_failure: Option<UpstreamError>,
    }

    impl MockBrokerClient {
        pub fn new() -> Self {
            Self {
                account: Some(AccountInfo {
                    id: 1,
                    currency_code: "EUR".to_string(),
                }),
                ..Self::default()
            }
        }

        fn check_failure(&self) -> Result<()> {
            match &self.upstream_failure {
                Some(error) => Err(Error::Upstream(error.clone())),
                None => Ok(()),
            }
        }

        fn account(&self) -> Result<AccountInfo> {
            self.account
                .clone()
                .ok_or_else(|| Error::malformed("account: missing id"))
        }
    }

    #[async_trait]
    impl BrokerDataClient for MockBrokerClient {
        async fn fetch_account(&self) -> Result<AccountInfo> {
            self.check_failure()?;
            self.account()
        }

        async fn fetch_cash(&self) -> Result<CashBalance> {
            self.check_failure()?;
            Ok(self.cash.clone())
        }

        async fn fetch_positions(&self) -> Result<Vec<Position>> {
            self.check_failure()?;
            Ok(self.positions.clone())
        }

        async fn fetch_position(&self, ticker: &str) -> Result<Position> {
            self.check_failure()?;
            self.positions
                .iter()
                .find(|p| p.ticker == ticker)
                .cloned()
                .ok_or_else(|| {
                    Error::Upstream(UpstreamError::new(
                        format!("Trading 212 API error 404: no position in {}", ticker),
                        false,
                    ))
                })
        }

        async fn fetch_open_orders(&self) -> Result<Vec<Order>> {
            self.check_failure()?;
            Ok(self.open_orders.clone())
        }

        async fn fetch_order_history(&self, query: &HistoryQuery) -> Result<Vec<Order>> {
            self.check_failure()?;
            Ok(self
                .order_history
                .iter()
                .take(query.clamped_limit())
                .cloned()
                .collect())
        }

        async fn fetch_dividends(&self, query: &HistoryQuery) -> Result<DividendPage> {
            self.check_failure()?;
            // The cursor plays the role of an offset so multi-page drains
            // are exercised for real.
            let start = usize::try_from(query.cursor.unwrap_or(0)).unwrap_or(0);
            let start = start.min(self.dividends.len());
            let end = (start + query.clamped_limit()).min(self.dividends.len());
            let next_cursor = if end < self.dividends.len() {
                Some(end as i64)
            } else {
                None
            };
            Ok(DividendPage {
                items: self.dividends[start..end].to_vec(),
                next_cursor,
            })
        }

        async fn fetch_transactions(&self, query: &HistoryQuery) -> Result<Vec<Transaction>> {
            self.check_failure()?;
            Ok(self
                .transactions
                .iter()
                .take(query.clamped_limit())
                .cloned()
                .collect())
        }

        async fn fetch_instruments(&self) -> Result<Vec<Instrument>> {
            self.check_failure()?;
            Ok(self.instruments.clone())
        }

        async fn fetch_exchanges(&self) -> Result<Vec<Exchange>> {
            self.check_failure()?;
            Ok(self.exchanges.clone())
        }

        async fn fetch_pies(&self) -> Result<Vec<PieSummary>> {
            self.check_failure()?;
            Ok(self.pies.clone())
        }
    }

    /// Mock environment for tool tests.
    pub struct MockEnvironment {
        pub client: Arc<MockBrokerClient>,
        pub page_limit: usize,
    }

    impl MockEnvironment {
        pub fn new() -> Self {
            Self::with_client(MockBrokerClient::new())
        }

        pub fn with_client(client: MockBrokerClient) -> Self {
            Self {
                client: Arc::new(client),
                page_limit: DEFAULT_MAX_HISTORY_PAGES,
            }
        }
    }

    impl Default for MockEnvironment {
        fn default() -> Self {
            Self::new()
        }
    }

    impl AgentEnvironment for MockEnvironment {
        fn broker_client(&self) -> Arc<dyn BrokerDataClient> {
            self.client.clone()
        }

        fn history_page_limit(&self) -> usize {
            self.page_limit
        }
    }
}

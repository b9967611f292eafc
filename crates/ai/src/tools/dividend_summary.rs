//! Dividend summary tool - income history grouped by ticker and month.

use rig::{completion::ToolDefinition, tool::Tool};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::try_join;

use agentfolio_core::constants::DISPLAY_DECIMAL_PRECISION;
use agentfolio_core::IncomeService;

use crate::env::AgentEnvironment;
use crate::error::AgentError;

/// Arguments for the fetch_dividend_summary tool.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DividendSummaryArgs {}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TickerIncomeDto {
    pub ticker: String,
    pub total: Decimal,
    pub count: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthIncomeDto {
    /// `YYYY-MM`
    pub month: String,
    pub total: Decimal,
    pub count: usize,
}

/// Output envelope for the dividend summary tool.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DividendSummaryOutput {
    pub currency: String,
    pub total_dividends: Decimal,
    pub dividend_count: usize,
    pub average_monthly: Decimal,
    /// Highest-earning tickers first
    pub by_ticker: Vec<TickerIncomeDto>,
    /// Chronological
    pub by_month: Vec<MonthIncomeDto>,
}

/// Tool analysing dividend income history.
pub struct FetchDividendSummaryTool<E: AgentEnvironment> {
    env: Arc<E>,
}

impl<E: AgentEnvironment> FetchDividendSummaryTool<E> {
    pub fn new(env: Arc<E>) -> Self {
        Self { env }
    }
}

impl<E: AgentEnvironment> Clone for FetchDividendSummaryTool<E> {
    fn clone(&self) -> Self {
        Self {
            env: self.env.clone(),
        }
    }
}

impl<E: AgentEnvironment + 'static> Tool for FetchDividendSummaryTool<E> {
    const NAME: &'static str = "fetch_dividend_summary";

    type Error = AgentError;
    type Args = DividendSummaryArgs;
    type Output = DividendSummaryOutput;

    async fn definition(&self, _prompt: String) -> ToolDefinition {
        ToolDefinition {
            name: Self::NAME.to_string(),
            description: "Analyse dividend income history: collects the paid-out dividend records and breaks them down by ticker and by calendar month, with totals and a monthly average.".to_string(),
            parameters: serde_json::json!({
                "type": "object",
                "properties": {},
                "required": []
            }),
        }
    }

    async fn call(&self, _args: Self::Args) -> Result<Self::Output, Self::Error> {
        let client = self.env.broker_client();
        let (account, dividends) = try_join!(
            client.fetch_account(),
            client.fetch_all_dividends(self.env.history_page_limit())
        )?;

        let summary = IncomeService::new().summarize(&dividends);

        Ok(DividendSummaryOutput {
            currency: account.currency_code,
            total_dividends: summary.total.round_dp(DISPLAY_DECIMAL_PRECISION),
            dividend_count: summary.count,
            average_monthly: summary.monthly_average.round_dp(DISPLAY_DECIMAL_PRECISION),
            by_ticker: summary
                .by_ticker
                .iter()
                .map(|income| TickerIncomeDto {
                    ticker: income.ticker.clone(),
                    total: income.total.round_dp(DISPLAY_DECIMAL_PRECISION),
                    count: income.count,
                })
                .collect(),
            by_month: summary
                .by_month
                .iter()
                .map(|income| MonthIncomeDto {
                    month: income.month.clone(),
                    total: income.total.round_dp(DISPLAY_DECIMAL_PRECISION),
                    count: income.count,
                })
                .collect(),
        })
    }
}

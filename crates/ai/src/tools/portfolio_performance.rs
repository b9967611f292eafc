//! Portfolio performance tool - per-position total returns with dividends.

use chrono::{DateTime, Utc};
use rig::{completion::ToolDefinition, tool::Tool};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::try_join;

use agentfolio_core::constants::DISPLAY_DECIMAL_PRECISION;
use agentfolio_core::{
    Error as CoreError, IncomeService, Order, OrderSide, OrderStatus, PerformanceService,
    PositionPerformance, ValuationService,
};
use agentfolio_broker::HistoryQuery;
use log::debug;

use crate::env::AgentEnvironment;
use crate::error::AgentError;
use crate::tools::constants::{
    FRACTION_DECIMAL_PRECISION, HISTORY_FETCH_LIMIT, RECENT_FILLED_ORDERS_LIMIT,
};

/// Arguments for the fetch_portfolio_performance tool.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioPerformanceArgs {}

/// Per-position performance figures.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PositionPerformanceDto {
    pub ticker: String,
    pub quantity: Decimal,
    pub invested: Decimal,
    pub current_value: Decimal,
    /// Unrealized gain from price movement alone
    pub price_gain: Decimal,
    pub dividends: Decimal,
    pub total_return: Decimal,
    /// Total return as a fraction of invested capital
    pub total_return_pct: Decimal,
    pub held_since: Option<DateTime<Utc>>,
}

impl PositionPerformanceDto {
    fn from_performance(performance: &PositionPerformance) -> Self {
        Self {
            ticker: performance.ticker.clone(),
            quantity: performance.quantity,
            invested: performance.cost_basis.round_dp(DISPLAY_DECIMAL_PRECISION),
            current_value: performance.market_value.round_dp(DISPLAY_DECIMAL_PRECISION),
            price_gain: performance.price_gain.round_dp(DISPLAY_DECIMAL_PRECISION),
            dividends: performance.dividends.round_dp(DISPLAY_DECIMAL_PRECISION),
            total_return: performance.total_return.round_dp(DISPLAY_DECIMAL_PRECISION),
            total_return_pct: performance
                .total_return_pct
                .round_dp(FRACTION_DECIMAL_PRECISION),
            held_since: performance.opened_at,
        }
    }
}

/// A recently filled order attached for context.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilledOrderDto {
    pub ticker: String,
    pub side: OrderSide,
    pub quantity: Option<Decimal>,
    pub fill_price: Option<Decimal>,
    pub executed_at: Option<DateTime<Utc>>,
}

impl FilledOrderDto {
    fn from_order(order: &Order) -> Self {
        Self {
            ticker: order.ticker.clone(),
            side: order.side,
            quantity: order.quantity,
            fill_price: order.fill_price,
            executed_at: order.executed_at,
        }
    }
}

/// Output envelope for the performance tool.
///
/// An account without positions is a valid state: `positions` comes back
/// empty, both performers are absent, and `note` explains why.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioPerformanceOutput {
    pub currency: String,
    pub total_price_gain: Decimal,
    pub total_dividends: Decimal,
    pub total_return: Decimal,
    pub best_performer: Option<PositionPerformanceDto>,
    pub worst_performer: Option<PositionPerformanceDto>,
    /// Ranked by total return fraction, best first
    pub positions: Vec<PositionPerformanceDto>,
    pub recent_filled_orders: Vec<FilledOrderDto>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

/// Tool building a performance report across all positions.
pub struct FetchPortfolioPerformanceTool<E: AgentEnvironment> {
    env: Arc<E>,
}

impl<E: AgentEnvironment> FetchPortfolioPerformanceTool<E> {
    pub fn new(env: Arc<E>) -> Self {
        Self { env }
    }
}

impl<E: AgentEnvironment> Clone for FetchPortfolioPerformanceTool<E> {
    fn clone(&self) -> Self {
        Self {
            env: self.env.clone(),
        }
    }
}

impl<E: AgentEnvironment + 'static> Tool for FetchPortfolioPerformanceTool<E> {
    const NAME: &'static str = "fetch_portfolio_performance";

    type Error = AgentError;
    type Args = PortfolioPerformanceArgs;
    type Output = PortfolioPerformanceOutput;

    async fn definition(&self, _prompt: String) -> ToolDefinition {
        ToolDefinition {
            name: Self::NAME.to_string(),
            description: "Build a performance report across all positions: per-position price gain plus dividend contributions, total return fractions, best and worst performers, and the most recent filled orders.".to_string(),
            parameters: serde_json::json!({
                "type": "object",
                "properties": {},
                "required": []
            }),
        }
    }

    async fn call(&self, _args: Self::Args) -> Result<Self::Output, Self::Error> {
        let client = self.env.broker_client();
        let history = HistoryQuery::with_limit(HISTORY_FETCH_LIMIT);
        let (account, positions, dividends, orders) = try_join!(
            client.fetch_account(),
            client.fetch_positions(),
            client.fetch_all_dividends(self.env.history_page_limit()),
            client.fetch_order_history(&history)
        )?;

        debug!(
            "Building performance report over {} positions and {} dividends",
            positions.len(),
            dividends.len()
        );
        let valuation = ValuationService::new().value_positions(&positions);
        let income = IncomeService::new().summarize(&dividends);

        let recent_filled_orders: Vec<FilledOrderDto> = orders
            .iter()
            .filter(|order| order.status == OrderStatus::Filled)
            .take(RECENT_FILLED_ORDERS_LIMIT)
            .map(FilledOrderDto::from_order)
            .collect();

        match PerformanceService::new().calculate(&valuation, &income.by_ticker) {
            Ok(report) => Ok(PortfolioPerformanceOutput {
                currency: account.currency_code,
                total_price_gain: report.total_price_gain.round_dp(DISPLAY_DECIMAL_PRECISION),
                total_dividends: report.total_dividends.round_dp(DISPLAY_DECIMAL_PRECISION),
                total_return: report.total_return.round_dp(DISPLAY_DECIMAL_PRECISION),
                best_performer: Some(PositionPerformanceDto::from_performance(
                    &report.best_performer,
                )),
                worst_performer: Some(PositionPerformanceDto::from_performance(
                    &report.worst_performer,
                )),
                positions: report
                    .positions
                    .iter()
                    .map(PositionPerformanceDto::from_performance)
                    .collect(),
                recent_filled_orders,
                note: None,
            }),
            // An empty portfolio is reported, not raised.
            Err(CoreError::EmptyPortfolio) => Ok(PortfolioPerformanceOutput {
                currency: account.currency_code,
                total_price_gain: Decimal::ZERO,
                total_dividends: Decimal::ZERO,
                total_return: Decimal::ZERO,
                best_performer: None,
                worst_performer: None,
                positions: Vec::new(),
                recent_filled_orders,
                note: Some(CoreError::EmptyPortfolio.to_string()),
            }),
            Err(error) => Err(error.into()),
        }
    }
}

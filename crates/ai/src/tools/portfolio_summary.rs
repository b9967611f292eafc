//! Portfolio summary tool - one-call account snapshot with valuations.

use rig::{completion::ToolDefinition, tool::Tool};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::try_join;

use agentfolio_core::constants::DISPLAY_DECIMAL_PRECISION;
use agentfolio_core::{PositionValuation, ValuationService};

use crate::env::AgentEnvironment;
use crate::error::AgentError;
use crate::tools::constants::{DEFAULT_TOP_HOLDINGS, FRACTION_DECIMAL_PRECISION};

/// Arguments for the fetch_portfolio_summary tool.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioSummaryArgs {
    /// How many of the largest holdings to surface (default 5).
    pub top_n: Option<usize>,
}

/// One valued holding.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HoldingDto {
    pub ticker: String,
    pub quantity: Decimal,
    pub average_price: Decimal,
    pub current_price: Decimal,
    pub market_value: Decimal,
    pub unrealized_gain: Decimal,
    /// Gain as a fraction of cost basis
    pub unrealized_gain_pct: Decimal,
    /// Share of total portfolio value, as a fraction
    pub weight: Decimal,
}

impl HoldingDto {
    fn from_valuation(valuation: &PositionValuation) -> Self {
        Self {
            ticker: valuation.ticker.clone(),
            quantity: valuation.quantity,
            average_price: valuation.average_price,
            current_price: valuation.current_price,
            market_value: valuation.market_value.round_dp(DISPLAY_DECIMAL_PRECISION),
            unrealized_gain: valuation.unrealized_gain.round_dp(DISPLAY_DECIMAL_PRECISION),
            unrealized_gain_pct: valuation
                .unrealized_gain_pct
                .round_dp(FRACTION_DECIMAL_PRECISION),
            weight: valuation.weight.round_dp(FRACTION_DECIMAL_PRECISION),
        }
    }
}

/// Output envelope for the portfolio summary tool.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioSummaryOutput {
    pub currency: String,
    pub total_value: Decimal,
    pub cash_available: Decimal,
    pub invested: Decimal,
    pub profit_loss: Decimal,
    /// Overall P&L as a fraction of invested capital
    pub profit_loss_pct: Decimal,
    pub position_count: usize,
    /// Every position, largest market value first
    pub positions: Vec<HoldingDto>,
    pub top_holdings: Vec<HoldingDto>,
}

/// Tool producing a full portfolio snapshot in one call.
pub struct FetchPortfolioSummaryTool<E: AgentEnvironment> {
    env: Arc<E>,
}

impl<E: AgentEnvironment> FetchPortfolioSummaryTool<E> {
    pub fn new(env: Arc<E>) -> Self {
        Self { env }
    }
}

impl<E: AgentEnvironment> Clone for FetchPortfolioSummaryTool<E> {
    fn clone(&self) -> Self {
        Self {
            env: self.env.clone(),
        }
    }
}

impl<E: AgentEnvironment + 'static> Tool for FetchPortfolioSummaryTool<E> {
    const NAME: &'static str = "fetch_portfolio_summary";

    type Error = AgentError;
    type Args = PortfolioSummaryArgs;
    type Output = PortfolioSummaryOutput;

    async fn definition(&self, _prompt: String) -> ToolDefinition {
        ToolDefinition {
            name: Self::NAME.to_string(),
            description: "Produce a full portfolio snapshot in one call: total value, cash balance, invested amount, overall profit/loss, and every position valued and ranked by market value with allocation weights.".to_string(),
            parameters: serde_json::json!({
                "type": "object",
                "properties": {
                    "topN": {
                        "type": "integer",
                        "minimum": 1,
                        "description": "How many of the largest holdings to list separately. Defaults to 5."
                    }
                },
                "required": []
            }),
        }
    }

    async fn call(&self, args: Self::Args) -> Result<Self::Output, Self::Error> {
        let client = self.env.broker_client();
        let (account, cash, positions) = try_join!(
            client.fetch_account(),
            client.fetch_cash(),
            client.fetch_positions()
        )?;

        let mut valuation = ValuationService::new().value_positions(&positions);
        // Largest first for display; the valuation itself keeps input order.
        valuation.positions.sort_by(|a, b| {
            b.market_value
                .cmp(&a.market_value)
                .then_with(|| a.ticker.cmp(&b.ticker))
        });

        let holdings: Vec<HoldingDto> = valuation
            .positions
            .iter()
            .map(HoldingDto::from_valuation)
            .collect();
        let top_n = args.top_n.unwrap_or(DEFAULT_TOP_HOLDINGS).max(1);
        let top_holdings: Vec<HoldingDto> = holdings.iter().take(top_n).cloned().collect();

        let profit_loss_pct = if cash.invested.is_zero() {
            Decimal::ZERO
        } else {
            cash.ppl / cash.invested
        };

        Ok(PortfolioSummaryOutput {
            currency: account.currency_code,
            total_value: cash.total.round_dp(DISPLAY_DECIMAL_PRECISION),
            cash_available: cash.free.round_dp(DISPLAY_DECIMAL_PRECISION),
            invested: cash.invested.round_dp(DISPLAY_DECIMAL_PRECISION),
            profit_loss: cash.ppl.round_dp(DISPLAY_DECIMAL_PRECISION),
            profit_loss_pct: profit_loss_pct.round_dp(FRACTION_DECIMAL_PRECISION),
            position_count: positions.len(),
            positions: holdings,
            top_holdings,
        })
    }
}

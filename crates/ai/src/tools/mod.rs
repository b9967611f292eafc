//! Account tools exposed to AI assistants.
//!
//! Composite analytics tools (each one combines several API fetches):
//! - FetchPortfolioSummaryTool: account snapshot with valuations and weights
//! - FetchPortfolioPerformanceTool: per-position total returns, best/worst
//! - FetchDividendSummaryTool: dividend income by ticker and month
//! - FetchRecentActivityTool: merged order/transaction feed
//!
//! Read-only passthrough tools map 1:1 onto API resources: account info,
//! cash, positions, instrument/exchange search, order history, dividends,
//! transactions, pies.
//!
//! All tools resolve their dependencies through the `AgentEnvironment`
//! trait.

pub mod account;
pub mod constants;
pub mod dividend_summary;
pub mod history;
pub mod market;
pub mod pies;
pub mod portfolio_performance;
pub mod portfolio_summary;
pub mod recent_activity;

// Re-export constants
pub use constants::*;

// Re-export tools
pub use account::{
    FetchAccountCashTool, FetchAccountInfoTool, FetchOpenPositionsTool, FetchPositionByTickerTool,
};
pub use dividend_summary::FetchDividendSummaryTool;
pub use history::{
    FetchDividendHistoryTool, FetchOpenOrdersTool, FetchOrderHistoryTool, FetchTransactionsTool,
};
pub use market::{SearchExchangeTool, SearchInstrumentTool};
pub use pies::FetchPiesTool;
pub use portfolio_performance::FetchPortfolioPerformanceTool;
pub use portfolio_summary::FetchPortfolioSummaryTool;
pub use recent_activity::FetchRecentActivityTool;

use std::sync::Arc;

use crate::env::AgentEnvironment;

/// Container for every account tool, simplifying registration on the host.
pub struct ToolSet<E: AgentEnvironment> {
    pub portfolio_summary: FetchPortfolioSummaryTool<E>,
    pub portfolio_performance: FetchPortfolioPerformanceTool<E>,
    pub dividend_summary: FetchDividendSummaryTool<E>,
    pub recent_activity: FetchRecentActivityTool<E>,
    pub account_info: FetchAccountInfoTool<E>,
    pub account_cash: FetchAccountCashTool<E>,
    pub open_positions: FetchOpenPositionsTool<E>,
    pub position_by_ticker: FetchPositionByTickerTool<E>,
    pub instrument_search: SearchInstrumentTool<E>,
    pub exchange_search: SearchExchangeTool<E>,
    pub open_orders: FetchOpenOrdersTool<E>,
    pub order_history: FetchOrderHistoryTool<E>,
    pub dividend_history: FetchDividendHistoryTool<E>,
    pub transactions: FetchTransactionsTool<E>,
    pub pies: FetchPiesTool<E>,
}

impl<E: AgentEnvironment> ToolSet<E> {
    /// Create a new tool set with every account tool.
    pub fn new(env: Arc<E>) -> Self {
        Self {
            portfolio_summary: FetchPortfolioSummaryTool::new(env.clone()),
            portfolio_performance: FetchPortfolioPerformanceTool::new(env.clone()),
            dividend_summary: FetchDividendSummaryTool::new(env.clone()),
            recent_activity: FetchRecentActivityTool::new(env.clone()),
            account_info: FetchAccountInfoTool::new(env.clone()),
            account_cash: FetchAccountCashTool::new(env.clone()),
            open_positions: FetchOpenPositionsTool::new(env.clone()),
            position_by_ticker: FetchPositionByTickerTool::new(env.clone()),
            instrument_search: SearchInstrumentTool::new(env.clone()),
            exchange_search: SearchExchangeTool::new(env.clone()),
            open_orders: FetchOpenOrdersTool::new(env.clone()),
            order_history: FetchOrderHistoryTool::new(env.clone()),
            dividend_history: FetchDividendHistoryTool::new(env.clone()),
            transactions: FetchTransactionsTool::new(env.clone()),
            pies: FetchPiesTool::new(env),
        }
    }
}

use std::collections::HashMap;

use num_traits::Zero;
use rust_decimal::Decimal;

use crate::errors::{Error, Result};
use crate::portfolio::income::SymbolIncome;
use crate::portfolio::performance::{PerformanceReport, PositionPerformance};
use crate::portfolio::valuation::PortfolioValuation;

/// Stateless calculator combining valuations with dividend income.
#[derive(Debug, Default, Clone)]
pub struct PerformanceService;

impl PerformanceService {
    pub fn new() -> Self {
        Self
    }

    /// Builds the per-position performance ranking.
    ///
    /// Tickers absent from the income groups simply earned no dividends.
    /// Report totals are sums over the held positions. Fails with
    /// `EmptyPortfolio` when the snapshot holds nothing; callers turn that
    /// into an empty-state message rather than an error page.
    pub fn calculate(
        &self,
        valuation: &PortfolioValuation,
        income_by_ticker: &[SymbolIncome],
    ) -> Result<PerformanceReport> {
        if valuation.positions.is_empty() {
            return Err(Error::EmptyPortfolio);
        }

        let dividends_by_ticker: HashMap<&str, Decimal> = income_by_ticker
            .iter()
            .map(|income| (income.ticker.as_str(), income.total))
            .collect();

        let mut positions: Vec<PositionPerformance> = valuation
            .positions
            .iter()
            .map(|position| {
                let dividends = dividends_by_ticker
                    .get(position.ticker.as_str())
                    .copied()
                    .unwrap_or_else(Decimal::zero);
                let total_return = position.unrealized_gain + dividends;
                let total_return_pct = if position.cost_basis.is_zero() {
                    Decimal::ZERO
                } else {
                    total_return / position.cost_basis
                };

                PositionPerformance {
                    ticker: position.ticker.clone(),
                    quantity: position.quantity,
                    cost_basis: position.cost_basis,
                    market_value: position.market_value,
                    price_gain: position.unrealized_gain,
                    dividends,
                    total_return,
                    total_return_pct,
                    opened_at: position.opened_at,
                }
            })
            .collect();

        positions.sort_by(|a, b| {
            b.total_return_pct
                .cmp(&a.total_return_pct)
                .then_with(|| a.ticker.cmp(&b.ticker))
        });

        let total_price_gain: Decimal = positions.iter().map(|p| p.price_gain).sum();
        let total_dividends: Decimal = positions.iter().map(|p| p.dividends).sum();
        let total_return: Decimal = positions.iter().map(|p| p.total_return).sum();

        let best_performer = positions.first().cloned().ok_or(Error::EmptyPortfolio)?;
        let worst_performer = positions.last().cloned().ok_or(Error::EmptyPortfolio)?;

        Ok(PerformanceReport {
            positions,
            best_performer,
            worst_performer,
            total_price_gain,
            total_dividends,
            total_return,
        })
    }
}

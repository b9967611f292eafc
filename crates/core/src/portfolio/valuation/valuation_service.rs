use log::debug;
use num_traits::Zero;
use rust_decimal::Decimal;

use crate::portfolio::valuation::{PortfolioValuation, PositionValuation};
use crate::records::Position;

/// Stateless calculator for position valuations.
#[derive(Debug, Default, Clone)]
pub struct ValuationService;

impl ValuationService {
    pub fn new() -> Self {
        Self
    }

    /// Values a snapshot of positions.
    ///
    /// Positions keep their input order. An empty snapshot yields a
    /// zero-valued summary, not an error.
    pub fn value_positions(&self, positions: &[Position]) -> PortfolioValuation {
        if positions.is_empty() {
            return PortfolioValuation::default();
        }
        debug!("Valuing {} positions", positions.len());

        let mut valued: Vec<PositionValuation> = positions
            .iter()
            .map(|pos| {
                let market_value = pos.quantity * pos.current_price;
                let cost_basis = pos.quantity * pos.average_price;
                let unrealized_gain = market_value - cost_basis;
                let unrealized_gain_pct = if cost_basis.is_zero() {
                    Decimal::ZERO
                } else {
                    unrealized_gain / cost_basis
                };

                PositionValuation {
                    ticker: pos.ticker.clone(),
                    quantity: pos.quantity,
                    average_price: pos.average_price,
                    current_price: pos.current_price,
                    currency: pos.currency.clone(),
                    market_value,
                    cost_basis,
                    unrealized_gain,
                    unrealized_gain_pct,
                    weight: Decimal::ZERO,
                    opened_at: pos.opened_at,
                }
            })
            .collect();

        let total_value: Decimal = valued.iter().map(|v| v.market_value).sum();
        let total_cost_basis: Decimal = valued.iter().map(|v| v.cost_basis).sum();
        let total_gain: Decimal = valued.iter().map(|v| v.unrealized_gain).sum();

        if !total_value.is_zero() {
            for position in valued.iter_mut() {
                position.weight = position.market_value / total_value;
            }
        }

        PortfolioValuation {
            positions: valued,
            total_value,
            total_cost_basis,
            total_gain,
        }
    }
}

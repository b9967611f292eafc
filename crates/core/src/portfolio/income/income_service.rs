use std::collections::BTreeMap;

use log::debug;
use num_traits::Zero;
use rust_decimal::Decimal;

use crate::constants::MONTH_KEY_FORMAT;
use crate::portfolio::income::{DividendSummary, MonthlyIncome, SymbolIncome};
use crate::records::Dividend;

/// Stateless aggregator for dividend history.
#[derive(Debug, Default, Clone)]
pub struct IncomeService;

impl IncomeService {
    pub fn new() -> Self {
        Self
    }

    /// Aggregates dividends by ticker and by calendar month.
    ///
    /// Input order is irrelevant; accumulation goes through `BTreeMap` so
    /// both groupings come out in a deterministic order regardless of how
    /// the upstream pages interleaved.
    pub fn summarize(&self, dividends: &[Dividend]) -> DividendSummary {
        let mut ticker_totals: BTreeMap<String, (Decimal, usize)> = BTreeMap::new();
        let mut month_totals: BTreeMap<String, (Decimal, usize)> = BTreeMap::new();
        let mut total = Decimal::ZERO;

        for dividend in dividends {
            let ticker_entry = ticker_totals
                .entry(dividend.ticker.clone())
                .or_insert((Decimal::ZERO, 0));
            ticker_entry.0 += dividend.amount;
            ticker_entry.1 += 1;

            let month_key = dividend.paid_on.format(MONTH_KEY_FORMAT).to_string();
            let month_entry = month_totals.entry(month_key).or_insert((Decimal::ZERO, 0));
            month_entry.0 += dividend.amount;
            month_entry.1 += 1;

            total += dividend.amount;
        }

        let mut by_ticker: Vec<SymbolIncome> = ticker_totals
            .into_iter()
            .map(|(ticker, (amount, count))| SymbolIncome {
                ticker,
                total: amount,
                count,
            })
            .collect();
        // Highest earners first; the map already yields ticker-ascending
        // order, which the stable sort keeps for equal totals.
        by_ticker.sort_by(|a, b| b.total.cmp(&a.total));

        let by_month: Vec<MonthlyIncome> = month_totals
            .into_iter()
            .map(|(month, (amount, count))| MonthlyIncome {
                month,
                total: amount,
                count,
            })
            .collect();

        let monthly_average = if by_month.is_empty() {
            Decimal::ZERO
        } else {
            total / Decimal::from(by_month.len() as u64)
        };

        debug!(
            "Aggregated {} dividends across {} tickers and {} months",
            dividends.len(),
            by_ticker.len(),
            by_month.len()
        );

        DividendSummary {
            total,
            count: dividends.len(),
            monthly_average,
            by_ticker,
            by_month,
        }
    }
}

impl DividendSummary {
    /// Total credited to one ticker, zero when the ticker never paid out.
    pub fn total_for_ticker(&self, ticker: &str) -> Decimal {
        self.by_ticker
            .iter()
            .find(|s| s.ticker == ticker)
            .map(|s| s.total)
            .unwrap_or_else(Decimal::zero)
    }
}

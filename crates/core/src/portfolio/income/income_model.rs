use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Dividend income credited by one instrument.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SymbolIncome {
    pub ticker: String,
    pub total: Decimal,
    pub count: usize,
}

/// Dividend income received in one calendar month.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyIncome {
    /// Month bucket key, `YYYY-MM`
    pub month: String,
    pub total: Decimal,
    pub count: usize,
}

/// Aggregated dividend history.
///
/// Each dividend contributes to exactly one ticker bucket and exactly one
/// month bucket. `by_ticker` is sorted by total descending (ties broken by
/// ticker), `by_month` chronologically; both orderings are deterministic.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DividendSummary {
    pub total: Decimal,
    pub count: usize,
    /// Total divided by the number of distinct months with income
    pub monthly_average: Decimal,
    pub by_ticker: Vec<SymbolIncome>,
    pub by_month: Vec<MonthlyIncome>,
}

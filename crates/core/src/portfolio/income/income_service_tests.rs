#[cfg(test)]
mod tests {
    use crate::portfolio::income::IncomeService;
    use crate::records::Dividend;
    use chrono::{DateTime, Utc};
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    fn dividend(ticker: &str, amount: Decimal, paid_on: &str) -> Dividend {
        Dividend {
            ticker: ticker.to_string(),
            amount,
            paid_on: paid_on.parse::<DateTime<Utc>>().unwrap(),
            dividend_type: None,
        }
    }

    #[test]
    fn test_groups_by_ticker_and_month() {
        let service = IncomeService::new();
        let dividends = vec![
            dividend("AAPL", dec!(5), "2024-01-10T00:00:00Z"),
            dividend("AAPL", dec!(5), "2024-02-10T00:00:00Z"),
            dividend("MSFT", dec!(3), "2024-01-15T00:00:00Z"),
        ];

        let summary = service.summarize(&dividends);

        assert_eq!(summary.total, dec!(13));
        assert_eq!(summary.count, 3);

        assert_eq!(summary.by_ticker.len(), 2);
        assert_eq!(summary.by_ticker[0].ticker, "AAPL");
        assert_eq!(summary.by_ticker[0].total, dec!(10));
        assert_eq!(summary.by_ticker[0].count, 2);
        assert_eq!(summary.by_ticker[1].ticker, "MSFT");
        assert_eq!(summary.by_ticker[1].total, dec!(3));

        assert_eq!(summary.by_month.len(), 2);
        assert_eq!(summary.by_month[0].month, "2024-01");
        assert_eq!(summary.by_month[0].total, dec!(8));
        assert_eq!(summary.by_month[1].month, "2024-02");
        assert_eq!(summary.by_month[1].total, dec!(5));
    }

    #[test]
    fn test_grouping_totals_agree_across_axes() {
        let service = IncomeService::new();
        let dividends = vec![
            dividend("VOD", dec!(1.23), "2023-11-02T09:00:00Z"),
            dividend("AAPL", dec!(4.56), "2023-11-20T09:00:00Z"),
            dividend("VOD", dec!(2.21), "2023-12-01T09:00:00Z"),
            dividend("KO", dec!(0.2), "2024-01-05T09:00:00Z"),
        ];

        let summary = service.summarize(&dividends);
        let ticker_sum: Decimal = summary.by_ticker.iter().map(|s| s.total).sum();
        let month_sum: Decimal = summary.by_month.iter().map(|m| m.total).sum();

        assert_eq!(ticker_sum, summary.total);
        assert_eq!(month_sum, summary.total);
        assert_eq!(summary.total, dec!(8.20));
    }

    #[test]
    fn test_ordering_is_input_order_independent() {
        let service = IncomeService::new();
        let mut dividends = vec![
            dividend("B", dec!(2), "2024-03-01T00:00:00Z"),
            dividend("A", dec!(5), "2024-01-01T00:00:00Z"),
            dividend("C", dec!(2), "2024-02-01T00:00:00Z"),
        ];

        let forward = service.summarize(&dividends);
        dividends.reverse();
        let reversed = service.summarize(&dividends);

        let tickers = |s: &crate::portfolio::income::DividendSummary| {
            s.by_ticker
                .iter()
                .map(|t| t.ticker.clone())
                .collect::<Vec<_>>()
        };
        // A leads on total; B and C tie and fall back to ticker order.
        assert_eq!(tickers(&forward), vec!["A", "B", "C"]);
        assert_eq!(tickers(&forward), tickers(&reversed));

        let months = |s: &crate::portfolio::income::DividendSummary| {
            s.by_month.iter().map(|m| m.month.clone()).collect::<Vec<_>>()
        };
        assert_eq!(months(&forward), vec!["2024-01", "2024-02", "2024-03"]);
        assert_eq!(months(&forward), months(&reversed));
    }

    #[test]
    fn test_monthly_average_spans_distinct_months() {
        let service = IncomeService::new();
        let dividends = vec![
            dividend("AAPL", dec!(6), "2024-01-10T00:00:00Z"),
            dividend("AAPL", dec!(6), "2024-03-10T00:00:00Z"),
        ];

        let summary = service.summarize(&dividends);
        assert_eq!(summary.monthly_average, dec!(6));
    }

    #[test]
    fn test_empty_history() {
        let service = IncomeService::new();
        let summary = service.summarize(&[]);

        assert_eq!(summary.total, Decimal::ZERO);
        assert_eq!(summary.count, 0);
        assert_eq!(summary.monthly_average, Decimal::ZERO);
        assert!(summary.by_ticker.is_empty());
        assert!(summary.by_month.is_empty());
    }

    #[test]
    fn test_total_for_ticker_lookup() {
        let service = IncomeService::new();
        let dividends = vec![dividend("AAPL", dec!(5), "2024-01-10T00:00:00Z")];

        let summary = service.summarize(&dividends);
        assert_eq!(summary.total_for_ticker("AAPL"), dec!(5));
        assert_eq!(summary.total_for_ticker("MSFT"), Decimal::ZERO);
    }
}

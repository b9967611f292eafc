//! Context prompt for portfolio analysis sessions.

/// Renders the system prompt an agent host installs before exposing the
/// account tools. `currency` is the account's base currency code; pass
/// "unknown" when the account fetch failed.
pub fn analysis_prompt(currency: &str) -> String {
    format!(
        "You have access to a Trading 212 investment account denominated in {currency}.\n\
         \n\
         There are four analytics tools at your disposal, each serving a distinct purpose:\n\
         \n\
         1. fetch_portfolio_summary\n\
         \x20  Returns a full account snapshot including total value, cash balance,\n\
         \x20  invested amount, overall profit/loss, and a breakdown of every position\n\
         \x20  sorted by current value. Start here to get the big picture.\n\
         \n\
         2. fetch_portfolio_performance\n\
         \x20  Provides a per-position performance report with individual P&L figures,\n\
         \x20  dividend contributions, and the most recent filled orders. Use this when\n\
         \x20  the user wants to know which holdings are winning or losing.\n\
         \n\
         3. fetch_dividend_summary\n\
         \x20  Aggregates all historical dividend payments grouped by ticker and by\n\
         \x20  calendar month. Ideal for answering questions about passive income,\n\
         \x20  yield patterns, or dividend growth over time.\n\
         \n\
         4. fetch_recent_activity\n\
         \x20  Merges order history and deposit/withdrawal transactions into a single\n\
         \x20  chronological feed. Helpful for reviewing what happened recently without\n\
         \x20  checking orders and transactions separately.\n\
         \n\
         Recommended workflow:\n\
         - For broad questions (\"how is my portfolio doing?\"), call one of the\n\
         \x20 composite tools above first. They combine multiple API calls internally,\n\
         \x20 so a single invocation is usually enough.\n\
         - Only fall back to individual endpoints (fetch_all_open_positions,\n\
         \x20 fetch_historical_order_data, etc.) when you need data that the composite\n\
         \x20 tools do not cover, such as pending limit orders or specific order IDs.\n\
         \n\
         Currency note: some instruments on the London Stock Exchange are quoted in\n\
         GBX (pence sterling). 1 GBP = 100 GBX. Always convert GBX values to GBP\n\
         before presenting them to the user so the numbers stay consistent."
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_mentions_currency_and_tools() {
        let prompt = analysis_prompt("EUR");
        assert!(prompt.contains("denominated in EUR"));
        for tool in [
            "fetch_portfolio_summary",
            "fetch_portfolio_performance",
            "fetch_dividend_summary",
            "fetch_recent_activity",
        ] {
            assert!(prompt.contains(tool), "missing {}", tool);
        }
    }
}

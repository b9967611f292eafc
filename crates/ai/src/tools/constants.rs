/// Number of top holdings returned by the portfolio summary.
pub const DEFAULT_TOP_HOLDINGS: usize = 5;

/// Default number of entries in the recent activity feed.
pub const DEFAULT_ACTIVITY_LIMIT: usize = 20;

/// Hard cap on the activity feed length.
pub const MAX_ACTIVITY_LIMIT: usize = 50;

/// Recent filled orders attached to the performance report.
pub const RECENT_FILLED_ORDERS_LIMIT: usize = 20;

/// Page size used when the composite tools pull history.
pub const HISTORY_FETCH_LIMIT: usize = 50;

/// Cap on instrument search results.
pub const SEARCH_RESULT_LIMIT: usize = 50;

/// Decimal places kept on fractional figures (weights, return fractions).
pub const FRACTION_DECIMAL_PRECISION: u32 = 4;

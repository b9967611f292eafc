/// Decimal precision for internal calculations
pub const DECIMAL_PRECISION: u32 = 6;

/// Decimal precision for display
pub const DISPLAY_DECIMAL_PRECISION: u32 = 2;

/// Month bucket key format for income groupings
pub const MONTH_KEY_FORMAT: &str = "%Y-%m";

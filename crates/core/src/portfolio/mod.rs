//! Portfolio analytics: valuation, income, activity feed, performance.

pub mod activity;
pub mod income;
pub mod performance;
pub mod valuation;

pub use activity::*;
pub use income::*;
pub use performance::*;
pub use valuation::*;

//! Position valuation: market values, unrealized gains, portfolio weights.

mod valuation_model;
mod valuation_service;

pub use valuation_model::*;
pub use valuation_service::*;

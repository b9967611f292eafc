//! Canonical account records.
//!
//! Closed, strictly-typed shapes produced by the normalization boundary.
//! Downstream calculators accept only these; raw API payloads never cross
//! into the portfolio modules.

mod records_model;

pub use records_model::*;

//! Dividend income aggregation by ticker and calendar month.

mod income_model;
mod income_service;

pub use income_model::*;
pub use income_service::*;

#[cfg(test)]
mod income_service_tests;

//! Per-position total returns and best/worst ranking.

mod performance_model;
mod performance_service;

pub use performance_model::*;
pub use performance_service::*;

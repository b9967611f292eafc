//! Merged activity feed over orders and cash transactions.

mod activity_model;
mod activity_service;

pub use activity_model::*;
pub use activity_service::*;

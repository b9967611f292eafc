//! Agentfolio Broker - Typed Trading 212 REST client.
//!
//! This crate owns everything that touches the wire: the HTTP client with
//! its retry and pagination handling, the raw response models, and the
//! normalization boundary that converts them into the canonical records
//! from `agentfolio-core`. Nothing downstream ever sees a raw payload
//! shape.

pub mod client;
pub mod config;
pub mod mapping;
pub mod models;

// Re-export commonly used types
pub use client::{BrokerDataClient, HistoryQuery, Trading212Client};
pub use config::{Environment, Trading212Config};

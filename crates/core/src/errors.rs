//! Core error types for Agentfolio.
//!
//! The taxonomy is deliberately small: bad upstream data shapes, records
//! that cannot be ordered in time, an empty portfolio (an expected state,
//! reported rather than raised), and transport failures from the
//! brokerage API.

use thiserror::Error;

// Create a type alias for Result using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Transport-level failure reported by the brokerage API client.
///
/// This is the single uniform failure kind every fetch operation raises.
/// `retriable` marks failures a caller could reasonably retry (rate
/// limits, timeouts, connection drops); this layer never retries.
#[derive(Error, Debug, Clone)]
#[error("{message}")]
pub struct UpstreamError {
    pub message: String,
    pub retriable: bool,
}

impl UpstreamError {
    pub fn new(message: impl Into<String>, retriable: bool) -> Self {
        Self {
            message: message.into(),
            retriable,
        }
    }
}

/// Root error type for the analytics core
#[derive(Error, Debug)]
pub enum Error {
    /// A raw record is missing required fields or carries unparsable values.
    #[error("Malformed record: {0}")]
    MalformedRecord(String),

    /// A record that must participate in a chronological merge has no
    /// orderable timestamp.
    #[error("Invalid timestamp: {0}")]
    InvalidTimestamp(String),

    /// The account holds no positions. Callers render an empty-state
    /// result instead of failing.
    #[error("Portfolio contains no positions")]
    EmptyPortfolio,

    #[error("Upstream unavailable: {0}")]
    Upstream(#[from] UpstreamError),
}

impl Error {
    pub fn malformed(msg: impl Into<String>) -> Self {
        Error::MalformedRecord(msg.into())
    }
}

//! Agentfolio Core - Canonical records and portfolio analytics.
//!
//! This crate contains the domain logic for Agentfolio. It is
//! transport-agnostic: every entity is an immutable snapshot handed in by
//! the `agentfolio-broker` crate, and every calculator is a pure function
//! over those snapshots. Nothing here performs IO or retains state across
//! calls.

pub mod constants;
pub mod errors;
pub mod portfolio;
pub mod records;

// Re-export common types from the records and portfolio modules
pub use portfolio::*;
pub use records::*;

// Re-export error types
pub use errors::Error;
pub use errors::Result;
pub use errors::UpstreamError;

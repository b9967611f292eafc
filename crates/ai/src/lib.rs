//! Agentfolio AI - Brokerage account tools for AI assistants.
//!
//! This crate exposes the account as named callables implementing
//! rig-core's `Tool` trait: four composite analytics tools that combine
//! several API fetches into one derived answer, and a set of thin
//! read-only passthrough tools. The agent host (MCP server, chat backend)
//! registers the `ToolSet` and owns the transport; everything here is
//! per-invocation request/response with no shared mutable state.

pub mod env;
pub mod error;
pub mod prompt;
pub mod tools;

pub use env::AgentEnvironment;
pub use error::AgentError;
pub use tools::ToolSet;

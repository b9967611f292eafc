//! Tool-layer error types.

use agentfolio_core::Error as CoreError;
use thiserror::Error;

/// Errors surfaced by the account tools.
#[derive(Debug, Error)]
pub enum AgentError {
    /// Invalid tool arguments.
    #[error("{0}")]
    InvalidInput(String),

    /// Error from the analytics core or the brokerage client.
    #[error(transparent)]
    Core(#[from] CoreError),
}

impl AgentError {
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    /// Error kind for the structured `{ kind, message }` tool result.
    pub fn code(&self) -> &'static str {
        match self {
            AgentError::InvalidInput(_) => "INVALID_INPUT",
            AgentError::Core(CoreError::MalformedRecord(_)) => "MALFORMED_RECORD",
            AgentError::Core(CoreError::InvalidTimestamp(_)) => "INVALID_TIMESTAMP",
            AgentError::Core(CoreError::EmptyPortfolio) => "EMPTY_PORTFOLIO",
            AgentError::Core(CoreError::Upstream(_)) => "UPSTREAM_UNAVAILABLE",
        }
    }

    /// Structured error payload handed back to the agent host.
    pub fn to_structured(&self) -> serde_json::Value {
        serde_json::json!({
            "kind": self.code(),
            "message": self.to_string(),
        })
    }
}

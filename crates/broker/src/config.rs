//! Client configuration.
//!
//! Everything the client needs is passed once at construction; there is no
//! global state. `from_env` exists for the common case of wiring the
//! client from the process environment.

use std::env;
use std::str::FromStr;
use std::time::Duration;

use agentfolio_core::{Error, Result, UpstreamError};
use serde::{Deserialize, Serialize};

/// Default request timeout, matching the upstream's recommended client
/// settings.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Default page bound for paginated history fetches (4 pages x 50 records).
pub const DEFAULT_MAX_HISTORY_PAGES: usize = 4;

/// Which Trading 212 environment to talk to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    Demo,
    Live,
}

impl Environment {
    pub fn as_str(&self) -> &'static str {
        match self {
            Environment::Demo => "demo",
            Environment::Live => "live",
        }
    }
}

impl FromStr for Environment {
    type Err = String;

    fn from_str(value: &str) -> std::result::Result<Self, Self::Err> {
        match value.to_ascii_lowercase().as_str() {
            "demo" => Ok(Environment::Demo),
            "live" => Ok(Environment::Live),
            other => Err(format!("unknown Trading 212 environment '{}'", other)),
        }
    }
}

/// Configuration for the Trading 212 client.
#[derive(Debug, Clone)]
pub struct Trading212Config {
    pub api_key: String,
    pub environment: Environment,
    /// Per-request timeout; a request past this fails as retriable.
    pub timeout: Duration,
    /// Upper bound on pages followed when draining paginated history.
    pub max_history_pages: usize,
}

impl Trading212Config {
    pub fn new(api_key: impl Into<String>, environment: Environment) -> Self {
        Self {
            api_key: api_key.into(),
            environment,
            timeout: DEFAULT_TIMEOUT,
            max_history_pages: DEFAULT_MAX_HISTORY_PAGES,
        }
    }

    /// Builds the configuration from `TRADING212_API_KEY` and
    /// `TRADING212_ENVIRONMENT` (defaults to the demo environment).
    pub fn from_env() -> Result<Self> {
        let api_key = env::var("TRADING212_API_KEY").unwrap_or_default();
        if api_key.trim().is_empty() {
            return Err(Error::Upstream(UpstreamError::new(
                "Authentication failed: TRADING212_API_KEY is not set",
                false,
            )));
        }
        let environment = env::var("TRADING212_ENVIRONMENT")
            .ok()
            .and_then(|value| value.parse().ok())
            .unwrap_or(Environment::Demo);
        Ok(Self::new(api_key, environment))
    }

    pub fn base_url(&self) -> String {
        format!("https://{}.trading212.com/api/v0", self.environment.as_str())
    }
}

// src/config.rs
// =============================================================================
// Run-wide settings and the HTTP client built from them.
//
// One reqwest::Client is shared by the page fetcher and every probe so that
// connections to the same host get pooled. Cloning it is cheap (it's an Arc
// internally).
// =============================================================================

use reqwest::{redirect, Client};
use std::time::Duration;

use crate::error::Result;

/// Per-request timeout used when nothing else is configured
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// How many redirects a single HEAD or GET may follow
pub const DEFAULT_MAX_REDIRECTS: usize = 5;

/// Upper bound on probes in flight at the same time
pub const DEFAULT_MAX_CONCURRENCY: usize = 200;

#[derive(Debug, Clone)]
pub struct CheckerConfig {
    /// Timeout applied to each individual request
    pub timeout: Duration,
    pub max_redirects: usize,
    /// Global admission cap, not per host
    pub max_concurrency: usize,
    pub user_agent: String,
}

impl Default for CheckerConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            max_redirects: DEFAULT_MAX_REDIRECTS,
            max_concurrency: DEFAULT_MAX_CONCURRENCY,
            user_agent: default_user_agent(),
        }
    }
}

impl CheckerConfig {
    /// Builds the shared client.
    ///
    /// Status codes are never turned into errors here: every 1xx-5xx response
    /// comes back as Ok(Response) and the caller decides what it means.
    pub fn build_client(&self) -> Result<Client> {
        let client = Client::builder()
            .timeout(self.timeout)
            .redirect(redirect::Policy::limited(self.max_redirects))
            .user_agent(self.user_agent.as_str())
            .build()?;
        Ok(client)
    }
}

pub fn default_user_agent() -> String {
    format!("{}/{}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"))
}

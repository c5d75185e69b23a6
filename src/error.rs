// src/error.rs
// =============================================================================
// Error types for linkprobe.
//
// Only two of these ever stop a run: a seed page that can't be fetched and an
// HTTP client that can't be built. Resolution failures are logged and the
// link is dropped; probe failures never show up here at all, they become a
// LinkStatus instead (see checker/http.rs).
// =============================================================================

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    /// The seed page could not be downloaded
    #[error("failed to fetch {url}: {message}")]
    Fetch { url: String, message: String },

    /// A single href could not be turned into an absolute URL
    #[error("could not resolve link '{href}': {source}")]
    Resolve {
        href: String,
        #[source]
        source: url::ParseError,
    },

    /// The shared HTTP client could not be constructed
    #[error("failed to build HTTP client: {0}")]
    Client(#[from] reqwest::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

/// A HEAD or GET that failed below the HTTP status level.
///
/// These are recovered from locally: the prober turns each one into a
/// LinkStatus for that link only.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TransportError {
    #[error("DNS lookup failed")]
    Dns,
    #[error("timeout")]
    Timeout,
    /// The error carried an HTTP response with this status
    #[error("HTTP {0}")]
    Status(u16),
    #[error("{0}")]
    Message(String),
    #[error("unknown transport error")]
    Unknown,
}

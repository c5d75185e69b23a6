// src/checker/mod.rs
// =============================================================================
// This module contains all link checking logic.
//
// Submodules:
// - resolve: Turns raw href values into absolute URLs
// - html: Extracts the unique set of links from an HTML page
// - http: Probes one link (HEAD, then GET if needed) and classifies it
// - pool: Probes every link with a bounded number in flight
//
// This file (mod.rs) is the module root - it ties everything together and
// exports the public API that other parts of our application can use.
// =============================================================================

mod html;
mod http;
mod pool;
mod resolve;

// Re-export public items from submodules
// This lets callers write `checker::check_links()` instead of
// `checker::pool::check_links()`
pub use html::extract_html_links;
pub use http::{LinkCheckResult, LinkStatus};
pub use pool::{admission_limit, check_links};

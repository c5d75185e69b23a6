// src/page/mod.rs
// =============================================================================
// This module downloads the seed page.
//
// Only the seed page is ever fetched for its HTML: links found on it are
// probed, never crawled further.
// =============================================================================

mod fetch;

// Re-export the fetch function
pub use fetch::fetch_page;

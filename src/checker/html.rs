// src/checker/html.rs
// =============================================================================
// This module extracts links from the seed page's HTML.
//
// We use the `scraper` crate which:
// - Parses HTML into a DOM (Document Object Model)
// - Supports CSS selectors for finding elements
// - Is built on html5ever (Mozilla's HTML parser)
//
// Resolving each href to an absolute URL is delegated to resolve.rs.
//
// Rust concepts:
// - HashSet: To remember which URLs we've already kept
// - Iterators: For walking the selected elements
// =============================================================================

use scraper::{Html, Selector};
use std::collections::HashSet;
use url::Url;

use super::resolve::{is_navigable, resolve_url};

// Extracts every unique, navigable link from HTML content
//
// Parameters:
//   html: the HTML content to parse (borrowed as &str)
//   base_url: the URL of the page (for resolving relative links)
//
// Returns: Vec<String> of absolute URLs, in the order they were first seen.
// Two hrefs that resolve to the same string only show up once.
//
// Example:
//   html = "<a href='/docs'>Docs</a><a href='/docs'>Again</a>"
//   base_url = "https://example.com"
//   result = ["https://example.com/docs"]
pub fn extract_html_links(html: &str, base_url: &Url) -> Vec<String> {
    let document = Html::parse_document(html);

    // The selector is a constant, so a parse failure here is a programmer error
    let selector = Selector::parse("a[href]").expect("'a[href]' is a valid selector");

    let mut seen = HashSet::new();
    let mut links = Vec::new();

    for element in document.select(&selector) {
        let Some(href) = element.value().attr("href") else {
            continue;
        };

        if !is_navigable(href) {
            continue;
        }

        match resolve_url(base_url, href) {
            Ok(absolute_url) => {
                // insert() returns false when the URL was already present
                if seen.insert(absolute_url.clone()) {
                    links.push(absolute_url);
                }
            }
            Err(e) => {
                // One bad href never stops extraction
                log::warn!("Skipping link {:?}: {}", href, e);
            }
        }
    }

    links
}

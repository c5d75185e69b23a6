// src/checker/resolve.rs
// =============================================================================
// Turns raw href values into absolute URLs.
//
// Three shapes of href are handled, checked in this order:
//   //cdn.example.com/x      protocol-relative, borrows the base's scheme
//   https://other.com/y      already absolute, only normalized
//   sub, ../up, ?q=1, #frag  relative, resolved against the base (RFC 3986)
//
// Every result goes through Url::parse, absolute and protocol-relative hrefs
// included, so whatever comes out of here is a valid absolute URL and its
// serialization is a stable dedup key. That normalizes on purpose:
// "https://a.com" comes out as "https://a.com/" and "HTTP://Other.com/y" as
// "http://other.com/y".
// =============================================================================

use url::Url;

use crate::error::{Error, Result};

// Links with these schemes can't be probed over HTTP, so we skip them quietly
const NON_NAVIGABLE_SCHEMES: [&str; 3] = ["javascript:", "mailto:", "tel:"];

/// Returns false for `javascript:`, `mailto:` and `tel:` hrefs (any case).
pub fn is_navigable(href: &str) -> bool {
    let href = href.trim_start();
    !NON_NAVIGABLE_SCHEMES
        .iter()
        .any(|scheme| starts_with_ignore_case(href, scheme))
}

/// Resolves `href` against `base`.
///
/// Examples (base = "https://example.com/dir/page.html"):
///   "sub"                 -> "https://example.com/dir/sub"
///   "//cdn.example.com/x" -> "https://cdn.example.com/x"
///   "https://other.com/y" -> "https://other.com/y"
pub fn resolve_url(base: &Url, href: &str) -> Result<String> {
    let resolved = if href.starts_with("//") {
        Url::parse(&format!("{}:{}", base.scheme(), href))
    } else if has_http_scheme(href) {
        Url::parse(href)
    } else {
        base.join(href)
    };

    resolved.map(|url| url.to_string()).map_err(|source| Error::Resolve {
        href: href.to_string(),
        source,
    })
}

fn has_http_scheme(href: &str) -> bool {
    starts_with_ignore_case(href, "http://") || starts_with_ignore_case(href, "https://")
}

fn starts_with_ignore_case(s: &str, prefix: &str) -> bool {
    s.len() >= prefix.len() && s.as_bytes()[..prefix.len()].eq_ignore_ascii_case(prefix.as_bytes())
}

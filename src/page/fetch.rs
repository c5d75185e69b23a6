// src/page/fetch.rs
// =============================================================================
// Fetches the HTML of the seed page.
//
// Unlike the prober, this step treats any non-2xx status as a failure: we
// can't extract links from an error page we didn't ask for. There are no
// retries; the client's timeout applies.
// =============================================================================

use reqwest::Client;
use url::Url;

use crate::error::{Error, Result};

// Fetches a web page and returns its HTML content
//
// Returns Error::Fetch with the underlying cause's message on a network
// failure, a timeout, or a non-success status
pub async fn fetch_page(client: &Client, url: &Url) -> Result<String> {
    let fetch_error = |message: String| Error::Fetch {
        url: url.to_string(),
        message,
    };

    let response = client
        .get(url.clone())
        .send()
        .await
        .map_err(|e| fetch_error(e.to_string()))?;

    let status = response.status();
    if !status.is_success() {
        return Err(fetch_error(format!("HTTP {}", status)));
    }

    response.text().await.map_err(|e| fetch_error(e.to_string()))
}

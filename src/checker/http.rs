// src/checker/http.rs
// =============================================================================
// This module checks if a single URL is alive by making HTTP requests.
//
// Key functionality:
// - Makes an HTTP HEAD request first (lightweight, no body download)
// - Falls back to GET when HEAD is inconclusive
// - Classifies the outcome as OK, NOT OK (status) or ERROR (reason)
//
// The probe is a tiny state machine:
//
//   HEAD ──200──────────────> OK
//     │ ──>=400─────────────> NOT OK (code)
//     │ ──anything else─┐
//     │ ──network error─┴──> GET ──200──> OK
//                                 ──other─> NOT OK (code)
//                                 ──error─> ERROR (reason) / NOT OK (code)
//
// Both transitions are plain functions over the transport outcome, so they
// can be tested without a network.
// =============================================================================

use reqwest::{Client, RequestBuilder};
use serde::Serialize;
use std::error::Error as StdError;
use std::fmt;
use std::io;

use crate::error::TransportError;

/// What one HTTP request produced: a status code, or a transport failure
pub type Outcome = Result<u16, TransportError>;

/// Why a link could not be checked at all
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(into = "String")]
pub enum ErrorKind {
    Dns,
    Timeout,
    Message(String),
    Unknown,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorKind::Dns => f.write_str("DNS lookup failed"),
            ErrorKind::Timeout => f.write_str("timeout"),
            ErrorKind::Message(message) => f.write_str(message),
            ErrorKind::Unknown => f.write_str("unknown"),
        }
    }
}

impl From<ErrorKind> for String {
    fn from(kind: ErrorKind) -> Self {
        kind.to_string()
    }
}

// Represents the status of a link after checking
//
// Serialized as {"status": "ok"}, {"status": "not_ok", "code": 404} or
// {"status": "error", "reason": "timeout"}
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum LinkStatus {
    /// Answered 200 on HEAD or GET
    Ok,
    /// Answered, but with something other than 200
    NotOk { code: u16 },
    /// No usable HTTP status
    Error { reason: ErrorKind },
}

impl fmt::Display for LinkStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LinkStatus::Ok => f.write_str("OK"),
            LinkStatus::NotOk { code } => write!(f, "NOT OK ({})", code),
            LinkStatus::Error { reason } => write!(f, "ERROR ({})", reason),
        }
    }
}

// Represents the result of checking a single link
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LinkCheckResult {
    /// The URL that was checked
    pub url: String,
    /// The status of the link
    #[serde(flatten)] // Merges the LinkStatus fields into LinkCheckResult
    pub status: LinkStatus,
}

impl fmt::Display for LinkCheckResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.url, self.status)
    }
}

impl TransportError {
    /// Sorts a reqwest error into the buckets the prober cares about.
    ///
    /// Priority: DNS failure, then timeout/aborted, then an attached status,
    /// then the error's own message.
    pub fn from_reqwest(error: &reqwest::Error) -> Self {
        if is_dns_failure(error) {
            TransportError::Dns
        } else if error.is_timeout() || is_aborted(error) {
            TransportError::Timeout
        } else if let Some(status) = error.status() {
            TransportError::Status(status.as_u16())
        } else {
            let message = error.to_string();
            if message.trim().is_empty() {
                TransportError::Unknown
            } else {
                TransportError::Message(message)
            }
        }
    }
}

// Walks an error and all of its sources, outermost first
fn error_chain<'a>(
    error: &'a (dyn StdError + 'static),
) -> impl Iterator<Item = &'a (dyn StdError + 'static)> {
    std::iter::successors(Some(error), |&e| e.source())
}

// hyper reports resolver failures as "dns error" wrapping the io error from
// getaddrinfo, so we look for either wording anywhere in the chain
fn is_dns_failure(error: &reqwest::Error) -> bool {
    error_chain(error).any(|cause| {
        let message = cause.to_string().to_ascii_lowercase();
        message.contains("dns error")
            || message.contains("failed to lookup address")
            || message.contains("name or service not known")
            || message.contains("no such host")
    })
}

fn is_aborted(error: &reqwest::Error) -> bool {
    error_chain(error)
        .filter_map(|cause| cause.downcast_ref::<io::Error>())
        .any(|e| matches!(e.kind(), io::ErrorKind::TimedOut | io::ErrorKind::ConnectionAborted))
}

/// Phase 1. `None` means HEAD was inconclusive and GET should decide.
pub fn classify_head(outcome: &Outcome) -> Option<LinkStatus> {
    match outcome {
        Ok(200) => Some(LinkStatus::Ok),
        Ok(code) if *code >= 400 => Some(LinkStatus::NotOk { code: *code }),
        _ => None,
    }
}

/// Phase 2. Always terminal.
pub fn classify_get(outcome: Outcome) -> LinkStatus {
    match outcome {
        Ok(200) => LinkStatus::Ok,
        Ok(code) => LinkStatus::NotOk { code },
        Err(TransportError::Dns) => LinkStatus::Error { reason: ErrorKind::Dns },
        Err(TransportError::Timeout) => LinkStatus::Error { reason: ErrorKind::Timeout },
        Err(TransportError::Status(code)) => LinkStatus::NotOk { code },
        Err(TransportError::Message(message)) => LinkStatus::Error {
            reason: ErrorKind::Message(message),
        },
        Err(TransportError::Unknown) => LinkStatus::Error { reason: ErrorKind::Unknown },
    }
}

// Sends a request and keeps only the status; the body is never read
async fn send(request: RequestBuilder) -> Outcome {
    request
        .send()
        .await
        .map(|response| response.status().as_u16())
        .map_err(|e| TransportError::from_reqwest(&e))
}

// Checks a single link
//
// This never fails: whatever goes wrong ends up as a LinkStatus, so one bad
// link can't take down the others running next to it.
pub async fn probe_link(client: &Client, url: String) -> LinkCheckResult {
    let head = send(client.head(&url)).await;

    if let Err(e) = &head {
        log::debug!("HEAD {} failed ({}), falling back to GET", url, e);
    }

    let status = match classify_head(&head) {
        Some(status) => status,
        None => classify_get(send(client.get(&url)).await),
    };

    LinkCheckResult { url, status }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CheckerConfig;

    fn client() -> Client {
        CheckerConfig::default().build_client().unwrap()
    }

    #[test]
    fn test_head_200_is_ok() {
        assert_eq!(classify_head(&Ok(200)), Some(LinkStatus::Ok));
    }

    #[test]
    fn test_head_404_is_not_ok() {
        assert_eq!(classify_head(&Ok(404)), Some(LinkStatus::NotOk { code: 404 }));
        assert_eq!(classify_head(&Ok(503)), Some(LinkStatus::NotOk { code: 503 }));
    }

    #[test]
    fn test_head_inconclusive_outcomes() {
        assert_eq!(classify_head(&Ok(301)), None);
        assert_eq!(classify_head(&Ok(204)), None);
        assert_eq!(classify_head(&Ok(100)), None);
        assert_eq!(
            classify_head(&Err(TransportError::Message("connection refused".into()))),
            None
        );
        assert_eq!(classify_head(&Err(TransportError::Status(404))), None);
    }

    #[test]
    fn test_head_301_then_get_200_is_ok() {
        assert_eq!(classify_head(&Ok(301)), None);
        assert_eq!(classify_get(Ok(200)), LinkStatus::Ok);
    }

    #[test]
    fn test_refused_then_dns_failure() {
        let head = Err(TransportError::Message("connection refused".into()));
        assert_eq!(classify_head(&head), None);
        let status = classify_get(Err(TransportError::Dns));
        assert_eq!(status.to_string(), "ERROR (DNS lookup failed)");
    }

    #[test]
    fn test_get_classification() {
        assert_eq!(classify_get(Ok(302)), LinkStatus::NotOk { code: 302 });
        assert_eq!(classify_get(Ok(500)), LinkStatus::NotOk { code: 500 });
        assert_eq!(
            classify_get(Err(TransportError::Timeout)).to_string(),
            "ERROR (timeout)"
        );
        assert_eq!(
            classify_get(Err(TransportError::Status(410))),
            LinkStatus::NotOk { code: 410 }
        );
        assert_eq!(
            classify_get(Err(TransportError::Message("boom".into()))).to_string(),
            "ERROR (boom)"
        );
        assert_eq!(
            classify_get(Err(TransportError::Unknown)).to_string(),
            "ERROR (unknown)"
        );
    }

    #[test]
    fn test_result_rendering() {
        let result = LinkCheckResult {
            url: "https://example.com/missing".to_string(),
            status: LinkStatus::NotOk { code: 404 },
        };
        assert_eq!(result.to_string(), "https://example.com/missing -> NOT OK (404)");
    }

    #[test]
    fn test_result_json() {
        let ok = LinkCheckResult {
            url: "https://example.com/".to_string(),
            status: LinkStatus::Ok,
        };
        assert_eq!(
            serde_json::to_string(&ok).unwrap(),
            r#"{"url":"https://example.com/","status":"ok"}"#
        );

        let err = LinkCheckResult {
            url: "https://nope.test/".to_string(),
            status: LinkStatus::Error { reason: ErrorKind::Dns },
        };
        assert_eq!(
            serde_json::to_string(&err).unwrap(),
            r#"{"url":"https://nope.test/","status":"error","reason":"DNS lookup failed"}"#
        );
    }

    #[tokio::test]
    async fn test_probe_head_ok_skips_get() {
        let mut server = mockito::Server::new_async().await;
        let head = server.mock("HEAD", "/ok").with_status(200).create_async().await;
        let get = server.mock("GET", "/ok").expect(0).create_async().await;

        let result = probe_link(&client(), format!("{}/ok", server.url())).await;

        assert_eq!(result.status, LinkStatus::Ok);
        head.assert_async().await;
        get.assert_async().await;
    }

    #[tokio::test]
    async fn test_probe_head_404() {
        let mut server = mockito::Server::new_async().await;
        let _head = server.mock("HEAD", "/gone").with_status(404).create_async().await;
        let get = server.mock("GET", "/gone").expect(0).create_async().await;

        let result = probe_link(&client(), format!("{}/gone", server.url())).await;

        assert_eq!(result.to_string(), format!("{}/gone -> NOT OK (404)", server.url()));
        get.assert_async().await;
    }

    #[tokio::test]
    async fn test_probe_head_301_falls_back_to_get() {
        let mut server = mockito::Server::new_async().await;
        // No Location header, so the client can't follow it and hands us the 301
        let _head = server.mock("HEAD", "/moved").with_status(301).create_async().await;
        let get = server
            .mock("GET", "/moved")
            .with_status(200)
            .with_body("here")
            .expect(1)
            .create_async()
            .await;

        let result = probe_link(&client(), format!("{}/moved", server.url())).await;

        assert_eq!(result.status, LinkStatus::Ok);
        get.assert_async().await;
    }

    #[tokio::test]
    async fn test_probe_get_non_200_is_not_ok() {
        let mut server = mockito::Server::new_async().await;
        let _head = server.mock("HEAD", "/empty").with_status(204).create_async().await;
        let _get = server.mock("GET", "/empty").with_status(204).create_async().await;

        let result = probe_link(&client(), format!("{}/empty", server.url())).await;

        assert_eq!(result.status, LinkStatus::NotOk { code: 204 });
    }

    #[tokio::test]
    async fn test_unresolvable_host_is_dns_error() {
        // .invalid is reserved and never resolves
        let result = probe_link(&client(), "http://no-such-host-xyz.invalid/".to_string()).await;

        assert_eq!(result.status, LinkStatus::Error { reason: ErrorKind::Dns });
        assert_eq!(
            result.to_string(),
            "http://no-such-host-xyz.invalid/ -> ERROR (DNS lookup failed)"
        );
    }

    #[tokio::test]
    async fn test_silent_server_is_timeout() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        // Accept connections and hold them open without ever answering
        let _server = tokio::spawn(async move {
            let mut held = Vec::new();
            while let Ok((socket, _)) = listener.accept().await {
                held.push(socket);
            }
        });

        let config = CheckerConfig {
            timeout: std::time::Duration::from_secs(1),
            ..CheckerConfig::default()
        };
        let client = config.build_client().unwrap();
        let url = format!("http://{}/", addr);

        let result = probe_link(&client, url.clone()).await;

        assert_eq!(result.status, LinkStatus::Error { reason: ErrorKind::Timeout });
        assert_eq!(result.to_string(), format!("{} -> ERROR (timeout)", url));
    }

    #[tokio::test]
    async fn test_redirect_loop_reports_message() {
        let mut server = mockito::Server::new_async().await;
        let target = format!("{}/loop", server.url());
        let _head = server
            .mock("HEAD", "/loop")
            .with_status(302)
            .with_header("location", &target)
            .create_async()
            .await;
        let _get = server
            .mock("GET", "/loop")
            .with_status(302)
            .with_header("location", &target)
            .create_async()
            .await;

        let result = probe_link(&client(), target.clone()).await;

        match &result.status {
            LinkStatus::Error { reason: ErrorKind::Message(message) } => {
                assert!(message.contains("too many redirects"), "got {:?}", message);
            }
            other => panic!("expected a message error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_probe_connection_refused_is_error() {
        // Port 1 is reserved and nothing listens there
        let result = probe_link(&client(), "http://127.0.0.1:1/".to_string()).await;

        assert!(matches!(result.status, LinkStatus::Error { .. }));
        assert!(result.to_string().starts_with("http://127.0.0.1:1/ -> ERROR ("));
    }
}

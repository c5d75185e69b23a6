// src/checker/pool.rs
// =============================================================================
// Runs the prober over every link with a cap on how many are in flight.
//
// How it works:
// 1. Turn each link into a (lazy) probe future, in discovery order
// 2. buffer_unordered(n) starts the first n and keeps the rest waiting
// 3. Whenever one finishes, the next waiting future is started (FIFO)
// 4. Results come out in the order they *finish*, not the order they started
//
// Everything is polled from one task, so there's no parallelism and no locks:
// the only shared state is the gate itself.
// =============================================================================

use futures::stream::{self, Stream, StreamExt};
use reqwest::Client;
use std::future::Future;

use super::http::{probe_link, LinkCheckResult};

/// How many probes may run at once: never more than there are links, never
/// more than `cap`, and at least one.
pub fn admission_limit(link_count: usize, cap: usize) -> usize {
    link_count.min(cap).max(1)
}

// Runs `task` for every item with at most `limit` futures in flight
//
// Generic over the task so the gate can be tested without any HTTP
pub fn run_bounded<I, F, Fut>(items: I, limit: usize, task: F) -> impl Stream<Item = Fut::Output>
where
    I: IntoIterator,
    F: FnMut(I::Item) -> Fut,
    Fut: Future,
{
    stream::iter(items.into_iter().map(task)).buffer_unordered(limit.max(1))
}

// Checks all links, streaming each result as soon as its probe completes
//
// Parameters:
//   client: shared HTTP client (cloned into each probe, it's an Arc inside)
//   urls: the deduplicated link set
//   limit: admission gate size, see admission_limit()
pub fn check_links(
    client: Client,
    urls: Vec<String>,
    limit: usize,
) -> impl Stream<Item = LinkCheckResult> {
    run_bounded(urls, limit, move |url| {
        let client = client.clone();
        async move { probe_link(&client, url).await }
    })
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. Why not tokio::spawn for every link?
//    - Spawning would start all 500 requests at once
//    - buffer_unordered only polls `limit` futures, the rest are just values
//      sitting in an iterator until a slot frees up
//
// 2. What does "lazy" future mean?
//    - Calling an async fn does nothing until the future is polled
//    - So mapping 500 URLs to futures doesn't send 500 requests
//
// 3. Why return `impl Stream` instead of a Vec?
//    - The caller can print each result the moment it arrives
//    - A Vec would make everyone wait for the slowest link
// -----------------------------------------------------------------------------

// src/main.rs
// =============================================================================
// This is the entry point of our CLI application.
//
// What happens here:
// 1. Parse command-line arguments using clap (bad usage exits with code 2)
// 2. Set up logging on stderr
// 3. Fetch the seed page, extract its links, probe them all
// 4. Print each result to stdout as soon as it's known
// 5. Exit with proper code (0 = run completed, 1 = fetch failed / error)
//
// Broken links don't change the exit code: they're results, not failures.
// =============================================================================

// Module declarations - tells Rust about our other source files
mod checker; // src/checker/ - extraction, probing and the concurrency gate
mod cli; // src/cli.rs - command-line parsing
mod config; // src/config.rs - timeouts, limits and the HTTP client
mod error; // src/error.rs - typed errors
mod page; // src/page/ - fetching the seed page
mod report; // src/report.rs - output lines and summary

use anyhow::Result;
use clap::Parser;
use futures::StreamExt;
use reqwest::Client;
use std::io::Write;
use url::Url;

use cli::Cli;
use config::CheckerConfig;
use report::{OutputFormat, Summary};

// A current-thread runtime: every probe is a future polled from this one
// thread, overlapping only while they wait on the network
#[tokio::main(flavor = "current_thread")]
async fn main() {
    // Prints usage and exits with code 2 on any argument error
    let cli = Cli::parse();

    logger(cli.log_level()).init();

    let exit_code = match run(cli).await {
        Ok(code) => code,
        Err(e) => {
            log::error!("{:#}", e);
            1
        }
    };

    std::process::exit(exit_code);
}

// Diagnostics go to stderr at the level picked by -v / -q. The filter comes
// from the flags alone; no environment variable is read.
fn logger(level: &str) -> env_logger::Builder {
    let mut builder = env_logger::Builder::new();
    builder.parse_filters(level).target(env_logger::Target::Stderr);
    builder
}

async fn run(cli: Cli) -> Result<i32> {
    let config = cli.checker_config();
    let client = config.build_client()?;
    let format = OutputFormat::from_json_flag(cli.json);

    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    let summary = check_page(&client, &cli.url, &config, format, &mut out).await?;

    if summary.total() > 0 {
        log::info!(
            "Checked {} link(s): {} OK, {} not OK, {} error(s)",
            summary.total(),
            summary.ok,
            summary.not_ok,
            summary.errors
        );
    }

    Ok(0)
}

// Runs the whole pipeline for one seed page
//
// Only a failed seed fetch is returned as an error; every per-link problem
// ends up as a line in `out`.
async fn check_page<W: Write>(
    client: &Client,
    seed: &Url,
    config: &CheckerConfig,
    format: OutputFormat,
    out: &mut W,
) -> Result<Summary> {
    log::info!("Checking links on {}", seed);

    let html = page::fetch_page(client, seed).await?;
    log::info!("Fetched {} ({} bytes of HTML)", seed, html.len());

    let links = checker::extract_html_links(&html, seed);
    log::info!("Found {} unique link(s)", links.len());

    if links.is_empty() {
        writeln!(out, "No links found.")?;
        return Ok(Summary::default());
    }

    let limit = checker::admission_limit(links.len(), config.max_concurrency);
    log::info!("Probing with at most {} concurrent request(s)", limit);

    let mut summary = Summary::default();
    let mut results = std::pin::pin!(checker::check_links(client.clone(), links, limit));

    while let Some(result) = results.next().await {
        report::write_result(out, &result, format)?;
        summary.record(&result.status);
    }

    Ok(summary)
}

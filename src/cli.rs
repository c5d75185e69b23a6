// src/cli.rs
// =============================================================================
// This file defines our command-line interface using the `clap` crate.
//
// The only required input is the seed URL. It's validated right here by a
// value parser, so a bad URL is reported by clap together with the usage line
// and the process exits with code 2 before any network activity.
// =============================================================================

use clap::Parser;
use std::time::Duration;
use url::Url;

use crate::config::{
    default_user_agent, CheckerConfig, DEFAULT_MAX_CONCURRENCY, DEFAULT_MAX_REDIRECTS,
    DEFAULT_TIMEOUT_SECS,
};

#[derive(Parser, Debug)]
#[command(
    name = "linkprobe",
    version,
    about = "Check every link on a web page for broken targets",
    long_about = "linkprobe downloads a single page, extracts its links and probes each one \
                  concurrently (HEAD first, GET if needed). Results are printed as \
                  `<url> -> <status>`, one line per link, as soon as each check finishes."
)]
pub struct Cli {
    /// Page whose links should be checked (e.g., https://example.com)
    ///
    /// A URL starting with `//` is treated as https.
    #[arg(value_parser = parse_seed_url)]
    pub url: Url,

    /// Timeout for each individual request, in seconds
    #[arg(long, value_name = "SECS", default_value_t = DEFAULT_TIMEOUT_SECS,
          value_parser = clap::value_parser!(u64).range(1..))]
    pub timeout: u64,

    /// Maximum number of redirects a single request may follow
    #[arg(long, value_name = "N", default_value_t = DEFAULT_MAX_REDIRECTS)]
    pub max_redirects: usize,

    /// Maximum number of links probed at the same time
    #[arg(long, value_name = "N", default_value_t = DEFAULT_MAX_CONCURRENCY,
          value_parser = parse_concurrency)]
    pub max_concurrency: usize,

    /// User-Agent header sent with every request
    #[arg(long, value_name = "UA")]
    pub user_agent: Option<String>,

    /// Print each result as a JSON object (one per line)
    #[arg(long)]
    pub json: bool,

    /// Show debug diagnostics on stderr
    #[arg(short, long, conflicts_with = "quiet")]
    pub verbose: bool,

    /// Only show errors on stderr
    #[arg(short, long)]
    pub quiet: bool,
}

impl Cli {
    pub fn checker_config(&self) -> CheckerConfig {
        CheckerConfig {
            timeout: Duration::from_secs(self.timeout),
            max_redirects: self.max_redirects,
            max_concurrency: self.max_concurrency,
            user_agent: self.user_agent.clone().unwrap_or_else(default_user_agent),
        }
    }

    /// Log filter for stderr diagnostics
    pub fn log_level(&self) -> &'static str {
        if self.verbose {
            "debug"
        } else if self.quiet {
            "error"
        } else {
            "info"
        }
    }
}

// Validates the seed URL
//
// Accepts absolute http/https URLs with a host. Protocol-relative input
// ("//example.com") gets "https:" prepended first.
pub fn parse_seed_url(input: &str) -> Result<Url, String> {
    let candidate = if input.starts_with("//") {
        format!("https:{}", input)
    } else {
        input.to_string()
    };

    let url = Url::parse(&candidate).map_err(|e| format!("not a valid URL: {}", e))?;

    if !matches!(url.scheme(), "http" | "https") {
        return Err(format!(
            "unsupported scheme '{}', expected http or https",
            url.scheme()
        ));
    }

    if url.host_str().map_or(true, str::is_empty) {
        return Err("URL has no host".to_string());
    }

    Ok(url)
}

fn parse_concurrency(input: &str) -> Result<usize, String> {
    match input.parse::<usize>() {
        Ok(0) => Err("must be at least 1".to_string()),
        Ok(n) => Ok(n),
        Err(e) => Err(e.to_string()),
    }
}

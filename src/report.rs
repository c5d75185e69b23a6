// src/report.rs
// =============================================================================
// Writes per-link results to stdout and keeps a running tally.
//
// Each line is flushed as soon as it's written so results show up while the
// remaining probes are still running, even when stdout is a pipe.
// =============================================================================

use anyhow::Result;
use std::io::Write;

use crate::checker::{LinkCheckResult, LinkStatus};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// `<url> -> <status>`
    Text,
    /// One JSON object per line
    Json,
}

impl OutputFormat {
    pub fn from_json_flag(json: bool) -> Self {
        if json {
            OutputFormat::Json
        } else {
            OutputFormat::Text
        }
    }
}

pub fn write_result<W: Write>(
    out: &mut W,
    result: &LinkCheckResult,
    format: OutputFormat,
) -> Result<()> {
    match format {
        OutputFormat::Text => writeln!(out, "{}", result)?,
        OutputFormat::Json => {
            serde_json::to_writer(&mut *out, result)?;
            writeln!(out)?;
        }
    }
    out.flush()?;
    Ok(())
}

/// Counts of each kind of result seen so far
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Summary {
    pub ok: usize,
    pub not_ok: usize,
    pub errors: usize,
}

impl Summary {
    pub fn record(&mut self, status: &LinkStatus) {
        match status {
            LinkStatus::Ok => self.ok += 1,
            LinkStatus::NotOk { .. } => self.not_ok += 1,
            LinkStatus::Error { .. } => self.errors += 1,
        }
    }

    pub fn total(&self) -> usize {
        self.ok + self.not_ok + self.errors
    }
}

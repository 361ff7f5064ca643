//! CLI interface for pktanalyzer
//!
//! This crate provides the command-line driver: argument parsing and the
//! glue that reads a capture file and renders its dissection.

pub mod args;

pub use args::Cli;

use pktanalyzer_core::{Error, ReportConfig, Result};
use pktanalyzer_packet::dissect;
use std::path::Path;
use tracing::info;

/// Read one frame from `path` and render every decoded layer's report.
///
/// The returned text is the concatenation of the reports, followed by the
/// unhandled-protocol notice when IPv4 carried something without a decoder.
/// A decoded TCP, UDP or ICMP report is followed by one blank line.
pub fn analyze_file(path: &Path, config: &ReportConfig) -> Result<String> {
    if !path.exists() {
        return Err(Error::FileNotFound(path.to_path_buf()));
    }

    let frame = std::fs::read(path)?;
    info!(path = %path.display(), bytes = frame.len(), "read capture");

    let dissection = dissect(&frame)?;
    let mut output = dissection.reports(config).concat();
    if dissection.transport().is_some() {
        output.push('\n');
    }
    if let Some(notice) = dissection.unhandled() {
        output.push_str(notice);
        output.push('\n');
    }
    Ok(output)
}

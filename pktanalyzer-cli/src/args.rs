//! CLI argument parsing

use clap::Parser;
use pktanalyzer_core::config::DEFAULT_DUMP_LINES;
use pktanalyzer_core::ReportConfig;
use std::path::PathBuf;
use tracing::Level;

#[derive(Parser, Debug)]
#[command(name = "pktanalyzer")]
#[command(version, about = "Decode a captured Ethernet frame into per-layer reports", long_about = None)]
pub struct Cli {
    /// File holding one raw captured frame
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Verbose output (-v, -vv, -vvv for increasing verbosity)
    #[arg(short = 'v', long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Hex dump lines shown for TCP/UDP payloads (16 bytes each)
    #[arg(
        long,
        value_name = "LINES",
        default_value_t = DEFAULT_DUMP_LINES as u16,
        value_parser = clap::value_parser!(u16)
    )]
    pub dump_lines: u16,
}

impl Cli {
    /// Parse command-line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Log level selected by the verbosity count
    pub fn log_level(&self) -> Level {
        match self.verbose {
            0 => Level::WARN,
            1 => Level::INFO,
            2 => Level::DEBUG,
            _ => Level::TRACE,
        }
    }

    pub fn report_config(&self) -> ReportConfig {
        ReportConfig::new(usize::from(self.dump_lines))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cli = Cli::try_parse_from(["pktanalyzer", "frame.bin"]).unwrap();
        assert_eq!(cli.file, PathBuf::from("frame.bin"));
        assert_eq!(cli.verbose, 0);
        assert_eq!(cli.log_level(), Level::WARN);
        assert_eq!(cli.report_config(), ReportConfig::default());
    }

    #[test]
    fn test_verbosity_and_dump_lines() {
        let cli =
            Cli::try_parse_from(["pktanalyzer", "-vv", "--dump-lines", "8", "frame.bin"]).unwrap();
        assert_eq!(cli.log_level(), Level::DEBUG);
        assert_eq!(cli.report_config().preview_bytes(), 128);
    }

    #[test]
    fn test_dump_lines_out_of_range_is_rejected() {
        let result = Cli::try_parse_from([
            "pktanalyzer",
            "--dump-lines",
            "18446744073709551615",
            "frame.bin",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_largest_dump_lines_does_not_overflow() {
        let cli = Cli::try_parse_from(["pktanalyzer", "--dump-lines", "65535", "frame.bin"]).unwrap();
        assert_eq!(cli.report_config().preview_bytes(), 65535 * 16);
    }

    #[test]
    fn test_file_is_required() {
        assert!(Cli::try_parse_from(["pktanalyzer"]).is_err());
    }
}

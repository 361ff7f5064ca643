//! Report configuration

/// Default number of hex dump lines shown for transport payloads
pub const DEFAULT_DUMP_LINES: usize = 4;

/// Bytes rendered on each hex dump line
pub const BYTES_PER_DUMP_LINE: usize = 16;

/// Controls how decoded layers are rendered
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReportConfig {
    /// Maximum payload preview lines in TCP/UDP reports
    pub dump_lines: usize,
}

impl ReportConfig {
    pub fn new(dump_lines: usize) -> Self {
        Self { dump_lines }
    }

    /// Number of payload bytes covered by the preview
    pub fn preview_bytes(&self) -> usize {
        self.dump_lines.saturating_mul(BYTES_PER_DUMP_LINE)
    }
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            dump_lines: DEFAULT_DUMP_LINES,
        }
    }
}

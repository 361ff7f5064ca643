//! Fixed-format text reports for decoded layers
//!
//! Every line of a report starts with the layer tag (`ETHER:`, `IP:`, ...).
//! The first line is a title such as `IP: ----- IP Header -----`; spacer lines
//! are padded with blanks to the width of that title.

use pktanalyzer_core::{Layer, ReportConfig};

use crate::hexdump::HexDump;

/// A decoded layer that can render itself as a diagnostic report
pub trait Report {
    /// Layer this value was decoded from
    fn layer(&self) -> Layer;

    /// Write the report lines
    fn write_report(&self, out: &mut ReportWriter, config: &ReportConfig);

    /// Render the full report
    fn report(&self, config: &ReportConfig) -> String {
        let mut out = ReportWriter::new(self.layer());
        self.write_report(&mut out, config);
        out.finish()
    }
}

/// Accumulates tagged report lines
#[derive(Debug)]
pub struct ReportWriter {
    tag: &'static str,
    title_width: usize,
    buf: String,
}

impl ReportWriter {
    pub fn new(layer: Layer) -> Self {
        let tag = layer.tag();
        ReportWriter {
            tag,
            title_width: tag.len() + 1,
            buf: String::new(),
        }
    }

    /// `TAG: ----- <name> Header -----`
    pub fn title(&mut self, name: &str) {
        let start = self.buf.len();
        self.line(format_args!("----- {} Header -----", name));
        self.title_width = self.buf.len() - start - 1;
    }

    /// `TAG: <text>`
    pub fn line(&mut self, text: impl std::fmt::Display) {
        self.buf.push_str(self.tag);
        self.buf.push_str(": ");
        self.buf.push_str(&text.to_string());
        self.buf.push('\n');
    }

    /// Bare `TAG:`
    pub fn blank(&mut self) {
        self.buf.push_str(self.tag);
        self.buf.push_str(":\n");
    }

    /// `TAG:` padded with spaces to the title width
    pub fn spacer(&mut self) {
        let tagged = format!("{}:", self.tag);
        self.buf
            .push_str(&format!("{:<width$}\n", tagged, width = self.title_width));
    }

    /// Payload preview: header line followed by up to `dump_lines` dump lines
    pub fn preview(&mut self, dump: &HexDump, config: &ReportConfig) {
        self.line(format_args!("Data: (first {} bytes)", config.preview_bytes()));
        for line in dump.head(config.dump_lines) {
            self.line(line);
        }
    }

    pub fn finish(self) -> String {
        self.buf
    }
}

/// Render a flag bit as one line of a bit diagram
pub(crate) fn flag_line(pattern: &str, set: bool, on: &str, off: &str) -> String {
    let bit = if set { '1' } else { '0' };
    let text = if set { on } else { off };
    format!("      {} = {}", pattern.replacen('x', &bit.to_string(), 1), text)
}

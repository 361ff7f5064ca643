//! Hex/ASCII dump formatting for payload previews
//!
//! Each line covers 16 bytes. The hex column shows bytes as lowercase pairs
//! grouped two bytes per word (`4142 4344 ...`) padded to 39 columns. The
//! ASCII column renders printable bytes (32..=126) as characters and anything
//! else as `.`, padded to 16 columns with `.`.

use std::fmt;

use pktanalyzer_core::config::BYTES_PER_DUMP_LINE;

/// Width of the hex column
pub const HEX_WIDTH: usize = 39;

/// Width of the ASCII column
pub const ASCII_WIDTH: usize = BYTES_PER_DUMP_LINE;

/// One formatted line of a hex dump
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HexDumpLine {
    hex: String,
    ascii: String,
}

impl HexDumpLine {
    fn from_chunk(chunk: &[u8]) -> Self {
        let mut hex = String::with_capacity(HEX_WIDTH);
        let mut ascii = String::with_capacity(ASCII_WIDTH);

        for (i, byte) in chunk.iter().enumerate() {
            if i > 0 && i % 2 == 0 {
                hex.push(' ');
            }
            hex.push_str(&format!("{:02x}", byte));
            ascii.push(printable(*byte));
        }

        HexDumpLine { hex, ascii }
    }

    /// Hex column without padding
    pub fn hex(&self) -> &str {
        &self.hex
    }

    /// ASCII column without padding
    pub fn ascii(&self) -> &str {
        &self.ascii
    }
}

impl fmt::Display for HexDumpLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:<hw$}    '{:.<aw$}'",
            self.hex,
            self.ascii,
            hw = HEX_WIDTH,
            aw = ASCII_WIDTH
        )
    }
}

fn printable(byte: u8) -> char {
    if (32..=126).contains(&byte) {
        byte as char
    } else {
        '.'
    }
}

/// Hex dump of an arbitrary byte sequence
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HexDump {
    lines: Vec<HexDumpLine>,
}

impl HexDump {
    pub fn new(data: &[u8]) -> Self {
        HexDump {
            lines: data
                .chunks(BYTES_PER_DUMP_LINE)
                .map(HexDumpLine::from_chunk)
                .collect(),
        }
    }

    pub fn lines(&self) -> &[HexDumpLine] {
        &self.lines
    }

    /// At most `max` lines from the start of the dump
    pub fn head(&self, max: usize) -> &[HexDumpLine] {
        &self.lines[..self.lines.len().min(max)]
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

impl fmt::Display for HexDump {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for line in &self.lines {
            writeln!(f, "{}", line)?;
        }
        Ok(())
    }
}

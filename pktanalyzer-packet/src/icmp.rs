//! ICMP message parsing
//!
//! Only the common four-byte header (type, code, checksum) is decoded; the
//! rest of the message is kept as raw data.
//!
//! Reference: <https://en.wikipedia.org/wiki/Internet_Control_Message_Protocol>

use bytes::{Buf, Bytes};
use pktanalyzer_core::{Error, Layer, ReportConfig, Result};
use tracing::debug;

use crate::report::{Report, ReportWriter};

/// Description used for types missing from the table
pub const NO_DESCRIPTION: &str = "No description";

/// ICMP message types and their descriptions
pub const ICMP_TYPE_TABLE: &[(u8, &str)] = &[
    (0, "Echo reply"),
    (3, "Destination unreachable"),
    (4, "Source quench"),
    (5, "Redirect message"),
    (8, "Echo request"),
    (9, "Router advertisement"),
    (10, "Router solicitation"),
    (11, "Time exceeded"),
    (12, "Bad IP header"),
    (13, "Timestamp"),
    (14, "Timestamp reply"),
    (15, "Information request"),
    (16, "Information reply"),
    (17, "Address Mask request"),
    (18, "Address Mask reply"),
    (30, "Traceroute"),
    (42, "Extended echo request"),
    (43, "Extended echo reply"),
];

/// Description of an ICMP type
pub fn type_description(icmp_type: u8) -> &'static str {
    ICMP_TYPE_TABLE
        .iter()
        .find(|(t, _)| *t == icmp_type)
        .map(|(_, desc)| *desc)
        .unwrap_or(NO_DESCRIPTION)
}

/// Decoded ICMP message header
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IcmpMessage {
    icmp_type: u8,
    code: u8,
    checksum: u16,
    data: Bytes,
}

impl IcmpMessage {
    /// Type, code and checksum
    pub const HEADER_SIZE: usize = 4;

    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        if data.len() < Self::HEADER_SIZE {
            return Err(Error::truncated(Layer::Icmp, Self::HEADER_SIZE, data.len()));
        }

        let mut buf = data;
        let icmp_type = buf.get_u8();
        let code = buf.get_u8();
        let checksum = buf.get_u16();

        debug!(icmp_type, code, "decoded ICMP header");

        Ok(IcmpMessage {
            icmp_type,
            code,
            checksum,
            data: Bytes::copy_from_slice(buf),
        })
    }

    pub fn icmp_type(&self) -> u8 {
        self.icmp_type
    }

    pub fn description(&self) -> &'static str {
        type_description(self.icmp_type)
    }

    pub fn code(&self) -> u8 {
        self.code
    }

    pub fn checksum(&self) -> u16 {
        self.checksum
    }

    /// Bytes following the four-byte header
    pub fn data(&self) -> &Bytes {
        &self.data
    }
}

impl Report for IcmpMessage {
    fn layer(&self) -> Layer {
        Layer::Icmp
    }

    fn write_report(&self, out: &mut ReportWriter, _config: &ReportConfig) {
        out.title("ICMP");
        out.spacer();
        out.line(format_args!(
            "Type = {} ({})",
            self.icmp_type,
            self.description()
        ));
        out.line(format_args!("Code = {}", self.code));
        out.line(format_args!("Checksum = 0x{:02x}", self.checksum));
        out.spacer();
    }
}

//! UDP datagram parsing
//!
//! Reference: <https://en.wikipedia.org/wiki/User_Datagram_Protocol>

use bytes::{Buf, Bytes};
use pktanalyzer_core::{Error, Layer, ReportConfig, Result};
use tracing::debug;

use crate::hexdump::HexDump;
use crate::report::{Report, ReportWriter};

/// Decoded UDP datagram
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UdpDatagram {
    source_port: u16,
    destination_port: u16,
    /// Length (header + data) as declared in the header
    length: u16,
    checksum: u16,
    payload: Bytes,
    dump: HexDump,
}

impl UdpDatagram {
    /// UDP header size in bytes
    pub const HEADER_SIZE: usize = 8;

    /// Parse a UDP datagram from bytes
    ///
    /// Note: the declared length is reported as-is; the payload is everything
    /// after the header.
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        if data.len() < Self::HEADER_SIZE {
            return Err(Error::truncated(Layer::Udp, Self::HEADER_SIZE, data.len()));
        }

        let mut buf = data;
        let source_port = buf.get_u16();
        let destination_port = buf.get_u16();
        let length = buf.get_u16();
        let checksum = buf.get_u16();

        debug!(
            src_port = source_port,
            dst_port = destination_port,
            length,
            "decoded UDP header"
        );

        Ok(UdpDatagram {
            source_port,
            destination_port,
            length,
            checksum,
            dump: HexDump::new(buf),
            payload: Bytes::copy_from_slice(buf),
        })
    }

    pub fn source_port(&self) -> u16 {
        self.source_port
    }

    pub fn destination_port(&self) -> u16 {
        self.destination_port
    }

    pub fn length(&self) -> u16 {
        self.length
    }

    pub fn checksum(&self) -> u16 {
        self.checksum
    }

    pub fn payload(&self) -> &Bytes {
        &self.payload
    }

    pub fn hexdump(&self) -> &HexDump {
        &self.dump
    }
}

impl Report for UdpDatagram {
    fn layer(&self) -> Layer {
        Layer::Udp
    }

    fn write_report(&self, out: &mut ReportWriter, config: &ReportConfig) {
        out.title("UDP");
        out.spacer();
        out.line(format_args!("Source port = {}", self.source_port));
        out.line(format_args!("Destination port = {}", self.destination_port));
        out.line(format_args!("Length = {}", self.length));
        out.line(format_args!("Checksum = 0x{:04x}", self.checksum));
        out.spacer();
        out.preview(&self.dump, config);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DNS_QUERY: [u8; 12] = [
        0xD4, 0x31, // Source port (54321)
        0x00, 0x35, // Dest port (53)
        0x00, 0x0C, // Length (12)
        0x1F, 0x2E, // Checksum
        0x61, 0x62, 0x63, 0x64, // "abcd"
    ];

    #[test]
    fn test_udp_from_bytes() {
        let datagram = UdpDatagram::from_bytes(&DNS_QUERY).unwrap();

        assert_eq!(datagram.source_port(), 54321);
        assert_eq!(datagram.destination_port(), 53);
        assert_eq!(datagram.length(), 12);
        assert_eq!(datagram.checksum(), 0x1F2E);
        assert_eq!(&datagram.payload()[..], b"abcd");
    }

    #[test]
    fn test_header_only() {
        let datagram = UdpDatagram::from_bytes(&DNS_QUERY[..8]).unwrap();
        assert!(datagram.payload().is_empty());
        assert!(datagram.hexdump().is_empty());
    }

    #[test]
    fn test_truncated() {
        let err = UdpDatagram::from_bytes(&DNS_QUERY[..7]).unwrap_err();
        assert!(matches!(
            err,
            Error::TruncatedHeader {
                layer: Layer::Udp,
                needed: 8,
                available: 7
            }
        ));
    }

    #[test]
    fn test_report() {
        let datagram = UdpDatagram::from_bytes(&DNS_QUERY).unwrap();
        let expected = [
            "UDP: ----- UDP Header -----",
            "UDP:                       ",
            "UDP: Source port = 54321",
            "UDP: Destination port = 53",
            "UDP: Length = 12",
            "UDP: Checksum = 0x1f2e",
            "UDP:                       ",
            "UDP: Data: (first 64 bytes)",
            "UDP: 6162 6364                                  'abcd............'",
        ];
        assert_eq!(
            datagram.report(&ReportConfig::default()),
            expected.join("\n") + "\n"
        );
    }

    #[test]
    fn test_report_respects_dump_lines() {
        let mut data = DNS_QUERY[..8].to_vec();
        data.extend_from_slice(&[0x55; 64]);
        let datagram = UdpDatagram::from_bytes(&data).unwrap();

        let report = datagram.report(&ReportConfig::new(2));
        assert!(report.contains("UDP: Data: (first 32 bytes)\n"));
        assert_eq!(report.lines().filter(|l| l.contains("5555")).count(), 2);
    }
}

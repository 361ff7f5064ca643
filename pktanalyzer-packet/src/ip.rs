//! IPv4 header parsing
//!
//! This module decodes the fixed 20-byte IPv4 header, any options that follow
//! it, and slices the payload using the header's total length field.
//!
//! Reference: <https://en.wikipedia.org/wiki/IPv4>

use bytes::{Buf, Bytes};
use pktanalyzer_core::{Error, Layer, ReportConfig, Result};
use std::net::Ipv4Addr;
use tracing::{debug, trace};

use crate::report::{flag_line, Report, ReportWriter};

pub const ICMP: u8 = 1;
pub const IGMP: u8 = 2;
pub const TCP: u8 = 6;
pub const UDP: u8 = 17;
pub const ENCAP: u8 = 41;
pub const OSPF: u8 = 89;
pub const SCTP: u8 = 132;

/// Known IP protocol numbers and their labels
pub const IP_PROTOCOL_TABLE: &[(u8, &str)] = &[
    (ICMP, "ICMP"),
    (IGMP, "IGMP"),
    (TCP, "TCP"),
    (UDP, "UDP"),
    (ENCAP, "ENCAP"),
    (OSPF, "OSPF"),
    (SCTP, "SCTP"),
];

/// Label for an IP protocol number, `"UNKNOWN"` if not in the table
pub fn protocol_label(protocol: u8) -> &'static str {
    IP_PROTOCOL_TABLE
        .iter()
        .find(|(number, _)| *number == protocol)
        .map(|(_, label)| *label)
        .unwrap_or("UNKNOWN")
}

/// IP flags (top three bits of byte 6)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct IpFlags {
    /// Reserved bit (must be 0)
    pub reserved: bool,
    /// Don't Fragment flag
    pub dont_fragment: bool,
    /// More Fragments flag
    pub more_fragments: bool,
}

impl IpFlags {
    /// Convert to 3-bit value
    pub fn to_u8(self) -> u8 {
        let mut flags = 0u8;
        if self.reserved {
            flags |= 0b100;
        }
        if self.dont_fragment {
            flags |= 0b010;
        }
        if self.more_fragments {
            flags |= 0b001;
        }
        flags
    }

    /// Parse from 3-bit value
    pub fn from_u8(value: u8) -> Self {
        IpFlags {
            reserved: (value & 0b100) != 0,
            dont_fragment: (value & 0b010) != 0,
            more_fragments: (value & 0b001) != 0,
        }
    }
}

/// Meaning of the two ECN bits
pub fn ecn_meaning(ecn: u8) -> &'static str {
    match ecn & 0b11 {
        0b00 => "Non ECN-Capable Transport",
        0b10 => "ECN Capable Transport, ECT(0)",
        0b01 => "ECN Capable Transport, ECT(1)",
        _ => "Congestion Encountered, CE",
    }
}

/// Decoded IPv4 header
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ipv4Header {
    version: u8,
    /// Header length in bytes
    ihl: u8,
    dscp: u8,
    ecn: u8,
    total_length: u16,
    identification: u16,
    flags: IpFlags,
    /// Fragment offset in 8-byte units
    fragment_offset: u16,
    ttl: u8,
    protocol: u8,
    checksum: u16,
    source: Ipv4Addr,
    destination: Ipv4Addr,
    options: Option<Bytes>,
    payload: Bytes,
}

impl Ipv4Header {
    /// Minimum IPv4 header size (without options)
    pub const MIN_HEADER_SIZE: usize = 20;

    /// Parse an IPv4 header and slice its payload.
    ///
    /// The payload spans `[ihl, total_length)`. A total length shorter than
    /// the header is rejected as an invalid length; one that runs past the end
    /// of `data` is reported as a truncated header.
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        if data.len() < Self::MIN_HEADER_SIZE {
            return Err(Error::truncated(
                Layer::Ipv4,
                Self::MIN_HEADER_SIZE,
                data.len(),
            ));
        }

        let mut buf = data;

        let version_ihl = buf.get_u8();
        let version = version_ihl >> 4;
        let ihl = (version_ihl & 0x0F) << 2;
        let header_len = ihl as usize;

        if header_len < Self::MIN_HEADER_SIZE {
            return Err(Error::invalid_length(
                Layer::Ipv4,
                header_len,
                Self::MIN_HEADER_SIZE,
            ));
        }
        if data.len() < header_len {
            return Err(Error::truncated(Layer::Ipv4, header_len, data.len()));
        }

        let tos = buf.get_u8();
        let total_length = buf.get_u16();
        let identification = buf.get_u16();

        let flags_and_offset = buf.get_u16();
        let flags = IpFlags::from_u8((flags_and_offset >> 13) as u8);
        let fragment_offset = flags_and_offset & 0x1FFF;

        let ttl = buf.get_u8();
        let protocol = buf.get_u8();
        let checksum = buf.get_u16();
        let source = Ipv4Addr::from(buf.get_u32());
        let destination = Ipv4Addr::from(buf.get_u32());

        let end = total_length as usize;
        if end < header_len {
            return Err(Error::invalid_length(Layer::Ipv4, end, header_len));
        }
        if data.len() < end {
            return Err(Error::truncated(Layer::Ipv4, end, data.len()));
        }

        let options = (header_len > Self::MIN_HEADER_SIZE).then(|| {
            trace!(len = header_len - Self::MIN_HEADER_SIZE, "IPv4 options present");
            Bytes::copy_from_slice(&data[Self::MIN_HEADER_SIZE..header_len])
        });

        let header = Ipv4Header {
            version,
            ihl,
            dscp: tos >> 2,
            ecn: tos & 0b11,
            total_length,
            identification,
            flags,
            fragment_offset,
            ttl,
            protocol,
            checksum,
            source,
            destination,
            options,
            payload: Bytes::copy_from_slice(&data[header_len..end]),
        };

        debug!(
            src = %header.source,
            dst = %header.destination,
            protocol = header.protocol_label(),
            total_length,
            "decoded IPv4 header"
        );

        Ok(header)
    }

    pub fn version(&self) -> u8 {
        self.version
    }

    /// Header length in bytes
    pub fn ihl(&self) -> u8 {
        self.ihl
    }

    pub fn header_len(&self) -> usize {
        self.ihl as usize
    }

    pub fn dscp(&self) -> u8 {
        self.dscp
    }

    pub fn ecn(&self) -> u8 {
        self.ecn
    }

    pub fn ecn_meaning(&self) -> &'static str {
        ecn_meaning(self.ecn)
    }

    pub fn total_length(&self) -> u16 {
        self.total_length
    }

    pub fn identification(&self) -> u16 {
        self.identification
    }

    pub fn flags(&self) -> IpFlags {
        self.flags
    }

    pub fn flags_reserved(&self) -> bool {
        self.flags.reserved
    }

    pub fn flags_dont_fragment(&self) -> bool {
        self.flags.dont_fragment
    }

    pub fn flags_more_fragments(&self) -> bool {
        self.flags.more_fragments
    }

    /// Fragment offset in 8-byte units
    pub fn fragment_offset(&self) -> u16 {
        self.fragment_offset
    }

    pub fn ttl(&self) -> u8 {
        self.ttl
    }

    pub fn protocol(&self) -> u8 {
        self.protocol
    }

    pub fn protocol_label(&self) -> &'static str {
        protocol_label(self.protocol)
    }

    pub fn checksum(&self) -> u16 {
        self.checksum
    }

    pub fn source(&self) -> Ipv4Addr {
        self.source
    }

    pub fn destination(&self) -> Ipv4Addr {
        self.destination
    }

    pub fn has_options(&self) -> bool {
        self.options.is_some()
    }

    pub fn options(&self) -> Option<&Bytes> {
        self.options.as_ref()
    }

    pub fn payload(&self) -> &Bytes {
        &self.payload
    }

    pub fn into_payload(self) -> Bytes {
        self.payload
    }
}

impl Report for Ipv4Header {
    fn layer(&self) -> Layer {
        Layer::Ipv4
    }

    fn write_report(&self, out: &mut ReportWriter, _config: &ReportConfig) {
        out.title("IP");
        out.spacer();
        out.line(format_args!("Version = {}", self.version));
        out.line(format_args!("Header length = {} bytes", self.ihl));
        out.line(format_args!(
            "Differentiated Services Code Point: 0x{:02x}",
            self.dscp
        ));
        out.line(format_args!(
            "Explicit Congestion Notification = 0b{:02b}",
            self.ecn
        ));
        out.line(format_args!(
            "      0b{:02b} = {}",
            self.ecn,
            self.ecn_meaning()
        ));
        out.line(format_args!("Total length = {} bytes", self.total_length));
        out.line(format_args!("Identification = {}", self.identification));
        out.line(format_args!("Flags = 0x{:02x}", self.flags.to_u8()));
        out.line(flag_line(
            ".x.. ....",
            self.flags.dont_fragment,
            "do not fragment",
            "OK to fragment",
        ));
        out.line(flag_line(
            "..x. ....",
            self.flags.more_fragments,
            "more fragment",
            "last fragment",
        ));
        out.line(format_args!(
            "Fragment offset = {} bytes",
            self.fragment_offset
        ));
        out.line(format_args!("Time to live = {} seconds/hops", self.ttl));
        out.line(format_args!(
            "Protocol = {} ({})",
            self.protocol,
            self.protocol_label()
        ));
        out.line(format_args!("Header checksum = 0x{:04x}", self.checksum));
        out.line(format_args!("Source address = {}", self.source));
        out.line(format_args!("Destination address = {}", self.destination));
        if self.has_options() {
            out.line("Options present");
        } else {
            out.line("No options");
        }
        out.blank();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bytes::{BufMut, BytesMut};

    fn build(version_ihl: u8, options: &[u8], total_length: u16, payload: &[u8]) -> Vec<u8> {
        let mut buf = BytesMut::new();
        buf.put_u8(version_ihl);
        buf.put_u8(0b1011_1010); // DSCP 46, ECN 0b10
        buf.put_u16(total_length);
        buf.put_u16(0x1c46);
        buf.put_u16(0b010 << 13 | 0x0102); // DF, offset 258
        buf.put_u8(64);
        buf.put_u8(UDP);
        buf.put_u16(0xb1e6);
        buf.put_slice(&[192, 168, 0, 1]);
        buf.put_slice(&[10, 0, 0, 254]);
        buf.put_slice(options);
        buf.put_slice(payload);
        buf.to_vec()
    }

    #[test]
    fn test_protocol_table() {
        assert_eq!(protocol_label(1), "ICMP");
        assert_eq!(protocol_label(2), "IGMP");
        assert_eq!(protocol_label(6), "TCP");
        assert_eq!(protocol_label(17), "UDP");
        assert_eq!(protocol_label(41), "ENCAP");
        assert_eq!(protocol_label(89), "OSPF");
        assert_eq!(protocol_label(132), "SCTP");

        let known = IP_PROTOCOL_TABLE.len();
        let unknown = (0..=u8::MAX)
            .filter(|p| protocol_label(*p) == "UNKNOWN")
            .count();
        assert_eq!(known + unknown, 256);
    }

    #[test]
    fn test_ip_flags() {
        let flags = IpFlags::from_u8(0b010);
        assert!(!flags.reserved);
        assert!(flags.dont_fragment);
        assert!(!flags.more_fragments);
        assert_eq!(flags.to_u8(), 0b010);
    }

    #[test]
    fn test_ipv4_without_options() {
        let data = build(0x45, &[], 24, &[1, 2, 3, 4]);
        let header = Ipv4Header::from_bytes(&data).unwrap();

        assert_eq!(header.version(), 4);
        assert_eq!(header.ihl(), 20);
        assert_eq!(header.dscp(), 46);
        assert_eq!(header.ecn(), 0b10);
        assert_eq!(header.total_length(), 24);
        assert_eq!(header.identification(), 0x1c46);
        assert!(header.flags_dont_fragment());
        assert!(!header.flags_more_fragments());
        assert_eq!(header.fragment_offset(), 258);
        assert_eq!(header.ttl(), 64);
        assert_eq!(header.protocol_label(), "UDP");
        assert_eq!(header.checksum(), 0xb1e6);
        assert_eq!(header.source().to_string(), "192.168.0.1");
        assert_eq!(header.destination().to_string(), "10.0.0.254");
        assert!(header.options().is_none());
        assert_eq!(&header.payload()[..], &[1, 2, 3, 4]);
    }

    #[test]
    fn test_ipv4_with_options() {
        let data = build(0x46, &[0x94, 0x04, 0x00, 0x00], 26, &[9, 8]);
        let header = Ipv4Header::from_bytes(&data).unwrap();

        assert_eq!(header.ihl(), 24);
        assert_eq!(header.options().map(|o| o.len()), Some(4));
        assert_eq!(&header.payload()[..], &[9, 8]);
    }

    #[test]
    fn test_payload_stops_at_total_length() {
        // Trailing Ethernet padding is not part of the IP payload
        let mut data = build(0x45, &[], 22, &[7, 7]);
        data.extend_from_slice(&[0; 6]);

        let header = Ipv4Header::from_bytes(&data).unwrap();
        assert_eq!(&header.payload()[..], &[7, 7]);
    }

    #[test]
    fn test_truncated_header() {
        let err = Ipv4Header::from_bytes(&[0x45; 19]).unwrap_err();
        assert!(matches!(
            err,
            Error::TruncatedHeader {
                layer: Layer::Ipv4,
                needed: 20,
                available: 19
            }
        ));
    }

    #[test]
    fn test_ihl_below_minimum() {
        let data = build(0x44, &[], 20, &[]);
        let err = Ipv4Header::from_bytes(&data).unwrap_err();
        assert!(matches!(
            err,
            Error::InvalidHeaderLength {
                length: 16,
                minimum: 20,
                ..
            }
        ));
    }

    #[test]
    fn test_options_past_buffer() {
        let data = build(0x4F, &[], 60, &[]);
        let err = Ipv4Header::from_bytes(&data).unwrap_err();
        assert!(matches!(
            err,
            Error::TruncatedHeader {
                needed: 60,
                available: 20,
                ..
            }
        ));
    }

    #[test]
    fn test_total_length_past_buffer() {
        let data = build(0x45, &[], 100, &[0; 10]);
        let err = Ipv4Header::from_bytes(&data).unwrap_err();
        assert!(matches!(
            err,
            Error::TruncatedHeader {
                needed: 100,
                available: 30,
                ..
            }
        ));
    }

    #[test]
    fn test_total_length_below_header() {
        let data = build(0x45, &[], 12, &[]);
        let err = Ipv4Header::from_bytes(&data).unwrap_err();
        assert!(matches!(
            err,
            Error::InvalidHeaderLength {
                length: 12,
                minimum: 20,
                ..
            }
        ));
    }

    #[test]
    fn test_report() {
        let data = build(0x45, &[], 20, &[]);
        let header = Ipv4Header::from_bytes(&data).unwrap();
        let report = header.report(&ReportConfig::default());

        let expected = [
            "IP: ----- IP Header -----",
            "IP:                      ",
            "IP: Version = 4",
            "IP: Header length = 20 bytes",
            "IP: Differentiated Services Code Point: 0x2e",
            "IP: Explicit Congestion Notification = 0b10",
            "IP:       0b10 = ECN Capable Transport, ECT(0)",
            "IP: Total length = 20 bytes",
            "IP: Identification = 7238",
            "IP: Flags = 0x02",
            "IP:       .1.. .... = do not fragment",
            "IP:       ..0. .... = last fragment",
            "IP: Fragment offset = 258 bytes",
            "IP: Time to live = 64 seconds/hops",
            "IP: Protocol = 17 (UDP)",
            "IP: Header checksum = 0xb1e6",
            "IP: Source address = 192.168.0.1",
            "IP: Destination address = 10.0.0.254",
            "IP: No options",
            "IP:",
        ];
        assert_eq!(report, expected.join("\n") + "\n");
    }

    #[test]
    fn test_report_with_options() {
        let data = build(0x46, &[0x94, 0x04, 0x00, 0x00], 24, &[]);
        let header = Ipv4Header::from_bytes(&data).unwrap();
        let report = header.report(&ReportConfig::default());

        assert!(report.contains("IP: Header length = 24 bytes\n"));
        assert!(report.ends_with("IP: Options present\nIP:\n"));
        assert!(!report.contains("No options"));
    }

    #[test]
    fn test_ecn_meanings() {
        assert_eq!(ecn_meaning(0b00), "Non ECN-Capable Transport");
        assert_eq!(ecn_meaning(0b01), "ECN Capable Transport, ECT(1)");
        assert_eq!(ecn_meaning(0b10), "ECN Capable Transport, ECT(0)");
        assert_eq!(ecn_meaning(0b11), "Congestion Encountered, CE");
    }
}

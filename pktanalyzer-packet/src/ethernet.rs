//! Ethernet II frame parsing
//!
//! Decodes the 14-byte Ethernet header, or 18 bytes when an 802.1Q VLAN tag
//! sits between the source address and the EtherType. Trailing padding and
//! the frame check sequence are left in the payload.
//!
//! Reference: <https://en.wikipedia.org/wiki/Ethernet_frame>

use bytes::{Buf, Bytes};
use pktanalyzer_core::{Error, Layer, MacAddr, ReportConfig, Result};
use tracing::{debug, trace};

use crate::ethertype::{self, EtherType};
use crate::report::{Report, ReportWriter};

/// Decoded Ethernet II frame
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EthernetFrame {
    destination: MacAddr,
    source: MacAddr,
    ethertype: EtherType,
    vlan_tci: Option<u16>,
    frame_length: usize,
    payload: Bytes,
}

impl EthernetFrame {
    /// Ethernet header size (dst + src + type/length)
    pub const HEADER_SIZE: usize = 14;

    /// Header size with an 802.1Q tag
    pub const VLAN_HEADER_SIZE: usize = 18;

    /// Parse an Ethernet frame from bytes
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        if data.len() < Self::HEADER_SIZE {
            return Err(Error::truncated(
                Layer::Ethernet,
                Self::HEADER_SIZE,
                data.len(),
            ));
        }

        let mut buf = data;
        let mut mac = [0u8; 6];
        buf.copy_to_slice(&mut mac);
        let destination = MacAddr(mac);
        buf.copy_to_slice(&mut mac);
        let source = MacAddr(mac);

        let type_or_tpid = buf.get_u16();
        let (vlan_tci, value, header_len) = if type_or_tpid == ethertype::VLAN_TAG {
            if data.len() < Self::VLAN_HEADER_SIZE {
                return Err(Error::truncated(
                    Layer::Ethernet,
                    Self::VLAN_HEADER_SIZE,
                    data.len(),
                ));
            }
            let tci = buf.get_u16();
            trace!(tci, "802.1Q tag present");
            (Some(tci), buf.get_u16(), Self::VLAN_HEADER_SIZE)
        } else {
            (None, type_or_tpid, Self::HEADER_SIZE)
        };

        let frame = EthernetFrame {
            destination,
            source,
            ethertype: EtherType::new(value),
            vlan_tci,
            frame_length: data.len(),
            payload: Bytes::copy_from_slice(&data[header_len..]),
        };

        debug!(
            dst = %frame.destination,
            src = %frame.source,
            ethertype = %frame.ethertype,
            vlan = frame.vlan_present(),
            "decoded Ethernet header"
        );

        Ok(frame)
    }

    pub fn destination(&self) -> MacAddr {
        self.destination
    }

    pub fn source(&self) -> MacAddr {
        self.source
    }

    pub fn ethertype(&self) -> EtherType {
        self.ethertype
    }

    pub fn ethertype_value(&self) -> u16 {
        self.ethertype.value()
    }

    pub fn ethertype_label(&self) -> &'static str {
        self.ethertype.label()
    }

    /// Whether an 802.1Q tag was present
    pub fn vlan_present(&self) -> bool {
        self.vlan_tci.is_some()
    }

    /// Tag control information of the 802.1Q tag
    pub fn vlan_tci(&self) -> Option<u16> {
        self.vlan_tci
    }

    /// VLAN identifier (low 12 bits of the TCI)
    pub fn vlan_id(&self) -> Option<u16> {
        self.vlan_tci.map(|tci| tci & 0x0FFF)
    }

    /// Total number of captured bytes
    pub fn frame_length(&self) -> usize {
        self.frame_length
    }

    /// Offset of the payload within the frame
    pub fn header_len(&self) -> usize {
        if self.vlan_present() {
            Self::VLAN_HEADER_SIZE
        } else {
            Self::HEADER_SIZE
        }
    }

    pub fn payload(&self) -> &Bytes {
        &self.payload
    }

    pub fn into_payload(self) -> Bytes {
        self.payload
    }
}

impl Report for EthernetFrame {
    fn layer(&self) -> Layer {
        Layer::Ethernet
    }

    fn write_report(&self, out: &mut ReportWriter, _config: &ReportConfig) {
        out.title("Ether");
        out.blank();
        out.line(format_args!("Packet size = {} bytes", self.frame_length));
        out.line(format_args!("Destination = {},", self.destination));
        out.line(format_args!("Source      = {},", self.source));
        out.line(format_args!("Ethertype = {}", self.ethertype));
        out.blank();
    }
}

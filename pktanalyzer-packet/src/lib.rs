//! Packet decoding library for pktanalyzer
//!
//! This crate decodes a captured Ethernet frame layer by layer and renders
//! each layer as a fixed-format diagnostic report:
//!
//! - **Ethernet II** frames, with optional 802.1Q VLAN tag
//! - **IPv4** headers, with options
//! - **TCP**, **UDP** and **ICMP** headers
//!
//! # Architecture
//!
//! - [`ethertype`] - EtherType classification table
//! - [`hexdump`] - Hex/ASCII payload dumps
//! - [`ethernet`] - Ethernet frame decoding
//! - [`ip`] - IPv4 header decoding and the IP protocol table
//! - [`tcp`], [`udp`], [`icmp`] - Transport header decoding
//! - [`report`] - The [`Report`] trait and tagged line writer
//! - [`dissect`] - The layered pipeline tying the decoders together
//!
//! Each decoder is a pure function from a byte slice to an owned value or an
//! [`Error`](pktanalyzer_core::Error). Decoded values hold copies of their
//! payload, so nothing borrows from the caller's buffer after returning.
//!
//! # Quick Start
//!
//! ```rust
//! use pktanalyzer_core::ReportConfig;
//! use pktanalyzer_packet::dissect;
//!
//! let mut frame = vec![
//!     0xAA, 0xBB, 0xCC, 0xDD, 0xEE, 0xFF, // dst
//!     0x00, 0x11, 0x22, 0x33, 0x44, 0x55, // src
//!     0x08, 0x06, // ARP
//! ];
//! frame.resize(60, 0);
//!
//! let dissection = dissect(&frame).unwrap();
//! for report in dissection.reports(&ReportConfig::default()) {
//!     print!("{}", report);
//! }
//! ```

pub mod dissect;
pub mod ethernet;
pub mod ethertype;
pub mod hexdump;
pub mod icmp;
pub mod ip;
pub mod report;
pub mod tcp;
pub mod udp;


// Re-export commonly used types for convenience
pub use dissect::{dissect, DecodedLayer, Dissection};
pub use ethernet::EthernetFrame;
pub use ethertype::EtherType;
pub use hexdump::{HexDump, HexDumpLine};
pub use icmp::IcmpMessage;
pub use ip::{IpFlags, Ipv4Header};
pub use report::{Report, ReportWriter};
pub use tcp::{TcpFlags, TcpSegment};
pub use udp::UdpDatagram;

//! Layered frame dissection
//!
//! Runs the decoders in order, feeding each layer's payload to the next:
//! Ethernet, then IPv4 when the EtherType label is `"IP"`, then TCP, UDP or
//! ICMP according to the IPv4 protocol number. A failure at any layer aborts
//! the whole dissection.

use pktanalyzer_core::{Layer, ReportConfig, Result};
use tracing::{debug, warn};

use crate::ethernet::EthernetFrame;
use crate::ethertype;
use crate::icmp::IcmpMessage;
use crate::ip::{self, Ipv4Header};
use crate::report::Report;
use crate::tcp::TcpSegment;
use crate::udp::UdpDatagram;

/// Notice emitted when IPv4 carries a protocol without a decoder
pub const UNHANDLED_NOTICE: &str = "*** Unhandled Packet type inside IPv4 ***";

/// One decoded protocol layer
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DecodedLayer {
    Ethernet(EthernetFrame),
    Ipv4(Ipv4Header),
    Tcp(TcpSegment),
    Udp(UdpDatagram),
    Icmp(IcmpMessage),
}

impl DecodedLayer {
    pub fn as_report(&self) -> &dyn Report {
        match self {
            DecodedLayer::Ethernet(frame) => frame,
            DecodedLayer::Ipv4(header) => header,
            DecodedLayer::Tcp(segment) => segment,
            DecodedLayer::Udp(datagram) => datagram,
            DecodedLayer::Icmp(message) => message,
        }
    }

    pub fn layer(&self) -> Layer {
        self.as_report().layer()
    }
}

/// Result of dissecting one frame
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dissection {
    layers: Vec<DecodedLayer>,
    unhandled_protocol: Option<u8>,
}

impl Dissection {
    /// Decoded layers, outermost first
    pub fn layers(&self) -> &[DecodedLayer] {
        &self.layers
    }

    pub fn ethernet(&self) -> Option<&EthernetFrame> {
        self.layers.iter().find_map(|layer| match layer {
            DecodedLayer::Ethernet(frame) => Some(frame),
            _ => None,
        })
    }

    pub fn ipv4(&self) -> Option<&Ipv4Header> {
        self.layers.iter().find_map(|layer| match layer {
            DecodedLayer::Ipv4(header) => Some(header),
            _ => None,
        })
    }

    /// The TCP, UDP or ICMP layer, if one was decoded
    pub fn transport(&self) -> Option<&DecodedLayer> {
        self.layers.iter().find(|layer| {
            matches!(
                layer,
                DecodedLayer::Tcp(_) | DecodedLayer::Udp(_) | DecodedLayer::Icmp(_)
            )
        })
    }

    /// IP protocol number carried by IPv4 that has no decoder
    pub fn unhandled_protocol(&self) -> Option<u8> {
        self.unhandled_protocol
    }

    /// Notice to print after the reports when IPv4 carried an unhandled protocol
    pub fn unhandled(&self) -> Option<&'static str> {
        self.unhandled_protocol.map(|_| UNHANDLED_NOTICE)
    }

    /// One text report per decoded layer, outermost first
    pub fn reports(&self, config: &ReportConfig) -> Vec<String> {
        self.layers
            .iter()
            .map(|layer| layer.as_report().report(config))
            .collect()
    }
}

/// Decode every layer of a captured Ethernet frame
pub fn dissect(frame: &[u8]) -> Result<Dissection> {
    dissect_layers(frame).inspect_err(|err| warn!(%err, "dissection aborted"))
}

fn dissect_layers(frame: &[u8]) -> Result<Dissection> {
    let mut layers = Vec::with_capacity(3);
    let mut unhandled_protocol = None;

    let ethernet = EthernetFrame::from_bytes(frame)?;
    let is_ip = ethernet.ethertype_value() == ethertype::IPV4;
    let ip_input = ethernet.payload().clone();
    layers.push(DecodedLayer::Ethernet(ethernet));

    if is_ip {
        let header = Ipv4Header::from_bytes(&ip_input)?;
        let protocol = header.protocol();
        let transport_input = header.payload().clone();
        layers.push(DecodedLayer::Ipv4(header));

        match protocol {
            ip::TCP => layers.push(DecodedLayer::Tcp(TcpSegment::from_bytes(
                &transport_input,
            )?)),
            ip::UDP => layers.push(DecodedLayer::Udp(UdpDatagram::from_bytes(
                &transport_input,
            )?)),
            ip::ICMP => layers.push(DecodedLayer::Icmp(IcmpMessage::from_bytes(
                &transport_input,
            )?)),
            other => {
                debug!(
                    protocol = other,
                    label = ip::protocol_label(other),
                    "no decoder for IPv4 payload"
                );
                unhandled_protocol = Some(other);
            }
        }
    }

    Ok(Dissection {
        layers,
        unhandled_protocol,
    })
}

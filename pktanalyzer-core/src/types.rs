//! Common types used throughout pktanalyzer

use std::fmt;

/// MAC Address (6 bytes)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MacAddr(pub [u8; 6]);

impl MacAddr {
    /// Create a new MAC address
    pub const fn new(bytes: [u8; 6]) -> Self {
        Self(bytes)
    }

    /// Get bytes as slice
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Convert to array
    pub fn octets(&self) -> [u8; 6] {
        self.0
    }
}

impl fmt::Display for MacAddr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:02x}:{:02x}:{:02x}:{:02x}:{:02x}:{:02x}",
            self.0[0], self.0[1], self.0[2], self.0[3], self.0[4], self.0[5]
        )
    }
}

impl From<[u8; 6]> for MacAddr {
    fn from(bytes: [u8; 6]) -> Self {
        MacAddr(bytes)
    }
}

/// Protocol layer handled by a decoder
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Layer {
    Ethernet,
    Ipv4,
    Tcp,
    Udp,
    Icmp,
}

impl Layer {
    /// Prefix used on every line of the layer's report
    pub const fn tag(self) -> &'static str {
        match self {
            Layer::Ethernet => "ETHER",
            Layer::Ipv4 => "IP",
            Layer::Tcp => "TCP",
            Layer::Udp => "UDP",
            Layer::Icmp => "ICMP",
        }
    }
}

impl fmt::Display for Layer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Layer::Ethernet => write!(f, "Ethernet"),
            Layer::Ipv4 => write!(f, "IPv4"),
            Layer::Tcp => write!(f, "TCP"),
            Layer::Udp => write!(f, "UDP"),
            Layer::Icmp => write!(f, "ICMP"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mac_display_lowercase() {
        let mac = MacAddr::new([0xAA, 0xBB, 0xCC, 0xDD, 0xEE, 0xFF]);
        assert_eq!(mac.to_string(), "aa:bb:cc:dd:ee:ff");
    }

    #[test]
    fn test_layer_tags() {
        assert_eq!(Layer::Ethernet.tag(), "ETHER");
        assert_eq!(Layer::Ipv4.tag(), "IP");
        assert_eq!(Layer::Tcp.tag(), "TCP");
        assert_eq!(Layer::Udp.tag(), "UDP");
        assert_eq!(Layer::Icmp.tag(), "ICMP");
    }
}

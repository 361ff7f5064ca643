//! EtherType classification
//!
//! The 16-bit field after the MAC addresses is either a legacy frame length
//! (0..=1500), an unassigned gap (1501..=1535), or a protocol identifier
//! (1536 and above). Protocol identifiers are resolved against a fixed table.
//!
//! Reference: <https://en.wikipedia.org/wiki/EtherType#Values>

use std::fmt;

/// Largest value interpreted as a frame length
pub const MAX_LENGTH_VALUE: u16 = 1500;

/// First value interpreted as a protocol identifier
pub const MIN_ETHERTYPE_VALUE: u16 = 1536;

pub const LABEL_LENGTH: &str = "LENGTH";
pub const LABEL_UNDEFINED: &str = "UNDEFINED";
pub const LABEL_UNKNOWN: &str = "UNKNOWN";

/// IPv4
pub const IPV4: u16 = 0x0800;

/// 802.1Q VLAN tag protocol identifier
pub const VLAN_TAG: u16 = 0x8100;

/// Known EtherType codes and their labels
pub const ETHERTYPE_TABLE: &[(u16, &str)] = &[
    (0x0800, "IP"),
    (0x0806, "ARP"),
    (0x0842, "WAKE_ON_LAN"),
    (0x22F0, "AVTP"),
    (0x22F3, "IETF_TRILL_PROTO"),
    (0x22EA, "STREAM_RES_PROTO"),
    (0x6002, "DEC_MOP_RC"),
    (0x6003, "DECNET_IV_DNA"),
    (0x6004, "DEC_LAT"),
    (0x8035, "RARP"),
    (0x809B, "APPLETALK"),
    (0x80F3, "AARP"),
    (0x8100, "VLAN_TAG"),
    (0x8102, "SLPP"),
    (0x8103, "VLACP"),
    (0x8137, "IPX"),
    (0x8204, "QNX_QNET"),
    (0x86DD, "IPV6"),
    (0x8808, "ETH_FLOW_CONT"),
    (0x8809, "ETH_SLOW_PROTO"),
    (0x8819, "COBRANET"),
    (0x8847, "MPLS_UNICAST"),
    (0x8848, "MPLS_MULTICAST"),
    (0x8863, "PPPOE_DISCOVERY"),
    (0x8864, "PPPOE_SESSION"),
    (0x887B, "HOMEPLUG"),
    (0x888E, "EAP_LAN"),
    (0x8892, "PROFINET"),
    (0x889A, "HYPERSCI"),
    (0x88A2, "ATA_ETH"),
    (0x88A4, "ETHCAT_PROTO"),
    (0x88A8, "VLAN_S_TAG"),
    (0x88AB, "ETH_POWERLINK"),
    (0x88B8, "GOOSE"),
    (0x88B9, "GSE"),
    (0x88BA, "SV"),
    (0x88BF, "MIKROTIK_RMON"),
    (0x88CC, "LLDP"),
    (0x88CD, "SERCOS_III"),
    (0x88E1, "HOMEPLUG_PHY"),
    (0x88E3, "MR_PROTO"),
    (0x88E5, "MAC_SEC"),
    (0x88E7, "PBB"),
    (0x88F7, "PTP"),
    (0x88F8, "NC_SI"),
    (0x88FB, "PRP"),
    (0x8902, "CFM/OAM"),
    (0x8906, "FCOE"),
    (0x8914, "FCOE_INIT_PROTO"),
    (0x8915, "ROCE"),
    (0x891D, "TTETH_PROTO_CONT_FRAME"),
    (0x893A, "IEEE_1905_PROTO"),
    (0x892F, "HSR"),
    (0x9000, "ETH_CONF_TESTING_PROTO"),
    (0xF1C1, "REDUNDANCY_TAG"),
];

/// Resolve the label for a raw EtherType/length value
pub fn classify(value: u16) -> &'static str {
    match value {
        0..=MAX_LENGTH_VALUE => LABEL_LENGTH,
        v if v < MIN_ETHERTYPE_VALUE => LABEL_UNDEFINED,
        v => ETHERTYPE_TABLE
            .iter()
            .find(|(code, _)| *code == v)
            .map(|(_, label)| *label)
            .unwrap_or(LABEL_UNKNOWN),
    }
}

/// A classified EtherType value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EtherType {
    value: u16,
    label: &'static str,
}

impl EtherType {
    pub fn new(value: u16) -> Self {
        EtherType {
            value,
            label: classify(value),
        }
    }

    pub fn value(&self) -> u16 {
        self.value
    }

    pub fn label(&self) -> &'static str {
        self.label
    }
}

impl From<u16> for EtherType {
    fn from(value: u16) -> Self {
        EtherType::new(value)
    }
}

impl fmt::Display for EtherType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04x} ({})", self.value, self.label)
    }
}

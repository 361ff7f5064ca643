//! Example: Dissecting a captured DNS query
//!
//! This example decodes a complete Ethernet + IPv4 + UDP frame with the
//! pktanalyzer-packet crate and prints the per-layer reports.

use pktanalyzer_core::ReportConfig;
use pktanalyzer_packet::{dissect, DecodedLayer};

fn main() {
    let frame: Vec<u8> = vec![
        // Ethernet
        0xAA, 0xBB, 0xCC, 0xDD, 0xEE, 0xFF, // dst
        0x00, 0x11, 0x22, 0x33, 0x44, 0x55, // src
        0x08, 0x00, // IPv4
        // IPv4
        0x45, 0x00, 0x00, 0x28, // version/IHL, TOS, total length 40
        0x12, 0x34, 0x40, 0x00, // identification, DF
        0x40, 0x11, 0x00, 0x00, // TTL 64, UDP, checksum
        0xC0, 0xA8, 0x01, 0x64, // 192.168.1.100
        0xC0, 0xA8, 0x01, 0x01, // 192.168.1.1
        // UDP
        0xD4, 0x31, 0x00, 0x35, // 54321 -> 53
        0x00, 0x14, 0x00, 0x00, // length 20, checksum
        // DNS header
        0x12, 0x34, 0x01, 0x00, 0x00, 0x01, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
    ];

    let dissection = match dissect(&frame) {
        Ok(dissection) => dissection,
        Err(e) => {
            eprintln!("Failed to dissect frame: {}", e);
            return;
        }
    };

    for report in dissection.reports(&ReportConfig::default()) {
        print!("{}", report);
    }

    if let Some(DecodedLayer::Udp(udp)) = dissection.transport() {
        println!();
        println!("UDP payload: {} bytes", udp.payload().len());
    }
}

//! TCP segment parsing
//!
//! This module decodes the TCP header (ports, sequence numbers, data offset,
//! control flags) and keeps a hex dump of the segment payload for reports.
//!
//! Reference: <https://en.wikipedia.org/wiki/Transmission_Control_Protocol>

use bytes::{Buf, Bytes};
use pktanalyzer_core::{Error, Layer, ReportConfig, Result};
use tracing::debug;

use crate::hexdump::HexDump;
use crate::report::{flag_line, Report, ReportWriter};

/// TCP control flags (byte 13)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TcpFlags {
    /// FIN - No more data from sender
    pub fin: bool,
    /// SYN - Synchronize sequence numbers
    pub syn: bool,
    /// RST - Reset the connection
    pub rst: bool,
    /// PSH - Push function
    pub psh: bool,
    /// ACK - Acknowledgment field is significant
    pub ack: bool,
    /// URG - Urgent pointer field is significant
    pub urg: bool,
    /// ECE - ECN-Echo
    pub ece: bool,
    /// CWR - Congestion Window Reduced
    pub cwr: bool,
}

impl TcpFlags {
    /// Convert flags to u8 value
    pub fn to_u8(self) -> u8 {
        [
            self.fin, self.syn, self.rst, self.psh, self.ack, self.urg, self.ece, self.cwr,
        ]
        .iter()
        .enumerate()
        .filter(|(_, set)| **set)
        .fold(0u8, |acc, (bit, _)| acc | (1 << bit))
    }

    /// Parse flags from u8 value
    pub fn from_u8(value: u8) -> Self {
        TcpFlags {
            fin: (value & 0b00000001) != 0,
            syn: (value & 0b00000010) != 0,
            rst: (value & 0b00000100) != 0,
            psh: (value & 0b00001000) != 0,
            ack: (value & 0b00010000) != 0,
            urg: (value & 0b00100000) != 0,
            ece: (value & 0b01000000) != 0,
            cwr: (value & 0b10000000) != 0,
        }
    }
}

/// Decoded TCP segment
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TcpSegment {
    source_port: u16,
    destination_port: u16,
    sequence_number: u32,
    acknowledgment_number: u32,
    /// Header length in 32-bit words
    data_offset: u8,
    /// ECN-nonce concealment protection (low bit of byte 12)
    ns: bool,
    flags: TcpFlags,
    window_size: u16,
    checksum: u16,
    urgent_pointer: u16,
    payload: Bytes,
    dump: HexDump,
}

impl TcpSegment {
    /// Minimum TCP header size (without options)
    pub const MIN_HEADER_SIZE: usize = 20;

    /// Parse a TCP segment from bytes
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        if data.len() < Self::MIN_HEADER_SIZE {
            return Err(Error::truncated(
                Layer::Tcp,
                Self::MIN_HEADER_SIZE,
                data.len(),
            ));
        }

        let mut buf = data;
        let source_port = buf.get_u16();
        let destination_port = buf.get_u16();
        let sequence_number = buf.get_u32();
        let acknowledgment_number = buf.get_u32();

        let offset_and_reserved = buf.get_u8();
        let data_offset = offset_and_reserved >> 4;
        let ns = offset_and_reserved & 0b1 != 0;

        let flags = TcpFlags::from_u8(buf.get_u8());
        let window_size = buf.get_u16();
        let checksum = buf.get_u16();
        let urgent_pointer = buf.get_u16();

        let header_len = (data_offset as usize) * 4;
        if header_len < Self::MIN_HEADER_SIZE {
            return Err(Error::invalid_length(
                Layer::Tcp,
                header_len,
                Self::MIN_HEADER_SIZE,
            ));
        }
        if data.len() < header_len {
            return Err(Error::truncated(Layer::Tcp, header_len, data.len()));
        }

        let payload = &data[header_len..];

        debug!(
            src_port = source_port,
            dst_port = destination_port,
            seq = sequence_number,
            flags = flags.to_u8(),
            payload_len = payload.len(),
            "decoded TCP header"
        );

        Ok(TcpSegment {
            source_port,
            destination_port,
            sequence_number,
            acknowledgment_number,
            data_offset,
            ns,
            flags,
            window_size,
            checksum,
            urgent_pointer,
            dump: HexDump::new(payload),
            payload: Bytes::copy_from_slice(payload),
        })
    }

    pub fn source_port(&self) -> u16 {
        self.source_port
    }

    pub fn destination_port(&self) -> u16 {
        self.destination_port
    }

    pub fn sequence_number(&self) -> u32 {
        self.sequence_number
    }

    pub fn acknowledgment_number(&self) -> u32 {
        self.acknowledgment_number
    }

    /// Header length in 32-bit words
    pub fn data_offset(&self) -> u8 {
        self.data_offset
    }

    /// Get the header size in bytes
    pub fn header_len(&self) -> usize {
        (self.data_offset as usize) * 4
    }

    pub fn has_options(&self) -> bool {
        self.header_len() > Self::MIN_HEADER_SIZE
    }

    pub fn flags(&self) -> TcpFlags {
        self.flags
    }

    pub fn fin(&self) -> bool {
        self.flags.fin
    }

    pub fn syn(&self) -> bool {
        self.flags.syn
    }

    pub fn rst(&self) -> bool {
        self.flags.rst
    }

    pub fn psh(&self) -> bool {
        self.flags.psh
    }

    pub fn ack(&self) -> bool {
        self.flags.ack
    }

    pub fn urg(&self) -> bool {
        self.flags.urg
    }

    pub fn ece(&self) -> bool {
        self.flags.ece
    }

    pub fn cwr(&self) -> bool {
        self.flags.cwr
    }

    pub fn ns(&self) -> bool {
        self.ns
    }

    pub fn window_size(&self) -> u16 {
        self.window_size
    }

    pub fn checksum(&self) -> u16 {
        self.checksum
    }

    pub fn urgent_pointer(&self) -> u16 {
        self.urgent_pointer
    }

    pub fn payload(&self) -> &Bytes {
        &self.payload
    }

    pub fn hexdump(&self) -> &HexDump {
        &self.dump
    }
}

impl Report for TcpSegment {
    fn layer(&self) -> Layer {
        Layer::Tcp
    }

    fn write_report(&self, out: &mut ReportWriter, config: &ReportConfig) {
        out.title("TCP");
        out.spacer();
        out.line(format_args!("Source port = {}", self.source_port));
        out.line(format_args!("Destination port = {}", self.destination_port));
        out.line(format_args!("Sequence number = {}", self.sequence_number));
        out.line(format_args!(
            "Acknowledgement number = {}",
            self.acknowledgment_number
        ));
        out.line(format_args!("Data offset = {} bytes", self.data_offset));
        out.line(format_args!("Header Length = {} bytes", self.header_len()));
        out.line(format_args!("Flags = 0x{:02x}", self.flags.to_u8()));

        let f = self.flags;
        out.line(flag_line("..x. ....", f.urg, "Urgent pointer", "No Urgent pointer"));
        out.line(flag_line("...x ....", f.ack, "Acknowledgement", "No acknowledgement"));
        out.line(flag_line(".... x...", f.psh, "Push", "No push"));
        out.line(flag_line(".... .x..", f.rst, "Reset", "No reset"));
        out.line(flag_line(".... ..x.", f.syn, "Syn", "No syn"));
        out.line(flag_line(".... ...x", f.fin, "Fin", "No fin"));

        out.line(format_args!("Window = {}", self.window_size));
        out.line(format_args!("Checksum = 0x{:04x}", self.checksum));
        out.line(format_args!("Urgent pointer = {}", self.urgent_pointer));
        if self.has_options() {
            out.line("Options present");
        } else {
            out.line("No options");
        }
        out.spacer();
        out.preview(&self.dump, config);
    }
}

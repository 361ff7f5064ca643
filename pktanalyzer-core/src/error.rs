//! Error types for pktanalyzer

use std::path::PathBuf;
use thiserror::Error;

use crate::types::Layer;

/// Result type alias for pktanalyzer operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for pktanalyzer
#[derive(Error, Debug)]
pub enum Error {
    /// Buffer too short for a layer's header, or a computed bound runs past it
    #[error("{layer} header truncated: needed {needed} bytes, {available} available")]
    TruncatedHeader {
        layer: Layer,
        needed: usize,
        available: usize,
    },

    /// A header length field is below its protocol minimum
    #[error("{layer} header length {length} is below the minimum of {minimum} bytes")]
    InvalidHeaderLength {
        layer: Layer,
        length: usize,
        minimum: usize,
    },

    /// I/O error while reading a capture
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Input file does not exist
    #[error("Could not find the specified file: {}", .0.display())]
    FileNotFound(PathBuf),
}

impl Error {
    /// Create a truncated-header error
    pub fn truncated(layer: Layer, needed: usize, available: usize) -> Self {
        Error::TruncatedHeader {
            layer,
            needed,
            available,
        }
    }

    /// Create an invalid-header-length error
    pub fn invalid_length(layer: Layer, length: usize, minimum: usize) -> Self {
        Error::InvalidHeaderLength {
            layer,
            length,
            minimum,
        }
    }

    /// Layer the error was raised for, if it came from a decoder
    pub fn layer(&self) -> Option<Layer> {
        match self {
            Error::TruncatedHeader { layer, .. } | Error::InvalidHeaderLength { layer, .. } => {
                Some(*layer)
            }
            Error::Io(_) | Error::FileNotFound(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncated_message() {
        let err = Error::truncated(Layer::Ipv4, 20, 12);
        assert_eq!(
            err.to_string(),
            "IPv4 header truncated: needed 20 bytes, 12 available"
        );
        assert_eq!(err.layer(), Some(Layer::Ipv4));
    }

    #[test]
    fn test_invalid_length_message() {
        let err = Error::invalid_length(Layer::Tcp, 16, 20);
        assert_eq!(
            err.to_string(),
            "TCP header length 16 is below the minimum of 20 bytes"
        );
    }

    #[test]
    fn test_io_has_no_layer() {
        let err: Error = std::io::Error::new(std::io::ErrorKind::Other, "boom").into();
        assert!(err.layer().is_none());
    }
}

//! pktanalyzer core library
//!
//! This crate provides the error type, layer identifiers and report
//! configuration shared by the pktanalyzer decoders and driver.

pub mod config;
pub mod error;
pub mod types;

// Re-export commonly used types
pub use config::ReportConfig;
pub use error::{Error, Result};
pub use types::{Layer, MacAddr};

//! Error types for range decomposition and the wide integer parser.

use std::net::IpAddr;
use thiserror::Error;

/// Errors surfaced by decomposition, block construction and family dispatch.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CidrError {
    #[error("Range start {start} is above range end {end}")]
    Order { start: IpAddr, end: IpAddr },

    #[error("Range endpoints differ in width: {start_bits} and {end_bits} bits")]
    WidthMismatch { start_bits: u8, end_bits: u8 },

    #[error("Invalid address length: {0} bytes, expected 4 or 16")]
    InvalidLength(usize),

    #[error("Prefix length {prefix_len} exceeds maximum {max}")]
    PrefixTooLong { prefix_len: u8, max: u8 },

    #[error("Block base is not aligned to its prefix: {block}")]
    Misaligned { block: String },

    #[error("Invalid CIDR block: {0}")]
    Parse(String),

    #[error("Invalid hex value: {0}")]
    Format(#[from] HexError),
}

/// Malformed hexadecimal input to [`crate::models::Uint128::from_hex`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum HexError {
    #[error("length {0} greater than 32")]
    TooLong(usize),

    #[error("non-hex characters in {0:?}")]
    InvalidDigit(String),
}

/// Errors from loading settings or starting the logger.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Invalid log level: {0}")]
    InvalidLogLevel(String),

    #[error("Error initializing log4rs: {0}")]
    Logging(String),
}

//! Decompose inclusive IPv4 and IPv6 address ranges into the minimal ordered
//! list of aligned CIDR blocks.
//!
//! - [`models`] - [`Uint128`](models::Uint128), the [`Address`](models::Address)
//!   capability and [`Block`](models::Block)
//! - [`processing`] - the decomposer and address family dispatch
//! - [`config`] and [`logging`] - environment settings and log4rs setup

pub mod config;
pub mod error;
pub mod logging;
pub mod models;
pub mod processing;

pub use error::{CidrError, ConfigError, HexError};
pub use models::{Address, Block, IpCidr, Uint128};
pub use processing::{
    blocks, bytes_range_to_cidrs, decompose_range, for_each_block, for_each_ip_cidr,
    ip_range_to_cidrs,
};

//! Range decomposition logic.
//!
//! - [`decompose`] - the greedy range-to-blocks algorithm, generic over width
//! - [`dispatch`] - family selection for `std::net` and byte-slice addresses

mod decompose;
mod dispatch;

// Re-export public functions
pub use decompose::{blocks, decompose_range, for_each_block, Blocks};
pub use dispatch::{
    bytes_range_to_cidrs, for_each_ip_cidr, ip_range_to_cidrs, ipv4_range_to_cidrs,
    ipv6_range_to_cidrs,
};

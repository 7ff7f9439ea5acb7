//! Value types for range decomposition.
//!
//! - [`Uint128`] - 128-bit unsigned integer from two 64-bit halves
//! - [`Address`] - fixed-width address capability for `u32` and [`Uint128`]
//! - [`Block`] and [`IpCidr`] - aligned CIDR blocks

mod address;
mod block;
mod uint128;

// Re-export public types
pub use address::{
    ipv4_to_u32, ipv6_to_uint128, u32_to_ipv4, uint128_to_ipv6, Address, AddressBytes, IPV4_BITS,
    IPV6_BITS,
};
pub use block::{Block, IpCidr};
pub use uint128::{Uint128, MAX_HEX_DIGITS};

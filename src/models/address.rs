//! Fixed-width unsigned address values and their big-endian codecs.
//!
//! [`Address`] is the capability the range decomposer needs from an address
//! integer. It is implemented for `u32` (IPv4) and [`Uint128`] (IPv6).

use super::Uint128;
use crate::error::CidrError;
use std::fmt::Debug;
use std::hash::Hash;
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};

/// Width of an IPv4 address in bits.
pub const IPV4_BITS: u8 = 32;
/// Width of an IPv6 address in bits.
pub const IPV6_BITS: u8 = 128;

/// Fixed-width unsigned integer usable as an address.
pub trait Address: Copy + Ord + Debug + Hash {
    /// Width in bits.
    const BITS: u8;
    const ZERO: Self;
    const MAX: Self;

    /// Trailing zero bits; `BITS` for zero.
    fn trailing_zeros(self) -> u32;

    /// Bits needed to represent the value; 0 for zero.
    fn bit_len(self) -> u32;

    /// Wrapping add plus carry out of the top bit.
    fn overflowing_add(self, rhs: Self) -> (Self, bool);

    fn wrapping_sub(self, rhs: Self) -> Self;

    fn incr(self) -> Self;

    fn and(self, rhs: Self) -> Self;

    fn or(self, rhs: Self) -> Self;

    /// `1 << bits`, zero when `bits >= BITS`.
    fn pow2(bits: u32) -> Self;

    fn to_ip(self) -> IpAddr;

    /// The address of the same family as `ip`, if any.
    fn from_ip(ip: IpAddr) -> Option<Self>;

    /// Value with the low `bits` bits set.
    fn host_mask(bits: u32) -> Self {
        if bits >= u32::from(Self::BITS) {
            Self::MAX
        } else {
            Self::pow2(bits).wrapping_sub(Self::ZERO.incr())
        }
    }

    /// Value with the high `prefix_len` bits set.
    fn netmask(prefix_len: u8) -> Self {
        let host_bits = u32::from(Self::BITS.saturating_sub(prefix_len));
        Self::MAX.wrapping_sub(Self::host_mask(host_bits))
    }

    /// Upper bound on the number of blocks any range of this width produces.
    fn max_blocks() -> usize {
        2 * usize::from(Self::BITS) - 2
    }
}

impl Address for u32 {
    const BITS: u8 = IPV4_BITS;
    const ZERO: u32 = 0;
    const MAX: u32 = u32::MAX;

    fn trailing_zeros(self) -> u32 {
        u32::trailing_zeros(self)
    }

    fn bit_len(self) -> u32 {
        u32::from(IPV4_BITS) - self.leading_zeros()
    }

    fn overflowing_add(self, rhs: u32) -> (u32, bool) {
        let sum = self.wrapping_add(rhs);
        (sum, sum < self)
    }

    fn wrapping_sub(self, rhs: u32) -> u32 {
        u32::wrapping_sub(self, rhs)
    }

    fn incr(self) -> u32 {
        self.wrapping_add(1)
    }

    fn and(self, rhs: u32) -> u32 {
        self & rhs
    }

    fn or(self, rhs: u32) -> u32 {
        self | rhs
    }

    fn pow2(bits: u32) -> u32 {
        1u32.checked_shl(bits).unwrap_or(0)
    }

    fn to_ip(self) -> IpAddr {
        IpAddr::V4(u32_to_ipv4(self))
    }

    fn from_ip(ip: IpAddr) -> Option<u32> {
        match ip {
            IpAddr::V4(addr) => Some(ipv4_to_u32(addr)),
            IpAddr::V6(_) => None,
        }
    }
}

impl Address for Uint128 {
    const BITS: u8 = IPV6_BITS;
    const ZERO: Uint128 = Uint128::ZERO;
    const MAX: Uint128 = Uint128::MAX;

    fn trailing_zeros(self) -> u32 {
        Uint128::trailing_zeros(self)
    }

    fn bit_len(self) -> u32 {
        Uint128::bit_len(self)
    }

    fn overflowing_add(self, rhs: Uint128) -> (Uint128, bool) {
        Uint128::overflowing_add(self, rhs)
    }

    fn wrapping_sub(self, rhs: Uint128) -> Uint128 {
        Uint128::wrapping_sub(self, rhs)
    }

    fn incr(self) -> Uint128 {
        Uint128::incr(self)
    }

    fn and(self, rhs: Uint128) -> Uint128 {
        Uint128::and(self, rhs)
    }

    fn or(self, rhs: Uint128) -> Uint128 {
        Uint128::or(self, rhs)
    }

    fn pow2(bits: u32) -> Uint128 {
        Uint128::ONE.shl(bits)
    }

    fn to_ip(self) -> IpAddr {
        IpAddr::V6(uint128_to_ipv6(self))
    }

    fn from_ip(ip: IpAddr) -> Option<Uint128> {
        match ip {
            IpAddr::V6(addr) => Some(ipv6_to_uint128(addr)),
            IpAddr::V4(_) => None,
        }
    }
}

pub fn ipv4_to_u32(addr: Ipv4Addr) -> u32 {
    u32::from_be_bytes(addr.octets())
}

pub fn u32_to_ipv4(value: u32) -> Ipv4Addr {
    Ipv4Addr::from(value.to_be_bytes())
}

pub fn ipv6_to_uint128(addr: Ipv6Addr) -> Uint128 {
    Uint128::from_be_bytes(addr.octets())
}

pub fn uint128_to_ipv6(value: Uint128) -> Ipv6Addr {
    Ipv6Addr::from(value.to_be_bytes())
}

/// A big-endian address decoded from raw bytes, classified by length.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum AddressBytes {
    V4(u32),
    V6(Uint128),
}

impl AddressBytes {
    /// Decode a 4 or 16 byte big-endian address.
    pub fn from_slice(bytes: &[u8]) -> Result<AddressBytes, CidrError> {
        match bytes.len() {
            4 => {
                let mut octets = [0u8; 4];
                octets.copy_from_slice(bytes);
                Ok(AddressBytes::V4(u32::from_be_bytes(octets)))
            }
            16 => {
                let mut octets = [0u8; 16];
                octets.copy_from_slice(bytes);
                Ok(AddressBytes::V6(Uint128::from_be_bytes(octets)))
            }
            len => Err(CidrError::InvalidLength(len)),
        }
    }

    pub fn bits(&self) -> u8 {
        match self {
            AddressBytes::V4(_) => IPV4_BITS,
            AddressBytes::V6(_) => IPV6_BITS,
        }
    }

    pub fn to_ip(self) -> IpAddr {
        match self {
            AddressBytes::V4(value) => value.to_ip(),
            AddressBytes::V6(value) => value.to_ip(),
        }
    }
}

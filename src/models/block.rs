//! CIDR blocks over a fixed-width address.
//!
//! A [`Block`] covers `2^(BITS - prefix_len)` addresses starting at a base
//! whose host bits are all zero. [`IpCidr`] wraps a block of either family.

use super::address::{ipv4_to_u32, ipv6_to_uint128, Address, IPV4_BITS, IPV6_BITS};
use super::Uint128;
use crate::error::CidrError;
use serde::de;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::net::IpAddr;
use std::str::FromStr;

/// Aligned address block `base/prefix_len`.
#[derive(Eq, PartialEq, Ord, PartialOrd, Debug, Copy, Clone, Hash)]
pub struct Block<T> {
    base: T,
    prefix_len: u8,
}

impl<T: Address> Block<T> {
    /// Build a block, rejecting prefix lengths over the address width and
    /// bases with host bits set.
    pub fn new(base: T, prefix_len: u8) -> Result<Block<T>, CidrError> {
        if prefix_len > T::BITS {
            return Err(CidrError::PrefixTooLong {
                prefix_len,
                max: T::BITS,
            });
        }
        let block = Block { base, prefix_len };
        if base.and(T::host_mask(block.size_bits())) != T::ZERO {
            return Err(CidrError::Misaligned {
                block: block.to_string(),
            });
        }
        Ok(block)
    }

    /// Caller guarantees `prefix_len <= BITS` and alignment.
    pub(crate) fn from_aligned(base: T, prefix_len: u8) -> Block<T> {
        debug_assert!(prefix_len <= T::BITS);
        Block { base, prefix_len }
    }

    pub fn base(&self) -> T {
        self.base
    }

    pub fn prefix_len(&self) -> u8 {
        self.prefix_len
    }

    /// Number of host bits, the block size as a power of two.
    pub fn size_bits(&self) -> u32 {
        u32::from(T::BITS - self.prefix_len)
    }

    /// Lowest (network) address in the block.
    pub fn first(&self) -> T {
        self.base
    }

    /// Highest (broadcast) address in the block.
    pub fn last(&self) -> T {
        self.base.or(T::host_mask(self.size_bits()))
    }

    pub fn netmask(&self) -> T {
        T::netmask(self.prefix_len)
    }

    pub fn contains(&self, addr: T) -> bool {
        addr >= self.first() && addr <= self.last()
    }
}

impl<T: Address> fmt::Display for Block<T> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}/{}", self.base.to_ip(), self.prefix_len)
    }
}

/// Split `addr/len` into its parts.
fn split_cidr(s: &str) -> Result<(IpAddr, u8), CidrError> {
    let parts: Vec<&str> = s.split('/').collect();
    if parts.len() != 2 {
        return Err(CidrError::Parse(format!("invalid CIDR format: {s}")));
    }
    let addr = IpAddr::from_str(parts[0])
        .map_err(|_| CidrError::Parse(format!("invalid IP address: {}", parts[0])))?;
    // u8::from_str takes a leading '+'
    if !parts[1].starts_with(|c: char| c.is_ascii_digit()) {
        return Err(CidrError::Parse(format!("invalid prefix length: {}", parts[1])));
    }
    let prefix_len = u8::from_str(parts[1])
        .map_err(|_| CidrError::Parse(format!("invalid prefix length: {}", parts[1])))?;
    Ok((addr, prefix_len))
}

impl<T: Address> FromStr for Block<T> {
    type Err = CidrError;

    fn from_str(s: &str) -> Result<Block<T>, CidrError> {
        let (addr, prefix_len) = split_cidr(s)?;
        let base = T::from_ip(addr).ok_or_else(|| CidrError::WidthMismatch {
            start_bits: T::BITS,
            end_bits: ip_bits(addr),
        })?;
        Block::new(base, prefix_len)
    }
}

impl<T: Address> Serialize for Block<T> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::ser::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de, T: Address> Deserialize<'de> for Block<T> {
    fn deserialize<D>(deserializer: D) -> Result<Block<T>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Block::from_str(&s).map_err(de::Error::custom)
    }
}

fn ip_bits(addr: IpAddr) -> u8 {
    match addr {
        IpAddr::V4(_) => IPV4_BITS,
        IpAddr::V6(_) => IPV6_BITS,
    }
}

/// A CIDR block of either address family.
#[derive(Eq, PartialEq, Ord, PartialOrd, Debug, Copy, Clone, Hash)]
pub enum IpCidr {
    V4(Block<u32>),
    V6(Block<Uint128>),
}

impl IpCidr {
    pub fn addr(&self) -> IpAddr {
        match self {
            IpCidr::V4(block) => block.base().to_ip(),
            IpCidr::V6(block) => block.base().to_ip(),
        }
    }

    pub fn prefix_len(&self) -> u8 {
        match self {
            IpCidr::V4(block) => block.prefix_len(),
            IpCidr::V6(block) => block.prefix_len(),
        }
    }

    /// Width of the address family: 32 or 128.
    pub fn max_prefix_len(&self) -> u8 {
        match self {
            IpCidr::V4(_) => IPV4_BITS,
            IpCidr::V6(_) => IPV6_BITS,
        }
    }

    /// Highest address in the block.
    pub fn last(&self) -> IpAddr {
        match self {
            IpCidr::V4(block) => block.last().to_ip(),
            IpCidr::V6(block) => block.last().to_ip(),
        }
    }

    /// Whether `ip` is inside the block. Addresses of the other family never are.
    pub fn contains(&self, ip: IpAddr) -> bool {
        match self {
            IpCidr::V4(block) => u32::from_ip(ip).is_some_and(|addr| block.contains(addr)),
            IpCidr::V6(block) => Uint128::from_ip(ip).is_some_and(|addr| block.contains(addr)),
        }
    }
}

impl From<Block<u32>> for IpCidr {
    fn from(block: Block<u32>) -> IpCidr {
        IpCidr::V4(block)
    }
}

impl From<Block<Uint128>> for IpCidr {
    fn from(block: Block<Uint128>) -> IpCidr {
        IpCidr::V6(block)
    }
}

impl fmt::Display for IpCidr {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            IpCidr::V4(block) => fmt::Display::fmt(block, f),
            IpCidr::V6(block) => fmt::Display::fmt(block, f),
        }
    }
}

impl FromStr for IpCidr {
    type Err = CidrError;

    fn from_str(s: &str) -> Result<IpCidr, CidrError> {
        let (addr, prefix_len) = split_cidr(s)?;
        match addr {
            IpAddr::V4(ip) => Ok(IpCidr::V4(Block::new(ipv4_to_u32(ip), prefix_len)?)),
            IpAddr::V6(ip) => Ok(IpCidr::V6(Block::new(ipv6_to_uint128(ip), prefix_len)?)),
        }
    }
}

impl Serialize for IpCidr {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::ser::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for IpCidr {
    fn deserialize<D>(deserializer: D) -> Result<IpCidr, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        IpCidr::from_str(&s).map_err(de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::{Ipv4Addr, Ipv6Addr};

    fn v4(s: &str) -> Block<u32> {
        s.parse().unwrap()
    }

    #[test]
    fn test_new_validates() {
        assert!(Block::new(0xC0A8_0000u32, 16).is_ok());
        assert!(Block::new(0u32, 0).is_ok());
        assert!(Block::new(u32::MAX, 32).is_ok());
        assert_eq!(
            Block::new(0u32, 33),
            Err(CidrError::PrefixTooLong {
                prefix_len: 33,
                max: 32
            })
        );
        assert_eq!(
            Block::new(0xC0A8_0001u32, 24),
            Err(CidrError::Misaligned {
                block: "192.168.0.1/24".to_string()
            })
        );
        assert!(Block::new(Uint128::new(1, 0), 64).is_ok());
        assert!(Block::new(Uint128::new(1, 1), 64).is_err());
    }

    #[test]
    fn test_first_last() {
        let block = v4("192.168.1.0/24");
        assert_eq!(block.first(), 0xC0A8_0100);
        assert_eq!(block.last(), 0xC0A8_01FF);
        assert_eq!(
            v4("192.0.0.0/8").last().to_ip(),
            IpAddr::V4(Ipv4Addr::new(192, 255, 255, 255))
        );
        assert_eq!(v4("10.0.0.0/32").last(), v4("10.0.0.0/32").first());
        assert_eq!(v4("0.0.0.0/0").last(), u32::MAX);
        assert_eq!(block.netmask(), 0xFFFF_FF00);
    }

    #[test]
    fn test_contains() {
        let block = v4("10.0.10.64/26");
        assert!(block.contains(0x0A00_0A40));
        assert!(block.contains(0x0A00_0A7F));
        assert!(!block.contains(0x0A00_0A80));
        assert!(!block.contains(0x0A00_0A3F));
    }

    #[test]
    fn test_cmp() {
        let a = v4("10.0.0.0/8");
        let b = v4("10.0.10.0/24");
        let c = v4("10.0.10.64/26");
        assert!(a < b);
        assert!(b < c);
        assert!(a.first() < b.first());
        assert!(a.last() > c.last());
    }

    #[test]
    fn test_display_and_parse() {
        assert_eq!(v4("192.168.0.0/31").to_string(), "192.168.0.0/31");
        let block: Block<Uint128> = "ffff:ffff:ffff:ffff:ffff:ffff:ffff:0/112".parse().unwrap();
        assert_eq!(block.to_string(), "ffff:ffff:ffff:ffff:ffff:ffff:ffff:0/112");
        assert!("10.0.0.0".parse::<Block<u32>>().is_err());
        assert!("10.0.0.0/x".parse::<Block<u32>>().is_err());
        assert!("nope/8".parse::<Block<u32>>().is_err());
        assert_eq!(
            "::/0".parse::<Block<u32>>(),
            Err(CidrError::WidthMismatch {
                start_bits: 32,
                end_bits: 128
            })
        );
    }

    #[test]
    fn test_parse_is_strict() {
        for s in ["10.0.0.0/+8", "10.0.0.0/8 ", " 10.0.0.0/8", "10.0.0.0/", "10.0.0.0/-8"] {
            assert!(s.parse::<Block<u32>>().is_err(), "accepted {s:?}");
            assert!(s.parse::<IpCidr>().is_err(), "accepted {s:?}");
        }
        assert_eq!(
            "10.0.0.0/+8".parse::<IpCidr>(),
            Err(CidrError::Parse("invalid prefix length: +8".to_string()))
        );
        assert_eq!(v4("10.0.0.0/08"), v4("10.0.0.0/8"));
    }

    #[test]
    fn test_serde() {
        let block = v4("10.1.1.16/28");
        let json = serde_json::to_string(&block).unwrap();
        assert_eq!(json, "\"10.1.1.16/28\"");
        let back: Block<u32> = serde_json::from_str(&json).unwrap();
        assert_eq!(back, block);
        assert!(serde_json::from_str::<Block<u32>>("\"10.1.1.17/28\"").is_err());
    }

    #[test]
    fn test_ip_cidr() {
        let cidr: IpCidr = "2001:db8::/32".parse().unwrap();
        assert_eq!(cidr.max_prefix_len(), 128);
        assert_eq!(cidr.prefix_len(), 32);
        assert_eq!(cidr.addr(), IpAddr::V6("2001:db8::".parse::<Ipv6Addr>().unwrap()));
        assert!(cidr.contains("2001:db8:ffff::1".parse().unwrap()));
        assert!(!cidr.contains("10.0.0.1".parse().unwrap()));

        let cidr: IpCidr = "10.0.0.0/8".parse().unwrap();
        assert_eq!(cidr, IpCidr::V4(v4("10.0.0.0/8")));
        assert_eq!(cidr.last(), IpAddr::V4(Ipv4Addr::new(10, 255, 255, 255)));
        assert_eq!(serde_json::to_string(&cidr).unwrap(), "\"10.0.0.0/8\"");
    }
}

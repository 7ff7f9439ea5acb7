//! Address family dispatch for range decomposition.
//!
//! Picks the 32-bit or 128-bit decomposer from the endpoints' family. IPv4
//! mapped IPv6 addresses (`::ffff:a.b.c.d`) count as IPv4 when both endpoints
//! can be read that way.

use super::decompose::{decompose_range, for_each_block};
use crate::error::CidrError;
use crate::models::{
    ipv4_to_u32, ipv6_to_uint128, AddressBytes, Block, IpCidr, Uint128, IPV4_BITS, IPV6_BITS,
};
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};

/// Endpoints classified into one width.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
enum Range {
    V4(u32, u32),
    V6(Uint128, Uint128),
}

fn as_ipv4(ip: IpAddr) -> Option<Ipv4Addr> {
    match ip {
        IpAddr::V4(addr) => Some(addr),
        IpAddr::V6(addr) => addr.to_ipv4_mapped(),
    }
}

fn ip_bits(ip: IpAddr) -> u8 {
    match ip {
        IpAddr::V4(_) => IPV4_BITS,
        IpAddr::V6(_) => IPV6_BITS,
    }
}

fn classify(start: IpAddr, end: IpAddr) -> Result<Range, CidrError> {
    if let (Some(s), Some(e)) = (as_ipv4(start), as_ipv4(end)) {
        return Ok(Range::V4(ipv4_to_u32(s), ipv4_to_u32(e)));
    }
    match (start, end) {
        (IpAddr::V6(s), IpAddr::V6(e)) => Ok(Range::V6(ipv6_to_uint128(s), ipv6_to_uint128(e))),
        _ => {
            log::debug!("Rejecting range {start} - {end}: mixed address families");
            Err(CidrError::WidthMismatch {
                start_bits: ip_bits(start),
                end_bits: ip_bits(end),
            })
        }
    }
}

/// Minimal blocks covering an IPv4 range.
pub fn ipv4_range_to_cidrs(start: Ipv4Addr, end: Ipv4Addr) -> Result<Vec<Block<u32>>, CidrError> {
    decompose_range(ipv4_to_u32(start), ipv4_to_u32(end))
}

/// Minimal blocks covering an IPv6 range.
pub fn ipv6_range_to_cidrs(
    start: Ipv6Addr,
    end: Ipv6Addr,
) -> Result<Vec<Block<Uint128>>, CidrError> {
    decompose_range(ipv6_to_uint128(start), ipv6_to_uint128(end))
}

/// Visit the blocks covering `[start, end]` for either address family.
pub fn for_each_ip_cidr<F>(start: IpAddr, end: IpAddr, mut visit: F) -> Result<(), CidrError>
where
    F: FnMut(IpCidr),
{
    let range = classify(start, end)?;
    log::debug!("Dispatching range {start} - {end} as {range:?}");
    match range {
        Range::V4(s, e) => for_each_block(s, e, |block| visit(IpCidr::V4(block))),
        Range::V6(s, e) => for_each_block(s, e, |block| visit(IpCidr::V6(block))),
    }
}

/// Minimal blocks covering `[start, end]` for either address family.
///
/// # Examples
/// ```
/// use cidr_range::processing::ip_range_to_cidrs;
/// let cidrs = ip_range_to_cidrs("10.0.0.0".parse().unwrap(), "10.0.0.255".parse().unwrap());
/// assert_eq!(cidrs.unwrap()[0].to_string(), "10.0.0.0/24");
/// ```
pub fn ip_range_to_cidrs(start: IpAddr, end: IpAddr) -> Result<Vec<IpCidr>, CidrError> {
    let mut result = Vec::new();
    for_each_ip_cidr(start, end, |cidr| result.push(cidr))?;
    Ok(result)
}

/// Minimal blocks covering a range given as 4 or 16 byte big-endian addresses.
pub fn bytes_range_to_cidrs(start: &[u8], end: &[u8]) -> Result<Vec<IpCidr>, CidrError> {
    let start = AddressBytes::from_slice(start)?;
    let end = AddressBytes::from_slice(end)?;
    ip_range_to_cidrs(start.to_ip(), end.to_ip())
}

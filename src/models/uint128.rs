//! 128-bit unsigned integer built from two 64-bit halves.
//!
//! [`Uint128`] keeps the carry and borrow of every addition and subtraction
//! explicit: a half that wraps is detected by comparing it with its previous
//! value, never by trapping overflow.

use crate::error::HexError;
use lazy_static::lazy_static;
use regex::Regex;
use serde::de;
use serde::{Deserialize, Deserializer, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::net::Ipv6Addr;
use std::ops::{Add, BitAnd, BitOr, BitXor, Not, Shl, Shr, Sub};
use std::str::FromStr;

/// Maximum number of hex digits accepted by [`Uint128::from_hex`].
pub const MAX_HEX_DIGITS: usize = 32;

lazy_static! {
    static ref HEX_RE: Regex = Regex::new(r"^[0-9a-fA-F]*$").expect("Invalid Regex?");
}

/// Unsigned 128-bit value `hi * 2^64 + lo`.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, Hash)]
pub struct Uint128 {
    /// High 64 bits.
    pub hi: u64,
    /// Low 64 bits.
    pub lo: u64,
}

impl Uint128 {
    pub const ZERO: Uint128 = Uint128 { hi: 0, lo: 0 };
    pub const ONE: Uint128 = Uint128 { hi: 0, lo: 1 };
    pub const MAX: Uint128 = Uint128 {
        hi: u64::MAX,
        lo: u64::MAX,
    };
    pub const BITS: u32 = 128;

    pub const fn new(hi: u64, lo: u64) -> Uint128 {
        Uint128 { hi, lo }
    }

    /// Three-way comparison: -1 if `self < other`, 0 if equal, +1 if greater.
    pub fn compare(self, other: Uint128) -> i8 {
        match self.cmp(&other) {
            Ordering::Less => -1,
            Ordering::Equal => 0,
            Ordering::Greater => 1,
        }
    }

    pub const fn is_zero(self) -> bool {
        self.hi == 0 && self.lo == 0
    }

    /// Add `rhs`, returning the wrapped sum and whether the high half carried out.
    pub fn overflowing_add(self, rhs: Uint128) -> (Uint128, bool) {
        let lo = self.lo.wrapping_add(rhs.lo);
        let carry = lo < self.lo;
        let mut hi = self.hi.wrapping_add(rhs.hi);
        let mut carry_out = hi < self.hi;
        if carry {
            let bumped = hi.wrapping_add(1);
            carry_out |= bumped < hi;
            hi = bumped;
        }
        (Uint128 { hi, lo }, carry_out)
    }

    pub fn wrapping_add(self, rhs: Uint128) -> Uint128 {
        self.overflowing_add(rhs).0
    }

    /// Subtract `rhs`, returning the wrapped difference and whether a borrow
    /// was taken past the high half.
    pub fn overflowing_sub(self, rhs: Uint128) -> (Uint128, bool) {
        let lo = self.lo.wrapping_sub(rhs.lo);
        let borrow = lo > self.lo;
        let mut hi = self.hi.wrapping_sub(rhs.hi);
        let mut borrow_out = hi > self.hi;
        if borrow {
            let lowered = hi.wrapping_sub(1);
            borrow_out |= lowered > hi;
            hi = lowered;
        }
        (Uint128 { hi, lo }, borrow_out)
    }

    pub fn wrapping_sub(self, rhs: Uint128) -> Uint128 {
        self.overflowing_sub(rhs).0
    }

    /// Add one, wrapping `MAX` to zero.
    pub fn incr(self) -> Uint128 {
        let lo = self.lo.wrapping_add(1);
        let hi = if lo < self.lo {
            self.hi.wrapping_add(1)
        } else {
            self.hi
        };
        Uint128 { hi, lo }
    }

    /// Subtract one, wrapping zero to `MAX`.
    pub fn decr(self) -> Uint128 {
        let lo = self.lo.wrapping_sub(1);
        let hi = if lo > self.lo {
            self.hi.wrapping_sub(1)
        } else {
            self.hi
        };
        Uint128 { hi, lo }
    }

    /// Shift left by `n` bits; zero for `n >= 128`.
    pub fn shl(self, n: u32) -> Uint128 {
        match n {
            0 => self,
            1..=63 => Uint128 {
                hi: (self.hi << n) | (self.lo >> (64 - n)),
                lo: self.lo << n,
            },
            64..=127 => Uint128 {
                hi: self.lo << (n - 64),
                lo: 0,
            },
            _ => Uint128::ZERO,
        }
    }

    /// Shift right by `n` bits; zero for `n >= 128`.
    pub fn shr(self, n: u32) -> Uint128 {
        match n {
            0 => self,
            1..=63 => Uint128 {
                hi: self.hi >> n,
                lo: (self.lo >> n) | (self.hi << (64 - n)),
            },
            64..=127 => Uint128 {
                hi: 0,
                lo: self.hi >> (n - 64),
            },
            _ => Uint128::ZERO,
        }
    }

    pub const fn and(self, rhs: Uint128) -> Uint128 {
        Uint128 {
            hi: self.hi & rhs.hi,
            lo: self.lo & rhs.lo,
        }
    }

    /// Bits set in `self` and clear in `rhs`.
    pub const fn and_not(self, rhs: Uint128) -> Uint128 {
        Uint128 {
            hi: self.hi & !rhs.hi,
            lo: self.lo & !rhs.lo,
        }
    }

    pub const fn or(self, rhs: Uint128) -> Uint128 {
        Uint128 {
            hi: self.hi | rhs.hi,
            lo: self.lo | rhs.lo,
        }
    }

    pub const fn xor(self, rhs: Uint128) -> Uint128 {
        Uint128 {
            hi: self.hi ^ rhs.hi,
            lo: self.lo ^ rhs.lo,
        }
    }

    pub const fn not(self) -> Uint128 {
        Uint128 {
            hi: !self.hi,
            lo: !self.lo,
        }
    }

    /// Minimum number of bits needed to represent the value; 0 for zero.
    pub const fn bit_len(self) -> u32 {
        if self.hi != 0 {
            64 + (64 - self.hi.leading_zeros())
        } else {
            64 - self.lo.leading_zeros()
        }
    }

    pub const fn leading_zeros(self) -> u32 {
        Uint128::BITS - self.bit_len()
    }

    /// Trailing zero bits; 128 for zero.
    pub const fn trailing_zeros(self) -> u32 {
        if self.lo != 0 {
            self.lo.trailing_zeros()
        } else {
            64 + self.hi.trailing_zeros()
        }
    }

    pub const fn count_ones(self) -> u32 {
        self.hi.count_ones() + self.lo.count_ones()
    }

    pub const fn reverse_bits(self) -> Uint128 {
        Uint128 {
            hi: self.lo.reverse_bits(),
            lo: self.hi.reverse_bits(),
        }
    }

    pub const fn swap_bytes(self) -> Uint128 {
        Uint128 {
            hi: self.lo.swap_bytes(),
            lo: self.hi.swap_bytes(),
        }
    }

    /// Parse up to 32 hex digits, left padded with zeros.
    ///
    /// # Examples
    /// ```
    /// use cidr_range::models::Uint128;
    /// let x = Uint128::from_hex("1ffffffffffffffff").unwrap();
    /// assert_eq!(x, Uint128::new(1, u64::MAX));
    /// ```
    pub fn from_hex(s: &str) -> Result<Uint128, HexError> {
        if s.len() > MAX_HEX_DIGITS {
            return Err(HexError::TooLong(s.len()));
        }
        if !HEX_RE.is_match(s) {
            return Err(HexError::InvalidDigit(s.to_string()));
        }
        let padded = format!("{s:0>32}");
        let hi = u64::from_str_radix(&padded[..16], 16)
            .map_err(|_| HexError::InvalidDigit(s.to_string()))?;
        let lo = u64::from_str_radix(&padded[16..], 16)
            .map_err(|_| HexError::InvalidDigit(s.to_string()))?;
        Ok(Uint128 { hi, lo })
    }

    /// Zero padded 32 digit lowercase hex.
    pub fn to_hex(self) -> String {
        format!("{:016x}{:016x}", self.hi, self.lo)
    }

    /// Lowercase hex without leading zeros in the high half.
    pub fn to_hex_minimal(self) -> String {
        if self.hi == 0 {
            format!("{:x}", self.lo)
        } else {
            format!("{:x}{:016x}", self.hi, self.lo)
        }
    }

    pub fn from_be_bytes(bytes: [u8; 16]) -> Uint128 {
        let mut hi = [0u8; 8];
        let mut lo = [0u8; 8];
        hi.copy_from_slice(&bytes[..8]);
        lo.copy_from_slice(&bytes[8..]);
        Uint128 {
            hi: u64::from_be_bytes(hi),
            lo: u64::from_be_bytes(lo),
        }
    }

    pub fn to_be_bytes(self) -> [u8; 16] {
        let mut bytes = [0u8; 16];
        bytes[..8].copy_from_slice(&self.hi.to_be_bytes());
        bytes[8..].copy_from_slice(&self.lo.to_be_bytes());
        bytes
    }
}

impl Ord for Uint128 {
    fn cmp(&self, other: &Uint128) -> Ordering {
        self.hi.cmp(&other.hi).then(self.lo.cmp(&other.lo))
    }
}

impl PartialOrd for Uint128 {
    fn partial_cmp(&self, other: &Uint128) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl From<u128> for Uint128 {
    fn from(value: u128) -> Uint128 {
        Uint128 {
            hi: (value >> 64) as u64,
            lo: value as u64,
        }
    }
}

impl From<Uint128> for u128 {
    fn from(value: Uint128) -> u128 {
        ((value.hi as u128) << 64) | value.lo as u128
    }
}

impl From<u64> for Uint128 {
    fn from(value: u64) -> Uint128 {
        Uint128 { hi: 0, lo: value }
    }
}

impl From<Ipv6Addr> for Uint128 {
    fn from(addr: Ipv6Addr) -> Uint128 {
        Uint128::from_be_bytes(addr.octets())
    }
}

impl From<Uint128> for Ipv6Addr {
    fn from(value: Uint128) -> Ipv6Addr {
        Ipv6Addr::from(value.to_be_bytes())
    }
}

impl FromStr for Uint128 {
    type Err = HexError;

    fn from_str(s: &str) -> Result<Uint128, HexError> {
        Uint128::from_hex(s)
    }
}

impl Add for Uint128 {
    type Output = Uint128;
    fn add(self, rhs: Uint128) -> Uint128 {
        self.wrapping_add(rhs)
    }
}

impl Sub for Uint128 {
    type Output = Uint128;
    fn sub(self, rhs: Uint128) -> Uint128 {
        self.wrapping_sub(rhs)
    }
}

impl BitAnd for Uint128 {
    type Output = Uint128;
    fn bitand(self, rhs: Uint128) -> Uint128 {
        self.and(rhs)
    }
}

impl BitOr for Uint128 {
    type Output = Uint128;
    fn bitor(self, rhs: Uint128) -> Uint128 {
        self.or(rhs)
    }
}

impl BitXor for Uint128 {
    type Output = Uint128;
    fn bitxor(self, rhs: Uint128) -> Uint128 {
        self.xor(rhs)
    }
}

impl Not for Uint128 {
    type Output = Uint128;
    fn not(self) -> Uint128 {
        Uint128::not(self)
    }
}

impl Shl<u32> for Uint128 {
    type Output = Uint128;
    fn shl(self, n: u32) -> Uint128 {
        Uint128::shl(self, n)
    }
}

impl Shr<u32> for Uint128 {
    type Output = Uint128;
    fn shr(self, n: u32) -> Uint128 {
        Uint128::shr(self, n)
    }
}

impl fmt::Display for Uint128 {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "0x{}", self.to_hex())
    }
}

impl fmt::LowerHex for Uint128 {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.pad_integral(true, "0x", &self.to_hex_minimal())
    }
}

impl fmt::UpperHex for Uint128 {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.pad_integral(true, "0x", &self.to_hex_minimal().to_uppercase())
    }
}

impl fmt::Binary for Uint128 {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let digits = if self.hi == 0 {
            format!("{:b}", self.lo)
        } else {
            format!("{:b}{:064b}", self.hi, self.lo)
        };
        f.pad_integral(true, "0b", &digits)
    }
}

impl Serialize for Uint128 {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::ser::Serializer,
    {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Uint128 {
    fn deserialize<D>(deserializer: D) -> Result<Uint128, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Uint128::from_hex(&s).map_err(de::Error::custom)
    }
}

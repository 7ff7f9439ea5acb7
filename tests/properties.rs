//! Property tests for the decomposer and the wide integer.

use cidr_range::{decompose_range, Address, Block, Uint128};
use itertools::Itertools;
use proptest::prelude::*;

/// Blocks tile `[start, end]` exactly, are aligned, and no two neighbours merge.
fn check_blocks<T: Address>(start: T, end: T, blocks: &[Block<T>]) -> Result<(), TestCaseError> {
    prop_assert!(!blocks.is_empty());
    prop_assert!(blocks.len() <= T::max_blocks());
    prop_assert_eq!(blocks[0].first(), start);
    prop_assert_eq!(blocks[blocks.len() - 1].last(), end);

    for block in blocks {
        prop_assert!(block.base().trailing_zeros() >= block.size_bits());
    }

    for (a, b) in blocks.iter().tuple_windows() {
        prop_assert_eq!(a.last().incr(), b.first(), "gap or overlap between {} and {}", a, b);
        // equal neighbours forming an aligned pair would be one block
        let mergeable = a.prefix_len() == b.prefix_len()
            && a.prefix_len() > 0
            && Block::new(a.base(), a.prefix_len() - 1).is_ok();
        prop_assert!(!mergeable, "{} and {} could merge", a, b);
    }
    Ok(())
}

fn ordered_u32() -> impl Strategy<Value = (u32, u32)> {
    (any::<u32>(), any::<u32>()).prop_map(|(a, b)| if a <= b { (a, b) } else { (b, a) })
}

fn ordered_u128() -> impl Strategy<Value = (u128, u128)> {
    (any::<u128>(), any::<u128>()).prop_map(|(a, b)| if a <= b { (a, b) } else { (b, a) })
}

proptest! {
    #[test]
    fn test_ipv4_blocks_tile_range((start, end) in ordered_u32()) {
        let blocks = decompose_range(start, end).unwrap();
        check_blocks(start, end, &blocks)?;
    }

    #[test]
    fn test_ipv6_blocks_tile_range((start, end) in ordered_u128()) {
        let (start, end) = (Uint128::from(start), Uint128::from(end));
        let blocks = decompose_range(start, end).unwrap();
        check_blocks(start, end, &blocks)?;
    }

    #[test]
    fn test_small_ipv4_ranges(start in any::<u32>(), len in 0u32..4096) {
        let end = start.saturating_add(len);
        let blocks = decompose_range(start, end).unwrap();
        check_blocks(start, end, &blocks)?;
    }

    #[test]
    fn test_reversed_range_rejected((start, end) in ordered_u32()) {
        prop_assume!(start < end);
        prop_assert!(decompose_range(end, start).is_err());
    }

    #[test]
    fn test_uint128_add_sub_match_u128(a in any::<u128>(), b in any::<u128>()) {
        let (x, y) = (Uint128::from(a), Uint128::from(b));
        let (sum, carry) = x.overflowing_add(y);
        prop_assert_eq!((u128::from(sum), carry), a.overflowing_add(b));
        let (diff, borrow) = x.overflowing_sub(y);
        prop_assert_eq!((u128::from(diff), borrow), a.overflowing_sub(b));
        prop_assert_eq!(u128::from(x.incr()), a.wrapping_add(1));
        prop_assert_eq!(u128::from(x.decr()), a.wrapping_sub(1));
    }

    #[test]
    fn test_uint128_shifts_match_u128(a in any::<u128>(), n in 0u32..160) {
        let x = Uint128::from(a);
        prop_assert_eq!(u128::from(x << n), a.checked_shl(n).unwrap_or(0));
        prop_assert_eq!(u128::from(x >> n), a.checked_shr(n).unwrap_or(0));
    }

    #[test]
    fn test_uint128_bits_match_u128(a in any::<u128>(), b in any::<u128>()) {
        let (x, y) = (Uint128::from(a), Uint128::from(b));
        prop_assert_eq!(x.cmp(&y), a.cmp(&b));
        prop_assert_eq!(x.bit_len(), 128 - a.leading_zeros());
        prop_assert_eq!(x.leading_zeros(), a.leading_zeros());
        prop_assert_eq!(x.trailing_zeros(), a.trailing_zeros());
        prop_assert_eq!(x.count_ones(), a.count_ones());
        prop_assert_eq!(u128::from(x.and_not(y)), a & !b);
        prop_assert_eq!(u128::from(x.reverse_bits()), a.reverse_bits());
        prop_assert_eq!(u128::from(x.swap_bytes()), a.swap_bytes());
    }

    #[test]
    fn test_uint128_hex_roundtrip(a in any::<u128>()) {
        let x = Uint128::from(a);
        prop_assert_eq!(x.to_hex(), format!("{a:032x}"));
        prop_assert_eq!(x.to_hex_minimal(), format!("{a:x}"));
        prop_assert_eq!(Uint128::from_hex(&x.to_hex_minimal()).unwrap(), x);
    }
}

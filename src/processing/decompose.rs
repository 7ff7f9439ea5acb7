//! Greedy decomposition of an address range into CIDR blocks.
//!
//! Each step emits the largest block that both starts at the cursor (bounded by
//! the cursor's trailing zeros) and ends at or before the range end (bounded by
//! the bit length of the remaining span). Taking the minimum of the two bounds
//! at every step yields the minimal block list, at most `2 * BITS - 2` long.

use crate::error::CidrError;
use crate::models::{Address, Block};
use std::iter::FusedIterator;

/// Lazy ascending sequence of the blocks covering `[start, end]`.
#[derive(Debug, Clone)]
pub struct Blocks<T> {
    cursor: Option<T>,
    end: T,
}

impl<T: Address> Blocks<T> {
    fn new(start: T, end: T) -> Blocks<T> {
        Blocks {
            cursor: Some(start),
            end,
        }
    }
}

impl<T: Address> Iterator for Blocks<T> {
    type Item = Block<T>;

    fn next(&mut self) -> Option<Block<T>> {
        let cursor = self.cursor.filter(|cursor| *cursor <= self.end)?;
        let width = u32::from(T::BITS);

        let alignment_bits = cursor.trailing_zeros();
        // end - cursor + 1 wraps to zero only for the whole address space
        let remaining = self.end.wrapping_sub(cursor).incr();
        let size_bits = if remaining == T::ZERO {
            width
        } else {
            remaining.bit_len() - 1
        };
        let block_bits = alignment_bits.min(size_bits);

        let prefix_len = (width - block_bits) as u8;
        let block = Block::from_aligned(cursor, prefix_len);
        log::trace!("emit {block}");

        let (next, carry) = if block_bits >= width {
            (T::ZERO, true)
        } else {
            cursor.overflowing_add(T::pow2(block_bits))
        };
        self.cursor = if carry { None } else { Some(next) };

        Some(block)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        match self.cursor {
            Some(cursor) if cursor <= self.end => (1, Some(T::max_blocks())),
            _ => (0, Some(0)),
        }
    }
}

impl<T: Address> FusedIterator for Blocks<T> {}

fn check_order<T: Address>(start: T, end: T) -> Result<(), CidrError> {
    if start > end {
        log::debug!(
            "Rejecting range {} - {}: start above end",
            start.to_ip(),
            end.to_ip()
        );
        return Err(CidrError::Order {
            start: start.to_ip(),
            end: end.to_ip(),
        });
    }
    Ok(())
}

/// Lazy iterator over the minimal blocks covering `[start, end]`.
///
/// # Examples
/// ```
/// use cidr_range::processing::blocks;
/// let cidrs: Vec<String> = blocks(0xC0A8_0000u32, 0xC0A8_0001u32)
///     .unwrap()
///     .map(|b| b.to_string())
///     .collect();
/// assert_eq!(cidrs, vec!["192.168.0.0/31"]);
/// ```
pub fn blocks<T: Address>(start: T, end: T) -> Result<Blocks<T>, CidrError> {
    check_order(start, end)?;
    Ok(Blocks::new(start, end))
}

/// Call `visit` once per block covering `[start, end]`, in ascending order.
///
/// Nothing is visited when the range is rejected.
pub fn for_each_block<T, F>(start: T, end: T, mut visit: F) -> Result<(), CidrError>
where
    T: Address,
    F: FnMut(Block<T>),
{
    let mut count = 0usize;
    for block in blocks(start, end)? {
        visit(block);
        count += 1;
    }
    log::debug!(
        "Decomposed {} - {} into {count} blocks",
        start.to_ip(),
        end.to_ip()
    );
    Ok(())
}

/// Collect the minimal blocks covering `[start, end]`.
pub fn decompose_range<T: Address>(start: T, end: T) -> Result<Vec<Block<T>>, CidrError> {
    let mut result = Vec::with_capacity(T::max_blocks());
    for_each_block(start, end, |block| result.push(block))?;
    Ok(result)
}

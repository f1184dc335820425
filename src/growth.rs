//! Buffer growth policies.
//!
//! The value family grows to exactly what the current operation needs; the
//! shared family grows in fixed chunks, trims after single removals and
//! reserves linked-list nodes in blocks.

use crate::config::{DEFAULT_CAPACITY, NODE_BLOCK_SIZE};

/// Decides how much a buffer grows when an insertion overflows it.
pub trait GrowthPolicy {
    /// Whether `remove_at`/`remove` shrink the capacity back to the count.
    const TRIM_ON_REMOVE: bool;

    /// Nodes a linked list reserves when its pool has no free slot;
    /// zero grows the pool one node at a time.
    const NODE_BLOCK: usize;

    /// New capacity for a buffer holding `count` elements that needs room for
    /// `needed` more. Only called when `count + needed > capacity`.
    fn grow(capacity: usize, count: usize, needed: usize) -> usize;
}

/// Grow to exactly `count + needed`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Exact;

impl GrowthPolicy for Exact {
    const TRIM_ON_REMOVE: bool = false;
    const NODE_BLOCK: usize = 0;

    #[inline]
    fn grow(_capacity: usize, count: usize, needed: usize) -> usize {
        count + needed
    }
}

/// Grow by `DEFAULT_CAPACITY` slots at a time.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Chunked;

impl GrowthPolicy for Chunked {
    const TRIM_ON_REMOVE: bool = true;
    const NODE_BLOCK: usize = NODE_BLOCK_SIZE;

    #[inline]
    fn grow(capacity: usize, count: usize, needed: usize) -> usize {
        let required = count + needed;
        let mut next = capacity;
        while next < required {
            next += DEFAULT_CAPACITY;
        }
        next
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exact_grows_to_need() {
        assert_eq!(Exact::grow(4, 4, 1), 5);
        assert_eq!(Exact::grow(4, 3, 9), 12);
    }

    #[test]
    fn chunked_grows_in_steps() {
        assert_eq!(Chunked::grow(10, 10, 1), 20);
        assert_eq!(Chunked::grow(10, 10, 25), 40);
        assert_eq!(Chunked::grow(0, 0, 1), 10);
    }
}

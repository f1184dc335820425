//! In-place quicksort shared by the array and linked lists.
//!
//! Hoare-style partition: the pivot is the element initially at `start` and
//! is followed through swaps, the right cursor `j` walks down past elements
//! greater than the pivot, the left cursor `i` walks up past elements less
//! than it, and out-of-place pairs are swapped. When the cursors meet, `j` is
//! the partition boundary and the halves `[start, j]` and `[j + 1, end]` are
//! sorted in turn. The smaller half is recursed into and the larger one is
//! looped on, which bounds stack depth on already-sorted input.

use crate::compare::Comparer;
use crate::error::Result;
use core::cmp::Ordering;

/// Positionally addressed sequence the sort can compare and swap within.
pub(crate) trait Sequence {
    type Item;

    fn len(&self) -> usize;

    fn compare_at<C>(&mut self, a: usize, b: usize, comparer: &C) -> Result<Ordering>
    where
        C: Comparer<Self::Item> + ?Sized;

    fn swap_at(&mut self, a: usize, b: usize);
}

impl<T> Sequence for [T] {
    type Item = T;

    #[inline]
    fn len(&self) -> usize {
        <[T]>::len(self)
    }

    #[inline]
    fn compare_at<C>(&mut self, a: usize, b: usize, comparer: &C) -> Result<Ordering>
    where
        C: Comparer<T> + ?Sized,
    {
        comparer.compare(&self[a], &self[b])
    }

    #[inline]
    fn swap_at(&mut self, a: usize, b: usize) {
        self.swap(a, b);
    }
}

/// Sort the whole sequence. A comparer error aborts the sort, leaving the
/// sequence partially ordered, and is returned unchanged.
pub(crate) fn quick_sort<S, C>(seq: &mut S, comparer: &C) -> Result<()>
where
    S: Sequence + ?Sized,
    C: Comparer<S::Item> + ?Sized,
{
    let len = seq.len();
    if len < 2 {
        return Ok(());
    }
    sort_range(seq, 0, len - 1, comparer).map_err(|e| {
        log::debug!("sort of {} elements aborted by comparer: {}", len, e);
        e
    })
}

fn sort_range<S, C>(seq: &mut S, mut start: usize, mut end: usize, comparer: &C) -> Result<()>
where
    S: Sequence + ?Sized,
    C: Comparer<S::Item> + ?Sized,
{
    while start < end {
        let middle = partition(seq, start, end, comparer)?;
        if middle - start < end - middle {
            sort_range(seq, start, middle, comparer)?;
            start = middle + 1;
        } else {
            sort_range(seq, middle + 1, end, comparer)?;
            end = middle;
        }
    }
    Ok(())
}

fn partition<S, C>(seq: &mut S, start: usize, end: usize, comparer: &C) -> Result<usize>
where
    S: Sequence + ?Sized,
    C: Comparer<S::Item> + ?Sized,
{
    let mut pivot = start;
    let mut i = start;
    let mut j = end;
    loop {
        while j > start && seq.compare_at(j, pivot, comparer)? == Ordering::Greater {
            j -= 1;
        }
        while i < j && seq.compare_at(i, pivot, comparer)? == Ordering::Less {
            i += 1;
        }
        if i >= j {
            // An inconsistent comparer could leave j at `end`; clamp so both
            // halves shrink.
            return Ok(j.min(end - 1));
        }
        seq.swap_at(i, j);
        if pivot == i {
            pivot = j;
        } else if pivot == j {
            pivot = i;
        }
        i += 1;
        j -= 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compare::{DefaultComparer, FnComparer, ReverseComparer};
    use crate::error::CollectionError;
    use proptest::prelude::*;

    #[test]
    fn sorts_small_inputs() {
        let mut v = [3, 1, 2];
        quick_sort(&mut v[..], &DefaultComparer).unwrap();
        assert_eq!(v, [1, 2, 3]);

        let mut empty: [i32; 0] = [];
        quick_sort(&mut empty[..], &DefaultComparer).unwrap();

        let mut dup = [5, 5, 1, 5, 1];
        quick_sort(&mut dup[..], &DefaultComparer).unwrap();
        assert_eq!(dup, [1, 1, 5, 5, 5]);
    }

    /// Invariant: sorted and reversed input both come out ascending.
    #[test]
    fn sorted_input_is_unchanged() {
        let mut v: Vec<u32> = (0..2_000).collect();
        quick_sort(&mut v[..], &DefaultComparer).unwrap();
        assert!(v.windows(2).all(|w| w[0] <= w[1]));
        let mut r: Vec<u32> = (0..2_000).rev().collect();
        quick_sort(&mut r[..], &DefaultComparer).unwrap();
        assert_eq!(r, v);
    }

    #[test]
    fn comparer_error_aborts() {
        let mut v = [2, 1, 3];
        let failing = FnComparer(|_: &i32, _: &i32| -> Result<Ordering> {
            Err(CollectionError::invalid_argument("nope"))
        });
        assert!(matches!(
            quick_sort(&mut v[..], &failing),
            Err(CollectionError::InvalidArgument { .. })
        ));
    }

    /// Invariant: an inconsistent comparer terminates without panicking.
    #[test]
    fn inconsistent_comparer_terminates() {
        let mut v: Vec<i32> = (0..100).collect();
        let liar = FnComparer(|_: &i32, _: &i32| -> Result<Ordering> { Ok(Ordering::Less) });
        quick_sort(&mut v[..], &liar).unwrap();
        assert_eq!(v.len(), 100);
    }

    proptest! {
        #[test]
        fn prop_matches_std_sort(mut v in proptest::collection::vec(-50i32..50, 0..200)) {
            let mut expected = v.clone();
            expected.sort();
            quick_sort(&mut v[..], &DefaultComparer).unwrap();
            prop_assert_eq!(&v, &expected);
            quick_sort(&mut v[..], &DefaultComparer).unwrap();
            prop_assert_eq!(&v, &expected);
        }

        #[test]
        fn prop_reverse_comparer(mut v in proptest::collection::vec(any::<u8>(), 0..100)) {
            let mut expected = v.clone();
            expected.sort_by(|a, b| b.cmp(a));
            quick_sort(&mut v[..], &ReverseComparer(DefaultComparer)).unwrap();
            prop_assert_eq!(v, expected);
        }
    }
}

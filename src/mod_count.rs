//! Modification counters and enumerator stamps.
//!
//! Every container embeds a `ModCount`: a process-unique owner id plus a
//! counter bumped by each successful mutation. Enumerators are detached
//! cursors that capture a `Stamp` at creation and check it against the live
//! counter on every call, so any mutation made after the enumerator was
//! created fails it permanently (the counter never goes back).

use crate::error::{CollectionError, Result};
use core::sync::atomic::{AtomicU64, Ordering};

static NEXT_OWNER: AtomicU64 = AtomicU64::new(1);

#[derive(Debug)]
pub(crate) struct ModCount {
    owner: u64,
    count: u64,
}

impl ModCount {
    pub(crate) fn new() -> Self {
        Self {
            owner: NEXT_OWNER.fetch_add(1, Ordering::Relaxed),
            count: 0,
        }
    }

    #[inline]
    pub(crate) fn bump(&mut self) {
        self.count = self.count.wrapping_add(1);
    }

    #[inline]
    pub(crate) fn stamp(&self) -> Stamp {
        Stamp {
            owner: self.owner,
            count: self.count,
        }
    }

    #[inline]
    pub(crate) fn owner(&self) -> u64 {
        self.owner
    }
}

/// A clone is a different collection and must not validate the original's
/// enumerators.
impl Clone for ModCount {
    fn clone(&self) -> Self {
        Self::new()
    }
}

impl Default for ModCount {
    fn default() -> Self {
        Self::new()
    }
}

/// Source identity and modification count observed by an enumerator.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Stamp {
    owner: u64,
    count: u64,
}

impl Stamp {
    /// Fails `InvalidArgument` for a foreign source and `InvalidOperation`
    /// once the source has been modified.
    #[inline]
    pub(crate) fn check(&self, live: &ModCount) -> Result<()> {
        if self.owner != live.owner {
            return Err(CollectionError::invalid_argument(
                "enumerator used with a different collection",
            ));
        }
        if self.count != live.count {
            return Err(CollectionError::invalid_operation(
                "collection was modified after the enumerator was created",
            ));
        }
        Ok(())
    }
}

/// Enumerator position over an index-addressed sequence.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) enum Cursor {
    Unstarted,
    At(usize),
    Exhausted,
}

impl Cursor {
    /// Step forward over a sequence of `len` elements.
    pub(crate) fn advance(&mut self, len: usize) -> Result<()> {
        let next = match *self {
            Cursor::Unstarted => 0,
            Cursor::At(i) => i + 1,
            Cursor::Exhausted => len,
        };
        if next < len {
            *self = Cursor::At(next);
            Ok(())
        } else {
            *self = Cursor::Exhausted;
            Err(CollectionError::out_of_range(next, len))
        }
    }

    pub(crate) fn position(&self) -> Result<usize> {
        match *self {
            Cursor::At(i) => Ok(i),
            _ => Err(not_positioned()),
        }
    }
}

pub(crate) fn not_positioned() -> CollectionError {
    CollectionError::invalid_operation("enumerator is not positioned on an element")
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Invariant: a bump invalidates every stamp taken before it.
    #[test]
    fn bump_invalidates_stamp() {
        let mut m = ModCount::new();
        let s = m.stamp();
        assert!(s.check(&m).is_ok());
        m.bump();
        assert!(s.check(&m).unwrap_err().is_invalid_operation());
        assert!(m.stamp().check(&m).is_ok());
    }

    /// Invariant: stamps never validate against another counter, clones included.
    #[test]
    fn owners_are_distinct() {
        let a = ModCount::new();
        let b = a.clone();
        assert_ne!(a.owner(), b.owner());
        assert!(matches!(
            a.stamp().check(&b),
            Err(CollectionError::InvalidArgument { .. })
        ));
    }

    #[test]
    fn cursor_walks_then_exhausts() {
        let mut c = Cursor::Unstarted;
        assert!(c.position().is_err());
        c.advance(2).unwrap();
        assert_eq!(c.position().unwrap(), 0);
        c.advance(2).unwrap();
        assert_eq!(c.position().unwrap(), 1);
        assert!(c.advance(2).unwrap_err().is_out_of_range());
        assert_eq!(c, Cursor::Exhausted);
        assert!(c.advance(2).is_err());
        assert!(c.position().unwrap_err().is_invalid_operation());
    }
}

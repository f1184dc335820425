//! Error type shared by every collection.
//!
//! Each fallible operation returns `Result<T>`; nothing panics on bad input.
//! Variants are kinds, not codes: callers match on the variant and the
//! payload only adds context for diagnostics.

use std::collections::TryReserveError;
use thiserror::Error;

/// Failure kinds reported by collections, comparers and hash-code providers.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CollectionError {
    /// A parameter is malformed (load factor, capacity below count, operands
    /// a comparer cannot order, an enumerator paired with a foreign source).
    #[error("invalid argument: {message}")]
    InvalidArgument {
        /// What was wrong with the argument
        message: String,
    },

    /// Index or range outside the valid bounds.
    #[error("out of range: index {index}, count {count}")]
    OutOfRange {
        /// The offending index (or range end)
        index: usize,
        /// Number of elements at the time of the call
        count: usize,
    },

    /// Key, value or element absent.
    #[error("not found")]
    NotFound,

    /// Duplicate key, or duplicate key/value pair in a multimap.
    #[error("already exists")]
    AlreadyExists,

    /// Stale enumerator or an operation invalid in the current state.
    #[error("invalid operation: {message}")]
    InvalidOperation {
        /// Why the operation is not allowed
        message: String,
    },

    /// Peek, pop or dequeue on an empty container.
    #[error("underflow: container is empty")]
    Underflow,

    /// Allocation failed while growing or rehashing.
    #[error("out of memory: requested {requested} slots")]
    OutOfMemory {
        /// Slots requested by the failing allocation
        requested: usize,
    },
}

impl CollectionError {
    /// Create an invalid argument error
    pub fn invalid_argument<S: Into<String>>(message: S) -> Self {
        Self::InvalidArgument {
            message: message.into(),
        }
    }

    /// Create an out of range error
    pub fn out_of_range(index: usize, count: usize) -> Self {
        Self::OutOfRange { index, count }
    }

    /// Create an invalid operation error
    pub fn invalid_operation<S: Into<String>>(message: S) -> Self {
        Self::InvalidOperation {
            message: message.into(),
        }
    }

    /// Create an out of memory error
    pub fn out_of_memory(requested: usize) -> Self {
        Self::OutOfMemory { requested }
    }

    /// Map a failed `try_reserve*` call to `OutOfMemory`.
    pub(crate) fn from_reserve(_err: TryReserveError, requested: usize) -> Self {
        Self::OutOfMemory { requested }
    }

    /// True for the error a stale enumerator reports.
    pub fn is_invalid_operation(&self) -> bool {
        matches!(self, Self::InvalidOperation { .. })
    }

    /// True for the error an exhausted enumerator or bad index reports.
    pub fn is_out_of_range(&self) -> bool {
        matches!(self, Self::OutOfRange { .. })
    }
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, CollectionError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_includes_context() {
        let e = CollectionError::out_of_range(7, 3);
        assert_eq!(e.to_string(), "out of range: index 7, count 3");
        let e = CollectionError::invalid_argument("load factor must be positive");
        assert!(e.to_string().contains("load factor"));
    }

    #[test]
    fn kind_predicates() {
        assert!(CollectionError::invalid_operation("stale").is_invalid_operation());
        assert!(!CollectionError::Underflow.is_invalid_operation());
        assert!(CollectionError::out_of_range(0, 0).is_out_of_range());
    }
}

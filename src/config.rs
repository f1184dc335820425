//! Default sizes and the hash-map construction options.

use crate::error::{CollectionError, Result};

/// Initial capacity of lists, queues and stacks, and the chunk by which the
/// shared-family containers grow.
pub const DEFAULT_CAPACITY: usize = 10;

/// Number of nodes reserved at once by a chunked linked-list node pool.
pub const NODE_BLOCK_SIZE: usize = 10;

/// Bucket count of a map built with default options.
pub const DEFAULT_MAP_CAPACITY: usize = 16;

/// Entries-per-bucket ratio that triggers a rehash.
pub const DEFAULT_LOAD_FACTOR: f32 = 0.75;

/// Largest bucket count a map may be created with.
pub const MAX_MAP_CAPACITY: usize = 1 << 30;

/// Construction options for `HashMap` and `MultiHashMap`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MapOptions {
    /// Requested bucket count; rounded up to a power of two.
    pub capacity: usize,
    /// Maximum ratio of entries to buckets before the table doubles.
    pub load_factor: f32,
}

impl MapOptions {
    pub fn new(capacity: usize, load_factor: f32) -> Self {
        Self {
            capacity,
            load_factor,
        }
    }

    pub fn with_capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }

    pub fn with_load_factor(mut self, load_factor: f32) -> Self {
        self.load_factor = load_factor;
        self
    }

    /// Validate and normalise into `(capacity, threshold)`.
    pub fn validate(&self) -> Result<(usize, usize)> {
        if !self.load_factor.is_finite() || self.load_factor <= 0.0 {
            return Err(CollectionError::invalid_argument(format!(
                "load factor must be finite and positive, got {}",
                self.load_factor
            )));
        }
        if self.capacity > MAX_MAP_CAPACITY {
            return Err(CollectionError::invalid_argument(format!(
                "capacity {} exceeds maximum {}",
                self.capacity, MAX_MAP_CAPACITY
            )));
        }
        let capacity = self.capacity.max(1).next_power_of_two();
        Ok((capacity, threshold_for(capacity, self.load_factor)))
    }
}

impl Default for MapOptions {
    fn default() -> Self {
        Self::new(DEFAULT_MAP_CAPACITY, DEFAULT_LOAD_FACTOR)
    }
}

/// `capacity * load_factor`, never below one entry.
pub(crate) fn threshold_for(capacity: usize, load_factor: f32) -> usize {
    let t = (capacity as f64 * load_factor as f64) as usize;
    t.max(1)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Invariant: requested capacities round up to a power of two.
    #[test]
    fn capacity_rounds_to_power_of_two() {
        assert_eq!(MapOptions::new(4, 0.75).validate().unwrap(), (4, 3));
        assert_eq!(MapOptions::new(5, 0.75).validate().unwrap(), (8, 6));
        assert_eq!(MapOptions::new(0, 0.75).validate().unwrap(), (1, 1));
        assert_eq!(MapOptions::default().validate().unwrap(), (16, 12));
    }

    /// Invariant: non-positive or non-finite load factors are rejected.
    #[test]
    fn bad_load_factor_rejected() {
        for lf in [0.0, -1.0, f32::NAN, f32::INFINITY] {
            assert!(matches!(
                MapOptions::new(16, lf).validate(),
                Err(CollectionError::InvalidArgument { .. })
            ));
        }
    }

    #[test]
    fn oversized_capacity_rejected() {
        assert!(MapOptions::new(MAX_MAP_CAPACITY + 1, 0.75).validate().is_err());
        assert!(MapOptions::new(MAX_MAP_CAPACITY, 0.75).validate().is_ok());
    }
}

//! Separately chained hash table shared by `HashMap` and `MultiHashMap`.
//!
//! Entries live in a `SlotMap` and each bucket holds the key of its chain
//! head; chains link through generational entry keys. A rehash only rewires
//! `next` links into a new bucket array, so entries are never moved or
//! reallocated and entry keys stay valid across growth.

use crate::compare::Comparer;
use crate::config::{threshold_for, MapOptions, MAX_MAP_CAPACITY};
use crate::error::{CollectionError, Result};
use crate::hash_code::bucket_index;
use core::cmp::Ordering;
use slotmap::{new_key_type, SlotMap};

new_key_type! {
    /// Generational key of a hash-table entry.
    pub struct EntryKey;
}

/// A chain node: carries its spread hash and the link to the next node.
pub(crate) trait Chained {
    type Key;

    fn key(&self) -> &Self::Key;
    fn hash(&self) -> u32;
    fn next(&self) -> Option<EntryKey>;
    fn set_next(&mut self, next: Option<EntryKey>);
}

#[derive(Debug, Clone)]
pub(crate) struct ChainTable<E> {
    buckets: Vec<Option<EntryKey>>,
    slots: SlotMap<EntryKey, E>,
    threshold: usize,
    load_factor: f32,
    #[cfg(test)]
    fail_next_rehash: bool,
}

fn alloc_buckets(capacity: usize) -> Result<Vec<Option<EntryKey>>> {
    let mut buckets = Vec::new();
    buckets
        .try_reserve_exact(capacity)
        .map_err(|e| CollectionError::from_reserve(e, capacity))?;
    buckets.resize(capacity, None);
    Ok(buckets)
}

impl<E: Chained> ChainTable<E> {
    pub(crate) fn with_options(options: &MapOptions) -> Result<Self> {
        let (capacity, threshold) = options.validate()?;
        Ok(Self {
            buckets: alloc_buckets(capacity)?,
            slots: SlotMap::with_key(),
            threshold,
            load_factor: options.load_factor,
            #[cfg(test)]
            fail_next_rehash: false,
        })
    }

    #[inline]
    pub(crate) fn len(&self) -> usize {
        self.slots.len()
    }

    #[inline]
    pub(crate) fn capacity(&self) -> usize {
        self.buckets.len()
    }

    #[inline]
    pub(crate) fn get(&self, ek: EntryKey) -> Option<&E> {
        self.slots.get(ek)
    }

    #[inline]
    pub(crate) fn get_mut(&mut self, ek: EntryKey) -> Option<&mut E> {
        self.slots.get_mut(ek)
    }

    /// Walk the key's chain. Keys match when the spread hashes match and the
    /// comparer reports `Equal`; comparer errors stop the walk.
    pub(crate) fn find<C>(&self, key: &E::Key, hash: u32, comparer: &C) -> Result<Option<EntryKey>>
    where
        C: Comparer<E::Key> + ?Sized,
    {
        let mut cur = self.buckets[bucket_index(hash, self.buckets.len())];
        while let Some(ek) = cur {
            let entry = &self.slots[ek];
            if entry.hash() == hash && comparer.compare(entry.key(), key)? == Ordering::Equal {
                return Ok(Some(ek));
            }
            cur = entry.next();
        }
        Ok(None)
    }

    /// Link a new entry at the head of its chain, then double the table if
    /// the count reached the threshold. The caller has already ruled out a
    /// duplicate key.
    pub(crate) fn insert_head(&mut self, mut entry: E) -> Result<EntryKey> {
        let index = bucket_index(entry.hash(), self.buckets.len());
        entry.set_next(self.buckets[index]);
        let ek = self.slots.insert(entry);
        self.buckets[index] = Some(ek);
        if self.slots.len() >= self.threshold {
            self.rehash(self.buckets.len() * 2)?;
        }
        Ok(ek)
    }

    /// Make the next rehash fail as if the bucket allocation did.
    #[cfg(test)]
    pub(crate) fn fail_next_rehash(&mut self) {
        self.fail_next_rehash = true;
    }

    fn rehash(&mut self, capacity: usize) -> Result<()> {
        #[cfg(test)]
        if core::mem::take(&mut self.fail_next_rehash) {
            return Err(CollectionError::out_of_memory(capacity));
        }
        if capacity > MAX_MAP_CAPACITY {
            log::trace!("hash table at maximum capacity {}", self.buckets.len());
            self.threshold = usize::MAX;
            return Ok(());
        }
        let mut buckets = alloc_buckets(capacity)?;
        for head in self.buckets.iter() {
            let mut cur = *head;
            while let Some(ek) = cur {
                let entry = &mut self.slots[ek];
                cur = entry.next();
                let index = bucket_index(entry.hash(), capacity);
                entry.set_next(buckets[index]);
                buckets[index] = Some(ek);
            }
        }
        log::trace!(
            "hash table rehashed: capacity {} -> {}, {} entries",
            self.buckets.len(),
            capacity,
            self.slots.len()
        );
        self.buckets = buckets;
        self.threshold = threshold_for(capacity, self.load_factor);
        Ok(())
    }

    /// Unlink and return the entry behind `ek`.
    pub(crate) fn remove(&mut self, ek: EntryKey) -> Option<E> {
        let entry = self.slots.get(ek)?;
        let index = bucket_index(entry.hash(), self.buckets.len());
        let next = entry.next();
        if self.buckets[index] == Some(ek) {
            self.buckets[index] = next;
        } else {
            let mut cur = self.buckets[index];
            while let Some(k) = cur {
                let after = self.slots[k].next();
                if after == Some(ek) {
                    self.slots[k].set_next(next);
                    break;
                }
                cur = after;
            }
        }
        self.slots.remove(ek)
    }

    /// Drop every entry, keeping the bucket array.
    pub(crate) fn clear(&mut self) {
        self.slots.clear();
        self.buckets.iter_mut().for_each(|b| *b = None);
    }

    /// First entry in bucket order at or after `bucket`.
    pub(crate) fn first_from(&self, bucket: usize) -> Option<(usize, EntryKey)> {
        self.buckets
            .iter()
            .enumerate()
            .skip(bucket)
            .find_map(|(i, head)| head.map(|ek| (i, ek)))
    }

    /// Entry after `ek` in bucket order: rest of the chain, then the next
    /// non-empty bucket.
    pub(crate) fn next_after(&self, bucket: usize, ek: EntryKey) -> Option<(usize, EntryKey)> {
        match self.slots.get(ek).and_then(|e| e.next()) {
            Some(next) => Some((bucket, next)),
            None => self.first_from(bucket + 1),
        }
    }

    pub(crate) fn entries(&self) -> Entries<'_, E> {
        Entries {
            table: self,
            pos: self.first_from(0),
            remaining: self.slots.len(),
        }
    }
}

/// Bucket-order iterator over table entries.
pub(crate) struct Entries<'a, E> {
    table: &'a ChainTable<E>,
    pos: Option<(usize, EntryKey)>,
    remaining: usize,
}

impl<'a, E: Chained> Iterator for Entries<'a, E> {
    type Item = (EntryKey, &'a E);

    fn next(&mut self) -> Option<Self::Item> {
        let (bucket, ek) = self.pos?;
        self.pos = self.table.next_after(bucket, ek);
        self.remaining -= 1;
        Some((ek, &self.table.slots[ek]))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

//! MultiHashMap: each key owns a run of distinct values.
//!
//! Table mechanics are shared with `HashMap`. An entry carries the key's
//! values and its own revision counter; `ValueEnumerator` checks only that
//! revision, so it keeps working while other keys change or the table
//! rehashes. An entry is dropped as soon as its last value goes.

use crate::array_list::ArrayList;
use crate::chain_table::{ChainTable, Chained, EntryKey};
use crate::compare::{Comparer, DefaultComparer};
use crate::config::MapOptions;
use crate::error::{CollectionError, Result};
use crate::hash_code::{spread, DefaultHashCodeProvider, HashCodeProvider};
use crate::interfaces::{Enumerator, MapEnumerator, MultiMap};
use crate::mod_count::{not_positioned, Cursor, ModCount, Stamp};
use core::fmt;
use core::marker::PhantomData;

#[derive(Debug, Clone)]
struct Entry<K, V> {
    key: K,
    hash: u32,
    next: Option<EntryKey>,
    values: Vec<V>,
    revision: u64,
}

impl<K, V> Entry<K, V> {
    #[inline]
    fn touch(&mut self) {
        self.revision = self.revision.wrapping_add(1);
    }
}

impl<K, V> Chained for Entry<K, V> {
    type Key = K;

    #[inline]
    fn key(&self) -> &K {
        &self.key
    }
    #[inline]
    fn hash(&self) -> u32 {
        self.hash
    }
    #[inline]
    fn next(&self) -> Option<EntryKey> {
        self.next
    }
    #[inline]
    fn set_next(&mut self, next: Option<EntryKey>) {
        self.next = next;
    }
}

#[derive(Clone)]
pub struct MultiHashMap<K, V, H = DefaultHashCodeProvider, C = DefaultComparer> {
    table: ChainTable<Entry<K, V>>,
    value_count: usize,
    hash_provider: H,
    comparer: C,
    mod_count: ModCount,
}

impl<K, V> MultiHashMap<K, V>
where
    DefaultHashCodeProvider: HashCodeProvider<K>,
    DefaultComparer: Comparer<K>,
    V: PartialEq,
{
    pub fn new() -> Self {
        Self::with_options(MapOptions::default())
            .expect("default map options are valid")
    }

    pub fn with_options(options: MapOptions) -> Result<Self> {
        Self::with_providers(options, DefaultHashCodeProvider, DefaultComparer)
    }
}

impl<K, V> Default for MultiHashMap<K, V>
where
    DefaultHashCodeProvider: HashCodeProvider<K>,
    DefaultComparer: Comparer<K>,
    V: PartialEq,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V, H, C> MultiHashMap<K, V, H, C>
where
    H: HashCodeProvider<K>,
    C: Comparer<K>,
    V: PartialEq,
{
    pub fn with_providers(options: MapOptions, hash_provider: H, comparer: C) -> Result<Self> {
        Ok(Self {
            table: ChainTable::with_options(&options)?,
            value_count: 0,
            hash_provider,
            comparer,
            mod_count: ModCount::new(),
        })
    }

    /// Number of values across all keys.
    pub fn count(&self) -> usize {
        self.value_count
    }

    pub fn key_count(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.value_count == 0
    }

    pub fn capacity(&self) -> usize {
        self.table.capacity()
    }

    fn find(&self, key: &K) -> Result<Option<EntryKey>> {
        let hash = spread(self.hash_provider.hash_code(key)?);
        self.table.find(key, hash, &self.comparer)
    }

    fn find_existing(&self, key: &K) -> Result<EntryKey> {
        self.find(key)?.ok_or(CollectionError::NotFound)
    }

    fn entry(&self, ek: EntryKey) -> &Entry<K, V> {
        self.table.get(ek).expect("found entry is live")
    }

    fn entry_mut(&mut self, ek: EntryKey) -> &mut Entry<K, V> {
        self.table.get_mut(ek).expect("found entry is live")
    }

    /// Attach `value` to `key`. A key may hold many values, but the exact
    /// pair may be present only once (`AlreadyExists`).
    pub fn add(&mut self, key: K, value: V) -> Result<()> {
        let hash = spread(self.hash_provider.hash_code(&key)?);
        match self.table.find(&key, hash, &self.comparer)? {
            Some(ek) => {
                let entry = self.table.get_mut(ek).expect("found entry is live");
                if entry.values.contains(&value) {
                    return Err(CollectionError::AlreadyExists);
                }
                entry
                    .values
                    .try_reserve(1)
                    .map_err(|e| CollectionError::from_reserve(e, 1))?;
                entry.values.push(value);
                entry.touch();
            }
            None => {
                // The entry is linked even when the rehash after it fails.
                let linked = self.table.insert_head(Entry {
                    key,
                    hash,
                    next: None,
                    values: vec![value],
                    revision: 0,
                });
                self.value_count += 1;
                self.mod_count.bump();
                return linked.map(|_| ());
            }
        }
        self.value_count += 1;
        self.mod_count.bump();
        Ok(())
    }

    /// Enumerator over the values of one key, in insertion order.
    pub fn get_values_n(&self, key: &K) -> Result<ValueEnumerator<K, V, H, C>> {
        let ek = self.find_existing(key)?;
        Ok(ValueEnumerator {
            owner: self.mod_count.owner(),
            entry: ek,
            revision: self.entry(ek).revision,
            cursor: Cursor::Unstarted,
            _pd: PhantomData,
        })
    }

    /// Borrowing view of a key's values.
    pub fn values_of(&self, key: &K) -> Result<&[V]> {
        let ek = self.find_existing(key)?;
        Ok(&self.entry(ek).values)
    }

    pub fn count_of(&self, key: &K) -> Result<usize> {
        Ok(self.values_of(key)?.len())
    }

    /// Remove a key with all of its values, returned in insertion order.
    pub fn remove(&mut self, key: &K) -> Result<Vec<V>> {
        let ek = self.find_existing(key)?;
        let entry = self.table.remove(ek).expect("found entry is live");
        self.value_count -= entry.values.len();
        self.mod_count.bump();
        Ok(entry.values)
    }

    /// Remove one pair. The key goes too once it has no values left.
    pub fn remove_value(&mut self, key: &K, value: &V) -> Result<V> {
        let ek = self.find_existing(key)?;
        let entry = self.entry_mut(ek);
        let pos = entry
            .values
            .iter()
            .position(|v| v == value)
            .ok_or(CollectionError::NotFound)?;
        let removed = entry.values.remove(pos);
        entry.touch();
        if entry.values.is_empty() {
            self.table.remove(ek);
        }
        self.value_count -= 1;
        self.mod_count.bump();
        Ok(removed)
    }

    /// Replace `old` with `new` under `key`, returning `old`. Fails
    /// `NotFound` when the pair is absent and `AlreadyExists` when `new` is
    /// already another value of the key.
    pub fn set_value(&mut self, key: &K, old: &V, new: V) -> Result<V> {
        let ek = self.find_existing(key)?;
        let entry = self.entry_mut(ek);
        let pos = entry
            .values
            .iter()
            .position(|v| v == old)
            .ok_or(CollectionError::NotFound)?;
        if new != *old && entry.values.contains(&new) {
            return Err(CollectionError::AlreadyExists);
        }
        let previous = core::mem::replace(&mut entry.values[pos], new);
        entry.touch();
        self.mod_count.bump();
        Ok(previous)
    }

    pub fn contains(&self, key: &K, value: &V) -> Result<bool> {
        Ok(match self.find(key)? {
            Some(ek) => self.entry(ek).values.contains(value),
            None => false,
        })
    }

    pub fn contains_key(&self, key: &K) -> Result<bool> {
        Ok(self.find(key)?.is_some())
    }

    pub fn contains_value(&self, value: &V) -> bool {
        self.table.entries().any(|(_, e)| e.values.contains(value))
    }

    pub fn remove_all(&mut self) {
        self.table.clear();
        self.value_count = 0;
        self.mod_count.bump();
    }

    /// Distinct keys in bucket order.
    pub fn get_keys_n(&self) -> Result<ArrayList<K>>
    where
        K: Clone,
    {
        let mut keys = ArrayList::with_capacity(self.table.len())?;
        for (_, e) in self.table.entries() {
            keys.add(e.key.clone())?;
        }
        Ok(keys)
    }

    /// Every value, in map-enumeration order.
    pub fn get_values_n_all(&self) -> Result<ArrayList<V>>
    where
        V: Clone,
    {
        let mut values = ArrayList::with_capacity(self.value_count)?;
        for (_, v) in self.iter() {
            values.add(v.clone())?;
        }
        Ok(values)
    }

    pub fn map_enumerator(&self) -> MultiHashMapEnumerator<K, V, H, C> {
        MultiHashMapEnumerator {
            stamp: self.mod_count.stamp(),
            state: PairCursor::Unstarted,
            _pd: PhantomData,
        }
    }

    /// Pairs in bucket → entry → value order.
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter {
            entries: self.table.entries(),
            current: None,
            remaining: self.value_count,
        }
    }
}

impl<K: fmt::Debug, V: fmt::Debug, H, C> fmt::Debug for MultiHashMap<K, V, H, C>
where
    H: HashCodeProvider<K>,
    C: Comparer<K>,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map()
            .entries(self.table.entries().map(|(_, e)| (&e.key, &e.values)))
            .finish()
    }
}

impl<'a, K, V, H, C> IntoIterator for &'a MultiHashMap<K, V, H, C>
where
    H: HashCodeProvider<K>,
    C: Comparer<K>,
    V: PartialEq,
{
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

pub struct Iter<'a, K, V> {
    entries: crate::chain_table::Entries<'a, Entry<K, V>>,
    current: Option<(&'a K, core::slice::Iter<'a, V>)>,
    remaining: usize,
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some((key, values)) = &mut self.current {
                if let Some(v) = values.next() {
                    self.remaining -= 1;
                    return Some((*key, v));
                }
            }
            let (_, e) = self.entries.next()?;
            self.current = Some((&e.key, e.values.iter()));
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum PairCursor {
    Unstarted,
    At {
        bucket: usize,
        entry: EntryKey,
        value: usize,
    },
    Exhausted,
}

/// Three-level cursor: bucket, then chain entry, then the entry's values.
pub struct MultiHashMapEnumerator<K, V, H = DefaultHashCodeProvider, C = DefaultComparer> {
    stamp: Stamp,
    state: PairCursor,
    _pd: PhantomData<fn() -> (K, V, H, C)>,
}

impl<K, V, H, C> Clone for MultiHashMapEnumerator<K, V, H, C> {
    fn clone(&self) -> Self {
        Self {
            stamp: self.stamp,
            state: self.state,
            _pd: PhantomData,
        }
    }
}

impl<K, V, H, C> MultiHashMapEnumerator<K, V, H, C>
where
    H: HashCodeProvider<K>,
    C: Comparer<K>,
    V: PartialEq,
{
    fn positioned<'s>(&self, source: &'s MultiHashMap<K, V, H, C>) -> Result<(&'s K, &'s V)> {
        self.stamp.check(&source.mod_count)?;
        match self.state {
            PairCursor::At { entry, value, .. } => {
                let e = source.entry(entry);
                Ok((&e.key, &e.values[value]))
            }
            _ => Err(not_positioned()),
        }
    }
}

impl<K, V, H, C> MapEnumerator for MultiHashMapEnumerator<K, V, H, C>
where
    H: HashCodeProvider<K>,
    C: Comparer<K>,
    V: PartialEq,
{
    type Source = MultiHashMap<K, V, H, C>;
    type Key = K;
    type Value = V;

    fn move_next(&mut self, source: &Self::Source) -> Result<()> {
        self.stamp.check(&source.mod_count)?;
        let next = match self.state {
            PairCursor::Unstarted => source.table.first_from(0),
            PairCursor::At {
                bucket,
                entry,
                value,
            } => {
                if value + 1 < source.entry(entry).values.len() {
                    self.state = PairCursor::At {
                        bucket,
                        entry,
                        value: value + 1,
                    };
                    return Ok(());
                }
                source.table.next_after(bucket, entry)
            }
            PairCursor::Exhausted => None,
        };
        match next {
            Some((bucket, entry)) => {
                self.state = PairCursor::At {
                    bucket,
                    entry,
                    value: 0,
                };
                Ok(())
            }
            None => {
                self.state = PairCursor::Exhausted;
                Err(CollectionError::out_of_range(
                    source.value_count,
                    source.value_count,
                ))
            }
        }
    }

    fn key<'s>(&self, source: &'s Self::Source) -> Result<&'s K> {
        self.positioned(source).map(|(k, _)| k)
    }

    fn value<'s>(&self, source: &'s Self::Source) -> Result<&'s V> {
        self.positioned(source).map(|(_, v)| v)
    }

    fn reset(&mut self, source: &Self::Source) -> Result<()> {
        self.stamp.check(&source.mod_count)?;
        self.state = PairCursor::Unstarted;
        Ok(())
    }
}

/// Cursor over one key's values. Invalidated by changes to that key only,
/// including its removal.
pub struct ValueEnumerator<K, V, H = DefaultHashCodeProvider, C = DefaultComparer> {
    owner: u64,
    entry: EntryKey,
    revision: u64,
    cursor: Cursor,
    _pd: PhantomData<fn() -> (K, V, H, C)>,
}

impl<K, V, H, C> Clone for ValueEnumerator<K, V, H, C> {
    fn clone(&self) -> Self {
        Self {
            owner: self.owner,
            entry: self.entry,
            revision: self.revision,
            cursor: self.cursor,
            _pd: PhantomData,
        }
    }
}

impl<K, V, H, C> ValueEnumerator<K, V, H, C> {
    fn values<'s>(&self, source: &'s MultiHashMap<K, V, H, C>) -> Result<&'s [V]> {
        if self.owner != source.mod_count.owner() {
            return Err(CollectionError::invalid_argument(
                "enumerator used with a different collection",
            ));
        }
        match source.table.get(self.entry) {
            Some(e) if e.revision == self.revision => Ok(&e.values),
            _ => Err(CollectionError::invalid_operation(
                "values of the key were modified after the enumerator was created",
            )),
        }
    }
}

impl<K, V, H, C> Enumerator for ValueEnumerator<K, V, H, C>
where
    H: HashCodeProvider<K>,
    C: Comparer<K>,
    V: PartialEq,
{
    type Source = MultiHashMap<K, V, H, C>;
    type Item = V;

    fn move_next(&mut self, source: &Self::Source) -> Result<()> {
        let len = self.values(source)?.len();
        self.cursor.advance(len)
    }

    fn current<'s>(&self, source: &'s Self::Source) -> Result<&'s V> {
        let values = self.values(source)?;
        Ok(&values[self.cursor.position()?])
    }

    fn reset(&mut self, source: &Self::Source) -> Result<()> {
        self.values(source)?;
        self.cursor = Cursor::Unstarted;
        Ok(())
    }
}

impl<K, V, H, C> MultiMap for MultiHashMap<K, V, H, C>
where
    H: HashCodeProvider<K>,
    C: Comparer<K>,
    V: PartialEq,
{
    type Key = K;
    type Value = V;
    type Enumerator = MultiHashMapEnumerator<K, V, H, C>;
    type ValueEnumerator = ValueEnumerator<K, V, H, C>;

    fn count(&self) -> usize {
        self.value_count
    }

    fn count_of(&self, key: &K) -> Result<usize> {
        MultiHashMap::count_of(self, key)
    }

    fn add(&mut self, key: K, value: V) -> Result<()> {
        MultiHashMap::add(self, key, value)
    }

    fn get_values_n(&self, key: &K) -> Result<Self::ValueEnumerator> {
        MultiHashMap::get_values_n(self, key)
    }

    fn remove(&mut self, key: &K) -> Result<Vec<V>> {
        MultiHashMap::remove(self, key)
    }

    fn remove_value(&mut self, key: &K, value: &V) -> Result<V> {
        MultiHashMap::remove_value(self, key, value)
    }

    fn set_value(&mut self, key: &K, old: &V, new: V) -> Result<V> {
        MultiHashMap::set_value(self, key, old, new)
    }

    fn contains(&self, key: &K, value: &V) -> Result<bool> {
        MultiHashMap::contains(self, key, value)
    }

    fn contains_key(&self, key: &K) -> Result<bool> {
        MultiHashMap::contains_key(self, key)
    }

    fn contains_value(&self, value: &V) -> bool {
        MultiHashMap::contains_value(self, value)
    }

    fn remove_all(&mut self) {
        MultiHashMap::remove_all(self)
    }

    fn get_keys_n(&self) -> Result<ArrayList<K>>
    where
        K: Clone,
    {
        MultiHashMap::get_keys_n(self)
    }

    fn get_values_n_all(&self) -> Result<ArrayList<V>>
    where
        V: Clone,
    {
        MultiHashMap::get_values_n_all(self)
    }

    fn map_enumerator(&self) -> Self::Enumerator {
        MultiHashMap::map_enumerator(self)
    }
}

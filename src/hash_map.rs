//! HashMap: unique-key map over a separately chained table.
//!
//! The raw code from the `HashCodeProvider` is passed through `spread` and
//! masked into a power-of-two bucket array. Keys are equal when their spread
//! hashes match and the `Comparer` reports `Equal`. `add` and `set_value` are
//! disjoint: the first only inserts, the second only replaces.

use crate::array_list::ArrayList;
use crate::chain_table::{ChainTable, Chained, EntryKey};
use crate::compare::{Comparer, DefaultComparer};
use crate::config::{MapOptions, DEFAULT_LOAD_FACTOR, DEFAULT_MAP_CAPACITY};
use crate::error::{CollectionError, Result};
use crate::hash_code::{spread, DefaultHashCodeProvider, HashCodeProvider};
use crate::interfaces::{Map, MapEnumerator};
use crate::mod_count::{not_positioned, ModCount, Stamp};
use core::fmt;
use core::marker::PhantomData;

#[derive(Debug, Clone)]
struct Entry<K, V> {
    key: K,
    value: V,
    hash: u32,
    next: Option<EntryKey>,
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
pub struct HashMap<K, V, H = DefaultHashCodeProvider, C = DefaultComparer> {
    table: ChainTable<Entry<K, V>>,
    hash_provider: H,
    comparer: C,
    mod_count: ModCount,
}

impl<K, V> HashMap<K, V>
where
    DefaultHashCodeProvider: HashCodeProvider<K>,
    DefaultComparer: Comparer<K>,
{
    /// Map with 16 buckets, load factor 0.75 and the default providers.
    pub fn new() -> Self {
        Self::with_options(MapOptions::default())
            .expect("default map options are valid")
    }

    pub fn with_options(options: MapOptions) -> Result<Self> {
        Self::with_providers(options, DefaultHashCodeProvider, DefaultComparer)
    }

    /// Copy every pair of another map, walking it through its enumerator.
    pub fn from_map<M>(map: &M) -> Result<Self>
    where
        M: Map<Key = K, Value = V> + ?Sized,
        K: Clone,
        V: Clone,
    {
        let capacity = ((map.count() as f32 / DEFAULT_LOAD_FACTOR) as usize + 1)
            .max(DEFAULT_MAP_CAPACITY);
        let mut out = Self::with_options(MapOptions::default().with_capacity(capacity))?;
        let mut e = map.map_enumerator();
        while e.try_advance(map)? {
            let (k, v) = e.current(map)?;
            out.add(k.clone(), v.clone())?;
        }
        Ok(out)
    }
}

impl<K, V> Default for HashMap<K, V>
where
    DefaultHashCodeProvider: HashCodeProvider<K>,
    DefaultComparer: Comparer<K>,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V, H, C> HashMap<K, V, H, C>
where
    H: HashCodeProvider<K>,
    C: Comparer<K>,
{
    /// Map using caller-supplied providers. Pass `&provider` (or an `Rc`) to
    /// keep ownership on the caller's side.
    pub fn with_providers(options: MapOptions, hash_provider: H, comparer: C) -> Result<Self> {
        Ok(Self {
            table: ChainTable::with_options(&options)?,
            hash_provider,
            comparer,
            mod_count: ModCount::new(),
        })
    }

    pub fn count(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.len() == 0
    }

    /// Current number of buckets.
    pub fn capacity(&self) -> usize {
        self.table.capacity()
    }

    #[inline]
    fn hash_of(&self, key: &K) -> Result<u32> {
        Ok(spread(self.hash_provider.hash_code(key)?))
    }

    fn find(&self, key: &K) -> Result<Option<EntryKey>> {
        let hash = self.hash_of(key)?;
        self.table.find(key, hash, &self.comparer)
    }

    fn entry(&self, ek: EntryKey) -> &Entry<K, V> {
        self.table.get(ek).expect("found entry is live")
    }

    /// Insert a new pair. Fails `AlreadyExists` if the key is present; the
    /// map is unchanged in that case.
    pub fn add(&mut self, key: K, value: V) -> Result<()> {
        let hash = self.hash_of(&key)?;
        if self.table.find(&key, hash, &self.comparer)?.is_some() {
            return Err(CollectionError::AlreadyExists);
        }
        self.mod_count.bump();
        self.table.insert_head(Entry {
            key,
            value,
            hash,
            next: None,
        })?;
        Ok(())
    }

    pub fn get_value(&self, key: &K) -> Result<&V> {
        let ek = self.find(key)?.ok_or(CollectionError::NotFound)?;
        Ok(&self.entry(ek).value)
    }

    /// Mutable access counts as a modification.
    pub fn get_value_mut(&mut self, key: &K) -> Result<&mut V> {
        let ek = self.find(key)?.ok_or(CollectionError::NotFound)?;
        self.mod_count.bump();
        let entry = self.table.get_mut(ek).expect("found entry is live");
        Ok(&mut entry.value)
    }

    /// Replace the value of an existing key, returning the old one. Fails
    /// `NotFound` when the key is absent.
    pub fn set_value(&mut self, key: &K, value: V) -> Result<V> {
        let ek = self.find(key)?.ok_or(CollectionError::NotFound)?;
        self.mod_count.bump();
        let entry = self.table.get_mut(ek).expect("found entry is live");
        Ok(core::mem::replace(&mut entry.value, value))
    }

    pub fn remove(&mut self, key: &K) -> Result<V> {
        let ek = self.find(key)?.ok_or(CollectionError::NotFound)?;
        let entry = self.table.remove(ek).expect("found entry is live");
        self.mod_count.bump();
        Ok(entry.value)
    }

    pub fn contains_key(&self, key: &K) -> Result<bool> {
        Ok(self.find(key)?.is_some())
    }

    pub fn contains_value(&self, value: &V) -> bool
    where
        V: PartialEq,
    {
        self.table.entries().any(|(_, e)| e.value == *value)
    }

    pub fn remove_all(&mut self) {
        self.table.clear();
        self.mod_count.bump();
    }

    /// Keys in bucket order; parallel to `get_values_n`.
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

    /// Values in bucket order; parallel to `get_keys_n`.
    pub fn get_values_n(&self) -> Result<ArrayList<V>>
    where
        V: Clone,
    {
        let mut values = ArrayList::with_capacity(self.table.len())?;
        for (_, e) in self.table.entries() {
            values.add(e.value.clone())?;
        }
        Ok(values)
    }

    pub fn map_enumerator(&self) -> HashMapEnumerator<K, V, H, C> {
        HashMapEnumerator {
            stamp: self.mod_count.stamp(),
            state: EntryCursor::Unstarted,
            _pd: PhantomData,
        }
    }

    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter {
            entries: self.table.entries(),
        }
    }
}

impl<K: fmt::Debug, V: fmt::Debug, H, C> fmt::Debug for HashMap<K, V, H, C>
where
    H: HashCodeProvider<K>,
    C: Comparer<K>,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<'a, K, V, H, C> IntoIterator for &'a HashMap<K, V, H, C>
where
    H: HashCodeProvider<K>,
    C: Comparer<K>,
{
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Bucket-order iterator over a `HashMap`.
pub struct Iter<'a, K, V> {
    entries: crate::chain_table::Entries<'a, Entry<K, V>>,
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        self.entries.next().map(|(_, e)| (&e.key, &e.value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.entries.size_hint()
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum EntryCursor {
    Unstarted,
    At { bucket: usize, entry: EntryKey },
    Exhausted,
}

/// Two-level cursor over a `HashMap`: a chain is exhausted before moving
/// to the next non-empty bucket.
pub struct HashMapEnumerator<K, V, H = DefaultHashCodeProvider, C = DefaultComparer> {
    stamp: Stamp,
    state: EntryCursor,
    _pd: PhantomData<fn() -> (K, V, H, C)>,
}

impl<K, V, H, C> Clone for HashMapEnumerator<K, V, H, C> {
    fn clone(&self) -> Self {
        Self {
            stamp: self.stamp,
            state: self.state,
            _pd: PhantomData,
        }
    }
}

impl<K, V, H, C> HashMapEnumerator<K, V, H, C>
where
    H: HashCodeProvider<K>,
    C: Comparer<K>,
{
    fn positioned<'s>(&self, source: &'s HashMap<K, V, H, C>) -> Result<&'s Entry<K, V>> {
        self.stamp.check(&source.mod_count)?;
        match self.state {
            EntryCursor::At { entry, .. } => Ok(source.entry(entry)),
            _ => Err(not_positioned()),
        }
    }
}

impl<K, V, H, C> MapEnumerator for HashMapEnumerator<K, V, H, C>
where
    H: HashCodeProvider<K>,
    C: Comparer<K>,
{
    type Source = HashMap<K, V, H, C>;
    type Key = K;
    type Value = V;

    fn move_next(&mut self, source: &Self::Source) -> Result<()> {
        self.stamp.check(&source.mod_count)?;
        let next = match self.state {
            EntryCursor::Unstarted => source.table.first_from(0),
            EntryCursor::At { bucket, entry } => source.table.next_after(bucket, entry),
            EntryCursor::Exhausted => None,
        };
        match next {
            Some((bucket, entry)) => {
                self.state = EntryCursor::At { bucket, entry };
                Ok(())
            }
            None => {
                self.state = EntryCursor::Exhausted;
                let count = source.table.len();
                Err(CollectionError::out_of_range(count, count))
            }
        }
    }

    fn key<'s>(&self, source: &'s Self::Source) -> Result<&'s K> {
        self.positioned(source).map(|e| &e.key)
    }

    fn value<'s>(&self, source: &'s Self::Source) -> Result<&'s V> {
        self.positioned(source).map(|e| &e.value)
    }

    fn reset(&mut self, source: &Self::Source) -> Result<()> {
        self.stamp.check(&source.mod_count)?;
        self.state = EntryCursor::Unstarted;
        Ok(())
    }
}

impl<K, V, H, C> Map for HashMap<K, V, H, C>
where
    H: HashCodeProvider<K>,
    C: Comparer<K>,
{
    type Key = K;
    type Value = V;
    type Enumerator = HashMapEnumerator<K, V, H, C>;

    fn count(&self) -> usize {
        self.table.len()
    }

    fn add(&mut self, key: K, value: V) -> Result<()> {
        HashMap::add(self, key, value)
    }

    fn get_value(&self, key: &K) -> Result<&V> {
        HashMap::get_value(self, key)
    }

    fn set_value(&mut self, key: &K, value: V) -> Result<V> {
        HashMap::set_value(self, key, value)
    }

    fn remove(&mut self, key: &K) -> Result<V> {
        HashMap::remove(self, key)
    }

    fn contains_key(&self, key: &K) -> Result<bool> {
        HashMap::contains_key(self, key)
    }

    fn contains_value(&self, value: &V) -> bool
    where
        V: PartialEq,
    {
        HashMap::contains_value(self, value)
    }

    fn remove_all(&mut self) {
        HashMap::remove_all(self)
    }

    fn get_keys_n(&self) -> Result<ArrayList<K>>
    where
        K: Clone,
    {
        HashMap::get_keys_n(self)
    }

    fn get_values_n(&self) -> Result<ArrayList<V>>
    where
        V: Clone,
    {
        HashMap::get_values_n(self)
    }

    fn map_enumerator(&self) -> Self::Enumerator {
        HashMap::map_enumerator(self)
    }
}

//! ArrayList: contiguous, index-addressed list with explicit capacity.
//!
//! The buffer grows only when an insertion overflows it, by the amount the
//! growth policy `G` decides: exactly what the operation needs (`Exact`), or
//! fixed chunks (`Chunked`, which also trims after single removals).

use crate::compare::Comparer;
use crate::config::DEFAULT_CAPACITY;
use crate::error::{CollectionError, Result};
use crate::growth::{Exact, GrowthPolicy};
use crate::interfaces::{Collection, Enumerator, List};
use crate::mod_count::{Cursor, ModCount, Stamp};
use crate::sort::quick_sort;
use core::fmt;
use core::marker::PhantomData;

#[derive(Clone)]
pub struct ArrayList<T, G = Exact> {
    items: Vec<T>,
    capacity: usize,
    mod_count: ModCount,
    _growth: PhantomData<G>,
}

impl<T, G: GrowthPolicy> ArrayList<T, G> {
    pub fn new() -> Self {
        Self {
            items: Vec::with_capacity(DEFAULT_CAPACITY),
            capacity: DEFAULT_CAPACITY,
            mod_count: ModCount::new(),
            _growth: PhantomData,
        }
    }

    pub fn with_capacity(capacity: usize) -> Result<Self> {
        let mut items = Vec::new();
        items
            .try_reserve_exact(capacity)
            .map_err(|e| CollectionError::from_reserve(e, capacity))?;
        Ok(Self {
            items,
            capacity,
            mod_count: ModCount::new(),
            _growth: PhantomData,
        })
    }

    /// Copy every element of `from`, sized exactly to its count.
    pub fn from_collection<C>(from: &C) -> Result<Self>
    where
        C: Collection<Item = T> + ?Sized,
        T: Clone,
    {
        let mut list = Self::with_capacity(from.count())?;
        list.items.extend(from.iter().cloned());
        Ok(list)
    }

    pub fn count(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn as_slice(&self) -> &[T] {
        &self.items
    }

    fn ensure_room(&mut self, needed: usize) -> Result<()> {
        let count = self.items.len();
        if count + needed <= self.capacity {
            return Ok(());
        }
        let capacity = G::grow(self.capacity, count, needed);
        self.items
            .try_reserve_exact(capacity - count)
            .map_err(|e| CollectionError::from_reserve(e, capacity))?;
        log::trace!("array list grew: capacity {} -> {}", self.capacity, capacity);
        self.capacity = capacity;
        Ok(())
    }

    fn check_index(&self, index: usize) -> Result<()> {
        if index < self.items.len() {
            Ok(())
        } else {
            Err(CollectionError::out_of_range(index, self.items.len()))
        }
    }

    fn check_range(&self, start: usize, count: usize) -> Result<usize> {
        match start.checked_add(count) {
            Some(end) if end <= self.items.len() => Ok(end),
            _ => Err(CollectionError::out_of_range(
                start.saturating_add(count),
                self.items.len(),
            )),
        }
    }

    fn shrink_to_count(&mut self) {
        if self.capacity > self.items.len() {
            log::trace!("array list trimmed: capacity {} -> {}", self.capacity, self.items.len());
            self.items.shrink_to_fit();
            self.capacity = self.items.len();
        }
    }

    pub fn add(&mut self, item: T) -> Result<()> {
        self.ensure_room(1)?;
        self.items.push(item);
        self.mod_count.bump();
        Ok(())
    }

    /// Append every element of `from`.
    pub fn add_items<C>(&mut self, from: &C) -> Result<()>
    where
        C: Collection<Item = T> + ?Sized,
        T: Clone,
    {
        self.ensure_room(from.count())?;
        self.items.extend(from.iter().cloned());
        self.mod_count.bump();
        Ok(())
    }

    pub fn insert_at(&mut self, item: T, index: usize) -> Result<()> {
        if index > self.items.len() {
            return Err(CollectionError::out_of_range(index, self.items.len()));
        }
        self.ensure_room(1)?;
        self.items.insert(index, item);
        self.mod_count.bump();
        Ok(())
    }

    /// Insert every element of `from` so the first lands at `index`.
    pub fn insert_items_from<C>(&mut self, index: usize, from: &C) -> Result<()>
    where
        C: Collection<Item = T> + ?Sized,
        T: Clone,
    {
        if index > self.items.len() {
            return Err(CollectionError::out_of_range(index, self.items.len()));
        }
        self.ensure_room(from.count())?;
        self.items
            .splice(index..index, from.iter().cloned())
            .for_each(drop);
        self.mod_count.bump();
        Ok(())
    }

    pub fn get_at(&self, index: usize) -> Result<&T> {
        self.items
            .get(index)
            .ok_or_else(|| CollectionError::out_of_range(index, self.items.len()))
    }

    /// Mutable access counts as a modification.
    pub fn get_at_mut(&mut self, index: usize) -> Result<&mut T> {
        self.check_index(index)?;
        self.mod_count.bump();
        Ok(&mut self.items[index])
    }

    pub fn set_at(&mut self, item: T, index: usize) -> Result<T> {
        self.check_index(index)?;
        self.mod_count.bump();
        Ok(core::mem::replace(&mut self.items[index], item))
    }

    pub fn remove_at(&mut self, index: usize) -> Result<T> {
        self.check_index(index)?;
        let item = self.items.remove(index);
        self.mod_count.bump();
        if G::TRIM_ON_REMOVE {
            self.shrink_to_count();
        }
        Ok(item)
    }

    /// Remove the first element equal to `item` and hand it back.
    pub fn remove(&mut self, item: &T) -> Result<T>
    where
        T: PartialEq,
    {
        let index = self.index_of(item)?;
        self.remove_at(index)
    }

    pub fn remove_items(&mut self, start: usize, count: usize) -> Result<()> {
        let end = self.check_range(start, count)?;
        self.items.drain(start..end);
        self.mod_count.bump();
        Ok(())
    }

    /// Remove every element that is also present in `from`.
    pub fn remove_items_in<C>(&mut self, from: &C) -> Result<()>
    where
        C: Collection<Item = T> + ?Sized,
        T: PartialEq,
    {
        let before = self.items.len();
        self.items.retain(|x| !from.contains(x));
        if self.items.len() != before {
            self.mod_count.bump();
        }
        Ok(())
    }

    pub fn remove_all(&mut self) {
        self.items.clear();
        self.mod_count.bump();
    }

    pub fn index_of(&self, item: &T) -> Result<usize>
    where
        T: PartialEq,
    {
        self.items
            .iter()
            .position(|x| x == item)
            .ok_or(CollectionError::NotFound)
    }

    /// Search `count` elements starting at `start`.
    pub fn index_of_from(&self, item: &T, start: usize, count: usize) -> Result<usize>
    where
        T: PartialEq,
    {
        let end = self.check_range(start, count)?;
        self.items[start..end]
            .iter()
            .position(|x| x == item)
            .map(|i| start + i)
            .ok_or(CollectionError::NotFound)
    }

    pub fn last_index_of(&self, item: &T) -> Result<usize>
    where
        T: PartialEq,
    {
        self.items
            .iter()
            .rposition(|x| x == item)
            .ok_or(CollectionError::NotFound)
    }

    pub fn contains(&self, item: &T) -> bool
    where
        T: PartialEq,
    {
        self.items.contains(item)
    }

    pub fn contains_all<C>(&self, other: &C) -> bool
    where
        C: Collection<Item = T> + ?Sized,
        T: PartialEq,
    {
        other.iter().all(|x| self.items.contains(x))
    }

    /// Copy of `count` elements starting at `start`.
    pub fn get_items_n(&self, start: usize, count: usize) -> Result<ArrayList<T, G>>
    where
        T: Clone,
    {
        let end = self.check_range(start, count)?;
        let mut out = Self::with_capacity(count)?;
        out.items.extend_from_slice(&self.items[start..end]);
        Ok(out)
    }

    /// Sort in place. On comparer failure the list is left partially sorted
    /// and outstanding enumerators are invalidated either way.
    pub fn sort<C>(&mut self, comparer: &C) -> Result<()>
    where
        C: Comparer<T> + ?Sized,
    {
        let result = quick_sort(self.items.as_mut_slice(), comparer);
        self.mod_count.bump();
        result
    }

    /// Shrink the capacity to the count.
    pub fn trim(&mut self) {
        self.shrink_to_count();
        self.mod_count.bump();
    }

    /// Fails `InvalidArgument` when `capacity` is below the count.
    pub fn set_capacity(&mut self, capacity: usize) -> Result<()> {
        let count = self.items.len();
        if capacity < count {
            return Err(CollectionError::invalid_argument(format!(
                "capacity {} is below count {}",
                capacity, count
            )));
        }
        if capacity > self.capacity {
            self.items
                .try_reserve_exact(capacity - count)
                .map_err(|e| CollectionError::from_reserve(e, capacity))?;
        } else {
            self.items.shrink_to(capacity);
        }
        self.capacity = capacity;
        self.mod_count.bump();
        Ok(())
    }

    pub fn enumerator(&self) -> ArrayListEnumerator<T, G> {
        ArrayListEnumerator {
            stamp: self.mod_count.stamp(),
            cursor: Cursor::Unstarted,
            _pd: PhantomData,
        }
    }

    pub fn iter(&self) -> core::slice::Iter<'_, T> {
        self.items.iter()
    }
}

impl<T, G: GrowthPolicy> Default for ArrayList<T, G> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: fmt::Debug, G> fmt::Debug for ArrayList<T, G> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.items.iter()).finish()
    }
}

impl<T: PartialEq, G> PartialEq for ArrayList<T, G> {
    fn eq(&self, other: &Self) -> bool {
        self.items == other.items
    }
}

impl<T, G: GrowthPolicy> FromIterator<T> for ArrayList<T, G> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let items: Vec<T> = iter.into_iter().collect();
        let capacity = items.len().max(DEFAULT_CAPACITY);
        let mut list = Self {
            items,
            capacity,
            mod_count: ModCount::new(),
            _growth: PhantomData,
        };
        list.items.reserve_exact(capacity - list.items.len());
        list
    }
}

impl<'a, T, G: GrowthPolicy> IntoIterator for &'a ArrayList<T, G> {
    type Item = &'a T;
    type IntoIter = core::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

/// Forward cursor over an `ArrayList`.
pub struct ArrayListEnumerator<T, G = Exact> {
    stamp: Stamp,
    cursor: Cursor,
    _pd: PhantomData<fn() -> (T, G)>,
}

impl<T, G> Clone for ArrayListEnumerator<T, G> {
    fn clone(&self) -> Self {
        Self {
            stamp: self.stamp,
            cursor: self.cursor,
            _pd: PhantomData,
        }
    }
}

impl<T, G: GrowthPolicy> Enumerator for ArrayListEnumerator<T, G> {
    type Source = ArrayList<T, G>;
    type Item = T;

    fn move_next(&mut self, source: &ArrayList<T, G>) -> Result<()> {
        self.stamp.check(&source.mod_count)?;
        self.cursor.advance(source.items.len())
    }

    fn current<'s>(&self, source: &'s ArrayList<T, G>) -> Result<&'s T> {
        self.stamp.check(&source.mod_count)?;
        let i = self.cursor.position()?;
        Ok(&source.items[i])
    }

    fn reset(&mut self, source: &ArrayList<T, G>) -> Result<()> {
        self.stamp.check(&source.mod_count)?;
        self.cursor = Cursor::Unstarted;
        Ok(())
    }
}

impl<T, G: GrowthPolicy> Collection for ArrayList<T, G> {
    type Item = T;
    type Enumerator = ArrayListEnumerator<T, G>;
    type Iter<'a>
        = core::slice::Iter<'a, T>
    where
        Self: 'a;

    fn count(&self) -> usize {
        self.items.len()
    }

    fn enumerator(&self) -> Self::Enumerator {
        ArrayList::enumerator(self)
    }

    fn iter(&self) -> Self::Iter<'_> {
        self.items.iter()
    }
}

impl<T, G: GrowthPolicy> List for ArrayList<T, G> {
    fn add(&mut self, item: T) -> Result<()> {
        ArrayList::add(self, item)
    }

    fn insert_at(&mut self, item: T, index: usize) -> Result<()> {
        ArrayList::insert_at(self, item, index)
    }

    fn get_at(&self, index: usize) -> Result<&T> {
        ArrayList::get_at(self, index)
    }

    fn get_at_mut(&mut self, index: usize) -> Result<&mut T> {
        ArrayList::get_at_mut(self, index)
    }

    fn set_at(&mut self, item: T, index: usize) -> Result<T> {
        ArrayList::set_at(self, item, index)
    }

    fn remove_at(&mut self, index: usize) -> Result<T> {
        ArrayList::remove_at(self, index)
    }

    fn remove_items(&mut self, start: usize, count: usize) -> Result<()> {
        ArrayList::remove_items(self, start, count)
    }

    fn remove_all(&mut self) {
        ArrayList::remove_all(self)
    }

    fn index_of(&self, item: &T) -> Result<usize>
    where
        T: PartialEq,
    {
        ArrayList::index_of(self, item)
    }

    fn last_index_of(&self, item: &T) -> Result<usize>
    where
        T: PartialEq,
    {
        ArrayList::last_index_of(self, item)
    }

    fn get_items_n(&self, start: usize, count: usize) -> Result<Self>
    where
        T: Clone,
    {
        ArrayList::get_items_n(self, start, count)
    }

    fn sort<C>(&mut self, comparer: &C) -> Result<()>
    where
        C: Comparer<T> + ?Sized,
    {
        ArrayList::sort(self, comparer)
    }
}

//! Capability traits implemented by the containers.
//!
//! Enumerators are detached cursors: they do not borrow their source, every
//! call takes the source by reference instead. This keeps the fail-fast
//! contract observable: mutate the container, and the next call on any
//! enumerator created before the mutation fails with `InvalidOperation`.
//! For ordinary iteration use `Collection::iter`, which borrows.

use crate::array_list::ArrayList;
use crate::compare::Comparer;
use crate::error::{CollectionError, Result};

/// Fail-fast cursor over a collection's elements.
pub trait Enumerator {
    type Source: ?Sized;
    type Item: ?Sized;

    /// Advance to the next element. Fails `OutOfRange` once past the end.
    fn move_next(&mut self, source: &Self::Source) -> Result<()>;

    /// Element under the cursor. Fails `InvalidOperation` before the first
    /// `move_next` and after exhaustion.
    fn current<'s>(&self, source: &'s Self::Source) -> Result<&'s Self::Item>;

    /// Rewind to before the first element.
    fn reset(&mut self, source: &Self::Source) -> Result<()>;

    /// `move_next` with exhaustion reported as `Ok(false)`.
    fn try_advance(&mut self, source: &Self::Source) -> Result<bool> {
        match self.move_next(source) {
            Ok(()) => Ok(true),
            Err(CollectionError::OutOfRange { .. }) => Ok(false),
            Err(e) => Err(e),
        }
    }
}

/// Fail-fast cursor over a map's key/value pairs.
pub trait MapEnumerator {
    type Source: ?Sized;
    type Key;
    type Value;

    fn move_next(&mut self, source: &Self::Source) -> Result<()>;
    fn key<'s>(&self, source: &'s Self::Source) -> Result<&'s Self::Key>;
    fn value<'s>(&self, source: &'s Self::Source) -> Result<&'s Self::Value>;
    fn reset(&mut self, source: &Self::Source) -> Result<()>;

    fn current<'s>(&self, source: &'s Self::Source) -> Result<(&'s Self::Key, &'s Self::Value)> {
        Ok((self.key(source)?, self.value(source)?))
    }

    fn try_advance(&mut self, source: &Self::Source) -> Result<bool> {
        match self.move_next(source) {
            Ok(()) => Ok(true),
            Err(CollectionError::OutOfRange { .. }) => Ok(false),
            Err(e) => Err(e),
        }
    }
}

/// A counted group of elements that can be enumerated.
pub trait Collection {
    type Item;
    type Enumerator: Enumerator<Source = Self, Item = Self::Item>;
    type Iter<'a>: Iterator<Item = &'a Self::Item>
    where
        Self: 'a;

    fn count(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.count() == 0
    }

    fn enumerator(&self) -> Self::Enumerator;

    fn iter(&self) -> Self::Iter<'_>;

    fn contains(&self, item: &Self::Item) -> bool
    where
        Self::Item: PartialEq,
    {
        self.iter().any(|x| x == item)
    }

    /// True when every element of `other` is present here.
    fn contains_all<C>(&self, other: &C) -> bool
    where
        C: Collection<Item = Self::Item> + ?Sized,
        Self::Item: PartialEq,
    {
        other.iter().all(|x| self.contains(x))
    }
}

/// Index-addressable collection.
pub trait List: Collection {
    fn add(&mut self, item: Self::Item) -> Result<()>;

    /// Insert so that `item` ends up at `index`; `index == count` appends.
    fn insert_at(&mut self, item: Self::Item, index: usize) -> Result<()>;

    fn get_at(&self, index: usize) -> Result<&Self::Item>;

    fn get_at_mut(&mut self, index: usize) -> Result<&mut Self::Item>;

    /// Replace the element at `index`, returning the previous one.
    fn set_at(&mut self, item: Self::Item, index: usize) -> Result<Self::Item>;

    fn remove_at(&mut self, index: usize) -> Result<Self::Item>;

    /// Remove `count` elements starting at `start`.
    fn remove_items(&mut self, start: usize, count: usize) -> Result<()>;

    fn remove_all(&mut self);

    fn index_of(&self, item: &Self::Item) -> Result<usize>
    where
        Self::Item: PartialEq;

    fn last_index_of(&self, item: &Self::Item) -> Result<usize>
    where
        Self::Item: PartialEq;

    /// Copy `count` elements starting at `start` into a new list.
    fn get_items_n(&self, start: usize, count: usize) -> Result<Self>
    where
        Self: Sized,
        Self::Item: Clone;

    fn sort<C>(&mut self, comparer: &C) -> Result<()>
    where
        C: Comparer<Self::Item> + ?Sized;
}

/// Unique-key map.
pub trait Map {
    type Key;
    type Value;
    type Enumerator: MapEnumerator<Source = Self, Key = Self::Key, Value = Self::Value>;

    fn count(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.count() == 0
    }

    /// Fails `AlreadyExists` when the key is present.
    fn add(&mut self, key: Self::Key, value: Self::Value) -> Result<()>;

    fn get_value(&self, key: &Self::Key) -> Result<&Self::Value>;

    /// Replace the value of an existing key. Fails `NotFound` when absent.
    fn set_value(&mut self, key: &Self::Key, value: Self::Value) -> Result<Self::Value>;

    fn remove(&mut self, key: &Self::Key) -> Result<Self::Value>;

    fn contains_key(&self, key: &Self::Key) -> Result<bool>;

    fn contains_value(&self, value: &Self::Value) -> bool
    where
        Self::Value: PartialEq;

    fn remove_all(&mut self);

    fn get_keys_n(&self) -> Result<ArrayList<Self::Key>>
    where
        Self::Key: Clone;

    fn get_values_n(&self) -> Result<ArrayList<Self::Value>>
    where
        Self::Value: Clone;

    fn map_enumerator(&self) -> Self::Enumerator;
}

/// Map from a key to one or more distinct values.
pub trait MultiMap {
    type Key;
    type Value;
    type Enumerator: MapEnumerator<Source = Self, Key = Self::Key, Value = Self::Value>;
    type ValueEnumerator: Enumerator<Source = Self, Item = Self::Value>;

    /// Number of values across all keys.
    fn count(&self) -> usize;

    fn count_of(&self, key: &Self::Key) -> Result<usize>;

    /// Fails `AlreadyExists` when the exact pair is present.
    fn add(&mut self, key: Self::Key, value: Self::Value) -> Result<()>;

    fn get_values_n(&self, key: &Self::Key) -> Result<Self::ValueEnumerator>;

    /// Remove the key and all of its values.
    fn remove(&mut self, key: &Self::Key) -> Result<Vec<Self::Value>>;

    fn remove_value(&mut self, key: &Self::Key, value: &Self::Value) -> Result<Self::Value>;

    fn set_value(
        &mut self,
        key: &Self::Key,
        old: &Self::Value,
        new: Self::Value,
    ) -> Result<Self::Value>;

    fn contains(&self, key: &Self::Key, value: &Self::Value) -> Result<bool>;

    fn contains_key(&self, key: &Self::Key) -> Result<bool>;

    fn contains_value(&self, value: &Self::Value) -> bool;

    fn remove_all(&mut self);

    /// Distinct keys.
    fn get_keys_n(&self) -> Result<ArrayList<Self::Key>>
    where
        Self::Key: Clone;

    /// Every value of every key, in map-enumeration order.
    fn get_values_n_all(&self) -> Result<ArrayList<Self::Value>>
    where
        Self::Value: Clone;

    fn map_enumerator(&self) -> Self::Enumerator;
}

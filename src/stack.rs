//! Stack: LIFO over a growable buffer; the buffer length is the top marker.

use crate::config::DEFAULT_CAPACITY;
use crate::error::{CollectionError, Result};
use crate::growth::{Chunked, GrowthPolicy};
use crate::interfaces::{Collection, Enumerator};
use crate::mod_count::{Cursor, ModCount, Stamp};
use core::fmt;
use core::marker::PhantomData;

#[derive(Clone)]
pub struct Stack<T, G = Chunked> {
    items: Vec<T>,
    capacity: usize,
    mod_count: ModCount,
    _growth: PhantomData<G>,
}

impl<T, G: GrowthPolicy> Stack<T, G> {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY).expect("default stack capacity fits in memory")
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

    /// Push every element of `from` in its iteration order; the last one
    /// ends up on top.
    pub fn from_collection<C>(from: &C) -> Result<Self>
    where
        C: Collection<Item = T> + ?Sized,
        T: Clone,
    {
        let mut stack = Self::with_capacity(from.count())?;
        for item in from.iter() {
            stack.push(item.clone())?;
        }
        Ok(stack)
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

    pub fn push(&mut self, item: T) -> Result<()> {
        let count = self.items.len();
        if count == self.capacity {
            let capacity = G::grow(self.capacity, count, 1);
            self.items
                .try_reserve_exact(capacity - count)
                .map_err(|e| CollectionError::from_reserve(e, capacity))?;
            log::trace!("stack grew: capacity {} -> {}", self.capacity, capacity);
            self.capacity = capacity;
        }
        self.items.push(item);
        self.mod_count.bump();
        Ok(())
    }

    /// Remove the top element. Fails `Underflow` when empty.
    pub fn pop(&mut self) -> Result<T> {
        let item = self.items.pop().ok_or(CollectionError::Underflow)?;
        self.mod_count.bump();
        Ok(item)
    }

    pub fn peek(&self) -> Result<&T> {
        self.items.last().ok_or(CollectionError::Underflow)
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

    pub fn remove_all(&mut self) {
        self.items.clear();
        self.mod_count.bump();
    }

    /// Bottom-to-top copy of the elements.
    pub fn to_vec(&self) -> Vec<T>
    where
        T: Clone,
    {
        self.items.clone()
    }

    pub fn enumerator(&self) -> StackEnumerator<T, G> {
        StackEnumerator {
            stamp: self.mod_count.stamp(),
            cursor: Cursor::Unstarted,
            _pd: PhantomData,
        }
    }

    /// Bottom to top.
    pub fn iter(&self) -> core::slice::Iter<'_, T> {
        self.items.iter()
    }
}

impl<T, G: GrowthPolicy> Default for Stack<T, G> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: fmt::Debug, G> fmt::Debug for Stack<T, G> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.items.iter()).finish()
    }
}

impl<'a, T, G: GrowthPolicy> IntoIterator for &'a Stack<T, G> {
    type Item = &'a T;
    type IntoIter = core::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

pub struct StackEnumerator<T, G = Chunked> {
    stamp: Stamp,
    cursor: Cursor,
    _pd: PhantomData<fn() -> (T, G)>,
}

impl<T, G> Clone for StackEnumerator<T, G> {
    fn clone(&self) -> Self {
        Self {
            stamp: self.stamp,
            cursor: self.cursor,
            _pd: PhantomData,
        }
    }
}

impl<T, G: GrowthPolicy> Enumerator for StackEnumerator<T, G> {
    type Source = Stack<T, G>;
    type Item = T;

    fn move_next(&mut self, source: &Stack<T, G>) -> Result<()> {
        self.stamp.check(&source.mod_count)?;
        self.cursor.advance(source.items.len())
    }

    fn current<'s>(&self, source: &'s Stack<T, G>) -> Result<&'s T> {
        self.stamp.check(&source.mod_count)?;
        Ok(&source.items[self.cursor.position()?])
    }

    fn reset(&mut self, source: &Stack<T, G>) -> Result<()> {
        self.stamp.check(&source.mod_count)?;
        self.cursor = Cursor::Unstarted;
        Ok(())
    }
}

impl<T, G: GrowthPolicy> Collection for Stack<T, G> {
    type Item = T;
    type Enumerator = StackEnumerator<T, G>;
    type Iter<'a>
        = core::slice::Iter<'a, T>
    where
        Self: 'a;

    fn count(&self) -> usize {
        self.items.len()
    }

    fn enumerator(&self) -> Self::Enumerator {
        Stack::enumerator(self)
    }

    fn iter(&self) -> Self::Iter<'_> {
        self.items.iter()
    }
}

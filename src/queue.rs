//! Queue: FIFO over a ring buffer.
//!
//! `head` is the front slot and the back is `head + count` modulo the
//! capacity, so neither end shifts elements. Growth copies the ring into a
//! larger buffer in front-to-back order.

use crate::config::DEFAULT_CAPACITY;
use crate::error::{CollectionError, Result};
use crate::growth::{Chunked, GrowthPolicy};
use crate::interfaces::{Collection, Enumerator};
use crate::mod_count::{Cursor, ModCount, Stamp};
use core::fmt;
use core::marker::PhantomData;

#[derive(Clone)]
pub struct Queue<T, G = Chunked> {
    slots: Vec<Option<T>>,
    head: usize,
    count: usize,
    mod_count: ModCount,
    _growth: PhantomData<G>,
}

fn alloc_slots<T>(capacity: usize) -> Result<Vec<Option<T>>> {
    let mut slots = Vec::new();
    slots
        .try_reserve_exact(capacity)
        .map_err(|e| CollectionError::from_reserve(e, capacity))?;
    slots.resize_with(capacity, || None);
    Ok(slots)
}

impl<T, G: GrowthPolicy> Queue<T, G> {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY).expect("default queue capacity fits in memory")
    }

    pub fn with_capacity(capacity: usize) -> Result<Self> {
        Ok(Self {
            slots: alloc_slots(capacity)?,
            head: 0,
            count: 0,
            mod_count: ModCount::new(),
            _growth: PhantomData,
        })
    }

    /// Enqueue every element of `from` in its iteration order.
    pub fn from_collection<C>(from: &C) -> Result<Self>
    where
        C: Collection<Item = T> + ?Sized,
        T: Clone,
    {
        let mut queue = Self::with_capacity(from.count())?;
        for item in from.iter() {
            queue.enqueue(item.clone())?;
        }
        Ok(queue)
    }

    pub fn count(&self) -> usize {
        self.count
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    #[inline]
    fn slot(&self, offset: usize) -> usize {
        (self.head + offset) % self.slots.len()
    }

    fn grow(&mut self) -> Result<()> {
        let old = self.slots.len();
        let capacity = G::grow(old, self.count, 1);
        let mut slots = alloc_slots(capacity)?;
        for (i, dst) in slots.iter_mut().take(self.count).enumerate() {
            let src = (self.head + i) % old;
            *dst = self.slots[src].take();
        }
        log::trace!("queue grew: capacity {} -> {}", old, capacity);
        self.slots = slots;
        self.head = 0;
        Ok(())
    }

    pub fn enqueue(&mut self, item: T) -> Result<()> {
        if self.count == self.slots.len() {
            self.grow()?;
        }
        let tail = self.slot(self.count);
        self.slots[tail] = Some(item);
        self.count += 1;
        self.mod_count.bump();
        Ok(())
    }

    /// Remove the front element. Fails `Underflow` when empty.
    pub fn dequeue(&mut self) -> Result<T> {
        if self.count == 0 {
            return Err(CollectionError::Underflow);
        }
        let item = self.slots[self.head]
            .take()
            .expect("occupied ring slot");
        self.head = (self.head + 1) % self.slots.len();
        self.count -= 1;
        self.mod_count.bump();
        Ok(item)
    }

    pub fn peek(&self) -> Result<&T> {
        if self.count == 0 {
            return Err(CollectionError::Underflow);
        }
        Ok(self.get(0))
    }

    fn get(&self, offset: usize) -> &T {
        self.slots[self.slot(offset)]
            .as_ref()
            .expect("occupied ring slot")
    }

    pub fn contains(&self, item: &T) -> bool
    where
        T: PartialEq,
    {
        self.iter().any(|x| x == item)
    }

    pub fn contains_all<C>(&self, other: &C) -> bool
    where
        C: Collection<Item = T> + ?Sized,
        T: PartialEq,
    {
        other.iter().all(|x| self.contains(x))
    }

    pub fn remove_all(&mut self) {
        self.slots.iter_mut().for_each(|s| *s = None);
        self.head = 0;
        self.count = 0;
        self.mod_count.bump();
    }

    /// Front-to-back copy of the elements.
    pub fn to_vec(&self) -> Vec<T>
    where
        T: Clone,
    {
        self.iter().cloned().collect()
    }

    pub fn enumerator(&self) -> QueueEnumerator<T, G> {
        QueueEnumerator {
            stamp: self.mod_count.stamp(),
            cursor: Cursor::Unstarted,
            _pd: PhantomData,
        }
    }

    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            slots: &self.slots,
            pos: self.head,
            remaining: self.count,
        }
    }
}

impl<T, G: GrowthPolicy> Default for Queue<T, G> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: fmt::Debug, G: GrowthPolicy> fmt::Debug for Queue<T, G> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<'a, T, G: GrowthPolicy> IntoIterator for &'a Queue<T, G> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Front-to-back iterator over a `Queue`.
pub struct Iter<'a, T> {
    slots: &'a [Option<T>],
    pos: usize,
    remaining: usize,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<&'a T> {
        if self.remaining == 0 {
            return None;
        }
        let item = self.slots[self.pos].as_ref();
        self.pos = (self.pos + 1) % self.slots.len();
        self.remaining -= 1;
        item
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}

pub struct QueueEnumerator<T, G = Chunked> {
    stamp: Stamp,
    cursor: Cursor,
    _pd: PhantomData<fn() -> (T, G)>,
}

impl<T, G> Clone for QueueEnumerator<T, G> {
    fn clone(&self) -> Self {
        Self {
            stamp: self.stamp,
            cursor: self.cursor,
            _pd: PhantomData,
        }
    }
}

impl<T, G: GrowthPolicy> Enumerator for QueueEnumerator<T, G> {
    type Source = Queue<T, G>;
    type Item = T;

    fn move_next(&mut self, source: &Queue<T, G>) -> Result<()> {
        self.stamp.check(&source.mod_count)?;
        self.cursor.advance(source.count)
    }

    fn current<'s>(&self, source: &'s Queue<T, G>) -> Result<&'s T> {
        self.stamp.check(&source.mod_count)?;
        Ok(source.get(self.cursor.position()?))
    }

    fn reset(&mut self, source: &Queue<T, G>) -> Result<()> {
        self.stamp.check(&source.mod_count)?;
        self.cursor = Cursor::Unstarted;
        Ok(())
    }
}

impl<T, G: GrowthPolicy> Collection for Queue<T, G> {
    type Item = T;
    type Enumerator = QueueEnumerator<T, G>;
    type Iter<'a>
        = Iter<'a, T>
    where
        Self: 'a;

    fn count(&self) -> usize {
        self.count
    }

    fn enumerator(&self) -> Self::Enumerator {
        Queue::enumerator(self)
    }

    fn iter(&self) -> Self::Iter<'_> {
        Queue::iter(self)
    }
}

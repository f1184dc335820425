//! LinkedList: doubly linked list over a pooled node arena.
//!
//! Nodes live in a `SlotMap` and link to each other by generational keys.
//! Removed nodes return their slot to the map's free list and the next
//! insertion reuses it, so steady-state churn never touches the allocator.
//! Under the `Chunked` policy the pool is topped up a block of nodes at a
//! time once the free list runs dry.
//!
//! Index access walks from the nearer end and is O(n).

use crate::compare::Comparer;
use crate::error::{CollectionError, Result};
use crate::growth::{Exact, GrowthPolicy};
use crate::interfaces::{Collection, Enumerator, List};
use crate::mod_count::{not_positioned, ModCount, Stamp};
use crate::sort::{quick_sort, Sequence};
use core::cmp::Ordering;
use core::fmt;
use core::marker::PhantomData;
use slotmap::{new_key_type, SlotMap};

new_key_type! {
    struct NodeKey;
}

#[derive(Debug, Clone)]
struct Node<T> {
    value: T,
    prev: Option<NodeKey>,
    next: Option<NodeKey>,
}

#[derive(Clone)]
pub struct LinkedList<T, G = Exact> {
    nodes: SlotMap<NodeKey, Node<T>>,
    head: Option<NodeKey>,
    tail: Option<NodeKey>,
    pool_capacity: usize,
    mod_count: ModCount,
    _growth: PhantomData<G>,
}

impl<T, G: GrowthPolicy> LinkedList<T, G> {
    pub fn new() -> Self {
        Self {
            nodes: SlotMap::with_key(),
            head: None,
            tail: None,
            pool_capacity: 0,
            mod_count: ModCount::new(),
            _growth: PhantomData,
        }
    }

    pub fn from_collection<C>(from: &C) -> Result<Self>
    where
        C: Collection<Item = T> + ?Sized,
        T: Clone,
    {
        let mut list = Self::new();
        for item in from.iter() {
            list.link_before(None, item.clone());
        }
        Ok(list)
    }

    pub fn count(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Nodes the pool can hold, live and free, before it must grow.
    pub fn node_capacity(&self) -> usize {
        self.pool_capacity
    }

    /// Make room for one more node. A chunked pool grows by exactly one
    /// block; an exact pool grows by one node.
    fn reserve_block(&mut self) {
        let live = self.nodes.len();
        if live < self.pool_capacity {
            return;
        }
        self.pool_capacity = if G::NODE_BLOCK > 0 {
            self.pool_capacity + G::NODE_BLOCK
        } else {
            live + 1
        };
        self.nodes.reserve(self.pool_capacity - live);
        if G::NODE_BLOCK > 0 {
            log::trace!(
                "linked list node pool reserved {} nodes, capacity {}",
                G::NODE_BLOCK,
                self.pool_capacity
            );
        }
    }

    /// Link `value` in front of `next`, or at the tail when `next` is `None`.
    fn link_before(&mut self, next: Option<NodeKey>, value: T) -> NodeKey {
        self.reserve_block();
        let prev = match next {
            Some(n) => self.nodes[n].prev,
            None => self.tail,
        };
        let key = self.nodes.insert(Node { value, prev, next });
        match prev {
            Some(p) => self.nodes[p].next = Some(key),
            None => self.head = Some(key),
        }
        match next {
            Some(n) => self.nodes[n].prev = Some(key),
            None => self.tail = Some(key),
        }
        key
    }

    fn unlink(&mut self, key: NodeKey) -> T {
        let node = self
            .nodes
            .remove(key)
            .expect("unlinked node must be live");
        match node.prev {
            Some(p) => self.nodes[p].next = node.next,
            None => self.head = node.next,
        }
        match node.next {
            Some(n) => self.nodes[n].prev = node.prev,
            None => self.tail = node.prev,
        }
        node.value
    }

    /// Walk to the node at `index` from whichever end is nearer.
    fn get_node(&self, index: usize) -> Result<NodeKey> {
        let count = self.nodes.len();
        if index >= count {
            return Err(CollectionError::out_of_range(index, count));
        }
        let key = if index <= count / 2 {
            let mut key = self.head;
            for _ in 0..index {
                key = key.and_then(|k| self.nodes[k].next);
            }
            key
        } else {
            let mut key = self.tail;
            for _ in 0..(count - 1 - index) {
                key = key.and_then(|k| self.nodes[k].prev);
            }
            key
        };
        Ok(key.expect("index below count has a node"))
    }

    fn check_range(&self, start: usize, count: usize) -> Result<usize> {
        match start.checked_add(count) {
            Some(end) if end <= self.nodes.len() => Ok(end),
            _ => Err(CollectionError::out_of_range(
                start.saturating_add(count),
                self.nodes.len(),
            )),
        }
    }

    pub fn add(&mut self, item: T) -> Result<()> {
        self.link_before(None, item);
        self.mod_count.bump();
        Ok(())
    }

    pub fn add_first(&mut self, item: T) -> Result<()> {
        let head = self.head;
        self.link_before(head, item);
        self.mod_count.bump();
        Ok(())
    }

    pub fn add_items<C>(&mut self, from: &C) -> Result<()>
    where
        C: Collection<Item = T> + ?Sized,
        T: Clone,
    {
        for item in from.iter() {
            self.link_before(None, item.clone());
        }
        self.mod_count.bump();
        Ok(())
    }

    pub fn insert_at(&mut self, item: T, index: usize) -> Result<()> {
        let count = self.nodes.len();
        if index > count {
            return Err(CollectionError::out_of_range(index, count));
        }
        let next = if index == count {
            None
        } else {
            Some(self.get_node(index)?)
        };
        self.link_before(next, item);
        self.mod_count.bump();
        Ok(())
    }

    pub fn insert_items_from<C>(&mut self, index: usize, from: &C) -> Result<()>
    where
        C: Collection<Item = T> + ?Sized,
        T: Clone,
    {
        let count = self.nodes.len();
        if index > count {
            return Err(CollectionError::out_of_range(index, count));
        }
        let next = if index == count {
            None
        } else {
            Some(self.get_node(index)?)
        };
        for item in from.iter() {
            self.link_before(next, item.clone());
        }
        self.mod_count.bump();
        Ok(())
    }

    pub fn get_at(&self, index: usize) -> Result<&T> {
        let key = self.get_node(index)?;
        Ok(&self.nodes[key].value)
    }

    /// Mutable access counts as a modification.
    pub fn get_at_mut(&mut self, index: usize) -> Result<&mut T> {
        let key = self.get_node(index)?;
        self.mod_count.bump();
        Ok(&mut self.nodes[key].value)
    }

    pub fn get_first(&self) -> Result<&T> {
        self.head
            .map(|k| &self.nodes[k].value)
            .ok_or_else(|| CollectionError::out_of_range(0, 0))
    }

    pub fn get_last(&self) -> Result<&T> {
        self.tail
            .map(|k| &self.nodes[k].value)
            .ok_or_else(|| CollectionError::out_of_range(0, 0))
    }

    pub fn set_at(&mut self, item: T, index: usize) -> Result<T> {
        let key = self.get_node(index)?;
        self.mod_count.bump();
        Ok(core::mem::replace(&mut self.nodes[key].value, item))
    }

    pub fn remove_at(&mut self, index: usize) -> Result<T> {
        let key = self.get_node(index)?;
        let item = self.unlink(key);
        self.mod_count.bump();
        Ok(item)
    }

    pub fn remove_first(&mut self) -> Result<T> {
        self.remove_at(0)
    }

    pub fn remove_last(&mut self) -> Result<T> {
        let count = self.nodes.len();
        self.remove_at(count.wrapping_sub(1))
    }

    pub fn remove(&mut self, item: &T) -> Result<T>
    where
        T: PartialEq,
    {
        let key = self
            .keys()
            .find(|&k| self.nodes[k].value == *item)
            .ok_or(CollectionError::NotFound)?;
        let item = self.unlink(key);
        self.mod_count.bump();
        Ok(item)
    }

    pub fn remove_items(&mut self, start: usize, count: usize) -> Result<()> {
        self.check_range(start, count)?;
        if count == 0 {
            self.mod_count.bump();
            return Ok(());
        }
        let mut key = Some(self.get_node(start)?);
        for _ in 0..count {
            let k = key.expect("range was checked against count");
            key = self.nodes[k].next;
            self.unlink(k);
        }
        self.mod_count.bump();
        Ok(())
    }

    /// Remove every element that is also present in `from`.
    pub fn remove_items_in<C>(&mut self, from: &C) -> Result<()>
    where
        C: Collection<Item = T> + ?Sized,
        T: PartialEq,
    {
        let doomed: Vec<NodeKey> = self
            .keys()
            .filter(|&k| from.contains(&self.nodes[k].value))
            .collect();
        if doomed.is_empty() {
            return Ok(());
        }
        for k in doomed {
            self.unlink(k);
        }
        self.mod_count.bump();
        Ok(())
    }

    /// Drop every element; the node pool keeps its capacity.
    pub fn remove_all(&mut self) {
        self.nodes.clear();
        self.head = None;
        self.tail = None;
        self.mod_count.bump();
    }

    fn keys(&self) -> Keys<'_, T> {
        Keys {
            nodes: &self.nodes,
            next: self.head,
        }
    }

    pub fn index_of(&self, item: &T) -> Result<usize>
    where
        T: PartialEq,
    {
        self.iter()
            .position(|x| x == item)
            .ok_or(CollectionError::NotFound)
    }

    pub fn index_of_from(&self, item: &T, start: usize, count: usize) -> Result<usize>
    where
        T: PartialEq,
    {
        self.check_range(start, count)?;
        self.iter()
            .skip(start)
            .take(count)
            .position(|x| x == item)
            .map(|i| start + i)
            .ok_or(CollectionError::NotFound)
    }

    pub fn last_index_of(&self, item: &T) -> Result<usize>
    where
        T: PartialEq,
    {
        let mut index = self.nodes.len();
        let mut key = self.tail;
        while let Some(k) = key {
            index -= 1;
            if self.nodes[k].value == *item {
                return Ok(index);
            }
            key = self.nodes[k].prev;
        }
        Err(CollectionError::NotFound)
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

    pub fn get_items_n(&self, start: usize, count: usize) -> Result<LinkedList<T, G>>
    where
        T: Clone,
    {
        self.check_range(start, count)?;
        let mut out = Self::new();
        for item in self.iter().skip(start).take(count) {
            out.link_before(None, item.clone());
        }
        Ok(out)
    }

    /// Same quicksort as `ArrayList::sort`, addressing positions through a
    /// walker that steps from cached nodes instead of re-walking from the head.
    pub fn sort<C>(&mut self, comparer: &C) -> Result<()>
    where
        C: Comparer<T> + ?Sized,
    {
        let mut walker = NodeWalker {
            len: self.nodes.len(),
            head: self.head,
            tail: self.tail,
            nodes: &mut self.nodes,
            cache: [None; 3],
            evict: 0,
        };
        let result = quick_sort(&mut walker, comparer);
        self.mod_count.bump();
        result
    }

    pub fn enumerator(&self) -> LinkedListEnumerator<T, G> {
        LinkedListEnumerator {
            stamp: self.mod_count.stamp(),
            state: NodeCursor::Unstarted,
            _pd: PhantomData,
        }
    }

    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            nodes: &self.nodes,
            next: self.head,
            remaining: self.nodes.len(),
        }
    }
}

impl<T, G: GrowthPolicy> Default for LinkedList<T, G> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: fmt::Debug, G: GrowthPolicy> fmt::Debug for LinkedList<T, G> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<T, G: GrowthPolicy> FromIterator<T> for LinkedList<T, G> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut list = Self::new();
        for item in iter {
            list.link_before(None, item);
        }
        list
    }
}

impl<'a, T, G: GrowthPolicy> IntoIterator for &'a LinkedList<T, G> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

struct Keys<'a, T> {
    nodes: &'a SlotMap<NodeKey, Node<T>>,
    next: Option<NodeKey>,
}

impl<'a, T> Iterator for Keys<'a, T> {
    type Item = NodeKey;

    fn next(&mut self) -> Option<NodeKey> {
        let key = self.next?;
        self.next = self.nodes[key].next;
        Some(key)
    }
}

/// Head-to-tail iterator over a `LinkedList`.
pub struct Iter<'a, T> {
    nodes: &'a SlotMap<NodeKey, Node<T>>,
    next: Option<NodeKey>,
    remaining: usize,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    #[inline]
    fn next(&mut self) -> Option<&'a T> {
        let key = self.next?;
        let node = &self.nodes[key];
        self.next = node.next;
        self.remaining -= 1;
        Some(&node.value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<'a, T> ExactSizeIterator for Iter<'a, T> {}

/// Positional view of the list used by the sort. Keeps the last few visited
/// `(index, node)` pairs so the partition cursors, which move one step at a
/// time, and the pivot are found without walking from an end.
struct NodeWalker<'a, T> {
    nodes: &'a mut SlotMap<NodeKey, Node<T>>,
    head: Option<NodeKey>,
    tail: Option<NodeKey>,
    len: usize,
    cache: [Option<(usize, NodeKey)>; 3],
    evict: usize,
}

impl<'a, T> NodeWalker<'a, T> {
    fn locate(&mut self, index: usize) -> NodeKey {
        // Start from the nearest known position: a cached node or an end.
        let mut best: Option<(usize, usize, NodeKey, Option<usize>)> = None;
        let mut consider = |pos: usize, key: NodeKey, slot: Option<usize>| {
            let dist = pos.abs_diff(index);
            if best.map_or(true, |(d, ..)| dist < d) {
                best = Some((dist, pos, key, slot));
            }
        };
        for (slot, entry) in self.cache.iter().enumerate() {
            if let Some((pos, key)) = *entry {
                consider(pos, key, Some(slot));
            }
        }
        if let Some(h) = self.head {
            consider(0, h, None);
        }
        if let Some(t) = self.tail {
            consider(self.len - 1, t, None);
        }
        let (_, mut pos, mut key, slot) = best.expect("sorted list is not empty");
        while pos < index {
            key = self.nodes[key].next.expect("position below len has a successor");
            pos += 1;
        }
        while pos > index {
            key = self.nodes[key].prev.expect("position above zero has a predecessor");
            pos -= 1;
        }
        let slot = slot.unwrap_or_else(|| {
            let s = self.evict;
            self.evict = (self.evict + 1) % self.cache.len();
            s
        });
        self.cache[slot] = Some((index, key));
        key
    }
}

impl<'a, T> Sequence for NodeWalker<'a, T> {
    type Item = T;

    fn len(&self) -> usize {
        self.len
    }

    fn compare_at<C>(&mut self, a: usize, b: usize, comparer: &C) -> Result<Ordering>
    where
        C: Comparer<T> + ?Sized,
    {
        let ka = self.locate(a);
        let kb = self.locate(b);
        comparer.compare(&self.nodes[ka].value, &self.nodes[kb].value)
    }

    fn swap_at(&mut self, a: usize, b: usize) {
        if a == b {
            return;
        }
        let ka = self.locate(a);
        let kb = self.locate(b);
        if let Some([x, y]) = self.nodes.get_disjoint_mut([ka, kb]) {
            core::mem::swap(&mut x.value, &mut y.value);
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum NodeCursor {
    Unstarted,
    At(NodeKey),
    Exhausted,
}

/// Forward cursor over a `LinkedList`.
pub struct LinkedListEnumerator<T, G = Exact> {
    stamp: Stamp,
    state: NodeCursor,
    _pd: PhantomData<fn() -> (T, G)>,
}

impl<T, G> Clone for LinkedListEnumerator<T, G> {
    fn clone(&self) -> Self {
        Self {
            stamp: self.stamp,
            state: self.state,
            _pd: PhantomData,
        }
    }
}

impl<T, G: GrowthPolicy> Enumerator for LinkedListEnumerator<T, G> {
    type Source = LinkedList<T, G>;
    type Item = T;

    fn move_next(&mut self, source: &LinkedList<T, G>) -> Result<()> {
        self.stamp.check(&source.mod_count)?;
        let next = match self.state {
            NodeCursor::Unstarted => source.head,
            NodeCursor::At(k) => source.nodes[k].next,
            NodeCursor::Exhausted => None,
        };
        match next {
            Some(k) => {
                self.state = NodeCursor::At(k);
                Ok(())
            }
            None => {
                self.state = NodeCursor::Exhausted;
                let count = source.nodes.len();
                Err(CollectionError::out_of_range(count, count))
            }
        }
    }

    fn current<'s>(&self, source: &'s LinkedList<T, G>) -> Result<&'s T> {
        self.stamp.check(&source.mod_count)?;
        match self.state {
            NodeCursor::At(k) => Ok(&source.nodes[k].value),
            _ => Err(not_positioned()),
        }
    }

    fn reset(&mut self, source: &LinkedList<T, G>) -> Result<()> {
        self.stamp.check(&source.mod_count)?;
        self.state = NodeCursor::Unstarted;
        Ok(())
    }
}

impl<T, G: GrowthPolicy> Collection for LinkedList<T, G> {
    type Item = T;
    type Enumerator = LinkedListEnumerator<T, G>;
    type Iter<'a>
        = Iter<'a, T>
    where
        Self: 'a;

    fn count(&self) -> usize {
        self.nodes.len()
    }

    fn enumerator(&self) -> Self::Enumerator {
        LinkedList::enumerator(self)
    }

    fn iter(&self) -> Self::Iter<'_> {
        LinkedList::iter(self)
    }
}

impl<T, G: GrowthPolicy> List for LinkedList<T, G> {
    fn add(&mut self, item: T) -> Result<()> {
        LinkedList::add(self, item)
    }

    fn insert_at(&mut self, item: T, index: usize) -> Result<()> {
        LinkedList::insert_at(self, item, index)
    }

    fn get_at(&self, index: usize) -> Result<&T> {
        LinkedList::get_at(self, index)
    }

    fn get_at_mut(&mut self, index: usize) -> Result<&mut T> {
        LinkedList::get_at_mut(self, index)
    }

    fn set_at(&mut self, item: T, index: usize) -> Result<T> {
        LinkedList::set_at(self, item, index)
    }

    fn remove_at(&mut self, index: usize) -> Result<T> {
        LinkedList::remove_at(self, index)
    }

    fn remove_items(&mut self, start: usize, count: usize) -> Result<()> {
        LinkedList::remove_items(self, start, count)
    }

    fn remove_all(&mut self) {
        LinkedList::remove_all(self)
    }

    fn index_of(&self, item: &T) -> Result<usize>
    where
        T: PartialEq,
    {
        LinkedList::index_of(self, item)
    }

    fn last_index_of(&self, item: &T) -> Result<usize>
    where
        T: PartialEq,
    {
        LinkedList::last_index_of(self, item)
    }

    fn get_items_n(&self, start: usize, count: usize) -> Result<Self>
    where
        T: Clone,
    {
        LinkedList::get_items_n(self, start, count)
    }

    fn sort<C>(&mut self, comparer: &C) -> Result<()>
    where
        C: Comparer<T> + ?Sized,
    {
        LinkedList::sort(self, comparer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compare::{DefaultComparer, ReverseComparer};
    use crate::growth::Chunked;

    fn list_of(values: &[i32]) -> LinkedList<i32> {
        values.iter().copied().collect()
    }

    fn contents<G: GrowthPolicy>(l: &LinkedList<i32, G>) -> Vec<i32> {
        l.iter().copied().collect()
    }

    #[test]
    fn add_insert_remove() {
        let mut l: LinkedList<i32> = LinkedList::new();
        l.add(2).unwrap();
        l.add_first(1).unwrap();
        l.add(4).unwrap();
        l.insert_at(3, 2).unwrap();
        l.insert_at(5, 4).unwrap();
        assert_eq!(contents(&l), vec![1, 2, 3, 4, 5]);
        assert_eq!(*l.get_first().unwrap(), 1);
        assert_eq!(*l.get_last().unwrap(), 5);
        assert_eq!(l.remove_at(2).unwrap(), 3);
        assert_eq!(l.remove_first().unwrap(), 1);
        assert_eq!(l.remove_last().unwrap(), 5);
        assert_eq!(contents(&l), vec![2, 4]);
        assert!(l.insert_at(0, 3).unwrap_err().is_out_of_range());
    }

    /// Invariant: index access from either end finds the same element.
    #[test]
    fn index_access_from_both_ends() {
        let l = list_of(&[0, 1, 2, 3, 4, 5, 6, 7, 8]);
        for i in 0..9 {
            assert_eq!(*l.get_at(i).unwrap(), i as i32);
        }
        assert!(l.get_at(9).unwrap_err().is_out_of_range());
        let empty: LinkedList<i32> = LinkedList::new();
        assert!(empty.get_first().is_err());
        assert!(empty.get_at(0).is_err());
    }

    #[test]
    fn set_and_search() {
        let mut l = list_of(&[1, 2, 1, 3]);
        assert_eq!(l.set_at(9, 3).unwrap(), 3);
        assert_eq!(l.index_of(&1).unwrap(), 0);
        assert_eq!(l.last_index_of(&1).unwrap(), 2);
        assert_eq!(l.index_of_from(&1, 1, 3).unwrap(), 2);
        assert_eq!(l.last_index_of(&7), Err(CollectionError::NotFound));
        assert!(l.contains(&9));
        assert_eq!(l.remove(&1).unwrap(), 1);
        assert_eq!(contents(&l), vec![2, 1, 9]);
    }

    #[test]
    fn range_and_bulk_operations() {
        let mut l = list_of(&[1, 5]);
        l.insert_items_from(1, &list_of(&[2, 3, 4])).unwrap();
        assert_eq!(contents(&l), vec![1, 2, 3, 4, 5]);
        assert_eq!(contents(&l.get_items_n(1, 3).unwrap()), vec![2, 3, 4]);
        l.remove_items(1, 3).unwrap();
        assert_eq!(contents(&l), vec![1, 5]);
        assert!(l.remove_items(1, 2).unwrap_err().is_out_of_range());
        l.add_items(&list_of(&[6, 1])).unwrap();
        l.remove_items_in(&list_of(&[1])).unwrap();
        assert_eq!(contents(&l), vec![5, 6]);
        assert!(l.contains_all(&list_of(&[6, 5])));
    }

    /// Invariant: freed node slots are reused instead of growing the pool.
    #[test]
    fn node_slots_are_reused() {
        let mut l: LinkedList<i32, Chunked> = LinkedList::new();
        for i in 0..10 {
            l.add(i).unwrap();
        }
        let capacity = l.node_capacity();
        assert!(capacity >= 10);
        for _ in 0..100 {
            l.remove_first().unwrap();
            l.add(0).unwrap();
        }
        assert_eq!(l.node_capacity(), capacity);
        l.remove_all();
        assert_eq!(l.node_capacity(), capacity);
        assert!(l.is_empty());
    }

    /// Invariant: a chunked pool grows one block of `NODE_BLOCK_SIZE` at a time.
    #[test]
    fn chunked_pool_grows_in_fixed_blocks() {
        use crate::config::NODE_BLOCK_SIZE;
        let mut l: LinkedList<u32, Chunked> = LinkedList::new();
        assert_eq!(l.node_capacity(), 0);
        let mut steps = Vec::new();
        let mut last = l.node_capacity();
        for i in 0..200u32 {
            l.add(i).unwrap();
            if l.node_capacity() != last {
                last = l.node_capacity();
                steps.push((l.count(), last));
            }
        }
        let expected: Vec<(usize, usize)> = (0..20)
            .map(|b| (b * NODE_BLOCK_SIZE + 1, (b + 1) * NODE_BLOCK_SIZE))
            .collect();
        assert_eq!(steps, expected);
        // Freeing nodes does not shrink the pool, and refilling does not grow it.
        l.remove_items(0, 150).unwrap();
        for i in 0..150u32 {
            l.add(i).unwrap();
        }
        assert_eq!(l.node_capacity(), 200);
        l.add(0).unwrap();
        assert_eq!(l.node_capacity(), 210);
    }

    #[test]
    fn exact_pool_tracks_peak_count() {
        let mut l: LinkedList<i32> = LinkedList::new();
        for i in 0..7 {
            l.add(i).unwrap();
            assert_eq!(l.node_capacity(), l.count());
        }
        l.remove_at(0).unwrap();
        l.add(7).unwrap();
        assert_eq!(l.node_capacity(), 7);
    }

    /// Invariant: a zero-length range removal still counts as a modification,
    /// matching `ArrayList::remove_items`.
    #[test]
    fn empty_range_removal_invalidates_enumerators() {
        let mut l = list_of(&[1, 2, 3]);
        let mut e = l.enumerator();
        l.remove_items(1, 0).unwrap();
        assert_eq!(contents(&l), vec![1, 2, 3]);
        assert!(e.move_next(&l).unwrap_err().is_invalid_operation());
    }

    #[test]
    fn sort_matches_array_semantics() {
        let mut l = list_of(&[5, 3, 9, 1, 3, 7, 0, 8]);
        l.sort(&DefaultComparer).unwrap();
        assert_eq!(contents(&l), vec![0, 1, 3, 3, 5, 7, 8, 9]);
        l.sort(&ReverseComparer(DefaultComparer)).unwrap();
        assert_eq!(contents(&l), vec![9, 8, 7, 5, 3, 3, 1, 0]);
        // links stay consistent in both directions after value swaps
        assert_eq!(*l.get_at(6).unwrap(), 1);
        assert_eq!(l.last_index_of(&9).unwrap(), 0);
    }

    #[test]
    fn sort_large_list() {
        let mut l: LinkedList<u32> = (0..500u32).map(|i| (i * 7919) % 500).collect();
        l.sort(&DefaultComparer).unwrap();
        let v: Vec<u32> = l.iter().copied().collect();
        assert_eq!(v, (0..500).collect::<Vec<_>>());
    }

    /// Invariant: the enumerator follows next links and fails fast on mutation.
    #[test]
    fn enumerator_protocol() {
        let mut l = list_of(&[1, 2]);
        let mut e = l.enumerator();
        e.move_next(&l).unwrap();
        assert_eq!(*e.current(&l).unwrap(), 1);
        e.move_next(&l).unwrap();
        assert_eq!(*e.current(&l).unwrap(), 2);
        assert!(e.move_next(&l).unwrap_err().is_out_of_range());
        assert!(e.current(&l).unwrap_err().is_invalid_operation());
        e.reset(&l).unwrap();
        l.add(3).unwrap();
        assert!(e.move_next(&l).unwrap_err().is_invalid_operation());
        assert!(e.reset(&l).unwrap_err().is_invalid_operation());
    }
}

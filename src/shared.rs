//! Shared-handle family.
//!
//! These containers store `Rc<T>` handles instead of values, so `T` may be a
//! trait object and the same element can live in several containers at
//! once. Removal hands the handle back; dropping it is the caller's choice.
//! Growth uses the `Chunked` policy.

use crate::compare::DefaultComparer;
use crate::error::{CollectionError, Result};
use crate::growth::Chunked;
use crate::hash_code::DefaultHashCodeProvider;
use crate::interfaces::Collection;
use std::rc::Rc;

pub type ArrayList<T> = crate::array_list::ArrayList<Rc<T>, Chunked>;

pub type LinkedList<T> = crate::linked_list::LinkedList<Rc<T>, Chunked>;

pub type HashMap<K, V, H = DefaultHashCodeProvider, C = DefaultComparer> =
    crate::hash_map::HashMap<Rc<K>, Rc<V>, H, C>;

pub type MultiHashMap<K, V, H = DefaultHashCodeProvider, C = DefaultComparer> =
    crate::multi_hash_map::MultiHashMap<Rc<K>, Rc<V>, H, C>;

pub type Queue<T> = crate::queue::Queue<Rc<T>, Chunked>;

pub type Stack<T> = crate::stack::Stack<Rc<T>, Chunked>;

/// Position of the first element that is the same allocation as `handle`.
/// Works for element types without `PartialEq`, trait objects included.
pub fn index_of_handle<C, T>(collection: &C, handle: &Rc<T>) -> Result<usize>
where
    C: Collection<Item = Rc<T>> + ?Sized,
    T: ?Sized,
{
    collection
        .iter()
        .position(|h| Rc::ptr_eq(h, handle))
        .ok_or(CollectionError::NotFound)
}

//! Hash-code providers and the bucket spreading function.
//!
//! Providers return a raw 32-bit code. Maps never use it directly: `spread`
//! mixes the bits first so providers that return small integers (the numeric
//! defaults do exactly that) still fill the table evenly.

use crate::error::Result;
use core::hash::{BuildHasher, Hash};
use hashbrown::hash_map::DefaultHashBuilder;
use std::rc::Rc;

/// Produces a raw hash code for a key.
pub trait HashCodeProvider<T: ?Sized> {
    fn hash_code(&self, obj: &T) -> Result<i32>;
}

impl<T: ?Sized, H: HashCodeProvider<T> + ?Sized> HashCodeProvider<T> for &H {
    #[inline]
    fn hash_code(&self, obj: &T) -> Result<i32> {
        (**self).hash_code(obj)
    }
}

impl<T: ?Sized, H: HashCodeProvider<T> + ?Sized> HashCodeProvider<T> for Box<H> {
    #[inline]
    fn hash_code(&self, obj: &T) -> Result<i32> {
        (**self).hash_code(obj)
    }
}

impl<T: ?Sized, H: HashCodeProvider<T> + ?Sized> HashCodeProvider<T> for Rc<H> {
    #[inline]
    fn hash_code(&self, obj: &T) -> Result<i32> {
        (**self).hash_code(obj)
    }
}

/// Types with a built-in hash code. Integers hash to their own value (wide
/// ones fold their halves together); strings use the `31 * h + c` polynomial.
pub trait HashCode {
    fn hash_code(&self) -> i32;
}

macro_rules! narrow_hash_code {
    ($($t:ty),*) => {$(
        impl HashCode for $t {
            #[inline]
            fn hash_code(&self) -> i32 {
                *self as i32
            }
        }
    )*};
}

macro_rules! wide_hash_code {
    ($($t:ty),*) => {$(
        impl HashCode for $t {
            #[inline]
            fn hash_code(&self) -> i32 {
                let v = *self as u64;
                (v ^ (v >> 32)) as i32
            }
        }
    )*};
}

narrow_hash_code!(i8, i16, i32, u8, u16, u32, char);
wide_hash_code!(i64, u64, isize, usize);

impl HashCode for bool {
    #[inline]
    fn hash_code(&self) -> i32 {
        if *self {
            1231
        } else {
            1237
        }
    }
}

impl HashCode for str {
    fn hash_code(&self) -> i32 {
        self.chars()
            .fold(0i32, |h, c| h.wrapping_mul(31).wrapping_add(c as i32))
    }
}

impl HashCode for String {
    #[inline]
    fn hash_code(&self) -> i32 {
        self.as_str().hash_code()
    }
}

impl<T: HashCode + ?Sized> HashCode for &T {
    #[inline]
    fn hash_code(&self) -> i32 {
        (**self).hash_code()
    }
}

impl<T: HashCode + ?Sized> HashCode for Box<T> {
    #[inline]
    fn hash_code(&self) -> i32 {
        (**self).hash_code()
    }
}

/// Shared handles hash like their pointee.
impl<T: HashCode + ?Sized> HashCode for Rc<T> {
    #[inline]
    fn hash_code(&self) -> i32 {
        (**self).hash_code()
    }
}

/// Provider used when a map is built without one.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DefaultHashCodeProvider;

impl<T: HashCode + ?Sized> HashCodeProvider<T> for DefaultHashCodeProvider {
    #[inline]
    fn hash_code(&self, obj: &T) -> Result<i32> {
        Ok(obj.hash_code())
    }
}

/// Bridges any `core::hash::Hash` key through a `BuildHasher`, folding the
/// 64-bit digest to 32 bits. Defaults to hashbrown's hasher.
#[derive(Debug, Clone, Default)]
pub struct BuildHasherProvider<S = DefaultHashBuilder> {
    hasher: S,
}

impl<S> BuildHasherProvider<S> {
    pub fn with_hasher(hasher: S) -> Self {
        Self { hasher }
    }
}

impl<T: Hash + ?Sized, S: BuildHasher> HashCodeProvider<T> for BuildHasherProvider<S> {
    #[inline]
    fn hash_code(&self, obj: &T) -> Result<i32> {
        let h = self.hasher.hash_one(obj);
        Ok((h ^ (h >> 32)) as i32)
    }
}

/// Bit-mixing applied to a raw hash code before bucket selection. Uses
/// wrapping 32-bit arithmetic and logical right shifts.
#[inline]
pub fn spread(raw: i32) -> u32 {
    let mut h = raw as u32;
    h = h.wrapping_add(!(h << 9));
    h ^= h >> 14;
    h = h.wrapping_add(h << 4);
    h ^= h >> 10;
    h
}

/// Bucket for a spread hash in a power-of-two table.
#[inline]
pub(crate) fn bucket_index(hash: u32, capacity: usize) -> usize {
    debug_assert!(capacity.is_power_of_two());
    (hash as usize) & (capacity - 1)
}

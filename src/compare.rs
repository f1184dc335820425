//! Pluggable ordering strategies.

use crate::error::Result;
use core::cmp::Ordering;
use std::rc::Rc;

/// Orders two values. Returns `InvalidArgument` when the operands cannot be
/// compared; callers propagate that error unchanged.
pub trait Comparer<T: ?Sized> {
    fn compare(&self, a: &T, b: &T) -> Result<Ordering>;
}

/// Caller-owned comparers can be lent to a container.
impl<T: ?Sized, C: Comparer<T> + ?Sized> Comparer<T> for &C {
    #[inline]
    fn compare(&self, a: &T, b: &T) -> Result<Ordering> {
        (**self).compare(a, b)
    }
}

impl<T: ?Sized, C: Comparer<T> + ?Sized> Comparer<T> for Box<C> {
    #[inline]
    fn compare(&self, a: &T, b: &T) -> Result<Ordering> {
        (**self).compare(a, b)
    }
}

impl<T: ?Sized, C: Comparer<T> + ?Sized> Comparer<T> for Rc<C> {
    #[inline]
    fn compare(&self, a: &T, b: &T) -> Result<Ordering> {
        (**self).compare(a, b)
    }
}

/// Total order from `Ord`. `Rc<T>` is `Ord` when `T` is, so this also orders
/// shared handles by their pointees.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DefaultComparer;

impl<T: Ord + ?Sized> Comparer<T> for DefaultComparer {
    #[inline]
    fn compare(&self, a: &T, b: &T) -> Result<Ordering> {
        Ok(a.cmp(b))
    }
}

/// Adapts a closure returning `Result<Ordering>`.
#[derive(Clone, Copy)]
pub struct FnComparer<F>(pub F);

impl<T: ?Sized, F> Comparer<T> for FnComparer<F>
where
    F: Fn(&T, &T) -> Result<Ordering>,
{
    #[inline]
    fn compare(&self, a: &T, b: &T) -> Result<Ordering> {
        (self.0)(a, b)
    }
}

/// Build a comparer from an infallible ordering function.
pub fn comparer_fn<T: ?Sized, F>(f: F) -> FnComparer<impl Fn(&T, &T) -> Result<Ordering>>
where
    F: Fn(&T, &T) -> Ordering,
{
    FnComparer(move |a: &T, b: &T| -> Result<Ordering> { Ok(f(a, b)) })
}

/// Inverts another comparer.
#[derive(Debug, Clone, Copy, Default)]
pub struct ReverseComparer<C>(pub C);

impl<T: ?Sized, C: Comparer<T>> Comparer<T> for ReverseComparer<C> {
    #[inline]
    fn compare(&self, a: &T, b: &T) -> Result<Ordering> {
        self.0.compare(a, b).map(Ordering::reverse)
    }
}

// SPDX-License-Identifier: MPL-2.0

//! Ordering strategies used by the ordered collections in this crate.
//!
//! A [`Comparer`] is passed to a collection when it is created and stays with it for its whole
//! lifetime. There is no process-wide default: collections that do not name a comparer use the
//! stateless [`NaturalOrder`], which defers to [`Ord`].

use core::cmp::Ordering;

/// A total order over values of type `V`.
///
/// Closures of the form `Fn(&V, &V) -> Ordering` implement this trait, so an ad-hoc order can be
/// supplied without declaring a type.
pub trait Comparer<V: ?Sized> {
    /// Compares `a` with `b`.
    fn compare(&self, a: &V, b: &V) -> Ordering;
}

/// Orders values by their [`Ord`] implementation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct NaturalOrder;

impl<V: Ord + ?Sized> Comparer<V> for NaturalOrder {
    fn compare(&self, a: &V, b: &V) -> Ordering {
        a.cmp(b)
    }
}

/// Inverts the order produced by the wrapped comparer.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ReverseOrder<C>(pub C);

impl<V: ?Sized, C: Comparer<V>> Comparer<V> for ReverseOrder<C> {
    fn compare(&self, a: &V, b: &V) -> Ordering {
        self.0.compare(b, a)
    }
}

impl<V: ?Sized, F> Comparer<V> for F
where
    F: Fn(&V, &V) -> Ordering,
{
    fn compare(&self, a: &V, b: &V) -> Ordering {
        self(a, b)
    }
}

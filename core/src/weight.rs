mod byte_weight;
mod ord_weight;

pub use {byte_weight::*, ord_weight::*};

use std::{fmt::Debug, hash::Hash};

/// A semiring element used as an FST output.
///
/// The builder never looks inside a weight; it only needs the operations below. For weight pushing
/// to be meaningful, `plus` must return the common left factor of its operands and `divide_left`
/// must remove such a factor again, so that `a == b.times(&a.divide_left(&b))` whenever `b` was
/// obtained from `a.plus(..)`.
pub trait Weight: Clone + Debug + Eq + Hash {
    /// The identity for [Weight::times].
    fn one() -> Self;

    /// Sequential composition: the output of following `self` and then `rhs`.
    fn times(&self, rhs: &Self) -> Self;

    /// The common left part of `self` and `rhs`.
    fn plus(&self, rhs: &Self) -> Self;

    /// Factors `rhs` out of the left of `self`.
    fn divide_left(&self, rhs: &Self) -> Self;

    /// Indicates whether this is the identity weight.
    #[inline]
    fn is_one(&self) -> bool {
        *self == Self::one()
    }

    /// Number of bytes this weight occupies when stored. Used for build statistics only.
    #[inline]
    fn size(&self) -> usize {
        0
    }
}

/// No outputs: building with `()` produces a minimal acceptor.
impl Weight for () {
    #[inline]
    fn one() -> Self {}

    #[inline]
    fn times(&self, _rhs: &Self) -> Self {}

    #[inline]
    fn plus(&self, _rhs: &Self) -> Self {}

    #[inline]
    fn divide_left(&self, _rhs: &Self) -> Self {}
}

//! Bit mixing used to spread structural state hashes over the dedup table. Mixers come from the
//! hppc `BitMixer` family; combining follows the usual golden-ratio `hash_combine` recipe.

use std::{
    collections::hash_map::DefaultHasher,
    hash::{Hash, Hasher},
};

/// Golden ratio constant.
pub(crate) const PHI_C64: u64 = 0x9e3779b97f4a7c15;

/// Computes David Stafford variant 9 of 64bit mix function (MH3 finalization step, with different
/// shifts and constants).
///
/// See: http://zimbry.blogspot.com/2011/09/better-bit-mixing-improving-on.html
#[inline]
pub(crate) const fn mix64(z: u64) -> u64 {
    let z = (z ^ (z >> 32)).wrapping_mul(0x4cd6944c5cc20b6d);
    let z = (z ^ (z >> 29)).wrapping_mul(0xfc12c5b19d3259e9);
    z ^ (z >> 32)
}

/// Hashes any `Hash` value with a fixed-key hasher, so equal values hash equally across builder
/// instances.
pub(crate) fn mix_hashable<T: Hash + ?Sized>(key: &T) -> u64 {
    let mut hasher = DefaultHasher::new();
    key.hash(&mut hasher);
    mix64(hasher.finish())
}

/// Folds `value` into `seed`.
#[inline]
pub(crate) const fn hash_combine(seed: u64, value: u64) -> u64 {
    seed ^ mix64(value).wrapping_add(PHI_C64).wrapping_add(seed << 6).wrapping_add(seed >> 2)
}

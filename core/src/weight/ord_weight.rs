use {
    crate::weight::Weight,
    std::{
        fmt::{Display, Formatter, Result as FmtResult},
        mem::size_of,
    },
};

/// A non-negative integer output, such as a term ordinal or a file pointer.
///
/// `times` adds, `plus` takes the minimum and `divide_left` subtracts, so pushing moves the
/// smallest shared value toward the start state. Sums saturate at `u64::MAX`.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct OrdWeight(pub u64);

impl OrdWeight {
    /// Returns the wrapped value.
    #[inline]
    pub fn get(self) -> u64 {
        self.0
    }
}

impl Weight for OrdWeight {
    #[inline]
    fn one() -> Self {
        Self(0)
    }

    #[inline]
    fn times(&self, rhs: &Self) -> Self {
        Self(self.0.saturating_add(rhs.0))
    }

    #[inline]
    fn plus(&self, rhs: &Self) -> Self {
        Self(self.0.min(rhs.0))
    }

    #[inline]
    fn divide_left(&self, rhs: &Self) -> Self {
        debug_assert!(rhs.0 <= self.0, "cannot factor {} out of {}", rhs.0, self.0);
        Self(self.0.saturating_sub(rhs.0))
    }

    #[inline]
    fn is_one(&self) -> bool {
        self.0 == 0
    }

    #[inline]
    fn size(&self) -> usize {
        if self.0 == 0 {
            0
        } else {
            size_of::<u64>()
        }
    }
}

impl From<u64> for OrdWeight {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

impl Display for OrdWeight {
    fn fmt(&self, f: &mut Formatter) -> FmtResult {
        write!(f, "{}", self.0)
    }
}

use crate::{
    builder::MINIMUM_TABLE_CAPACITY,
    error::{FstError, FstResult},
};

/// Default number of spine states reserved up front.
pub const DEFAULT_INITIAL_DEPTH: usize = 16;

/// Largest accepted value for the initial spine depth.
pub const MAX_INITIAL_DEPTH: usize = 1 << 20;

/// Default number of slots in the state dedup table.
pub const DEFAULT_INITIAL_TABLE_CAPACITY: usize = MINIMUM_TABLE_CAPACITY;

/// Largest accepted value for the initial dedup table capacity.
pub const MAX_INITIAL_TABLE_CAPACITY: usize = 1 << 30;

/// Sizing parameters for [crate::builder::FstBuilder]. Both only affect how much storage is reserved
/// before the first key arrives; the spine and the dedup table grow as needed.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct FstBuilderConfig {
    /// Number of spine slots (one per key depth, plus the root) to reserve.
    initial_depth: usize,

    /// Number of dedup table slots. Always a power of two and at least [MINIMUM_TABLE_CAPACITY].
    initial_table_capacity: usize,
}

impl FstBuilderConfig {
    /// Create a new configuration. `initial_table_capacity` is rounded up to a power of two no smaller
    /// than [MINIMUM_TABLE_CAPACITY].
    pub fn new(initial_depth: usize, initial_table_capacity: usize) -> FstResult<Self> {
        Self::verify_params(initial_depth, initial_table_capacity)?;

        Ok(Self {
            initial_depth,
            initial_table_capacity: initial_table_capacity.max(MINIMUM_TABLE_CAPACITY).next_power_of_two(),
        })
    }

    /// Returns the number of spine slots reserved up front.
    #[inline]
    pub const fn get_initial_depth(&self) -> usize {
        self.initial_depth
    }

    /// Returns the number of dedup table slots reserved up front.
    #[inline]
    pub const fn get_initial_table_capacity(&self) -> usize {
        self.initial_table_capacity
    }

    fn verify_params(initial_depth: usize, initial_table_capacity: usize) -> FstResult<()> {
        if initial_depth > MAX_INITIAL_DEPTH {
            return Err(FstError::InvalidConfig(format!(
                "initial_depth must be at most {MAX_INITIAL_DEPTH}: {initial_depth}"
            )));
        }

        if initial_table_capacity > MAX_INITIAL_TABLE_CAPACITY {
            return Err(FstError::InvalidConfig(format!(
                "initial_table_capacity must be at most {MAX_INITIAL_TABLE_CAPACITY}: {initial_table_capacity}"
            )));
        }

        Ok(())
    }
}

impl Default for FstBuilderConfig {
    fn default() -> Self {
        Self {
            initial_depth: DEFAULT_INITIAL_DEPTH,
            initial_table_capacity: DEFAULT_INITIAL_TABLE_CAPACITY,
        }
    }
}

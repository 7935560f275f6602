use {
    crate::weight::Weight,
    std::fmt::{Display, Formatter, Result as FmtResult},
};

/// Size of an automaton produced by [crate::builder::FstBuilder], accumulated as states are committed.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub struct FstStats {
    /// Number of committed states, including [crate::automaton::StateId::FINAL].
    pub num_states: usize,

    /// Number of committed arcs.
    pub num_arcs: usize,

    /// Sum of [Weight::size] over every stored arc output, final output and the start output.
    pub total_weight_size: usize,
}

impl FstStats {
    /// Count the storage needed for `weight`.
    #[inline]
    pub fn record_weight<W: Weight>(&mut self, weight: &W) {
        self.total_weight_size += weight.size();
    }
}

impl Display for FstStats {
    fn fmt(&self, f: &mut Formatter) -> FmtResult {
        write!(f, "{} states, {} arcs, {} weight bytes", self.num_states, self.num_arcs, self.total_weight_size)
    }
}

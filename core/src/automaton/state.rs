use std::fmt::{Debug, Display, Formatter, Result as FmtResult};

/// Identifier of a committed state in an output automaton.
#[derive(Clone, Copy, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct StateId(pub u32);

impl StateId {
    /// The canonical final state with no arcs and a final weight of one. Every construction pass
    /// starts by creating it, so it is always the first state of the automaton.
    pub const FINAL: StateId = StateId(0);

    /// Returns this id as an index into per-state storage.
    #[inline]
    pub fn usize(self) -> usize {
        self.0 as usize
    }
}

impl Debug for StateId {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "StateId({})", self.0)
    }
}

impl Display for StateId {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}", self.0)
    }
}

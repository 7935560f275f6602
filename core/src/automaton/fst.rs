use crate::{
    automaton::{Arc, StateId},
    error::FstResult,
};

/// Read access to an automaton's states and arcs.
///
/// The dedup table compares in-progress states against states already committed here, so arcs must
/// be returned in the order they were added.
pub trait Fst<W> {
    /// Returns the start state, or `None` if no start state has been set.
    fn start(&self) -> Option<StateId>;

    /// Returns the number of states.
    fn num_states(&self) -> usize;

    /// Returns the number of arcs leaving `state`.
    fn num_arcs(&self, state: StateId) -> usize;

    /// Returns the arcs leaving `state`, in insertion order.
    fn arcs(&self, state: StateId) -> &[Arc<W>];

    /// Returns the final weight of `state`, or `None` if it is not final.
    fn final_weight(&self, state: StateId) -> Option<&W>;

    /// Indicates whether `state` is final.
    #[inline]
    fn is_final(&self, state: StateId) -> bool {
        self.final_weight(state).is_some()
    }
}

/// An automaton the builder can write into.
pub trait MutableFst<W>: Fst<W> {
    /// Create a new, non-final state with no arcs.
    fn add_state(&mut self) -> FstResult<StateId>;

    /// Mark `state` as final with the given weight.
    fn set_final(&mut self, state: StateId, weight: W) -> FstResult<()>;

    /// Add an arc leaving `state`.
    fn add_arc(&mut self, state: StateId, arc: Arc<W>) -> FstResult<()>;

    /// Set the start state.
    fn set_start(&mut self, state: StateId) -> FstResult<()>;

    /// Remove every state and arc, keeping allocated storage for reuse.
    fn delete_all_states(&mut self);
}

use {
    crate::{
        automaton::{Arc, Fst, Label, MutableFst, StateId},
        error::{FstError, FstResult},
        weight::Weight,
    },
    bitvec::vec::BitVec,
};

/// Where a state's arcs live in [VectorFst::arcs], followed by the number of arcs.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
struct StateInfo {
    arcs_index: u32,
    num_arcs: u32,
}

/// An in-memory output automaton. States are integers created with [MutableFst::add_state]; all arcs
/// leaving a state are stored contiguously in one shared vector, so each state's arcs must be added
/// at once (which is exactly how the builder materializes a frozen state).
#[derive(Clone, Debug)]
pub struct VectorFst<W> {
    start: Option<StateId>,

    /// State currently receiving arcs. Adding an arc to any other state that already has arcs is
    /// rejected.
    cur_state: Option<StateId>,

    states: Vec<StateInfo>,

    is_final: BitVec,

    /// Final weight of each state; `one()` for states that are not final.
    final_weights: Vec<W>,

    arcs: Vec<Arc<W>>,

    max_states: usize,
}

impl<W> Default for VectorFst<W> {
    fn default() -> Self {
        Self {
            start: None,
            cur_state: None,
            states: Vec::new(),
            is_final: BitVec::new(),
            final_weights: Vec::new(),
            arcs: Vec::new(),
            max_states: u32::MAX as usize,
        }
    }
}

impl<W> VectorFst<W> {
    /// Create a new, empty automaton.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a new, empty automaton that refuses to grow beyond `max_states` states. Exceeding the
    /// limit is reported as [FstError::AllocationFailure].
    pub fn with_max_states(max_states: usize) -> Self {
        Self {
            max_states,
            ..Self::default()
        }
    }

    /// Returns the total number of arcs across all states.
    #[inline]
    pub fn total_arcs(&self) -> usize {
        self.arcs.len()
    }

    /// Returns the arc leaving `state` with the given label, if any. Arcs of each state must be sorted
    /// by label, which holds for every automaton produced by the builder.
    pub fn step(&self, state: StateId, label: Label) -> Option<&Arc<W>> {
        let arcs = self.arcs(state);
        arcs.binary_search_by_key(&label, |arc| arc.label).ok().map(|i| &arcs[i])
    }

    fn check_state(&self, state: StateId) -> FstResult<()> {
        if state.usize() < self.states.len() {
            Ok(())
        } else {
            Err(FstError::InvariantViolation(format!(
                "state {state} does not exist (automaton has {} states)",
                self.states.len()
            )))
        }
    }
}

impl<W: Weight> VectorFst<W> {
    /// Returns the output for `key`, or `None` if the automaton does not accept it.
    pub fn get<L: Copy + Into<Label>>(&self, key: &[L]) -> Option<W> {
        let mut state = self.start?;
        let mut output = W::one();

        for &symbol in key {
            let arc = self.step(state, symbol.into())?;
            output = output.times(&arc.weight);
            state = arc.target;
        }

        self.final_weight(state).map(|weight| output.times(weight))
    }

    /// Indicates whether the automaton accepts `key`.
    #[inline]
    pub fn contains<L: Copy + Into<Label>>(&self, key: &[L]) -> bool {
        self.get(key).is_some()
    }
}

impl<W> Fst<W> for VectorFst<W> {
    #[inline]
    fn start(&self) -> Option<StateId> {
        self.start
    }

    #[inline]
    fn num_states(&self) -> usize {
        self.states.len()
    }

    fn num_arcs(&self, state: StateId) -> usize {
        self.states.get(state.usize()).map(|info| info.num_arcs as usize).unwrap_or(0)
    }

    fn arcs(&self, state: StateId) -> &[Arc<W>] {
        match self.states.get(state.usize()) {
            Some(info) if info.num_arcs > 0 => {
                let start = info.arcs_index as usize;
                &self.arcs[start..start + info.num_arcs as usize]
            }
            _ => &[],
        }
    }

    fn final_weight(&self, state: StateId) -> Option<&W> {
        match self.is_final.get(state.usize()) {
            Some(is_final) if *is_final => self.final_weights.get(state.usize()),
            _ => None,
        }
    }
}

impl<W: Weight> MutableFst<W> for VectorFst<W> {
    fn add_state(&mut self) -> FstResult<StateId> {
        if self.states.len() >= self.max_states {
            return Err(FstError::AllocationFailure(format!("state limit of {} reached", self.max_states)));
        }

        let id: u32 = self
            .states
            .len()
            .try_into()
            .map_err(|_| FstError::AllocationFailure("state ids exhausted".to_string()))?;

        self.states.try_reserve(1).map_err(|e| FstError::AllocationFailure(e.to_string()))?;
        self.final_weights.try_reserve(1).map_err(|e| FstError::AllocationFailure(e.to_string()))?;

        self.states.push(StateInfo::default());
        self.is_final.push(false);
        self.final_weights.push(W::one());
        Ok(StateId(id))
    }

    fn set_final(&mut self, state: StateId, weight: W) -> FstResult<()> {
        self.check_state(state)?;
        self.is_final.set(state.usize(), true);
        self.final_weights[state.usize()] = weight;
        Ok(())
    }

    fn add_arc(&mut self, state: StateId, arc: Arc<W>) -> FstResult<()> {
        self.check_state(state)?;
        self.check_state(arc.target)?;

        if self.cur_state != Some(state) {
            if self.states[state.usize()].num_arcs != 0 {
                return Err(FstError::InvariantViolation(format!(
                    "arcs leaving state {state} must be added contiguously"
                )));
            }

            let arcs_index: u32 = self
                .arcs
                .len()
                .try_into()
                .map_err(|_| FstError::AllocationFailure("arc storage exhausted".to_string()))?;
            self.states[state.usize()].arcs_index = arcs_index;
            self.cur_state = Some(state);
        }

        self.arcs.try_reserve(1).map_err(|e| FstError::AllocationFailure(e.to_string()))?;
        self.arcs.push(arc);
        self.states[state.usize()].num_arcs += 1;
        Ok(())
    }

    fn set_start(&mut self, state: StateId) -> FstResult<()> {
        self.check_state(state)?;
        self.start = Some(state);
        Ok(())
    }

    fn delete_all_states(&mut self) {
        self.start = None;
        self.cur_state = None;
        self.states.clear();
        self.is_final.clear();
        self.final_weights.clear();
        self.arcs.clear();
    }
}

impl<W: PartialEq> PartialEq for VectorFst<W> {
    fn eq(&self, other: &Self) -> bool {
        self.start == other.start
            && self.states == other.states
            && self.is_final == other.is_final
            && self.final_weights == other.final_weights
            && self.arcs == other.arcs
    }
}

impl<W: Eq> Eq for VectorFst<W> {}

#[cfg(test)]
mod tests {
    use {
        super::VectorFst,
        crate::{
            automaton::{Arc, Fst, MutableFst, StateId},
            error::FstError,
            weight::OrdWeight,
        },
        pretty_assertions::assert_eq,
    };

    fn two_term_fst() -> VectorFst<OrdWeight> {
        // start --a/1--> s1 --b/2--> final
        //       \-c/5--> final
        let mut fst = VectorFst::new();
        let fin = fst.add_state().unwrap();
        fst.set_final(fin, OrdWeight(0)).unwrap();
        let s1 = fst.add_state().unwrap();
        fst.add_arc(s1, Arc::new(b'b' as u32, OrdWeight(2), fin)).unwrap();
        let start = fst.add_state().unwrap();
        fst.add_arc(start, Arc::new(b'a' as u32, OrdWeight(1), s1)).unwrap();
        fst.add_arc(start, Arc::new(b'c' as u32, OrdWeight(5), fin)).unwrap();
        fst.set_start(start).unwrap();
        fst
    }

    #[test]
    fn test_lookup() {
        let fst = two_term_fst();
        assert_eq!(fst.num_states(), 3);
        assert_eq!(fst.total_arcs(), 3);
        assert_eq!(fst.num_arcs(StateId(2)), 2);
        assert_eq!(fst.get(b"ab"), Some(OrdWeight(3)));
        assert_eq!(fst.get(b"c"), Some(OrdWeight(5)));
        assert_eq!(fst.get(b"a"), None);
        assert_eq!(fst.get(b"abc"), None);
        assert!(!fst.contains(b""));
        assert!(fst.contains(&['c']));
    }

    #[test]
    fn test_arcs_must_be_contiguous() {
        let mut fst = two_term_fst();
        let result = fst.add_arc(StateId(1), Arc::new(b'z' as u32, OrdWeight(0), StateId::FINAL));
        assert!(matches!(result, Err(FstError::InvariantViolation(_))));
    }

    #[test]
    fn test_unknown_target() {
        let mut fst: VectorFst<OrdWeight> = VectorFst::new();
        let s = fst.add_state().unwrap();
        let result = fst.add_arc(s, Arc::new(1, OrdWeight(0), StateId(7)));
        assert!(matches!(result, Err(FstError::InvariantViolation(_))));
    }

    #[test]
    fn test_state_limit() {
        let mut fst: VectorFst<OrdWeight> = VectorFst::with_max_states(2);
        fst.add_state().unwrap();
        fst.add_state().unwrap();
        assert!(matches!(fst.add_state(), Err(FstError::AllocationFailure(_))));
    }

    #[test]
    fn test_delete_all_states() {
        let mut fst = two_term_fst();
        fst.delete_all_states();
        assert_eq!(fst.num_states(), 0);
        assert_eq!(fst.total_arcs(), 0);
        assert_eq!(fst.start(), None);
        assert!(fst.arcs(StateId(0)).is_empty());
        assert_eq!(fst.final_weight(StateId(0)), None);
    }
}

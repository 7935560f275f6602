use {
    crate::{
        automaton::{Fst, MutableFst, StateId},
        builder::UncompiledState,
        error::{FstError, FstResult},
        util::bit_mixer::{hash_combine, mix_hashable},
        weight::Weight,
    },
    log::{debug, trace},
    std::mem::replace,
};

/// Smallest number of slots in a [StateHash] table.
pub const MINIMUM_TABLE_CAPACITY: usize = 8;

/// Marker folded into the hash of final states.
const FINAL_MARKER: u64 = 17;

/// Maps frozen states to their ids in the output automaton, merging structurally identical states.
///
/// The table stores only state ids. Hashing and equality are evaluated against the states already
/// committed to the automaton, so no copy of a frozen state is kept here. Open addressing over a
/// power-of-two table with triangular probing; [StateId::FINAL] marks an empty slot since that state
/// is never stored.
#[derive(Debug)]
pub struct StateHash {
    table: Vec<StateId>,
    count: usize,
}

impl Default for StateHash {
    fn default() -> Self {
        Self::with_capacity(MINIMUM_TABLE_CAPACITY)
    }
}

impl StateHash {
    /// Create an empty table with at least `capacity` slots.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            table: vec![StateId::FINAL; capacity.max(MINIMUM_TABLE_CAPACITY).next_power_of_two()],
            count: 0,
        }
    }

    /// Returns the number of states stored.
    #[inline]
    pub fn len(&self) -> usize {
        self.count
    }

    /// Indicates whether no state is stored.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Returns the number of slots.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.table.len()
    }

    /// Returns the id of a committed state structurally equal to `state`, calling `materialize` to
    /// commit `state` to `fst` if there is none.
    ///
    /// All arcs of `state` must point to committed states. A final state with no arcs and an output
    /// of one is always [StateId::FINAL].
    pub fn insert<W, F, M>(&mut self, state: &UncompiledState<W>, fst: &mut F, materialize: M) -> FstResult<StateId>
    where
        W: Weight,
        F: MutableFst<W>,
        M: FnOnce(&mut F) -> FstResult<StateId>,
    {
        if state.is_final_leaf() {
            return Ok(StateId::FINAL);
        }

        let hash = hash_uncompiled(state)?;
        let mask = self.table.len() - 1;
        let mut pos = hash as usize & mask;
        let mut c = 0;

        loop {
            let id = self.table[pos];

            if id == StateId::FINAL {
                let id = materialize(&mut *fst)?;
                if id == StateId::FINAL {
                    return Err(FstError::InvariantViolation(
                        "a materialized state reused the id of the canonical final state".to_string(),
                    ));
                }
                debug_assert_eq!(hash_committed::<W, F>(&*fst, id), hash);

                self.table[pos] = id;
                self.count += 1;

                // rehash at 2/3 occupancy
                if self.count > 2 * self.table.len() / 3 {
                    self.rehash::<W, F>(&*fst);
                }

                return Ok(id);
            }

            if state_equals(state, &*fst, id)? {
                trace!("Frozen state matches committed state {id}");
                return Ok(id);
            }

            // quadratic probe
            c += 1;
            pos = (pos + c) & mask;
        }
    }

    /// Forget every stored state, keeping the table's current capacity.
    pub fn reset(&mut self) {
        self.table.fill(StateId::FINAL);
        self.count = 0;
    }

    fn rehash<W: Weight, F: Fst<W>>(&mut self, fst: &F) {
        let new_len = self.table.len() * 2;
        debug!("Growing state table from {} to {new_len} slots ({} states)", self.table.len(), self.count);

        let old_table = replace(&mut self.table, vec![StateId::FINAL; new_len]);
        let mask = new_len - 1;

        for id in old_table.into_iter().filter(|id| *id != StateId::FINAL) {
            let mut pos = hash_committed::<W, F>(fst, id) as usize & mask;
            let mut c = 0;
            while self.table[pos] != StateId::FINAL {
                c += 1;
                pos = (pos + c) & mask;
            }
            self.table[pos] = id;
        }
    }
}

/// Structural hash of a frozen state whose arcs all point to committed states.
pub fn hash_uncompiled<W: Weight>(state: &UncompiledState<W>) -> FstResult<u64> {
    let mut h = 0;
    for arc in &state.arcs {
        h = hash_arc(h, arc.label, arc.committed_target()?, &arc.weight);
    }

    if state.is_final {
        h = hash_final(h, &state.final_weight);
    }

    Ok(h)
}

/// Structural hash of a committed state. Equal to [hash_uncompiled] of the state it was built from.
pub fn hash_committed<W: Weight, F: Fst<W> + ?Sized>(fst: &F, id: StateId) -> u64 {
    let mut h = 0;
    for arc in fst.arcs(id) {
        h = hash_arc(h, arc.label, arc.target, &arc.weight);
    }

    if let Some(weight) = fst.final_weight(id) {
        h = hash_final(h, weight);
    }

    h
}

/// Indicates whether the frozen `state` has the same arcs (label, target, output, in order), finality
/// and final output as the committed state `id`.
pub fn state_equals<W: Weight, F: Fst<W> + ?Sized>(
    state: &UncompiledState<W>,
    fst: &F,
    id: StateId,
) -> FstResult<bool> {
    let arcs = fst.arcs(id);
    if state.arcs.len() != arcs.len() {
        return Ok(false);
    }

    for (lhs, rhs) in state.arcs.iter().zip(arcs) {
        if lhs.label != rhs.label || lhs.committed_target()? != rhs.target || lhs.weight != rhs.weight {
            return Ok(false);
        }
    }

    Ok(match fst.final_weight(id) {
        Some(weight) => state.is_final && state.final_weight == *weight,
        None => !state.is_final,
    })
}

#[inline]
fn hash_arc<W: Weight>(h: u64, label: u32, target: StateId, weight: &W) -> u64 {
    let h = hash_combine(h, label as u64);
    let h = hash_combine(h, target.0 as u64);
    hash_combine(h, mix_hashable(weight))
}

#[inline]
fn hash_final<W: Weight>(h: u64, weight: &W) -> u64 {
    hash_combine(hash_combine(h, FINAL_MARKER), mix_hashable(weight))
}

#[cfg(test)]
mod tests {
    use {
        super::{hash_committed, hash_uncompiled, state_equals, StateHash, MINIMUM_TABLE_CAPACITY},
        crate::{
            automaton::{Arc, Fst, MutableFst, StateId, VectorFst},
            builder::{FstStats, Target, UncompiledState},
            error::FstResult,
            weight::OrdWeight,
        },
        pretty_assertions::assert_eq,
    };

    /// Wraps a [VectorFst] and counts how many states were materialized through it.
    #[derive(Default)]
    struct CountingFst {
        inner: VectorFst<OrdWeight>,
        added: usize,
    }

    impl Fst<OrdWeight> for CountingFst {
        fn start(&self) -> Option<StateId> {
            self.inner.start()
        }

        fn num_states(&self) -> usize {
            self.inner.num_states()
        }

        fn num_arcs(&self, state: StateId) -> usize {
            self.inner.num_arcs(state)
        }

        fn arcs(&self, state: StateId) -> &[Arc<OrdWeight>] {
            self.inner.arcs(state)
        }

        fn final_weight(&self, state: StateId) -> Option<&OrdWeight> {
            self.inner.final_weight(state)
        }
    }

    impl MutableFst<OrdWeight> for CountingFst {
        fn add_state(&mut self) -> FstResult<StateId> {
            self.added += 1;
            self.inner.add_state()
        }

        fn set_final(&mut self, state: StateId, weight: OrdWeight) -> FstResult<()> {
            self.inner.set_final(state, weight)
        }

        fn add_arc(&mut self, state: StateId, arc: Arc<OrdWeight>) -> FstResult<()> {
            self.inner.add_arc(state, arc)
        }

        fn set_start(&mut self, state: StateId) -> FstResult<()> {
            self.inner.set_start(state)
        }

        fn delete_all_states(&mut self) {
            self.inner.delete_all_states()
        }
    }

    fn new_fst() -> CountingFst {
        let mut fst = CountingFst::default();
        let fin = fst.inner.add_state().unwrap();
        fst.inner.set_final(fin, OrdWeight(0)).unwrap();
        fst
    }

    fn state(arcs: &[(u32, u64, StateId)], final_weight: Option<u64>) -> UncompiledState<OrdWeight> {
        let mut state = UncompiledState::default();
        for &(label, weight, target) in arcs {
            state.add_arc(label, Target::Committed(target));
            state.replace_last_output(OrdWeight(weight)).unwrap();
        }
        if let Some(weight) = final_weight {
            state.is_final = true;
            state.final_weight = OrdWeight(weight);
        }
        state
    }

    fn insert(table: &mut StateHash, s: &UncompiledState<OrdWeight>, fst: &mut CountingFst) -> StateId {
        let mut stats = FstStats::default();
        table.insert(s, fst, |fst| s.materialize(fst, &mut stats)).unwrap()
    }

    #[test]
    fn test_duplicate_states_are_merged() {
        let mut fst = new_fst();
        let mut table = StateHash::default();

        let a = state(&[(1, 0, StateId::FINAL), (2, 5, StateId::FINAL)], None);
        let id1 = insert(&mut table, &a, &mut fst);
        let id2 = insert(&mut table, &a.clone(), &mut fst);

        assert_eq!(id1, id2);
        assert_eq!(fst.added, 1);
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn test_distinct_states_are_kept_apart() {
        let mut fst = new_fst();
        let mut table = StateHash::default();

        let base = state(&[(1, 0, StateId::FINAL)], None);
        let other_label = state(&[(2, 0, StateId::FINAL)], None);
        let other_weight = state(&[(1, 3, StateId::FINAL)], None);
        let final_one = state(&[(1, 0, StateId::FINAL)], Some(0));
        let final_two = state(&[(1, 0, StateId::FINAL)], Some(2));

        let ids: Vec<StateId> = [&base, &other_label, &other_weight, &final_one, &final_two]
            .iter()
            .map(|s| insert(&mut table, s, &mut fst))
            .collect();

        for (i, a) in ids.iter().enumerate() {
            for b in &ids[i + 1..] {
                assert_ne!(a, b);
            }
        }
        assert_eq!(fst.added, 5);
    }

    #[test]
    fn test_final_leaf_is_canonical() {
        let mut fst = new_fst();
        let mut table = StateHash::default();
        let leaf = state(&[], Some(0));
        assert_eq!(insert(&mut table, &leaf, &mut fst), StateId::FINAL);
        assert_eq!(fst.added, 0);
        assert!(table.is_empty());

        // A leaf with a non-trivial final output is an ordinary state.
        let weighted_leaf = state(&[], Some(4));
        assert_ne!(insert(&mut table, &weighted_leaf, &mut fst), StateId::FINAL);
    }

    #[test]
    fn test_hashes_agree() {
        let mut fst = new_fst();
        let s = state(&[(1, 7, StateId::FINAL), (9, 0, StateId::FINAL)], Some(3));
        let id = s.materialize(&mut fst, &mut FstStats::default()).unwrap();
        assert_eq!(hash_uncompiled(&s).unwrap(), hash_committed(&fst, id));
        assert!(state_equals(&s, &fst, id).unwrap());
        assert!(!state_equals(&state(&[(1, 7, StateId::FINAL)], Some(3)), &fst, id).unwrap());
    }

    #[test]
    fn test_rehash_keeps_every_state() {
        let mut fst = new_fst();
        let mut table = StateHash::default();
        assert_eq!(table.capacity(), MINIMUM_TABLE_CAPACITY);

        let states: Vec<_> = (0..100).map(|i| state(&[(i, i as u64, StateId::FINAL)], None)).collect();
        let ids: Vec<_> = states.iter().map(|s| insert(&mut table, s, &mut fst)).collect();
        assert_eq!(table.len(), 100);
        assert!(table.capacity() >= 128);
        assert!(table.len() <= 2 * table.capacity() / 3);

        // Every state is still found after the table grew.
        for (s, id) in states.iter().zip(&ids) {
            assert_eq!(insert(&mut table, s, &mut fst), *id);
        }
        assert_eq!(fst.added, 100);
    }

    #[test]
    fn test_reset_keeps_capacity() {
        let mut fst = new_fst();
        let mut table = StateHash::with_capacity(20);
        assert_eq!(table.capacity(), 32);
        for i in 0..30 {
            insert(&mut table, &state(&[(i, 0, StateId::FINAL)], None), &mut fst);
        }
        let capacity = table.capacity();
        table.reset();
        assert!(table.is_empty());
        assert_eq!(table.capacity(), capacity);
    }
}

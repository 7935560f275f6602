use {
    crate::{
        automaton::{Label, MutableFst, StateId, VectorFst},
        builder::{
            check_order, common_prefix_length, is_final_key, push::ordering_violation, push_outputs,
            FstBuilderConfig, FstStats, Spine, StateHash, Target, UncompiledState,
        },
        error::{FstError, FstResult},
        weight::Weight,
    },
    log::{debug, trace},
    std::mem::swap,
};

/// Builds a minimal acyclic FST from keys added in strictly increasing order.
///
/// ```
/// use segment_fst::{builder::FstBuilder, automaton::VectorFst, weight::OrdWeight};
///
/// let mut builder = FstBuilder::new(VectorFst::new()).unwrap();
/// builder.add(b"cat", OrdWeight(5)).unwrap();
/// builder.add(b"dog", OrdWeight(7)).unwrap();
/// builder.finish().unwrap();
///
/// let fst = builder.into_inner();
/// assert_eq!(fst.get(b"dog"), Some(OrdWeight(7)));
/// assert_eq!(fst.get(b"do"), None);
/// ```
///
/// The builder owns its output automaton for the whole construction pass. After [FstBuilder::finish]
/// the automaton is complete; [FstBuilder::reset] clears it and starts a new pass, reusing the spine
/// and dedup table storage.
#[derive(Debug)]
pub struct FstBuilder<W, F = VectorFst<W>> {
    fst: F,
    spine: Spine<W>,
    states: StateHash,

    /// Labels of the previous non-empty key added in this pass.
    last_key: Vec<Label>,

    /// Conversion buffer for the key being added; swapped with `last_key` once the key is accepted.
    scratch: Vec<Label>,

    /// Accumulated output of the empty key, if it was added.
    start_output: Option<W>,

    stats: FstStats,
    finished: bool,
}

impl<W: Weight, F: MutableFst<W>> FstBuilder<W, F> {
    /// Create a builder writing into `fst` with the default configuration. Any states already in
    /// `fst` are deleted.
    pub fn new(fst: F) -> FstResult<Self> {
        Self::with_config(fst, FstBuilderConfig::default())
    }

    /// Create a builder writing into `fst`. Any states already in `fst` are deleted.
    pub fn with_config(fst: F, config: FstBuilderConfig) -> FstResult<Self> {
        let depth = config.get_initial_depth();
        let mut builder = Self {
            fst,
            spine: Spine::with_depth(depth),
            states: StateHash::with_capacity(config.get_initial_table_capacity()),
            last_key: Vec::with_capacity(depth),
            scratch: Vec::with_capacity(depth),
            start_output: None,
            stats: FstStats::default(),
            finished: false,
        };
        builder.reset()?;
        Ok(builder)
    }

    /// Add `key` with output `weight`.
    ///
    /// Non-empty keys must be strictly greater than the previous non-empty key of this pass; otherwise
    /// [FstError::OrderingViolation] is returned and the builder is left untouched. The empty key may
    /// be added at any time, and its outputs are combined with [Weight::times] if it is added more
    /// than once.
    pub fn add<L: Copy + Into<Label>>(&mut self, key: &[L], weight: W) -> FstResult<()> {
        self.scratch.clear();
        self.scratch.extend(key.iter().map(|&symbol| symbol.into()));
        self.add_scratch(weight)
    }

    /// Add a key that is already expressed as labels. See [FstBuilder::add].
    pub fn add_labels(&mut self, key: &[Label], weight: W) -> FstResult<()> {
        self.scratch.clear();
        self.scratch.extend_from_slice(key);
        self.add_scratch(weight)
    }

    fn add_scratch(&mut self, weight: W) -> FstResult<()> {
        if self.finished {
            return Err(FstError::BuilderFinished);
        }

        let key_len = self.scratch.len();
        if key_len == 0 {
            self.start_output = Some(match self.start_output.take() {
                Some(output) => output.times(&weight),
                None => weight,
            });
            return Ok(());
        }

        let prefix_len = common_prefix_length(&self.last_key, &self.scratch);
        check_order(&self.last_key, &self.scratch, prefix_len)?;
        let prefix_len_plus1 = prefix_len + 1;
        if !is_final_key(self.last_key.len(), key_len, prefix_len_plus1) {
            return Err(ordering_violation(&self.last_key, &self.scratch));
        }

        // Everything below the shared prefix is fixed from here on.
        self.freeze_tail(prefix_len_plus1)?;

        self.spine.ensure_depth(key_len);
        for depth in prefix_len..key_len {
            self.spine.open(depth).add_arc(self.scratch[depth], Target::Pending(depth + 1));
        }
        self.spine.open(key_len).is_final = true;

        let output = push_outputs(&mut self.spine, &self.scratch, prefix_len_plus1, weight)?;
        self.spine.get_mut(prefix_len)?.replace_last_output(output)?;

        swap(&mut self.last_key, &mut self.scratch);
        Ok(())
    }

    /// Freeze the open states at depths `prefix_len_plus1` (at least 1) through the length of the
    /// previous key, deepest first, pointing each parent's last arc at the committed id.
    fn freeze_tail(&mut self, prefix_len_plus1: usize) -> FstResult<()> {
        let down_to = prefix_len_plus1.max(1);

        for depth in (down_to..=self.last_key.len()).rev() {
            let state = self.spine.take(depth)?;
            let id = self.commit(&state);
            self.spine.recycle(state);
            let id = id?;

            trace!("Froze state at depth {depth} as {id}");
            self.spine.get_mut(depth - 1)?.last_arc_mut()?.target = Target::Committed(id);
        }

        Ok(())
    }

    fn commit(&mut self, state: &UncompiledState<W>) -> FstResult<StateId> {
        let Self {
            fst,
            states,
            stats,
            ..
        } = self;

        states.insert(state, fst, |fst| state.materialize(fst, stats))
    }

    /// Complete the automaton: freeze the remaining open states, commit the start state and attach
    /// the empty key's output to it.
    ///
    /// If the root has no arcs, the start state is [StateId::FINAL]; with nothing added at all it keeps
    /// its final output of one. The builder accepts no further keys until [FstBuilder::reset] is
    /// called.
    pub fn finish(&mut self) -> FstResult<FstStats> {
        if self.finished {
            return Err(FstError::BuilderFinished);
        }

        self.freeze_tail(1)?;

        let root_id = if self.spine.is_open(0) {
            let root = self.spine.take(0)?;
            let id = if root.arcs.is_empty() {
                Ok(None)
            } else {
                self.commit(&root).map(Some)
            };
            self.spine.recycle(root);
            id?
        } else {
            None
        };

        let start = root_id.unwrap_or(StateId::FINAL);
        self.fst.set_start(start)?;

        if let Some(output) = self.start_output.take() {
            self.stats.record_weight(&output);
            self.fst.set_final(start, output)?;
        }

        self.finished = true;
        debug!("Finished FST: {}", self.stats);
        Ok(self.stats)
    }

    /// Start a new construction pass: delete every state of the output automaton, re-create
    /// [StateId::FINAL], and clear the spine, the dedup table and the previous key. Allocated storage
    /// is kept.
    pub fn reset(&mut self) -> FstResult<()> {
        self.fst.delete_all_states();
        let final_id = self.fst.add_state()?;
        if final_id != StateId::FINAL {
            return Err(FstError::InvariantViolation(format!(
                "output automaton assigned id {final_id} to its first state"
            )));
        }
        self.fst.set_final(final_id, W::one())?;

        self.spine.clear();
        self.states.reset();
        self.last_key.clear();
        self.scratch.clear();
        self.start_output = None;
        self.stats = FstStats {
            num_states: 1,
            num_arcs: 0,
            total_weight_size: W::one().size(),
        };
        self.finished = false;

        debug!("Reset FST builder");
        Ok(())
    }

    /// Returns the output automaton.
    #[inline]
    pub fn fst(&self) -> &F {
        &self.fst
    }

    /// Consume the builder, returning the output automaton.
    #[inline]
    pub fn into_inner(self) -> F {
        self.fst
    }

    /// Returns the statistics accumulated so far in this pass.
    #[inline]
    pub fn stats(&self) -> FstStats {
        self.stats
    }

    /// Indicates whether [FstBuilder::finish] has been called since the last reset.
    #[inline]
    pub fn is_finished(&self) -> bool {
        self.finished
    }
}

/// Build a [VectorFst] from `(key, weight)` pairs sorted by key.
pub fn build<W, K, I>(entries: I) -> FstResult<(VectorFst<W>, FstStats)>
where
    W: Weight,
    K: AsRef<[u8]>,
    I: IntoIterator<Item = (K, W)>,
{
    let mut builder = FstBuilder::new(VectorFst::new())?;
    for (key, weight) in entries {
        builder.add(key.as_ref(), weight)?;
    }

    let stats = builder.finish()?;
    Ok((builder.into_inner(), stats))
}

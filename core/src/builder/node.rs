use {
    crate::{
        automaton::{Arc, Label, MutableFst, StateId},
        builder::FstStats,
        error::{FstError, FstResult},
        weight::Weight,
    },
    std::mem::replace,
};

/// Where an in-progress arc leads.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Target {
    /// The open state at this depth of the spine.
    Pending(usize),

    /// A state already committed to the output automaton.
    Committed(StateId),
}

/// An arc of a state that has not been frozen yet.
#[derive(Clone, Debug)]
pub struct BuilderArc<W> {
    /// Input symbol.
    pub label: Label,

    /// Destination; `Pending` until the destination is frozen.
    pub target: Target,

    /// Output emitted when following this arc.
    pub weight: W,
}

impl<W> BuilderArc<W> {
    /// Returns the committed destination of this arc.
    ///
    /// Fails with [FstError::InvariantViolation] if the destination is still open: a state can only
    /// be frozen once all of its children have been.
    pub fn committed_target(&self) -> FstResult<StateId> {
        match self.target {
            Target::Committed(id) => Ok(id),
            Target::Pending(depth) => Err(FstError::InvariantViolation(format!(
                "arc {} still points to the open state at depth {depth}",
                self.label
            ))),
        }
    }
}

/// A state on the spine. Its arcs are appended in label order and only the last one can still change.
#[derive(Clone, Debug)]
pub struct UncompiledState<W> {
    /// Outgoing arcs, in insertion (and therefore label) order.
    pub arcs: Vec<BuilderArc<W>>,

    /// Whether a key ends here.
    pub is_final: bool,

    /// Output emitted when a key ends here. Meaningful only if `is_final` is set.
    pub final_weight: W,
}

impl<W: Weight> Default for UncompiledState<W> {
    fn default() -> Self {
        Self {
            arcs: Vec::new(),
            is_final: false,
            final_weight: W::one(),
        }
    }
}

impl<W: Weight> UncompiledState<W> {
    /// Reset to a non-final state with no arcs, keeping the arc storage.
    pub fn clear(&mut self) {
        self.arcs.clear();
        self.is_final = false;
        self.final_weight = W::one();
    }

    /// Append an arc with an output of one.
    pub fn add_arc(&mut self, label: Label, target: Target) {
        debug_assert!(self.arcs.last().map_or(true, |last| last.label < label), "arcs must be added in label order");
        self.arcs.push(BuilderArc {
            label,
            target,
            weight: W::one(),
        });
    }

    /// Returns the most recently added arc.
    pub fn last_arc_mut(&mut self) -> FstResult<&mut BuilderArc<W>> {
        self.arcs.last_mut().ok_or_else(|| FstError::InvariantViolation("open state has no arcs".to_string()))
    }

    /// Sets the output of the most recently added arc, returning the previous output.
    pub fn replace_last_output(&mut self, weight: W) -> FstResult<W> {
        let arc = self.last_arc_mut()?;
        Ok(replace(&mut arc.weight, weight))
    }

    /// Prefix every outgoing output, and the final output if this state is final, with `prefix`.
    pub fn prepend_output(&mut self, prefix: &W) {
        for arc in self.arcs.iter_mut() {
            arc.weight = prefix.times(&arc.weight);
        }

        if self.is_final {
            self.final_weight = prefix.times(&self.final_weight);
        }
    }

    /// Indicates whether this state is indistinguishable from [StateId::FINAL].
    #[inline]
    pub fn is_final_leaf(&self) -> bool {
        self.arcs.is_empty() && self.is_final && self.final_weight.is_one()
    }

    /// Append this state to `fst`, returning its new id and counting it in `stats`.
    pub fn materialize<F: MutableFst<W>>(&self, fst: &mut F, stats: &mut FstStats) -> FstResult<StateId> {
        let id = fst.add_state()?;

        if self.is_final {
            fst.set_final(id, self.final_weight.clone())?;
            stats.record_weight(&self.final_weight);
        }

        for arc in &self.arcs {
            fst.add_arc(id, Arc::new(arc.label, arc.weight.clone(), arc.committed_target()?))?;
            stats.record_weight(&arc.weight);
        }

        stats.num_states += 1;
        stats.num_arcs += self.arcs.len();
        Ok(id)
    }
}

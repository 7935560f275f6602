use crate::{
    builder::UncompiledState,
    error::{FstError, FstResult},
    weight::Weight,
};

/// The open states of the key most recently added, indexed by depth (0 is the root).
///
/// A slot is `None` once its state has been frozen and until the next key opens it again. Frozen
/// states are cleared and kept on a free list so their arc storage is reused by later keys.
#[derive(Debug)]
pub struct Spine<W> {
    slots: Vec<Option<UncompiledState<W>>>,
    recycled: Vec<UncompiledState<W>>,
}

impl<W: Weight> Spine<W> {
    /// Create an empty spine with room for keys of length `depth` before reallocating.
    pub fn with_depth(depth: usize) -> Self {
        Self {
            slots: Vec::with_capacity(depth + 1),
            recycled: Vec::with_capacity(depth + 1),
        }
    }

    /// Returns the number of slots, open or not.
    #[inline]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Indicates whether no slot has ever been allocated since the last [Spine::clear].
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Make sure slots `0..=key_len` exist.
    pub fn ensure_depth(&mut self, key_len: usize) {
        if self.slots.len() <= key_len {
            self.slots.resize_with(key_len + 1, || None);
        }
    }

    /// Indicates whether the state at `depth` is open.
    #[inline]
    pub fn is_open(&self, depth: usize) -> bool {
        matches!(self.slots.get(depth), Some(Some(_)))
    }

    /// Returns the state at `depth`, opening a fresh one if the slot is empty.
    pub fn open(&mut self, depth: usize) -> &mut UncompiledState<W> {
        self.ensure_depth(depth);
        let recycled = &mut self.recycled;
        self.slots[depth].get_or_insert_with(|| recycled.pop().unwrap_or_default())
    }

    /// Returns the open state at `depth`.
    pub fn get(&self, depth: usize) -> FstResult<&UncompiledState<W>> {
        self.slots.get(depth).and_then(Option::as_ref).ok_or_else(|| not_open(depth))
    }

    /// Returns the open state at `depth` for modification.
    pub fn get_mut(&mut self, depth: usize) -> FstResult<&mut UncompiledState<W>> {
        self.slots.get_mut(depth).and_then(Option::as_mut).ok_or_else(|| not_open(depth))
    }

    /// Returns the open states at `depth - 1` and `depth`.
    pub fn parent_and_child(&mut self, depth: usize) -> FstResult<(&mut UncompiledState<W>, &mut UncompiledState<W>)> {
        if depth == 0 || depth >= self.slots.len() {
            return Err(not_open(depth));
        }

        let (parents, children) = self.slots.split_at_mut(depth);
        let parent = parents[depth - 1].as_mut().ok_or_else(|| not_open(depth - 1))?;
        let child = children[0].as_mut().ok_or_else(|| not_open(depth))?;
        Ok((parent, child))
    }

    /// Remove the open state at `depth`, leaving the slot empty.
    pub fn take(&mut self, depth: usize) -> FstResult<UncompiledState<W>> {
        self.slots.get_mut(depth).and_then(Option::take).ok_or_else(|| not_open(depth))
    }

    /// Return a state removed with [Spine::take] so its storage can back a later open state.
    pub fn recycle(&mut self, mut state: UncompiledState<W>) {
        state.clear();
        self.recycled.push(state);
    }

    /// Empty every slot, keeping all allocated storage.
    pub fn clear(&mut self) {
        for mut state in self.slots.drain(..).flatten() {
            state.clear();
            self.recycled.push(state);
        }
    }
}

fn not_open(depth: usize) -> FstError {
    FstError::InvariantViolation(format!("no open state at depth {depth}"))
}

#[cfg(test)]
mod tests {
    use {
        super::Spine,
        crate::{builder::Target, error::FstError, weight::OrdWeight},
        pretty_assertions::assert_eq,
    };

    #[test]
    fn test_open_take_recycle() {
        let mut spine: Spine<OrdWeight> = Spine::with_depth(4);
        assert!(spine.is_empty());
        spine.ensure_depth(3);
        assert_eq!(spine.len(), 4);
        assert!(!spine.is_open(2));

        spine.open(2).add_arc(7, Target::Pending(3));
        assert!(spine.is_open(2));
        assert_eq!(spine.get(2).unwrap().arcs.len(), 1);

        let state = spine.take(2).unwrap();
        assert!(!spine.is_open(2));
        assert!(matches!(spine.take(2), Err(FstError::InvariantViolation(_))));

        spine.recycle(state);
        // Reopening hands back the cleared, recycled state.
        assert!(spine.open(2).arcs.is_empty());
    }

    #[test]
    fn test_parent_and_child() {
        let mut spine: Spine<OrdWeight> = Spine::with_depth(2);
        spine.open(0).add_arc(1, Target::Pending(1));
        spine.open(1);

        let (parent, child) = spine.parent_and_child(1).unwrap();
        parent.arcs[0].weight = OrdWeight(3);
        child.is_final = true;
        assert_eq!(spine.get(0).unwrap().arcs[0].weight, OrdWeight(3));
        assert!(spine.get(1).unwrap().is_final);

        assert!(spine.parent_and_child(0).is_err());
        assert!(spine.parent_and_child(2).is_err());
    }

    #[test]
    fn test_clear() {
        let mut spine: Spine<OrdWeight> = Spine::with_depth(2);
        spine.open(0);
        spine.open(1);
        spine.clear();
        assert!(spine.is_empty());
        assert!(spine.get(0).is_err());
    }
}

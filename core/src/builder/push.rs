use crate::{
    automaton::Label,
    builder::Spine,
    error::{FstError, FstResult},
    weight::Weight,
};

/// Returns the length of the longest common prefix of `a` and `b`.
#[inline]
pub fn common_prefix_length(a: &[Label], b: &[Label]) -> usize {
    a.iter().zip(b.iter()).take_while(|(x, y)| x == y).count()
}

/// Indicates whether a key of length `key_len` ends in a new final state, given the previous key's
/// length and `prefix_len_plus1` (one more than their common prefix length).
///
/// This is false only when the key repeats the previous key.
#[inline]
pub fn is_final_key(last_len: usize, key_len: usize, prefix_len_plus1: usize) -> bool {
    last_len != key_len || prefix_len_plus1 != key_len + 1
}

/// Fails if `key` sorts before `last`. `prefix_len` is their common prefix length. Equal keys are
/// not rejected here; see [is_final_key].
pub fn check_order(last: &[Label], key: &[Label], prefix_len: usize) -> FstResult<()> {
    let out_of_order = match (last.get(prefix_len), key.get(prefix_len)) {
        (Some(previous), Some(next)) => next < previous,
        // `key` is a proper prefix of `last`.
        (Some(_), None) => true,
        _ => false,
    };

    if out_of_order {
        Err(ordering_violation(last, key))
    } else {
        Ok(())
    }
}

pub(crate) fn ordering_violation(last: &[Label], key: &[Label]) -> FstError {
    FstError::OrderingViolation {
        previous: last.to_vec(),
        key: key.to_vec(),
    }
}

/// Push outputs along the prefix `key` shares with the previous key and return the part of `output`
/// that is left for the new key's own arcs.
///
/// The arcs for `key` must already be on the spine. For each shared arc whose output is not one, the
/// arc keeps only the common left part (`plus`) of its output and the incoming output; the remainder
/// of the old output moves down onto every arc (and the final output) of the state the arc leads
/// to, and the common part is factored out of the output still being carried.
pub fn push_outputs<W: Weight>(
    spine: &mut Spine<W>,
    key: &[Label],
    prefix_len_plus1: usize,
    mut output: W,
) -> FstResult<W> {
    for depth in 1..prefix_len_plus1 {
        let (parent, child) = spine.parent_and_child(depth)?;
        let last = parent.last_arc_mut()?;
        debug_assert_eq!(last.label, key[depth - 1]);

        if !last.weight.is_one() {
            let common = last.weight.plus(&output);
            let suffix = last.weight.divide_left(&common);
            output = output.divide_left(&common);
            last.weight = common;
            child.prepend_output(&suffix);
        }
    }

    Ok(output)
}

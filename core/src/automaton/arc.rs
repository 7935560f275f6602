use {
    crate::automaton::{Label, StateId},
    std::fmt::{Debug, Display, Formatter, Result as FmtResult},
};

/// A committed arc: reading `label` emits `weight` and moves to `target`.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct Arc<W> {
    /// Input symbol.
    pub label: Label,

    /// Output emitted when following this arc.
    pub weight: W,

    /// Destination state.
    pub target: StateId,
}

impl<W> Arc<W> {
    /// Create a new arc.
    #[inline]
    pub fn new(label: Label, weight: W, target: StateId) -> Self {
        Self {
            label,
            weight,
            target,
        }
    }
}

impl<W: Debug> Display for Arc<W> {
    fn fmt(&self, f: &mut Formatter) -> FmtResult {
        write!(f, "{} / {:?} -> {}", self.label, self.weight, self.target)
    }
}

#[cfg(test)]
mod tests {
    use {
        super::Arc,
        crate::{automaton::StateId, weight::OrdWeight},
        pretty_assertions::assert_eq,
    };

    #[test]
    fn test_display() {
        let arc = Arc::new(97, OrdWeight(3), StateId(4));
        assert_eq!(arc.to_string(), "97 / OrdWeight(3) -> 4");
        assert_eq!(Arc::new(1, (), StateId::FINAL).to_string(), "1 / () -> 0");
    }
}

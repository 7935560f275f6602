use {
    crate::automaton::Label,
    std::{
        error::Error,
        fmt::{Display, Formatter, Result as FmtResult},
    },
};

/// Errors that can occur while building an FST.
#[derive(Debug)]
pub enum FstError {
    /// A key was not strictly greater than the key added before it in the same construction pass.
    OrderingViolation {
        /// The previous key added to the builder.
        previous: Vec<Label>,

        /// The offending key.
        key: Vec<Label>,
    },

    /// The output automaton could not allocate another state or arc.
    AllocationFailure(String),

    /// An internal consistency check failed. This indicates a bug in the builder or in an output
    /// automaton implementation, not a caller error.
    InvariantViolation(String),

    /// A builder configuration parameter was out of range.
    InvalidConfig(String),

    /// The builder has already been finished and must be reset before it can be used again.
    BuilderFinished,
}

impl Display for FstError {
    fn fmt(&self, f: &mut Formatter) -> FmtResult {
        match self {
            Self::OrderingViolation {
                previous,
                key,
            } => {
                write!(f, "Keys must be added in strictly increasing order: got {key:?} after {previous:?}")
            }
            Self::AllocationFailure(message) => write!(f, "Allocation failure: {message}"),
            Self::InvariantViolation(message) => write!(f, "Builder invariant violated: {message}"),
            Self::InvalidConfig(message) => write!(f, "Invalid builder configuration: {message}"),
            Self::BuilderFinished => write!(f, "Builder has already been finished; call reset() first"),
        }
    }
}

impl Error for FstError {}

/// A type alias for a `Result` with an [FstError].
pub type FstResult<T> = Result<T, FstError>;

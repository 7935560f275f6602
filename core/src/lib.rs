//! Incremental construction of minimal acyclic finite-state transducers for segment term
//! dictionaries.

#![warn(clippy::all)]
#![warn(rustdoc::missing_crate_level_docs)]
#![warn(rustdoc::broken_intra_doc_links)]
#![warn(missing_docs)]

mod error;
mod util;

/// The output automaton and its collaborator traits.
pub mod automaton;

/// Sorted-key FST construction.
pub mod builder;

/// Semiring weights carried on arcs.
pub mod weight;

pub use error::*;

//! The output automaton the builder writes frozen states into.
mod arc;
mod fst;
mod state;
mod vector_fst;

pub use {arc::*, fst::*, state::*, vector_fst::*};

/// An input symbol on an arc. Keys made of bytes, UTF-16 code units or `char`s are widened to this
/// type; their ordering is preserved.
pub type Label = u32;

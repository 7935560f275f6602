//! Incremental construction of minimal acyclic FSTs from sorted keys.
//!
//! Keys are added in strictly increasing order. The builder keeps one open state per depth of the
//! most recent key (the spine); when a new key diverges from the previous one, the states below the
//! divergence point can never change again, so they are frozen and handed to a hash table that
//! merges them with structurally identical states already committed to the output automaton.
//! Outputs are pushed toward the start state as keys arrive so that shared transitions carry only
//! the shared part of their outputs.
//!
//! The algorithm is described in Daciuk, Mihov, Watson & Watson, "Incremental Construction of
//! Minimal Acyclic Finite-State Automata" (2000), with the output handling of Mihov & Maurel,
//! "Direct Construction of Minimal Acyclic Subsequential Transducers" (2001).
mod config;
mod fst_builder;
mod node;
mod node_hash;
mod push;
mod spine;
mod stats;

pub use {config::*, fst_builder::*, node::*, node_hash::*, push::*, spine::*, stats::*};

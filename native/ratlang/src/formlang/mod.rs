//! Finite automata over single-character letters.
//!
//! This module provides:
//! - an ordered integer set used for states and letter positions
//! - a non-deterministic automaton store with DOT export
//! - subset construction (NFA to DFA conversion)
//! - Hopcroft minimization with canonical state numbering

mod automaton;
mod dfa;
mod state;
mod subset_construction;

pub use automaton::Automaton;
pub use dfa::Dfa;
pub use state::{StateId, StateSet};
pub use subset_construction::subset_construction;

//! Rational expressions and finite automata.
//!
//! - [`rational`]: expression trees, position numbering, first/last/follow
//!   sets, a parser and DOT export
//! - [`glushkov`]: expression to position automaton
//! - [`arden`]: automaton to expression through language equations
//! - [`equivalence`]: language equality of two expressions
//! - [`formlang`]: the automaton store, determinization and minimization

pub mod arden;
pub mod equivalence;
mod error;
pub mod formlang;
pub mod glushkov;
#[cfg(feature = "python")]
mod python_bindings;
pub mod rational;

pub use arden::{EquationSystem, arden};
pub use equivalence::{same_language, same_language_expr};
pub use error::{ParseError, Result};
pub use formlang::Automaton;
pub use glushkov::{glushkov, glushkov_from};
pub use rational::{Expr, parse};

//! Language equivalence of rational expressions.

use crate::error::Result;
use crate::formlang::Automaton;
use crate::glushkov::glushkov_from;
use crate::rational::{self, Expr};

/// Whether two expressions, given as text, denote the same language.
///
/// # Errors
///
/// Returns the first [`ParseError`](crate::ParseError) met; nothing is
/// compared in that case.
pub fn same_language(first: &str, second: &str) -> Result<bool> {
    let first = rational::parse(first)?;
    let second = rational::parse(second)?;
    Ok(same_language_expr(first.as_ref(), second.as_ref()))
}

/// Whether two possibly-empty expressions denote the same language.
///
/// Both Glushkov automata are minimized and compared state for state. This
/// is sound because minimization numbers states canonically.
pub fn same_language_expr(first: Option<&Expr>, second: Option<&Expr>) -> bool {
    let first = glushkov_from(first).minimize();
    let second = glushkov_from(second).minimize();
    let same = same_structure(&first, &second);
    tracing::debug!(same, "compared minimal automata");
    same
}

/// Positional comparison of two automata: same states, initial and final
/// states, alphabet, and transition table in iteration order.
fn same_structure(first: &Automaton, second: &Automaton) -> bool {
    first.num_states() == second.num_states()
        && first.initial_states() == second.initial_states()
        && first.final_states() == second.final_states()
        && first.alphabet() == second.alphabet()
        && first.transitions().eq(second.transitions())
}

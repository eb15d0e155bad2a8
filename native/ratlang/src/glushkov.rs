//! Glushkov (position) automaton of a rational expression.

use crate::formlang::{Automaton, StateId};
use crate::rational::{self, Expr};

/// Build the Glushkov automaton of a numbered expression.
///
/// State 0 is the unique initial state and state `p` stands for the letter
/// at position `p`, so every non-initial state has exactly one incoming
/// letter. The automaton accepts the language of `expr`.
///
/// # Panics
///
/// Panics if `expr` has not been numbered with [`rational::number`].
pub fn glushkov(expr: &Expr) -> Automaton {
    assert!(
        expr.is_numbered(),
        "glushkov requires a numbered expression, call rational::number first"
    );

    let count = expr.letter_count() as StateId;
    let mut automaton = Automaton::new();
    automaton.add_initial_state(0);
    automaton.ensure_state(count);

    let letter = |position| match rational::letter_at(expr, position) {
        Some(letter) => letter,
        None => unreachable!("numbered expression has no letter at position {position}"),
    };

    for position in rational::first(expr).iter() {
        automaton.add_transition(0, letter(position), position);
    }

    // Same sets as rational::follow(expr, origin), computed in one pass
    let follows = rational::follow_all(expr);
    for origin in 1..=count {
        for destination in follows[origin as usize].iter() {
            automaton.add_transition(origin, letter(destination), destination);
        }
    }

    for position in rational::last(expr).iter() {
        automaton.add_final_state(position);
    }
    if rational::nullable(expr) {
        automaton.add_final_state(0);
    }

    tracing::debug!(
        expression = %expr,
        states = automaton.num_states(),
        finals = %automaton.final_states(),
        "built Glushkov automaton"
    );

    automaton
}

/// Glushkov automaton of a possibly-empty language. The tree is numbered
/// on a private copy; ∅ yields the single non-accepting initial state 0.
pub fn glushkov_from(expr: Option<&Expr>) -> Automaton {
    match expr {
        Some(expr) => {
            let mut numbered = expr.clone();
            rational::number(&mut numbered);
            glushkov(&numbered)
        }
        None => {
            let mut automaton = Automaton::new();
            automaton.add_initial_state(0);
            automaton
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::formlang::StateSet;

    fn build(text: &str) -> Automaton {
        let expr = rational::parse(text).unwrap();
        glushkov_from(expr.as_ref())
    }

    #[test]
    fn test_glushkov_a_bstar() {
        let automaton = build("a.b*");

        assert_eq!(automaton.num_states(), 3);
        assert_eq!(automaton.initial_states(), &StateSet::from([0]));
        assert_eq!(automaton.final_states(), &StateSet::from([1, 2]));
        assert_eq!(
            automaton.transitions().collect::<Vec<_>>(),
            vec![(0, 'a', 1), (1, 'b', 2), (2, 'b', 2)]
        );
    }

    #[test]
    fn test_glushkov_nullable_root_makes_initial_final() {
        let automaton = build("a*");
        assert!(automaton.final_states().contains(0));
        assert!(automaton.accepts(""));
        assert!(automaton.accepts("aaa"));
    }

    #[test]
    fn test_glushkov_epsilon_only() {
        let automaton = build("ε");
        assert_eq!(automaton.num_states(), 1);
        assert_eq!(automaton.final_states(), &StateSet::from([0]));
        assert_eq!(automaton.transitions().count(), 0);
    }

    #[test]
    fn test_glushkov_empty_language() {
        let automaton = glushkov_from(None);
        assert_eq!(automaton.num_states(), 1);
        assert!(automaton.is_empty());
    }

    #[test]
    fn test_glushkov_states_have_one_incoming_letter() {
        let automaton = build("(a+b)*.a.(a+b)");
        for state in 1..automaton.num_states() {
            let letters: std::collections::BTreeSet<char> = automaton
                .transitions()
                .filter(|&(_, _, d)| d == state)
                .map(|(_, l, _)| l)
                .collect();
            assert_eq!(letters.len(), 1, "state {state} has letters {letters:?}");
        }
        assert!(automaton.accepts("ab"));
        assert!(automaton.accepts("bbaa"));
        assert!(!automaton.accepts("bb"));
    }

    #[test]
    #[should_panic(expected = "glushkov requires a numbered expression")]
    fn test_glushkov_rejects_unnumbered_expression() {
        glushkov(&Expr::letter('a'));
    }
}

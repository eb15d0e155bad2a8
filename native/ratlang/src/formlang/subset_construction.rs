//! Subset construction algorithm for converting an NFA to a DFA.

use crate::formlang::automaton::Automaton;
use crate::formlang::dfa::Dfa;
use crate::formlang::state::{StateId, StateSet};
use indexmap::IndexMap;

/// Convert an automaton to a DFA using the powerset construction.
///
/// Only subsets reachable from the initial set are built; the empty subset
/// is never materialized, so the result is a partial DFA.
pub fn subset_construction(nfa: &Automaton) -> Dfa {
    // Each DFA state corresponds to a set of NFA states
    let mut state_mapping: IndexMap<Vec<StateId>, StateId> = IndexMap::new();
    let mut dfa = Dfa::new();

    let initial_set = nfa.initial_states().clone();
    if initial_set.is_empty() {
        return dfa;
    }

    let initial_dfa_state = dfa.add_state();
    state_mapping.insert(initial_set.to_vec(), initial_dfa_state);
    dfa.set_start_state(initial_dfa_state);
    if initial_set.intersects(nfa.final_states()) {
        dfa.add_final_state(initial_dfa_state);
    }

    let mut worklist: Vec<(StateId, StateSet)> = vec![(initial_dfa_state, initial_set)];

    while let Some((current_dfa_state, current_nfa_set)) = worklist.pop() {
        for &letter in nfa.alphabet() {
            let next_nfa_set = nfa.step(&current_nfa_set, letter);
            if next_nfa_set.is_empty() {
                continue;
            }

            let next_vec = next_nfa_set.to_vec();
            let next_dfa_state = match state_mapping.get(&next_vec) {
                Some(&existing) => existing,
                None => {
                    let new_state = dfa.add_state();
                    state_mapping.insert(next_vec, new_state);
                    if next_nfa_set.intersects(nfa.final_states()) {
                        dfa.add_final_state(new_state);
                    }
                    worklist.push((new_state, next_nfa_set));
                    new_state
                }
            };

            dfa.add_transition(current_dfa_state, letter, next_dfa_state);
        }
    }

    dfa
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_subset_construction_basic() {
        // NFA: 0 -a-> 1, 0 -a-> 2, 1 -b-> 3(final), 2 -b-> 3(final)
        let mut nfa = Automaton::new();
        nfa.add_transition(0, 'a', 1);
        nfa.add_transition(0, 'a', 2);
        nfa.add_transition(1, 'b', 3);
        nfa.add_transition(2, 'b', 3);
        nfa.add_initial_state(0);
        nfa.add_final_state(3);

        let dfa = subset_construction(&nfa);

        // {0}, {1,2}, {3}
        assert_eq!(dfa.num_states(), 3);
        assert_eq!(dfa.start_state(), Some(0));
        let after_a = dfa.transition(0, 'a').unwrap();
        let after_ab = dfa.transition(after_a, 'b').unwrap();
        assert!(dfa.final_states().contains(after_ab));
    }

    #[test]
    fn test_subset_construction_multiple_initial_states() {
        let mut nfa = Automaton::new();
        nfa.add_initial_state(0);
        nfa.add_initial_state(1);
        nfa.add_final_state(1);
        nfa.add_transition(0, 'a', 1);

        let dfa = subset_construction(&nfa);

        assert!(dfa.final_states().contains(0));
        assert_eq!(dfa.transition(0, 'a'), Some(1));
    }

    #[test]
    fn test_empty_nfa() {
        let nfa = Automaton::new();
        let dfa = subset_construction(&nfa);
        assert!(dfa.start_state().is_none());
    }
}

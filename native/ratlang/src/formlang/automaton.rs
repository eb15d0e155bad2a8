//! Non-deterministic finite automaton over single-character letters.

use crate::formlang::state::{StateId, StateSet};
use crate::formlang::subset_construction::subset_construction;
use std::collections::{BTreeMap, BTreeSet, VecDeque};
use std::fmt::Write as _;

/// A non-deterministic finite automaton without epsilon transitions.
///
/// States are `0..num_states`. Transitions are kept in a `BTreeMap` so that
/// every traversal visits them in `(origin, letter)` order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Automaton {
    /// Number of states (states are numbered 0..num_states)
    num_states: StateId,
    initial_states: StateSet,
    final_states: StateSet,
    /// (origin, letter) -> set of destination states
    transitions: BTreeMap<(StateId, char), StateSet>,
    /// All letters that label at least one transition
    alphabet: BTreeSet<char>,
}

impl Automaton {
    /// Create an automaton with no states.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a fresh state and return its id.
    pub fn add_state(&mut self) -> StateId {
        let id = self.num_states;
        self.num_states += 1;
        id
    }

    /// Ensure a state exists, expanding num_states if needed.
    pub fn ensure_state(&mut self, state: StateId) {
        if state >= self.num_states {
            self.num_states = state + 1;
        }
    }

    pub fn add_transition(&mut self, origin: StateId, letter: char, destination: StateId) {
        self.ensure_state(origin);
        self.ensure_state(destination);
        self.alphabet.insert(letter);
        self.transitions
            .entry((origin, letter))
            .or_default()
            .insert(destination);
    }

    pub fn add_initial_state(&mut self, state: StateId) {
        self.ensure_state(state);
        self.initial_states.insert(state);
    }

    pub fn add_final_state(&mut self, state: StateId) {
        self.ensure_state(state);
        self.final_states.insert(state);
    }

    pub fn num_states(&self) -> StateId {
        self.num_states
    }

    /// Largest state id, or `None` for an automaton without states.
    pub fn max_state(&self) -> Option<StateId> {
        self.num_states.checked_sub(1)
    }

    pub fn states(&self) -> std::ops::Range<StateId> {
        0..self.num_states
    }

    pub fn initial_states(&self) -> &StateSet {
        &self.initial_states
    }

    pub fn final_states(&self) -> &StateSet {
        &self.final_states
    }

    pub fn alphabet(&self) -> &BTreeSet<char> {
        &self.alphabet
    }

    /// Destinations of `origin` on `letter`.
    pub fn successors(&self, origin: StateId, letter: char) -> Option<&StateSet> {
        self.transitions.get(&(origin, letter))
    }

    /// All transitions as `(origin, letter, destination)`, ordered by origin,
    /// then letter, then destination.
    pub fn transitions(&self) -> impl Iterator<Item = (StateId, char, StateId)> + '_ {
        self.transitions
            .iter()
            .flat_map(|(&(origin, letter), dests)| dests.iter().map(move |d| (origin, letter, d)))
    }

    /// Call `action` once per transition, in the order of [`Automaton::transitions`].
    pub fn for_each_transition<F>(&self, mut action: F)
    where
        F: FnMut(StateId, char, StateId),
    {
        for (origin, letter, destination) in self.transitions() {
            action(origin, letter, destination);
        }
    }

    /// States reached from any state of `states` by reading `letter`.
    pub fn step(&self, states: &StateSet, letter: char) -> StateSet {
        let mut reached = StateSet::with_capacity(self.num_states as usize);
        for state in states.iter() {
            if let Some(destinations) = self.successors(state, letter) {
                reached.union_with(destinations);
            }
        }
        reached
    }

    /// Check whether the automaton accepts `word`.
    pub fn accepts(&self, word: &str) -> bool {
        let mut current = self.initial_states.clone();
        for letter in word.chars() {
            current = self.step(&current, letter);
            if current.is_empty() {
                return false;
            }
        }
        current.intersects(&self.final_states)
    }

    /// Check if the accepted language is empty.
    pub fn is_empty(&self) -> bool {
        let mut visited = StateSet::with_capacity(self.num_states as usize);
        let mut queue: VecDeque<StateId> = self.initial_states.iter().collect();

        while let Some(state) = queue.pop_front() {
            if visited.contains(state) {
                continue;
            }
            visited.insert(state);

            if self.final_states.contains(state) {
                return false;
            }

            for &letter in &self.alphabet {
                if let Some(destinations) = self.successors(state, letter) {
                    queue.extend(destinations.iter().filter(|d| !visited.contains(*d)));
                }
            }
        }

        true
    }

    /// Determinize and minimize. The result is canonical: two automata
    /// accepting the same language minimize to equal values.
    pub fn minimize(&self) -> Automaton {
        let dfa = subset_construction(self);
        let minimized = dfa.minimize();
        tracing::debug!(
            states = self.num_states,
            dfa_states = dfa.num_states(),
            minimal_states = minimized.num_states(),
            "minimized automaton"
        );
        minimized.to_automaton()
    }

    /// Render in DOT format. Initial states get an incoming arrow from an
    /// invisible node, final states are drawn with a double circle.
    pub fn to_dot(&self) -> String {
        let mut out = String::from("digraph automaton {\n\trankdir=LR;\n");
        for state in self.states() {
            let shape = if self.final_states.contains(state) {
                "doublecircle"
            } else {
                "circle"
            };
            let _ = writeln!(out, "\t{state} [shape={shape}];");
            if self.initial_states.contains(state) {
                let _ = writeln!(out, "\tinit{state} [shape=point];");
                let _ = writeln!(out, "\tinit{state} -> {state};");
            }
        }
        for (origin, letter, destination) in self.transitions() {
            let _ = writeln!(out, "\t{origin} -> {destination} [label=\"{letter}\"];");
        }
        out.push_str("}\n");
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ab_star() -> Automaton {
        // 0 -a-> 1, 1 -b-> 1, finals {1}
        let mut automaton = Automaton::new();
        automaton.add_initial_state(0);
        automaton.add_transition(0, 'a', 1);
        automaton.add_transition(1, 'b', 1);
        automaton.add_final_state(1);
        automaton
    }

    #[test]
    fn test_automaton_basic() {
        let automaton = ab_star();
        assert_eq!(automaton.num_states(), 2);
        assert_eq!(automaton.max_state(), Some(1));
        assert_eq!(automaton.alphabet().iter().collect::<String>(), "ab");
        assert!(!automaton.is_empty());
    }

    #[test]
    fn test_accepts() {
        let automaton = ab_star();
        assert!(automaton.accepts("a"));
        assert!(automaton.accepts("abbb"));
        assert!(!automaton.accepts(""));
        assert!(!automaton.accepts("ba"));
        assert!(!automaton.accepts("c"));
    }

    #[test]
    fn test_transitions_are_ordered() {
        let mut automaton = Automaton::new();
        automaton.add_transition(1, 'b', 0);
        automaton.add_transition(0, 'b', 2);
        automaton.add_transition(0, 'a', 3);
        automaton.add_transition(0, 'a', 1);

        let mut seen = Vec::new();
        automaton.for_each_transition(|o, l, d| seen.push((o, l, d)));
        assert_eq!(seen, vec![(0, 'a', 1), (0, 'a', 3), (0, 'b', 2), (1, 'b', 0)]);
    }

    #[test]
    fn test_empty_language() {
        let mut automaton = Automaton::new();
        automaton.add_initial_state(0);
        automaton.add_final_state(1);
        assert!(automaton.is_empty());

        automaton.add_transition(0, 'x', 1);
        assert!(!automaton.is_empty());
        assert_eq!(Automaton::new().max_state(), None);
    }

    #[test]
    fn test_to_dot() {
        let dot = ab_star().to_dot();
        assert!(dot.starts_with("digraph automaton {"));
        assert!(dot.contains("\t1 [shape=doublecircle];"));
        assert!(dot.contains("\tinit0 -> 0;"));
        assert!(dot.contains("\t0 -> 1 [label=\"a\"];"));
    }
}

//! Partial deterministic finite automaton with Hopcroft minimization.

use crate::formlang::automaton::Automaton;
use crate::formlang::state::{StateId, StateSet};
use std::collections::{BTreeMap, BTreeSet, HashMap, VecDeque};

/// A partial deterministic finite automaton: a missing transition rejects.
#[derive(Debug, Clone, Default)]
pub struct Dfa {
    num_states: StateId,
    /// Start state (None if the automaton has no states)
    start_state: Option<StateId>,
    final_states: StateSet,
    /// (source, letter) -> destination
    transitions: BTreeMap<(StateId, char), StateId>,
    /// (destination, letter) -> set of sources
    reverse_transitions: HashMap<(StateId, char), StateSet>,
    alphabet: BTreeSet<char>,
}

impl Dfa {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a new state and return its ID.
    pub fn add_state(&mut self) -> StateId {
        let id = self.num_states;
        self.num_states += 1;
        id
    }

    pub fn set_start_state(&mut self, state: StateId) {
        self.start_state = Some(state);
    }

    pub fn add_final_state(&mut self, state: StateId) {
        self.final_states.insert(state);
    }

    /// Add a transition, replacing any previous one on `(source, letter)`.
    pub fn add_transition(&mut self, source: StateId, letter: char, destination: StateId) {
        self.alphabet.insert(letter);
        if let Some(previous) = self.transitions.insert((source, letter), destination) {
            if let Some(sources) = self.reverse_transitions.get_mut(&(previous, letter)) {
                sources.remove(source);
            }
        }
        self.reverse_transitions
            .entry((destination, letter))
            .or_default()
            .insert(source);
    }

    pub fn transition(&self, source: StateId, letter: char) -> Option<StateId> {
        self.transitions.get(&(source, letter)).copied()
    }

    pub fn num_states(&self) -> StateId {
        self.num_states
    }

    pub fn start_state(&self) -> Option<StateId> {
        self.start_state
    }

    pub fn final_states(&self) -> &StateSet {
        &self.final_states
    }

    pub fn alphabet(&self) -> &BTreeSet<char> {
        &self.alphabet
    }

    pub fn transitions(&self) -> impl Iterator<Item = (StateId, char, StateId)> + '_ {
        self.transitions
            .iter()
            .map(|(&(src, letter), &dst)| (src, letter, dst))
    }

    /// Check if the DFA is empty (accepts no strings).
    pub fn is_empty(&self) -> bool {
        !self.find_reachable_states().intersects(&self.final_states)
    }

    /// Minimize the DFA: drop useless states, refine with Hopcroft's
    /// algorithm, then renumber canonically.
    ///
    /// Canonical numbering is breadth-first from the start state, reading
    /// letters in ascending order. Trim minimal partial DFAs of the same
    /// language are isomorphic, so this makes them equal state for state.
    pub fn minimize(&self) -> Dfa {
        let Some(start) = self.start_state else {
            return Dfa::new();
        };

        let useful = self
            .find_reachable_states()
            .intersection(&self.find_coreachable_states());

        // Empty language: the minimal trim automaton has no states at all.
        if !useful.contains(start) {
            return Dfa::new();
        }

        // Hopcroft's partition refinement
        // Initial partition: final states and non-final states
        let final_useful = self.final_states.intersection(&useful);
        let non_final_useful = useful.difference(&self.final_states);

        let mut partitions: Vec<StateSet> = Vec::new();
        if !final_useful.is_empty() {
            partitions.push(final_useful);
        }
        if !non_final_useful.is_empty() {
            partitions.push(non_final_useful);
        }

        let mut worklist: VecDeque<(usize, char)> = VecDeque::new();
        for idx in 0..partitions.len() {
            for &letter in &self.alphabet {
                worklist.push_back((idx, letter));
            }
        }

        while let Some((splitter_idx, letter)) = worklist.pop_front() {
            let predecessors = self
                .find_predecessors(&partitions[splitter_idx], letter)
                .intersection(&useful);

            if predecessors.is_empty() {
                continue;
            }

            let mut splits = Vec::new();
            for (part_idx, partition) in partitions.iter().enumerate() {
                let intersection = partition.intersection(&predecessors);
                let difference = partition.difference(&predecessors);

                if !intersection.is_empty() && !difference.is_empty() {
                    // Keep the larger part in place, queue the smaller one
                    let (keep, add) = if intersection.len() <= difference.len() {
                        (difference, intersection)
                    } else {
                        (intersection, difference)
                    };
                    splits.push((part_idx, keep, add));
                }
            }

            for (part_idx, keep, add) in splits {
                let new_idx = partitions.len();
                partitions[part_idx] = keep;
                partitions.push(add);
                for &sym in &self.alphabet {
                    worklist.push_back((new_idx, sym));
                }
            }
        }

        let quotient = self.build_quotient(&partitions, &useful, start);
        quotient.canonical()
    }

    /// Find all states reachable from the start state.
    fn find_reachable_states(&self) -> StateSet {
        let mut reachable = StateSet::with_capacity(self.num_states as usize);

        let Some(start) = self.start_state else {
            return reachable;
        };

        let mut queue = VecDeque::from([start]);
        while let Some(state) = queue.pop_front() {
            if reachable.contains(state) {
                continue;
            }
            reachable.insert(state);

            for &letter in &self.alphabet {
                if let Some(next) = self.transition(state, letter) {
                    if !reachable.contains(next) {
                        queue.push_back(next);
                    }
                }
            }
        }

        reachable
    }

    /// Find all states from which a final state can be reached.
    fn find_coreachable_states(&self) -> StateSet {
        let mut coreachable = StateSet::with_capacity(self.num_states as usize);
        let mut queue: VecDeque<StateId> = self.final_states.iter().collect();

        while let Some(state) = queue.pop_front() {
            if coreachable.contains(state) {
                continue;
            }
            coreachable.insert(state);

            for &letter in &self.alphabet {
                if let Some(sources) = self.reverse_transitions.get(&(state, letter)) {
                    queue.extend(sources.iter().filter(|s| !coreachable.contains(*s)));
                }
            }
        }

        coreachable
    }

    /// Find all states that can reach the target set on a given letter.
    fn find_predecessors(&self, targets: &StateSet, letter: char) -> StateSet {
        let mut predecessors = StateSet::with_capacity(self.num_states as usize);

        for target in targets.iter() {
            if let Some(sources) = self.reverse_transitions.get(&(target, letter)) {
                predecessors.union_with(sources);
            }
        }

        predecessors
    }

    /// Build the quotient automaton, one state per partition. Transitions
    /// into useless states are dropped.
    fn build_quotient(&self, partitions: &[StateSet], useful: &StateSet, start: StateId) -> Dfa {
        let mut quotient = Dfa::new();

        let mut state_to_partition: HashMap<StateId, StateId> = HashMap::new();
        for (part_idx, partition) in partitions.iter().enumerate() {
            quotient.add_state();
            for state in partition.iter() {
                state_to_partition.insert(state, part_idx as StateId);
            }
        }

        quotient.set_start_state(state_to_partition[&start]);

        for final_state in self.final_states.intersection(useful).iter() {
            quotient.add_final_state(state_to_partition[&final_state]);
        }

        // All members of a partition agree, any representative will do
        for (part_idx, partition) in partitions.iter().enumerate() {
            let Some(representative) = partition.min() else {
                continue;
            };
            for &letter in &self.alphabet {
                let Some(dest) = self.transition(representative, letter) else {
                    continue;
                };
                if let Some(&new_dest) = state_to_partition.get(&dest) {
                    quotient.add_transition(part_idx as StateId, letter, new_dest);
                }
            }
        }

        quotient
    }

    /// Renumber states breadth-first from the start state, letters in
    /// ascending order. States unreachable from the start are dropped.
    fn canonical(&self) -> Dfa {
        let Some(start) = self.start_state else {
            return Dfa::new();
        };

        let mut renumbered = Dfa::new();
        let mut numbering: HashMap<StateId, StateId> = HashMap::new();
        let mut order = Vec::new();
        let mut queue = VecDeque::from([start]);
        numbering.insert(start, renumbered.add_state());

        while let Some(state) = queue.pop_front() {
            order.push(state);
            for &letter in &self.alphabet {
                if let Some(next) = self.transition(state, letter) {
                    if !numbering.contains_key(&next) {
                        numbering.insert(next, renumbered.add_state());
                        queue.push_back(next);
                    }
                }
            }
        }

        renumbered.set_start_state(numbering[&start]);
        for state in order {
            let id = numbering[&state];
            if self.final_states.contains(state) {
                renumbered.add_final_state(id);
            }
            for &letter in &self.alphabet {
                if let Some(next) = self.transition(state, letter) {
                    renumbered.add_transition(id, letter, numbering[&next]);
                }
            }
        }

        renumbered
    }

    /// Convert to a (deterministic) [`Automaton`].
    pub fn to_automaton(&self) -> Automaton {
        let mut automaton = Automaton::new();
        let Some(start) = self.start_state else {
            return automaton;
        };

        for _ in 0..self.num_states {
            automaton.add_state();
        }
        automaton.add_initial_state(start);
        for state in self.final_states.iter() {
            automaton.add_final_state(state);
        }
        for (src, letter, dst) in self.transitions() {
            automaton.add_transition(src, letter, dst);
        }

        automaton
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dfa_basic() {
        let mut dfa = Dfa::new();
        let s0 = dfa.add_state();
        let s1 = dfa.add_state();
        let s2 = dfa.add_state();

        dfa.set_start_state(s0);
        dfa.add_final_state(s2);
        dfa.add_transition(s0, 'a', s1);
        dfa.add_transition(s1, 'b', s2);

        assert_eq!(dfa.num_states(), 3);
        assert_eq!(dfa.start_state(), Some(0));
        assert!(!dfa.is_empty());
    }

    #[test]
    fn test_dfa_minimization_merges_equivalent_states() {
        // 0 -a-> 1 -b-> 3(final)
        // 0 -c-> 2 -b-> 4(final)
        // 1 and 2 merge, as do 3 and 4
        let mut dfa = Dfa::new();
        for _ in 0..5 {
            dfa.add_state();
        }
        dfa.set_start_state(0);
        dfa.add_final_state(3);
        dfa.add_final_state(4);
        dfa.add_transition(0, 'a', 1);
        dfa.add_transition(0, 'c', 2);
        dfa.add_transition(1, 'b', 3);
        dfa.add_transition(2, 'b', 4);

        let minimized = dfa.minimize();

        assert_eq!(minimized.num_states(), 3);
        assert_eq!(minimized.transition(0, 'a'), Some(1));
        assert_eq!(minimized.transition(0, 'c'), Some(1));
        assert_eq!(minimized.transition(1, 'b'), Some(2));
        assert_eq!(minimized.final_states().to_vec(), vec![2]);
    }

    #[test]
    fn test_minimization_drops_dead_states() {
        // 0 -a-> 1(final), 0 -b-> 2, 2 -b-> 2 (dead)
        let mut dfa = Dfa::new();
        for _ in 0..3 {
            dfa.add_state();
        }
        dfa.set_start_state(0);
        dfa.add_final_state(1);
        dfa.add_transition(0, 'a', 1);
        dfa.add_transition(0, 'b', 2);
        dfa.add_transition(2, 'b', 2);

        let minimized = dfa.minimize();

        assert_eq!(minimized.num_states(), 2);
        assert_eq!(minimized.transition(0, 'b'), None);
        assert_eq!(minimized.alphabet().iter().collect::<String>(), "a");
    }

    #[test]
    fn test_canonical_numbering_is_independent_of_input_numbering() {
        // Same language "ab", states numbered differently
        let mut first = Dfa::new();
        for _ in 0..3 {
            first.add_state();
        }
        first.set_start_state(0);
        first.add_transition(0, 'a', 1);
        first.add_transition(1, 'b', 2);
        first.add_final_state(2);

        let mut second = Dfa::new();
        for _ in 0..3 {
            second.add_state();
        }
        second.set_start_state(2);
        second.add_transition(2, 'a', 0);
        second.add_transition(0, 'b', 1);
        second.add_final_state(1);

        assert_eq!(first.minimize().to_automaton(), second.minimize().to_automaton());
    }

    #[test]
    fn test_empty_dfa() {
        let dfa = Dfa::new();
        assert!(dfa.is_empty());
        assert_eq!(dfa.minimize().num_states(), 0);

        let mut no_finals = Dfa::new();
        no_finals.add_state();
        no_finals.set_start_state(0);
        assert!(no_finals.is_empty());
        assert_eq!(no_finals.minimize().start_state(), None);
    }
}

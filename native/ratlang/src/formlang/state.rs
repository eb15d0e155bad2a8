//! Ordered integer sets, used both for automaton states and for letter
//! positions of a numbered expression.

use fixedbitset::FixedBitSet;
use std::fmt;

/// A state identifier. Glushkov automata reuse letter positions as state ids.
pub type StateId = u32;

/// A set of states (or positions) backed by a growable bit set.
///
/// Iteration is always in ascending order, which the equivalence checker
/// relies on when it compares two automata position by position.
#[derive(Clone, Default)]
pub struct StateSet {
    bits: FixedBitSet,
}

impl StateSet {
    /// Create an empty set able to hold ids below `capacity` without growing.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            bits: FixedBitSet::with_capacity(capacity),
        }
    }

    /// Create an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a set containing a single state.
    pub fn singleton(state: StateId) -> Self {
        let mut set = Self::with_capacity(state as usize + 1);
        set.insert(state);
        set
    }

    pub fn insert(&mut self, state: StateId) {
        let idx = state as usize;
        if idx >= self.bits.len() {
            self.bits.grow(idx + 1);
        }
        self.bits.insert(idx);
    }

    pub fn contains(&self, state: StateId) -> bool {
        let idx = state as usize;
        idx < self.bits.len() && self.bits.contains(idx)
    }

    pub fn remove(&mut self, state: StateId) {
        let idx = state as usize;
        if idx < self.bits.len() {
            self.bits.set(idx, false);
        }
    }

    pub fn is_empty(&self) -> bool {
        self.bits.is_clear()
    }

    pub fn len(&self) -> usize {
        self.bits.count_ones(..)
    }

    /// Iterate in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = StateId> + '_ {
        self.bits.ones().map(|i| i as StateId)
    }

    /// Smallest element, if any.
    pub fn min(&self) -> Option<StateId> {
        self.iter().next()
    }

    /// Union this set with another, modifying self in place.
    pub fn union_with(&mut self, other: &StateSet) {
        if other.bits.len() > self.bits.len() {
            self.bits.grow(other.bits.len());
        }
        self.bits.union_with(&other.bits);
    }

    /// Union of two sets as a new set.
    pub fn union(&self, other: &StateSet) -> StateSet {
        let mut result = self.clone();
        result.union_with(other);
        result
    }

    pub fn intersects(&self, other: &StateSet) -> bool {
        self.bits.intersection(&other.bits).next().is_some()
    }

    pub fn intersection(&self, other: &StateSet) -> StateSet {
        let mut result = self.clone();
        result.bits.intersect_with(&other.bits);
        result
    }

    /// Elements of `self` that are not in `other`.
    pub fn difference(&self, other: &StateSet) -> StateSet {
        let mut result = self.clone();
        result.bits.difference_with(&other.bits);
        result
    }

    /// Sorted elements, usable as a hash key.
    pub fn to_vec(&self) -> Vec<StateId> {
        self.iter().collect()
    }
}

// Equality ignores the bit set's capacity: {1} grown to 64 bits equals {1}.
impl PartialEq for StateSet {
    fn eq(&self, other: &Self) -> bool {
        self.iter().eq(other.iter())
    }
}

impl Eq for StateSet {}

impl fmt::Debug for StateSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl fmt::Display for StateSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        for (i, state) in self.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{state}")?;
        }
        write!(f, "}}")
    }
}

impl FromIterator<StateId> for StateSet {
    fn from_iter<I: IntoIterator<Item = StateId>>(iter: I) -> Self {
        let mut set = Self::new();
        for state in iter {
            set.insert(state);
        }
        set
    }
}

impl<const N: usize> From<[StateId; N]> for StateSet {
    fn from(states: [StateId; N]) -> Self {
        states.into_iter().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_state_set_basic() {
        let mut set = StateSet::with_capacity(10);
        assert!(set.is_empty());

        set.insert(3);
        set.insert(7);
        assert_eq!(set.len(), 2);
        assert!(set.contains(3));
        assert!(set.contains(7));
        assert!(!set.contains(5));
        assert!(!set.contains(1000));

        set.remove(3);
        assert_eq!(set.to_vec(), vec![7]);
    }

    #[test]
    fn test_state_set_grows() {
        let mut set = StateSet::new();
        set.insert(100);
        assert!(set.contains(100));
        assert_eq!(set.min(), Some(100));
    }

    #[test]
    fn test_state_set_union_and_difference() {
        let a = StateSet::from([1, 3]);
        let b = StateSet::from([2, 3, 40]);

        assert_eq!(a.union(&b).to_vec(), vec![1, 2, 3, 40]);
        assert_eq!(b.difference(&a).to_vec(), vec![2, 40]);
        assert_eq!(a.intersection(&b).to_vec(), vec![3]);
        assert!(a.intersects(&b));
    }

    #[test]
    fn test_state_set_equality_ignores_capacity() {
        let small = StateSet::singleton(1);
        let mut large = StateSet::with_capacity(128);
        large.insert(1);
        assert_eq!(small, large);
    }

    #[test]
    fn test_state_set_display() {
        assert_eq!(StateSet::from([2, 1]).to_string(), "{1, 2}");
        assert_eq!(StateSet::new().to_string(), "{}");
    }
}

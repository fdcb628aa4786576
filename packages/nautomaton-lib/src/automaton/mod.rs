use std::{borrow::Borrow, collections::BTreeSet, fmt::Debug, hash::Hash};

use crate::automaton::condition::Condition;

pub mod closure;
pub mod comparable_set;
pub mod condition;
pub mod determinize;
pub mod dfa;
mod five_tuple;
pub mod nfa;
pub mod table;

/// Types that can label the states of an automaton.
pub trait State: Debug + Clone + PartialEq + Eq + Hash + Ord {}
impl<T> State for T where T: Debug + Clone + PartialEq + Eq + Hash + Ord {}

/// Types that can be read by an automaton, one per step.
pub trait Symbol: Debug + Clone + PartialEq + Eq + Hash + Ord {}
impl<T> Symbol for T where T: Debug + Clone + PartialEq + Eq + Hash + Ord {}

/// Read access to the five components of a finite automaton.
pub trait Automaton {
    /// The type labelling the states.
    type Label: State;
    /// The type of the input symbols.
    type Letter: Symbol;

    /// The declared states, in ascending order.
    fn states(&self) -> &BTreeSet<Self::Label>;

    /// The declared input alphabet, in ascending order.
    fn inputs(&self) -> &BTreeSet<Self::Letter>;

    /// The initial state, if one was set and is still declared.
    fn initial(&self) -> Option<&Self::Label>;

    /// The final states, in ascending order.
    fn finals(&self) -> &BTreeSet<Self::Label>;

    /// All transitions as `(condition, destination)` pairs.
    fn transitions(&self) -> Vec<(Condition<Self::Label, Self::Letter>, Self::Label)>;

    fn is_accepting(&self, state: &Self::Label) -> bool {
        self.finals().contains(state)
    }
}

/// An automaton that can run input sequences.
pub trait Language: Automaton {
    /// Runs `sequence` from the initial state and returns the final states
    /// that are reached. An empty result means the sequence is rejected.
    fn evaluate<I>(&self, sequence: I) -> BTreeSet<Self::Label>
    where
        I: IntoIterator,
        I::Item: Borrow<Self::Letter>;

    fn accepts<I>(&self, sequence: I) -> bool
    where
        I: IntoIterator,
        I::Item: Borrow<Self::Letter>,
    {
        !self.evaluate(sequence).is_empty()
    }
}

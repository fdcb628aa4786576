use std::{borrow::Borrow, collections::BTreeSet};

use crate::{
    automaton::{
        Automaton, Language, State, Symbol,
        comparable_set::ComparableSet,
        condition::Condition,
        determinize::convert_to_dfa,
        five_tuple::FiveTuple,
        nfa::NFA,
        table::{StateTable, TransitionTable},
    },
    error::{AutomatonError, Result},
};

/// A deterministic finite automaton: every `(state, symbol)` pair leads to
/// at most one state and there are no spontaneous moves.
///
/// Besides building one directly, a DFA is usually obtained from an NFA with
/// [crate::automaton::determinize::convert_to_dfa], in which case its states
/// are labelled with sets of NFA states.
#[derive(Debug, Clone)]
pub struct DFA<Q: State, S: Symbol> {
    pub(crate) inner: FiveTuple<Q, S, StateTable<Q, S>>,
}

impl<Q: State, S: Symbol> DFA<Q, S> {
    pub fn new() -> Self {
        DFA {
            inner: FiveTuple::new(),
        }
    }

    /// Creates a DFA with the given input alphabet and no states.
    pub fn with_inputs(inputs: impl IntoIterator<Item = S>) -> Self {
        let mut dfa = Self::new();
        for input in inputs {
            dfa.add_input(input);
        }
        dfa
    }

    /// Creates a DFA from all five components at once.
    ///
    /// A condition of `table` with more than one destination is a
    /// [AutomatonError::DuplicateCondition]. Otherwise the result is
    /// `Ok(None)` if the initial state, a final state or a transition refers
    /// to something that is not declared.
    pub fn from_parts(
        states: impl IntoIterator<Item = Q>,
        inputs: impl IntoIterator<Item = S>,
        table: StateTable<Q, S>,
        initial: Option<Q>,
        finals: impl IntoIterator<Item = Q>,
    ) -> Result<Option<Self>> {
        if table
            .entries()
            .any(|(_, destinations)| destinations.len() > 1)
        {
            return Err(AutomatonError::DuplicateCondition);
        }

        Ok(FiveTuple::from_parts(states, inputs, table, initial, finals).map(|inner| DFA { inner }))
    }

    pub fn add_state(&mut self, state: Q) -> bool {
        self.inner.add_state(state)
    }

    /// Removes a state together with every transition leaving or entering
    /// it. If it was the initial state, the smallest remaining state becomes
    /// the initial state (or none if the automaton is now empty).
    pub fn remove_state(&mut self, state: &Q) -> bool {
        self.inner.remove_state(state)
    }

    pub fn add_input(&mut self, input: S) -> bool {
        self.inner.add_input(input)
    }

    pub fn remove_input(&mut self, input: &S) -> bool {
        self.inner.remove_input(input)
    }

    /// Adds a transition.
    ///
    /// Handing in a spontaneous condition, or a labeled condition that already
    /// has a destination, breaks determinism and is reported as an error.
    /// Otherwise the result is `Ok(false)` if the source state, the symbol or
    /// the destination is not declared.
    pub fn add_transition(&mut self, condition: Condition<Q, S>, destination: Q) -> Result<bool> {
        if condition.is_spontaneous() {
            return Err(AutomatonError::SpontaneousMove);
        }

        if self.inner.table.destinations(&condition).is_some() {
            return Err(AutomatonError::DuplicateCondition);
        }

        Ok(self.inner.add_transition(condition, destination))
    }

    pub fn remove_transition(&mut self, condition: &Condition<Q, S>, destination: &Q) -> bool {
        self.inner.remove_transition(condition, destination)
    }

    pub fn set_initial(&mut self, state: Q) -> bool {
        self.inner.set_initial(state)
    }

    pub fn add_final(&mut self, state: Q) -> bool {
        self.inner.add_final(state)
    }

    pub fn remove_final(&mut self, state: &Q) -> bool {
        self.inner.remove_final(state)
    }

    /// The state reached from `state` by reading `symbol`, if any.
    pub fn successor(&self, state: &Q, symbol: &S) -> Option<&Q> {
        self.inner
            .table
            .destinations(&Condition::labeled(state.clone(), symbol.clone()))
            .and_then(|destinations| destinations.first())
    }

    pub fn table(&self) -> &StateTable<Q, S> {
        &self.inner.table
    }

    pub fn state_count(&self) -> usize {
        self.inner.states.len()
    }
}

impl<Q: State, S: Symbol> DFA<ComparableSet<Q>, S> {
    /// Same as [convert_to_dfa].
    pub fn from_nfa<T: TransitionTable<Q, S>>(nfa: &NFA<Q, S, T>) -> Self {
        convert_to_dfa(nfa)
    }
}

impl<Q: State, S: Symbol> Default for DFA<Q, S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<Q: State, S: Symbol> Automaton for DFA<Q, S> {
    type Label = Q;
    type Letter = S;

    fn states(&self) -> &BTreeSet<Q> {
        &self.inner.states
    }

    fn inputs(&self) -> &BTreeSet<S> {
        &self.inner.inputs
    }

    fn initial(&self) -> Option<&Q> {
        self.inner.initial()
    }

    fn finals(&self) -> &BTreeSet<Q> {
        &self.inner.finals
    }

    fn transitions(&self) -> Vec<(Condition<Q, S>, Q)> {
        self.inner.table.transitions()
    }
}

impl<Q: State, S: Symbol> Language for DFA<Q, S> {
    fn evaluate<I>(&self, sequence: I) -> BTreeSet<Q>
    where
        I: IntoIterator,
        I::Item: Borrow<S>,
    {
        self.inner.evaluate(sequence)
    }
}

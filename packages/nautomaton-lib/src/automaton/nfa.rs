use std::{borrow::Borrow, collections::BTreeSet};

use crate::automaton::{
    Automaton, Language, State, Symbol,
    closure::SpontaneousMoves,
    comparable_set::ComparableSet,
    condition::Condition,
    determinize::convert_to_dfa,
    dfa::DFA,
    five_tuple::FiveTuple,
    table::{SpontaneousStateTable, StateTable, TransitionTable},
};

/// A nondeterministic finite automaton over states `Q` and symbols `S`.
///
/// The table type `T` decides whether spontaneous moves are allowed: the
/// default [StateTable] refuses them, an [EpsilonNFA] stores them.
///
/// All mutating operations report failure through their boolean result:
/// referring to an undeclared state or symbol, or removing something that is
/// not there, returns `false` and leaves the automaton unchanged.
#[derive(Debug, Clone)]
pub struct NFA<Q: State, S: Symbol, T: TransitionTable<Q, S> = StateTable<Q, S>> {
    inner: FiveTuple<Q, S, T>,
}

/// An NFA that may contain spontaneous moves.
pub type EpsilonNFA<Q, S> = NFA<Q, S, SpontaneousStateTable<Q, S>>;

impl<Q: State, S: Symbol, T: TransitionTable<Q, S>> NFA<Q, S, T> {
    pub fn new() -> Self {
        NFA {
            inner: FiveTuple::new(),
        }
    }

    /// Creates an NFA with the given input alphabet and no states.
    pub fn with_inputs(inputs: impl IntoIterator<Item = S>) -> Self {
        let mut nfa = Self::new();
        for input in inputs {
            nfa.add_input(input);
        }
        nfa
    }

    /// Creates an NFA from all five components at once.
    ///
    /// Returns `None` unless the initial state and the final states are
    /// declared and every transition of `table` only refers to declared
    /// states and symbols.
    pub fn from_parts(
        states: impl IntoIterator<Item = Q>,
        inputs: impl IntoIterator<Item = S>,
        table: T,
        initial: Option<Q>,
        finals: impl IntoIterator<Item = Q>,
    ) -> Option<Self> {
        FiveTuple::from_parts(states, inputs, table, initial, finals).map(|inner| NFA { inner })
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

    /// Removes a symbol together with every transition reading it.
    pub fn remove_input(&mut self, input: &S) -> bool {
        self.inner.remove_input(input)
    }

    /// Adds a transition. Fails if the source state, the symbol or the
    /// destination is not declared, if the transition already exists, or if
    /// the condition is spontaneous and `T` does not allow that.
    pub fn add_transition(&mut self, condition: Condition<Q, S>, destination: Q) -> bool {
        self.inner.add_transition(condition, destination)
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

    pub fn table(&self) -> &T {
        &self.inner.table
    }

    /// Like [Language::evaluate], but the frontier is closed under
    /// spontaneous moves before the first symbol and after every step.
    ///
    /// [Language::evaluate] only follows transitions labeled with exactly the
    /// symbol read, so spontaneous moves have no effect there. This variant
    /// accepts the same sequences as the DFA returned by [NFA::determinize].
    pub fn evaluate_closed<I>(&self, sequence: I) -> BTreeSet<Q>
    where
        I: IntoIterator,
        I::Item: Borrow<S>,
    {
        let transitions = self.inner.table.transitions();
        let moves = SpontaneousMoves::new(&transitions);
        let close = |frontier: BTreeSet<Q>| -> BTreeSet<Q> {
            moves
                .closure(frontier)
                .into_inner()
                .into_iter()
                .filter(|state| self.inner.states.contains(state))
                .collect()
        };

        let mut frontier = close(self.inner.start());

        for symbol in sequence {
            if frontier.is_empty() {
                break;
            }
            frontier = close(self.inner.step(&frontier, symbol.borrow()));
        }

        self.inner.accepted(frontier)
    }

    /// A view of this NFA whose [Language] implementation is
    /// [NFA::evaluate_closed].
    pub fn closed(&self) -> Closed<'_, Q, S, T> {
        Closed { nfa: self }
    }

    /// Converts this automaton into an equivalent DFA by subset construction.
    /// See [convert_to_dfa].
    pub fn determinize(&self) -> DFA<ComparableSet<Q>, S> {
        convert_to_dfa(self)
    }
}

impl<Q: State, S: Symbol, T: TransitionTable<Q, S>> Default for NFA<Q, S, T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<Q: State, S: Symbol, T: TransitionTable<Q, S>> Automaton for NFA<Q, S, T> {
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

impl<Q: State, S: Symbol, T: TransitionTable<Q, S>> Language for NFA<Q, S, T> {
    /// Follows, for every symbol, exactly the transitions labeled with it.
    /// Spontaneous moves are not taken, see [NFA::evaluate_closed].
    fn evaluate<I>(&self, sequence: I) -> BTreeSet<Q>
    where
        I: IntoIterator,
        I::Item: Borrow<S>,
    {
        self.inner.evaluate(sequence)
    }
}

/// An NFA evaluated with spontaneous moves, see [NFA::closed].
#[derive(Debug, Clone)]
pub struct Closed<'a, Q: State, S: Symbol, T: TransitionTable<Q, S>> {
    nfa: &'a NFA<Q, S, T>,
}

impl<Q: State, S: Symbol, T: TransitionTable<Q, S>> Automaton for Closed<'_, Q, S, T> {
    type Label = Q;
    type Letter = S;

    fn states(&self) -> &BTreeSet<Q> {
        self.nfa.states()
    }

    fn inputs(&self) -> &BTreeSet<S> {
        self.nfa.inputs()
    }

    fn initial(&self) -> Option<&Q> {
        self.nfa.initial()
    }

    fn finals(&self) -> &BTreeSet<Q> {
        self.nfa.finals()
    }

    fn transitions(&self) -> Vec<(Condition<Q, S>, Q)> {
        self.nfa.transitions()
    }
}

impl<Q: State, S: Symbol, T: TransitionTable<Q, S>> Language for Closed<'_, Q, S, T> {
    fn evaluate<I>(&self, sequence: I) -> BTreeSet<Q>
    where
        I: IntoIterator,
        I::Item: Borrow<S>,
    {
        self.nfa.evaluate_closed(sequence)
    }
}

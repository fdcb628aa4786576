use std::{borrow::Borrow, collections::BTreeSet};

use crate::automaton::{State, Symbol, condition::Condition, table::TransitionTable};

/// The `(Q, Σ, δ, q0, F)` tuple shared by [super::nfa::NFA] and
/// [super::dfa::DFA]. All mutation goes through here so the membership
/// invariants are checked in one place.
#[derive(Debug, Clone)]
pub(crate) struct FiveTuple<Q: State, S: Symbol, T: TransitionTable<Q, S>> {
    pub(crate) states: BTreeSet<Q>,
    pub(crate) inputs: BTreeSet<S>,
    pub(crate) table: T,
    pub(crate) initial: Option<Q>,
    pub(crate) finals: BTreeSet<Q>,
}

impl<Q: State, S: Symbol, T: TransitionTable<Q, S>> FiveTuple<Q, S, T> {
    pub(crate) fn new() -> Self {
        FiveTuple {
            states: BTreeSet::new(),
            inputs: BTreeSet::new(),
            table: T::default(),
            initial: None,
            finals: BTreeSet::new(),
        }
    }

    /// Assembles a five-tuple from prebuilt parts. Returns `None` if the
    /// initial state, a final state or any transition refers to something
    /// that is not declared, or if the table holds spontaneous conditions
    /// that `T` does not allow.
    pub(crate) fn from_parts(
        states: impl IntoIterator<Item = Q>,
        inputs: impl IntoIterator<Item = S>,
        table: T,
        initial: Option<Q>,
        finals: impl IntoIterator<Item = Q>,
    ) -> Option<Self> {
        let tuple = FiveTuple {
            states: states.into_iter().collect(),
            inputs: inputs.into_iter().collect(),
            table,
            initial,
            finals: finals.into_iter().collect(),
        };

        let initial_declared = match &tuple.initial {
            Some(initial) => tuple.states.contains(initial),
            None => true,
        };
        let finals_declared = tuple.finals.is_subset(&tuple.states);
        let transitions_declared = tuple.table.entries().all(|(condition, destinations)| {
            (T::ALLOWS_SPONTANEOUS || !condition.is_spontaneous())
                && destinations
                    .iter()
                    .all(|destination| tuple.is_declared(condition, destination))
        });

        (initial_declared && finals_declared && transitions_declared).then_some(tuple)
    }

    pub(crate) fn add_state(&mut self, state: Q) -> bool {
        self.states.insert(state)
    }

    pub(crate) fn remove_state(&mut self, state: &Q) -> bool {
        let touching = self
            .table
            .transitions()
            .into_iter()
            .filter(|(condition, destination)| condition.state() == state || destination == state)
            .collect::<Vec<_>>();

        if self.initial.as_ref() == Some(state) {
            self.initial = self.states.iter().find(|s| *s != state).cloned();
            tracing::warn!(
                "removed the initial state {:?}, initial state is now {:?}",
                state,
                self.initial
            );
        }

        self.finals.remove(state);

        // every pair is attempted, even after one failed
        let transitions_removed = touching
            .iter()
            .map(|(condition, destination)| self.table.remove(condition, destination))
            .fold(true, |all, removed| all && removed);

        transitions_removed && self.states.remove(state)
    }

    pub(crate) fn add_input(&mut self, input: S) -> bool {
        self.inputs.insert(input)
    }

    pub(crate) fn remove_input(&mut self, input: &S) -> bool {
        let reading = self
            .table
            .transitions()
            .into_iter()
            .filter(|(condition, _)| condition.label() == Some(input))
            .collect::<Vec<_>>();

        let transitions_removed = reading
            .iter()
            .map(|(condition, destination)| self.table.remove(condition, destination))
            .fold(true, |all, removed| all && removed);

        transitions_removed && self.inputs.remove(input)
    }

    /// Whether the source state, the symbol (if any) and the destination
    /// are declared.
    pub(crate) fn is_declared(&self, condition: &Condition<Q, S>, destination: &Q) -> bool {
        let symbol_declared = match condition.label() {
            Some(symbol) => self.inputs.contains(symbol),
            None => true,
        };

        self.states.contains(condition.state())
            && symbol_declared
            && self.states.contains(destination)
    }

    pub(crate) fn add_transition(&mut self, condition: Condition<Q, S>, destination: Q) -> bool {
        if condition.is_spontaneous() && !T::ALLOWS_SPONTANEOUS {
            return false;
        }

        self.is_declared(&condition, &destination) && self.table.add(condition, destination)
    }

    pub(crate) fn remove_transition(&mut self, condition: &Condition<Q, S>, destination: &Q) -> bool {
        self.table.remove(condition, destination)
    }

    pub(crate) fn set_initial(&mut self, state: Q) -> bool {
        if self.states.contains(&state) {
            self.initial = Some(state);
            true
        } else {
            false
        }
    }

    pub(crate) fn add_final(&mut self, state: Q) -> bool {
        self.states.contains(&state) && self.finals.insert(state)
    }

    pub(crate) fn remove_final(&mut self, state: &Q) -> bool {
        self.finals.remove(state)
    }

    pub(crate) fn initial(&self) -> Option<&Q> {
        self.initial.as_ref()
    }

    /// The frontier the evaluation starts from.
    pub(crate) fn start(&self) -> BTreeSet<Q> {
        self.initial.iter().cloned().collect()
    }

    /// Advances `frontier` by one symbol, keeping only declared states.
    pub(crate) fn step(&self, frontier: &BTreeSet<Q>, symbol: &S) -> BTreeSet<Q> {
        frontier
            .iter()
            .flat_map(|state| self.table.successors(state, symbol))
            .filter(|state| self.states.contains(state))
            .collect()
    }

    /// The part of `frontier` that is final.
    pub(crate) fn accepted(&self, frontier: BTreeSet<Q>) -> BTreeSet<Q> {
        frontier
            .into_iter()
            .filter(|state| self.finals.contains(state))
            .collect()
    }

    pub(crate) fn evaluate<I>(&self, sequence: I) -> BTreeSet<Q>
    where
        I: IntoIterator,
        I::Item: Borrow<S>,
    {
        let mut frontier = self.start();

        for symbol in sequence {
            if frontier.is_empty() {
                break;
            }
            frontier = self.step(&frontier, symbol.borrow());
        }

        self.accepted(frontier)
    }
}

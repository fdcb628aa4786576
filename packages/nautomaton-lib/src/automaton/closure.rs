use std::collections::VecDeque;

use hashbrown::HashMap;

use crate::automaton::{State, Symbol, comparable_set::ComparableSet, condition::Condition};

/// Computes the closure of `states` under the spontaneous moves contained in
/// `transitions`: the smallest superset of `states` such that the
/// destination of every spontaneous move leaving a member is a member as
/// well. Labeled transitions are ignored.
pub fn spontaneous_closure<'a, Q, S>(
    states: impl IntoIterator<Item = Q>,
    transitions: impl IntoIterator<Item = &'a (Condition<Q, S>, Q)>,
) -> ComparableSet<Q>
where
    Q: State + 'a,
    S: Symbol + 'a,
{
    SpontaneousMoves::new(transitions).closure(states)
}

/// The spontaneous moves of an automaton, indexed by source state, so that
/// many closures can be computed without rescanning all transitions.
#[derive(Debug, Clone)]
pub struct SpontaneousMoves<Q: State> {
    moves: HashMap<Q, Vec<Q>>,
}

impl<Q: State> SpontaneousMoves<Q> {
    pub fn new<'a, S>(transitions: impl IntoIterator<Item = &'a (Condition<Q, S>, Q)>) -> Self
    where
        Q: 'a,
        S: Symbol + 'a,
    {
        let mut moves: HashMap<Q, Vec<Q>> = HashMap::new();

        for (condition, destination) in transitions {
            if let Condition::Spontaneous { state } = condition {
                moves
                    .entry(state.clone())
                    .or_default()
                    .push(destination.clone());
            }
        }

        SpontaneousMoves { moves }
    }

    /// Extends `states` to its closure. The worklist only ever holds states
    /// that were newly added, so every state is expanded at most once.
    pub fn closure(&self, states: impl IntoIterator<Item = Q>) -> ComparableSet<Q> {
        let mut closure = ComparableSet::new();
        let mut worklist = VecDeque::new();

        for state in states {
            if closure.insert(state.clone()) {
                worklist.push_back(state);
            }
        }

        while let Some(state) = worklist.pop_front() {
            let Some(destinations) = self.moves.get(&state) else {
                continue;
            };

            for destination in destinations {
                if closure.insert(destination.clone()) {
                    worklist.push_back(destination.clone());
                }
            }
        }

        closure
    }
}

use std::collections::{BTreeSet, VecDeque};

use hashbrown::HashSet;
use indexmap::IndexMap;

use crate::{
    automaton::{
        Automaton, State, Symbol,
        closure::SpontaneousMoves,
        comparable_set::ComparableSet,
        condition::Condition,
        dfa::DFA,
        nfa::NFA,
        table::TransitionTable,
    },
    config::DeterminizeConfig,
    error::{AutomatonError, Result},
};

/// Converts an NFA into an equivalent DFA by subset construction.
///
/// Every state of the DFA is the set of NFA states the NFA can be in at the
/// same time, closed under spontaneous moves. The initial state is the
/// closure of the NFA's initial state and a composite state is final if it
/// contains any final NFA state. Only composite states reachable from the
/// initial one are created, and there is no explicit trap state: a missing
/// transition rejects.
///
/// An NFA without an initial state yields a DFA without states that only
/// shares the input alphabet.
pub fn convert_to_dfa<Q, S, T>(nfa: &NFA<Q, S, T>) -> DFA<ComparableSet<Q>, S>
where
    Q: State,
    S: Symbol,
    T: TransitionTable<Q, S>,
{
    let _span = tracing::span!(tracing::Level::DEBUG, "convert_to_dfa").entered();

    let mut construction = SubsetConstruction::new(nfa);
    while construction.step() {}
    construction.finish()
}

/// Like [convert_to_dfa], but gives up with
/// [AutomatonError::StateLimitExceeded] once more composite states than
/// `config.max_states` have been discovered.
pub fn convert_to_dfa_with_config<Q, S, T>(
    nfa: &NFA<Q, S, T>,
    config: &DeterminizeConfig,
) -> Result<DFA<ComparableSet<Q>, S>>
where
    Q: State,
    S: Symbol,
    T: TransitionTable<Q, S>,
{
    let _span = tracing::span!(tracing::Level::DEBUG, "convert_to_dfa").entered();

    let limit = *config.get_max_states();
    let mut construction = SubsetConstruction::new(nfa);

    loop {
        if let Some(limit) = limit
            && construction.discovered.len() > limit
        {
            tracing::warn!(
                "subset construction stopped after discovering {} states",
                construction.discovered.len()
            );
            return Err(AutomatonError::StateLimitExceeded { limit });
        }

        if !construction.step() {
            break;
        }
    }

    Ok(construction.finish())
}

/// The state of a running subset construction.
struct SubsetConstruction<Q: State, S: Symbol> {
    transitions: Vec<(Condition<Q, S>, Q)>,
    moves: SpontaneousMoves<Q>,
    nfa_finals: BTreeSet<Q>,
    dfa: DFA<ComparableSet<Q>, S>,
    worklist: VecDeque<ComparableSet<Q>>,
    discovered: HashSet<ComparableSet<Q>>,
}

impl<Q: State, S: Symbol> SubsetConstruction<Q, S> {
    fn new<T: TransitionTable<Q, S>>(nfa: &NFA<Q, S, T>) -> Self {
        let transitions = nfa.transitions();
        let moves = SpontaneousMoves::new(&transitions);

        let mut construction = SubsetConstruction {
            transitions,
            moves,
            nfa_finals: nfa.finals().clone(),
            dfa: DFA::with_inputs(nfa.inputs().iter().cloned()),
            worklist: VecDeque::new(),
            discovered: HashSet::new(),
        };

        if let Some(initial) = nfa.initial() {
            let start = construction.moves.closure([initial.clone()]);
            construction.discover(start.clone());
            construction.dfa.set_initial(start);
        }

        construction
    }

    /// Queues `label` unless it was seen before.
    fn discover(&mut self, label: ComparableSet<Q>) {
        if self.discovered.insert(label.clone()) {
            self.dfa.add_state(label.clone());
            self.worklist.push_back(label);
        }
    }

    /// Processes the next queued composite state. Returns false once the
    /// worklist is exhausted.
    fn step(&mut self) -> bool {
        let Some(label) = self.worklist.pop_front() else {
            return false;
        };

        // direct destinations per symbol, in order of first appearance
        let mut groups: IndexMap<S, Vec<Q>> = IndexMap::new();
        for (condition, destination) in &self.transitions {
            if let Condition::Labeled { state, symbol } = condition
                && label.contains(state)
            {
                groups
                    .entry(symbol.clone())
                    .or_default()
                    .push(destination.clone());
            }
        }

        tracing::debug!(
            "processing {:?} with {} outgoing symbols, {} states queued",
            label,
            groups.len(),
            self.worklist.len()
        );

        for (symbol, destinations) in groups {
            let target = self.moves.closure(destinations);
            self.discover(target.clone());

            let condition = Condition::labeled(label.clone(), symbol);
            if self.dfa.inner.table.destinations(&condition).is_none() {
                let added = self.dfa.inner.add_transition(condition, target);
                debug_assert!(added, "subset construction produced an undeclared transition");
            }
        }

        true
    }

    fn finish(mut self) -> DFA<ComparableSet<Q>, S> {
        let finals = self
            .dfa
            .states()
            .iter()
            .filter(|label| label.intersects(&self.nfa_finals))
            .cloned()
            .collect::<Vec<_>>();

        for label in finals {
            self.dfa.add_final(label);
        }

        tracing::debug!(
            "subset construction produced {} states and {} transitions",
            self.dfa.state_count(),
            self.dfa.table().len()
        );

        self.dfa
    }
}

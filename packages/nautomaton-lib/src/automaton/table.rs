use std::{collections::BTreeSet, fmt::Debug};

use indexmap::IndexMap;

use crate::automaton::{State, Symbol, condition::Condition};

/// The transition function of an automaton: a mapping from conditions to
/// sets of destination states.
///
/// Conditions are kept in insertion order, so [TransitionTable::transitions]
/// is deterministic. Which implementation an automaton uses decides whether
/// it may contain spontaneous moves.
pub trait TransitionTable<Q: State, S: Symbol>: Debug + Clone + Default {
    /// Whether spontaneous conditions can be stored.
    const ALLOWS_SPONTANEOUS: bool;

    /// Adds `destination` to the destinations of `condition`. Returns false if
    /// it was already present or the condition cannot be stored.
    fn add(&mut self, condition: Condition<Q, S>, destination: Q) -> bool;

    /// Removes `destination` from the destinations of `condition`, dropping
    /// the condition once nothing is left. Returns whether it was present.
    fn remove(&mut self, condition: &Condition<Q, S>, destination: &Q) -> bool;

    /// The destinations stored for exactly this condition.
    fn destinations(&self, condition: &Condition<Q, S>) -> Option<&BTreeSet<Q>>;

    /// Iterates the stored conditions with their destination sets.
    fn entries<'a>(&'a self) -> impl Iterator<Item = (&'a Condition<Q, S>, &'a BTreeSet<Q>)>
    where
        Q: 'a,
        S: 'a;

    /// The states reached from `state` by reading `symbol`. Only the labeled
    /// condition `(state, symbol)` is consulted, spontaneous moves are never
    /// followed.
    fn successors(&self, state: &Q, symbol: &S) -> BTreeSet<Q> {
        self.destinations(&Condition::labeled(state.clone(), symbol.clone()))
            .cloned()
            .unwrap_or_default()
    }

    /// Every transition as a `(condition, destination)` pair, one pair per
    /// destination.
    fn transitions(&self) -> Vec<(Condition<Q, S>, Q)> {
        self.entries()
            .flat_map(|(condition, destinations)| {
                destinations
                    .iter()
                    .map(move |destination| (condition.clone(), destination.clone()))
            })
            .collect()
    }

    /// The number of `(condition, destination)` pairs.
    fn len(&self) -> usize {
        self.entries().map(|(_, destinations)| destinations.len()).sum()
    }

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Shared storage for both table flavours.
#[derive(Debug, Clone)]
struct Entries<Q: State, S: Symbol> {
    map: IndexMap<Condition<Q, S>, BTreeSet<Q>>,
}

impl<Q: State, S: Symbol> Default for Entries<Q, S> {
    fn default() -> Self {
        Entries {
            map: IndexMap::new(),
        }
    }
}

impl<Q: State, S: Symbol> Entries<Q, S> {
    fn add(&mut self, condition: Condition<Q, S>, destination: Q) -> bool {
        self.map.entry(condition).or_default().insert(destination)
    }

    fn remove(&mut self, condition: &Condition<Q, S>, destination: &Q) -> bool {
        let Some(destinations) = self.map.get_mut(condition) else {
            return false;
        };

        if !destinations.remove(destination) {
            return false;
        }

        if destinations.is_empty() {
            self.map.shift_remove(condition);
        }

        true
    }
}

/// A table that only holds labeled conditions. Used by DFAs and by NFAs
/// without spontaneous moves.
#[derive(Debug, Clone)]
pub struct StateTable<Q: State, S: Symbol> {
    entries: Entries<Q, S>,
}

impl<Q: State, S: Symbol> Default for StateTable<Q, S> {
    fn default() -> Self {
        StateTable {
            entries: Entries::default(),
        }
    }
}

impl<Q: State, S: Symbol> TransitionTable<Q, S> for StateTable<Q, S> {
    const ALLOWS_SPONTANEOUS: bool = false;

    fn add(&mut self, condition: Condition<Q, S>, destination: Q) -> bool {
        if condition.is_spontaneous() {
            return false;
        }

        self.entries.add(condition, destination)
    }

    fn remove(&mut self, condition: &Condition<Q, S>, destination: &Q) -> bool {
        self.entries.remove(condition, destination)
    }

    fn destinations(&self, condition: &Condition<Q, S>) -> Option<&BTreeSet<Q>> {
        self.entries.map.get(condition)
    }

    fn entries<'a>(&'a self) -> impl Iterator<Item = (&'a Condition<Q, S>, &'a BTreeSet<Q>)>
    where
        Q: 'a,
        S: 'a,
    {
        self.entries.map.iter()
    }
}

/// A table that also holds spontaneous conditions, for NFAs with
/// input-free moves.
#[derive(Debug, Clone)]
pub struct SpontaneousStateTable<Q: State, S: Symbol> {
    entries: Entries<Q, S>,
}

impl<Q: State, S: Symbol> Default for SpontaneousStateTable<Q, S> {
    fn default() -> Self {
        SpontaneousStateTable {
            entries: Entries::default(),
        }
    }
}

impl<Q: State, S: Symbol> TransitionTable<Q, S> for SpontaneousStateTable<Q, S> {
    const ALLOWS_SPONTANEOUS: bool = true;

    fn add(&mut self, condition: Condition<Q, S>, destination: Q) -> bool {
        self.entries.add(condition, destination)
    }

    fn remove(&mut self, condition: &Condition<Q, S>, destination: &Q) -> bool {
        self.entries.remove(condition, destination)
    }

    fn destinations(&self, condition: &Condition<Q, S>) -> Option<&BTreeSet<Q>> {
        self.entries.map.get(condition)
    }

    fn entries<'a>(&'a self) -> impl Iterator<Item = (&'a Condition<Q, S>, &'a BTreeSet<Q>)>
    where
        Q: 'a,
        S: 'a,
    {
        self.entries.map.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_destinations_accumulate() {
        let mut table = StateTable::<u32, char>::default();

        assert!(table.add(Condition::labeled(0, 'a'), 1));
        assert!(table.add(Condition::labeled(0, 'a'), 2));
        assert!(!table.add(Condition::labeled(0, 'a'), 1));

        assert_eq!(table.successors(&0, &'a'), BTreeSet::from([1, 2]));
        assert_eq!(table.len(), 2);
    }

    #[test]
    fn test_plain_table_refuses_spontaneous() {
        let mut table = StateTable::<u32, char>::default();

        assert!(!table.add(Condition::spontaneous(0), 1));
        assert!(table.is_empty());
    }

    #[test]
    fn test_remove_drops_empty_condition() {
        let mut table = SpontaneousStateTable::<u32, char>::default();
        table.add(Condition::spontaneous(0), 3);
        table.add(Condition::labeled(0, 'a'), 1);

        assert!(table.remove(&Condition::spontaneous(0), &3));
        assert!(!table.remove(&Condition::spontaneous(0), &3));
        assert!(table.destinations(&Condition::spontaneous(0)).is_none());
        assert_eq!(table.transitions(), vec![(Condition::labeled(0, 'a'), 1)]);
    }

    #[test]
    fn test_successors_ignore_spontaneous() {
        let mut table = SpontaneousStateTable::<u32, char>::default();
        table.add(Condition::spontaneous(0), 3);
        table.add(Condition::labeled(3, 'a'), 1);

        assert!(table.successors(&0, &'a').is_empty());
        assert!(table.successors(&7, &'z').is_empty());
    }

    #[test]
    fn test_transitions_keep_insertion_order() {
        let mut table = SpontaneousStateTable::<u32, char>::default();
        table.add(Condition::labeled(2, 'b'), 0);
        table.add(Condition::spontaneous(1), 2);
        table.add(Condition::labeled(0, 'a'), 2);
        table.add(Condition::labeled(2, 'b'), 1);

        assert_eq!(
            table.transitions(),
            vec![
                (Condition::labeled(2, 'b'), 0),
                (Condition::labeled(2, 'b'), 1),
                (Condition::spontaneous(1), 2),
                (Condition::labeled(0, 'a'), 2),
            ]
        );
    }
}

use std::collections::BTreeSet;

use nautomaton_lib::{
    automaton::{
        Automaton, Language,
        condition::Condition,
        nfa::{EpsilonNFA, NFA},
        table::{SpontaneousStateTable, StateTable, TransitionTable},
    },
    validation::same_language::assert_same_language,
};

fn example_nfa() -> EpsilonNFA<u32, char> {
    let mut nfa = EpsilonNFA::with_inputs(['a', 'm', 'n', 'o', 't', 'u']);

    for state in 0..=3 {
        nfa.add_state(state);
    }

    nfa.set_initial(0);
    nfa.add_final(3);

    nfa.add_transition(Condition::labeled(0, 'a'), 1);
    nfa.add_transition(Condition::labeled(1, 'u'), 2);
    nfa.add_transition(Condition::labeled(2, 't'), 3);
    nfa.add_transition(Condition::labeled(3, 'o'), 2);
    nfa.add_transition(Condition::labeled(2, 'm'), 0);
    nfa.add_transition(Condition::labeled(0, 'a'), 2);
    nfa.add_transition(Condition::labeled(2, 'n'), 3);
    nfa.add_transition(Condition::spontaneous(0), 3);

    nfa
}

#[test]
fn test_evaluate_example() {
    let nfa = example_nfa();

    assert_eq!(nfa.evaluate("automaton".chars()), BTreeSet::from([3]));
    assert!(nfa.accepts("aut".chars()));
    assert!(!nfa.accepts("au".chars()));
}

#[test]
fn test_evaluate_ignores_spontaneous_moves() {
    let nfa = example_nfa();

    // 0 reaches 3 spontaneously, but only a closed evaluation takes that move
    assert!(nfa.evaluate("".chars()).is_empty());
    assert!(nfa.evaluate("o".chars()).is_empty());

    assert_eq!(nfa.evaluate_closed("".chars()), BTreeSet::from([3]));
    assert_eq!(nfa.evaluate_closed("o".chars()), BTreeSet::new());
    assert_eq!(nfa.evaluate_closed("on".chars()), BTreeSet::from([3]));
}

#[test]
fn test_evaluate_is_repeatable() {
    let nfa = example_nfa();
    let word = "automaton".chars().collect::<Vec<_>>();

    let first = nfa.evaluate(&word);
    let second = nfa.evaluate(&word);

    assert_eq!(first, second);
    assert_eq!(nfa.transitions().len(), 8);
}

#[test]
fn test_empty_frontier_stays_empty() {
    let nfa = example_nfa();

    // no transition reads 'u' from 0
    assert!(nfa.evaluate("uautomaton".chars()).is_empty());
    assert!(nfa.evaluate_closed("mautomaton".chars()).is_empty());
}

#[test]
fn test_evaluate_without_initial_state() {
    let mut nfa = NFA::<u32, char>::with_inputs(['a']);
    nfa.add_state(0);
    nfa.add_final(0);

    assert!(nfa.evaluate(Vec::<char>::new()).is_empty());
    assert!(!nfa.accepts(['a']));
}

#[test]
fn test_undeclared_references_fail() {
    let mut nfa = NFA::<u32, char>::with_inputs(['a']);
    nfa.add_state(0);

    assert!(!nfa.add_transition(Condition::labeled(1, 'a'), 0));
    assert!(!nfa.add_transition(Condition::labeled(0, 'b'), 0));
    assert!(!nfa.add_transition(Condition::labeled(0, 'a'), 1));
    assert!(!nfa.set_initial(1));
    assert!(!nfa.add_final(1));

    assert!(nfa.add_transition(Condition::labeled(0, 'a'), 0));
    assert!(!nfa.add_transition(Condition::labeled(0, 'a'), 0));

    assert_eq!(nfa.transitions().len(), 1);
    assert!(nfa.initial().is_none());
    assert!(nfa.finals().is_empty());
}

#[test]
fn test_duplicate_declarations_fail() {
    let mut nfa = NFA::<u32, char>::new();

    assert!(nfa.add_state(0));
    assert!(!nfa.add_state(0));
    assert!(nfa.add_input('a'));
    assert!(!nfa.add_input('a'));
    assert!(nfa.add_final(0));
    assert!(!nfa.add_final(0));
    assert!(nfa.remove_final(&0));
    assert!(!nfa.remove_final(&0));
}

#[test]
fn test_plain_nfa_refuses_spontaneous_moves() {
    let mut nfa = NFA::<u32, char>::with_inputs(['a']);
    nfa.add_state(0);
    nfa.add_state(1);

    assert!(!nfa.add_transition(Condition::spontaneous(0), 1));
    assert!(nfa.table().is_empty());
}

#[test]
fn test_remove_state_removes_touching_transitions() {
    let mut nfa = example_nfa();

    assert!(nfa.remove_state(&2));

    assert!(!nfa.states().contains(&2));
    assert!(
        nfa.transitions()
            .iter()
            .all(|(condition, destination)| *condition.state() != 2 && *destination != 2)
    );
    assert_eq!(
        nfa.transitions(),
        vec![
            (Condition::labeled(0, 'a'), 1),
            (Condition::spontaneous(0), 3),
        ]
    );

    assert!(!nfa.remove_state(&2));
}

#[test]
fn test_remove_state_clears_final() {
    let mut nfa = example_nfa();

    assert!(nfa.remove_state(&3));
    assert!(nfa.finals().is_empty());
    assert!(nfa.evaluate("aut".chars()).is_empty());
}

#[test]
fn test_remove_initial_state_picks_another() {
    let mut nfa = example_nfa();

    assert!(nfa.remove_state(&0));
    assert_eq!(nfa.initial(), Some(&1));

    for state in [1, 2, 3] {
        nfa.remove_state(&state);
    }

    assert!(nfa.states().is_empty());
    assert_eq!(nfa.initial(), None);
}

#[test]
fn test_remove_input_removes_transitions() {
    let mut nfa = example_nfa();

    assert!(nfa.remove_input(&'a'));

    assert!(!nfa.inputs().contains(&'a'));
    assert!(
        nfa.transitions()
            .iter()
            .all(|(condition, _)| condition.label() != Some(&'a'))
    );
    // the spontaneous move does not read a symbol and stays
    assert!(nfa.transitions().contains(&(Condition::spontaneous(0), 3)));
    assert!(!nfa.remove_input(&'a'));
}

#[test]
fn test_remove_transition() {
    let mut nfa = example_nfa();

    assert!(nfa.remove_transition(&Condition::labeled(0, 'a'), &1));
    assert!(!nfa.remove_transition(&Condition::labeled(0, 'a'), &1));

    assert_eq!(nfa.table().successors(&0, &'a'), BTreeSet::from([2]));
}

#[test]
fn test_determinize_keeps_language() {
    let nfa = example_nfa();
    let dfa = nfa.determinize();

    assert_same_language(&nfa.closed(), &dfa, 6);
}

#[test]
fn test_determinize_with_nondeterministic_choice() {
    let mut nfa = NFA::<u32, char>::with_inputs(['a', 'b']);
    for state in 0..3 {
        nfa.add_state(state);
    }

    nfa.set_initial(0);
    nfa.add_final(2);

    nfa.add_transition(Condition::labeled(0, 'a'), 0);
    nfa.add_transition(Condition::labeled(0, 'b'), 0);
    nfa.add_transition(Condition::labeled(0, 'a'), 1);
    nfa.add_transition(Condition::labeled(1, 'b'), 2);

    let dfa = nfa.determinize();

    assert_same_language(&nfa, &dfa, 6);
    assert!(dfa.accepts("aab".chars()));
    assert!(!dfa.accepts("aba".chars()));
}

#[test]
fn test_from_parts() {
    let mut table = SpontaneousStateTable::<u32, char>::default();
    table.add(Condition::labeled(0, 'a'), 1);
    table.add(Condition::labeled(0, 'a'), 2);
    table.add(Condition::spontaneous(1), 2);

    let nfa = EpsilonNFA::from_parts([0, 1, 2], ['a'], table.clone(), Some(0), [2]).unwrap();

    assert_eq!(nfa.states(), &BTreeSet::from([0, 1, 2]));
    assert_eq!(nfa.initial(), Some(&0));
    assert_eq!(nfa.transitions(), table.transitions());
    assert_eq!(nfa.evaluate("a".chars()), BTreeSet::from([2]));

    let empty = NFA::<u32, char>::from_parts([], [], StateTable::default(), None, []).unwrap();
    assert!(empty.states().is_empty());
    assert_eq!(empty.initial(), None);
}

#[test]
fn test_from_parts_rejects_undeclared() {
    let mut table = StateTable::<u32, char>::default();
    table.add(Condition::labeled(0, 'a'), 1);

    // destination 1 is missing
    assert!(NFA::from_parts([0], ['a'], table.clone(), Some(0), []).is_none());
    // symbol 'a' is missing
    assert!(NFA::from_parts([0, 1], ['b'], table.clone(), Some(0), []).is_none());
    // initial and final states must be declared
    assert!(NFA::from_parts([0, 1], ['a'], table.clone(), Some(2), []).is_none());
    assert!(NFA::from_parts([0, 1], ['a'], table.clone(), Some(0), [2]).is_none());

    assert!(NFA::from_parts([0, 1], ['a'], table, Some(0), [1]).is_some());
}

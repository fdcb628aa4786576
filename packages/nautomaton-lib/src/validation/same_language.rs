use std::{
    fmt::Debug,
    iter::{once, repeat_n},
};

use itertools::{Either, Itertools};

use crate::automaton::{Language, Symbol};

/// All words over `alphabet` that are shorter than `max_word_length`,
/// shortest first.
fn words<S: Symbol>(alphabet: &[S], max_word_length: usize) -> impl Iterator<Item = Vec<S>> + '_ {
    (0..max_word_length).flat_map(move |length| {
        if length == 0 {
            Either::Left(once(Vec::new()))
        } else {
            Either::Right(repeat_n(alphabet.iter().cloned(), length).multi_cartesian_product())
        }
    })
}

/// Finds a word shorter than `max_word_length` that is accepted by exactly
/// one of the two automata. Returns the word and whether `a` accepted it.
pub fn language_difference<S: Symbol>(
    a: &impl Language<Letter = S>,
    b: &impl Language<Letter = S>,
    max_word_length: usize,
) -> Option<(Vec<S>, bool)> {
    let alphabet = a.inputs().iter().cloned().collect_vec();

    words(&alphabet, max_word_length).find_map(|word| {
        let accepted_by_a = a.accepts(&word);
        (accepted_by_a != b.accepts(&word)).then_some((word, accepted_by_a))
    })
}

/// Checks if two automata accept the same language.
/// This is done by checking if the alphabets are the same and then checking if
/// the automata accept the same words up to a certain length.
pub fn same_language<S: Symbol>(
    a: &impl Language<Letter = S>,
    b: &impl Language<Letter = S>,
    max_word_length: usize,
) -> bool {
    a.inputs() == b.inputs() && language_difference(a, b, max_word_length).is_none()
}

pub fn assert_same_language<S: Symbol + Debug>(
    a: &impl Language<Letter = S>,
    b: &impl Language<Letter = S>,
    max_word_length: usize,
) {
    if a.inputs() != b.inputs() {
        panic!("Alphabets are not the same");
    }

    match language_difference(a, b, max_word_length) {
        Some((word, true)) => panic!(
            "{:?} is accepted by automaton `a` but not by automaton `b`. Thus their languages are not equal.",
            word
        ),
        Some((word, false)) => panic!(
            "{:?} is accepted by automaton `b` but not by automaton `a`. Thus their languages are not equal.",
            word
        ),
        None => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_words_are_enumerated_by_length() {
        let all = words(&['a', 'b'], 3).collect_vec();

        assert_eq!(all.len(), 1 + 2 + 4);
        assert_eq!(all[0], Vec::<char>::new());
        assert_eq!(all[1], vec!['a']);
        assert_eq!(all[6], vec!['b', 'b']);
    }
}

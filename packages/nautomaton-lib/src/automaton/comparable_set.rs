use std::{
    cmp::Ordering,
    collections::{BTreeSet, btree_set},
    fmt::{Debug, Display},
};

use itertools::Itertools;

/// A set of ordered elements that is itself ordered, so it can be used as
/// the state label of an automaton. The composite states created by subset
/// construction are named with it.
///
/// Two sets are equal iff they hold the same elements. Sets are ordered by
/// size first; sets of the same size are ordered by their first differing
/// element, both walked in ascending order. In particular a proper subset
/// always sorts before its superset.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct ComparableSet<T: Ord> {
    elements: BTreeSet<T>,
}

impl<T: Ord> ComparableSet<T> {
    pub fn new() -> Self {
        ComparableSet {
            elements: BTreeSet::new(),
        }
    }

    pub fn contains(&self, element: &T) -> bool {
        self.elements.contains(element)
    }

    /// Adds an element, returning whether it was newly inserted.
    pub fn insert(&mut self, element: T) -> bool {
        self.elements.insert(element)
    }

    /// Removes an element, returning whether it was present.
    pub fn remove(&mut self, element: &T) -> bool {
        self.elements.remove(element)
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Iterates the elements in ascending order.
    pub fn iter(&self) -> btree_set::Iter<'_, T> {
        self.elements.iter()
    }

    pub fn is_subset(&self, other: &ComparableSet<T>) -> bool {
        self.elements.is_subset(&other.elements)
    }

    pub fn is_superset(&self, other: &ComparableSet<T>) -> bool {
        self.elements.is_superset(&other.elements)
    }

    /// Whether any element of this set is also contained in `other`.
    pub fn intersects(&self, other: &BTreeSet<T>) -> bool {
        !self.elements.is_disjoint(other)
    }

    pub fn into_inner(self) -> BTreeSet<T> {
        self.elements
    }
}

impl<T: Ord + Clone> ComparableSet<T> {
    pub fn union(&self, other: &ComparableSet<T>) -> ComparableSet<T> {
        self.elements.union(&other.elements).cloned().collect()
    }
}

impl<T: Ord> Default for ComparableSet<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Ord> Ord for ComparableSet<T> {
    fn cmp(&self, other: &Self) -> Ordering {
        // Equal sizes can only be subsets of each other when equal, so the
        // size comparison covers the subset/superset case.
        self.len()
            .cmp(&other.len())
            .then_with(|| self.elements.iter().cmp(other.elements.iter()))
    }
}

impl<T: Ord> PartialOrd for ComparableSet<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<T: Ord> FromIterator<T> for ComparableSet<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        ComparableSet {
            elements: iter.into_iter().collect(),
        }
    }
}

impl<T: Ord> Extend<T> for ComparableSet<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        self.elements.extend(iter);
    }
}

impl<T: Ord> From<BTreeSet<T>> for ComparableSet<T> {
    fn from(elements: BTreeSet<T>) -> Self {
        ComparableSet { elements }
    }
}

impl<T: Ord, const N: usize> From<[T; N]> for ComparableSet<T> {
    fn from(elements: [T; N]) -> Self {
        elements.into_iter().collect()
    }
}

impl<T: Ord> IntoIterator for ComparableSet<T> {
    type Item = T;
    type IntoIter = btree_set::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.elements.into_iter()
    }
}

impl<'a, T: Ord> IntoIterator for &'a ComparableSet<T> {
    type Item = &'a T;
    type IntoIter = btree_set::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.elements.iter()
    }
}

impl<T: Ord + Debug> Debug for ComparableSet<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_set().entries(self.elements.iter()).finish()
    }
}

impl<T: Ord + Display> Display for ComparableSet<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{{{}}}", self.elements.iter().join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_construction_deduplicates() {
        let set: ComparableSet<u32> = [3, 0, 3, 1].into_iter().collect();

        assert_eq!(set.len(), 3);
        assert_eq!(set.iter().copied().collect_vec(), vec![0, 1, 3]);
        assert_eq!(set, ComparableSet::from([1, 0, 3]));
    }

    #[test]
    fn test_order_by_size_then_elements() {
        let mut sets = vec![
            ComparableSet::from([1, 2]),
            ComparableSet::from([0, 3]),
            ComparableSet::from([3]),
            ComparableSet::from([2]),
        ];
        sets.sort();

        assert_eq!(
            sets,
            vec![
                ComparableSet::from([2]),
                ComparableSet::from([3]),
                ComparableSet::from([0, 3]),
                ComparableSet::from([1, 2]),
            ]
        );
    }

    #[test]
    fn test_subset_sorts_first() {
        let small = ComparableSet::from([5]);
        let large = ComparableSet::from([1, 5]);

        assert!(small.is_subset(&large));
        assert!(large.is_superset(&small));
        assert!(!small.is_superset(&large));
        assert_eq!(small.cmp(&large), Ordering::Less);
        assert_eq!(large.cmp(&small), Ordering::Greater);
    }

    #[test]
    fn test_union_and_membership() {
        let mut set = ComparableSet::from([0, 3]).union(&ComparableSet::from([1, 3]));

        assert_eq!(set, ComparableSet::from([0, 1, 3]));
        assert!(set.contains(&1));
        assert!(set.remove(&1));
        assert!(!set.remove(&1));
        assert!(set.intersects(&BTreeSet::from([3, 7])));
        assert!(!set.intersects(&BTreeSet::from([7])));
    }

    #[test]
    fn test_display() {
        assert_eq!(ComparableSet::from([3, 0]).to_string(), "{0, 3}");
        assert_eq!(ComparableSet::<u32>::new().to_string(), "{}");
        assert_eq!(format!("{:?}", ComparableSet::from([1, 2])), "{1, 2}");
    }
}

//! Object collection policies.
//!
//! Every trie node keeps the objects registered under it in a collection
//! that suppresses duplicates. [`UniqueList`] remembers first-insertion
//! order; [`SortedSet`] keeps objects in their `Ord` order.

use std::collections::{btree_set, BTreeSet, HashSet};
use std::hash::Hash;

/// A duplicate-suppressing collection of objects.
pub trait ObjectCollection: Default {
    /// The stored object type.
    type Item;
    /// Borrowing iterator over the stored objects.
    type Iter<'a>: Iterator<Item = &'a Self::Item>
    where
        Self: 'a;

    /// Insert `item`. Returns `false` if it was already present.
    fn insert(&mut self, item: Self::Item) -> bool;

    /// Returns `true` if `item` is present.
    fn contains(&self, item: &Self::Item) -> bool;

    /// Number of distinct objects.
    fn len(&self) -> usize;

    /// Returns `true` if no object is present.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Iterate in the collection's order.
    fn iter(&self) -> Self::Iter<'_>;

    /// Remove every object.
    fn clear(&mut self);
}

/// Insertion-ordered list with set semantics.
#[derive(Clone, Debug)]
pub struct UniqueList<T> {
    items: Vec<T>,
    seen: HashSet<T>,
}

impl<T> Default for UniqueList<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            seen: HashSet::new(),
        }
    }
}

impl<T: Clone + Eq + Hash> ObjectCollection for UniqueList<T> {
    type Item = T;
    type Iter<'a>
        = std::slice::Iter<'a, T>
    where
        T: 'a;

    fn insert(&mut self, item: T) -> bool {
        if !self.seen.insert(item.clone()) {
            return false;
        }
        self.items.push(item);
        true
    }

    fn contains(&self, item: &T) -> bool {
        self.seen.contains(item)
    }

    fn len(&self) -> usize {
        self.items.len()
    }

    fn iter(&self) -> Self::Iter<'_> {
        self.items.iter()
    }

    fn clear(&mut self) {
        self.items.clear();
        self.seen.clear();
    }
}

/// Ordered set of objects.
#[derive(Clone, Debug)]
pub struct SortedSet<T> {
    items: BTreeSet<T>,
}

impl<T> Default for SortedSet<T> {
    fn default() -> Self {
        Self {
            items: BTreeSet::new(),
        }
    }
}

impl<T: Ord> ObjectCollection for SortedSet<T> {
    type Item = T;
    type Iter<'a>
        = btree_set::Iter<'a, T>
    where
        T: 'a;

    fn insert(&mut self, item: T) -> bool {
        self.items.insert(item)
    }

    fn contains(&self, item: &T) -> bool {
        self.items.contains(item)
    }

    fn len(&self) -> usize {
        self.items.len()
    }

    fn iter(&self) -> Self::Iter<'_> {
        self.items.iter()
    }

    fn clear(&mut self) {
        self.items.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unique_list_keeps_first_insertion_order() {
        let mut list = UniqueList::default();
        assert!(list.insert("b"));
        assert!(list.insert("a"));
        assert!(!list.insert("b"));
        assert_eq!(list.iter().copied().collect::<Vec<_>>(), vec!["b", "a"]);
        assert_eq!(list.len(), 2);
        assert!(list.contains(&"a"));
    }

    #[test]
    fn sorted_set_orders_items() {
        let mut set = SortedSet::default();
        set.insert(3);
        set.insert(1);
        set.insert(3);
        assert_eq!(set.iter().copied().collect::<Vec<_>>(), vec![1, 3]);
    }

    #[test]
    fn clear_empties_both_policies() {
        let mut list = UniqueList::default();
        list.insert(1);
        list.clear();
        assert!(list.is_empty());
        assert!(list.insert(1));

        let mut set = SortedSet::default();
        set.insert(1);
        set.clear();
        assert!(set.is_empty());
    }
}

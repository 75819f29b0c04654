//! Knowledge states: immutable subsets of a domain of assessable items
//!
//! A knowledge state is the set of items a subject has mastered. States
//! are pure values: compared, hashed, and ordered structurally, never by
//! identity. All set algebra on states is non-destructive — operations
//! return new states and leave their operands untouched.
//!
//! Items can be of any type as long as they are cheap to clone, hashable,
//! and totally ordered. The total order is what makes derived artifacts
//! (state orderings, reduction folds) deterministic.

use std::collections::btree_set;
use std::collections::BTreeSet;
use std::fmt;
use std::hash::Hash;

use serde::{Deserialize, Serialize};

/// Bound for domain items.
///
/// `Ord` gives every family of states a canonical iteration order;
/// `Hash` lets items key the signature and representative tables.
pub trait Item: Clone + Eq + Ord + Hash + fmt::Debug {}

impl<T: Clone + Eq + Ord + Hash + fmt::Debug> Item for T {}

/// A family of knowledge states over a common (implicit) domain.
pub type StateFamily<Q> = BTreeSet<KnowledgeState<Q>>;

/// An immutable subset of the domain.
///
/// Structural equality: two states are equal iff they contain the same
/// items. States order lexicographically over their sorted items, which
/// makes `BTreeSet<KnowledgeState<Q>>` iteration deterministic.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct KnowledgeState<Q: Item>(BTreeSet<Q>);

impl<Q: Item> KnowledgeState<Q> {
    /// The empty state ∅.
    pub fn empty() -> Self {
        Self(BTreeSet::new())
    }

    /// Number of items in the state.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True for ∅.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Membership test.
    pub fn contains(&self, item: &Q) -> bool {
        self.0.contains(item)
    }

    /// True iff every item of `self` belongs to `other`.
    pub fn is_subset_of(&self, other: &Self) -> bool {
        self.0.is_subset(&other.0)
    }

    /// The state `self ∪ other`.
    pub fn union(&self, other: &Self) -> Self {
        Self(self.0.union(&other.0).cloned().collect())
    }

    /// The state `self ∪ {item}`.
    pub fn with(&self, item: Q) -> Self {
        let mut items = self.0.clone();
        items.insert(item);
        Self(items)
    }

    /// The state `self \ {item}`.
    pub fn without(&self, item: &Q) -> Self {
        let mut items = self.0.clone();
        items.remove(item);
        Self(items)
    }

    /// Iterate items in ascending order.
    pub fn iter(&self) -> btree_set::Iter<'_, Q> {
        self.0.iter()
    }
}

impl<Q: Item> Default for KnowledgeState<Q> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<Q: Item> From<BTreeSet<Q>> for KnowledgeState<Q> {
    fn from(items: BTreeSet<Q>) -> Self {
        Self(items)
    }
}

impl<Q: Item> FromIterator<Q> for KnowledgeState<Q> {
    fn from_iter<I: IntoIterator<Item = Q>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<Q: Item> IntoIterator for KnowledgeState<Q> {
    type Item = Q;
    type IntoIter = btree_set::IntoIter<Q>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a, Q: Item> IntoIterator for &'a KnowledgeState<Q> {
    type Item = &'a Q;
    type IntoIter = btree_set::Iter<'a, Q>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl<Q: Item + fmt::Display> fmt::Display for KnowledgeState<Q> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        for (i, item) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, ",")?;
            }
            write!(f, "{item}")?;
        }
        write!(f, "}}")
    }
}

//! Knowledge structures and their classification
//!
//! A knowledge structure is a pair (Q, K): a finite domain of items Q
//! and a family K of knowledge states over it, containing at least ∅
//! and Q itself. Stronger algebras refine the base notion:
//!
//! ```text
//! KnowledgeStructure ⊃ KnowledgeSpace ⊃ LearningSpace
//!        (any K)       (union-closed)   (+ well-graded)
//! ```
//!
//! Classification is a closed tag, [`StructureKind`], computed once by
//! the factory rather than an open type hierarchy. The tag is an
//! outcome, not an input: [`KnowledgeStructure::classify`] measures the
//! family and records what it found, while the dedicated factories
//! ([`KnowledgeStructure::space`], [`KnowledgeStructure::learning_space`])
//! *require* their property and fail instead of downgrading.
//!
//! Structures are immutable after construction. Derived structures
//! (the discriminative reduction) are fresh, independently-owned values.
//!
//! # Example
//!
//! ```
//! use learnspace::{KnowledgeState, KnowledgeStructure, StructureKind};
//!
//! let states = ["", "a", "b", "ab", "ac", "bc", "abc"]
//!     .map(|s| s.chars().collect::<KnowledgeState<char>>());
//! let ks = KnowledgeStructure::classify("abc".chars(), states).unwrap();
//! assert_eq!(ks.kind(), StructureKind::LearningSpace);
//! ```

use std::collections::BTreeSet;
use std::fmt;

use rustc_hash::FxHashMap;
use serde::{Deserialize, Deserializer, Serialize};

use crate::errors::{RequirementNotMetError, StructureError, StructureInitError};
use crate::family;
use crate::state::{Item, KnowledgeState, StateFamily};

/// Classification outcome for a family of states.
///
/// Ordered by strength: every learning space is a knowledge space, and
/// every knowledge space is a knowledge structure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StructureKind {
    /// No algebraic guarantee beyond the structural requirements.
    Structure,
    /// The family is union-closed.
    Space,
    /// The family is union-closed and well-graded.
    LearningSpace,
}

impl StructureKind {
    /// Does this kind guarantee union-closedness?
    pub fn is_union_closed(&self) -> bool {
        matches!(self, Self::Space | Self::LearningSpace)
    }

    /// Does this kind guarantee well-gradedness?
    pub fn is_well_graded(&self) -> bool {
        matches!(self, Self::LearningSpace)
    }

    /// Human-readable label.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Structure => "knowledge structure",
            Self::Space => "knowledge space",
            Self::LearningSpace => "learning space",
        }
    }
}

impl fmt::Display for StructureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A validated, classified knowledge structure (Q, K).
///
/// Invariants, enforced at every construction path:
/// - the domain is non-empty;
/// - every state is a subset of the domain;
/// - ∅ and the whole domain belong to the family;
/// - `kind` is the strongest classification the family satisfies.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct KnowledgeStructure<Q: Item> {
    domain: KnowledgeState<Q>,
    states: StateFamily<Q>,
    #[serde(skip)]
    kind: StructureKind,
}

impl<Q: Item> KnowledgeStructure<Q> {
    /// Build and classify a structure from a domain and a family.
    ///
    /// The returned structure is tagged with the strongest kind the
    /// family satisfies. Structural violations are fatal.
    pub fn classify(
        domain: impl IntoIterator<Item = Q>,
        states: impl IntoIterator<Item = KnowledgeState<Q>>,
    ) -> Result<Self, StructureInitError> {
        let (domain, states) = Self::validated(domain, states)?;
        let kind = if !family::is_union_closed(&states) {
            StructureKind::Structure
        } else if !family::is_well_graded(&states) {
            StructureKind::Space
        } else {
            StructureKind::LearningSpace
        };
        tracing::debug!(
            items = domain.len(),
            states = states.len(),
            kind = kind.label(),
            "classified state family"
        );
        Ok(Self { domain, states, kind })
    }

    /// Build a knowledge space, requiring union-closedness.
    pub fn space(
        domain: impl IntoIterator<Item = Q>,
        states: impl IntoIterator<Item = KnowledgeState<Q>>,
    ) -> Result<Self, StructureError> {
        let ks = Self::classify(domain, states)?;
        if !ks.kind.is_union_closed() {
            return Err(RequirementNotMetError::NotUnionClosed.into());
        }
        Ok(ks)
    }

    /// Build a learning space, requiring union-closedness and
    /// well-gradedness.
    pub fn learning_space(
        domain: impl IntoIterator<Item = Q>,
        states: impl IntoIterator<Item = KnowledgeState<Q>>,
    ) -> Result<Self, StructureError> {
        let ks = Self::classify(domain, states)?;
        if !ks.kind.is_union_closed() {
            return Err(RequirementNotMetError::NotUnionClosed.into());
        }
        if !ks.kind.is_well_graded() {
            return Err(RequirementNotMetError::NotWellGraded.into());
        }
        Ok(ks)
    }

    /// The trivial structure (Q, {∅, Q}).
    pub fn trivial(domain: impl IntoIterator<Item = Q>) -> Result<Self, StructureInitError> {
        let domain: KnowledgeState<Q> = domain.into_iter().collect();
        let states = [KnowledgeState::empty(), domain.clone()];
        Self::classify(domain, states)
    }

    /// Build a structure from states alone.
    ///
    /// The domain is the union of the given states; ∅ is added
    /// implicitly. The union itself must appear among the states, same
    /// as everywhere else.
    pub fn from_family(
        states: impl IntoIterator<Item = KnowledgeState<Q>>,
    ) -> Result<Self, StructureInitError> {
        let mut states: StateFamily<Q> = states.into_iter().collect();
        states.insert(KnowledgeState::empty());
        let domain = family::family_domain(&states);
        Self::classify(domain, states)
    }

    fn validated(
        domain: impl IntoIterator<Item = Q>,
        states: impl IntoIterator<Item = KnowledgeState<Q>>,
    ) -> Result<(KnowledgeState<Q>, StateFamily<Q>), StructureInitError> {
        let domain: KnowledgeState<Q> = domain.into_iter().collect();
        if domain.is_empty() {
            return Err(StructureInitError::EmptyDomain);
        }
        let states: StateFamily<Q> = states.into_iter().collect();
        for state in &states {
            if !state.is_subset_of(&domain) {
                return Err(StructureInitError::StateNotInDomain {
                    state: format!("{state:?}"),
                });
            }
        }
        if !states.contains(&KnowledgeState::empty()) || !states.contains(&domain) {
            return Err(StructureInitError::MissingExtremes);
        }
        Ok((domain, states))
    }

    /// The domain Q.
    pub fn domain(&self) -> &KnowledgeState<Q> {
        &self.domain
    }

    /// The family K.
    pub fn states(&self) -> &StateFamily<Q> {
        &self.states
    }

    /// The classification tag.
    pub fn kind(&self) -> StructureKind {
        self.kind
    }

    /// Is the family known union-closed?
    pub fn is_union_closed_kind(&self) -> bool {
        self.kind.is_union_closed()
    }

    /// Is the family known well-graded?
    pub fn is_well_graded_kind(&self) -> bool {
        self.kind.is_well_graded()
    }

    /// All states ordered by ascending cardinality.
    ///
    /// Ties keep the states' lexicographic order, so the result is
    /// stable across runs.
    pub fn ordered_states(&self) -> Vec<&KnowledgeState<Q>> {
        let mut ordered: Vec<&KnowledgeState<Q>> = self.states.iter().collect();
        ordered.sort_by_key(|state| state.len());
        ordered
    }

    /// The subfamily of states containing `item`.
    pub fn states_with_item(&self, item: &Q) -> BTreeSet<&KnowledgeState<Q>> {
        self.states.iter().filter(|state| state.contains(item)).collect()
    }

    /// The subfamily of states not containing `item`.
    pub fn states_without_item(&self, item: &Q) -> BTreeSet<&KnowledgeState<Q>> {
        self.states.iter().filter(|state| !state.contains(item)).collect()
    }

    /// The notion of `item`: all items contained in exactly the same
    /// states as `item`.
    ///
    /// An item outside the domain yields an empty notion.
    pub fn notion(&self, item: &Q) -> KnowledgeState<Q> {
        let signature = self.states_with_item(item);
        self.domain
            .iter()
            .filter(|other| self.states_with_item(other) == signature)
            .cloned()
            .collect()
    }

    /// The collection of all notions — a partition of the domain.
    pub fn domain_partition(&self) -> StateFamily<Q> {
        self.domain.iter().map(|item| self.notion(item)).collect()
    }

    /// Is every notion a singleton?
    pub fn is_discriminative(&self) -> bool {
        self.domain.iter().all(|item| self.notion(item).len() == 1)
    }

    /// Collapse each notion to a single representative item.
    ///
    /// `join` combines two items into one; it is folded over each
    /// notion's items in ascending item order, so for a fixed `join`
    /// the reduction is deterministic. The representative only needs to
    /// be a stable, unique surrogate for the notion — any reducible
    /// combining function will do (string concatenation for string
    /// items, for example).
    ///
    /// Each original state maps to the set of representatives of the
    /// notions it intersects. The result is reclassified from scratch;
    /// the collapse preserves union-closedness and well-gradedness
    /// whenever they held originally.
    pub fn discriminative_reduction<F>(&self, mut join: F) -> Result<Self, StructureInitError>
    where
        F: FnMut(Q, Q) -> Q,
    {
        let mut representative: FxHashMap<Q, Q> = FxHashMap::default();
        let mut reduced_domain: Vec<Q> = Vec::new();
        for part in &self.domain_partition() {
            let mut items = part.iter().cloned();
            let Some(first) = items.next() else {
                continue;
            };
            let joined = items.fold(first, &mut join);
            for item in part {
                representative.insert(item.clone(), joined.clone());
            }
            reduced_domain.push(joined);
        }
        let reduced_states: StateFamily<Q> = self
            .states
            .iter()
            .map(|state| {
                state
                    .iter()
                    .map(|item| representative[item].clone())
                    .collect::<KnowledgeState<Q>>()
            })
            .collect();
        Self::classify(reduced_domain, reduced_states)
    }

    /// An atom at `item`: a minimal-cardinality state containing it.
    ///
    /// Scans [`Self::ordered_states`] and returns the first hit, so for
    /// non-discriminative structures with several minimal candidates the
    /// lexicographically smallest one wins. `None` only for items
    /// outside the domain.
    pub fn atom_at(&self, item: &Q) -> Option<&KnowledgeState<Q>> {
        self.ordered_states()
            .into_iter()
            .find(|state| state.contains(item))
    }

    /// The base: atoms at every domain item.
    pub fn base(&self) -> StateFamily<Q> {
        self.domain
            .iter()
            .filter_map(|item| self.atom_at(item))
            .cloned()
            .collect()
    }
}

// Deserialization goes back through the factory so an invalid or
// tampered payload can never materialize as a structure. The kind is
// recomputed, not trusted from the wire.
impl<'de, Q> Deserialize<'de> for KnowledgeStructure<Q>
where
    Q: Item + Deserialize<'de>,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(bound = "Q: Ord + Deserialize<'de>")]
        struct Raw<Q: Ord> {
            domain: BTreeSet<Q>,
            states: BTreeSet<BTreeSet<Q>>,
        }

        let raw = Raw::<Q>::deserialize(deserializer)?;
        KnowledgeStructure::classify(raw.domain, raw.states.into_iter().map(KnowledgeState::from))
            .map_err(serde::de::Error::custom)
    }
}

impl<Q: Item + fmt::Display> fmt::Display for KnowledgeStructure<Q> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.kind.label())?;
        writeln!(f, "domain: {}", self.domain)?;
        writeln!(f, "states:")?;
        for state in self.ordered_states() {
            writeln!(f, "    {state}")?;
        }
        Ok(())
    }
}

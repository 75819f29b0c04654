//! Probability distributions over knowledge states
//!
//! A probabilistic knowledge structure is a triple (Q, K, L): a
//! knowledge structure (Q, K) plus a distribution L assigning each
//! state a probability mass. The masses must be non-negative and sum
//! to exactly 1; states missing from the supplied mapping default to 0.
//!
//! Validation walks the family in its canonical order and fails as soon
//! as the running sum passes 1, then once more if the final sum falls
//! short. The comparison is exact: callers are expected to supply
//! binary-exact masses (0.5, 0.25, 0.125, …) or masses that provably
//! telescope to 1.
//!
//! The wrapper owns its structure exclusively and re-exposes the whole
//! structural query surface by explicit delegation — there is no
//! attribute forwarding to guess at.

use std::collections::btree_map;
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use rustc_hash::FxHashMap;
use serde::ser::SerializeSeq;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::errors::{DistributionError, ProbabilisticInitError};
use crate::state::{Item, KnowledgeState, StateFamily};
use crate::structure::{KnowledgeStructure, StructureKind};

/// A validated probability distribution over a family of states.
///
/// Invariant: every mass is ≥ 0 and the masses sum to exactly 1.
/// Iteration follows the states' canonical order.
#[derive(Debug, Clone, PartialEq)]
pub struct Distribution<Q: Item> {
    masses: BTreeMap<KnowledgeState<Q>, f64>,
}

impl<Q: Item> Distribution<Q> {
    /// Build a distribution over `states`, reading each state's mass
    /// from `probabilities` and defaulting absent states to 0.
    ///
    /// Entries of `probabilities` that are not members of `states` are
    /// ignored.
    pub fn over(
        states: &StateFamily<Q>,
        probabilities: &FxHashMap<KnowledgeState<Q>, f64>,
    ) -> Result<Self, DistributionError> {
        let masses: BTreeMap<KnowledgeState<Q>, f64> = states
            .iter()
            .map(|state| {
                let mass = probabilities.get(state).copied().unwrap_or(0.0);
                (state.clone(), mass)
            })
            .collect();
        Self::validate(&masses)?;
        Ok(Self { masses })
    }

    /// Build a distribution whose support is exactly the given entries.
    ///
    /// Duplicate states keep the last mass supplied.
    pub fn from_entries(
        entries: impl IntoIterator<Item = (KnowledgeState<Q>, f64)>,
    ) -> Result<Self, DistributionError> {
        let masses: BTreeMap<KnowledgeState<Q>, f64> = entries.into_iter().collect();
        Self::validate(&masses)?;
        Ok(Self { masses })
    }

    fn validate(masses: &BTreeMap<KnowledgeState<Q>, f64>) -> Result<(), DistributionError> {
        let mut sum = 0.0;
        for (state, &mass) in masses {
            if mass < 0.0 {
                return Err(DistributionError::NegativeMass {
                    state: format!("{state:?}"),
                    mass,
                });
            }
            sum += mass;
            if sum > 1.0 {
                return Err(DistributionError::MassExceedsOne {
                    state: format!("{state:?}"),
                    sum,
                });
            }
        }
        if sum < 1.0 {
            return Err(DistributionError::MassBelowOne { sum });
        }
        Ok(())
    }

    /// Re-run the distribution invariants.
    ///
    /// Distributions are valid by construction; this exists so a
    /// session can hold strategy output to the same contract.
    pub fn revalidate(&self) -> Result<(), DistributionError> {
        Self::validate(&self.masses)
    }

    /// The mass of `state`, 0 if it is outside the support.
    pub fn mass(&self, state: &KnowledgeState<Q>) -> f64 {
        self.masses.get(state).copied().unwrap_or(0.0)
    }

    /// Number of states in the support.
    pub fn len(&self) -> usize {
        self.masses.len()
    }

    /// True when the support is empty (never for a valid distribution).
    pub fn is_empty(&self) -> bool {
        self.masses.is_empty()
    }

    /// Iterate (state, mass) pairs in canonical state order.
    pub fn iter(&self) -> impl Iterator<Item = (&KnowledgeState<Q>, f64)> {
        self.masses.iter().map(|(state, &mass)| (state, mass))
    }

    /// The states carrying the distribution.
    pub fn support(&self) -> impl Iterator<Item = &KnowledgeState<Q>> {
        self.masses.keys()
    }

    /// Does the support coincide with the given family?
    pub fn is_over(&self, states: &StateFamily<Q>) -> bool {
        self.masses.len() == states.len() && self.masses.keys().all(|state| states.contains(state))
    }

    /// Sum of all masses (1 for every valid distribution).
    pub fn total_mass(&self) -> f64 {
        self.masses.values().sum()
    }

    /// The state with the highest mass; the lexicographically smallest
    /// one on ties.
    pub fn most_likely(&self) -> Option<(&KnowledgeState<Q>, f64)> {
        self.iter()
            .reduce(|best, candidate| if candidate.1 > best.1 { candidate } else { best })
    }
}

impl<'a, Q: Item> IntoIterator for &'a Distribution<Q> {
    type Item = (&'a KnowledgeState<Q>, &'a f64);
    type IntoIter = btree_map::Iter<'a, KnowledgeState<Q>, f64>;

    fn into_iter(self) -> Self::IntoIter {
        self.masses.iter()
    }
}

// States are sets, so the wire format is a sequence of (state, mass)
// entries rather than a map with non-scalar keys.
impl<Q: Item + Serialize> Serialize for Distribution<Q> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(self.masses.len()))?;
        for entry in &self.masses {
            seq.serialize_element(&entry)?;
        }
        seq.end()
    }
}

impl<'de, Q> Deserialize<'de> for Distribution<Q>
where
    Q: Item + Deserialize<'de>,
{
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let entries: Vec<(KnowledgeState<Q>, f64)> = Vec::deserialize(deserializer)?;
        Distribution::from_entries(entries).map_err(serde::de::Error::custom)
    }
}

impl<Q: Item + fmt::Display> fmt::Display for Distribution<Q> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (state, mass)) in self.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "p({state}) = {mass}")?;
        }
        Ok(())
    }
}

/// A knowledge structure together with a distribution over its states.
///
/// The structure is built fresh by the constructor, owned exclusively,
/// and never mutated afterward. Structural queries are forwarded
/// explicitly; the distribution is reachable through
/// [`Self::distribution`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProbabilisticKnowledgeStructure<Q: Item> {
    structure: KnowledgeStructure<Q>,
    distribution: Distribution<Q>,
}

impl<Q: Item> ProbabilisticKnowledgeStructure<Q> {
    /// Build over a freshly classified structure of any kind.
    pub fn new(
        domain: impl IntoIterator<Item = Q>,
        states: impl IntoIterator<Item = KnowledgeState<Q>>,
        probabilities: &FxHashMap<KnowledgeState<Q>, f64>,
    ) -> Result<Self, ProbabilisticInitError> {
        let structure = KnowledgeStructure::classify(domain, states)?;
        Self::from_structure(structure, probabilities)
    }

    /// Build over a knowledge space; fails unless the family is
    /// union-closed.
    pub fn space(
        domain: impl IntoIterator<Item = Q>,
        states: impl IntoIterator<Item = KnowledgeState<Q>>,
        probabilities: &FxHashMap<KnowledgeState<Q>, f64>,
    ) -> Result<Self, ProbabilisticInitError> {
        let structure = KnowledgeStructure::space(domain, states)?;
        Self::from_structure(structure, probabilities)
    }

    /// Build over a learning space; fails unless the family is
    /// union-closed and well-graded.
    pub fn learning_space(
        domain: impl IntoIterator<Item = Q>,
        states: impl IntoIterator<Item = KnowledgeState<Q>>,
        probabilities: &FxHashMap<KnowledgeState<Q>, f64>,
    ) -> Result<Self, ProbabilisticInitError> {
        let structure = KnowledgeStructure::learning_space(domain, states)?;
        Self::from_structure(structure, probabilities)
    }

    /// Wrap an already-built structure, taking ownership of it.
    pub fn from_structure(
        structure: KnowledgeStructure<Q>,
        probabilities: &FxHashMap<KnowledgeState<Q>, f64>,
    ) -> Result<Self, ProbabilisticInitError> {
        let distribution = Distribution::over(structure.states(), probabilities)?;
        Ok(Self {
            structure,
            distribution,
        })
    }

    /// The wrapped knowledge structure.
    pub fn structure(&self) -> &KnowledgeStructure<Q> {
        &self.structure
    }

    /// The distribution L.
    pub fn distribution(&self) -> &Distribution<Q> {
        &self.distribution
    }

    /// Swap in a new belief state. Session-internal: the public surface
    /// of a probabilistic structure stays immutable.
    pub(crate) fn replace_distribution(&mut self, distribution: Distribution<Q>) {
        self.distribution = distribution;
    }

    // Structural queries, delegated explicitly.

    /// The domain Q.
    pub fn domain(&self) -> &KnowledgeState<Q> {
        self.structure.domain()
    }

    /// The family K.
    pub fn states(&self) -> &StateFamily<Q> {
        self.structure.states()
    }

    /// The wrapped structure's classification.
    pub fn kind(&self) -> StructureKind {
        self.structure.kind()
    }

    /// See [`KnowledgeStructure::ordered_states`].
    pub fn ordered_states(&self) -> Vec<&KnowledgeState<Q>> {
        self.structure.ordered_states()
    }

    /// See [`KnowledgeStructure::states_with_item`].
    pub fn states_with_item(&self, item: &Q) -> BTreeSet<&KnowledgeState<Q>> {
        self.structure.states_with_item(item)
    }

    /// See [`KnowledgeStructure::states_without_item`].
    pub fn states_without_item(&self, item: &Q) -> BTreeSet<&KnowledgeState<Q>> {
        self.structure.states_without_item(item)
    }

    /// See [`KnowledgeStructure::notion`].
    pub fn notion(&self, item: &Q) -> KnowledgeState<Q> {
        self.structure.notion(item)
    }

    /// See [`KnowledgeStructure::domain_partition`].
    pub fn domain_partition(&self) -> StateFamily<Q> {
        self.structure.domain_partition()
    }

    /// See [`KnowledgeStructure::is_discriminative`].
    pub fn is_discriminative(&self) -> bool {
        self.structure.is_discriminative()
    }

    /// See [`KnowledgeStructure::atom_at`].
    pub fn atom_at(&self, item: &Q) -> Option<&KnowledgeState<Q>> {
        self.structure.atom_at(item)
    }

    /// See [`KnowledgeStructure::base`].
    pub fn base(&self) -> StateFamily<Q> {
        self.structure.base()
    }
}

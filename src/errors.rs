//! Error types for structure construction, distributions, and assessment
//!
//! All validation is eager: every error here is raised at a construction
//! boundary or at a session transition, and nothing is retried
//! internally. A failed constructor leaves no partially-valid value
//! behind.
//!
//! Offending states are carried as rendered strings so the error enums
//! stay non-generic and cheap to move across API boundaries.

use thiserror::Error;

/// Structural requirements every knowledge structure must meet.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StructureInitError {
    /// The domain has no items.
    #[error("domain cannot be empty")]
    EmptyDomain,

    /// A supplied state contains items outside the domain.
    #[error("state {state} is not a subset of the domain")]
    StateNotInDomain { state: String },

    /// ∅ or the full domain is missing from the family.
    #[error("the family of states must contain at least the empty state and the whole domain")]
    MissingExtremes,
}

/// A dedicated factory was asked for a property the family lacks.
///
/// Distinct from [`StructureInitError`]: the family is a well-formed
/// knowledge structure, it just does not carry the requested algebra.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RequirementNotMetError {
    #[error("the family of states is not union-closed")]
    NotUnionClosed,

    #[error("the family of states is not well-graded")]
    NotWellGraded,
}

/// Any failure while building a classified knowledge structure.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StructureError {
    #[error(transparent)]
    Init(#[from] StructureInitError),

    #[error(transparent)]
    Requirement(#[from] RequirementNotMetError),
}

/// An invalid probability assignment over a family of states.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DistributionError {
    /// Some state was assigned negative mass.
    #[error("probability of state {state} is negative ({mass})")]
    NegativeMass { state: String, mass: f64 },

    /// The running sum of masses passed 1 before the scan finished.
    #[error("probabilities exceed 1 at state {state} (running sum {sum})")]
    MassExceedsOne { state: String, sum: f64 },

    /// The final sum of masses fell short of 1.
    #[error("probabilities sum to {sum}, expected exactly 1")]
    MassBelowOne { sum: f64 },
}

/// Any failure while building a probabilistic knowledge structure.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ProbabilisticInitError {
    #[error(transparent)]
    Structure(#[from] StructureError),

    #[error(transparent)]
    Distribution(#[from] DistributionError),
}

impl From<StructureInitError> for ProbabilisticInitError {
    fn from(err: StructureInitError) -> Self {
        Self::Structure(StructureError::Init(err))
    }
}

impl From<RequirementNotMetError> for ProbabilisticInitError {
    fn from(err: RequirementNotMetError) -> Self {
        Self::Structure(StructureError::Requirement(err))
    }
}

/// An assessment session was assembled without its strategies.
///
/// The shape of each strategy is a compile-time contract (see
/// [`crate::assessment::rules`]); what remains dynamic is whether a
/// rule was registered at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum MapInitError {
    #[error("no questioning rule was provided")]
    MissingQuestioningRule,

    #[error("no updating rule was provided")]
    MissingUpdatingRule,
}

/// A caller-contract or strategy-contract violation during assessment.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AssessmentError {
    /// `submit_response` was called while no question was pending.
    #[error("no question is pending; call next_question before submitting a response")]
    NoPendingQuestion,

    /// The questioning rule selected an item outside the domain.
    #[error("questioning rule selected {question}, which is not a domain item")]
    QuestionOutsideDomain { question: String },

    /// The updating rule produced a posterior over the wrong family.
    #[error("updating rule produced a posterior whose support differs from the state family")]
    PosteriorSupportMismatch,

    /// The updating rule produced an invalid posterior.
    #[error("updating rule produced an invalid posterior: {0}")]
    InvalidPosterior(#[from] DistributionError),
}

/// Failures of the delimited-text collaborator.
#[derive(Debug, Error)]
pub enum TextError {
    #[error("cannot read structure file: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Structure(#[from] StructureInitError),
}

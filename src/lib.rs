//! Knowledge space theory for adaptive assessment
//!
//! Knowledge space theory models what a learner knows as a *knowledge
//! state* — the subset of a domain of items they have mastered — and a
//! body of knowledge as a *family* of such states. The algebra of that
//! family decides what kind of structure it is, and a probability
//! distribution over the states drives adaptive testing.
//!
//! # Architecture
//!
//! ```text
//! raw family → classify → KnowledgeStructure / Space / LearningSpace
//!                              │
//!                              ▼ + distribution
//!                  ProbabilisticKnowledgeStructure
//!                              │
//!                              ▼ + Ψ, U strategies
//!                  AssessmentSession (question / response / update)
//! ```
//!
//! - [`family`]: pure classification predicates (union-closed,
//!   well-graded, antimatroid).
//! - [`structure`]: the validated `(Q, K)` value type, its factory, and
//!   the structural queries (notions, discriminative reduction, atoms).
//! - [`probabilistic`]: a validated distribution over the states and
//!   the `(Q, K, L)` wrapper.
//! - [`assessment`]: the Markov Assessment Procedure — a session state
//!   machine parameterized by a questioning rule and an updating rule.
//! - [`text`]: the delimited-text collaborator, layered strictly on the
//!   public factory.
//!
//! # Example
//!
//! ```
//! use learnspace::{KnowledgeState, KnowledgeStructure, StructureKind};
//!
//! let states = ["", "a", "b", "ab", "ac", "bc", "abc"]
//!     .map(|s| s.chars().collect::<KnowledgeState<char>>());
//! let ks = KnowledgeStructure::classify("abc".chars(), states).unwrap();
//!
//! assert_eq!(ks.kind(), StructureKind::LearningSpace);
//! assert!(ks.is_discriminative());
//! assert_eq!(ks.atom_at(&'c').unwrap(), &"ac".chars().collect());
//! ```
//!
//! Everything is immutable after construction, so structures and their
//! queries are freely shareable across threads; only an
//! [`assessment::AssessmentSession`] is stateful, and each concurrent
//! assessment owns its own.

pub mod assessment;
pub mod errors;
pub mod family;
pub mod probabilistic;
pub mod state;
pub mod structure;
pub mod text;

pub use assessment::{
    AssessmentBuilder, AssessmentConfig, AssessmentSession, AssessmentStep, QuestioningRule,
    UpdatingRule,
};
pub use errors::{
    AssessmentError, DistributionError, MapInitError, ProbabilisticInitError,
    RequirementNotMetError, StructureError, StructureInitError, TextError,
};
pub use probabilistic::{Distribution, ProbabilisticKnowledgeStructure};
pub use state::{Item, KnowledgeState, StateFamily};
pub use structure::{KnowledgeStructure, StructureKind};

//! Adaptive assessment: the Markov Assessment Procedure
//!
//! An assessment session uncovers a subject's latent knowledge state by
//! cycling question → response → belief update. Two strategies drive
//! the cycle and are supplied by the caller:
//!
//! - a **questioning rule** Ψ selects the next item to ask, reading the
//!   current distribution through the probabilistic structure;
//! - an **updating rule** U turns (structure, question, response) into
//!   a posterior distribution.
//!
//! The session itself only orchestrates: it caches the pending
//! question, archives each transition, and installs each posterior.
//! Under the usual theoretical assumptions the procedure converges —
//! the mass of the latent state tends to 1 — but no specific
//! statistically-optimal rule ships here; the strategies are the
//! caller's to plug.
//!
//! # Example
//!
//! ```
//! use learnspace::assessment::AssessmentSession;
//! use learnspace::{Distribution, KnowledgeState, ProbabilisticKnowledgeStructure};
//! use rustc_hash::FxHashMap;
//!
//! type State = KnowledgeState<char>;
//! let states: Vec<State> = ["", "a", "ab"].iter().map(|s| s.chars().collect()).collect();
//! let mut priors = FxHashMap::default();
//! priors.insert(states[1].clone(), 1.0);
//! let pks = ProbabilisticKnowledgeStructure::new("ab".chars(), states, &priors).unwrap();
//!
//! let mut session = AssessmentSession::new(
//!     pks,
//!     |pks: &ProbabilisticKnowledgeStructure<char>| {
//!         *pks.domain().iter().next().unwrap()
//!     },
//!     |pks: &ProbabilisticKnowledgeStructure<char>, _q: &char, _r: bool| {
//!         pks.distribution().clone()
//!     },
//! );
//!
//! let question = session.next_question().unwrap();
//! session.submit_response(true).unwrap();
//! assert_eq!(session.history()[0].question, question);
//! ```

pub mod map;
pub mod rules;

pub use map::{AssessmentBuilder, AssessmentConfig, AssessmentSession, AssessmentStep};
pub use rules::{QuestioningRule, UpdatingRule};

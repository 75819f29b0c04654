//! The Markov Assessment Procedure session
//!
//! A session is a small state machine:
//!
//! ```text
//!            next_question (invokes Ψ once, caches)
//!    Idle ──────────────────────────────────────▶ AwaitingResponse
//!     ▲                                                 │
//!     └─────────────────────────────────────────────────┘
//!            submit_response (invokes U, archives, installs L')
//! ```
//!
//! Repeated `next_question` calls before a response return the cached
//! question without consulting Ψ again. `submit_response` outside
//! AwaitingResponse is a caller-contract violation and is signalled
//! explicitly rather than reusing stale state.
//!
//! A session is sequential by design: it owns its belief state and
//! history, and concurrent assessments each need their own session.
//! The structural data underneath is immutable and freely shared.

use serde::Serialize;

use crate::assessment::rules::{QuestioningRule, UpdatingRule};
use crate::errors::{AssessmentError, MapInitError};
use crate::probabilistic::{Distribution, ProbabilisticKnowledgeStructure};
use crate::state::Item;

/// Session-level knobs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AssessmentConfig {
    /// Re-check every posterior an updating rule returns: support must
    /// equal the state family, masses must be a valid distribution.
    pub validate_posteriors: bool,

    /// Archive (question, response, prior) on every transition.
    pub record_history: bool,
}

impl Default for AssessmentConfig {
    fn default() -> Self {
        Self {
            validate_posteriors: true,
            record_history: true,
        }
    }
}

/// One archived transition: the question asked, the response observed,
/// and the distribution that held *before* the update.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AssessmentStep<Q: Item> {
    pub question: Q,
    pub response: bool,
    pub prior: Distribution<Q>,
}

#[derive(Debug)]
enum Phase<Q> {
    Idle,
    AwaitingResponse { question: Q },
}

/// Assembles a session, deferring the strategy slots.
///
/// This is the dynamic registration path: rules arrive as trait
/// objects, and a slot left empty surfaces as [`MapInitError`] at
/// [`build`](Self::build) time. When both rules are in hand up front,
/// [`AssessmentSession::new`] skips the ceremony.
pub struct AssessmentBuilder<Q: Item> {
    structure: ProbabilisticKnowledgeStructure<Q>,
    questioning: Option<Box<dyn QuestioningRule<Q>>>,
    updating: Option<Box<dyn UpdatingRule<Q>>>,
    config: AssessmentConfig,
}

impl<Q: Item> AssessmentBuilder<Q> {
    /// Register the questioning rule Ψ.
    pub fn questioning_rule(mut self, rule: impl QuestioningRule<Q> + 'static) -> Self {
        self.questioning = Some(Box::new(rule));
        self
    }

    /// Register the updating rule U.
    pub fn updating_rule(mut self, rule: impl UpdatingRule<Q> + 'static) -> Self {
        self.updating = Some(Box::new(rule));
        self
    }

    /// Override the session configuration.
    pub fn config(mut self, config: AssessmentConfig) -> Self {
        self.config = config;
        self
    }

    /// Finish assembly; fails if a strategy slot is still empty.
    pub fn build(self) -> Result<AssessmentSession<Q>, MapInitError> {
        let questioning = self.questioning.ok_or(MapInitError::MissingQuestioningRule)?;
        let updating = self.updating.ok_or(MapInitError::MissingUpdatingRule)?;
        Ok(AssessmentSession {
            structure: self.structure,
            questioning,
            updating,
            config: self.config,
            phase: Phase::Idle,
            history: Vec::new(),
        })
    }
}

/// A running Markov Assessment Procedure.
///
/// The session's probabilistic structure always carries the *current*
/// distribution; the initial one is whatever the structure was built
/// with. History grows append-only, one step per completed transition.
pub struct AssessmentSession<Q: Item> {
    structure: ProbabilisticKnowledgeStructure<Q>,
    questioning: Box<dyn QuestioningRule<Q>>,
    updating: Box<dyn UpdatingRule<Q>>,
    config: AssessmentConfig,
    phase: Phase<Q>,
    history: Vec<AssessmentStep<Q>>,
}

impl<Q: Item> std::fmt::Debug for AssessmentSession<Q> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AssessmentSession")
            .field("structure", &self.structure)
            .field("questioning", &"<dyn QuestioningRule>")
            .field("updating", &"<dyn UpdatingRule>")
            .field("config", &self.config)
            .field("phase", &self.phase)
            .field("history", &self.history)
            .finish()
    }
}

impl<Q: Item> AssessmentSession<Q> {
    /// Start a session with both strategies in hand.
    pub fn new(
        structure: ProbabilisticKnowledgeStructure<Q>,
        questioning: impl QuestioningRule<Q> + 'static,
        updating: impl UpdatingRule<Q> + 'static,
    ) -> Self {
        Self {
            structure,
            questioning: Box::new(questioning),
            updating: Box::new(updating),
            config: AssessmentConfig::default(),
            phase: Phase::Idle,
            history: Vec::new(),
        }
    }

    /// Start assembling a session rule by rule.
    pub fn builder(structure: ProbabilisticKnowledgeStructure<Q>) -> AssessmentBuilder<Q> {
        AssessmentBuilder {
            structure,
            questioning: None,
            updating: None,
            config: AssessmentConfig::default(),
        }
    }

    /// The question to ask next.
    ///
    /// Idle: invokes Ψ on the current structure, caches the selection,
    /// and moves to AwaitingResponse. AwaitingResponse: returns the
    /// cached question; Ψ is not consulted again.
    pub fn next_question(&mut self) -> Result<Q, AssessmentError> {
        if let Phase::AwaitingResponse { question } = &self.phase {
            return Ok(question.clone());
        }
        let question = self.questioning.select(&self.structure);
        if !self.structure.domain().contains(&question) {
            return Err(AssessmentError::QuestionOutsideDomain {
                question: format!("{question:?}"),
            });
        }
        tracing::debug!(question = ?question, "question selected");
        self.phase = Phase::AwaitingResponse {
            question: question.clone(),
        };
        Ok(question)
    }

    /// Record the subject's response to the pending question.
    ///
    /// Invokes U, archives (question, response, prior), installs the
    /// posterior, and returns the session to Idle. Fails without a
    /// pending question, and — under the default configuration — when
    /// the posterior breaks the distribution contract; a failed
    /// transition leaves the session unchanged.
    pub fn submit_response(&mut self, response: bool) -> Result<(), AssessmentError> {
        let question = match &self.phase {
            Phase::AwaitingResponse { question } => question.clone(),
            Phase::Idle => return Err(AssessmentError::NoPendingQuestion),
        };

        let posterior = self.updating.update(&self.structure, &question, response);
        if self.config.validate_posteriors {
            if !posterior.is_over(self.structure.states()) {
                return Err(AssessmentError::PosteriorSupportMismatch);
            }
            posterior.revalidate()?;
        }
        tracing::debug!(question = ?question, response, "response recorded");

        if self.config.record_history {
            self.history.push(AssessmentStep {
                question,
                response,
                prior: self.structure.distribution().clone(),
            });
        }
        self.structure.replace_distribution(posterior);
        self.phase = Phase::Idle;
        Ok(())
    }

    /// The pending question, if one has been selected and not yet
    /// answered. Never invokes Ψ.
    pub fn current_question(&self) -> Option<&Q> {
        match &self.phase {
            Phase::AwaitingResponse { question } => Some(question),
            Phase::Idle => None,
        }
    }

    /// Is a question pending?
    pub fn is_awaiting_response(&self) -> bool {
        matches!(self.phase, Phase::AwaitingResponse { .. })
    }

    /// The probabilistic structure carrying the current belief.
    pub fn structure(&self) -> &ProbabilisticKnowledgeStructure<Q> {
        &self.structure
    }

    /// The current distribution.
    pub fn distribution(&self) -> &Distribution<Q> {
        self.structure.distribution()
    }

    /// All archived transitions, oldest first.
    pub fn history(&self) -> &[AssessmentStep<Q>] {
        &self.history
    }

    /// Number of completed transitions.
    pub fn steps(&self) -> usize {
        self.history.len()
    }

    /// The active configuration.
    pub fn config(&self) -> AssessmentConfig {
        self.config
    }

    /// Tear down the session, releasing the structure and history.
    pub fn into_parts(self) -> (ProbabilisticKnowledgeStructure<Q>, Vec<AssessmentStep<Q>>) {
        (self.structure, self.history)
    }
}

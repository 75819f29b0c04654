//! Strategy contracts for assessment sessions
//!
//! The shape of each strategy is fixed at compile time: a questioning
//! rule sees exactly the probabilistic structure, an updating rule sees
//! exactly (structure, question, response). Closures with matching
//! signatures implement the traits for free, so most callers never
//! write an impl block.
//!
//! Rules may carry state of their own (`&mut self`): a rule is welcome
//! to keep per-session bookkeeping such as an asked-items log.
//!
//! What a rule may *not* do is bypass the session's runtime contract:
//! selected questions must be domain items, and posteriors must be
//! valid distributions over the structure's family. The session
//! enforces both, see [`crate::assessment::map`].

use crate::probabilistic::{Distribution, ProbabilisticKnowledgeStructure};
use crate::state::Item;

/// Selects the next question from the current belief state.
///
/// Formally Ψ: L ↦ q — given the current distribution (read through
/// the probabilistic structure), pick the domain item to ask next.
pub trait QuestioningRule<Q: Item> {
    fn select(&mut self, structure: &ProbabilisticKnowledgeStructure<Q>) -> Q;
}

impl<Q, F> QuestioningRule<Q> for F
where
    Q: Item,
    F: FnMut(&ProbabilisticKnowledgeStructure<Q>) -> Q,
{
    fn select(&mut self, structure: &ProbabilisticKnowledgeStructure<Q>) -> Q {
        self(structure)
    }
}

/// Produces a posterior distribution from an observed response.
///
/// Formally U: (L, q, r) ↦ L' — given the prior (read through the
/// structure), the asked item, and the subject's boolean response,
/// produce the new belief over the same family of states.
pub trait UpdatingRule<Q: Item> {
    fn update(
        &mut self,
        structure: &ProbabilisticKnowledgeStructure<Q>,
        question: &Q,
        response: bool,
    ) -> Distribution<Q>;
}

impl<Q, F> UpdatingRule<Q> for F
where
    Q: Item,
    F: FnMut(&ProbabilisticKnowledgeStructure<Q>, &Q, bool) -> Distribution<Q>,
{
    fn update(
        &mut self,
        structure: &ProbabilisticKnowledgeStructure<Q>,
        question: &Q,
        response: bool,
    ) -> Distribution<Q> {
        self(structure, question, response)
    }
}

//! Classification predicates for families of knowledge states
//!
//! Pure decision procedures over a family of subsets. The implicit
//! domain of a family is the union of its members; none of these
//! functions needs the domain passed in.
//!
//! # Theory
//!
//! - A family is **union-closed** when the union of any two of its
//!   members is again a member. Pairwise closure extends to arbitrary
//!   subfamilies by induction, so the quadratic pairwise check decides
//!   the full property without enumerating 2^n subfamilies.
//! - A family is **well-graded** when every state sits on a learning
//!   path: each non-empty state K has an item whose removal stays in
//!   the family, and each state below the full domain has an item whose
//!   addition stays in the family. The fringe condition must hold for
//!   *every* state.
//! - A family is an **antimatroid** when it is union-closed and every
//!   non-empty state K has some q ∈ K with K \ {q} in the family
//!   (axiom [MA]).
//!
//! These are predicates, not validators: they never fail, they only
//! answer. Structural requirements (∅ and the domain being present) are
//! the factory's concern, see [`crate::structure`].

use crate::state::{Item, KnowledgeState, StateFamily};

/// Union of all members of the family — its implicit domain.
pub fn family_domain<Q: Item>(family: &StateFamily<Q>) -> KnowledgeState<Q> {
    family
        .iter()
        .fold(KnowledgeState::empty(), |acc, state| acc.union(state))
}

/// Is the family closed under pairwise (hence arbitrary) unions?
///
/// The empty family is trivially union-closed.
pub fn is_union_closed<Q: Item>(family: &StateFamily<Q>) -> bool {
    for k in family {
        for l in family {
            if !family.contains(&k.union(l)) {
                return false;
            }
        }
    }
    true
}

/// Is the family well-graded?
///
/// Checks the fringe condition for every state: an immediate
/// predecessor (one item removed) unless the state is ∅, and an
/// immediate successor (one item added) unless the state is the whole
/// implicit domain.
pub fn is_well_graded<Q: Item>(family: &StateFamily<Q>) -> bool {
    let domain = family_domain(family);
    for k in family {
        let has_predecessor =
            k.is_empty() || k.iter().any(|q| family.contains(&k.without(q)));
        let has_successor = *k == domain
            || domain
                .iter()
                .filter(|q| !k.contains(q))
                .any(|q| family.contains(&k.with(q.clone())));
        if !(has_predecessor && has_successor) {
            return false;
        }
    }
    true
}

/// Is the family an antimatroid: union-closed plus axiom [MA]?
pub fn is_antimatroid<Q: Item>(family: &StateFamily<Q>) -> bool {
    if !is_union_closed(family) {
        return false;
    }
    family
        .iter()
        .filter(|k| !k.is_empty())
        .all(|k| k.iter().any(|q| family.contains(&k.without(q))))
}

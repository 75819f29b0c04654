//! Full assessment sessions over a learning space.
//!
//! The strategies here are deliberately naive — a scan questioning rule
//! and a mass-commitment updating rule — the point is the orchestration,
//! not the statistics. All masses are dyadic fractions so sums stay
//! exact.

use learnspace::assessment::{AssessmentConfig, AssessmentSession};
use learnspace::{
    Distribution, KnowledgeState, MapInitError, ProbabilisticKnowledgeStructure,
};
use rustc_hash::FxHashMap;

type State = KnowledgeState<char>;
type Pks = ProbabilisticKnowledgeStructure<char>;

fn st(items: &str) -> State {
    items.chars().collect()
}

/// The seven-state learning space over {A, B, C} with mass split
/// between ∅, {A} and {A,B}.
fn pks() -> Pks {
    let states: Vec<State> = ["", "A", "B", "AB", "AC", "BC", "ABC"]
        .iter()
        .map(|s| st(s))
        .collect();
    let mut priors = FxHashMap::default();
    priors.insert(st(""), 0.5);
    priors.insert(st("A"), 0.25);
    priors.insert(st("AB"), 0.25);
    ProbabilisticKnowledgeStructure::learning_space("ABC".chars(), states, &priors).unwrap()
}

/// Ask domain items in order, wrapping around.
fn scan_rule() -> impl FnMut(&Pks) -> char {
    let mut asked: Vec<char> = Vec::new();
    move |pks: &Pks| {
        let next = pks
            .domain()
            .iter()
            .find(|item| !asked.contains(item))
            .or_else(|| pks.domain().iter().next())
            .copied()
            .expect("domain is never empty");
        asked.push(next);
        next
    }
}

/// Keep the mass of states consistent with the response; move the
/// rest onto the full domain (after a success) or onto ∅ (after a
/// failure). Dyadic masses stay exact under this rule.
fn commit_rule(pks: &Pks, question: &char, response: bool) -> Distribution<char> {
    let sink = if response {
        pks.domain().clone()
    } else {
        KnowledgeState::empty()
    };
    let mut dropped = 0.0;
    let mut masses: FxHashMap<State, f64> = FxHashMap::default();
    for (state, mass) in pks.distribution().iter() {
        if state.contains(question) == response {
            masses.insert(state.clone(), mass);
        } else {
            dropped += mass;
        }
    }
    *masses.entry(sink).or_insert(0.0) += dropped;
    Distribution::over(pks.states(), &masses).unwrap()
}

#[test]
fn session_converges_mass_along_responses() {
    let mut session = AssessmentSession::new(pks(), scan_rule(), commit_rule);

    // step 1: "A", answered correctly — ∅ is inconsistent, its mass
    // lands on the full domain
    assert_eq!(session.next_question().unwrap(), 'A');
    session.submit_response(true).unwrap();
    let dist = session.distribution();
    assert_eq!(dist.mass(&st("")), 0.0);
    assert_eq!(dist.mass(&st("A")), 0.25);
    assert_eq!(dist.mass(&st("AB")), 0.25);
    assert_eq!(dist.mass(&st("ABC")), 0.5);

    // step 2: "B", answered incorrectly — every B-state drains to ∅
    assert_eq!(session.next_question().unwrap(), 'B');
    session.submit_response(false).unwrap();
    let dist = session.distribution();
    assert_eq!(dist.mass(&st("A")), 0.25);
    assert_eq!(dist.mass(&st("")), 0.75);
    assert_eq!(dist.total_mass(), 1.0);

    assert_eq!(session.steps(), 2);
}

#[test]
fn history_records_each_transition_with_its_prior() {
    let mut session = AssessmentSession::new(pks(), scan_rule(), commit_rule);

    let initial = session.distribution().clone();
    let q1 = session.next_question().unwrap();
    session.submit_response(true).unwrap();
    let after_first = session.distribution().clone();
    let q2 = session.next_question().unwrap();
    session.submit_response(false).unwrap();

    let history = session.history();
    assert_eq!(history.len(), 2);
    assert_eq!(history[0].question, q1);
    assert!(history[0].response);
    assert_eq!(history[0].prior, initial);
    assert_eq!(history[1].question, q2);
    assert!(!history[1].response);
    assert_eq!(history[1].prior, after_first);
}

#[test]
fn repeated_next_question_does_not_advance_the_session() {
    let mut session = AssessmentSession::new(pks(), scan_rule(), commit_rule);

    let first = session.next_question().unwrap();
    for _ in 0..3 {
        assert_eq!(session.next_question().unwrap(), first);
    }
    assert_eq!(session.steps(), 0);
    assert_eq!(session.current_question(), Some(&first));

    session.submit_response(true).unwrap();
    assert_eq!(session.current_question(), None);
    // a fresh question comes from the rule again
    assert_eq!(session.next_question().unwrap(), 'B');
}

#[test]
fn builder_surfaces_missing_rules() {
    assert_eq!(
        AssessmentSession::builder(pks()).build().unwrap_err(),
        MapInitError::MissingQuestioningRule
    );
    assert_eq!(
        AssessmentSession::builder(pks())
            .questioning_rule(scan_rule())
            .build()
            .unwrap_err(),
        MapInitError::MissingUpdatingRule
    );
}

#[test]
fn configured_session_can_skip_history() {
    let mut session = AssessmentSession::builder(pks())
        .questioning_rule(scan_rule())
        .updating_rule(commit_rule)
        .config(AssessmentConfig {
            validate_posteriors: true,
            record_history: false,
        })
        .build()
        .unwrap();

    session.next_question().unwrap();
    session.submit_response(true).unwrap();
    assert!(session.history().is_empty());
}

//! End-to-end classification: factory, queries, and the text collaborator.

use learnspace::{
    family, text, KnowledgeState, KnowledgeStructure, StructureInitError, StructureKind,
};

fn st(items: &str) -> KnowledgeState<char> {
    items.chars().collect()
}

fn fam(states: &[&str]) -> Vec<KnowledgeState<char>> {
    states.iter().map(|s| st(s)).collect()
}

#[test]
fn seven_state_family_is_a_learning_space() {
    let ks = KnowledgeStructure::classify(
        "ABC".chars(),
        fam(&["", "A", "B", "AB", "AC", "BC", "ABC"]),
    )
    .unwrap();

    assert_eq!(ks.kind(), StructureKind::LearningSpace);
    assert!(ks.is_union_closed_kind());
    assert!(ks.is_well_graded_kind());
    assert!(family::is_union_closed(ks.states()));
    assert!(family::is_well_graded(ks.states()));
    assert!(family::is_antimatroid(ks.states()));
}

#[test]
fn trivial_structure_has_exactly_the_extremes() {
    let ks = KnowledgeStructure::trivial("ABC".chars()).unwrap();

    assert_eq!(ks.states().len(), 2);
    assert!(ks.states().contains(&KnowledgeState::empty()));
    assert!(ks.states().contains(&st("ABC")));
}

#[test]
fn every_structure_carries_the_extremes_or_fails() {
    for states in [fam(&["", "A"]), fam(&["A", "AB"]), fam(&["AB"])] {
        let err = KnowledgeStructure::classify("AB".chars(), states).unwrap_err();
        assert_eq!(err, StructureInitError::MissingExtremes);
    }

    let err =
        KnowledgeStructure::classify("AB".chars(), fam(&["", "ABC", "AB"])).unwrap_err();
    assert!(matches!(err, StructureInitError::StateNotInDomain { .. }));
}

#[test]
fn reduction_collapses_twins_and_preserves_the_algebra() {
    // b, c are indistinguishable; so are e, f
    let ks = KnowledgeStructure::classify(
        "abcdef".chars(),
        fam(&[
            "", "d", "ac", "ef", "abc", "acd", "def", "abcd", "acef", "acdef", "abcdef",
        ]),
    )
    .unwrap();
    assert!(!ks.is_discriminative());

    let partition = ks.domain_partition();
    assert_eq!(partition.len(), 4);
    assert!(partition.contains(&st("ac")));
    assert!(partition.contains(&st("ef")));

    let reduced = ks
        .discriminative_reduction(|a, b| if a < b { a } else { b })
        .unwrap();
    assert!(reduced.is_discriminative());
    assert_eq!(reduced.domain().len(), 4);
    assert_eq!(reduced.states().len(), ks.states().len());
    assert_eq!(reduced.kind(), ks.kind());

    // reducing again changes nothing
    let again = reduced
        .discriminative_reduction(|a, b| if a < b { a } else { b })
        .unwrap();
    assert_eq!(again, reduced);
}

#[test]
fn text_collaborator_round_trips_through_the_factory() {
    let source = "A\nB\nA,B\nA,C\nB,C\nA,B,C";
    let ks = text::parse_structure(source).unwrap();
    assert_eq!(ks.kind(), StructureKind::LearningSpace);

    let rendered = text::render_states(&ks, "\n", ",");
    assert_eq!(text::parse_structure(&rendered).unwrap(), ks);
}

#[test]
fn serde_preserves_structure_and_classification() {
    let ks = KnowledgeStructure::classify(
        "ABC".chars(),
        fam(&["", "A", "B", "AB", "AC", "BC", "ABC"]),
    )
    .unwrap();

    let json = serde_json::to_string(&ks).unwrap();
    let back: KnowledgeStructure<char> = serde_json::from_str(&json).unwrap();
    assert_eq!(back, ks);
    assert_eq!(back.kind(), StructureKind::LearningSpace);
}

//! Property-based tests for structure classification invariants.

use std::collections::BTreeSet;

use proptest::prelude::*;

use learnspace::{family, KnowledgeState, KnowledgeStructure, StructureKind};

/// Arbitrary classified structures over a small numeric domain: a
/// random family of subsets with ∅ and the full domain always added.
fn arb_structure(max_items: u8) -> impl Strategy<Value = KnowledgeStructure<u8>> {
    (1..=max_items).prop_flat_map(|n| {
        prop::collection::vec(
            prop::collection::btree_set(0..n, 0..=(n as usize)),
            0..12,
        )
        .prop_map(move |subsets| {
            let full: KnowledgeState<u8> = (0..n).collect();
            let mut states: Vec<KnowledgeState<u8>> =
                subsets.into_iter().map(KnowledgeState::from).collect();
            states.push(KnowledgeState::empty());
            states.push(full.clone());
            KnowledgeStructure::classify(0..n, states)
                .expect("generated families satisfy the structural requirements")
        })
    })
}

proptest! {
    #[test]
    fn kind_agrees_with_the_predicates(ks in arb_structure(4)) {
        let union_closed = family::is_union_closed(ks.states());
        let well_graded = family::is_well_graded(ks.states());
        let expected = match (union_closed, well_graded) {
            (false, _) => StructureKind::Structure,
            (true, false) => StructureKind::Space,
            (true, true) => StructureKind::LearningSpace,
        };
        prop_assert_eq!(ks.kind(), expected);
    }

    #[test]
    fn domain_partition_is_a_partition(ks in arb_structure(4)) {
        let partition = ks.domain_partition();
        let sizes: usize = partition.iter().map(|part| part.len()).sum();
        let covered: BTreeSet<u8> = partition
            .iter()
            .flat_map(|part| part.iter().copied())
            .collect();

        // disjoint (sizes add up) and covering (union is the domain)
        prop_assert_eq!(sizes, ks.domain().len());
        prop_assert_eq!(
            covered,
            ks.domain().iter().copied().collect::<BTreeSet<u8>>()
        );
    }

    #[test]
    fn every_item_has_an_atom_containing_it(ks in arb_structure(4)) {
        for item in ks.domain().iter() {
            let atom = ks.atom_at(item);
            prop_assert!(atom.is_some());
            let atom = atom.unwrap();
            prop_assert!(atom.contains(item));
            // minimality: no smaller state contains the item
            for state in ks.states() {
                if state.contains(item) {
                    prop_assert!(state.len() >= atom.len());
                }
            }
        }
    }

    #[test]
    fn ordered_states_ascend_in_cardinality(ks in arb_structure(4)) {
        let ordered = ks.ordered_states();
        prop_assert_eq!(ordered.len(), ks.states().len());
        prop_assert!(ordered.windows(2).all(|w| w[0].len() <= w[1].len()));
    }

    #[test]
    fn reduction_is_discriminative_and_preserves_the_algebra(ks in arb_structure(4)) {
        let reduced = ks
            .discriminative_reduction(|a, b| if a < b { a } else { b })
            .expect("reduction of a valid structure is valid");

        prop_assert!(reduced.is_discriminative());
        prop_assert_eq!(reduced.states().len(), ks.states().len());
        prop_assert_eq!(reduced.domain().len(), ks.domain_partition().len());
        // the state bijection preserves unions both ways; gradedness can
        // only improve (collapsing a notion shortens the fringe steps)
        prop_assert_eq!(reduced.is_union_closed_kind(), ks.is_union_closed_kind());
        if ks.is_well_graded_kind() {
            prop_assert!(reduced.is_well_graded_kind());
        }
    }

    #[test]
    fn serde_round_trip_is_identity(ks in arb_structure(4)) {
        let json = serde_json::to_string(&ks).unwrap();
        let back: KnowledgeStructure<u8> = serde_json::from_str(&json).unwrap();
        prop_assert_eq!(back, ks);
    }
}

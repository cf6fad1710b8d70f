//! Property tests for the scorer's ranking guarantees.

use proptest::prelude::*;
use semgraph_catalog::{sample, GraphSnapshot};
use semgraph_core::FieldRef;
use semgraph_resolve::score_intents;

fn known_fields() -> Vec<FieldRef> {
    let snapshot = GraphSnapshot::build(&sample::quality_demo()).unwrap();
    let mut fields = Vec::new();
    for table in ["non_conformant_materials", "suppliers"] {
        fields.extend(snapshot.fields_of(table));
    }
    fields
}

fn field_subset() -> impl Strategy<Value = Vec<FieldRef>> {
    let fields = known_fields();
    proptest::sample::subsequence(fields.clone(), 0..=fields.len())
}

proptest! {
    /// Adding one more field never decreases the confidence of an
    /// intent that was already matching on the other fields, provided
    /// the new field also matches that intent.
    #[test]
    fn adding_matching_field_is_monotone(base in field_subset(), extra_index in 0usize..10) {
        let snapshot = GraphSnapshot::build(&sample::quality_demo()).unwrap();
        let all = known_fields();
        let extra = all[extra_index % all.len()].clone();
        prop_assume!(!base.contains(&extra));

        let before = score_intents(&snapshot, &base);
        let mut extended = base.clone();
        extended.push(extra.clone());
        let after = score_intents(&snapshot, &extended);

        for score in &after.ranked {
            if !score.matched_fields.contains(&extra) {
                continue;
            }
            if let Some(prior) = before.ranked.iter().find(|s| s.intent == score.intent) {
                prop_assert!(
                    score.confidence >= prior.confidence - 1e-12,
                    "{}: {} -> {}",
                    score.intent,
                    prior.confidence,
                    score.confidence
                );
            }
        }
    }

    /// Confidence always stays in (0, 1] and ranked output is sorted
    /// descending.
    #[test]
    fn confidences_are_bounded_and_sorted(fields in field_subset()) {
        let snapshot = GraphSnapshot::build(&sample::quality_demo()).unwrap();
        let report = score_intents(&snapshot, &fields);
        for pair in report.ranked.windows(2) {
            prop_assert!(pair[0].confidence >= pair[1].confidence);
        }
        for score in &report.ranked {
            prop_assert!(score.confidence > 0.0 && score.confidence <= 1.0);
            prop_assert!(!score.matched_fields.is_empty());
        }
    }

    /// Scoring is a pure function of its input.
    #[test]
    fn scoring_is_deterministic(fields in field_subset()) {
        let snapshot = GraphSnapshot::build(&sample::quality_demo()).unwrap();
        prop_assert_eq!(
            score_intents(&snapshot, &fields),
            score_intents(&snapshot, &fields)
        );
    }
}

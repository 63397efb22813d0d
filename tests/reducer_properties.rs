//! Property-based tests for reducer invariants.

use baize::context::reducer::reduce;
use baize::context::state::{ContextState, PageVisit};
use baize::context::ContextAction;
use baize::types::EngagementLevel;
use proptest::prelude::*;

/// Session duration equals the sum of visit durations, and the frequency
/// table's total count equals the number of visits, for any visit sequence.
#[test]
fn test_visit_accounting_property() {
    let mut runner = proptest::test_runner::TestRunner::default();

    runner
        .run(
            &prop::collection::vec(("[a-z]{1,8}", 0u64..10_000), 0..40),
            |visits| {
                let mut state = ContextState::default();
                for (page, duration_ms) in &visits {
                    state = reduce(
                        &state,
                        ContextAction::AddPageVisit(PageVisit {
                            page: page.clone(),
                            timestamp_ms: 0,
                            duration_ms: *duration_ms,
                        }),
                    );
                }

                let expected_duration: u64 = visits.iter().map(|(_, d)| d).sum();
                assert_eq!(state.cells.session_duration_ms, expected_duration);

                let pattern_total: u64 = state.cells.visit_patterns.values().sum();
                assert_eq!(pattern_total, visits.len() as u64);

                // One frequency entry per distinct page
                let mut distinct: Vec<&String> = visits.iter().map(|(p, _)| p).collect();
                distinct.sort_unstable();
                distinct.dedup();
                assert_eq!(state.cells.visit_patterns.len(), distinct.len());

                Ok(())
            },
        )
        .unwrap();
}

/// Priority-map values never exceed 1.0, however often interests repeat.
#[test]
fn test_priority_ratchet_clamp_property() {
    let mut runner = proptest::test_runner::TestRunner::default();

    runner
        .run(
            &prop::collection::vec(prop::collection::vec("[a-z]{1,6}", 0..5), 0..30),
            |updates| {
                let mut state = ContextState::default();
                for interests in &updates {
                    state = reduce(&state, ContextAction::UpdateInterests(interests.clone()));
                }

                for (category, weight) in &state.molecules.priority {
                    assert!(
                        (0.0..=1.0).contains(weight),
                        "weight for {} out of range: {}",
                        category,
                        weight
                    );
                }

                Ok(())
            },
        )
        .unwrap();
}

/// Coherence stays in [0,1] and is a pure function of the three inputs.
#[test]
fn test_coherence_bounds_and_determinism_property() {
    let mut runner = proptest::test_runner::TestRunner::default();

    runner
        .run(
            &(
                0usize..10,
                prop::bool::ANY,
                prop_oneof![
                    Just(EngagementLevel::Low),
                    Just(EngagementLevel::Medium),
                    Just(EngagementLevel::High),
                ],
            ),
            |(visit_count, with_interest, engagement)| {
                let build = || {
                    let mut state = ContextState::default();
                    for i in 0..visit_count {
                        state = reduce(
                            &state,
                            ContextAction::AddPageVisit(PageVisit {
                                page: format!("p{}", i),
                                timestamp_ms: 0,
                                duration_ms: 100,
                            }),
                        );
                    }
                    if with_interest {
                        state = reduce(
                            &state,
                            ContextAction::UpdateInterests(vec!["training".to_string()]),
                        );
                    }
                    reduce(&state, ContextAction::UpdateEngagement(engagement))
                };

                let a = build();
                let b = build();
                assert!((0.0..=1.0).contains(&a.fields.coherence));
                assert_eq!(a.fields.coherence, b.fields.coherence);

                let visit_term: f64 = if visit_count > 3 { 0.3 } else { 0.0 };
                let interest_term = if with_interest { 0.3 } else { 0.0 };
                let engagement_term = match engagement {
                    EngagementLevel::Low => 0.2,
                    EngagementLevel::Medium | EngagementLevel::High => 0.4,
                };
                let expected: f64 = (visit_term + interest_term + engagement_term).min(1.0);
                assert!((a.fields.coherence - expected).abs() < 1e-9);

                Ok(())
            },
        )
        .unwrap();
}

/// Applying the same interest twice saturates instead of overshooting.
#[test]
fn test_ratchet_is_idempotent_at_the_clamp() {
    let mut state = ContextState::default();
    let action = || ContextAction::UpdateInterests(vec!["products".to_string()]);

    for _ in 0..12 {
        state = reduce(&state, action());
    }
    let saturated = *state.molecules.priority.get("products").unwrap();
    assert_eq!(saturated, 1.0);

    state = reduce(&state, action());
    assert_eq!(*state.molecules.priority.get("products").unwrap(), saturated);
}

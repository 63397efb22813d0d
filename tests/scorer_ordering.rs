//! Ordering properties of the content priority scorer.

use baize::context::state::ContextState;
use baize::scoring::{rank, score_module, ContentModule, ModuleCategory};
use baize::types::{EngagementLevel, JourneyStage};
use proptest::prelude::*;

const CATEGORIES: [ModuleCategory; 6] = [
    ModuleCategory::Stores,
    ModuleCategory::Training,
    ModuleCategory::Products,
    ModuleCategory::Franchise,
    ModuleCategory::Contact,
    ModuleCategory::Booking,
];

const STAGES: [JourneyStage; 4] = [
    JourneyStage::Awareness,
    JourneyStage::Interest,
    JourneyStage::Consideration,
    JourneyStage::Decision,
];

const LEVELS: [EngagementLevel; 3] = [
    EngagementLevel::Low,
    EngagementLevel::Medium,
    EngagementLevel::High,
];

fn module(id: &str, category: ModuleCategory, base: f64) -> ContentModule {
    ContentModule {
        id: id.to_string(),
        category,
        base_priority: base,
        payload: serde_json::Value::Null,
    }
}

/// With equal base priority, the interest-matching module never ranks
/// below the non-matching one, across every stage/engagement/resonance
/// combination.
#[test]
fn test_interest_match_dominates_property() {
    let mut runner = proptest::test_runner::TestRunner::default();

    runner
        .run(
            &(0usize..4, 0usize..3, 0.0f64..=1.0, 0.0f64..=1.0),
            |(stage_idx, level_idx, resonance, base)| {
                let mut context = ContextState::default();
                context.fields.journey = STAGES[stage_idx];
                context.cells.engagement = LEVELS[level_idx];
                context.fields.resonance = resonance;
                context.molecules.interests = vec!["training".to_string()];

                let matching = module("match", ModuleCategory::Training, base);
                let other = module("other", ModuleCategory::Training, base);
                // Same category, so boosts are identical; only the
                // interest bonus differs when the interest is removed.
                let with_interest = score_module(&matching, &context);
                context.molecules.interests.clear();
                let without_interest = score_module(&other, &context);

                assert!(with_interest >= without_interest);
                Ok(())
            },
        )
        .unwrap();
}

/// Scores stay inside [0,1] for every category/stage/engagement mix.
#[test]
fn test_score_bounds_property() {
    let mut runner = proptest::test_runner::TestRunner::default();

    runner
        .run(
            &(0usize..6, 0usize..4, 0usize..3, 0.0f64..=1.0, 0.0f64..=1.0),
            |(cat_idx, stage_idx, level_idx, base, resonance)| {
                let mut context = ContextState::default();
                context.fields.journey = STAGES[stage_idx];
                context.cells.engagement = LEVELS[level_idx];
                context.fields.resonance = resonance;
                context
                    .molecules
                    .priority
                    .insert(CATEGORIES[cat_idx].as_str().to_string(), 0.9);

                let score = score_module(&module("m", CATEGORIES[cat_idx], base), &context);
                assert!((0.0..=1.0).contains(&score), "score out of range: {}", score);
                Ok(())
            },
        )
        .unwrap();
}

#[test]
fn ranking_is_descending_and_complete() {
    let mut context = ContextState::default();
    context.fields.journey = JourneyStage::Decision;
    context.cells.engagement = EngagementLevel::High;

    let modules: Vec<ContentModule> = CATEGORIES
        .iter()
        .enumerate()
        .map(|(i, c)| module(&format!("m{}", i), *c, 0.5))
        .collect();

    let ranked = rank(&modules, &context);
    assert_eq!(ranked.len(), modules.len());
    for pair in ranked.windows(2) {
        assert!(pair[0].dynamic_priority >= pair[1].dynamic_priority);
    }
}

#[test]
fn interest_match_wins_within_mixed_manifest() {
    let mut context = ContextState::default();
    context.cells.engagement = EngagementLevel::Medium;
    context.molecules.interests = vec!["franchise".to_string()];

    let modules = vec![
        module("plain", ModuleCategory::Contact, 0.5),
        module("matched", ModuleCategory::Franchise, 0.5),
    ];
    let ranked = rank(&modules, &context);
    assert_eq!(ranked[0].module.id, "matched");
}

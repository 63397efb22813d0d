//! Benchmark for the content priority scorer.

use baize::context::state::ContextState;
use baize::scoring::{rank, ContentModule, ModuleCategory};
use baize::types::{EngagementLevel, JourneyStage};
use criterion::{black_box, criterion_group, criterion_main, Criterion};

fn bench_rank(c: &mut Criterion) {
    let categories = [
        ModuleCategory::Stores,
        ModuleCategory::Training,
        ModuleCategory::Products,
        ModuleCategory::Franchise,
        ModuleCategory::Contact,
        ModuleCategory::Booking,
    ];

    let modules: Vec<ContentModule> = (0..120)
        .map(|i| ContentModule {
            id: format!("module-{}", i),
            category: categories[i % categories.len()],
            base_priority: (i % 10) as f64 / 10.0,
            payload: serde_json::Value::Null,
        })
        .collect();

    let mut context = ContextState::default();
    context.fields.journey = JourneyStage::Consideration;
    context.cells.engagement = EngagementLevel::High;
    context.fields.resonance = 0.8;
    context.molecules.interests = vec!["training".to_string(), "products".to_string()];
    context.molecules.priority.insert("training".to_string(), 0.9);
    context.molecules.priority.insert("stores".to_string(), 0.4);

    c.bench_function("rank_120_modules", |b| {
        b.iter(|| rank(black_box(&modules), black_box(&context)))
    });
}

criterion_group!(benches, bench_rank);
criterion_main!(benches);

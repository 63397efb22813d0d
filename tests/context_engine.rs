//! Integration tests for the context engine: store dispatch flow,
//! snapshot persistence, and the documented layout asymmetry.

use std::sync::Arc;

use baize::context::{ContextAction, ContextStore, PageVisit, SnapshotStore};
use baize::telemetry::now_millis;
use baize::types::{EngagementLevel, JourneyStage, LayoutMode};
use tempfile::TempDir;

fn create_test_store() -> (ContextStore, Arc<SnapshotStore>, TempDir) {
    let temp_dir = TempDir::new().unwrap();
    let db = sled::open(temp_dir.path().join("data")).unwrap();
    let snapshots = Arc::new(SnapshotStore::new(&db).unwrap());
    let store = ContextStore::open(snapshots.clone());
    (store, snapshots, temp_dir)
}

fn visit(page: &str, duration_ms: u64) -> ContextAction {
    ContextAction::AddPageVisit(PageVisit {
        page: page.to_string(),
        timestamp_ms: now_millis(),
        duration_ms,
    })
}

#[test]
fn coherence_saturates_with_visits_interests_and_high_engagement() {
    let (store, _snapshots, _dir) = create_test_store();

    for page in ["home", "stores", "training", "products"] {
        store.dispatch(visit(page, 1000));
    }
    store.dispatch(ContextAction::UpdateInterests(vec!["training".to_string()]));
    let state = store.dispatch(ContextAction::UpdateEngagement(EngagementLevel::High));

    // 0.3 (visits > 3) + 0.3 (interests) + 0.4 (high) clamped to 1
    assert_eq!(state.fields.coherence, 1.0);
}

#[test]
fn layout_expansion_survives_engagement_drop() {
    let (store, _snapshots, _dir) = create_test_store();

    store.dispatch(ContextAction::UpdateEngagement(EngagementLevel::High));
    let dropped = store.dispatch(ContextAction::UpdateEngagement(EngagementLevel::Low));

    assert_eq!(dropped.cells.engagement, EngagementLevel::Low);
    assert_eq!(dropped.organs.layout, LayoutMode::Expanded);
}

#[test]
fn full_session_round_trips_through_persistence() {
    let temp_dir = TempDir::new().unwrap();
    let db = sled::open(temp_dir.path().join("data")).unwrap();
    let snapshots = Arc::new(SnapshotStore::new(&db).unwrap());

    {
        let store = ContextStore::open(snapshots.clone());
        store.dispatch(visit("stores", 1500));
        store.dispatch(visit("training", 2500));
        store.dispatch(ContextAction::UpdateInterests(vec![
            "training".to_string(),
            "products".to_string(),
        ]));
        store.dispatch(ContextAction::UpdateJourney(JourneyStage::Consideration));
        store.dispatch(ContextAction::UpdateResonance(0.6));
    }

    let reopened = ContextStore::open(snapshots);
    let state = reopened.state();

    assert_eq!(state.visit_count(), 2);
    assert_eq!(state.cells.session_duration_ms, 4000);
    assert_eq!(state.fields.journey, JourneyStage::Consideration);
    assert_eq!(state.fields.resonance, 0.6);
    assert_eq!(*state.molecules.priority.get("training").unwrap(), 0.1);
    assert_eq!(state.cells.visit_patterns.get("stores"), Some(&1));
}

#[test]
fn subscriber_sees_recomputed_coherence() {
    let (store, _snapshots, _dir) = create_test_store();

    let observed = Arc::new(parking_lot::Mutex::new(Vec::new()));
    let sink = observed.clone();
    store.subscribe(move |state| sink.lock().push(state.fields.coherence));

    store.dispatch(ContextAction::UpdateInterests(vec!["stores".to_string()]));
    store.dispatch(ContextAction::UpdateEngagement(EngagementLevel::Medium));

    let coherences = observed.lock();
    assert_eq!(coherences.len(), 2);
    // interests (0.3) + low engagement floor (0.2)
    assert!((coherences[0] - 0.5).abs() < 1e-9);
    // interests (0.3) + medium engagement (0.4)
    assert!((coherences[1] - 0.7).abs() < 1e-9);
}

//! Pure context state transition function.
//!
//! `reduce(state, action)` returns the successor state; it never fails.
//! Every transition recomputes coherence and bumps `last_update_ms`
//! strictly, so two transitions within the same millisecond still order.

use std::collections::BTreeMap;

use crate::context::action::ContextAction;
use crate::context::coherence::coherence;
use crate::context::state::ContextState;
use crate::telemetry::now_millis;
use crate::types::{clamp01, EngagementLevel, LayoutMode};

/// Fixed ratchet step applied to a priority weight per expressed interest.
pub const INTEREST_STEP: f64 = 0.1;

/// Apply one action to the state, returning the successor.
pub fn reduce(state: &ContextState, action: ContextAction) -> ContextState {
    let mut next = state.clone();

    match action {
        ContextAction::UpdateLocation {
            location,
            nearby_stores,
        } => {
            next.atoms.location = location;
            next.molecules.nearby_stores = nearby_stores;
        }
        ContextAction::UpdateInterests(interests) => {
            for interest in &interests {
                let entry = next.molecules.priority.entry(interest.clone()).or_insert(0.0);
                *entry = clamp01(*entry + INTEREST_STEP);
            }
            next.molecules.interests = interests;
        }
        ContextAction::AddPageVisit(visit) => {
            next.cells.session_duration_ms =
                next.cells.session_duration_ms.saturating_add(visit.duration_ms);
            next.cells.visits.push(visit);
            next.cells.visit_patterns = rebuild_patterns(&next);
        }
        ContextAction::UpdateEngagement(level) => {
            next.cells.engagement = level;
            next.organs.layout = derive_layout(next.organs.layout, level);
        }
        ContextAction::SetRecommendations(recommendations) => {
            next.organs.recommendations = recommendations;
        }
        ContextAction::UpdateResonance(value) => {
            next.fields.resonance = clamp01(value);
        }
        ContextAction::UpdateJourney(stage) => {
            next.fields.journey = stage;
        }
        ContextAction::SyncState(snapshot) => {
            // Persisted history wins; atoms stay with the live session.
            next.molecules = snapshot.molecules;
            next.cells = snapshot.cells;
            next.organs = snapshot.organs;
            next.fields = snapshot.fields;
        }
    }

    next.fields.coherence = coherence(&next);
    next.last_update_ms = now_millis().max(state.last_update_ms + 1);
    next
}

/// Layout derivation from engagement.
///
/// The expansion is a one-way ratchet: once a session reaches high
/// engagement the layout stays expanded even if engagement later drops.
pub fn derive_layout(current: LayoutMode, engagement: EngagementLevel) -> LayoutMode {
    if engagement == EngagementLevel::High {
        LayoutMode::Expanded
    } else {
        current
    }
}

/// Rebuild the per-page frequency table from the visit log.
///
/// Linear in visit count; sessions are short-lived so the full scan on
/// every append stays cheap.
fn rebuild_patterns(state: &ContextState) -> BTreeMap<String, u64> {
    let mut patterns = BTreeMap::new();
    for visit in &state.cells.visits {
        *patterns.entry(visit.page.clone()).or_insert(0) += 1;
    }
    patterns
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::state::PageVisit;
    use crate::types::JourneyStage;

    fn visit(page: &str, duration_ms: u64) -> PageVisit {
        PageVisit {
            page: page.to_string(),
            timestamp_ms: now_millis(),
            duration_ms,
        }
    }

    #[test]
    fn add_page_visit_accumulates_duration_and_patterns() {
        let s0 = ContextState::default();
        let s1 = reduce(&s0, ContextAction::AddPageVisit(visit("stores", 1200)));
        let s2 = reduce(&s1, ContextAction::AddPageVisit(visit("training", 800)));
        let s3 = reduce(&s2, ContextAction::AddPageVisit(visit("stores", 500)));

        assert_eq!(s3.cells.session_duration_ms, 2500);
        assert_eq!(s3.cells.visit_patterns.get("stores"), Some(&2));
        assert_eq!(s3.cells.visit_patterns.get("training"), Some(&1));
        assert_eq!(s3.visit_count(), 3);
    }

    #[test]
    fn interests_ratchet_and_saturate() {
        let mut state = ContextState::default();
        for _ in 0..15 {
            state = reduce(
                &state,
                ContextAction::UpdateInterests(vec!["training".to_string()]),
            );
        }
        assert_eq!(*state.molecules.priority.get("training").unwrap(), 1.0);
        // Interests never decay on their own
        state = reduce(&state, ContextAction::UpdateInterests(vec![]));
        assert_eq!(*state.molecules.priority.get("training").unwrap(), 1.0);
        assert!(state.molecules.interests.is_empty());
    }

    #[test]
    fn high_engagement_expands_layout_one_way() {
        let s0 = ContextState::default();
        assert_eq!(s0.organs.layout, LayoutMode::Normal);

        let s1 = reduce(&s0, ContextAction::UpdateEngagement(EngagementLevel::High));
        assert_eq!(s1.organs.layout, LayoutMode::Expanded);

        let s2 = reduce(&s1, ContextAction::UpdateEngagement(EngagementLevel::Low));
        assert_eq!(s2.cells.engagement, EngagementLevel::Low);
        assert_eq!(s2.organs.layout, LayoutMode::Expanded);
    }

    #[test]
    fn location_update_sets_atoms_and_stores() {
        let state = reduce(
            &ContextState::default(),
            ContextAction::UpdateLocation {
                location: Some(crate::types::GeoPoint { lat: 40.7, lon: -74.0 }),
                nearby_stores: vec!["downtown".to_string(), "harbor".to_string()],
            },
        );
        assert!(state.atoms.location.is_some());
        assert_eq!(state.molecules.nearby_stores.len(), 2);
    }

    #[test]
    fn resonance_is_clamped() {
        let state = reduce(
            &ContextState::default(),
            ContextAction::UpdateResonance(3.5),
        );
        assert_eq!(state.fields.resonance, 1.0);
    }

    #[test]
    fn last_update_strictly_increases() {
        let mut state = ContextState::default();
        let mut previous = state.last_update_ms;
        for _ in 0..5 {
            state = reduce(&state, ContextAction::UpdateJourney(JourneyStage::Interest));
            assert!(state.last_update_ms > previous);
            previous = state.last_update_ms;
        }
    }

    #[test]
    fn sync_state_keeps_live_atoms() {
        let mut persisted = ContextState::default();
        persisted.molecules.interests = vec!["products".to_string()];
        persisted.cells.session_duration_ms = 9000;

        let mut live = ContextState::default();
        live.atoms.locale = "de-DE".to_string();

        let merged = reduce(&live, ContextAction::SyncState(Box::new(persisted)));
        assert_eq!(merged.atoms.locale, "de-DE");
        assert_eq!(merged.molecules.interests, vec!["products".to_string()]);
        assert_eq!(merged.cells.session_duration_ms, 9000);
    }
}

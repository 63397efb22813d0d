//! The closed set of context actions.

use crate::context::state::{ContextState, PageVisit};
use crate::types::{EngagementLevel, GeoPoint, JourneyStage};

/// One state transition request.
///
/// The set is closed by construction; the reducer is total and has no
/// "unknown action" case to ignore.
#[derive(Debug, Clone)]
pub enum ContextAction {
    /// Update session geolocation and the stores derived from it
    UpdateLocation {
        location: Option<GeoPoint>,
        nearby_stores: Vec<String>,
    },
    /// Replace the interest set and ratchet matching priority weights
    UpdateInterests(Vec<String>),
    /// Append a page visit to the behavioral log
    AddPageVisit(PageVisit),
    /// Set the engagement level; reaching high expands the layout
    UpdateEngagement(EngagementLevel),
    /// Replace the recommendation list
    SetRecommendations(Vec<String>),
    /// Set the resonance score (clamped to [0, 1])
    UpdateResonance(f64),
    /// Set the journey stage
    UpdateJourney(JourneyStage),
    /// Merge a persisted snapshot into the current state
    SyncState(Box<ContextState>),
}

//! Context state model.
//!
//! The full per-session snapshot, organized in five semantic layers:
//! atoms (session facts), molecules (derived aggregates), cells
//! (behavioral history), organs (UI-affecting derivations), and fields
//! (scalar scores). Mutated only through [`crate::context::reducer`].

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::types::{
    DeviceClass, EngagementLevel, GeoPoint, Intention, JourneyStage, LayoutMode,
};

/// Snapshot schema version; bumped on incompatible layout changes.
pub const SCHEMA_VERSION: u32 = 1;

/// Immutable record of a single page visit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageVisit {
    pub page: String,
    pub timestamp_ms: u64,
    pub duration_ms: u64,
}

/// Per-session facts that do not change after session start
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Atoms {
    pub device: DeviceClass,
    pub first_visit: bool,
    pub locale: String,
    pub location: Option<GeoPoint>,
}

impl Default for Atoms {
    fn default() -> Self {
        Self {
            device: DeviceClass::Desktop,
            first_visit: true,
            locale: "en-US".to_string(),
            location: None,
        }
    }
}

/// Derived aggregates
///
/// The priority map is keyed by content category. Its canonical in-memory
/// form is this ordered map; the wire form is a plain JSON object (see
/// [`crate::context::snapshot`]). Values are always in [0, 1].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Molecules {
    pub nearby_stores: Vec<String>,
    pub interests: Vec<String>,
    pub priority: BTreeMap<String, f64>,
}

/// Accumulated behavioral history
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Cells {
    /// Append-only page visit log
    pub visits: Vec<PageVisit>,
    /// Visit count per distinct page; rebuilt from the log on every append
    pub visit_patterns: BTreeMap<String, u64>,
    /// Sum of all visit durations this session
    pub session_duration_ms: u64,
    pub engagement: EngagementLevel,
}

/// UI-affecting derived state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Organs {
    pub recommendations: Vec<String>,
    pub layout: LayoutMode,
}

/// Scalar scores
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Fields {
    /// Affinity score in [0, 1], supplied by the caller
    pub resonance: f64,
    /// Recomputed on every transition; see [`crate::context::coherence`]
    pub coherence: f64,
    pub intention: Intention,
    pub journey: JourneyStage,
}

/// The full mutable context snapshot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContextState {
    pub atoms: Atoms,
    pub molecules: Molecules,
    pub cells: Cells,
    pub organs: Organs,
    pub fields: Fields,
    pub schema_version: u32,
    /// Strictly increasing across transitions
    pub last_update_ms: u64,
}

impl Default for ContextState {
    fn default() -> Self {
        Self {
            atoms: Atoms::default(),
            molecules: Molecules::default(),
            cells: Cells::default(),
            organs: Organs::default(),
            fields: Fields::default(),
            schema_version: SCHEMA_VERSION,
            last_update_ms: 0,
        }
    }
}

impl ContextState {
    /// Number of recorded page visits this session.
    pub fn visit_count(&self) -> usize {
        self.cells.visits.len()
    }

    /// Whether the given content category matches an inferred interest.
    pub fn has_interest(&self, category: &str) -> bool {
        self.molecules.interests.iter().any(|i| i == category)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_state_is_empty() {
        let state = ContextState::default();
        assert_eq!(state.visit_count(), 0);
        assert!(state.molecules.priority.is_empty());
        assert_eq!(state.fields.coherence, 0.0);
        assert_eq!(state.schema_version, SCHEMA_VERSION);
    }

    #[test]
    fn interest_lookup_is_exact() {
        let mut state = ContextState::default();
        state.molecules.interests = vec!["training".to_string()];
        assert!(state.has_interest("training"));
        assert!(!state.has_interest("train"));
    }
}

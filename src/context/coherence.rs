//! Session coherence scoring and engagement classification.
//!
//! Coherence is a fixed linear rule, not a learned signal: it rewards a
//! session that has visited more than a handful of pages, expressed at
//! least one interest, and shows sustained engagement.

use crate::context::state::ContextState;
use crate::types::{clamp01, EngagementLevel};

/// Visit count above which the visit term contributes.
const VISIT_THRESHOLD: usize = 3;

const VISIT_TERM: f64 = 0.3;
const INTEREST_TERM: f64 = 0.3;
const ENGAGEMENT_TERM: f64 = 0.4;

/// Compute the coherence score in [0, 1] for the given state.
pub fn coherence(state: &ContextState) -> f64 {
    let visit_term = if state.visit_count() > VISIT_THRESHOLD {
        VISIT_TERM
    } else {
        0.0
    };
    let interest_term = if state.molecules.interests.is_empty() {
        0.0
    } else {
        INTEREST_TERM
    };
    let engagement_term = ENGAGEMENT_TERM * engagement_weight(state.cells.engagement);

    clamp01(visit_term + interest_term + engagement_term)
}

fn engagement_weight(level: EngagementLevel) -> f64 {
    match level {
        EngagementLevel::Low => 0.5,
        EngagementLevel::Medium | EngagementLevel::High => 1.0,
    }
}

/// Classify engagement from accumulated behavior.
///
/// For callers that infer engagement instead of setting it directly:
/// thresholds are visit count or total dwell time, whichever trips first.
pub fn classify_engagement(visit_count: usize, session_duration_ms: u64) -> EngagementLevel {
    const MEDIUM_VISITS: usize = 3;
    const HIGH_VISITS: usize = 6;
    const MEDIUM_DWELL_MS: u64 = 2 * 60 * 1000;
    const HIGH_DWELL_MS: u64 = 5 * 60 * 1000;

    if visit_count >= HIGH_VISITS || session_duration_ms >= HIGH_DWELL_MS {
        EngagementLevel::High
    } else if visit_count >= MEDIUM_VISITS || session_duration_ms >= MEDIUM_DWELL_MS {
        EngagementLevel::Medium
    } else {
        EngagementLevel::Low
    }
}

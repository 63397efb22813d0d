//! Next-action recommendation generator.
//!
//! Pure lookup: journey stage picks the base phrases, up to two interest
//! additions follow, output is capped at three. No randomness, no state.

use crate::types::JourneyStage;

/// Maximum number of suggestions returned.
pub const RECOMMENDATION_LIMIT: usize = 3;

const INTEREST_ADDITIONS: usize = 2;

/// Build the suggestion list for the given stage and interests.
pub fn recommendations(stage: JourneyStage, interests: &[String]) -> Vec<String> {
    let mut out: Vec<String> = stage_phrases(stage)
        .iter()
        .map(|s| s.to_string())
        .collect();

    for interest in interests.iter().take(INTEREST_ADDITIONS) {
        if let Some(phrase) = interest_phrase(interest) {
            out.push(phrase.to_string());
        }
    }

    out.truncate(RECOMMENDATION_LIMIT);
    out
}

fn stage_phrases(stage: JourneyStage) -> &'static [&'static str] {
    match stage {
        JourneyStage::Awareness => &[
            "Find a showroom near you",
            "Browse this season's cue collections",
        ],
        JourneyStage::Interest => &[
            "Compare table models side by side",
            "Meet our certified coaches",
        ],
        JourneyStage::Consideration => &[
            "Book a free trial lesson",
            "Ask about financing options",
        ],
        JourneyStage::Decision => &[
            "Reserve your table today",
            "Talk to a franchise advisor",
        ],
    }
}

fn interest_phrase(interest: &str) -> Option<&'static str> {
    match interest {
        "stores" => Some("See what's in stock at your nearest store"),
        "training" => Some("View the full coaching schedule"),
        "products" => Some("Explore professional-grade cues and cloth"),
        "franchise" => Some("Download the franchise starter pack"),
        "booking" => Some("Pick a time slot for your next session"),
        "contact" => Some("Chat with our equipment specialists"),
        _ => None,
    }
}

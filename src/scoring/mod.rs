//! Content priority scoring.
//!
//! Selects the presentation order of the site's content modules from the
//! current context: interest match, stored priority weights, journey-stage
//! boost, engagement bucket adjustment, and a resonance multiplier, all
//! folded into one dynamic priority per module. Scoring is referential:
//! the full list is re-ranked after every relevant context change.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::context::state::ContextState;
use crate::types::{clamp01, EngagementLevel, JourneyStage};

/// Flat bonus when a module's category matches an expressed interest.
const INTEREST_BONUS: f64 = 0.3;
/// Blend factor between the running priority and the stored weight.
const PRIORITY_BLEND: f64 = 0.5;
/// Magnitude of the engagement bucket adjustment.
const ENGAGEMENT_ADJUST: f64 = 0.2;
/// Scale of the resonance multiplier.
const RESONANCE_SCALE: f64 = 0.1;

/// Content category of a module; doubles as the priority-map key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModuleCategory {
    Stores,
    Training,
    Products,
    Franchise,
    Contact,
    Booking,
}

impl ModuleCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            ModuleCategory::Stores => "stores",
            ModuleCategory::Training => "training",
            ModuleCategory::Products => "products",
            ModuleCategory::Franchise => "franchise",
            ModuleCategory::Contact => "contact",
            ModuleCategory::Booking => "booking",
        }
    }

    /// Deep content rewards an engaged visitor; onboarding content eases a
    /// new one in. Every category belongs to exactly one bucket.
    fn is_deep(&self) -> bool {
        matches!(
            self,
            ModuleCategory::Training | ModuleCategory::Franchise | ModuleCategory::Products
        )
    }
}

impl fmt::Display for ModuleCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ModuleCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "stores" => Ok(ModuleCategory::Stores),
            "training" => Ok(ModuleCategory::Training),
            "products" => Ok(ModuleCategory::Products),
            "franchise" => Ok(ModuleCategory::Franchise),
            "contact" => Ok(ModuleCategory::Contact),
            "booking" => Ok(ModuleCategory::Booking),
            other => Err(format!("unknown module category: {}", other)),
        }
    }
}

/// Static descriptor of a content module, supplied by the presentation
/// layer; the engine does not own these.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContentModule {
    pub id: String,
    pub category: ModuleCategory,
    /// Author-assigned starting priority in [0, 1]
    pub base_priority: f64,
    /// Opaque payload passed through to the renderer
    #[serde(default)]
    pub payload: serde_json::Value,
}

/// A module with its computed dynamic priority.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RankedModule {
    pub module: ContentModule,
    pub dynamic_priority: f64,
}

/// Score a single module against the context.
///
/// The result is clamped to [0, 1]; the floor at zero is deliberate, a
/// weight below zero carries no more meaning than "last".
pub fn score_module(module: &ContentModule, context: &ContextState) -> f64 {
    let category = module.category.as_str();
    let mut priority = module.base_priority;

    if context.has_interest(category) {
        priority += INTEREST_BONUS;
    }

    if let Some(mapped) = context.molecules.priority.get(category) {
        priority = PRIORITY_BLEND * priority + (1.0 - PRIORITY_BLEND) * mapped;
    }

    priority += journey_boost(context.fields.journey, module.category);
    priority += engagement_adjustment(context.cells.engagement, module.category);
    priority *= 1.0 + RESONANCE_SCALE * context.fields.resonance;

    clamp01(priority)
}

/// Rank modules descending by dynamic priority.
///
/// `sort_by` is stable, so equal scores keep their input order.
pub fn rank(modules: &[ContentModule], context: &ContextState) -> Vec<RankedModule> {
    let mut ranked: Vec<RankedModule> = modules
        .iter()
        .map(|module| RankedModule {
            dynamic_priority: score_module(module, context),
            module: module.clone(),
        })
        .collect();

    ranked.sort_by(|a, b| {
        b.dynamic_priority
            .partial_cmp(&a.dynamic_priority)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    ranked
}

/// Journey-stage boost table: stage × category → additive bonus in [0, 0.3].
///
/// Early stages favor orientation content, late stages favor commitment
/// content. The table is fixed; it is the site's editorial judgment, not a
/// learned model.
fn journey_boost(stage: JourneyStage, category: ModuleCategory) -> f64 {
    use JourneyStage::*;
    use ModuleCategory::*;

    match (stage, category) {
        (Awareness, Stores) => 0.20,
        (Awareness, Training) => 0.10,
        (Awareness, Products) => 0.15,
        (Awareness, Franchise) => 0.00,
        (Awareness, Contact) => 0.05,
        (Awareness, Booking) => 0.00,

        (Interest, Stores) => 0.15,
        (Interest, Training) => 0.20,
        (Interest, Products) => 0.20,
        (Interest, Franchise) => 0.05,
        (Interest, Contact) => 0.05,
        (Interest, Booking) => 0.10,

        (Consideration, Stores) => 0.10,
        (Consideration, Training) => 0.15,
        (Consideration, Products) => 0.25,
        (Consideration, Franchise) => 0.15,
        (Consideration, Contact) => 0.10,
        (Consideration, Booking) => 0.15,

        (Decision, Stores) => 0.05,
        (Decision, Training) => 0.10,
        (Decision, Products) => 0.20,
        (Decision, Franchise) => 0.20,
        (Decision, Contact) => 0.20,
        (Decision, Booking) => 0.30,
    }
}

fn engagement_adjustment(level: EngagementLevel, category: ModuleCategory) -> f64 {
    match level {
        EngagementLevel::High => {
            if category.is_deep() {
                ENGAGEMENT_ADJUST
            } else {
                -ENGAGEMENT_ADJUST
            }
        }
        EngagementLevel::Low => {
            if category.is_deep() {
                -ENGAGEMENT_ADJUST
            } else {
                ENGAGEMENT_ADJUST
            }
        }
        EngagementLevel::Medium => 0.0,
    }
}

/// The site's default module manifest, used by the CLI when no manifest
/// file is supplied.
pub fn default_modules() -> Vec<ContentModule> {
    let manifest = [
        ("hero-stores", ModuleCategory::Stores, 0.8),
        ("training-programs", ModuleCategory::Training, 0.7),
        ("featured-products", ModuleCategory::Products, 0.75),
        ("franchise-pitch", ModuleCategory::Franchise, 0.4),
        ("contact-banner", ModuleCategory::Contact, 0.5),
        ("booking-callout", ModuleCategory::Booking, 0.6),
    ];
    manifest
        .into_iter()
        .map(|(id, category, base_priority)| ContentModule {
            id: id.to_string(),
            category,
            base_priority,
            payload: serde_json::Value::Null,
        })
        .collect()
}

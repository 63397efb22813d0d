//! Shared domain types.
//!
//! Enumerations used across the context engine, scorer, and CLI. All of
//! them serialize as lowercase strings so persisted snapshots stay
//! readable as plain JSON.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Coarse device classification for the current session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum DeviceClass {
    #[default]
    Desktop,
    Mobile,
    Tablet,
}

/// Engagement level accumulated over a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum EngagementLevel {
    #[default]
    Low,
    Medium,
    High,
}

/// Visitor journey stage, ordered from first touch to purchase intent
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum JourneyStage {
    #[default]
    Awareness,
    Interest,
    Consideration,
    Decision,
}

/// Inferred visitor intention
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Intention {
    #[default]
    Browsing,
    Researching,
    Purchasing,
    Booking,
}

/// Adaptive layout mode derived from engagement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LayoutMode {
    #[default]
    Normal,
    Expanded,
}

/// Geographic coordinates reported by the session
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lon: f64,
}

macro_rules! lowercase_str_enum {
    ($ty:ident { $($variant:ident => $text:literal),+ $(,)? }) => {
        impl $ty {
            pub fn as_str(&self) -> &'static str {
                match self {
                    $( $ty::$variant => $text, )+
                }
            }
        }

        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $ty {
            type Err = String;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s.to_ascii_lowercase().as_str() {
                    $( $text => Ok($ty::$variant), )+
                    other => Err(format!(
                        concat!("unknown ", stringify!($ty), ": {}"),
                        other
                    )),
                }
            }
        }
    };
}

lowercase_str_enum!(DeviceClass {
    Desktop => "desktop",
    Mobile => "mobile",
    Tablet => "tablet",
});

lowercase_str_enum!(EngagementLevel {
    Low => "low",
    Medium => "medium",
    High => "high",
});

lowercase_str_enum!(JourneyStage {
    Awareness => "awareness",
    Interest => "interest",
    Consideration => "consideration",
    Decision => "decision",
});

lowercase_str_enum!(Intention {
    Browsing => "browsing",
    Researching => "researching",
    Purchasing => "purchasing",
    Booking => "booking",
});

lowercase_str_enum!(LayoutMode {
    Normal => "normal",
    Expanded => "expanded",
});

/// Clamp a score or weight to the [0, 1] interval.
///
/// NaN collapses to 0 so corrupted snapshots can never poison downstream
/// arithmetic.
pub fn clamp01(value: f64) -> f64 {
    if value.is_nan() {
        return 0.0;
    }
    value.clamp(0.0, 1.0)
}

//! Booking request and queued-record types.

use serde::{Deserialize, Serialize};

use crate::telemetry::new_booking_id;

/// User-supplied booking details.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookingRequest {
    pub name: String,
    pub phone: String,
    /// ISO date, e.g. "2026-09-01"
    pub date: String,
    /// Wall-clock time slot, e.g. "18:30"
    pub time: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub store_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coach_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// A booking as stored in the durable queue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookingRecord {
    /// Generated identifier; doubles as the delivery idempotency key
    pub id: String,
    #[serde(flatten)]
    pub request: BookingRequest,
    pub synced: bool,
    pub created_at_ms: u64,
}

impl BookingRecord {
    /// Build an unsynced record with a fresh id.
    pub fn new(request: BookingRequest, created_at_ms: u64) -> Self {
        let payload = serde_json::to_vec(&request).unwrap_or_default();
        Self {
            id: new_booking_id(&payload),
            request,
            synced: false,
            created_at_ms,
        }
    }
}

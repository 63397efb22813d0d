//! Shared telemetry helpers: timestamps and identifier generation.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

static ID_COUNTER: AtomicU64 = AtomicU64::new(1);

/// Current time as milliseconds since Unix epoch.
pub fn now_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

/// Generate a unique booking identifier.
///
/// The id doubles as the client-side idempotency key sent with every
/// delivery attempt, so it must be unique per queued item even when two
/// bookings carry identical payloads. Timestamp, process id, and a
/// process-wide counter are folded into the digest to guarantee that.
pub fn new_booking_id(payload: &[u8]) -> String {
    let ts = now_millis();
    let pid = std::process::id();
    let seq = ID_COUNTER.fetch_add(1, Ordering::Relaxed);

    let mut hasher = blake3::Hasher::new();
    hasher.update(payload);
    hasher.update(&ts.to_le_bytes());
    hasher.update(&pid.to_le_bytes());
    hasher.update(&seq.to_le_bytes());
    let digest = hasher.finalize();

    format!("bk-{}", hex::encode(&digest.as_bytes()[..16]))
}

/// Generate a stable content-entry identifier from its dotted key.
pub fn content_id(key: &str) -> String {
    let digest = blake3::hash(key.as_bytes());
    format!("cnt-{}", hex::encode(&digest.as_bytes()[..8]))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn booking_ids_are_unique_for_identical_payloads() {
        let a = new_booking_id(b"same");
        let b = new_booking_id(b"same");
        assert_ne!(a, b);
        assert!(a.starts_with("bk-"));
    }

    #[test]
    fn content_ids_are_stable() {
        assert_eq!(content_id("home.hero.title"), content_id("home.hero.title"));
        assert_ne!(content_id("home.hero.title"), content_id("home.hero.subtitle"));
    }
}

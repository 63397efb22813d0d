//! Offline booking queue: durable records, pluggable delivery transport,
//! and at-least-once sync with per-record idempotency keys.

pub mod queue;
pub mod record;
pub mod transport;

pub use queue::{BookingQueue, SubmitOutcome, SyncReport, BOOKING_ENDPOINT_LABEL};
pub use record::{BookingRecord, BookingRequest};
pub use transport::{BookingTransport, HttpBookingTransport};

//! Durable offline booking queue.
//!
//! `submit` tries a direct delivery and falls back to queuing; `sync`
//! drains the pending index sequentially with continue-on-error semantics.
//! Delivery is at-least-once: a lost acknowledgement after a successful
//! server write redelivers, and the per-record idempotency key is what
//! lets the server deduplicate.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Instant;

use sled::Db;
use tracing::{debug, info, warn};

use crate::booking::record::{BookingRecord, BookingRequest};
use crate::booking::transport::BookingTransport;
use crate::error::{EngineError, StorageError};
use crate::perf::PerfMonitor;
use crate::storage::{to_storage_data, to_storage_io, TREE_BOOKINGS, TREE_BOOKINGS_PENDING};
use crate::telemetry::now_millis;

/// Endpoint label under which delivery timings are recorded.
pub const BOOKING_ENDPOINT_LABEL: &str = "POST /api/bookings";

const PENDING_KEY_PAD: usize = 20;

/// In-process tie-breaker so two bookings queued within the same
/// millisecond still replay in submission order.
static ENQUEUE_SEQ: AtomicU64 = AtomicU64::new(1);

/// Outcome of a submit call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitOutcome {
    /// Idempotency key of the booking (generated even for direct sends)
    pub id: String,
    /// True when the booking was queued instead of delivered
    pub offline: bool,
}

/// Outcome of a sync pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SyncReport {
    pub attempted: usize,
    pub delivered: usize,
    pub failed: usize,
}

pub struct BookingQueue {
    bookings: sled::Tree,
    pending: sled::Tree,
    transport: Arc<dyn BookingTransport>,
    perf: Arc<PerfMonitor>,
}

impl BookingQueue {
    pub fn new(
        db: &Db,
        transport: Arc<dyn BookingTransport>,
        perf: Arc<PerfMonitor>,
    ) -> Result<Self, StorageError> {
        let bookings = db.open_tree(TREE_BOOKINGS).map_err(to_storage_io)?;
        let pending = db.open_tree(TREE_BOOKINGS_PENDING).map_err(to_storage_io)?;
        Ok(Self {
            bookings,
            pending,
            transport,
            perf,
        })
    }

    /// Submit a booking: deliver directly when possible, queue otherwise.
    pub async fn submit(&self, request: BookingRequest) -> Result<SubmitOutcome, EngineError> {
        let record = BookingRecord::new(request, now_millis());

        match self.deliver_timed(&record).await {
            Ok(()) => {
                debug!(id = %record.id, "Booking delivered directly");
                Ok(SubmitOutcome {
                    id: record.id,
                    offline: false,
                })
            }
            Err(err) => {
                info!(id = %record.id, "Direct delivery failed, queuing booking: {}", err);
                self.enqueue(&record)?;
                Ok(SubmitOutcome {
                    id: record.id,
                    offline: true,
                })
            }
        }
    }

    /// Replay all pending bookings, sequentially, in creation order.
    ///
    /// A failed delivery leaves its record unsynced and the loop moves on;
    /// the report carries the tally.
    pub async fn sync(&self) -> Result<SyncReport, EngineError> {
        let mut report = SyncReport::default();

        for (key, mut record) in self.pending_with_keys()? {
            report.attempted += 1;
            match self.deliver_timed(&record).await {
                Ok(()) => {
                    record.synced = true;
                    self.put_record(&record)?;
                    self.pending.remove(key).map_err(to_storage_io)?;
                    report.delivered += 1;
                    debug!(id = %record.id, "Queued booking delivered");
                }
                Err(err) => {
                    report.failed += 1;
                    warn!(id = %record.id, "Sync delivery failed, keeping booking queued: {}", err);
                }
            }
        }

        self.bookings.flush().map_err(to_storage_io)?;
        self.pending.flush().map_err(to_storage_io)?;
        info!(
            attempted = report.attempted,
            delivered = report.delivered,
            failed = report.failed,
            "Booking sync pass finished"
        );
        Ok(report)
    }

    /// All queued-unsynced bookings in creation order.
    pub fn pending(&self) -> Result<Vec<BookingRecord>, StorageError> {
        Ok(self
            .pending_with_keys()?
            .into_iter()
            .map(|(_, record)| record)
            .collect())
    }

    fn pending_with_keys(&self) -> Result<Vec<(sled::IVec, BookingRecord)>, StorageError> {
        let mut out = Vec::new();
        for item in self.pending.iter() {
            let (key, id) = item.map_err(to_storage_io)?;
            let id = String::from_utf8_lossy(&id).to_string();
            match self.get(&id)? {
                Some(record) if !record.synced => out.push((key, record)),
                Some(_) => {}
                None => warn!(id = %id, "Pending index points at a missing booking"),
            }
        }
        Ok(out)
    }

    /// Look up one booking by id.
    pub fn get(&self, id: &str) -> Result<Option<BookingRecord>, StorageError> {
        let Some(raw) = self.bookings.get(id.as_bytes()).map_err(to_storage_io)? else {
            return Ok(None);
        };
        let record = serde_json::from_slice(&raw).map_err(to_storage_data)?;
        Ok(Some(record))
    }

    fn enqueue(&self, record: &BookingRecord) -> Result<(), StorageError> {
        let seq = ENQUEUE_SEQ.fetch_add(1, Ordering::Relaxed);
        self.put_record(record)?;
        self.pending
            .insert(pending_key(record, seq), record.id.as_bytes())
            .map_err(to_storage_io)?;
        self.bookings.flush().map_err(to_storage_io)?;
        self.pending.flush().map_err(to_storage_io)?;
        Ok(())
    }

    fn put_record(&self, record: &BookingRecord) -> Result<(), StorageError> {
        let value = serde_json::to_vec(record).map_err(to_storage_data)?;
        self.bookings
            .insert(record.id.as_bytes(), value)
            .map_err(to_storage_io)?;
        Ok(())
    }

    async fn deliver_timed(&self, record: &BookingRecord) -> Result<(), crate::error::TransportError> {
        let started = Instant::now();
        let result = self.transport.deliver(record).await;
        self.perf.record(
            BOOKING_ENDPOINT_LABEL,
            started.elapsed().as_millis() as u64,
            result.is_ok(),
        );
        result
    }
}

/// Pending-index key: zero-padded creation time, then the in-process
/// sequence, then id. Iteration order is creation order, with the
/// sequence breaking same-millisecond ties.
fn pending_key(record: &BookingRecord, seq: u64) -> Vec<u8> {
    format!(
        "{:0width$}:{:010}:{}",
        record.created_at_ms,
        seq,
        record.id,
        width = PENDING_KEY_PAD
    )
    .into_bytes()
}

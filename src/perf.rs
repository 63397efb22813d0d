//! In-memory API performance monitor.
//!
//! A bounded ring buffer of call samples with per-endpoint aggregates.
//! Oldest samples fall off at capacity; nothing is persisted.

use parking_lot::Mutex;
use serde::Serialize;
use std::collections::{BTreeMap, VecDeque};

/// Default sample capacity.
pub const DEFAULT_CAPACITY: usize = 512;

#[derive(Debug, Clone, Serialize)]
pub struct PerfSample {
    pub endpoint: String,
    pub duration_ms: u64,
    pub ok: bool,
    pub timestamp_ms: u64,
}

/// Aggregate statistics for one endpoint.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct EndpointStats {
    pub endpoint: String,
    pub count: usize,
    pub errors: usize,
    pub mean_ms: f64,
    pub p50_ms: u64,
    pub p95_ms: u64,
    pub p99_ms: u64,
}

pub struct PerfMonitor {
    samples: Mutex<VecDeque<PerfSample>>,
    capacity: usize,
}

impl PerfMonitor {
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            samples: Mutex::new(VecDeque::with_capacity(capacity)),
            capacity,
        }
    }

    /// Record one call sample, evicting the oldest at capacity.
    pub fn record(&self, endpoint: &str, duration_ms: u64, ok: bool) {
        let mut samples = self.samples.lock();
        if samples.len() == self.capacity {
            samples.pop_front();
        }
        samples.push_back(PerfSample {
            endpoint: endpoint.to_string(),
            duration_ms,
            ok,
            timestamp_ms: crate::telemetry::now_millis(),
        });
    }

    /// Number of samples currently held.
    pub fn len(&self) -> usize {
        self.samples.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.lock().is_empty()
    }

    /// Per-endpoint aggregates over the current window, sorted by endpoint.
    pub fn report(&self) -> Vec<EndpointStats> {
        let samples = self.samples.lock();
        let mut grouped: BTreeMap<&str, Vec<&PerfSample>> = BTreeMap::new();
        for sample in samples.iter() {
            grouped.entry(&sample.endpoint).or_default().push(sample);
        }

        grouped
            .into_iter()
            .map(|(endpoint, group)| {
                let mut durations: Vec<u64> = group.iter().map(|s| s.duration_ms).collect();
                durations.sort_unstable();
                let count = durations.len();
                let errors = group.iter().filter(|s| !s.ok).count();
                let total: u64 = durations.iter().sum();
                EndpointStats {
                    endpoint: endpoint.to_string(),
                    count,
                    errors,
                    mean_ms: total as f64 / count as f64,
                    p50_ms: percentile(&durations, 0.50),
                    p95_ms: percentile(&durations, 0.95),
                    p99_ms: percentile(&durations, 0.99),
                }
            })
            .collect()
    }
}

impl Default for PerfMonitor {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

/// Nearest-rank percentile over an ascending-sorted slice.
fn percentile(sorted: &[u64], q: f64) -> u64 {
    if sorted.is_empty() {
        return 0;
    }
    let rank = (q * sorted.len() as f64).ceil() as usize;
    sorted[rank.clamp(1, sorted.len()) - 1]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn percentile_nearest_rank() {
        let sorted: Vec<u64> = (1..=100).collect();
        assert_eq!(percentile(&sorted, 0.50), 50);
        assert_eq!(percentile(&sorted, 0.95), 95);
        assert_eq!(percentile(&sorted, 0.99), 99);
        assert_eq!(percentile(&[7], 0.99), 7);
        assert_eq!(percentile(&[], 0.5), 0);
    }

    #[test]
    fn report_groups_by_endpoint() {
        let monitor = PerfMonitor::new(16);
        monitor.record("GET /api/stores", 10, true);
        monitor.record("GET /api/stores", 30, true);
        monitor.record("POST /api/bookings", 100, false);

        let report = monitor.report();
        assert_eq!(report.len(), 2);

        let bookings = &report[1];
        assert_eq!(bookings.endpoint, "POST /api/bookings");
        assert_eq!(bookings.errors, 1);

        let stores = &report[0];
        assert_eq!(stores.count, 2);
        assert_eq!(stores.mean_ms, 20.0);
        assert_eq!(stores.p50_ms, 10);
    }

    #[test]
    fn buffer_is_bounded() {
        let monitor = PerfMonitor::new(3);
        for i in 0..10 {
            monitor.record("e", i, true);
        }
        assert_eq!(monitor.len(), 3);
        let report = monitor.report();
        // Only the three newest samples remain
        assert_eq!(report[0].p50_ms, 8);
    }
}

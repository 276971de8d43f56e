use crate::db::aggregate::AggregateKind;
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};

///
/// MetricsEvent
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum MetricsEvent {
    Insert,
    Scan { rows_scanned: u64 },
    Delete,
    DeleteMiss,
    Aggregate { kind: AggregateKind },
    AggregateEmpty { kind: AggregateKind },
}

///
/// TableMetrics
///
/// Ephemeral, in-memory operation counters for one table.
/// Counters are atomic so shared readers can record scans; they saturate
/// instead of wrapping.
///

#[derive(Debug, Default)]
pub struct TableMetrics {
    inserts: AtomicU64,
    deletes: AtomicU64,
    delete_misses: AtomicU64,
    scans: AtomicU64,
    rows_scanned: AtomicU64,
    sum_calls: AtomicU64,
    average_calls: AtomicU64,
    minimum_calls: AtomicU64,
    maximum_calls: AtomicU64,
    count_calls: AtomicU64,
    empty_aggregates: AtomicU64,
}

impl TableMetrics {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&self, event: MetricsEvent) {
        match event {
            MetricsEvent::Insert => add(&self.inserts, 1),
            MetricsEvent::Scan { rows_scanned } => {
                add(&self.scans, 1);
                add(&self.rows_scanned, rows_scanned);
            }
            MetricsEvent::Delete => add(&self.deletes, 1),
            MetricsEvent::DeleteMiss => add(&self.delete_misses, 1),
            MetricsEvent::Aggregate { kind } => add(self.aggregate_counter(kind), 1),
            MetricsEvent::AggregateEmpty { kind } => {
                add(self.aggregate_counter(kind), 1);
                add(&self.empty_aggregates, 1);
            }
        }
    }

    const fn aggregate_counter(&self, kind: AggregateKind) -> &AtomicU64 {
        match kind {
            AggregateKind::Sum => &self.sum_calls,
            AggregateKind::Average => &self.average_calls,
            AggregateKind::Minimum => &self.minimum_calls,
            AggregateKind::Maximum => &self.maximum_calls,
            AggregateKind::Count => &self.count_calls,
        }
    }

    #[must_use]
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            inserts: load(&self.inserts),
            deletes: load(&self.deletes),
            delete_misses: load(&self.delete_misses),
            scans: load(&self.scans),
            rows_scanned: load(&self.rows_scanned),
            aggregates: AggregateCounters {
                sum: load(&self.sum_calls),
                average: load(&self.average_calls),
                minimum: load(&self.minimum_calls),
                maximum: load(&self.maximum_calls),
                count: load(&self.count_calls),
                empty: load(&self.empty_aggregates),
            },
        }
    }

    /// Reset all counters (useful in tests).
    pub fn reset(&self) {
        for counter in [
            &self.inserts,
            &self.deletes,
            &self.delete_misses,
            &self.scans,
            &self.rows_scanned,
            &self.sum_calls,
            &self.average_calls,
            &self.minimum_calls,
            &self.maximum_calls,
            &self.count_calls,
            &self.empty_aggregates,
        ] {
            counter.store(0, Ordering::Relaxed);
        }
    }
}

fn add(counter: &AtomicU64, n: u64) {
    // fetch_update only fails when the closure returns None
    let _ = counter.fetch_update(Ordering::Relaxed, Ordering::Relaxed, |v| {
        Some(v.saturating_add(n))
    });
}

fn load(counter: &AtomicU64) -> u64 {
    counter.load(Ordering::Relaxed)
}

///
/// MetricsSnapshot
/// Point-in-time copy of a table's counters.
///

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct MetricsSnapshot {
    pub inserts: u64,
    pub deletes: u64,
    pub delete_misses: u64,
    pub scans: u64,
    pub rows_scanned: u64,
    pub aggregates: AggregateCounters,
}

///
/// AggregateCounters
///

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct AggregateCounters {
    pub sum: u64,
    pub average: u64,
    pub minimum: u64,
    pub maximum: u64,
    pub count: u64,

    // calls that failed on an empty table
    pub empty: u64,
}

///
/// TESTS
///

//! Module: table
//! Responsibility: the ordered employee table and its insert/select/delete paths.
//! Does not own: aggregate arithmetic (see `db::aggregate`) or locking (see `db::shared`).
//! Boundary: single-threaded engine; every call runs to completion.
//!
//! Invariants:
//! - Rows are kept in insertion order.
//! - Deleting a row never renumbers or reorders the survivors.
//! - Select-by-name returns every match; delete-by-name removes only the first.

#[cfg(test)]
mod tests;

use crate::{
    ConfigError, EngineConfig,
    db::{
        identity::IdGenerator,
        record::{Record, RecordId, Salary},
        response::Rows,
    },
    error::{LookupKey, TableError},
    obs::{MetricsEvent, MetricsSnapshot, TableMetrics},
};
use std::fmt::{self, Write as _};

const RULE: &str = "----------------------------------------------------------";
const HEADER: &str = "EID\tEname\t\tEaddress\t\tEsalary";

///
/// Table
///
/// In-memory employee table.
/// Owns its rows and its identity counter; nothing outside holds
/// references into it across calls.
///

#[derive(Debug)]
pub struct Table {
    name: String,
    rows: Vec<Record>,
    ids: IdGenerator,
    debug: bool,
    metrics: Option<TableMetrics>,
}

impl Default for Table {
    fn default() -> Self {
        Self::new()
    }
}

impl Table {
    /// Create an empty table with the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(EngineConfig::default())
    }

    /// Validate `config`, then create an empty table from it.
    pub fn try_with_config(config: EngineConfig) -> Result<Self, ConfigError> {
        config.validate()?;

        Ok(Self::with_config(config))
    }

    // Callers outside the crate go through `try_with_config`.
    #[must_use]
    pub(crate) fn with_config(config: EngineConfig) -> Self {
        tracing::info!(table = %config.table, "table engine started");

        Self {
            name: config.table,
            rows: Vec::new(),
            ids: IdGenerator::new(),
            debug: config.debug,
            metrics: config.metrics.then(TableMetrics::new),
        }
    }

    /// Tear the table down, dropping every row.
    /// Returns how many rows were released.
    pub fn close(self) -> usize {
        let released = self.rows.len();
        tracing::info!(table = %self.name, released, "deallocating all table resources");

        released
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Identity the next inserted record will receive.
    #[must_use]
    pub const fn next_identity(&self) -> RecordId {
        self.ids.peek()
    }

    /// Counter snapshot, or `None` when metrics are disabled.
    #[must_use]
    pub fn metrics(&self) -> Option<MetricsSnapshot> {
        self.metrics.as_ref().map(TableMetrics::snapshot)
    }

    /// Zero every counter. No-op when metrics are disabled.
    pub fn reset_metrics(&self) {
        if let Some(metrics) = &self.metrics {
            metrics.reset();
        }
    }

    pub(crate) fn record_event(&self, event: MetricsEvent) {
        if let Some(metrics) = &self.metrics {
            metrics.record(event);
        }
    }

    fn debug_log(&self, args: fmt::Arguments<'_>) {
        if self.debug {
            tracing::debug!(table = %self.name, "{args}");
        }
    }

    // ─────────────────────────────────────────────
    // Insert
    // ─────────────────────────────────────────────

    /// Append a new record and return it.
    pub fn insert(
        &mut self,
        name: impl Into<String>,
        address: impl Into<String>,
        salary: Salary,
    ) -> &Record {
        let record = Record::create(&mut self.ids, name, address, salary);
        self.debug_log(format_args!("insert {record}"));
        self.record_event(MetricsEvent::Insert);

        let index = self.rows.len();
        self.rows.push(record);

        &self.rows[index]
    }

    // ─────────────────────────────────────────────
    // Select
    // ─────────────────────────────────────────────

    /// Every record in insertion order.
    /// Each call reflects the table as it is at that moment.
    pub fn select_all(&self) -> impl ExactSizeIterator<Item = &Record> {
        self.record_event(MetricsEvent::Scan {
            rows_scanned: self.rows.len() as u64,
        });

        self.rows.iter()
    }

    /// The record with identity `id`, if present.
    #[must_use]
    pub fn select_by_identity(&self, id: RecordId) -> Option<&Record> {
        let position = self.position_of(|record| record.id() == id);
        let scanned = position.map_or(self.rows.len(), |pos| pos + 1);
        self.record_event(MetricsEvent::Scan {
            rows_scanned: scanned as u64,
        });

        position.map(|pos| &self.rows[pos])
    }

    /// Every record whose name is exactly `name` (case-sensitive).
    #[must_use]
    pub fn select_by_name(&self, name: &str) -> Rows<'_> {
        self.record_event(MetricsEvent::Scan {
            rows_scanned: self.rows.len() as u64,
        });

        Rows::new(
            self.rows
                .iter()
                .filter(|record| record.name() == name)
                .collect(),
        )
    }

    // ─────────────────────────────────────────────
    // Delete
    // ─────────────────────────────────────────────

    /// Remove the record with identity `id` and return it.
    pub fn delete_by_identity(&mut self, id: RecordId) -> Result<Record, TableError> {
        let position = self.position_of(|record| record.id() == id);

        self.remove_at(position, LookupKey::Identity(id))
    }

    /// Remove the first record named `name` and return it.
    /// Later records with the same name stay in the table.
    pub fn delete_by_name(&mut self, name: &str) -> Result<Record, TableError> {
        let position = self.position_of(|record| record.name() == name);

        self.remove_at(position, LookupKey::Name(name.to_string()))
    }

    fn position_of(&self, matches: impl Fn(&Record) -> bool) -> Option<usize> {
        self.rows.iter().position(matches)
    }

    fn remove_at(&mut self, position: Option<usize>, key: LookupKey) -> Result<Record, TableError> {
        let Some(position) = position else {
            let err = TableError::not_found(&self.name, key);
            tracing::warn!(
                table = %self.name,
                error = %err.display_with_class(),
                "unable to delete: record not present"
            );
            self.record_event(MetricsEvent::DeleteMiss);

            return Err(err);
        };

        // Vec::remove shifts the tail down, keeping survivor order
        let removed = self.rows.remove(position);
        self.debug_log(format_args!("delete {removed}"));
        self.record_event(MetricsEvent::Delete);

        Ok(removed)
    }

    // ─────────────────────────────────────────────
    // Render
    // ─────────────────────────────────────────────

    /// Render every record as a framed, tab-separated listing.
    #[must_use]
    pub fn render(&self) -> String {
        let mut out = String::new();

        // writing into a String cannot fail
        let _ = writeln!(out, "{RULE}");
        let _ = writeln!(out, "{HEADER}");
        let _ = writeln!(out, "{RULE}");
        for record in self.select_all() {
            let _ = writeln!(out, "{record}");
        }
        let _ = writeln!(out, "{RULE}");

        out
    }

    pub(crate) fn rows(&self) -> &[Record] {
        &self.rows
    }
}

//! Module: shared
//! Responsibility: concurrent access to one `Table`.
//! Does not own: any table semantics; every call delegates to `Table`.
//! Boundary: results are owned copies so no reference outlives its guard.
//!
//! Insert and delete take the exclusive writer lock; scans and aggregates
//! take the shared reader lock, so no mutation can interleave with an
//! iteration.


use crate::{
    ConfigError, EngineConfig,
    db::{
        aggregate::{AggregateKind, AggregateOutput},
        record::{Record, RecordId, Salary},
        table::Table,
    },
    error::TableError,
    obs::MetricsSnapshot,
};
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

///
/// SharedTable
///
/// `Table` behind a single reader/writer lock.
/// Wrap in an `Arc` to hand out to several threads.
///

#[derive(Debug, Default)]
pub struct SharedTable {
    inner: RwLock<Table>,
}

impl From<Table> for SharedTable {
    fn from(table: Table) -> Self {
        Self {
            inner: RwLock::new(table),
        }
    }
}

impl SharedTable {
    #[must_use]
    pub fn new() -> Self {
        Self::from(Table::new())
    }

    /// Validate `config`, then wrap a fresh table built from it.
    pub fn try_with_config(config: EngineConfig) -> Result<Self, ConfigError> {
        Table::try_with_config(config).map(Self::from)
    }

    // A panic inside a table call cannot leave the rows half-updated,
    // so a poisoned lock is still safe to use.
    fn read(&self) -> RwLockReadGuard<'_, Table> {
        self.inner.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Table> {
        self.inner.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Run `f` against the table under the reader lock.
    pub fn with_table<R>(&self, f: impl FnOnce(&Table) -> R) -> R {
        f(&self.read())
    }

    /// Tear down the table; see [`Table::close`].
    pub fn close(self) -> usize {
        self.inner
            .into_inner()
            .unwrap_or_else(PoisonError::into_inner)
            .close()
    }

    pub fn insert(
        &self,
        name: impl Into<String>,
        address: impl Into<String>,
        salary: Salary,
    ) -> Record {
        self.write().insert(name, address, salary).clone()
    }

    pub fn select_all(&self) -> Vec<Record> {
        self.read().select_all().cloned().collect()
    }

    pub fn select_by_identity(&self, id: RecordId) -> Option<Record> {
        self.read().select_by_identity(id).cloned()
    }

    pub fn select_by_name(&self, name: &str) -> Vec<Record> {
        self.read().select_by_name(name).to_records()
    }

    pub fn delete_by_identity(&self, id: RecordId) -> Result<Record, TableError> {
        self.write().delete_by_identity(id)
    }

    pub fn delete_by_name(&self, name: &str) -> Result<Record, TableError> {
        self.write().delete_by_name(name)
    }

    pub fn aggregate(&self, kind: AggregateKind) -> Result<AggregateOutput, TableError> {
        self.read().aggregate(kind)
    }

    pub fn sum(&self) -> i128 {
        self.read().sum()
    }

    pub fn average(&self) -> Result<Salary, TableError> {
        self.read().average()
    }

    pub fn minimum(&self) -> Result<Salary, TableError> {
        self.read().minimum()
    }

    pub fn maximum(&self) -> Result<Salary, TableError> {
        self.read().maximum()
    }

    pub fn count(&self) -> usize {
        self.read().count()
    }

    pub fn metrics(&self) -> Option<MetricsSnapshot> {
        self.read().metrics()
    }

    pub fn reset_metrics(&self) {
        self.read().reset_metrics();
    }
}

//! Core runtime for empdb: the employee record, identity assignment, the
//! in-memory table engine and its salary aggregates.
#![warn(unreachable_pub)]

// public exports are one module level down
pub mod db;
pub mod error;
pub mod obs;

// test
#[cfg(test)]
pub(crate) mod test_support;

pub use empdb_config::{ConfigError, EngineConfig};

///
/// Prelude
///
/// Prelude contains the engine vocabulary only.
/// Configuration and metrics types stay behind their modules.
///

pub mod prelude {
    pub use crate::{
        db::{
            aggregate::{AggregateKind, AggregateOutput},
            record::{Record, RecordId, Salary},
            response::Rows,
            shared::SharedTable,
            table::Table,
        },
        error::TableError,
    };
}

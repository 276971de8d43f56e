use crate::db::{aggregate::AggregateKind, record::RecordId};
use std::fmt;
use thiserror::Error as ThisError;

///
/// TableError
///
/// Recoverable failures surfaced by the table engine.
/// Nothing is caught internally; every variant reaches the caller.
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
pub enum TableError {
    #[error("{table}: no record with {key}")]
    NotFound { table: String, key: LookupKey },

    #[error("{table}: cannot compute {aggregate} over an empty table")]
    EmptyAggregate {
        table: String,
        aggregate: AggregateKind,
    },
}

impl TableError {
    pub(crate) fn not_found(table: &str, key: LookupKey) -> Self {
        Self::NotFound {
            table: table.to_string(),
            key,
        }
    }

    pub(crate) fn empty_aggregate(table: &str, aggregate: AggregateKind) -> Self {
        Self::EmptyAggregate {
            table: table.to_string(),
            aggregate,
        }
    }

    #[must_use]
    pub const fn class(&self) -> ErrorClass {
        match self {
            Self::NotFound { .. } => ErrorClass::NotFound,
            Self::EmptyAggregate { .. } => ErrorClass::EmptyAggregate,
        }
    }

    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    #[must_use]
    pub const fn is_empty_aggregate(&self) -> bool {
        matches!(self, Self::EmptyAggregate { .. })
    }

    #[must_use]
    pub fn display_with_class(&self) -> String {
        format!("{}: {self}", self.class())
    }
}

///
/// LookupKey
/// The key a failed lookup was searching for.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum LookupKey {
    Identity(RecordId),
    Name(String),
}

impl fmt::Display for LookupKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Identity(id) => write!(f, "identity {id}"),
            Self::Name(name) => write!(f, "name '{name}'"),
        }
    }
}

///
/// ErrorClass
/// Error taxonomy for runtime classification.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ErrorClass {
    NotFound,
    EmptyAggregate,
}

impl fmt::Display for ErrorClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::NotFound => "not_found",
            Self::EmptyAggregate => "empty_aggregate",
        };
        write!(f, "{label}")
    }
}

///
/// TESTS
///

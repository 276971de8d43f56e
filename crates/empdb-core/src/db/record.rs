use crate::db::identity::IdGenerator;
use derive_more::Display;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Salary amount. Never validated; aggregates assume non-negative values
/// but accept anything.
pub type Salary = i64;

///
/// RecordId
///
/// Identity of one record. Assigned by [`IdGenerator`], starting at 1.
///

#[derive(
    Clone,
    Copy,
    Debug,
    Deserialize,
    Display,
    Eq,
    Hash,
    Ord,
    PartialEq,
    PartialOrd,
    Serialize,
)]
#[serde(transparent)]
pub struct RecordId(u64);

impl RecordId {
    #[must_use]
    pub const fn new(value: u64) -> Self {
        Self(value)
    }

    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl From<u64> for RecordId {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

///
/// Record
///
/// One stored employee.
/// The identity is fixed at construction; there are no setters.
///

#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct Record {
    id: RecordId,
    name: String,
    address: String,
    salary: Salary,
}

impl Record {
    /// Build a record, taking the next identity from `ids`.
    pub fn create(
        ids: &mut IdGenerator,
        name: impl Into<String>,
        address: impl Into<String>,
        salary: Salary,
    ) -> Self {
        Self {
            id: ids.next_id(),
            name: name.into(),
            address: address.into(),
            salary,
        }
    }

    #[must_use]
    pub const fn id(&self) -> RecordId {
        self.id
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn address(&self) -> &str {
        &self.address
    }

    #[must_use]
    pub const fn salary(&self) -> Salary {
        self.salary
    }
}

// one tab-separated row: identity, name, address, salary
impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}\t{}\t{}\t{}",
            self.id, self.name, self.address, self.salary
        )
    }
}

///
/// TESTS
///

use crate::db::record::{Record, RecordId};
use derive_more::{Deref, IntoIterator};

///
/// Rows
/// Borrowed scan result: matching records in insertion order.
///

#[derive(Debug, Deref, IntoIterator)]
pub struct Rows<'a>(Vec<&'a Record>);

impl<'a> Rows<'a> {
    pub(crate) const fn new(rows: Vec<&'a Record>) -> Self {
        Self(rows)
    }

    /// Collect identities in order.
    #[must_use]
    pub fn ids(&self) -> Vec<RecordId> {
        self.0.iter().map(|record| record.id()).collect()
    }

    /// First record in the result, if any.
    #[must_use]
    pub fn first(&self) -> Option<&'a Record> {
        self.0.first().copied()
    }

    /// Clone the matched records out of the table.
    #[must_use]
    pub fn to_records(&self) -> Vec<Record> {
        self.0.iter().map(|&record| record.clone()).collect()
    }
}

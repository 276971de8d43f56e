//! Module: identity
//! Responsibility: monotonic record identity assignment.
//! Does not own: record storage or deletion.
//! Boundary: the only source of `RecordId` values for a table.
//!
//! Invariants:
//! - Issued identities start at 1 and strictly increase by 1.
//! - An identity is never reissued, whatever happens to its record.
//! - Each generator is independent; tables never share counters.


use crate::db::record::RecordId;

///
/// IdGenerator
///
/// Counter of issued identities, owned by one table.
///

#[derive(Debug, Default)]
pub struct IdGenerator {
    issued: u64,
}

impl IdGenerator {
    #[must_use]
    pub const fn new() -> Self {
        Self { issued: 0 }
    }

    /// Issue the next identity.
    ///
    /// # Panics
    ///
    /// Panics once `u64::MAX` identities have been issued.
    pub fn next_id(&mut self) -> RecordId {
        self.issued = self
            .issued
            .checked_add(1)
            .expect("record identity space exhausted");

        RecordId::new(self.issued)
    }

    /// The identity the next call to `next_id` will return.
    #[must_use]
    pub const fn peek(&self) -> RecordId {
        RecordId::new(self.issued.saturating_add(1))
    }
}

//! Module: aggregate
//! Responsibility: salary aggregates over the current table contents.
//! Does not own: row storage or scan ordering.
//! Boundary: read-only terminals on `Table`; none of them mutate.
//!
//! SUM and COUNT are total and return 0 on an empty table. AVG, MIN and MAX
//! have no identity element and fail with `EmptyAggregate` instead of
//! returning a sentinel.


use crate::{
    db::{
        record::{Record, Salary},
        table::Table,
    },
    error::TableError,
    obs::MetricsEvent,
};
use derive_more::Display;
use serde::{Deserialize, Serialize};

///
/// AggregateKind
///

#[derive(Clone, Copy, Debug, Deserialize, Display, Eq, Hash, PartialEq, Serialize)]
pub enum AggregateKind {
    #[display("SUM")]
    Sum,
    #[display("AVG")]
    Average,
    #[display("MIN")]
    Minimum,
    #[display("MAX")]
    Maximum,
    #[display("COUNT")]
    Count,
}

///
/// AggregateOutput
///

#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
pub enum AggregateOutput {
    Sum(i128),
    Average(Salary),
    Minimum(Salary),
    Maximum(Salary),
    Count(usize),
}

impl AggregateOutput {
    #[must_use]
    pub const fn kind(&self) -> AggregateKind {
        match self {
            Self::Sum(_) => AggregateKind::Sum,
            Self::Average(_) => AggregateKind::Average,
            Self::Minimum(_) => AggregateKind::Minimum,
            Self::Maximum(_) => AggregateKind::Maximum,
            Self::Count(_) => AggregateKind::Count,
        }
    }

    /// The scalar result, widened to `i128`.
    #[must_use]
    pub fn value(&self) -> i128 {
        match *self {
            Self::Sum(v) => v,
            Self::Average(v) | Self::Minimum(v) | Self::Maximum(v) => i128::from(v),
            Self::Count(v) => count_to_i128(v),
        }
    }
}

impl Table {
    /// Compute one aggregate by kind.
    pub fn aggregate(&self, kind: AggregateKind) -> Result<AggregateOutput, TableError> {
        match kind {
            AggregateKind::Sum => Ok(AggregateOutput::Sum(self.sum())),
            AggregateKind::Average => self.average().map(AggregateOutput::Average),
            AggregateKind::Minimum => self.minimum().map(AggregateOutput::Minimum),
            AggregateKind::Maximum => self.maximum().map(AggregateOutput::Maximum),
            AggregateKind::Count => Ok(AggregateOutput::Count(self.count())),
        }
    }

    /// Sum of all salaries; 0 on an empty table.
    /// Accumulates in `i128`, so no realistic table can overflow it.
    #[must_use]
    pub fn sum(&self) -> i128 {
        self.record_event(MetricsEvent::Aggregate {
            kind: AggregateKind::Sum,
        });

        self.salary_sum()
    }

    /// Number of records; 0 on an empty table.
    #[must_use]
    pub fn count(&self) -> usize {
        self.record_event(MetricsEvent::Aggregate {
            kind: AggregateKind::Count,
        });

        self.len()
    }

    /// Mean salary, truncated toward zero.
    #[expect(clippy::cast_possible_truncation)]
    pub fn average(&self) -> Result<Salary, TableError> {
        // the mean of i64 values always fits in i64
        let mean = (!self.is_empty())
            .then(|| (self.salary_sum() / count_to_i128(self.len())) as Salary);

        self.settle(AggregateKind::Average, mean)
    }

    /// Smallest salary.
    pub fn minimum(&self) -> Result<Salary, TableError> {
        self.settle(AggregateKind::Minimum, self.salaries().min())
    }

    /// Largest salary.
    pub fn maximum(&self) -> Result<Salary, TableError> {
        self.settle(AggregateKind::Maximum, self.salaries().max())
    }

    fn salaries(&self) -> impl Iterator<Item = Salary> {
        self.rows().iter().map(Record::salary)
    }

    fn salary_sum(&self) -> i128 {
        self.salaries().map(i128::from).sum()
    }

    // Records the call; `None` means there were no rows to aggregate.
    fn settle<T>(&self, kind: AggregateKind, value: Option<T>) -> Result<T, TableError> {
        let Some(value) = value else {
            let err = TableError::empty_aggregate(self.name(), kind);
            tracing::warn!(
                table = %self.name(),
                aggregate = %kind,
                error = %err.display_with_class(),
                "aggregate over empty table"
            );
            self.record_event(MetricsEvent::AggregateEmpty { kind });

            return Err(err);
        };

        self.record_event(MetricsEvent::Aggregate { kind });

        Ok(value)
    }
}

fn count_to_i128(n: usize) -> i128 {
    i128::try_from(n).unwrap_or(i128::MAX)
}

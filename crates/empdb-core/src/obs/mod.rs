//! Metrics boundary.
//!
//! Table operations report through [`MetricsEvent`] into the table's own
//! [`TableMetrics`]. Callers read counters back as a [`MetricsSnapshot`].

pub mod metrics;

pub use metrics::{MetricsEvent, MetricsSnapshot, TableMetrics};

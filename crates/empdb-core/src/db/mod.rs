//! Module: db
//! Responsibility: the employee table engine and its building blocks.
//! Does not own: configuration parsing or metrics export.
//! Boundary: everything a caller needs to store, scan, delete and aggregate records.

pub mod aggregate;
pub mod identity;
pub mod record;
pub mod response;
pub mod shared;
pub mod table;
